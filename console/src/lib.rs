//! Data-synchronization core of the employee-roster admin console.
//!
//! The crate keeps an in-memory mirror of a remote "Users" collection
//! current through one standing subscription, filters it with a pure search
//! function, and issues add/delete/logout mutations with typed outcomes.
//! The table widget and dialogs are external collaborators binding to
//! [`view::RosterController`]; the remote document database and blob store
//! are consumed through the ports in [`domain::ports`].

pub mod domain;
pub mod outbound;
pub mod view;
