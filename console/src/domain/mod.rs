//! Domain core: records, typed errors, the live roster cache, the pure
//! search filter, and the mutation operations.
//!
//! Everything here is transport and widget agnostic. The view binding in
//! [`crate::view`] consumes these types; adapters in [`crate::outbound`]
//! implement the ports in [`ports`].

pub mod error;
pub mod ports;
pub mod roster_service;
pub mod roster_session;
pub mod search;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::roster_service::{AddUserRequest, RosterService};
pub use self::roster_session::{RosterSession, RosterWatch};
pub use self::user::{BlobRef, EmployeeId, NewUser, User, UserId, UserValidationError};
