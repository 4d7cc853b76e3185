//! View-binding surface.
//!
//! The actual widgets (table grid, dialogs, buttons) are external
//! collaborators. This module exposes what they bind to: filtered rows and
//! column definitions for rendering, trigger handlers for the mutations,
//! and the dialog/pending-selection state for the confirmation flows.

pub mod columns;
pub mod controller;

pub use self::columns::{ColumnSpec, ROSTER_COLUMNS};
pub use self::controller::{AddUserForm, RosterController};
