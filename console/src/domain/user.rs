//! Roster record model.
//!
//! [`User`] mirrors one document of the remote "Users" collection. Field
//! names on the wire stay camelCase for compatibility with documents written
//! by other clients, and fields those clients may omit (`name`, `trade`,
//! `imageUrl`, `expoPushToken`) default to the empty string so a partial
//! document still deserialises.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the record newtype constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The user id was not a valid UUID.
    InvalidId,
    /// The employee id was empty once trimmed.
    EmptyEmployeeId,
    /// The blob reference was empty once trimmed.
    EmptyBlobRef,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyEmployeeId => write!(f, "employee id must not be empty"),
            Self::EmptyBlobRef => write!(f, "blob reference must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable record identifier, generated client-side before the record exists
/// remotely. The insert is the creation event, not the id generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a fresh random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Employee identifier, uppercase-normalised and unique across the roster.
///
/// Normalisation happens here, at construction, so every path into the core
/// (form input, service request, deserialised document) agrees on the
/// canonical casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Validate, trim, and uppercase-normalise an employee id.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmployeeId);
        }
        Ok(Self(trimmed.to_uppercase()))
    }
}

impl AsRef<str> for EmployeeId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmployeeId> for String {
    fn from(value: EmployeeId) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmployeeId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Pointer from a record to an object in the blob store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobRef(String);

impl BlobRef {
    /// Validate and construct a [`BlobRef`] from a non-empty reference.
    pub fn new(reference: impl Into<String>) -> Result<Self, UserValidationError> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            return Err(UserValidationError::EmptyBlobRef);
        }
        Ok(Self(reference))
    }
}

impl AsRef<str> for BlobRef {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BlobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// One roster record, mirrored from the remote collection.
///
/// ## Invariants
/// - `employee_id` is uppercase-normalised and unique across the roster.
/// - `created_at` is assigned by the store at insert time.
/// - An empty `expo_push_token` means the user is logged out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable record identifier.
    pub id: UserId,
    /// Uppercase-normalised employee identifier.
    pub employee_id: EmployeeId,
    /// Display name; empty when the writing client omitted it.
    #[serde(default)]
    pub name: String,
    /// Trade designation; empty when the writing client omitted it.
    #[serde(default)]
    pub trade: String,
    /// Profile image reference in the blob store; empty when absent.
    #[serde(default)]
    pub image_url: String,
    /// Push-notification token; empty means "logged out".
    #[serde(default)]
    pub expo_push_token: String,
    /// Server-assigned creation time.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Blob reference for the profile image, when one is set.
    #[must_use]
    pub fn image_blob(&self) -> Option<BlobRef> {
        BlobRef::new(self.image_url.as_str()).ok()
    }

    /// Whether the record currently holds a usable push token.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        !self.expo_push_token.trim().is_empty()
    }
}

/// Record contents for an insert; the store assigns the creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Client-generated record identifier.
    pub id: UserId,
    /// Uppercase-normalised employee identifier.
    pub employee_id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Trade designation.
    pub trade: String,
}
