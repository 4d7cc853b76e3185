//! Roster mutation operations.
//!
//! [`RosterService`] issues writes against the document store port and blob
//! cleanup against the blob store port. Success is observed indirectly
//! through the next pushed snapshot; the service never mutates the local
//! cache. Every operation returns a typed result so the view binding can
//! surface failures instead of losing them to a diagnostic channel.

use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use crate::domain::ports::{BlobStore, UserDocuments, UserDocumentsError};
use crate::domain::{EmployeeId, Error, NewUser, User, UserId};

/// Raw add-user form contents, prior to validation and normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddUserRequest {
    /// Employee identifier as typed; normalised to uppercase by the service.
    pub employee_id: String,
    /// Display name as typed.
    pub name: String,
    /// Trade designation as typed.
    pub trade: String,
}

/// Mutation operations over the remote roster.
#[derive(Debug, Clone)]
pub struct RosterService<D, B> {
    documents: Arc<D>,
    blobs: Arc<B>,
}

impl<D, B> RosterService<D, B> {
    /// Create a new service over the given store adapters.
    pub fn new(documents: Arc<D>, blobs: Arc<B>) -> Self {
        Self { documents, blobs }
    }
}

impl<D, B> RosterService<D, B>
where
    D: UserDocuments,
    B: BlobStore,
{
    /// Add a user to the roster.
    ///
    /// Validates the three required fields, normalises the employee id,
    /// runs the friendly pre-write existence query, then performs the
    /// atomic insert-if-absent. A concurrent insert of the same employee id
    /// loses the race inside the store and surfaces as
    /// [`ErrorCode::Duplicate`](crate::domain::ErrorCode::Duplicate).
    pub async fn add_user(&self, request: AddUserRequest) -> Result<User, Error> {
        let name = required_field(&request.name, "name")?;
        let trade = required_field(&request.trade, "trade")?;
        let employee_id = EmployeeId::new(&request.employee_id).map_err(|err| {
            Error::validation(err.to_string()).with_details(json!({ "field": "employeeId" }))
        })?;

        let existing = self
            .documents
            .find_by_employee_id(&employee_id)
            .await
            .map_err(map_documents_error)?;
        if !existing.is_empty() {
            return Err(duplicate_error(&employee_id));
        }

        let new_user = NewUser {
            id: UserId::random(),
            employee_id,
            name,
            trade,
        };
        self.documents
            .insert_unique(new_user)
            .await
            .map_err(map_documents_error)
    }

    /// Delete a user record and best-effort clean up its profile image.
    ///
    /// Blob deletion failure is logged and swallowed; it neither blocks nor
    /// rolls back the record deletion. The local cache is untouched — the
    /// row disappears with the next pushed snapshot.
    pub async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        let user = self
            .documents
            .get(id)
            .await
            .map_err(map_documents_error)?
            .ok_or_else(|| Error::not_found(format!("user record {id} does not exist")))?;

        if let Some(reference) = user.image_blob() {
            if let Err(error) = self.blobs.delete(&reference).await {
                warn!(%error, user = %id, blob = %reference, "profile image cleanup failed");
            }
        }

        self.documents.delete(id).await.map_err(map_documents_error)
    }

    /// Revoke a user's push-notification token.
    ///
    /// Clears `expoPushToken` to the empty string. Idempotent: repeating the
    /// call on an already-empty token is a no-op at the store.
    pub async fn log_out_user(&self, id: &UserId) -> Result<(), Error> {
        self.documents
            .set_push_token(id, "")
            .await
            .map_err(map_documents_error)
    }
}

fn required_field(value: &str, field: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(
            Error::validation(format!("{field} must not be empty"))
                .with_details(json!({ "field": field })),
        );
    }
    Ok(trimmed.to_owned())
}

fn duplicate_error(employee_id: &EmployeeId) -> Error {
    Error::duplicate(format!(
        "a user with employee id {employee_id} already exists"
    ))
    .with_details(json!({ "employeeId": employee_id.as_ref() }))
}

fn map_documents_error(error: UserDocumentsError) -> Error {
    match error {
        UserDocumentsError::Connection { message } => Error::unavailable(message),
        UserDocumentsError::Query { message } => Error::internal(message),
        UserDocumentsError::DuplicateEmployeeId { employee_id } => {
            duplicate_error(&employee_id)
        }
        UserDocumentsError::NotFound { id } => {
            Error::not_found(format!("user record {id} does not exist"))
        }
    }
}

#[cfg(test)]
mod tests;
