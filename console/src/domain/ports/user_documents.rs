//! Port for the remote document database's Users collection.
//!
//! The port is typed to the single Users collection rather than taking a
//! collection name: the core assumes one collection and one live
//! subscription, and a typed surface keeps adapters honest about what the
//! view actually consumes.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::domain::{EmployeeId, NewUser, User, UserId};

/// Errors raised by document store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserDocumentsError {
    /// The store could not be reached.
    #[error("document store connection failed: {message}")]
    Connection {
        /// Adapter-specific connection failure description.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("document store request failed: {message}")]
    Query {
        /// Adapter-specific request failure description.
        message: String,
    },
    /// An insert collided with an existing record's employee id.
    #[error("employee id {employee_id} is already registered")]
    DuplicateEmployeeId {
        /// The employee id that already exists.
        employee_id: EmployeeId,
    },
    /// The targeted record does not exist.
    #[error("user record {id} does not exist")]
    NotFound {
        /// The missing record id.
        id: UserId,
    },
}

impl UserDocumentsError {
    /// Connection failure with an adapter-specific message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Request failure with an adapter-specific message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Unique-key collision on `employee_id`.
    #[must_use]
    pub fn duplicate_employee_id(employee_id: EmployeeId) -> Self {
        Self::DuplicateEmployeeId { employee_id }
    }

    /// Missing record error for `id`.
    #[must_use]
    pub fn not_found(id: UserId) -> Self {
        Self::NotFound { id }
    }
}

/// A full point-in-time listing of the Users collection, as delivered by the
/// subscription. Consumers replace their entire state with each snapshot; no
/// incremental patching is defined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSnapshot {
    /// Every record in the collection at the time of the snapshot.
    pub users: Vec<User>,
}

impl RosterSnapshot {
    /// Number of records in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the snapshot holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Whether the snapshot contains a record with `id`.
    #[must_use]
    pub fn contains(&self, id: &UserId) -> bool {
        self.users.iter().any(|user| &user.id == id)
    }
}

/// Consumed capability set of the remote document database.
///
/// # Uniqueness
///
/// [`UserDocuments::insert_unique`] must be an atomic "insert if absent by
/// employee id". Callers may still run a friendly pre-write existence query,
/// but correctness does not depend on it: two concurrent inserts of the same
/// employee id yield exactly one success and one
/// [`UserDocumentsError::DuplicateEmployeeId`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDocuments: Send + Sync {
    /// Open the standing subscription to full-collection snapshots.
    ///
    /// The stream is cancelled by dropping it; adapters must stop producing
    /// once the stream is dropped.
    async fn subscribe(&self) -> Result<BoxStream<'static, RosterSnapshot>, UserDocumentsError>;

    /// Point-in-time read of all records matching `employee_id`.
    async fn find_by_employee_id(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Vec<User>, UserDocumentsError>;

    /// Fetch a record by id, or `None` when absent.
    async fn get(&self, id: &UserId) -> Result<Option<User>, UserDocumentsError>;

    /// Atomically insert a record unless its employee id already exists.
    ///
    /// The adapter stamps the server-assigned creation time and returns the
    /// stored record.
    async fn insert_unique(&self, user: NewUser) -> Result<User, UserDocumentsError>;

    /// Delete a record by id. Deleting an absent record succeeds.
    async fn delete(&self, id: &UserId) -> Result<(), UserDocumentsError>;

    /// Partial update setting only the push token field.
    ///
    /// Fails with [`UserDocumentsError::NotFound`] when the record is absent.
    async fn set_push_token(&self, id: &UserId, token: &str) -> Result<(), UserDocumentsError>;
}

/// Fixture implementation for tests that do not exercise the store.
///
/// The subscription ends immediately, reads return nothing, and mutations
/// succeed without effect (inserts echo the record back with the current
/// time as the creation stamp).
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDocuments;

#[async_trait]
impl UserDocuments for FixtureUserDocuments {
    async fn subscribe(&self) -> Result<BoxStream<'static, RosterSnapshot>, UserDocumentsError> {
        use futures_util::StreamExt as _;
        Ok(futures_util::stream::empty().boxed())
    }

    async fn find_by_employee_id(
        &self,
        _employee_id: &EmployeeId,
    ) -> Result<Vec<User>, UserDocumentsError> {
        Ok(Vec::new())
    }

    async fn get(&self, _id: &UserId) -> Result<Option<User>, UserDocumentsError> {
        Ok(None)
    }

    async fn insert_unique(&self, user: NewUser) -> Result<User, UserDocumentsError> {
        Ok(User {
            id: user.id,
            employee_id: user.employee_id,
            name: user.name,
            trade: user.trade,
            image_url: String::new(),
            expo_push_token: String::new(),
            created_at: chrono::Utc::now(),
        })
    }

    async fn delete(&self, _id: &UserId) -> Result<(), UserDocumentsError> {
        Ok(())
    }

    async fn set_push_token(&self, _id: &UserId, _token: &str) -> Result<(), UserDocumentsError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the fixture adapter and error formatting.
    use futures_util::StreamExt as _;

    use super::*;

    #[tokio::test]
    async fn fixture_subscription_ends_immediately() {
        let store = FixtureUserDocuments;
        let mut stream = store.subscribe().await.expect("fixture subscribes");
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn fixture_insert_echoes_the_record() {
        let store = FixtureUserDocuments;
        let id = UserId::random();
        let new_user = NewUser {
            id: id.clone(),
            employee_id: EmployeeId::new("A1").expect("valid employee id"),
            name: "Jo".into(),
            trade: "Elec".into(),
        };

        let stored = store.insert_unique(new_user).await.expect("insert succeeds");
        assert_eq!(stored.id, id);
        assert_eq!(stored.employee_id.as_ref(), "A1");
        assert!(!stored.is_logged_in());
    }

    #[test]
    fn duplicate_errors_name_the_employee_id() {
        let employee_id = EmployeeId::new("b2").expect("valid employee id");
        let error = UserDocumentsError::duplicate_employee_id(employee_id);
        assert_eq!(error.to_string(), "employee id B2 is already registered");
    }

    #[test]
    fn snapshot_contains_checks_record_ids() {
        let snapshot = RosterSnapshot::default();
        assert!(snapshot.is_empty());
        assert!(!snapshot.contains(&UserId::random()));
    }
}
