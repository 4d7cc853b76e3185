//! In-memory document store adapter.
//!
//! Stands in for the hosted document database in tests and the demo binary.
//! Every mutation publishes a fresh full-collection snapshot on a watch
//! channel, mirroring a push-based subscription: subscribers receive the
//! current snapshot immediately and each subsequent one after that.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use futures_util::stream::BoxStream;
use futures_util::StreamExt as _;
use tokio::sync::watch;

use crate::domain::ports::{RosterSnapshot, UserDocuments, UserDocumentsError};
use crate::domain::{EmployeeId, NewUser, User, UserId};

/// In-memory Users collection with a push-based snapshot feed.
pub struct MemoryUserDocuments {
    records: Mutex<HashMap<UserId, User>>,
    snapshots: watch::Sender<RosterSnapshot>,
}

impl MemoryUserDocuments {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        let (snapshots, _) = watch::channel(RosterSnapshot::default());
        Self {
            records: Mutex::new(HashMap::new()),
            snapshots,
        }
    }

    /// Insert a fully formed record, bypassing uniqueness checks.
    ///
    /// Test and demo helper for seeding records that carry an image
    /// reference or push token, which [`UserDocuments::insert_unique`]
    /// never writes.
    pub fn seed(&self, user: User) {
        let mut records = self.lock_records();
        records.insert(user.id.clone(), user);
        self.publish(&records);
    }

    fn lock_records(&self) -> std::sync::MutexGuard<'_, HashMap<UserId, User>> {
        // Lock poisoning only happens if a writer panicked; the collection
        // is still coherent for this process-local stand-in.
        match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn publish(&self, records: &HashMap<UserId, User>) {
        let mut users: Vec<User> = records.values().cloned().collect();
        users.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.employee_id.as_ref().cmp(b.employee_id.as_ref()))
        });
        let _ = self.snapshots.send(RosterSnapshot { users });
    }
}

impl Default for MemoryUserDocuments {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDocuments for MemoryUserDocuments {
    async fn subscribe(&self) -> Result<BoxStream<'static, RosterSnapshot>, UserDocumentsError> {
        let receiver = self.snapshots.subscribe();
        let stream = futures_util::stream::unfold(
            (receiver, true),
            |(mut receiver, initial)| async move {
                if initial {
                    let snapshot = receiver.borrow_and_update().clone();
                    return Some((snapshot, (receiver, false)));
                }
                match receiver.changed().await {
                    Ok(()) => {
                        let snapshot = receiver.borrow_and_update().clone();
                        Some((snapshot, (receiver, false)))
                    }
                    Err(_) => None,
                }
            },
        );
        Ok(stream.boxed())
    }

    async fn find_by_employee_id(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Vec<User>, UserDocumentsError> {
        let records = self.lock_records();
        Ok(records
            .values()
            .filter(|user| &user.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, UserDocumentsError> {
        let records = self.lock_records();
        Ok(records.get(id).cloned())
    }

    async fn insert_unique(&self, user: NewUser) -> Result<User, UserDocumentsError> {
        let mut records = self.lock_records();
        // Uniqueness check and insert happen under the same lock, so two
        // concurrent inserts of one employee id cannot both succeed.
        if records
            .values()
            .any(|existing| existing.employee_id == user.employee_id)
        {
            return Err(UserDocumentsError::duplicate_employee_id(user.employee_id));
        }

        let stored = User {
            id: user.id,
            employee_id: user.employee_id,
            name: user.name,
            trade: user.trade,
            image_url: String::new(),
            expo_push_token: String::new(),
            created_at: Utc::now(),
        };
        records.insert(stored.id.clone(), stored.clone());
        self.publish(&records);
        Ok(stored)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserDocumentsError> {
        let mut records = self.lock_records();
        if records.remove(id).is_some() {
            self.publish(&records);
        }
        Ok(())
    }

    async fn set_push_token(&self, id: &UserId, token: &str) -> Result<(), UserDocumentsError> {
        let mut records = self.lock_records();
        let Some(user) = records.get_mut(id) else {
            return Err(UserDocumentsError::not_found(id.clone()));
        };
        user.expo_push_token = token.to_owned();
        self.publish(&records);
        Ok(())
    }
}
