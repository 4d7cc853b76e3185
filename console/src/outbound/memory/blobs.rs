//! In-memory blob store adapter.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{BlobStore, BlobStoreError};
use crate::domain::BlobRef;

/// In-memory object store keyed by reference.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashSet<String>>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object under `reference`. Test and demo helper.
    pub fn put(&self, reference: &BlobRef) {
        self.lock_objects().insert(reference.as_ref().to_owned());
    }

    /// Whether an object exists under `reference`.
    #[must_use]
    pub fn contains(&self, reference: &BlobRef) -> bool {
        self.lock_objects().contains(reference.as_ref())
    }

    fn lock_objects(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        match self.objects.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn delete(&self, reference: &BlobRef) -> Result<(), BlobStoreError> {
        let mut objects = self.lock_objects();
        if objects.remove(reference.as_ref()) {
            Ok(())
        } else {
            Err(BlobStoreError::not_found(reference.as_ref()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delete_removes_a_stored_object() {
        let store = MemoryBlobStore::new();
        let reference = BlobRef::new("images/jo.png").expect("valid reference");

        store.put(&reference);
        assert!(store.contains(&reference));

        store.delete(&reference).await.expect("delete succeeds");
        assert!(!store.contains(&reference));
    }

    #[tokio::test]
    async fn deleting_an_absent_object_reports_not_found() {
        let store = MemoryBlobStore::new();
        let reference = BlobRef::new("images/missing.png").expect("valid reference");

        let error = store.delete(&reference).await.expect_err("absent object");
        assert!(matches!(error, BlobStoreError::NotFound { .. }));
    }
}
