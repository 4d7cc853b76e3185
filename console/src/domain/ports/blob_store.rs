//! Port for the object storage service holding profile images.

use async_trait::async_trait;

use crate::domain::BlobRef;

/// Errors raised by blob store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlobStoreError {
    /// The referenced object does not exist.
    #[error("blob {reference} does not exist")]
    NotFound {
        /// The missing reference.
        reference: String,
    },
    /// The store failed to perform the operation.
    #[error("blob store request failed: {message}")]
    Io {
        /// Adapter-specific failure description.
        message: String,
    },
}

impl BlobStoreError {
    /// Missing object error for `reference`.
    pub fn not_found(reference: impl Into<String>) -> Self {
        Self::NotFound {
            reference: reference.into(),
        }
    }

    /// Operation failure with an adapter-specific message.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

/// Consumed capability set of the blob store: delete-by-reference only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Delete the object behind `reference`.
    async fn delete(&self, reference: &BlobRef) -> Result<(), BlobStoreError>;
}

/// Fixture implementation for tests that do not exercise blob cleanup.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBlobStore;

#[async_trait]
impl BlobStore for FixtureBlobStore {
    async fn delete(&self, _reference: &BlobRef) -> Result<(), BlobStoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the fixture adapter and error formatting.
    use super::*;

    #[tokio::test]
    async fn fixture_accepts_deletes() {
        let store = FixtureBlobStore;
        let reference = BlobRef::new("images/profile.png").expect("valid reference");
        store.delete(&reference).await.expect("fixture delete succeeds");
    }

    #[test]
    fn not_found_errors_name_the_reference() {
        let error = BlobStoreError::not_found("images/missing.png");
        assert_eq!(error.to_string(), "blob images/missing.png does not exist");
    }
}
