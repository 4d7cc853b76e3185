//! Domain ports for the hexagonal boundary.
//!
//! The core consumes two external collaborators through these traits: the
//! hosted document database behind [`UserDocuments`] and the object storage
//! service behind [`BlobStore`]. Adapters live under `crate::outbound`.

mod blob_store;
mod user_documents;

#[cfg(test)]
pub use blob_store::MockBlobStore;
pub use blob_store::{BlobStore, BlobStoreError, FixtureBlobStore};
#[cfg(test)]
pub use user_documents::MockUserDocuments;
pub use user_documents::{
    FixtureUserDocuments, RosterSnapshot, UserDocuments, UserDocumentsError,
};
