//! In-memory adapter pair standing in for the hosted backend.

mod blobs;
mod documents;

pub use blobs::MemoryBlobStore;
pub use documents::MemoryUserDocuments;
