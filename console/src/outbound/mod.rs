//! Outbound adapters implementing the domain ports.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations; they contain no roster logic. The in-memory pair backs
//! tests and the demo binary; a hosted-service adapter would slot in beside
//! it without touching the domain.

pub mod memory;
