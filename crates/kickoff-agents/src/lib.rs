//! Kickoff specialist catalog and provider implementations.
//!
//! The interview controller only knows the `QuestionProvider` trait; this
//! crate supplies the builtin specialist catalog, a deterministic offline
//! provider built on it, and an HTTP adapter for a remote service.

pub mod catalog;
pub mod catalog_provider;
pub mod http_provider;

pub use catalog::{AgentProfile, default_profiles, descriptions};
pub use catalog_provider::CatalogProvider;
pub use http_provider::HttpProvider;
