//! Storage backends for seteuk.
//!
//! Key-value stores back the credential, knowledge-base caches and history;
//! document stores serve the fixed reference PDFs.

pub mod documents;
pub mod file_backend;
pub mod in_memory;

pub use documents::{DirectoryDocumentStore, HttpDocumentStore};
pub use file_backend::FileStore;
pub use in_memory::InMemoryStore;
