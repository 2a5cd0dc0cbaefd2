//! # seteuk core
//!
//! Domain types, capability traits, and error definitions for the seteuk
//! student-record assistant. This crate has **zero framework dependencies**:
//! it defines the domain model that every other crate implements against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (text generator, static document store,
//! durable key-value storage) is a trait here. Implementations live in their
//! respective crates, so the engine can be exercised against mocks and the
//! composition root picks concrete backends from configuration.

pub mod error;
pub mod metrics;
pub mod provider;
pub mod record;
pub mod storage;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use metrics::{TextMetrics, byte_length};
pub use provider::{
    ContentSegment, GenerationRequest, GenerationResponse, ResponseFormat, TextGenerator,
};
pub use record::{
    DatedActivity, FileCategory, GeneratedResult, GenerationParams, GradeLevel, HistoryItem, KnowledgeEntry,
    RecordType, UploadedFile,
};
pub use storage::{DocumentStore, KeyValueStore};
