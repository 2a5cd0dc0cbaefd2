//! The generation pipeline: the heart of seteuk.
//!
//! One generation follows a fixed path:
//!
//! 1. **Select** the knowledge source (custom upload, fixed record-type set,
//!    or the bundled curriculum corpora)
//! 2. **Resolve** it into content segments, fetching fixed documents
//! 3. **Derive** the length profile from grade tier and record type
//! 4. **Compose** the ordered prompt: knowledge → reports → code → checklist
//! 5. **Generate** once through the configured text generator and decode
//!    the structured answer
//!
//! Results are kept per record category in a bounded [`HistoryStore`].

pub mod category;
pub mod composer;
pub mod constraints;
pub mod credential;
pub mod history;
pub mod kb_cache;
pub mod knowledge;
pub mod orchestrator;
pub mod reference;

pub use category::RecordCategory;
pub use composer::{ComposeInput, PromptComposer};
pub use constraints::{ConstraintProfile, LengthUnit};
pub use credential::{CREDENTIAL_KEY, CredentialStore};
pub use history::{HISTORY_CAP, HistoryStore, HistoryUpdate};
pub use kb_cache::KnowledgeBaseCache;
pub use knowledge::{KnowledgeBaseResolver, KnowledgeSource};
pub use orchestrator::{LengthAudit, RecordGenerator, ResultInspector};
