//! Knowledge base resolution.
//!
//! Decides which reference material accompanies a request and turns it into
//! content segments. Only the fixed-set case performs I/O.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures::future::join_all;
use seteuk_core::{ContentSegment, DocumentStore, GenerationParams, KnowledgeEntry, RecordType};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::composer::strip_data_url;
use crate::reference;

/// MIME type attached to every fixed reference document.
const FIXED_DOCUMENT_MIME: &str = "application/pdf";

/// Where the reference material for one request comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeSource {
    /// No upload and no record type: the bundled curriculum corpora.
    None,
    /// Documents uploaded by the user.
    Inline(Vec<KnowledgeEntry>),
    /// The fixed document list for a record type.
    FixedSet(RecordType),
    /// The single document for a dated autonomy or career activity; resolves
    /// to `fallback` when it cannot be fetched.
    ActivityDocument { fallback: Box<KnowledgeSource> },
}

impl KnowledgeSource {
    /// First match wins: uploads, then record type, then bundled corpora.
    pub fn select(custom: &[KnowledgeEntry], record_type: Option<RecordType>) -> Self {
        if !custom.is_empty() {
            return Self::Inline(custom.to_vec());
        }
        match record_type {
            Some(rt) => Self::FixedSet(rt),
            None => Self::None,
        }
    }

    /// [`select`](Self::select), except that a dated autonomy or career
    /// activity prefers its own document over everything else.
    pub fn for_params(params: &GenerationParams) -> Self {
        let regular = Self::select(&params.custom_knowledge_base, params.record_type);
        let autonomy_path = matches!(
            params.record_type,
            Some(RecordType::Autonomy | RecordType::Career)
        );
        if autonomy_path && params.dated_activity().is_some() {
            return Self::ActivityDocument {
                fallback: Box::new(regular),
            };
        }
        regular
    }
}

/// Turns a [`KnowledgeSource`] into prompt segments.
pub struct KnowledgeBaseResolver {
    documents: Arc<dyn DocumentStore>,
}

impl KnowledgeBaseResolver {
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }

    pub async fn resolve(&self, source: &KnowledgeSource) -> Vec<ContentSegment> {
        let mut source = source;
        loop {
            match source {
                KnowledgeSource::Inline(entries) => return Self::inline_segments(entries),
                KnowledgeSource::FixedSet(record_type) => {
                    return self.fetch_fixed(*record_type).await;
                }
                KnowledgeSource::None => return vec![Self::bundled_segment()],
                KnowledgeSource::ActivityDocument { fallback } => {
                    if let Some(segment) = self.fetch_activity_document().await {
                        return vec![segment];
                    }
                    source = fallback.as_ref();
                }
            }
        }
    }

    fn inline_segments(entries: &[KnowledgeEntry]) -> Vec<ContentSegment> {
        let mut segments = Vec::with_capacity(entries.len() + 1);
        segments.push(ContentSegment::text(reference::CUSTOM_KNOWLEDGE_HEADER));
        segments.extend(
            entries
                .iter()
                .map(|e| ContentSegment::inline(&e.mime_type, strip_data_url(&e.data))),
        );
        segments
    }

    /// Fetch every document for the record type concurrently.
    ///
    /// A document that cannot be fetched is logged and left out.
    async fn fetch_fixed(&self, record_type: RecordType) -> Vec<ContentSegment> {
        let names = reference::fixed_documents(record_type);
        debug!(
            record_type = %record_type,
            store = self.documents.name(),
            count = names.len(),
            "Fetching fixed reference documents"
        );

        let fetches = names.iter().map(|name| async move {
            (*name, self.documents.fetch(name).await)
        });

        join_all(fetches)
            .await
            .into_iter()
            .filter_map(|(name, fetched)| match fetched {
                Ok(bytes) => Some(ContentSegment::inline(
                    FIXED_DOCUMENT_MIME,
                    STANDARD.encode(bytes),
                )),
                Err(e) => {
                    warn!(document = name, error = %e, "Reference document unavailable, skipping");
                    None
                }
            })
            .collect()
    }

    async fn fetch_activity_document(&self) -> Option<ContentSegment> {
        match self.documents.fetch(reference::ACTIVITY_DOCUMENT).await {
            Ok(bytes) => Some(ContentSegment::inline(FIXED_DOCUMENT_MIME, STANDARD.encode(bytes))),
            Err(e) => {
                warn!(
                    document = reference::ACTIVITY_DOCUMENT,
                    error = %e,
                    "Activity reference document unavailable, using the regular knowledge base"
                );
                None
            }
        }
    }

    fn bundled_segment() -> ContentSegment {
        ContentSegment::text(format!(
            "{}\n\n{}\n\n{}\n\n{}",
            reference::BUNDLED_KNOWLEDGE_HEADER,
            reference::CURRICULUM_INFORMATICS,
            reference::CURRICULUM_AI_BASICS,
            reference::STUDENT_RECORD_EXAMPLES,
        ))
    }
}
