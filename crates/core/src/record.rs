//! Record domain types.
//!
//! These are the value objects that flow through a generation:
//! caller builds [`GenerationParams`] → engine resolves knowledge and
//! constraints → generator produces a [`GeneratedResult`] → the result is
//! kept as a [`HistoryItem`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target density of the generated record. Tier 1 is the most detailed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GradeLevel {
    #[serde(rename = "1등급")]
    Tier1,
    #[serde(rename = "2등급")]
    Tier2,
    #[serde(rename = "3등급")]
    Tier3,
}

impl GradeLevel {
    pub const ALL: [GradeLevel; 3] = [GradeLevel::Tier1, GradeLevel::Tier2, GradeLevel::Tier3];

    /// Ordinal tier number (1..=3).
    pub fn tier(self) -> u8 {
        match self {
            Self::Tier1 => 1,
            Self::Tier2 => 2,
            Self::Tier3 => 3,
        }
    }

    /// Label shown to users and to the generator.
    pub fn label(self) -> &'static str {
        match self {
            Self::Tier1 => "1등급",
            Self::Tier2 => "2등급",
            Self::Tier3 => "3등급",
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GradeLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "1등급" | "tier1" => Ok(Self::Tier1),
            "2" | "2등급" | "tier2" => Ok(Self::Tier2),
            "3" | "3등급" | "tier3" => Ok(Self::Tier3),
            other => Err(format!("unknown grade level '{other}' (expected 1, 2 or 3)")),
        }
    }
}

/// Which kind of activity record is being written.
///
/// Absence of a record type means a subject-specific record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    #[serde(rename = "자율")]
    Autonomy,
    #[serde(rename = "진로")]
    Career,
    #[serde(rename = "동아리")]
    Club,
    #[serde(rename = "행특")]
    Behavior,
}

impl RecordType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Autonomy => "자율",
            Self::Career => "진로",
            Self::Club => "동아리",
            Self::Behavior => "행특",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "autonomy" | "자율" => Ok(Self::Autonomy),
            "career" | "진로" => Ok(Self::Career),
            "club" | "동아리" => Ok(Self::Club),
            "behavior" | "behaviour" | "행특" => Ok(Self::Behavior),
            other => Err(format!(
                "unknown record type '{other}' (expected autonomy, career, club or behavior)"
            )),
        }
    }
}

/// Role an uploaded file plays in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Report,
    Code,
    Knowledge,
}

/// A file supplied by the user. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,

    /// MIME type as reported by the uploader.
    #[serde(rename = "type")]
    pub mime_type: String,

    /// Raw text, base64, or a `data:` URL.
    pub data: String,

    pub category: FileCategory,
}

impl UploadedFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<String>,
        category: FileCategory,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
            category,
        }
    }

    /// The knowledge-base view of this file.
    pub fn to_knowledge_entry(&self) -> KnowledgeEntry {
        KnowledgeEntry {
            data: self.data.clone(),
            mime_type: self.mime_type.clone(),
        }
    }
}

/// One user-supplied reference document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeEntry {
    pub data: String,
    pub mime_type: String,
}

/// A dated activity the record must open with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedActivity {
    pub description: String,
    pub date: NaiveDate,
}

impl DatedActivity {
    /// Date stamp in the record convention, e.g. `2025.03.14.`
    pub fn stamp(&self) -> String {
        self.date.format("%Y.%m.%d.").to_string()
    }
}

/// Everything one generation needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    #[serde(default)]
    pub report_files: Vec<UploadedFile>,

    #[serde(default)]
    pub code_files: Vec<UploadedFile>,

    #[serde(default)]
    pub draft_text: String,

    pub grade_level: GradeLevel,

    /// `None` means a subject-specific record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_knowledge_base: Vec<KnowledgeEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_subject_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<DatedActivity>,
}

impl GenerationParams {
    /// Params with only a grade level set.
    pub fn new(grade_level: GradeLevel) -> Self {
        Self {
            report_files: Vec::new(),
            code_files: Vec::new(),
            draft_text: String::new(),
            grade_level,
            record_type: None,
            custom_knowledge_base: Vec::new(),
            custom_subject_name: None,
            custom_instructions: None,
            activity: None,
        }
    }

    /// Whether any source material at all was supplied.
    pub fn has_material(&self) -> bool {
        !self.report_files.is_empty()
            || !self.code_files.is_empty()
            || !self.draft_text.trim().is_empty()
            || self.dated_activity().is_some()
    }

    /// The dated activity, unless its description is blank.
    pub fn dated_activity(&self) -> Option<&DatedActivity> {
        self.activity
            .as_ref()
            .filter(|a| !a.description.trim().is_empty())
    }
}

/// Output of one generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResult {
    pub grade_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary500: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary300: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary150: Option<String>,
}

impl GeneratedResult {
    pub fn new(grade_version: impl Into<String>) -> Self {
        Self {
            grade_version: grade_version.into(),
            summary500: None,
            summary300: None,
            summary150: None,
        }
    }
}

/// One persisted past result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,

    /// Creation time, epoch milliseconds.
    pub timestamp: i64,

    pub result: GeneratedResult,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}
