//! Record categories and their storage keys.

use seteuk_core::{GradeLevel, RecordType};
use std::fmt;
use std::str::FromStr;

/// A logical record category. Each has its own knowledge-base cache and
/// history under distinct storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordCategory {
    /// Subject-specific record (no record type).
    Subject,
    /// Autonomy and career activities.
    Autonomy,
    Club,
    Behavior,
}

impl RecordCategory {
    pub const ALL: [RecordCategory; 4] = [
        RecordCategory::Subject,
        RecordCategory::Autonomy,
        RecordCategory::Club,
        RecordCategory::Behavior,
    ];

    /// Prefix for this category's knowledge-base and setting keys.
    pub fn key_prefix(self) -> &'static str {
        match self {
            Self::Subject => "",
            Self::Autonomy => "autonomy_",
            Self::Club => "club_",
            Self::Behavior => "behavior_",
        }
    }

    pub fn history_key(self) -> &'static str {
        match self {
            Self::Subject => "history_subject",
            Self::Autonomy => "history_autonomy",
            Self::Club => "history_club",
            Self::Behavior => "history_behavior",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Subject => "교과 세특",
            Self::Autonomy => "자율/진로",
            Self::Club => "동아리 활동",
            Self::Behavior => "행동특성",
        }
    }

    pub fn default_record_type(self) -> Option<RecordType> {
        match self {
            Self::Subject => None,
            Self::Autonomy => Some(RecordType::Autonomy),
            Self::Club => Some(RecordType::Club),
            Self::Behavior => Some(RecordType::Behavior),
        }
    }

    /// Whether `record_type` may be generated under this category.
    pub fn accepts(self, record_type: Option<RecordType>) -> bool {
        match (self, record_type) {
            (Self::Subject, None) => true,
            (Self::Autonomy, Some(RecordType::Autonomy | RecordType::Career)) => true,
            (Self::Club, Some(RecordType::Club)) => true,
            (Self::Behavior, Some(RecordType::Behavior)) => true,
            _ => false,
        }
    }

    /// The record type to use: the requested one when accepted, else the
    /// category default.
    pub fn resolve_record_type(
        self,
        requested: Option<RecordType>,
    ) -> Result<Option<RecordType>, String> {
        match requested {
            None => Ok(self.default_record_type()),
            Some(rt) if self.accepts(Some(rt)) => Ok(Some(rt)),
            Some(rt) => Err(format!("record type '{rt}' does not belong to {}", self.label())),
        }
    }

    /// Summary stored with a history item.
    ///
    /// Autonomy/career items are always labelled by record type; the other
    /// categories prefer the custom subject name.
    pub fn history_label(
        self,
        custom_subject_name: Option<&str>,
        grade_level: GradeLevel,
        record_type: Option<RecordType>,
    ) -> String {
        if let (Self::Autonomy, Some(rt)) = (self, record_type) {
            return format!("{} - {rt}", self.label());
        }
        match custom_subject_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => format!("{} - {grade_level}", self.label()),
        }
    }
}

impl fmt::Display for RecordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecordCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "subject" | "교과" => Ok(Self::Subject),
            "autonomy" | "career" | "자율" | "진로" => Ok(Self::Autonomy),
            "club" | "동아리" => Ok(Self::Club),
            "behavior" | "behaviour" | "행특" => Ok(Self::Behavior),
            other => Err(format!(
                "unknown category '{other}' (expected subject, autonomy, club or behavior)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_distinct_per_category() {
        let history: std::collections::HashSet<_> =
            RecordCategory::ALL.iter().map(|c| c.history_key()).collect();
        assert_eq!(history.len(), 4);
        assert_eq!(RecordCategory::Club.key_prefix(), "club_");
        assert_eq!(RecordCategory::Subject.key_prefix(), "");
    }

    #[test]
    fn autonomy_accepts_career() {
        let autonomy = RecordCategory::Autonomy;
        assert_eq!(
            autonomy.resolve_record_type(Some(RecordType::Career)),
            Ok(Some(RecordType::Career))
        );
        assert_eq!(autonomy.resolve_record_type(None), Ok(Some(RecordType::Autonomy)));
        assert!(autonomy.resolve_record_type(Some(RecordType::Club)).is_err());
        assert!(RecordCategory::Subject
            .resolve_record_type(Some(RecordType::Behavior))
            .is_err());
    }

    #[test]
    fn history_labels() {
        assert_eq!(
            RecordCategory::Club.history_label(None, GradeLevel::Tier1, Some(RecordType::Club)),
            "동아리 활동 - 1등급"
        );
        assert_eq!(
            RecordCategory::Autonomy.history_label(None, GradeLevel::Tier2, Some(RecordType::Career)),
            "자율/진로 - 진로"
        );
        assert_eq!(
            RecordCategory::Subject.history_label(Some(" 정보 "), GradeLevel::Tier3, None),
            "정보"
        );
    }

    #[test]
    fn autonomy_label_ignores_subject_name() {
        assert_eq!(
            RecordCategory::Autonomy.history_label(
                Some("학생회 활동"),
                GradeLevel::Tier1,
                Some(RecordType::Autonomy)
            ),
            "자율/진로 - 자율"
        );
        assert_eq!(
            RecordCategory::Club.history_label(Some("코딩 동아리"), GradeLevel::Tier1, Some(RecordType::Club)),
            "코딩 동아리"
        );
    }

    #[test]
    fn parses_english_and_korean() {
        assert_eq!("club".parse::<RecordCategory>().unwrap(), RecordCategory::Club);
        assert_eq!("진로".parse::<RecordCategory>().unwrap(), RecordCategory::Autonomy);
        assert!("music".parse::<RecordCategory>().is_err());
    }
}
