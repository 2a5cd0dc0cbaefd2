//! Length and style constraints per grade tier.
//!
//! Record-type requests are measured in record-system bytes (the external
//! quota unit); subject records are measured in characters including spaces.
//! The two units are intentionally not unified.

use seteuk_core::{GradeLevel, RecordType, byte_length};
use serde::Serialize;
use std::fmt;

/// Unit a length target is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Code points, spaces included.
    Characters,
    /// Record-system bytes: Hangul 3, everything else 1.
    Bytes,
}

impl LengthUnit {
    pub fn label(self) -> &'static str {
        match self {
            Self::Characters => "자",
            Self::Bytes => "byte",
        }
    }

    /// Length of `text` in this unit.
    pub fn measure(self, text: &str) -> usize {
        match self {
            Self::Characters => text.chars().count(),
            Self::Bytes => byte_length(text),
        }
    }
}

/// Prose rules every generated record must satisfy, in checklist order.
pub const STYLE_RULES: &[&str] = &[
    "학생 이름이나 '위 학생은', '해당 학생은', '학생은', '학습자는' 등 학생을 가리키는 지칭 표현을 쓰지 않고 주어를 생략함.",
    "[12정01-01]과 같은 성취기준 코드를 출력물에 포함하지 않음.",
    "괄호 '()'를 사용하지 않음. 단, 활동 날짜 표기(예: 2025.03.14.)는 예외로 허용함.",
    "작은따옴표와 큰따옴표는 교과명, 프로젝트명처럼 꼭 필요한 경우에만 사용함.",
    "'탐구 동기', '탐구 과정', '탐구 결과', '평가 및 피드백' 같은 섹션 헤더 표현을 쓰지 않고 자연스러운 줄글로 이어 씀.",
    "모든 문장은 '~함.', '~임.', '~음.', '~됨.', '~보임.' 가운데 하나의 형태로만 끝맺음.",
    "짧게 끊어지는 단문을 피하고 '~하여', '~하면서', '~함으로써' 같은 연결어를 사용한 복문으로 작성함.",
    "학생의 내면 상태를 단정하지 않고 '~하는 모습을 보임', '~한 것으로 보임'처럼 관찰 가능한 행동을 중심으로 서술함.",
];

/// Byte ranges for record-type requests, tier 1 first.
const BYTE_RANGES: [(usize, usize); 3] = [(1450, 1500), (1300, 1400), (1000, 1290)];

/// Character ranges for subject records, tier 1 first.
const CHAR_RANGES: [(usize, usize); 3] = [(600, 650), (500, 550), (400, 450)];

/// Target length range and style rules for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintProfile {
    pub min_length: usize,
    pub max_length: usize,
    pub unit: LengthUnit,
    pub style_rules: &'static [&'static str],
}

impl ConstraintProfile {
    /// Profile for a grade tier, with or without a record type.
    pub fn derive(grade_level: GradeLevel, record_type: Option<RecordType>) -> Self {
        let index = usize::from(grade_level.tier() - 1);
        let (unit, (min_length, max_length)) = match record_type {
            Some(_) => (LengthUnit::Bytes, BYTE_RANGES[index]),
            None => (LengthUnit::Characters, CHAR_RANGES[index]),
        };

        Self {
            min_length,
            max_length,
            unit,
            style_rules: STYLE_RULES,
        }
    }

    /// Length of `text` in this profile's unit.
    pub fn measure(&self, text: &str) -> usize {
        self.unit.measure(text)
    }

    pub fn contains(&self, length: usize) -> bool {
        (self.min_length..=self.max_length).contains(&length)
    }

    /// Human-readable target, e.g. `공백 포함 600~650자` or `1450~1500byte`.
    pub fn target_label(&self) -> String {
        match self.unit {
            LengthUnit::Characters => {
                format!("공백 포함 {}~{}자", self.min_length, self.max_length)
            }
            LengthUnit::Bytes => format!(
                "{}~{}byte (한글 1자 3byte, 영문·숫자·공백·기호 1byte)",
                self.min_length, self.max_length
            ),
        }
    }
}

impl fmt::Display for ConstraintProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}{}", self.min_length, self.max_length, self.unit.label())
    }
}
