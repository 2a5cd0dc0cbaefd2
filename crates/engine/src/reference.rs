//! Bundled reference material and fixed prompt text.

use seteuk_core::RecordType;

/// Informatics achievement standards.
pub const CURRICULUM_INFORMATICS: &str = include_str!("../reference/curriculum_informatics.md");

/// AI basics achievement standards.
pub const CURRICULUM_AI_BASICS: &str = include_str!("../reference/curriculum_ai_basics.md");

/// Exemplar record texts.
pub const STUDENT_RECORD_EXAMPLES: &str = include_str!("../reference/record_examples.md");

const CLUB_DOCUMENTS: &[&str] = &[
    "동아리 우수 사례 1.pdf",
    "동아리 우수 사례 2.pdf",
    "동아리 활동 기록 예시.pdf",
    "동아리 평가 기준.pdf",
];

const BEHAVIOR_DOCUMENTS: &[&str] = &[
    "행동특성 우수 사례.pdf",
    "행동특성 및 종합의견 작성 가이드.pdf",
];

/// Sole reference document for a record built around one dated activity.
pub const ACTIVITY_DOCUMENT: &str = "활동 없는 자율활동 생기부 (1).pdf";

const AUTONOMY_CAREER_DOCUMENTS: &[&str] = &[
    "자율활동 우수 사례.pdf",
    "진로활동 우수 사례.pdf",
    ACTIVITY_DOCUMENT,
];

/// Names of the fixed reference documents shown for a record type.
pub fn fixed_documents(record_type: RecordType) -> &'static [&'static str] {
    match record_type {
        RecordType::Club => CLUB_DOCUMENTS,
        RecordType::Behavior => BEHAVIOR_DOCUMENTS,
        RecordType::Autonomy | RecordType::Career => AUTONOMY_CAREER_DOCUMENTS,
    }
}

/// Persona sent as the system instruction of every record generation.
pub const SYSTEM_INSTRUCTION: &str = "\
당신은 대한민국 고등학교 학교생활기록부 작성을 돕는 경력 많은 교사입니다.
교사가 제공한 보고서, 코드, 초안과 참고 자료를 근거로 학생의 활동을 객관적으로 기록합니다.
관찰 가능한 활동과 그 과정에서 드러난 역량만 서술하고, 제공되지 않은 사실을 지어내지 않습니다.
문장은 학교생활기록부 기재 요령에 맞는 개조식 종결형으로 끝맺고, 요청된 JSON 형식으로만 답합니다.";

/// Header of the bundled-corpora knowledge segment.
pub const BUNDLED_KNOWLEDGE_HEADER: &str = "\
[지식 베이스: 고정 참조 자료]
작성 시 다음의 교육과정 성취기준과 우수 사례를 반드시 참고하시오.
단, **성취기준 번호(예: [12정02-04])는 절대 출력물에 포함하지 마십시오.** 내용은 녹여내되 코드는 표기하지 마십시오.
이 자료에 있는 문체와 평가 방식(구체적 알고리즘 명시, 데이터 출처 언급, 문제해결 과정 서술 등)을 철저히 벤치마킹하여 작성할 것.";

/// Header preceding user-supplied knowledge attachments.
pub const CUSTOM_KNOWLEDGE_HEADER: &str = "\
[지식 베이스: 사용자 정의 참조 자료]
작성 시 이어지는 첨부 자료의 내용과 문체를 반드시 참고하시오.
단, 성취기준 번호는 절대 출력물에 포함하지 마십시오.";

/// Correction-only instructions for text revision.
pub const REVISION_INSTRUCTIONS: &str = "\
다음 텍스트의 맞춤법과 띄어쓰기를 교정해줘.
단, 다음 규칙을 엄수해줘:
1. 학생 이름, '위 학생은', '해당 학생은' 등의 지칭 대명사 삭제.
2. '[12정00-00]' 같은 성취기준 번호 삭제.
3. '탐구 동기', '탐구 과정' 등의 섹션 헤더 삭제.
문맥과 전문 용어는 유지하고, 오타나 문법적 오류만 수정해서 결과 텍스트만 출력해:";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn club_has_four_documents() {
        assert_eq!(fixed_documents(RecordType::Club).len(), 4);
    }

    #[test]
    fn autonomy_and_career_share_a_set() {
        assert_eq!(
            fixed_documents(RecordType::Autonomy),
            fixed_documents(RecordType::Career)
        );
        assert_ne!(
            fixed_documents(RecordType::Club),
            fixed_documents(RecordType::Behavior)
        );
    }

    #[test]
    fn corpora_are_bundled() {
        assert!(CURRICULUM_INFORMATICS.contains("[12정"));
        assert!(CURRICULUM_AI_BASICS.contains("[12인기"));
        assert!(!STUDENT_RECORD_EXAMPLES.is_empty());
    }
}
