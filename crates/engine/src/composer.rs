//! Prompt assembly.
//!
//! Segment order is fixed: knowledge base, report files, code files, then a
//! single instruction segment ending in the self-check list. The generator
//! treats early segments as background and the last one as the instruction.

use seteuk_core::{ContentSegment, GradeLevel, RecordType, UploadedFile};

use crate::constraints::ConstraintProfile;

/// Marker used when no draft was supplied.
pub const NO_DRAFT_MARKER: &str = "(없음. 제공된 자료를 바탕으로 새로 작성)";

/// Strip a `data:<mime>;base64,` prefix, leaving the payload.
///
/// Input without a data-URL prefix is returned unchanged.
pub fn strip_data_url(data: &str) -> &str {
    if data.starts_with("data:") {
        if let Some((_, payload)) = data.split_once(',') {
            return payload;
        }
    }
    data
}

/// Whether a report with this MIME type is sent as an attachment.
pub fn is_attachment_mime(mime_type: &str) -> bool {
    mime_type.starts_with("image/") || mime_type == "application/pdf"
}

/// Everything that goes into one prompt.
#[derive(Debug, Clone, Copy)]
pub struct ComposeInput<'a> {
    /// Already-resolved knowledge base segments.
    pub knowledge: &'a [ContentSegment],
    pub report_files: &'a [UploadedFile],
    pub code_files: &'a [UploadedFile],
    pub draft_text: &'a str,
    pub grade_level: GradeLevel,
    pub record_type: Option<RecordType>,
    pub profile: &'a ConstraintProfile,
    pub custom_subject_name: Option<&'a str>,
    pub custom_instructions: Option<&'a str>,
}

pub struct PromptComposer;

impl PromptComposer {
    pub fn compose(input: &ComposeInput<'_>) -> Vec<ContentSegment> {
        let mut segments = Vec::with_capacity(
            input.knowledge.len() + input.report_files.len() + input.code_files.len() + 1,
        );

        segments.extend_from_slice(input.knowledge);

        for file in input.report_files {
            if is_attachment_mime(&file.mime_type) {
                segments.push(ContentSegment::inline(
                    &file.mime_type,
                    strip_data_url(&file.data),
                ));
            } else {
                segments.push(ContentSegment::text(format!(
                    "[학생 보고서 파일 내용: {}]\n{}",
                    file.name, file.data
                )));
            }
        }

        for file in input.code_files {
            segments.push(ContentSegment::text(format!(
                "[학생 코드 파일 내용: {}]\n{}",
                file.name, file.data
            )));
        }

        segments.push(ContentSegment::text(Self::instruction_text(input)));
        segments
    }

    /// The closing instruction: inputs, length target and checklist.
    pub fn instruction_text(input: &ComposeInput<'_>) -> String {
        let profile = input.profile;
        let mut text = String::from("[사용자 입력 정보]\n");

        text.push_str(&format!("희망 등급: {}\n", input.grade_level.label()));
        if let Some(record_type) = input.record_type {
            text.push_str(&format!("기록 영역: {}\n", record_type.label()));
        }
        if let Some(subject) = non_blank(input.custom_subject_name) {
            text.push_str(&format!("과목/활동명: {subject}\n"));
        }
        if let Some(extra) = non_blank(input.custom_instructions) {
            text.push_str(&format!("추가 지시 사항:\n{extra}\n"));
        }

        let draft = input.draft_text.trim();
        text.push_str(&format!(
            "초안 및 메모:\n{}\n",
            if draft.is_empty() { NO_DRAFT_MARKER } else { draft }
        ));

        text.push_str(&format!(
            "\n[분량]\n{} 범위로 작성하시오. 최소 {}{}, 최대 {}{}를 지키시오.\n",
            profile.target_label(),
            profile.min_length,
            profile.unit.label(),
            profile.max_length,
            profile.unit.label(),
        ));

        text.push_str("\n[최종 생성 전 필수 검증]\n");
        text.push_str("텍스트를 출력하기 직전에 다음 항목을 하나씩 확인하고 어긋나면 스스로 고치시오:\n");
        for (i, rule) in profile.style_rules.iter().enumerate() {
            text.push_str(&format!("{}. {rule}\n", i + 1));
        }
        text.push_str(&format!(
            "{}. 분량이 {}를 벗어나면 수식어를 줄이거나 내용을 보강하여 범위 안에 맞춤.\n",
            profile.style_rules.len() + 1,
            profile.target_label(),
        ));

        text.push_str("\n위 규칙을 모두 지킨 최종 결과만 JSON으로 출력하시오.");
        text
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seteuk_core::FileCategory;

    fn profile() -> ConstraintProfile {
        ConstraintProfile::derive(GradeLevel::Tier1, None)
    }

    fn input<'a>(
        knowledge: &'a [ContentSegment],
        reports: &'a [UploadedFile],
        codes: &'a [UploadedFile],
        profile: &'a ConstraintProfile,
    ) -> ComposeInput<'a> {
        ComposeInput {
            knowledge,
            report_files: reports,
            code_files: codes,
            draft_text: "",
            grade_level: GradeLevel::Tier1,
            record_type: None,
            profile,
            custom_subject_name: None,
            custom_instructions: None,
        }
    }

    #[test]
    fn strip_data_url_handles_both_shapes() {
        assert_eq!(strip_data_url("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_url("AAAA"), "AAAA");
        assert_eq!(strip_data_url("data:broken"), "data:broken");
    }

    #[test]
    fn attachment_mime_detection() {
        assert!(is_attachment_mime("image/jpeg"));
        assert!(is_attachment_mime("application/pdf"));
        assert!(!is_attachment_mime("text/plain"));
        assert!(!is_attachment_mime("application/vnd.ms-excel"));
    }

    #[test]
    fn segments_follow_fixed_order() {
        let profile = profile();
        let knowledge = [ContentSegment::text("KB")];
        let reports = [
            UploadedFile::new("r.pdf", "application/pdf", "data:application/pdf;base64,UEQ=", FileCategory::Report),
            UploadedFile::new("r.txt", "text/plain", "보고서 본문", FileCategory::Report),
        ];
        let codes = [UploadedFile::new("main.py", "image/png", "print(1)", FileCategory::Code)];

        let segments = PromptComposer::compose(&input(&knowledge, &reports, &codes, &profile));

        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0].as_text(), Some("KB"));
        assert_eq!(segments[1], ContentSegment::inline("application/pdf", "UEQ="));
        assert_eq!(
            segments[2].as_text(),
            Some("[학생 보고서 파일 내용: r.txt]\n보고서 본문")
        );
        // code is always text, whatever its MIME type
        assert_eq!(
            segments[3].as_text(),
            Some("[학생 코드 파일 내용: main.py]\nprint(1)")
        );
        assert!(segments[4].as_text().unwrap().contains("[최종 생성 전 필수 검증]"));
    }

    #[test]
    fn instruction_carries_target_and_checklist() {
        let profile = profile();
        let text = PromptComposer::instruction_text(&input(&[], &[], &[], &profile));

        assert!(text.contains("희망 등급: 1등급"));
        assert!(text.contains(NO_DRAFT_MARKER));
        assert!(text.contains("600"));
        assert!(text.contains("650"));
        for (i, rule) in profile.style_rules.iter().enumerate() {
            assert!(text.contains(&format!("{}. {rule}", i + 1)));
        }
    }

    #[test]
    fn instruction_lines_are_laid_out_in_order() {
        let profile = profile();
        let text = PromptComposer::instruction_text(&input(&[], &[], &[], &profile));

        assert!(text.starts_with("[사용자 입력 정보]\n희망 등급: 1등급\n초안 및 메모:\n"));
        assert!(text.contains(&format!("\n[분량]\n{} 범위로 작성하시오.", profile.target_label())));
        let last_rule = format!(
            "{}. 분량이 {}를",
            profile.style_rules.len() + 1,
            profile.target_label()
        );
        assert!(text.contains(&last_rule));
        assert!(text.ends_with("최종 결과만 JSON으로 출력하시오."));
    }

    #[test]
    fn instruction_includes_optional_fields_when_present() {
        let profile = ConstraintProfile::derive(GradeLevel::Tier2, Some(RecordType::Club));
        let mut compose = input(&[], &[], &[], &profile);
        compose.grade_level = GradeLevel::Tier2;
        compose.record_type = Some(RecordType::Club);
        compose.draft_text = "로봇 동아리에서 센서 제어를 담당함";
        compose.custom_subject_name = Some("로봇공학 동아리");
        compose.custom_instructions = Some("   ");

        let text = PromptComposer::instruction_text(&compose);

        assert!(text.contains("기록 영역: 동아리"));
        assert!(text.contains("과목/활동명: 로봇공학 동아리"));
        assert!(text.contains("로봇 동아리에서 센서 제어를 담당함"));
        assert!(!text.contains(NO_DRAFT_MARKER));
        assert!(!text.contains("추가 지시 사항"));
        assert!(text.contains("1300~1400byte"));
    }
}
