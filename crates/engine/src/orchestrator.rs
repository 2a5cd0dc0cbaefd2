//! End-to-end record generation.
//!
//! [`RecordGenerator`] drives one generation: knowledge base → constraint
//! profile → prompt → one generator call → structured decode. It never
//! retries and never checks the returned length itself; installed
//! [`ResultInspector`]s may observe the result afterwards.

use seteuk_core::{
    ContentSegment, Error, GeneratedResult, GenerationParams, GenerationRequest, ResponseFormat,
    Result, TextGenerator,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

use crate::composer::{ComposeInput, PromptComposer};
use crate::constraints::ConstraintProfile;
use crate::knowledge::{KnowledgeBaseResolver, KnowledgeSource};
use crate::reference;

const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Observes a successful generation. Cannot change the result.
pub trait ResultInspector: Send + Sync {
    fn name(&self) -> &str;

    fn inspect(&self, result: &GeneratedResult, profile: &ConstraintProfile);
}

/// Logs a warning when the generated text falls outside the target range.
pub struct LengthAudit;

impl ResultInspector for LengthAudit {
    fn name(&self) -> &str {
        "length_audit"
    }

    fn inspect(&self, result: &GeneratedResult, profile: &ConstraintProfile) {
        let length = profile.measure(&result.grade_version);
        if profile.contains(length) {
            debug!(length, target = %profile, "Generated text within target range");
        } else {
            warn!(length, target = %profile, "Generated text outside target range");
        }
    }
}

/// Drives record generation and revision through a [`TextGenerator`].
pub struct RecordGenerator {
    generator: Arc<dyn TextGenerator>,
    resolver: KnowledgeBaseResolver,
    model: String,
    temperature: f32,
    inspectors: Vec<Arc<dyn ResultInspector>>,
}

impl RecordGenerator {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        resolver: KnowledgeBaseResolver,
        model: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            resolver,
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            inspectors: Vec::new(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Install an inspector run after every successful generation.
    pub fn with_inspector(mut self, inspector: Arc<dyn ResultInspector>) -> Self {
        self.inspectors.push(inspector);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a record. Fails with [`Error::Config`] before doing any work
    /// when no credential is supplied.
    pub async fn generate(
        &self,
        params: &GenerationParams,
        credential: Option<&str>,
    ) -> Result<GeneratedResult> {
        let credential = require_credential(credential)?;

        let source = KnowledgeSource::for_params(params);
        let knowledge = self.resolver.resolve(&source).await;
        let profile = ConstraintProfile::derive(params.grade_level, params.record_type);
        let draft = effective_draft(params);

        let segments = PromptComposer::compose(&ComposeInput {
            knowledge: &knowledge,
            report_files: &params.report_files,
            code_files: &params.code_files,
            draft_text: &draft,
            grade_level: params.grade_level,
            record_type: params.record_type,
            profile: &profile,
            custom_subject_name: params.custom_subject_name.as_deref(),
            custom_instructions: params.custom_instructions.as_deref(),
        });

        debug!(
            generator = self.generator.name(),
            model = %self.model,
            grade = %params.grade_level,
            target = %profile,
            segments = segments.len(),
            "Dispatching generation request"
        );
        trace!(
            inline = segments.iter().filter(|s| s.is_inline()).count(),
            "Prompt attachment count"
        );

        let request = GenerationRequest {
            model: self.model.clone(),
            system_instruction: Some(reference::SYSTEM_INSTRUCTION.to_string()),
            segments,
            response_format: ResponseFormat::Json {
                schema: result_schema(&profile),
            },
            temperature: Some(self.temperature),
        };

        let response = self.generator.generate(credential, request).await?;
        let text = response
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or(Error::EmptyResult)?;

        let result: GeneratedResult = serde_json::from_str(&text)
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;

        info!(
            model = %response.model,
            length = profile.measure(&result.grade_version),
            unit = profile.unit.label(),
            "Record generated"
        );

        for inspector in &self.inspectors {
            trace!(inspector = inspector.name(), "Running result inspector");
            inspector.inspect(&result, &profile);
        }

        Ok(result)
    }

    /// Correct spelling and spacing of `text` without length constraints.
    ///
    /// An empty generator answer returns the input unchanged.
    pub async fn revise_text(&self, text: &str, credential: Option<&str>) -> Result<String> {
        let credential = require_credential(credential)?;

        let request = GenerationRequest {
            model: self.model.clone(),
            system_instruction: None,
            segments: vec![ContentSegment::text(format!(
                "{}\n\n{text}",
                reference::REVISION_INSTRUCTIONS
            ))],
            response_format: ResponseFormat::PlainText,
            temperature: None,
        };

        debug!(generator = self.generator.name(), chars = text.chars().count(), "Dispatching revision request");
        let response = self.generator.generate(credential, request).await?;

        match response.text.filter(|t| !t.trim().is_empty()) {
            Some(revised) => Ok(revised),
            None => {
                warn!("Revision returned no text, keeping the original");
                Ok(text.to_string())
            }
        }
    }
}

fn require_credential(credential: Option<&str>) -> Result<&str> {
    credential
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| Error::config("an API key is required before generating"))
}

/// Structured-output schema for a record; the field description repeats the
/// length target.
pub fn result_schema(profile: &ConstraintProfile) -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "gradeVersion": {
                "type": "STRING",
                "description": format!(
                    "{} 범위로 작성된 최종 기록 (학생 이름, 성취기준 번호, 섹션 헤더, 괄호, 불필요한 따옴표 미포함)",
                    profile.target_label()
                ),
            }
        },
        "required": ["gradeVersion"],
    })
}

/// Draft text with the dated-activity opening requirement folded in.
pub fn effective_draft(params: &GenerationParams) -> String {
    let Some(activity) = params.dated_activity() else {
        return params.draft_text.clone();
    };

    let stamp = activity.stamp();
    let description = activity.description.trim();
    format!(
        "[필수 포함 조건]\n문장을 시작할 때 반드시 다음 형식을 정확히 지켜서 작성하시오: \"{description}({stamp})을 통해~\"\n\n\
         [활동 정보]\n날짜: {stamp}\n활동 내용: {description}\n\n{}",
        params.draft_text
    )
}
