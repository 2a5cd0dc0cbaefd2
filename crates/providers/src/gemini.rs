//! Google Gemini provider implementation.
//!
//! Talks to the `models/{model}:generateContent` endpoint of the Generative
//! Language API.
//!
//! Supports:
//! - `x-goog-api-key` header authentication, key supplied per call
//! - Inline attachments (`inlineData`) next to text parts
//! - Structured output via `responseMimeType` + `responseSchema`
//! - System instructions as a top-level field

use async_trait::async_trait;
use seteuk_config::ProviderConfig;
use seteuk_core::error::ProviderError;
use seteuk_core::provider::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini `generateContent` provider.
pub struct GeminiProvider {
    name: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a provider against the public Gemini endpoint.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_BASE_URL, 120)
    }

    /// Create a provider with a custom base URL (e.g., for testing or proxies).
    pub fn with_timeout(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "gemini".into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Build from the `[provider]` config section.
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::with_timeout(&config.api_url, config.timeout_secs)
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }

    /// Convert our segments to Gemini parts, preserving order.
    fn to_api_parts(segments: &[ContentSegment]) -> Vec<ApiPart> {
        segments
            .iter()
            .map(|segment| match segment {
                ContentSegment::Text { text } => ApiPart {
                    text: Some(text.clone()),
                    inline_data: None,
                },
                ContentSegment::Inline { mime_type, data } => ApiPart {
                    text: None,
                    inline_data: Some(ApiInlineData {
                        mime_type: mime_type.clone(),
                        data: data.clone(),
                    }),
                },
            })
            .collect()
    }

    fn build_body(request: &GenerationRequest) -> ApiRequest {
        let (response_mime_type, response_schema) = match &request.response_format {
            ResponseFormat::PlainText => ("text/plain".to_string(), None),
            ResponseFormat::Json { schema } => ("application/json".to_string(), Some(schema.clone())),
        };

        ApiRequest {
            contents: vec![ApiContent {
                role: Some("user".into()),
                parts: Self::to_api_parts(&request.segments),
            }],
            system_instruction: request.system_instruction.as_ref().map(|sys| ApiContent {
                role: None,
                parts: vec![ApiPart {
                    text: Some(sys.clone()),
                    inline_data: None,
                }],
            }),
            generation_config: ApiGenerationConfig {
                temperature: request.temperature,
                response_mime_type,
                response_schema,
            },
        }
    }

    /// Gemini reports a bad key as `400 INVALID_ARGUMENT` rather than 401.
    fn is_key_rejection(status: u16, body: &str) -> bool {
        status == 401
            || status == 403
            || (status == 400 && (body.contains("API key not valid") || body.contains("API_KEY_INVALID")))
    }

    /// Concatenate the text parts of the first candidate.
    fn extract_text(response: &ApiResponse) -> Option<String> {
        let candidate = response.candidates.as_ref()?.first()?;
        let text: String = candidate
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        credential: &str,
        request: GenerationRequest,
    ) -> std::result::Result<GenerationResponse, ProviderError> {
        let url = self.endpoint(&request.model);
        let body = Self::build_body(&request);

        debug!(
            provider = %self.name,
            model = %request.model,
            segments = request.segments.len(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", credential)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            if Self::is_key_rejection(status, &error_body) {
                return Err(ProviderError::AuthenticationFailed(
                    "Invalid API key or insufficient permissions".into(),
                ));
            }
            warn!(status, body = %error_body, "Provider returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let text = Self::extract_text(&api_response);
        trace!(chars = text.as_ref().map_or(0, |t| t.chars().count()), "Received generation");

        let usage = api_response.usage_metadata.map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
        });

        Ok(GenerationResponse {
            text,
            model: api_response.model_version.unwrap_or(request.model),
            usage,
        })
    }
}

// --- Gemini API types (internal) ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest {
    contents: Vec<ApiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<ApiContent>,
    generation_config: ApiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct ApiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ApiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<ApiInlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Option<Vec<ApiCandidate>>,
    #[serde(default)]
    usage_metadata: Option<ApiUsage>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiCandidate {
    #[serde(default)]
    content: Option<ApiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct ApiCandidateContent {
    #[serde(default)]
    parts: Vec<ApiPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn json_request() -> GenerationRequest {
        GenerationRequest {
            model: "gemini-2.5-flash".into(),
            system_instruction: Some("기록 작성 도우미".into()),
            segments: vec![
                ContentSegment::text("[지식 베이스]"),
                ContentSegment::inline("application/pdf", "JVBERi0xLjQ="),
                ContentSegment::text("최종 지시"),
            ],
            response_format: ResponseFormat::Json {
                schema: serde_json::json!({
                    "type": "OBJECT",
                    "properties": {"gradeVersion": {"type": "STRING"}},
                    "required": ["gradeVersion"]
                }),
            },
            temperature: Some(0.7),
        }
    }

    #[test]
    fn endpoint_strips_models_prefix() {
        let provider = GeminiProvider::with_timeout("https://example.com/", 5);
        assert_eq!(
            provider.endpoint("models/gemini-2.5-flash"),
            "https://example.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(provider.endpoint("gemini-2.5-flash"), provider.endpoint("models/gemini-2.5-flash"));
    }

    #[test]
    fn body_preserves_segment_order_and_schema() {
        let body = serde_json::to_value(GeminiProvider::build_body(&json_request())).unwrap();
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["text"], "[지식 베이스]");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "application/pdf");
        assert_eq!(parts[2]["text"], "최종 지시");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["required"][0], "gradeVersion");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "기록 작성 도우미");
    }

    #[test]
    fn plain_text_body_has_no_schema() {
        let mut request = json_request();
        request.response_format = ResponseFormat::PlainText;
        request.system_instruction = None;
        let body = serde_json::to_value(GeminiProvider::build_body(&request)).unwrap();
        assert_eq!(body["generationConfig"]["responseMimeType"], "text/plain");
        assert!(body["generationConfig"].get("responseSchema").is_none());
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn key_rejection_detection() {
        assert!(GeminiProvider::is_key_rejection(400, r#"{"error":{"message":"API key not valid. Please pass a valid API key."}}"#));
        assert!(GeminiProvider::is_key_rejection(403, ""));
        assert!(!GeminiProvider::is_key_rejection(400, "bad schema"));
    }

    #[test]
    fn extract_text_joins_parts_and_handles_empty() {
        let parsed: ApiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"gradeVersion\":"},{"text":"\"본문\"}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(
            GeminiProvider::extract_text(&parsed).as_deref(),
            Some("{\"gradeVersion\":\"본문\"}")
        );

        let blocked: ApiResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert!(GeminiProvider::extract_text(&blocked).is_none());
    }

    #[tokio::test]
    async fn generate_sends_key_header_and_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "{\"gradeVersion\":\"결과\"}"}]}}],
                "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 4},
                "modelVersion": "gemini-2.5-flash-001"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = GeminiProvider::with_timeout(server.uri(), 5);
        let response = provider.generate("test-key", json_request()).await.unwrap();
        assert_eq!(response.text.as_deref(), Some("{\"gradeVersion\":\"결과\"}"));
        assert_eq!(response.model, "gemini-2.5-flash-001");
        assert_eq!(response.usage.unwrap().prompt_tokens, 12);
    }

    #[tokio::test]
    async fn invalid_key_maps_to_authentication_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#,
            ))
            .mount(&server)
            .await;

        let provider = GeminiProvider::with_timeout(server.uri(), 5);
        let err = provider.generate("bad-key", json_request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::AuthenticationFailed(_)));
    }

    #[tokio::test]
    async fn server_error_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let provider = GeminiProvider::with_timeout(server.uri(), 5);
        let err = provider.generate("k", json_request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::ApiError { status_code: 503, .. }));
    }

    #[tokio::test]
    async fn empty_candidates_yield_no_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})))
            .mount(&server)
            .await;

        let provider = GeminiProvider::with_timeout(server.uri(), 5);
        let response = provider.generate("k", json_request()).await.unwrap();
        assert!(response.text.is_none());
        assert_eq!(response.model, "gemini-2.5-flash");
    }
}
