use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct GenerateContentRequest {
    pub(super) contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub(super) generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub(super) struct Content {
    pub(super) role: &'static str,
    pub(super) parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub(super) struct Part {
    pub(super) text: String,
}

#[derive(Debug, Serialize)]
pub(super) struct GenerationConfig {
    pub(super) temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    pub(super) max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateContentResponse {
    #[serde(default)]
    pub(super) candidates: Vec<Candidate>,
    pub(super) error: Option<ApiError>,
    #[serde(rename = "promptFeedback")]
    pub(super) prompt_feedback: Option<PromptFeedback>,
    #[serde(rename = "usageMetadata")]
    pub(super) usage_metadata: Option<UsageMetadata>,
    #[serde(rename = "modelVersion")]
    pub(super) model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    pub(super) prompt_token_count: u64,
    #[serde(rename = "candidatesTokenCount", default)]
    pub(super) candidates_token_count: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct Candidate {
    #[serde(default)]
    pub(super) content: CandidateContent,
    #[serde(rename = "finishReason")]
    pub(super) finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct CandidateContent {
    #[serde(default)]
    pub(super) parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResponsePart {
    pub(super) text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PromptFeedback {
    #[serde(rename = "blockReason")]
    pub(super) block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiError {
    pub(super) message: String,
}
