//! Face analysis through a Gemini text model.

use crate::gemini_client::{GeminiClient, GenerateContentRequest, GenerationConfig};
use crate::prompts;
use async_trait::async_trait;
use saloon_core::analysis::AnalysisResult;
use saloon_core::config::DEFAULT_ANALYSIS_MODEL;
use saloon_core::gateway::{AnalysisGateway, GatewayError};
use saloon_core::payload::ImagePayload;
use saloon_core::style::StyleCatalog;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

/// [`AnalysisGateway`] asking Gemini for a JSON face assessment.
#[derive(Clone)]
pub struct GeminiAnalysisGateway {
    client: GeminiClient,
    model: String,
    style_names: Vec<String>,
}

impl GeminiAnalysisGateway {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            model: DEFAULT_ANALYSIS_MODEL.to_string(),
            style_names: Vec::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Restricts recommendations to the display names in `catalog`.
    pub fn with_catalog(mut self, catalog: &StyleCatalog) -> Self {
        self.style_names = catalog.iter().map(|s| s.name.clone()).collect();
        self
    }

    fn request(&self, image: &ImagePayload) -> Result<GenerateContentRequest, GatewayError> {
        let prompt = prompts::analysis_prompt(&self.style_names)?;
        Ok(
            GenerateContentRequest::image_and_text(image, prompt).with_generation_config(
                GenerationConfig {
                    response_mime_type: Some("application/json".to_string()),
                    response_schema: Some(response_schema()),
                    ..GenerationConfig::default()
                },
            ),
        )
    }
}

#[async_trait]
impl AnalysisGateway for GeminiAnalysisGateway {
    async fn analyze(&self, image: &ImagePayload) -> Result<AnalysisResult, GatewayError> {
        let request = self.request(image)?;
        let response = self.client.generate(&self.model, &request).await?;
        let text = response.text().ok_or_else(|| {
            GatewayError::EmptyResponse("Gemini returned no text for the analysis".into())
        })?;
        debug!(model = %self.model, len = text.len(), "Analysis response received");

        let result = parse_analysis(&text)?;
        info!(
            face_shape = result.face_shape(),
            recommendations = result.recommendations().len(),
            "Face analysed"
        );
        Ok(result)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisResponse {
    face_shape: String,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    features: Vec<String>,
}

fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "faceShape": {"type": "STRING"},
            "recommendations": {"type": "ARRAY", "items": {"type": "STRING"}},
            "features": {"type": "ARRAY", "items": {"type": "STRING"}}
        },
        "required": ["faceShape", "recommendations", "features"]
    })
}

/// Parses the model's JSON answer, tolerating a markdown code fence.
pub(crate) fn parse_analysis(text: &str) -> Result<AnalysisResult, GatewayError> {
    let body = strip_code_fence(text);
    let parsed: AnalysisResponse = serde_json::from_str(body)
        .map_err(|err| GatewayError::Parse(format!("Invalid analysis JSON: {err}")))?;

    let face_shape = parsed.face_shape.trim();
    if face_shape.is_empty() {
        return Err(GatewayError::Parse("Analysis is missing a face shape".into()));
    }

    let keep = |s: String| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };
    Ok(AnalysisResult::new(
        face_shape,
        parsed.recommendations.into_iter().filter_map(keep),
        parsed.features.into_iter().filter_map(keep),
    ))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string (e.g. "json") on the opening line
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
