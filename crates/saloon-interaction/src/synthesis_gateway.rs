//! Hairstyle rendering through a Gemini image model.

use crate::gemini_client::{GeminiClient, GenerateContentRequest, GenerationConfig};
use crate::prompts;
use async_trait::async_trait;
use saloon_core::config::DEFAULT_SYNTHESIS_MODEL;
use saloon_core::gateway::{GatewayError, SynthesisGateway};
use saloon_core::payload::ImagePayload;
use tracing::{info, warn};

/// [`SynthesisGateway`] that asks Gemini to restyle the photo and returns
/// the first inline image of the answer.
#[derive(Clone)]
pub struct GeminiSynthesisGateway {
    client: GeminiClient,
    model: String,
}

impl GeminiSynthesisGateway {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            model: DEFAULT_SYNTHESIS_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn request(
        &self,
        image: &ImagePayload,
        directive: &str,
    ) -> Result<GenerateContentRequest, GatewayError> {
        let prompt = prompts::synthesis_prompt(directive)?;
        Ok(
            GenerateContentRequest::image_and_text(image, prompt).with_generation_config(
                GenerationConfig {
                    response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
                    ..GenerationConfig::default()
                },
            ),
        )
    }
}

#[async_trait]
impl SynthesisGateway for GeminiSynthesisGateway {
    async fn synthesize(
        &self,
        image: &ImagePayload,
        directive: &str,
    ) -> Result<ImagePayload, GatewayError> {
        if directive.trim().is_empty() {
            return Err(GatewayError::Config("Style directive is empty".into()));
        }

        let request = self.request(image, directive)?;
        let response = self.client.generate(&self.model, &request).await?;

        match response.inline_image() {
            Some(generated) => {
                info!(model = %self.model, mime_type = generated.mime_type(), "Styled image received");
                Ok(generated)
            }
            None => {
                // models sometimes answer with a refusal in text instead
                let reason = response.text().unwrap_or_default();
                warn!(model = %self.model, reason = %reason, "Synthesis returned no image");
                Err(GatewayError::EmptyResponse(
                    "Gemini returned no image for the styling request".into(),
                ))
            }
        }
    }
}
