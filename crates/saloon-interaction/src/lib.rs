//! Gemini REST implementations of the Saloon gateways.
//!
//! - `gemini_client`: shared HTTP client and wire types
//! - `analysis_gateway`: face assessment (`GeminiAnalysisGateway`)
//! - `synthesis_gateway`: hairstyle rendering (`GeminiSynthesisGateway`)
//! - `config`: API key loading from secret.json or the environment

pub mod analysis_gateway;
pub mod config;
pub mod gemini_client;
mod prompts;
pub mod synthesis_gateway;

pub use analysis_gateway::GeminiAnalysisGateway;
pub use config::{SecretConfig, resolve_api_key};
pub use gemini_client::GeminiClient;
pub use synthesis_gateway::GeminiSynthesisGateway;
