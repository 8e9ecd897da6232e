//! Prompt templates for the Gemini gateways, rendered with minijinja.

use minijinja::{Environment, context};
use saloon_core::gateway::GatewayError;
use std::sync::OnceLock;

const ANALYSIS_TEMPLATE: &str = "\
You are a professional barber assessing a client's portrait photo.
Classify the face shape (one of Oval, Round, Square, Heart, Diamond, Oblong).
{%- if styles %}
Recommend up to three hairstyles, best first, chosen from: {{ styles | join(\", \") }}.
{%- else %}
Recommend up to three hairstyles, best first.
{%- endif %}
List a few short descriptive tags for notable facial or hair features.
Answer with JSON only: {\"faceShape\": string, \"recommendations\": [string], \"features\": [string]}.";

const SYNTHESIS_TEMPLATE: &str = "\
Edit this portrait photo so the person has the following hairstyle: {{ directive }}.
Keep the face, identity, expression, skin tone, clothing, lighting and background unchanged.
The result must look like a realistic photograph. Return only the edited image.";

const TEMPLATES: [(&str, &str); 2] = [
    ("analysis", ANALYSIS_TEMPLATE),
    ("synthesis", SYNTHESIS_TEMPLATE),
];

fn build_environment(
    templates: &[(&'static str, &'static str)],
) -> Result<Environment<'static>, String> {
    let mut env = Environment::new();
    for &(name, source) in templates {
        env.add_template(name, source)
            .map_err(|err| format!("Invalid {name} prompt template: {err}"))?;
    }
    Ok(env)
}

fn environment() -> Result<&'static Environment<'static>, GatewayError> {
    static ENV: OnceLock<Result<Environment<'static>, String>> = OnceLock::new();
    ENV.get_or_init(|| build_environment(&TEMPLATES))
        .as_ref()
        .map_err(|err| GatewayError::Config(err.clone()))
}

fn render(name: &str, ctx: minijinja::Value) -> Result<String, GatewayError> {
    environment()?
        .get_template(name)
        .and_then(|template| template.render(ctx))
        .map_err(|err| GatewayError::Config(format!("Failed to render {name} prompt: {err}")))
}

/// Prompt for the analysis call, optionally constrained to `styles`.
pub fn analysis_prompt(styles: &[String]) -> Result<String, GatewayError> {
    render("analysis", context! { styles => styles })
}

/// Prompt for the synthesis call applying `directive`.
pub fn synthesis_prompt(directive: &str) -> Result<String, GatewayError> {
    render("synthesis", context! { directive => directive.trim() })
}
