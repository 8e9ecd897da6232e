use crate::camera::FileCameraBackend;
use crate::commands::styles::print_catalog;
use anyhow::{Context, Result, bail};
use colored::Colorize;
use saloon_core::capture::FrameCapturer;
use saloon_core::config::SaloonConfig;
use saloon_core::device::DeviceNegotiator;
use saloon_core::session::{OrchestratorTimeouts, SessionOrchestrator, StepOutcome};
use saloon_core::style::{Hairstyle, StyleCatalog, builtin_catalog};
use saloon_execution::SessionEvent;
use saloon_interaction::{
    GeminiAnalysisGateway, GeminiClient, GeminiSynthesisGateway, resolve_api_key,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::info;

pub struct RunArgs {
    pub camera: PathBuf,
    pub style: String,
    pub out: Option<PathBuf>,
    pub secret: Option<PathBuf>,
}

fn build_orchestrator(
    config: &SaloonConfig,
    args: &RunArgs,
    catalog: Arc<StyleCatalog>,
) -> Result<SessionOrchestrator> {
    let api_key = resolve_api_key(args.secret.as_deref())?;
    let client = GeminiClient::new(api_key).with_base_url(&config.gateway.base_url);

    let analysis = GeminiAnalysisGateway::new(client.clone())
        .with_model(&config.gateway.analysis_model)
        .with_catalog(&catalog);
    let synthesis =
        GeminiSynthesisGateway::new(client).with_model(&config.gateway.synthesis_model);
    let negotiator = DeviceNegotiator::new(Arc::new(FileCameraBackend::new(&args.camera)))
        .with_ladder(config.ladder());

    Ok(SessionOrchestrator::new(
        negotiator,
        FrameCapturer::new(config.capture.jpeg_quality),
        Arc::new(analysis),
        Arc::new(synthesis),
        catalog,
    )
    .with_timeouts(OrchestratorTimeouts::from(&config.timeouts)))
}

fn print_event(event: &SessionEvent) {
    let Some(stage) = event.field("stage").and_then(|v| v.as_str()) else {
        return;
    };
    let line = format!("[{stage}] {}", event.message);
    if event.level == "WARN" || event.level == "ERROR" {
        println!("{}", line.yellow());
    } else {
        println!("{}", line.blue());
    }
}

/// Prints stage transitions as they are logged, until `done` fires and the
/// queue is drained.
async fn print_events(
    mut events: mpsc::UnboundedReceiver<SessionEvent>,
    mut done: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            biased;
            event = events.recv() => match event {
                Some(event) => print_event(&event),
                None => return,
            },
            _ = &mut done => break,
        }
    }
    while let Ok(event) = events.try_recv() {
        print_event(&event);
    }
}

/// Accepts either a catalog id or a display name.
fn resolve_style<'a>(catalog: &'a StyleCatalog, style: &str) -> Option<&'a Hairstyle> {
    catalog.get(style).or_else(|| catalog.find_by_name(style))
}

pub async fn execute(
    config: SaloonConfig,
    mut args: RunArgs,
    events: mpsc::UnboundedReceiver<SessionEvent>,
) -> Result<()> {
    let catalog = Arc::new(builtin_catalog().clone());
    let Some(style) = resolve_style(&catalog, &args.style) else {
        bail!(
            "Unknown style '{}'. Run `saloon styles` to list the catalog.",
            args.style
        );
    };
    args.style = style.id.clone();

    let orchestrator = build_orchestrator(&config, &args, catalog.clone())?;
    let (done_tx, done_rx) = oneshot::channel();
    let printer = tokio::spawn(print_events(events, done_rx));
    let result = drive(&orchestrator, &catalog, &args).await;

    let _ = done_tx.send(());
    printer.await.context("Event printer panicked")?;
    result
}

async fn drive(
    orchestrator: &SessionOrchestrator,
    catalog: &StyleCatalog,
    args: &RunArgs,
) -> Result<()> {
    orchestrator
        .start_camera()
        .await
        .context("Camera could not be started")?;
    orchestrator.capture().await.context("Capture failed")?;

    let session = orchestrator.snapshot().await;
    if let Some(notice) = session.notice() {
        println!("{}", notice.message().yellow());
    }
    if let Some(analysis) = session.analysis() {
        println!(
            "{} {}",
            "Face shape:".bold(),
            analysis.face_shape().green().bold()
        );
        if !analysis.features().is_empty() {
            let features: Vec<_> = analysis.features().iter().map(String::as_str).collect();
            println!("{} {}", "Features:".bold(), features.join(", "));
        }
        print_catalog(catalog, Some(analysis));
    }

    match orchestrator.select_style(&args.style).await? {
        StepOutcome::Advanced(_) => {}
        StepOutcome::Recovered(_) => {
            if let Some(notice) = orchestrator.snapshot().await.notice() {
                println!("{}", notice.message().red());
            }
            bail!("Styling with '{}' failed", args.style);
        }
        StepOutcome::Stale => bail!("Session was reset before the result arrived"),
    }

    let image = orchestrator
        .export()
        .await
        .context("Session finished without a generated image")?;
    let out = match &args.out {
        Some(path) => path.clone(),
        None => PathBuf::from(
            orchestrator
                .export_file_name()
                .await
                .context("No export name for the generated image")?,
        ),
    };

    tokio::fs::write(&out, image.decode()?)
        .await
        .with_context(|| format!("Failed to write {}", out.display()))?;
    info!(path = %out.display(), "Generated image exported");
    println!("{} {}", "Saved".green().bold(), out.display());
    Ok(())
}
