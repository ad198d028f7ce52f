use anyhow::Context;
use asq_scoring::{
    config::{get_config, init_config},
    dto::grading_dto::GradingBatch,
    AppState,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config()?;

    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("Invalid log filter \"{}\"", config.log_filter))?;
    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let path = std::env::args()
        .nth(1)
        .context("Usage: asq-grade <batch.json>")?;

    let raw = std::fs::read_to_string(&path).with_context(|| format!("Could not read {}", path))?;
    let batch: GradingBatch =
        serde_json::from_str(&raw).with_context(|| format!("Could not parse {}", path))?;

    let app_state = AppState::new(config)?;
    info!(path = %path, questions = batch.questions.len(), "Grading batch");

    let report = app_state.grading_service.grade(&batch)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
