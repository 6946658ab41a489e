//! Lectern CLI - generate a personalized study checklist from a text file.
//!
//! Reads a plain-text document, splits it into content segments, runs the
//! checklist generation pipeline against the configured oracles, and prints
//! the resulting structured plan as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

use lectern_core::{
    ContentSegment, ContentSource, InMemoryPlanStore, LearnerProfile, LoopVerdict, PipelineError,
    PlanRequest, StudyPlanPipeline,
};
use lectern_models::ModelFactory;

/// Lectern - personalized study checklists from instructional material
#[derive(Parser, Debug)]
#[command(
    name = "lectern",
    author,
    version,
    about = "Generate a personalized study checklist from a document"
)]
struct Args {
    /// Path to a plain-text document to plan around
    input: PathBuf,

    /// Learning goal, freeform (e.g. "exam prep")
    #[arg(short, long)]
    goal: Option<String>,

    /// Self-described familiarity with the subject
    #[arg(short, long)]
    familiarity: Option<String>,

    /// Plan title (defaults to the input file stem)
    #[arg(short, long)]
    title: Option<String>,

    /// Oracle provider for generation and critique (mock, openai)
    #[arg(long, default_value = "openai")]
    model: String,

    /// Model ID for the generation oracle
    #[arg(long, default_value = "gpt-4o")]
    model_id: String,

    /// Model ID for the critique oracle
    #[arg(long, default_value = "gpt-4o-mini")]
    critic_model_id: String,

    /// Maximum number of revision attempts
    #[arg(long, default_value_t = 2)]
    max_retries: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

/// Serves one local text file as page-numbered segments, one per blank-line
/// separated block.
struct FileSource {
    text: String,
}

#[async_trait]
impl ContentSource for FileSource {
    async fn segments(&self, _document_id: Uuid) -> Result<Vec<ContentSegment>, PipelineError> {
        let segments = self
            .text
            .split("\n\n")
            .filter(|block| !block.trim().is_empty())
            .enumerate()
            .map(|(index, block)| ContentSegment::new(block.trim(), index as u32))
            .collect();
        Ok(segments)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = args.log_level.parse::<Level>().unwrap_or(Level::WARN);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to initialise logging")?;

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let title = args.title.clone().unwrap_or_else(|| {
        args.input
            .file_stem()
            .map_or_else(|| "Document".to_string(), |stem| stem.to_string_lossy().into_owned())
    });

    let generator_model = ModelFactory::create_from_str(&args.model, args.model_id.clone())
        .context("failed to create generation oracle")?;
    let critic_model = ModelFactory::create_from_str(&args.model, args.critic_model_id.clone())
        .context("failed to create critique oracle")?;

    let pipeline = StudyPlanPipeline::new(generator_model, critic_model)
        .with_max_retries(args.max_retries);

    let request = PlanRequest {
        title,
        profile: LearnerProfile { familiarity: args.familiarity.clone(), goal: args.goal.clone() },
    };

    let source = FileSource { text };
    let store = InMemoryPlanStore::new();
    let learner_id = Uuid::new_v4();
    let document_id = Uuid::new_v4();

    let (plan_id, generated) = pipeline
        .run_and_store(&source, &store, learner_id, document_id, &request)
        .await
        .context("pipeline run failed")?;

    match generated.verdict {
        LoopVerdict::Accepted => {
            info!(%plan_id, attempts = generated.attempts, "checklist accepted");
        }
        LoopVerdict::Exhausted => {
            eprintln!(
                "note: revision budget exhausted after {} attempts; plan is best-effort",
                generated.attempts
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&generated.plan)?);
    Ok(())
}
