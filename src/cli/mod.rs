//! Command-line interface for talentsift.

use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};

use anyhow::Result;

use crate::application::AppContext;
use crate::domain::models::{Assessment, Config, TestType};
use crate::services::evaluation;

/// Assessment recommendation engine.
#[derive(Debug, Parser)]
#[command(name = "talentsift", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Recommend assessments for a free-text query
    Recommend {
        /// The hiring query, e.g. "senior java developer with leadership"
        query: String,

        /// Maximum number of recommendations
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Rebuild the vector index from the catalog source
    Reindex,

    /// Evaluate Recall@K over a CSV of (query, assessment_url) rows
    Evaluate {
        /// Path to the evaluation CSV
        file: std::path::PathBuf,

        /// Optional CSV path for exported predictions
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Show index status and document count
    Status,
}

/// Dispatch a parsed command.
pub async fn execute(cli: Cli, config: Config) -> Result<()> {
    let app = AppContext::from_config(&config)?;

    match cli.command {
        Commands::Recommend { query, count } => {
            let n = count.unwrap_or(config.pipeline.default_result_count);
            recommend(&app, &query, n).await
        }
        Commands::Reindex => reindex(&app).await,
        Commands::Evaluate { file, output } => evaluate(&app, &file, output.as_deref()).await,
        Commands::Status => status(&app).await,
    }
}

async fn recommend(app: &AppContext, query: &str, n: usize) -> Result<()> {
    if app.index_service.indexed_count().await? == 0 {
        tracing::info!("Index is empty, running initial re-index");
        app.index_service.reindex().await?;
    }

    let results = app.pipeline.recommend(query, n).await;

    if results.is_empty() {
        // The distinct "not found" condition: nothing to return at all.
        anyhow::bail!("No assessments found for query: {query}");
    }

    println!("{}", render_table(&results));
    Ok(())
}

async fn reindex(app: &AppContext) -> Result<()> {
    let indexed = app.index_service.reindex().await?;
    println!("Indexed {indexed} assessments");
    Ok(())
}

async fn evaluate(
    app: &AppContext,
    file: &std::path::Path,
    output: Option<&std::path::Path>,
) -> Result<()> {
    if app.index_service.indexed_count().await? == 0 {
        app.index_service.reindex().await?;
    }

    let cases = evaluation::load_cases(file)?;
    let summary = evaluation::evaluate(&cases, |query| async move {
        let results = app.pipeline.recommend(&query, 10).await;
        Ok(results.into_iter().map(|a| a.url).collect())
    })
    .await;

    println!("Queries evaluated: {}", summary.total_queries);
    println!("Mean Recall@5:  {:.4}", summary.mean_recall_at_5);
    println!("Mean Recall@10: {:.4}", summary.mean_recall_at_10);

    if let Some(path) = output {
        evaluation::export_predictions(&summary, path)?;
        println!("Predictions written to {}", path.display());
    }
    Ok(())
}

async fn status(app: &AppContext) -> Result<()> {
    let count = app.index_service.indexed_count().await?;
    let status = app.index_service.status().await;
    println!("Index status: {status:?}");
    println!("Indexed documents: {count}");
    Ok(())
}

fn render_table(assessments: &[Assessment]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Name",
        "Duration",
        "Test Types",
        "Adaptive",
        "Remote",
        "URL",
    ]);

    for a in assessments {
        table.add_row(vec![
            a.name.clone(),
            format!("{} min", a.duration_minutes),
            TestType::encode_list(&a.test_types).replace('|', ", "),
            a.adaptive_support.to_string(),
            a.remote_support.to_string(),
            a.url.clone(),
        ]);
    }

    table
}
