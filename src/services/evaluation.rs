//! Recall@K evaluation over held-out query/relevant-URL pairs.
//!
//! Regression harness for the recommendation pipeline: load (query,
//! relevant URLs) cases from CSV, run predictions, and report per-query and
//! mean Recall@5/Recall@10.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::Path;

use crate::domain::errors::{DomainError, DomainResult};

/// One evaluation case: a query and its ground-truth relevant URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationCase {
    pub query: String,
    pub relevant_urls: Vec<String>,
}

/// Per-query evaluation outcome.
#[derive(Debug, Clone, Serialize)]
pub struct QueryEvaluation {
    pub query: String,
    pub relevant_count: usize,
    pub predicted_count: usize,
    pub recall_at_5: f64,
    pub recall_at_10: f64,
    pub predicted_urls: Vec<String>,
}

/// Whole-run evaluation summary.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSummary {
    pub mean_recall_at_5: f64,
    pub mean_recall_at_10: f64,
    pub total_queries: usize,
    pub timestamp: DateTime<Utc>,
    pub results: Vec<QueryEvaluation>,
}

/// CSV row shape for evaluation input files.
#[derive(Debug, Deserialize)]
struct EvaluationRow {
    query: String,
    assessment_url: String,
}

/// Fraction of relevant items appearing within the top `k` predictions.
pub fn recall_at_k(predicted: &[String], relevant: &[String], k: usize) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }

    let top_k = &predicted[..predicted.len().min(k)];
    let hits = top_k.iter().filter(|url| relevant.contains(url)).count();

    hits as f64 / relevant.len() as f64
}

/// Mean Recall@K across (predicted, relevant) pairs.
pub fn mean_recall_at_k(pairs: &[(Vec<String>, Vec<String>)], k: usize) -> f64 {
    if pairs.is_empty() {
        return 0.0;
    }
    let total: f64 = pairs
        .iter()
        .map(|(predicted, relevant)| recall_at_k(predicted, relevant, k))
        .sum();
    total / pairs.len() as f64
}

/// Evaluate the system over `cases` using `predict` to produce ranked URLs.
///
/// A failed prediction counts as an empty prediction for that query; it
/// never aborts the run.
pub async fn evaluate<F, Fut>(cases: &[EvaluationCase], predict: F) -> EvaluationSummary
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = DomainResult<Vec<String>>>,
{
    tracing::info!(cases = cases.len(), "Evaluating recommendation system");

    let mut results = Vec::with_capacity(cases.len());

    for case in cases {
        let predicted_urls = match predict(case.query.clone()).await {
            Ok(urls) => urls,
            Err(err) => {
                tracing::error!(query = %case.query, error = %err, "Prediction failed");
                Vec::new()
            }
        };

        results.push(QueryEvaluation {
            query: case.query.clone(),
            relevant_count: case.relevant_urls.len(),
            predicted_count: predicted_urls.len(),
            recall_at_5: recall_at_k(&predicted_urls, &case.relevant_urls, 5),
            recall_at_10: recall_at_k(&predicted_urls, &case.relevant_urls, 10),
            predicted_urls,
        });
    }

    let total = results.len();
    let mean = |f: fn(&QueryEvaluation) -> f64| {
        if total == 0 {
            0.0
        } else {
            results.iter().map(f).sum::<f64>() / total as f64
        }
    };

    let summary = EvaluationSummary {
        mean_recall_at_5: mean(|r| r.recall_at_5),
        mean_recall_at_10: mean(|r| r.recall_at_10),
        total_queries: total,
        timestamp: Utc::now(),
        results,
    };

    tracing::info!(
        mean_recall_at_10 = summary.mean_recall_at_10,
        "Evaluation complete"
    );

    summary
}

/// Load evaluation cases from a CSV file with `query` and `assessment_url`
/// columns, grouping rows by query in first-seen order.
pub fn load_cases(path: impl AsRef<Path>) -> DomainResult<Vec<EvaluationCase>> {
    let mut reader = csv::Reader::from_path(path.as_ref())
        .map_err(|e| DomainError::EvaluationError(format!("Failed to open test data: {e}")))?;

    let mut cases: Vec<EvaluationCase> = Vec::new();

    for row in reader.deserialize::<EvaluationRow>() {
        let row = row
            .map_err(|e| DomainError::EvaluationError(format!("Malformed test data row: {e}")))?;

        match cases.iter_mut().find(|c| c.query == row.query) {
            Some(case) => case.relevant_urls.push(row.assessment_url),
            None => cases.push(EvaluationCase {
                query: row.query,
                relevant_urls: vec![row.assessment_url],
            }),
        }
    }

    tracing::info!(cases = cases.len(), "Loaded evaluation cases");
    Ok(cases)
}

/// Export per-query predictions as (query, url) CSV rows.
pub fn export_predictions(
    summary: &EvaluationSummary,
    path: impl AsRef<Path>,
) -> DomainResult<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())
        .map_err(|e| DomainError::EvaluationError(format!("Failed to create output: {e}")))?;

    writer
        .write_record(["query", "assessment_url"])
        .map_err(|e| DomainError::EvaluationError(e.to_string()))?;

    for result in &summary.results {
        for url in &result.predicted_urls {
            writer
                .write_record([result.query.as_str(), url.as_str()])
                .map_err(|e| DomainError::EvaluationError(e.to_string()))?;
        }
    }

    writer
        .flush()
        .map_err(|e| DomainError::EvaluationError(e.to_string()))?;
    Ok(())
}
