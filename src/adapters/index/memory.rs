//! In-memory vector index.
//!
//! Stores (id, vector, payload) triples behind a `tokio::sync::RwLock` and
//! searches by cosine distance with a full scan. Payloads are kept as flat
//! string metadata, the way external vector databases store them, and are
//! decoded back to typed `Assessment` values through the explicit test-type
//! codec — no generic text evaluator is involved at any point.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    Assessment, Candidate, SupportFlag, TestType, DEFAULT_DURATION_MINUTES,
};
use crate::domain::ports::{IndexEntry, VectorIndex};

/// One stored record: id, vector and flat string metadata.
#[derive(Debug, Clone)]
struct StoredEntry {
    id: String,
    vector: Vec<f32>,
    metadata: HashMap<String, String>,
}

/// In-memory vector index with cosine-distance search.
#[derive(Debug, Default)]
pub struct InMemoryVectorIndex {
    entries: RwLock<Vec<StoredEntry>>,
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Calculate cosine distance between two vectors.
    ///
    /// Returns `f32::MAX` for mismatched dimensions or zero-magnitude
    /// vectors so such entries sort last.
    pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return f32::MAX;
        }

        let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if mag_a == 0.0 || mag_b == 0.0 {
            return f32::MAX;
        }

        // Cosine distance = 1 - cosine_similarity
        1.0 - (dot / (mag_a * mag_b))
    }

    fn encode_metadata(assessment: &Assessment) -> HashMap<String, String> {
        let mut metadata = HashMap::new();
        metadata.insert("name".to_string(), assessment.name.clone());
        metadata.insert("url".to_string(), assessment.url.clone());
        metadata.insert("description".to_string(), assessment.description.clone());
        metadata.insert(
            "duration".to_string(),
            assessment.duration_minutes.to_string(),
        );
        metadata.insert(
            "test_type".to_string(),
            TestType::encode_list(&assessment.test_types),
        );
        metadata.insert(
            "adaptive_support".to_string(),
            assessment.adaptive_support.label().to_string(),
        );
        metadata.insert(
            "remote_support".to_string(),
            assessment.remote_support.label().to_string(),
        );
        metadata
    }

    fn decode_metadata(metadata: &HashMap<String, String>) -> Assessment {
        let field = |key: &str| metadata.get(key).cloned().unwrap_or_default();

        Assessment {
            name: field("name"),
            url: field("url"),
            description: field("description"),
            duration_minutes: field("duration")
                .parse()
                .unwrap_or(DEFAULT_DURATION_MINUTES),
            test_types: TestType::parse_list(&field("test_type")),
            adaptive_support: SupportFlag::from_label(&field("adaptive_support")),
            remote_support: SupportFlag::from_label(&field("remote_support")),
        }
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn add(&self, new_entries: Vec<IndexEntry>) -> DomainResult<()> {
        let mut entries = self.entries.write().await;
        entries.reserve(new_entries.len());
        for entry in new_entries {
            let stored = StoredEntry {
                id: entry.id,
                vector: entry.vector,
                metadata: Self::encode_metadata(&entry.assessment),
            };
            // Upsert: an existing id is replaced in place.
            match entries.iter_mut().find(|e| e.id == stored.id) {
                Some(existing) => *existing = stored,
                None => entries.push(stored),
            }
        }
        tracing::debug!(count = entries.len(), "Vector index updated");
        Ok(())
    }

    async fn search(&self, query_vector: &[f32], k: usize) -> DomainResult<Vec<Candidate>> {
        let entries = self.entries.read().await;
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        // Never request more neighbors than stored entries.
        let k = k.min(entries.len());

        let mut scored: Vec<(f32, &StoredEntry)> = entries
            .iter()
            .map(|entry| (Self::cosine_distance(query_vector, &entry.vector), entry))
            .collect();
        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(distance, entry)| Candidate {
                assessment: Self::decode_metadata(&entry.metadata),
                distance,
            })
            .collect())
    }

    async fn clear(&self) -> DomainResult<()> {
        let mut entries = self.entries.write().await;
        entries.clear();
        tracing::info!("Vector index cleared");
        Ok(())
    }

    async fn count(&self) -> DomainResult<usize> {
        Ok(self.entries.read().await.len())
    }
}
