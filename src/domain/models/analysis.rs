//! Structured signals extracted from a free-text query.

use serde::{Deserialize, Serialize};

use super::assessment::TestType;

/// Seniority level inferred from the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
}

/// Transient, per-request analysis of a recommendation query.
///
/// Created by the query analyzer, consumed by the reranker and balancer,
/// then discarded. `test_types` is always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub skills: Vec<String>,
    pub test_types: Vec<TestType>,
    pub experience_level: ExperienceLevel,
    pub focus_areas: Vec<String>,
}

impl QueryAnalysis {
    /// Fixed analysis used when extraction fails entirely.
    pub fn fallback() -> Self {
        Self {
            skills: Vec::new(),
            test_types: vec![TestType::KnowledgeAndSkills, TestType::PersonalityAndBehavior],
            experience_level: ExperienceLevel::Mid,
            focus_areas: Vec::new(),
        }
    }
}
