//! Query analysis: structured signal extraction from free-text queries.
//!
//! Asks the generative backend for a structured breakdown, then parses the
//! free-form answer deterministically. Any failure in the call or the parse
//! falls back to a fixed default analysis; this service never errors.

use std::sync::Arc;

use crate::domain::models::{ExperienceLevel, QueryAnalysis, TestType};
use crate::domain::ports::TextGenerator;

/// Keyword groups for test-type classification.
const KNOWLEDGE_KEYWORDS: [&str; 3] = ["technical", "coding", "programming"];
const PERSONALITY_KEYWORDS: [&str; 2] = ["personality", "leadership"];
const COGNITIVE_KEYWORDS: [&str; 2] = ["cognitive", "analytical"];

/// Extracts skills, test types, seniority and focus areas from a query.
pub struct QueryAnalyzer {
    generator: Arc<dyn TextGenerator>,
}

impl QueryAnalyzer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Analyze a query. Falls back to `QueryAnalysis::fallback()` on any
    /// generation failure.
    pub async fn analyze(&self, query: &str) -> QueryAnalysis {
        let prompt = Self::build_prompt(query);

        match self.generator.generate(&prompt).await {
            Ok(text) => Self::parse_analysis(&text, query),
            Err(err) => {
                tracing::warn!(error = %err, "Query analysis failed, using default analysis");
                QueryAnalysis::fallback()
            }
        }
    }

    fn build_prompt(query: &str) -> String {
        format!(
            r"Analyze this assessment search query and extract requirements.

Query: {query}

Return:
- Skills: comma-separated list
- Test Types: comma-separated list
- Experience: Entry, Mid or Senior
- Focus: comma-separated list"
        )
    }

    /// Deterministic parse of the model's free-form answer.
    fn parse_analysis(text: &str, query: &str) -> QueryAnalysis {
        QueryAnalysis {
            skills: Self::extract_listed(text, "skill"),
            test_types: Self::extract_test_types(text, query),
            experience_level: Self::extract_experience_level(text, query),
            focus_areas: Self::extract_listed(text, "focus"),
        }
    }

    /// Scan lines for a keyword; split the part after the colon on commas.
    ///
    /// Order of appearance is preserved and duplicates are kept — downstream
    /// consumers treat the result as a set.
    fn extract_listed(text: &str, keyword: &str) -> Vec<String> {
        let mut items = Vec::new();
        for line in text.to_lowercase().lines() {
            if !line.contains(keyword) {
                continue;
            }
            if let Some((_, rest)) = line.split_once(':') {
                items.extend(
                    rest.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from),
                );
            }
        }
        items
    }

    /// Keyword-match the model output plus the original query against the
    /// category keyword groups. Groups are not mutually exclusive; no match
    /// defaults to Knowledge & Skills.
    fn extract_test_types(text: &str, query: &str) -> Vec<TestType> {
        let haystack = format!("{text} {query}").to_lowercase();
        let mut types = Vec::new();

        if KNOWLEDGE_KEYWORDS.iter().any(|k| haystack.contains(k)) {
            types.push(TestType::KnowledgeAndSkills);
        }
        if PERSONALITY_KEYWORDS.iter().any(|k| haystack.contains(k)) {
            types.push(TestType::PersonalityAndBehavior);
        }
        if COGNITIVE_KEYWORDS.iter().any(|k| haystack.contains(k)) {
            types.push(TestType::Cognitive);
        }

        if types.is_empty() {
            types.push(TestType::KnowledgeAndSkills);
        }
        types
    }

    /// Substring match on output plus query; "senior" wins over entry-level
    /// markers, anything else is Mid.
    fn extract_experience_level(text: &str, query: &str) -> ExperienceLevel {
        let haystack = format!("{text} {query}").to_lowercase();
        if haystack.contains("senior") {
            ExperienceLevel::Senior
        } else if haystack.contains("junior") || haystack.contains("entry") {
            ExperienceLevel::Entry
        } else {
            ExperienceLevel::Mid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{DomainError, DomainResult};
    use async_trait::async_trait;

    struct CannedGenerator(String);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        fn name(&self) -> &'static str {
            "canned"
        }
        async fn generate(&self, _prompt: &str) -> DomainResult<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        fn name(&self) -> &'static str {
            "failing"
        }
        async fn generate(&self, _prompt: &str) -> DomainResult<String> {
            Err(DomainError::GenerationFailed("timeout".to_string()))
        }
    }

    #[tokio::test]
    async fn parses_skills_and_focus_lines() {
        let analyzer = QueryAnalyzer::new(Arc::new(CannedGenerator(
            "- Skills: Java, Spring, SQL\n- Focus: backend, APIs".to_string(),
        )));

        let analysis = analyzer.analyze("backend role").await;

        assert_eq!(analysis.skills, vec!["java", "spring", "sql"]);
        assert_eq!(analysis.focus_areas, vec!["backend", "apis"]);
    }

    #[tokio::test]
    async fn classifies_multiple_test_type_groups() {
        let analyzer = QueryAnalyzer::new(Arc::new(CannedGenerator(
            "Needs coding and leadership evaluation".to_string(),
        )));

        let analysis = analyzer.analyze("team lead").await;

        assert_eq!(
            analysis.test_types,
            vec![TestType::KnowledgeAndSkills, TestType::PersonalityAndBehavior]
        );
    }

    #[tokio::test]
    async fn test_types_default_to_knowledge_and_skills() {
        let analyzer = QueryAnalyzer::new(Arc::new(CannedGenerator("nothing useful".to_string())));
        let analysis = analyzer.analyze("accountant").await;
        assert_eq!(analysis.test_types, vec![TestType::KnowledgeAndSkills]);
    }

    #[tokio::test]
    async fn query_text_contributes_to_classification() {
        // Keywords in the query count even when the model output has none.
        let analyzer = QueryAnalyzer::new(Arc::new(CannedGenerator("no categories".to_string())));
        let analysis = analyzer.analyze("analytical thinker wanted").await;
        assert!(analysis.test_types.contains(&TestType::Cognitive));
    }

    #[tokio::test]
    async fn senior_beats_entry_markers() {
        let analyzer = QueryAnalyzer::new(Arc::new(CannedGenerator(String::new())));
        let analysis = analyzer.analyze("senior or entry level java").await;
        assert_eq!(analysis.experience_level, ExperienceLevel::Senior);
    }

    #[tokio::test]
    async fn junior_maps_to_entry() {
        let analyzer = QueryAnalyzer::new(Arc::new(CannedGenerator(String::new())));
        let analysis = analyzer.analyze("junior developer").await;
        assert_eq!(analysis.experience_level, ExperienceLevel::Entry);
    }

    #[tokio::test]
    async fn defaults_to_mid_experience() {
        let analyzer = QueryAnalyzer::new(Arc::new(CannedGenerator(String::new())));
        let analysis = analyzer.analyze("developer").await;
        assert_eq!(analysis.experience_level, ExperienceLevel::Mid);
    }

    #[tokio::test]
    async fn generation_failure_yields_fixed_default() {
        let analyzer = QueryAnalyzer::new(Arc::new(FailingGenerator));
        let analysis = analyzer.analyze("java developer").await;
        assert_eq!(analysis, QueryAnalysis::fallback());
    }

    #[test]
    fn extract_listed_ignores_lines_without_colon() {
        let items = QueryAnalyzer::extract_listed("skills are many\nskills: a, b", "skill");
        assert_eq!(items, vec!["a", "b"]);
    }
}
