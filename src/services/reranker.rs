//! LLM-based candidate re-ranking.
//!
//! Summarizes a bounded window of candidates, asks the generative backend
//! for a comma-separated ranking of 1-based indices, and parses a
//! best-effort ordering out of whatever text comes back. Any failure in the
//! call or the parse returns the candidates in their original order.

use std::sync::Arc;

use crate::domain::models::{Candidate, QueryAnalysis};
use crate::domain::ports::TextGenerator;

/// Default number of candidates summarized per re-ranking prompt.
const RERANK_WINDOW: usize = 15;

/// Description length in the candidate summary.
const SUMMARY_DESCRIPTION_LEN: usize = 100;

/// Re-ranks retrieved candidates with the generative backend.
pub struct Reranker {
    generator: Arc<dyn TextGenerator>,
    window: usize,
}

impl Reranker {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            window: RERANK_WINDOW,
        }
    }

    /// Override the prompt window size.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Re-rank `candidates` for `query`, returning at least the original
    /// order on any failure. Output keeps all mentioned candidates plus
    /// unmentioned ones (in original order) up to `desired_count`.
    pub async fn rerank(
        &self,
        query: &str,
        analysis: &QueryAnalysis,
        candidates: Vec<Candidate>,
        desired_count: usize,
    ) -> Vec<Candidate> {
        if candidates.is_empty() {
            return candidates;
        }

        let prompt = Self::build_prompt(query, analysis, &candidates, desired_count, self.window);

        match self.generator.generate(&prompt).await {
            Ok(text) => {
                let rankings = Self::parse_rankings(&text, candidates.len());
                Self::assemble(candidates, &rankings, desired_count)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Re-ranking failed, keeping retrieval order");
                candidates
            }
        }
    }

    fn build_prompt(
        query: &str,
        analysis: &QueryAnalysis,
        candidates: &[Candidate],
        desired_count: usize,
        window: usize,
    ) -> String {
        let summary = candidates
            .iter()
            .take(window)
            .enumerate()
            .map(|(i, c)| {
                let description: String = c
                    .assessment
                    .description
                    .chars()
                    .take(SUMMARY_DESCRIPTION_LEN)
                    .collect();
                format!("{}. {} - {}...", i + 1, c.assessment.name, description)
            })
            .collect::<Vec<_>>()
            .join("\n");

        let skills = analysis.skills.join(", ");

        format!(
            r"Rank the top {desired_count} relevant assessments for this query.

Query: {query}
Relevant skills: {skills}

Candidates:
{summary}

Return only comma-separated ranking numbers."
        )
    }

    /// Extract every contiguous digit run from the response, interpret each
    /// as a 1-based index, and keep in-range values as 0-based indices.
    /// Duplicates are dropped, first mention wins.
    fn parse_rankings(response: &str, candidate_count: usize) -> Vec<usize> {
        let mut rankings = Vec::new();
        let mut digits = String::new();

        let mut push_run = |digits: &mut String, rankings: &mut Vec<usize>| {
            if digits.is_empty() {
                return;
            }
            if let Ok(n) = digits.parse::<usize>() {
                if let Some(index) = n.checked_sub(1) {
                    if index < candidate_count && !rankings.contains(&index) {
                        rankings.push(index);
                    }
                }
            }
            digits.clear();
        };

        for ch in response.chars() {
            if ch.is_ascii_digit() {
                digits.push(ch);
            } else {
                push_run(&mut digits, &mut rankings);
            }
        }
        push_run(&mut digits, &mut rankings);

        rankings
    }

    /// Mentioned candidates first, in mention order; then unmentioned ones
    /// in original order while the output is still below `desired_count`.
    fn assemble(
        candidates: Vec<Candidate>,
        rankings: &[usize],
        desired_count: usize,
    ) -> Vec<Candidate> {
        let mut output: Vec<Candidate> = rankings
            .iter()
            .map(|&index| candidates[index].clone())
            .collect();

        for (i, candidate) in candidates.into_iter().enumerate() {
            if !rankings.contains(&i) && output.len() < desired_count {
                output.push(candidate);
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{DomainError, DomainResult};
    use crate::domain::models::{Assessment, SupportFlag, TestType};
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

    fn candidate(name: &str) -> Candidate {
        Candidate {
            assessment: Assessment {
                name: name.to_string(),
                url: format!("https://x/{name}"),
                description: format!("{name} description"),
                duration_minutes: 45,
                test_types: vec![TestType::KnowledgeAndSkills],
                adaptive_support: SupportFlag::No,
                remote_support: SupportFlag::Yes,
            },
            distance: 0.1,
        }
    }

    fn candidates(names: &[&str]) -> Vec<Candidate> {
        names.iter().map(|n| candidate(n)).collect()
    }

    fn names(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.assessment.name.as_str()).collect()
    }

    #[tokio::test]
    async fn reorders_by_model_ranking() {
        let reranker = Reranker::new(Arc::new(CannedGenerator("3, 1, 2".to_string())));
        let result = reranker
            .rerank("q", &QueryAnalysis::fallback(), candidates(&["a", "b", "c"]), 3)
            .await;
        assert_eq!(names(&result), vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn parses_digits_out_of_noisy_formatting() {
        let reranker = Reranker::new(Arc::new(CannedGenerator(
            "Sure! My ranking:\n1) first\n- 3.\nthen **2**".to_string(),
        )));
        let result = reranker
            .rerank("q", &QueryAnalysis::fallback(), candidates(&["a", "b", "c"]), 3)
            .await;
        assert_eq!(names(&result), vec!["a", "c", "b"]);
    }

    #[tokio::test]
    async fn out_of_range_indices_are_discarded() {
        let reranker = Reranker::new(Arc::new(CannedGenerator("9, 2, 0, 1".to_string())));
        let result = reranker
            .rerank("q", &QueryAnalysis::fallback(), candidates(&["a", "b", "c"]), 3)
            .await;
        // 9 and 0 are out of range for 1-based indices over 3 candidates.
        assert_eq!(names(&result), vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn duplicate_indices_keep_first_mention() {
        let reranker = Reranker::new(Arc::new(CannedGenerator("2, 2, 2, 1".to_string())));
        let result = reranker
            .rerank("q", &QueryAnalysis::fallback(), candidates(&["a", "b", "c"]), 3)
            .await;
        assert_eq!(names(&result), vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn unmentioned_candidates_append_up_to_desired_count() {
        let reranker = Reranker::new(Arc::new(CannedGenerator("4".to_string())));
        let result = reranker
            .rerank(
                "q",
                &QueryAnalysis::fallback(),
                candidates(&["a", "b", "c", "d"]),
                2,
            )
            .await;
        // "d" was mentioned; only one unmentioned fill fits below n=2.
        assert_eq!(names(&result), vec!["d", "a"]);
    }

    #[tokio::test]
    async fn failure_returns_original_order_and_count() {
        let reranker = Reranker::new(Arc::new(FailingGenerator));
        let input = candidates(&["a", "b", "c"]);
        let result = reranker
            .rerank("q", &QueryAnalysis::fallback(), input, 3)
            .await;
        assert_eq!(names(&result), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn unparsable_response_keeps_original_order() {
        let reranker = Reranker::new(Arc::new(CannedGenerator(
            "I cannot rank these assessments.".to_string(),
        )));
        let result = reranker
            .rerank("q", &QueryAnalysis::fallback(), candidates(&["a", "b", "c"]), 3)
            .await;
        assert_eq!(names(&result), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn empty_candidates_short_circuit() {
        let reranker = Reranker::new(Arc::new(FailingGenerator));
        let result = reranker
            .rerank("q", &QueryAnalysis::fallback(), Vec::new(), 5)
            .await;
        assert!(result.is_empty());
    }

    #[test]
    fn prompt_summarizes_at_most_the_window() {
        let many: Vec<Candidate> = (0..30).map(|i| candidate(&format!("c{i}"))).collect();
        let prompt = Reranker::build_prompt("q", &QueryAnalysis::fallback(), &many, 10, 15);
        assert!(prompt.contains("15. c14"));
        assert!(!prompt.contains("16. c15"));
    }
}
