//! Diversity balancing across requested test-type categories.
//!
//! Pure reordering: when the caller asked for breadth across categories,
//! pull one item per requested category to the head of the list, then fill
//! with the remaining items in rank order. Selection is keyed by `url`.

use crate::domain::models::{Candidate, TestType};

/// Interleave a ranked candidate list so each requested category is
/// represented before filling remaining slots by rank.
///
/// With one or zero requested categories the input is returned unchanged.
/// Each requested category contributes at most one diversity pick: the
/// first not-yet-selected item carrying that category.
pub fn balance(ranked: Vec<Candidate>, requested: &[TestType]) -> Vec<Candidate> {
    if requested.len() <= 1 {
        return ranked;
    }

    let mut selected_urls: Vec<String> = Vec::new();
    let mut head: Vec<Candidate> = Vec::new();

    for category in requested {
        let pick = ranked.iter().find(|c| {
            !selected_urls.contains(&c.assessment.url)
                && c.assessment.test_types.contains(category)
        });
        if let Some(candidate) = pick {
            selected_urls.push(candidate.assessment.url.clone());
            head.push(candidate.clone());
        }
    }

    for candidate in ranked {
        if !selected_urls.contains(&candidate.assessment.url) {
            selected_urls.push(candidate.assessment.url.clone());
            head.push(candidate);
        }
    }

    head
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Assessment, SupportFlag};

    fn candidate(name: &str, types: Vec<TestType>) -> Candidate {
        Candidate {
            assessment: Assessment {
                name: name.to_string(),
                url: format!("https://x/{name}"),
                description: String::new(),
                duration_minutes: 45,
                test_types: types,
                adaptive_support: SupportFlag::No,
                remote_support: SupportFlag::Yes,
            },
            distance: 0.0,
        }
    }

    fn names(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.assessment.name.as_str()).collect()
    }

    #[test]
    fn single_category_is_identity() {
        let input = vec![
            candidate("a", vec![TestType::Cognitive]),
            candidate("b", vec![TestType::KnowledgeAndSkills]),
        ];
        let output = balance(input.clone(), &[TestType::KnowledgeAndSkills]);
        assert_eq!(names(&output), names(&input));
    }

    #[test]
    fn empty_categories_is_identity() {
        let input = vec![candidate("a", vec![TestType::Cognitive])];
        let output = balance(input.clone(), &[]);
        assert_eq!(names(&output), names(&input));
    }

    #[test]
    fn pulls_one_pick_per_requested_category() {
        let input = vec![
            candidate("k1", vec![TestType::KnowledgeAndSkills]),
            candidate("k2", vec![TestType::KnowledgeAndSkills]),
            candidate("c1", vec![TestType::Cognitive]),
            candidate("p1", vec![TestType::PersonalityAndBehavior]),
        ];
        let output = balance(
            input,
            &[TestType::KnowledgeAndSkills, TestType::PersonalityAndBehavior],
        );
        // One K pick, one P pick (pulled from rank 4), then rank order.
        assert_eq!(names(&output), vec!["k1", "p1", "k2", "c1"]);
    }

    #[test]
    fn output_is_a_permutation_of_input() {
        let input = vec![
            candidate("a", vec![TestType::KnowledgeAndSkills]),
            candidate("b", vec![TestType::PersonalityAndBehavior]),
            candidate("c", vec![TestType::Cognitive]),
            candidate("d", vec![]),
        ];
        let output = balance(
            input.clone(),
            &[TestType::Cognitive, TestType::KnowledgeAndSkills],
        );

        assert_eq!(output.len(), input.len());
        let mut input_urls: Vec<_> = input.iter().map(|c| c.assessment.url.clone()).collect();
        let mut output_urls: Vec<_> = output.iter().map(|c| c.assessment.url.clone()).collect();
        input_urls.sort();
        output_urls.sort();
        assert_eq!(input_urls, output_urls);
    }

    #[test]
    fn category_pick_is_never_pushed_back() {
        // P item ranked 5th must land at or before position 2 when P is the
        // second requested category.
        let input = vec![
            candidate("k1", vec![TestType::KnowledgeAndSkills]),
            candidate("k2", vec![TestType::KnowledgeAndSkills]),
            candidate("k3", vec![TestType::KnowledgeAndSkills]),
            candidate("k4", vec![TestType::KnowledgeAndSkills]),
            candidate("p1", vec![TestType::PersonalityAndBehavior]),
        ];
        let output = balance(
            input,
            &[TestType::KnowledgeAndSkills, TestType::PersonalityAndBehavior],
        );
        assert_eq!(names(&output)[0], "k1");
        assert_eq!(names(&output)[1], "p1");
    }

    #[test]
    fn items_without_categories_fall_through_to_tail() {
        let input = vec![
            candidate("untagged", vec![]),
            candidate("k1", vec![TestType::KnowledgeAndSkills]),
            candidate("c1", vec![TestType::Cognitive]),
        ];
        let output = balance(
            input,
            &[TestType::KnowledgeAndSkills, TestType::Cognitive],
        );
        assert_eq!(names(&output), vec!["k1", "c1", "untagged"]);
    }

    #[test]
    fn missing_category_contributes_nothing() {
        let input = vec![
            candidate("k1", vec![TestType::KnowledgeAndSkills]),
            candidate("k2", vec![TestType::KnowledgeAndSkills]),
        ];
        let output = balance(
            input,
            &[TestType::PersonalityAndBehavior, TestType::KnowledgeAndSkills],
        );
        assert_eq!(names(&output), vec!["k1", "k2"]);
    }
}
