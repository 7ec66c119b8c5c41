//! Assessment catalog records and their categorical test types.

use serde::{Deserialize, Serialize};

/// Separator used by the delimited test-type list codec.
///
/// Stored metadata is plain text; categories round-trip through an explicit
/// join/split rather than any generic value evaluator, so malformed or
/// adversarial stored strings can never do more than decode to nothing.
const TEST_TYPE_SEPARATOR: char = '|';

/// Maximum stored description length, matching catalog ingestion.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Default assessment duration in minutes when the catalog does not say.
pub const DEFAULT_DURATION_MINUTES: u32 = 45;

/// Categorical test type attached to an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestType {
    KnowledgeAndSkills,
    PersonalityAndBehavior,
    Cognitive,
    GeneralAssessment,
}

impl TestType {
    /// Stable display label, as shown in the vendor catalog.
    pub fn label(self) -> &'static str {
        match self {
            TestType::KnowledgeAndSkills => "Knowledge & Skills",
            TestType::PersonalityAndBehavior => "Personality & Behavior",
            TestType::Cognitive => "Cognitive",
            TestType::GeneralAssessment => "General Assessment",
        }
    }

    /// Parse a single label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Knowledge & Skills" => Some(TestType::KnowledgeAndSkills),
            "Personality & Behavior" => Some(TestType::PersonalityAndBehavior),
            "Cognitive" => Some(TestType::Cognitive),
            "General Assessment" => Some(TestType::GeneralAssessment),
            _ => None,
        }
    }

    /// Encode an ordered list of categories as a delimited string.
    pub fn encode_list(types: &[TestType]) -> String {
        types
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(&TEST_TYPE_SEPARATOR.to_string())
    }

    /// Decode a delimited string back to an ordered list of categories.
    ///
    /// Unknown or empty segments are dropped; a fully malformed string
    /// decodes to an empty list rather than an error.
    pub fn parse_list(encoded: &str) -> Vec<TestType> {
        encoded
            .split(TEST_TYPE_SEPARATOR)
            .filter_map(TestType::from_label)
            .collect()
    }
}

impl std::fmt::Display for TestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Yes/No support flag used for adaptive and remote delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportFlag {
    Yes,
    No,
}

impl SupportFlag {
    pub fn label(self) -> &'static str {
        match self {
            SupportFlag::Yes => "Yes",
            SupportFlag::No => "No",
        }
    }

    /// Parse a flag label; anything other than a literal "Yes" is `No`.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("yes") {
            SupportFlag::Yes
        } else {
            SupportFlag::No
        }
    }
}

impl std::fmt::Display for SupportFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single assessment from the catalog.
///
/// The `url` is the unique key; records are immutable once indexed and only
/// change through a full re-index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub name: String,
    pub url: String,
    pub description: String,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    pub test_types: Vec<TestType>,
    pub adaptive_support: SupportFlag,
    pub remote_support: SupportFlag,
}

const fn default_duration() -> u32 {
    DEFAULT_DURATION_MINUTES
}

impl Assessment {
    /// Concatenated searchable text used to build the stored vector:
    /// name, description and test-type labels.
    pub fn searchable_text(&self) -> String {
        let labels = self
            .test_types
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} {} {}", self.name, self.description, labels)
    }

    /// Truncate the description to the stored bound, on a char boundary.
    pub fn truncate_description(&mut self) {
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            self.description = self.description.chars().take(MAX_DESCRIPTION_LEN).collect();
        }
    }
}

/// An assessment plus the search-time distance score (lower = more similar).
///
/// Attached by the vector index at search time; never persisted.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub assessment: Assessment,
    pub distance: f32,
}
