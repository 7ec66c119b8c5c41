//! Built-in static assessment catalog.
//!
//! Hand-curated records covering the common role families. Used as the
//! offline catalog source so the engine is usable without any network
//! access to the vendor's catalog pages.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Assessment, SupportFlag, TestType};
use crate::domain::ports::CatalogSource;

/// Catalog source backed by a built-in record set.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog;

impl StaticCatalog {
    pub fn new() -> Self {
        Self
    }

    fn record(
        name: &str,
        slug: &str,
        description: &str,
        duration_minutes: u32,
        test_types: Vec<TestType>,
        adaptive_support: SupportFlag,
    ) -> Assessment {
        Assessment {
            name: name.to_string(),
            url: format!("https://www.shl.com/solutions/products/product-catalog/view/{slug}/"),
            description: description.to_string(),
            duration_minutes,
            test_types,
            adaptive_support,
            remote_support: SupportFlag::Yes,
        }
    }

    /// The built-in record set.
    pub fn records() -> Vec<Assessment> {
        use SupportFlag::{No, Yes};
        use TestType::{Cognitive, KnowledgeAndSkills, PersonalityAndBehavior};

        vec![
            Self::record(
                "Java Developer Assessment",
                "java-programming",
                "Comprehensive Java programming assessment covering OOP, collections, multi-threading, and problem-solving skills.",
                60,
                vec![KnowledgeAndSkills],
                No,
            ),
            Self::record(
                "Python Programming Test",
                "python-programming",
                "Python coding test evaluating syntax, data structures, algorithms, and application development capabilities.",
                45,
                vec![KnowledgeAndSkills],
                No,
            ),
            Self::record(
                "SQL Database Assessment",
                "sql-assessment",
                "SQL assessment testing query writing, database design, optimization, and data manipulation skills.",
                50,
                vec![KnowledgeAndSkills],
                Yes,
            ),
            Self::record(
                "Leadership & Collaboration Assessment",
                "leadership-assessment",
                "Evaluates leadership qualities, team collaboration, communication skills, and stakeholder management abilities.",
                40,
                vec![PersonalityAndBehavior],
                Yes,
            ),
            Self::record(
                "Cognitive Ability Test",
                "cognitive-test",
                "Measures cognitive abilities including logical reasoning, problem-solving, and analytical thinking.",
                30,
                vec![Cognitive],
                Yes,
            ),
            Self::record(
                "Sales Representative Assessment",
                "sales-assessment",
                "Comprehensive assessment for sales roles covering persuasion, communication, and customer relationship skills.",
                35,
                vec![PersonalityAndBehavior, Cognitive],
                Yes,
            ),
            Self::record(
                "Data Analyst Assessment",
                "data-analyst",
                "Tests data analysis skills including Excel, SQL, Python, statistical analysis, and data visualization.",
                90,
                vec![KnowledgeAndSkills, Cognitive],
                No,
            ),
            Self::record(
                "JavaScript Developer Test",
                "javascript-test",
                "Evaluates JavaScript proficiency including ES6+, DOM manipulation, async programming, and frameworks.",
                55,
                vec![KnowledgeAndSkills],
                No,
            ),
            Self::record(
                "Communication Skills Assessment",
                "communication-skills",
                "Assesses written and verbal communication, presentation skills, and interpersonal effectiveness.",
                25,
                vec![PersonalityAndBehavior],
                Yes,
            ),
            Self::record(
                "Problem Solving & Critical Thinking",
                "problem-solving",
                "Measures analytical thinking, problem-solving approach, and decision-making capabilities.",
                40,
                vec![Cognitive],
                Yes,
            ),
        ]
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch_catalog(&self) -> DomainResult<Vec<Assessment>> {
        let mut records = Self::records();
        for record in &mut records {
            record.truncate_description();
        }
        tracing::info!(count = records.len(), "Loaded static catalog");
        Ok(records)
    }
}
