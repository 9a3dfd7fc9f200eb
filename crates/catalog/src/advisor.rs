//! The three catalog entry points: recommend, quiz, and compare.

use crate::pipeline::{CompareQuery, QuizAnswers, RecommendQuery, apply};
use crate::present::{Comparison, LaptopCard};
use crate::profile::{QuizRegistry, UseCaseRegistry};
use crate::select::{QUIZ_PICKS, first_k, pick_one};
use crate::store::Catalog;
use lappybot_core::error::CatalogError;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

pub const MISSING_BUDGET: &str = "Please provide a budget for the recommendation.";
pub const NO_RECOMMENDATION: &str = "No laptops found matching your budget and preferences.";
pub const NO_QUIZ_MATCH: &str = "No laptops match the selected criteria.";
pub const CATALOG_UNAVAILABLE: &str =
    "Laptop dataset is not available. Please check the server configuration.";

/// User-facing text for a non-numeric amount (`field` is e.g. `"budget"`).
pub fn invalid_amount_message(field: &str) -> String {
    format!("Invalid {field} format. Please provide a numeric value.")
}

/// Parse a user-supplied amount. No default is substituted on failure.
pub fn parse_amount(field: &str, raw: &str) -> Result<f64, CatalogError> {
    let invalid = || CatalogError::InvalidNumericInput {
        field: field.to_string(),
        value: raw.to_string(),
    };
    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// A successful recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// Catalog position of the chosen laptop
    pub position: usize,
    pub laptop: LaptopCard,
    pub description: String,
    /// Markdown announcement
    pub message: String,
    /// Size of the eligible subset the pick was drawn from
    pub eligible: usize,
}

#[derive(Debug, Clone)]
pub enum RecommendOutcome {
    Recommended(Box<Recommendation>),
    NoMatch,
}

#[derive(Debug, Clone)]
pub enum QuizOutcome {
    Matches(Vec<LaptopCard>),
    NoMatch,
}

/// Answers structured laptop queries against one catalog snapshot.
#[derive(Debug, Clone)]
pub struct LaptopAdvisor {
    catalog: Arc<Catalog>,
    use_cases: UseCaseRegistry,
    quiz: QuizRegistry,
}

impl LaptopAdvisor {
    /// An advisor with the built-in use-case and quiz registries.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_registries(catalog, UseCaseRegistry::builtin(), QuizRegistry::builtin())
    }

    pub fn with_registries(
        catalog: Arc<Catalog>,
        use_cases: UseCaseRegistry,
        quiz: QuizRegistry,
    ) -> Self {
        Self {
            catalog,
            use_cases,
            quiz,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn use_cases(&self) -> &UseCaseRegistry {
        &self.use_cases
    }

    /// Pick one eligible laptop at random.
    pub fn recommend<R: Rng + ?Sized>(&self, query: &RecommendQuery, rng: &mut R) -> RecommendOutcome {
        let eligible = apply(&self.catalog, &query.predicates(&self.use_cases));
        debug!(
            budget = query.budget,
            use_case = %query.use_case_key(),
            eligible = eligible.len(),
            "Recommend filtered"
        );

        let Some(row) = pick_one(&eligible, rng) else {
            return RecommendOutcome::NoMatch;
        };

        let laptop = LaptopCard::recommendation(row.record);
        let description = laptop.describe(&query.use_case_key());
        let message = laptop.announcement();
        RecommendOutcome::Recommended(Box::new(Recommendation {
            position: row.position,
            laptop,
            description,
            message,
            eligible: eligible.len(),
        }))
    }

    /// The first few laptops surviving the quiz narrowing, in catalog order.
    pub fn quiz(&self, answers: &QuizAnswers) -> QuizOutcome {
        let rows = answers.narrow(&self.catalog, &self.quiz);
        let picks: Vec<LaptopCard> = first_k(&rows, QUIZ_PICKS)
            .iter()
            .map(|row| LaptopCard::quiz(row.record))
            .collect();
        if picks.is_empty() {
            QuizOutcome::NoMatch
        } else {
            QuizOutcome::Matches(picks)
        }
    }

    /// Every matching row, projected over all catalog columns.
    pub fn compare(&self, query: &CompareQuery) -> Result<Comparison, CatalogError> {
        if self.catalog.is_empty() {
            warn!("Comparison requested but the catalog is empty");
            return Err(CatalogError::Unavailable);
        }
        let rows = apply(&self.catalog, &query.predicates());
        debug!(matches = rows.len(), "Compare filtered");
        Ok(Comparison::project(&self.catalog, &rows, query))
    }
}
