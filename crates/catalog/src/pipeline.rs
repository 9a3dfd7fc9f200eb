//! Filter pipeline: AND-filters catalog rows, and the query types that
//! assemble predicate sets for each entry point.

use crate::predicate::{BudgetBucket, Predicate, PredicateSet, SizeBucket};
use crate::profile::{QuizRegistry, UseCaseRegistry};
use crate::store::{Catalog, Row};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Every row satisfying all predicates, in catalog order.
pub fn apply<'a>(catalog: &'a Catalog, predicates: &PredicateSet) -> Vec<Row<'a>> {
    catalog
        .rows()
        .filter(|row| predicates.matches(row.record))
        .collect()
}

/// Keep the rows of an earlier result that also satisfy `predicates`.
pub fn narrow<'a>(rows: Vec<Row<'a>>, predicates: &PredicateSet) -> Vec<Row<'a>> {
    rows.into_iter()
        .filter(|row| predicates.matches(row.record))
        .collect()
}

/// Parameters of a recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendQuery {
    pub budget: f64,
    pub use_case: String,
}

impl RecommendQuery {
    pub fn new(budget: f64, use_case: impl Into<String>) -> Self {
        Self {
            budget,
            use_case: use_case.into(),
        }
    }

    /// Lowercased label used for registry lookup.
    pub fn use_case_key(&self) -> String {
        self.use_case.trim().to_lowercase()
    }

    /// Budget ceiling, plus the use-case profile when the label is known.
    pub fn predicates(&self, registry: &UseCaseRegistry) -> PredicateSet {
        let mut set = PredicateSet::new().with(Predicate::budget_at_most(self.budget));
        let key = self.use_case_key();
        match registry.get(&key) {
            Some(profile) => set.extend(profile.predicates()),
            None => debug!(use_case = %key, "Unknown use case, filtering on budget only"),
        }
        set
    }
}

/// Answers collected by the guided quiz. Any answer may be absent or
/// unrecognized, in which case that stage is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswers {
    pub use_case: Option<String>,
    pub budget: Option<String>,
    pub size: Option<String>,
}

impl QuizAnswers {
    pub fn new(
        use_case: Option<impl Into<String>>,
        budget: Option<impl Into<String>>,
        size: Option<impl Into<String>>,
    ) -> Self {
        Self {
            use_case: use_case.map(Into::into),
            budget: budget.map(Into::into),
            size: size.map(Into::into),
        }
    }

    /// Staged narrowing: use case, then budget bracket, then size bracket.
    pub fn narrow<'a>(&self, catalog: &'a Catalog, registry: &QuizRegistry) -> Vec<Row<'a>> {
        let mut rows: Vec<Row<'a>> = catalog.rows().collect();
        debug!(stage = "start", candidates = rows.len(), "Quiz narrowing");

        if let Some(rule) = self.use_case.as_deref().and_then(|label| registry.get(label)) {
            rows = narrow(rows, &rule.predicates());
            debug!(stage = "use_case", candidates = rows.len(), "Quiz narrowing");
        }

        if let Some(bucket) = self.budget.as_deref().and_then(BudgetBucket::parse) {
            rows = narrow(rows, &bucket.predicates());
            debug!(stage = "budget", candidates = rows.len(), "Quiz narrowing");
        }

        if let Some(bucket) = self.size.as_deref().and_then(SizeBucket::parse) {
            rows = narrow(rows, &PredicateSet::new().with(bucket.predicate()));
            debug!(stage = "size", candidates = rows.len(), "Quiz narrowing");
        }

        rows
    }
}

/// Parameters of a comparison request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompareQuery {
    #[serde(default)]
    pub brands: Vec<String>,
    /// Price ceiling; `None` means no ceiling
    #[serde(default)]
    pub max_price: Option<f64>,
}

impl CompareQuery {
    pub fn new<I, S>(brands: I, max_price: Option<f64>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            brands: brands.into_iter().map(Into::into).collect(),
            max_price,
        }
    }

    /// Non-empty brand names, in request order.
    pub fn brand_filter(&self) -> Vec<String> {
        self.brands
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .map(String::from)
            .collect()
    }

    /// The ceiling as supplied. Callers decide what counts as absent; a
    /// supplied zero matches nothing.
    pub fn price_ceiling(&self) -> Option<f64> {
        self.max_price
    }

    pub fn predicates(&self) -> PredicateSet {
        let mut set = PredicateSet::new();
        let brands = self.brand_filter();
        if !brands.is_empty() {
            set.push(Predicate::brand_in(&brands));
        }
        if let Some(max_price) = self.price_ceiling() {
            set.push(Predicate::budget_at_most(max_price));
        }
        set
    }
}
