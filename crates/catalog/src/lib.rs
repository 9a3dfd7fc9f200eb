//! Laptop catalog engine for LappyBot.
//!
//! Answers structured laptop queries against an immutable catalog snapshot:
//!
//! 1. **Store**: load the CSV once, keep row order as the ranking contract
//! 2. **Predicates**: composable record tests (budget, RAM, cores, GPU, OS, size, brand)
//! 3. **Profiles**: closed use-case requirement sets for recommend and quiz
//! 4. **Pipeline**: AND-filter rows, staged narrowing for the quiz
//! 5. **Selection**: random pick, first-K, or everything
//! 6. **Presentation**: laptop cards, summary text, comparison tables
//!
//! The [`LaptopAdvisor`] ties these together into the three entry points
//! (`recommend`, `quiz`, `compare`). FAQ and troubleshooting answers live in
//! [`GuideBook`].

pub mod advisor;
pub mod guide;
pub mod pipeline;
pub mod predicate;
pub mod present;
pub mod profile;
pub mod select;
pub mod store;

pub use advisor::{
    LaptopAdvisor, QuizOutcome, RecommendOutcome, Recommendation, parse_amount,
};
pub use guide::GuideBook;
pub use pipeline::{CompareQuery, QuizAnswers, RecommendQuery};
pub use predicate::{BudgetBucket, Predicate, PredicateSet, SizeBucket};
pub use present::{AppliedFilters, Comparison, LaptopCard};
pub use profile::{QuizRegistry, QuizRule, UseCaseProfile, UseCaseRegistry};
pub use store::{Catalog, Row};
