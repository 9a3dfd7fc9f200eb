//! Use-case requirement registries.
//!
//! Two closed vocabularies exist side by side:
//!
//! - [`UseCaseRegistry`] serves the recommend entry point (lowercase labels
//!   such as `"gaming"`, full RAM/cores/GPU/OS profiles).
//! - [`QuizRegistry`] serves the guided quiz (capitalized labels such as
//!   `"Gaming"`, RAM floor plus an optional dedicated-GPU requirement).
//!
//! Both look labels up exactly as stored. An unknown label is not an error:
//! the caller simply skips the use-case filter.

use crate::predicate::{Predicate, PredicateSet};
use lappybot_core::laptop::GpuType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Hardware floor and allowed platforms for one use case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCaseProfile {
    pub min_ram: u32,
    pub min_cores: u32,
    pub allowed_gpu_types: BTreeSet<String>,
    pub allowed_os: BTreeSet<String>,
}

impl UseCaseProfile {
    pub fn new<G, O>(min_ram: u32, min_cores: u32, gpu_types: G, os: O) -> Self
    where
        G: IntoIterator<Item = &'static str>,
        O: IntoIterator<Item = &'static str>,
    {
        Self {
            min_ram,
            min_cores,
            allowed_gpu_types: gpu_types.into_iter().map(String::from).collect(),
            allowed_os: os.into_iter().map(String::from).collect(),
        }
    }

    pub fn predicates(&self) -> PredicateSet {
        PredicateSet::new()
            .with(Predicate::ram_at_least(self.min_ram))
            .with(Predicate::cores_at_least(self.min_cores))
            .with(Predicate::gpu_type_in(&self.allowed_gpu_types))
            .with(Predicate::os_in(&self.allowed_os))
    }
}

/// Registry backing the recommend entry point.
#[derive(Debug, Clone, Default)]
pub struct UseCaseRegistry {
    profiles: HashMap<String, UseCaseProfile>,
}

impl UseCaseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in profiles.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            "science computer student",
            UseCaseProfile::new(8, 4, ["dedicated", "integrated"], ["windows", "linux"]),
        );
        registry.register(
            "gaming",
            UseCaseProfile::new(16, 6, ["dedicated"], ["windows"]),
        );
        registry
    }

    pub fn register(&mut self, label: impl Into<String>, profile: UseCaseProfile) {
        self.profiles.insert(label.into(), profile);
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, label: &str) -> Option<&UseCaseProfile> {
        self.profiles.get(label)
    }

    /// Registered labels, sorted.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }
}

/// A quiz use-case rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRule {
    pub min_ram: u32,
    pub require_dedicated_gpu: bool,
}

impl QuizRule {
    pub fn predicates(&self) -> PredicateSet {
        let mut set = PredicateSet::new().with(Predicate::ram_at_least(self.min_ram));
        if self.require_dedicated_gpu {
            set.push(Predicate::gpu_type_in([GpuType::Dedicated.as_str()]));
        }
        set
    }
}

/// Registry backing the guided quiz.
#[derive(Debug, Clone)]
pub struct QuizRegistry {
    rules: HashMap<String, QuizRule>,
}

impl QuizRegistry {
    pub fn builtin() -> Self {
        let rules = [
            ("Gaming", 8, true),
            ("Work", 8, false),
            ("School", 4, false),
            ("Editing", 16, true),
        ]
        .into_iter()
        .map(|(label, min_ram, require_dedicated_gpu)| {
            (
                label.to_string(),
                QuizRule {
                    min_ram,
                    require_dedicated_gpu,
                },
            )
        })
        .collect();
        Self { rules }
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, label: &str) -> Option<&QuizRule> {
        self.rules.get(label)
    }
}

impl Default for QuizRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
