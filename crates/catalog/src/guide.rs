//! FAQ and troubleshooting answers.
//!
//! Both tables are static data shipped with the crate (`data/*.toml`). Keys
//! are lowercased at load and lookups lowercase the incoming label, so
//! matching is case-insensitive. Unknown labels get the table's fallback.

use serde::Deserialize;
use std::collections::HashMap;

const FAQ_TOML: &str = include_str!("../data/faq.toml");
const TROUBLESHOOTING_TOML: &str = include_str!("../data/troubleshooting.toml");

#[derive(Debug, Clone, Deserialize)]
struct AnswerTable {
    fallback: String,
    #[serde(default)]
    answers: HashMap<String, String>,
}

impl AnswerTable {
    fn parse(text: &str) -> Result<Self, toml::de::Error> {
        let raw: AnswerTable = toml::from_str(text)?;
        Ok(Self {
            fallback: raw.fallback,
            answers: raw
                .answers
                .into_iter()
                .map(|(k, v)| (normalize(&k), v))
                .collect(),
        })
    }

    fn lookup(&self, label: &str) -> &str {
        self.answers
            .get(&normalize(label))
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Canned answers for the FAQ and troubleshooting entry points.
#[derive(Debug, Clone)]
pub struct GuideBook {
    faq: AnswerTable,
    troubleshooting: AnswerTable,
}

impl GuideBook {
    /// The answer tables bundled with the crate.
    pub fn builtin() -> Result<Self, toml::de::Error> {
        Self::from_toml(FAQ_TOML, TROUBLESHOOTING_TOML)
    }

    pub fn from_toml(faq: &str, troubleshooting: &str) -> Result<Self, toml::de::Error> {
        Ok(Self {
            faq: AnswerTable::parse(faq)?,
            troubleshooting: AnswerTable::parse(troubleshooting)?,
        })
    }

    pub fn faq(&self, question: &str) -> &str {
        self.faq.lookup(question)
    }

    pub fn troubleshoot(&self, issue: &str) -> &str {
        self.troubleshooting.lookup(issue)
    }

    /// Known issue labels, sorted.
    pub fn issues(&self) -> Vec<&str> {
        let mut issues: Vec<&str> = self.troubleshooting.answers.keys().map(String::as_str).collect();
        issues.sort_unstable();
        issues
    }
}
