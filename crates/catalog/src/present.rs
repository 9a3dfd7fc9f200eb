//! Presentation: laptop cards, recommendation text, and comparison tables.
//!
//! Two card styles exist. Recommendation cards capitalize brand, processor
//! brand, GPU, and OS the way a sentence would; quiz cards echo the raw
//! catalog values and carry no OS line.

use crate::pipeline::CompareQuery;
use crate::store::{Catalog, Row};
use lappybot_core::laptop::{LaptopRecord, NOT_APPLICABLE, decimal_text};
use serde::Serialize;

/// A laptop shaped for display. Every field is filled; blanks render as `N/A`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaptopCard {
    pub brand: String,
    pub model: String,
    pub price: String,
    pub processor: String,
    pub ram: String,
    pub storage: String,
    pub gpu: String,
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
}

/// First character uppercased, the rest lowercased. Blank input becomes
/// `N/A`, and `N/A` itself is kept verbatim.
pub fn capitalize(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case(NOT_APPLICABLE) {
        return NOT_APPLICABLE.to_string();
    }
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => NOT_APPLICABLE.to_string(),
    }
}

fn or_na(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        NOT_APPLICABLE.to_string()
    } else {
        text.to_string()
    }
}

fn price_text(record: &LaptopRecord) -> String {
    format!("MYR {:.2}", record.price)
}

fn storage_text(record: &LaptopRecord) -> String {
    format!(
        "{}GB {}",
        record.primary_storage_capacity_gb,
        or_na(&record.primary_storage_type)
    )
}

fn display_text(record: &LaptopRecord) -> String {
    format!(
        "{}-inch, {}x{} resolution",
        decimal_text(record.display_size_inches),
        record.resolution_width,
        record.resolution_height
    )
}

impl LaptopCard {
    /// Card used by the recommend entry point.
    pub fn recommendation(record: &LaptopRecord) -> Self {
        Self {
            brand: capitalize(&record.brand),
            model: or_na(&record.model),
            price: price_text(record),
            processor: format!(
                "{} {}",
                capitalize(&record.processor_brand),
                or_na(&record.processor_tier)
            ),
            ram: format!("{}GB", record.ram_gb),
            storage: storage_text(record),
            gpu: format!(
                "{} {}",
                capitalize(&record.gpu_brand),
                capitalize(record.gpu_type.as_str())
            ),
            display: display_text(record),
            os: Some(capitalize(&record.os)),
        }
    }

    /// Card used by the quiz entry point.
    pub fn quiz(record: &LaptopRecord) -> Self {
        Self {
            brand: or_na(&record.brand),
            model: or_na(&record.model),
            price: price_text(record),
            processor: format!(
                "{} {}",
                or_na(&record.processor_brand),
                or_na(&record.processor_tier)
            ),
            ram: format!("{}GB", record.ram_gb),
            storage: storage_text(record),
            gpu: or_na(record.gpu_type.as_str()),
            display: display_text(record),
            os: None,
        }
    }

    /// One-sentence summary of the laptop for the given use case.
    pub fn describe(&self, use_case: &str) -> String {
        format!(
            "A {} {} laptop with {} display, {} processor, {} RAM, {} storage, and {} graphics, suitable for {}.",
            self.brand,
            self.model,
            self.display,
            self.processor,
            self.ram,
            self.storage,
            self.gpu,
            use_case
        )
    }

    /// Markdown announcement shown to the user.
    pub fn announcement(&self) -> String {
        let os = self.os.as_deref().unwrap_or(NOT_APPLICABLE);
        format!(
            "🎉 *Recommended Laptop for You* 🎉\n\
             \n\
             *Brand & Model*: {} - {}\n\
             *Price*: {}\n\
             \n\
             *Specifications*:\n\
             - *Processor*: {}\n\
             - *RAM*: {}\n\
             - *Storage*: {}\n\
             - *Graphics*: {}\n\
             - *Display*: {}\n\
             - *Operating System*: {}\n\
             \n\
             This laptop is perfect for your use case as it meets the performance and budget requirements.\n\
             Let me know if you need more details or additional options! 😊",
            self.brand,
            self.model,
            self.price,
            self.processor,
            self.ram,
            self.storage,
            self.gpu,
            self.display,
            os
        )
    }
}

/// The filters a comparison actually applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppliedFilters {
    pub brands: Vec<String>,
    pub max_price: Option<f64>,
}

/// A projected comparison: every catalog column, in load order, for each
/// matching row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub filters: AppliedFilters,
}

impl Comparison {
    pub fn project(catalog: &Catalog, rows: &[Row<'_>], query: &CompareQuery) -> Self {
        Self {
            columns: catalog.columns().to_vec(),
            rows: rows.iter().map(|row| row.cells.to_vec()).collect(),
            filters: AppliedFilters {
                brands: query.brand_filter(),
                max_price: query.price_ceiling(),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as a bordered HTML table with a header row and no index column.
    pub fn to_html_table(&self) -> String {
        let mut html = String::from(
            "<table border=\"1\" class=\"dataframe table table-bordered table-hover\">\n",
        );
        html.push_str("  <thead>\n    <tr style=\"text-align: right;\">\n");
        for column in &self.columns {
            html.push_str(&format!("      <th>{}</th>\n", escape_html(column)));
        }
        html.push_str("    </tr>\n  </thead>\n  <tbody>\n");
        for row in &self.rows {
            html.push_str("    <tr>\n");
            for cell in row {
                html.push_str(&format!("      <td>{}</td>\n", escape_html(cell)));
            }
            html.push_str("    </tr>\n");
        }
        html.push_str("  </tbody>\n</table>");
        html
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
