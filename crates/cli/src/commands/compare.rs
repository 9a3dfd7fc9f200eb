//! `lappybot compare`: side-by-side comparison.

use lappybot_catalog::advisor::invalid_amount_message;
use lappybot_catalog::{Comparison, CompareQuery, LaptopAdvisor, parse_amount};
use std::path::PathBuf;

/// Columns shown in the terminal summary, when the catalog has them.
const SUMMARY_COLUMNS: [&str; 5] = ["brand", "Model", "Price_MYR", "ram_memory", "gpu_type"];

pub fn run(
    catalog: Option<PathBuf>,
    brands: Vec<String>,
    max_price: Option<String>,
    html: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(catalog)?;

    let max_price = match max_price.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            parse_amount("max price", raw).map_err(|_| invalid_amount_message("max price"))?,
        ),
    };

    let advisor = LaptopAdvisor::new(super::load_catalog(&config)?);
    let comparison = advisor.compare(&CompareQuery::new(brands, max_price))?;

    if html {
        println!("{}", comparison.to_html_table());
    } else {
        print!("{}", summary(&comparison));
    }

    Ok(())
}

/// A tab-separated digest of the comparison.
fn summary(comparison: &Comparison) -> String {
    let picked: Vec<(usize, &str)> = SUMMARY_COLUMNS
        .iter()
        .filter_map(|name| {
            comparison
                .columns
                .iter()
                .position(|c| c == name)
                .map(|i| (i, *name))
        })
        .collect();

    let mut out = picked
        .iter()
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join("\t");
    out.push('\n');
    for row in &comparison.rows {
        let cells: Vec<&str> = picked
            .iter()
            .map(|(i, _)| row.get(*i).map(String::as_str).unwrap_or(""))
            .collect();
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out.push_str(&format!("{} laptop(s)\n", comparison.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lappybot_catalog::AppliedFilters;

    #[test]
    fn summary_picks_known_columns_in_order() {
        let comparison = Comparison {
            columns: vec!["index".into(), "Model".into(), "brand".into(), "Price_MYR".into()],
            rows: vec![vec!["0".into(), "TUF Gaming F15".into(), "asus".into(), "4299.0".into()]],
            filters: AppliedFilters::default(),
        };
        assert_eq!(
            summary(&comparison),
            "brand\tModel\tPrice_MYR\nasus\tTUF Gaming F15\t4299.0\n1 laptop(s)\n"
        );
    }
}
