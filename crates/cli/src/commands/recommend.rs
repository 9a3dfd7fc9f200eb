//! `lappybot recommend`: one random pick among eligible laptops.

use lappybot_catalog::advisor::{MISSING_BUDGET, NO_RECOMMENDATION, invalid_amount_message};
use lappybot_catalog::{LaptopAdvisor, RecommendOutcome, RecommendQuery, parse_amount};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

pub fn run(
    catalog: Option<PathBuf>,
    budget: &str,
    use_case: String,
    seed: Option<u64>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(catalog)?;

    if budget.trim().is_empty() {
        return Err(MISSING_BUDGET.into());
    }
    let budget = parse_amount("budget", budget).map_err(|_| invalid_amount_message("budget"))?;

    let advisor = LaptopAdvisor::new(super::load_catalog(&config)?);
    let query = RecommendQuery::new(budget, use_case);

    let key = query.use_case_key();
    if !key.is_empty() && advisor.use_cases().get(&key).is_none() {
        eprintln!(
            "  Note: no profile for '{key}', filtering by budget only (known: {})",
            advisor.use_cases().labels().join(", ")
        );
    }

    let mut rng = match seed.or(config.recommend.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    match advisor.recommend(&query, &mut rng) {
        RecommendOutcome::Recommended(pick) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&pick)?);
            } else {
                println!("{}", pick.message);
                println!();
                println!("{}", pick.description);
                println!("(picked from {} eligible laptops)", pick.eligible);
            }
        }
        RecommendOutcome::NoMatch => println!("{NO_RECOMMENDATION}"),
    }

    Ok(())
}
