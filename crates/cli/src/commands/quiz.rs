//! `lappybot quiz`: the guided quiz narrowing.

use lappybot_catalog::advisor::NO_QUIZ_MATCH;
use lappybot_catalog::{LaptopAdvisor, QuizAnswers, QuizOutcome};
use std::path::PathBuf;

pub fn run(
    catalog: Option<PathBuf>,
    use_case: Option<String>,
    budget: Option<String>,
    size: Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(catalog)?;
    let advisor = LaptopAdvisor::new(super::load_catalog(&config)?);

    match advisor.quiz(&QuizAnswers::new(use_case, budget, size)) {
        QuizOutcome::Matches(laptops) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&laptops)?);
                return Ok(());
            }
            for (i, laptop) in laptops.iter().enumerate() {
                println!("{}. {} {} ({})", i + 1, laptop.brand, laptop.model, laptop.price);
                println!("   Processor: {}", laptop.processor);
                println!("   RAM:       {}", laptop.ram);
                println!("   Storage:   {}", laptop.storage);
                println!("   GPU:       {}", laptop.gpu);
                println!("   Display:   {}", laptop.display);
                println!();
            }
        }
        QuizOutcome::NoMatch => return Err(NO_QUIZ_MATCH.into()),
    }

    Ok(())
}
