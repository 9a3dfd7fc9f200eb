//! `lappybot doctor`: diagnose configuration and catalog health.

use lappybot_catalog::{Catalog, GuideBook};
use lappybot_config::AppConfig;
use lappybot_core::Provider;
use lappybot_core::laptop::STANDARD_COLUMNS;
use std::path::PathBuf;

pub async fn run(catalog: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 LappyBot Doctor: System Diagnostics");
    println!("======================================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    if !config_path.exists() {
        println!("  ⚠️  No config file at {}, using defaults", config_path.display());
    }
    let config = match super::load_config(catalog) {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ {e}");
            println!("\n  ⚠️  Cannot continue without a valid config.");
            return Ok(());
        }
    };

    // Check API key, then whether the provider answers with it
    if config.has_api_key() {
        println!("  ✅ API key configured for '{}'", config.default_provider);
        match lappybot_providers::build_generator(&config) {
            Some(provider) => {
                let (healthy, line) = provider_status(provider.as_ref()).await;
                println!("  {line}");
                if !healthy {
                    issues += 1;
                }
            }
            None => {
                println!("  ❌ No provider registered as '{}'", config.default_provider);
                issues += 1;
            }
        }
    } else {
        println!("  ⚠️  No API key configured, set LAPPYBOT_API_KEY or OPENAI_API_KEY");
        issues += 1;
    }

    // Check catalog
    match Catalog::load(&config.catalog.path) {
        Ok(catalog) => {
            println!(
                "  ✅ Catalog loaded: {} laptops from {}",
                catalog.len(),
                config.catalog.path.display()
            );
            let missing: Vec<&str> = STANDARD_COLUMNS
                .iter()
                .copied()
                .filter(|name| !catalog.columns().iter().any(|c| c == name))
                .collect();
            if !missing.is_empty() {
                println!("  ⚠️  Catalog is missing columns: {}", missing.join(", "));
                issues += 1;
            }
            if catalog.is_empty() {
                println!("  ⚠️  Catalog has no rows");
                issues += 1;
            }
        }
        Err(e) => {
            println!("  ❌ {e}");
            issues += 1;
        }
    }

    // Check image search
    if config.image_search.is_configured() {
        println!("  ✅ Image search configured");
    } else {
        println!("  ⚠️  Image search not configured, set GOOGLE_API_KEY and GOOGLE_SEARCH_ENGINE_ID");
        issues += 1;
    }

    // Check guide data
    match GuideBook::builtin() {
        Ok(guide) => println!("  ✅ Guide data ready ({} known issues)", guide.issues().len()),
        Err(e) => {
            println!("  ❌ Guide data invalid: {e}");
            issues += 1;
        }
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}

/// Run the provider's health check and describe the outcome.
async fn provider_status(provider: &dyn Provider) -> (bool, String) {
    match provider.health_check().await {
        Ok(true) => (true, format!("✅ Provider '{}' reachable", provider.name())),
        Ok(false) => (
            false,
            format!(
                "⚠️  Provider '{}' rejected the health check, verify the API key and URL",
                provider.name()
            ),
        ),
        Err(e) => (false, format!("❌ Provider '{}' unreachable: {e}", provider.name())),
    }
}
