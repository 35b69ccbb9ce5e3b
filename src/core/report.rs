//! Run Report
//!
//! End-of-run console summary: processing counters, faction and rarity
//! distributions, and a sample hero from the top tiers.

use console::style;

use super::faction::Faction;
use super::model::ProcessedHero;
use super::pipeline::RunSummary;
use super::rarity::Rarity;

pub fn print_run_report(heroes: &[ProcessedHero], summary: &RunSummary) {
    if heroes.is_empty() {
        println!("{}", style("No heroes processed.").yellow());
        return;
    }
    let total = heroes.len();

    println!();
    println!("{}", style("=".repeat(60)).dim());
    println!("{}", style("PIPELINE COMPLETE").green().bold());
    println!("{}", style("=".repeat(60)).dim());

    println!("\n{}", style("Processing:").bold());
    println!("  Total processed: {}", summary.processed);
    println!(
        "  Manual review needed: {} ({:.1}%)",
        summary.manual_review,
        summary.manual_review as f64 / total as f64 * 100.0
    );
    println!("  Policy rejections (retried): {}", summary.policy_rejections);
    println!("  Similarity retries: {}", summary.similarity_retries);

    println!("\n{}", style("Faction distribution:").bold());
    for faction in Faction::ALL {
        let count = heroes.iter().filter(|h| h.faction == faction).count();
        println!(
            "  {faction}: {count} ({:.1}%)",
            count as f64 / total as f64 * 100.0
        );
    }

    println!("\n{}", style("Rarity distribution:").bold());
    for rarity in Rarity::ALL {
        let count = heroes.iter().filter(|h| h.rarity == rarity).count();
        println!(
            "  {rarity}: {count} ({:.1}%)",
            count as f64 / total as f64 * 100.0
        );
    }

    println!("\n{}", style("Samples:").bold());
    for rarity in [Rarity::Legendary, Rarity::Epic] {
        if let Some(sample) = heroes
            .iter()
            .find(|h| h.rarity == rarity && !h.needs_manual_review)
        {
            println!("\n  [{}] {}", style(rarity).cyan(), style(&sample.name).bold());
            println!("    Faction: {}", sample.faction);
            println!("    Bio: {}", sample.bio);
            println!("    Quote: \"{}\"", sample.quote);
        }
    }
    println!();
}
