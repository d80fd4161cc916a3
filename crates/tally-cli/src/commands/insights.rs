//! Insights command implementation

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::format::format_currency;
use tally_core::{read_batch, resolve_days, InputFormat, SpendingInsights};

use super::analyze::print_breakdown;
use super::load_analyzer;

pub fn cmd_insights(
    config_path: Option<&Path>,
    file: &Path,
    days: Option<f64>,
    format: Option<InputFormat>,
    json: bool,
) -> Result<()> {
    let analyzer = load_analyzer(config_path)?;
    let batch = read_batch(file, format)
        .with_context(|| format!("Failed to read expenses from {}", file.display()))?;

    let days = match days {
        Some(days) => days,
        None => resolve_days(batch.days.as_ref()).context("Insights generation failed")?,
    };
    let insights = analyzer
        .insights_raw(&batch.expenses, days)
        .context("Insights generation failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
    } else {
        print_insights(&insights, &analyzer.config().currency_symbol);
    }
    Ok(())
}

fn print_insights(insights: &SpendingInsights, symbol: &str) {
    println!();
    println!("📈 Spending Insights ({} days)", insights.days_analyzed);
    println!("{}", "─".repeat(60));
    println!(
        "   Total spending:    {}",
        format_currency(insights.total_spending, symbol)
    );
    println!(
        "   Average per day:   {}",
        format_currency(insights.average_daily_spending, symbol)
    );
    println!("   Transactions:      {}", insights.transaction_count);
    println!("   Top category:      {}", insights.top_category);
    println!("   Top payment:       {}", insights.top_payment_method);

    if !insights.category_breakdown.is_empty() {
        print_breakdown("By category", &insights.category_breakdown, symbol);
    }
    if !insights.payment_method_breakdown.is_empty() {
        print_breakdown(
            "By payment method",
            &insights.payment_method_breakdown,
            symbol,
        );
    }
}
