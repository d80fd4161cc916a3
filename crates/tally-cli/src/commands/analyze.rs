//! Analyze command implementation

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::format::format_currency;
use tally_core::models::Breakdown;
use tally_core::{read_batch, AnalysisReport, InputFormat, SuggestionType};
use tracing::info;

use super::{load_analyzer, truncate};

pub fn cmd_analyze(
    config_path: Option<&Path>,
    file: &Path,
    format: Option<InputFormat>,
    json: bool,
) -> Result<()> {
    let analyzer = load_analyzer(config_path)?;
    let batch = read_batch(file, format)
        .with_context(|| format!("Failed to read expenses from {}", file.display()))?;

    info!(
        user_id = batch.user_id.as_deref().unwrap_or("unknown"),
        user_name = batch.user_name.as_deref().unwrap_or("User"),
        count = batch.expenses.len(),
        "Analyzing expenses"
    );

    let report = analyzer
        .analyze_raw(&batch.expenses)
        .context("Analysis failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &analyzer.config().currency_symbol);
    }
    Ok(())
}

fn suggestion_icon(kind: SuggestionType) -> &'static str {
    match kind {
        SuggestionType::Info => "ℹ️ ",
        SuggestionType::Warning => "⚠️ ",
        SuggestionType::Advice => "💡",
        SuggestionType::Tip => "📝",
        SuggestionType::Positive => "✅",
    }
}

fn print_report(report: &AnalysisReport, symbol: &str) {
    let analysis = &report.analysis;

    println!();
    println!("📊 Expense Analysis");
    println!("{}", "─".repeat(60));
    println!(
        "   Total spending:    {}",
        format_currency(analysis.total_spending, symbol)
    );
    println!(
        "   Average per day:   {}",
        format_currency(analysis.average_daily_spending, symbol)
    );
    match analysis.top_category_amount {
        Some(amount) => println!(
            "   Top category:      {} ({})",
            analysis.top_category,
            format_currency(amount, symbol)
        ),
        None => println!("   Top category:      {}", analysis.top_category),
    }
    if let Some(score) = analysis.efficiency_score {
        println!("   Efficiency score:  {}/100", score);
    }

    if let Some(breakdown) = &analysis.category_breakdown {
        print_breakdown("By category", breakdown, symbol);
    }
    if let Some(breakdown) = &analysis.payment_method_breakdown {
        print_breakdown("By payment method", breakdown, symbol);
    }

    if let Some(patterns) = analysis.patterns.as_ref().filter(|p| !p.is_empty()) {
        println!();
        println!("🔍 Patterns");
        for pattern in patterns {
            println!("   • {}", pattern);
        }
    }

    println!();
    println!("💬 Suggestions");
    for suggestion in &report.suggestions {
        println!(
            "   {} [{}] {}",
            suggestion_icon(suggestion.suggestion_type),
            suggestion.priority,
            suggestion.message
        );
    }

    println!();
    println!("{}", analysis.message);
}

pub(crate) fn print_breakdown(title: &str, breakdown: &Breakdown, symbol: &str) {
    println!();
    println!("   {}", title);
    for (label, amount) in breakdown {
        println!(
            "   {:<24} {:>16}",
            truncate(label, 24),
            format_currency(*amount, symbol)
        );
    }
}
