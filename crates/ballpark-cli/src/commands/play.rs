//! The guessing game
//!
//! Multi-round flow: each round aggregates the top spending groups not yet
//! played, prompts a guess per group, reveals the actual with a rating, then
//! shows the round table and the running score. While unplayed groups
//! remain, the game offers another round.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use ballpark_core::{
    accuracy_rating, aggregate, overall_score, parse_amount, score_round, AggregateOptions,
    DateRange, GameResult, GroupMode, Rating, Transaction,
};

use super::{format_currency, format_currency_detailed, load_transactions, truncate};

pub fn cmd_play(
    file: &Path,
    mode: &str,
    window: Option<DateRange>,
    top: usize,
    min_amount: f64,
    output: Option<&Path>,
) -> Result<()> {
    let mode: GroupMode = mode.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let transactions = load_transactions(file)?;

    println!();
    println!("🎯 Ballpark: how well do you know your own spending?");
    match window {
        Some(ref range) => println!("   Window: {}", range),
        None => println!("   Window: all transactions"),
    }
    println!("   Guess the total spent per {}.", mode);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let results = run_game(&transactions, mode, window, top, min_amount, &mut input)?;

    if results.is_empty() {
        anyhow::bail!(
            "No spending groups matched the filters. \
             Try a wider date window or a lower --min-amount."
        );
    }

    let total: f64 = results.iter().map(|r| r.actual).sum();
    println!();
    println!(
        "🏁 Final score: {:.0}/100 across {} groups ({} of spending)",
        overall_score(&results),
        results.len(),
        format_currency(total)
    );

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&results)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("   Results saved to {}", path.display());
    }

    Ok(())
}

/// Drive the game over any line-based input, returning every scored round.
///
/// Input supplies one guess per group, then a yes/no line whenever another
/// round is on offer. Guesses are parsed leniently ("$1,200" and "1200" both
/// work); blank, unparseable, or exhausted input counts as a zero guess.
pub fn run_game<R: BufRead>(
    transactions: &[Transaction],
    mode: GroupMode,
    window: Option<DateRange>,
    top: usize,
    min_amount: f64,
    input: &mut R,
) -> Result<Vec<GameResult>> {
    let mut results: Vec<GameResult> = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    let mut round_number = 0;

    loop {
        let round = aggregate(
            transactions,
            &AggregateOptions {
                mode,
                top_n: top,
                min_amount,
                date_range: window,
                exclude_names: seen.clone(),
            },
        );
        if round.is_empty() {
            break;
        }
        round_number += 1;

        println!();
        println!("── Round {} ({} groups) ──", round_number, round.len());

        let mut round_results = Vec::with_capacity(round.len());
        for category in &round {
            print!(
                "   {} ({} transactions) - your guess: $",
                category.name, category.transaction_count
            );
            io::stdout().flush()?;
            let guess = parse_amount(next_line(input)?.trim());

            let result = score_round(&category.name, guess, category.amount);
            let rating = accuracy_rating(result.percent_off);
            println!(
                "      Actual: {}  {} ({:.1}% off)",
                format_currency_detailed(result.actual),
                rating_blurb(rating),
                result.percent_off
            );

            seen.push(category.name.clone());
            round_results.push(result);
        }

        print_round_table(round_number, &round_results);
        results.extend(round_results);
        println!("   Score so far: {:.0}/100", overall_score(&results));

        // One cheap look-ahead tells us whether any group remains to play
        let more = aggregate(
            transactions,
            &AggregateOptions {
                mode,
                top_n: 1,
                min_amount,
                date_range: window,
                exclude_names: seen.clone(),
            },
        );
        if more.is_empty() {
            println!();
            println!("   That was every group. Thanks for playing!");
            break;
        }

        print!("   Play another round? [y/N] ");
        io::stdout().flush()?;
        if !next_line(input)?.trim().eq_ignore_ascii_case("y") {
            break;
        }
    }

    Ok(results)
}

/// Read one line; end-of-input reads as an empty line
fn next_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line)
}

fn print_round_table(round_number: usize, round_results: &[GameResult]) {
    println!();
    println!("📊 Round {} results", round_number);
    println!(
        "   {:28} │ {:>12} │ {:>12} │ {:>8}",
        "Group", "Guess", "Actual", "Off by"
    );
    println!("   ─────────────────────────────┼──────────────┼──────────────┼──────────");
    for result in round_results {
        println!(
            "   {:28} │ {:>12} │ {:>12} │ {:>7.1}%",
            truncate(&result.category_name, 28),
            format_currency_detailed(result.guess),
            format_currency_detailed(result.actual),
            result.percent_off
        );
    }
}

fn rating_blurb(rating: Rating) -> &'static str {
    match rating {
        Rating::Excellent => "🎯 Spot on!",
        Rating::Good => "👍 Pretty close!",
        Rating::Fair => "🤔 Not bad",
        Rating::Poor => "😬 Way off",
        Rating::VeryPoor => "🤯 Wildly off",
    }
}
