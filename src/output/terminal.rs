// Colored terminal output for a comparison.
//
// Shows the strongest terms on each side as two bar charts. The bar length
// is relative to the largest |z| on display so both sides share a scale.

use colored::Colorize;

use super::truncate_chars;
use crate::extractor::Analysis;
use crate::rank::{top_favoring_a, top_favoring_b, RankedTerm};

const BAR_WIDTH: usize = 24;
const TERM_WIDTH: usize = 28;

/// Display the top `k` distinctive terms for each corpus.
pub fn display_comparison(analysis: &Analysis, label_a: &str, label_b: &str, k: usize) {
    println!(
        "\n{}",
        format!(
            "=== Fightin' words: {} vs {} ({} terms, {:.0} / {:.0} tokens) ===",
            label_a,
            label_b,
            analysis.vocabulary.len(),
            analysis.counts.total_a(),
            analysis.counts.total_b()
        )
        .bold()
    );

    let favor_a = top_favoring_a(&analysis.ranked, k);
    let favor_b = top_favoring_b(&analysis.ranked, k);

    let max_abs = favor_a
        .iter()
        .chain(&favor_b)
        .map(|t| t.z_score.abs())
        .fold(0.0_f64, f64::max);

    print_side(&format!("Distinctive of {label_a}"), &favor_a, max_abs, true);
    print_side(&format!("Distinctive of {label_b}"), &favor_b, max_abs, false);
}

fn print_side(title: &str, terms: &[&RankedTerm], max_abs: f64, favors_a: bool) {
    println!("\n  {}", title.bold());
    if terms.is_empty() {
        println!("  {}", "(no terms)".dimmed());
        return;
    }

    for (i, term) in terms.iter().enumerate() {
        let filled = if max_abs > 0.0 {
            ((term.z_score.abs() / max_abs) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let bar = "=".repeat(filled.min(BAR_WIDTH));
        let colored_bar = if favors_a {
            bar.bright_blue()
        } else {
            bar.bright_red()
        };

        println!(
            "  {:>3}. {:<width$} {:>8.3}  {}",
            i + 1,
            truncate_chars(&term.term, TERM_WIDTH),
            term.z_score,
            colored_bar,
            width = TERM_WIDTH + 3,
        );
    }
}
