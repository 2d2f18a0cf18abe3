use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::dataset::Dataset;
use crate::history::History;
use crate::scoring::{Method, MethodDetails, MethodResult};

pub const INSUFFICIENT_DATA: &str =
    "Insufficient data: add at least one criterion and one alternative to see results.";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with fixed precision. Non-finite scores print as "n/a".
pub fn format_score(score: f64, precision: usize) -> String {
    if score.is_finite() {
        format!("{:.*}", precision, score)
    } else {
        "n/a".to_string()
    }
}

/// Method-specific diagnostics in compact form, e.g. "d+ 0.0803  d- 0.1228"
pub fn format_details(details: &MethodDetails, precision: usize) -> String {
    match details {
        MethodDetails::Topsis {
            positive_distance,
            negative_distance,
        } => format!(
            "d+ {}  d- {}",
            format_score(*positive_distance, precision),
            format_score(*negative_distance, precision)
        ),
        MethodDetails::Moora { benefit_sum, cost_sum } => format!(
            "benefit {}  cost {}",
            format_score(*benefit_sum, precision),
            format_score(*cost_sum, precision)
        ),
        MethodDetails::Wp { vector_s } => format!("S {}", format_score(*vector_s, precision)),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Pad (or truncate) a name to exactly `width` characters.
fn fit_name(name: &str, width: usize) -> String {
    let truncated = truncate_name(name, width);
    let len = truncated.chars().count();
    format!("{}{}", truncated, " ".repeat(width.saturating_sub(len)))
}

/// Format ranked results as a table: rank, score, alternative name, details.
///
/// Rows follow the engine's `rank` field; ranks are never re-derived here.
pub fn format_ranked_table(
    method: Method,
    results: &[MethodResult],
    data: &Dataset,
    precision: usize,
    use_colors: bool,
) -> String {
    if results.is_empty() {
        return INSUFFICIENT_DATA.to_string();
    }

    let mut rows: Vec<&MethodResult> = results.iter().collect();
    rows.sort_by_key(|r| r.rank);

    let scores: Vec<String> = rows.iter().map(|r| format_score(r.score, precision)).collect();
    let score_width = scores.iter().map(|s| s.len()).max().unwrap_or(0);
    let longest_name = rows
        .iter()
        .map(|r| data.alternative_name(&r.alternative_id).chars().count())
        .max()
        .unwrap_or(0);

    // Index "NN." + space + score + two separators, rest for the name and details
    let fixed_width = 4 + score_width + 4;
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => longest_name.min(width - fixed_width - 2),
        Some(_) => longest_name.min(20),
        None => longest_name,
    };

    let title = format!("{} ({})", method.name(), method.id());
    let mut lines = vec![if use_colors {
        title.bold().to_string()
    } else {
        title
    }];

    for (row, score) in rows.iter().zip(&scores) {
        let rank_str = format!("{:>3}.", row.rank);
        let score_padded = format!("{:>width$}", score, width = score_width);
        let name = fit_name(data.alternative_name(&row.alternative_id), name_width);
        let details = row
            .details
            .as_ref()
            .map(|d| format_details(d, precision))
            .unwrap_or_default();

        let line = if use_colors {
            let name = if row.rank == 1 {
                name.green().bold().to_string()
            } else {
                name
            };
            format!(
                "{} {}  {}  {}",
                rank_str.dimmed(),
                score_padded.bold(),
                name,
                details.dimmed()
            )
        } else {
            format!("{} {}  {}  {}", rank_str, score_padded, name, details)
        };
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

/// Format results as tab-separated values for scripting
/// Columns: rank, name, score (no headers, no colors)
pub fn format_tsv(results: &[MethodResult], data: &Dataset, precision: usize) -> String {
    let mut rows: Vec<&MethodResult> = results.iter().collect();
    rows.sort_by_key(|r| r.rank);

    rows.iter()
        .map(|r| {
            format!(
                "{}\t{}\t{}",
                r.rank,
                data.alternative_name(&r.alternative_id),
                format_score(r.score, precision)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Side-by-side ranks of every alternative under every method.
/// One row per alternative in dataset order, one rank column per method.
pub fn format_comparison(
    all: &BTreeMap<Method, Vec<MethodResult>>,
    data: &Dataset,
    use_colors: bool,
) -> String {
    if all.is_empty() || data.alternatives.is_empty() {
        return INSUFFICIENT_DATA.to_string();
    }

    let name_width = data
        .alternatives
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Alternative".len());
    let name_width = match get_terminal_width() {
        Some(width) if width > all.len() * 8 + 10 => name_width.min(width - all.len() * 8),
        _ => name_width,
    };

    let mut header = fit_name("Alternative", name_width);
    for method in all.keys() {
        header.push_str(&format!("  {:>6}", method.id()));
    }
    let mut lines = vec![if use_colors {
        header.bold().to_string()
    } else {
        header
    }];

    for alt in &data.alternatives {
        let mut line = fit_name(&alt.name, name_width);
        for results in all.values() {
            let rank = results
                .iter()
                .find(|r| r.alternative_id == alt.id)
                .map(|r| r.rank.to_string())
                .unwrap_or_else(|| "-".to_string());
            let cell = format!("  {:>6}", rank);
            if use_colors && rank == "1" {
                line.push_str(&cell.green().bold().to_string());
            } else {
                line.push_str(&cell);
            }
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Multi-line listing of criteria and alternative values
pub fn format_dataset(data: &Dataset, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let heading = |s: &str| if use_colors { s.bold().to_string() } else { s.to_string() };

    lines.push(heading(&format!("Criteria ({})", data.criteria.len())));
    if data.criteria.is_empty() {
        lines.push("  (none)".to_string());
    }
    for c in &data.criteria {
        let kind = if use_colors {
            if c.is_benefit() {
                c.kind.as_str().green().to_string()
            } else {
                c.kind.as_str().red().to_string()
            }
        } else {
            c.kind.as_str().to_string()
        };
        let mut line = format!("  {}  {}  weight {}  {}", c.id, c.name, c.weight, kind);
        if let Some(p) = c.percentage {
            line.push_str(&format!("  {}%", p));
        }
        lines.push(line);
    }

    lines.push(String::new());
    lines.push(heading(&format!("Alternatives ({})", data.alternatives.len())));
    if data.alternatives.is_empty() {
        lines.push("  (none)".to_string());
    }
    for alt in &data.alternatives {
        lines.push(format!("  {}  {}", alt.id, alt.name));
        for c in &data.criteria {
            let value = match alt.values.get(&c.id) {
                Some(v) => v.to_string(),
                None => "- (0)".to_string(),
            };
            lines.push(format!("      {}: {}", c.name, value));
        }
    }

    lines.join("\n")
}

/// One line per saved calculation: index, age, method, winner
pub fn format_history(history: &History, data: &Dataset, use_colors: bool) -> String {
    if history.is_empty() {
        return "No saved calculations.".to_string();
    }

    history
        .entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let index_str = format!("{:>3}.", idx + 1);
            let winner = entry
                .winner()
                .map(|id| data.alternative_name(id).to_string())
                .unwrap_or_else(|| "-".to_string());
            let age = entry.format_age();
            if use_colors {
                format!(
                    "{} {:<10} {:<7} {} ({} alternatives)",
                    index_str.dimmed(),
                    age,
                    entry.method.id().cyan(),
                    winner.bold(),
                    entry.results.len()
                )
            } else {
                format!(
                    "{} {:<10} {:<7} {} ({} alternatives)",
                    index_str,
                    age,
                    entry.method.id(),
                    winner,
                    entry.results.len()
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per registered method: id, name and description
pub fn format_methods(use_colors: bool) -> String {
    Method::ALL
        .iter()
        .map(|m| {
            if use_colors {
                format!("{:<7} {}\n        {}", m.id().cyan(), m.name().bold(), m.description())
            } else {
                format!("{:<7} {}\n        {}", m.id(), m.name(), m.description())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
