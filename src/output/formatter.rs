use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::provider::{Category, Provider, ScoredProvider};
use crate::scoring::{MatchResult, TrustBreakdown, TrustLevel};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate name to fit available width, accounting for Unicode
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

/// Fit a name into whatever the terminal leaves after the fixed columns
fn fit_name(name: &str, term_width: Option<usize>, fixed_width: usize) -> String {
    match term_width {
        Some(width) if width > fixed_width + 10 => truncate_name(name, width - fixed_width),
        // Very narrow terminal, show truncated
        Some(_) => truncate_name(name, 20),
        // No terminal (pipe), don't truncate
        None => name.to_string(),
    }
}

/// Trust level label, colored by band
pub fn format_trust_level(level: TrustLevel, use_colors: bool) -> String {
    if use_colors {
        paint_level(level.label(), level)
    } else {
        level.label().to_string()
    }
}

fn paint_level(text: &str, level: TrustLevel) -> String {
    match level {
        TrustLevel::Excellent => text.green().to_string(),
        TrustLevel::VeryGood => text.cyan().to_string(),
        TrustLevel::Good => text.yellow().to_string(),
        TrustLevel::Fair => text.red().to_string(),
    }
}

/// Format ranked matches as a table with columns: Index, Score, Name, Id
/// No headers. Index is 1-based and right-aligned with a trailing dot.
pub fn format_match_table(matches: &[MatchResult], use_colors: bool) -> String {
    if matches.is_empty() {
        return "No matching providers found.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = 3;
    let score_width = 3;
    let separator = "  ";

    matches
        .iter()
        .enumerate()
        .map(|(idx, m)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format!("{:>width$}", m.match_score, width = score_width);
            let fixed_width =
                index_width + 1 + score_width + separator.len() * 2 + m.provider.id.len();
            let name = fit_name(&m.provider.name, term_width, fixed_width);

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_str.bold(),
                    separator,
                    name,
                    separator,
                    m.provider.id.underline()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_str, separator, name, separator, m.provider.id
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked matches as tab-separated values for scripting
/// Columns: match_score, id, name, category (no headers, no colors)
pub fn format_match_tsv(matches: &[MatchResult]) -> String {
    matches
        .iter()
        .map(|m| {
            format!(
                "{}\t{}\t{}\t{}",
                m.match_score, m.provider.id, m.provider.name, m.provider.category
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format providers with their trust scores: Index, Score, Level, Name, Id
pub fn format_provider_table(providers: &[ScoredProvider], use_colors: bool) -> String {
    if providers.is_empty() {
        return "No providers found.".to_string();
    }

    let term_width = get_terminal_width();
    let level_width = 9; // "Very Good"
    let separator = "  ";

    providers
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format!("{:>3}", scored.trust_score);
            let level = format!(
                "{:<width$}",
                scored.trust_level.label(),
                width = level_width
            );
            let fixed_width = 3 + 1 + 3 + level_width + separator.len() * 3 + scored.provider.id.len();
            let name = fit_name(&scored.provider.name, term_width, fixed_width);

            if use_colors {
                // Pad before coloring so escape codes don't skew alignment
                let level = paint_level(&level, scored.trust_level);
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_str.bold(),
                    separator,
                    level,
                    separator,
                    name,
                    separator,
                    scored.provider.id.underline()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str,
                    score_str,
                    separator,
                    level,
                    separator,
                    name,
                    separator,
                    scored.provider.id
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a trust score breakdown, one line per factor
pub fn format_breakdown(provider: &Provider, breakdown: &TrustBreakdown, use_colors: bool) -> String {
    let mut lines = Vec::with_capacity(breakdown.factors.len() + 4);

    let header = format!("{} ({})", provider.name, provider.id);
    if use_colors {
        lines.push(header.bold().to_string());
    } else {
        lines.push(header);
    }

    for factor in &breakdown.factors {
        let points = format!("{:>6}", format_points(factor.points));
        let label = format!("{:<15}", factor.label);
        if use_colors && factor.points == 0.0 {
            lines.push(format!("  {} {}  {}", points.dimmed(), label.dimmed(), factor.description.dimmed()));
        } else {
            lines.push(format!("  {} {}  {}", points, label, factor.description));
        }
    }

    lines.push(format!("  Raw total: {}", format_points(breakdown.raw_total)));
    if breakdown.clamped() {
        lines.push(format!(
            "  Clamped to {}-{}",
            format_points(breakdown.floor),
            format_points(breakdown.ceiling)
        ));
    }
    lines.push(format!(
        "  Trust score: {}/100 ({})",
        breakdown.score,
        format_trust_level(breakdown.level(), use_colors)
    ));

    lines.join("\n")
}

/// Format per-category provider counts, one `count  category` line each
pub fn format_category_counts(counts: &[(Category, usize)], use_colors: bool) -> String {
    counts
        .iter()
        .map(|(category, count)| {
            let count_str = format!("{:>4}", count);
            if use_colors && *count == 0 {
                format!("{}  {}", count_str.dimmed(), category.dimmed())
            } else if use_colors {
                format!("{}  {}", count_str.bold(), category)
            } else {
                format!("{}  {}", count_str, category)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render points without a trailing ".0" ("20", "2.5", "1.25")
fn format_points(points: f64) -> String {
    let formatted = format!("{:.2}", points);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::TrustScoreInputs;
    use crate::scoring::{FactorContribution, ScoringConfig, ScoringEngine};

    fn sample_provider(id: &str, name: &str) -> Provider {
        Provider {
            id: id.to_string(),
            name: name.to_string(),
            category: Category::LegalConsulting,
            services: Default::default(),
            languages: Default::default(),
            founded_year: 2010,
            response_time_hours: 2.0,
            response_rate_percent: 98.0,
            is_verified: true,
            is_featured: false,
            google_rating: Some(4.7),
            review_count: 64,
            trust_inputs: TrustScoreInputs::default(),
        }
    }

    #[test]
    fn test_format_match_table_empty() {
        let matches: Vec<MatchResult> = vec![];
        assert_eq!(format_match_table(&matches, false), "No matching providers found.");
    }

    #[test]
    fn test_format_match_table_multiple() {
        let p1 = sample_provider("prov_1", "Desert Legal");
        let p2 = sample_provider("prov_2", "Marina Law Partners");
        let matches = vec![
            MatchResult { provider: &p1, match_score: 92 },
            MatchResult { provider: &p2, match_score: 7 },
        ];
        let result = format_match_table(&matches, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1.  92"));
        assert!(lines[0].contains("Desert Legal"));
        assert!(lines[0].ends_with("prov_1"));
        assert!(lines[1].starts_with(" 2.   7"));
        assert!(lines[1].contains("Marina Law Partners"));
    }

    #[test]
    fn test_format_match_tsv() {
        let p1 = sample_provider("prov_1", "Desert Legal");
        let matches = vec![MatchResult { provider: &p1, match_score: 81 }];
        assert_eq!(
            format_match_tsv(&matches),
            "81\tprov_1\tDesert Legal\tlegal-consulting"
        );
    }

    #[test]
    fn test_format_match_tsv_empty() {
        let matches: Vec<MatchResult> = vec![];
        assert_eq!(format_match_tsv(&matches), "");
    }

    #[test]
    fn test_format_provider_table() {
        let p1 = sample_provider("prov_1", "Desert Legal");
        let scored = vec![ScoredProvider {
            provider: &p1,
            trust_score: 84,
            trust_level: TrustLevel::VeryGood,
        }];
        let result = format_provider_table(&scored, false);
        assert!(result.starts_with(" 1.  84  Very Good  Desert Legal"));
        assert!(result.ends_with("prov_1"));
    }

    #[test]
    fn test_format_provider_table_empty() {
        let scored: Vec<ScoredProvider> = vec![];
        assert_eq!(format_provider_table(&scored, false), "No providers found.");
    }

    #[test]
    fn test_format_trust_level_plain() {
        assert_eq!(format_trust_level(TrustLevel::Excellent, false), "Excellent");
        assert_eq!(format_trust_level(TrustLevel::Fair, false), "Fair");
    }

    #[test]
    fn test_format_breakdown() {
        let provider = sample_provider("prov_1", "Desert Legal");
        let engine = ScoringEngine::new(&ScoringConfig {
            use_estimation_floor: false,
            default_data_quality: None,
            reference_year: Some(2025),
        });
        let breakdown = engine.trust_breakdown(&provider).unwrap();
        let result = format_breakdown(&provider, &breakdown, false);

        assert!(result.starts_with("Desert Legal (prov_1)"));
        assert!(result.contains("Reviews"));
        assert!(result.contains("rating 4.7 (64 reviews)"));
        assert!(result.contains("15 years in business"));
        // 20 (reviews) + 15 (experience) + 10 (data quality default)
        assert!(result.contains("Raw total: 45"));
        assert!(!result.contains("Clamped"));
        assert!(result.ends_with("Trust score: 45/100 (Fair)"));
    }

    #[test]
    fn test_format_breakdown_clamped() {
        let provider = sample_provider("prov_1", "Desert Legal");
        let breakdown = TrustBreakdown {
            factors: vec![FactorContribution {
                label: "Reviews".to_string(),
                description: "no reviews yet".to_string(),
                points: 8.0,
            }],
            raw_total: 8.0,
            floor: 70.0,
            ceiling: 95.0,
            score: 70,
        };
        let result = format_breakdown(&provider, &breakdown, false);
        assert!(result.contains("Clamped to 70-95"));
        assert!(result.contains("Trust score: 70/100 (Good)"));
    }

    #[test]
    fn test_format_category_counts() {
        let counts = vec![(Category::CompanyFormation, 12), (Category::Banking, 0)];
        assert_eq!(
            format_category_counts(&counts, false),
            "  12  company-formation\n   0  banking"
        );
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(20.0), "20");
        assert_eq!(format_points(2.5), "2.5");
        assert_eq!(format_points(1.25), "1.25");
        assert_eq!(format_points(0.0), "0");
        assert_eq!(format_points(112.5), "112.5");
    }

    #[test]
    fn test_truncate_name_short() {
        assert_eq!(truncate_name("Short name", 20), "Short name");
    }

    #[test]
    fn test_truncate_name_long() {
        assert_eq!(truncate_name("Emirates Corporate Services", 15), "Emirates Cor...");
    }

    #[test]
    fn test_truncate_name_very_narrow() {
        assert_eq!(truncate_name("Hello world", 3), "Hel");
    }

    #[test]
    fn test_fit_name_without_terminal() {
        let name = "A very long provider name that would not fit anywhere";
        assert_eq!(fit_name(name, None, 30), name);
        assert_eq!(fit_name(name, Some(35), 30), "A very long provi...");
    }
}
