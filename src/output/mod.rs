pub mod formatter;

pub use formatter::{
    format_breakdown, format_category_counts, format_match_table, format_match_tsv,
    format_provider_table, format_trust_level, should_use_colors,
};
