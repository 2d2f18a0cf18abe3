pub mod export;
pub mod formatter;

pub use export::{export_json, write_output, ExportDocument};
pub use formatter::{
    format_comparison, format_dataset, format_details, format_history, format_methods,
    format_ranked_table, format_score, format_tsv, should_use_colors, INSUFFICIENT_DATA,
};
