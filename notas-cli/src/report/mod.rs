//! Report generation: display projection, HTML search page and workbook export

pub mod artifact;
pub mod projection;
pub mod workbook;

pub use artifact::{artifact_file_name, render_artifact, write_artifact};
pub use projection::{DISPLAY_LABELS, DISPLAY_WIDTH, DisplayRow, build_display_rows};
pub use workbook::{ColumnSummary, summarize_columns, workbook_file_name, write_workbook};
