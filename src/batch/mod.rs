//! CSV-driven feedback for many students at once.

mod export;
mod input;
mod runner;

pub use export::{DEFAULT_RESULTS_FILE, write_results, write_results_to_path};
pub use input::{ASSIGNMENT_COLUMN, BatchRow, STUDENT_COLUMN, read_rows, read_rows_from_path};
pub use runner::{BatchProgress, BatchResult, run_batch};
