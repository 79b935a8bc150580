mod client;
mod history;
mod record;
mod report;

pub use client::FeedbackClient;
pub use history::FeedbackHistory;
pub use record::{FeedbackRecord, FeedbackStatus};
pub use report::{render_report, report_file_name};
