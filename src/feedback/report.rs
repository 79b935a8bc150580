use super::FeedbackRecord;
use std::fmt::Write as _;

/// Plain-text report for one record:
///
/// ```text
/// Student: Ada
/// Assignment: Lab 1
/// Score: 2.8/4.0 (70.0%)
/// Date: 2024-05-01 14:30
///
/// Feedback:
/// ...
/// ```
pub fn render_report(record: &FeedbackRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Student: {}", record.student());
    if let Some(assignment) = record.assignment() {
        let _ = writeln!(out, "Assignment: {assignment}");
    }
    let _ = writeln!(
        out,
        "Score: {:.1}/{:.1} ({:.1}%)",
        record.total(),
        record.max_possible(),
        record.percentage()
    );
    let _ = writeln!(out, "Date: {}", record.created_at().format("%Y-%m-%d %H:%M"));
    out.push('\n');
    out.push_str("Feedback:\n");
    out.push_str(record.feedback());
    out.push('\n');
    out
}

/// `<student_slug>_feedback.txt`
pub fn report_file_name(student: &str) -> String {
    let slug = student
        .trim()
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_'))
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();

    if slug.is_empty() {
        "student_feedback.txt".to_string()
    } else {
        format!("{slug}_feedback.txt")
    }
}
