//! Terminal rendering for rubrics, feedback records and batch results.

use super::style as ui;
use crate::batch::{BatchProgress, BatchResult};
use crate::feedback::{FeedbackHistory, FeedbackRecord, FeedbackStatus};
use crate::rubric::{Rubric, RubricWarning};
use std::fmt::Write as _;

const RULE_WIDTH: usize = 50;

pub fn print_section(title: &str) {
    println!();
    println!("  {}", ui::header(title));
    println!("  {}", ui::dim("─".repeat(RULE_WIDTH)));
}

pub fn print_bullet(text: &str) {
    println!("  {} {}", ui::accent("›"), text);
}

pub fn print_warnings(warnings: &[RubricWarning]) {
    for warning in warnings {
        println!("  {} {}", ui::warning("⚠"), ui::warning(warning));
    }
}

/// Criteria table with weights, max scores and the performance scale.
pub fn rubric_summary(rubric: &Rubric) -> String {
    let width = rubric
        .criteria()
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for criterion in rubric.criteria() {
        let _ = writeln!(
            out,
            "    {:<width$}  weight {:>5.1}%  max {}",
            criterion.name, criterion.weight, criterion.max_score
        );
    }
    let levels: Vec<String> = rubric
        .performance_levels()
        .iter()
        .rev()
        .map(|(score, label)| format!("{score}={label}"))
        .collect();
    let _ = writeln!(out, "    levels: {}", levels.join(", "));
    out
}

pub fn print_rubric(rubric: &Rubric) {
    print_section(rubric.name());
    print!("{}", rubric_summary(rubric));
    print_warnings(&rubric.validate());
}

pub fn print_record(record: &FeedbackRecord) {
    print_section("Feedback");
    print_bullet(&format!("{} {}", ui::cyan("Student:"), ui::value(record.student())));
    if let Some(assignment) = record.assignment() {
        print_bullet(&format!("{} {}", ui::cyan("Assignment:"), ui::value(assignment)));
    }
    print_bullet(&format!(
        "{} {}",
        ui::cyan("Overall Score:"),
        ui::value(format!(
            "{:.1}/{:.1} ({:.1}%)",
            record.total(),
            record.max_possible(),
            record.percentage()
        ))
    ));
    print_bullet(&format!("{} {}", ui::cyan("Style:"), record.style().title()));
    println!();

    match record.status() {
        FeedbackStatus::Generated => {
            for line in record.feedback().lines() {
                println!("  {line}");
            }
        }
        FeedbackStatus::Failed => println!("  {}", ui::error(record.feedback())),
    }
}

/// One line per record, newest first.
pub fn history_lines(history: &FeedbackHistory, limit: usize) -> Vec<String> {
    history
        .recent(limit)
        .map(|record| {
            let assignment = record
                .assignment()
                .map(|a| format!(" - {a}"))
                .unwrap_or_default();
            let marker = match record.status() {
                FeedbackStatus::Generated => "",
                FeedbackStatus::Failed => " [failed]",
            };
            format!(
                "{}{assignment}: {:.1}% ({}){marker}",
                record.student(),
                record.percentage(),
                record.created_at().format("%Y-%m-%d %H:%M")
            )
        })
        .collect()
}

pub fn print_history(history: &FeedbackHistory, limit: usize) {
    print_section("Feedback History");
    if history.is_empty() {
        println!("  {}", ui::dim("No feedback generated yet"));
        return;
    }
    for line in history_lines(history, limit) {
        print_bullet(&line);
    }
}

pub fn progress_line(progress: BatchProgress) -> String {
    format!(
        "[{}/{}] {:.0}%",
        progress.completed,
        progress.total,
        progress.fraction() * 100.0
    )
}

pub fn print_batch_results(results: &[BatchResult]) {
    print_section("Batch Results");
    if results.is_empty() {
        println!(
            "  {}",
            ui::dim("No rows had both student_name and assignment_name")
        );
        return;
    }
    for result in results {
        let status = match result.status {
            FeedbackStatus::Generated => ui::success("✓"),
            FeedbackStatus::Failed => ui::error("✗"),
        };
        println!(
            "  {status} {} - {} ({:.1}%)",
            result.student,
            result.assignment,
            result.totals.percentage()
        );
    }
}
