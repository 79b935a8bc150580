//! Menu-driven grading session.

use crate::app::GradingSession;
use crate::app::dispatch::write_report;
use crate::batch::{self, DEFAULT_RESULTS_FILE};
use crate::config::Config;
use crate::feedback::report_file_name;
use crate::prompt::{FeedbackStyle, Submission};
use crate::rubric::{MAX_CUSTOM_CRITERIA, Rubric, RubricBuilder, RubricCatalog, ScoreSet};
use crate::scoring::aggregate;
use crate::ui::render::{self, print_bullet, print_section};
use crate::ui::style as ui;
use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use std::path::PathBuf;

const CUSTOM_RUBRIC_LABEL: &str = "Custom rubric...";
const DEFAULT_CUSTOM_CRITERIA: usize = 3;
const DEFAULT_CUSTOM_WEIGHT: f64 = 25.0;
const DEFAULT_CUSTOM_MAX_SCORE: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Generate,
    Batch,
    History,
    Quit,
}

impl MenuAction {
    const ALL: [Self; 4] = [Self::Generate, Self::Batch, Self::History, Self::Quit];

    fn label(self) -> &'static str {
        match self {
            Self::Generate => "Generate feedback",
            Self::Batch => "Batch feedback from CSV",
            Self::History => "Show recent feedback",
            Self::Quit => "Quit",
        }
    }
}

pub async fn run(config: &Config) -> Result<()> {
    let catalog = config.catalog()?;
    let mut session = GradingSession::from_config(config)?;

    println!();
    println!("  {}", ui::header("GradeCraft"));
    println!(
        "  {}",
        ui::dim("Rubric scores in, personalized feedback out.")
    );

    loop {
        let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        let choice = Select::new()
            .with_prompt("  What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        let outcome = match MenuAction::ALL[choice] {
            MenuAction::Generate => generate_flow(config, &catalog, &mut session).await,
            MenuAction::Batch => batch_flow(config, &catalog, &session).await,
            MenuAction::History => {
                render::print_history(session.history(), config.feedback.history_display);
                Ok(())
            }
            MenuAction::Quit => break,
        };

        if let Err(err) = outcome {
            tracing::debug!("interactive action failed: {err:#}");
            println!("  {} {err:#}", ui::error("✗"));
        }
        println!();
    }
    Ok(())
}

async fn generate_flow(
    config: &Config,
    catalog: &RubricCatalog,
    session: &mut GradingSession,
) -> Result<()> {
    print_section("Setup Evaluation Criteria");
    let student: String = Input::new()
        .with_prompt("  Student name")
        .allow_empty(true)
        .interact_text()?;
    let assignment: String = Input::new()
        .with_prompt("  Assignment name (optional)")
        .allow_empty(true)
        .interact_text()?;

    let rubric = choose_rubric(config, catalog)?;
    render::print_rubric(&rubric);

    print_section("Student Performance Input");
    let scores = collect_scores(&rubric)?;
    let totals = aggregate(&rubric, &scores);
    print_bullet(&format!(
        "{} {}",
        ui::cyan("Overall Score:"),
        ui::value(format!(
            "{:.1}/{:.1} ({:.1}%)",
            totals.total,
            totals.max_possible,
            totals.percentage()
        ))
    ));

    let style = choose_style(config.feedback.default_style)?;
    let submission = Submission::new(&student).with_assignment(Some(&assignment));

    println!("  {}", ui::dim("Generating personalized feedback..."));
    let record = session.generate(submission, &rubric, &scores, style).await?;
    render::print_record(record);

    let save = Confirm::new()
        .with_prompt("  Save feedback report?")
        .default(false)
        .interact()?;
    if save {
        let path: String = Input::new()
            .with_prompt("  Report file")
            .default(report_file_name(record.student()))
            .interact_text()?;
        write_report(&PathBuf::from(path), record)?;
    }
    Ok(())
}

async fn batch_flow(config: &Config, catalog: &RubricCatalog, session: &GradingSession) -> Result<()> {
    print_section("Batch Processing");
    print_bullet(&format!(
        "CSV columns: {}, {} and one per criterion (e.g. {})",
        batch::STUDENT_COLUMN,
        batch::ASSIGNMENT_COLUMN,
        ui::value("python_programming")
    ));

    let path: String = Input::new().with_prompt("  CSV file").interact_text()?;
    let rows = batch::read_rows_from_path(&PathBuf::from(path.trim()))?;
    print_bullet(&format!("{} rows loaded", rows.len()));

    let rubric = choose_rubric(config, catalog)?;
    render::print_warnings(&rubric.validate());
    let style = choose_style(config.feedback.default_style)?;

    let results = session
        .run_batch(&rows, &rubric, style, |progress| {
            println!("  {}", ui::dim(render::progress_line(progress)));
        })
        .await?;
    render::print_batch_results(&results);
    if results.is_empty() {
        return Ok(());
    }

    let save = Confirm::new()
        .with_prompt("  Save batch results as CSV?")
        .default(true)
        .interact()?;
    if save {
        let output: String = Input::new()
            .with_prompt("  Results file")
            .default(DEFAULT_RESULTS_FILE.to_string())
            .interact_text()?;
        let output = PathBuf::from(output);
        batch::write_results_to_path(&results, &output)?;
        println!(
            "  {} Results saved to {}",
            ui::success("✓"),
            ui::value(output.display())
        );
    }
    Ok(())
}

fn choose_rubric(config: &Config, catalog: &RubricCatalog) -> Result<Rubric> {
    let mut options: Vec<&str> = catalog.names();
    let default = options
        .iter()
        .position(|name| name.eq_ignore_ascii_case(&config.feedback.default_rubric))
        .unwrap_or(0);
    options.push(CUSTOM_RUBRIC_LABEL);

    let choice = Select::new()
        .with_prompt("  Choose a rubric")
        .items(&options)
        .default(default)
        .interact()?;

    if options[choice] == CUSTOM_RUBRIC_LABEL {
        build_custom_rubric()
    } else {
        Ok(catalog.find(options[choice])?.clone())
    }
}

fn build_custom_rubric() -> Result<Rubric> {
    print_section("Custom Rubric Builder");
    let name: String = Input::new()
        .with_prompt("  Rubric name")
        .default("Custom Rubric".to_string())
        .interact_text()?;

    let count: usize = Input::new()
        .with_prompt(format!("  Number of criteria (1-{MAX_CUSTOM_CRITERIA})"))
        .default(DEFAULT_CUSTOM_CRITERIA)
        .validate_with(|n: &usize| -> Result<(), String> {
            if (1..=MAX_CUSTOM_CRITERIA).contains(n) {
                Ok(())
            } else {
                Err(format!("enter a number from 1 to {MAX_CUSTOM_CRITERIA}"))
            }
        })
        .interact_text()?;

    let mut builder = RubricBuilder::new(name);
    for index in 1..=count {
        let criterion: String = Input::new()
            .with_prompt(format!("  Criterion {index} name (blank to skip)"))
            .allow_empty(true)
            .interact_text()?;
        if criterion.trim().is_empty() {
            builder.add_criterion(criterion, 0.0, 0)?;
            continue;
        }
        let weight: f64 = Input::new()
            .with_prompt("    Weight (%)")
            .default(DEFAULT_CUSTOM_WEIGHT)
            .validate_with(|w: &f64| -> Result<(), &'static str> {
                if (1.0..=100.0).contains(w) {
                    Ok(())
                } else {
                    Err("weight must be between 1 and 100")
                }
            })
            .interact_text()?;
        let max_score: u32 = Input::new()
            .with_prompt("    Max score")
            .default(DEFAULT_CUSTOM_MAX_SCORE)
            .validate_with(|m: &u32| -> Result<(), &'static str> {
                if (1..=10).contains(m) {
                    Ok(())
                } else {
                    Err("max score must be between 1 and 10")
                }
            })
            .interact_text()?;
        builder.add_criterion(criterion, weight, max_score)?;
    }

    Ok(builder.build()?)
}

/// `"<score> - <label>"` for every score from 0 to the criterion maximum.
fn score_choices(rubric: &Rubric, max_score: u32) -> Vec<String> {
    (0..=max_score)
        .map(|score| format!("{score} - {}", rubric.performance_level(score)))
        .collect()
}

fn collect_scores(rubric: &Rubric) -> Result<ScoreSet> {
    let mut scores = ScoreSet::new();
    for criterion in rubric.criteria() {
        let choices = score_choices(rubric, criterion.max_score);
        let picked = Select::new()
            .with_prompt(format!(
                "  {} (Weight: {}%)",
                criterion.name, criterion.weight
            ))
            .items(&choices)
            .default(0)
            .interact()?;
        let score = u32::try_from(picked)?;
        scores.insert_for(rubric, &criterion.name, score)?;
    }
    Ok(scores)
}

fn choose_style(default: FeedbackStyle) -> Result<FeedbackStyle> {
    let styles = FeedbackStyle::all();
    let labels: Vec<&str> = styles.iter().map(|s| s.title()).collect();
    let default_index = styles.iter().position(|s| *s == default).unwrap_or(0);
    let choice = Select::new()
        .with_prompt("  Feedback style")
        .items(&labels)
        .default(default_index)
        .interact()?;
    Ok(styles[choice])
}
