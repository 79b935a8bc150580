use crate::app::session::{GradingSession, preview_prompt};
use crate::batch::{self, DEFAULT_RESULTS_FILE};
use crate::cli::{Cli, Commands, RubricArgs, interactive};
use crate::config::Config;
use crate::feedback::{FeedbackRecord, render_report, report_file_name};
use crate::prompt::{FeedbackPromptBuilder, FeedbackStyle, Submission};
use crate::rubric::{Rubric, RubricCatalog, RubricDefinition, ScoreSet};
use crate::ui::render;
use crate::ui::style as ui;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Generate {
            student,
            assignment,
            rubric,
            scores,
            style,
            output,
            dry_run,
        } => {
            let request = GenerateRequest {
                student: &student,
                assignment: assignment.as_deref(),
                rubric: &rubric,
                scores: &scores,
                style,
                output: output.as_deref(),
                dry_run,
            };
            run_generate(&config, request).await
        }
        Commands::Batch {
            input,
            rubric,
            style,
            output,
        } => run_batch(&config, &input, &rubric, style, output).await,
        Commands::Rubrics { name, toml } => list_rubrics(&config, name.as_deref(), toml),
        Commands::Interactive => interactive::run(&config).await,
    }
}

/// Rubric named on the command line, loaded from `--rubric-file`, or the
/// configured default.
pub fn resolve_rubric(config: &Config, catalog: &RubricCatalog, args: &RubricArgs) -> Result<Rubric> {
    if let Some(path) = &args.rubric_file {
        let definition = RubricDefinition::load(path)?;
        return Ok(definition.to_rubric()?);
    }
    let name = args
        .rubric
        .as_deref()
        .unwrap_or(config.feedback.default_rubric.as_str());
    Ok(catalog.find(name)?.clone())
}

struct GenerateRequest<'a> {
    student: &'a str,
    assignment: Option<&'a str>,
    rubric: &'a RubricArgs,
    scores: &'a [String],
    style: Option<FeedbackStyle>,
    output: Option<&'a Path>,
    dry_run: bool,
}

async fn run_generate(config: &Config, request: GenerateRequest<'_>) -> Result<()> {
    let catalog = config.catalog()?;
    let rubric = resolve_rubric(config, &catalog, request.rubric)?;
    let warnings = rubric.validate();
    for warning in &warnings {
        tracing::warn!(rubric = rubric.name(), "{warning}");
    }
    render::print_warnings(&warnings);

    let mut scores = ScoreSet::new();
    for raw in request.scores {
        scores.assign(&rubric, raw)?;
    }

    let style = request.style.unwrap_or(config.feedback.default_style);
    let submission = Submission::new(request.student).with_assignment(request.assignment);

    if request.dry_run {
        let prompts = FeedbackPromptBuilder::new()?;
        let prompt = preview_prompt(&prompts, submission, &rubric, &scores, style)?;
        println!("{prompt}");
        return Ok(());
    }

    let mut session = GradingSession::from_config(config)?;
    let record = session.generate(submission, &rubric, &scores, style).await?;
    render::print_record(record);

    if let Some(path) = request.output {
        write_report(path, record)?;
    }
    Ok(())
}

async fn run_batch(
    config: &Config,
    input: &Path,
    rubric_args: &RubricArgs,
    style: Option<FeedbackStyle>,
    output: Option<PathBuf>,
) -> Result<()> {
    let catalog = config.catalog()?;
    let rubric = resolve_rubric(config, &catalog, rubric_args)?;
    render::print_warnings(&rubric.validate());

    let rows = batch::read_rows_from_path(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    println!(
        "  {} {} rows from {}",
        ui::accent("›"),
        rows.len(),
        ui::value(input.display())
    );

    let style = style.unwrap_or(config.feedback.default_style);
    let session = GradingSession::from_config(config)?;
    let results = session
        .run_batch(&rows, &rubric, style, |progress| {
            eprintln!("  {}", ui::dim(render::progress_line(progress)));
        })
        .await?;
    render::print_batch_results(&results);

    let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_FILE));
    batch::write_results_to_path(&results, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "  {} Results saved to {}",
        ui::success("✓"),
        ui::value(output.display())
    );
    Ok(())
}

fn list_rubrics(config: &Config, name: Option<&str>, as_toml: bool) -> Result<()> {
    let catalog = config.catalog()?;
    let rubrics: Vec<&Rubric> = match name {
        Some(name) => vec![catalog.find(name)?],
        None => catalog.iter().collect(),
    };

    for rubric in rubrics {
        if as_toml {
            let definition = RubricDefinition::from(rubric);
            println!(
                "{}",
                toml::to_string_pretty(&definition).context("Failed to serialize rubric")?
            );
        } else {
            render::print_rubric(rubric);
        }
    }
    Ok(())
}

/// Write a record's report, defaulting to `<student>_feedback.txt` when
/// `path` is a directory.
pub fn write_report(path: &Path, record: &FeedbackRecord) -> Result<PathBuf> {
    let target = if path.is_dir() {
        path.join(report_file_name(record.student()))
    } else {
        path.to_path_buf()
    };
    std::fs::write(&target, render_report(record))
        .with_context(|| format!("Failed to write {}", target.display()))?;
    println!(
        "  {} Report saved to {}",
        ui::success("✓"),
        ui::value(target.display())
    );
    Ok(target)
}
