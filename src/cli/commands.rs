use crate::prompt::FeedbackStyle;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// `GradeCraft` - rubric scoring with AI-generated student feedback.
#[derive(Parser, Debug)]
#[command(name = "gradecraft")]
#[command(version)]
#[command(about = "Turn rubric scores into a weighted grade and personalized feedback.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.gradecraft/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to the interactive session
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the rubric comes from. Falls back to `feedback.default_rubric`.
#[derive(Args, Debug, Clone, Default)]
pub struct RubricArgs {
    /// Rubric name (built-in or from `[[rubrics]]` in the config)
    #[arg(long, conflicts_with = "rubric_file")]
    pub rubric: Option<String>,

    /// Load the rubric from a TOML definition file
    #[arg(long, value_name = "PATH")]
    pub rubric_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate feedback for one student
    Generate {
        /// Student name
        #[arg(short, long)]
        student: String,

        /// Assignment name
        #[arg(short, long)]
        assignment: Option<String>,

        #[command(flatten)]
        rubric: RubricArgs,

        /// Score for one criterion, e.g. --score "Python Programming=3";
        /// the column key (python_programming) also works. Repeatable.
        #[arg(long = "score", value_name = "CRITERION=N")]
        scores: Vec<String>,

        /// Feedback style (constructive, detailed, brief)
        #[arg(long, value_parser = FeedbackStyle::parse)]
        style: Option<FeedbackStyle>,

        /// Write a text report to this path
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Print the prompt instead of calling the feedback service
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate feedback for every row of a CSV file
    Batch {
        /// CSV with student_name, assignment_name and one column per criterion
        #[arg(short, long, value_name = "CSV")]
        input: PathBuf,

        #[command(flatten)]
        rubric: RubricArgs,

        /// Feedback style (constructive, detailed, brief)
        #[arg(long, value_parser = FeedbackStyle::parse)]
        style: Option<FeedbackStyle>,

        /// Results CSV (default: batch_feedback_results.csv)
        #[arg(short, long, value_name = "CSV")]
        output: Option<PathBuf>,
    },

    /// List available rubrics and their validation warnings
    Rubrics {
        /// Show a single rubric
        #[arg(long)]
        name: Option<String>,

        /// Print rubric definitions as TOML (usable with --rubric-file)
        #[arg(long)]
        toml: bool,
    },

    /// Menu-driven grading session
    Interactive,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_has_no_flag_conflicts() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_collects_repeated_scores() {
        let cli = Cli::try_parse_from([
            "gradecraft",
            "generate",
            "--student",
            "Ada",
            "--score",
            "AI (Artificial Intelligence)=4",
            "--score",
            "python_programming=3",
            "--style",
            "brief",
        ])
        .unwrap();

        let Some(Commands::Generate { scores, style, .. }) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(scores.len(), 2);
        assert_eq!(style, Some(FeedbackStyle::Brief));
    }

    #[test]
    fn unknown_style_is_rejected_by_the_parser() {
        let err = Cli::try_parse_from(["gradecraft", "generate", "-s", "Ada", "--style", "poetic"])
            .unwrap_err();
        assert!(err.to_string().contains("poetic"));
    }

    #[test]
    fn rubric_name_and_file_conflict() {
        let result = Cli::try_parse_from([
            "gradecraft",
            "batch",
            "-i",
            "scores.csv",
            "--rubric",
            "Internal Assessment 1",
            "--rubric-file",
            "lab.toml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["gradecraft", "-v"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["gradecraft", "rubrics", "--config", "/tmp/g.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/g.toml")));
    }
}
