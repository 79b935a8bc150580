use crate::batch::{self, BatchProgress, BatchResult, BatchRow};
use crate::config::Config;
use crate::error::{GradeError, InputError};
use crate::feedback::{FeedbackClient, FeedbackHistory, FeedbackRecord};
use crate::prompt::{FeedbackPromptBuilder, FeedbackStyle, Submission};
use crate::rubric::{Rubric, ScoreSet};
use crate::scoring::aggregate;

/// Everything one grading session owns: the record store, the prompt
/// builder and the feedback client.
pub struct GradingSession {
    history: FeedbackHistory,
    prompts: FeedbackPromptBuilder,
    client: FeedbackClient,
}

impl GradingSession {
    pub fn new(prompts: FeedbackPromptBuilder, client: FeedbackClient) -> Self {
        Self {
            history: FeedbackHistory::new(),
            prompts,
            client,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, GradeError> {
        let prompts = FeedbackPromptBuilder::new()?;
        let client = FeedbackClient::from_config(config)?;
        tracing::info!(
            provider = client.provider_name(),
            model = client.model(),
            "grading session ready"
        );
        Ok(Self::new(prompts, client))
    }

    pub fn history(&self) -> &FeedbackHistory {
        &self.history
    }

    /// Score, prompt and call the feedback service for one student.
    ///
    /// A blank student name is refused and nothing is recorded. A service
    /// failure still produces a record, with status `Failed`.
    pub async fn generate(
        &mut self,
        submission: Submission<'_>,
        rubric: &Rubric,
        scores: &ScoreSet,
        style: FeedbackStyle,
    ) -> Result<&FeedbackRecord, GradeError> {
        require_student(submission)?;

        let totals = aggregate(rubric, scores);
        let prompt = self.prompts.build(style, submission, rubric, scores)?;
        tracing::info!(
            student = submission.student.trim(),
            rubric = rubric.name(),
            %style,
            template_version = style.template().version,
            total = totals.total,
            max_possible = totals.max_possible,
            "generating feedback"
        );

        let outcome = self.client.generate(&prompt).await;
        if let Err(err) = &outcome {
            tracing::warn!(error = %err, "feedback generation failed");
        }

        let record = FeedbackRecord::new(
            submission.student,
            submission.assignment,
            style,
            totals,
            outcome,
        );
        Ok(self.history.append(record))
    }

    /// Batch results are returned to the caller and not added to the history.
    pub async fn run_batch<F>(
        &self,
        rows: &[BatchRow],
        rubric: &Rubric,
        style: FeedbackStyle,
        on_progress: F,
    ) -> Result<Vec<BatchResult>, GradeError>
    where
        F: FnMut(BatchProgress),
    {
        Ok(batch::run_batch(rows, rubric, style, &self.prompts, &self.client, on_progress).await?)
    }
}

/// Render the prompt [`GradingSession::generate`] would send, without a
/// feedback client.
pub fn preview_prompt(
    prompts: &FeedbackPromptBuilder,
    submission: Submission<'_>,
    rubric: &Rubric,
    scores: &ScoreSet,
    style: FeedbackStyle,
) -> Result<String, GradeError> {
    require_student(submission)?;
    Ok(prompts.build(style, submission, rubric, scores)?)
}

fn require_student(submission: Submission<'_>) -> Result<(), InputError> {
    if submission.student.trim().is_empty() {
        return Err(InputError::MissingStudentName);
    }
    Ok(())
}
