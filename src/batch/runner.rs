use super::BatchRow;
use crate::error::PromptError;
use crate::feedback::{FeedbackClient, FeedbackStatus};
use crate::prompt::{FeedbackPromptBuilder, FeedbackStyle, Submission};
use crate::rubric::Rubric;
use crate::scoring::{Aggregate, aggregate};

/// Rows handled so far, skipped rows included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
}

impl BatchProgress {
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Outcome for one accepted row.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    pub student: String,
    pub assignment: String,
    pub totals: Aggregate,
    pub feedback: String,
    pub status: FeedbackStatus,
}

/// Generate feedback for every accepted row, one request at a time.
///
/// Results keep input order. A service failure still produces a result whose
/// feedback is the error text.
pub async fn run_batch<F>(
    rows: &[BatchRow],
    rubric: &Rubric,
    style: FeedbackStyle,
    prompts: &FeedbackPromptBuilder,
    client: &FeedbackClient,
    mut on_progress: F,
) -> Result<Vec<BatchResult>, PromptError>
where
    F: FnMut(BatchProgress),
{
    let total = rows.len();
    let mut results = Vec::with_capacity(total);
    tracing::info!(
        rows = total,
        rubric = rubric.name(),
        %style,
        template_version = style.template().version,
        "starting batch"
    );

    for (index, row) in rows.iter().enumerate() {
        if let Some((student, assignment)) = row.identity() {
            let scores = row.scores_for(rubric);
            let submission = Submission::new(student).with_assignment(Some(assignment));
            let prompt = prompts.build(style, submission, rubric, &scores)?;

            let (feedback, status) = match client.generate(&prompt).await {
                Ok(text) => (text, FeedbackStatus::Generated),
                Err(err) => {
                    tracing::warn!(row = index + 1, student, error = %err, "feedback generation failed");
                    (err.as_feedback_text(), FeedbackStatus::Failed)
                }
            };

            results.push(BatchResult {
                student: student.to_string(),
                assignment: assignment.to_string(),
                totals: aggregate(rubric, &scores),
                feedback,
                status,
            });
        } else {
            tracing::debug!(row = index + 1, "skipping row without student or assignment name");
        }

        on_progress(BatchProgress {
            completed: index + 1,
            total,
        });
    }

    let failed = results
        .iter()
        .filter(|r| r.status == FeedbackStatus::Failed)
        .count();
    tracing::info!(
        processed = results.len(),
        skipped = total - results.len(),
        failed,
        "batch finished"
    );
    Ok(results)
}
