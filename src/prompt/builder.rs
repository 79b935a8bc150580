use super::engine::TeraEngine;
use super::style::FeedbackStyle;
use crate::error::PromptError;
use crate::rubric::{Criterion, Rubric, ScoreSet};
use crate::scoring::aggregate;
use tera::Context;

const FEEDBACK_PROMPT_TEMPLATE: &str = "\
{{ instructions }}

Student: {{ student }}
{% if assignment %}Assignment: {{ assignment }}
{% endif %}Overall Score: {{ total }}/{{ max_possible }} ({{ percentage }}%)

Performance by Criteria:
{% for line in criteria %}- {{ line }}
{% endfor %}
Generate personalized feedback for this student's performance.
";

const FEEDBACK_PROMPT_NAME: &str = "feedback_prompt";

/// Who the feedback is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission<'a> {
    pub student: &'a str,
    pub assignment: Option<&'a str>,
}

impl<'a> Submission<'a> {
    pub fn new(student: &'a str) -> Self {
        Self {
            student,
            assignment: None,
        }
    }

    pub fn with_assignment(mut self, assignment: Option<&'a str>) -> Self {
        self.assignment = assignment.map(str::trim).filter(|a| !a.is_empty());
        self
    }
}

/// `<criterion>: <score>/<max_score> (<performance level>)`
pub fn criterion_line(rubric: &Rubric, criterion: &Criterion, scores: &ScoreSet) -> String {
    let score = scores.score_or_zero(&criterion.name);
    format!(
        "{}: {}/{} ({})",
        criterion.name,
        score,
        criterion.max_score,
        rubric.performance_level(score)
    )
}

/// Renders the text prompt sent to the feedback service.
pub struct FeedbackPromptBuilder {
    engine: TeraEngine,
}

impl FeedbackPromptBuilder {
    pub fn new() -> Result<Self, PromptError> {
        let mut engine = TeraEngine::new();
        engine.add_template(FEEDBACK_PROMPT_NAME, FEEDBACK_PROMPT_TEMPLATE)?;
        Ok(Self { engine })
    }

    pub fn build(
        &self,
        style: FeedbackStyle,
        submission: Submission<'_>,
        rubric: &Rubric,
        scores: &ScoreSet,
    ) -> Result<String, PromptError> {
        let totals = aggregate(rubric, scores);
        let criteria: Vec<String> = rubric
            .criteria()
            .iter()
            .map(|criterion| criterion_line(rubric, criterion, scores))
            .collect();

        let mut ctx = Context::new();
        ctx.insert("instructions", style.template().instructions);
        ctx.insert("student", submission.student.trim());
        ctx.insert("assignment", submission.assignment.unwrap_or_default());
        ctx.insert("total", &format!("{:.1}", totals.total));
        ctx.insert("max_possible", &format!("{:.1}", totals.max_possible));
        ctx.insert("percentage", &format!("{:.1}", totals.percentage()));
        ctx.insert("criteria", &criteria);

        self.engine.render(FEEDBACK_PROMPT_NAME, &ctx)
    }

    /// Like [`FeedbackPromptBuilder::build`], taking the style by name.
    pub fn build_named(
        &self,
        style: &str,
        submission: Submission<'_>,
        rubric: &Rubric,
        scores: &ScoreSet,
    ) -> Result<String, PromptError> {
        self.build(FeedbackStyle::parse(style)?, submission, rubric, scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rubric::templates;

    fn builder() -> FeedbackPromptBuilder {
        FeedbackPromptBuilder::new().unwrap()
    }

    fn two_criteria() -> Rubric {
        Rubric::with_default_levels(
            "Lab",
            vec![Criterion::new("Method", 50.0, 4), Criterion::new("Results", 50.0, 4)],
        )
        .unwrap()
    }

    #[test]
    fn renders_exact_brief_prompt() {
        let rubric = two_criteria();
        let scores: ScoreSet = [("Method", 4), ("Results", 1)].into_iter().collect();

        let prompt = builder()
            .build(FeedbackStyle::Brief, Submission::new("Ada"), &rubric, &scores)
            .unwrap();

        let expected = format!(
            "{}\n\nStudent: Ada\nOverall Score: 2.5/4.0 (62.5%)\n\n\
             Performance by Criteria:\n\
             - Method: 4/4 (Excellent)\n\
             - Results: 1/4 (Needs Improvement)\n\n\
             Generate personalized feedback for this student's performance.\n",
            FeedbackStyle::Brief.template().instructions
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn assignment_line_appears_only_when_given() {
        let rubric = two_criteria();
        let scores = ScoreSet::new();
        let b = builder();

        let with = b
            .build(
                FeedbackStyle::Constructive,
                Submission::new("Ada").with_assignment(Some("Lab 3")),
                &rubric,
                &scores,
            )
            .unwrap();
        assert!(with.contains("Student: Ada\nAssignment: Lab 3\nOverall Score:"));

        let blank = b
            .build(
                FeedbackStyle::Constructive,
                Submission::new("Ada").with_assignment(Some("  ")),
                &rubric,
                &scores,
            )
            .unwrap();
        assert!(!blank.contains("Assignment:"));
    }

    #[test]
    fn every_style_lists_every_criterion_and_the_percentage() {
        let rubric = templates::builtin().remove(0);
        let scores: ScoreSet = rubric
            .criteria()
            .iter()
            .zip([4, 3, 2, 4, 1])
            .map(|(c, s)| (c.name.clone(), s))
            .collect();
        let b = builder();

        for style in FeedbackStyle::all() {
            let prompt = b
                .build(style, Submission::new("Grace"), &rubric, &scores)
                .unwrap();
            for criterion in rubric.criteria() {
                assert_eq!(
                    prompt.matches(&format!("- {}: ", criterion.name)).count(),
                    1,
                    "{style} prompt missing {}",
                    criterion.name
                );
            }
            assert!(prompt.contains("Overall Score: 2.8/4.0 (70.0%)"));
            assert!(prompt.starts_with(style.template().instructions));
        }
    }

    #[test]
    fn unscored_criteria_render_as_zero_not_assessed() {
        let rubric = two_criteria();
        let prompt = builder()
            .build(
                FeedbackStyle::Detailed,
                Submission::new("Ada"),
                &rubric,
                &ScoreSet::new(),
            )
            .unwrap();
        assert!(prompt.contains("- Method: 0/4 (Not Assessed)"));
        assert!(prompt.contains("Overall Score: 0.0/4.0 (0.0%)"));
    }

    #[test]
    fn build_named_rejects_unknown_style() {
        let err = builder()
            .build_named(
                "poetic",
                Submission::new("Ada"),
                &two_criteria(),
                &ScoreSet::new(),
            )
            .unwrap_err();
        assert!(matches!(err, PromptError::UnknownStyle(_)));
    }
}
