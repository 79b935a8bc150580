//! Built-in rubric templates offered before any custom rubric is defined.

use super::{Criterion, Rubric, default_performance_levels};

pub const INTERNAL_ASSESSMENT_1: &str = "Internal Assessment 1";
pub const INTERNAL_ASSESSMENT_2: &str = "Internal Assessment 2";

const ASSESSMENT_CRITERIA: [&str; 5] = [
    "AI (Artificial Intelligence)",
    "ML (Machine Learning)",
    "DL (Deep Learning)",
    "Stats (Statistics)",
    "Python Programming",
];

fn internal_assessment(name: &str) -> Rubric {
    Rubric {
        name: name.to_string(),
        criteria: ASSESSMENT_CRITERIA
            .iter()
            .map(|criterion| Criterion::new(*criterion, 20.0, 4))
            .collect(),
        performance_levels: default_performance_levels(),
    }
}

pub fn builtin() -> Vec<Rubric> {
    vec![
        internal_assessment(INTERNAL_ASSESSMENT_1),
        internal_assessment(INTERNAL_ASSESSMENT_2),
    ]
}

/// Case-insensitive lookup among the built-in templates.
pub fn find(name: &str) -> Option<Rubric> {
    builtin()
        .into_iter()
        .find(|rubric| rubric.name().eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_balanced() {
        for rubric in builtin() {
            assert_eq!(rubric.criteria().len(), 5);
            assert!(rubric.validate().is_empty(), "{} warns", rubric.name());
        }
    }

    #[test]
    fn find_ignores_case() {
        let rubric = find("internal assessment 2").unwrap();
        assert_eq!(rubric.name(), INTERNAL_ASSESSMENT_2);
        assert!(find("Final Exam").is_none());
    }
}
