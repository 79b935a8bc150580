//! Weighted score aggregation.

use crate::rubric::{Rubric, ScoreSet};

/// Raw weighted accumulators for one student against one rubric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub total: f64,
    pub max_possible: f64,
}

impl Aggregate {
    pub fn percentage(&self) -> f64 {
        percentage(self.total, self.max_possible)
    }
}

/// Sum `score * weight / 100` and `max_score * weight / 100` over the
/// rubric's criteria. Absent criteria score 0; score keys that are not
/// criteria of `rubric` are ignored.
pub fn aggregate(rubric: &Rubric, scores: &ScoreSet) -> Aggregate {
    rubric.criteria().iter().fold(
        Aggregate {
            total: 0.0,
            max_possible: 0.0,
        },
        |acc, criterion| {
            let share = criterion.weight / 100.0;
            let score = scores.score_or_zero(&criterion.name);
            Aggregate {
                total: acc.total + f64::from(score) * share,
                max_possible: acc.max_possible + f64::from(criterion.max_score) * share,
            }
        },
    )
}

/// `100 * total / max_possible`, or 0 when nothing is attainable.
pub fn percentage(total: f64, max_possible: f64) -> f64 {
    if max_possible > 0.0 {
        total / max_possible * 100.0
    } else {
        0.0
    }
}
