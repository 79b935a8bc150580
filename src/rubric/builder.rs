use super::{Criterion, Rubric, default_performance_levels};
use crate::error::RubricError;

/// Upper bound on criteria an operator may declare for a custom rubric.
pub const MAX_CUSTOM_CRITERIA: usize = 10;

/// Collects operator-declared criteria for a custom rubric.
///
/// Every declared slot counts toward [`MAX_CUSTOM_CRITERIA`]; slots left with
/// an empty name are dropped when the rubric is built.
#[derive(Debug, Clone)]
pub struct RubricBuilder {
    name: String,
    declared: Vec<Criterion>,
}

impl RubricBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared: Vec::new(),
        }
    }

    pub fn add_criterion(
        &mut self,
        name: impl Into<String>,
        weight: f64,
        max_score: u32,
    ) -> Result<&mut Self, RubricError> {
        if self.declared.len() >= MAX_CUSTOM_CRITERIA {
            return Err(RubricError::TooManyCriteria {
                max: MAX_CUSTOM_CRITERIA,
            });
        }
        self.declared.push(Criterion::new(name, weight, max_score));
        Ok(self)
    }

    pub fn build(self) -> Result<Rubric, RubricError> {
        let criteria: Vec<Criterion> = self
            .declared
            .into_iter()
            .filter_map(|mut c| {
                let trimmed = c.name.trim();
                if trimmed.is_empty() {
                    return None;
                }
                if trimmed.len() != c.name.len() {
                    c.name = trimmed.to_string();
                }
                Some(c)
            })
            .collect();

        Rubric::new(self.name, criteria, default_performance_levels())
    }
}
