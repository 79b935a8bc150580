//! Rubric data model: weighted criteria, performance-level labels and the
//! non-fatal validation that runs before scores are collected.

mod builder;
mod catalog;
mod definition;
mod scores;
pub mod templates;

pub use builder::{MAX_CUSTOM_CRITERIA, RubricBuilder};
pub use catalog::RubricCatalog;
pub use definition::{PerformanceLevel, RubricDefinition};
pub use scores::ScoreSet;

use crate::error::RubricError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Label rendered for a score that has no performance level.
pub const NOT_ASSESSED: &str = "Not Assessed";

const WEIGHT_SUM_TARGET: f64 = 100.0;
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// One gradeable dimension of a rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    /// Share of the overall grade, in percentage points.
    pub weight: f64,
    pub max_score: u32,
}

impl Criterion {
    pub fn new(name: impl Into<String>, weight: f64, max_score: u32) -> Self {
        Self {
            name: name.into(),
            weight,
            max_score,
        }
    }

    /// Column key used for this criterion in batch uploads.
    pub fn score_column(&self) -> String {
        score_column(&self.name)
    }
}

/// Lower-cased criterion name with spaces replaced by underscores.
pub fn score_column(criterion: &str) -> String {
    criterion.to_lowercase().replace(' ', "_")
}

/// The four-level scale shared by the built-in templates and custom rubrics.
pub fn default_performance_levels() -> BTreeMap<u32, String> {
    BTreeMap::from([
        (4, "Excellent".to_string()),
        (3, "Good".to_string()),
        (2, "Satisfactory".to_string()),
        (1, "Needs Improvement".to_string()),
    ])
}

/// A named, ordered set of weighted criteria. Read-only once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Rubric {
    name: String,
    criteria: Vec<Criterion>,
    performance_levels: BTreeMap<u32, String>,
}

impl Rubric {
    /// Build a rubric. Names must be non-empty and unique and weights finite;
    /// weight signs and max scores are only checked by [`Rubric::validate`].
    pub fn new(
        name: impl Into<String>,
        criteria: Vec<Criterion>,
        performance_levels: BTreeMap<u32, String>,
    ) -> Result<Self, RubricError> {
        let name = name.into();
        if criteria.is_empty() {
            return Err(RubricError::NoCriteria { rubric: name });
        }

        let mut seen = HashSet::with_capacity(criteria.len());
        for criterion in &criteria {
            if criterion.name.trim().is_empty() {
                return Err(RubricError::EmptyCriterionName);
            }
            if !seen.insert(criterion.name.as_str()) {
                return Err(RubricError::DuplicateCriterion(criterion.name.clone()));
            }
            if !criterion.weight.is_finite() {
                return Err(RubricError::NonFiniteWeight {
                    criterion: criterion.name.clone(),
                    weight: criterion.weight,
                });
            }
        }

        Ok(Self {
            name,
            criteria,
            performance_levels,
        })
    }

    pub fn with_default_levels(
        name: impl Into<String>,
        criteria: Vec<Criterion>,
    ) -> Result<Self, RubricError> {
        Self::new(name, criteria, default_performance_levels())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn criterion(&self, name: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.name == name)
    }

    /// Resolve an operator-typed criterion reference: exact name first, then
    /// case-insensitive name, then the batch column key.
    pub fn resolve_criterion(&self, reference: &str) -> Option<&Criterion> {
        let reference = reference.trim();
        self.criterion(reference)
            .or_else(|| {
                self.criteria
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(reference))
            })
            .or_else(|| {
                let column = score_column(reference);
                self.criteria.iter().find(|c| c.score_column() == column)
            })
    }

    pub fn performance_levels(&self) -> &BTreeMap<u32, String> {
        &self.performance_levels
    }

    pub fn performance_level(&self, score: u32) -> &str {
        self.performance_levels
            .get(&score)
            .map_or(NOT_ASSESSED, String::as_str)
    }

    pub fn total_weight(&self) -> f64 {
        self.criteria.iter().map(|c| c.weight).sum()
    }

    /// Informational checks. Never blocks scoring or generation.
    pub fn validate(&self) -> Vec<RubricWarning> {
        let mut warnings = Vec::new();

        for criterion in &self.criteria {
            if criterion.weight.is_nan() || criterion.weight <= 0.0 {
                warnings.push(RubricWarning::NonPositiveWeight {
                    criterion: criterion.name.clone(),
                    weight: criterion.weight,
                });
            }
            if criterion.max_score < 1 {
                warnings.push(RubricWarning::ZeroMaxScore {
                    criterion: criterion.name.clone(),
                });
            }
        }

        let total = self.total_weight();
        if !total.is_finite() || (total - WEIGHT_SUM_TARGET).abs() > WEIGHT_SUM_TOLERANCE {
            warnings.push(RubricWarning::WeightSum { total });
        }

        warnings
    }
}

/// Non-fatal rubric validation findings.
#[derive(Debug, Clone, PartialEq)]
pub enum RubricWarning {
    WeightSum { total: f64 },
    NonPositiveWeight { criterion: String, weight: f64 },
    ZeroMaxScore { criterion: String },
}

impl fmt::Display for RubricWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeightSum { total } => {
                write!(f, "Total weight is {total}%. Should equal 100%.")
            }
            Self::NonPositiveWeight { criterion, weight } => {
                write!(f, "Criterion {criterion:?} has weight {weight}; weights should be positive.")
            }
            Self::ZeroMaxScore { criterion } => {
                write!(f, "Criterion {criterion:?} has a max score of 0; it should be at least 1.")
            }
        }
    }
}
