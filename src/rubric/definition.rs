use super::{Criterion, Rubric, default_performance_levels};
use crate::error::RubricError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A score→label pair as written in TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceLevel {
    pub score: u32,
    pub label: String,
}

/// Serializable rubric, used for `[[rubrics]]` in the config file and for
/// standalone rubric files.
///
/// ```toml
/// name = "Lab Report"
///
/// [[criteria]]
/// name = "Method"
/// weight = 60
/// max_score = 4
///
/// [[levels]]
/// score = 4
/// label = "Excellent"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricDefinition {
    pub name: String,
    pub criteria: Vec<Criterion>,
    /// Falls back to the default four-level scale when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub levels: Vec<PerformanceLevel>,
}

impl RubricDefinition {
    pub fn from_toml_str(source: &str) -> Result<Self, RubricError> {
        toml::from_str(source).map_err(|e| RubricError::Definition(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, RubricError> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| RubricError::Definition(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    pub fn to_rubric(&self) -> Result<Rubric, RubricError> {
        let levels = if self.levels.is_empty() {
            default_performance_levels()
        } else {
            self.levels
                .iter()
                .map(|level| (level.score, level.label.clone()))
                .collect()
        };
        Rubric::new(self.name.clone(), self.criteria.clone(), levels)
    }
}

impl From<&Rubric> for RubricDefinition {
    fn from(rubric: &Rubric) -> Self {
        Self {
            name: rubric.name().to_string(),
            criteria: rubric.criteria().to_vec(),
            levels: rubric
                .performance_levels()
                .iter()
                .map(|(score, label)| PerformanceLevel {
                    score: *score,
                    label: label.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAB_REPORT: &str = r#"
name = "Lab Report"

[[criteria]]
name = "Method"
weight = 60
max_score = 4

[[criteria]]
name = "Discussion"
weight = 40.0
max_score = 5

[[levels]]
score = 5
label = "Outstanding"
"#;

    #[test]
    fn parses_integer_and_float_weights() {
        let def = RubricDefinition::from_toml_str(LAB_REPORT).unwrap();
        assert_eq!(def.criteria.len(), 2);
        assert!((def.criteria[0].weight - 60.0).abs() < f64::EPSILON);
        assert_eq!(def.criteria[1].max_score, 5);
    }

    #[test]
    fn explicit_levels_replace_defaults() {
        let rubric = RubricDefinition::from_toml_str(LAB_REPORT)
            .unwrap()
            .to_rubric()
            .unwrap();
        assert_eq!(rubric.performance_level(5), "Outstanding");
        assert_eq!(rubric.performance_level(4), "Not Assessed");
    }

    #[test]
    fn missing_levels_use_default_scale() {
        let def = RubricDefinition::from_toml_str(
            "name = \"Quiz\"\n[[criteria]]\nname = \"Recall\"\nweight = 100\nmax_score = 4\n",
        )
        .unwrap();
        let rubric = def.to_rubric().unwrap();
        assert_eq!(rubric.performance_level(4), "Excellent");
    }

    #[test]
    fn malformed_toml_is_a_definition_error() {
        let err = RubricDefinition::from_toml_str("name = ").unwrap_err();
        assert!(matches!(err, RubricError::Definition(_)));
    }

    fn single_criterion(weight: &str) -> RubricDefinition {
        RubricDefinition::from_toml_str(&format!(
            "name = \"Quiz\"\n[[criteria]]\nname = \"Recall\"\nweight = {weight}\nmax_score = 4\n"
        ))
        .unwrap()
    }

    #[test]
    fn nan_weight_is_rejected() {
        let def = single_criterion("nan");
        assert!(def.criteria[0].weight.is_nan());
        let err = def.to_rubric().unwrap_err();
        assert!(matches!(
            err,
            RubricError::NonFiniteWeight { ref criterion, .. } if criterion == "Recall"
        ));
    }

    #[test]
    fn infinite_weights_are_rejected() {
        for weight in ["inf", "-inf"] {
            let err = single_criterion(weight).to_rubric().unwrap_err();
            assert!(matches!(err, RubricError::NonFiniteWeight { .. }), "{weight}");
        }
    }

    #[test]
    fn rubric_round_trips_through_definition() {
        let rubric = crate::rubric::templates::builtin().remove(0);
        let def = RubricDefinition::from(&rubric);
        assert_eq!(def.to_rubric().unwrap(), rubric);
    }
}
