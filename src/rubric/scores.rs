use super::Rubric;
use crate::error::RubricError;
use std::collections::BTreeMap;

/// Scores assigned to one student, keyed by criterion name.
///
/// Upper bounds are enforced by the input surface, not here. Criteria that are
/// absent count as 0 when aggregated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreSet {
    scores: BTreeMap<String, u32>,
}

impl ScoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert without checking the name against any rubric.
    pub fn insert(&mut self, criterion: impl Into<String>, score: u32) -> Option<u32> {
        self.scores.insert(criterion.into(), score)
    }

    /// Insert a score for a criterion that must exist in `rubric`.
    pub fn insert_for(
        &mut self,
        rubric: &Rubric,
        criterion: &str,
        score: u32,
    ) -> Result<(), RubricError> {
        let resolved = rubric
            .resolve_criterion(criterion)
            .ok_or_else(|| RubricError::UnknownCriterion(criterion.to_string()))?;
        self.scores.insert(resolved.name.clone(), score);
        Ok(())
    }

    /// Parse and insert a `<criterion>=<score>` assignment typed by the
    /// operator. The score must lie within `0..=max_score`.
    pub fn assign(&mut self, rubric: &Rubric, raw: &str) -> Result<(), RubricError> {
        let (reference, value) = raw
            .rsplit_once('=')
            .ok_or_else(|| RubricError::InvalidAssignment(raw.to_string()))?;
        let score: u32 = value
            .trim()
            .parse()
            .map_err(|_| RubricError::InvalidAssignment(raw.to_string()))?;

        let criterion = rubric
            .resolve_criterion(reference)
            .ok_or_else(|| RubricError::UnknownCriterion(reference.trim().to_string()))?;
        if score > criterion.max_score {
            return Err(RubricError::ScoreOutOfRange {
                criterion: criterion.name.clone(),
                score,
                max_score: criterion.max_score,
            });
        }

        self.scores.insert(criterion.name.clone(), score);
        Ok(())
    }

    pub fn get(&self, criterion: &str) -> Option<u32> {
        self.scores.get(criterion).copied()
    }

    pub fn score_or_zero(&self, criterion: &str) -> u32 {
        self.get(criterion).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.scores.iter().map(|(name, score)| (name.as_str(), *score))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for ScoreSet {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self {
            scores: iter
                .into_iter()
                .map(|(name, score)| (name.into(), score))
                .collect(),
        }
    }
}
