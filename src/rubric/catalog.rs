use super::{Rubric, RubricDefinition, templates};
use crate::error::RubricError;

/// Rubrics available to the operator: the built-in templates plus any defined
/// in configuration. A configured rubric replaces a built-in of the same name.
#[derive(Debug, Clone)]
pub struct RubricCatalog {
    rubrics: Vec<Rubric>,
}

impl Default for RubricCatalog {
    fn default() -> Self {
        Self {
            rubrics: templates::builtin(),
        }
    }
}

impl RubricCatalog {
    pub fn from_definitions(definitions: &[RubricDefinition]) -> Result<Self, RubricError> {
        let mut catalog = Self::default();
        for definition in definitions {
            catalog.insert(definition.to_rubric()?);
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, rubric: Rubric) {
        if let Some(existing) = self
            .rubrics
            .iter_mut()
            .find(|r| r.name().eq_ignore_ascii_case(rubric.name()))
        {
            *existing = rubric;
        } else {
            self.rubrics.push(rubric);
        }
    }

    pub fn find(&self, name: &str) -> Result<&Rubric, RubricError> {
        self.rubrics
            .iter()
            .find(|r| r.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| RubricError::UnknownTemplate(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.rubrics.iter().map(Rubric::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rubric> {
        self.rubrics.iter()
    }

    pub fn len(&self) -> usize {
        self.rubrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rubrics.is_empty()
    }
}
