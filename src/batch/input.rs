use crate::error::BatchError;
use crate::rubric::{Rubric, ScoreSet};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

pub const STUDENT_COLUMN: &str = "student_name";
pub const ASSIGNMENT_COLUMN: &str = "assignment_name";

/// One CSV data row keyed by normalized header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchRow {
    cells: HashMap<String, String>,
}

impl BatchRow {
    pub fn from_cells<K, V>(cells: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            cells: cells
                .into_iter()
                .map(|(k, v)| (normalize_header(k.as_ref()), v.into()))
                .collect(),
        }
    }

    /// Trimmed cell value; blank cells read as absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// `(student, assignment)` when both are present; rows without either
    /// are skipped by the batch runner.
    pub fn identity(&self) -> Option<(&str, &str)> {
        Some((self.get(STUDENT_COLUMN)?, self.get(ASSIGNMENT_COLUMN)?))
    }

    /// Scores read from each criterion's column. Missing or unparseable cells
    /// leave the criterion absent.
    pub fn scores_for(&self, rubric: &Rubric) -> ScoreSet {
        let mut scores = ScoreSet::new();
        for criterion in rubric.criteria() {
            let column = criterion.score_column();
            let Some(raw) = self.get(&column) else {
                continue;
            };
            match parse_score(raw) {
                Some(score) => {
                    if score > criterion.max_score {
                        tracing::warn!(
                            column = %column,
                            score,
                            max_score = criterion.max_score,
                            "batch score above criterion maximum"
                        );
                    }
                    scores.insert(criterion.name.clone(), score);
                }
                None => tracing::debug!(column = %column, value = raw, "ignoring unparseable score"),
            }
        }
        scores
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Accepts `3` and integral floats such as `3.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_score(raw: &str) -> Option<u32> {
    if let Ok(score) = raw.parse::<u32>() {
        return Some(score);
    }
    let value = raw.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX))
        .then_some(value as u32)
}

/// Parse a whole CSV document. Any malformed record fails the whole read.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<BatchRow>, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();

    csv_reader
        .records()
        .map(|record| {
            let record = record?;
            Ok::<_, BatchError>(BatchRow {
                cells: headers
                    .iter()
                    .cloned()
                    .zip(record.iter().map(String::from))
                    .collect(),
            })
        })
        .collect()
}

pub fn read_rows_from_path(path: &Path) -> Result<Vec<BatchRow>, BatchError> {
    let file = std::fs::File::open(path)?;
    read_rows(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rubric::templates;

    fn ia1() -> Rubric {
        templates::find(templates::INTERNAL_ASSESSMENT_1).unwrap()
    }

    #[test]
    fn headers_are_trimmed_and_lowercased() {
        let rows = read_rows(" Student_Name ,ASSIGNMENT_NAME\nAda,Lab 1\n".as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].identity(), Some(("Ada", "Lab 1")));
    }

    #[test]
    fn identity_requires_both_names() {
        let csv = "student_name,assignment_name\nAda,\n,Lab 1\n  ,  \nGrace,Lab 2\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        let accepted: Vec<_> = rows.iter().filter_map(BatchRow::identity).collect();
        assert_eq!(accepted, [("Grace", "Lab 2")]);
    }

    #[test]
    fn scores_follow_column_keys() {
        let csv = "student_name,assignment_name,ai_(artificial_intelligence),python_programming,stats_(statistics),notes\n\
                   Ada,Lab 1,4,3.0,x,unrelated\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        let scores = rows[0].scores_for(&ia1());

        assert_eq!(scores.get("AI (Artificial Intelligence)"), Some(4));
        assert_eq!(scores.get("Python Programming"), Some(3));
        assert_eq!(scores.get("Stats (Statistics)"), None);
        assert_eq!(scores.get("ML (Machine Learning)"), None);
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn parse_score_rejects_fractions_and_negatives() {
        assert_eq!(parse_score("2"), Some(2));
        assert_eq!(parse_score("2.0"), Some(2));
        assert_eq!(parse_score("2.5"), None);
        assert_eq!(parse_score("-1"), None);
        assert_eq!(parse_score("NaN"), None);
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let err = read_rows("student_name,assignment_name\nAda,Lab 1,extra\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, BatchError::Malformed(_)));
        assert!(err.to_string().starts_with("error processing file"));
    }

    #[test]
    fn header_only_file_has_no_rows() {
        assert!(read_rows("student_name,assignment_name\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn from_cells_normalizes_keys() {
        let row = BatchRow::from_cells([("Student_Name", "Ada"), ("assignment_name", "Lab")]);
        assert_eq!(row.identity(), Some(("Ada", "Lab")));
    }
}
