use super::BatchResult;
use crate::error::BatchError;
use std::io::Write;
use std::path::Path;

pub const DEFAULT_RESULTS_FILE: &str = "batch_feedback_results.csv";

const HEADER: [&str; 3] = ["Student", "Assignment", "Feedback"];

/// Write `Student,Assignment,Feedback` rows; fields are quoted as needed.
pub fn write_results<W: Write>(results: &[BatchResult], writer: W) -> Result<(), BatchError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for result in results {
        csv_writer.write_record([
            result.student.as_str(),
            result.assignment.as_str(),
            result.feedback.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_results_to_path(results: &[BatchResult], path: &Path) -> Result<(), BatchError> {
    let file = std::fs::File::create(path)?;
    write_results(results, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FeedbackStatus;
    use crate::scoring::Aggregate;

    fn result(student: &str, feedback: &str) -> BatchResult {
        BatchResult {
            student: student.into(),
            assignment: "Lab 1".into(),
            totals: Aggregate {
                total: 3.0,
                max_possible: 4.0,
            },
            feedback: feedback.into(),
            status: FeedbackStatus::Generated,
        }
    }

    #[test]
    fn writes_header_and_quotes_embedded_commas_and_newlines() {
        let mut out = Vec::new();
        write_results(
            &[
                result("Ada", "Clear, careful work."),
                result("Grace", "Line one.\nSaid \"great\"."),
            ],
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Student,Assignment,Feedback\n\
             Ada,Lab 1,\"Clear, careful work.\"\n\
             Grace,Lab 1,\"Line one.\nSaid \"\"great\"\".\"\n"
        );
    }

    #[test]
    fn empty_results_still_write_header() {
        let mut out = Vec::new();
        write_results(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Student,Assignment,Feedback\n");
    }

    #[test]
    fn export_reads_back_through_csv() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_RESULTS_FILE);
        write_results_to_path(&[result("Ada", "Fine, thanks")], &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(&rows[0][2], "Fine, thanks");
    }
}
