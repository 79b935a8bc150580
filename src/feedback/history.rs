use super::FeedbackRecord;

/// Feedback produced during this process, oldest first. Nothing is evicted
/// and nothing is persisted.
#[derive(Debug, Default)]
pub struct FeedbackHistory {
    records: Vec<FeedbackRecord>,
}

impl FeedbackHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append and return a reference to the stored record.
    pub fn append(&mut self, record: FeedbackRecord) -> &FeedbackRecord {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Up to `n` most recent records, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &FeedbackRecord> {
        self.records.iter().rev().take(n)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedbackRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::FeedbackStyle;
    use crate::scoring::Aggregate;

    fn record(student: &str) -> FeedbackRecord {
        FeedbackRecord::new(
            student,
            None,
            FeedbackStyle::Brief,
            Aggregate {
                total: 1.0,
                max_possible: 4.0,
            },
            Ok(format!("feedback for {student}")),
        )
    }

    #[test]
    fn recent_is_newest_first_and_bounded() {
        let mut history = FeedbackHistory::new();
        for name in ["a", "b", "c", "d"] {
            history.append(record(name));
        }

        let names: Vec<_> = history.recent(2).map(FeedbackRecord::student).collect();
        assert_eq!(names, ["d", "c"]);

        let all: Vec<_> = history.recent(10).map(FeedbackRecord::student).collect();
        assert_eq!(all, ["d", "c", "b", "a"]);
    }

    #[test]
    fn iter_is_chronological() {
        let mut history = FeedbackHistory::new();
        assert!(history.is_empty());
        history.append(record("first"));
        let stored = history.append(record("second"));
        assert_eq!(stored.student(), "second");

        let names: Vec<_> = history.iter().map(FeedbackRecord::student).collect();
        assert_eq!(names, ["first", "second"]);
        assert_eq!(history.len(), 2);
        assert_eq!(
            history.recent(1).map(FeedbackRecord::student).collect::<Vec<_>>(),
            ["second"]
        );
    }

    #[test]
    fn recent_zero_is_empty() {
        let mut history = FeedbackHistory::new();
        history.append(record("a"));
        assert_eq!(history.recent(0).count(), 0);
    }
}
