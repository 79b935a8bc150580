use crate::error::PromptError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Tone/length preset that governs the feedback instructions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FeedbackStyle {
    #[default]
    Constructive,
    Detailed,
    Brief,
}

impl FeedbackStyle {
    /// Parse a style name; anything outside the fixed set is a caller error.
    pub fn parse(name: &str) -> Result<Self, PromptError> {
        Self::from_str(name.trim()).map_err(|_| PromptError::UnknownStyle(name.to_string()))
    }

    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    pub fn template(self) -> &'static StyleTemplate {
        match self {
            Self::Constructive => &CONSTRUCTIVE,
            Self::Detailed => &DETAILED,
            Self::Brief => &BRIEF,
        }
    }

    /// Title-cased name for menus.
    pub fn title(self) -> &'static str {
        match self {
            Self::Constructive => "Constructive",
            Self::Detailed => "Detailed",
            Self::Brief => "Brief",
        }
    }
}

/// Versioned instruction block for one style.
#[derive(Debug)]
pub struct StyleTemplate {
    pub version: u32,
    pub min_words: u32,
    pub max_words: u32,
    pub instructions: &'static str,
}

static CONSTRUCTIVE: StyleTemplate = StyleTemplate {
    version: 1,
    min_words: 150,
    max_words: 250,
    instructions: "\
You are an encouraging and constructive educator providing personalized feedback to a student.

Based on the rubric performance data, generate feedback that:
- Acknowledges specific strengths
- Provides actionable suggestions for improvement
- Maintains an encouraging and supportive tone
- Includes specific examples when possible
- Offers concrete next steps

Keep the feedback between 150-250 words and make it personal and motivating.",
};

static DETAILED: StyleTemplate = StyleTemplate {
    version: 1,
    min_words: 250,
    max_words: 400,
    instructions: "\
You are a thorough educator providing comprehensive feedback to a student.

Based on the rubric performance data, generate detailed feedback that:
- Analyzes each criterion thoroughly
- Provides specific examples of what was done well
- Offers detailed suggestions for improvement
- Connects performance to learning objectives
- Includes resources or strategies for growth

Keep the feedback between 250-400 words and make it thorough yet accessible.",
};

static BRIEF: StyleTemplate = StyleTemplate {
    version: 1,
    min_words: 75,
    max_words: 150,
    instructions: "\
You are an efficient educator providing concise feedback to a student.

Based on the rubric performance data, generate brief feedback that:
- Highlights key strengths and areas for improvement
- Provides 2-3 specific actionable suggestions
- Maintains a positive and encouraging tone
- Is clear and easy to understand

Keep the feedback between 75-150 words and make it punchy and memorable.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_styles() {
        assert_eq!(FeedbackStyle::parse("brief").unwrap(), FeedbackStyle::Brief);
        assert_eq!(
            FeedbackStyle::parse(" detailed ").unwrap(),
            FeedbackStyle::Detailed
        );
        assert_eq!(FeedbackStyle::Constructive.to_string(), "constructive");
    }

    #[test]
    fn unknown_style_fails_loudly() {
        let err = FeedbackStyle::parse("sarcastic").unwrap_err();
        assert!(matches!(err, PromptError::UnknownStyle(ref s) if s == "sarcastic"));
    }

    #[test]
    fn each_style_states_its_word_range() {
        for style in FeedbackStyle::all() {
            let template = style.template();
            let range = format!("{}-{} words", template.min_words, template.max_words);
            assert!(
                template.instructions.contains(&range),
                "{style} instructions missing {range}"
            );
        }
    }

    #[test]
    fn word_ranges_are_distinct() {
        let ranges: Vec<(u32, u32)> = FeedbackStyle::all()
            .into_iter()
            .map(|s| (s.template().min_words, s.template().max_words))
            .collect();
        assert_eq!(ranges, [(150, 250), (250, 400), (75, 150)]);
    }

    #[test]
    fn every_template_is_versioned() {
        for style in FeedbackStyle::all() {
            assert!(style.template().version >= 1, "{style}");
        }
    }
}
