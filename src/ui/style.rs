use console::style;
use std::fmt::Display;

/// Green bold: success checkmarks, confirmations
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// White bold: section headers, titles
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim: secondary text, decorative lines
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Yellow: rubric warnings
pub fn warning<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Red bold: failed generations, command errors
pub fn error<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}

/// Green: scores, paths, names
pub fn value<D: Display>(text: D) -> String {
    style(text).green().to_string()
}

/// Cyan bold: bullets, menu markers
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Cyan: field labels
pub fn cyan<D: Display>(text: D) -> String {
    style(text).cyan().to_string()
}
