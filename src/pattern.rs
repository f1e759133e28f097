use regex::Regex;

use crate::error::ExtractError;

/// Tolerant matcher for a normalized section title. Body text does not always
/// agree with the table of contents on singular versus plural forms, so every
/// word matches with or without a trailing "s".
#[derive(Debug)]
pub struct SectionPattern {
    regex: Regex,
}

/// Byte offsets of a located title within a normalized text window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleHit {
    /// Where the title words begin.
    pub title_start: usize,
    /// Where the text after the title words begins.
    pub body_start: usize,
}

impl SectionPattern {
    pub fn build(normalized_title: &str) -> Result<Self, ExtractError> {
        let alternatives: Vec<String> = normalized_title
            .split_whitespace()
            .map(|word| {
                let stem = word.strip_suffix('s').unwrap_or(word);
                format!("{}s?", regex::escape(stem))
            })
            .collect();

        // The capture runs to the next page break or end of input so the
        // title's tail position is known even when the body spans newlines.
        let pattern = format!(r"(?s){}(.*?)(?:\f|\z)", alternatives.join(r"\s"));
        let regex = Regex::new(&pattern)?;

        Ok(Self { regex })
    }

    pub fn locate(&self, text: &str) -> Option<TitleHit> {
        let captures = self.regex.captures(text)?;
        let whole = captures.get(0)?;
        let tail = captures.get(1)?;

        Some(TitleHit {
            title_start: whole.start(),
            body_start: tail.start(),
        })
    }
}
