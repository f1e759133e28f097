use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use regex::Regex;

use crate::error::ExtractError;
use crate::normalize::normalize_text;
use crate::reader::PageSource;

const TOC_MARKER: &str = "ARRANGEMENT OF SECTIONS";

fn section_line_pattern() -> Result<Regex> {
    Regex::new(r"^\d+\.\s+[A-Za-z].*").context("failed to compile section line pattern")
}

/// Ordered chapter -> section-title hierarchy plus the page index where the
/// body pass starts.
#[derive(Debug, Clone)]
pub struct TocOutline {
    pub chapters: IndexMap<String, Vec<String>>,
    pub body_start_page: usize,
}

impl TocOutline {
    /// Chapters in discovery order, sections in order within each chapter.
    pub fn section_titles(&self) -> Vec<String> {
        self.chapters.values().flatten().cloned().collect()
    }

    pub fn section_count(&self) -> usize {
        self.chapters.values().map(Vec::len).sum()
    }
}

pub fn is_chapter_line(line: &str) -> bool {
    line.contains("CHAPTER")
}

pub fn is_section_line(line: &str) -> bool {
    section_line_pattern()
        .map(|pattern| pattern.is_match(line.trim()))
        .unwrap_or(false)
}

/// Single forward pass over the pages. Pages before the "ARRANGEMENT OF
/// SECTIONS" marker are discarded; classification runs from the marker until a
/// later page repeats the document title, which is where body content starts.
pub fn parse_toc(source: &dyn PageSource) -> Result<TocOutline> {
    let section_line = section_line_pattern()?;
    let mut chapters: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut current_chapter: Option<String> = None;
    let mut toc_found = false;
    let mut last_page = 0_usize;

    for index in 0..source.page_count() {
        let raw = source
            .page_text(index)
            .with_context(|| format!("failed to read page {index} during toc parsing"))?;
        let mut text = raw.as_str();
        let mut first_page = false;
        last_page = index;

        if !toc_found {
            let Some((_, after_marker)) = raw.split_once(TOC_MARKER) else {
                continue;
            };
            toc_found = true;
            first_page = true;
            text = after_marker;
        }

        if !first_page && text.contains(source.title()) {
            break;
        }

        for line in text.split('\n') {
            process_toc_line(line, &section_line, &mut current_chapter, &mut chapters)?;
        }
    }

    Ok(TocOutline {
        chapters,
        body_start_page: last_page,
    })
}

fn process_toc_line(
    line: &str,
    section_line: &Regex,
    current_chapter: &mut Option<String>,
    chapters: &mut IndexMap<String, Vec<String>>,
) -> Result<()> {
    if is_chapter_line(line) {
        let heading = line.trim().to_string();
        // A repeated heading resets its section list but keeps its position.
        chapters.insert(heading.clone(), Vec::new());
        *current_chapter = Some(heading);
        return Ok(());
    }

    let trimmed = line.trim();
    let Some(matched) = section_line.find(trimmed) else {
        return Ok(());
    };

    let title = normalize_text(matched.as_str());
    let Some(chapter) = current_chapter.as_deref() else {
        bail!(ExtractError::Data(format!(
            "section line {trimmed:?} appeared before any chapter heading"
        )));
    };

    match chapters.get_mut(chapter) {
        Some(sections) => sections.push(title),
        None => bail!(ExtractError::Data(format!(
            "current chapter {chapter:?} missing from hierarchy"
        ))),
    }

    Ok(())
}
