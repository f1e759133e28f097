use anyhow::{Context, Result};
use tracing::info;

use crate::cli::TocArgs;
use crate::model::{ChapterOutline, TocReport};
use crate::reader::{PageSource, PdfDocument};
use crate::toc::parse_toc;

pub fn run(args: TocArgs) -> Result<()> {
    let document = PdfDocument::open(&args.pdf_path)?;
    let outline = parse_toc(&document)?;

    info!(
        chapters = outline.chapters.len(),
        sections = outline.section_count(),
        body_start_page = outline.body_start_page,
        "parsed table of contents"
    );

    let report = TocReport {
        source_pdf: args.pdf_path.display().to_string(),
        document_title: document.title().to_string(),
        page_count: document.page_count(),
        body_start_page: outline.body_start_page,
        chapters: outline
            .chapters
            .iter()
            .map(|(heading, sections)| ChapterOutline {
                heading: heading.clone(),
                sections: sections.clone(),
            })
            .collect(),
    };

    let rendered =
        serde_json::to_string_pretty(&report).context("failed to serialize toc report")?;
    println!("{rendered}");

    Ok(())
}
