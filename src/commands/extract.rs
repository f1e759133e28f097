use std::path::{Path, PathBuf};

use anyhow::Result;
use indexmap::IndexMap;
use tracing::info;

use crate::cli::ExtractArgs;
use crate::model::ExtractionManifest;
use crate::reader::{PageSource, PdfDocument};
use crate::scanner::extract_section_content;
use crate::toc::{TocOutline, parse_toc};
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

pub fn run(args: ExtractArgs) -> Result<()> {
    let document = PdfDocument::open(&args.pdf_path)?;
    info!(
        path = %document.path().display(),
        pages = document.page_count(),
        title = document.title(),
        "opened document"
    );

    let (outline, bodies) = extract_sections(&document)?;

    write_json_pretty(&args.output_path, &bodies)?;
    info!(
        path = %args.output_path.display(),
        sections = bodies.len(),
        "wrote section bodies"
    );

    let manifest_path = args
        .manifest_path
        .unwrap_or_else(|| default_manifest_path(&args.output_path));
    let manifest = ExtractionManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_pdf: args.pdf_path.display().to_string(),
        source_sha256: sha256_file(&args.pdf_path)?,
        document_title: document.title().to_string(),
        page_count: document.page_count(),
        body_start_page: outline.body_start_page,
        chapter_count: outline.chapters.len(),
        section_count: outline.section_count(),
        output_path: args.output_path.display().to_string(),
    };
    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote extraction manifest");

    Ok(())
}

/// Full pipeline over any page source: toc pass, flatten, body pass.
pub(crate) fn extract_sections(
    source: &dyn PageSource,
) -> Result<(TocOutline, IndexMap<String, String>)> {
    let outline = parse_toc(source)?;
    let sections = outline.section_titles();
    info!(
        chapters = outline.chapters.len(),
        sections = sections.len(),
        body_start_page = outline.body_start_page,
        "parsed table of contents"
    );

    let bodies = extract_section_content(source, outline.body_start_page, &sections)?;

    Ok((outline, bodies))
}

fn default_manifest_path(output_path: &Path) -> PathBuf {
    output_path.with_extension("manifest.json")
}
