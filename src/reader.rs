use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};

use crate::error::ExtractError;

/// Page-oriented view of a document: ordered raw page text plus the metadata
/// title. The extraction pipeline only ever reads through this trait.
pub trait PageSource {
    fn page_count(&self) -> usize;

    fn page_text(&self, index: usize) -> Result<String>;

    fn title(&self) -> &str;
}

/// A PDF opened through the poppler command-line tools. All pages are pulled
/// up front with `pdftotext`; the metadata title comes from `pdfinfo`.
#[derive(Debug)]
pub struct PdfDocument {
    path: PathBuf,
    pages: Vec<String>,
    title: String,
}

impl PdfDocument {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ExtractError::NotFound(path.to_path_buf()).into());
        }

        let pages = extract_pages_with_pdftotext(path)?;
        let title = read_document_title(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            pages,
            title,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        match self.pages.get(index) {
            Some(page) => Ok(page.clone()),
            None => Err(ExtractError::Data(format!(
                "page index {index} out of range for {} ({} pages)",
                self.path.display(),
                self.pages.len()
            ))
            .into()),
        }
    }

    fn title(&self) -> &str {
        &self.title
    }
}

fn extract_pages_with_pdftotext(pdf_path: &Path) -> Result<Vec<String>> {
    let output = Command::new("pdftotext")
        .arg("-enc")
        .arg("UTF-8")
        .arg(pdf_path)
        .arg("-")
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status for {}: {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    let mut pages: Vec<String> = raw
        .split('\u{000C}')
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();

    // pdftotext terminates every page with a form feed, leaving an empty
    // trailing chunk.
    while let Some(last_page) = pages.last() {
        if last_page.trim().is_empty() {
            pages.pop();
            continue;
        }
        break;
    }

    Ok(pages)
}

fn read_document_title(pdf_path: &Path) -> Result<String> {
    let output = Command::new("pdfinfo")
        .arg(pdf_path)
        .output()
        .with_context(|| format!("failed to execute pdfinfo for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdfinfo returned non-zero exit status for {}: {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    Ok(parse_info_title(&String::from_utf8_lossy(&output.stdout)))
}

fn parse_info_title(stdout: &str) -> String {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Title:"))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}
