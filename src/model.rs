use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_pdf: String,
    pub source_sha256: String,
    pub document_title: String,
    pub page_count: usize,
    pub body_start_page: usize,
    pub chapter_count: usize,
    pub section_count: usize,
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TocReport {
    pub source_pdf: String,
    pub document_title: String,
    pub page_count: usize,
    pub body_start_page: usize,
    pub chapters: Vec<ChapterOutline>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChapterOutline {
    pub heading: String,
    pub sections: Vec<String>,
}
