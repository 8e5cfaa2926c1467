//! Document Ingestor: turns an uploaded resume (PDF, DOCX or TXT) into plain text.
//!
//! Dispatch is by filename suffix, case-insensitive. The whole file is buffered;
//! nothing streams. Parsing is CPU-bound and runs on the blocking pool.

use std::fmt;

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq)]
pub enum IngestError {
    #[error("Unsupported file type '{0}'. Only PDF, DOCX, and TXT are supported.")]
    UnsupportedMediaType(String),

    #[error("{0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Picks a format from the filename suffix. Anything but `.pdf`, `.docx` or
    /// `.txt` is rejected, whatever the bytes look like.
    pub fn from_filename(filename: &str) -> Result<Self, IngestError> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Ok(DocumentFormat::Pdf)
        } else if lower.ends_with(".docx") {
            Ok(DocumentFormat::Docx)
        } else if lower.ends_with(".txt") {
            Ok(DocumentFormat::Txt)
        } else {
            Err(IngestError::UnsupportedMediaType(filename.to_string()))
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Docx => "DOCX",
            DocumentFormat::Txt => "TXT",
        };
        f.write_str(label)
    }
}

/// Extracts text from an in-memory document. Blocks the calling thread.
///
/// Fails with `UnsupportedMediaType` for unknown suffixes and with `Malformed` for
/// empty content, undecodable content, or a document that yields no text.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, IngestError> {
    let format = DocumentFormat::from_filename(filename)?;

    if bytes.is_empty() {
        return Err(IngestError::Malformed(format!("Empty {format} file")));
    }

    let text = match format {
        DocumentFormat::Pdf => extract_pdf(bytes)?,
        DocumentFormat::Docx => extract_docx(bytes)?,
        DocumentFormat::Txt => extract_txt(bytes)?,
    };

    if text.trim().is_empty() {
        return Err(IngestError::Malformed(
            "No text extracted from resume".to_string(),
        ));
    }

    info!(
        "Extracted {} chars from {format} '{filename}'",
        text.chars().count()
    );
    Ok(text)
}

/// Runs `extract_text` on the blocking pool. A parser panic is reported as
/// malformed input rather than tearing down the request task.
pub async fn extract_text_blocking(bytes: bytes::Bytes, filename: String) -> Result<String, IngestError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes, &filename))
        .await
        .unwrap_or_else(|e| {
            warn!("Document parser aborted: {e}");
            Err(IngestError::Malformed(
                "Error extracting text: parser aborted".to_string(),
            ))
        })
}

/// Page-by-page extraction, concatenated in page order. Pages that yield no
/// text are skipped.
fn extract_pdf(bytes: &[u8]) -> Result<String, IngestError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| {
        IngestError::Malformed(format!("Error extracting text from PDF: {e}"))
    })?;

    Ok(pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect::<String>())
}

/// Paragraph-by-paragraph extraction with a newline after each paragraph.
/// Hyperlinked and tracked-insert runs count as paragraph text; line breaks
/// inside a paragraph become newlines.
fn extract_docx(bytes: &[u8]) -> Result<String, IngestError> {
    use docx_rs::DocumentChild;

    let docx = docx_rs::read_docx(bytes).map_err(|e| {
        IngestError::Malformed(format!("Error extracting text from DOCX: {e}"))
    })?;

    let mut text = String::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            push_paragraph_children(&paragraph.children, &mut text);
            text.push('\n');
        }
    }
    Ok(text)
}

fn push_paragraph_children(children: &[docx_rs::ParagraphChild], out: &mut String) {
    use docx_rs::{InsertChild, ParagraphChild};

    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            ParagraphChild::Insert(insert) => {
                for inserted in &insert.children {
                    if let InsertChild::Run(run) = inserted {
                        push_run(run, out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run(run: &docx_rs::Run, out: &mut String) {
    use docx_rs::RunChild;

    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) | RunChild::CarriageReturn(_) => out.push('\n'),
            _ => {}
        }
    }
}

fn extract_txt(bytes: &[u8]) -> Result<String, IngestError> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| IngestError::Malformed(format!("Error extracting text from TXT: {e}")))
}
