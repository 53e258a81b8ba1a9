//! Document text extraction. Converts an uploaded document into plain
//! text. PDF goes through `pdf-extract`, DOCX is unzipped and the
//! `word/document.xml` text runs are collected, plain text is read as-is.
//!
//! Callers treat extraction failure as empty text: a document that cannot
//! be parsed degrades the analysis, it never fails the request.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use quick_xml::events::Event;

/// Returns the lowercase extension of `filename`, if any.
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validates `filename` against the configured allow-list and returns its
/// normalized extension.
pub fn validate_extension(filename: &str, allowed: &[String]) -> Result<String> {
    let ext = file_extension(filename)
        .with_context(|| format!("File has no extension: {filename}"))?;
    if !allowed.iter().any(|a| a == &ext) {
        bail!("Unsupported file extension '{ext}'. Allowed: {}", allowed.join(", "));
    }
    Ok(ext)
}

/// Writes `data` to a scoped temporary file and extracts its text.
///
/// The temporary file is removed when this function returns, success or
/// failure. Uploads never accumulate on disk.
pub fn extract_from_bytes(data: &[u8], ext: &str) -> Result<String> {
    let mut tmp = tempfile::NamedTempFile::new().context("Failed to create temporary file")?;
    tmp.write_all(data).context("Failed to write temporary file")?;
    extract_text(tmp.path(), ext)
    // tmp dropped here; the file is deleted regardless of outcome
}

/// Extracts plain text from the document at `path` according to `ext`.
pub fn extract_text(path: &Path, ext: &str) -> Result<String> {
    match ext {
        "pdf" => pdf_extract::extract_text(path)
            .map_err(|e| anyhow::anyhow!("PDF extraction failed: {e}")),
        "docx" => extract_docx(path),
        "txt" => std::fs::read_to_string(path).context("Failed to read text file"),
        "doc" => bail!("Legacy .doc extraction is not supported"),
        other => bail!("No extractor for extension '{other}'"),
    }
}

/// Extracts paragraph text from a DOCX file: the ZIP archive's
/// `word/document.xml` is walked and `<w:t>` runs are concatenated,
/// one line per `<w:p>` paragraph.
fn extract_docx(path: &Path) -> Result<String> {
    let file = std::fs::File::open(path).context("Failed to open DOCX")?;
    let mut archive = zip::ZipArchive::new(file).context("Failed to read DOCX as ZIP")?;

    let mut document_xml = String::new();
    {
        let mut entry = archive
            .by_name("word/document.xml")
            .context("Invalid DOCX: missing word/document.xml")?;
        std::io::Read::read_to_string(&mut entry, &mut document_xml)
            .context("Failed to read word/document.xml")?;
    }

    let mut reader = quick_xml::Reader::from_str(&document_xml);
    let mut text = String::new();
    let mut in_text_run = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"t" => in_text_run = true,
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref t)) if in_text_run => {
                text.push_str(&t.unescape().unwrap_or_default());
            }
            Ok(Event::Eof) => break,
            Err(e) => bail!("Failed to parse word/document.xml: {e}"),
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}
