//! Text extraction from uploaded resume files.
//!
//! One extractor per supported format behind a shared trait. PDF and DOCX are
//! handled locally; raster images are transcribed through the vision path of
//! the LLM client, which replaces a dedicated OCR engine.

use std::io::Read;
use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;

use crate::llm_client::LlmClient;

/// Prompt used when transcribing an image resume. The reply is the page text,
/// not commentary.
const OCR_SYSTEM: &str = "You are an OCR engine. Transcribe all text visible in the image \
    exactly as written, preserving reading order. Output the raw text only — \
    no commentary, no formatting markers.";

const OCR_PROMPT: &str = "Transcribe the text content of this resume image.";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported media type: {0}")]
    Unsupported(String),

    #[error("failed to read uploaded file: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("image transcription failed: {0}")]
    Ocr(String),

    #[error("extracted text is empty")]
    EmptyDocument,
}

/// Media types accepted by the upload endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    Docx,
    Jpeg,
    Png,
    WebP,
}

impl MediaType {
    pub fn from_mime(mime: &str) -> Result<Self, ExtractError> {
        match mime {
            "application/pdf" => Ok(MediaType::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Ok(MediaType::Docx)
            }
            "image/jpeg" | "image/jpg" => Ok(MediaType::Jpeg),
            "image/png" => Ok(MediaType::Png),
            "image/webp" => Ok(MediaType::WebP),
            other => Err(ExtractError::Unsupported(other.to_string())),
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, MediaType::Jpeg | MediaType::Png | MediaType::WebP)
    }

    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::WebP => "image/webp",
        }
    }
}

#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

pub struct PdfExtractor;

#[async_trait]
impl Extractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = fs::read(path).await?;
        // pdf-extract is CPU-bound and synchronous; keep it off the runtime threads.
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
        })
        .await
        .map_err(|e| ExtractError::Pdf(e.to_string()))??;
        Ok(text)
    }
}

pub struct DocxExtractor;

#[async_trait]
impl Extractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = fs::read(path).await?;
        tokio::task::spawn_blocking(move || docx_text(&bytes))
            .await
            .map_err(|e| ExtractError::Docx(e.to_string()))?
    }
}

/// OCR via the LLM vision endpoint.
pub struct ImageExtractor {
    pub llm: LlmClient,
    pub mime: &'static str,
}

#[async_trait]
impl Extractor for ImageExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = fs::read(path).await?;
        self.llm
            .call_vision(OCR_PROMPT, OCR_SYSTEM, self.mime, &bytes)
            .await
            .map_err(|e| ExtractError::Ocr(e.to_string()))
    }
}

/// Dispatches to the extractor matching the declared media type.
/// Returns `EmptyDocument` when extraction yields no usable text.
pub async fn extract_text(
    llm: &LlmClient,
    path: &Path,
    media: MediaType,
) -> Result<String, ExtractError> {
    let text = match media {
        MediaType::Pdf => PdfExtractor.extract(path).await?,
        MediaType::Docx => DocxExtractor.extract(path).await?,
        MediaType::Jpeg | MediaType::Png | MediaType::WebP => {
            ImageExtractor {
                llm: llm.clone(),
                mime: media.mime(),
            }
            .extract(path)
            .await?
        }
    };

    if text.trim().is_empty() {
        return Err(ExtractError::EmptyDocument);
    }
    Ok(text)
}

/// Pulls the text runs out of a DOCX container.
///
/// A .docx file is a zip archive; the document body lives in
/// `word/document.xml` as WordprocessingML. Visible text sits in `<w:t>`
/// elements and paragraphs close with `</w:p>`, which become line breaks.
fn docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let cursor = std::io::Cursor::new(bytes);
    let mut archive =
        zip::ZipArchive::new(cursor).map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut document = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Docx(format!("missing document body: {e}")))?
        .read_to_string(&mut document)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;

    Ok(wordprocessing_text(&document))
}

/// Flattens WordprocessingML into plain text.
fn wordprocessing_text(xml: &str) -> String {
    let mut out = String::new();
    let mut rest = xml;

    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            break;
        };
        let tag = &after[..close];
        rest = &after[close + 1..];

        if tag == "/w:p" {
            out.push('\n');
        } else if tag == "w:t" || tag.starts_with("w:t ") {
            if let Some(end) = rest.find("</w:t>") {
                out.push_str(&decode_entities(&rest[..end]));
                rest = &rest[end + "</w:t>".len()..];
            }
        }
    }

    out.trim().to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_mime() {
        assert_eq!(
            MediaType::from_mime("application/pdf").unwrap(),
            MediaType::Pdf
        );
        assert_eq!(
            MediaType::from_mime(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            )
            .unwrap(),
            MediaType::Docx
        );
        assert_eq!(MediaType::from_mime("image/jpg").unwrap(), MediaType::Jpeg);
        assert!(matches!(
            MediaType::from_mime("text/html"),
            Err(ExtractError::Unsupported(mime)) if mime == "text/html"
        ));
    }

    #[test]
    fn test_image_detection() {
        assert!(MediaType::Png.is_image());
        assert!(!MediaType::Pdf.is_image());
    }

    #[test]
    fn test_wordprocessing_text_basic() {
        let xml = r#"<w:document><w:body><w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p><w:p><w:r><w:t xml:space="preserve">Rust engineer &amp; systems nerd</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(
            wordprocessing_text(xml),
            "Jane Doe\nRust engineer & systems nerd"
        );
    }

    #[test]
    fn test_wordprocessing_text_joins_runs_in_paragraph() {
        let xml = "<w:p><w:r><w:t>Hello </w:t></w:r><w:r><w:t>world</w:t></w:r></w:p>";
        assert_eq!(wordprocessing_text(xml), "Hello world");
    }

    #[test]
    fn test_wordprocessing_text_empty() {
        assert_eq!(wordprocessing_text("<w:document></w:document>"), "");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &lt;b&gt; &quot;c&quot;"), "a <b> \"c\"");
    }
}
