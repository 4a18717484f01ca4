//! Text extraction for the two accepted upload formats.

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
}

impl DocumentFormat {
    /// Resolves a declared MIME type. Parameters such as `; charset=utf-8` are ignored.
    pub fn from_mime(mime: &str) -> Result<Self, AppError> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/pdf" => Ok(DocumentFormat::Pdf),
            "text/plain" => Ok(DocumentFormat::PlainText),
            _ => Err(AppError::UnsupportedFormat(format!(
                "Unsupported file type '{mime}'. Upload a PDF or plain text file."
            ))),
        }
    }
}

/// Converts raw document bytes into plain text. PDF parsing is blocking work;
/// async callers should run this on a blocking thread.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String, AppError> {
    match format {
        DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::ExtractionFailed(format!("Could not read PDF: {e}"))),
        // Undecodable bytes become U+FFFD rather than failing the upload.
        DocumentFormat::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}
