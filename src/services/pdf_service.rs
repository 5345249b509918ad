use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Decodes a base64 PDF payload, tolerating a `data:...;base64,` prefix and
/// embedded whitespace.
pub fn decode_pdf_base64(payload: &str) -> Result<Vec<u8>> {
    let payload = payload.trim();
    let encoded = match payload.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => payload,
    };
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

    let data = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| Error::BadRequest(format!("pdfBase64 is not valid base64: {}", e)))?;

    if !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".into()));
    }
    Ok(data)
}

/// Joins non-empty pages (form-feed separated) with a blank line.
pub fn join_pages(raw: &str) -> String {
    raw.split('\x0c')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub async fn extract_text(data: Vec<u8>, filename: Option<&str>) -> Result<String> {
    let name = filename.unwrap_or("upload.pdf").to_string();
    let size = data.len();

    let raw = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| {
            tracing::error!("PDF extraction task aborted: {}", e);
            Error::BadRequest("Could not extract text from PDF".to_string())
        })?
        .map_err(|e| {
            tracing::warn!(file = %name, "Failed to extract text from PDF: {}", e);
            Error::BadRequest(format!("Could not extract text from {}", name))
        })?;

    let text = join_pages(&raw);
    tracing::info!(file = %name, bytes = size, chars = text.chars().count(), "Extracted PDF text");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_and_data_url_payloads() {
        let encoded = BASE64.encode(b"%PDF-1.4 body");
        assert_eq!(decode_pdf_base64(&encoded).unwrap(), b"%PDF-1.4 body");

        let data_url = format!("data:application/pdf;base64,{}", encoded);
        assert_eq!(decode_pdf_base64(&data_url).unwrap(), b"%PDF-1.4 body");

        let wrapped = format!("{}\n{}", &encoded[..8], &encoded[8..]);
        assert_eq!(decode_pdf_base64(&wrapped).unwrap(), b"%PDF-1.4 body");
    }

    #[test]
    fn rejects_bad_payloads() {
        assert!(matches!(decode_pdf_base64("***"), Err(Error::BadRequest(_))));
        let not_pdf = BASE64.encode(b"hello world");
        assert!(matches!(decode_pdf_base64(&not_pdf), Err(Error::BadRequest(_))));
    }

    #[test]
    fn pages_are_joined_with_blank_lines() {
        assert_eq!(join_pages("one\n\x0c  \x0ctwo  \x0c"), "one\n\ntwo");
        assert_eq!(join_pages(""), "");
    }
}
