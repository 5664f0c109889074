use crate::errors::AppError;

/// Extracts plain text from an uploaded PDF.
///
/// Encrypted, corrupt, or image-only PDFs are rejected as validation errors.
pub fn extract_text_from_pdf(bytes: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation(
            "No extractable text found in PDF".to_string(),
        ));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let result = extract_text_from_pdf(b"definitely not a pdf");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
