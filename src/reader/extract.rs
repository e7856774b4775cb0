//! Document text loading for the document reader

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Whether the path names a PDF file
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Load the full text of a document: PDFs are extracted, anything else is
/// read as UTF-8 text.
pub async fn document_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let text = if is_pdf(path) {
        pdf_text(path.to_path_buf()).await?
    } else {
        tokio::fs::read_to_string(path).await?
    };

    info!(
        "Loaded {} characters of text from {}",
        text.chars().count(),
        path.display()
    );
    Ok(text)
}

/// Extract PDF text on a blocking thread. The extractor panics on some
/// malformed files, so panics are turned into errors.
async fn pdf_text(path: PathBuf) -> Result<String> {
    debug!("Extracting text from {}", path.display());
    let extraction = tokio::task::spawn_blocking(move || {
        panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text(&path)))
    })
    .await
    .map_err(|e| Error::Pdf(format!("extraction task failed: {}", e)))?;

    match extraction {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(Error::Pdf(e.to_string())),
        Err(_) => Err(Error::Pdf("extractor panicked".to_string())),
    }
}
