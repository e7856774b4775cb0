//! Reader for the plain text of a multi-question document
//!
//! The document is expected to carry literal `Question N:` headers, lettered
//! option prefixes `A.` through `F.`, an `Answer:` line and a `Notes:` line per
//! question. Blocks that lack an option marker are skipped, never fatal.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::error::ReadError;
use super::RawExtraction;
use crate::text::{normalize, truncate_for_log};

static QUESTION_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Question\s+\d+:").expect("valid question header pattern"));

static OPTION_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-F]\.").expect("valid option marker pattern"));

static ANSWER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Answer:\s*([A-F])").expect("valid answer pattern"));

const ANSWER_TOKEN: &str = "Answer:";
const NOTES_TOKEN: &str = "Notes:";
const NEXT_QUESTION_TOKEN: &str = "Question";

/// Read every question block of a document.
///
/// The text before the first `Question N:` header is a preamble and is
/// dropped. A block whose answer is missing yields an empty answer string.
pub fn read(full_text: &str) -> Vec<RawExtraction> {
    let text = normalize(full_text);
    debug!("Normalized text sample: {}", truncate_for_log(&text, 500));

    let blocks = split_blocks(&text);
    debug!("Found {} potential question blocks", blocks.len());

    let mut extractions = Vec::with_capacity(blocks.len());
    let mut skipped = 0;
    for (i, block) in blocks.iter().enumerate() {
        debug!(block = i + 1, "Processing block: {}", truncate_for_log(block, 200));
        match read_block(block) {
            Ok(raw) => extractions.push(raw),
            Err(e) => {
                skipped += 1;
                debug!(block = i + 1, "Skipping block: {}", e);
            }
        }
    }

    if skipped > 0 {
        warn!(
            "Skipped {} of {} question blocks without option markers",
            skipped,
            blocks.len()
        );
    }
    extractions
}

/// Split text on `Question N:` headers, dropping the headers and the preamble
pub fn split_blocks(text: &str) -> Vec<&str> {
    QUESTION_HEADER_RE.split(text).skip(1).collect()
}

/// Extract the fields of a single question block
pub fn read_block(block: &str) -> Result<RawExtraction, ReadError> {
    let first_marker = OPTION_MARKER_RE
        .find(block)
        .ok_or(ReadError::MissingOptionMarker)?;

    let prompt = normalize(&block[..first_marker.start()]);
    let answer = ANSWER_RE
        .captures(block)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    Ok(RawExtraction {
        prompt,
        options: extract_options(block),
        answer,
        is_multi_answer: None,
        notes: extract_notes(block),
    })
}

/// Each `X. ...` span ends at the next option marker, at `Answer:`, or at the
/// end of the block.
fn extract_options(block: &str) -> Vec<String> {
    let mut options = Vec::new();
    let mut cursor = 0;

    while let Some(marker) = OPTION_MARKER_RE.find_at(block, cursor) {
        let body_start = marker.end();
        let next_marker = OPTION_MARKER_RE.find_at(block, body_start).map(|m| m.start());
        let answer = block[body_start..]
            .find(ANSWER_TOKEN)
            .map(|offset| body_start + offset);
        let end = [next_marker, answer]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(block.len());

        options.push(normalize(&block[marker.start()..end]));
        cursor = end;
    }

    options
}

fn extract_notes(block: &str) -> String {
    let Some(start) = block.find(NOTES_TOKEN) else {
        return String::new();
    };
    let rest = block[start + NOTES_TOKEN.len()..].trim_start();
    let end = rest.find(NEXT_QUESTION_TOKEN).unwrap_or(rest.len());
    normalize(&rest[..end])
}
