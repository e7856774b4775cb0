//! HTML question page reader
//!
//! Each structural query lives in its own extraction function returning an
//! explicit `Option`/`Result`, so a missing element is a value rather than an
//! empty selection.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::error::ReadError;
use super::reconcile::reconcile;
use super::RawExtraction;
use crate::question::VoteTally;

const PROMPT_SELECTOR: &str = ".question-body .card-text";
const OPTION_SELECTOR: &str = ".question-choices-container ul li";
const LETTER_SELECTOR: &str = ".multi-choice-letter";
const SUGGESTED_SELECTOR: &str = ".correct-answer";
const TALLY_SELECTOR: &str = ".voted-answers-tally script";

/// Read one question page.
///
/// The prompt keeps its paragraph breaks as `\n`; it is normalized when the
/// extraction is turned into a `Question`.
///
/// # Errors
///
/// Returns [`ReadError::MissingPrompt`] when the page has no prompt element.
pub fn read(page_markup: &str) -> Result<RawExtraction, ReadError> {
    let document = Html::parse_document(page_markup);

    let prompt = extract_prompt(&document)?.ok_or(ReadError::MissingPrompt)?;
    let options = extract_options(&document)?;
    let suggested = extract_suggested_answer(&document)?;
    let tally = extract_vote_tally(&document)?;

    let reconciliation = reconcile(suggested.as_deref(), tally.as_ref());
    debug!(
        options = options.len(),
        answer = %reconciliation.answer,
        "Read question page"
    );

    Ok(RawExtraction {
        prompt,
        options,
        answer: reconciliation.answer,
        is_multi_answer: Some(reconciliation.is_multi_answer),
        notes: reconciliation.notes,
    })
}

/// Prompt text with its fragments joined by newlines
pub fn extract_prompt(document: &Html) -> Result<Option<String>, ReadError> {
    let selector = selector(PROMPT_SELECTOR)?;
    Ok(document
        .select(&selector)
        .next()
        .map(|element| stripped_text(element, "\n", None)))
}

/// Options in page order, as `"{letter} {body}"` when a letter element exists
pub fn extract_options(document: &Html) -> Result<Vec<String>, ReadError> {
    let item_selector = selector(OPTION_SELECTOR)?;
    let letter_selector = selector(LETTER_SELECTOR)?;

    Ok(document
        .select(&item_selector)
        .map(|item| match item.select(&letter_selector).next() {
            Some(letter) => {
                let letter_text = stripped_text(letter, "", None);
                let body = stripped_text(item, "", Some(letter));
                format!("{} {}", letter_text, body)
            }
            None => stripped_text(item, "", None),
        })
        .collect())
}

/// The site's own answer pick, if the page shows one
pub fn extract_suggested_answer(document: &Html) -> Result<Option<String>, ReadError> {
    let selector = selector(SUGGESTED_SELECTOR)?;
    Ok(document
        .select(&selector)
        .next()
        .map(|element| stripped_text(element, "", None)))
}

/// The embedded community vote tally.
///
/// A payload that does not decode yields `None`: a broken tally never fails
/// the page.
pub fn extract_vote_tally(document: &Html) -> Result<Option<VoteTally>, ReadError> {
    let selector = selector(TALLY_SELECTOR)?;
    let Some(script) = document.select(&selector).next() else {
        return Ok(None);
    };

    let payload = script.text().collect::<String>();
    match VoteTally::from_json(&payload) {
        Ok(tally) => Ok(Some(tally)),
        Err(e) => {
            warn!("Ignoring vote tally: {}", ReadError::MalformedTally(e));
            Ok(None)
        }
    }
}

fn selector(query: &'static str) -> Result<Selector, ReadError> {
    Selector::parse(query).map_err(|e| ReadError::InvalidSelector {
        selector: query,
        message: e.to_string(),
    })
}

/// Trimmed, non-empty text fragments of `element` joined with `separator`,
/// leaving out everything under `skip` and script or style contents.
fn stripped_text(element: ElementRef<'_>, separator: &str, skip: Option<ElementRef<'_>>) -> String {
    element
        .descendants()
        .filter(|node| match skip {
            Some(skip) => !node.ancestors().any(|ancestor| ancestor.id() == skip.id()),
            None => true,
        })
        .filter(|node| {
            !node
                .parent()
                .and_then(|parent| parent.value().as_element().map(|element| element.name()))
                .is_some_and(|name| matches!(name, "script" | "style"))
        })
        .filter_map(|node| node.value().as_text().map(|text| text.trim()))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
