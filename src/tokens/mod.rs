//! Approximate token counting.
//!
//! Only used to decide when to compress the context, so a heuristic is
//! enough: cl100k-family tokenizers average around four characters per
//! token on prose, while whitespace splitting undercounts punctuation
//! and code. Taking the larger of the two signals errs toward
//! compressing early rather than overflowing the model's window.

use crate::types::ContextElement;

/// Estimate the token count of a piece of text.
pub fn estimate(text: &str) -> usize {
    let by_chars = text.chars().count() / 4;
    let by_words = text.split_whitespace().count() * 4 / 3;
    by_chars.max(by_words)
}

/// Estimate the token count of a serialized conversation context.
pub fn estimate_context(context: &[ContextElement]) -> usize {
    context.iter().map(|element| estimate(element.text())).sum()
}
