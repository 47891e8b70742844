//! Stateless text cleaning helpers
//!
//! These functions are applied to every extracted field before export. They
//! are pure and order-independent except where the dataset cleaning pass in
//! [`crate::dataset`] chains them explicitly.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Sentinel recorded for any field with no extractable data
pub const NA: &str = "N/A";

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("hardcoded regex is valid"))
}

fn non_word_only() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\w\s]+$").expect("hardcoded regex is valid"))
}

/// Collapses every whitespace run (including newlines) into a single space
/// and trims the ends.
pub fn remove_extra_spaces(text: &str) -> String {
    whitespace_run().replace_all(text, " ").trim().to_string()
}

/// Normalizes whitespace, then substitutes the [`NA`] sentinel when nothing
/// word-like survives. A value that is empty or consists exclusively of
/// punctuation carries no data.
pub fn set_na(text: &str) -> String {
    let text = remove_extra_spaces(text);
    if text.is_empty() || non_word_only().is_match(&text) {
        NA.to_string()
    } else {
        text
    }
}

/// Decomposes the input to NFD and drops combining marks, yielding an
/// ASCII-approximate string ("Öresund" -> "Oresund").
pub fn remove_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
