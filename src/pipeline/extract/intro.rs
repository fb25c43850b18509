//! Introduction records: a much simpler rule than the body cascade. The
//! first few paragraph-like spans of the introduction text become records
//! under the INTRODUCTION pseudo-part.

use super::paragraphs;
use crate::record::{Category, EntryIdSeq, Record};

/// How many introduction spans are turned into records.
const MAX_INTRO_RECORDS: usize = 12;

const TITLE_MAX: usize = 80;

pub fn extract_intro(intro_text: &str, seq: &mut EntryIdSeq, current_year: &str) -> Vec<Record> {
    paragraphs(intro_text)
        .into_iter()
        .take(MAX_INTRO_RECORDS)
        .enumerate()
        .map(|(i, span)| {
            let title = span_title(span, i);
            Record {
                id: seq.next_id("introduction"),
                title,
                authors: "Introduction".to_string(),
                year: current_year.to_string(),
                publication: String::new(),
                content: span.to_string(),
                category: Category::Introduction,
                chapter: Some("INTRODUCTION".to_string()),
                subheading: Some(intro_subheading(span).to_string()),
            }
        })
        .collect()
}

/// First sentence (or line), clipped; numbered fallback when the span has
/// no usable lead.
fn span_title(span: &str, index: usize) -> String {
    let lead = span
        .split_once(". ")
        .map(|(s, _)| s)
        .unwrap_or_else(|| span.lines().next().unwrap_or(""))
        .trim();
    if lead.is_empty() {
        return format!("Introduction Note {}", index + 1);
    }
    if lead.chars().count() > TITLE_MAX {
        let clipped: String = lead.chars().take(TITLE_MAX).collect();
        format!("{}...", clipped.trim_end())
    } else {
        lead.to_string()
    }
}

fn intro_subheading(span: &str) -> &'static str {
    let lower = span.to_lowercase();
    if lower.contains("table of contents") || lower.contains("contents") {
        "Table of Contents"
    } else if lower.contains("guideline") || lower.contains("how to use") {
        "Guidelines"
    } else {
        "Prefatory Material"
    }
}
