pub mod intro;
pub mod patterns;

use std::sync::LazyLock;

use regex::Regex;

use super::dedup;
use super::segment::Section;
use crate::record::{EntryIdSeq, Record};
use patterns::{map_fields, RawFields, PATTERNS};

/// Paragraphs shorter than this are too thin to yield a usable record.
pub const MIN_PARAGRAPH_LEN: usize = 40;

/// Bound on the descriptive content carried over from the paragraph tail.
const CONTENT_WINDOW: usize = 500;

static BLANK_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").unwrap());

/// Blank-line delimited paragraphs, trimmed, with the too-short ones dropped.
pub fn paragraphs(text: &str) -> Vec<&str> {
    BLANK_LINE_RE
        .split(text)
        .map(str::trim)
        .filter(|p| p.len() >= MIN_PARAGRAPH_LEN)
        .collect()
}

/// Run the pattern cascade over every retained paragraph of a section.
///
/// Every non-overlapping match of every pattern yields a candidate record;
/// over-generation is expected and corrected downstream by the deduplicator.
/// Unmatched paragraphs simply yield nothing.
pub fn extract_entries(
    section: &Section,
    default_subheading: Option<&str>,
    seq: &mut EntryIdSeq,
    current_year: &str,
) -> Vec<Record> {
    let mut records = Vec::new();

    for para in paragraphs(&section.text) {
        for pat in PATTERNS.iter() {
            for caps in pat.re.captures_iter(para) {
                let Some(fields) = map_fields(pat.map, &caps) else {
                    continue;
                };
                let Some(m) = caps.get(0) else {
                    continue;
                };
                let content = content_window(para, m.end(), m.as_str());
                if let Some(rec) = build_record(
                    fields,
                    content,
                    section,
                    default_subheading,
                    seq,
                    current_year,
                ) {
                    records.push(rec);
                }
            }
        }
    }

    records
}

/// Paragraph text after the match, bounded to [`CONTENT_WINDOW`] chars with
/// an ellipsis; falls back to the raw matched text when the tail is empty.
fn content_window(para: &str, match_end: usize, matched: &str) -> String {
    let tail = para[match_end..].trim();
    if tail.is_empty() {
        return matched.trim().to_string();
    }
    if tail.chars().count() > CONTENT_WINDOW {
        let clipped: String = tail.chars().take(CONTENT_WINDOW).collect();
        format!("{}...", clipped)
    } else {
        tail.to_string()
    }
}

fn build_record(
    fields: RawFields,
    content: String,
    section: &Section,
    default_subheading: Option<&str>,
    seq: &mut EntryIdSeq,
    current_year: &str,
) -> Option<Record> {
    let title = normalize_title(&fields.title);
    let authors = normalize_author(&fields.author);

    // Emit rule: heuristic noise is dropped silently, not an error.
    if title.is_empty() || (authors.is_empty() && content.is_empty()) {
        return None;
    }

    let year = fields.year.unwrap_or_else(|| current_year.to_string());
    let category = dedup::classify(&title, &content);

    Some(Record {
        id: seq.next_id(&authors),
        title,
        authors,
        year,
        publication: fields.publication.trim().to_string(),
        content,
        category,
        chapter: Some(section.part.clone()),
        subheading: default_subheading.map(|s| s.to_string()),
    })
}

fn normalize_title(title: &str) -> String {
    title
        .trim()
        .trim_matches(|c| matches!(c, '"' | '“' | '”' | '\''))
        .trim()
        .to_string()
}

fn normalize_author(author: &str) -> String {
    author.trim().strip_suffix('.').unwrap_or(author.trim()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(part: &str, text: &str) -> Section {
        Section {
            part: part.to_string(),
            text: text.to_string(),
            is_header: false,
        }
    }

    #[test]
    fn short_paragraphs_are_dropped() {
        let paras = paragraphs("tiny\n\nthis one is comfortably longer than the floor value");
        assert_eq!(paras.len(), 1);
    }

    #[test]
    fn unmatched_paragraph_yields_nothing() {
        let sec = section(
            "PART IV. BIOGRAPHIES",
            "nothing here resembles a citation, just lowercase prose rambling on",
        );
        let mut seq = EntryIdSeq::new();
        assert!(extract_entries(&sec, None, &mut seq, "2024").is_empty());
    }

    #[test]
    fn quoted_paragraph_extracts_title_and_author() {
        let sec = section(
            "PART IV. BIOGRAPHIES",
            r#""Fearful Symmetry". Frye, Northrop. Princeton, 1947."#,
        );
        let mut seq = EntryIdSeq::new();
        let recs = extract_entries(&sec, Some("Standard Biographies"), &mut seq, "2024");
        let rec = recs
            .iter()
            .find(|r| r.title == "Fearful Symmetry")
            .expect("quoted title extracted");
        assert_eq!(rec.year, "1947");
        assert_eq!(rec.authors, "Frye, Northrop");
        assert!(!rec.authors.contains("Unknown"));
        assert_eq!(rec.chapter.as_deref(), Some("PART IV. BIOGRAPHIES"));
        assert_eq!(rec.subheading.as_deref(), Some("Standard Biographies"));
    }

    #[test]
    fn ids_are_unique_across_matches() {
        let sec = section(
            "PART VI. GENERAL CRITICISM",
            "Frye, Northrop. Fearful Symmetry Study. Princeton, 1947.\n\n\
             Damon, S. Foster. A Blake Dictionary. Providence: Brown University Press, 1965.",
        );
        let mut seq = EntryIdSeq::new();
        let recs = extract_entries(&sec, None, &mut seq, "2024");
        assert!(recs.len() >= 2);
        let mut ids: Vec<_> = recs.iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), recs.len());
    }

    #[test]
    fn content_falls_back_to_matched_text() {
        let para = "Frye, Northrop. Fearful Symmetry Revisited. Princeton, 1947.";
        let sec = section("PART VI. GENERAL CRITICISM", para);
        let mut seq = EntryIdSeq::new();
        let recs = extract_entries(&sec, None, &mut seq, "2024");
        let rec = recs
            .iter()
            .find(|r| r.authors == "Frye, Northrop")
            .unwrap();
        assert!(!rec.content.is_empty());
    }

    #[test]
    fn content_window_is_bounded() {
        let tail = "x".repeat(900);
        let para = format!("1947: Annotated Blake Listing here\n{}", tail);
        let clipped = content_window(&para, para.find('\n').unwrap(), "matched");
        assert!(clipped.ends_with("..."));
        assert_eq!(clipped.chars().count(), 503);
    }

    #[test]
    fn trailing_period_stripped_from_author() {
        assert_eq!(normalize_author("Bentley, G. E. "), "Bentley, G. E");
        assert_eq!(normalize_author("Frye"), "Frye");
    }

    #[test]
    fn quotes_trimmed_from_title() {
        assert_eq!(normalize_title("“Fearful Symmetry”"), "Fearful Symmetry");
        assert_eq!(normalize_title("\"Jerusalem\" "), "Jerusalem");
    }
}
