//! The ordered citation-shape cascade. Every pattern carries its
//! field-mapping strategy at definition time, so a match is resolved to raw
//! fields without sniffing the matched text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Fields pulled out of a single pattern match, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields {
    pub author: String,
    pub title: String,
    pub publication: String,
    pub year: Option<String>,
}

/// How a pattern's capture groups map onto record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMap {
    /// Group 1 author, group 2 title (else "Unknown Title"), group 3
    /// publication; year via a scan of the whole match.
    AuthorFirst,
    /// Quoted text is the title; author from the text before the quotes,
    /// or from the leading name-shaped run after them; remainder is the
    /// publication.
    Quoted,
    /// Group 1 author, bracketed group 2 publication, trailing group 3 title.
    Angle,
    /// Group 1 year, group 2 title; author unknown.
    YearFirst,
}

pub struct EntryPattern {
    pub name: &'static str,
    pub re: Regex,
    pub map: FieldMap,
}

/// Cascade in fixed priority order, most specific shapes first. Each pattern
/// is scanned for all non-overlapping matches; patterns are independent.
pub static PATTERNS: LazyLock<Vec<EntryPattern>> = LazyLock::new(|| {
    vec![
        EntryPattern {
            name: "author_year_lead",
            re: Regex::new(
                r"(?m)^([A-Z][A-Za-z'\-]+,\s+[A-Z][A-Za-z.'\- ]{1,40}?)\.\s+([A-Z][^.\n]{0,80}\s[^.\n]{1,80})\.(?:\s+([^\n]{1,200}))?",
            )
            .unwrap(),
            map: FieldMap::AuthorFirst,
        },
        EntryPattern {
            name: "quoted_title",
            re: Regex::new(
                r#"(?:([A-Z][^"“\n]{0,80}?)[,.:]?\s*)?["“]([^"”\n]{2,200})["”][,.]?\s*([^"“\n]{1,200})?"#,
            )
            .unwrap(),
            map: FieldMap::Quoted,
        },
        EntryPattern {
            name: "angle_citation",
            re: Regex::new(r"([A-Z][^<>\n]{2,80}?)\s*<([^<>\n]{2,80})>\s*([^\n]{1,200})?").unwrap(),
            map: FieldMap::Angle,
        },
        EntryPattern {
            name: "bare_author_year",
            re: Regex::new(
                r"\b([A-Z][A-Za-z'\-]+(?:,\s+[A-Z][A-Za-z.'\-]+)?),?\s+\(?(?:1[5-9]\d{2}|20\d{2})\)?",
            )
            .unwrap(),
            map: FieldMap::AuthorFirst,
        },
        EntryPattern {
            name: "year_leading",
            re: Regex::new(r"\b(1[5-9]\d{2}|20\d{2})[.:,]\s+([A-Z][^\n.]{3,160})").unwrap(),
            map: FieldMap::YearFirst,
        },
        EntryPattern {
            name: "editor_lead",
            re: Regex::new(
                r"\b(?:[Ee]dited\s+by|[Ee]ds?\.)\s+((?:[A-Z][A-Za-z'\-]*\.?\s+){0,3}[A-Z][A-Za-z'\-]+)\.(?:\s+([A-Z][^.\n]{3,160}))?",
            )
            .unwrap(),
            map: FieldMap::AuthorFirst,
        },
        EntryPattern {
            name: "work_possessive",
            re: Regex::new(r"\b([A-Z][A-Za-z'\-]+)['’]s\s+([A-Z][^\n.,;]{3,120})").unwrap(),
            map: FieldMap::AuthorFirst,
        },
    ]
});

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(1[5-9]\d{2}|20\d{2})\b").unwrap());

// Leading "Surname, Given [Middle]" run at the start of a span. Given-name
// tokens are either initials ("S.") or bare words; a period after a full
// word ends the run, so the following sentence is left to the publication.
static NAME_LEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[.,:;\s]*([A-Z][A-Za-z'\-]+(?:,\s*[A-Z](?:\.|[A-Za-z'\-]+)(?:\s+[A-Z](?:\.|[A-Za-z'\-]+))*)?)[.,]?\s*(.*)$",
    )
    .unwrap()
});

/// First plausible 4-digit year anywhere in `text`.
pub fn scan_year(text: &str) -> Option<String> {
    YEAR_RE.captures(text).map(|c| c[1].to_string())
}

fn group(caps: &Captures, i: usize) -> String {
    caps.get(i).map(|m| m.as_str().trim().to_string()).unwrap_or_default()
}

/// Resolve a match to raw fields according to the pattern's map tag.
pub fn map_fields(map: FieldMap, caps: &Captures) -> Option<RawFields> {
    let whole = caps.get(0)?.as_str();
    let year = scan_year(whole);

    let fields = match map {
        FieldMap::AuthorFirst => {
            let title = match caps.get(2) {
                Some(m) => m.as_str().trim().to_string(),
                None => "Unknown Title".to_string(),
            };
            RawFields {
                author: group(caps, 1),
                title,
                publication: group(caps, 3),
                year,
            }
        }
        FieldMap::Quoted => {
            let title = group(caps, 2);
            let after = group(caps, 3);
            let (author, publication) = if !group(caps, 1).is_empty() {
                (group(caps, 1), after)
            } else if let Some(name) = NAME_LEAD_RE.captures(&after) {
                (name[1].to_string(), name[2].trim().to_string())
            } else {
                (String::new(), after)
            };
            RawFields {
                author,
                title,
                publication,
                year,
            }
        }
        FieldMap::Angle => {
            let title = {
                let t = group(caps, 3);
                if t.is_empty() { "Unknown Title".to_string() } else { t }
            };
            RawFields {
                author: group(caps, 1),
                title,
                publication: group(caps, 2),
                year,
            }
        }
        FieldMap::YearFirst => RawFields {
            author: "Unknown Author".to_string(),
            title: group(caps, 2),
            publication: String::new(),
            year: Some(group(caps, 1)),
        },
    };
    Some(fields)
}
