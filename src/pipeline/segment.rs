use std::sync::LazyLock;

use regex::Regex;

use crate::taxonomy;

static PART_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*PART\s+[IVXLC]+\.\s+[A-Z][A-Z'&,:;.\- ]*").unwrap()
});

/// Fragments shorter than this carry too little signal and are dropped
/// outright; they are not merged into neighbours or retried.
pub const MIN_SECTION_LEN: usize = 200;

/// A marker-led fragment up to this length is a bare header (the part title
/// plus running matter), not a body to be mined for records.
const HEADER_MAX_LEN: usize = 400;

/// Contiguous span of the source text with its inferred owning part.
/// Ephemeral: consumed by the subheading and entry extractors, never output.
#[derive(Debug, Clone)]
pub struct Section {
    pub part: String,
    pub text: String,
    pub is_header: bool,
}

/// Split the raw text along part-marker boundaries and assign each retained
/// fragment a best-guess owning part.
pub fn segment_parts(text: &str) -> Vec<Section> {
    let starts: Vec<usize> = PART_MARKER_RE.find_iter(text).map(|m| m.start()).collect();

    let mut bounds = Vec::with_capacity(starts.len() + 1);
    if starts.first().copied() != Some(0) {
        bounds.push(0);
    }
    bounds.extend(&starts);

    let mut sections = Vec::new();
    let mut prev_part: Option<String> = None;

    for (i, &start) in bounds.iter().enumerate() {
        let end = bounds.get(i + 1).copied().unwrap_or(text.len());
        let fragment = text[start..end].trim();
        if fragment.len() < MIN_SECTION_LEN {
            continue;
        }

        let is_header = marker_near_start(fragment) && fragment.len() <= HEADER_MAX_LEN;
        let part = infer_part(fragment, prev_part.as_deref());
        prev_part = Some(part.clone());

        sections.push(Section {
            part,
            text: fragment.to_string(),
            is_header,
        });
    }

    sections
}

fn marker_near_start(fragment: &str) -> bool {
    PART_MARKER_RE
        .find(fragment)
        .is_some_and(|m| m.start() < 10)
}

/// Ordered fallback: verbatim canonical name in the fragment, else the
/// preceding fragment's part, else the first numbered part.
fn infer_part(fragment: &str, prev: Option<&str>) -> String {
    taxonomy::body_parts()
        .iter()
        .find(|p| fragment.contains(**p))
        .map(|p| p.to_string())
        .or_else(|| prev.map(|p| p.to_string()))
        .unwrap_or_else(|| taxonomy::body_parts()[0].to_string())
}
