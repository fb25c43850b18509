use crate::record::{Category, Record};

/// Content-prefix length probed for near-duplicate containment.
const PREFIX_LEN: usize = 80;

/// Prefixes shorter than this are too unspecific to compare; without the
/// floor an empty content would match every other record.
const MIN_PREFIX_LEN: usize = 40;

/// Keyword triggers per category, checked in this fixed priority order.
/// First category whose keyword appears in title or content wins.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Methodology,
        &["method", "approach", "framework", "systematic", "catalogu", "census", "checklist"],
    ),
    (
        Category::Digital,
        &["digital", "online", "electronic", "database", "hypertext", "digitized"],
    ),
    (
        Category::Humanities,
        &["poetry", "poem", "literature", "literary", "engraving", "illuminated", "painting", "artist"],
    ),
    (
        Category::History,
        &["history", "historical", "century", "romantic", "biograph", "antiquarian"],
    ),
    (
        Category::OpenAccess,
        &["open access", "public domain", "freely available", "repository"],
    ),
    (
        Category::Social,
        &["social", "society", "cultural", "political", "community"],
    ),
];

/// Assign a topical category from title + content. Pure and per-record;
/// defaults to `academic_papers` when nothing triggers.
pub fn classify(title: &str, content: &str) -> Category {
    let haystack = format!("{} {}", title, content).to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|kw| haystack.contains(kw)) {
            return *category;
        }
    }
    Category::AcademicPapers
}

/// Running accepted set: every candidate is checked against all previously
/// accepted records before acceptance, first-seen wins. Applied during
/// generation (not as a final pass) so later synthesis stages see the
/// then-current set.
#[derive(Debug, Default)]
pub struct AcceptedSet {
    records: Vec<Record>,
}

impl AcceptedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept the record unless it duplicates an already-accepted one.
    pub fn admit(&mut self, rec: Record) -> bool {
        if self.is_duplicate(&rec) {
            return false;
        }
        self.records.push(rec);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn count_for_part(&self, part: &str) -> usize {
        self.records
            .iter()
            .filter(|r| r.chapter.as_deref() == Some(part))
            .count()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    fn is_duplicate(&self, rec: &Record) -> bool {
        let rec_prefix = content_prefix(&rec.content);
        self.records.iter().any(|e| {
            if e.title == rec.title && e.authors == rec.authors && e.year == rec.year {
                return true;
            }
            match (content_prefix(&e.content), rec_prefix) {
                (Some(ep), _) if rec.content.contains(ep) => true,
                (_, Some(rp)) if e.content.contains(rp) => true,
                _ => false,
            }
        })
    }
}

/// First [`PREFIX_LEN`] chars of the content, or None when the content is
/// too short to be a meaningful fingerprint.
fn content_prefix(content: &str) -> Option<&str> {
    let trimmed = content.trim();
    if trimmed.chars().count() < MIN_PREFIX_LEN {
        return None;
    }
    let end = trimmed
        .char_indices()
        .nth(PREFIX_LEN)
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    Some(&trimmed[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, authors: &str, year: &str, content: &str) -> Record {
        Record {
            id: format!("test_{}", title.len()),
            title: title.into(),
            authors: authors.into(),
            year: year.into(),
            publication: String::new(),
            content: content.into(),
            category: Category::AcademicPapers,
            chapter: None,
            subheading: None,
        }
    }

    #[test]
    fn exact_triple_is_duplicate() {
        let mut set = AcceptedSet::new();
        assert!(set.admit(record("Fearful Symmetry", "Frye", "1947", "a")));
        assert!(!set.admit(record("Fearful Symmetry", "Frye", "1947", "b")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn differing_year_is_not_duplicate() {
        let mut set = AcceptedSet::new();
        assert!(set.admit(record("Fearful Symmetry", "Frye", "1947", "")));
        assert!(set.admit(record("Fearful Symmetry", "Frye", "1969", "")));
    }

    #[test]
    fn content_prefix_containment_is_duplicate() {
        let shared = "An annotated account of the early reception of the illuminated books, with notes";
        let mut set = AcceptedSet::new();
        assert!(set.admit(record("A", "x", "1900", shared)));
        let longer = format!("{} and considerable further commentary.", shared);
        assert!(!set.admit(record("B", "y", "1901", &longer)));
    }

    #[test]
    fn short_content_never_matches_by_prefix() {
        let mut set = AcceptedSet::new();
        assert!(set.admit(record("A", "x", "1900", "short note")));
        assert!(set.admit(record("B", "y", "1901", "short note too")));
    }

    #[test]
    fn identical_content_collapses_to_one() {
        let text = "Two paragraphs with identical content text long enough to fingerprint properly.";
        let mut set = AcceptedSet::new();
        assert!(set.admit(record("A", "x", "1900", text)));
        assert!(!set.admit(record("A2", "x2", "1900", text)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn classification_priority_order() {
        // "method" (methodology) outranks "digital" even when both appear.
        assert_eq!(
            classify("A digital method for Blake studies", ""),
            Category::Methodology
        );
        assert_eq!(classify("A digital Blake archive", ""), Category::Digital);
        assert_eq!(classify("Blake and nineteenth-century readers", ""), Category::History);
        assert_eq!(classify("", "freely available repository scans"), Category::OpenAccess);
        assert_eq!(classify("Songs", "a social circle practising engraving"), Category::Humanities);
        assert_eq!(classify("Untriggered title", "plain note"), Category::AcademicPapers);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("DIGITAL FACSIMILE", ""), Category::Digital);
    }
}
