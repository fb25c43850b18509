use serde::{Deserialize, Serialize};

/// Topical category assigned by the classifier. Closed vocabulary;
/// serialized snake_case to match the consumer-facing JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Methodology,
    Digital,
    Humanities,
    History,
    OpenAccess,
    Social,
    AcademicPapers,
    Introduction,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Methodology,
        Category::Digital,
        Category::Humanities,
        Category::History,
        Category::OpenAccess,
        Category::Social,
        Category::AcademicPapers,
        Category::Introduction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Methodology => "methodology",
            Category::Digital => "digital",
            Category::Humanities => "humanities",
            Category::History => "history",
            Category::OpenAccess => "open_access",
            Category::Social => "social",
            Category::AcademicPapers => "academic_papers",
            Category::Introduction => "introduction",
        }
    }
}

/// One extracted bibliographic entry.
///
/// All fields are strings; `chapter` is the owning part name and
/// `subheading` the subdivision within it, when either could be inferred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub title: String,
    pub authors: String,
    pub year: String,
    pub publication: String,
    pub content: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,
}

/// Caller-facing knobs for [`crate::pipeline::extract`].
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Minimum record count the pipeline must return. Defaults to 1700.
    pub min_entries_threshold: Option<usize>,
    /// Enables the looser mining tiers and the every-remaining-paragraph pass.
    pub force_full_extraction: bool,
    /// Year used when no 4-digit year is extractable. Defaults to the wall
    /// clock year; injectable so tests are fully deterministic.
    pub current_year: Option<String>,
}

/// Monotone id source. The running count guarantees uniqueness within a run
/// even when the author-derived suffix collides.
#[derive(Debug, Default)]
pub struct EntryIdSeq {
    next: usize,
}

impl EntryIdSeq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, author: &str) -> String {
        let n = self.next;
        self.next += 1;
        let slug: String = author
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .take(20)
            .collect();
        let slug = slug.trim_matches('_').to_string();
        if slug.is_empty() {
            format!("entry_{}", n)
        } else {
            format!("entry_{}_{}", n, slug)
        }
    }
}
