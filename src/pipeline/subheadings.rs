use std::sync::LazyLock;

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::segment::Section;
use crate::taxonomy;

// Label line: uppercase start, letters/spaces/commas only, optional
// trailing page number.
static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][A-Za-z ,]*[A-Za-z])\s*(?:\d{1,4})?$").unwrap());

static ROMAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[IVXLCDM]+$").unwrap());

/// Part name → ordered subheading labels. Insertion order is semantic and
/// preserved through serialization; duplicates within a part are forbidden
/// (every mutation goes through [`SubheadingMap::append_if_absent`]).
#[derive(Debug, Clone, PartialEq)]
pub struct SubheadingMap {
    parts: Vec<(String, Vec<String>)>,
}

impl SubheadingMap {
    /// Every canonical part keyed in document order; INTRODUCTION starts
    /// with its fixed subheading list, all other parts start empty.
    pub fn from_taxonomy() -> Self {
        let parts = taxonomy::PARTS
            .iter()
            .map(|&p| {
                let subs = if p == "INTRODUCTION" {
                    taxonomy::INTRO_SUBHEADINGS.iter().map(|s| s.to_string()).collect()
                } else {
                    Vec::new()
                };
                (p.to_string(), subs)
            })
            .collect();
        Self { parts }
    }

    /// Idempotent append; exact case-sensitive match decides "already present".
    /// Unknown part names are ignored (the key set is closed).
    pub fn append_if_absent(&mut self, part: &str, label: &str) -> bool {
        let Some((_, subs)) = self.parts.iter_mut().find(|(p, _)| p == part) else {
            return false;
        };
        if subs.iter().any(|s| s == label) {
            return false;
        }
        subs.push(label.to_string());
        true
    }

    /// Merge the hand-curated per-part supplement.
    pub fn merge_known(&mut self) {
        for &part in taxonomy::PARTS.iter() {
            for &sub in taxonomy::known_subheadings(part) {
                self.append_if_absent(part, sub);
            }
        }
    }

    pub fn get(&self, part: &str) -> &[String] {
        self.parts
            .iter()
            .find(|(p, _)| p == part)
            .map(|(_, subs)| subs.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.parts.iter().map(|(p, s)| (p.as_str(), s.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl Serialize for SubheadingMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.parts.len()))?;
        for (part, subs) in &self.parts {
            map.serialize_entry(part, subs)?;
        }
        map.end()
    }
}

/// Scan a section for subheading labels, merging discoveries into the map,
/// and choose the section's default subheading: the first entry of the
/// part's list textually contained in the section, else the part's first
/// curated subheading.
pub fn scan_section(section: &Section, map: &mut SubheadingMap) -> Option<String> {
    for line in section.text.lines() {
        let line = line.trim();
        let Some(caps) = LABEL_RE.captures(line) else {
            continue;
        };
        let label = caps[1].trim_end();
        if accept_label(label) {
            map.append_if_absent(&section.part, label);
        }
    }

    map.get(&section.part)
        .iter()
        .find(|s| section.text.contains(s.as_str()))
        .cloned()
        .or_else(|| {
            taxonomy::known_subheadings(&section.part)
                .first()
                .map(|s| s.to_string())
        })
}

fn accept_label(label: &str) -> bool {
    if label.len() <= 4 || label.split_whitespace().count() > 8 {
        return false;
    }
    if label.contains("PART") || label.contains("APPENDIX") {
        return false;
    }
    let compact: String = label.chars().filter(|c| !c.is_whitespace()).collect();
    if ROMAN_RE.is_match(&compact) || compact.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    true
}
