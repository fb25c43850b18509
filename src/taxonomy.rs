//! Static catalog of the bibliography's structure: the eleven canonical
//! parts (the INTRODUCTION pseudo-part plus ten numbered parts, in document
//! order) and the hand-curated subheadings known to belong to some of them.

/// All canonical part names, in document order. The order is semantic and
/// must not be sorted.
pub const PARTS: [&str; 11] = [
    "INTRODUCTION",
    "PART I. BIBLIOGRAPHIES AND REFERENCE WORKS",
    "PART II. EDITIONS OF BLAKE'S WRITINGS",
    "PART III. REPRODUCTIONS OF DRAWINGS AND PAINTINGS",
    "PART IV. BIOGRAPHIES",
    "PART V. EXHIBITION AND COLLECTION CATALOGUES",
    "PART VI. GENERAL CRITICISM",
    "PART VII. STUDIES OF INDIVIDUAL WORKS",
    "PART VIII. BLAKE'S ART AND TECHNIQUE",
    "PART IX. BLAKE'S INFLUENCE AND REPUTATION",
    "PART X. APPENDICES AND INDEXES",
];

/// The numbered parts, i.e. everything a body fragment can belong to.
/// INTRODUCTION is a pseudo-part reserved for the separate intro text.
pub fn body_parts() -> &'static [&'static str] {
    &PARTS[1..]
}

/// Fixed subheading list for the INTRODUCTION pseudo-part.
pub const INTRO_SUBHEADINGS: [&str; 6] = [
    "Prefatory Material",
    "Acknowledgments",
    "Table of Contents",
    "List of Illustrations",
    "Abbreviations",
    "Guidelines",
];

/// Hand-curated subheadings expected under a subset of parts. Merged into
/// the discovered map idempotently; absent parts simply have none.
pub fn known_subheadings(part: &str) -> &'static [&'static str] {
    match part {
        "PART I. BIBLIOGRAPHIES AND REFERENCE WORKS" => &[
            "General Bibliographies",
            "Exhibition Checklists",
            "Concordances and Dictionaries",
        ],
        "PART II. EDITIONS OF BLAKE'S WRITINGS" => &[
            "Collected Editions",
            "Facsimiles",
            "Selections and Anthologies",
        ],
        "PART IV. BIOGRAPHIES" => &[
            "Standard Biographies",
            "Memoirs and Recollections",
            "Biographical Essays",
        ],
        "PART VI. GENERAL CRITICISM" => &[
            "Book-Length Studies",
            "Articles and Chapters",
        ],
        "PART VII. STUDIES OF INDIVIDUAL WORKS" => &[
            "Songs of Innocence and of Experience",
            "The Prophetic Books",
            "Minor Prophecies",
        ],
        "PART IX. BLAKE'S INFLUENCE AND REPUTATION" => &[
            "Reception Studies",
            "Blake and Later Writers",
        ],
        _ => &[],
    }
}

pub fn is_canonical_part(name: &str) -> bool {
    PARTS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eleven_parts_intro_first() {
        assert_eq!(PARTS.len(), 11);
        assert_eq!(PARTS[0], "INTRODUCTION");
        assert_eq!(PARTS[4], "PART IV. BIOGRAPHIES");
        assert_eq!(body_parts().len(), 10);
        assert_eq!(body_parts()[0], "PART I. BIBLIOGRAPHIES AND REFERENCE WORKS");
    }

    #[test]
    fn intro_has_six_subheadings() {
        assert_eq!(INTRO_SUBHEADINGS.len(), 6);
        for s in ["Prefatory Material", "Table of Contents", "Guidelines"] {
            assert!(INTRO_SUBHEADINGS.contains(&s));
        }
    }

    #[test]
    fn known_subheadings_only_for_canonical_parts() {
        assert!(!known_subheadings("PART IV. BIOGRAPHIES").is_empty());
        assert!(known_subheadings("PART III. REPRODUCTIONS OF DRAWINGS AND PAINTINGS").is_empty());
        assert!(known_subheadings("not a part").is_empty());
    }

    #[test]
    fn no_duplicate_part_names() {
        let mut seen = std::collections::HashSet::new();
        for p in PARTS {
            assert!(seen.insert(p), "duplicate part {p}");
        }
    }
}
