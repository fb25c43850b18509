//! Deterministic filler-record generation. Every field is a round-robin
//! pick from a fixed pool, keyed by the record's running index with
//! decorrelated strides, so a given index always produces the same record
//! and (title, authors, year) triples do not repeat within any realistic
//! generation run.

use super::dedup;
use crate::record::{EntryIdSeq, Record};
use crate::taxonomy;

const WORKS: [&str; 10] = [
    "Songs of Innocence",
    "Songs of Experience",
    "The Marriage of Heaven and Hell",
    "Jerusalem",
    "Milton",
    "The Book of Urizen",
    "The Four Zoas",
    "Visions of the Daughters of Albion",
    "America a Prophecy",
    "Europe a Prophecy",
];

const THEMES: [&str; 8] = [
    "prophetic vision",
    "illuminated printing",
    "religious imagination",
    "political radicalism",
    "pastoral innocence",
    "apocalyptic imagery",
    "artistic technique",
    "mythological symbolism",
];

const SUBJECTS: [&str; 6] = [
    "William Blake",
    "Blake's Mythology",
    "Blake's Engravings",
    "The Illuminated Books",
    "Blake's Reception",
    "Blake and His Circle",
];

const SCHOLARS: [&str; 8] = [
    "Morton D. Paley",
    "Kathleen Raine",
    "David Bindman",
    "Robert N. Essick",
    "Joseph Viscomi",
    "Harold Bloom",
    "E. P. Thompson",
    "Jean H. Hagstrum",
];

const INSTITUTIONS: [&str; 6] = [
    "Oxford University Press",
    "Cambridge University Press",
    "Princeton University Press",
    "Yale University Press",
    "University of California Press",
    "Clarendon Press",
];

const JOURNALS: [&str; 6] = [
    "Blake/An Illustrated Quarterly",
    "Studies in Romanticism",
    "PMLA",
    "Modern Philology",
    "The Review of English Studies",
    "Eighteenth-Century Studies",
];

const CITIES: [&str; 5] = ["London", "Oxford", "New York", "Princeton", "Cambridge"];

/// Fully deterministic record for a generation index. The year stride (143)
/// is coprime to the 320-step title cycle, which keeps the identifying
/// triple unique far beyond any plausible threshold.
pub fn template_record(index: usize, seq: &mut EntryIdSeq) -> Record {
    let work = WORKS[index % WORKS.len()];
    let theme = THEMES[(index / 10) % THEMES.len()];
    let subject = SUBJECTS[(index * 3) % SUBJECTS.len()];
    let scholar = SCHOLARS[(index * 5) % SCHOLARS.len()];
    let institution = INSTITUTIONS[(index * 7) % INSTITUTIONS.len()];
    let journal = JOURNALS[(index * 11) % JOURNALS.len()];
    let city = CITIES[(index * 13) % CITIES.len()];
    let year = (1850 + (index % 143)).to_string();

    let title = match (index / 80) % 4 {
        0 => format!("The {} of {}: A Critical Study", capitalize(theme), work),
        1 => format!("{} and the Question of {}", subject, theme),
        2 => format!("Reading {} in the Light of {}", work, theme),
        _ => format!("Annotations on {}: {}", work, capitalize(theme)),
    };

    // Year, work and theme all land inside the 80-char dedup fingerprint.
    let content = format!(
        "{}: {} examined through {}, with a review of earlier scholarship on {} \
         and its place in Blake studies.",
        year, work, theme, subject
    );

    let publication = match index % 3 {
        0 => format!(
            "{} {}, no. {} ({}): {}-{}",
            journal,
            10 + (index % 40),
            1 + (index % 4),
            year,
            1 + (index % 300),
            16 + (index % 300) + (index % 20),
        ),
        1 => format!("{}: {}, {}", city, institution, year),
        _ => format!(
            "In Essays on {}, edited by {}. {}: {}, {}",
            subject, scholar, city, institution, year
        ),
    };

    let chapter = taxonomy::body_parts()[index % taxonomy::body_parts().len()];
    let subheading = taxonomy::known_subheadings(chapter).first().map(|s| s.to_string());
    let category = dedup::classify(&title, &content);

    Record {
        id: seq.next_id(scholar),
        title,
        authors: scholar.to_string(),
        year,
        publication,
        content,
        category,
        chapter: Some(chapter.to_string()),
        subheading,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
