use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing::{debug, instrument, warn};

use crate::domain::{Category, Group, Identifier, Record, RecordSource, Structure};

/// Words that make up generated identifiers, two at a time.
const WORDS: &[&str] = &[
    "Amber", "Apricot", "Azure", "Beige", "Black", "Blue", "Bronze", "Brown", "Cerise", "Coral",
    "Cream", "Crimson", "Cyan", "Denim", "Ebony", "Emerald", "Fawn", "Fern", "Gold", "Green",
    "Grey", "Hazel", "Indigo", "Ivory", "Jade", "Khaki", "Lemon", "Lilac", "Lime", "Magenta",
    "Maroon", "Mauve", "Navy", "Ochre", "Olive", "Orange", "Peach", "Pink", "Plum", "Purple",
    "Red", "Rose", "Ruby", "Rust", "Sand", "Scarlet", "Silver", "Tan", "Teal", "Umber",
    "Violet", "White", "Wine", "Yellow",
];

const MAX_CODE: u64 = 99_999_999;
const FIRST_YEAR: i32 = 2000;
const LAST_YEAR: i32 = 2025;

/// Produces identifiers, codes and dates, and builds whole structures from
/// them.
///
/// Generated identifiers are two capitalised words, such as `Coral Denim`. A
/// built structure has one category per initial of the first word and one
/// group per initial of the second word. Categories, groups and records are
/// each sorted.
#[derive(Debug)]
pub struct Generator {
    rng: StdRng,
}

impl Generator {
    /// A generator that produces the same sequence for the same seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A generator seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// The number of distinct identifiers the generator can produce.
    #[must_use]
    pub const fn capacity() -> usize {
        WORDS.len() * (WORDS.len() - 1)
    }

    /// Builds a structure holding `records` records with unique identifiers.
    ///
    /// If `records` exceeds [`Generator::capacity`], the structure is built
    /// with as many records as there are identifiers.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&mut self, records: usize) -> Structure {
        let wanted = if records > Self::capacity() {
            warn!(
                requested = records,
                capacity = Self::capacity(),
                "not enough distinct identifiers, building a smaller structure"
            );
            Self::capacity()
        } else {
            records
        };

        let mut pairs = BTreeSet::new();
        while pairs.len() < wanted {
            pairs.insert(self.word_pair());
        }

        // category initial -> group initial -> records (sorted by identifier)
        let mut layout: BTreeMap<char, BTreeMap<char, Vec<Record>>> = BTreeMap::new();
        for (first, second) in pairs {
            let Some(id) = compose(first, second) else {
                continue;
            };
            let record = self.record(id);
            layout
                .entry(initial(first))
                .or_default()
                .entry(initial(second))
                .or_default()
                .push(record);
        }

        let structure: Structure = layout
            .into_iter()
            .map(|(category, groups)| {
                Category::with_groups(
                    category,
                    groups
                        .into_iter()
                        .map(|(group, records)| Group::with_records(group, records)),
                )
            })
            .collect();
        debug!(
            categories = structure.categories().len(),
            records = structure.record_count(),
            "built structure"
        );
        structure
    }

    fn word_pair(&mut self) -> (&'static str, &'static str) {
        let mut chosen = WORDS.choose_multiple(&mut self.rng, 2).copied();
        match (chosen.next(), chosen.next()) {
            (Some(first), Some(second)) => (first, second),
            _ => (WORDS[0], WORDS[1]),
        }
    }

    fn date(&mut self) -> NaiveDate {
        let year = self.rng.gen_range(FIRST_YEAR..=LAST_YEAR);
        let month = self.rng.gen_range(1..=12);
        let day = self.rng.gen_range(1..=28);
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RecordSource for Generator {
    fn next_identifier(&mut self) -> Identifier {
        loop {
            let (first, second) = self.word_pair();
            if let Some(id) = compose(first, second) {
                return id;
            }
        }
    }

    fn record(&mut self, id: Identifier) -> Record {
        let code = self.rng.gen_range(1..=MAX_CODE);
        let date = self.date();
        Record::new(id, code, date)
    }
}

fn compose(first: &str, second: &str) -> Option<Identifier> {
    Identifier::new(format!("{first} {second}")).ok()
}

fn initial(word: &str) -> char {
    word.chars().next().unwrap_or('?')
}
