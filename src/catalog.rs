//! Chord Catalog
//!
//! Flattens a [`ChordTree`] into labeled chord candidates and filters them
//! against a set of query notes.
//!
//! Labels are positional: the n-th candidate in minor-first traversal order
//! gets the n-th label for the tree's depth. Reordering the traversal would
//! silently mislabel every chord.

use crate::chord_tree::ChordTree;
use crate::pitch_class::{Note, NoteError, PitchClass};
use std::fmt::{self, Display};

/// Smallest depth with a label table.
pub const MIN_LABELED_DEPTH: usize = 1;

/// Largest depth with a label table.
pub const MAX_LABELED_DEPTH: usize = 4;

/// Separator used when rendering a candidate's notes.
pub const DEFAULT_SEPARATOR: &str = "/";

/// Quality labels per depth, in traversal order.
const LABELS: [&[&str]; MAX_LABELED_DEPTH + 1] = [
    &[],
    &["Note"],
    &["Minor 3rd", "Major 3rd"],
    &["Diminished", "Minor", "Major", "Augmented"],
    &[
        "Diminished 7th",
        "Diminished Minor 7th",
        "Minor 7th",
        "Minor Major 7th",
        "Dominant 7th",
        "Major 7th",
        "Augmented Major 7th",
        "Augmented 7th",
    ],
];

/// Quality labels for `depth` in traversal order; empty for unsupported depths.
pub fn labels_for(depth: usize) -> &'static [&'static str] {
    LABELS.get(depth).copied().unwrap_or(&[])
}

/// True when `depth` has a label table.
pub fn is_labeled_depth(depth: usize) -> bool {
    (MIN_LABELED_DEPTH..=MAX_LABELED_DEPTH).contains(&depth)
}

/// A set of notes to look for, compared by pitch class.
///
/// Duplicates collapse into one requirement. Names that fail to resolve are
/// remembered so the query can never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pitches: Vec<PitchClass>,
    unrecognized: Vec<String>,
}

impl Query {
    /// Build a query, recording unrecognized names instead of failing.
    pub fn lenient<I, S>(names: I) -> Query
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut query = Query::default();
        for name in names {
            let name = name.as_ref();
            match PitchClass::resolve(name) {
                Ok(pc) => query.insert(pc),
                Err(_) => query.unrecognized.push(name.to_string()),
            }
        }
        query
    }

    /// Build a query, failing on the first unrecognized name.
    pub fn parse<I, S>(names: I) -> Result<Query, NoteError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut query = Query::default();
        for name in names {
            query.insert(PitchClass::resolve(name.as_ref())?);
        }
        Ok(query)
    }

    /// Query over already resolved pitch classes.
    pub fn from_pitches<I: IntoIterator<Item = PitchClass>>(pitches: I) -> Query {
        let mut query = Query::default();
        pitches.into_iter().for_each(|pc| query.insert(pc));
        query
    }

    fn insert(&mut self, pc: PitchClass) {
        if !self.pitches.contains(&pc) {
            self.pitches.push(pc);
        }
    }

    /// Distinct pitch classes, in first-seen order.
    pub fn pitches(&self) -> &[PitchClass] {
        &self.pitches
    }

    /// Names that did not resolve.
    pub fn unrecognized(&self) -> &[String] {
        &self.unrecognized
    }

    /// Whether `pc` is one of the queried pitch classes.
    pub fn contains(&self, pc: PitchClass) -> bool {
        self.pitches.contains(&pc)
    }

    /// True when no pitch classes were given.
    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// Number of distinct pitch classes.
    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    /// A query can match only when it is non-empty and fully resolved.
    pub fn is_matchable(&self) -> bool {
        !self.pitches.is_empty() && self.unrecognized.is_empty()
    }
}

/// One chord read off the tree: a root path plus its positional label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordCandidate {
    label: Option<&'static str>,
    notes: Vec<Note>,
}

impl ChordCandidate {
    /// Quality label; `None` when the depth has no label table.
    pub fn label(&self) -> Option<&'static str> {
        self.label
    }

    /// Notes from the root upward.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Pitch classes from the root upward.
    pub fn pitches(&self) -> impl Iterator<Item = PitchClass> + '_ {
        self.notes.iter().map(Note::pitch)
    }

    /// Whether `pc` appears anywhere on the path.
    pub fn contains(&self, pc: PitchClass) -> bool {
        self.pitches().any(|p| p == pc)
    }

    /// Note names joined by `separator`.
    pub fn render(&self, separator: &str) -> String {
        self.notes
            .iter()
            .map(Note::name)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl Display for ChordCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            Some(label) => write!(f, "{label}: {}", self.render(DEFAULT_SEPARATOR)),
            None => f.write_str(&self.render(DEFAULT_SEPARATOR)),
        }
    }
}

/// Every candidate chord in the tree, in minor-first order.
///
/// A tree of depth `d` yields `2^(d-1)` candidates of `d` notes each: the
/// root plus `d - 1` stacked thirds. Depth 0 yields none.
pub fn enumerate_candidates(tree: &ChordTree) -> Vec<ChordCandidate> {
    let labels = labels_for(tree.depth());
    tree.prefixes(tree.depth())
        .into_iter()
        .enumerate()
        .map(|(i, notes)| ChordCandidate {
            label: labels.get(i).copied(),
            notes,
        })
        .collect()
}

/// True when every queried pitch class lies on the candidate's path.
///
/// Order and path length do not matter. An empty query or one with
/// unrecognized names never matches.
pub fn validate(candidate: &ChordCandidate, query: &Query) -> bool {
    query.is_matchable() && query.pitches().iter().all(|&pc| candidate.contains(pc))
}

/// One traversal slot of the filtered catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSlot {
    /// Quality label for the slot, if the depth has one.
    pub label: Option<&'static str>,
    /// The candidate when it matched the query.
    pub candidate: Option<ChordCandidate>,
}

impl CatalogSlot {
    /// Whether this slot holds a match.
    pub fn is_match(&self) -> bool {
        self.candidate.is_some()
    }
}

/// Candidates in slot order, each kept only if it matches `query`.
pub fn filtered_catalog(tree: &ChordTree, query: &Query) -> Vec<CatalogSlot> {
    enumerate_candidates(tree)
        .into_iter()
        .map(|candidate| CatalogSlot {
            label: candidate.label(),
            candidate: validate(&candidate, query).then_some(candidate),
        })
        .collect()
}
