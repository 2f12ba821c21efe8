//! Identify
//!
//! Caller-facing entry points: name the chord a note set spells, test note
//! groupings for membership, and compute key signatures.

use crate::catalog::{
    filtered_catalog, is_labeled_depth, Query, DEFAULT_SEPARATOR, MAX_LABELED_DEPTH,
    MIN_LABELED_DEPTH,
};
use crate::chord_tree::{ChordTree, DEFAULT_DEPTH};
use crate::key_signature::{KeySignature, Mode, ModeError};
use crate::pitch_class::{NoteError, PitchClass};
use crate::search::{exists_in, solution};
use std::fmt::{self, Display};
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors when identifying chords or key signatures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordError {
    /// A root or query note is not a recognized spelling.
    #[error(transparent)]
    UnrecognizedNote(#[from] NoteError),

    /// The depth has no chord-quality labels.
    #[error("unsupported depth {depth}, expected {min}..={max}")]
    UnsupportedDepth {
        /// The requested depth.
        depth: usize,
        /// Smallest labeled depth.
        min: usize,
        /// Largest labeled depth.
        max: usize,
    },

    /// The query contained no notes.
    #[error("no notes given")]
    EmptyQuery,

    /// A mode name is neither major nor minor.
    #[error(transparent)]
    UnrecognizedMode(#[from] ModeError),
}

/// A traversal slot paired with its label.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LabeledResult {
    /// Chord quality.
    pub label: &'static str,
    /// Rendered chord when the slot matched.
    pub chord: Option<String>,
}

/// The outcome of [`Identifier::identify`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Identification {
    /// Every slot for the depth, in label order.
    pub labeled_results: Vec<LabeledResult>,
    /// The single matching slot, if exactly one matched.
    pub unique_solution: Option<LabeledResult>,
}

impl Identification {
    /// Slots that matched.
    pub fn matches(&self) -> impl Iterator<Item = &LabeledResult> {
        self.labeled_results.iter().filter(|r| r.chord.is_some())
    }
}

impl Display for Identification {
    /// One `Label: chord` line per matched slot.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in self.matches() {
            if let Some(chord) = &result.chord {
                writeln!(f, "{}: {chord}", result.label)?;
            }
        }
        Ok(())
    }
}

/// Builder for [`Identifier`] to customize depth and separator
pub struct IdentifierBuilder {
    depth: usize,
    separator: String,
}

impl IdentifierBuilder {
    /// Create a new builder with depth = 3 (triads) and separator = "/"
    pub fn new() -> Self {
        IdentifierBuilder {
            depth: DEFAULT_DEPTH,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Set the tree depth (1..=4).
    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Set the separator placed between rendered note names.
    pub fn separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_string();
        self
    }

    /// Build the [`Identifier`], rejecting depths without labels.
    pub fn build(self) -> Result<Identifier, ChordError> {
        check_depth(self.depth)?;
        Ok(Identifier {
            depth: self.depth,
            separator: self.separator,
        })
    }
}

impl Default for IdentifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Chord identification at a fixed depth
#[derive(Debug, Clone)]
pub struct Identifier {
    depth: usize,
    separator: String,
}

impl Identifier {
    /// Return a builder to customize depth and separator
    pub fn builder() -> IdentifierBuilder {
        IdentifierBuilder::new()
    }

    /// Identifier for `depth` with the default separator.
    pub fn with_depth(depth: usize) -> Result<Identifier, ChordError> {
        IdentifierBuilder::new().depth(depth).build()
    }

    /// Configured depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Name the chord qualities rooted at `root` that contain every note.
    ///
    /// Returns:
    /// - `Err(UnrecognizedNote)` if the root or any note is not a known spelling.
    /// - `Err(EmptyQuery)` if `notes` is empty.
    #[instrument(level = "debug", skip(self, notes))]
    pub fn identify<I, S>(&self, root: &str, notes: I) -> Result<Identification, ChordError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let query = parse_query(notes)?;
        let tree = ChordTree::new(root, self.depth)?;

        let labeled_results: Vec<LabeledResult> = filtered_catalog(&tree, &query)
            .into_iter()
            .map(|slot| LabeledResult {
                label: slot.label.unwrap_or_default(),
                chord: slot.candidate.map(|c| c.render(&self.separator)),
            })
            .collect();

        let unique_solution = solution(&tree, &query).map(|c| LabeledResult {
            label: c.label().unwrap_or_default(),
            chord: Some(c.render(&self.separator)),
        });

        debug!(
            matched = labeled_results.iter().filter(|r| r.chord.is_some()).count(),
            unique = unique_solution.is_some(),
            "identified"
        );
        Ok(Identification {
            labeled_results,
            unique_solution,
        })
    }

    /// Whether the note grouping appears along some branch of the tree on `root`.
    #[instrument(level = "debug", skip(self, notes))]
    pub fn membership<I, S>(&self, notes: I, root: &str) -> Result<bool, ChordError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let query = parse_query(notes)?;
        let tree = ChordTree::new(root, self.depth)?;
        Ok(exists_in(&tree, &query))
    }
}

fn check_depth(depth: usize) -> Result<(), ChordError> {
    if is_labeled_depth(depth) {
        Ok(())
    } else {
        Err(ChordError::UnsupportedDepth {
            depth,
            min: MIN_LABELED_DEPTH,
            max: MAX_LABELED_DEPTH,
        })
    }
}

fn parse_query<I, S>(notes: I) -> Result<Query, ChordError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let query = Query::parse(notes)?;
    if query.is_empty() {
        return Err(ChordError::EmptyQuery);
    }
    Ok(query)
}

/// Identify the chord spelled by `notes` over `root`, stacking `depth` levels.
pub fn identify<I, S>(root: &str, notes: I, depth: usize) -> Result<Identification, ChordError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Identifier::with_depth(depth)?.identify(root, notes)
}

/// Whether `notes` appear together along a branch of the `depth` tree on `root`.
pub fn membership<I, S>(notes: I, root: &str, depth: usize) -> Result<bool, ChordError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Identifier::with_depth(depth)?.membership(notes, root)
}

/// Key signature of `root` in `mode` (`"Major"` or `"Minor"`).
#[instrument(level = "debug")]
pub fn key_signature(root: &str, mode: &str) -> Result<KeySignature, ChordError> {
    let tonic = PitchClass::resolve(root)?;
    let mode: Mode = mode.parse()?;
    let signature = KeySignature::new(tonic, mode);
    debug!(%signature, "computed key signature");
    Ok(signature)
}
