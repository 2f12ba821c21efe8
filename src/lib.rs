//! # chord_tree
//!
//! Identify chord qualities from unordered note sets by stacking thirds on a
//! root, and compute key signatures on the same twelve-pitch-class circle.
//!
//! ## Example
//! ```rust
//! use chord_tree::{identify, key_signature, AccidentalType};
//!
//! fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1) Which triad on C holds C, E and G?
//!     let found = identify("C", ["C", "E", "G"], 3)?;
//!     let solution = found.unique_solution.expect("one match");
//!     assert_eq!(solution.label, "Major");
//!     assert_eq!(solution.chord.as_deref(), Some("C/E/G"));
//!
//!     // 2) C and E alone fit both Major and Augmented
//!     let found = identify("C", ["C", "E"], 3)?;
//!     assert!(found.unique_solution.is_none());
//!
//!     // 3) Key signatures walk the circle of fifths
//!     let key = key_signature("F#", "Major")?;
//!     assert_eq!(key.accidental_count, 6);
//!     assert_eq!(key.accidental_type, AccidentalType::Sharp);
//!
//!     Ok(())
//! }
//! # run().unwrap();
//! ```
//!
//! ## Features
//! - `serde`: derives `Serialize` for result types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

/// Pitch classes and enharmonic spellings.
pub use pitch_class::{interval, Note, NoteError, PitchClass, SEMITONES};

/// Stacked-third tree.
pub use chord_tree::{ChordNode, ChordTree, ChordTreeBuilder, Third};

/// Labeled candidates and query filtering.
pub use catalog::{
    enumerate_candidates, filtered_catalog, labels_for, validate, CatalogSlot, ChordCandidate,
    Query,
};

/// Unique-solution and membership search.
pub use search::{exists, exists_in, solution};

/// Key signatures and scales.
pub use key_signature::{
    count_accidentals, full_scale, list_accidentals, AccidentalType, KeySignature, Mode,
    ModeError,
};

/// Caller-facing entry points.
pub use identify::{
    identify, key_signature, membership, ChordError, Identification, Identifier,
    IdentifierBuilder, LabeledResult,
};

/// Pitch class module.
pub mod pitch_class;

/// Chord tree module.
pub mod chord_tree;

/// Chord catalog module.
pub mod catalog;

/// Search module.
pub mod search;

/// Key signature module.
pub mod key_signature;

/// Identification module.
pub mod identify;
