//! Key Signature
//!
//! Accidental counts, accidental names and seven-note scales for major and
//! minor keys, computed by walking the circle of fifths.

use crate::pitch_class::PitchClass;
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// Semitones per step clockwise around the circle of fifths.
const FIFTH: i32 = 7;

/// Semitones per step counter-clockwise (a fourth up).
const FOURTH: i32 = 5;

/// At most one accidental per letter.
const MAX_ACCIDENTALS: usize = 7;

/// Natural letters in scale order.
const LETTERS: [&str; 7] = ["C", "D", "E", "F", "G", "A", "B"];

/// Major tonics spelled with sharps (C included, with none).
const SHARP_MAJOR_TONICS: [usize; 7] = [0, 7, 2, 9, 4, 11, 6];

/// Minor tonics spelled with sharps (A included, with none).
const SHARP_MINOR_TONICS: [usize; 7] = [9, 4, 11, 6, 1, 8, 3];

/// Errors when parsing a mode name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    /// The name is neither "Major" nor "Minor".
    #[error("unrecognized mode `{name}`, expected `Major` or `Minor`")]
    UnrecognizedMode {
        /// The rejected input.
        name: String,
    },
}

/// Supported scale modes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Mode {
    /// Major (Ionian), counted from C
    Major,
    /// Natural minor (Aeolian), counted from A
    Minor,
}

impl Mode {
    /// Tonic of the key with no accidentals in this mode.
    pub fn natural_tonic(self) -> PitchClass {
        match self {
            Mode::Major => PitchClass::from_position(0),
            Mode::Minor => PitchClass::from_position(9),
        }
    }

    fn sharp_tonics(self) -> &'static [usize] {
        match self {
            Mode::Major => &SHARP_MAJOR_TONICS,
            Mode::Minor => &SHARP_MINOR_TONICS,
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "major" => Ok(Mode::Major),
            "minor" => Ok(Mode::Minor),
            _ => Err(ModeError::UnrecognizedMode {
                name: s.to_string(),
            }),
        }
    }
}

/// Whether a key signature uses sharps or flats
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AccidentalType {
    /// Sharps, added a fifth apart starting at F#
    Sharp,
    /// Flats, added a fourth apart starting at Bb
    Flat,
}

impl AccidentalType {
    /// Step around the circle of fifths in this direction.
    fn step(self) -> i32 {
        match self {
            AccidentalType::Sharp => FIFTH,
            AccidentalType::Flat => FOURTH,
        }
    }

    /// First accidental added in this direction.
    fn first_accidental(self) -> PitchClass {
        match self {
            AccidentalType::Sharp => PitchClass::from_position(6),
            AccidentalType::Flat => PitchClass::from_position(10),
        }
    }

    fn spell(self, pc: PitchClass) -> &'static str {
        match self {
            AccidentalType::Sharp => pc.sharp_name(),
            AccidentalType::Flat => pc.flat_name(),
        }
    }
}

impl Display for AccidentalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Number and kind of accidentals in the key of `tonic` in `mode`.
///
/// Keys with no accidentals report `(0, Sharp)`. Enharmonic keys resolve to
/// the spelling with fewer accidentals (Db major rather than C# major, F#
/// major rather than Gb major, D# minor rather than Eb minor).
pub fn count_accidentals(tonic: PitchClass, mode: Mode) -> (usize, AccidentalType) {
    let kind = if mode.sharp_tonics().contains(&tonic.position()) {
        AccidentalType::Sharp
    } else {
        AccidentalType::Flat
    };

    let mut current = mode.natural_tonic();
    let mut count = 0;
    // fifths and fourths both generate all twelve classes
    while current != tonic {
        current = current.step(kind.step());
        count += 1;
    }
    (count, kind)
}

/// The first `count` accidentals of a key signature, in signature order.
///
/// `count` is capped at seven.
pub fn list_accidentals(count: usize, kind: AccidentalType) -> Vec<&'static str> {
    let mut current = kind.first_accidental();
    let mut names = Vec::with_capacity(count.min(MAX_ACCIDENTALS));
    for _ in 0..count.min(MAX_ACCIDENTALS) {
        names.push(kind.spell(current));
        current = current.step(kind.step());
    }
    names
}

/// The seven notes of the `mode` scale on `tonic`.
///
/// The tonic's letter comes from its flat-side spelling in flat keys and its
/// sharp-side spelling otherwise; each letter then takes the accidental from
/// the key signature when one applies to it.
pub fn full_scale(tonic: PitchClass, mode: Mode) -> Vec<&'static str> {
    let (count, kind) = count_accidentals(tonic, mode);
    let accidentals = list_accidentals(count, kind);
    let spelled = match kind {
        AccidentalType::Sharp => tonic.sharp_side(),
        AccidentalType::Flat => tonic.flat_side(),
    };
    let start = LETTERS
        .iter()
        .position(|letter| spelled.starts_with(letter))
        .unwrap_or(0);

    (0..LETTERS.len())
        .map(|i| {
            let letter = LETTERS[(start + i) % LETTERS.len()];
            accidentals
                .iter()
                .copied()
                .find(|name| name.starts_with(letter))
                .unwrap_or(letter)
        })
        .collect()
}

/// Complete key signature for one tonic and mode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KeySignature {
    /// Key mode.
    pub mode: Mode,
    /// Number of sharps or flats.
    pub accidental_count: usize,
    /// Sharps or flats.
    pub accidental_type: AccidentalType,
    /// Accidentals in signature order.
    pub accidentals: Vec<&'static str>,
    /// The seven scale notes from the tonic.
    pub scale: Vec<&'static str>,
}

impl KeySignature {
    /// Compute the key signature of `tonic` in `mode`.
    pub fn new(tonic: PitchClass, mode: Mode) -> KeySignature {
        let (accidental_count, accidental_type) = count_accidentals(tonic, mode);
        KeySignature {
            mode,
            accidental_count,
            accidental_type,
            accidentals: list_accidentals(accidental_count, accidental_type),
            scale: full_scale(tonic, mode),
        }
    }
}

impl Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tonic = self.scale.first().copied().unwrap_or("?");
        write!(
            f,
            "{tonic} {}: {} {}(s) [{}]",
            self.mode,
            self.accidental_count,
            self.accidental_type,
            self.accidentals.join(" ")
        )
    }
}
