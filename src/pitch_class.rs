//! Pitch Class
//!
//! The twelve chromatic pitch classes on a fixed circle starting at C, with
//! enharmonic spellings and rotation-based interval arithmetic.
//!
//! Positions never change once a note is resolved; rotating "from" another
//! pitch class is a computation on the index, not a rewrite of the table.

use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// Number of pitch classes on the circle.
pub const SEMITONES: usize = 12;

/// Semitones spanned by a minor third.
pub const MINOR_THIRD: i32 = 3;

/// Semitones spanned by a major third.
pub const MAJOR_THIRD: i32 = 4;

/// Spellings for one position on the circle.
struct Spelling {
    /// Accepted note names, sharp side first.
    names: &'static [&'static str],
    /// Name used when the pitch class appears in a sharp key signature.
    sharp_name: &'static str,
    /// Name used when the pitch class appears in a flat key signature.
    flat_name: &'static str,
}

const SPELLINGS: [Spelling; SEMITONES] = [
    Spelling { names: &["C"],        sharp_name: "B#", flat_name: "C" },
    Spelling { names: &["C#", "Db"], sharp_name: "C#", flat_name: "Db" },
    Spelling { names: &["D"],        sharp_name: "D",  flat_name: "D" },
    Spelling { names: &["D#", "Eb"], sharp_name: "D#", flat_name: "Eb" },
    Spelling { names: &["E"],        sharp_name: "E",  flat_name: "Fb" },
    Spelling { names: &["F"],        sharp_name: "E#", flat_name: "F" },
    Spelling { names: &["F#", "Gb"], sharp_name: "F#", flat_name: "Gb" },
    Spelling { names: &["G"],        sharp_name: "G",  flat_name: "G" },
    Spelling { names: &["G#", "Ab"], sharp_name: "G#", flat_name: "Ab" },
    Spelling { names: &["A"],        sharp_name: "A",  flat_name: "A" },
    Spelling { names: &["A#", "Bb"], sharp_name: "A#", flat_name: "Bb" },
    Spelling { names: &["B"],        sharp_name: "B",  flat_name: "Cb" },
];

/// Errors when resolving note names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteError {
    /// The name is not one of the recognized spellings.
    #[error("unrecognized note name `{name}`")]
    UnrecognizedNote {
        /// The rejected input.
        name: String,
    },
}

/// One of the twelve chromatic pitch classes, identified by its position on
/// the circle (C = 0, C#/Db = 1, ..., B = 11).
///
/// Equality is positional: `C#` and `Db` resolve to the same value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PitchClass {
    position: u8,
}

impl PitchClass {
    /// Every pitch class in circle order, starting at C.
    pub const ALL: [PitchClass; SEMITONES] = {
        let mut all = [PitchClass { position: 0 }; SEMITONES];
        let mut i = 0;
        while i < SEMITONES {
            all[i] = PitchClass { position: i as u8 };
            i += 1;
        }
        all
    };

    /// Look up a note name among the accepted spellings.
    ///
    /// Only natural letters and a single `#` or `b` are recognized; anything
    /// else yields [`NoteError::UnrecognizedNote`].
    pub fn resolve(name: &str) -> Result<PitchClass, NoteError> {
        SPELLINGS
            .iter()
            .position(|s| s.names.contains(&name))
            .map(PitchClass::from_position)
            .ok_or_else(|| NoteError::UnrecognizedNote {
                name: name.to_string(),
            })
    }

    /// Pitch class at `position`, wrapping modulo 12.
    pub const fn from_position(position: usize) -> PitchClass {
        PitchClass {
            position: (position % SEMITONES) as u8,
        }
    }

    /// Position on the fixed circle, `0..12`.
    pub const fn position(self) -> usize {
        self.position as usize
    }

    /// Accepted spellings for this pitch class, sharp side first.
    pub fn alternates(self) -> &'static [&'static str] {
        self.spelling().names
    }

    /// Sharp-side spelling (`C#` for C#/Db).
    pub fn sharp_side(self) -> &'static str {
        let names = self.spelling().names;
        names[0]
    }

    /// Flat-side spelling (`Db` for C#/Db).
    pub fn flat_side(self) -> &'static str {
        let names = self.spelling().names;
        names[names.len() - 1]
    }

    /// Spelling inside a sharp key signature, which may be theoretical (`E#`, `B#`).
    pub fn sharp_name(self) -> &'static str {
        self.spelling().sharp_name
    }

    /// Spelling inside a flat key signature, which may be theoretical (`Cb`, `Fb`).
    pub fn flat_name(self) -> &'static str {
        self.spelling().flat_name
    }

    /// Rotate forward `steps` semitones, wrapping modulo 12. Negative steps rotate backward.
    pub fn step(self, steps: i32) -> PitchClass {
        let pos = (self.position as i32 + steps).rem_euclid(SEMITONES as i32);
        PitchClass::from_position(pos as usize)
    }

    /// The pitch class a major third (four semitones) above.
    pub fn major_third_above(self) -> PitchClass {
        self.step(MAJOR_THIRD)
    }

    /// The pitch class a minor third (three semitones) above.
    pub fn minor_third_above(self) -> PitchClass {
        self.step(MINOR_THIRD)
    }

    /// Signed distance from `other` to `self` on the fixed circle.
    ///
    /// This is `position(self) - position(other)`, in `-11..=11`. The sign
    /// only says which one sits further along the C-based ordering; octave is
    /// not tracked, so it is not a statement about pitch height.
    pub fn interval_from(self, other: PitchClass) -> i32 {
        self.position as i32 - other.position as i32
    }

    /// Forward distance from `origin` to `self`, `0..12`: the position this
    /// pitch class would have on a circle rotated to start at `origin`.
    pub fn rotated_from(self, origin: PitchClass) -> usize {
        self.step(-(origin.position as i32)).position()
    }

    fn spelling(self) -> &'static Spelling {
        &SPELLINGS[self.position as usize]
    }
}

impl FromStr for PitchClass {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PitchClass::resolve(s)
    }
}

impl Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alternates().join("/"))
    }
}

/// Signed circular distance from `b` to `a`; see [`PitchClass::interval_from`].
pub fn interval(a: PitchClass, b: PitchClass) -> i32 {
    a.interval_from(b)
}

/// A pitch class together with the spelling it is displayed with.
///
/// Two notes are equal when their pitch classes are, whatever the spelling.
#[derive(Debug, Copy, Clone)]
pub struct Note {
    pitch: PitchClass,
    name: &'static str,
}

impl Note {
    /// Resolve `name` and keep that spelling for display.
    pub fn parse(name: &str) -> Result<Note, NoteError> {
        let pitch = PitchClass::resolve(name)?;
        let name = pitch
            .alternates()
            .iter()
            .copied()
            .find(|n| *n == name)
            .unwrap_or_else(|| pitch.sharp_side());
        Ok(Note { pitch, name })
    }

    /// `pitch` spelled on the sharp side.
    pub fn sharp(pitch: PitchClass) -> Note {
        Note {
            pitch,
            name: pitch.sharp_side(),
        }
    }

    /// `pitch` spelled on the flat side.
    pub fn flat(pitch: PitchClass) -> Note {
        Note {
            pitch,
            name: pitch.flat_side(),
        }
    }

    /// The underlying pitch class.
    pub fn pitch(&self) -> PitchClass {
        self.pitch
    }

    /// The display spelling.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Major third above, spelled on the sharp side.
    pub fn major_third(&self) -> Note {
        Note::sharp(self.pitch.major_third_above())
    }

    /// Minor third above, spelled on the flat side.
    pub fn minor_third(&self) -> Note {
        Note::flat(self.pitch.minor_third_above())
    }

    /// Next semitone up, spelled on the sharp side.
    pub fn next_semitone_sharp(&self) -> Note {
        Note::sharp(self.pitch.step(1))
    }

    /// Next semitone up, spelled on the flat side.
    pub fn next_semitone_flat(&self) -> Note {
        Note::flat(self.pitch.step(1))
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.pitch == other.pitch
    }
}

impl Eq for Note {}

impl FromStr for Note {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Note::parse(s)
    }
}

impl Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
