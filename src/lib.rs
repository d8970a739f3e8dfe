//! Music theory primitives: notes, intervals, scales, chords and progressions,
//! plus a mapping of all of them onto a fretted guitar neck.
//!
//! ```
//! use tonal::{Guitar, Note, Registry, SearchOptions};
//!
//! let registry = Registry::standard().unwrap();
//! let chord = registry.chord("Am7").unwrap();
//! assert_eq!(vec!["A", "C", "E", "G"], chord.note_set().names());
//!
//! let guitar = Guitar::default();
//! let positions = guitar.positions_for(&Note::from_name("C").unwrap(), &SearchOptions::default());
//! assert_eq!(12, positions.len());
//! ```

use thiserror::*;

mod utils;

pub mod chord;
pub mod guitar;
pub mod interval;
pub mod interval_set;
pub mod note;
pub mod parser;
pub mod pitch;
pub mod progression;
pub mod registry;
pub mod scale;

pub use chord::{Chord, ChordKind, ChordQuality};
pub use guitar::{
    FretRange, FretSet, Guitar, GuitarNote, GuitarNoteSet, GuitarString, GuitarVoicing, MatchMode,
    SearchOptions,
};
pub use interval::{Direction, Interval, Quality};
pub use interval_set::IntervalSet;
pub use note::{Letter, Note, NoteSet};
pub use pitch::{Octave, Pitch, PitchClass, PitchClassSet};
pub use progression::{Cadence, CadenceKind, DegreeRef, Progression};
pub use registry::Registry;
pub use scale::{Mode, Scale, ScaleKind, ScaleType};

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TheoryError {
    #[error("Invalid note name {name:?}: {reason}")]
    InvalidNoteName { name: String, reason: String },
    #[error("Invalid interval spec {spec:?}: {reason}")]
    InvalidIntervalSpec { spec: String, reason: String },
    #[error("Unknown scale name {0:?}.")]
    UnknownScaleName(String),
    #[error("Unknown chord quality {0:?}.")]
    UnknownChordQuality(String),
    #[error("Unknown cadence {0:?}.")]
    UnknownCadence(String),
    #[error("Degree {degree} is out of range: expected 1 to {max}.")]
    DegreeOutOfRange { degree: usize, max: usize },
    #[error("Inversion {inversion} is out of range for a chord of {notes} notes.")]
    InversionOutOfRange { inversion: usize, notes: usize },
    #[error("Fret {fret} is out of range: expected 0 to {max}.")]
    FretOutOfRange { fret: i32, max: i32 },
    #[error("Invalid degree reference {notation:?}: {reason}")]
    InvalidDegreeReference { notation: String, reason: String },
    #[error("A guitar needs at least one string.")]
    EmptyTuning,
}

pub type TheoryResult<T> = Result<T, TheoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TheoryError::DegreeOutOfRange { degree: 9, max: 7 };
        assert_eq!("Degree 9 is out of range: expected 1 to 7.", err.to_string());
        let err = TheoryError::UnknownScaleName("bebop".to_owned());
        assert_eq!("Unknown scale name \"bebop\".", err.to_string());
        let err = TheoryError::FretOutOfRange { fret: 30, max: 23 };
        assert_eq!("Fret 30 is out of range: expected 0 to 23.", err.to_string());
    }

    #[test]
    fn test_errors_surface_from_parsing() {
        match Note::from_name("H#") {
            Err(TheoryError::InvalidNoteName { name, reason }) => {
                assert_eq!("H#", name);
                assert!(!reason.is_empty());
            }
            other => panic!("Unexpected {:?}", other),
        }
        match Interval::from_name("9x") {
            Err(TheoryError::InvalidIntervalSpec { .. }) => {}
            other => panic!("Unexpected {:?}", other),
        }
    }
}
