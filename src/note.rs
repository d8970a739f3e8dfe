use crate::interval::{Direction, Interval};
use crate::parser::{parse_complete, parse_note, parse_note_list};
use crate::pitch::{Octave, Pitch, PitchClass, PitchClassSet, DEFAULT_OCTAVE};
use crate::utils::wrap_octave;
use crate::{TheoryError, TheoryResult};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const fn all() -> &'static [Letter] {
        &[
            Letter::C,
            Letter::D,
            Letter::E,
            Letter::F,
            Letter::G,
            Letter::A,
            Letter::B,
        ]
    }
    pub const fn index(&self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }
    pub const fn from_index(raw: i32) -> Letter {
        match raw.rem_euclid(7) {
            0 => Letter::C,
            1 => Letter::D,
            2 => Letter::E,
            3 => Letter::F,
            4 => Letter::G,
            5 => Letter::A,
            // Always 6
            _ => Letter::B,
        }
    }
    pub const fn natural(&self) -> PitchClass {
        match self {
            Letter::C => PitchClass::C,
            Letter::D => PitchClass::D,
            Letter::E => PitchClass::E,
            Letter::F => PitchClass::F,
            Letter::G => PitchClass::G,
            Letter::A => PitchClass::A,
            Letter::B => PitchClass::B,
        }
    }
    pub const fn as_char(&self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

/// Sharp spelling used whenever a note is built from a bare pitch.
const fn sharp_spelling(class: PitchClass) -> (Letter, i8) {
    match class {
        PitchClass::C => (Letter::C, 0),
        PitchClass::Cs => (Letter::C, 1),
        PitchClass::D => (Letter::D, 0),
        PitchClass::Ds => (Letter::D, 1),
        PitchClass::E => (Letter::E, 0),
        PitchClass::F => (Letter::F, 0),
        PitchClass::Fs => (Letter::F, 1),
        PitchClass::G => (Letter::G, 0),
        PitchClass::Gs => (Letter::G, 1),
        PitchClass::A => (Letter::A, 0),
        PitchClass::As => (Letter::A, 1),
        PitchClass::B => (Letter::B, 0),
    }
}

/// A spelled note: letter, accidental offset and an optional octave.
///
/// Equality compares spelling, so `C#` and `Db` are different notes that share a
/// pitch class; use [`Note::is_enharmonic`] to compare by sound.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Note {
    letter: Letter,
    accidental: i8,
    octave: Option<Octave>,
}

impl Note {
    pub const fn new(letter: Letter, accidental: i8, octave: Option<Octave>) -> Self {
        Note {
            letter,
            accidental,
            octave,
        }
    }

    pub fn from_name(name: &str) -> TheoryResult<Note> {
        parse_complete(name.trim(), parse_note).map_err(|reason| TheoryError::InvalidNoteName {
            name: name.to_owned(),
            reason,
        })
    }

    pub const fn from_pitch_class(class: PitchClass) -> Note {
        let (letter, accidental) = sharp_spelling(class);
        Note::new(letter, accidental, None)
    }

    pub const fn from_pitch(pitch: Pitch) -> Note {
        let (letter, accidental) = sharp_spelling(pitch.pitch_class());
        Note::new(letter, accidental, Some(pitch.octave()))
    }

    pub const fn letter(&self) -> Letter {
        self.letter
    }
    pub const fn accidental(&self) -> i8 {
        self.accidental
    }
    pub const fn octave(&self) -> Option<Octave> {
        self.octave
    }
    pub const fn with_octave(self, octave: Option<Octave>) -> Self {
        Note { octave, ..self }
    }

    pub const fn pitch_class(&self) -> PitchClass {
        self.letter.natural().shift(self.accidental as i32)
    }

    /// Absolute pitch, placing octave-less notes in [`DEFAULT_OCTAVE`].
    pub const fn pitch(&self) -> Pitch {
        let octave = match self.octave {
            Some(octave) => octave,
            None => DEFAULT_OCTAVE,
        };
        Pitch::from_parts(self.letter.natural(), octave).transpose(self.accidental as i32)
    }

    pub fn is_enharmonic(&self, other: &Note) -> bool {
        self.pitch_class() == other.pitch_class()
    }

    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Moves the note by `interval`, keeping the letter distance of the interval number
    /// so that `C` up a `3m` is `Eb` and not `D#`.
    pub fn transpose_by(&self, interval: Interval, direction: Direction) -> Note {
        let steps = i32::try_from(interval.number() - 1).unwrap_or(i32::MAX);
        let semitones = i32::try_from(interval.semitones()).unwrap_or(i32::MAX);
        let (steps, semitones) = match direction {
            Direction::Up => (steps, semitones),
            Direction::Down => (-steps, -semitones),
        };
        let raw_index = self.letter.index().saturating_add(steps);
        let letter = Letter::from_index(raw_index);
        let target = self.pitch().transpose(semitones);
        match self.octave {
            Some(octave) => {
                let octave = octave.shift(raw_index.div_euclid(7));
                let natural = Pitch::from_parts(letter.natural(), octave);
                let accidental = natural.semitones_to(target);
                Note::new(letter, accidental as i8, Some(octave))
            }
            None => {
                let offset = wrap_octave(natural_distance(letter, target)) as i8;
                let accidental = if offset > 6 { offset - 12 } else { offset };
                Note::new(letter, accidental, None)
            }
        }
    }

    pub fn transpose_up(&self, interval: Interval) -> Note {
        self.transpose_by(interval, Direction::Up)
    }

    /// Chromatic move by a raw semitone count, respelled with sharps.
    pub fn transpose_by_semitones(&self, semitones: i32) -> Note {
        match self.octave {
            Some(_) => Note::from_pitch(self.pitch().transpose(semitones)),
            None => Note::from_pitch_class(self.pitch_class().shift(semitones)),
        }
    }

    /// Interval measured upward from `self` until reaching `other`'s pitch class.
    ///
    /// `D.difference(C)` is a `7m`: ten semitones up from D lands on C.
    pub fn difference(&self, other: &Note) -> Interval {
        let semitones = self.pitch_class().distance_up(other.pitch_class());
        Interval::from_semitones(semitones as u32)
    }

    /// Interval measured upward from `other` until reaching `self`; the mirror of
    /// [`Note::difference`], so `C.interval_to(D)` spans ten semitones.
    pub fn interval_to(&self, other: &Note) -> Interval {
        other.difference(self)
    }
}

fn natural_distance(letter: Letter, target: Pitch) -> i32 {
    target.pitch_class().as_u8() as i32 - letter.natural().as_u8() as i32
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter.as_char())?;
        let mark = if self.accidental > 0 { "#" } else { "b" };
        for _ in 0..self.accidental.unsigned_abs() {
            f.write_str(mark)?;
        }
        if let Some(octave) = self.octave {
            write!(f, "{}", octave.as_raw())?;
        }
        Ok(())
    }
}

impl FromStr for Note {
    type Err = TheoryError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Note::from_name(s)
    }
}

/// An ordered collection of notes, such as the tones of a chord or a tuning.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct NoteSet {
    notes: Vec<Note>,
}

impl NoteSet {
    pub fn new(notes: Vec<Note>) -> Self {
        NoteSet { notes }
    }

    /// Parses names separated by whitespace, commas or dashes: `"C E G"`, `"C-E-G"`.
    pub fn from_names(names: &str) -> TheoryResult<NoteSet> {
        parse_complete(names.trim(), parse_note_list)
            .map(NoteSet::new)
            .map_err(|reason| TheoryError::InvalidNoteName {
                name: names.to_owned(),
                reason,
            })
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
    pub fn len(&self) -> usize {
        self.notes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }
    pub fn first(&self) -> Option<&Note> {
        self.notes.first()
    }
    pub fn pitch_classes(&self) -> PitchClassSet {
        self.notes.iter().map(Note::pitch_class).collect()
    }
    pub fn contains_pitch_class(&self, class: PitchClass) -> bool {
        self.notes.iter().any(|note| note.pitch_class() == class)
    }
    pub fn names(&self) -> Vec<String> {
        self.notes.iter().map(Note::name).collect()
    }
}

impl From<Vec<Note>> for NoteSet {
    fn from(notes: Vec<Note>) -> Self {
        NoteSet::new(notes)
    }
}

impl std::iter::FromIterator<Note> for NoteSet {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        NoteSet::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a NoteSet {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;
    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
