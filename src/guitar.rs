use crate::chord::Chord;
use crate::note::{Letter, Note, NoteSet};
use crate::pitch::Octave;
use crate::{TheoryError, TheoryResult};
use std::ops::RangeInclusive;

mod string;
pub use string::*;

mod search;
pub use search::*;

const fn open(letter: Letter, octave: i8) -> Note {
    Note::new(letter, 0, Some(Octave::new(octave)))
}

/// Standard tuning `E4 B3 G3 D3 A2 E2`, listed from the highest string (index 0)
/// down to the lowest.
pub const DEFAULT_TUNING: [Note; 6] = [
    open(Letter::E, 4),
    open(Letter::B, 3),
    open(Letter::G, 3),
    open(Letter::D, 3),
    open(Letter::A, 2),
    open(Letter::E, 2),
];
pub const DEFAULT_FRETS: i32 = 23;
/// Most frets a guitar may have.
pub const MAX_FRETS: i32 = 36;
/// Widest reach, in frets, between the lowest and highest fretted note of a voicing.
pub const DEFAULT_STRETCH: i32 = 3;

/// An inclusive run of frets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FretRange {
    low: i32,
    high: i32,
}

impl FretRange {
    pub const fn new(low: i32, high: i32) -> Self {
        FretRange { low, high }
    }
    pub const fn low(&self) -> i32 {
        self.low
    }
    pub const fn high(&self) -> i32 {
        self.high
    }
    pub const fn contains(&self, fret: i32) -> bool {
        self.low <= fret && fret <= self.high
    }
    pub fn iter(&self) -> RangeInclusive<i32> {
        self.low..=self.high
    }
}

impl From<RangeInclusive<i32>> for FretRange {
    fn from(range: RangeInclusive<i32>) -> Self {
        FretRange::new(*range.start(), *range.end())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MatchMode {
    /// Any octave of the target's pitch class matches.
    PitchClass,
    /// Targets that name an octave only match that exact pitch.
    ExactPitch,
}

impl Default for MatchMode {
    fn default() -> Self {
        MatchMode::PitchClass
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SearchOptions {
    region: Option<FretRange>,
    match_mode: MatchMode,
    stretch: i32,
}

impl SearchOptions {
    pub const fn new() -> Self {
        SearchOptions {
            region: None,
            match_mode: MatchMode::PitchClass,
            stretch: DEFAULT_STRETCH,
        }
    }
    pub fn with_region<R: Into<FretRange>>(self, region: R) -> Self {
        SearchOptions {
            region: Some(region.into()),
            ..self
        }
    }
    pub const fn with_match_mode(self, match_mode: MatchMode) -> Self {
        SearchOptions { match_mode, ..self }
    }
    /// Sets how far apart, in frets, the fretted notes of a voicing may lie.
    pub const fn with_stretch(self, stretch: i32) -> Self {
        SearchOptions { stretch, ..self }
    }
    pub const fn region(&self) -> Option<FretRange> {
        self.region
    }
    pub const fn match_mode(&self) -> MatchMode {
        self.match_mode
    }
    pub const fn stretch(&self) -> i32 {
        self.stretch
    }

    /// The region to filter by on `guitar`, defaulting to the whole neck.
    pub fn region_for(&self, guitar: &Guitar) -> FretRange {
        self.region.unwrap_or_else(|| guitar.full_range())
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions::new()
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Guitar {
    strings: Vec<GuitarString>,
    max_fret: i32,
}

impl Guitar {
    /// Builds a guitar from its open-string notes, highest string first.
    pub fn new(open_notes: Vec<Note>, max_fret: i32) -> TheoryResult<Guitar> {
        if open_notes.is_empty() {
            return Err(TheoryError::EmptyTuning);
        }
        if max_fret < 0 || max_fret > MAX_FRETS {
            return Err(TheoryError::FretOutOfRange {
                fret: max_fret,
                max: MAX_FRETS,
            });
        }
        let strings = open_notes
            .into_iter()
            .enumerate()
            .map(|(index, open)| GuitarString::new(index, open, max_fret))
            .collect();
        Ok(Guitar { strings, max_fret })
    }

    /// Builds a guitar from a tuning string such as `"E4 B3 G3 D3 A2 E2"`.
    pub fn from_tuning(tuning: &str, max_fret: i32) -> TheoryResult<Guitar> {
        let notes = NoteSet::from_names(tuning)?;
        Guitar::new(notes.notes().to_vec(), max_fret)
    }

    pub fn strings(&self) -> &[GuitarString] {
        &self.strings
    }
    pub fn string(&self, index: usize) -> Option<&GuitarString> {
        self.strings.get(index)
    }
    pub fn string_count(&self) -> usize {
        self.strings.len()
    }
    pub fn max_fret(&self) -> i32 {
        self.max_fret
    }
    pub fn full_range(&self) -> FretRange {
        FretRange::new(0, self.max_fret)
    }

    /// The note at a position, or `None` when the string does not exist.
    pub fn note_at(&self, string_index: usize, fret: i32) -> Option<TheoryResult<Note>> {
        self.string(string_index).map(|string| string.fret_note(fret))
    }

    pub fn positions_for(&self, target: &Note, options: &SearchOptions) -> GuitarNoteSet {
        GuitarNoteSet::search(self, std::slice::from_ref(target), options)
    }

    pub fn positions_for_set(&self, targets: &NoteSet, options: &SearchOptions) -> GuitarNoteSet {
        GuitarNoteSet::search(self, targets.notes(), options)
    }

    /// Playable shapes for `chord`, with its bass note on the lowest sounded string.
    pub fn voicings_for(&self, chord: &Chord, options: &SearchOptions) -> Vec<GuitarVoicing> {
        GuitarVoicing::search(self, &chord.note_set(), options)
    }

    /// Playable shapes sounding every note of `notes`, the first of them in the bass.
    pub fn voicings_for_set(&self, notes: &NoteSet, options: &SearchOptions) -> Vec<GuitarVoicing> {
        GuitarVoicing::search(self, notes, options)
    }
}

impl Default for Guitar {
    fn default() -> Self {
        let strings = DEFAULT_TUNING
            .iter()
            .enumerate()
            .map(|(index, open)| GuitarString::new(index, *open, DEFAULT_FRETS))
            .collect();
        Guitar {
            strings,
            max_fret: DEFAULT_FRETS,
        }
    }
}
