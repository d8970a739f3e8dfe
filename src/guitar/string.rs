use super::FretRange;
use crate::note::Note;
use crate::pitch::Pitch;
use crate::{TheoryError, TheoryResult};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GuitarString {
    index: usize,
    open: Note,
    max_fret: i32,
}

impl GuitarString {
    pub const fn new(index: usize, open: Note, max_fret: i32) -> Self {
        GuitarString {
            index,
            open,
            max_fret,
        }
    }
    pub const fn index(&self) -> usize {
        self.index
    }
    pub const fn open_note(&self) -> Note {
        self.open
    }
    pub const fn open_pitch(&self) -> Pitch {
        self.open.pitch()
    }
    pub const fn max_fret(&self) -> i32 {
        self.max_fret
    }
    pub const fn frets(&self) -> FretRange {
        FretRange::new(0, self.max_fret)
    }

    // Callers keep `fret` within `[0, max_fret]`.
    pub(crate) fn note_at(&self, fret: i32) -> Note {
        self.open.transpose_by_semitones(fret)
    }

    /// The note sounded when the string is stopped at `fret`.
    pub fn fret_note(&self, fret: i32) -> TheoryResult<Note> {
        if fret < 0 || fret > self.max_fret {
            return Err(TheoryError::FretOutOfRange {
                fret,
                max: self.max_fret,
            });
        }
        Ok(self.note_at(fret))
    }

    pub fn guitar_note(&self, fret: i32) -> TheoryResult<GuitarNote> {
        let note = self.fret_note(fret)?;
        Ok(GuitarNote::new(self.index, fret, note))
    }

    /// Every fret of the string that lies inside `range`.
    pub fn fret_set(&self, range: FretRange) -> FretSet {
        let notes = self
            .frets()
            .iter()
            .filter(|fret| range.contains(*fret))
            .map(|fret| GuitarNote::new(self.index, fret, self.note_at(fret)))
            .collect();
        FretSet {
            string_index: self.index,
            notes,
        }
    }
}

/// A note at a (string, fret) position, tagged with the search target it
/// satisfied when it came out of a fretboard search.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GuitarNote {
    string_index: usize,
    fret: i32,
    note: Note,
    target: Option<Note>,
}

impl GuitarNote {
    pub const fn new(string_index: usize, fret: i32, note: Note) -> Self {
        GuitarNote {
            string_index,
            fret,
            note,
            target: None,
        }
    }
    pub const fn with_target(self, target: Note) -> Self {
        GuitarNote {
            target: Some(target),
            ..self
        }
    }
    pub const fn string_index(&self) -> usize {
        self.string_index
    }
    pub const fn fret(&self) -> i32 {
        self.fret
    }
    pub const fn note(&self) -> Note {
        self.note
    }
    pub const fn target(&self) -> Option<Note> {
        self.target
    }
    pub const fn position(&self) -> (usize, i32) {
        (self.string_index, self.fret)
    }
}

/// The notes of one string across a run of frets, lowest fret first.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct FretSet {
    string_index: usize,
    notes: Vec<GuitarNote>,
}

impl FretSet {
    pub fn string_index(&self) -> usize {
        self.string_index
    }
    pub fn notes(&self) -> &[GuitarNote] {
        &self.notes
    }
    pub fn len(&self) -> usize {
        self.notes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, GuitarNote> {
        self.notes.iter()
    }
    pub fn at_fret(&self, fret: i32) -> Option<&GuitarNote> {
        self.notes.iter().find(|note| note.fret() == fret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn low_e() -> GuitarString {
        GuitarString::new(5, Note::from_name("E2").unwrap(), 23)
    }

    #[test]
    fn test_fret_note() {
        let string = low_e();
        assert_eq!("E2", string.fret_note(0).unwrap().name());
        assert_eq!("C3", string.fret_note(8).unwrap().name());
        assert_eq!("E3", string.fret_note(12).unwrap().name());
        assert_eq!("D#4", string.fret_note(23).unwrap().name());
        assert_eq!(40, string.open_pitch().value());
    }

    #[test]
    fn test_out_of_range() {
        let string = low_e();
        for fret in &[-1, 24] {
            match string.fret_note(*fret) {
                Err(TheoryError::FretOutOfRange { max: 23, .. }) => {}
                other => panic!("Fret {} gave {:?}", fret, other),
            }
        }
    }

    #[test]
    fn test_fret_set() {
        let string = low_e();
        let frets = string.fret_set(FretRange::new(5, 7));
        assert_eq!(3, frets.len());
        assert_eq!(5, frets.string_index());
        let names: Vec<_> = frets.iter().map(|note| note.note().name()).collect();
        assert_eq!(vec!["A2", "A#2", "B2"], names);
        assert_eq!(Some((5, 6)), frets.at_fret(6).map(GuitarNote::position));

        assert_eq!(24, string.fret_set(string.frets()).len());
        assert!(string.fret_set(FretRange::new(30, 40)).is_empty());
    }

    #[test]
    fn test_guitar_note() {
        let note = low_e().guitar_note(3).unwrap();
        assert_eq!((5, 3), note.position());
        assert_eq!("G2", note.note().name());
        assert_eq!(None, note.target());
        let tagged = note.with_target(Note::from_name("G").unwrap());
        assert_eq!(Some(Note::from_name("G").unwrap()), tagged.target());
    }
}
