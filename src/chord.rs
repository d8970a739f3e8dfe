use crate::interval_set::IntervalSet;
use crate::note::{Note, NoteSet};
use crate::pitch::PitchClassSet;
use crate::{TheoryError, TheoryResult};
use std::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ChordKind {
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    Fifth,
    Sixth,
    MinorSixth,
    Dominant7,
    Major7,
    Minor7,
    MinorMajor7,
    HalfDiminished7,
    Diminished7,
    Augmented7,
    Dominant7Sus4,
    Add9,
    Dominant9,
    Major9,
    Minor9,
}

impl ChordKind {
    pub const fn all() -> &'static [ChordKind] {
        &[
            ChordKind::Major,
            ChordKind::Minor,
            ChordKind::Diminished,
            ChordKind::Augmented,
            ChordKind::Sus2,
            ChordKind::Sus4,
            ChordKind::Fifth,
            ChordKind::Sixth,
            ChordKind::MinorSixth,
            ChordKind::Dominant7,
            ChordKind::Major7,
            ChordKind::Minor7,
            ChordKind::MinorMajor7,
            ChordKind::HalfDiminished7,
            ChordKind::Diminished7,
            ChordKind::Augmented7,
            ChordKind::Dominant7Sus4,
            ChordKind::Add9,
            ChordKind::Dominant9,
            ChordKind::Major9,
            ChordKind::Minor9,
        ]
    }

    /// Whether the chord is written with a lowercase Roman numeral.
    pub const fn is_minor(&self) -> bool {
        matches!(
            self,
            ChordKind::Minor
                | ChordKind::Diminished
                | ChordKind::MinorSixth
                | ChordKind::Minor7
                | ChordKind::MinorMajor7
                | ChordKind::HalfDiminished7
                | ChordKind::Diminished7
                | ChordKind::Minor9
        )
    }

    /// Reads the suffix after a Roman numeral; the numeral's case picks between
    /// the major and minor forms when the suffix alone does not.
    pub fn from_numeral(upper: bool, suffix: &str) -> Option<ChordKind> {
        let kind = match (upper, suffix) {
            (true, "") => ChordKind::Major,
            (false, "") => ChordKind::Minor,
            (_, "o") | (_, "°") | (_, "dim") => ChordKind::Diminished,
            (_, "+") | (_, "aug") => ChordKind::Augmented,
            (_, "o7") | (_, "°7") | (_, "dim7") => ChordKind::Diminished7,
            (_, "ø") | (_, "ø7") => ChordKind::HalfDiminished7,
            (_, "+7") | (_, "aug7") => ChordKind::Augmented7,
            (true, "7") => ChordKind::Dominant7,
            (false, "7") => ChordKind::Minor7,
            (true, "M7") | (true, "maj7") | (true, "Δ") | (true, "Δ7") => ChordKind::Major7,
            (false, "M7") | (false, "maj7") | (false, "Δ") | (false, "Δ7") => {
                ChordKind::MinorMajor7
            }
            (true, "6") => ChordKind::Sixth,
            (false, "6") => ChordKind::MinorSixth,
            (true, "9") => ChordKind::Dominant9,
            (false, "9") => ChordKind::Minor9,
            (true, "M9") | (true, "maj9") => ChordKind::Major9,
            (_, "add9") => ChordKind::Add9,
            (_, "5") => ChordKind::Fifth,
            (_, "sus2") => ChordKind::Sus2,
            (_, "sus4") | (_, "sus") => ChordKind::Sus4,
            (true, "7sus4") => ChordKind::Dominant7Sus4,
            _ => return None,
        };
        Some(kind)
    }

    /// The suffix written after a Roman numeral for this chord.
    pub const fn numeral_suffix(&self) -> &'static str {
        match self {
            ChordKind::Major | ChordKind::Minor => "",
            ChordKind::Diminished => "°",
            ChordKind::Augmented => "+",
            ChordKind::Sus2 => "sus2",
            ChordKind::Sus4 => "sus4",
            ChordKind::Fifth => "5",
            ChordKind::Sixth | ChordKind::MinorSixth => "6",
            ChordKind::Dominant7 | ChordKind::Minor7 => "7",
            ChordKind::Major7 | ChordKind::MinorMajor7 => "maj7",
            ChordKind::HalfDiminished7 => "ø7",
            ChordKind::Diminished7 => "°7",
            ChordKind::Augmented7 => "+7",
            ChordKind::Dominant7Sus4 => "7sus4",
            ChordKind::Add9 => "add9",
            ChordKind::Dominant9 | ChordKind::Minor9 => "9",
            ChordKind::Major9 => "maj9",
        }
    }
}

/// A chord shape: the intervals stacked over any root.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ChordQuality {
    kind: ChordKind,
    symbol: &'static str,
    long_name: &'static str,
    intervals: IntervalSet,
}

impl ChordQuality {
    pub fn new(
        kind: ChordKind,
        symbol: &'static str,
        long_name: &'static str,
        intervals: IntervalSet,
    ) -> Self {
        ChordQuality {
            kind,
            symbol,
            long_name,
            intervals,
        }
    }
    pub fn kind(&self) -> ChordKind {
        self.kind
    }
    pub fn symbol(&self) -> &'static str {
        self.symbol
    }
    pub fn long_name(&self) -> &'static str {
        self.long_name
    }
    pub fn intervals(&self) -> &IntervalSet {
        &self.intervals
    }
    pub fn notes(&self, root: &Note) -> Vec<Note> {
        self.intervals.notes(root)
    }
    /// Pitch classes of the shape rooted on C.
    pub fn pitch_classes(&self) -> PitchClassSet {
        self.intervals.pitch_classes()
    }
}

/// A chord quality on a root, optionally inverted.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Chord {
    root: Note,
    quality: ChordQuality,
    inversion: usize,
}

impl Chord {
    pub fn new(root: Note, quality: ChordQuality) -> Self {
        Chord {
            root,
            quality,
            inversion: 0,
        }
    }
    pub fn root(&self) -> &Note {
        &self.root
    }
    pub fn quality(&self) -> &ChordQuality {
        &self.quality
    }
    pub fn inversion(&self) -> usize {
        self.inversion
    }
    pub fn len(&self) -> usize {
        self.quality.intervals().len()
    }
    pub fn is_empty(&self) -> bool {
        self.quality.intervals().is_empty()
    }

    /// Chord tones from the bass up: root position rotated left by the inversion.
    pub fn notes(&self) -> Vec<Note> {
        let mut notes = self.quality.notes(&self.root);
        if !notes.is_empty() {
            notes.rotate_left(self.inversion);
        }
        notes
    }

    pub fn note_set(&self) -> NoteSet {
        NoteSet::new(self.notes())
    }

    pub fn bass(&self) -> Option<Note> {
        self.notes().first().copied()
    }

    pub fn pitch_classes(&self) -> PitchClassSet {
        self.note_set().pitch_classes()
    }

    pub fn with_inversion(&self, inversion: usize) -> TheoryResult<Chord> {
        let notes = self.len();
        if inversion >= notes {
            return Err(TheoryError::InversionOutOfRange { inversion, notes });
        }
        Ok(Chord {
            inversion,
            ..self.clone()
        })
    }

    /// Root and quality symbol, with the bass after a slash when inverted: `Cm7`, `C/E`.
    pub fn name(&self) -> String {
        let symbol = match self.quality.kind() {
            ChordKind::Major => "",
            _ => self.quality.symbol(),
        };
        let mut name = format!("{}{}", self.root.name(), symbol);
        if self.inversion > 0 {
            if let Some(bass) = self.bass() {
                name.push('/');
                name.push_str(&bass.name());
            }
        }
        name
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
