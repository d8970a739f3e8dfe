use crate::chord::{Chord, ChordKind};
use crate::interval::{Direction, AUGMENTED_UNISON};
use crate::parser::{parse_complete, parse_progression};
use crate::registry::Registry;
use crate::scale::Scale;
use crate::{TheoryError, TheoryResult};
use std::fmt;

const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// A chord named by its scale degree, such as `ii7` or `bVII`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DegreeRef {
    degree: usize,
    accidental: i8,
    kind: ChordKind,
}

impl DegreeRef {
    pub const fn new(degree: usize, accidental: i8, kind: ChordKind) -> Self {
        DegreeRef {
            degree,
            accidental,
            kind,
        }
    }
    pub const fn degree(&self) -> usize {
        self.degree
    }
    pub const fn accidental(&self) -> i8 {
        self.accidental
    }
    pub const fn kind(&self) -> ChordKind {
        self.kind
    }

    /// Builds the chord on this degree of `key`. Accidentals raise or lower the root
    /// by augmented unisons so the letter stays that of the scale degree.
    pub fn resolve(&self, key: &Scale, registry: &Registry) -> TheoryResult<Chord> {
        let degree_note = key.degree(self.degree)?;
        let direction = if self.accidental < 0 {
            Direction::Down
        } else {
            Direction::Up
        };
        let root = (0..self.accidental.unsigned_abs())
            .fold(degree_note, |note, _| note.transpose_by(AUGMENTED_UNISON, direction));
        let quality = registry.chord_quality_for(self.kind)?;
        Ok(Chord::new(root, quality.clone()))
    }
}

impl fmt::Display for DegreeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.accidental > 0 { "#" } else { "b" };
        for _ in 0..self.accidental.unsigned_abs() {
            f.write_str(mark)?;
        }
        let numeral = NUMERALS
            .get(self.degree.wrapping_sub(1))
            .map(|numeral| numeral.to_string())
            .unwrap_or_else(|| self.degree.to_string());
        if self.kind.is_minor() {
            f.write_str(&numeral.to_lowercase())?;
        } else {
            f.write_str(&numeral)?;
        }
        f.write_str(self.kind.numeral_suffix())
    }
}

/// An ordered run of degree-relative chords, independent of any key.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct Progression {
    steps: Vec<DegreeRef>,
}

impl Progression {
    pub fn new(steps: Vec<DegreeRef>) -> Self {
        Progression { steps }
    }

    /// Parses Roman numeral notation such as `"ii-V-I"` or `"I vi IV V7"`.
    pub fn parse(notation: &str) -> TheoryResult<Progression> {
        parse_complete(notation.trim(), parse_progression)
            .map(Progression::new)
            .map_err(|reason| TheoryError::InvalidDegreeReference {
                notation: notation.to_owned(),
                reason,
            })
    }

    pub fn steps(&self) -> &[DegreeRef] {
        &self.steps
    }
    pub fn len(&self) -> usize {
        self.steps.len()
    }
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn notation(&self) -> String {
        self.steps
            .iter()
            .map(DegreeRef::to_string)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// The chords of the progression in `key`.
    pub fn chords(&self, key: &Scale, registry: &Registry) -> TheoryResult<Vec<Chord>> {
        self.steps
            .iter()
            .map(|step| step.resolve(key, registry))
            .collect()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CadenceKind {
    Authentic,
    Plagal,
    Half,
    Deceptive,
    TwoFiveOne,
    Andalusian,
}

/// A named, canonical progression.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Cadence {
    kind: CadenceKind,
    name: &'static str,
    progression: Progression,
}

impl Cadence {
    pub fn new(kind: CadenceKind, name: &'static str, progression: Progression) -> Self {
        Cadence {
            kind,
            name,
            progression,
        }
    }
    pub fn kind(&self) -> CadenceKind {
        self.kind
    }
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn progression(&self) -> &Progression {
        &self.progression
    }
    pub fn chords(&self, key: &Scale, registry: &Registry) -> TheoryResult<Vec<Chord>> {
        self.progression.chords(key, registry)
    }
}
