use crate::interval_set::IntervalSet;
use crate::note::{Note, NoteSet};
use crate::pitch::PitchClassSet;
use crate::{TheoryError, TheoryResult};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ScaleKind {
    Major,
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor,
    MajorPentatonic,
    MinorPentatonic,
    MajorBlues,
    MinorBlues,
    WholeTone,
    Chromatic,
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

/// A named scale shape that is not yet tied to a root.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ScaleType {
    kind: ScaleKind,
    name: &'static str,
    intervals: IntervalSet,
}

impl ScaleType {
    pub fn new(kind: ScaleKind, name: &'static str, intervals: IntervalSet) -> Self {
        ScaleType {
            kind,
            name,
            intervals,
        }
    }
    pub fn kind(&self) -> ScaleKind {
        self.kind
    }
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn intervals(&self) -> &IntervalSet {
        &self.intervals
    }
    pub fn on(&self, root: Note) -> Scale {
        Scale::new(self.name, root, self.intervals.clone())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Scale {
    name: String,
    root: Note,
    intervals: IntervalSet,
}

impl Scale {
    pub fn new<S: Into<String>>(name: S, root: Note, intervals: IntervalSet) -> Self {
        Scale {
            name: name.into(),
            root,
            intervals,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn root(&self) -> &Note {
        &self.root
    }
    pub fn intervals(&self) -> &IntervalSet {
        &self.intervals
    }
    pub fn len(&self) -> usize {
        self.intervals.len()
    }
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// One note per interval, in interval order.
    pub fn notes(&self) -> Vec<Note> {
        self.intervals.notes(&self.root)
    }

    pub fn note_set(&self) -> NoteSet {
        NoteSet::new(self.notes())
    }

    /// The note on a 1-based scale degree.
    pub fn degree(&self, degree: usize) -> TheoryResult<Note> {
        let interval = degree
            .checked_sub(1)
            .and_then(|idx| self.intervals.get(idx))
            .ok_or(TheoryError::DegreeOutOfRange {
                degree,
                max: self.len(),
            })?;
        Ok(self.root.transpose_up(*interval))
    }

    pub fn pitch_classes(&self) -> PitchClassSet {
        self.note_set().pitch_classes()
    }

    pub fn contains(&self, note: &Note) -> bool {
        self.pitch_classes().contains(note.pitch_class())
    }

    /// `size` notes built on `degree` by taking every other scale note, wrapping
    /// past the top of the scale: the diatonic triad for size 3, the seventh chord for 4.
    pub fn stacked_thirds(&self, degree: usize, size: usize) -> TheoryResult<NoteSet> {
        if degree < 1 || degree > self.len() {
            return Err(TheoryError::DegreeOutOfRange {
                degree,
                max: self.len(),
            });
        }
        let notes = self.notes();
        let stacked = (0..size)
            .map(|step| notes[(degree - 1 + 2 * step) % notes.len()])
            .collect();
        Ok(stacked)
    }

    pub fn mode(&self, degree: usize) -> TheoryResult<Mode> {
        Mode::from_scale(self, degree)
    }
}

/// A scale read from one of its degrees, re-rooted on that degree's note.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Mode {
    base: Scale,
    degree: usize,
    scale: Scale,
}

impl Mode {
    pub fn from_scale(base: &Scale, degree: usize) -> TheoryResult<Mode> {
        let intervals = base.intervals().rotate(degree)?;
        let root = base.degree(degree)?;
        let name = if degree == 1 {
            base.name().to_owned()
        } else {
            format!("{} mode {}", base.name(), degree)
        };
        Ok(Mode {
            base: base.clone(),
            degree,
            scale: Scale::new(name, root, intervals),
        })
    }
    pub fn base(&self) -> &Scale {
        &self.base
    }
    pub fn degree(&self) -> usize {
        self.degree
    }
    pub fn as_scale(&self) -> &Scale {
        &self.scale
    }
    pub fn into_scale(self) -> Scale {
        self.scale
    }
    pub fn notes(&self) -> Vec<Note> {
        self.scale.notes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::PitchClass;

    fn c_major() -> Scale {
        Scale::new(
            "major",
            Note::from_name("C").unwrap(),
            IntervalSet::parse("1P 2M 3M 4P 5P 6M 7M").unwrap(),
        )
    }

    fn names(notes: &[Note]) -> Vec<String> {
        notes.iter().map(Note::name).collect()
    }

    #[test]
    fn test_notes() {
        let scale = c_major();
        assert_eq!(
            vec!["C", "D", "E", "F", "G", "A", "B"],
            names(&scale.notes())
        );
        let f_major = Scale::new("major", Note::from_name("F").unwrap(), scale.intervals().clone());
        assert_eq!(
            vec!["F", "G", "A", "Bb", "C", "D", "E"],
            names(&f_major.notes())
        );
        for root in PitchClass::all() {
            let moved = Scale::new("major", Note::from_pitch_class(*root), scale.intervals().clone());
            assert_eq!(scale.len(), moved.notes().len());
        }
        let empty = Scale::new("empty", Note::from_name("C").unwrap(), IntervalSet::default());
        assert!(empty.notes().is_empty());
    }

    #[test]
    fn test_degree() {
        let scale = c_major();
        assert_eq!("G", scale.degree(5).unwrap().name());
        for degree in &[0, 8] {
            match scale.degree(*degree) {
                Err(TheoryError::DegreeOutOfRange { max: 7, .. }) => {}
                other => panic!("Degree {} gave {:?}", degree, other),
            }
        }
        assert!(scale.contains(&Note::from_name("B#").unwrap()));
        assert!(!scale.contains(&Note::from_name("Bb").unwrap()));
    }

    #[test]
    fn test_stacked_thirds() {
        let scale = c_major();
        assert_eq!(vec!["D", "F", "A"], scale.stacked_thirds(2, 3).unwrap().names());
        assert_eq!(
            vec!["B", "D", "F", "A"],
            scale.stacked_thirds(7, 4).unwrap().names()
        );
        assert!(scale.stacked_thirds(8, 3).is_err());
    }

    #[test]
    fn test_mode() {
        let scale = c_major();
        let first = scale.mode(1).unwrap();
        assert_eq!(&scale, first.as_scale());

        let dorian = scale.mode(2).unwrap();
        assert_eq!("D", dorian.as_scale().root().name());
        assert_eq!(
            vec!["D", "E", "F", "G", "A", "B", "C"],
            names(&dorian.notes())
        );
        assert_eq!(scale.pitch_classes(), dorian.as_scale().pitch_classes());
        assert_eq!(2, dorian.degree());
        assert_eq!(&scale, dorian.base());

        let locrian = scale.mode(7).unwrap().into_scale();
        assert_eq!(
            vec!["B", "C", "D", "E", "F", "G", "A"],
            names(&locrian.notes())
        );
        assert!(scale.mode(9).is_err());
    }
}
