//! Read-only lookup tables for named chord qualities, scales and cadences.
//!
//! A [`Registry`] is built once from the static tables below and then only read;
//! callers hold it and pass it by reference to anything that resolves names.

use crate::chord::{Chord, ChordKind, ChordQuality};
use crate::interval_set::IntervalSet;
use crate::note::{Note, NoteSet};
use crate::parser::{parse_pitch_name, parse_prefix};
use crate::progression::{Cadence, CadenceKind, Progression};
use crate::scale::{Scale, ScaleKind, ScaleType};
use crate::utils::normalize_name;
use crate::{TheoryError, TheoryResult};
use log::{debug, trace};

struct ChordEntry {
    kind: ChordKind,
    symbol: &'static str,
    aliases: &'static [&'static str],
    long_name: &'static str,
    intervals: &'static str,
}

const CHORD_TABLE: &[ChordEntry] = &[
    ChordEntry {
        kind: ChordKind::Major,
        symbol: "M",
        aliases: &["", "maj"],
        long_name: "major",
        intervals: "1P 3M 5P",
    },
    ChordEntry {
        kind: ChordKind::Minor,
        symbol: "m",
        aliases: &["min", "-"],
        long_name: "minor",
        intervals: "1P 3m 5P",
    },
    ChordEntry {
        kind: ChordKind::Diminished,
        symbol: "dim",
        aliases: &["o", "°"],
        long_name: "diminished",
        intervals: "1P 3m 5d",
    },
    ChordEntry {
        kind: ChordKind::Augmented,
        symbol: "aug",
        aliases: &["+"],
        long_name: "augmented",
        intervals: "1P 3M 5A",
    },
    ChordEntry {
        kind: ChordKind::Sus2,
        symbol: "sus2",
        aliases: &[],
        long_name: "suspended second",
        intervals: "1P 2M 5P",
    },
    ChordEntry {
        kind: ChordKind::Sus4,
        symbol: "sus4",
        aliases: &["sus"],
        long_name: "suspended fourth",
        intervals: "1P 4P 5P",
    },
    ChordEntry {
        kind: ChordKind::Fifth,
        symbol: "5",
        aliases: &[],
        long_name: "power chord",
        intervals: "1P 5P",
    },
    ChordEntry {
        kind: ChordKind::Sixth,
        symbol: "6",
        aliases: &["M6"],
        long_name: "major sixth",
        intervals: "1P 3M 5P 6M",
    },
    ChordEntry {
        kind: ChordKind::MinorSixth,
        symbol: "m6",
        aliases: &["min6"],
        long_name: "minor sixth",
        intervals: "1P 3m 5P 6M",
    },
    ChordEntry {
        kind: ChordKind::Dominant7,
        symbol: "7",
        aliases: &["dom7"],
        long_name: "dominant seventh",
        intervals: "1P 3M 5P 7m",
    },
    ChordEntry {
        kind: ChordKind::Major7,
        symbol: "M7",
        aliases: &["maj7", "Δ", "Δ7"],
        long_name: "major seventh",
        intervals: "1P 3M 5P 7M",
    },
    ChordEntry {
        kind: ChordKind::Minor7,
        symbol: "m7",
        aliases: &["min7", "-7"],
        long_name: "minor seventh",
        intervals: "1P 3m 5P 7m",
    },
    ChordEntry {
        kind: ChordKind::MinorMajor7,
        symbol: "mM7",
        aliases: &["m(maj7)", "minmaj7"],
        long_name: "minor major seventh",
        intervals: "1P 3m 5P 7M",
    },
    ChordEntry {
        kind: ChordKind::HalfDiminished7,
        symbol: "m7b5",
        aliases: &["ø", "ø7"],
        long_name: "half-diminished seventh",
        intervals: "1P 3m 5d 7m",
    },
    ChordEntry {
        kind: ChordKind::Diminished7,
        symbol: "dim7",
        aliases: &["o7", "°7"],
        long_name: "diminished seventh",
        intervals: "1P 3m 5d 7d",
    },
    ChordEntry {
        kind: ChordKind::Augmented7,
        symbol: "aug7",
        aliases: &["+7", "7#5"],
        long_name: "augmented seventh",
        intervals: "1P 3M 5A 7m",
    },
    ChordEntry {
        kind: ChordKind::Dominant7Sus4,
        symbol: "7sus4",
        aliases: &[],
        long_name: "dominant seventh suspended fourth",
        intervals: "1P 4P 5P 7m",
    },
    ChordEntry {
        kind: ChordKind::Add9,
        symbol: "add9",
        aliases: &[],
        long_name: "added ninth",
        intervals: "1P 3M 5P 9M",
    },
    ChordEntry {
        kind: ChordKind::Dominant9,
        symbol: "9",
        aliases: &["dom9"],
        long_name: "dominant ninth",
        intervals: "1P 3M 5P 7m 9M",
    },
    ChordEntry {
        kind: ChordKind::Major9,
        symbol: "M9",
        aliases: &["maj9"],
        long_name: "major ninth",
        intervals: "1P 3M 5P 7M 9M",
    },
    ChordEntry {
        kind: ChordKind::Minor9,
        symbol: "m9",
        aliases: &["min9", "-9"],
        long_name: "minor ninth",
        intervals: "1P 3m 5P 7m 9M",
    },
];

enum ScaleSource {
    Intervals(&'static str),
    // Degree of the major scale the mode starts on.
    ModeOfMajor(usize),
}

struct ScaleEntry {
    kind: ScaleKind,
    name: &'static str,
    aliases: &'static [&'static str],
    source: ScaleSource,
}

const MAJOR_INTERVALS: &str = "1P 2M 3M 4P 5P 6M 7M";

const SCALE_TABLE: &[ScaleEntry] = &[
    ScaleEntry {
        kind: ScaleKind::Major,
        name: "major",
        aliases: &[],
        source: ScaleSource::Intervals(MAJOR_INTERVALS),
    },
    ScaleEntry {
        kind: ScaleKind::NaturalMinor,
        name: "natural minor",
        aliases: &["minor"],
        source: ScaleSource::Intervals("1P 2M 3m 4P 5P 6m 7m"),
    },
    ScaleEntry {
        kind: ScaleKind::HarmonicMinor,
        name: "harmonic minor",
        aliases: &[],
        source: ScaleSource::Intervals("1P 2M 3m 4P 5P 6m 7M"),
    },
    ScaleEntry {
        kind: ScaleKind::MelodicMinor,
        name: "melodic minor",
        aliases: &["jazz minor"],
        source: ScaleSource::Intervals("1P 2M 3m 4P 5P 6M 7M"),
    },
    ScaleEntry {
        kind: ScaleKind::MajorPentatonic,
        name: "major pentatonic",
        aliases: &["pentatonic major", "pentatonic"],
        source: ScaleSource::Intervals("1P 2M 3M 5P 6M"),
    },
    ScaleEntry {
        kind: ScaleKind::MinorPentatonic,
        name: "minor pentatonic",
        aliases: &["pentatonic minor"],
        source: ScaleSource::Intervals("1P 3m 4P 5P 7m"),
    },
    ScaleEntry {
        kind: ScaleKind::MajorBlues,
        name: "major blues",
        aliases: &["blues major"],
        source: ScaleSource::Intervals("1P 2M 3m 3M 5P 6M"),
    },
    ScaleEntry {
        kind: ScaleKind::MinorBlues,
        name: "minor blues",
        aliases: &["blues minor", "blues"],
        source: ScaleSource::Intervals("1P 3m 4P 5d 5P 7m"),
    },
    ScaleEntry {
        kind: ScaleKind::WholeTone,
        name: "whole tone",
        aliases: &[],
        source: ScaleSource::Intervals("1P 2M 3M 4A 6m 7m"),
    },
    ScaleEntry {
        kind: ScaleKind::Chromatic,
        name: "chromatic",
        aliases: &[],
        source: ScaleSource::Intervals("1P 2m 2M 3m 3M 4P 4A 5P 6m 6M 7m 7M"),
    },
    ScaleEntry {
        kind: ScaleKind::Ionian,
        name: "ionian",
        aliases: &[],
        source: ScaleSource::ModeOfMajor(1),
    },
    ScaleEntry {
        kind: ScaleKind::Dorian,
        name: "dorian",
        aliases: &[],
        source: ScaleSource::ModeOfMajor(2),
    },
    ScaleEntry {
        kind: ScaleKind::Phrygian,
        name: "phrygian",
        aliases: &[],
        source: ScaleSource::ModeOfMajor(3),
    },
    ScaleEntry {
        kind: ScaleKind::Lydian,
        name: "lydian",
        aliases: &[],
        source: ScaleSource::ModeOfMajor(4),
    },
    ScaleEntry {
        kind: ScaleKind::Mixolydian,
        name: "mixolydian",
        aliases: &[],
        source: ScaleSource::ModeOfMajor(5),
    },
    ScaleEntry {
        kind: ScaleKind::Aeolian,
        name: "aeolian",
        aliases: &[],
        source: ScaleSource::ModeOfMajor(6),
    },
    ScaleEntry {
        kind: ScaleKind::Locrian,
        name: "locrian",
        aliases: &[],
        source: ScaleSource::ModeOfMajor(7),
    },
];

struct CadenceEntry {
    kind: CadenceKind,
    name: &'static str,
    aliases: &'static [&'static str],
    notation: &'static str,
}

const CADENCE_TABLE: &[CadenceEntry] = &[
    CadenceEntry {
        kind: CadenceKind::Authentic,
        name: "authentic",
        aliases: &["perfect"],
        notation: "V-I",
    },
    CadenceEntry {
        kind: CadenceKind::Plagal,
        name: "plagal",
        aliases: &["amen"],
        notation: "IV-I",
    },
    CadenceEntry {
        kind: CadenceKind::Half,
        name: "half",
        aliases: &["imperfect"],
        notation: "I-V",
    },
    CadenceEntry {
        kind: CadenceKind::Deceptive,
        name: "deceptive",
        aliases: &["interrupted"],
        notation: "V-vi",
    },
    CadenceEntry {
        kind: CadenceKind::TwoFiveOne,
        name: "ii-V-I",
        aliases: &["two five one"],
        notation: "ii-V-I",
    },
    CadenceEntry {
        kind: CadenceKind::Andalusian,
        name: "andalusian",
        aliases: &[],
        notation: "i-VII-VI-V",
    },
];

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Registry {
    chord_qualities: Vec<(ChordQuality, &'static [&'static str])>,
    scale_types: Vec<(ScaleType, &'static [&'static str])>,
    cadences: Vec<(Cadence, &'static [&'static str])>,
}

impl Registry {
    /// Builds the standard tables. Only fails if a table entry is malformed.
    pub fn standard() -> TheoryResult<Registry> {
        let chord_qualities = CHORD_TABLE
            .iter()
            .map(|entry| -> TheoryResult<_> {
                let intervals = IntervalSet::parse(entry.intervals)?;
                let quality =
                    ChordQuality::new(entry.kind, entry.symbol, entry.long_name, intervals);
                Ok((quality, entry.aliases))
            })
            .collect::<TheoryResult<Vec<_>>>()?;

        let major = IntervalSet::parse(MAJOR_INTERVALS)?;
        let scale_types = SCALE_TABLE
            .iter()
            .map(|entry| -> TheoryResult<_> {
                let intervals = match entry.source {
                    ScaleSource::Intervals(spec) => IntervalSet::parse(spec)?,
                    ScaleSource::ModeOfMajor(degree) => major.rotate(degree)?,
                };
                Ok((ScaleType::new(entry.kind, entry.name, intervals), entry.aliases))
            })
            .collect::<TheoryResult<Vec<_>>>()?;

        let cadences = CADENCE_TABLE
            .iter()
            .map(|entry| -> TheoryResult<_> {
                let progression = Progression::parse(entry.notation)?;
                Ok((
                    Cadence::new(entry.kind, entry.name, progression),
                    entry.aliases,
                ))
            })
            .collect::<TheoryResult<Vec<_>>>()?;

        debug!(
            "Built registry with {} chord qualities, {} scales and {} cadences.",
            chord_qualities.len(),
            scale_types.len(),
            cadences.len()
        );
        Ok(Registry {
            chord_qualities,
            scale_types,
            cadences,
        })
    }

    pub fn chord_qualities(&self) -> impl Iterator<Item = &ChordQuality> + '_ {
        self.chord_qualities.iter().map(|(quality, _)| quality)
    }
    pub fn scale_types(&self) -> impl Iterator<Item = &ScaleType> + '_ {
        self.scale_types.iter().map(|(scale, _)| scale)
    }
    pub fn cadences(&self) -> impl Iterator<Item = &Cadence> + '_ {
        self.cadences.iter().map(|(cadence, _)| cadence)
    }

    /// Looks a quality up by symbol or alias (case-sensitive, since `M` and `m`
    /// differ), then by long name (case-insensitive).
    pub fn chord_quality(&self, name: &str) -> TheoryResult<&ChordQuality> {
        let trimmed = name.trim();
        let by_symbol = self.chord_qualities.iter().find(|(quality, aliases)| {
            quality.symbol() == trimmed || aliases.iter().any(|alias| *alias == trimmed)
        });
        let normalized = normalize_name(trimmed);
        by_symbol
            .or_else(|| {
                self.chord_qualities
                    .iter()
                    .find(|(quality, _)| normalize_name(quality.long_name()) == normalized)
            })
            .map(|(quality, _)| quality)
            .ok_or_else(|| TheoryError::UnknownChordQuality(name.to_owned()))
    }

    pub fn chord_quality_for(&self, kind: ChordKind) -> TheoryResult<&ChordQuality> {
        self.chord_qualities()
            .find(|quality| quality.kind() == kind)
            .ok_or_else(|| TheoryError::UnknownChordQuality(format!("{:?}", kind)))
    }

    pub fn scale_type(&self, name: &str) -> TheoryResult<&ScaleType> {
        let normalized = normalize_name(name);
        self.scale_types
            .iter()
            .find(|(scale, aliases)| {
                scale.name() == normalized || aliases.iter().any(|alias| *alias == normalized)
            })
            .map(|(scale, _)| scale)
            .ok_or_else(|| TheoryError::UnknownScaleName(name.to_owned()))
    }

    pub fn scale_type_for(&self, kind: ScaleKind) -> TheoryResult<&ScaleType> {
        self.scale_types()
            .find(|scale| scale.kind() == kind)
            .ok_or_else(|| TheoryError::UnknownScaleName(format!("{:?}", kind)))
    }

    /// The named scale on `root`.
    pub fn scale(&self, name: &str, root: &Note) -> TheoryResult<Scale> {
        Ok(self.scale_type(name)?.on(*root))
    }

    pub fn cadence(&self, name: &str) -> TheoryResult<&Cadence> {
        let normalized = normalize_name(name);
        self.cadences
            .iter()
            .find(|(cadence, aliases)| {
                normalize_name(cadence.name()) == normalized
                    || aliases.iter().any(|alias| normalize_name(alias) == normalized)
            })
            .map(|(cadence, _)| cadence)
            .ok_or_else(|| TheoryError::UnknownCadence(name.to_owned()))
    }

    /// Parses a chord symbol: a root spelling followed by a quality symbol, as in `F#m7`.
    pub fn chord(&self, symbol: &str) -> TheoryResult<Chord> {
        let trimmed = symbol.trim();
        let (root, quality) = parse_prefix(trimmed, parse_pitch_name).map_err(|reason| {
            TheoryError::InvalidNoteName {
                name: symbol.to_owned(),
                reason,
            }
        })?;
        let quality = self.chord_quality(quality)?;
        Ok(Chord::new(root, quality.clone()))
    }

    /// Names the chord formed by `notes`, if any quality matches them.
    ///
    /// Each note is tried as the root in order, so the bass note wins when a set
    /// reads as more than one chord (`C E G A` is `C6`, `A C E G` is `Am7`).
    /// A root other than the bass yields an inverted chord.
    pub fn identify_chord(&self, notes: &NoteSet) -> Option<Chord> {
        let bass = notes.first()?;
        let classes = notes.pitch_classes();
        for root in notes {
            let relative = classes.transpose(-(root.pitch_class().as_u8() as i32));
            for quality in self.chord_qualities() {
                trace!("Trying {}{} against {:?}", root, quality.symbol(), notes.names());
                if quality.pitch_classes() != relative {
                    continue;
                }
                let chord = Chord::new(*root, quality.clone());
                let inversion = chord
                    .notes()
                    .iter()
                    .position(|note| note.is_enharmonic(bass))
                    .unwrap_or(0);
                debug!("Identified {:?} as {}{}", notes.names(), root, quality.symbol());
                return chord.with_inversion(inversion).ok();
            }
        }
        None
    }

    /// The diatonic chord on `degree` of `key` with `size` stacked thirds, when
    /// its notes form a known quality.
    pub fn diatonic_chord(
        &self,
        key: &Scale,
        degree: usize,
        size: usize,
    ) -> TheoryResult<Option<Chord>> {
        let notes = key.stacked_thirds(degree, size)?;
        Ok(self.identify_chord(&notes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(name: &str) -> Note {
        Note::from_name(name).unwrap()
    }

    #[test]
    fn test_tables_complete() {
        let registry = Registry::standard().unwrap();
        for kind in ChordKind::all() {
            assert!(registry.chord_quality_for(*kind).is_ok(), "{:?}", kind);
        }
        assert_eq!(ChordKind::all().len(), registry.chord_qualities().count());
        assert_eq!(SCALE_TABLE.len(), registry.scale_types().count());
        assert_eq!(CADENCE_TABLE.len(), registry.cadences().count());
    }

    #[test]
    fn test_chord_quality_lookup() {
        let registry = Registry::standard().unwrap();
        assert_eq!(ChordKind::Major7, registry.chord_quality("M7").unwrap().kind());
        assert_eq!(ChordKind::Minor7, registry.chord_quality("m7").unwrap().kind());
        assert_eq!(ChordKind::Major7, registry.chord_quality("maj7").unwrap().kind());
        assert_eq!(
            ChordKind::HalfDiminished7,
            registry.chord_quality("Half-Diminished Seventh").unwrap().kind()
        );
        match registry.chord_quality("m13#11") {
            Err(TheoryError::UnknownChordQuality(name)) => assert_eq!("m13#11", name),
            other => panic!("Unexpected {:?}", other),
        }
    }

    #[test]
    fn test_scale_lookup() {
        let registry = Registry::standard().unwrap();
        let scale = registry.scale("Harmonic_Minor", &note("A")).unwrap();
        let names: Vec<_> = scale.notes().iter().map(Note::name).collect();
        assert_eq!(vec!["A", "B", "C", "D", "E", "F", "G#"], names);

        let dorian = registry.scale_type_for(ScaleKind::Dorian).unwrap();
        assert_eq!(
            vec!["1P", "2M", "3m", "4P", "5P", "6M", "7m"],
            dorian.intervals().names()
        );
        assert_eq!(
            registry.scale_type("major").unwrap().intervals(),
            registry.scale_type("ionian").unwrap().intervals()
        );
        assert_eq!(
            registry.scale_type("minor").unwrap().intervals(),
            registry.scale_type("aeolian").unwrap().intervals()
        );

        match registry.scale("hungarian gypsy", &note("C")) {
            Err(TheoryError::UnknownScaleName(_)) => {}
            other => panic!("Unexpected {:?}", other),
        }
    }

    #[test]
    fn test_chord_symbol() {
        let registry = Registry::standard().unwrap();
        let chord = registry.chord("F#m7").unwrap();
        let names: Vec<_> = chord.notes().iter().map(Note::name).collect();
        assert_eq!(vec!["F#", "A", "C#", "E"], names);
        assert_eq!("F#m7", chord.name());

        assert_eq!("C", registry.chord("C").unwrap().name());
        assert_eq!("Bbsus4", registry.chord("Bbsus4").unwrap().name());
        assert_eq!("Ebdim7", registry.chord("Ebo7").unwrap().name());

        match registry.chord("Cwhatever") {
            Err(TheoryError::UnknownChordQuality(_)) => {}
            other => panic!("Unexpected {:?}", other),
        }
        match registry.chord("Hm") {
            Err(TheoryError::InvalidNoteName { .. }) => {}
            other => panic!("Unexpected {:?}", other),
        }
    }

    #[test]
    fn test_identify() {
        let registry = Registry::standard().unwrap();
        let identify = |names: &str| {
            registry
                .identify_chord(&NoteSet::from_names(names).unwrap())
                .map(|chord| chord.name())
        };
        assert_eq!(Some("C".to_owned()), identify("C E G"));
        assert_eq!(Some("Am".to_owned()), identify("A C E"));
        assert_eq!(Some("C6".to_owned()), identify("C E G A"));
        assert_eq!(Some("Am7".to_owned()), identify("A C E G"));
        assert_eq!(Some("C/E".to_owned()), identify("E G C"));
        assert_eq!(Some("G7/B".to_owned()), identify("B D F G"));
        assert_eq!(Some("Bdim".to_owned()), identify("B D F"));
        assert_eq!(None, identify("C C# D"));
        assert_eq!(None, registry.identify_chord(&NoteSet::default()));
    }

    #[test]
    fn test_diatonic() {
        let registry = Registry::standard().unwrap();
        let key = registry.scale("major", &note("C")).unwrap();
        let names: Vec<_> = (1..=7)
            .map(|degree| {
                registry
                    .diatonic_chord(&key, degree, 3)
                    .unwrap()
                    .map(|chord| chord.name())
            })
            .collect();
        assert_eq!(
            vec![
                Some("C".to_owned()),
                Some("Dm".to_owned()),
                Some("Em".to_owned()),
                Some("F".to_owned()),
                Some("G".to_owned()),
                Some("Am".to_owned()),
                Some("Bdim".to_owned()),
            ],
            names
        );
        let fifth_seventh = registry.diatonic_chord(&key, 5, 4).unwrap();
        assert_eq!(Some("G7".to_owned()), fifth_seventh.map(|chord| chord.name()));
    }

    #[test]
    fn test_cadences() {
        let registry = Registry::standard().unwrap();
        let key = registry.scale("major", &note("G")).unwrap();
        let cadence = registry.cadence("ii-V-I").unwrap();
        assert_eq!(CadenceKind::TwoFiveOne, cadence.kind());
        let names: Vec<_> = cadence
            .chords(&key, &registry)
            .unwrap()
            .iter()
            .map(Chord::name)
            .collect();
        assert_eq!(vec!["Am", "D", "G"], names);

        assert_eq!(
            CadenceKind::Plagal,
            registry.cadence("Amen").unwrap().kind()
        );
        assert_eq!("V-vi", registry.cadence("deceptive").unwrap().progression().notation());
        match registry.cadence("picardy") {
            Err(TheoryError::UnknownCadence(_)) => {}
            other => panic!("Unexpected {:?}", other),
        }
    }
}
