use crate::parser::{parse_complete, parse_interval_parts};
use crate::pitch::Pitch;
use crate::{TheoryError, TheoryResult};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Quality {
    Diminished,
    Minor,
    Perfect,
    Major,
    Augmented,
}

impl Quality {
    pub const fn symbol(&self) -> char {
        match self {
            Quality::Diminished => 'd',
            Quality::Minor => 'm',
            Quality::Perfect => 'P',
            Quality::Major => 'M',
            Quality::Augmented => 'A',
        }
    }
    pub const fn long_name(&self) -> &'static str {
        match self {
            Quality::Diminished => "diminished",
            Quality::Minor => "minor",
            Quality::Perfect => "perfect",
            Quality::Major => "major",
            Quality::Augmented => "augmented",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Up
    }
}

/// Semitones of the major or perfect interval for each simple number.
const SIMPLE_BASE: [u32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Preferred spelling for each semitone count within an octave.
const CANONICAL: [(Quality, u32); 12] = [
    (Quality::Perfect, 1),
    (Quality::Minor, 2),
    (Quality::Major, 2),
    (Quality::Minor, 3),
    (Quality::Major, 3),
    (Quality::Perfect, 4),
    (Quality::Augmented, 4),
    (Quality::Perfect, 5),
    (Quality::Minor, 6),
    (Quality::Major, 6),
    (Quality::Minor, 7),
    (Quality::Major, 7),
];

/// Widest interval number accepted: ten octaves above the unison.
pub const MAX_NUMBER: u32 = 71;

const fn is_perfect_number(simple: u32) -> bool {
    simple == 1 || simple == 4 || simple == 5
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Interval {
    quality: Quality,
    number: u32,
}

pub const UNISON: Interval = Interval {
    quality: Quality::Perfect,
    number: 1,
};

pub const AUGMENTED_UNISON: Interval = Interval {
    quality: Quality::Augmented,
    number: 1,
};

pub const OCTAVE: Interval = Interval {
    quality: Quality::Perfect,
    number: 8,
};

impl Interval {
    pub fn new(quality: Quality, number: u32) -> TheoryResult<Interval> {
        let invalid = |reason: &str| TheoryError::InvalidIntervalSpec {
            spec: format!("{}{}", number, quality.symbol()),
            reason: reason.to_owned(),
        };
        if number == 0 {
            return Err(invalid("interval numbers start at 1"));
        }
        if number > MAX_NUMBER {
            return Err(invalid("interval is wider than ten octaves"));
        }
        let simple = (number - 1) % 7 + 1;
        let allowed = match quality {
            Quality::Perfect => is_perfect_number(simple),
            Quality::Major | Quality::Minor => !is_perfect_number(simple),
            Quality::Augmented => true,
            Quality::Diminished => number != 1,
        };
        if !allowed {
            return Err(invalid("quality does not apply to this interval number"));
        }
        Ok(Interval { quality, number })
    }

    pub fn from_name(spec: &str) -> TheoryResult<Interval> {
        let trimmed = spec.trim();
        let (number, quality) = parse_complete(trimmed, parse_interval_parts).map_err(|reason| {
            TheoryError::InvalidIntervalSpec {
                spec: spec.to_owned(),
                reason,
            }
        })?;
        Interval::new(quality, number)
    }

    /// The canonical interval spanning `semitones`.
    pub fn from_semitones(semitones: u32) -> Interval {
        let (quality, simple) = CANONICAL[(semitones % 12) as usize];
        Interval {
            quality,
            number: simple + 7 * (semitones / 12),
        }
    }

    /// The canonical interval spanning the distance between two pitches, whichever is higher.
    pub fn between(a: Pitch, b: Pitch) -> Interval {
        Interval::from_semitones(a.semitones_to(b).unsigned_abs())
    }

    /// Spells `semitones` as an interval of the given number, when a standard quality fits.
    pub(crate) fn spelled(number: u32, semitones: u32) -> Interval {
        let simple = (number - 1) % 7 + 1;
        let base = SIMPLE_BASE[(simple - 1) as usize] + 12 * ((number - 1) / 7);
        let offset = semitones as i64 - base as i64;
        let quality = match (is_perfect_number(simple), offset) {
            (true, 0) => Quality::Perfect,
            (true, -1) if number != 1 => Quality::Diminished,
            (true, 1) => Quality::Augmented,
            (false, 0) => Quality::Major,
            (false, -1) => Quality::Minor,
            (false, -2) => Quality::Diminished,
            (false, 1) => Quality::Augmented,
            _ => return Interval::from_semitones(semitones),
        };
        Interval { quality, number }
    }

    pub const fn quality(&self) -> Quality {
        self.quality
    }
    pub const fn number(&self) -> u32 {
        self.number
    }
    pub const fn simple_number(&self) -> u32 {
        (self.number - 1) % 7 + 1
    }
    pub const fn octaves(&self) -> u32 {
        (self.number - 1) / 7
    }
    pub const fn is_compound(&self) -> bool {
        self.number > 8
    }

    pub fn semitones(&self) -> u32 {
        let simple = self.simple_number();
        let octaves = self.octaves().saturating_mul(12);
        let base = SIMPLE_BASE[(simple - 1) as usize].saturating_add(octaves);
        match self.quality {
            Quality::Perfect | Quality::Major => base,
            Quality::Minor => base - 1,
            Quality::Augmented => base + 1,
            Quality::Diminished if is_perfect_number(simple) => base - 1,
            Quality::Diminished => base - 2,
        }
    }

    /// The same quality with its octaves removed; octaves themselves reduce to unisons.
    pub fn simple(&self) -> Interval {
        Interval {
            quality: self.quality,
            number: self.simple_number(),
        }
    }

    pub fn name(&self) -> String {
        self.to_string()
    }

    pub fn long_name(&self) -> String {
        let number = match self.number {
            1 => "unison".to_owned(),
            2 => "second".to_owned(),
            3 => "third".to_owned(),
            4 => "fourth".to_owned(),
            5 => "fifth".to_owned(),
            6 => "sixth".to_owned(),
            7 => "seventh".to_owned(),
            8 => "octave".to_owned(),
            9 => "ninth".to_owned(),
            10 => "tenth".to_owned(),
            11 => "eleventh".to_owned(),
            12 => "twelfth".to_owned(),
            13 => "thirteenth".to_owned(),
            n => format!("{}th", n),
        };
        format!("{} {}", self.quality.long_name(), number)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.quality.symbol())
    }
}

impl FromStr for Interval {
    type Err = TheoryError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL_NAMES: [&str; 12] = [
        "1P", "2m", "2M", "3m", "3M", "4P", "4A", "5P", "6m", "6M", "7m", "7M",
    ];

    #[test]
    fn test_canonical_names() {
        for (semitones, name) in CANONICAL_NAMES.iter().enumerate() {
            let interval = Interval::from_semitones(semitones as u32);
            assert_eq!(*name, interval.name());
            assert_eq!(semitones as u32, interval.semitones());

            let parsed = Interval::from_name(name).unwrap();
            assert_eq!(*name, parsed.name());
            assert_eq!(interval, parsed);
        }
    }

    #[test]
    fn test_compound() {
        assert_eq!("8P", Interval::from_semitones(12).name());
        assert_eq!("9M", Interval::from_semitones(14).name());
        assert_eq!("15P", Interval::from_semitones(24).name());

        let ninth = Interval::from_name("9M").unwrap();
        assert_eq!(14, ninth.semitones());
        assert!(ninth.is_compound());
        assert!(!OCTAVE.is_compound());
        assert_eq!("2M", ninth.simple().name());
        assert_eq!(1, ninth.octaves());
    }

    #[test]
    fn test_altered() {
        assert_eq!(6, Interval::from_name("5d").unwrap().semitones());
        assert_eq!(8, Interval::from_name("5A").unwrap().semitones());
        assert_eq!(9, Interval::from_name("7d").unwrap().semitones());
        assert_eq!(0, Interval::from_name("2d").unwrap().semitones());
        assert_eq!(1, AUGMENTED_UNISON.semitones());
    }

    #[test]
    fn test_invalid_specs() {
        for spec in &["", "3", "M3", "3P", "5M", "4m", "1d", "0P", "3Mx", "three"] {
            match Interval::from_name(spec) {
                Err(TheoryError::InvalidIntervalSpec { .. }) => {}
                other => panic!("Spec {:?} gave {:?}", spec, other),
            }
        }
    }

    #[test]
    fn test_number_limit() {
        let widest = Interval::from_name("71P").unwrap();
        assert_eq!(120, widest.semitones());
        assert_eq!(MAX_NUMBER, widest.number());
        for spec in &["72M", "4000000000M"] {
            match Interval::from_name(spec) {
                Err(TheoryError::InvalidIntervalSpec { .. }) => {}
                other => panic!("Spec {:?} gave {:?}", spec, other),
            }
        }
        assert!(Interval::new(Quality::Major, u32::MAX).is_err());
    }

    #[test]
    fn test_spelled() {
        assert_eq!("3m", Interval::spelled(3, 3).name());
        assert_eq!("4A", Interval::spelled(4, 6).name());
        assert_eq!("5d", Interval::spelled(5, 6).name());
        assert_eq!("9m", Interval::spelled(9, 13).name());
        // No standard quality for a third of 7 semitones.
        assert_eq!("5P", Interval::spelled(3, 7).name());
    }

    #[test]
    fn test_between() {
        let e2 = Pitch::new(40);
        let c4 = Pitch::new(60);
        assert_eq!("13m", Interval::between(e2, c4).name());
        assert_eq!(Interval::between(c4, e2), Interval::between(e2, c4));
    }

    #[test]
    fn test_long_name() {
        assert_eq!("major third", Interval::from_name("3M").unwrap().long_name());
        assert_eq!("perfect octave", OCTAVE.long_name());
        assert_eq!("augmented fourth", Interval::from_semitones(6).long_name());
    }
}
