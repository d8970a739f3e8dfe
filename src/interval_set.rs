use crate::interval::{Interval, UNISON};
use crate::note::Note;
use crate::parser::{parse_complete, parse_interval_list};
use crate::pitch::{PitchClass, PitchClassSet};
use crate::utils::wrap_octave;
use crate::{TheoryError, TheoryResult};
use std::collections::HashSet;

/// Intervals measured from an implicit root, in order: the shape of a scale or chord.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

fn describe(intervals: &[Interval]) -> String {
    intervals
        .iter()
        .map(Interval::name)
        .collect::<Vec<_>>()
        .join(" ")
}

impl IntervalSet {
    /// Fails unless the set is empty or starts on the unison with no repeated semitone count.
    pub fn new(intervals: Vec<Interval>) -> TheoryResult<IntervalSet> {
        let invalid = |reason: String| TheoryError::InvalidIntervalSpec {
            spec: describe(&intervals),
            reason,
        };
        if let Some(first) = intervals.first() {
            if first.semitones() != 0 || first.number() != 1 {
                return Err(invalid(format!("set starts on {} instead of 1P", first)));
            }
        }
        let mut seen = HashSet::new();
        for interval in &intervals {
            if !seen.insert(interval.semitones()) {
                return Err(invalid(format!(
                    "{} repeats a semitone offset already in the set",
                    interval
                )));
            }
        }
        Ok(IntervalSet { intervals })
    }

    /// Parses a whitespace, comma or dash separated list such as `"1P 3M 5P"`.
    pub fn parse(spec: &str) -> TheoryResult<IntervalSet> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Ok(IntervalSet::default());
        }
        let parts = parse_complete(trimmed, parse_interval_list).map_err(|reason| {
            TheoryError::InvalidIntervalSpec {
                spec: spec.to_owned(),
                reason,
            }
        })?;
        let intervals = parts
            .into_iter()
            .map(|(number, quality)| Interval::new(quality, number))
            .collect::<TheoryResult<Vec<_>>>()?;
        IntervalSet::new(intervals)
    }

    pub fn from_names<S: AsRef<str>>(specs: &[S]) -> TheoryResult<IntervalSet> {
        let intervals = specs
            .iter()
            .map(|spec| Interval::from_name(spec.as_ref()))
            .collect::<TheoryResult<Vec<_>>>()?;
        IntervalSet::new(intervals)
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }
    pub fn len(&self) -> usize {
        self.intervals.len()
    }
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }
    pub fn get(&self, index: usize) -> Option<&Interval> {
        self.intervals.get(index)
    }
    pub fn names(&self) -> Vec<String> {
        self.intervals.iter().map(Interval::name).collect()
    }

    /// The root moved up by each interval, in set order.
    pub fn notes(&self, root: &Note) -> Vec<Note> {
        self.intervals
            .iter()
            .map(|interval| root.transpose_up(*interval))
            .collect()
    }

    /// Pitch classes of the set when rooted on C.
    pub fn pitch_classes(&self) -> PitchClassSet {
        self.intervals
            .iter()
            .map(|interval| PitchClass::from_u8(wrap_octave(interval.semitones() as i32)))
            .collect()
    }

    /// Starts the set on its `degree`th member (1-based): rotates the list left and
    /// measures every interval again from the new first one.
    ///
    /// Members above the pivot keep their distance from it, compound spans included;
    /// members below it move up an octave. A member that lands on a semitone count
    /// already taken (an octave double of an earlier member) is dropped.
    pub fn rotate(&self, degree: usize) -> TheoryResult<IntervalSet> {
        if degree < 1 || degree > self.len() {
            return Err(TheoryError::DegreeOutOfRange {
                degree,
                max: self.len(),
            });
        }
        if degree == 1 {
            return Ok(self.clone());
        }
        let pivot = self.intervals[degree - 1];
        let mut seen = HashSet::new();
        let rotated = self.intervals[degree - 1..]
            .iter()
            .chain(self.intervals[..degree - 1].iter())
            .map(|interval| rebase(*interval, pivot))
            .filter(|interval| seen.insert(interval.semitones()))
            .collect();
        IntervalSet::new(rotated)
    }
}

fn rebase(interval: Interval, pivot: Interval) -> Interval {
    let semitones = interval.semitones() as i32 - pivot.semitones() as i32;
    let steps = interval.number() as i32 - pivot.number() as i32;
    let (semitones, steps) = if semitones < 0 {
        (semitones.rem_euclid(12), steps.rem_euclid(7))
    } else {
        (semitones, steps.max(0))
    };
    if semitones == 0 && steps == 0 {
        UNISON
    } else {
        Interval::spelled(steps as u32 + 1, semitones as u32)
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;
    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
