use super::{FretRange, Guitar, GuitarNote, MatchMode, SearchOptions};
use crate::note::{Note, NoteSet};
use crate::pitch::{Pitch, PitchClass, PitchClassSet};
use crate::utils::TuplerIter;
use log::{debug, trace};
use std::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum MatchKey {
    Class(PitchClass),
    Exact(Pitch),
}

impl MatchKey {
    fn for_target(target: &Note, mode: MatchMode) -> Self {
        match (mode, target.octave()) {
            (MatchMode::ExactPitch, Some(_)) => MatchKey::Exact(target.pitch()),
            _ => MatchKey::Class(target.pitch_class()),
        }
    }

    fn matches(&self, sounded: &Note) -> bool {
        match self {
            MatchKey::Class(class) => sounded.pitch_class() == *class,
            // A string tuned without an octave has no absolute pitch to compare.
            MatchKey::Exact(pitch) => sounded.octave().is_some() && sounded.pitch() == *pitch,
        }
    }
}

/// Fretboard positions that sounded one of a search's target notes, ordered by
/// string, then fret, then target.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct GuitarNoteSet {
    notes: Vec<GuitarNote>,
}

impl GuitarNoteSet {
    /// Checks every string at every fret and keeps the positions inside the
    /// search region that sound one of `targets`.
    pub fn search(guitar: &Guitar, targets: &[Note], options: &SearchOptions) -> GuitarNoteSet {
        let region = options.region_for(guitar);
        let mode = options.match_mode();
        let keyed: Vec<(Note, MatchKey)> = TuplerIter::new(targets.iter().copied(), |target| {
            MatchKey::for_target(target, mode)
        })
        .collect();

        let mut notes = Vec::new();
        for string in guitar.strings() {
            for fret in guitar.full_range().iter() {
                if !region.contains(fret) {
                    continue;
                }
                let sounded = string.note_at(fret);
                for (target, key) in keyed.iter() {
                    if key.matches(&sounded) {
                        trace!(
                            "String {} fret {} sounds {} for target {}",
                            string.index(),
                            fret,
                            sounded,
                            target
                        );
                        let found = GuitarNote::new(string.index(), fret, sounded);
                        notes.push(found.with_target(*target));
                    }
                }
            }
        }
        debug!(
            "Found {} positions for {} targets in frets {}..={}",
            notes.len(),
            targets.len(),
            region.low(),
            region.high()
        );
        GuitarNoteSet { notes }
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

    /// `(string index, fret)` pairs in result order.
    pub fn positions(&self) -> Vec<(usize, i32)> {
        self.notes.iter().map(GuitarNote::position).collect()
    }

    pub fn on_string(&self, string_index: usize) -> GuitarNoteSet {
        self.filtered(|note| note.string_index() == string_index)
    }

    pub fn in_region<R: Into<FretRange>>(&self, region: R) -> GuitarNoteSet {
        let region = region.into();
        self.filtered(|note| region.contains(note.fret()))
    }

    pub fn for_target(&self, target: &Note) -> GuitarNoteSet {
        self.filtered(|note| note.target().as_ref() == Some(target))
    }

    pub fn pitch_classes(&self) -> PitchClassSet {
        self.notes.iter().map(|note| note.note().pitch_class()).collect()
    }

    fn filtered<F: Fn(&GuitarNote) -> bool>(&self, keep: F) -> GuitarNoteSet {
        let notes = self.notes.iter().filter(|note| keep(*note)).copied().collect();
        GuitarNoteSet { notes }
    }
}

impl<'a> IntoIterator for &'a GuitarNoteSet {
    type Item = &'a GuitarNote;
    type IntoIter = std::slice::Iter<'a, GuitarNote>;
    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

/// A chord shape: at most one sounded position per string, the rest muted.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct GuitarVoicing {
    // Indexed by string; `None` is a muted string.
    strings: Vec<Option<GuitarNote>>,
}

impl GuitarVoicing {
    /// Every shape inside the search region that sounds each pitch class of `targets`
    /// and nothing else, with the first target in the bass. Sounded strings form one
    /// unbroken run and the fretted notes lie within the search stretch. Shapes that
    /// stay lower on the neck come first, then those muting fewer strings.
    pub fn search(guitar: &Guitar, targets: &NoteSet, options: &SearchOptions) -> Vec<GuitarVoicing> {
        let bass = match targets.first() {
            Some(bass) => bass.pitch_class(),
            None => return Vec::new(),
        };
        let wanted = targets.pitch_classes();
        let found = GuitarNoteSet::search(guitar, targets.notes(), options);
        let candidates: Vec<Vec<GuitarNote>> = guitar
            .strings()
            .iter()
            .map(|string| {
                let mut frets: Vec<GuitarNote> = Vec::new();
                for note in found.on_string(string.index()).iter() {
                    if frets.last().map(GuitarNote::fret) != Some(note.fret()) {
                        frets.push(*note);
                    }
                }
                frets
            })
            .collect();

        let mut shapes = Vec::new();
        let mut current = Vec::with_capacity(candidates.len());
        collect_shapes(&candidates, options.stretch(), &mut current, &mut shapes);
        let mut voicings: Vec<GuitarVoicing> = shapes
            .into_iter()
            .map(|strings| GuitarVoicing { strings })
            .filter(|voicing| voicing.is_complete(bass, wanted))
            .collect();
        voicings.sort_by_key(|voicing| (voicing.highest_fret(), voicing.muted_count()));
        debug!(
            "Found {} voicings for {:?} with a stretch of {}",
            voicings.len(),
            targets.names(),
            options.stretch()
        );
        voicings
    }

    pub fn strings(&self) -> &[Option<GuitarNote>] {
        &self.strings
    }

    /// Fret per string, `None` where the string is muted.
    pub fn frets(&self) -> Vec<Option<i32>> {
        self.strings
            .iter()
            .map(|string| string.map(|note| note.fret()))
            .collect()
    }

    /// Sounded positions, highest string first.
    pub fn notes(&self) -> Vec<GuitarNote> {
        self.strings.iter().flatten().copied().collect()
    }

    /// The position on the lowest sounded string.
    pub fn bass(&self) -> Option<GuitarNote> {
        self.strings.iter().rev().flatten().next().copied()
    }

    pub fn sounded_count(&self) -> usize {
        self.strings.iter().flatten().count()
    }
    pub fn muted_count(&self) -> usize {
        self.strings.len() - self.sounded_count()
    }
    pub fn highest_fret(&self) -> i32 {
        self.notes().iter().map(GuitarNote::fret).max().unwrap_or(0)
    }

    /// Distance between the lowest and highest fretted note; open strings are free.
    pub fn span(&self) -> i32 {
        fretted_span(&self.strings)
    }

    pub fn pitch_classes(&self) -> PitchClassSet {
        self.notes().iter().map(|note| note.note().pitch_class()).collect()
    }

    /// Chart notation from the lowest string to the highest, `x` for muted strings:
    /// `x32010`. Frets are dash-separated once any of them needs two digits.
    pub fn diagram(&self) -> String {
        let marks: Vec<String> = self
            .strings
            .iter()
            .rev()
            .map(|string| match string {
                Some(note) => note.fret().to_string(),
                None => "x".to_owned(),
            })
            .collect();
        let separator = if marks.iter().any(|mark| mark.len() > 1) {
            "-"
        } else {
            ""
        };
        marks.join(separator)
    }

    fn is_complete(&self, bass: PitchClass, wanted: PitchClassSet) -> bool {
        let sounded: Vec<usize> = self
            .strings
            .iter()
            .enumerate()
            .filter(|(_, string)| string.is_some())
            .map(|(index, _)| index)
            .collect();
        let unbroken = match (sounded.first(), sounded.last()) {
            (Some(first), Some(last)) => last - first + 1 == sounded.len(),
            _ => false,
        };
        unbroken
            && self.bass().map(|note| note.note().pitch_class()) == Some(bass)
            && self.pitch_classes() == wanted
    }
}

impl fmt::Display for GuitarVoicing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.diagram())
    }
}

fn fretted_span(strings: &[Option<GuitarNote>]) -> i32 {
    let (low, high) = strings
        .iter()
        .flatten()
        .map(GuitarNote::fret)
        .filter(|fret| *fret > 0)
        .fold((i32::MAX, i32::MIN), |(low, high), fret| {
            (low.min(fret), high.max(fret))
        });
    if low > high {
        0
    } else {
        high - low
    }
}

// Walks the strings in order, trying a mute and then each candidate fret, and
// abandons a branch as soon as its fretted notes spread wider than `stretch`.
fn collect_shapes(
    candidates: &[Vec<GuitarNote>],
    stretch: i32,
    current: &mut Vec<Option<GuitarNote>>,
    shapes: &mut Vec<Vec<Option<GuitarNote>>>,
) {
    let choices = match candidates.get(current.len()) {
        Some(choices) => choices,
        None => {
            trace!("Candidate shape {:?}", current);
            shapes.push(current.clone());
            return;
        }
    };
    current.push(None);
    collect_shapes(candidates, stretch, current, shapes);
    current.pop();
    for note in choices {
        current.push(Some(*note));
        if fretted_span(current) <= stretch {
            collect_shapes(candidates, stretch, current, shapes);
        }
        current.pop();
    }
}
