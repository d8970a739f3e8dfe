use crate::utils::wrap_octave;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PitchClass {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl PitchClass {
    pub const fn all() -> &'static [PitchClass] {
        &[
            PitchClass::C,
            PitchClass::Cs,
            PitchClass::D,
            PitchClass::Ds,
            PitchClass::E,
            PitchClass::F,
            PitchClass::Fs,
            PitchClass::G,
            PitchClass::Gs,
            PitchClass::A,
            PitchClass::As,
            PitchClass::B,
        ]
    }
    pub const fn shift(&self, offset: i32) -> Self {
        PitchClass::from_u8(wrap_octave(self.as_u8() as i32 + offset))
    }
    pub const fn from_u8(raw: u8) -> Self {
        match raw % 12 {
            0 => PitchClass::C,
            1 => PitchClass::Cs,
            2 => PitchClass::D,
            3 => PitchClass::Ds,
            4 => PitchClass::E,
            5 => PitchClass::F,
            6 => PitchClass::Fs,
            7 => PitchClass::G,
            8 => PitchClass::Gs,
            9 => PitchClass::A,
            10 => PitchClass::As,
            // Always 11
            _ => PitchClass::B,
        }
    }
    pub const fn as_u8(&self) -> u8 {
        match self {
            PitchClass::C => 0,
            PitchClass::Cs => 1,
            PitchClass::D => 2,
            PitchClass::Ds => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::Fs => 6,
            PitchClass::G => 7,
            PitchClass::Gs => 8,
            PitchClass::A => 9,
            PitchClass::As => 10,
            PitchClass::B => 11,
        }
    }
    /// Semitones needed to move up from `self` to `other`, in `[0, 11]`.
    pub const fn distance_up(&self, other: PitchClass) -> u8 {
        wrap_octave(other.as_u8() as i32 - self.as_u8() as i32)
    }
}

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Octave(i8);

/// Lowest octave a note name may spell.
pub const MIN_OCTAVE: i8 = -1;
/// Highest octave a note name may spell.
pub const MAX_OCTAVE: i8 = 9;

// Stays at the i8 bounds instead of wrapping around.
const fn saturate_i8(raw: i32) -> i8 {
    if raw < i8::MIN as i32 {
        i8::MIN
    } else if raw > i8::MAX as i32 {
        i8::MAX
    } else {
        raw as i8
    }
}

impl Octave {
    pub const fn new(raw: i8) -> Self {
        Octave(raw)
    }
    /// An octave in the `MIN_OCTAVE..=MAX_OCTAVE` range a note name can spell.
    pub const fn from_raw(raw: i8) -> Option<Self> {
        if raw < MIN_OCTAVE || raw > MAX_OCTAVE {
            None
        } else {
            Some(Octave(raw))
        }
    }
    pub const fn as_raw(&self) -> i8 {
        self.0
    }
    pub const fn shift(&self, octaves: i32) -> Self {
        Octave(saturate_i8((self.0 as i32).saturating_add(octaves)))
    }
}

/// Octave assumed when a note is spelled without one.
pub const DEFAULT_OCTAVE: Octave = Octave(4);

/// Absolute pitch in semitones, numbered so that C-1 is 0 and A4 is 69.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Pitch(i32);

impl Pitch {
    pub const fn new(value: i32) -> Self {
        Pitch(value)
    }
    pub const fn from_parts(class: PitchClass, octave: Octave) -> Self {
        Pitch((octave.as_raw() as i32 + 1) * 12 + class.as_u8() as i32)
    }
    pub const fn value(&self) -> i32 {
        self.0
    }
    pub const fn pitch_class(&self) -> PitchClass {
        PitchClass::from_u8(wrap_octave(self.0))
    }
    pub const fn octave(&self) -> Octave {
        Octave::new(saturate_i8(self.0.div_euclid(12) - 1))
    }
    pub const fn transpose(&self, semitones: i32) -> Self {
        Pitch(self.0.saturating_add(semitones))
    }
    /// Signed distance from `self` to `other`.
    pub const fn semitones_to(&self, other: Pitch) -> i32 {
        other.0 - self.0
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct PitchClassSet {
    // Bit structure: the "k"th bit is set when pitch class "k" is in the set,
    // so the least significant bit stands for C.
    mask: u16,
}

const CLASSES_MASK: u16 = 0x0FFF;

impl PitchClassSet {
    pub const fn empty() -> Self {
        PitchClassSet { mask: 0 }
    }
    pub const fn with(mut self, class: PitchClass) -> Self {
        self.mask |= 1 << class.as_u8();
        self
    }
    pub const fn without(mut self, class: PitchClass) -> Self {
        self.mask &= !(1 << class.as_u8());
        self
    }
    pub const fn contains(&self, class: PitchClass) -> bool {
        self.mask & (1 << class.as_u8()) != 0
    }
    pub const fn len(&self) -> usize {
        (self.mask & CLASSES_MASK).count_ones() as usize
    }
    pub const fn is_empty(&self) -> bool {
        self.mask & CLASSES_MASK == 0
    }
    pub const fn as_u16(&self) -> u16 {
        self.mask
    }
    /// Moves every member `semitones` up, wrapping at the octave.
    pub const fn transpose(&self, semitones: i32) -> Self {
        let shift = wrap_octave(semitones) as u32;
        let notes = self.mask & CLASSES_MASK;
        let rotated = ((notes << shift) | (notes >> (12 - shift))) & CLASSES_MASK;
        PitchClassSet { mask: rotated }
    }
    pub fn iter(&self) -> impl Iterator<Item = PitchClass> + '_ {
        PitchClass::all()
            .iter()
            .copied()
            .filter(move |class| self.contains(*class))
    }
}

impl std::iter::FromIterator<PitchClass> for PitchClassSet {
    fn from_iter<I: IntoIterator<Item = PitchClass>>(iter: I) -> Self {
        iter.into_iter()
            .fold(PitchClassSet::empty(), |set, class| set.with(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes() {
        let c = PitchClass::C;
        assert_eq!(PitchClass::D, c.shift(2));
        assert_eq!(PitchClass::As, c.shift(-2));
        assert_eq!(PitchClass::C, c.shift(-24));
        assert_eq!(10, PitchClass::D.distance_up(PitchClass::C));
        assert_eq!(0, PitchClass::G.distance_up(PitchClass::G));
    }

    #[test]
    fn test_pitch() {
        let a4 = Pitch::from_parts(PitchClass::A, Octave::new(4));
        assert_eq!(69, a4.value());
        assert_eq!(PitchClass::A, a4.pitch_class());
        assert_eq!(Octave::new(4), a4.octave());

        let b3 = a4.transpose(-10);
        assert_eq!(PitchClass::B, b3.pitch_class());
        assert_eq!(Octave::new(3), b3.octave());
        assert_eq!(10, b3.semitones_to(a4));

        let lowest = Pitch::new(-1);
        assert_eq!(PitchClass::B, lowest.pitch_class());
        assert_eq!(Octave::new(-2), lowest.octave());
    }

    #[test]
    fn test_octave_bounds() {
        assert_eq!(Some(Octave::new(-1)), Octave::from_raw(MIN_OCTAVE));
        assert_eq!(Some(Octave::new(9)), Octave::from_raw(MAX_OCTAVE));
        assert_eq!(None, Octave::from_raw(-2));
        assert_eq!(None, Octave::from_raw(10));
        assert_eq!(None, Octave::from_raw(127));

        // Shifting past the representable range stops at the edge.
        let top = Octave::new(i8::MAX);
        assert_eq!(top, top.shift(1));
        assert_eq!(Octave::new(i8::MIN), Octave::new(i8::MIN).shift(-3));
        assert_eq!(Octave::new(10), Octave::new(9).shift(1));

        assert_eq!(Octave::new(i8::MAX), Pitch::new(i32::MAX).octave());
        assert_eq!(Octave::new(i8::MIN), Pitch::new(i32::MIN).octave());
        assert_eq!(Pitch::new(i32::MAX), Pitch::new(i32::MAX).transpose(1));
    }

    #[test]
    fn test_class_set() {
        let c_major: PitchClassSet = [0, 2, 4, 5, 7, 9, 11]
            .iter()
            .map(|raw| PitchClass::from_u8(*raw))
            .collect();
        let a_minor: PitchClassSet = [9, 11, 0, 2, 4, 5, 7]
            .iter()
            .map(|raw| PitchClass::from_u8(*raw))
            .collect();

        assert_eq!(
            c_major,
            a_minor,
            "Difference : {:?}",
            PitchClass::all()
                .iter()
                .copied()
                .filter(|class| a_minor.contains(*class) != c_major.contains(*class))
                .collect::<Vec<_>>()
        );
        assert_eq!(7, c_major.len());
        assert!(!c_major.contains(PitchClass::Fs));

        let g_major = c_major.transpose(7);
        assert!(g_major.contains(PitchClass::Fs));
        assert!(!g_major.contains(PitchClass::F));
        assert_eq!(c_major, g_major.transpose(-7));

        let without_b = c_major.without(PitchClass::B);
        assert_eq!(6, without_b.len());
        assert!(PitchClassSet::empty().is_empty());
    }
}
