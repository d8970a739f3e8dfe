/// Reduces a semitone count into `[0, 11]`.
pub const fn wrap_octave(semitones: i32) -> u8 {
    semitones.rem_euclid(12) as u8
}

/// Lowercases a table name and folds `_`, `-` and runs of whitespace into single spaces.
pub fn normalize_name(raw: &str) -> String {
    raw.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct TuplerIter<K, V, F: Fn(&K) -> V, I: Iterator<Item = K>> {
    iter: I,
    cb: F,
}

impl<K, V, F: Fn(&K) -> V, I: Iterator<Item = K>> TuplerIter<K, V, F, I> {
    pub fn new(iter: I, cb: F) -> Self {
        Self { iter, cb }
    }
}
impl<K, V, F: Fn(&K) -> V, I: Iterator<Item = K>> Iterator for TuplerIter<K, V, F, I> {
    type Item = (K, V);
    fn next(&mut self) -> Option<Self::Item> {
        let next_k = self.iter.next()?;
        let next_v = (self.cb)(&next_k);
        Some((next_k, next_v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        assert_eq!(10, wrap_octave(-2));
        assert_eq!(0, wrap_octave(24));
        assert_eq!(11, wrap_octave(-13));
    }

    #[test]
    fn test_normalize() {
        assert_eq!("harmonic minor", normalize_name("Harmonic_Minor"));
        assert_eq!("ii v i", normalize_name("ii-V-I"));
        assert_eq!("whole tone", normalize_name("  whole   TONE "));
    }

    #[test]
    fn test_tupler() {
        let pairs: Vec<_> = TuplerIter::new(1..4, |n| n * 10).collect();
        assert_eq!(vec![(1, 10), (2, 20), (3, 30)], pairs);
    }
}
