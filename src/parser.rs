//! String front end: turns note names, interval specs and progression notation
//! into typed values so the rest of the crate never handles raw strings.

use crate::interval::Quality;
use crate::note::Note;
use crate::progression::DegreeRef;
use nom::{
    error::{context, convert_error},
    multi::separated_nonempty_list,
    Err as NomErr,
};

mod utils;
pub use utils::*;

mod values;
pub use values::*;

pub type ParseError<'a> = nom::error::VerboseError<&'a str>;

pub type ParseResult<'a, T> = nom::IResult<&'a str, T, ParseError<'a>>;

fn describe_failure<'a>(input: &'a str, err: NomErr<ParseError<'a>>) -> String {
    if input.is_empty() {
        return "Empty input.".to_owned();
    }
    match err {
        NomErr::Error(e) | NomErr::Failure(e) => convert_error(input, e),
        NomErr::Incomplete(ic) => format!("Incomplete: {:?}", ic),
    }
}

/// Runs `parser` over all of `input`, rendering any failure as a readable message.
pub fn parse_complete<'a, T, F>(input: &'a str, parser: F) -> Result<T, String>
where
    F: Fn(&'a str) -> ParseResult<'a, T>,
{
    let (rest, res) = parser(input).map_err(|e| describe_failure(input, e))?;
    if !rest.trim().is_empty() {
        return Err(format!(
            "Could not parse full input. Rest: {:?}",
            rest.trim()
        ));
    }
    Ok(res)
}

/// Runs `parser` over the start of `input` and hands back whatever it left over.
pub fn parse_prefix<'a, T, F>(input: &'a str, parser: F) -> Result<(T, &'a str), String>
where
    F: Fn(&'a str) -> ParseResult<'a, T>,
{
    let (rest, res) = parser(input).map_err(|e| describe_failure(input, e))?;
    Ok((res, rest))
}

pub fn parse_note_list(input: &str) -> ParseResult<Vec<Note>> {
    context(
        "Note list",
        separated_nonempty_list(list_separator, parse_note),
    )(input)
}

pub fn parse_interval_list(input: &str) -> ParseResult<Vec<(u32, Quality)>> {
    context(
        "Interval list",
        separated_nonempty_list(list_separator, parse_interval_parts),
    )(input)
}

pub fn parse_progression(input: &str) -> ParseResult<Vec<DegreeRef>> {
    context(
        "Progression",
        separated_nonempty_list(list_separator, parse_degree_ref),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::ChordKind;
    use crate::note::Letter;

    #[test]
    fn test_complete() {
        let notes = parse_complete("E2 A2, D3-G3", parse_note_list).unwrap();
        assert_eq!(4, notes.len());
        assert_eq!(Letter::G, notes[3].letter());

        let err = parse_complete("C E ?", parse_note_list).unwrap_err();
        assert!(err.contains("Rest"), "{}", err);

        let err = parse_complete("?", parse_note_list).unwrap_err();
        assert!(err.contains("Note list"), "{}", err);
    }

    #[test]
    fn test_prefix() {
        let (root, rest) = parse_prefix("C#m7b5", parse_pitch_name).unwrap();
        assert_eq!("C#", root.name());
        assert_eq!("m7b5", rest);

        let (root, rest) = parse_prefix("Bbsus4", parse_pitch_name).unwrap();
        assert_eq!("Bb", root.name());
        assert_eq!("sus4", rest);
    }

    #[test]
    fn test_intervals() {
        let parts = parse_complete("1P 3m 5d 7d", parse_interval_list).unwrap();
        assert_eq!(
            vec![
                (1, Quality::Perfect),
                (3, Quality::Minor),
                (5, Quality::Diminished),
                (7, Quality::Diminished)
            ],
            parts
        );
    }

    #[test]
    fn test_progression() {
        let steps = parse_complete("ii7 - V7 - Imaj7", parse_progression).unwrap();
        assert_eq!(3, steps.len());
        assert_eq!(2, steps[0].degree());
        assert_eq!(ChordKind::Minor7, steps[0].kind());
        assert_eq!(ChordKind::Dominant7, steps[1].kind());
        assert_eq!(ChordKind::Major7, steps[2].kind());

        let steps = parse_complete("i bVII bVI V", parse_progression).unwrap();
        assert_eq!(-1, steps[1].accidental());
        assert_eq!(7, steps[1].degree());
        assert_eq!(ChordKind::Major, steps[1].kind());

        let steps = parse_complete("vii°–iii", parse_progression).unwrap();
        assert_eq!(ChordKind::Diminished, steps[0].kind());
        assert_eq!(ChordKind::Minor, steps[1].kind());

        assert!(parse_complete("ii-X-I", parse_progression).is_err());
        assert!(parse_complete("V7zz", parse_progression).is_err());
    }
}
