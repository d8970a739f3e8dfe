use nom::{
    alt,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while},
    character::complete::one_of,
    combinator::{map, map_opt, map_res, opt},
    error::context,
    multi::many0,
    named,
    sequence::{pair, tuple},
    tag, tag_no_case,
};

use super::{rawint, rawuint, ParseError, ParseResult};
use crate::chord::ChordKind;
use crate::interval::Quality;
use crate::note::{Letter, Note};
use crate::pitch::Octave;
use crate::progression::DegreeRef;
use std::str::FromStr;

named!(
    pub parse_letter<&str, Letter, ParseError>,
    alt!(
        tag_no_case!("C") => {|_| Letter::C} |
        tag_no_case!("D") => {|_| Letter::D} |
        tag_no_case!("E") => {|_| Letter::E} |
        tag_no_case!("F") => {|_| Letter::F} |
        tag_no_case!("G") => {|_| Letter::G} |
        tag_no_case!("A") => {|_| Letter::A} |
        tag_no_case!("B") => {|_| Letter::B}
    )
);

named!(
    pub parse_quality<&str, Quality, ParseError>,
    alt!(
        tag!("P") => {|_| Quality::Perfect} |
        tag!("M") => {|_| Quality::Major} |
        tag!("m") => {|_| Quality::Minor} |
        tag!("A") => {|_| Quality::Augmented} |
        tag!("d") => {|_| Quality::Diminished}
    )
);

fn parse_sharp(input: &str) -> ParseResult<i8> {
    alt((
        map(one_of("#♯"), |_| 1),
        map(tag("x"), |_| 2),
    ))(input)
}

fn parse_flat(input: &str) -> ParseResult<i8> {
    map(one_of("b♭"), |_| -1)(input)
}

pub fn parse_accidentals(input: &str) -> ParseResult<i8> {
    let marks = many0(alt((parse_sharp, parse_flat)));
    map(marks, |marks: Vec<i8>| {
        marks.into_iter().fold(0i8, |acc, mark| acc.saturating_add(mark))
    })(input)
}

pub fn parse_octave(input: &str) -> ParseResult<Octave> {
    let i8_parser = map_res(rawint, i8::from_str);
    map_opt(i8_parser, Octave::from_raw)(input)
}

/// A letter and its accidentals, without an octave: the root of a chord symbol.
pub fn parse_pitch_name(input: &str) -> ParseResult<Note> {
    let (input, letter) = context("Note letter", parse_letter)(input)?;
    let (input, accidental) = parse_accidentals(input)?;
    Ok((input, Note::new(letter, accidental, None)))
}

pub fn parse_note(input: &str) -> ParseResult<Note> {
    let (input, (letter, accidental, octave)) = tuple((
        context("Note letter", parse_letter),
        parse_accidentals,
        opt(context("Note octave", parse_octave)),
    ))(input)?;
    Ok((input, Note::new(letter, accidental, octave)))
}

pub fn parse_interval_parts(input: &str) -> ParseResult<(u32, Quality)> {
    pair(
        context("Interval number", map_res(rawuint, u32::from_str)),
        context("Interval quality", parse_quality),
    )(input)
}

fn parse_numeral(input: &str) -> ParseResult<(usize, bool)> {
    let numerals = alt((
        tag_no_case("vii"),
        tag_no_case("vi"),
        tag_no_case("v"),
        tag_no_case("iv"),
        tag_no_case("iii"),
        tag_no_case("ii"),
        tag_no_case("i"),
    ));
    map_opt(numerals, |raw: &str| {
        let degree = match raw.to_ascii_lowercase().as_str() {
            "i" => 1,
            "ii" => 2,
            "iii" => 3,
            "iv" => 4,
            "v" => 5,
            "vi" => 6,
            "vii" => 7,
            _ => return None,
        };
        let upper = raw.starts_with(|c: char| c.is_ascii_uppercase());
        Some((degree, upper))
    })(input)
}

fn numeral_suffix(input: &str) -> ParseResult<&str> {
    take_while(|c: char| !c.is_whitespace() && !"-–,".contains(c))(input)
}

/// A Roman numeral chord reference such as `ii7`, `bVII` or `vii°`.
pub fn parse_degree_ref(input: &str) -> ParseResult<DegreeRef> {
    let (input, accidental) = opt(alt((parse_flat, parse_sharp)))(input)?;
    let (input, (degree, upper)) = context("Roman numeral", parse_numeral)(input)?;
    let (input, kind) = context(
        "Numeral suffix",
        map_opt(numeral_suffix, |suffix| ChordKind::from_numeral(upper, suffix)),
    )(input)?;
    let res = DegreeRef::new(degree, accidental.unwrap_or(0), kind);
    Ok((input, res))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        assert_eq!(Ok(("", Letter::A)), parse_letter("a"));
        assert_eq!(Ok(("b", Letter::B)), parse_letter("Bb"));
        assert!(parse_letter("H").is_err());
    }

    #[test]
    fn test_accidentals() {
        assert_eq!(Ok(("", 0)), parse_accidentals(""));
        assert_eq!(Ok(("4", 1)), parse_accidentals("#4"));
        assert_eq!(Ok(("", -2)), parse_accidentals("b♭"));
        assert_eq!(Ok(("m7", 3)), parse_accidentals("x#m7"));
    }

    #[test]
    fn test_note() {
        let (rest, note) = parse_note("F#-1 rest").unwrap();
        assert_eq!(" rest", rest);
        assert_eq!(Letter::F, note.letter());
        assert_eq!(Some(Octave::new(-1)), note.octave());

        let (rest, note) = parse_note("Gb").unwrap();
        assert_eq!("", rest);
        assert_eq!(None, note.octave());
    }

    #[test]
    fn test_octave_range() {
        assert_eq!(Ok(("", Octave::new(9))), parse_octave("9"));
        assert_eq!(Ok(("", Octave::new(-1))), parse_octave("-1"));
        assert!(parse_octave("10").is_err());
        assert!(parse_octave("-2").is_err());
        assert!(parse_octave("127").is_err());

        // The octave is left unread, so a complete parse of the name fails.
        let (rest, note) = parse_note("B127").unwrap();
        assert_eq!("127", rest);
        assert_eq!(None, note.octave());
    }

    #[test]
    fn test_degree_ref() {
        let (_, step) = parse_degree_ref("#iv°").unwrap();
        assert_eq!(4, step.degree());
        assert_eq!(1, step.accidental());
        assert_eq!(ChordKind::Diminished, step.kind());

        let (_, step) = parse_degree_ref("IVsus4").unwrap();
        assert_eq!(4, step.degree());
        assert_eq!(ChordKind::Sus4, step.kind());

        let (_, step) = parse_degree_ref("viiø7").unwrap();
        assert_eq!(7, step.degree());
        assert_eq!(ChordKind::HalfDiminished7, step.kind());
    }
}
