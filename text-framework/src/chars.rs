//! Character classifiers and literal matchers.
//!
//! Everything here is generic over any stream of `char`, including a
//! [`Filtered`](combinator_framework::Filtered) view, and reports
//! [`TextError`].

use crate::error::TextError;
use combinator_framework::{
    any_item, many, predictive_choice, satisfy, sequence, with_filter, Filtered, Outcome, Parser,
    Stream,
};

/// Matches exactly `expected`.
pub fn char<S>(expected: char) -> impl Parser<S, Output = char, Error = TextError>
where
    S: Stream<Item = char>,
{
    satisfy(
        move |c: &char| *c == expected,
        TextError::StringMismatch {
            expected: expected.to_string(),
        },
    )
}

/// Matches the literal `text`, producing it.
///
/// Running out of input part-way is a mismatch, not `EndOfInput`.
///
/// # Panics
///
/// Panics if `text` is empty.
pub fn string<S>(text: &str) -> impl Parser<S, Output = String, Error = TextError>
where
    S: Stream<Item = char>,
{
    assert!(!text.is_empty(), "string literal must not be empty");
    let expected = text.to_string();

    move |stream: S| -> Outcome<String, S, TextError> {
        let mut current = stream;
        for wanted in expected.chars() {
            match current.advance() {
                Some((c, rest)) if c == wanted => current = rest,
                _ => {
                    return Err(TextError::StringMismatch {
                        expected: expected.clone(),
                    })
                }
            }
        }
        Ok((expected.clone(), current))
    }
}

/// Canonical case used for case-insensitive matching.
pub fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Matches `text` ignoring case; produces the case-folded literal.
///
/// The folding applies only while this parser runs.
pub fn string_insensitive<S>(text: &str) -> impl Parser<S, Output = String, Error = TextError>
where
    S: Stream<Item = char>,
{
    let folded: String = text.chars().map(fold_case).collect();
    with_filter(
        fold_case as fn(char) -> char,
        string::<Filtered<S, fn(char) -> char>>(&folded),
    )
}

/// Matches any single character listed in `chars`.
///
/// # Panics
///
/// Panics if `chars` is empty.
pub fn one_of<S>(chars: &str) -> impl Parser<S, Output = char, Error = TextError>
where
    S: Stream<Item = char>,
{
    assert!(!chars.is_empty(), "one_of requires at least one character");
    let set = chars.to_string();
    let error = TextError::CharNotExpected {
        expected: set.clone(),
    };
    satisfy(move |c: &char| set.contains(*c), error)
}

/// Matches any single character not listed in `chars`.
pub fn none_of<S>(chars: &str) -> impl Parser<S, Output = char, Error = TextError>
where
    S: Stream<Item = char>,
{
    let set = chars.to_string();
    let error = TextError::CharExcluded {
        excluded: set.clone(),
    };
    satisfy(move |c: &char| !set.contains(*c), error)
}

pub fn any_char<S>() -> impl Parser<S, Output = char, Error = TextError>
where
    S: Stream<Item = char>,
{
    any_item::<S, TextError>()
}

pub fn digit<S>() -> impl Parser<S, Output = char, Error = TextError>
where
    S: Stream<Item = char>,
{
    satisfy(|c: &char| c.is_ascii_digit(), TextError::DigitExpected)
}

/// Space, tab, newline or carriage return.
pub fn whitespace<S>() -> impl Parser<S, Output = char, Error = TextError>
where
    S: Stream<Item = char>,
{
    satisfy(
        |c: &char| matches!(c, ' ' | '\t' | '\n' | '\r'),
        TextError::WhitespaceExpected,
    )
}

pub fn underscore<S>() -> impl Parser<S, Output = char, Error = TextError>
where
    S: Stream<Item = char>,
{
    satisfy(|c: &char| *c == '_', TextError::UnderscoreExpected)
}

pub fn ascii_alpha<S>() -> impl Parser<S, Output = char, Error = TextError>
where
    S: Stream<Item = char>,
{
    satisfy(|c: &char| c.is_ascii_alphabetic(), TextError::AsciiAlphaExpected)
}

/// Letter, digit or underscore.
pub fn ascii_identifier_char<S>() -> impl Parser<S, Output = char, Error = TextError>
where
    S: Stream<Item = char>,
{
    satisfy(
        |c: &char| c.is_ascii_alphanumeric() || *c == '_',
        TextError::AsciiIdCharExpected,
    )
}

/// `letter (letter | digit | _)*`
pub fn ascii_identifier<S>() -> impl Parser<S, Output = String, Error = TextError>
where
    S: Stream<Item = char>,
{
    sequence(
        (
            ascii_alpha::<S>(),
            many::<S, _, TextError>(ascii_identifier_char::<S>()),
        ),
        |(first, rest): (char, Vec<char>)| std::iter::once(first).chain(rest).collect::<String>(),
    )
}

/// Dispatches on a literal keyword: the first key that matches selects its
/// parser, which then runs after the key.
///
/// Keys are tried in descending order, so `"<="` is tried before `"<"`.
/// The keys are copied, so the parser does not borrow `entries`.
///
/// # Panics
///
/// Panics if `entries` is empty or a key is empty.
pub fn string_choice<S, P>(mut entries: Vec<(&str, P)>) -> impl Parser<S, Output = P::Output, Error = TextError>
where
    S: Stream<Item = char>,
    P: Parser<S, Error = TextError>,
{
    entries.sort_by(|(a, _), (b, _)| b.cmp(a));

    let pairs: Vec<_> = entries
        .into_iter()
        .map(|(key, parser)| (string::<S>(key), parser))
        .collect();
    predictive_choice(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_case() {
        assert_eq!(fold_case('A'), 'a');
        assert_eq!(fold_case('z'), 'z');
        assert_eq!(fold_case('Σ'), 'σ');
        assert_eq!(fold_case('1'), '1');
    }
}
