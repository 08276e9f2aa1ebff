//! Numeric literals. Values are produced as their source text; converting
//! to a numeric type is the caller's choice.

use crate::chars::{char, digit};
use crate::error::TextError;
use combinator_framework::{one_or_more, sequence, soft_sequence, Outcome, Parser, Stream};

/// One or more digits.
pub fn integer<S>() -> impl Parser<S, Output = String, Error = TextError>
where
    S: Stream<Item = char>,
{
    let digits = one_or_more(digit::<S>());
    move |stream: S| -> Outcome<String, S, TextError> {
        let (chars, rest) = digits.parse(stream)?;
        Ok((chars.into_iter().collect::<String>(), rest))
    }
}

/// `integer '.' integer`; the fraction is required.
pub fn float<S>() -> impl Parser<S, Output = String, Error = TextError>
where
    S: Stream<Item = char>,
{
    sequence(
        (integer::<S>(), char::<S>('.'), integer::<S>()),
        |(whole, _, fraction): (String, char, String)| format!("{whole}.{fraction}"),
    )
}

/// An integer with an optional fraction. Once a `.` is seen, digits must
/// follow it.
pub fn number<S>() -> impl Parser<S, Output = String, Error = TextError>
where
    S: Stream<Item = char>,
{
    let fraction = soft_sequence(char::<S>('.'), integer::<S>(), |_: char, digits: String| digits);
    sequence(
        (integer::<S>(), fraction),
        |(whole, fraction): (String, Option<String>)| match fraction {
            Some(fraction) => format!("{whole}.{fraction}"),
            None => whole,
        },
    )
}
