use combinator_framework::{
    separated, separated_trailing, separated_trailing_allow_zero, Parser, Stream,
};
use rstest::rstest;
use text_framework::{char, float, integer, number, CharStream, TextError};

fn run<P: Parser<CharStream>>(parser: &P, text: &str) -> Result<(P::Output, usize), P::Error> {
    parser
        .parse(CharStream::from_source(text))
        .map(|(value, rest)| (value, rest.position()))
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[rstest]
#[case("0", "0")]
#[case("42", "42")]
#[case("007x", "007")]
fn test_integer(#[case] input: &str, #[case] expected: &str) {
    let (value, end) = run(&integer(), input).unwrap();
    assert_eq!(value, expected);
    assert_eq!(end, expected.len());
}

#[test]
fn test_integer_requires_digit() {
    assert_eq!(run(&integer(), "x1"), Err(TextError::DigitExpected));
    assert_eq!(run(&integer(), ""), Err(TextError::EndOfInput));
}

#[test]
fn test_float_requires_fraction() {
    assert_eq!(run(&float(), "3.14"), Ok(("3.14".to_string(), 4)));
    assert_eq!(run(&float(), "3."), Err(TextError::EndOfInput));
    assert_eq!(
        run(&float(), "3"),
        Err(TextError::EndOfInput)
    );
}

#[rstest]
#[case("12", Ok(("12".to_string(), 2)))]
#[case("12.5", Ok(("12.5".to_string(), 4)))]
#[case("12+", Ok(("12".to_string(), 2)))]
#[case("12.x", Err(TextError::DigitExpected))]
fn test_number(#[case] input: &str, #[case] expected: Result<(String, usize), TextError>) {
    assert_eq!(run(&number(), input), expected);
}

#[test]
fn test_number_list_with_trailing_separator() {
    let list = separated_trailing(number(), char(','));
    assert_eq!(run(&list, "1,2,3,"), Ok((strings(&["1", "2", "3"]), 6)));
    assert_eq!(run(&list, "1,2,3"), Ok((strings(&["1", "2", "3"]), 5)));
    assert_eq!(run(&list, ""), Err(TextError::EndOfInput));
}

#[test]
fn test_number_list_allow_zero() {
    let list = separated_trailing_allow_zero(number(), char(','));
    assert_eq!(run(&list, ""), Ok((vec![], 0)));
    assert_eq!(run(&list, "1.5,"), Ok((strings(&["1.5"]), 4)));
}

#[test]
fn test_number_list_without_trailing_separator() {
    let list = separated(number(), char(','));
    assert_eq!(run(&list, "1,2"), Ok((strings(&["1", "2"]), 3)));
    assert_eq!(run(&list, "1,2,"), Err(TextError::EndOfInput));
}

#[test]
fn test_numbers_convert() {
    let (text, _) = run(&number(), "2.5").unwrap();
    let value: f64 = text.parse().unwrap();
    assert_eq!(value, 2.5);
}
