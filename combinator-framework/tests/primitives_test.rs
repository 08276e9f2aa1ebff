use combinator_framework::{
    always_fail, any_item, constant, eos, fail, get_data, map_error, map_value, modify_data,
    position, satisfy, set_data, succeed, Outcome, Parser, SliceStream, Stream, StreamError,
};

type Chars = SliceStream<char>;
type Counted = SliceStream<char, u32>;

#[derive(Debug, Clone, PartialEq)]
enum TestError {
    Stream(StreamError),
    Expected(char),
}

impl From<StreamError> for TestError {
    fn from(error: StreamError) -> Self {
        TestError::Stream(error)
    }
}

fn stream(text: &str) -> Chars {
    SliceStream::new(text.chars().collect::<Vec<_>>(), ())
}

fn ch(c: char) -> impl Parser<Chars, Output = char, Error = TestError> {
    satisfy(move |item: &char| *item == c, TestError::Expected(c))
}

fn run<P: Parser<Chars>>(parser: &P, text: &str) -> Result<(P::Output, usize), P::Error> {
    parser
        .parse(stream(text))
        .map(|(value, rest)| (value, rest.position()))
}

#[test]
fn test_satisfy_consumes_one_item() {
    assert_eq!(run(&ch('a'), "abc"), Ok(('a', 1)));
}

#[test]
fn test_satisfy_mismatch_returns_given_error() {
    assert_eq!(run(&ch('a'), "bc"), Err(TestError::Expected('a')));
}

#[test]
fn test_satisfy_at_end_of_input() {
    assert_eq!(
        run(&ch('a'), ""),
        Err(TestError::Stream(StreamError::EndOfInput))
    );
}

#[test]
fn test_any_item() {
    let parser = any_item::<Chars, TestError>();
    assert_eq!(run(&parser, "xy"), Ok(('x', 1)));
    assert_eq!(run(&parser, ""), Err(TestError::Stream(StreamError::EndOfInput)));
}

#[test]
fn test_eos() {
    let parser = eos::<Chars, TestError>();
    assert_eq!(run(&parser, ""), Ok(((), 0)));
    assert_eq!(run(&parser, "a"), Err(TestError::Stream(StreamError::EndExpected)));
}

#[test]
fn test_constant_consumes_nothing() {
    let parser = constant::<Chars, _, TestError>(42);
    assert_eq!(run(&parser, "abc"), Ok((42, 0)));
    assert_eq!(run(&parser, ""), Ok((42, 0)));
}

#[test]
fn test_always_fail() {
    let parser = always_fail::<Chars, u8, _>(TestError::Expected('z'));
    assert_eq!(run(&parser, "z"), Err(TestError::Expected('z')));
}

#[test]
fn test_succeed_and_fail() {
    let ok: Outcome<u8, Chars, TestError> = succeed(1, stream("ab"));
    let (value, rest) = ok.unwrap();
    assert_eq!(value, 1);
    assert_eq!(rest.position(), 0);

    let err: Outcome<u8, Chars, TestError> = fail(TestError::Expected('q'));
    assert_eq!(err.unwrap_err(), TestError::Expected('q'));
}

#[test]
fn test_map_value() {
    let parser = map_value(ch('7'), |c: char| c.to_digit(10));
    assert_eq!(run(&parser, "7"), Ok((Some(7), 1)));
    assert_eq!(run(&parser, "8"), Err(TestError::Expected('7')));
}

#[test]
fn test_map_error() {
    let parser = map_error(ch('a'), |error: TestError| format!("{error:?}"));
    assert_eq!(run(&parser, "a"), Ok(('a', 1)));
    assert_eq!(run(&parser, "b"), Err("Expected('a')".to_string()));
}

#[test]
fn test_data_payload_round_trip() {
    let start = SliceStream::new(vec!['a', 'b'], 5u32);

    let (data, rest) = get_data::<Counted, TestError>().parse(start.clone()).unwrap();
    assert_eq!(data, 5);
    assert_eq!(rest.position(), 0);

    let ((), rest) = set_data::<Counted, TestError>(9u32).parse(start.clone()).unwrap();
    assert_eq!(*rest.data(), 9);
    assert_eq!(*start.data(), 5);

    let (data, rest) = modify_data::<Counted, TestError, _>(|d: &u32| d * 2)
        .parse(rest)
        .unwrap();
    assert_eq!(data, 18);
    assert_eq!(*rest.data(), 18);
}

#[test]
fn test_data_survives_advance() {
    let start = SliceStream::new(vec!['a', 'b'], 0u32);
    let ((), updated) = set_data::<Counted, TestError>(3u32).parse(start).unwrap();
    let (_, rest) = updated.advance().unwrap();
    assert_eq!(*rest.data(), 3);
}

#[test]
fn test_position() {
    let parser = position::<Chars, TestError>();
    let (_, rest) = ch('a').parse(stream("ab")).unwrap();
    let (at, after) = parser.parse(rest).unwrap();
    assert_eq!(at, 1);
    assert_eq!(after.position(), 1);
}
