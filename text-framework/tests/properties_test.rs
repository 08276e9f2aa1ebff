use combinator_framework::{many, separated_trailing_allow_zero, Parser, Stream};
use proptest::prelude::*;
use text_framework::{
    ascii_identifier, char, line_offset_table, number, offset_to_line_col, CharStream, TextError,
};

proptest! {
    #[test]
    fn number_lists_parse_back(values in proptest::collection::vec(0u32..100_000, 0..20)) {
        let text = values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",");
        let list = separated_trailing_allow_zero(number(), char(','));
        let (parsed, rest) = list.parse(CharStream::from_source(text.as_str())).unwrap();
        let parsed: Vec<u32> = parsed.iter().filter_map(|n| n.parse().ok()).collect();
        prop_assert_eq!(parsed, values);
        prop_assert!(rest.is_at_end());
    }

    #[test]
    fn many_never_fails(text in "\\PC{0,30}") {
        let parser = many::<CharStream, _, TextError>(ascii_identifier());
        let start = CharStream::from_source(text.as_str());
        let (_, rest) = parser.parse(start.clone()).unwrap();
        prop_assert!(rest.position() >= start.position());
        prop_assert!(rest.position() <= text.len());
    }

    #[test]
    fn line_col_points_back_into_line(text in "[a-c\\n]{0,40}", pick in 0usize..41) {
        let offset = pick.min(text.len());
        let table = line_offset_table(text.as_str());
        let (line, column) = offset_to_line_col(&table, offset).unwrap();
        let start = table.line_start(line).unwrap();
        prop_assert_eq!(start + column, offset);
        prop_assert!(!text[start..offset].contains('\n'));
    }
}
