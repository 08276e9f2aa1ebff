use combinator_example::{BinaryOp, CalcError, Calculator, Expr};
use rstest::rstest;

fn parse(source: &str) -> Result<Expr, CalcError> {
    Calculator::new().parse(source)
}

#[test]
fn test_precedence_tree() {
    let expr = parse("3+4*5").unwrap();
    assert_eq!(expr.to_string(), "(+ 3 (* 4 5))");
    assert_eq!(expr.evaluate(), 23.0);

    match &expr {
        Expr::Binary {
            op, right, position, ..
        } => {
            assert_eq!(*op, BinaryOp::Add);
            assert_eq!(*position, 1);
            assert!(matches!(
                right.as_ref(),
                Expr::Binary {
                    op: BinaryOp::Multiply,
                    position: 3,
                    ..
                }
            ));
        }
        other => panic!("expected a binary node, got {other:?}"),
    }
}

#[test]
fn test_missing_operand_offset() {
    assert_eq!(parse("3+"), Err(CalcError::MissingOperand { offset: 2 }));
    assert_eq!(parse("3 + "), Err(CalcError::MissingOperand { offset: 4 }));
    assert_eq!(parse("2*(1-)"), Err(CalcError::MissingOperand { offset: 5 }));
    assert_eq!(parse(""), Err(CalcError::MissingOperand { offset: 0 }));
}

#[rstest]
#[case("1 - 2 - 3", "(- (- 1 2) 3)", -4.0)]
#[case("2 ^ 3 ^ 2", "(^ 2 (^ 3 2))", 512.0)]
#[case("(1 + 2) * 3", "(* (+ 1 2) 3)", 9.0)]
#[case("-2 * 3", "(* (- 2) 3)", -6.0)]
#[case("- - 4", "(- (- 4))", 4.0)]
#[case("10 / 2.5", "(/ 10 2.5)", 4.0)]
#[case("  7  ", "7", 7.0)]
#[case("2^-1", "(^ 2 (- 1))", 0.5)]
fn test_expressions(#[case] source: &str, #[case] tree: &str, #[case] value: f64) {
    let expr = parse(source).unwrap();
    assert_eq!(expr.to_string(), tree);
    assert_eq!(expr.evaluate(), value);
}

#[test]
fn test_unclosed_group() {
    assert_eq!(parse("(1 + 2"), Err(CalcError::UnclosedGroup { offset: 6 }));
}

#[test]
fn test_trailing_input() {
    assert_eq!(parse("1 2"), Err(CalcError::UnexpectedInput { offset: 2 }));
    assert_eq!(parse("1)"), Err(CalcError::UnexpectedInput { offset: 1 }));
}

#[test]
fn test_memoized_parse_matches_plain() {
    let memoized = Calculator::new().with_memoization(true);
    for source in ["3+4*5", "((1))", "-(2 ^ 2) / 4", "1 - - 1", "3+", "(1"] {
        assert_eq!(memoized.parse(source), parse(source), "source: {source}");
    }
}

#[test]
fn test_error_offset_and_location() {
    let source = "1 +\n  * 2";
    let error = parse(source).unwrap_err();
    assert_eq!(error, CalcError::MissingOperand { offset: 6 });

    let table = common_framework::line_offset_table(source);
    let location = table.locate(error.offset()).unwrap();
    assert_eq!(location.to_string(), "2:3");
}
