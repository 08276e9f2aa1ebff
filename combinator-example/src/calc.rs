//! Arithmetic expressions.
//!
//! ```text
//! expression := term   (('+' | '-') term)*
//! term       := power  (('*' | '/') power)*
//! power      := unary  ('^' power)?
//! unary      := '-' unary | atom
//! atom       := number | '(' expression ')'
//! ```
//!
//! Whitespace may follow any token. Precedence comes from the nesting of the
//! rules; `^` is right associative, the other operators left associative.

use combinator_framework::{
    constant, forward, many, map_value, peek, predictive_choice, repeat_while, sequence,
    soft_sequence, BoxedParser, MemoHandle, MemoTable, Memoizer, Parser, Stream,
};
use std::fmt;
use std::rc::Rc;
use text_framework::{char, digit, number, string_choice, token, whitespace, CharStream, TextError};

/// Stream used by the grammar; the payload gives access to the memo table.
pub type CalcStream = CharStream<MemoHandle>;

type Rule<T> = BoxedParser<CalcStream, T, CalcError>;

// ============================================================================
// AST
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number {
        value: f64,
        position: usize,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        /// Offset of the operator
        position: usize,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        position: usize,
    },
    Group {
        expr: Box<Expr>,
        position: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Power => "^",
        }
    }

    fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Subtract => left - right,
            BinaryOp::Multiply => left * right,
            BinaryOp::Divide => left / right,
            BinaryOp::Power => left.powf(right),
        }
    }
}

impl Expr {
    /// Offset of the token that introduced this node.
    pub fn position(&self) -> usize {
        match self {
            Expr::Number { position, .. }
            | Expr::Binary { position, .. }
            | Expr::Unary { position, .. }
            | Expr::Group { position, .. } => *position,
        }
    }

    pub fn evaluate(&self) -> f64 {
        match self {
            Expr::Number { value, .. } => *value,
            Expr::Binary {
                op, left, right, ..
            } => op.apply(left.evaluate(), right.evaluate()),
            Expr::Unary {
                op: UnaryOp::Negate,
                operand,
                ..
            } => -operand.evaluate(),
            Expr::Group { expr, .. } => expr.evaluate(),
        }
    }
}

/// Prefix notation: `3+4*5` displays as `(+ 3 (* 4 5))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number { value, .. } => write!(f, "{value}"),
            Expr::Binary {
                op, left, right, ..
            } => write!(f, "({} {left} {right})", op.symbol()),
            Expr::Unary { operand, .. } => write!(f, "(- {operand})"),
            Expr::Group { expr, .. } => write!(f, "{expr}"),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    #[error("missing operand at offset {offset}")]
    MissingOperand { offset: usize },
    #[error("expected ')' at offset {offset}")]
    UnclosedGroup { offset: usize },
    #[error("unexpected input at offset {offset}")]
    UnexpectedInput { offset: usize },
}

impl CalcError {
    pub fn offset(&self) -> usize {
        match self {
            CalcError::MissingOperand { offset }
            | CalcError::UnclosedGroup { offset }
            | CalcError::UnexpectedInput { offset } => *offset,
        }
    }
}

// ============================================================================
// Grammar
// ============================================================================

fn memo_table(handle: &MemoHandle) -> Option<Rc<MemoTable>> {
    handle.table()
}

fn skip_ws() -> impl Parser<CalcStream, Output = (), Error = CalcError> {
    map_value(many::<CalcStream, _, CalcError>(whitespace()), |_: Vec<char>| ())
}

/// Matches `c` and produces its offset; a miss becomes `error(offset)`.
fn symbol(
    c: char,
    error: fn(usize) -> CalcError,
) -> impl Parser<CalcStream, Output = usize, Error = CalcError> {
    token(
        char(c),
        |_: char, start: usize, _: usize| start,
        move |_: TextError, start: usize| error(start),
    )
}

fn missing_operand(offset: usize) -> CalcError {
    CalcError::MissingOperand { offset }
}

/// One of `operators`, with trailing whitespace, producing the operator and
/// its offset.
fn operator(operators: &[(&str, BinaryOp)]) -> Rule<(BinaryOp, usize)> {
    let choice = string_choice(
        operators
            .iter()
            .map(|(text, op)| (*text, constant::<CalcStream, _, TextError>(*op)))
            .collect(),
    );
    let located = token(
        choice,
        |op: BinaryOp, start: usize, _: usize| (op, start),
        |_: TextError, start: usize| CalcError::UnexpectedInput { offset: start },
    );
    sequence((located, skip_ws()), |(op, ()): ((BinaryOp, usize), ())| op).boxed()
}

/// A left-associative chain `operand (operator operand)*`.
///
/// Once an operator is seen, its right operand is required.
fn binary_chain(operators: &[(&str, BinaryOp)], operand: Rule<Expr>) -> Rule<Expr> {
    let op = operator(operators);
    let step = sequence(
        (op.clone(), operand.clone()),
        |(op, right): ((BinaryOp, usize), Expr)| (op, right),
    );
    let rest = repeat_while(peek(op), step);

    sequence(
        (operand, rest),
        |(first, rest): (Expr, Vec<((BinaryOp, usize), Expr)>)| {
            rest.into_iter()
                .fold(first, |left, ((op, position), right)| Expr::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                    position,
                })
        },
    )
    .boxed()
}

fn literal() -> Rule<Expr> {
    let value = token(
        number(),
        |text: String, start: usize, _: usize| Expr::Number {
            // Digits with an optional fraction always parse as f64.
            value: text.parse().unwrap_or_default(),
            position: start,
        },
        |_: TextError, start: usize| missing_operand(start),
    );
    sequence((value, skip_ws()), |(expr, ()): (Expr, ())| expr).boxed()
}

fn group(config: Calculator) -> Rule<Expr> {
    sequence(
        (
            symbol('(', missing_operand),
            skip_ws(),
            forward(move || config.expression()),
            symbol(')', |offset| CalcError::UnclosedGroup { offset }),
            skip_ws(),
        ),
        |(position, (), expr, _, ()): (usize, (), Expr, usize, ())| Expr::Group {
            expr: Box::new(expr),
            position,
        },
    )
    .boxed()
}

fn atom(config: Calculator) -> Rule<Expr> {
    let digit_ahead = token(
        digit(),
        |c: char, _: usize, _: usize| c,
        |_: TextError, start: usize| missing_operand(start),
    );
    predictive_choice((
        (peek(symbol('(', missing_operand)), group(config)),
        (peek(digit_ahead), literal()),
    ))
    .boxed()
}

fn unary(config: Calculator) -> Rule<Expr> {
    let negation = sequence(
        (
            symbol('-', missing_operand),
            skip_ws(),
            forward(move || unary(config)),
        ),
        |(position, (), operand): (usize, (), Expr)| Expr::Unary {
            op: UnaryOp::Negate,
            operand: Box::new(operand),
            position,
        },
    );
    let parser = predictive_choice((
        (peek(symbol('-', missing_operand)), negation.boxed()),
        (constant::<CalcStream, _, CalcError>(()), atom(config)),
    ))
    .boxed();

    if config.memoize {
        // Every unary rule parses the same language, so one key serves them all.
        Memoizer::by_position_and_key(memo_table, "unary")
            .memoize(parser)
            .boxed()
    } else {
        parser
    }
}

fn power(config: Calculator) -> Rule<Expr> {
    let exponent = soft_sequence(
        operator(&[("^", BinaryOp::Power)]),
        forward(move || power(config)),
        |(_, position): (BinaryOp, usize), right: Expr| (position, right),
    );
    sequence(
        (unary(config), exponent),
        |(base, exponent): (Expr, Option<(usize, Expr)>)| match exponent {
            Some((position, right)) => Expr::Binary {
                op: BinaryOp::Power,
                left: Box::new(base),
                right: Box::new(right),
                position,
            },
            None => base,
        },
    )
    .boxed()
}

fn term(config: Calculator) -> Rule<Expr> {
    binary_chain(
        &[("*", BinaryOp::Multiply), ("/", BinaryOp::Divide)],
        power(config),
    )
}

/// Parser configuration and entry point.
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator {
    memoize: bool,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caches unary operands by position for the duration of each parse.
    pub fn with_memoization(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// The `expression` rule, without leading whitespace or end-of-input
    /// handling.
    pub fn expression(self) -> Rule<Expr> {
        binary_chain(
            &[("+", BinaryOp::Add), ("-", BinaryOp::Subtract)],
            term(self),
        )
    }

    /// Parses all of `source` as one expression.
    pub fn parse(&self, source: &str) -> Result<Expr, CalcError> {
        let table = self.memoize.then(|| Rc::new(MemoTable::new()));
        let handle = table.as_ref().map(MemoTable::handle).unwrap_or_default();
        let stream = CalcStream::new(source, handle);

        let parser = sequence((skip_ws(), self.expression()), |((), expr): ((), Expr)| expr);
        let (expr, rest) = parser.parse(stream)?;

        if let Some(table) = &table {
            log::debug!("memo table after parse: {table:?}");
        }
        if !rest.is_at_end() {
            return Err(CalcError::UnexpectedInput {
                offset: rest.position(),
            });
        }
        Ok(expr)
    }
}
