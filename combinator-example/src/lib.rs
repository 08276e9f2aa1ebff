//! Combinator Example
//!
//! 使用 combinator-framework 与 text-framework 构建的四则运算表达式解析器，
//! 以及配套的 calc-parser 命令行工具。

pub mod calc;

pub use calc::{BinaryOp, CalcError, Calculator, Expr, UnaryOp};
