//! Text Framework
//!
//! 基于 combinator-framework 的字符串层：字符流、字符分类解析器、
//! 字面量与数字解析、大小写不敏感匹配，以及位置 / 行列号辅助工具。

pub mod chars;
pub mod error;
pub mod numbers;
pub mod position;
pub mod stream;

pub use chars::{
    any_char, ascii_alpha, ascii_identifier, ascii_identifier_char, char, digit, fold_case,
    none_of, one_of, string, string_choice, string_insensitive, underscore, whitespace,
};
pub use error::TextError;
pub use numbers::{float, integer, number};
pub use position::{line_col, token, with_position, Positioned, Token};
pub use stream::CharStream;

// Re-export location types for convenience
pub use common_framework::{line_offset_table, offset_to_line_col, LineOffsetTable, Location};
