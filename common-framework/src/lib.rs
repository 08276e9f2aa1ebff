//! Common Framework
//!
//! 提供 combinator-framework 和 text-framework 之间共享的源码位置组件：
//! 共享文本切片、行偏移表以及偏移量到行列号的转换。

pub mod line_table;
pub mod location;
pub mod text_slice;

pub use line_table::{line_offset_table, offset_to_line_col, LineOffsetTable, LocationError};
pub use location::Location;
pub use text_slice::TextSlice;
