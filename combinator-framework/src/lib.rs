//! Generic parser combinators over persistent token streams.
//!
//! A parser is a pure function from a [`Stream`] to an [`Outcome`]: either a
//! failure carrying an error value, or a success carrying a value and the
//! remaining stream. Streams are never mutated; advancing returns a new
//! stream, so backtracking is simply reusing an earlier stream value.
//!
//! User state travels alongside the input as the stream's data payload. The
//! exception to value semantics is the [`memo`] table, which is
//! reached through the payload and shared across backtracking branches.

pub mod boxed;
pub mod combinators;
pub mod error;
pub mod filter;
pub mod memo;
pub mod outcome;
pub mod primitives;
pub mod stream;
pub mod traits;
pub mod variadic;

pub use boxed::{forward, BoxedParser};
pub use combinators::{
    inspect, many, maybe, negate, one_or_more, peek, recover, repeat_while, separated,
    separated_allow_zero, separated_trailing, separated_trailing_allow_zero, soft_sequence,
    terminated,
};
pub use error::StreamError;
pub use filter::{with_filter, Filtered};
pub use memo::{
    memoize, CacheKey, KeyStrategy, MemoAccessor, MemoHandle, MemoTable, Memoizer, ParserId,
};
pub use outcome::{fail, map_error, map_value, succeed, Outcome};
pub use primitives::{
    always_fail, any_item, constant, eos, get_data, modify_data, position, satisfy, set_data,
};
pub use stream::{SliceStream, Stream};
pub use traits::Parser;
pub use variadic::{
    ordered_choice, predictive_choice, sequence, Alternatives, Predictions, Sequence,
};
