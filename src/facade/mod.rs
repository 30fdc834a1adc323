//! User-facing wrappers over [`SequenceCore`](crate::SequenceCore).
//!
//! - [`Seq`]: fluent; transforming combinators replace the stored sequence
//!   and return `&mut Self` for chaining.
//! - [`SeqView`]: immutable; transforming combinators return a new
//!   [`Sequence`](crate::Sequence) and leave the original untouched.

mod fluent;
mod view;

pub use fluent::Seq;
pub use view::SeqView;
