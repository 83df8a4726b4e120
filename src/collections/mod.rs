//! Insertion-ordered containers backing the stores.
//!
//! Every collection preserves arrival order and is searched or drained by
//! full traversal; none of them index their contents.

pub mod ordered;
pub mod queue;
pub mod stack;

pub use ordered::{Attribute, OrderedCollection, Searchable};
pub use queue::Queue;
pub use stack::Stack;
