//! Codecs for primitive values and the combinators that compose them

pub mod array;
pub mod blob;
pub mod boolean;
pub mod constant;
pub mod map;
pub mod number;
pub mod option;
pub mod prefixed;
pub mod string;
pub mod structure;
pub mod text;
pub mod transform;
pub mod tuple;
pub mod union;
