//! Tab layouts.

pub mod map;
