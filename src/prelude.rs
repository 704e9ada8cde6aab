//! Crate-internal prelude: derive macros shared by the date types.

pub(crate) use derive_more::Display;
