//! File I/O: portable chart bundle JSON.

pub mod bundle;
