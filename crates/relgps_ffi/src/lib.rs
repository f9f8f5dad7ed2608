//! FFI bridge crate for the RelGPS mobile shell.

pub mod api;
