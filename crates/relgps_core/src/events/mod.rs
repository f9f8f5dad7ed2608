//! Date-driven event projections for home-screen widgets.

pub mod upcoming;
