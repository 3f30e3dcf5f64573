//! **wallmaze** is a maze generation and visualisation library built around
//! open wall matrices that translate directly into world space wall segments.

pub mod cells;
pub mod displays;
pub mod generators;
pub mod maze;
pub mod renderers;
pub mod segments;
pub mod units;
