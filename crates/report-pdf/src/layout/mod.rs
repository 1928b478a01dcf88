//! Cell layout engine
//!
//! Geometric heart of the crate. Given one page of entries and a template:
//! - Grid math (card dimensions, centered origins, row-major walking)
//! - Cell shaping (band rectangles, image region, observation band)
//! - Text decisions (fallbacks, truncation, wrapping, line clipping)
//!
//! Everything is computed in millimeters with a top-left origin and returned
//! as plain data; no drawing happens here.

mod grid;
mod placement;
mod types;

pub use grid::*;
pub use placement::*;
pub use types::*;
