//! Fractal curves - dragon, Lévy C and Sierpinski arrowhead curves built by
//! recursive point refinement in the complex plane.
//!
//! Each family applies a fixed replacement rule to every segment of the
//! previous order's polyline. Curves can be drawn to SVG, saved as
//! coordinate files, or animated one order at a time.

pub mod animation;
pub mod config;
pub mod coords;
pub mod curves;
pub mod display;
pub mod error;
pub mod geometry;
pub mod render;

pub use animation::{animated_display, Animator, FrameSink, SvgFrameSink};
pub use config::FractalConfig;
pub use curves::{CurveFamily, CurveRule};
pub use display::{fixed_display, DisplayOptions};
pub use error::{CurveError, Result};
pub use geometry::{Curve, Point, ViewBounds};
pub use render::{Surface, SvgSurface};
