//! Looping animation of a curve's construction.
//!
//! The animator owns the displayed curve and its order. Each tick refines
//! the curve by one order; reaching `max_order` resets to the base segment,
//! so the displayed orders cycle through `0..max_order` until stopped.

use crate::curves::{validate_order, CurveFamily, MAX_POINTS};
use crate::display::ensure_dir;
use crate::error::{CurveError, Result};
use crate::geometry::{Curve, ViewBounds};
use crate::render::{scaled_stroke_width, Surface, SvgStyle, SvgSurface};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// One displayed state of the animation.
#[derive(Debug)]
pub struct Frame<'a> {
    pub family: CurveFamily,
    /// Frames shown before this one.
    pub tick: u64,
    pub order: u32,
    pub curve: &'a Curve,
    pub stroke_width: f64,
    pub bounds: ViewBounds,
}

/// Receives every frame the animation produces.
pub trait FrameSink {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()>;
}

/// The mutable part of an animation: current order and curve.
#[derive(Debug, Clone)]
pub struct AnimationState {
    pub order: u32,
    pub curve: Curve,
}

impl AnimationState {
    pub fn initial() -> Self {
        Self {
            order: 0,
            curve: Curve::base_segment(),
        }
    }
}

pub struct Animator {
    family: CurveFamily,
    max_order: u32,
    bounds: ViewBounds,
    base_stroke_width: f64,
    stroke_width: f64,
    state: AnimationState,
    ticks: u64,
}

impl Animator {
    pub fn new(
        family: CurveFamily,
        max_order: i64,
        bounds: ViewBounds,
        stroke_width: f64,
    ) -> Result<Self> {
        let max_order = validate_order(max_order)?;
        if max_order == 0 {
            return Err(CurveError::invalid("max order must be at least 1"));
        }
        // The largest curve shown is one order below max_order.
        match family.rule().point_count(max_order - 1) {
            Some(n) if n <= MAX_POINTS => {}
            _ => {
                return Err(CurveError::invalid(format!(
                    "max order {} of {} exceeds the {} point limit",
                    max_order,
                    family.name(),
                    MAX_POINTS
                )))
            }
        }

        Ok(Self {
            family,
            max_order,
            bounds,
            base_stroke_width: stroke_width,
            stroke_width,
            state: AnimationState::initial(),
            ticks: 0,
        })
    }

    pub fn order(&self) -> u32 {
        self.state.order
    }

    pub fn curve(&self) -> &Curve {
        &self.state.curve
    }

    pub fn max_order(&self) -> u32 {
        self.max_order
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            family: self.family,
            tick: self.ticks,
            order: self.state.order,
            curve: &self.state.curve,
            stroke_width: self.stroke_width,
            bounds: self.bounds,
        }
    }

    /// Advance one order, wrapping to the base segment at `max_order`.
    pub fn tick(&mut self) -> Result<Frame<'_>> {
        if self.state.order + 1 >= self.max_order {
            self.state = AnimationState::initial();
            tracing::info!(curve = self.family.name(), "animation reset to base segment");
        } else {
            self.state.curve = self.family.refine(&self.state.curve)?;
            self.state.order += 1;
        }
        self.stroke_width = scaled_stroke_width(self.base_stroke_width, self.state.curve.len());
        self.ticks += 1;

        tracing::debug!(
            curve = self.family.name(),
            order = self.state.order,
            points = self.state.curve.len(),
            "tick"
        );
        Ok(self.frame())
    }

    /// Present the current frame, then one frame per `interval` until
    /// `limit` frames were shown or Ctrl-C is pressed. Returns the number
    /// of frames presented.
    pub async fn run<S: FrameSink + ?Sized>(
        &mut self,
        sink: &mut S,
        interval: Duration,
        limit: Option<u64>,
    ) -> Result<u64> {
        sink.present(&self.frame())?;
        let mut presented = 1;

        let mut timer = tokio::time::interval(interval.max(Duration::from_millis(1)));
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately
        timer.tick().await;

        while !limit.is_some_and(|n| presented >= n) {
            tokio::select! {
                _ = timer.tick() => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!(presented, "animation interrupted");
                    break;
                }
            }
            let frame = self.tick()?;
            sink.present(&frame)?;
            presented += 1;
        }

        Ok(presented)
    }
}

/// Build an animator and run it against `sink`.
pub async fn animated_display<S: FrameSink + ?Sized>(
    family: CurveFamily,
    max_order: i64,
    bounds: ViewBounds,
    stroke_width: f64,
    sink: &mut S,
    interval: Duration,
    limit: Option<u64>,
) -> Result<Animator> {
    let mut animator = Animator::new(family, max_order, bounds, stroke_width)?;
    tracing::info!(
        curve = family.name(),
        max_order = animator.max_order(),
        interval_ms = interval.as_millis() as u64,
        "starting animation"
    );
    animator.run(sink, interval, limit).await?;
    Ok(animator)
}

/// Writes frames as SVG files into a directory.
pub struct SvgFrameSink {
    dir: PathBuf,
    width: u32,
    height: u32,
    style: SvgStyle,
    /// Rewrite `current.svg` instead of numbering frames.
    overwrite: bool,
    written: Vec<PathBuf>,
}

impl SvgFrameSink {
    pub fn new(dir: impl Into<PathBuf>, width: u32, height: u32, style: SvgStyle) -> Result<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self {
            dir,
            width,
            height,
            style,
            overwrite: false,
            written: Vec::new(),
        })
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, oldest first.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn frame_path(&self, tick: u64) -> PathBuf {
        if self.overwrite {
            self.dir.join("current.svg")
        } else {
            self.dir.join(format!("frame_{:05}.svg", tick))
        }
    }
}

impl FrameSink for SvgFrameSink {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        let mut surface =
            SvgSurface::new(self.width, self.height).with_style(self.style.clone());
        surface.set_title(format!(
            "{} (order {})",
            frame.family.display_name(),
            frame.order
        ));
        surface.plot(frame.curve, frame.stroke_width)?;
        surface.set_equal_aspect(true);
        surface.set_bounds(frame.bounds);

        let path = self.frame_path(frame.tick);
        surface.save(&path)?;
        if !self.written.contains(&path) {
            self.written.push(path);
        }
        Ok(())
    }
}
