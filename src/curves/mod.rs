//! Curve families - each refines a polyline by a fixed replacement rule.

pub mod dragon;
pub mod levy;
pub mod sierpinski;

use crate::error::{CurveError, Result};
use crate::geometry::{Curve, ViewBounds};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use dragon::DragonRule;
pub use levy::LevyRule;
pub use sierpinski::SierpinskiRule;

/// Upper bound on generated curve size (about 1 GiB of points).
pub const MAX_POINTS: usize = 1 << 26;

/// Trait for all replacement rules.
pub trait CurveRule: Sync {
    /// Snake-case family tag.
    fn name(&self) -> &'static str;

    /// How many segments each segment becomes.
    fn growth_factor(&self) -> usize;

    /// Advance a curve by exactly one order.
    fn refine(&self, curve: &Curve) -> Result<Curve>;

    /// Number of points at `order`, or `None` on overflow.
    fn point_count(&self, order: u32) -> Option<usize> {
        self.growth_factor().checked_pow(order)?.checked_add(1)
    }

    /// Generate the curve at `order` starting from the base segment.
    fn generate(&self, order: i64) -> Result<Curve> {
        let order = validate_order(order)?;
        match self.point_count(order) {
            Some(n) if n <= MAX_POINTS => {}
            _ => {
                return Err(CurveError::invalid(format!(
                    "order {} of {} exceeds the {} point limit",
                    order,
                    self.name(),
                    MAX_POINTS
                )))
            }
        }

        let mut curve = Curve::base_segment();
        for _ in 0..order {
            curve = self.refine(&curve)?;
        }
        tracing::debug!(curve = self.name(), order, points = curve.len(), "generated");
        Ok(curve)
    }
}

/// Reject negative orders.
pub fn validate_order(order: i64) -> Result<u32> {
    if order < 0 {
        return Err(CurveError::invalid(format!(
            "order must be non-negative, got {}",
            order
        )));
    }
    u32::try_from(order).map_err(|_| CurveError::invalid(format!("order {} is too large", order)))
}

/// A refinable curve needs at least one segment.
pub(crate) fn require_segment(curve: &Curve, rule: &str) -> Result<()> {
    if curve.len() < 2 {
        return Err(CurveError::invalid(format!(
            "{} needs at least two points to refine, got {}",
            rule,
            curve.len()
        )));
    }
    Ok(())
}

/// The three supported fractal families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveFamily {
    Dragon,
    Levy,
    Sierpinski,
}

struct FamilyInfo {
    name: &'static str,
    display_name: &'static str,
    bounds: ViewBounds,
    default_order: u32,
}

/// Indexed by `CurveFamily as usize`.
const FAMILIES: [FamilyInfo; 3] = [
    FamilyInfo {
        name: "dragon_curve",
        display_name: "Dragon curve",
        bounds: ViewBounds::new((-0.45, 1.3), (-0.45, 0.8)),
        default_order: 18,
    },
    FamilyInfo {
        name: "levy_curve",
        display_name: "Lévy C curve",
        bounds: ViewBounds::new((-0.6, 1.6), (-0.35, 1.1)),
        default_order: 18,
    },
    FamilyInfo {
        name: "sierpinski_triangle",
        display_name: "Sierpinski triangle",
        bounds: ViewBounds::new((-0.05, 1.05), (-0.05, 0.92)),
        default_order: 12,
    },
];

static DRAGON: DragonRule = DragonRule;
static LEVY: LevyRule = LevyRule;
static SIERPINSKI: SierpinskiRule = SierpinskiRule;

impl CurveFamily {
    pub fn all() -> [CurveFamily; 3] {
        [CurveFamily::Dragon, CurveFamily::Levy, CurveFamily::Sierpinski]
    }

    fn info(self) -> &'static FamilyInfo {
        &FAMILIES[self as usize]
    }

    /// Tag used for output directories and file names.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn display_name(self) -> &'static str {
        self.info().display_name
    }

    pub fn default_bounds(self) -> ViewBounds {
        self.info().bounds
    }

    pub fn default_order(self) -> u32 {
        self.info().default_order
    }

    pub fn rule(self) -> &'static dyn CurveRule {
        match self {
            CurveFamily::Dragon => &DRAGON,
            CurveFamily::Levy => &LEVY,
            CurveFamily::Sierpinski => &SIERPINSKI,
        }
    }

    pub fn generate(self, order: i64) -> Result<Curve> {
        self.rule().generate(order)
    }

    pub fn refine(self, curve: &Curve) -> Result<Curve> {
        self.rule().refine(curve)
    }
}

impl fmt::Display for CurveFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveFamily {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dragon" | "dragon_curve" => Ok(CurveFamily::Dragon),
            "levy" | "levi" | "levy_curve" | "levi_curve" => Ok(CurveFamily::Levy),
            "sierpinski" | "sierpinski_triangle" => Ok(CurveFamily::Sierpinski),
            other => Err(CurveError::invalid(format!("unknown curve family {:?}", other))),
        }
    }
}
