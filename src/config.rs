//! Configuration loading.
//!
//! Configuration is loaded from TOML files with environment variable overrides.

use crate::curves::CurveFamily;
use crate::render::SvgStyle;
use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "config.default.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FractalConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub orders: OrderConfig,

    #[serde(default)]
    pub plot: PlotConfig,

    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: String,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_background")]
    pub background: String,

    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            width: default_width(),
            height: default_height(),
            background: default_background(),
            stroke_color: default_stroke_color(),
        }
    }
}

impl OutputConfig {
    pub fn style(&self) -> SvgStyle {
        SvgStyle {
            background: self.background.clone(),
            stroke_color: self.stroke_color.clone(),
            ..SvgStyle::default()
        }
    }
}

fn default_directory() -> String {
    "output".to_string()
}

fn default_width() -> u32 {
    1000
}

fn default_height() -> u32 {
    700
}

fn default_background() -> String {
    "#ffffff".to_string()
}

fn default_stroke_color() -> String {
    "#1f77b4".to_string()
}

/// Default order per family.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderConfig {
    #[serde(default = "default_dragon_order")]
    pub dragon: u32,

    #[serde(default = "default_levy_order")]
    pub levy: u32,

    #[serde(default = "default_sierpinski_order")]
    pub sierpinski: u32,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            dragon: default_dragon_order(),
            levy: default_levy_order(),
            sierpinski: default_sierpinski_order(),
        }
    }
}

impl OrderConfig {
    pub fn for_family(&self, family: CurveFamily) -> u32 {
        match family {
            CurveFamily::Dragon => self.dragon,
            CurveFamily::Levy => self.levy,
            CurveFamily::Sierpinski => self.sierpinski,
        }
    }
}

fn default_dragon_order() -> u32 {
    CurveFamily::Dragon.default_order()
}

fn default_levy_order() -> u32 {
    CurveFamily::Levy.default_order()
}

fn default_sierpinski_order() -> u32 {
    CurveFamily::Sierpinski.default_order()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "default_plot_stroke_width")]
    pub stroke_width: f64,

    #[serde(default)]
    pub save: bool,

    #[serde(default)]
    pub save_metadata: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            stroke_width: default_plot_stroke_width(),
            save: false,
            save_metadata: false,
        }
    }
}

fn default_plot_stroke_width() -> f64 {
    2.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_animation_stroke_width")]
    pub stroke_width: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            stroke_width: default_animation_stroke_width(),
        }
    }
}

impl AnimationConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn default_interval_ms() -> u64 {
    1500
}

fn default_animation_stroke_width() -> f64 {
    3.0
}

impl FractalConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("FRACTAL")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let fractal_config: FractalConfig = config.try_deserialize().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid configuration, using defaults");
            FractalConfig::default()
        });
        Ok(fractal_config)
    }
}
