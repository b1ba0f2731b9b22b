//! fractal-curves CLI - draw, save and animate classic fractal curves.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fractal_curves::animation::{animated_display, SvgFrameSink};
use fractal_curves::config::FractalConfig;
use fractal_curves::coords::read_coordinates;
use fractal_curves::curves::CurveFamily;
use fractal_curves::display::{ensure_dir, fixed_display, gallery, DisplayOptions};
use fractal_curves::render::{scaled_stroke_width, Surface, SvgSurface};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "fractal-curves")]
#[command(about = "Dragon, Lévy C and Sierpinski curves by recursive point refinement")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "fractal.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Draw one curve and optionally save its coordinates
    Plot {
        /// Curve family
        #[arg(short, long, value_enum, default_value = "dragon")]
        family: FamilyArg,

        /// Number of refinement passes
        #[arg(short, long, allow_negative_numbers = true)]
        order: Option<i64>,

        /// Stroke width before log scaling
        #[arg(long)]
        stroke_width: Option<f64>,

        /// Save the coordinates as CSV
        #[arg(long)]
        save: bool,

        /// Skip drawing
        #[arg(long)]
        no_plot: bool,

        /// Also save a JSON description of the curve
        #[arg(long)]
        save_metadata: bool,

        /// Output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Width of the output
        #[arg(long)]
        width: Option<u32>,

        /// Height of the output
        #[arg(long)]
        height: Option<u32>,
    },

    /// Animate the construction, one order per tick, looping at max order
    Animate {
        /// Curve family
        #[arg(short, long, value_enum, default_value = "dragon")]
        family: FamilyArg,

        /// Order at which the animation resets to the base segment
        #[arg(short, long, allow_negative_numbers = true)]
        max_order: Option<i64>,

        /// Milliseconds between frames
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Stop after this many frames (default: run until Ctrl-C)
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Stroke width before log scaling
        #[arg(long)]
        stroke_width: Option<f64>,

        /// Directory receiving the frames
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Rewrite a single current.svg instead of numbering frames
        #[arg(long)]
        overwrite: bool,

        /// Width of the output
        #[arg(long)]
        width: Option<u32>,

        /// Height of the output
        #[arg(long)]
        height: Option<u32>,
    },

    /// Draw every family side by side in one figure
    Gallery {
        /// Order for every family (default: per-family config)
        #[arg(short, long, allow_negative_numbers = true)]
        order: Option<i64>,

        /// Stroke width before log scaling
        #[arg(long)]
        stroke_width: Option<f64>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Width of the output
        #[arg(long)]
        width: Option<u32>,

        /// Height of the output
        #[arg(long)]
        height: Option<u32>,
    },

    /// Draw a previously saved coordinate file
    Render {
        /// Coordinate file
        input: PathBuf,

        /// Output file path (default: input with .svg extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stroke width before log scaling
        #[arg(long)]
        stroke_width: Option<f64>,

        /// Width of the output
        #[arg(long)]
        width: Option<u32>,

        /// Height of the output
        #[arg(long)]
        height: Option<u32>,
    },
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum FamilyArg {
    /// Heighway dragon curve
    Dragon,
    /// Lévy C curve
    Levy,
    /// Sierpinski arrowhead curve
    Sierpinski,
}

impl FamilyArg {
    fn to_family(self) -> CurveFamily {
        match self {
            FamilyArg::Dragon => CurveFamily::Dragon,
            FamilyArg::Levy => CurveFamily::Levy,
            FamilyArg::Sierpinski => CurveFamily::Sierpinski,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fractal_curves=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = FractalConfig::load(Path::new(&cli.config))?;

    match cli.command {
        Commands::Plot {
            family,
            order,
            stroke_width,
            save,
            no_plot,
            save_metadata,
            output_dir,
            width,
            height,
        } => {
            let family = family.to_family();
            let order = order.unwrap_or_else(|| config.orders.for_family(family).into());
            let stroke_width = stroke_width.unwrap_or(config.plot.stroke_width);

            let options = DisplayOptions {
                plot: !no_plot,
                save: save || config.plot.save,
                save_metadata: save_metadata || config.plot.save_metadata,
                output_dir: output_dir.unwrap_or_else(|| PathBuf::from(&config.output.directory)),
                width: width.unwrap_or(config.output.width),
                height: height.unwrap_or(config.output.height),
                style: config.output.style(),
            };

            println!("Generating {} at order {}...", family.display_name(), order);
            let report = fixed_display(
                family,
                order,
                family.default_bounds(),
                stroke_width,
                None,
                &options,
            )?;

            println!("  {} points", report.points);
            for path in &report.files {
                println!("Saved to {}", path.display());
            }
        }

        Commands::Animate {
            family,
            max_order,
            interval_ms,
            ticks,
            stroke_width,
            output_dir,
            overwrite,
            width,
            height,
        } => {
            let family = family.to_family();
            let max_order = max_order.unwrap_or_else(|| config.orders.for_family(family).into());
            let interval = interval_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.animation.interval());
            let stroke_width = stroke_width.unwrap_or(config.animation.stroke_width);

            let frames_dir = output_dir.unwrap_or_else(|| {
                PathBuf::from(&config.output.directory)
                    .join(family.name())
                    .join("frames")
            });
            let mut sink = SvgFrameSink::new(
                &frames_dir,
                width.unwrap_or(config.output.width),
                height.unwrap_or(config.output.height),
                config.output.style(),
            )?
            .overwrite(overwrite);

            println!(
                "Animating {} up to order {} every {}ms...",
                family.display_name(),
                max_order,
                interval.as_millis()
            );
            println!("Frames go to {} (Ctrl-C to stop)", frames_dir.display());

            let animator = animated_display(
                family,
                max_order,
                family.default_bounds(),
                stroke_width,
                &mut sink,
                interval,
                ticks,
            )
            .await?;

            println!(
                "Done! {} ticks, {} files in {}",
                animator.ticks(),
                sink.written().len(),
                sink.dir().display()
            );
        }

        Commands::Gallery {
            order,
            stroke_width,
            output,
            width,
            height,
        } => {
            let entries: Vec<(CurveFamily, i64)> = CurveFamily::all()
                .into_iter()
                .map(|f| (f, order.unwrap_or_else(|| config.orders.for_family(f).into())))
                .collect();
            let stroke_width = stroke_width.unwrap_or(config.plot.stroke_width);
            let output =
                output.unwrap_or_else(|| PathBuf::from(&config.output.directory).join("gallery.svg"));

            let options = DisplayOptions {
                output_dir: PathBuf::from(&config.output.directory),
                width: width.unwrap_or(config.output.width),
                height: height.unwrap_or(config.output.height),
                style: config.output.style(),
                ..DisplayOptions::default()
            };

            println!("Generating gallery of {} curves...", entries.len());
            let reports = gallery(&entries, stroke_width, &output, &options)?;
            for report in &reports {
                println!(
                    "  {} order {}: {} points",
                    report.family.display_name(),
                    report.order,
                    report.points
                );
            }
            println!("Saved to {}", output.display());
        }

        Commands::Render {
            input,
            output,
            stroke_width,
            width,
            height,
        } => {
            let curve = read_coordinates(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let stroke_width = scaled_stroke_width(
                stroke_width.unwrap_or(config.plot.stroke_width),
                curve.len(),
            );

            let mut surface = SvgSurface::new(
                width.unwrap_or(config.output.width),
                height.unwrap_or(config.output.height),
            )
            .with_style(config.output.style());
            if let Some(name) = input.file_stem() {
                surface.set_title(name.to_string_lossy());
            }
            surface.plot(&curve, stroke_width)?;
            surface.set_equal_aspect(true);

            let output = output.unwrap_or_else(|| input.with_extension("svg"));
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                ensure_dir(parent)?;
            }
            surface.save(&output)?;
            println!("{} points", curve.len());
            println!("Saved to {}", output.display());
        }
    }

    Ok(())
}
