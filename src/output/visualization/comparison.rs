//! Overlay of several 1-D profiles on one set of axes
//!
//! # Usage
//!
//! ```rust,ignore
//! use rtbench::output::visualization::{plot_profile_comparison, Curve, CurveStyle, PlotConfig};
//! use plotters::prelude::*;
//!
//! let curves = vec![
//!     Curve::new("PFloTran", &pflotran, CurveStyle::solid(MAGENTA)),
//!     Curve::new("CrunchFlow GIMRT", &gimrt, CurveStyle::dashed(MAGENTA)),
//! ];
//! plot_profile_comparison(&curves, Path::new("tracer_1d.png"), None)?;
//! ```

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::error::Error;
use std::path::Path;

use super::config::{CurveStyle, LineKind, PlotConfig, NO_TITLE};
use crate::series::SampleSeries;

/// One labelled series to draw
#[derive(Debug, Clone, Copy)]
pub struct Curve<'a> {
    pub label: &'a str,
    pub series: &'a SampleSeries,
    pub style: CurveStyle,
}

impl<'a> Curve<'a> {
    pub fn new(label: &'a str, series: &'a SampleSeries, style: CurveStyle) -> Self {
        Self { label, series, style }
    }
}

/// Axis extents covering every curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotRange {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl PlotRange {
    /// Range over all non-empty curves, `None` if every curve is empty
    ///
    /// The y-axis always includes zero and leaves 10% headroom above the
    /// largest value.
    pub fn of(curves: &[Curve<'_>]) -> Option<Self> {
        let mut x = (f64::INFINITY, f64::NEG_INFINITY);
        let mut y = (0.0_f64, f64::NEG_INFINITY);

        for curve in curves {
            if let (Some((x_lo, x_hi)), Some((y_lo, y_hi))) =
                (curve.series.x_range(), curve.series.value_range())
            {
                x = (x.0.min(x_lo), x.1.max(x_hi));
                y = (y.0.min(y_lo), y.1.max(y_hi));
            }
        }

        if !x.0.is_finite() || !x.1.is_finite() {
            return None;
        }
        if x.1 <= x.0 {
            x = (x.0 - 0.5, x.1 + 0.5);
        }

        let y_max = y.1.max(1e-10) * 1.1;
        Some(Self { x, y: (y.0, y_max) })
    }
}

/// Plot several profiles on the same axes
///
/// Each curve keeps its own colour and line kind; the legend sits in the
/// upper right. The backend is chosen from the file extension (`.svg` or
/// bitmap otherwise).
///
/// # Errors
///
/// - no curves, or only empty curves
/// - any drawing or file error from the backend
pub fn plot_profile_comparison(
    curves: &[Curve<'_>],
    output_path: &Path,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if curves.is_empty() {
        return Err("No profiles provided".into());
    }

    let range = PlotRange::of(curves).ok_or("All profiles are empty")?;

    // Create default config if needed (avoid temporary value)
    let default_config = PlotConfig::profile(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let ext = output_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_comparison_impl(backend, curves, config, range)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_comparison_impl(backend, curves, config, range)
        }
    }
}

/// Implementation for comparison plotting with concrete backend
fn plot_comparison_impl<DB: DrawingBackend>(
    backend: DB,
    curves: &[Curve<'_>],
    config: &PlotConfig,
    range: PlotRange,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", config.caption_font_size).into_font())
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(110)
        .build_cartesian_2d(range.x.0..range.x.1, range.y.0..range.y.1)?;

    if config.show_grid {
        chart.configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .axis_desc_style(("sans-serif", config.axis_font_size))
            .label_style(("sans-serif", config.tick_font_size))
            .x_label_formatter(&|x| format!("{:.1}", x))
            .y_label_formatter(&|y| format!("{:.1e}", y))
            .draw()?;
    }

    for curve in curves {
        let stroke = curve.style.color.stroke_width(curve.style.width);
        let points: Vec<(f64, f64)> = curve.series.points().collect();

        match curve.style.line {
            LineKind::Solid => {
                chart
                    .draw_series(LineSeries::new(points, stroke))?
                    .label(curve.label)
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke));
            }
            LineKind::Dashed => {
                chart
                    .draw_series(DashedLineSeries::new(points, 10, 6, stroke))?
                    .label(curve.label)
                    .legend(move |anchor| {
                        let [first, second] = legend_dashes(anchor);
                        EmptyElement::at((0, 0))
                            + PathElement::new(first, stroke)
                            + PathElement::new(second, stroke)
                    });
            }
            LineKind::Markers => {
                chart
                    .draw_series(points.into_iter().map(move |p| Cross::new(p, 4, stroke)))?
                    .label(curve.label)
                    .legend(move |(x, y)| Cross::new((x + 10, y), 4, stroke));
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", config.legend_font_size))
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

/// Legend sample of a dashed curve: two dashes spanning the solid sample's 20 px
fn legend_dashes((x, y): (i32, i32)) -> [Vec<(i32, i32)>; 2] {
    [vec![(x, y), (x + 8, y)], vec![(x + 12, y), (x + 20, y)]]
}

// =================================================================================================
// Tests
// =================================================================================================
