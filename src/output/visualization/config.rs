//! Plot configuration for benchmark comparison figures
//!
//! [`PlotConfig`] holds figure-wide settings (size, title, axis labels,
//! font sizes); [`CurveStyle`] holds the per-curve colour and line kind.

use plotters::prelude::*;

/// How a curve is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Continuous line (`-`)
    Solid,

    /// Dashed line (`--`)
    Dashed,

    /// Markers only, no connecting line (`*`)
    Markers,
}

/// Colour, line kind and width of one benchmark curve
///
/// # Example
///
/// ```rust
/// use plotters::prelude::*;
/// use rtbench::output::visualization::{CurveStyle, LineKind};
///
/// let style = CurveStyle::dashed(MAGENTA);
/// assert_eq!(style.line, LineKind::Dashed);
/// assert_eq!(style.width, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveStyle {
    pub color: RGBColor,
    pub line: LineKind,

    /// Stroke width in pixels (default: 2)
    pub width: u32,
}

impl CurveStyle {
    pub fn new(color: RGBColor, line: LineKind) -> Self {
        Self { color, line, width: 2 }
    }

    pub fn solid(color: RGBColor) -> Self {
        Self::new(color, LineKind::Solid)
    }

    pub fn dashed(color: RGBColor) -> Self {
        Self::new(color, LineKind::Dashed)
    }

    pub fn markers(color: RGBColor) -> Self {
        Self::new(color, LineKind::Markers)
    }

    /// Builder pattern: set stroke width
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }
}

/// Figure-wide settings for a profile comparison plot
///
/// # Example
///
/// ```rust,ignore
/// use rtbench::output::visualization::PlotConfig;
///
/// let mut config = PlotConfig::profile("Amanzi 1D Tracer Benchmark at 50 years");
/// config.ylabel = "Total Tracer concentration [mol/L]".to_string();
/// config.width = 1600;
/// ```
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: set by preset)
    pub xlabel: String,

    /// Y-axis label (default: "Concentration (mol/L)")
    pub ylabel: String,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Show grid lines and axis labels (default: true)
    pub show_grid: bool,

    /// Title font size (default: 32)
    pub caption_font_size: f64,

    /// Axis description font size (default: 24)
    pub axis_font_size: f64,

    /// Tick label font size (default: 20)
    pub tick_font_size: f64,

    /// Legend font size (default: 16)
    pub legend_font_size: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: "Concentration (mol/L)".to_string(),
            background: WHITE,
            show_grid: true,
            caption_font_size: 32.0,
            axis_font_size: 24.0,
            tick_font_size: 20.0,
            legend_font_size: 16.0,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Create config for distance profiles with optional custom title
    ///
    /// Sets xlabel to "Distance (m)" and title to custom value or "Profile Comparison"
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let config = PlotConfig::profile("Calcite Benchmark");
    /// let config = PlotConfig::profile(format!("{} at {} years", name, t));
    /// let config = PlotConfig::profile(NO_TITLE);
    /// ```
    pub fn profile(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.xlabel = "Distance (m)".to_string();
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Profile Comparison".to_string());
        config
    }

    /// Builder pattern: set y-axis label
    pub fn ylabel(mut self, ylabel: impl Into<String>) -> Self {
        self.ylabel = ylabel.into();
        self
    }
}

/// Capitalise the first letter of each word, lower-case the rest
///
/// Used to turn a problem root such as `"tracer"` into `"Tracer"` for titles.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut start_of_word = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if start_of_word {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            start_of_word = false;
        } else {
            out.push(c);
            start_of_word = true;
        }
    }
    out
}

// =================================================================================================
// Tests
// =================================================================================================
