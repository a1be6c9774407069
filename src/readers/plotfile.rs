//! Amanzi structured (Amanzi-S) AMReX plot files
//!
//! The structured solver writes one directory per output step:
//!
//! ```text
//! output-s-alq-pflo/
//! ├── plt00000/
//! └── plt00071/
//!     ├── Header               text: components, geometry, boxes per level
//!     └── Level_0/
//!         ├── Cell_H           text: box array and FabOnDisk (file, offset) list
//!         └── Cell_D_00000     binary FABs
//! ```
//!
//! Each FAB starts with an ASCII line such as
//!
//! ```text
//! FAB ((8, (64 11 52 0 1 12 0 1023)),(8, (8 7 6 5 4 3 2 1)))((0,0) (31,0) (0,0)) 1
//! ```
//!
//! giving the real format (byte order), the cell box and the component
//! count, followed by the doubles of each component in turn, x fastest.
//!
//! The profile taken is the first row of cells along x (lowest index in the
//! other directions). Levels are never mixed: the caller picks one.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::ReadError;
use crate::series::SampleSeries;

// =================================================================================================
// Header
// =================================================================================================

/// Cell layout of one refinement level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    /// Number of boxes (grids) on this level
    pub n_grids: usize,

    /// Multifab prefix relative to the plot file directory (e.g. `"Level_0/Cell"`)
    pub multifab: String,
}

/// Parsed plot file `Header`
#[derive(Debug, Clone, PartialEq)]
pub struct PlotfileHeader {
    pub version: String,
    pub components: Vec<String>,
    pub space_dim: usize,
    pub time: f64,
    pub finest_level: usize,
    pub prob_lo: Vec<f64>,
    pub prob_hi: Vec<f64>,

    /// Cell size per level, one entry per dimension
    pub cell_size: Vec<Vec<f64>>,

    pub levels: Vec<LevelLayout>,
}

impl PlotfileHeader {
    /// Parse the text of a plot file `Header`
    pub fn parse(path: &Path, text: &str) -> Result<Self, ReadError> {
        let mut lines = Cursor::new(path, text);

        let version = lines.next_line("version")?.trim().to_string();
        let n_comp: usize = lines.parse("component count")?;
        let components = (0..n_comp)
            .map(|_| lines.next_line("component name").map(|s| s.trim().to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        let space_dim: usize = lines.parse("space dimension")?;
        if space_dim == 0 {
            return Err(ReadError::plotfile(path, "space dimension is zero"));
        }
        let time: f64 = lines.parse("time")?;
        let finest_level: usize = lines.parse("finest level")?;
        let prob_lo = lines.floats("prob_lo", space_dim)?;
        let prob_hi = lines.floats("prob_hi", space_dim)?;

        // refinement ratios, problem domains, level steps
        lines.next_line("refinement ratios")?;
        lines.next_line("problem domains")?;
        lines.next_line("level steps")?;

        let cell_size = (0..=finest_level)
            .map(|_| lines.floats("cell size", space_dim))
            .collect::<Result<Vec<_>, _>>()?;

        lines.next_line("coordinate system")?;
        lines.next_line("boundary width")?;

        let mut levels = Vec::with_capacity(finest_level + 1);
        for expected in 0..=finest_level {
            let info = lines.next_line("level info")?;
            let mut fields = info.split_whitespace();
            let level: usize = parse_token(path, fields.next(), "level number")?;
            let n_grids: usize = parse_token(path, fields.next(), "grid count")?;
            if level != expected {
                return Err(ReadError::plotfile(
                    path,
                    format!("expected level {} but found {}", expected, level),
                ));
            }

            lines.next_line("level step")?;
            for _ in 0..n_grids * space_dim {
                lines.next_line("grid bounds")?;
            }
            let multifab = lines.next_line("multifab prefix")?.trim().to_string();

            levels.push(LevelLayout { n_grids, multifab });
        }

        Ok(Self {
            version,
            components,
            space_dim,
            time,
            finest_level,
            prob_lo,
            prob_hi,
            cell_size,
            levels,
        })
    }

    /// Index of a named component
    pub fn component_index(&self, name: &str) -> Option<usize> {
        self.components.iter().position(|c| c == name)
    }
}

// =================================================================================================
// Multifab header (Cell_H) and FABs
// =================================================================================================

/// Integer cell box, inclusive bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellBox {
    pub lo: Vec<i64>,
    pub hi: Vec<i64>,
}

impl CellBox {
    /// Parse `((0,0) (31,0) (0,0))`; the third tuple (index type) is ignored
    pub fn parse(path: &Path, text: &str) -> Result<Self, ReadError> {
        let cleaned: String = text
            .chars()
            .map(|c| if c == '(' || c == ')' { ' ' } else { c })
            .collect();
        let mut tuples = cleaned.split_whitespace();

        let mut parse_tuple = |what: &str| -> Result<Vec<i64>, ReadError> {
            let tuple = tuples
                .next()
                .ok_or_else(|| ReadError::plotfile(path, format!("box missing {}", what)))?;
            tuple
                .split(',')
                .map(|v| {
                    v.trim().parse::<i64>().map_err(|_| {
                        ReadError::plotfile(path, format!("bad box index '{}'", v))
                    })
                })
                .collect()
        };

        let lo = parse_tuple("lower corner")?;
        let hi = parse_tuple("upper corner")?;
        if lo.len() != hi.len() || lo.iter().zip(&hi).any(|(l, h)| h < l) {
            return Err(ReadError::plotfile(path, format!("invalid box '{}'", text.trim())));
        }
        Ok(Self { lo, hi })
    }

    /// Cells along dimension `d`, `None` if the count does not fit in `usize`
    pub fn extent(&self, d: usize) -> Option<usize> {
        let cells = self.hi.get(d)?.checked_sub(*self.lo.get(d)?)?.checked_add(1)?;
        usize::try_from(cells).ok()
    }

    /// Total cell count, `None` on overflow
    pub fn n_cells(&self) -> Option<usize> {
        (0..self.lo.len()).try_fold(1usize, |acc, d| acc.checked_mul(self.extent(d)?))
    }
}

/// Location of one FAB on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FabOnDisk {
    pub file: String,
    pub offset: u64,
}

/// Parsed `Cell_H`: boxes and their FAB locations, in matching order
#[derive(Debug, Clone, PartialEq)]
pub struct MultifabHeader {
    pub n_comp: usize,
    pub boxes: Vec<CellBox>,
    pub fabs: Vec<FabOnDisk>,
}

impl MultifabHeader {
    pub fn parse(path: &Path, text: &str) -> Result<Self, ReadError> {
        let mut lines = Cursor::new(path, text);

        lines.next_line("version")?;
        lines.next_line("layout")?;
        let n_comp: usize = lines.parse("component count")?;
        lines.next_line("ghost width")?;

        let opening = lines.next_line("box array")?;
        let n_boxes: usize = parse_token(
            path,
            opening.trim().trim_start_matches('(').split_whitespace().next(),
            "box count",
        )?;
        let boxes = (0..n_boxes)
            .map(|_| lines.next_line("box").and_then(|l| CellBox::parse(path, l)))
            .collect::<Result<Vec<_>, _>>()?;
        lines.next_line("box array end")?;

        let n_fabs: usize = lines.parse("FAB count")?;
        if n_fabs != n_boxes {
            return Err(ReadError::plotfile(
                path,
                format!("{} boxes but {} FABs", n_boxes, n_fabs),
            ));
        }

        let fabs = (0..n_fabs)
            .map(|_| {
                let line = lines.next_line("FabOnDisk")?;
                let mut fields = line.split_whitespace();
                if fields.next() != Some("FabOnDisk:") {
                    return Err(ReadError::plotfile(path, format!("bad FabOnDisk line '{}'", line)));
                }
                let file = fields
                    .next()
                    .ok_or_else(|| ReadError::plotfile(path, "FabOnDisk without file"))?
                    .to_string();
                let offset: u64 = parse_token(path, fields.next(), "FAB offset")?;
                Ok(FabOnDisk { file, offset })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { n_comp, boxes, fabs })
    }
}

/// Byte order of the doubles in a FAB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

/// Parsed FAB header line
#[derive(Debug, Clone, PartialEq)]
pub struct FabHeader {
    pub byte_order: ByteOrder,
    pub cell_box: CellBox,
    pub n_comp: usize,
}

impl FabHeader {
    pub fn parse(path: &Path, line: &str) -> Result<Self, ReadError> {
        let body = line
            .trim()
            .strip_prefix("FAB")
            .ok_or_else(|| ReadError::plotfile(path, "FAB header does not start with 'FAB'"))?;

        let (format, rest) = body
            .split_once(")))")
            .ok_or_else(|| ReadError::plotfile(path, "FAB header without real descriptor"))?;

        let order_digits: Vec<u8> = format
            .rsplit('(')
            .next()
            .unwrap_or_default()
            .split_whitespace()
            .filter_map(|t| t.parse().ok())
            .collect();
        let byte_order = match order_digits.as_slice() {
            [8, 7, 6, 5, 4, 3, 2, 1] => ByteOrder::Little,
            [1, 2, 3, 4, 5, 6, 7, 8] => ByteOrder::Big,
            _ => {
                return Err(ReadError::plotfile(
                    path,
                    format!("unsupported real format '{}'", format.trim()),
                ))
            }
        };

        let (box_text, comp_text) = rest
            .trim()
            .rsplit_once(')')
            .ok_or_else(|| ReadError::plotfile(path, "FAB header without box"))?;
        let cell_box = CellBox::parse(path, box_text)?;
        let n_comp: usize =
            parse_token(path, comp_text.split_whitespace().next(), "FAB component count")?;

        Ok(Self { byte_order, cell_box, n_comp })
    }
}

// =================================================================================================
// Reader
// =================================================================================================

/// Find the plot file directory `<root><digits>` with the largest step
pub fn find_latest_plotfile(dir: impl AsRef<Path>, root: &str) -> Result<PathBuf, ReadError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ReadError::NotFound(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|e| ReadError::io(dir, e))?;
    let mut latest: Option<(u64, PathBuf)> = None;

    for entry in entries {
        let entry = entry.map_err(|e| ReadError::io(dir, e))?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(step) = name
            .to_str()
            .and_then(|n| n.strip_prefix(root))
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<u64>().ok())
        else {
            continue;
        };

        if latest.as_ref().map_or(true, |(best, _)| step > *best) {
            latest = Some((step, entry.path()));
        }
    }

    latest
        .map(|(_, path)| path)
        .ok_or_else(|| ReadError::NoPlotfile { dir: dir.to_path_buf(), root: root.to_string() })
}

/// Read one component profile from the latest plot file in `dir`
///
/// # Arguments
///
/// * `dir` - Solver output directory holding the `<root>NNNNN` plot files
/// * `root` - Plot file prefix (`"plt"`)
/// * `component` - Component name as listed in the `Header`
/// * `level` - 1-based refinement level; 1 is the coarsest level (`Level_0`)
///
/// # Errors
///
/// - [`ReadError::NotFound`] / [`ReadError::NoPlotfile`] when nothing was written
/// - [`ReadError::MissingComponent`], [`ReadError::LevelOutOfRange`]
/// - [`ReadError::Plotfile`] for malformed headers or FABs
pub fn read_plotfile(
    dir: impl AsRef<Path>,
    root: &str,
    component: &str,
    level: usize,
) -> Result<SampleSeries, ReadError> {
    let plotfile = find_latest_plotfile(dir, root)?;
    read_plotfile_dir(&plotfile, component, level)
}

/// Read one component profile from a single plot file directory
pub fn read_plotfile_dir(
    plotfile: &Path,
    component: &str,
    level: usize,
) -> Result<SampleSeries, ReadError> {
    let header_path = plotfile.join("Header");
    log::debug!("opening {}", header_path.display());
    let header = PlotfileHeader::parse(&header_path, &read_text(&header_path)?)?;

    let comp = header.component_index(component).ok_or_else(|| ReadError::MissingComponent {
        path: header_path.clone(),
        component: component.to_string(),
    })?;

    let available = header.levels.len();
    let layout = level
        .checked_sub(1)
        .and_then(|index| header.levels.get(index).map(|layout| (index, layout)));
    let Some((level_index, layout)) = layout else {
        return Err(ReadError::LevelOutOfRange {
            path: header_path,
            requested: level,
            available,
        });
    };

    let dx = header.cell_size[level_index][0];
    let x0 = header.prob_lo[0];

    let cell_h_path = plotfile.join(format!("{}_H", layout.multifab));
    let multifab = MultifabHeader::parse(&cell_h_path, &read_text(&cell_h_path)?)?;
    if multifab.boxes.len() != layout.n_grids {
        return Err(ReadError::plotfile(
            &cell_h_path,
            format!("{} grids in Header but {} boxes", layout.n_grids, multifab.boxes.len()),
        ));
    }
    if comp >= multifab.n_comp {
        return Err(ReadError::MissingComponent {
            path: cell_h_path,
            component: component.to_string(),
        });
    }

    if let Some(bad) = multifab.boxes.iter().find(|b| b.lo.len() != header.space_dim) {
        return Err(ReadError::plotfile(
            &cell_h_path,
            format!("{}-D box in a {}-D plot file", bad.lo.len(), header.space_dim),
        ));
    }

    // Only boxes touching the lowest row in the transverse directions hold the profile
    let row_lo: Vec<i64> = (1..header.space_dim)
        .map(|d| multifab.boxes.iter().map(|b| b.lo[d]).min().unwrap_or(0))
        .collect();

    let fab_dir = cell_h_path.parent().unwrap_or(plotfile).to_path_buf();
    let mut samples = Vec::new();

    for (cell_box, fab) in multifab.boxes.iter().zip(&multifab.fabs) {
        let on_row = (1..header.space_dim).all(|d| cell_box.lo[d] == row_lo[d - 1]);
        if !on_row {
            continue;
        }

        let row = read_fab_row(&fab_dir.join(&fab.file), fab.offset, comp, cell_box)?;
        samples.extend(row.into_iter().map(|(i, value)| {
            let x = x0 + (i as f64 + 0.5) * dx;
            (x, value)
        }));
    }

    log::debug!(
        "{} cells of '{}' read from {} (t = {})",
        samples.len(),
        component,
        plotfile.display(),
        header.time
    );
    Ok(SampleSeries::from_unsorted_pairs(samples))
}

/// Read the first x-row of component `comp` from the FAB at `offset`
///
/// The FAB header must describe the same box as `Cell_H`, and the row must
/// lie inside the file. Returns `(global i index, value)` pairs.
fn read_fab_row(
    path: &Path,
    offset: u64,
    comp: usize,
    expected: &CellBox,
) -> Result<Vec<(i64, f64)>, ReadError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ReadError::NotFound(path.to_path_buf())
        } else {
            ReadError::io(path, e)
        }
    })?;
    let file_len = file.metadata().map_err(|e| ReadError::io(path, e))?.len();
    let mut reader = BufReader::new(file);
    reader.seek(SeekFrom::Start(offset)).map_err(|e| ReadError::io(path, e))?;

    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line).map_err(|e| ReadError::io(path, e))?;
    let header = FabHeader::parse(path, &String::from_utf8_lossy(&line))?;

    if comp >= header.n_comp {
        return Err(ReadError::plotfile(
            path,
            format!("FAB has {} components, component {} requested", header.n_comp, comp),
        ));
    }
    if header.cell_box != *expected {
        return Err(ReadError::plotfile(
            path,
            format!(
                "FAB box {:?}..{:?} differs from Cell_H box",
                header.cell_box.lo, header.cell_box.hi
            ),
        ));
    }

    let too_large = || ReadError::plotfile(path, "FAB box too large");
    let n_cells = header.cell_box.n_cells().ok_or_else(too_large)?;
    let nx = header.cell_box.extent(0).ok_or_else(too_large)?;
    let skip = comp
        .checked_mul(n_cells)
        .and_then(|v| v.checked_mul(8))
        .and_then(|v| u64::try_from(v).ok())
        .ok_or_else(too_large)?;
    let row_bytes = nx.checked_mul(8).ok_or_else(too_large)?;

    let data_start = offset.checked_add(line.len() as u64).ok_or_else(too_large)?;
    let row_end = data_start
        .checked_add(skip)
        .and_then(|v| v.checked_add(row_bytes as u64))
        .ok_or_else(too_large)?;
    if row_end > file_len {
        return Err(ReadError::plotfile(
            path,
            format!("FAB row ends at byte {} but file has {}", row_end, file_len),
        ));
    }

    reader.seek(SeekFrom::Start(data_start + skip)).map_err(|e| ReadError::io(path, e))?;
    let mut bytes = vec![0u8; row_bytes];
    reader.read_exact(&mut bytes).map_err(|e| ReadError::io(path, e))?;

    let lo = header.cell_box.lo[0];
    Ok(bytes
        .chunks_exact(8)
        .enumerate()
        .map(|(i, chunk)| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            let value = match header.byte_order {
                ByteOrder::Little => f64::from_le_bytes(raw),
                ByteOrder::Big => f64::from_be_bytes(raw),
            };
            (lo + i as i64, value)
        })
        .collect())
}

// =================================================================================================
// Text helpers
// =================================================================================================

fn read_text(path: &Path) -> Result<String, ReadError> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ReadError::NotFound(path.to_path_buf())
        } else {
            ReadError::io(path, e)
        }
    })
}

fn parse_token<T: FromStr>(path: &Path, token: Option<&str>, what: &str) -> Result<T, ReadError> {
    let token = token.ok_or_else(|| ReadError::plotfile(path, format!("missing {}", what)))?;
    token
        .trim()
        .parse()
        .map_err(|_| ReadError::plotfile(path, format!("bad {} '{}'", what, token)))
}

/// Line cursor that names what it expected when the text runs out
struct Cursor<'a> {
    path: &'a Path,
    lines: std::str::Lines<'a>,
}

impl<'a> Cursor<'a> {
    fn new(path: &'a Path, text: &'a str) -> Self {
        Self { path, lines: text.lines() }
    }

    fn next_line(&mut self, what: &str) -> Result<&'a str, ReadError> {
        self.lines
            .next()
            .ok_or_else(|| {
                ReadError::plotfile(self.path, format!("unexpected end before {}", what))
            })
    }

    fn parse<T: FromStr>(&mut self, what: &str) -> Result<T, ReadError> {
        let line = self.next_line(what)?;
        parse_token(self.path, Some(line), what)
    }

    fn floats(&mut self, what: &str, count: usize) -> Result<Vec<f64>, ReadError> {
        let line = self.next_line(what)?;
        let values = line
            .split_whitespace()
            .map(|t| parse_token(self.path, Some(t), what))
            .collect::<Result<Vec<f64>, _>>()?;
        if values.len() < count {
            return Err(ReadError::plotfile(
                self.path,
                format!("{} has {} values, expected {}", what, values.len(), count),
            ));
        }
        Ok(values)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
