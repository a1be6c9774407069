//! Amanzi unstructured (Amanzi-U) HDF5 output
//!
//! A run writes two files into its output directory:
//!
//! - `<root>_mesh.h5`: dataset `0/Mesh/Nodes`, one row per node, column 0 = x.
//!   Every geometric node appears four times (the corner duplication of the
//!   visualization mesh), and the first quarter of the rows holds the distinct
//!   nodes in order along the domain.
//! - `<root>_data.h5`: one group per field, one dataset per time step, the
//!   dataset named by the step number (e.g. `"71"`).
//!
//! Field values are in model (cell) order and line up with the cell centres
//! computed from the mesh of the same run.

use std::path::{Path, PathBuf};

use super::{open_hdf5, read_flat, ReadError, TimeSelector};
use crate::series::{cell_centers, SampleSeries};

/// Dataset holding the node coordinates in the mesh file
pub const MESH_NODES: &str = "0/Mesh/Nodes";

/// Number of copies of each geometric node in the mesh file
const NODE_DUPLICATION: usize = 4;

/// Read the mesh file and return cell-centre x-positions
///
/// Takes the first `N / 4` rows of `0/Mesh/Nodes`, column 0, and returns
/// the midpoints of consecutive nodes.
///
/// # Errors
///
/// - [`ReadError::NotFound`] if the file does not exist
/// - [`ReadError::Hdf5`] if the dataset is missing or not a 2-D `f64` array
/// - [`ReadError::TooFewNodes`] if fewer than two distinct nodes remain
pub fn read_mesh_centers(mesh_path: impl AsRef<Path>) -> Result<Vec<f64>, ReadError> {
    let path = mesh_path.as_ref();
    let file = open_hdf5(path)?;

    let nodes = file
        .dataset(MESH_NODES)
        .and_then(|ds| ds.read_2d::<f64>())
        .map_err(|e| ReadError::hdf5(path, e))?;

    let distinct = nodes.nrows() / NODE_DUPLICATION;
    if distinct < 2 || nodes.ncols() == 0 {
        return Err(ReadError::TooFewNodes {
            path: path.to_path_buf(),
            found: distinct,
        });
    }

    let x: Vec<f64> = nodes.column(0).iter().take(distinct).copied().collect();
    Ok(cell_centers(&x))
}

/// Read the raw value array for one `(time, field)` key of the data file
///
/// `TimeSelector::Latest` picks the dataset with the largest integer name in
/// the field group.
pub fn read_field_values(
    data_path: impl AsRef<Path>,
    time: &TimeSelector,
    field: &str,
) -> Result<Vec<f64>, ReadError> {
    let path = data_path.as_ref();
    let file = open_hdf5(path)?;

    let label = match time {
        TimeSelector::Label(label) => label.clone(),
        TimeSelector::Latest => latest_step(&file, path, field)?,
    };

    log::debug!("reading {}/{} from {}", field, label, path.display());
    read_flat(&file, path, &format!("{}/{}", field, label))
}

/// Read one Amanzi-U profile from an output directory
///
/// Opens `<dir>/<root>_mesh.h5` and `<dir>/<root>_data.h5` and pairs the cell
/// centres with the field values.
///
/// # Errors
///
/// Any error of [`read_mesh_centers`] or [`read_field_values`], and
/// [`ReadError::LengthMismatch`] when the two files do not belong together.
pub fn read_amanzi_unstructured(
    dir: impl AsRef<Path>,
    root: &str,
    time: &TimeSelector,
    field: &str,
) -> Result<SampleSeries, ReadError> {
    let (mesh_path, data_path) = output_files(dir.as_ref(), root);

    let centers = read_mesh_centers(&mesh_path)?;
    let values = read_field_values(&data_path, time, field)?;

    SampleSeries::new(centers, values)
}

/// Paths of the mesh and data files written for `root`
pub fn output_files(dir: &Path, root: &str) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("{}_mesh.h5", root)),
        dir.join(format!("{}_data.h5", root)),
    )
}

fn latest_step(file: &hdf5::File, path: &Path, field: &str) -> Result<String, ReadError> {
    let names = file
        .group(field)
        .and_then(|g| g.member_names())
        .map_err(|e| ReadError::hdf5(path, e))?;

    names
        .into_iter()
        .filter_map(|name| name.parse::<u64>().ok().map(|step| (step, name)))
        .max_by_key(|(step, _)| *step)
        .map(|(_, name)| name)
        .ok_or_else(|| ReadError::NoSnapshot { path: path.to_path_buf() })
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array1, Array2};
    use tempfile::TempDir;

    const FIELD: &str = "total_component_concentration.cell.Tracer";

    /// Mesh with `n` distinct nodes at x = 0, 1, ..., n-1, each repeated
    /// four times in the layout Amanzi writes (all first copies, then the rest).
    fn write_mesh(path: &Path, n: usize) {
        let rows = n * NODE_DUPLICATION;
        let nodes = Array2::from_shape_fn((rows, 3), |(r, c)| match c {
            0 => (r % n) as f64,
            1 => if r / n >= 2 { 1.0 } else { 0.0 },
            _ => if r / n % 2 == 1 { 1.0 } else { 0.0 },
        });

        let file = hdf5::File::create(path).unwrap();
        let mesh = file.create_group("0").unwrap().create_group("Mesh").unwrap();
        mesh.new_dataset_builder().with_data(&nodes).create("Nodes").unwrap();
    }

    fn write_data(path: &Path, steps: &[(&str, Vec<f64>)]) {
        let file = hdf5::File::create(path).unwrap();
        let group = file.create_group(FIELD).unwrap();
        for (label, values) in steps {
            let data = Array1::from(values.clone());
            group.new_dataset_builder().with_data(&data).create(*label).unwrap();
        }
    }

    #[test]
    fn test_mesh_centers_use_first_quarter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tracer_mesh.h5");
        write_mesh(&path, 11);

        let centers = read_mesh_centers(&path).unwrap();

        assert_eq!(centers.len(), 10);
        for (i, c) in centers.iter().enumerate() {
            assert_relative_eq!(*c, i as f64 + 0.5);
        }
    }

    #[test]
    fn test_mesh_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_mesh_centers(dir.path().join("absent_mesh.h5")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_mesh_too_few_nodes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tiny_mesh.h5");
        write_mesh(&path, 1);

        let err = read_mesh_centers(&path).unwrap_err();
        assert!(matches!(err, ReadError::TooFewNodes { found: 1, .. }));
    }

    #[test]
    fn test_field_by_label_and_latest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tracer_data.h5");
        write_data(&path, &[
            ("0", vec![0.0, 0.0]),
            ("71", vec![1.0, 0.5]),
            ("9", vec![0.2, 0.1]),
        ]);

        let by_label = read_field_values(&path, &TimeSelector::label("9"), FIELD).unwrap();
        assert_eq!(by_label, vec![0.2, 0.1]);

        let latest = read_field_values(&path, &TimeSelector::Latest, FIELD).unwrap();
        assert_eq!(latest, vec![1.0, 0.5]);
    }

    #[test]
    fn test_field_missing_key_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tracer_data.h5");
        write_data(&path, &[("71", vec![1.0])]);

        let err = read_field_values(&path, &TimeSelector::label("72"), FIELD).unwrap_err();
        assert!(matches!(err, ReadError::Hdf5 { .. }));

        let err = read_field_values(&path, &TimeSelector::Latest, "no_such_field").unwrap_err();
        assert!(matches!(err, ReadError::Hdf5 { .. }));
    }

    #[test]
    fn test_unstructured_pairs_centers_with_values() {
        let dir = TempDir::new().unwrap();
        let (mesh, data) = output_files(dir.path(), "tracer");
        write_mesh(&mesh, 5);
        write_data(&data, &[("71", vec![1.0, 0.75, 0.5, 0.25])]);

        let series =
            read_amanzi_unstructured(dir.path(), "tracer", &TimeSelector::label("71"), FIELD)
                .unwrap();

        assert_eq!(series.len(), 4);
        assert_eq!(series.positions(), &[0.5, 1.5, 2.5, 3.5]);
        assert_eq!(series.values(), &[1.0, 0.75, 0.5, 0.25]);
    }

    #[test]
    fn test_unstructured_length_mismatch() {
        let dir = TempDir::new().unwrap();
        let (mesh, data) = output_files(dir.path(), "tracer");
        write_mesh(&mesh, 5);
        write_data(&data, &[("71", vec![1.0, 0.5])]);

        let err =
            read_amanzi_unstructured(dir.path(), "tracer", &TimeSelector::Latest, FIELD)
                .unwrap_err();
        assert!(matches!(err, ReadError::LengthMismatch { positions: 4, values: 2 }));
    }
}
