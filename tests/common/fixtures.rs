//! Solver output fixtures written into temporary directories
//!
//! Every fixture describes the same 1-D domain: [`N_CELLS`] cells of width
//! [`DX`] starting at 0, so readers of different formats can be compared.

use ndarray::{Array1, Array2, Array3};
use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::Path;

pub const N_CELLS: usize = 10;
pub const DX: f64 = 10.0;

/// Mesh node x-coordinates 0, DX, ..., N_CELLS * DX
pub fn nodes() -> Vec<f64> {
    (0..=N_CELLS).map(|i| i as f64 * DX).collect()
}

/// Cell centres DX/2, 3DX/2, ...
pub fn centers() -> Vec<f64> {
    (0..N_CELLS).map(|i| (i as f64 + 0.5) * DX).collect()
}

/// Decreasing tracer front, one value per cell
pub fn front(scale: f64) -> Vec<f64> {
    centers()
        .iter()
        .map(|x| scale * 1e-3 / (1.0 + (0.1 * (x - 50.0)).exp()))
        .collect()
}

/// Amanzi-U `<root>_mesh.h5` and `<root>_data.h5` in `dir`
///
/// The mesh repeats each node four times (all first copies, then the
/// others) the way a 1-D column of hexahedra is written.
pub fn write_amanzi(dir: &Path, root: &str, field: &str, steps: &[(&str, Vec<f64>)]) {
    fs::create_dir_all(dir).unwrap();
    let n = N_CELLS + 1;
    let nodes = Array2::from_shape_fn((4 * n, 3), |(r, c)| match c {
        0 => (r % n) as f64 * DX,
        1 => (r / n / 2) as f64,
        _ => (r / n % 2) as f64,
    });

    let mesh = hdf5::File::create(dir.join(format!("{}_mesh.h5", root))).unwrap();
    let group = mesh.create_group("0").unwrap().create_group("Mesh").unwrap();
    group.new_dataset_builder().with_data(&nodes).create("Nodes").unwrap();

    let data = hdf5::File::create(dir.join(format!("{}_data.h5", root))).unwrap();
    let group = data.create_group(field).unwrap();
    for (label, values) in steps {
        let values = Array1::from(values.clone());
        group.new_dataset_builder().with_data(&values).create(*label).unwrap();
    }
}

/// PFloTran output file with one snapshot per `(time group, values)`
pub fn write_pflotran(path: &Path, field: &str, snapshots: &[(&str, Vec<f64>)]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let file = hdf5::File::create(path).unwrap();

    let x = Array1::from(nodes());
    file.create_group("Coordinates")
        .unwrap()
        .new_dataset_builder()
        .with_data(&x)
        .create("X [m]")
        .unwrap();

    for (time, values) in snapshots {
        let data = Array3::from_shape_vec((values.len(), 1, 1), values.clone()).unwrap();
        file.create_group(time)
            .unwrap()
            .new_dataset_builder()
            .with_data(&data)
            .create(field)
            .unwrap();
    }
}

/// CrunchFlow-style table: `ignore` header lines, then `x value` rows
pub fn write_table(dir: &Path, file_name: &str, ignore: usize, values: &[f64]) {
    fs::create_dir_all(dir).unwrap();
    let mut text = String::new();
    for i in 0..ignore {
        writeln!(text, "# header line {}", i + 1).unwrap();
    }
    for (x, v) in centers().iter().zip(values) {
        writeln!(text, "  {:.4E}  {:.6E}", x, v).unwrap();
    }
    fs::write(dir.join(file_name), text).unwrap();
}

/// Single-level 2-D AMReX plot file `dir/name` with one box of N_CELLS x 2 cells
///
/// Row j = 0 holds `values`; row j = 1 holds a constant 9.0 that must never
/// appear in an extracted profile.
pub fn write_plotfile(dir: &Path, name: &str, component: &str, values: &[f64]) {
    let plt = dir.join(name);
    fs::create_dir_all(plt.join("Level_0")).unwrap();
    let hi = N_CELLS - 1;
    let length = N_CELLS as f64 * DX;

    let mut header = String::new();
    writeln!(header, "HyperCLaw-V1.1").unwrap();
    writeln!(header, "2").unwrap();
    writeln!(header, "density").unwrap();
    writeln!(header, "{}", component).unwrap();
    writeln!(header, "2\n50.0\n0").unwrap();
    writeln!(header, "0 0\n{} {}", length, 2.0 * DX).unwrap();
    writeln!(header).unwrap();
    writeln!(header, "((0,0) ({},1) (0,0))\n71", hi).unwrap();
    writeln!(header, "{} {}\n0\n0", DX, DX).unwrap();
    writeln!(header, "0 1 50.0\n71").unwrap();
    writeln!(header, "0 {}\n0 {}", length, 2.0 * DX).unwrap();
    writeln!(header, "Level_0/Cell").unwrap();
    fs::write(plt.join("Header"), header).unwrap();

    let cell_box = format!("((0,0) ({},1) (0,0))", hi);
    let cell_h = format!(
        "1\n0\n2\n0\n(1 0\n{}\n)\n1\nFabOnDisk: Cell_D_00000 0\n",
        cell_box
    );
    fs::write(plt.join("Level_0/Cell_H"), cell_h).unwrap();

    let mut data = Vec::new();
    writeln!(
        data,
        "FAB ((8, (64 11 52 0 1 12 0 1023)),(8, (8 7 6 5 4 3 2 1))){} 2",
        cell_box
    )
    .unwrap();
    // component 0 ("density"), then the requested component
    for _ in 0..2 * N_CELLS {
        data.extend_from_slice(&1000.0_f64.to_le_bytes());
    }
    for v in values {
        data.extend_from_slice(&v.to_le_bytes());
    }
    for _ in 0..N_CELLS {
        data.extend_from_slice(&9.0_f64.to_le_bytes());
    }
    fs::write(plt.join("Level_0/Cell_D_00000"), data).unwrap();
}
