// src/io.rs
//
// Reader and writer for the delimited-text grid format the drivers use:
// whitespace-separated columns `x y z value`, one sample per line in
// row-major order, `#` lines treated as comments. The grid shape is not
// stored in the file, so the caller supplies it on read.

use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::scalar_field::ScalarField2D;

/// The four columns of a text grid, each reshaped to the grid shape.
/// `z` is the observation height of each sample; the derivative filters
/// never read it, but it round-trips through the format.
#[derive(Debug, Clone)]
pub struct GridData {
    pub x: ScalarField2D,
    pub y: ScalarField2D,
    pub z: ScalarField2D,
    pub value: ScalarField2D,
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    Ok(())
}

/// Read a four-column text grid and reshape it to `shape = (ny, nx)`.
pub fn read_grid_text(path: &Path, shape: (usize, usize)) -> std::io::Result<GridData> {
    let (ny, nx) = shape;
    let n = ny * nx;

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    let mut z = Vec::with_capacity(n);
    let mut value = Vec::with_capacity(n);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let cols = trimmed
            .split_whitespace()
            .map(|tok| {
                tok.parse::<f64>().map_err(|e| {
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("line {}: bad number {:?}: {}", line_no + 1, tok, e),
                    )
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if cols.len() != 4 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "line {}: expected 4 columns (x y z value), got {}",
                    line_no + 1,
                    cols.len()
                ),
            ));
        }

        x.push(cols[0]);
        y.push(cols[1]);
        z.push(cols[2]);
        value.push(cols[3]);
    }

    if value.len() != n {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!(
                "sample count mismatch: file has {}, expected {} ({} x {})",
                value.len(),
                n,
                ny,
                nx
            ),
        ));
    }

    Ok(GridData {
        x: ScalarField2D::from_vec(ny, nx, x),
        y: ScalarField2D::from_vec(ny, nx, y),
        z: ScalarField2D::from_vec(ny, nx, z),
        value: ScalarField2D::from_vec(ny, nx, value),
    })
}

/// Write a four-column text grid, one row-major sample per line.
pub fn write_grid_text(path: &Path, data: &GridData) -> std::io::Result<()> {
    let shape = data.value.shape();
    if data.x.shape() != shape || data.y.shape() != shape || data.z.shape() != shape {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!(
                "column shape mismatch: x {:?}, y {:?}, z {:?}, value {:?}",
                data.x.shape(),
                data.y.shape(),
                data.z.shape(),
                shape
            ),
        ));
    }

    ensure_parent_dir(path)?;
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    for idx in 0..data.value.data.len() {
        writeln!(
            w,
            "{:.10e} {:.10e} {:.10e} {:.10e}",
            data.x.data[idx], data.y.data[idx], data.z.data[idx], data.value.data[idx]
        )?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn sample_grid(ny: usize, nx: usize) -> GridData {
        GridData {
            x: ScalarField2D::from_fn(ny, nx, |_, i| 100.0 * i as f64),
            y: ScalarField2D::from_fn(ny, nx, |j, _| 100.0 * j as f64),
            z: ScalarField2D::from_fn(ny, nx, |_, _| -150.0),
            value: ScalarField2D::from_fn(ny, nx, |j, i| (j as f64 - i as f64) * 0.5),
        }
    }

    #[test]
    fn text_grid_round_trips() {
        let dir = env::temp_dir().join("potfield_io_roundtrip");
        let path = dir.join("grid.dat");

        let out = sample_grid(3, 5);
        write_grid_text(&path, &out).unwrap();
        let back = read_grid_text(&path, (3, 5)).unwrap();

        for (a, b) in out.value.data.iter().zip(back.value.data.iter()) {
            assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
        }
        for (a, b) in out.x.data.iter().zip(back.x.data.iter()) {
            assert!((a - b).abs() < 1e-9);
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn wrong_shape_is_rejected_on_read() {
        let dir = env::temp_dir().join("potfield_io_badshape");
        let path = dir.join("grid.dat");

        write_grid_text(&path, &sample_grid(2, 2)).unwrap();
        let err = read_grid_text(&path, (3, 3)).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn comment_and_blank_lines_are_skipped() {
        let dir = env::temp_dir().join("potfield_io_comments");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("grid.dat");
        std::fs::write(
            &path,
            "# header\n0 0 0 1.5\n\n1 0 0 2.5\n# trailing\n",
        )
        .unwrap();

        let data = read_grid_text(&path, (1, 2)).unwrap();
        assert_eq!(data.value.data, vec![1.5, 2.5]);

        std::fs::remove_dir_all(&dir).ok();
    }
}
