// src/io/reader.rs
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{anyhow, ensure, Context, Result};
use gdal::raster::Buffer;
use gdal::Dataset;

use crate::processing::error::CalcError;

/// Georeferencing carried from the input rasters to the output,
/// unmodified and never interpreted here.
pub struct GeoInfo {
    pub projection: String,
    pub geo_transform: [f64; 6],
    pub width: usize,
    pub height: usize,
}

/// Read band 1 of every input raster fully into memory.
///
/// Each band is read on an I/O worker thread fed through a request
/// channel; every worker owns the datasets it opens. All bands must
/// match the first raster's dimensions or the read fails with
/// `ShapeMismatch` before any computation starts.
pub fn read_bands_parallel(
    band_paths: &[&Path],
    io_threads: usize,
) -> Result<(Vec<Buffer<f32>>, GeoInfo)> {
    ensure!(!band_paths.is_empty(), "no input bands provided");

    // Open first dataset to get dimensions and projection info
    let first_ds = Dataset::open(band_paths[0])?;
    let (width, height) = first_ds.raster_size();
    let projection = first_ds.projection();
    let geo_transform = first_ds.geo_transform()?;
    drop(first_ds);

    // One request per band, drained by a small pool of reader threads
    let threads = io_threads.min(band_paths.len()).max(1);
    let (req_tx, req_rx) = flume::unbounded::<(usize, PathBuf)>();
    let (res_tx, res_rx) = flume::unbounded();

    for (idx, path) in band_paths.iter().enumerate() {
        req_tx.send((idx, path.to_path_buf())).unwrap();
    }
    drop(req_tx);

    let mut workers = Vec::with_capacity(threads);
    for _ in 0..threads {
        let req_rx = req_rx.clone();
        let res_tx = res_tx.clone();
        workers.push(thread::spawn(move || {
            for (idx, path) in req_rx {
                let _ = res_tx.send((idx, read_full_band(&path)));
            }
        }));
    }
    drop(req_rx);
    drop(res_tx);

    let results: Vec<_> = res_rx.into_iter().collect();
    for worker in workers {
        worker
            .join()
            .map_err(|_| anyhow!("band reader thread panicked"))?;
    }

    let mut bands: Vec<Option<Buffer<f32>>> = vec![None; band_paths.len()];
    for (idx, read) in results {
        let (size, buffer) = read
            .with_context(|| format!("failed to read band {}", band_paths[idx].display()))?;
        if size != (width, height) {
            return Err(CalcError::ShapeMismatch {
                expected: (width, height),
                actual: size,
            }
            .into());
        }
        bands[idx] = Some(buffer);
    }

    let mut out = Vec::with_capacity(bands.len());
    for (idx, band) in bands.into_iter().enumerate() {
        out.push(band.ok_or_else(|| anyhow!("band {} was never read", band_paths[idx].display()))?);
    }

    let geo_info = GeoInfo {
        projection,
        geo_transform,
        width,
        height,
    };

    Ok((out, geo_info))
}

fn read_full_band(path: &Path) -> gdal::errors::Result<((usize, usize), Buffer<f32>)> {
    let dataset = Dataset::open(path)?;
    let size = dataset.raster_size();
    let band = dataset.rasterband(1)?;
    let buffer = band.read_as::<f32>((0, 0), size, size, None)?;
    Ok((size, buffer))
}
