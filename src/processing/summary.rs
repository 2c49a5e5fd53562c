// src/processing/summary.rs
use std::path::PathBuf;

use gdal::raster::Buffer;
use itertools::Itertools;
use serde::Serialize;

use crate::processing::encoding::NO_DATA;

/// Every n-th valid pixel feeds the summary.
pub const DEFAULT_STRIDE: usize = 1000;
/// Bucket count for the index distribution.
pub const DEFAULT_BINS: usize = 20;
/// NDVI is bounded by construction, so the distribution is bucketed
/// over the full mathematical range.
pub const HISTOGRAM_DOMAIN: (f32, f32) = (-1.0, 1.0);

const ROUND_FACTOR: f32 = 1e4;

fn is_valid(value: f32) -> bool {
    value.is_finite() && value != NO_DATA
}

/// Sample the valid portion of an index grid for visualization.
///
/// Takes every `stride`-th valid (finite, unmasked) value, rounds to
/// four decimal places and yields the distinct results in ascending
/// order. Deterministic for a given grid and stride; rounded samples
/// are clamped so none escapes the grid's actual min/max.
pub fn summarize(index: &Buffer<f32>, stride: usize) -> impl Iterator<Item = f32> {
    let valid: Vec<f32> = index.data().iter().copied().filter(|&v| is_valid(v)).collect();

    let (min, max) = valid
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    valid
        .into_iter()
        .step_by(stride.max(1))
        .map(|v| (v * ROUND_FACTOR).round() / ROUND_FACTOR)
        .map(move |v| v.clamp(min, max))
        .sorted_by(|a, b| a.total_cmp(b))
        .dedup()
}

/// Fixed-width bucketing of sampled index values.
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    pub bin_centers: Vec<f32>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bucket `values` into `bins` uniform bins over `domain`.
    /// Out-of-domain samples land in the edge bins; NaN is skipped.
    pub fn from_samples(
        values: impl IntoIterator<Item = f32>,
        bins: usize,
        domain: (f32, f32),
    ) -> Self {
        let (lo, hi) = domain;
        if bins == 0 || !(hi > lo) {
            return Self {
                bin_centers: Vec::new(),
                counts: Vec::new(),
            };
        }

        let width = (hi - lo) / bins as f32;
        let mut counts = vec![0usize; bins];

        for value in values {
            if !value.is_finite() {
                continue;
            }
            let t = ((value - lo) / (hi - lo)) * bins as f32;
            let idx = (t.floor() as isize).clamp(0, bins as isize - 1) as usize;
            counts[idx] += 1;
        }

        let bin_centers = (0..bins).map(|b| lo + (b as f32 + 0.5) * width).collect();

        Self { bin_centers, counts }
    }
}

/// Where and how densely to sample the result for the summary report.
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    pub stride: usize,
    pub bins: usize,
    pub output: PathBuf,
}

/// Numeric payload handed to an external chart renderer.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub samples: Vec<f32>,
    pub histogram: Histogram,
}
