// src/processing/parallel.rs
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::io::{read_bands_parallel, write_raster};
use crate::processing::encoding::{encode_for_output, OutputEncoding};
use crate::processing::error::CalcError;
use crate::processing::summary::{summarize, Histogram, SummaryOptions, SummaryReport, HISTOGRAM_DOMAIN};
use crate::utils::gdal_ext::TypedBuffer;

/// Trait for spectral index calculators
pub trait IndexCalculator: Send + Sync {
    /// Calculate the index from the provided input bands.
    ///
    /// Precondition violations (band arity, grid shapes) surface as
    /// `CalcError`; out-of-domain pixel values do not.
    fn calculate(&self, inputs: &[TypedBuffer]) -> Result<TypedBuffer, CalcError>;

    /// Return the number of required input bands
    fn required_bands(&self) -> usize;

    /// Return the name of the index
    fn name(&self) -> &str;
}

/// Runs one index computation from input paths to a written raster.
///
/// Stateless between invocations; each call reads its own bands and
/// produces its own result grid.
pub struct ParallelProcessor {
    io_threads: usize,
}

impl ParallelProcessor {
    pub fn new(io_threads: Option<usize>) -> Self {
        let io_threads = io_threads.unwrap_or_else(|| num_cpus::get().max(2));

        Self { io_threads }
    }

    pub fn process<I: IndexCalculator>(
        &self,
        calculator: I,
        input_paths: &[String],
        output_path: &str,
        encoding: OutputEncoding,
        compress: &str,
        compress_level: u8,
        tiled: bool,
        summary: Option<&SummaryOptions>,
    ) -> Result<()> {
        if input_paths.len() < calculator.required_bands() {
            return Err(CalcError::NotEnoughBands {
                required: calculator.required_bands(),
                provided: input_paths.len(),
            }
            .into());
        }

        // Read all input bands into memory
        let paths: Vec<&Path> = input_paths.iter().map(Path::new).collect();
        let (bands, geo_info) = read_bands_parallel(&paths, self.io_threads)?;
        let inputs: Vec<TypedBuffer> = bands.into_iter().map(TypedBuffer::F32).collect();

        // Calculate the index
        let result = calculator.calculate(&inputs)?;
        let index = result
            .as_f32()
            .context("index calculation produced a non-float grid")?;

        // The summary samples the raw index grid, before any encoding.
        if let Some(opts) = summary {
            let samples: Vec<f32> = summarize(index, opts.stride).collect();
            let histogram = Histogram::from_samples(samples.iter().copied(), opts.bins, HISTOGRAM_DOMAIN);
            let report = SummaryReport { samples, histogram };
            fs::write(&opts.output, serde_json::to_string_pretty(&report)?)
                .with_context(|| format!("failed to write summary to {}", opts.output.display()))?;
        }

        // Encode and hand off to the raster writer
        let payload = encode_for_output(index, encoding);
        write_raster(
            &payload,
            &geo_info,
            Path::new(output_path),
            encoding,
            calculator.name(),
            compress,
            compress_level,
            tiled,
        )?;

        Ok(())
    }
}
