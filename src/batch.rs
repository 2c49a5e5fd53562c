// src/batch.rs
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::processing::encoding::OutputEncoding;
use crate::processing::indices::NDVI;
use crate::processing::summary::{SummaryOptions, DEFAULT_BINS, DEFAULT_STRIDE};
use crate::processing::ParallelProcessor;

#[derive(Deserialize, Serialize, Debug)]
pub struct BatchConfig {
    #[serde(default)]
    pub global: GlobalParams,
    pub operations: Vec<Operation>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct GlobalParams {
    #[serde(default = "default_encoding")]
    pub encoding: String,
    #[serde(default = "default_compress")]
    pub compress: String,
    #[serde(default = "default_compress_level")]
    pub compress_level: u8,
    #[serde(default = "default_true")]
    pub tiled: bool,
    #[serde(default = "default_stride")]
    pub stride: usize,
    #[serde(default = "default_bins")]
    pub bins: usize,
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            compress: default_compress(),
            compress_level: default_compress_level(),
            tiled: default_true(),
            stride: default_stride(),
            bins: default_bins(),
        }
    }
}

fn default_encoding() -> String {
    "float32".to_string()
}

fn default_compress() -> String {
    "DEFLATE".to_string()
}

fn default_compress_level() -> u8 {
    6
}

fn default_true() -> bool {
    true
}

fn default_stride() -> usize {
    DEFAULT_STRIDE
}

fn default_bins() -> usize {
    DEFAULT_BINS
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Operation {
    pub nir: String,
    pub red: String,
    pub output: String,
    pub encoding: Option<String>,
    pub summary: Option<String>,
    pub stride: Option<usize>,
    pub bins: Option<usize>,
    pub compress: Option<String>,
    pub compress_level: Option<u8>,
    pub tiled: Option<bool>,
}

pub fn process_batch(config_path: &PathBuf) -> Result<()> {
    // Read and parse configuration file
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("failed to read batch config {}", config_path.display()))?;
    let config: BatchConfig = serde_json::from_str(&config_content)?;

    // Create processor
    let processor = ParallelProcessor::new(None);

    println!(
        "Starting batch processing with {} operations...",
        config.operations.len()
    );

    // Process each operation
    for (i, op) in config.operations.iter().enumerate() {
        println!(
            "[{}/{}] NDVI {} + {} -> {}",
            i + 1,
            config.operations.len(),
            op.nir,
            op.red,
            op.output
        );

        // Get parameters, with operation-specific overrides
        let encoding =
            OutputEncoding::parse(op.encoding.as_deref().unwrap_or(&config.global.encoding))?;
        let compress = op.compress.as_deref().unwrap_or(&config.global.compress);
        let compress_level = op.compress_level.unwrap_or(config.global.compress_level);
        let tiled = op.tiled.unwrap_or(config.global.tiled);
        let summary = op.summary.as_ref().map(|path| SummaryOptions {
            stride: op.stride.unwrap_or(config.global.stride),
            bins: op.bins.unwrap_or(config.global.bins),
            output: PathBuf::from(path),
        });

        let ndvi = NDVI::new(0, 1, None);
        processor.process(
            ndvi,
            &[op.nir.clone(), op.red.clone()],
            &op.output,
            encoding,
            compress,
            compress_level,
            tiled,
            summary.as_ref(),
        )?;
    }

    println!("Batch processing complete!");
    Ok(())
}
