// src/main.rs
use anyhow::Result;
use clap::Parser;

use ndvi_calc::batch::process_batch;
use ndvi_calc::cli::{Cli, Commands};
use ndvi_calc::processing::encoding::OutputEncoding;
use ndvi_calc::processing::indices::NDVI;
use ndvi_calc::processing::summary::SummaryOptions;
use ndvi_calc::processing::ParallelProcessor;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Ndvi {
            nir,
            red,
            summary,
            stride,
            bins,
        } => {
            let encoding = if cli.byte {
                OutputEncoding::ScaledByte
            } else {
                OutputEncoding::Float32
            };

            let summary = summary.as_ref().map(|path| SummaryOptions {
                stride: *stride,
                bins: *bins,
                output: path.clone(),
            });

            let processor = ParallelProcessor::new(None);
            let ndvi = NDVI::new(0, 1, None);

            processor.process(
                ndvi,
                &[
                    nir.to_string_lossy().to_string(),
                    red.to_string_lossy().to_string(),
                ],
                cli.output.to_string_lossy().as_ref(),
                encoding,
                &cli.compress,
                cli.compress_level,
                cli.tiled,
                summary.as_ref(),
            )?;

            println!("Processing complete: {}", cli.output.display());
        }
        Commands::Batch { config } => process_batch(config)?,
    }

    Ok(())
}
