use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ndvi-calc")]
#[command(about = "NDVI calculator for georeferenced rasters")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output file path
    #[arg(short, long, default_value = "ndvi.tif", global = true)]
    pub output: PathBuf,

    /// Write scaled 8-bit output instead of float32
    #[arg(long, global = true)]
    pub byte: bool,

    /// Compression algorithm (DEFLATE, ZSTD, LZW, NONE)
    #[arg(long, default_value = "DEFLATE", global = true)]
    pub compress: String,

    /// Compression level
    #[arg(long, default_value = "6", global = true)]
    pub compress_level: u8,

    /// Create a tiled GeoTIFF
    #[arg(long, global = true)]
    pub tiled: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalized Difference Vegetation Index: (NIR-RED)/(NIR+RED)
    Ndvi {
        /// Near-infrared band
        #[arg(short = 'n', long)]
        nir: PathBuf,

        /// Visible red band
        #[arg(short = 'r', long)]
        red: PathBuf,

        /// Write sampled values and a histogram as JSON to this path
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Keep every n-th valid pixel in the summary sample
        #[arg(long, default_value = "1000")]
        stride: usize,

        /// Number of histogram buckets
        #[arg(long, default_value = "20")]
        bins: usize,
    },

    /// Run several operations from a JSON configuration
    Batch {
        /// Configuration file path
        #[arg(short, long)]
        config: PathBuf,
    },
}
