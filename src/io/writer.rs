// src/io/writer.rs
use anyhow::Result;
use gdal::raster::{Buffer, RasterCreationOptions};
use gdal::{DriverManager, Metadata};
use std::path::Path;

use super::reader::GeoInfo;
use crate::processing::encoding::OutputEncoding;
use crate::utils::gdal_ext::TypedBuffer;

/// Persist an encoded index grid as a single-band georeferenced GTiff.
///
/// Band type, no-data value and value metadata follow the chosen
/// encoding; projection and geotransform are propagated unchanged from
/// the input.
pub fn write_raster(
    payload: &TypedBuffer,
    geo_info: &GeoInfo,
    output_path: &Path,
    encoding: OutputEncoding,
    index_name: &str,
    compress: &str,
    compress_level: u8,
    tiled: bool,
) -> Result<()> {
    let driver = DriverManager::get_driver_by_name("GTiff")?;

    // Create options vector
    let mut options = Vec::new();

    // Add compression if not NONE
    if compress.to_uppercase() != "NONE" {
        options.push(format!("COMPRESS={}", compress.to_uppercase()));

        // Add compression level for supported algorithms
        match compress.to_uppercase().as_str() {
            "DEFLATE" => options.push(format!("ZLEVEL={}", compress_level.min(9))),
            "ZSTD" => options.push(format!("ZSTD_LEVEL={}", compress_level.min(22))),
            _ => {}
        }
    }

    // Add tiling if enabled
    if tiled {
        options.push("TILED=YES".to_string());
    }

    // Always use multi-threading
    options.push("NUM_THREADS=ALL_CPUS".to_string());

    let creation_options = RasterCreationOptions::from_iter(options);

    match (encoding, payload) {
        (OutputEncoding::Float32, TypedBuffer::F32(data)) => {
            let mut out_ds = driver.create_with_band_type_with_options::<f32, _>(
                output_path,
                geo_info.width,
                geo_info.height,
                1,
                &creation_options,
            )?;

            out_ds.set_projection(&geo_info.projection)?;
            out_ds.set_geo_transform(&geo_info.geo_transform)?;

            let mut band = out_ds.rasterband(1)?;
            band.set_no_data_value(Some(encoding.no_data_value()))?;
            band.set_description(index_name)?;

            let mut buffer = Buffer::new(data.shape(), data.data().to_vec());
            band.write((0, 0), data.shape(), &mut buffer)?;

            out_ds.flush_cache()?;
        }
        (OutputEncoding::ScaledByte, TypedBuffer::U8(data)) => {
            let mut out_ds = driver.create_with_band_type_with_options::<u8, _>(
                output_path,
                geo_info.width,
                geo_info.height,
                1,
                &creation_options,
            )?;

            out_ds.set_projection(&geo_info.projection)?;
            out_ds.set_geo_transform(&geo_info.geo_transform)?;

            let mut band = out_ds.rasterband(1)?;
            band.set_no_data_value(Some(encoding.no_data_value()))?;
            // Stored byte b decodes back to an index value as b/127 - 1
            band.set_metadata_item("SCALE", &format!("{}", 1.0 / 127.0), "")?;
            band.set_metadata_item("OFFSET", "-1", "")?;
            band.set_description(&format!("{} (scaled)", index_name))?;

            let mut buffer = Buffer::new(data.shape(), data.data().to_vec());
            band.write((0, 0), data.shape(), &mut buffer)?;

            out_ds.flush_cache()?;
        }
        _ => anyhow::bail!("raster payload does not match the {encoding:?} encoding"),
    }

    Ok(())
}
