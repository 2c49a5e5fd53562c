// src/processing/encoding.rs
use gdal::raster::Buffer;
use gdal_sys::GDALDataType;

use crate::processing::error::CalcError;
use crate::utils::gdal_ext::TypedBuffer;

/// Sentinel written into the index grid at masked positions.
pub const NO_DATA: f32 = -99.0;

/// Persisted pixel representation for the output raster.
///
/// Each variant owns its band type, its declared no-data value and its
/// value mapping; nothing is shared between the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputEncoding {
    /// Index values written as 32-bit floats, unchanged.
    Float32,
    /// [-1, 1] mapped onto [0, 255] and written as unsigned bytes.
    ScaledByte,
}

impl OutputEncoding {
    /// Parse an encoding name from the CLI or a batch configuration.
    pub fn parse(name: &str) -> Result<Self, CalcError> {
        match name.to_lowercase().as_str() {
            "float32" | "float" => Ok(OutputEncoding::Float32),
            "byte" | "scaled-byte" => Ok(OutputEncoding::ScaledByte),
            other => Err(CalcError::InvalidEncoding(other.to_string())),
        }
    }

    /// Select an encoding from a raw GDAL data-type code.
    ///
    /// `GDT_UInt16` selects the scaled-byte output (the raster it
    /// produces is still `GDT_Byte`); every other code is rejected
    /// before anything is written.
    pub fn from_gdal_code(code: GDALDataType::Type) -> Result<Self, CalcError> {
        match code {
            GDALDataType::GDT_Float32 => Ok(OutputEncoding::Float32),
            GDALDataType::GDT_UInt16 => Ok(OutputEncoding::ScaledByte),
            other => Err(CalcError::InvalidEncoding(format!("GDAL type code {other}"))),
        }
    }

    /// Band type of the created raster.
    pub fn gdal_type(self) -> GDALDataType::Type {
        match self {
            OutputEncoding::Float32 => GDALDataType::GDT_Float32,
            OutputEncoding::ScaledByte => GDALDataType::GDT_Byte,
        }
    }

    /// Declared no-data value for the output band.
    ///
    /// Both encodings declare -99. For ScaledByte that is outside the
    /// valid [0, 255] band; see `encode_for_output` for where masked
    /// pixels actually land.
    pub fn no_data_value(self) -> f64 {
        match self {
            OutputEncoding::Float32 => f64::from(NO_DATA),
            OutputEncoding::ScaledByte => -99.0,
        }
    }
}

/// Map one index value onto the byte scale: `round((v + 1) * 127)`,
/// clamped to [0, 255].
pub fn scale_to_byte(value: f32) -> u8 {
    ((value + 1.0) * 127.0).round().clamp(0.0, 255.0) as u8
}

/// Produce the persistence-ready buffer for the chosen encoding.
///
/// Float32 passes the grid through bit-for-bit. ScaledByte applies
/// [`scale_to_byte`] to every pixel; the -99 sentinel scales below zero
/// and clamps to byte 0, while the band's declared no-data stays -99.
pub fn encode_for_output(index: &Buffer<f32>, encoding: OutputEncoding) -> TypedBuffer {
    match encoding {
        OutputEncoding::Float32 => TypedBuffer::F32(index.clone()),
        OutputEncoding::ScaledByte => {
            let scaled = index.data().iter().map(|&v| scale_to_byte(v)).collect();
            TypedBuffer::U8(Buffer::new(index.shape(), scaled))
        }
    }
}
