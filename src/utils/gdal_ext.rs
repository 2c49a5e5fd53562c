// src/utils/gdal_ext.rs
use gdal::raster::Buffer;

/// A raster band buffer tagged with its pixel type.
///
/// Inputs arrive as whatever the source raster stores (byte or uint16
/// imagery, or float reflectance); index math always runs on f32, so
/// every variant can be converted with [`TypedBuffer::to_f32`].
#[derive(Clone, Debug)]
pub enum TypedBuffer {
    U8(Buffer<u8>),
    U16(Buffer<u16>),
    F32(Buffer<f32>),
}

impl TypedBuffer {
    pub fn shape(&self) -> (usize, usize) {
        match self {
            TypedBuffer::U8(buffer) => buffer.shape(),
            TypedBuffer::U16(buffer) => buffer.shape(),
            TypedBuffer::F32(buffer) => buffer.shape(),
        }
    }

    pub fn as_f32(&self) -> Option<&Buffer<f32>> {
        match self {
            TypedBuffer::F32(buffer) => Some(buffer),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> Option<&Buffer<u8>> {
        match self {
            TypedBuffer::U8(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// Element-wise conversion to a 32-bit float buffer.
    ///
    /// Integer bands must pass through this before any division;
    /// integer arithmetic would truncate the fractional quotient.
    pub fn to_f32(&self) -> Buffer<f32> {
        match self {
            TypedBuffer::U8(buffer) => Buffer::new(
                buffer.shape(),
                buffer.data().iter().map(|&v| f32::from(v)).collect(),
            ),
            TypedBuffer::U16(buffer) => Buffer::new(
                buffer.shape(),
                buffer.data().iter().map(|&v| f32::from(v)).collect(),
            ),
            TypedBuffer::F32(buffer) => buffer.clone(),
        }
    }
}
