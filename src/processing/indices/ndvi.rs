// src/processing/indices/ndvi.rs
use rayon::prelude::*;

use crate::processing::encoding::NO_DATA;
use crate::processing::error::CalcError;
use crate::processing::parallel::IndexCalculator;
use crate::utils::gdal_ext::TypedBuffer;

/// Normalized Difference Vegetation Index (NDVI) calculator
pub struct NDVI {
    nir_index: usize,
    red_index: usize,
    name: String,
}

impl NDVI {
    pub fn new(nir_index: usize, red_index: usize, name: Option<String>) -> Self {
        Self {
            nir_index,
            red_index,
            name: name.unwrap_or_else(|| "NDVI".to_string()),
        }
    }
}

impl IndexCalculator for NDVI {
    fn calculate(&self, inputs: &[TypedBuffer]) -> Result<TypedBuffer, CalcError> {
        let required = self.required_bands();
        if inputs.len() < required {
            return Err(CalcError::NotEnoughBands {
                required,
                provided: inputs.len(),
            });
        }

        // Both bands go through f32 before any arithmetic, whatever the
        // source raster stored.
        let nir = inputs[self.nir_index].to_f32();
        let red = inputs[self.red_index].to_f32();

        if nir.shape() != red.shape() {
            return Err(CalcError::ShapeMismatch {
                expected: nir.shape(),
                actual: red.shape(),
            });
        }

        let shape = nir.shape();
        let nir_band = nir.data();
        let red_band = red.data();

        // Preallocate result buffer
        let mut result_data = vec![0.0f32; shape.0 * shape.1];

        // Calculate NDVI in parallel: (NIR - RED) / (NIR + RED)
        result_data.par_iter_mut().enumerate().for_each(|(i, result)| {
            let nir_val = nir_band[i];
            let red_val = red_band[i];

            // x/0 and 0/0 come out ±Inf/NaN here rather than faulting.
            let value = (nir_val - red_val) / (nir_val + red_val);

            // Masked: exact zeros (a zero numerator compares equal to
            // -0.0) and every non-finite quotient.
            *result = if value == 0.0 || !value.is_finite() {
                NO_DATA
            } else {
                value
            };
        });

        Ok(TypedBuffer::F32(gdal::raster::Buffer::new(shape, result_data)))
    }

    fn required_bands(&self) -> usize {
        2 // NDVI requires exactly 2 bands (NIR, RED)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
