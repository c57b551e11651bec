use serde::{Deserialize, Serialize};

/// Vertical shape of the wind field near the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WindProfile {
    /// Same wind at every height.
    Constant,
    /// Power-law boundary layer: `w(h) = w_ref * (h / boundary_layer_height)^exponent`
    /// below the boundary layer height, constant `w_ref` above it.
    PowerLaw {
        boundary_layer_height: f64,
        exponent: f64,
    },
}

impl Default for WindProfile {
    fn default() -> Self {
        WindProfile::PowerLaw {
            boundary_layer_height: 600.0,
            exponent: 1.0 / 7.0,
        }
    }
}

impl WindProfile {
    /// Fraction of the reference wind present at `height_agl` metres above ground.
    pub fn scale(&self, height_agl: f64) -> f64 {
        match *self {
            WindProfile::Constant => 1.0,
            WindProfile::PowerLaw {
                boundary_layer_height,
                exponent,
            } => {
                if boundary_layer_height <= 0.0 || height_agl >= boundary_layer_height {
                    1.0
                } else if height_agl <= 0.0 {
                    0.0
                } else {
                    (height_agl / boundary_layer_height).powf(exponent)
                }
            }
        }
    }
}
