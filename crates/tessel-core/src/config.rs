// crates/tessel-core/src/config.rs
use serde::{Deserialize, Serialize};

/// Border width, in device-independent pixels, used by the default-border helpers.
pub const DEFAULT_BORDER_DIP: f32 = 5.0;

/// Display configuration consumed by containers and layout policies.
///
/// The scale factor is resolved by the platform layer; layout only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Physical pixels per device-independent pixel.
    pub scale_factor: f32,
    /// Default border in device-independent pixels.
    pub base_border: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            base_border: DEFAULT_BORDER_DIP,
        }
    }
}

impl LayoutConfig {
    pub fn with_scale_factor(scale_factor: f32) -> Self {
        Self {
            scale_factor,
            ..Self::default()
        }
    }

    /// Unrounded default border in physical pixels.
    pub fn default_border_fractional(&self) -> f32 {
        self.base_border * self.scale_factor
    }

    pub fn default_border(&self) -> i32 {
        self.default_border_fractional().round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_border_follows_scale() {
        assert_eq!(LayoutConfig::default().default_border(), 5);

        let config = LayoutConfig::with_scale_factor(1.25);
        assert_eq!(config.default_border_fractional(), 6.25);
        assert_eq!(config.default_border(), 6);

        let config = LayoutConfig::with_scale_factor(1.5);
        assert_eq!(config.default_border(), 8);
    }
}
