use crate::foundation::error::{AvatarError, AvatarResult};

/// Square canvas described by its half side length in pixels.
///
/// The canvas spans `2 * half_size` pixels per side and maps onto the unit square `[-1, 1]^2`
/// with row 0 at `y = +1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Pixels per unit of the `[-1, 1]` coordinate range.
    pub half_size: u32,
}

impl Canvas {
    /// Half size used when the caller does not pick one (420x420 output).
    pub const DEFAULT_HALF_SIZE: u32 = 210;

    /// Largest accepted half size (8192x8192 output, 192 MiB of RGB8).
    pub const MAX_HALF_SIZE: u32 = 4096;

    /// Validate and build a canvas. `half_size` must be in `1..=MAX_HALF_SIZE`.
    pub fn new(half_size: u32) -> AvatarResult<Self> {
        if half_size == 0 {
            return Err(AvatarError::validation("canvas half_size must be > 0"));
        }
        if half_size > Self::MAX_HALF_SIZE {
            return Err(AvatarError::validation(format!(
                "canvas half_size {half_size} exceeds maximum {}",
                Self::MAX_HALF_SIZE
            )));
        }
        Ok(Self { half_size })
    }

    /// Pixel count along one side.
    pub fn side(self) -> u32 {
        self.half_size * 2
    }

    /// Map a pixel location to math-space coordinates.
    pub fn to_unit(self, px: u32, py: u32) -> (f64, f64) {
        let h = f64::from(self.half_size);
        let x = (f64::from(px) - h) / h;
        let y = -(f64::from(py) - h) / h;
        (x, y)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            half_size: Self::DEFAULT_HALF_SIZE,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
