use rayon::prelude::*;

use crate::{
    expression::node::Expr,
    foundation::core::Canvas,
    foundation::error::{AvatarError, AvatarResult},
};

/// One 8-bit channel covering the whole canvas, row-major.
pub type IntensityPlane = image::GrayImage;

/// What to do when a mapped intensity falls outside `[0, 255]`.
///
/// Trees built by the grammar never leave `[-1, 1]`, so this only matters for hand-built
/// expressions or non-finite values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelPolicy {
    /// Saturate to the nearest bound. NaN maps to 0.
    #[default]
    Clamp,
    /// Keep the low 8 bits of the rounded value.
    Wrap,
    /// Fail with [`AvatarError::ChannelOverflow`].
    Strict,
}

/// Map an expression value to an 8-bit intensity: `round(z * 127.5 + 127.5)`.
pub fn intensity(z: f64, policy: ChannelPolicy) -> AvatarResult<u8> {
    let v = (z * 127.5 + 127.5).round();
    if (0.0..=255.0).contains(&v) {
        return Ok(v as u8);
    }
    match policy {
        ChannelPolicy::Clamp => Ok(v.clamp(0.0, 255.0) as u8),
        ChannelPolicy::Wrap => Ok((v as i64).rem_euclid(256) as u8),
        ChannelPolicy::Strict => Err(AvatarError::ChannelOverflow { value: v }),
    }
}

/// Rasterize with the default clamp policy on one thread.
pub fn rasterize(expr: &Expr, half_size: u32) -> AvatarResult<IntensityPlane> {
    rasterize_with(expr, Canvas::new(half_size)?, ChannelPolicy::default(), false)
}

/// Evaluate `expr` at every pixel of `canvas`.
///
/// With `parallel` set, rows are filled on the current rayon pool; output is identical either way.
#[tracing::instrument(skip(expr))]
pub fn rasterize_with(
    expr: &Expr,
    canvas: Canvas,
    policy: ChannelPolicy,
    parallel: bool,
) -> AvatarResult<IntensityPlane> {
    let side = canvas.side();
    let row_len = side as usize;
    let len = row_len
        .checked_mul(row_len)
        .ok_or_else(|| AvatarError::validation("intensity plane size overflow"))?;
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|e| {
        AvatarError::validation(format!("cannot allocate {side}x{side} intensity plane: {e}"))
    })?;
    data.resize(len, 0u8);

    let fill_row = |(py, row): (usize, &mut [u8])| -> AvatarResult<()> {
        for (px, out) in row.iter_mut().enumerate() {
            let (x, y) = canvas.to_unit(px as u32, py as u32);
            *out = intensity(expr.evaluate(x, y), policy)?;
        }
        Ok(())
    };

    if parallel {
        data.par_chunks_mut(row_len)
            .enumerate()
            .try_for_each(fill_row)?;
    } else {
        data.chunks_mut(row_len).enumerate().try_for_each(fill_row)?;
    }

    IntensityPlane::from_raw(side, side, data)
        .ok_or_else(|| AvatarError::evaluation("intensity plane buffer does not match canvas"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
