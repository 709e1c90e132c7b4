use std::path::Path;

use anyhow::Context as _;

use crate::{
    expression::grammar::build_expr,
    foundation::core::Canvas,
    foundation::error::{AvatarError, AvatarResult},
    render::raster::{ChannelPolicy, IntensityPlane, rasterize_with},
    seed::derive::{Seeds, derive_seeds},
};

/// Options for [`render_avatar`].
///
/// Missing JSON fields fall back to [`AvatarOpts::default`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AvatarOpts {
    /// Pixels per unit; the image is `2 * half_size` pixels square.
    pub half_size: u32,
    /// Out-of-range intensity handling.
    pub policy: ChannelPolicy,
    /// Rasterize channels and rows on a rayon pool.
    pub parallel: bool,
    /// Worker count for the parallel pool (parallel mode only).
    pub threads: Option<usize>,
}

impl Default for AvatarOpts {
    fn default() -> Self {
        Self {
            half_size: Canvas::DEFAULT_HALF_SIZE,
            policy: ChannelPolicy::default(),
            parallel: false,
            threads: None,
        }
    }
}

impl AvatarOpts {
    /// Check option ranges.
    pub fn validate(&self) -> AvatarResult<()> {
        Canvas::new(self.half_size)?;
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(AvatarError::validation(
                "avatar option 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }

    /// Parse and validate options from JSON text.
    pub fn from_json_str(s: &str) -> AvatarResult<Self> {
        let opts: Self = serde_json::from_str(s).map_err(|e| AvatarError::serde(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read, parse and validate an options JSON file.
    pub fn from_path(path: &Path) -> AvatarResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read avatar options '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

/// A generated avatar plus the intermediate data that produced it.
#[derive(Clone, Debug)]
pub struct Avatar {
    /// Channel seeds derived from the identifier.
    pub seeds: Seeds,
    /// Canonical expression string per channel, R, G, B order.
    pub expressions: [String; 3],
    /// Red intensity plane.
    pub red: IntensityPlane,
    /// Green intensity plane.
    pub green: IntensityPlane,
    /// Blue intensity plane.
    pub blue: IntensityPlane,
    /// Merged RGB8 image.
    pub image: image::RgbImage,
}

impl Avatar {
    /// Canvas side in pixels.
    pub fn side(&self) -> u32 {
        self.image.width()
    }
}

struct Channel {
    expression: String,
    plane: IntensityPlane,
}

/// Generate the default 420x420 avatar for `identifier`.
pub fn make_image(identifier: &str) -> AvatarResult<image::RgbImage> {
    make_image_sized(identifier, Canvas::DEFAULT_HALF_SIZE)
}

/// Generate a `2 * half_size` square avatar for `identifier`.
pub fn make_image_sized(identifier: &str, half_size: u32) -> AvatarResult<image::RgbImage> {
    let opts = AvatarOpts {
        half_size,
        ..AvatarOpts::default()
    };
    render_avatar(identifier, &opts).map(|a| a.image)
}

/// Derive seeds, build one tree per channel, rasterize and merge.
#[tracing::instrument(skip(opts), fields(half_size = opts.half_size, parallel = opts.parallel))]
pub fn render_avatar(identifier: &str, opts: &AvatarOpts) -> AvatarResult<Avatar> {
    opts.validate()?;
    let canvas = Canvas::new(opts.half_size)?;
    let seeds = derive_seeds(identifier)?;

    let (red, green, blue) = if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| render_channels_parallel(seeds, canvas, opts.policy))?
    } else {
        (
            render_channel(seeds.red, canvas, opts.policy, false)?,
            render_channel(seeds.green, canvas, opts.policy, false)?,
            render_channel(seeds.blue, canvas, opts.policy, false)?,
        )
    };

    let image = merge_planes(&red.plane, &green.plane, &blue.plane)?;
    tracing::debug!(side = image.width(), "composed avatar");

    Ok(Avatar {
        seeds,
        expressions: [red.expression, green.expression, blue.expression],
        red: red.plane,
        green: green.plane,
        blue: blue.plane,
        image,
    })
}

/// Interleave three equally sized planes into one RGB8 image.
pub fn merge_planes(
    red: &IntensityPlane,
    green: &IntensityPlane,
    blue: &IntensityPlane,
) -> AvatarResult<image::RgbImage> {
    let (w, h) = red.dimensions();
    if green.dimensions() != (w, h) || blue.dimensions() != (w, h) {
        return Err(AvatarError::evaluation(
            "merge_planes expects three planes of identical size",
        ));
    }

    let mut data = Vec::with_capacity(red.as_raw().len() * 3);
    for ((&r, &g), &b) in red
        .as_raw()
        .iter()
        .zip(green.as_raw())
        .zip(blue.as_raw())
    {
        data.extend_from_slice(&[r, g, b]);
    }

    image::RgbImage::from_raw(w, h, data)
        .ok_or_else(|| AvatarError::evaluation("rgb buffer does not match plane size"))
}

fn render_channel(
    seed: f64,
    canvas: Canvas,
    policy: ChannelPolicy,
    parallel: bool,
) -> AvatarResult<Channel> {
    let expr = build_expr(seed);
    let plane = rasterize_with(&expr, canvas, policy, parallel)?;
    Ok(Channel {
        expression: expr.to_string(),
        plane,
    })
}

fn render_channels_parallel(
    seeds: Seeds,
    canvas: Canvas,
    policy: ChannelPolicy,
) -> AvatarResult<(Channel, Channel, Channel)> {
    let (red, (green, blue)) = rayon::join(
        || render_channel(seeds.red, canvas, policy, true),
        || {
            rayon::join(
                || render_channel(seeds.green, canvas, policy, true),
                || render_channel(seeds.blue, canvas, policy, true),
            )
        },
    );
    Ok((red?, green?, blue?))
}

fn build_thread_pool(threads: Option<usize>) -> AvatarResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| AvatarError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
