//! avatargen turns a short identifier (a username) into a reproducible RGB avatar.
//!
//! # Pipeline overview
//!
//! 1. **Seed**: `identifier -> Seeds` (three numbers folded from thirds of the identifier)
//! 2. **Build**: `seed -> Expr` (a depth-bounded tree of `sin(pi*_)`, `cos(pi*_)` and products
//!    over `x`, `y` and `xy`)
//! 3. **Rasterize**: `Expr -> IntensityPlane` (evaluate over `[-1, 1]^2`, map to 8-bit)
//! 4. **Compose**: three planes -> one `RgbImage`
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same identifier and options always produce the same bytes, with or
//!   without parallel rasterization.
//! - **No IO in the core**: encoding to PNG is left to the caller (the bundled CLI uses `image`).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod expression;
mod foundation;
mod render;
mod seed;

pub use expression::grammar::{
    MAX_DEPTH, Rule, build_expr, build_expr_at, root_rule, select_rule,
};
pub use expression::node::{Expr, TerminalKind};
pub use foundation::core::Canvas;
pub use foundation::error::{AvatarError, AvatarResult};
pub use render::compose::{
    Avatar, AvatarOpts, make_image, make_image_sized, merge_planes, render_avatar,
};
pub use render::raster::{ChannelPolicy, IntensityPlane, intensity, rasterize, rasterize_with};
pub use seed::derive::{SEED_CEILING, Seeds, char_weight, derive_seeds, part_value, raw_values};
