use crate::foundation::error::{AvatarError, AvatarResult};

/// Raw part values are subtracted from this to produce grammar seeds.
pub const SEED_CEILING: f64 = 50.0;

const UNDERSCORE_WEIGHT: i64 = 35;

/// Per-channel seeds folded from one identifier.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Seeds {
    /// Seed from the first third of the identifier.
    pub red: f64,
    /// Seed from the second third.
    pub green: f64,
    /// Seed from the remainder.
    pub blue: f64,
}

impl Seeds {
    /// Seeds in R, G, B order.
    pub fn channels(self) -> [f64; 3] {
        [self.red, self.green, self.blue]
    }
}

/// Numeric weight of one (already lowercased) character.
///
/// Digits count as their value, `_` counts 35, anything else is its code-point offset from
/// `'a'` (which is negative for characters sorting before it).
pub fn char_weight(c: char) -> i64 {
    if let Some(d) = c.to_digit(10) {
        i64::from(d)
    } else if c == '_' {
        UNDERSCORE_WEIGHT
    } else {
        i64::from(u32::from(c)) - i64::from(u32::from('a'))
    }
}

/// Mean character weight of one part, `None` for an empty part.
pub fn part_value(part: &[char]) -> Option<f64> {
    if part.is_empty() {
        return None;
    }
    let sum: i64 = part.iter().copied().map(char_weight).sum();
    Some(sum as f64 / part.len() as f64)
}

/// Lowercase `identifier`, split it into thirds and average each third.
///
/// The first two parts hold `len / 3` characters each; the remainder goes to the last part.
pub fn raw_values(identifier: &str) -> AvatarResult<[f64; 3]> {
    let chars: Vec<char> = identifier.to_lowercase().chars().collect();
    let len = chars.len();
    if len < 3 {
        return Err(AvatarError::invalid_identifier(format!(
            "'{identifier}' has {len} character(s), at least 3 are required"
        )));
    }

    let third = len / 3;
    let parts = [
        &chars[..third],
        &chars[third..2 * third],
        &chars[2 * third..],
    ];

    let mut out = [0.0; 3];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part_value(part)
            .ok_or_else(|| AvatarError::evaluation("identifier part unexpectedly empty"))?;
    }
    Ok(out)
}

/// Fold an identifier into its three channel seeds (`50 - raw` per part).
#[tracing::instrument]
pub fn derive_seeds(identifier: &str) -> AvatarResult<Seeds> {
    let [r, g, b] = raw_values(identifier)?;
    let seeds = Seeds {
        red: SEED_CEILING - r,
        green: SEED_CEILING - g,
        blue: SEED_CEILING - b,
    };
    tracing::debug!(red = seeds.red, green = seeds.green, blue = seeds.blue, "derived seeds");
    Ok(seeds)
}

#[cfg(test)]
#[path = "../../tests/unit/seed/derive.rs"]
mod tests;
