//! Lookup workload generators.
//!
//! Both generators fill a caller-provided buffer with keys in `[1, max]`.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::Key;

/// Fill `keys` with `1, 2, ..., max, 1, 2, ...`.
///
/// When `keys.len() == max` every key in `[1, max]` appears exactly once.
///
/// # Panics
/// If `max` is zero.
pub fn uniform_keys(keys: &mut [Key], max: Key) {
    assert!(max > 0, "key space must be non-empty");
    let max = max as usize;
    for (i, k) in keys.iter_mut().enumerate() {
        *k = 1 + (i % max) as Key;
    }
}

/// Fill `keys` with a power-law skewed sample of `[1, max]`.
///
/// Each key is `round(max / (1 + max * r))` for `r` uniform in `[0, 1)`.
/// Small keys dominate: for large `max`, 1 is drawn about a third of the
/// time, 2 about a quarter, 3 about a ninth, and the mass keeps decaying.
///
/// # Panics
/// If `max` is zero.
pub fn potential_keys<R: Rng + ?Sized>(keys: &mut [Key], max: Key, rng: &mut R) {
    assert!(max > 0, "key space must be non-empty");
    let m = f64::from(max);
    for k in keys.iter_mut() {
        let r: f64 = rng.gen();
        // m / (1 + m * r) lies in (m / (1 + m), m], so the rounded value is in [1, max].
        let v = (0.5 + m / m.mul_add(r, 1.0)) as Key;
        *k = v.clamp(1, max);
    }
}

/// Runtime choice of workload generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Generator {
    /// [`uniform_keys`]
    #[default]
    Uniform,
    /// [`potential_keys`]
    Potential,
}

impl Generator {
    pub const ALL: [Generator; 2] = [Generator::Uniform, Generator::Potential];

    /// Fill `keys` with this generator. `rng` is only consumed by
    /// [`Generator::Potential`].
    pub fn fill<R: Rng + ?Sized>(self, keys: &mut [Key], max: Key, rng: &mut R) {
        match self {
            Generator::Uniform => uniform_keys(keys, max),
            Generator::Potential => potential_keys(keys, max, rng),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Generator::Uniform => "uniform",
            Generator::Potential => "potential",
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Generator {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(Generator::Uniform),
            "potential" => Ok(Generator::Potential),
            other => Err(format!("unknown key generator `{other}` (expected uniform or potential)")),
        }
    }
}
