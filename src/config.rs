//! Harness parameters.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::dictionary::Order;
use crate::error::{Error, Result};
use crate::keygen::Generator;
use crate::search::Method;

/// How a sweep advances from one problem size to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `n += incr`
    Add(usize),
    /// `n *= factor`
    Mul(usize),
}

/// Problem sizes `min, ..., <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSweep {
    pub min: usize,
    pub max: usize,
    pub step: Step,
}

impl SizeSweep {
    /// Arithmetic sweep `min, min + incr, ...`.
    pub fn arithmetic(min: usize, max: usize, incr: usize) -> Self {
        Self {
            min,
            max,
            step: Step::Add(incr),
        }
    }

    /// Geometric sweep `min, min * factor, ...`.
    pub fn geometric(min: usize, max: usize, factor: usize) -> Self {
        Self {
            min,
            max,
            step: Step::Mul(factor),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min == 0 {
            return Err(Error::InvalidArgument("minimum size must be positive"));
        }
        if self.max < self.min {
            return Err(Error::InvalidArgument("maximum size is below minimum size"));
        }
        match self.step {
            Step::Add(0) => Err(Error::InvalidArgument("size increment must be positive")),
            Step::Mul(f) if f < 2 => Err(Error::InvalidArgument("size factor must be at least 2")),
            _ => Ok(()),
        }
    }

    /// Every size in the sweep, ascending.
    pub fn sizes(&self) -> Result<Vec<usize>> {
        self.validate()?;
        let mut out = Vec::new();
        let mut n = self.min;
        loop {
            out.push(n);
            let next = match self.step {
                Step::Add(incr) => n.checked_add(incr),
                Step::Mul(factor) => n.checked_mul(factor),
            };
            match next {
                Some(next) if next <= self.max => n = next,
                _ => break,
            }
        }
        Ok(out)
    }
}

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Parameters of a search-time sweep.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub method: Method,
    pub generator: Generator,
    pub order: Order,
    /// Destination of the time table.
    pub output: PathBuf,
    pub sweep: SizeSweep,
    /// Lookups per stored key; each measurement runs `n_times * N` searches.
    pub n_times: usize,
    /// Fixed seed for reproducible runs, fresh entropy when `None`.
    pub seed: Option<u64>,
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        self.sweep.validate()?;
        if self.n_times == 0 {
            return Err(Error::InvalidArgument("n_times must be positive"));
        }
        if self.output.as_os_str().is_empty() {
            return Err(Error::InvalidArgument("output path is empty"));
        }
        Ok(())
    }

    pub fn rng(&self) -> StdRng {
        rng_from_seed(self.seed)
    }
}

/// Parameters of a sorting-time sweep.
#[derive(Debug, Clone)]
pub struct SortConfig {
    pub output: PathBuf,
    pub sweep: SizeSweep,
    /// Permutations sorted per size.
    pub n_perms: usize,
    pub seed: Option<u64>,
}

impl SortConfig {
    pub fn validate(&self) -> Result<()> {
        self.sweep.validate()?;
        if self.n_perms == 0 {
            return Err(Error::InvalidArgument("n_perms must be positive"));
        }
        if self.output.as_os_str().is_empty() {
            return Err(Error::InvalidArgument("output path is empty"));
        }
        Ok(())
    }

    pub fn rng(&self) -> StdRng {
        rng_from_seed(self.seed)
    }
}
