//! Random permutations of `1..=n`, used to populate dictionaries and to feed
//! sorting routines.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::Key;

/// A uniformly shuffled permutation of `1..=n`.
pub fn random_permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Vec<Key>> {
    if n == 0 {
        return Err(Error::InvalidArgument("permutation size must be positive"));
    }
    let top = Key::try_from(n).map_err(|_| Error::InvalidArgument("permutation size exceeds key range"))?;

    let mut perm = Vec::new();
    perm.try_reserve_exact(n).map_err(|_| Error::alloc("permutation", n))?;
    perm.extend(1..=top);
    perm.shuffle(rng);
    Ok(perm)
}

/// `count` independent permutations of `1..=n`.
pub fn random_permutations<R: Rng + ?Sized>(count: usize, n: usize, rng: &mut R) -> Result<Vec<Vec<Key>>> {
    if count == 0 {
        return Err(Error::InvalidArgument("permutation count must be positive"));
    }
    let mut perms = Vec::new();
    perms.try_reserve_exact(count).map_err(|_| Error::alloc("permutation list", count))?;
    for _ in 0..count {
        perms.push(random_permutation(n, rng)?);
    }
    Ok(perms)
}
