//! Measurement harness.
//!
//! A search measurement at size `N` builds a dictionary of capacity `N`,
//! fills it from a random permutation of `1..=N`, generates `n_times * N`
//! lookup keys and runs every lookup through one strategy. Only the lookup
//! loop is timed; building the dictionary and the workload is not.
//!
//! A sweep repeats the measurement for each size and writes the table only if
//! every measurement succeeded.

use std::time::Instant;

use rand::Rng;

use crate::config::{SearchConfig, SizeSweep, SortConfig};
use crate::dictionary::{Dictionary, Order};
use crate::error::{Error, Result};
use crate::keygen::Generator;
use crate::permutation::{random_permutation, random_permutations};
use crate::search::SearchStrategy;
use crate::table::save_time_table;
use crate::Key;

/// Aggregated statistics for one problem size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRecord {
    /// Problem size.
    pub n: usize,
    /// Number of measured operations (lookups, or sorted permutations).
    pub n_elems: usize,
    /// Mean wall-clock seconds per operation.
    pub time: f64,
    /// Mean comparison count per operation.
    pub average_ob: f64,
    pub min_ob: usize,
    pub max_ob: usize,
}

/// Running min/mean/max over operation counts.
#[derive(Debug, Clone, Copy)]
struct ObStats {
    total: u128,
    count: usize,
    min: usize,
    max: usize,
}

impl ObStats {
    fn new() -> Self {
        Self {
            total: 0,
            count: 0,
            min: usize::MAX,
            max: 0,
        }
    }

    #[inline]
    fn record(&mut self, ob: usize) {
        self.total += ob as u128;
        self.count += 1;
        self.min = self.min.min(ob);
        self.max = self.max.max(ob);
    }

    fn finish(self, n: usize, seconds: f64) -> TimeRecord {
        let count = self.count.max(1) as f64;
        TimeRecord {
            n,
            n_elems: self.count,
            time: seconds / count,
            average_ob: self.total as f64 / count,
            min_ob: if self.count == 0 { 0 } else { self.min },
            max_ob: self.max,
        }
    }
}

// =============================================================================
// Search
// =============================================================================

/// Measure `n_times * n` lookups with `strategy` over a freshly built
/// dictionary of size `n`.
///
/// Every generated key lies in `[1, n]` and the dictionary holds exactly
/// `1..=n`, so with a suitable strategy every lookup is a hit.
pub fn average_search_time<S, R>(
    strategy: &S,
    generator: Generator,
    order: Order,
    n: usize,
    n_times: usize,
    rng: &mut R,
) -> Result<TimeRecord>
where
    S: SearchStrategy + ?Sized,
    R: Rng + ?Sized,
{
    if n == 0 {
        return Err(Error::InvalidArgument("dictionary size must be positive"));
    }
    if n_times == 0 {
        return Err(Error::InvalidArgument("n_times must be positive"));
    }
    let max_key = Key::try_from(n).map_err(|_| Error::InvalidArgument("dictionary size exceeds key range"))?;
    let total_keys = n
        .checked_mul(n_times)
        .ok_or(Error::InvalidArgument("n_times * N overflows"))?;

    let mut dict = Dictionary::new(n, order)?;
    let perm = random_permutation(n, rng)?;
    dict.bulk_insert(&perm)?;
    drop(perm);

    let mut keys: Vec<Key> = Vec::new();
    keys.try_reserve_exact(total_keys)
        .map_err(|_| Error::alloc("key workload", total_keys))?;
    keys.resize(total_keys, 0);
    generator.fill(&mut keys, max_key, rng);

    let mut stats = ObStats::new();
    let start = Instant::now();
    for &key in &keys {
        let outcome = dict.search(key, strategy)?;
        stats.record(outcome.ops);
    }
    let elapsed = start.elapsed().as_secs_f64();

    let record = stats.finish(n, elapsed);
    tracing::debug!(
        n,
        method = strategy.name(),
        %generator,
        %order,
        lookups = record.n_elems,
        avg_ob = record.average_ob,
        min_ob = record.min_ob,
        max_ob = record.max_ob,
        "measured search"
    );
    Ok(record)
}

/// Run [`average_search_time`] for every size of the configured sweep and
/// save the resulting table to `config.output`.
///
/// Any failure aborts the sweep before the table is written.
pub fn generate_search_times<R: Rng + ?Sized>(config: &SearchConfig, rng: &mut R) -> Result<Vec<TimeRecord>> {
    config.validate()?;
    let records = sweep(&config.sweep, |n| {
        average_search_time(&config.method, config.generator, config.order, n, config.n_times, &mut *rng)
    })?;
    save_time_table(&config.output, &records)?;
    tracing::info!(
        method = %config.method,
        generator = %config.generator,
        order = %config.order,
        sizes = records.len(),
        "search sweep complete"
    );
    Ok(records)
}

// =============================================================================
// Sorting
// =============================================================================

/// Sort `n_perms` random permutations of `1..=n` with `sort` and aggregate
/// the comparison counts it reports. The whole batch is timed together.
pub fn average_sorting_time<F, R>(mut sort: F, n_perms: usize, n: usize, rng: &mut R) -> Result<TimeRecord>
where
    F: FnMut(&mut [Key]) -> Result<usize>,
    R: Rng + ?Sized,
{
    if n == 0 {
        return Err(Error::InvalidArgument("permutation size must be positive"));
    }
    if n_perms == 0 {
        return Err(Error::InvalidArgument("n_perms must be positive"));
    }

    let mut perms = random_permutations(n_perms, n, rng)?;

    let mut stats = ObStats::new();
    let start = Instant::now();
    for perm in perms.iter_mut() {
        let ob = sort(perm.as_mut_slice())?;
        stats.record(ob);
    }
    let elapsed = start.elapsed().as_secs_f64();

    let record = stats.finish(n, elapsed);
    tracing::debug!(n, n_perms, avg_ob = record.average_ob, "measured sort");
    Ok(record)
}

/// Run [`average_sorting_time`] for every size of the configured sweep and
/// save the resulting table to `config.output`.
pub fn generate_sorting_times<F, R>(mut sort: F, config: &SortConfig, rng: &mut R) -> Result<Vec<TimeRecord>>
where
    F: FnMut(&mut [Key]) -> Result<usize>,
    R: Rng + ?Sized,
{
    config.validate()?;
    let records = sweep(&config.sweep, |n| average_sorting_time(&mut sort, config.n_perms, n, &mut *rng))?;
    save_time_table(&config.output, &records)?;
    tracing::info!(sizes = records.len(), n_perms = config.n_perms, "sorting sweep complete");
    Ok(records)
}

fn sweep<F>(sizes: &SizeSweep, mut measure: F) -> Result<Vec<TimeRecord>>
where
    F: FnMut(usize) -> Result<TimeRecord>,
{
    let sizes = sizes.sizes()?;
    let mut records = Vec::with_capacity(sizes.len());
    for n in sizes {
        match measure(n) {
            Ok(r) => records.push(r),
            Err(e) => {
                tracing::warn!(n, error = %e, "measurement failed, aborting sweep");
                return Err(e);
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::ops::RangeInclusive;
    use std::path::PathBuf;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::search::{BinarySearch, LinearSearch, Method, SearchOutcome};
    use crate::sorting::insertion_sort;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2016)
    }

    #[test]
    fn test_binary_uniform_small() {
        let r = average_search_time(&BinarySearch, Generator::Uniform, Order::Sorted, 10, 1, &mut rng()).unwrap();
        assert_eq!(r.n, 10);
        assert_eq!(r.n_elems, 10);
        assert!(r.average_ob <= 4.0, "avg {}", r.average_ob);
        assert_eq!(r.min_ob, 1);
        assert!(r.max_ob <= 4);
        assert!(r.time >= 0.0);
    }

    #[test]
    fn test_linear_uniform_exact_mean() {
        // Each key 1..=N is looked up once; positions are a permutation of
        // 0..N, so the mean comparison count is (N + 1) / 2 in any order.
        let r = average_search_time(&LinearSearch, Generator::Uniform, Order::Unsorted, 50, 3, &mut rng()).unwrap();
        assert_eq!(r.n_elems, 150);
        assert!((r.average_ob - 25.5).abs() < 1e-9);
        assert_eq!(r.min_ob, 1);
        assert_eq!(r.max_ob, 50);
    }

    #[test]
    fn test_self_organizing_wins_on_skew() {
        let n = 200;
        let lin = average_search_time(&Method::Linear, Generator::Potential, Order::Unsorted, n, 20, &mut rng()).unwrap();
        let auto =
            average_search_time(&Method::SelfOrganizing, Generator::Potential, Order::Unsorted, n, 20, &mut rng())
                .unwrap();
        assert!(
            auto.average_ob < lin.average_ob,
            "lin-auto {} vs lin {}",
            auto.average_ob,
            lin.average_ob
        );
    }

    #[test]
    fn test_invalid_arguments() {
        let mut rng = rng();
        assert!(matches!(
            average_search_time(&BinarySearch, Generator::Uniform, Order::Sorted, 0, 1, &mut rng),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            average_search_time(&BinarySearch, Generator::Uniform, Order::Sorted, 10, 0, &mut rng),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            average_search_time(&BinarySearch, Generator::Uniform, Order::Sorted, usize::MAX / 2, 4, &mut rng),
            Err(Error::InvalidArgument("dictionary size exceeds key range"))
        ));
        assert!(matches!(
            average_search_time(&BinarySearch, Generator::Uniform, Order::Sorted, 10, usize::MAX, &mut rng),
            Err(Error::InvalidArgument("n_times * N overflows"))
        ));
    }

    struct Failing;

    impl SearchStrategy for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn search(&self, _: &mut [Key], _: RangeInclusive<usize>, key: Key) -> Result<SearchOutcome> {
            if key == 3 {
                Err(Error::InvalidArgument("boom"))
            } else {
                Ok(SearchOutcome { position: None, ops: 1 })
            }
        }
    }

    #[test]
    fn test_strategy_error_propagates() {
        let err = average_search_time(&Failing, Generator::Uniform, Order::Sorted, 5, 1, &mut rng()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument("boom")));
    }

    fn search_config(output: PathBuf, sweep: SizeSweep) -> SearchConfig {
        SearchConfig {
            method: Method::Binary,
            generator: Generator::Uniform,
            order: Order::Sorted,
            output,
            sweep,
            n_times: 1,
            seed: Some(1),
        }
    }

    #[test]
    fn test_generate_search_times() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("bin.txt");
        let cfg = search_config(out.clone(), SizeSweep::arithmetic(10, 30, 10));
        let records = generate_search_times(&cfg, &mut cfg.rng()).unwrap();

        assert_eq!(records.iter().map(|r| r.n).collect::<Vec<_>>(), vec![10, 20, 30]);
        let text = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("10\t"));
        assert_eq!(lines[2].split('\t').count(), 5);
    }

    #[test]
    fn test_generate_search_times_validates_config() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("fail.txt");
        let mut cfg = search_config(out.clone(), SizeSweep::arithmetic(1, 5, 1));
        cfg.n_times = 0;
        assert!(matches!(
            generate_search_times(&cfg, &mut rng()),
            Err(Error::InvalidArgument("n_times must be positive"))
        ));
        assert!(!out.exists());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_generate_search_times_aborts_midway() {
        // Sizes 1 and 2^32: the first is measured, the second is outside the
        // key range and fails before anything is allocated for it.
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("midway.txt");
        let cfg = search_config(out.clone(), SizeSweep::geometric(1, 1 << 33, 1 << 32));
        assert_eq!(cfg.sweep.sizes().unwrap(), vec![1, 1 << 32]);

        let err = generate_search_times(&cfg, &mut cfg.rng()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument("dictionary size exceeds key range")));
        assert!(!out.exists());
    }

    #[test]
    fn test_average_sorting_time() {
        let r = average_sorting_time(insertion_sort, 8, 20, &mut rng()).unwrap();
        assert_eq!(r.n, 20);
        assert_eq!(r.n_elems, 8);
        assert!(r.min_ob >= 19);
        assert!(r.max_ob <= 190);
        assert!(r.min_ob as f64 <= r.average_ob && r.average_ob <= r.max_ob as f64);
    }

    #[test]
    fn test_sorting_error_aborts_sweep() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("sort.txt");
        let cfg = SortConfig {
            output: out.clone(),
            sweep: SizeSweep::arithmetic(1, 4, 1),
            n_perms: 2,
            seed: Some(9),
        };
        let err = generate_sorting_times(
            |t: &mut [Key]| {
                if t.len() >= 3 {
                    Err(Error::Sort("too long".into()))
                } else {
                    insertion_sort(t)
                }
            },
            &cfg,
            &mut cfg.rng(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Sort(_)));
        assert!(!out.exists());

        let records = generate_sorting_times(insertion_sort, &cfg, &mut cfg.rng()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(fs::read_to_string(&out).unwrap().lines().count(), 4);
    }
}
