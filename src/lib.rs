//! # dictbench
//!
//! A micro-benchmark harness for array-based key lookup.
//!
//! A [`Dictionary`] is a fixed-capacity array of integer keys kept either
//! sorted or in insertion order. Three interchangeable [`SearchStrategy`]
//! implementations look keys up in it and report how many key comparisons
//! they needed. The [`timing`] harness builds dictionaries of growing size,
//! drives randomized lookup workloads through a strategy, and records mean
//! time and comparison statistics per size in a plain-text table.
//!
//! ## Example
//!
//! ```rust
//! use dictbench::{Dictionary, Order, BinarySearch, SelfOrganizingSearch};
//!
//! let mut dict = Dictionary::new(4, Order::Sorted).unwrap();
//! dict.bulk_insert(&[3, 1, 4, 2]).unwrap();
//! assert_eq!(dict.as_slice(), &[1, 2, 3, 4]);
//!
//! let hit = dict.search(3, &BinarySearch).unwrap();
//! assert_eq!(hit.position, Some(2));
//!
//! // A self-organizing hit moves the key one slot toward the front.
//! let hit = dict.search(3, &SelfOrganizingSearch).unwrap();
//! assert_eq!(hit.position, Some(1));
//! assert_eq!(dict.as_slice(), &[1, 3, 2, 4]);
//! ```
//!
//! ## Measuring
//!
//! ```rust,no_run
//! use dictbench::{average_search_time, Generator, Method, Order};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let rec = average_search_time(&Method::Linear, Generator::Potential, Order::Unsorted, 1000, 10, &mut rng)?;
//! println!("{} keys: {:.2} comparisons per lookup", rec.n, rec.average_ob);
//! # Ok::<(), dictbench::Error>(())
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod dictionary;
pub mod error;
pub mod keygen;
pub mod permutation;
pub mod search;
pub mod sorting;
pub mod table;
pub mod timing;

/// Key type stored in dictionaries and produced by generators.
pub type Key = u32;

pub use config::{SearchConfig, SizeSweep, SortConfig, Step};
pub use dictionary::{Dictionary, Order};
pub use error::{Error, Result};
pub use keygen::{potential_keys, uniform_keys, Generator};
pub use permutation::{random_permutation, random_permutations};
pub use search::{BinarySearch, LinearSearch, Method, SearchOutcome, SearchStrategy, SelfOrganizingSearch};
pub use sorting::insertion_sort;
pub use table::{format_row, read_time_table, save_time_table};
pub use timing::{
    average_search_time, average_sorting_time, generate_search_times, generate_sorting_times, TimeRecord,
};

#[cfg(test)]
mod proptests;
