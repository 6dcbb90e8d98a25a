//! Contract for sorting routines measured by
//! [`average_sorting_time`](crate::timing::average_sorting_time).
//!
//! A routine sorts the slice it is given in place and returns the number of
//! key comparisons it made, or an error. Any `FnMut(&mut [Key]) -> Result<usize>`
//! qualifies.

use crate::error::Result;
use crate::Key;

/// Insertion sort, counting one operation per key comparison.
pub fn insertion_sort(table: &mut [Key]) -> Result<usize> {
    let mut ops = 0;
    for i in 1..table.len() {
        let key = table[i];
        let mut j = i;
        while j > 0 {
            ops += 1;
            if table[j - 1] <= key {
                break;
            }
            table[j] = table[j - 1];
            j -= 1;
        }
        table[j] = key;
    }
    Ok(ops)
}
