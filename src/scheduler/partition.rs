//! Contiguous work partitioning
//!
//! Splits the identifier list into `n` near-equal, contiguous slices. The
//! first `len % n` partitions get one extra element, and partition 0 is
//! filled completely before partition 1 (not round-robin).

use crate::models::SteamId;

/// Split `ids` into `n` contiguous partitions.
///
/// Concatenating the result in order reproduces `ids`. Partitions may be
/// empty when there are fewer ids than workers. Returns no partitions when
/// `n` is zero.
pub fn partition(ids: &[SteamId], n: usize) -> Vec<Vec<SteamId>> {
    partition_sizes(ids.len(), n)
        .into_iter()
        .scan(0usize, |start, size| {
            let slice = ids[*start..*start + size].to_vec();
            *start += size;
            Some(slice)
        })
        .collect()
}

/// Sizes of each partition for `len` items over `n` workers
pub fn partition_sizes(len: usize, n: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }

    let base = len / n;
    let rem = len % n;
    (0..n).map(|i| if i < rem { base + 1 } else { base }).collect()
}
