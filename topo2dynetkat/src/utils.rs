// Topo2DyNetKAT: Encoding SDN Topologies as DyNetKAT Terms
// Copyright (C) 2021  The Topo2DyNetKAT Authors
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Array helpers and seeded random selection
//!
//! All random functions take the random number generator as an explicit argument. Calling them in
//! the same order on a generator with the same seed always yields the same result.

use crate::sdn::NetworkError;

use rand::distributions::Uniform;
use rand::prelude::*;

/// Seed of the random number generator used when nothing else is specified.
pub const SEED: u64 = 3;

/// Split `arr` into `slices` contiguous parts of nearly equal size. If the length of `arr` is not
/// divisible by `slices`, the first `arr.len() % slices` parts contain one additional element.
/// Splitting into zero parts yields no parts at all.
///
/// ```
/// # use topo2dynetkat::utils::split_array;
/// let parts = split_array(&[1, 2, 3, 4, 5, 6, 7], 3);
/// assert_eq!(parts, vec![vec![1, 2, 3], vec![4, 5], vec![6, 7]]);
/// ```
pub fn split_array<T: Clone>(arr: &[T], slices: usize) -> Vec<Vec<T>> {
    if slices == 0 {
        return Vec::new();
    }
    let size = arr.len() / slices;
    let rem = arr.len() % slices;

    let mut result = Vec::with_capacity(slices);
    let mut start = 0;
    for i in 0..slices {
        let len = if i < rem { size + 1 } else { size };
        result.push(arr[start..start + len].to_vec());
        start += len;
    }
    result
}

/// Sort the elements and remove all duplicates, such that random picks do not depend on the
/// initial ordering of the array.
fn sorted_unique<T: Ord + Clone>(arr: &[T]) -> Vec<T> {
    let mut v = arr.to_vec();
    v.sort();
    v.dedup();
    v
}

/// Pick `picks` elements of `arr` at random, without replacement. Duplicate elements in `arr` are
/// considered only once. Fails if `picks` is larger than the number of unique elements.
pub fn random_from_array<T, R>(arr: &[T], picks: usize, rng: &mut R) -> Result<Vec<T>, NetworkError>
where
    T: Ord + Clone,
    R: Rng,
{
    let mut unique = sorted_unique(arr);
    if picks > unique.len() {
        return Err(NetworkError::MorePicksThanUniqueElements);
    }
    unique.shuffle(rng);
    unique.truncate(picks);
    Ok(unique)
}

/// Pick `picks` elements of `arr` at random, with replacement. Duplicate elements in `arr` are
/// considered only once. If `arr` is empty, the result is empty.
pub fn random_from_array_with_replacement<T, R>(arr: &[T], picks: usize, rng: &mut R) -> Vec<T>
where
    T: Ord + Clone,
    R: Rng,
{
    let unique = sorted_unique(arr);
    if unique.is_empty() {
        return Vec::new();
    }
    (0..picks).map(|_| unique[rng.gen_range(0, unique.len())].clone()).collect()
}

/// Generate `n` integers, uniformly distributed in the inclusive range `[min, max]`. Fails with
/// [`NetworkError::EmptyRange`] if `min > max`.
pub fn random_ints<R>(n: usize, min: u32, max: u32, rng: &mut R) -> Result<Vec<u32>, NetworkError>
where
    R: Rng,
{
    if min > max {
        return Err(NetworkError::EmptyRange(min, max));
    }
    let dist = Uniform::new_inclusive(min, max);
    Ok((0..n).map(|_| dist.sample(rng)).collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn split_sizes() {
        let arr: Vec<usize> = (0..7).collect();
        let sizes: Vec<usize> = split_array(&arr, 3).iter().map(|s| s.len()).collect();
        assert_eq!(sizes, vec![3, 2, 2]);

        let sizes: Vec<usize> = split_array(&arr, 7).iter().map(|s| s.len()).collect();
        assert_eq!(sizes, vec![1; 7]);

        let sizes: Vec<usize> = split_array(&arr, 9).iter().map(|s| s.len()).collect();
        assert_eq!(sizes, vec![1, 1, 1, 1, 1, 1, 1, 0, 0]);

        assert!(split_array(&arr, 0).is_empty());
    }

    #[test]
    fn split_keeps_order() {
        let arr = vec!['a', 'b', 'c', 'd', 'e'];
        let parts = split_array(&arr, 2);
        assert_eq!(parts, vec![vec!['a', 'b', 'c'], vec!['d', 'e']]);
        assert_eq!(parts.concat(), arr);
    }

    #[test]
    fn random_picks_without_replacement() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let arr = vec![5, 3, 3, 1, 5, 2];
        let picks = random_from_array(&arr, 4, &mut rng).unwrap();
        let mut sorted = picks.clone();
        sorted.sort();
        assert_eq!(sorted, vec![1, 2, 3, 5]);

        let picks = random_from_array(&arr, 2, &mut rng).unwrap();
        assert_eq!(picks.len(), 2);
        assert_ne!(picks[0], picks[1]);

        assert_eq!(
            random_from_array(&arr, 5, &mut rng),
            Err(NetworkError::MorePicksThanUniqueElements)
        );
    }

    #[test]
    fn random_picks_are_reproducible() {
        let arr: Vec<u32> = (0..20).rev().collect();
        let mut shuffled = arr.clone();
        shuffled.reverse();

        let a = random_from_array(&arr, 10, &mut StdRng::seed_from_u64(SEED)).unwrap();
        let b = random_from_array(&shuffled, 10, &mut StdRng::seed_from_u64(SEED)).unwrap();
        assert_eq!(a, b);

        let a = random_from_array_with_replacement(&arr, 30, &mut StdRng::seed_from_u64(SEED));
        let b = random_from_array_with_replacement(&shuffled, 30, &mut StdRng::seed_from_u64(SEED));
        assert_eq!(a, b);
    }

    #[test]
    fn random_picks_with_replacement() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let picks = random_from_array_with_replacement(&[7, 8], 50, &mut rng);
        assert_eq!(picks.len(), 50);
        assert!(picks.iter().all(|x| *x == 7 || *x == 8));

        let empty: Vec<u32> = Vec::new();
        assert!(random_from_array_with_replacement(&empty, 3, &mut rng).is_empty());
    }

    #[test]
    fn random_ints_are_inclusive() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let ints = random_ints(500, 1, 3, &mut rng).unwrap();
        assert_eq!(ints.len(), 500);
        assert!(ints.iter().all(|x| (1..=3).contains(x)));
        assert!(ints.contains(&1));
        assert!(ints.contains(&3));

        assert_eq!(random_ints(4, 2, 2, &mut rng), Ok(vec![2, 2, 2, 2]));
    }

    #[test]
    fn random_ints_full_range() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let ints = random_ints(100, 1, u32::MAX, &mut rng).unwrap();
        assert_eq!(ints.len(), 100);
        assert!(ints.iter().all(|x| *x >= 1));

        assert_eq!(random_ints(3, u32::MAX, u32::MAX, &mut rng), Ok(vec![u32::MAX; 3]));
        assert_eq!(random_ints(1, 0, u32::MAX, &mut rng).map(|v| v.len()), Ok(1));
    }

    #[test]
    fn random_ints_reject_reversed_bounds() {
        let mut rng = StdRng::seed_from_u64(SEED);
        assert_eq!(random_ints(4, 5, 1, &mut rng), Err(NetworkError::EmptyRange(5, 1)));
        assert_eq!(random_ints(0, 1, 0, &mut rng), Err(NetworkError::EmptyRange(1, 0)));
    }
}
