//! Merge-based set algebra over sorted slices.
//!
//! Every input must be strictly ascending; every output is too.

use std::cmp::Ordering;

/// Sorted intersection by two-pointer merge.
pub fn intersect_sorted<T: Ord + Copy>(a: &[T], b: &[T]) -> Vec<T> {
    let mut result = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                result.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }

    result
}

/// Sorted union by two-pointer merge.
pub fn union_sorted<T: Ord + Copy>(a: &[T], b: &[T]) -> Vec<T> {
    let mut result = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                result.push(a[i]);
                i += 1;
            }
            Ordering::Greater => {
                result.push(b[j]);
                j += 1;
            }
            Ordering::Equal => {
                result.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }

    result.extend_from_slice(&a[i..]);
    result.extend_from_slice(&b[j..]);
    result
}

/// Elements of `a` that are not in `b`, by two-pointer merge.
pub fn difference_sorted<T: Ord + Copy>(a: &[T], b: &[T]) -> Vec<T> {
    let mut result = Vec::with_capacity(a.len());
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                result.push(a[i]);
                i += 1;
            }
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }

    result.extend_from_slice(&a[i..]);
    result
}

/// Elements of an arbitrarily ordered `candidates` that are not in the
/// sorted `excluded`, keeping the order of `candidates`.
pub fn difference_unsorted<T: Ord + Copy>(candidates: &[T], excluded: &[T]) -> Vec<T> {
    candidates
        .iter()
        .copied()
        .filter(|value| excluded.binary_search(value).is_err())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect() {
        assert_eq!(intersect_sorted(&[1, 3, 5, 7], &[2, 3, 4, 7, 9]), vec![3, 7]);
        assert_eq!(intersect_sorted::<u32>(&[], &[1, 2]), Vec::<u32>::new());
        assert_eq!(intersect_sorted(&[1, 2], &[3, 4]), Vec::<u32>::new());
    }

    #[test]
    fn test_union() {
        assert_eq!(union_sorted(&[1, 3, 5], &[2, 3, 6, 8]), vec![1, 2, 3, 5, 6, 8]);
        assert_eq!(union_sorted(&[4, 5], &[]), vec![4, 5]);
    }

    #[test]
    fn test_difference() {
        assert_eq!(difference_sorted(&[1, 2, 3, 4, 5], &[2, 4, 6]), vec![1, 3, 5]);
        assert_eq!(difference_sorted(&[1, 2], &[]), vec![1, 2]);
        assert_eq!(difference_sorted::<u32>(&[], &[1]), Vec::<u32>::new());
    }

    #[test]
    fn test_difference_unsorted_keeps_candidate_order() {
        assert_eq!(difference_unsorted(&[5, 1, 4, 2], &[1, 2]), vec![5, 4]);
    }
}
