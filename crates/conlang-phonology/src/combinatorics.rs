// Permutation and combination generators over arbitrary slices
//
// `combinations` and `all_combinations` enumerate index sets directly, so
// their cost is proportional to the number of results. `permutations` is
// factorial in the input length and is only meant for short lists.

/// Every ordering of `items`, generated with Heap's algorithm.
///
/// An empty input yields a single empty permutation.
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    let mut current: Vec<T> = items.to_vec();
    let n = current.len();
    let mut result = vec![current.clone()];
    let mut counters = vec![0usize; n];

    let mut i = 1;
    while i < n {
        if counters[i] < i {
            if i % 2 == 0 {
                current.swap(0, i);
            } else {
                current.swap(counters[i], i);
            }
            result.push(current.clone());
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }
    result
}

/// Every selection of `k` items, each in the items' original relative order.
///
/// Selections are produced in lexicographic order of their index sets.
/// `k == 0` yields one empty selection; `k > items.len()` yields none.
pub fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    let n = items.len();
    if k > n {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut indices: Vec<usize> = (0..k).collect();
    loop {
        result.push(indices.iter().map(|&i| items[i].clone()).collect());

        // Find the rightmost index that can still advance.
        let Some(pos) = (0..k).rev().find(|&p| indices[p] < n - k + p) else {
            return result;
        };
        indices[pos] += 1;
        for p in pos + 1..k {
            indices[p] = indices[p - 1] + 1;
        }
    }
}

/// Every non-empty selection of items, by size and then by position.
pub fn all_combinations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    (1..=items.len())
        .flat_map(|k| combinations(items, k))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn pairs_of_three() {
        let pairs = combinations(&[1, 2, 3], 2);
        assert_eq!(pairs, vec![vec![1, 2], vec![1, 3], vec![2, 3]]);
    }

    #[test]
    fn combinations_are_unique_and_ordered() {
        let items = ['a', 'b', 'c', 'd', 'e'];
        let triples = combinations(&items, 3);
        assert_eq!(triples.len(), 10);
        let unique: HashSet<Vec<char>> = triples.iter().cloned().collect();
        assert_eq!(unique.len(), 10);
        for t in &triples {
            assert!(t.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn combinations_edge_cases() {
        assert_eq!(combinations(&[1, 2], 0), vec![Vec::<i32>::new()]);
        assert!(combinations(&[1, 2], 3).is_empty());
        assert_eq!(combinations(&[1, 2], 2), vec![vec![1, 2]]);
        assert_eq!(combinations::<i32>(&[], 0), vec![Vec::<i32>::new()]);
    }

    #[test]
    fn all_combinations_of_three() {
        let all = all_combinations(&[1, 2, 3]);
        assert_eq!(
            all,
            vec![
                vec![1],
                vec![2],
                vec![3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
                vec![1, 2, 3],
            ]
        );
        assert!(all_combinations::<u8>(&[]).is_empty());
    }

    #[test]
    fn permutations_of_three() {
        let perms = permutations(&[1, 2, 3]);
        assert_eq!(perms.len(), 6);
        let unique: HashSet<Vec<i32>> = perms.into_iter().collect();
        assert_eq!(unique.len(), 6);
        assert!(unique.contains(&vec![3, 2, 1]));
    }

    #[test]
    fn permutations_trivial() {
        assert_eq!(permutations::<i32>(&[]), vec![Vec::<i32>::new()]);
        assert_eq!(permutations(&["x"]), vec![vec!["x"]]);
    }

    #[test]
    fn permutation_count_is_factorial() {
        assert_eq!(permutations(&[0u8; 5]).len(), 120);
    }
}
