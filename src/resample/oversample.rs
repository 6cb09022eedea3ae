//! Random minority oversampling
//!
//! Rebalances a dataset by duplicating minority-class rows, drawn uniformly
//! at random with replacement, until every class matches the majority-class
//! count. Original rows are never removed; duplicates are appended after
//! them, so row order of the original block is preserved but the balanced
//! dataset is not interleaved.

use rand::Rng;

use crate::core::{Dataset, RebalanceError, Result};

/// Balance a dataset over the classes present in its labels, using a
/// thread-local RNG.
pub fn balance(data: &Dataset) -> Result<Dataset> {
    balance_with_rng(data, &mut rand::thread_rng())
}

/// Balance a dataset over the classes present in its labels.
pub fn balance_with_rng<R: Rng>(data: &Dataset, rng: &mut R) -> Result<Dataset> {
    let classes = data.class_balance().classes();
    balance_classes_with_rng(data, &classes, rng)
}

/// Balance a dataset over an explicitly declared class set.
///
/// Every declared class must have at least one backing row whenever it sits
/// below the majority count: drawing a positive deficit from an empty class
/// is a contract violation and fails with `InvalidDataset` instead of
/// silently returning fewer rows.
pub fn balance_classes_with_rng<R: Rng>(
    data: &Dataset,
    classes: &[i32],
    rng: &mut R,
) -> Result<Dataset> {
    if data.is_empty() {
        return Err(RebalanceError::EmptyDataset);
    }

    let counts = data.class_balance();
    let target = counts.max_count();

    let mut balanced = data.clone();
    for &class in classes {
        let count = counts.count(class);
        let deficit = target - count;
        if deficit == 0 {
            continue;
        }
        if count == 0 {
            return Err(RebalanceError::InvalidDataset(format!(
                "class {class} has no rows to oversample from"
            )));
        }

        let rows = data.rows_of_class(class);
        let draws: Vec<usize> = (0..deficit)
            .map(|_| rows[rng.gen_range(0..rows.len())])
            .collect();
        balanced.append(data.select(&draws))?;
    }

    Ok(balanced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn skewed_dataset() -> Dataset {
        // 3 rows of class 0, 1 row of class 1
        Dataset::new(
            vec![
                vec![0.0, 0.1],
                vec![0.0, 0.2],
                vec![0.0, 0.3],
                vec![1.0, 1.0],
            ],
            vec![0, 0, 0, 1],
        )
        .unwrap()
    }

    #[test]
    fn test_balance_to_majority_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let balanced = balance_with_rng(&skewed_dataset(), &mut rng).unwrap();

        let cb = balanced.class_balance();
        assert_eq!(cb.count(0), 3);
        assert_eq!(cb.count(1), 3);
        assert_eq!(balanced.len(), 6);
        assert!(cb.is_balanced());
    }

    #[test]
    fn test_original_rows_preserved() {
        let data = skewed_dataset();
        let mut rng = StdRng::seed_from_u64(7);
        let balanced = balance_with_rng(&data, &mut rng).unwrap();

        // Original block comes first, untouched
        for i in 0..data.len() {
            assert_eq!(balanced.row(i), data.row(i));
            assert_eq!(balanced.label(i), data.label(i));
        }

        // Appended rows are duplicates of the minority row
        for i in data.len()..balanced.len() {
            assert_eq!(balanced.label(i), 1);
            assert_eq!(balanced.row(i), &[1.0, 1.0]);
        }
    }

    #[test]
    fn test_balance_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(42);
        let once = balance_with_rng(&skewed_dataset(), &mut rng).unwrap();
        let twice = balance_with_rng(&once, &mut rng).unwrap();

        // All deficits are zero on the second pass, so nothing is appended
        assert_eq!(once, twice);
    }

    #[test]
    fn test_already_balanced_passthrough() {
        let data = Dataset::new(
            vec![vec![0.0], vec![1.0], vec![0.5], vec![1.5]],
            vec![0, 1, 0, 1],
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let balanced = balance_with_rng(&data, &mut rng).unwrap();
        assert_eq!(balanced, data);
    }

    #[test]
    fn test_declared_class_with_zero_rows_fails() {
        let data = skewed_dataset();
        let mut rng = StdRng::seed_from_u64(1);
        let result = balance_classes_with_rng(&data, &[0, 1, 2], &mut rng);
        assert!(matches!(result, Err(RebalanceError::InvalidDataset(_))));
    }

    #[test]
    fn test_empty_dataset_fails() {
        let data = Dataset::new(vec![], vec![]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            balance_with_rng(&data, &mut rng),
            Err(RebalanceError::EmptyDataset)
        ));
    }

    #[test]
    fn test_three_class_balance() {
        let data = Dataset::new(
            vec![
                vec![0.0],
                vec![0.1],
                vec![0.2],
                vec![0.3],
                vec![1.0],
                vec![1.1],
                vec![2.0],
            ],
            vec![0, 0, 0, 0, 1, 1, 2],
        )
        .unwrap();

        let mut rng = StdRng::seed_from_u64(99);
        let balanced = balance_with_rng(&data, &mut rng).unwrap();
        let cb = balanced.class_balance();
        assert_eq!(cb.count(0), 4);
        assert_eq!(cb.count(1), 4);
        assert_eq!(cb.count(2), 4);
        assert_eq!(balanced.len(), 12);
    }
}
