use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use fairmint_shuffle::{shuffle, shuffle_with, ShuffleError, ShuffleOptions};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn output_is_a_permutation(count in 1u64..400, seed in "[ -~]{0,24}") {
        let order = shuffle(count, &seed).unwrap();
        prop_assert_eq!(order.len() as u64, count);

        let unique: BTreeSet<u64> = order.iter().copied().collect();
        prop_assert_eq!(unique.len() as u64, count);
        prop_assert_eq!(unique.first().copied(), Some(1));
        prop_assert_eq!(unique.last().copied(), Some(count));
    }

    #[test]
    fn repeated_calls_agree(count in 1u64..300, seed in "[a-z0-9]{1,16}", threads in 1usize..6) {
        let options = ShuffleOptions::default().with_threads(NonZeroUsize::new(threads).unwrap());
        let first = shuffle(count, &seed).unwrap();
        prop_assert_eq!(&shuffle(count, &seed).unwrap(), &first);
        prop_assert_eq!(&shuffle_with(count, &seed, &options).unwrap(), &first);
    }

    #[test]
    fn case_is_normalized(count in 1u64..200, seed in "[a-zA-Z0-9]{1,16}") {
        prop_assert_eq!(
            shuffle(count, &seed.to_ascii_uppercase()).unwrap(),
            shuffle(count, &seed.to_ascii_lowercase()).unwrap()
        );
    }

    #[test]
    fn non_ascii_seeds_are_rejected(prefix in "[a-z]{0,8}", c in "[\u{80}-\u{10ffff}]") {
        let seed = format!("{prefix}{c}");
        let is_invalid_seed = matches!(shuffle(10, &seed), Err(ShuffleError::InvalidSeed { .. }));
        prop_assert!(is_invalid_seed);
    }

    #[test]
    fn non_positive_counts_are_rejected(count in i64::MIN..=0) {
        let err = shuffle(count, "seed").unwrap_err();
        prop_assert!(err.is_invalid_input());
        let is_invalid_count = matches!(err, ShuffleError::InvalidCount { .. });
        prop_assert!(is_invalid_count);
    }
}
