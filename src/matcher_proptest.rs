//! Property-based tests for origin file selection
//!
//! The suffix matcher decides which files of a cloned repository are
//! composed. These properties pin down its algebra: selection is exactly
//! whitelist-minus-blacklist, matching ignores case, and the empty
//! whitelist selects nothing.

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use crate::compose::origin::{is_selected, matches_suffix};

    proptest! {
        #[test]
        fn selection_is_whitelist_minus_blacklist(
            name in "[a-zA-Z0-9._-]{1,20}",
            whitelist in proptest::collection::vec("[a-zA-Z0-9._-]{1,6}", 0..4),
            blacklist in proptest::collection::vec("[a-zA-Z0-9._-]{1,6}", 0..4),
        ) {
            prop_assert_eq!(
                is_selected(&name, &whitelist, &blacklist),
                matches_suffix(&name, &whitelist) && !matches_suffix(&name, &blacklist)
            );
        }

        #[test]
        fn matching_ignores_case(
            name in "[a-zA-Z0-9._-]{1,20}",
            list in proptest::collection::vec("[a-zA-Z0-9._-]{1,6}", 0..4),
        ) {
            prop_assert_eq!(
                matches_suffix(&name, &list),
                matches_suffix(&name.to_ascii_uppercase(), &list)
            );
        }

        #[test]
        fn empty_whitelist_selects_nothing(name in "[a-zA-Z0-9._-]{1,20}") {
            prop_assert!(!is_selected(&name, &[], &[]));
        }

        #[test]
        fn blacklisting_the_whole_name_always_blocks(
            name in "[a-zA-Z0-9._-]{1,20}",
            whitelist in proptest::collection::vec("[a-zA-Z0-9._-]{1,6}", 0..4),
        ) {
            let blacklist = vec![name.clone()];
            prop_assert!(!is_selected(&name, &whitelist, &blacklist));
        }

        #[test]
        fn whitelisted_suffix_selects(
            stem in "[a-zA-Z0-9_-]{0,12}",
            suffix in "\\.[a-z]{1,5}",
        ) {
            let name = format!("{}{}", stem, suffix);
            prop_assert!(is_selected(&name, &[suffix.clone()], &[]));
        }
    }
}
