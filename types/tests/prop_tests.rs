//! Property tests for identifier parsing and text normalisation.

use proptest::prelude::*;
use verifybot_types::{title_case, AccountId, CohortYear};

proptest! {
    #[test]
    fn account_id_display_parses_back(raw in any::<u64>()) {
        let id = AccountId::new(raw);
        prop_assert_eq!(id.to_string().parse::<AccountId>().unwrap(), id);
    }

    #[test]
    fn account_id_keys_sort_numerically(a in any::<u64>(), b in any::<u64>()) {
        let (ka, kb) = (AccountId::new(a).to_be_bytes(), AccountId::new(b).to_be_bytes());
        prop_assert_eq!(a.cmp(&b), ka.cmp(&kb));
    }

    #[test]
    fn title_case_is_idempotent(s in "[a-zA-Z '\\-]{0,40}") {
        let once = title_case(&s);
        prop_assert_eq!(title_case(&once), once.clone());
    }

    #[test]
    fn cohort_role_name_parses_back(year in 1900i32..2200) {
        let cohort = CohortYear::new(year);
        prop_assert_eq!(cohort.role_name().parse::<CohortYear>().unwrap(), cohort);
    }

    #[test]
    fn zero_padded_cohort_is_rejected(year in 1900i32..2200) {
        let padded = format!("0{year}");
        prop_assert!(padded.parse::<CohortYear>().is_err());
    }
}
