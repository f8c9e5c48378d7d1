#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::core::Station;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::{StationRepository, StoreError};
    use crate::fare::{quote, FareError, FarePolicy};

    /// Helper to build the registry used across the examples.
    fn registry() -> LocalRepository {
        let repo = LocalRepository::new();
        repo.add_station(&Station::new("Origin", 0)).unwrap();
        repo.add_station(&Station::new("Midtown", 10)).unwrap();
        repo.add_station(&Station::new("Edge", 25)).unwrap();
        repo.add_station(&Station::new("Halt", 1)).unwrap();
        repo
    }

    #[test]
    fn worked_examples() {
        let repo = registry();
        let policy = FarePolicy::default();

        // 25 km * 3/km = 75, above the minimum
        assert_eq!(quote(&repo, &policy, "Origin", "Edge", 30).unwrap(), 75);
        // senior: floor(75 / 2)
        assert_eq!(quote(&repo, &policy, "Origin", "Edge", 65).unwrap(), 37);
        // child travels free
        assert_eq!(quote(&repo, &policy, "Origin", "Midtown", 3).unwrap(), 0);
    }

    #[test]
    fn minimum_fare_floor_applies() {
        let repo = registry();
        let policy = FarePolicy::default();

        // 1 km * 3/km = 3, floored to the minimum of 5
        assert_eq!(quote(&repo, &policy, "Origin", "Halt", 30).unwrap(), 5);
        // the floor is halved for seniors
        assert_eq!(quote(&repo, &policy, "Origin", "Halt", 72).unwrap(), 2);
    }

    #[test]
    fn senior_boundary_at_sixty() {
        let repo = registry();
        let policy = FarePolicy::default();

        assert_eq!(quote(&repo, &policy, "Origin", "Edge", 59).unwrap(), 75);
        assert_eq!(quote(&repo, &policy, "Origin", "Edge", 60).unwrap(), 37);
    }

    #[test]
    fn free_band_overrides_everything() {
        let repo = registry();
        let policy = FarePolicy::default();

        for age in 0..=5 {
            assert_eq!(quote(&repo, &policy, "Origin", "Edge", age).unwrap(), 0);
        }
        assert_ne!(quote(&repo, &policy, "Origin", "Edge", 6).unwrap(), 0);
    }

    #[test]
    fn unknown_station_is_invalid_route() {
        let repo = registry();
        let policy = FarePolicy::default();

        assert!(matches!(
            quote(&repo, &policy, "Origin", "Nowhere", 30),
            Err(FareError::InvalidRoute(_))
        ));
        assert!(matches!(
            quote(&repo, &policy, "Nowhere", "Edge", 30),
            Err(FareError::InvalidRoute(_))
        ));
    }

    #[test]
    fn identical_stations_are_invalid_route() {
        let repo = registry();
        let policy = FarePolicy::default();

        assert!(matches!(
            quote(&repo, &policy, "Edge", "Edge", 30),
            Err(FareError::InvalidRoute(_))
        ));
    }

    #[test]
    fn out_of_range_age_is_rejected() {
        let repo = registry();
        let policy = FarePolicy::default();

        assert_eq!(
            quote(&repo, &policy, "Origin", "Edge", -1),
            Err(FareError::InvalidAge(-1))
        );
        assert_eq!(
            quote(&repo, &policy, "Origin", "Edge", 121),
            Err(FareError::InvalidAge(121))
        );
    }

    #[test]
    fn policy_constants_are_injected() {
        let repo = registry();
        let policy = FarePolicy {
            per_km_rate: 10,
            minimum_fare: 2,
        };

        assert_eq!(quote(&repo, &policy, "Origin", "Edge", 30).unwrap(), 250);
        assert_eq!(quote(&repo, &policy, "Origin", "Halt", 30).unwrap(), 10);
    }

    #[test]
    fn registry_failure_propagates() {
        let repo = registry();
        let policy = FarePolicy::default();

        repo.set_healthy(false);
        assert!(matches!(
            quote(&repo, &policy, "Origin", "Edge", 30),
            Err(FareError::Registry(StoreError::StorageUnavailable(_)))
        ));
    }

    proptest! {
        #[test]
        fn prop_fare_is_symmetric(age in 0i64..=120, a in 0usize..4, b in 0usize..4) {
            prop_assume!(a != b);
            let names = ["Origin", "Midtown", "Edge", "Halt"];
            let repo = registry();
            let policy = FarePolicy::default();

            let forward = quote(&repo, &policy, names[a], names[b], age).unwrap();
            let backward = quote(&repo, &policy, names[b], names[a], age).unwrap();
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn prop_fare_is_idempotent(age in 0i64..=120) {
            let repo = registry();
            let policy = FarePolicy::default();

            let first = quote(&repo, &policy, "Origin", "Edge", age).unwrap();
            let second = quote(&repo, &policy, "Origin", "Edge", age).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_paid_fares_respect_the_floor(age in 6i64..=120, a in 0usize..4, b in 0usize..4) {
            prop_assume!(a != b);
            let names = ["Origin", "Midtown", "Edge", "Halt"];
            let repo = registry();
            let policy = FarePolicy::default();

            let fare = quote(&repo, &policy, names[a], names[b], age).unwrap();
            if age < 60 {
                prop_assert!(fare >= policy.minimum_fare);
            } else {
                prop_assert!(fare >= policy.minimum_fare / 2);
            }
        }

        #[test]
        fn prop_children_always_ride_free(age in 0i64..=5, a in 0usize..4, b in 0usize..4) {
            prop_assume!(a != b);
            let names = ["Origin", "Midtown", "Edge", "Halt"];
            let repo = registry();
            let policy = FarePolicy::default();

            prop_assert_eq!(quote(&repo, &policy, names[a], names[b], age).unwrap(), 0);
        }
    }
}
