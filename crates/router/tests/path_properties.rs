#![allow(clippy::unwrap_used, clippy::expect_used)]

use buzz_router::path::resolve;
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-z0-9]{1,6}",
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
    ]
}

fn path() -> impl Strategy<Value = String> {
    (any::<bool>(), prop::collection::vec(segment(), 0..6), any::<bool>()).prop_map(
        |(absolute, segments, trailing)| {
            let mut path = segments.join("/");
            if absolute {
                path.insert(0, '/');
            }
            if trailing && !path.is_empty() {
                path.push('/');
            }
            path
        },
    )
}

proptest! {
    #[test]
    fn resolved_paths_are_absolute_and_normalized(current in path(), requested in path()) {
        let current = resolve("", &current);
        let resolved = resolve(&current, &requested);

        prop_assert!(resolved.starts_with('/'));
        prop_assert!(!resolved.contains("//"));
        prop_assert!(resolved.split('/').all(|segment| segment != "." && segment != ".."));
    }

    #[test]
    fn resolving_is_idempotent(current in path(), requested in path()) {
        let current = resolve("", &current);
        let resolved = resolve(&current, &requested);

        prop_assert_eq!(resolve(&current, &resolved), resolved.clone());
        prop_assert_eq!(resolve("/elsewhere/", &resolved), resolved);
    }
}
