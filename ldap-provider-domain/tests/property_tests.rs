use ldap_provider_domain::domain::{
    entities::{ConfigMap, DomainConfig, DomainName},
    errors::DomainError,
};
use proptest::collection::btree_map;
use proptest::prelude::*;
use serde_json::Value;

fn config_values() -> impl Strategy<Value = ConfigMap> {
    btree_map(
        "[a-zA-Z]{1,12}",
        prop_oneof![
            any::<u32>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
            "[a-z=,]{0,24}".prop_map(Value::from),
        ],
        0..8,
    )
}

mod merge_properties {
    use super::*;

    proptest! {
        /// Property: every override value is visible in the merged config
        #[test]
        fn overrides_always_win(defaults in config_values(), overrides in config_values()) {
            let domain = DomainName::new("CORP").unwrap();
            let config = DomainConfig::merged(domain, "sync", Some(&defaults), Some(&overrides));

            for (key, value) in &overrides {
                prop_assert_eq!(config.get(key), Some(value));
            }
        }

        /// Property: defaults survive unless overridden, and nothing else appears
        #[test]
        fn defaults_fill_the_gaps(defaults in config_values(), overrides in config_values()) {
            let domain = DomainName::new("CORP").unwrap();
            let config = DomainConfig::merged(domain, "sync", Some(&defaults), Some(&overrides));

            for (key, value) in &defaults {
                if !overrides.contains_key(key) {
                    prop_assert_eq!(config.get(key), Some(value));
                }
            }

            for (key, _) in config.iter() {
                prop_assert!(defaults.contains_key(key) || overrides.contains_key(key));
            }
        }

        /// Property: with nothing to layer, the result is exactly the defaults
        #[test]
        fn no_overrides_means_defaults(defaults in config_values()) {
            let domain = DomainName::new("LAB").unwrap();
            let config = DomainConfig::merged(domain, "sync", Some(&defaults), None);
            prop_assert_eq!(config.values(), &defaults);
        }
    }
}

mod domain_name_properties {
    use super::*;

    proptest! {
        /// Property: short keys without whitespace are valid domain names
        #[test]
        fn plain_keys_are_valid(name in "[A-Za-z0-9_.-]{1,32}") {
            prop_assert!(DomainName::new(name.clone()).is_ok());
            let parsed: DomainName = name.parse().unwrap();
            prop_assert_eq!(parsed.as_str(), name.as_str());
        }

        /// Property: any whitespace makes a domain name invalid
        #[test]
        fn whitespace_is_rejected(prefix in "[A-Z]{0,8}", space in "[ \t\n]", suffix in "[A-Z]{0,8}") {
            let name = format!("{prefix}{space}{suffix}");
            let is_validation_error = matches!(DomainName::new(name), Err(DomainError::Validation { .. }));
            prop_assert!(is_validation_error);
        }
    }
}
