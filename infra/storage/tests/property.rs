use proptest::prelude::*;
use siteline_storage::StoreKey;

proptest! {
    #[test]
    fn valid_keys_stay_inside_root(raw in "[a-z0-9][a-z0-9_.]{0,63}") {
        let key = StoreKey::try_from(raw.as_str()).expect("charset-conforming key must validate");
        let resolved = std::path::Path::new("/store").join(key.as_ref());

        // A validated key is always a single path component under the root.
        prop_assert_eq!(resolved.parent(), Some(std::path::Path::new("/store")));
        // Temp files start with '.', so a valid key can never shadow one.
        prop_assert!(!key.as_ref().starts_with('.'));
    }

    #[test]
    fn arbitrary_strings_never_escape(raw in ".*") {
        match StoreKey::try_from(raw.as_str()) {
            Ok(key) => {
                prop_assert!(!key.as_ref().contains('/'));
                prop_assert!(!key.as_ref().contains('\\'));
                prop_assert!(!key.as_ref().starts_with('.'));
            },
            Err(_) => {},
        }
    }
}
