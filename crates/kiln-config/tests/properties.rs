//! Property tests for naming and resolution

use kiln_config::{
    AssetClass, Environment, ExtensionMatcher, HASH_LEN, NamingTemplate, ProcessingRule,
    RuleTable, StepKind, content_hash, resolve,
};
use proptest::prelude::*;
use std::path::Path;

fn environment() -> impl Strategy<Value = Environment> {
    prop_oneof![Just(Environment::Development), Just(Environment::Production)]
}

proptest! {
    #[test]
    fn stable_names_ignore_content(
        name in "[a-z][a-z0-9_-]{0,15}",
        ext in "[a-z]{1,5}",
        content in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let rendered = NamingTemplate::Stable.render(&name, &ext, &content);
        prop_assert_eq!(rendered, format!("{name}.{ext}"));
    }

    #[test]
    fn hashed_names_carry_fixed_length_hex(
        name in "[a-z][a-z0-9_-]{0,15}",
        content in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let hash = content_hash(&content);
        prop_assert_eq!(hash.len(), HASH_LEN);
        prop_assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));

        let rendered = NamingTemplate::ContentHash.render(&name, "js", &content);
        prop_assert_eq!(rendered, format!("{name}.{hash}.js"));
    }

    #[test]
    fn resolution_is_deterministic(env in environment()) {
        let first = resolve(env, &RuleTable::standard()).unwrap();
        let second = resolve(env, &RuleTable::standard()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn covered_extensions_resolve_to_their_rule(
        env in environment(),
        stem in "[a-z]{1,12}",
        ext in prop::sample::select(vec!["css", "scss", "sass", "png", "JPG", "svg", "woff2", "js"]),
    ) {
        let manifest = resolve(env, &RuleTable::standard()).unwrap();
        let file = format!("src/{stem}.{ext}");
        let chain = manifest.chain_for(Path::new(&file)).unwrap();
        prop_assert!(!chain.steps.is_empty());
    }

    #[test]
    fn stylesheet_chains_end_in_transform(
        env in environment(),
        preprocessed in any::<bool>(),
    ) {
        let mut rule = ProcessingRule::new(
            "styles",
            AssetClass::Stylesheet,
            ExtensionMatcher::new(["pcss"]),
        );
        if preprocessed {
            rule = rule.with_preprocessor(kiln_config::Preprocessor::Sass);
        }
        let manifest = resolve(env, &RuleTable::new(vec![rule])).unwrap();
        let kinds = manifest.chains()[0].kinds();

        prop_assert_eq!(kinds.last(), Some(&StepKind::Transform));
        prop_assert_eq!(kinds.first() == Some(&StepKind::Compile), preprocessed);
    }
}
