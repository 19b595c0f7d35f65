//! Property-based tests for path patterns and patch validation.
//!
//! Uses proptest to generate paths and patches, with automatic shrinking of
//! failing cases.

use crate::common::*;
use mutability_validator::patch::PatchDocument;
use mutability_validator::{OperationKind, Payload, PathPattern};
use proptest::prelude::*;
use serde_json::{Value, json};

/// Strategy for a single path component
fn component() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}"
}

prop_compose! {
    fn path_strategy()(components in prop::collection::vec(component(), 1..5)) -> Vec<String> {
        components
    }
}

prop_compose! {
    fn visibility_strategy()(value in prop::sample::select(vec!["private", "friends", "public"])) -> Value {
        json!(value)
    }
}

prop_compose! {
    fn tags_strategy()(tags in prop::collection::vec(component(), 0..=3)) -> Value {
        json!(tags)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_literal_pattern_matches_only_itself(
        path in path_strategy(),
        extra in path_strategy(),
    ) {
        let pattern = PathPattern::compile(&path.join("/"), false);
        prop_assert!(pattern.matches(&path));

        let mut longer = path.clone();
        longer.extend(extra);
        prop_assert!(!pattern.matches(&longer));
        prop_assert!(!pattern.matches(&path[..path.len() - 1]));
    }

    #[test]
    fn prop_descendant_pattern_matches_subtree(
        path in path_strategy(),
        extra in prop::collection::vec(component(), 0..4),
    ) {
        let pattern = PathPattern::compile(&format!("/{}", path.join("/")), true);
        let mut below = path.clone();
        below.extend(extra);
        prop_assert!(pattern.matches(&below));
        prop_assert!(!pattern.matches(&path[..path.len() - 1]));
    }

    #[test]
    fn prop_wildcard_matches_any_single_component(
        path in path_strategy(),
        index in any::<prop::sample::Index>(),
        replacement in component(),
    ) {
        let position = index.index(path.len());
        let mut pattern_components = path.clone();
        pattern_components[position] = "*".to_string();
        let pattern = PathPattern::compile(&pattern_components.join("/"), false);

        let mut candidate = path.clone();
        candidate[position] = replacement;
        prop_assert!(pattern.matches(&candidate));

        candidate.insert(position, "extra".to_string());
        prop_assert!(!pattern.matches(&candidate));
    }

    #[test]
    fn prop_client_owned_fields_can_be_patched(
        visibility in visibility_strategy(),
        tags in tags_strategy(),
        rating in 1i64..=5,
    ) {
        let patch = PatchDocument::builder()
            .set("visibility", visibility)
            .set("tags", tags)
            .set("rating", json!(rating))
            .build();
        let result = photo_validator(OperationKind::PartialUpdate).validate(&Payload::from(patch));
        prop_assert!(result.is_valid(), "{}", result);
    }

    #[test]
    fn prop_read_only_value_is_always_rejected(id in any::<i64>(), batch in any::<bool>()) {
        let operation = if batch {
            OperationKind::BatchPartialUpdate
        } else {
            OperationKind::PartialUpdate
        };
        let patch = PatchDocument::builder().set("id", json!(id)).build();
        let result = photo_validator(operation).validate(&Payload::from(patch));
        prop_assert_eq!(result.messages().len(), 1);
        prop_assert_eq!(result.messages()[0].path.to_string(), "/id");
    }

    #[test]
    fn prop_each_deleted_read_only_field_gets_two_messages(
        fields in prop::sample::subsequence(vec!["id", "urn", "createdAt"], 1..=3),
    ) {
        let mut builder = PatchDocument::builder();
        for field in &fields {
            builder = builder.delete(*field);
        }
        let result = photo_validator(OperationKind::PartialUpdate)
            .validate(&Payload::from(builder.build()));
        prop_assert_eq!(result.messages().len(), fields.len() * 2);
    }
}
