//! Variant planning: collection name + sizes to store definitions.

use imagevault_core::{
    AccessPolicy, AppError, AppResult, StoreDefinition, VariantSpec,
};
use std::collections::HashSet;

/// Reserved variant name for the untouched original.
const ORIGINAL: &str = "original";

/// Produces the full list of store definitions for one collection: one
/// original first, then one per named variant. Pure; backends are only
/// provisioned when the definitions are realized by the orchestration.
pub struct VariantPlanner;

impl VariantPlanner {
    /// Plan the definitions for `collection`.
    ///
    /// Idempotent: identical inputs produce structurally identical lists
    /// (`VariantSpec` iteration is deterministic). Fails on an empty
    /// collection name or a variant name that collides after namespacing
    /// (i.e. a variant literally named "original"). Dimension validity is
    /// enforced when the `VariantSpec` is built.
    pub fn plan(
        collection: &str,
        sizes: &VariantSpec,
        bucket: &str,
        access_policy: AccessPolicy,
    ) -> AppResult<Vec<StoreDefinition>> {
        if collection.trim().is_empty() {
            return Err(AppError::config("collection name must not be empty"));
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut definitions = Vec::with_capacity(sizes.len() + 1);

        let original_name = format!("{}-{}", collection, ORIGINAL);
        seen.insert(original_name.clone());
        definitions.push(StoreDefinition {
            name: original_name.clone(),
            bucket: bucket.to_string(),
            key_prefix: original_name,
            access_policy,
            variant: None,
        });

        for (variant_name, dims) in sizes.iter() {
            let name = format!("{}-{}", collection, variant_name);
            if !seen.insert(name.clone()) {
                return Err(AppError::config(format!(
                    "store name collision in collection {}: {}",
                    collection, name
                )));
            }
            definitions.push(StoreDefinition {
                name: name.clone(),
                bucket: bucket.to_string(),
                key_prefix: name,
                access_policy,
                variant: Some(dims),
            });
        }

        Ok(definitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes() -> VariantSpec {
        VariantSpec::new()
            .with("thumb", 50, 50)
            .unwrap()
            .with("preview", 200, 150)
            .unwrap()
    }

    #[test]
    fn test_plan_emits_original_plus_one_per_variant() {
        let plan =
            VariantPlanner::plan("avatars", &sizes(), "photos", AccessPolicy::Private).unwrap();

        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].name, "avatars-original");
        assert!(plan[0].is_original());

        let thumb = plan.iter().find(|d| d.name == "avatars-thumb").unwrap();
        assert_eq!(thumb.variant.unwrap().width, 50);
        assert_eq!(thumb.variant.unwrap().height, 50);

        let preview = plan.iter().find(|d| d.name == "avatars-preview").unwrap();
        assert_eq!(preview.variant.unwrap().width, 200);
        assert_eq!(preview.variant.unwrap().height, 150);
    }

    #[test]
    fn test_plan_is_idempotent() {
        let first =
            VariantPlanner::plan("avatars", &sizes(), "photos", AccessPolicy::Private).unwrap();
        let second =
            VariantPlanner::plan("avatars", &sizes(), "photos", AccessPolicy::Private).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_plan_rejects_empty_collection_name() {
        assert!(VariantPlanner::plan("", &sizes(), "photos", AccessPolicy::Private).is_err());
        assert!(VariantPlanner::plan("  ", &sizes(), "photos", AccessPolicy::Private).is_err());
    }

    #[test]
    fn test_plan_rejects_variant_named_original() {
        let colliding = VariantSpec::new().with("original", 10, 10).unwrap();
        let err = VariantPlanner::plan("avatars", &colliding, "photos", AccessPolicy::Private)
            .unwrap_err();
        assert!(err.to_string().contains("collision"));
    }

    #[test]
    fn test_empty_sizes_still_plans_original() {
        let plan = VariantPlanner::plan(
            "avatars",
            &VariantSpec::new(),
            "photos",
            AccessPolicy::Private,
        )
        .unwrap();
        assert_eq!(plan.len(), 1);
        assert!(plan[0].is_original());
    }
}
