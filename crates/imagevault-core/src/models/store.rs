//! Store definitions and variant specifications.
//!
//! A `StoreDefinition` describes one physical write target: the original or
//! one fixed-dimension variant of a collection. Definitions are plain data;
//! the write-time transform is keyed off the `variant` dimensions by the
//! processing crate rather than being captured in a closure, so it can be
//! tested in isolation.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bucket/object visibility policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessPolicy {
    #[default]
    Private,
    PublicRead,
}

/// Fixed target dimensions for one variant. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> AppResult<Self> {
        if width == 0 || height == 0 {
            return Err(AppError::config(format!(
                "variant dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Dimensions { width, height })
    }
}

/// Mapping of variant name to target dimensions for one collection.
///
/// Backed by a `BTreeMap` so iteration (and therefore planning) is
/// deterministic regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
    sizes: BTreeMap<String, Dimensions>,
}

impl VariantSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one named variant. Fails on empty names and non-positive
    /// dimensions; duplicate names overwrite (the map key is the name).
    pub fn with(mut self, name: &str, width: u32, height: u32) -> AppResult<Self> {
        if name.trim().is_empty() {
            return Err(AppError::config("variant name must not be empty"));
        }
        self.sizes
            .insert(name.to_string(), Dimensions::new(width, height)?);
        Ok(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Dimensions)> {
        self.sizes.iter().map(|(name, dims)| (name.as_str(), *dims))
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// One physical storage target within a collection.
///
/// Exactly one definition per collection has `variant: None`; it holds the
/// untouched original and is named `{collection}-original`. Every other
/// definition carries the target dimensions its write-time transform will
/// produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDefinition {
    /// Unique within the collection: `{collection}-original` or
    /// `{collection}-{variant}`.
    pub name: String,
    pub bucket: String,
    /// Key prefix ("folder") under which this store writes. Matches the
    /// store name so direct-access URLs and object keys line up.
    pub key_prefix: String,
    pub access_policy: AccessPolicy,
    /// `None` for the original; `Some` for transformed variants.
    pub variant: Option<Dimensions>,
}

impl StoreDefinition {
    pub fn is_original(&self) -> bool {
        self.variant.is_none()
    }
}
