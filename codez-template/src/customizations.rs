use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::template::Bucket;

/// Per-bucket `key -> value` mappings.
///
/// Used both for a template's default `customizable_fields` and for the
/// working state edited in a session. Keys iterate in the order they were
/// authored or first inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customizations {
    pub text: IndexMap<String, String>,
    pub colors: IndexMap<String, String>,
    pub images: IndexMap<String, String>,
}

impl Customizations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self, bucket: Bucket) -> &IndexMap<String, String> {
        match bucket {
            Bucket::Text => &self.text,
            Bucket::Colors => &self.colors,
            Bucket::Images => &self.images,
        }
    }

    pub fn bucket_mut(&mut self, bucket: Bucket) -> &mut IndexMap<String, String> {
        match bucket {
            Bucket::Text => &mut self.text,
            Bucket::Colors => &mut self.colors,
            Bucket::Images => &mut self.images,
        }
    }

    pub fn get(&self, bucket: Bucket, key: &str) -> Option<&str> {
        self.bucket(bucket).get(key).map(String::as_str)
    }

    /// Set one value, returning the previous one
    pub fn set(&mut self, bucket: Bucket, key: &str, value: impl Into<String>) -> Option<String> {
        self.bucket_mut(bucket).insert(key.to_string(), value.into())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.colors.is_empty() && self.images.is_empty()
    }

    /// Image URLs in key order
    pub fn image_urls(&self) -> impl Iterator<Item = &str> {
        self.images.values().map(String::as_str)
    }
}
