use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TemplateError;
use crate::template::Bucket;

/// Kind of editable unit shown in the element list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Image,
    Container,
    Button,
}

impl ElementType {
    /// Display order of element groups
    pub const ORDER: [ElementType; 4] = [
        ElementType::Text,
        ElementType::Container,
        ElementType::Image,
        ElementType::Button,
    ];

    pub fn group_title(self) -> &'static str {
        match self {
            ElementType::Text => "Text Elements",
            ElementType::Container => "Container Elements",
            ElementType::Image => "Image Elements",
            ElementType::Button => "Button Elements",
        }
    }
}

/// An editable facet of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementProperty {
    Text,
    Color,
    BackgroundColor,
    FontSize,
    ImageUrl,
    OverlayOpacity,
}

impl ElementProperty {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementProperty::Text => "text",
            ElementProperty::Color => "color",
            ElementProperty::BackgroundColor => "backgroundColor",
            ElementProperty::FontSize => "fontSize",
            ElementProperty::ImageUrl => "imageUrl",
            ElementProperty::OverlayOpacity => "overlayOpacity",
        }
    }
}

/// Dotted `bucket.key` path into the customizations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub bucket: Bucket,
    pub key: String,
}

impl Target {
    pub fn new(bucket: Bucket, key: impl Into<String>) -> Self {
        Self {
            bucket,
            key: key.into(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.bucket.prefix(), self.key)
    }
}

impl FromStr for Target {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, key) = s.split_once('.').ok_or_else(|| TemplateError::InvalidTarget {
            target: s.to_string(),
            reason: "expected '<bucket>.<key>'".to_string(),
        })?;
        let bucket = Bucket::from_prefix(prefix).ok_or_else(|| TemplateError::InvalidTarget {
            target: s.to_string(),
            reason: format!("unknown bucket '{}', expected text, colors or images", prefix),
        })?;
        Ok(Target::new(bucket, key))
    }
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A selectable, editable unit of a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizableElement {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub target: Target,
    pub properties: Vec<ElementProperty>,
}

impl CustomizableElement {
    pub fn has_property(&self, property: ElementProperty) -> bool {
        self.properties.contains(&property)
    }
}
