use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::customizations::Customizations;
use crate::element::CustomizableElement;
use crate::error::TemplateResult;

/// One of the three customization categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Text,
    Colors,
    Images,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Text, Bucket::Colors, Bucket::Images];

    /// Prefix used by element targets (`text.heroTitle`, `colors.accent`, ...)
    pub fn prefix(self) -> &'static str {
        match self {
            Bucket::Text => "text",
            Bucket::Colors => "colors",
            Bucket::Images => "images",
        }
    }

    /// Namespace used by placeholders in markup (`{{color.accent}}`)
    pub fn namespace(self) -> &'static str {
        match self {
            Bucket::Text => "text",
            Bucket::Colors => "color",
            Bucket::Images => "image",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Bucket> {
        Bucket::ALL.into_iter().find(|b| b.prefix() == prefix)
    }

    pub fn from_namespace(namespace: &str) -> Option<Bucket> {
        Bucket::ALL.into_iter().find(|b| b.namespace() == namespace)
    }
}

/// A purchasable HTML/CSS template
///
/// Owned by the storage collaborator; the engine only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: String,
    /// Markup with `{{text.K}}` / `{{image.K}}` placeholders
    #[serde(default)]
    pub html_structure: String,
    /// Styles with `{{color.K}}` / `{{image.K}}` placeholders
    #[serde(default)]
    pub css_structure: String,
    /// Default values per bucket. Absent buckets deserialize empty.
    #[serde(default)]
    pub customizable_fields: Customizations,
    /// Explicit element map; when present it wins over synthesis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization_map: Option<Vec<CustomizableElement>>,
}

impl Template {
    pub fn from_yaml(yaml: &str) -> TemplateResult<Template> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json(json: &str) -> TemplateResult<Template> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a template file; `.json` is read as JSON, anything else as YAML.
    pub fn from_path(path: &Path) -> TemplateResult<Template> {
        let content = std::fs::read_to_string(path)?;
        let template = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Template::from_json(&content)?,
            _ => Template::from_yaml(&content)?,
        };
        tracing::debug!(id = %template.id, path = %path.display(), "loaded template");
        Ok(template)
    }

    /// Fresh working state seeded from the template defaults
    pub fn default_customizations(&self) -> Customizations {
        self.customizable_fields.clone()
    }
}

/// A purchase record joined with its template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTemplate {
    pub id: String,
    pub user_id: String,
    pub template_id: String,
    pub purchased_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
}
