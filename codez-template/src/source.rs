//! Read-only access to stored templates and purchases.

use std::path::{Path, PathBuf};

use crate::error::{TemplateError, TemplateResult};
use crate::template::{Template, UserTemplate};

/// The storage collaborator seen from the engine
pub trait TemplateSource {
    fn fetch_template(&self, id: &str) -> TemplateResult<Template>;

    /// Purchases of a user, each joined with its template when it resolves
    fn purchased_templates(&self, user_id: &str) -> TemplateResult<Vec<UserTemplate>>;
}

const TEMPLATE_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Templates stored as files under `<root>/templates/<id>.{yaml,yml,json}`,
/// purchases as a YAML list in `<root>/purchases.yaml`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn template_path(&self, id: &str) -> Option<PathBuf> {
        // ids come from URLs; never let them escape the templates directory
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return None;
        }
        let dir = self.root.join("templates");
        TEMPLATE_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{}", id, ext)))
            .find(|p| p.is_file())
    }
}

impl TemplateSource for DirectorySource {
    fn fetch_template(&self, id: &str) -> TemplateResult<Template> {
        let path = self
            .template_path(id)
            .ok_or_else(|| TemplateError::TemplateNotFound { id: id.to_string() })?;
        Template::from_path(&path)
    }

    fn purchased_templates(&self, user_id: &str) -> TemplateResult<Vec<UserTemplate>> {
        let path = self.root.join("purchases.yaml");
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&path)?;
        let purchases: Vec<UserTemplate> = serde_yaml::from_str(&content)?;

        let mut joined = Vec::new();
        for mut purchase in purchases.into_iter().filter(|p| p.user_id == user_id) {
            match self.fetch_template(&purchase.template_id) {
                Ok(template) => purchase.template = Some(template),
                Err(err) => {
                    tracing::warn!(
                        template = %purchase.template_id,
                        error = %err,
                        "purchased template could not be loaded"
                    );
                }
            }
            joined.push(purchase);
        }
        Ok(joined)
    }
}
