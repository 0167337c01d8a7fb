use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::element::CustomizableElement;
use crate::error::{TemplateError, TemplateResult};
use crate::render::find_placeholders;
use crate::template::Template;

/// Validate a template record and its explicit element map, if any
pub fn validate_template(template: &Template) -> TemplateResult<()> {
    if template.id.trim().is_empty() {
        return Err(TemplateError::MissingField {
            field: "id".to_string(),
        });
    }
    if template.name.trim().is_empty() {
        return Err(TemplateError::MissingField {
            field: "name".to_string(),
        });
    }
    if let Some(map) = &template.customization_map {
        validate_element_map(map)?;
    }
    Ok(())
}

/// Element ids must be unique and non-empty; targets need a key; elements need properties
pub fn validate_element_map(map: &[CustomizableElement]) -> TemplateResult<()> {
    let mut seen_ids = HashSet::new();
    for element in map {
        if element.id.is_empty() {
            return Err(TemplateError::InvalidElement {
                id: element.label.clone(),
                reason: "id must not be empty".to_string(),
            });
        }
        if !seen_ids.insert(element.id.as_str()) {
            return Err(TemplateError::DuplicateElementId {
                id: element.id.clone(),
            });
        }
        if element.target.key.is_empty() {
            return Err(TemplateError::InvalidTarget {
                target: element.target.to_string(),
                reason: "key must not be empty".to_string(),
            });
        }
        if element.properties.is_empty() {
            return Err(TemplateError::InvalidElement {
                id: element.id.clone(),
                reason: "at least one editable property is required".to_string(),
            });
        }
    }
    Ok(())
}

/// Placeholders referenced in markup without a default value.
///
/// These render verbatim unless the user supplies a value, which is allowed
/// but usually an authoring mistake.
pub fn lint_template(template: &Template) -> Vec<String> {
    let mut warnings = Vec::new();
    let sources = [
        ("html_structure", &template.html_structure),
        ("css_structure", &template.css_structure),
    ];
    for (field, markup) in sources {
        for placeholder in find_placeholders(markup) {
            if template
                .customizable_fields
                .get(placeholder.bucket, &placeholder.key)
                .is_none()
            {
                let warning = format!(
                    "{}: '{{{{{}.{}}}}}' has no default in customizable_fields.{}",
                    field,
                    placeholder.bucket.namespace(),
                    placeholder.key,
                    placeholder.bucket.prefix()
                );
                if !warnings.contains(&warning) {
                    warnings.push(warning);
                }
            }
        }
    }
    warnings
}

pub fn validate_color(color: &str) -> TemplateResult<()> {
    static HEX_COLOR_REGEX: OnceLock<Regex> = OnceLock::new();
    let hex_regex = HEX_COLOR_REGEX.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap()
    });

    const NAMED_COLORS: &[&str] = &[
        "red", "blue", "green", "white", "black", "transparent", "yellow", "orange", "purple",
        "pink", "gray", "grey", "inherit", "currentColor",
    ];

    if hex_regex.is_match(color) || NAMED_COLORS.contains(&color) {
        Ok(())
    } else {
        Err(TemplateError::InvalidColor {
            value: color.to_string(),
            reason: format!(
                "expected a hex color (e.g., #ff0000) or named color ({})",
                NAMED_COLORS.join(", ")
            ),
        })
    }
}
