//! # codez template engine
//!
//! Turns a stored HTML/CSS template plus a set of user customizations into
//! final, embeddable code.
//!
//! ## Features
//! - Literal `{{text.K}}`, `{{color.K}}` and `{{image.K}}` placeholder substitution
//! - Final code assembly with the fixed FAQ and padding-check scripts
//! - Customization map derivation (explicit map or synthesized from field buckets)
//! - Element property controls, validation and export bundles
//!
//! ## Example
//! ```ignore
//! use codez_template::{assemble, parse_template};
//!
//! let yaml = r##"
//! id: landing
//! name: Landing
//! html_structure: "<h1>{{text.heading}}</h1>"
//! css_structure: "h1{color:{{color.accent}}}"
//! customizable_fields:
//!   text: { heading: Hi }
//!   colors: { accent: "#00f" }
//! "##;
//!
//! let template = parse_template(yaml).expect("Failed to parse template");
//! let code = assemble(&template, &template.default_customizations());
//! ```

pub mod assemble;
pub mod controls;
pub mod customizations;
pub mod element;
pub mod element_map;
pub mod error;
pub mod export;
pub mod render;
pub mod source;
pub mod template;
pub mod validator;

// --- Core types ---
pub use customizations::Customizations;
pub use element::{CustomizableElement, ElementProperty, ElementType, Target};
pub use error::{TemplateError, TemplateResult};
pub use template::{Bucket, Template, UserTemplate};

// --- Pipeline ---
pub use assemble::{assemble, split_style_block, FAQ_INIT_HOOK, FAQ_SCRIPT, PADDING_CHECK_SCRIPT};
pub use controls::{apply_property, property_value, Edit};
pub use element_map::{derive_map, label_for_key};
pub use export::{archive_file_name, clipboard_payload, ExportBundle};
pub use render::{placeholder, render_css, render_html};
pub use source::{DirectorySource, TemplateSource};

/// Parse a YAML template record
pub fn parse_template(yaml: &str) -> TemplateResult<Template> {
    Template::from_yaml(yaml)
}

/// Parse a YAML template record and validate it
pub fn parse_and_validate(yaml: &str) -> TemplateResult<Template> {
    let template = Template::from_yaml(yaml)?;
    validator::validate_template(&template)?;
    Ok(template)
}
