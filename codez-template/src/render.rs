//! Placeholder substitution.
//!
//! Placeholders are literal, case-sensitive `{{<namespace>.<key>}}` tokens.
//! Every occurrence is replaced; tokens without a matching key are left as-is.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;

use crate::customizations::Customizations;
use crate::template::{Bucket, Template};

/// Build the placeholder token for a bucket key, e.g. `{{color.accent}}`
pub fn placeholder(bucket: Bucket, key: &str) -> String {
    format!("{{{{{}.{}}}}}", bucket.namespace(), key)
}

fn substitute(input: &str, bucket: Bucket, values: &IndexMap<String, String>) -> String {
    let mut out = input.to_string();
    for (key, value) in values {
        let token = placeholder(bucket, key);
        if out.contains(&token) {
            out = out.replace(&token, value);
        }
    }
    out
}

/// Final HTML: text and image placeholders resolved
pub fn render_html(template: &Template, customizations: &Customizations) -> String {
    let html = substitute(&template.html_structure, Bucket::Text, &customizations.text);
    substitute(&html, Bucket::Images, &customizations.images)
}

/// Final CSS: color and image placeholders resolved
pub fn render_css(template: &Template, customizations: &Customizations) -> String {
    let css = substitute(&template.css_structure, Bucket::Colors, &customizations.colors);
    substitute(&css, Bucket::Images, &customizations.images)
}

/// A placeholder occurrence found in markup
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlaceholderRef {
    pub bucket: Bucket,
    pub key: String,
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_REGEX
        .get_or_init(|| Regex::new(r"\{\{(text|color|image)\.((?:[^}]|\}[^}])+?)\}\}").unwrap())
}

/// Every well-formed placeholder still present in `markup`, in order of appearance
pub fn find_placeholders(markup: &str) -> Vec<PlaceholderRef> {
    placeholder_regex()
        .captures_iter(markup)
        .filter_map(|caps| {
            let bucket = Bucket::from_namespace(&caps[1])?;
            Some(PlaceholderRef {
                bucket,
                key: caps[2].to_string(),
            })
        })
        .collect()
}

/// Placeholder tokens left unresolved in rendered output, deduplicated
pub fn unresolved_placeholders(rendered: &str) -> Vec<String> {
    let mut seen: Vec<String> = find_placeholders(rendered)
        .into_iter()
        .map(|p| placeholder(p.bucket, &p.key))
        .collect();
    seen.sort();
    seen.dedup();
    seen
}
