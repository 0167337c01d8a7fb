//! Customization map derivation.
//!
//! An explicit `customization_map` on the template is returned unchanged.
//! Otherwise one element is synthesized per text key, color key and image
//! key, in that order.

use crate::element::{CustomizableElement, ElementProperty, ElementType, Target};
use crate::template::{Bucket, Template};

/// Element list for a template: the stored map if present, else a synthesized one
pub fn derive_map(template: &Template) -> Vec<CustomizableElement> {
    match &template.customization_map {
        Some(map) => map.clone(),
        None => synthesize_map(template),
    }
}

/// Build an element map from the template's field buckets.
///
/// A color key gets no container element of its own when an element already
/// exposing `color` has an id segment contained in the key (`title` covers
/// `titleColor`). The containment check is approximate: `title` also covers
/// `subtitleColor`.
pub fn synthesize_map(template: &Template) -> Vec<CustomizableElement> {
    let fields = &template.customizable_fields;
    let mut map: Vec<CustomizableElement> = Vec::new();

    for key in fields.text.keys() {
        map.push(element(
            "text",
            key,
            ElementType::Text,
            Bucket::Text,
            vec![
                ElementProperty::Text,
                ElementProperty::Color,
                ElementProperty::FontSize,
            ],
        ));
    }

    for key in fields.colors.keys() {
        let covered = map.iter().any(|el| {
            el.has_property(ElementProperty::Color)
                && key.contains(id_segment(&el.id))
        });
        if covered {
            tracing::trace!(key = %key, "color already reachable through a text element");
            continue;
        }
        map.push(element(
            "color",
            key,
            ElementType::Container,
            Bucket::Colors,
            vec![ElementProperty::BackgroundColor],
        ));
    }

    for key in fields.images.keys() {
        map.push(element(
            "image",
            key,
            ElementType::Image,
            Bucket::Images,
            vec![ElementProperty::ImageUrl],
        ));
    }

    map
}

fn element(
    id_prefix: &str,
    key: &str,
    element_type: ElementType,
    bucket: Bucket,
    properties: Vec<ElementProperty>,
) -> CustomizableElement {
    CustomizableElement {
        id: format!("{}-{}", id_prefix, key),
        label: label_for_key(key),
        element_type,
        target: Target::new(bucket, key),
        properties,
    }
}

/// Segment between the first and second `-` of an element id
fn id_segment(id: &str) -> &str {
    id.split('-').nth(1).unwrap_or_default()
}

/// camelCase key to a display label: `heroTitle` -> `Hero Title`.
///
/// Every uppercase letter after the first character gets a leading space, so
/// acronyms come out spaced (`ctaURL` -> `Cta U R L`).
pub fn label_for_key(key: &str) -> String {
    let mut chars = key.chars();
    let mut label = String::with_capacity(key.len() + 4);
    if let Some(first) = chars.next() {
        label.extend(first.to_uppercase());
    }
    for c in chars {
        if c.is_ascii_uppercase() {
            label.push(' ');
        }
        label.push(c);
    }
    label
}
