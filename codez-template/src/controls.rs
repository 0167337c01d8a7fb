//! Reading and writing element properties against the working customizations.

use crate::customizations::Customizations;
use crate::element::{CustomizableElement, ElementProperty, ElementType};
use crate::template::Bucket;

/// Suffix of the color key paired with a text key (`title` -> `titleColor`)
pub const PAIRED_COLOR_SUFFIX: &str = "Color";

/// A single applied write into the customizations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub bucket: Bucket,
    pub key: String,
    pub value: String,
}

fn paired_color_key(key: &str) -> String {
    format!("{}{}", key, PAIRED_COLOR_SUFFIX)
}

/// Resolve where a property of an element is stored, if anywhere.
///
/// `fontSize` and `overlayOpacity` have no backing storage.
pub fn property_slot(
    element: &CustomizableElement,
    property: ElementProperty,
) -> Option<(Bucket, String)> {
    let key = &element.target.key;
    match (element.target.bucket, property) {
        (Bucket::Text, ElementProperty::Text) => Some((Bucket::Text, key.clone())),
        (Bucket::Text, ElementProperty::Color) => Some((Bucket::Colors, paired_color_key(key))),
        (Bucket::Colors, ElementProperty::Color | ElementProperty::BackgroundColor) => {
            Some((Bucket::Colors, key.clone()))
        }
        (Bucket::Images, ElementProperty::ImageUrl) => Some((Bucket::Images, key.clone())),
        _ => None,
    }
}

/// Current value of an element property, empty when unset or unstored
pub fn property_value(
    element: &CustomizableElement,
    property: ElementProperty,
    customizations: &Customizations,
) -> String {
    property_slot(element, property)
        .and_then(|(bucket, key)| customizations.get(bucket, &key).map(str::to_string))
        .unwrap_or_default()
}

/// Write an element property into the customizations.
///
/// Returns the applied edit, or `None` when the property has no storage.
pub fn apply_property(
    element: &CustomizableElement,
    property: ElementProperty,
    value: &str,
    customizations: &mut Customizations,
) -> Option<Edit> {
    let (bucket, key) = match (element.target.bucket, property) {
        // any facet of a color target writes the color itself
        (Bucket::Colors, _) => (Bucket::Colors, element.target.key.clone()),
        _ => property_slot(element, property)?,
    };
    customizations.set(bucket, &key, value);
    Some(Edit {
        bucket,
        key,
        value: value.to_string(),
    })
}

pub fn find_element<'a>(
    map: &'a [CustomizableElement],
    id: &str,
) -> Option<&'a CustomizableElement> {
    map.iter().find(|el| el.id == id)
}

/// Elements grouped by type in display order; empty groups are skipped
pub fn group_by_type(map: &[CustomizableElement]) -> Vec<(ElementType, Vec<&CustomizableElement>)> {
    ElementType::ORDER
        .into_iter()
        .filter_map(|ty| {
            let group: Vec<&CustomizableElement> =
                map.iter().filter(|el| el.element_type == ty).collect();
            (!group.is_empty()).then_some((ty, group))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Target;

    fn el(
        id: &str,
        ty: ElementType,
        target: Target,
        props: Vec<ElementProperty>,
    ) -> CustomizableElement {
        CustomizableElement {
            id: id.to_string(),
            label: id.to_string(),
            element_type: ty,
            target,
            properties: props,
        }
    }

    #[test]
    fn test_text_element_writes() {
        let title = el(
            "text-title",
            ElementType::Text,
            Target::new(Bucket::Text, "title"),
            vec![ElementProperty::Text, ElementProperty::Color, ElementProperty::FontSize],
        );
        let mut c = Customizations::new();

        let edit = apply_property(&title, ElementProperty::Text, "Hello", &mut c).unwrap();
        assert_eq!(edit.bucket, Bucket::Text);
        assert_eq!(c.get(Bucket::Text, "title"), Some("Hello"));

        apply_property(&title, ElementProperty::Color, "#f87171", &mut c).unwrap();
        assert_eq!(c.get(Bucket::Colors, "titleColor"), Some("#f87171"));
        assert_eq!(property_value(&title, ElementProperty::Color, &c), "#f87171");

        assert!(apply_property(&title, ElementProperty::FontSize, "24px", &mut c).is_none());
        assert_eq!(property_value(&title, ElementProperty::FontSize, &c), "");
    }

    #[test]
    fn test_color_element_writes_any_facet() {
        let bg = el(
            "color-background",
            ElementType::Container,
            Target::new(Bucket::Colors, "background"),
            vec![ElementProperty::BackgroundColor],
        );
        let mut c = Customizations::new();
        apply_property(&bg, ElementProperty::BackgroundColor, "#333333", &mut c).unwrap();
        assert_eq!(property_value(&bg, ElementProperty::BackgroundColor, &c), "#333333");
        apply_property(&bg, ElementProperty::OverlayOpacity, "0.5", &mut c).unwrap();
        assert_eq!(c.get(Bucket::Colors, "background"), Some("0.5"));
    }

    #[test]
    fn test_image_element() {
        let hero = el(
            "image-hero",
            ElementType::Image,
            Target::new(Bucket::Images, "hero"),
            vec![ElementProperty::ImageUrl],
        );
        let mut c = Customizations::new();
        assert_eq!(property_value(&hero, ElementProperty::ImageUrl, &c), "");
        apply_property(&hero, ElementProperty::ImageUrl, "https://cdn/x.png", &mut c).unwrap();
        assert_eq!(property_value(&hero, ElementProperty::ImageUrl, &c), "https://cdn/x.png");
        assert!(apply_property(&hero, ElementProperty::Text, "nope", &mut c).is_none());
    }

    #[test]
    fn test_group_by_type_order() {
        let map = vec![
            el("image-a", ElementType::Image, Target::new(Bucket::Images, "a"), vec![]),
            el("text-b", ElementType::Text, Target::new(Bucket::Text, "b"), vec![]),
            el("color-c", ElementType::Container, Target::new(Bucket::Colors, "c"), vec![]),
            el("text-d", ElementType::Text, Target::new(Bucket::Text, "d"), vec![]),
        ];
        let groups = group_by_type(&map);
        let order: Vec<ElementType> = groups.iter().map(|(t, _)| *t).collect();
        assert_eq!(order, vec![ElementType::Text, ElementType::Container, ElementType::Image]);
        let texts: Vec<&str> = groups[0].1.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(texts, vec!["text-b", "text-d"]);
        assert_eq!(groups[0].0.group_title(), "Text Elements");
        assert!(find_element(&map, "color-c").is_some());
        assert!(find_element(&map, "color-z").is_none());
    }
}
