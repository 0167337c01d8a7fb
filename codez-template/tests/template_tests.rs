use codez_template::validator::{lint_template, validate_color, validate_template};
use codez_template::{
    assemble, derive_map, parse_and_validate, render_css, render_html, Bucket, Customizations,
    DirectorySource, ElementProperty, ElementType, ExportBundle, Template, TemplateError,
    TemplateSource, FAQ_SCRIPT, PADDING_CHECK_SCRIPT,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;

fn get_fixture_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("fixtures");
    path.push(filename);
    path
}

fn load(filename: &str) -> Template {
    Template::from_path(&get_fixture_path(filename)).unwrap()
}

// Fixture loading
#[test]
fn test_landing_fixture_is_valid() {
    let yaml = fs::read_to_string(get_fixture_path("landing.yaml")).unwrap();
    let result = parse_and_validate(&yaml);
    assert!(result.is_ok(), "landing.yaml should be valid: {:?}", result.err());
}

#[test]
fn test_json_fixture_loads() {
    let template = load("pricing.json");
    assert_eq!(template.name, "Pricing Table");
    assert!(template.customizable_fields.images.is_empty());
}

#[test]
fn test_duplicate_id_fixture_is_invalid() {
    let template = load("invalid-duplicate-id.yaml");
    assert!(matches!(
        validate_template(&template),
        Err(TemplateError::DuplicateElementId { .. })
    ));
}

#[test]
fn test_unknown_target_bucket_fails_to_load() {
    let result = Template::from_path(&get_fixture_path("invalid-target.yaml"));
    assert!(matches!(result, Err(TemplateError::DeserializationError(_))));
}

// Substitution
#[test]
fn test_defaults_resolve_every_placeholder() {
    let template = load("landing.yaml");
    let code = assemble(&template, &template.customizable_fields);
    assert!(!code.contains("{{"), "unresolved placeholder in: {}", code);
    assert_eq!(code.matches("Book your session").count(), 2);
    assert!(code.contains(".badge{background:url(https://cdn.example.com/img/logo.png);}"));
}

#[test]
fn test_rendering_is_pure() {
    let template = load("landing.yaml");
    let values = template.default_customizations();
    assert_eq!(render_html(&template, &values), render_html(&template, &values));
    assert_eq!(render_css(&template, &values), render_css(&template, &values));
    assert_eq!(assemble(&template, &values), assemble(&template, &values));
}

#[test]
fn test_missing_key_passes_through() {
    let template = load("pricing.json");
    let html = render_html(&template, &template.default_customizations());
    assert!(html.contains("<th>Basic</th><td>$49</td><td>{{text.unknownField}}</td>"));
}

#[test]
fn test_edits_change_output() {
    let template = load("landing.yaml");
    let mut values = template.default_customizations();
    values.set(Bucket::Text, "heroTitle", "Now booking 2025");
    values.set(Bucket::Colors, "accent", "#10b981");
    let code = assemble(&template, &values);
    assert!(code.contains("<h1 class=\"hero-title\">Now booking 2025</h1>"));
    assert!(code.contains(".cta{background:#10b981;}"));
    assert!(code.ends_with(&format!("{}{}", FAQ_SCRIPT, PADDING_CHECK_SCRIPT)));
}

#[test]
fn test_empty_customizations_leave_markup_untouched() {
    let template = load("faq.yaml");
    let html = render_html(&template, &Customizations::new());
    assert_eq!(html, template.html_structure);
}

// Element map
#[test]
fn test_synthesized_map_for_landing() {
    let template = load("landing.yaml");
    let map = derive_map(&template);
    let ids: Vec<&str> = map.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "text-heroTitle",
            "text-heroSubtitle",
            "text-ctaText",
            "color-background",
            "color-accent",
            "image-heroBackground",
            "image-logo",
        ]
    );
    assert_eq!(map[0].label, "Hero Title");
    assert_eq!(map[3].element_type, ElementType::Container);
    assert!(map[5].has_property(ElementProperty::ImageUrl));
}

#[test]
fn test_explicit_map_for_faq() {
    let template = load("faq.yaml");
    let map = derive_map(&template);
    assert_eq!(Some(&map), template.customization_map.as_ref());
    assert_eq!(map.len(), 2);
    assert_eq!(map[0].id, "faq-heading");
}

// Lint
#[test]
fn test_lint_pricing() {
    let template = load("pricing.json");
    let warnings = lint_template(&template);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("{{text.unknownField}}"));
    assert!(validate_color(&template.customizable_fields.colors["border"]).is_err());
    assert!(lint_template(&load("landing.yaml")).is_empty());
}

// Export
#[test]
fn test_export_bundle_from_fixture() {
    let template = load("faq.yaml");
    let bundle = ExportBundle::build(&template, &template.default_customizations());
    assert!(bundle.styles_css.contains(".faq{background:#0f172a;}"));
    assert!(!bundle.template_html.contains("<style>"));
    assert!(bundle.template_html.contains("onlycodezpadingcheckcustomcodeapplied"));
    assert!(bundle.readme.starts_with("# FAQ Block"));
}

#[test]
fn test_directory_source_over_fixtures() {
    let tmp = tempfile::tempdir().unwrap();
    let templates = tmp.path().join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::copy(get_fixture_path("landing.yaml"), templates.join("landing.yaml")).unwrap();

    let source = DirectorySource::new(tmp.path());
    let template = source.fetch_template("landing").unwrap();
    assert_eq!(template.id, "landing");
    assert!(matches!(
        source.fetch_template("missing"),
        Err(TemplateError::TemplateNotFound { .. })
    ));
}
