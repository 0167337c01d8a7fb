//! Final code assembly.
//!
//! The two inline scripts are a compatibility contract with the hosting
//! platform the output is pasted into. They are emitted byte-for-byte and
//! must not be reformatted.

use regex::Regex;
use std::sync::OnceLock;

use crate::customizations::Customizations;
use crate::render::{render_css, render_html};
use crate::template::Template;

/// Name of the initializer the FAQ script defines on the document window
pub const FAQ_INIT_HOOK: &str = "initializeFAQInteractions";

/// Accordion behavior for `.faq-question-container` blocks
pub const FAQ_SCRIPT: &str = r#"<script>function initializeFAQInteractions(){document.querySelectorAll('.faq-question-container').forEach(container=>{container.addEventListener('click',()=>{const description=container.querySelector('.faq-description');const icon=container.querySelector('.toggle-icon');document.querySelectorAll('.faq-question-container.active').forEach(activeContainer=>{if(activeContainer!==container){activeContainer.classList.remove('active');activeContainer.querySelector('.faq-description').style.maxHeight="0";activeContainer.querySelector('.faq-description').style.opacity="0";activeContainer.querySelector('.faq-description').style.padding="0 10px";activeContainer.querySelector('.toggle-icon').textContent="+";}});if(container.classList.contains('active')){container.classList.remove('active');description.style.maxHeight="0";description.style.opacity="0";description.style.padding="0 10px";icon.textContent="+";}else{container.classList.add('active');description.style.maxHeight="1000px";description.style.opacity="1";description.style.padding="10px";icon.textContent="x";}});});}initializeFAQInteractions();</script>"#;

/// Marker text that makes the padding script zero a form element's padding
pub const PADDING_SENTINEL: &str = "onlycodezpadingcheckcustomcodeapplied";

/// Zeroes the padding of `.form-element__content` blocks carrying the sentinel
pub const PADDING_CHECK_SCRIPT: &str = r#"<script> document.querySelectorAll('.form-element__content').forEach((element) => {if (element.textContent.includes("onlycodezpadingcheckcustomcodeapplied")) { element.style.setProperty("padding", "0", "important");}});</script>"#;

/// Combine generated CSS and HTML with the fixed scripts.
///
/// Output shape: `<style>{css}</style>{html}{FAQ_SCRIPT}{PADDING_CHECK_SCRIPT}`.
/// Both scripts are always appended, whether or not the template uses them.
pub fn assemble(template: &Template, customizations: &Customizations) -> String {
    let html = render_html(template, customizations);
    let css = render_css(template, customizations);
    tracing::debug!(
        template = %template.id,
        html_len = html.len(),
        css_len = css.len(),
        "assembling final code"
    );

    let mut out = String::with_capacity(
        css.len() + html.len() + FAQ_SCRIPT.len() + PADDING_CHECK_SCRIPT.len() + 15,
    );
    out.push_str("<style>");
    out.push_str(&css);
    out.push_str("</style>");
    out.push_str(&html);
    out.push_str(FAQ_SCRIPT);
    out.push_str(PADDING_CHECK_SCRIPT);
    out
}

fn style_block_regex() -> &'static Regex {
    static STYLE_BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
    STYLE_BLOCK_REGEX.get_or_init(|| Regex::new(r"(?is)<style>(.*?)</style>").unwrap())
}

/// Split assembled code into (styles, markup without the first style block).
///
/// Without a `<style>` block the styles are empty and the markup is unchanged.
pub fn split_style_block(code: &str) -> (String, String) {
    match style_block_regex().captures(code) {
        Some(caps) => {
            let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
            let styles = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let mut rest = String::with_capacity(code.len() - whole.len());
            rest.push_str(&code[..whole.start]);
            rest.push_str(&code[whole.end..]);
            (styles.to_string(), rest)
        }
        None => (String::new(), code.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Bucket;
    use pretty_assertions::assert_eq;

    fn template(html: &str, css: &str) -> Template {
        Template {
            id: "t".to_string(),
            name: "T".to_string(),
            description: String::new(),
            thumbnail: String::new(),
            html_structure: html.to_string(),
            css_structure: css.to_string(),
            customizable_fields: Customizations::default(),
            customization_map: None,
        }
    }

    #[test]
    fn test_assemble_scenario() {
        let t = template("<h1>{{text.heading}}</h1>", ".box{color:{{color.accent}}}");
        let mut c = Customizations::new();
        c.set(Bucket::Text, "heading", "Hi");
        c.set(Bucket::Colors, "accent", "#00f");
        let expected = format!(
            "<style>.box{{color:#00f}}</style><h1>Hi</h1>{}{}",
            FAQ_SCRIPT, PADDING_CHECK_SCRIPT
        );
        assert_eq!(assemble(&t, &c), expected);
    }

    #[test]
    fn test_scripts_always_appended_in_order() {
        let out = assemble(&template("", ""), &Customizations::new());
        assert_eq!(out, format!("<style></style>{}{}", FAQ_SCRIPT, PADDING_CHECK_SCRIPT));
        assert!(out.ends_with(PADDING_CHECK_SCRIPT));
        let faq_at = out.find(FAQ_SCRIPT).unwrap();
        let pad_at = out.find(PADDING_CHECK_SCRIPT).unwrap();
        assert!(faq_at < pad_at);
    }

    #[test]
    fn test_fixed_scripts_shape() {
        assert!(FAQ_SCRIPT.starts_with("<script>function initializeFAQInteractions(){"));
        assert!(FAQ_SCRIPT.ends_with("initializeFAQInteractions();</script>"));
        assert!(FAQ_SCRIPT.contains(FAQ_INIT_HOOK));
        assert!(FAQ_SCRIPT.contains("description.style.maxHeight=\"1000px\""));
        assert!(FAQ_SCRIPT.contains("icon.textContent=\"x\""));
        assert!(PADDING_CHECK_SCRIPT
            .starts_with("<script> document.querySelectorAll('.form-element__content')"));
        assert!(PADDING_CHECK_SCRIPT.contains(PADDING_SENTINEL));
        assert!(PADDING_CHECK_SCRIPT
            .contains(r#"element.style.setProperty("padding", "0", "important");"#));
        assert!(PADDING_CHECK_SCRIPT.ends_with("</script>"));
    }

    #[test]
    fn test_split_style_block() {
        let (styles, rest) = split_style_block("<style>\na{}\n</style><p>x</p><script>s</script>");
        assert_eq!(styles, "\na{}\n");
        assert_eq!(rest, "<p>x</p><script>s</script>");
    }

    #[test]
    fn test_split_style_block_first_only() {
        let (styles, rest) = split_style_block("<STYLE>a{}</STYLE><p/><style>b{}</style>");
        assert_eq!(styles, "a{}");
        assert_eq!(rest, "<p/><style>b{}</style>");
    }

    #[test]
    fn test_split_without_style_block() {
        let (styles, rest) = split_style_block("<p>plain</p>");
        assert_eq!(styles, "");
        assert_eq!(rest, "<p>plain</p>");
    }
}
