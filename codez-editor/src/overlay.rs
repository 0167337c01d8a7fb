//! Inline editing on top of the rendered template.
//!
//! The host renders [`render_overlay_markup`], forwards user input as
//! [`OverlayEvent`]s and carries out the returned [`OverlayCommand`]s.
//! Every committed value is written through the [`EditorSession`].

use regex::Regex;
use std::sync::OnceLock;

use codez_template::{placeholder, render_css, Bucket, Customizations, Template};

use crate::session::EditorSession;

pub const OVERLAY_STYLE_ID: &str = "codez-inline-editing";

pub const OVERLAY_STYLES: &str = r#".interactive-text {
  cursor: text;
  border-bottom: 1px dashed transparent;
  transition: border-color 0.2s;
}
.interactive-text:hover {
  border-bottom-color: #3B82F6;
}
.inline-editor {
  border: 1px solid #3B82F6;
  padding: 2px 4px;
  font-family: inherit;
  font-size: inherit;
  color: inherit;
  background: white;
}
img {
  cursor: pointer;
  transition: filter 0.2s;
}
img:hover {
  filter: brightness(0.9);
}
"#;

pub const DEFAULT_PICKER_COLOR: &str = "#ffffff";
pub const MIN_TEXT_INPUT_WIDTH: f64 = 100.0;

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn editable_span(key: &str, value: &str) -> String {
    format!(
        r#"<span class="interactive-text" data-edit-type="text" data-edit-key="{}">{}</span>"#,
        escape_html(key),
        escape_html(value)
    )
}

fn markup_tag_regex() -> &'static Regex {
    static MARKUP_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    MARKUP_TAG_REGEX.get_or_init(|| {
        Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<!--.*?-->|<[^>]*>")
            .unwrap()
    })
}

fn replace_text(
    segment: &str,
    customizations: &Customizations,
    render: impl Fn(&str, &str) -> String,
) -> String {
    let mut out = segment.to_string();
    for (key, value) in customizations.bucket(Bucket::Text) {
        let token = placeholder(Bucket::Text, key);
        if out.contains(&token) {
            out = out.replace(&token, &render(key, value));
        }
    }
    out
}

/// Template markup with text placeholders in element content wrapped in
/// editable spans, preceded by the rendered style block.
///
/// Placeholders inside tags, comments and `script`/`style` blocks get the
/// plain value so attributes like `alt="{{text.K}}"` stay well-formed.
pub fn render_overlay_markup(template: &Template, customizations: &Customizations) -> String {
    let source = template.html_structure.as_str();
    let mut html = String::with_capacity(source.len());
    let mut last = 0;
    for tag in markup_tag_regex().find_iter(source) {
        html.push_str(&replace_text(&source[last..tag.start()], customizations, editable_span));
        html.push_str(&replace_text(tag.as_str(), customizations, |_, value| {
            value.to_string()
        }));
        last = tag.end();
    }
    html.push_str(&replace_text(&source[last..], customizations, editable_span));

    for (key, value) in customizations.bucket(Bucket::Images) {
        html = html.replace(&placeholder(Bucket::Images, key), value);
    }
    format!("<style>{}</style>{}", render_css(template, customizations), html)
}

/// Style injection into the page hosting the overlay
pub trait OverlayHost {
    fn inject_style(&mut self, id: &str, css: &str);
    fn remove_style(&mut self, id: &str);
}

/// What the user clicked on
#[derive(Debug, Clone, PartialEq)]
pub enum ClickTarget {
    /// An `interactive-text` span, with its rendered width
    Text { key: String, width: f64 },
    /// An element tagged `data-edit-type="color"`
    Color { key: String },
    Image { src: String },
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    Click { target: ClickTarget, x: f64, y: f64 },
    TextInput(String),
    TextBlur,
    KeyDown(String),
    ColorChange(String),
    ColorBlur,
    ImageUrlInput(String),
    ImageSubmit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayCommand {
    ShowTextInput { key: String, value: String, min_width: f64 },
    RestoreText { key: String, value: String },
    ShowColorPicker { key: String, value: String, x: f64, y: f64 },
    RemoveColorPicker,
    ShowImageOverlay { key: String, value: String },
    RemoveImageOverlay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ActiveEdit {
    Text { key: String, draft: String },
    Color { key: String },
    Image { key: String, draft: String },
}

#[derive(Debug, Default)]
pub struct InlineEditor {
    active: Option<ActiveEdit>,
}

impl InlineEditor {
    /// Install the hover styles and return a fresh editor
    pub fn mount(host: &mut impl OverlayHost) -> Self {
        host.inject_style(OVERLAY_STYLE_ID, OVERLAY_STYLES);
        Self::default()
    }

    pub fn unmount(self, host: &mut impl OverlayHost) {
        host.remove_style(OVERLAY_STYLE_ID);
    }

    /// Bucket and key of the value being edited
    pub fn active(&self) -> Option<(Bucket, &str)> {
        self.active.as_ref().map(|edit| match edit {
            ActiveEdit::Text { key, .. } => (Bucket::Text, key.as_str()),
            ActiveEdit::Color { key } => (Bucket::Colors, key.as_str()),
            ActiveEdit::Image { key, .. } => (Bucket::Images, key.as_str()),
        })
    }

    pub fn handle(
        &mut self,
        event: OverlayEvent,
        session: &mut EditorSession,
    ) -> Vec<OverlayCommand> {
        let mut commands = Vec::new();
        match event {
            OverlayEvent::Click { target, x, y } => {
                // a click elsewhere ends whatever was in progress
                match self.active.take() {
                    Some(ActiveEdit::Text { key, draft }) => {
                        commands.push(commit_text(session, key, draft));
                    }
                    Some(ActiveEdit::Color { .. }) => {
                        commands.push(OverlayCommand::RemoveColorPicker)
                    }
                    Some(ActiveEdit::Image { .. }) => {
                        commands.push(OverlayCommand::RemoveImageOverlay)
                    }
                    None => {}
                }
                if let Some(command) = self.begin(target, x, y, session) {
                    commands.push(command);
                }
            }
            OverlayEvent::TextInput(value) => {
                if let Some(ActiveEdit::Text { draft, .. }) = &mut self.active {
                    *draft = value;
                }
            }
            OverlayEvent::KeyDown(key) if key != "Enter" => {}
            OverlayEvent::TextBlur | OverlayEvent::KeyDown(_) => {
                if let Some(ActiveEdit::Text { key, draft }) = self.take_if(Bucket::Text) {
                    commands.push(commit_text(session, key, draft));
                }
            }
            OverlayEvent::ColorChange(value) => {
                if let Some(ActiveEdit::Color { key }) = &self.active {
                    session.update_color(key, value);
                }
            }
            OverlayEvent::ColorBlur => {
                if self.take_if(Bucket::Colors).is_some() {
                    commands.push(OverlayCommand::RemoveColorPicker);
                }
            }
            OverlayEvent::ImageUrlInput(value) => {
                if let Some(ActiveEdit::Image { draft, .. }) = &mut self.active {
                    *draft = value;
                }
            }
            OverlayEvent::ImageSubmit => {
                if let Some(ActiveEdit::Image { key, draft }) = self.take_if(Bucket::Images) {
                    session.update_image(&key, draft);
                    commands.push(OverlayCommand::RemoveImageOverlay);
                }
            }
        }
        commands
    }

    fn take_if(&mut self, bucket: Bucket) -> Option<ActiveEdit> {
        let current = self.active().map(|(active, _)| active);
        if current == Some(bucket) {
            self.active.take()
        } else {
            None
        }
    }

    fn begin(
        &mut self,
        target: ClickTarget,
        x: f64,
        y: f64,
        session: &EditorSession,
    ) -> Option<OverlayCommand> {
        let customizations = session.customizations();
        match target {
            ClickTarget::Text { key, width } => {
                let value = customizations.get(Bucket::Text, &key).unwrap_or_default().to_string();
                self.active = Some(ActiveEdit::Text {
                    key: key.clone(),
                    draft: value.clone(),
                });
                Some(OverlayCommand::ShowTextInput {
                    key,
                    value,
                    min_width: width.max(MIN_TEXT_INPUT_WIDTH),
                })
            }
            ClickTarget::Color { key } => {
                let value = customizations
                    .get(Bucket::Colors, &key)
                    .unwrap_or(DEFAULT_PICKER_COLOR)
                    .to_string();
                self.active = Some(ActiveEdit::Color { key: key.clone() });
                Some(OverlayCommand::ShowColorPicker { key, value, x, y })
            }
            ClickTarget::Image { src } => {
                let key = image_key_for_src(session, &src)?;
                let value = customizations
                    .get(Bucket::Images, &key)
                    .unwrap_or_default()
                    .to_string();
                self.active = Some(ActiveEdit::Image {
                    key: key.clone(),
                    draft: value.clone(),
                });
                Some(OverlayCommand::ShowImageOverlay { key, value })
            }
            ClickTarget::Other => None,
        }
    }
}

fn commit_text(session: &mut EditorSession, key: String, value: String) -> OverlayCommand {
    session.update_text(&key, value.clone());
    OverlayCommand::RestoreText { key, value }
}

/// Image key whose URL occurs in `src`; the last match in bucket order wins
pub fn image_key_for_src(session: &EditorSession, src: &str) -> Option<String> {
    session
        .customizations()
        .bucket(Bucket::Images)
        .iter()
        .filter(|(_, url)| src.contains(url.as_str()))
        .last()
        .map(|(key, _)| key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codez_template::parse_template;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Page {
        styles: Vec<String>,
    }

    impl OverlayHost for Page {
        fn inject_style(&mut self, id: &str, _css: &str) {
            self.styles.push(id.to_string());
        }

        fn remove_style(&mut self, id: &str) {
            self.styles.retain(|s| s != id);
        }
    }

    fn session() -> EditorSession {
        let template = parse_template(
            r##"
id: t
name: T
html_structure: "<h1>{{text.title}}</h1><img src=\"{{image.hero}}\">"
css_structure: "h1{color:{{color.titleColor}}}"
customizable_fields:
  text: { title: "Fish & Chips" }
  colors: { titleColor: "#111111" }
  images: { hero: "https://cdn/hero.png", heroThumb: "https://cdn/hero.png?w=64" }
"##,
        )
        .unwrap();
        let mut session = EditorSession::new();
        session.select_template(template);
        session
    }

    fn click(target: ClickTarget) -> OverlayEvent {
        OverlayEvent::Click { target, x: 10.0, y: 20.0 }
    }

    fn image_click(src: &str) -> OverlayEvent {
        click(ClickTarget::Image { src: src.into() })
    }

    #[test]
    fn test_markup_wraps_text() {
        let session = session();
        let markup = render_overlay_markup(session.template().unwrap(), session.customizations());
        assert_eq!(
            markup,
            "<style>h1{color:#111111}</style><h1><span class=\"interactive-text\" \
             data-edit-type=\"text\" data-edit-key=\"title\">Fish &amp; Chips</span></h1>\
             <img src=\"https://cdn/hero.png\">"
        );
    }

    #[test]
    fn test_markup_keeps_attributes_plain() {
        let template = parse_template(
            r##"
id: t
name: T
html_structure: |-
  <img alt="{{text.caption}}" src="{{image.hero}}"><p>{{text.caption}}</p><script>t="{{text.caption}}"</script>
customizable_fields:
  text: { caption: Sunset }
  images: { hero: "https://cdn/hero.png" }
"##,
        )
        .unwrap();
        let markup = render_overlay_markup(&template, &template.default_customizations());
        assert_eq!(
            markup,
            "<style></style><img alt=\"Sunset\" src=\"https://cdn/hero.png\"><p><span \
             class=\"interactive-text\" data-edit-type=\"text\" data-edit-key=\"caption\">\
             Sunset</span></p><script>t=\"Sunset\"</script>"
        );
    }

    #[test]
    fn test_mount_unmount_styles() {
        let mut page = Page::default();
        let editor = InlineEditor::mount(&mut page);
        assert_eq!(page.styles, vec![OVERLAY_STYLE_ID.to_string()]);
        editor.unmount(&mut page);
        assert!(page.styles.is_empty());
    }

    #[test]
    fn test_text_commit_on_enter() {
        let mut session = session();
        let mut editor = InlineEditor::default();
        let target = ClickTarget::Text {
            key: "title".into(),
            width: 42.0,
        };
        let cmds = editor.handle(click(target), &mut session);
        assert_eq!(
            cmds,
            vec![OverlayCommand::ShowTextInput {
                key: "title".into(),
                value: "Fish & Chips".into(),
                min_width: 100.0
            }]
        );
        editor.handle(OverlayEvent::TextInput("Hello".into()), &mut session);
        assert!(editor.handle(OverlayEvent::KeyDown("a".into()), &mut session).is_empty());
        let cmds = editor.handle(OverlayEvent::KeyDown("Enter".into()), &mut session);
        assert_eq!(
            cmds,
            vec![OverlayCommand::RestoreText { key: "title".into(), value: "Hello".into() }]
        );
        assert_eq!(session.customizations().get(Bucket::Text, "title"), Some("Hello"));
        assert!(editor.active().is_none());
    }

    #[test]
    fn test_color_change_and_blur() {
        let mut session = session();
        let mut editor = InlineEditor::default();
        let cmds = editor.handle(click(ClickTarget::Color { key: "missing".into() }), &mut session);
        assert_eq!(
            cmds,
            vec![OverlayCommand::ShowColorPicker {
                key: "missing".into(),
                value: DEFAULT_PICKER_COLOR.into(),
                x: 10.0,
                y: 20.0
            }]
        );
        editor.handle(OverlayEvent::ColorChange("#abcdef".into()), &mut session);
        assert_eq!(session.customizations().get(Bucket::Colors, "missing"), Some("#abcdef"));
        assert_eq!(
            editor.handle(OverlayEvent::ColorBlur, &mut session),
            vec![OverlayCommand::RemoveColorPicker]
        );
    }

    #[test]
    fn test_image_reverse_match_last_wins() {
        let session = session();
        // both hero and heroThumb URLs occur in the thumbnail src
        assert_eq!(
            image_key_for_src(&session, "https://cdn/hero.png?w=64").as_deref(),
            Some("heroThumb")
        );
        assert_eq!(image_key_for_src(&session, "https://cdn/hero.png").as_deref(), Some("hero"));
        assert_eq!(image_key_for_src(&session, "https://other/x.png"), None);
    }

    #[test]
    fn test_image_submit_and_outside_click() {
        let mut session = session();
        let mut editor = InlineEditor::default();
        let unknown = editor.handle(image_click("https://other/x.png"), &mut session);
        assert!(unknown.is_empty());

        editor.handle(image_click("https://cdn/hero.png"), &mut session);
        editor.handle(OverlayEvent::ImageUrlInput("https://cdn/new.png".into()), &mut session);
        let cmds = editor.handle(click(ClickTarget::Other), &mut session);
        assert_eq!(cmds, vec![OverlayCommand::RemoveImageOverlay]);
        let hero = session.customizations().get(Bucket::Images, "hero");
        assert_eq!(hero, Some("https://cdn/hero.png"));

        editor.handle(image_click("https://cdn/hero.png"), &mut session);
        editor.handle(OverlayEvent::ImageUrlInput("https://cdn/new.png".into()), &mut session);
        assert_eq!(
            editor.handle(OverlayEvent::ImageSubmit, &mut session),
            vec![OverlayCommand::RemoveImageOverlay]
        );
        let hero = session.customizations().get(Bucket::Images, "hero");
        assert_eq!(hero, Some("https://cdn/new.png"));
    }
}
