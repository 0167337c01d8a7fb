//! Export of the final code: clipboard payload and a zip bundle.

use regex::Regex;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use std::sync::OnceLock;

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::assemble::{assemble, split_style_block};
use crate::customizations::Customizations;
use crate::error::TemplateResult;
use crate::template::Template;

pub const TEMPLATE_HTML: &str = "template.html";
pub const STYLES_CSS: &str = "styles.css";
pub const COMBINED_HTML: &str = "combined.html";
pub const README_MD: &str = "README.md";

/// Text placed on the clipboard: the full assembled code
pub fn clipboard_payload(template: &Template, customizations: &Customizations) -> String {
    assemble(template, customizations)
}

/// Files of a downloadable export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    /// Markup and inline scripts, with the style block removed
    pub template_html: String,
    /// Contents of the extracted style block
    pub styles_css: String,
    /// The unmodified assembled code
    pub combined_html: String,
    pub readme: String,
}

impl ExportBundle {
    pub fn build(template: &Template, customizations: &Customizations) -> Self {
        let combined_html = assemble(template, customizations);
        let (styles_css, template_html) = split_style_block(&combined_html);
        let readme = readme(&template.name, customizations);
        Self {
            template_html,
            styles_css,
            combined_html,
            readme,
        }
    }

    /// Archive entries in write order
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            (TEMPLATE_HTML, self.template_html.as_str()),
            (STYLES_CSS, self.styles_css.as_str()),
            (COMBINED_HTML, self.combined_html.as_str()),
            (README_MD, self.readme.as_str()),
        ]
    }

    pub fn write_zip<W: Write + Seek>(&self, writer: W) -> TemplateResult<W> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, content) in self.entries() {
            zip.start_file(name, options)?;
            zip.write_all(content.as_bytes())?;
        }
        Ok(zip.finish()?)
    }

    pub fn to_zip_bytes(&self) -> TemplateResult<Vec<u8>> {
        Ok(self.write_zip(Cursor::new(Vec::new()))?.into_inner())
    }

    /// Write the archive to `path`.
    ///
    /// The archive goes to a temporary file next to `path` and is renamed into
    /// place, so a failed write never leaves a partial archive behind.
    pub fn save_zip(&self, path: &Path) -> TemplateResult<()> {
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let staged = self.write_zip(NamedTempFile::new_in(dir)?)?;
        staged.persist(path).map_err(|err| err.error)?;
        tracing::info!(path = %path.display(), "export archive written");
        Ok(())
    }
}

fn readme(name: &str, customizations: &Customizations) -> String {
    let images: Vec<String> = customizations
        .image_urls()
        .map(|url| format!("- {}", url))
        .collect();
    format!(
        "# {name}

This template was customized using OnlyCodez.

## Images
The following image URLs are used in this template:
{images}

## Usage with Dubsado
1. Use the '{COMBINED_HTML}' file to copy the complete code
2. Make sure to keep the special script for padding control in Dubsado
3. Or use '{TEMPLATE_HTML}' and '{STYLES_CSS}' separately if your platform allows

",
        images = images.join("\n"),
    )
}

/// Download name for a template: lowercased, whitespace runs become `-`
pub fn archive_file_name(template_name: &str) -> String {
    static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").unwrap());
    format!("{}.zip", whitespace.replace_all(&template_name.to_lowercase(), "-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::{FAQ_SCRIPT, PADDING_CHECK_SCRIPT};
    use crate::template::Bucket;
    use pretty_assertions::assert_eq;
    use std::io::Read;

    fn template() -> Template {
        Template {
            id: "t".to_string(),
            name: "Spring Launch".to_string(),
            description: String::new(),
            thumbnail: String::new(),
            html_structure: "<img src=\"{{image.hero}}\"><h1>{{text.title}}</h1>".to_string(),
            css_structure: "h1{color:{{color.titleColor}}}".to_string(),
            customizable_fields: Customizations::default(),
            customization_map: None,
        }
    }

    fn customizations() -> Customizations {
        let mut c = Customizations::new();
        c.set(Bucket::Text, "title", "Hello");
        c.set(Bucket::Colors, "titleColor", "#123456");
        c.set(Bucket::Images, "hero", "https://cdn/hero.png");
        c.set(Bucket::Images, "logo", "https://cdn/logo.png");
        c
    }

    #[test]
    fn test_bundle_contents() {
        let bundle = ExportBundle::build(&template(), &customizations());
        assert_eq!(bundle.styles_css, "h1{color:#123456}");
        assert_eq!(
            bundle.template_html,
            format!(
                "<img src=\"https://cdn/hero.png\"><h1>Hello</h1>{}{}",
                FAQ_SCRIPT, PADDING_CHECK_SCRIPT
            )
        );
        assert!(bundle.combined_html.starts_with("<style>h1{color:#123456}</style>"));
        assert!(bundle.readme.starts_with("# Spring Launch\n"));
        assert!(bundle
            .readme
            .contains("used in this template:\n- https://cdn/hero.png\n- https://cdn/logo.png\n"));
    }

    #[test]
    fn test_zip_round_trip_entries() {
        let bundle = ExportBundle::build(&template(), &customizations());
        let bytes = bundle.to_zip_bytes().unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 4);

        let mut combined = String::new();
        archive
            .by_name(COMBINED_HTML)
            .unwrap()
            .read_to_string(&mut combined)
            .unwrap();
        assert_eq!(combined, bundle.combined_html);
        assert!(archive.by_name(README_MD).is_ok());
    }

    #[test]
    fn test_save_zip_leaves_only_the_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spring-launch.zip");
        let bundle = ExportBundle::build(&template(), &customizations());
        bundle.save_zip(&path).unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("spring-launch.zip")]);
        let archive = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
        assert_eq!(archive.len(), 4);
    }

    #[test]
    fn test_save_zip_into_missing_dir_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.zip");
        let bundle = ExportBundle::build(&template(), &customizations());
        assert!(matches!(
            bundle.save_zip(&path),
            Err(crate::error::TemplateError::Io(_))
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_archive_file_name() {
        assert_eq!(archive_file_name("Spring Launch"), "spring-launch.zip");
        assert_eq!(archive_file_name("My   Big\tPage"), "my-big-page.zip");
        assert_eq!(archive_file_name("Solo"), "solo.zip");
        assert_eq!(archive_file_name(" Edge "), "-edge-.zip");
    }
}
