//! Live preview: wraps the final code into an isolated document, writes it to
//! a surface and brings the FAQ interaction up once the document has loaded.

use codez_template::FAQ_INIT_HOOK;

use crate::config::{EditorConfig, FIT_MARGIN};
use crate::error::PreviewError;

pub const CONTENT_WRAPPER_CLASS: &str = "content-wrapper";

const PREVIEW_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<style>
* {
  transition: all 0.2s ease-in-out;
}
body {
  opacity: 1;
  transition: opacity 0.25s ease-in-out;
  margin: 0;
  padding: 0;
  overflow: hidden;
  display: flex;
  justify-content: center;
  align-items: center;
  width: 100%;
  height: 100vh;
}
body.loading {
  opacity: 0.7;
}
.content-wrapper {
  transform: scale(0.9);
  transform-origin: center center;
  max-width: 100%;
  max-height: 100%;
}
::-webkit-scrollbar {
  display: none;
}
* {
  -ms-overflow-style: none;
  scrollbar-width: none;
}
</style>
</head>
<body class="loading">
<div class="content-wrapper">
"#;

const PREVIEW_TAIL: &str = r#"
</div>
<script>
window.addEventListener('load', function() {
  document.body.classList.remove('loading');
  const content = document.querySelector('.content-wrapper');
  const contentWidth = content.scrollWidth;
  const contentHeight = content.scrollHeight;
  const windowWidth = window.innerWidth;
  const windowHeight = window.innerHeight;
  if (contentWidth > windowWidth || contentHeight > windowHeight) {
    const scale = Math.min(windowWidth / contentWidth * 0.9, windowHeight / contentHeight * 0.9);
    content.style.transform = 'scale(' + scale + ')';
  }
});
</script>
</body>
</html>
"#;

/// Full preview document around assembled code
pub fn preview_document(code: &str) -> String {
    let mut doc = String::with_capacity(PREVIEW_HEAD.len() + code.len() + PREVIEW_TAIL.len());
    doc.push_str(PREVIEW_HEAD);
    doc.push_str(code);
    doc.push_str(PREVIEW_TAIL);
    doc
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Scrollable content size against the visible viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub content: Size,
    pub viewport: Size,
}

/// Scale that fits `content` into `viewport`: 1.0 when it already fits,
/// otherwise the smaller axis ratio times `margin`.
pub fn fit_scale(content: Size, viewport: Size, margin: f64) -> f64 {
    if content.width <= viewport.width && content.height <= viewport.height {
        return 1.0;
    }
    let by_width = viewport.width / content.width;
    let by_height = viewport.height / content.height;
    by_width.min(by_height) * margin
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    Invoked,
    Missing,
    Failed(String),
}

/// An isolated rendering surface (iframe, webview, headless document).
pub trait PreviewSurface {
    /// Replace the whole document
    fn write_document(&mut self, document: &str) -> Result<(), PreviewError>;

    /// Call a global function defined by the document
    fn invoke_hook(&mut self, name: &str) -> HookOutcome;

    /// Attach the host-side accordion to the document's FAQ items.
    /// Returns the number of items wired.
    fn install_accordion(&mut self) -> Result<usize, PreviewError>;

    fn measure(&self) -> Option<Measurement>;

    fn set_content_scale(&mut self, scale: f64) -> Result<(), PreviewError>;
}

/// A document to place on the surface, tagged with the render it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCommand {
    pub generation: u64,
    pub document: String,
}

/// Which implementation drives the FAQ items of the loaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccordionPath {
    Embedded,
    HostFallback { items: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewStatus {
    Idle,
    Loading,
    Ready { accordion: AccordionPath, scale: f64 },
    Error(PreviewError),
}

pub struct PreviewRenderer<S> {
    surface: Option<S>,
    generation: u64,
    status: PreviewStatus,
    fit_margin: f64,
}

impl<S: PreviewSurface> PreviewRenderer<S> {
    pub fn new(surface: Option<S>) -> Self {
        Self::with_margin(surface, FIT_MARGIN)
    }

    /// Renderer using the fit margin from `config`
    pub fn from_config(surface: Option<S>, config: &EditorConfig) -> Self {
        Self::with_margin(surface, config.fit_margin)
    }

    pub fn with_margin(surface: Option<S>, fit_margin: f64) -> Self {
        Self {
            surface,
            generation: 0,
            status: PreviewStatus::Idle,
            fit_margin,
        }
    }

    pub fn status(&self) -> &PreviewStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == PreviewStatus::Loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn attach(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    /// Write a fresh preview document for `code`. Returns the command that
    /// was applied; its generation must be passed back to `on_load`.
    pub fn render(&mut self, code: &str) -> Result<RenderCommand, PreviewError> {
        self.generation += 1;
        let command = RenderCommand {
            generation: self.generation,
            document: preview_document(code),
        };
        self.status = PreviewStatus::Loading;

        let Some(surface) = self.surface.as_mut() else {
            return Err(self.fail(PreviewError::SurfaceUnavailable));
        };
        if let Err(err) = surface.write_document(&command.document) {
            return Err(self.fail(err));
        }
        tracing::debug!(
            generation = command.generation,
            bytes = command.document.len(),
            "preview written"
        );
        Ok(command)
    }

    /// The surface finished loading the document of `generation`.
    ///
    /// Loads of anything but the latest render are ignored and return
    /// `Ok(false)`.
    pub fn on_load(&mut self, generation: u64) -> Result<bool, PreviewError> {
        if generation != self.generation {
            tracing::debug!(generation, latest = self.generation, "stale preview load ignored");
            return Ok(false);
        }
        let fit_margin = self.fit_margin;
        let Some(surface) = self.surface.as_mut() else {
            return Err(self.fail(PreviewError::SurfaceUnavailable));
        };

        let accordion = match surface.invoke_hook(FAQ_INIT_HOOK) {
            HookOutcome::Invoked => AccordionPath::Embedded,
            outcome => {
                if let HookOutcome::Failed(reason) = &outcome {
                    tracing::warn!(%reason, "FAQ hook failed, using host accordion");
                } else {
                    tracing::debug!("FAQ hook missing, using host accordion");
                }
                match surface.install_accordion() {
                    Ok(items) => AccordionPath::HostFallback { items },
                    Err(err) => return Err(self.fail(err)),
                }
            }
        };

        let scale = surface
            .measure()
            .map(|m| fit_scale(m.content, m.viewport, fit_margin))
            .unwrap_or(1.0);
        if let Err(err) = surface.set_content_scale(scale) {
            return Err(self.fail(err));
        }

        self.status = PreviewStatus::Ready { accordion, scale };
        Ok(true)
    }

    fn fail(&mut self, err: PreviewError) -> PreviewError {
        tracing::error!(error = %err, "preview failed");
        self.status = PreviewStatus::Error(err.clone());
        err
    }
}
