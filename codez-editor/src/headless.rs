//! In-memory preview surface for server-side previews and tests.

use regex::Regex;
use std::sync::OnceLock;

use crate::accordion::{Accordion, FaqItem};
use crate::error::PreviewError;
use crate::preview::{HookOutcome, Measurement, PreviewSurface};

pub const FAQ_ITEM_CLASS: &str = "faq-question-container";
pub const FAQ_DESCRIPTION_CLASS: &str = "faq-description";
pub const FAQ_ICON_CLASS: &str = "toggle-icon";

/// Which accordion is wired to the current document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Wiring {
    #[default]
    None,
    Embedded,
    Host,
}

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    document: Option<String>,
    writes: usize,
    accordion: Accordion,
    wiring: Wiring,
    hook_failure: Option<String>,
    measurement: Option<Measurement>,
    scale: Option<f64>,
    detached: bool,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report this size on every `measure`
    pub fn with_measurement(mut self, measurement: Measurement) -> Self {
        self.measurement = Some(measurement);
        self
    }

    /// Make the document's hook throw `reason` when invoked
    pub fn with_hook_failure(mut self, reason: impl Into<String>) -> Self {
        self.hook_failure = Some(reason.into());
        self
    }

    /// Simulate a surface whose document can no longer be reached
    pub fn detach(&mut self) {
        self.detached = true;
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    pub fn wiring(&self) -> Wiring {
        self.wiring
    }

    pub fn accordion(&self) -> &Accordion {
        &self.accordion
    }

    /// Click the FAQ item at `index`. Nothing happens until an accordion
    /// is wired.
    pub fn click_faq(&mut self, index: usize) -> bool {
        match self.wiring() {
            Wiring::None => false,
            Wiring::Embedded | Wiring::Host => self.accordion.toggle(index),
        }
    }
}

impl PreviewSurface for HeadlessSurface {
    fn write_document(&mut self, document: &str) -> Result<(), PreviewError> {
        if self.detached {
            return Err(PreviewError::DocumentInaccessible);
        }
        self.accordion = scan_faq_items(document);
        self.document = Some(document.to_string());
        self.wiring = Wiring::None;
        self.scale = None;
        self.writes += 1;
        Ok(())
    }

    fn invoke_hook(&mut self, name: &str) -> HookOutcome {
        let defined = self
            .document
            .as_deref()
            .is_some_and(|doc| doc.contains(&format!("function {}(", name)));
        if !defined {
            return HookOutcome::Missing;
        }
        if let Some(reason) = &self.hook_failure {
            return HookOutcome::Failed(reason.clone());
        }
        self.wiring = Wiring::Embedded;
        HookOutcome::Invoked
    }

    fn install_accordion(&mut self) -> Result<usize, PreviewError> {
        if self.document.is_none() {
            return Err(PreviewError::DocumentInaccessible);
        }
        self.wiring = Wiring::Host;
        Ok(self.accordion.len())
    }

    fn measure(&self) -> Option<Measurement> {
        self.measurement
    }

    fn set_content_scale(&mut self, scale: f64) -> Result<(), PreviewError> {
        if self.detached {
            return Err(PreviewError::DocumentInaccessible);
        }
        self.scale = Some(scale);
        Ok(())
    }
}

/// Build the accordion from class attributes in document order.
///
/// Description and icon classes belong to the most recent FAQ item.
pub fn scan_faq_items(document: &str) -> Accordion {
    static CLASS_ATTR_REGEX: OnceLock<Regex> = OnceLock::new();
    let class_attr =
        CLASS_ATTR_REGEX.get_or_init(|| Regex::new(r#"class\s*=\s*["']([^"']*)["']"#).unwrap());

    let mut items: Vec<FaqItem> = Vec::new();
    for caps in class_attr.captures_iter(document) {
        let classes: Vec<&str> = caps[1].split_whitespace().collect();
        if classes.contains(&FAQ_ITEM_CLASS) {
            items.push(FaqItem::new(false, false));
        }
        if let Some(item) = items.last_mut() {
            if classes.contains(&FAQ_DESCRIPTION_CLASS) {
                item.has_description = true;
            }
            if classes.contains(&FAQ_ICON_CLASS) {
                item.has_icon = true;
            }
        }
    }
    Accordion::new(items)
}
