//! Host-side model of the FAQ toggle behaviour.
//!
//! Mirrors what the embedded FAQ script does to `.faq-question-container`
//! items so a surface can provide the same interaction when the document's
//! own hook is unavailable.

/// Inline styles written to an item's `.faq-description`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionStyle {
    pub max_height: &'static str,
    pub opacity: &'static str,
    pub padding: &'static str,
}

pub const OPEN_STYLE: DescriptionStyle = DescriptionStyle {
    max_height: "1000px",
    opacity: "1",
    padding: "10px",
};

pub const CLOSED_STYLE: DescriptionStyle = DescriptionStyle {
    max_height: "0",
    opacity: "0",
    padding: "0 10px",
};

pub const OPEN_ICON: &str = "x";
pub const CLOSED_ICON: &str = "+";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqItem {
    pub active: bool,
    pub has_description: bool,
    pub has_icon: bool,
    /// `None` until the item is first toggled; the template's CSS applies
    pub style: Option<DescriptionStyle>,
    pub icon: Option<&'static str>,
}

impl FaqItem {
    pub fn new(has_description: bool, has_icon: bool) -> Self {
        Self {
            has_description,
            has_icon,
            ..Self::default()
        }
    }

    fn open(&mut self) {
        self.active = true;
        if self.has_description {
            self.style = Some(OPEN_STYLE);
        }
        if self.has_icon {
            self.icon = Some(OPEN_ICON);
        }
    }

    fn close(&mut self) {
        self.active = false;
        if self.has_description {
            self.style = Some(CLOSED_STYLE);
        }
        if self.has_icon {
            self.icon = Some(CLOSED_ICON);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accordion {
    items: Vec<FaqItem>,
}

impl Accordion {
    pub fn new(items: Vec<FaqItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[FaqItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Click on item `index`. Returns false when there is no such item.
    pub fn toggle(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        for (i, item) in self.items.iter_mut().enumerate() {
            if i != index && item.active {
                item.close();
            }
        }
        let item = &mut self.items[index];
        if item.active {
            item.close();
        } else {
            item.open();
        }
        true
    }

    pub fn open_index(&self) -> Option<usize> {
        self.items.iter().position(|item| item.active)
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| item.active).count()
    }
}
