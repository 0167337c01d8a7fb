//! Editing session state and the store that holds one session per editor.

use dashmap::DashMap;
use uuid::Uuid;

use codez_template::controls::find_element;
use codez_template::{
    apply_property, assemble, derive_map, Bucket, CustomizableElement, Customizations, Edit,
    ElementProperty, Template,
};

use crate::error::{EditorError, EditorResult};

/// Working state of one editor: the selected template, its customizations,
/// the derived element map and the selection.
///
/// Every mutation bumps `revision`; the final code is memoized per revision.
#[derive(Debug, Default)]
pub struct EditorSession {
    template: Option<Template>,
    customizations: Customizations,
    element_map: Vec<CustomizableElement>,
    selected_element: Option<String>,
    revision: u64,
    code_cache: Option<(u64, String)>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a template and seed customizations from its defaults
    pub fn select_template(&mut self, template: Template) {
        tracing::debug!(template = %template.id, "template selected");
        self.customizations = template.default_customizations();
        self.element_map = derive_map(&template);
        self.template = Some(template);
        self.selected_element = None;
        self.touch();
    }

    pub fn clear_template(&mut self) {
        self.template = None;
        self.customizations = Customizations::new();
        self.element_map.clear();
        self.selected_element = None;
        self.touch();
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    pub fn customizations(&self) -> &Customizations {
        &self.customizations
    }

    pub fn element_map(&self) -> &[CustomizableElement] {
        &self.element_map
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn update(&mut self, bucket: Bucket, key: &str, value: impl Into<String>) {
        self.customizations.set(bucket, key, value);
        self.touch();
    }

    pub fn update_text(&mut self, key: &str, value: impl Into<String>) {
        self.update(Bucket::Text, key, value);
    }

    pub fn update_color(&mut self, key: &str, value: impl Into<String>) {
        self.update(Bucket::Colors, key, value);
    }

    pub fn update_image(&mut self, key: &str, value: impl Into<String>) {
        self.update(Bucket::Images, key, value);
    }

    /// Restore every value to the template defaults
    pub fn reset_customizations(&mut self) {
        self.customizations = self
            .template
            .as_ref()
            .map(Template::default_customizations)
            .unwrap_or_default();
        self.touch();
    }

    /// Select an element of the map by id; `None` clears the selection
    pub fn select_element(&mut self, id: Option<&str>) -> EditorResult<()> {
        match id {
            None => self.selected_element = None,
            Some(id) => {
                if find_element(&self.element_map, id).is_none() {
                    return Err(EditorError::ElementNotFound { id: id.to_string() });
                }
                self.selected_element = Some(id.to_string());
            }
        }
        Ok(())
    }

    pub fn selected_element(&self) -> Option<&CustomizableElement> {
        let id = self.selected_element.as_deref()?;
        find_element(&self.element_map, id)
    }

    /// Write a property of the selected element. `Ok(None)` when the
    /// property has no backing storage.
    pub fn apply_property(
        &mut self,
        property: ElementProperty,
        value: &str,
    ) -> EditorResult<Option<Edit>> {
        if self.template.is_none() {
            return Err(EditorError::NoTemplateSelected);
        }
        let element = self
            .selected_element()
            .cloned()
            .ok_or_else(|| EditorError::ElementNotFound {
                id: self.selected_element.clone().unwrap_or_default(),
            })?;
        let edit = apply_property(&element, property, value, &mut self.customizations);
        if edit.is_some() {
            self.touch();
        }
        Ok(edit)
    }

    /// Assembled code for the current state, or `None` without a template
    pub fn final_code(&mut self) -> Option<&str> {
        let template = self.template.as_ref()?;
        let stale = !matches!(&self.code_cache, Some((rev, _)) if *rev == self.revision);
        if stale {
            let code = assemble(template, &self.customizations);
            self.code_cache = Some((self.revision, code));
        }
        self.code_cache.as_ref().map(|(_, code)| code.as_str())
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

/// Sessions by id
pub type SessionStore = DashMap<String, EditorSession>;

pub fn new_session_store() -> SessionStore {
    DashMap::new()
}

/// Create an empty session and return its id
pub fn open_session(store: &SessionStore) -> String {
    let id = Uuid::new_v4().to_string();
    store.insert(id.clone(), EditorSession::new());
    tracing::debug!(session = %id, "session opened");
    id
}

/// Run `f` against a session
pub fn with_session<R>(
    store: &SessionStore,
    session_id: &str,
    f: impl FnOnce(&mut EditorSession) -> R,
) -> EditorResult<R> {
    let mut session = store
        .get_mut(session_id)
        .ok_or_else(|| EditorError::SessionNotFound {
            id: session_id.to_string(),
        })?;
    Ok(f(&mut session))
}

/// Drop a session; returns whether it existed
pub fn close_session(store: &SessionStore, session_id: &str) -> bool {
    store.remove(session_id).is_some()
}
