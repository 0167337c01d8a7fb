//! # codez editor
//!
//! Interactive side of template customization: the per-user editing
//! session, the debounced live preview with its FAQ accordion, the inline
//! editing overlay and one-shot exports.
//!
//! Rendering surfaces and the page hosting the overlay are supplied by the
//! embedding application through [`PreviewSurface`] and [`OverlayHost`];
//! [`HeadlessSurface`] is an in-memory surface for server-side use and tests.

pub mod accordion;
pub mod config;
pub mod debounce;
pub mod error;
pub mod headless;
pub mod notify;
pub mod overlay;
pub mod preview;
pub mod session;
pub mod worker;

pub use accordion::{Accordion, FaqItem};
pub use config::{EditorConfig, DEBOUNCE_WINDOW, NOTIFICATION_TIMEOUT};
pub use debounce::Debouncer;
pub use error::{EditorError, EditorResult, PreviewError};
pub use headless::HeadlessSurface;
pub use notify::{copy_to_clipboard, download_zip, Clipboard, Notification, NotificationKind};
pub use overlay::{
    render_overlay_markup, ClickTarget, InlineEditor, OverlayCommand, OverlayEvent, OverlayHost,
};
pub use preview::{
    fit_scale, preview_document, AccordionPath, HookOutcome, Measurement, PreviewRenderer,
    PreviewStatus, PreviewSurface, RenderCommand, Size,
};
pub use session::{
    close_session, new_session_store, open_session, with_session, EditorSession, SessionStore,
};
pub use worker::{spawn_preview_worker, spawn_preview_worker_with_config, PreviewWorker};
