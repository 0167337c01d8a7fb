//! One-shot exports with transient user notifications.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use codez_template::{archive_file_name, clipboard_payload, ExportBundle};

use crate::config::{EditorConfig, NOTIFICATION_TIMEOUT};
use crate::error::{EditorError, EditorResult};
use crate::session::EditorSession;

pub const COPY_SUCCESS: &str = "Code copied to clipboard!";
pub const COPY_FAILURE: &str = "Failed to copy code. Please try again.";
pub const DOWNLOAD_SUCCESS: &str = "Template downloaded as ZIP file!";
pub const DOWNLOAD_FAILURE: &str = "Failed to download template. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub timeout: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            timeout: NOTIFICATION_TIMEOUT,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            timeout: NOTIFICATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_expired(&self, shown_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(shown_at) >= self.timeout
    }
}

/// System clipboard, provided by the host
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String>;
}

/// Copy the assembled code.
///
/// A clipboard failure is reported through the returned notification; the
/// only error is having no template selected.
pub fn copy_to_clipboard(
    session: &EditorSession,
    clipboard: &mut impl Clipboard,
    config: &EditorConfig,
) -> EditorResult<Notification> {
    let template = session.template().ok_or(EditorError::NoTemplateSelected)?;
    let payload = clipboard_payload(template, session.customizations());
    let notification = match clipboard.write_text(&payload) {
        Ok(()) => Notification::success(COPY_SUCCESS),
        Err(err) => {
            tracing::error!(error = %err, "clipboard write failed");
            Notification::error(COPY_FAILURE)
        }
    };
    Ok(notification.with_timeout(config.notification_timeout()))
}

/// Write the export archive into `out_dir`. Returns the notification and,
/// on success, the archive path.
pub fn download_zip(
    session: &EditorSession,
    out_dir: &Path,
    config: &EditorConfig,
) -> EditorResult<(Notification, Option<PathBuf>)> {
    let template = session.template().ok_or(EditorError::NoTemplateSelected)?;
    let bundle = ExportBundle::build(template, session.customizations());
    let path = out_dir.join(archive_file_name(&template.name));
    let (notification, saved) = match bundle.save_zip(&path) {
        Ok(()) => (Notification::success(DOWNLOAD_SUCCESS), Some(path)),
        Err(err) => {
            tracing::error!(error = %err, "export failed");
            (Notification::error(DOWNLOAD_FAILURE), None)
        }
    };
    Ok((notification.with_timeout(config.notification_timeout()), saved))
}
