//! Platform clipboard via `arboard`.

use arboard::Clipboard;

use super::ClipboardBackend;
use crate::error::ClipboardError;

/// The desktop clipboard.
///
/// The platform handle is opened lazily on first write and kept afterwards;
/// a failed open is retried on the next write.
///
/// On X11 and Wayland the owning process serves the clipboard contents, so
/// they vanish when it exits. Short-lived processes use
/// [`SystemClipboard::one_shot`], which blocks in `write_text` until another
/// owner (usually a clipboard manager) takes the contents over.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<Clipboard>,
    serve_until_replaced: bool,
}

impl SystemClipboard {
    /// Create a backend for a long-lived process, without touching the
    /// platform yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend for a process that exits right after copying.
    #[must_use]
    pub fn one_shot() -> Self {
        Self {
            handle: None,
            serve_until_replaced: true,
        }
    }

    /// Whether writes wait for the contents to be taken over.
    #[must_use]
    pub const fn serves_until_replaced(&self) -> bool {
        self.serve_until_replaced
    }

    fn handle(&mut self) -> Result<&mut Clipboard, ClipboardError> {
        if self.handle.is_none() {
            let clipboard = Clipboard::new().map_err(map_error)?;
            self.handle = Some(clipboard);
        }
        self.handle
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard handle missing".to_string()))
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.handle.is_some())
            .field("serve_until_replaced", &self.serve_until_replaced)
            .finish()
    }
}

impl ClipboardBackend for SystemClipboard {
    #[cfg(target_os = "linux")]
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        use arboard::SetExtLinux;

        let serve = self.serve_until_replaced;
        let handle = self.handle()?;
        if serve {
            tracing::debug!("serving clipboard until another owner takes it");
            handle.set().wait().text(text.to_string()).map_err(map_error)
        } else {
            handle.set_text(text.to_string()).map_err(map_error)
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.handle()?.set_text(text.to_string()).map_err(map_error)
    }
}

fn map_error(err: arboard::Error) -> ClipboardError {
    match err {
        arboard::Error::ClipboardNotSupported => {
            ClipboardError::Unavailable("clipboard not supported on this platform".to_string())
        }
        arboard::Error::ClipboardOccupied => {
            ClipboardError::Denied("clipboard is held by another process".to_string())
        }
        other => ClipboardError::Backend(other.to_string()),
    }
}
