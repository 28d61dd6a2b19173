//! Effect handlers that run off the event loop thread.

use crate::common::{Clipboard, ClipboardError};

/// Writes `text` to the system clipboard on the blocking pool.
pub async fn copy_system(text: String) -> Result<(), ClipboardError> {
    match tokio::task::spawn_blocking(move || Clipboard::copy_system(&text)).await {
        Ok(result) => result,
        Err(err) => Err(ClipboardError::Aborted(err.to_string())),
    }
}
