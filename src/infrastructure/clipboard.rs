use arboard::Clipboard;

use super::files::ReportError;

/// Puts `text` on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), ReportError> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
