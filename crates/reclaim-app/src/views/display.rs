//! Display helpers shared by frontends.

/// Suffix appended to truncated messages
pub const ELLIPSIS: &str = "...";

/// Submit button label while a write is in flight
pub const BUSY_BUTTON_LABEL: &str = "Please wait...";

/// Submit button label when idle
pub const IDLE_BUTTON_LABEL: &str = "Add Entry";

/// Bound a message to `max_len` characters, appending [`ELLIPSIS`] when cut.
///
/// Counts `char`s, so multi-byte text is never split mid-character.
pub fn truncate(message: &str, max_len: usize) -> String {
    match message.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &message[..cut]),
        None => message.to_string(),
    }
}

/// Submit button label for the current busy flag
pub fn submit_label(is_busy: bool) -> &'static str {
    if is_busy {
        BUSY_BUTTON_LABEL
    } else {
        IDLE_BUTTON_LABEL
    }
}
