//! Blocking browser dialogs

/// Show a message; validation errors go through here
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
