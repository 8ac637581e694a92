//! # WhiteCore Plugin System Errors
//!
//! [`PluginSystemError`] covers registering data plugins and failures raised
//! inside plugin calls, including panics.
#[derive(Debug, thiserror::Error)]
pub enum PluginSystemError {
    #[error("Plugin registration error for '{plugin_id}': {message}")]
    RegistrationError {
        plugin_id: String,
        message: String,
    },

    #[error("Plugin initialization error for '{plugin_id}': {message}")]
    InitializationError {
        plugin_id: String,
        message: String,
    },

    #[error("Plugin '{plugin_id}' panicked during {operation}: {message}")]
    Panicked {
        plugin_id: String,
        operation: String,
        message: String,
    },
}
