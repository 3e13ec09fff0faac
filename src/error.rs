//=========================================================================
// UI Errors
//=========================================================================
//
// Error taxonomy for the window subsystem.
//
// None of these escape the WindowService boundary: internal steps return
// `Result<_, UiError>`, the service logs the error and degrades to
// "feature unavailable" or "this window skipped".
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== UiError =============================================================

/// Failures raised while configuring, registering or navigating windows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UiError {
    /// No configuration was authored under the given key.
    ///
    /// Not fatal: the subsystem simply stays disabled.
    #[error("no UI configuration found under key '{key}'")]
    ConfigMissing { key: String },

    /// Configuration text exists but could not be parsed.
    #[error("UI configuration '{key}' could not be parsed: {message}")]
    ConfigParse { key: String, message: String },

    /// The host could not provide a root surface for windows.
    #[error("root surface could not be created, UI system cannot initialize")]
    RootSurfaceUnavailable,

    /// A window of the same type and id is already registered.
    #[error("a window of type '{type_name}' with id '{id}' is already registered")]
    DuplicateWindow { type_name: &'static str, id: String },

    /// The window's one-time setup reported a failure.
    #[error("window of type '{type_name}' failed to set up: {message}")]
    WindowSetup {
        type_name: &'static str,
        message: String,
    },

    /// The window's one-time setup panicked.
    #[error("window of type '{type_name}' panicked during registration")]
    RegistrationPanicked { type_name: &'static str },

    /// No registered window matches the requested target.
    #[error("no registered window matches '{0}'")]
    WindowNotFound(String),

    /// The operation requires an initialized service.
    #[error("window service is not initialized")]
    NotInitialized,
}

impl UiError {
    /// Convenience constructor for view setup failures.
    pub fn setup(type_name: &'static str, message: impl Into<String>) -> Self {
        Self::WindowSetup {
            type_name,
            message: message.into(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
