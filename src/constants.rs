//! Application-wide constants.

/// The display name of the application.
pub const APP_NAME: &str = "Figma Content";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "figma-content";
