//! Server constants.
//!
//! Centralizes hardcoded values for easier configuration and documentation.

/// Default HTTP port when neither `PORT` nor `--port` is given.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address. The gateway fronts remote callers (automation
/// platforms, webhooks), so it listens on all interfaces by default.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Request body cap. Appends are line-oriented text; anything bigger than
/// this is a caller bug.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Header carrying the caller's gateway key.
pub const API_KEY_HEADER: &str = "x-api-key";
