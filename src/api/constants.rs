//! API module constants

/// Access token cookie name, shared with the scoring platform.
pub const ACCESS_COOKIE_NAME: &str = "ctfa_access";
