/// Application name
pub const APP_NAME: &str = "Painel";

/// Name of the cookie carrying the anonymous identity token
pub const IDENTITY_COOKIE: &str = "user_id";

/// Length of a canonical hyphenated UUID (8-4-4-4-12)
pub const CANONICAL_ID_LEN: usize = 36;

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 3050;

/// Default identity cookie lifetime (one year)
pub const DEFAULT_COOKIE_MAX_AGE_SECS: u64 = 365 * 24 * 60 * 60;
