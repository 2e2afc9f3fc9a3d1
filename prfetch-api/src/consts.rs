//! Constants for the prfetch-api client

/// User-Agent header value sent with every request
pub const USER_AGENT: &str = concat!("prfetch/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Accept header value for listing requests
pub const ACCEPT: &str = "application/json";

/// Accept header value for diff downloads
pub const ACCEPT_DIFF: &str = "text/plain";

/// Header GitLab reads private tokens from
pub const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";
