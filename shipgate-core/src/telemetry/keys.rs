/// Span/Log attribute keys for carrier dispatch.
/// Keep these stable; changing them is a breaking change for dashboards.
pub const KEY_CARRIER: &str = "carrier.id";
pub const KEY_ENDPOINT: &str = "carrier.endpoint";

pub const KEY_LATENCY_MS: &str = "latency.ms";
pub const KEY_RESPONSE_BYTES: &str = "response.bytes";

/// Error-related (if applicable)
pub const KEY_ERROR_KIND: &str = "error.kind";
pub const KEY_ERROR_MESSAGE: &str = "error.message";
