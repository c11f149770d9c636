use serde::{Deserialize, Serialize};

/// Carrier-agnostic record of one executed dispatch job.
/// Exactly one is emitted per job that ran (skipped jobs emit nothing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DispatchTrace {
    /// Carrier identifier, e.g. "swift", "xps".
    pub carrier: String,

    /// Destination the payload was sent to.
    pub endpoint: String,

    /// Elapsed transport + persistence time in milliseconds.
    pub latency_ms: Option<u128>,

    /// Size of the raw carrier response (or diagnostic body) in bytes.
    pub response_bytes: Option<usize>,

    /// Failing stage when the job did not fully succeed: "transport" or "storage".
    pub error_kind: Option<String>,
    pub error_message: Option<String>,
}

impl DispatchTrace {
    pub fn for_job(carrier: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            carrier: carrier.into(),
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn set_latency_ms(mut self, ms: u128) -> Self {
        self.latency_ms = Some(ms);
        self
    }

    pub fn set_response_bytes(mut self, n: usize) -> Self {
        self.response_bytes = Some(n);
        self
    }

    pub fn set_error(mut self, kind: impl Into<String>, message: impl Into<String>) -> Self {
        self.error_kind = Some(kind.into());
        self.error_message = Some(message.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.error_kind.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_the_error_stage() {
        let trace = DispatchTrace::for_job("swift", "http://localhost:3030/v1/swift")
            .set_latency_ms(12)
            .set_error("transport", "connection refused");
        assert!(!trace.is_success());
        assert_eq!(trace.error_kind.as_deref(), Some("transport"));
        assert_eq!(trace.latency_ms, Some(12));
    }
}
