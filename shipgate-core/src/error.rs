use thiserror::Error;

/// Core error type for shipgate.
/// Internally, modules can use `anyhow::Result<T>` for convenience,
/// but public boundaries should expose `CoreResult<T>` with this error.
#[derive(Debug, Error)]
pub enum ShipgateError {
    /// The caller named a carrier that is not present in the registry.
    /// This is the only error that aborts a dispatch as a whole; everything
    /// downstream of resolution is captured per-outcome instead.
    #[error("unsupported carrier {carrier}")]
    CarrierUnsupported { carrier: String },

    #[error("failed to save shipment record: {0}")]
    Storage(#[from] sqlx::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShipgateError {
    pub fn unsupported(carrier: impl Into<String>) -> Self {
        Self::CarrierUnsupported {
            carrier: carrier.into(),
        }
    }
}

pub type CoreResult<T> = std::result::Result<T, ShipgateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_carrier_message_names_the_carrier() {
        let err = ShipgateError::unsupported("dhl");
        assert_eq!(err.to_string(), "unsupported carrier dhl");
    }
}
