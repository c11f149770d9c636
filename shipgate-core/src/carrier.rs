use crate::model::ShipmentRequest;

/// Capability of one third-party carrier integration: reshape the canonical
/// request into the carrier's wire payload and name the endpoint it goes to.
///
/// Implementations must be pure and total. A carrier that cannot represent
/// part of the canonical request degrades gracefully (omits or defaults the
/// field) rather than failing; there is no error path here.
pub trait Carrier: Send + Sync {
    fn name(&self) -> &str;

    /// Destination address the payload is POSTed to.
    fn endpoint(&self) -> &str;

    /// Provider-specific byte payload for the given shipment.
    fn payload(&self, req: &ShipmentRequest) -> Vec<u8>;
}

/// A canned carrier that echoes a fixed payload.
/// Useful for tests or as a placeholder.
pub struct NullCarrier;

impl Carrier for NullCarrier {
    fn name(&self) -> &str {
        "null"
    }

    fn endpoint(&self) -> &str {
        "null://discard"
    }

    fn payload(&self, req: &ShipmentRequest) -> Vec<u8> {
        format!(
            "{{\"carrier\":\"null\",\"weight\":{}}}",
            req.weight.value
        )
        .into_bytes()
    }
}
