use serde::{Deserialize, Serialize};

/// Carrier-agnostic shipment description accepted at the system boundary.
/// Shared read-only across every concurrent carrier job of one dispatch;
/// nothing downstream mutates it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ShipmentRequest {
    pub weight: Weight,
    pub shipper: Party,
    pub consignee: Party,
    pub dimensions: Dimensions,
    pub packages: Vec<Package>,
    pub customs_items: Vec<CustomsItem>,
    pub declared_value: Money,
    pub service_type: String,
    pub special_notes: String,
    pub is_cod: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod_amount: Option<Money>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Weight {
    pub value: f64,
    /// "Grams" or "KG"
    pub unit: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Party {
    pub contact: Contact,
    pub address: Address,
    pub reference: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub mobile: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub country_code: String,
    pub zip_code: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub unit: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Package {
    pub dimensions: Dimensions,
    pub weight: f64,
    pub quantity: u32,
    pub value: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomsItem {
    pub description: String,
    pub hs_code: String,
    pub quantity: u32,
    pub weight: f64,
    pub value: f64,
    pub country_of_origin: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Money {
    pub amount: f64,
    pub currency: String,
}

/// Result of one carrier job. Exactly one is produced per executed job,
/// whichever stage failed; `error` stays empty on full success.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchOutcome {
    pub endpoint: String,
    /// Raw body returned by the carrier (lossy UTF-8), or the diagnostic
    /// body of a failed transport call. May be empty.
    pub raw_response: String,
    #[serde(default)]
    pub error: String,
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}

/// Aggregate of one dispatch, ordered by completion (not request order).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DispatchReport {
    pub responses: Vec<DispatchOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_names_are_camel_case() {
        let req = ShipmentRequest {
            weight: Weight {
                value: 10.5,
                unit: "KG".into(),
            },
            service_type: "EXP".into(),
            is_cod: true,
            cod_amount: Some(Money {
                amount: 12.5,
                currency: "USD".into(),
            }),
            ..Default::default()
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"serviceType\":\"EXP\""));
        assert!(json.contains("\"isCod\":true"));
        assert!(json.contains("\"codAmount\""));
        assert!(json.contains("\"customsItems\""));
    }

    #[test]
    fn cod_amount_is_omitted_when_absent() {
        let req = ShipmentRequest::default();
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("codAmount"));
    }

    #[test]
    fn request_deserializes_from_the_canonical_contract() {
        let json = r#"{
          "weight": {"value": 10.5, "unit": "KG"},
          "shipper": {
            "contact": {"name":"Ana","companyName":"Acme","email":"a@acme.test","phone":"1","mobile":"2"},
            "address": {"line1":"Main 1","line2":"","city":"Cluj","state":"CJ","countryCode":"RO","zipCode":"4001"},
            "reference": "SH-1"
          },
          "consignee": {
            "contact": {"name":"Bob","companyName":"","email":"","phone":"","mobile":""},
            "address": {"line1":"High 2","line2":"","city":"Dubai","state":"","countryCode":"AE","zipCode":""},
            "reference": ""
          },
          "dimensions": {"length": 10.0, "width": 20.0, "height": 30.0, "unit": "CM"},
          "packages": [],
          "customsItems": [],
          "declaredValue": {"amount": 100.0, "currency": "USD"},
          "serviceType": "EXP",
          "specialNotes": "",
          "isCod": false
        }"#;
        let req: ShipmentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.weight.value, 10.5);
        assert_eq!(req.shipper.address.country_code, "RO");
        assert!(req.cod_amount.is_none());
    }

    #[test]
    fn missing_fields_default_instead_of_failing() {
        let req: ShipmentRequest =
            serde_json::from_str(r#"{"weight": {"value": 10.5, "unit": "KG"}}"#).unwrap();
        assert_eq!(req.weight.value, 10.5);
        assert!(req.packages.is_empty());
        assert!(!req.is_cod);
        assert_eq!(req.shipper.contact.name, "");
    }

    #[test]
    fn outcome_success_has_empty_error() {
        let out = DispatchOutcome {
            endpoint: "https://carrier.test/v1/ship".into(),
            raw_response: r#"{"trackingId":"T1"}"#.into(),
            error: String::new(),
        };
        assert!(out.is_success());
        let json = serde_json::to_string(&out).unwrap();
        assert!(json.contains("\"rawResponse\""));
        assert!(json.contains("\"error\":\"\""));
    }
}
