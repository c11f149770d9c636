use serde::Serialize;

use crate::carrier::Carrier;
use crate::model::ShipmentRequest;

/// Swift Logistics shipment API adapter.
///
/// Pure canonical → wire reshaping; the account number comes from config.
#[derive(Debug, Clone)]
pub struct SwiftCarrier {
    endpoint: String,
    account_number: i64,
}

impl SwiftCarrier {
    pub fn new(endpoint: String, account_number: i64) -> Self {
        Self {
            endpoint,
            account_number,
        }
    }
}

// ===== Swift wire types =====

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SwiftRequest<'a> {
    weight: SwiftWeight<'a>,
    shipper: SwiftParty<'a>,
    consignee: SwiftParty<'a>,
    dimensions: SwiftDimensions<'a>,
    account: SwiftAccount,
    product_code: &'a str,
    service_type: &'a str,
    print_type: &'a str,
    is_insured: bool,
    customs_declarations: Vec<SwiftCustomsDeclaration<'a>>,
    declared_value: SwiftMoney<'a>,
    number_of_pieces: usize,
    reference_number1: &'a str,
    special_notes: &'a str,
    remarks: &'a str,
    delivery_type: &'a str,
    content_type: &'a str,
    is_cod: bool,
}

#[derive(Serialize)]
struct SwiftWeight<'a> {
    value: f64,
    unit: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SwiftParty<'a> {
    contact: SwiftContact<'a>,
    address: SwiftAddress<'a>,
    reference_no1: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SwiftContact<'a> {
    name: &'a str,
    mobile_number: &'a str,
    phone_number: &'a str,
    email_address: &'a str,
    company_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SwiftAddress<'a> {
    line1: &'a str,
    city: &'a str,
    country_code: &'a str,
    zip_code: &'a str,
}

#[derive(Serialize)]
struct SwiftDimensions<'a> {
    length: f64,
    height: f64,
    width: f64,
    unit: &'a str,
}

#[derive(Serialize)]
struct SwiftAccount {
    number: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SwiftCustomsDeclaration<'a> {
    reference: String,
    description: &'a str,
    country_of_origin: &'a str,
    weight: f64,
    dimensions: SwiftDimensions<'a>,
    quantity: u32,
    hs_code: &'a str,
    value: f64,
}

#[derive(Serialize)]
struct SwiftMoney<'a> {
    amount: f64,
    currency: &'a str,
}

fn party<'a>(p: &'a crate::model::Party) -> SwiftParty<'a> {
    SwiftParty {
        contact: SwiftContact {
            name: &p.contact.name,
            mobile_number: &p.contact.mobile,
            phone_number: &p.contact.phone,
            email_address: &p.contact.email,
            company_name: &p.contact.company_name,
        },
        address: SwiftAddress {
            line1: &p.address.line1,
            city: &p.address.city,
            country_code: &p.address.country_code,
            zip_code: &p.address.zip_code,
        },
        reference_no1: &p.reference,
    }
}

fn dimensions<'a>(d: &'a crate::model::Dimensions) -> SwiftDimensions<'a> {
    SwiftDimensions {
        length: d.length,
        height: d.height,
        width: d.width,
        unit: &d.unit,
    }
}

impl Carrier for SwiftCarrier {
    fn name(&self) -> &str {
        "swift"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn payload(&self, req: &ShipmentRequest) -> Vec<u8> {
        // Swift has no per-item dimensions; each declaration carries the
        // shipment-level dimensions and a synthetic Item-N reference.
        let customs = req
            .customs_items
            .iter()
            .enumerate()
            .map(|(i, item)| SwiftCustomsDeclaration {
                reference: format!("Item-{}", i + 1),
                description: &item.description,
                country_of_origin: &item.country_of_origin,
                weight: item.weight,
                dimensions: dimensions(&req.dimensions),
                quantity: item.quantity,
                hs_code: &item.hs_code,
                value: item.value,
            })
            .collect();

        let payload = SwiftRequest {
            weight: SwiftWeight {
                value: req.weight.value,
                unit: &req.weight.unit,
            },
            shipper: party(&req.shipper),
            consignee: party(&req.consignee),
            dimensions: dimensions(&req.dimensions),
            account: SwiftAccount {
                number: self.account_number,
            },
            product_code: "International",
            service_type: &req.service_type,
            print_type: "AWBOnly",
            is_insured: true,
            customs_declarations: customs,
            declared_value: SwiftMoney {
                amount: req.declared_value.amount,
                currency: &req.declared_value.currency,
            },
            number_of_pieces: req.packages.len(),
            reference_number1: "",
            special_notes: &req.special_notes,
            remarks: "",
            delivery_type: "DoorToDoor",
            content_type: "NonDocument",
            is_cod: req.is_cod,
        };
        serde_json::to_vec(&payload).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Address, Contact, CustomsItem, Dimensions, Money, Package, Party, Weight,
    };

    fn sample_request() -> ShipmentRequest {
        ShipmentRequest {
            weight: Weight {
                value: 10.5,
                unit: "KG".into(),
            },
            shipper: Party {
                contact: Contact {
                    name: "Ana Pop".into(),
                    company_name: "Acme".into(),
                    email: "ana@acme.test".into(),
                    phone: "40111".into(),
                    mobile: "40222".into(),
                },
                address: Address {
                    line1: "Main 1".into(),
                    line2: "Suite 2".into(),
                    city: "Cluj".into(),
                    state: "CJ".into(),
                    country_code: "RO".into(),
                    zip_code: "4001".into(),
                },
                reference: "SH-1".into(),
            },
            consignee: Party {
                contact: Contact {
                    name: "Bob Lee".into(),
                    ..Default::default()
                },
                address: Address {
                    line1: "High 2".into(),
                    city: "Dubai".into(),
                    country_code: "AE".into(),
                    ..Default::default()
                },
                ..Default::default()
            },
            dimensions: Dimensions {
                length: 10.0,
                width: 20.0,
                height: 30.0,
                unit: "CM".into(),
            },
            packages: vec![Package::default(), Package::default()],
            customs_items: vec![CustomsItem {
                description: "Widget".into(),
                hs_code: "8479".into(),
                quantity: 3,
                weight: 1.2,
                value: 45.0,
                country_of_origin: "RO".into(),
            }],
            declared_value: Money {
                amount: 100.0,
                currency: "USD".into(),
            },
            service_type: "EXP".into(),
            special_notes: "fragile".into(),
            is_cod: true,
            cod_amount: Some(Money {
                amount: 12.5,
                currency: "AED".into(),
            }),
        }
    }

    #[test]
    fn maps_the_canonical_request_onto_the_swift_schema() {
        let carrier = SwiftCarrier::new("http://localhost:3030/v1/swift".into(), 456);
        let v: serde_json::Value =
            serde_json::from_slice(&carrier.payload(&sample_request())).unwrap();

        assert_eq!(v["weight"]["value"], 10.5);
        assert_eq!(v["shipper"]["contact"]["mobileNumber"], "40222");
        assert_eq!(v["shipper"]["address"]["countryCode"], "RO");
        assert_eq!(v["shipper"]["referenceNo1"], "SH-1");
        assert_eq!(v["consignee"]["contact"]["name"], "Bob Lee");
        assert_eq!(v["account"]["number"], 456);
        assert_eq!(v["productCode"], "International");
        assert_eq!(v["printType"], "AWBOnly");
        assert_eq!(v["deliveryType"], "DoorToDoor");
        assert_eq!(v["contentType"], "NonDocument");
        assert_eq!(v["isInsured"], true);
        assert_eq!(v["isCod"], true);
        assert_eq!(v["numberOfPieces"], 2);
        assert_eq!(v["serviceType"], "EXP");
        assert_eq!(v["specialNotes"], "fragile");
    }

    #[test]
    fn customs_declarations_get_synthetic_references_and_shipment_dimensions() {
        let carrier = SwiftCarrier::new("http://localhost:3030/v1/swift".into(), 456);
        let v: serde_json::Value =
            serde_json::from_slice(&carrier.payload(&sample_request())).unwrap();

        let decl = &v["customsDeclarations"][0];
        assert_eq!(decl["reference"], "Item-1");
        assert_eq!(decl["description"], "Widget");
        assert_eq!(decl["hsCode"], "8479");
        assert_eq!(decl["quantity"], 3);
        // per-item dimensions do not exist canonically; the shipment's are used
        assert_eq!(decl["dimensions"]["length"], 10.0);
        assert_eq!(decl["dimensions"]["width"], 20.0);
    }

    #[test]
    fn empty_customs_items_serialize_as_an_empty_array() {
        let carrier = SwiftCarrier::new("http://localhost:3030/v1/swift".into(), 1);
        let mut req = sample_request();
        req.customs_items.clear();
        let v: serde_json::Value = serde_json::from_slice(&carrier.payload(&req)).unwrap();
        assert_eq!(v["customsDeclarations"].as_array().unwrap().len(), 0);
    }
}
