use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::carrier::Carrier;
use crate::model::ShipmentRequest;

/// XPS courier booking API adapter.
///
/// Flat PascalCase wire schema with credentials in the body; username,
/// password and account number come from config (the password via an env
/// var, never from the config file itself).
pub struct XpsCarrier {
    endpoint: String,
    username: String,
    password: SecretString,
    account_no: String,
}

impl XpsCarrier {
    pub fn new(
        endpoint: String,
        username: String,
        password: SecretString,
        account_no: String,
    ) -> Self {
        Self {
            endpoint,
            username,
            password,
            account_no,
        }
    }
}

// ===== XPS wire types =====
// Field spellings (NumberofPeices, HSNCODE, CountryofOrigin, ...) are the
// carrier's contract, not ours.

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct XpsRequest<'a> {
    origin: &'a str,
    destination: &'a str,
    product_type: &'a str,
    service_type: &'a str,
    #[serde(rename = "CODAmount")]
    cod_amount: String,
    #[serde(rename = "CODCurrency")]
    cod_currency: &'a str,
    special_instruction: &'a str,
    shipper: &'a str,
    #[serde(rename = "ShipperCPErson")]
    shipper_c_person: &'a str,
    shipper_address1: &'a str,
    shipper_address2: &'a str,
    shipper_city: &'a str,
    shipper_email: &'a str,
    shipper_phone: &'a str,
    shipper_mobile: &'a str,
    shipper_ref_no: &'a str,
    consignee: &'a str,
    consignee_c_person: &'a str,
    consignee_address1: &'a str,
    consignee_address2: &'a str,
    consignee_city: &'a str,
    consignee_phone: &'a str,
    consignee_mob: &'a str,
    consignee_email: &'a str,
    consignee_state: &'a str,
    consignee_zip_code: &'a str,
    value_of_shipment: f64,
    value_currency: &'a str,
    goods_description: &'a str,
    #[serde(rename = "NumberofPeices")]
    number_of_pieces: usize,
    weight: f64,
    package_request: Vec<XpsPackage>,
    export_item_declaration_request: Vec<XpsExportItem<'a>>,
    user_name: &'a str,
    password: &'a str,
    account_no: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct XpsPackage {
    dim_width: f64,
    dim_height: f64,
    dim_length: f64,
    dim_weight: f64,
    #[serde(rename = "NoofPeices")]
    no_of_pieces: u32,
    shipment_value: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct XpsExportItem<'a> {
    #[serde(rename = "HSNCODE")]
    hsn_code: &'a str,
    item_desc: &'a str,
    dim_weight: f64,
    #[serde(rename = "NoofPeices")]
    no_of_pieces: u32,
    shipment_value: f64,
    #[serde(rename = "CountryofOrigin")]
    country_of_origin: &'a str,
}

impl Carrier for XpsCarrier {
    fn name(&self) -> &str {
        "xps"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn payload(&self, req: &ShipmentRequest) -> Vec<u8> {
        let packages = req
            .packages
            .iter()
            .map(|pkg| XpsPackage {
                dim_width: pkg.dimensions.width,
                dim_height: pkg.dimensions.height,
                dim_length: pkg.dimensions.length,
                dim_weight: pkg.weight,
                no_of_pieces: pkg.quantity,
                shipment_value: pkg.value,
            })
            .collect();

        let items = req
            .customs_items
            .iter()
            .map(|item| XpsExportItem {
                hsn_code: &item.hs_code,
                item_desc: &item.description,
                dim_weight: item.weight,
                no_of_pieces: item.quantity,
                shipment_value: item.value,
                country_of_origin: &item.country_of_origin,
            })
            .collect();

        // COD fields only carry real values when the shipment is COD and an
        // amount was supplied; XPS expects "0"/USD otherwise.
        let (cod_amount, cod_currency) = match (&req.cod_amount, req.is_cod) {
            (Some(cod), true) => (format!("{:.2}", cod.amount), cod.currency.as_str()),
            _ => ("0".to_string(), "USD"),
        };

        let goods_description = req
            .customs_items
            .first()
            .map(|item| item.description.as_str())
            .unwrap_or_default();

        let payload = XpsRequest {
            origin: &req.shipper.address.country_code,
            destination: &req.consignee.address.country_code,
            product_type: "XPS",
            service_type: &req.service_type,
            cod_amount,
            cod_currency,
            special_instruction: &req.special_notes,
            shipper: &req.shipper.contact.company_name,
            shipper_c_person: &req.shipper.contact.name,
            shipper_address1: &req.shipper.address.line1,
            shipper_address2: &req.shipper.address.line2,
            shipper_city: &req.shipper.address.city,
            shipper_email: &req.shipper.contact.email,
            shipper_phone: &req.shipper.contact.phone,
            shipper_mobile: &req.shipper.contact.mobile,
            shipper_ref_no: &req.shipper.reference,
            consignee: &req.consignee.contact.company_name,
            consignee_c_person: &req.consignee.contact.name,
            consignee_address1: &req.consignee.address.line1,
            consignee_address2: &req.consignee.address.line2,
            consignee_city: &req.consignee.address.city,
            consignee_phone: &req.consignee.contact.phone,
            consignee_mob: &req.consignee.contact.mobile,
            consignee_email: &req.consignee.contact.email,
            consignee_state: &req.consignee.address.state,
            consignee_zip_code: &req.consignee.address.zip_code,
            value_of_shipment: req.declared_value.amount,
            value_currency: &req.declared_value.currency,
            goods_description,
            number_of_pieces: req.packages.len(),
            // canonical weight is grams; XPS books in KG
            weight: req.weight.value / 1000.0,
            package_request: packages,
            export_item_declaration_request: items,
            user_name: &self.username,
            password: self.password.expose_secret(),
            account_no: &self.account_no,
        };
        serde_json::to_vec(&payload).unwrap_or_default()
    }
}
