use crate::model::{Address, Contact, ShipmentRequest};
use unicode_normalization::UnicodeNormalization;

fn clean_text(s: &str) -> String {
    // Unicode NFC normalization + BOM strip + CRLF -> LF + trim
    let mut t = s.nfc().collect::<String>();
    if t.starts_with('\u{FEFF}') {
        // Byte Order Mark
        t.remove(0);
    }
    if t.contains("\r\n") {
        t = t.replace("\r\n", "\n");
    }
    t.trim().to_string()
}

fn clamp_non_negative(x: f64) -> f64 {
    if x < 0.0 { 0.0 } else { x }
}

fn clean_contact(c: &mut Contact) {
    c.name = clean_text(&c.name);
    c.company_name = clean_text(&c.company_name);
    c.email = clean_text(&c.email);
    c.phone = clean_text(&c.phone);
    c.mobile = clean_text(&c.mobile);
}

fn clean_address(a: &mut Address) {
    a.line1 = clean_text(&a.line1);
    a.line2 = clean_text(&a.line2);
    a.city = clean_text(&a.city);
    a.state = clean_text(&a.state);
    a.country_code = clean_text(&a.country_code);
    a.zip_code = clean_text(&a.zip_code);
}

/// Clean up every free-text field of an inbound shipment and clamp numeric
/// fields that must not go negative. Pure and idempotent; applied by the
/// ingress before the request is shared across carrier jobs.
pub fn normalize_shipment(mut req: ShipmentRequest) -> ShipmentRequest {
    clean_contact(&mut req.shipper.contact);
    clean_address(&mut req.shipper.address);
    req.shipper.reference = clean_text(&req.shipper.reference);
    clean_contact(&mut req.consignee.contact);
    clean_address(&mut req.consignee.address);
    req.consignee.reference = clean_text(&req.consignee.reference);

    req.service_type = clean_text(&req.service_type);
    req.special_notes = clean_text(&req.special_notes);

    req.weight.value = clamp_non_negative(req.weight.value);
    req.dimensions.length = clamp_non_negative(req.dimensions.length);
    req.dimensions.width = clamp_non_negative(req.dimensions.width);
    req.dimensions.height = clamp_non_negative(req.dimensions.height);
    req.declared_value.amount = clamp_non_negative(req.declared_value.amount);

    for pkg in &mut req.packages {
        pkg.weight = clamp_non_negative(pkg.weight);
        pkg.value = clamp_non_negative(pkg.value);
    }
    for item in &mut req.customs_items {
        item.description = clean_text(&item.description);
        item.hs_code = clean_text(&item.hs_code);
        item.country_of_origin = clean_text(&item.country_of_origin);
        item.weight = clamp_non_negative(item.weight);
        item.value = clamp_non_negative(item.value);
    }
    if let Some(cod) = &mut req.cod_amount {
        cod.amount = clamp_non_negative(cod.amount);
        cod.currency = clean_text(&cod.currency);
    }
    req
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomsItem, Money, Weight};

    #[test]
    fn trims_and_normalizes_text_fields() {
        let mut req = ShipmentRequest::default();
        req.shipper.contact.name = "  Ana Pop \r\n".into();
        req.consignee.address.city = "\u{FEFF}Dubai ".into();
        req.special_notes = "fragile\r\nhandle with care".into();
        let out = normalize_shipment(req);
        assert_eq!(out.shipper.contact.name, "Ana Pop");
        assert_eq!(out.consignee.address.city, "Dubai");
        assert_eq!(out.special_notes, "fragile\nhandle with care");
    }

    #[test]
    fn clamps_negative_numbers_to_zero() {
        let req = ShipmentRequest {
            weight: Weight {
                value: -3.0,
                unit: "KG".into(),
            },
            declared_value: Money {
                amount: -1.0,
                currency: "USD".into(),
            },
            customs_items: vec![CustomsItem {
                weight: -0.5,
                value: 7.0,
                ..Default::default()
            }],
            ..Default::default()
        };
        let out = normalize_shipment(req);
        assert_eq!(out.weight.value, 0.0);
        assert_eq!(out.declared_value.amount, 0.0);
        assert_eq!(out.customs_items[0].weight, 0.0);
        assert_eq!(out.customs_items[0].value, 7.0);
    }

    #[test]
    fn is_idempotent() {
        let mut req = ShipmentRequest::default();
        req.shipper.contact.name = "  Ana ".into();
        let once = normalize_shipment(req);
        let twice = normalize_shipment(once.clone());
        assert_eq!(once, twice);
    }
}
