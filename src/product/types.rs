use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub id: i64,
    pub wishlist_id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub is_gift: bool,
    pub purchased: bool,
    pub description: Option<String>,
    pub note: Option<String>,
}

/// Product as the service sends it. Older builds omit `wishlist_id` and the
/// flag fields, and marshal columns they lack as `null`; some clients spell
/// them in camelCase.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductWire {
    pub id: i64,
    #[serde(default, alias = "wishlistId")]
    pub wishlist_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: i64,
    #[serde(default, alias = "isGift", deserialize_with = "null_as_default")]
    pub is_gift: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub purchased: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

impl ProductWire {
    /// Attributes the record to `owner`. Returns `None` when the service
    /// reports a different wishlist.
    pub fn into_record(self, owner: i64) -> Option<ProductRecord> {
        let wishlist_id = self.wishlist_id.unwrap_or(owner);
        if wishlist_id != owner {
            return None;
        }
        Some(ProductRecord {
            id: self.id,
            wishlist_id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            is_gift: self.is_gift,
            purchased: self.purchased,
            description: self.description,
            note: self.note,
        })
    }
}

/// Display order: by wishlist, then product id.
pub fn sort_for_display(products: &mut [ProductRecord]) {
    products.sort_by_key(|p| (p.wishlist_id, p.id));
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            pairs.push(("product_name", name.to_string()));
        }
        if let Some(min) = self.min_price { pairs.push(("min_price", min.to_string())); }
        if let Some(max) = self.max_price { pairs.push(("max_price", max.to_string())); }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub is_gift: bool,
    pub purchased: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_gift: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased: Option<bool>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.note.is_none() && self.is_gift.is_none() && self.quantity.is_none() && self.purchased.is_none()
    }
}

// Envelope payloads
#[derive(Serialize)]
pub struct ProductList { pub wishlist_id: i64, pub products: Vec<ProductRecord> }

#[derive(Serialize)]
pub struct ProductPlan<'a, T: Serialize> { pub action: &'static str, pub wishlist_id: i64, pub product_id: Option<i64>, pub payload: &'a T }

#[derive(Serialize)]
pub struct ProductDeleted { pub wishlist_id: i64, pub product_id: i64 }

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(wishlist_id: i64, id: i64) -> ProductRecord {
        ProductRecord {
            id, wishlist_id, name: format!("p{id}"), price: 1.0, quantity: 1,
            is_gift: false, purchased: false, description: None, note: None,
        }
    }

    #[test]
    fn wire_accepts_camel_case_and_defaults() {
        let wire: ProductWire = serde_json::from_value(json!({
            "id": 3, "wishlistId": 7, "name": "Lamp", "price": 12.5, "isGift": true
        }))
        .unwrap();
        let rec = wire.into_record(7).unwrap();
        assert_eq!(rec.wishlist_id, 7);
        assert!(rec.is_gift);
        assert_eq!(rec.quantity, 0);
        assert!(!rec.purchased);
    }

    #[test]
    fn marshalled_nulls_fall_back_to_defaults() {
        let wires: Vec<ProductWire> = serde_json::from_value(json!([{
            "id": 11, "wishlist_id": 1, "name": "Lamp", "price": 20.0, "description": null,
            "quantity": null, "note": null, "is_gift": null, "purchased": null
        }]))
        .unwrap();
        let rec = wires.into_iter().next().unwrap().into_record(1).unwrap();
        assert_eq!(rec.name, "Lamp");
        assert_eq!(rec.quantity, 0);
        assert!(!rec.is_gift);
        assert!(!rec.purchased);
        assert_eq!(rec.note, None);
    }

    #[test]
    fn null_name_and_price_decode() {
        let wire: ProductWire = serde_json::from_value(json!({"id": 2, "name": null, "price": null})).unwrap();
        assert_eq!(wire.name, "");
        assert_eq!(wire.price, 0.0);
    }

    #[test]
    fn missing_wishlist_id_is_attributed_to_owner() {
        let wire: ProductWire = serde_json::from_value(json!({"id": 1, "name": "Mug", "price": 3.0})).unwrap();
        assert_eq!(wire.into_record(4).unwrap().wishlist_id, 4);
    }

    #[test]
    fn foreign_wishlist_id_is_rejected() {
        let wire: ProductWire = serde_json::from_value(json!({"id": 1, "wishlist_id": 9, "name": "Mug"})).unwrap();
        assert!(wire.into_record(4).is_none());
    }

    #[test]
    fn display_sort_is_by_wishlist_then_id() {
        let mut products = vec![record(3, 2), record(1, 9), record(3, 1), record(1, 4)];
        sort_for_display(&mut products);
        let keys: Vec<(i64, i64)> = products.iter().map(|p| (p.wishlist_id, p.id)).collect();
        assert_eq!(keys, vec![(1, 4), (1, 9), (3, 1), (3, 2)]);
    }

    #[test]
    fn filter_uses_service_parameter_names() {
        let filter = ProductFilter { name: Some("  lamp ".into()), min_price: Some(2.0), max_price: None };
        assert_eq!(filter.query_pairs(), vec![("product_name", "lamp".to_string()), ("min_price", "2".to_string())]);
        assert!(ProductFilter::default().query_pairs().is_empty());
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = ProductPatch { purchased: Some(true), ..Default::default() };
        assert!(!patch.is_empty());
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"purchased": true}));
        assert!(ProductPatch::default().is_empty());
    }
}
