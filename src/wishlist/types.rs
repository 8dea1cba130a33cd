use serde::{Deserialize, Serialize};

/// Identifies one wishlist for a fan-out pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WishlistRef {
    pub id: i64,
    pub name: String,
}

/// Directory entry as served by the collection endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub userid: Option<String>,
    /// Product ids only; records are fetched per wishlist.
    #[serde(default)]
    pub products: Vec<i64>,
}

impl Wishlist {
    pub fn to_ref(&self) -> WishlistRef {
        WishlistRef { id: self.id, name: self.name.clone() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewWishlist {
    pub name: String,
    pub userid: String,
}

#[derive(Debug, Clone, Default)]
pub struct WishlistQuery {
    pub name: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

// Envelope payloads
#[derive(Serialize)]
pub struct WishlistPlan<'a> { pub action: &'static str, pub id: Option<i64>, pub name: Option<&'a str>, pub userid: Option<&'a str> }

#[derive(Serialize)]
pub struct WishlistList { pub wishlists: Vec<Wishlist> }

#[derive(Serialize)]
pub struct WishlistDeleted { pub id: i64 }
