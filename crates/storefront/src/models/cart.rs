//! Visitor cart kept in the session.
//!
//! Each line snapshots the product's name, final price and image when it is
//! first added. Later price changes do not reach carts already holding the
//! product.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use larder_core::{Product, ProductId};

/// One product line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub final_price: Decimal,
    pub image_url: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.final_price * Decimal::from(self.quantity)
    }
}

/// A visitor's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Add one unit of `product`, appending a line if it is not in the cart.
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
            return;
        }
        self.items.push(CartItem {
            product_id: product.id,
            name: product.name.clone(),
            final_price: product.final_price,
            image_url: product.image_url.clone(),
            quantity: 1,
        });
    }

    /// Set the quantity of a line.
    ///
    /// Quantities below one leave the cart unchanged; use [`Cart::remove`]
    /// to drop a line. Returns whether anything changed.
    pub fn update(&mut self, product_id: ProductId, quantity: i64) -> bool {
        let Ok(quantity) = u32::try_from(quantity) else {
            return false;
        };
        if quantity < 1 {
            return false;
        }
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Drop a line. Returns whether it was present.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of final price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total number of units.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub count: u64,
}

impl From<Cart> for CartView {
    fn from(cart: Cart) -> Self {
        let total = cart.total();
        let count = cart.count();
        Self {
            items: cart.items,
            total,
            count,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use larder_core::StockStatus;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn product(id: i32, name: &str, final_price: Decimal) -> Product {
        let now = Utc::now();
        Product {
            id: ProductId::new(id),
            product_code: None,
            name: name.to_owned(),
            brand_name: None,
            company_name: None,
            category_id: None,
            case_size: None,
            pack_size: None,
            shelf_life: None,
            base_price: final_price,
            gst_percentage: Decimal::ZERO,
            final_price,
            description: None,
            image_url: Some(format!("https://img.larder.example/{id}.jpg")),
            stock_status: StockStatus::In,
            is_featured: false,
            created_at: now,
            updated_at: now,
            category: None,
        }
    }

    #[test]
    fn test_add_increments_existing_line() {
        let mut cart = Cart::default();
        let ghee = product(1, "Ghee 1L", d("525.00"));
        cart.add(&ghee);
        cart.add(&ghee);
        cart.add(&product(2, "Basmati 5kg", d("640.50")));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total(), d("1690.50"));
    }

    #[test]
    fn test_add_snapshots_product() {
        let mut cart = Cart::default();
        let mut ghee = product(1, "Ghee 1L", d("525.00"));
        cart.add(&ghee);
        ghee.final_price = d("600.00");
        cart.add(&ghee);

        assert_eq!(cart.items()[0].final_price, d("525.00"));
        assert_eq!(cart.total(), d("1050.00"));
    }

    #[test]
    fn test_update_ignores_quantity_below_one() {
        let mut cart = Cart::default();
        cart.add(&product(1, "Ghee 1L", d("525.00")));

        assert!(!cart.update(ProductId::new(1), 0));
        assert!(!cart.update(ProductId::new(1), -3));
        assert_eq!(cart.items()[0].quantity, 1);

        assert!(cart.update(ProductId::new(1), 4));
        assert_eq!(cart.count(), 4);
        assert_eq!(cart.total(), d("2100.00"));
    }

    #[test]
    fn test_update_unknown_product_is_noop() {
        let mut cart = Cart::default();
        assert!(!cart.update(ProductId::new(9), 2));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::default();
        cart.add(&product(1, "Ghee 1L", d("525.00")));
        cart.add(&product(2, "Basmati 5kg", d("640.50")));

        assert!(cart.remove(ProductId::new(1)));
        assert!(!cart.remove(ProductId::new(1)));
        assert_eq!(cart.count(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_view_serializes_totals() {
        let mut cart = Cart::default();
        cart.add(&product(7, "Jaggery", d("118.00")));
        let json = serde_json::to_value(CartView::from(cart)).unwrap();

        assert_eq!(json["count"], 1);
        assert_eq!(json["total"], "118.00");
        assert_eq!(json["items"][0]["productId"], 7);
        assert_eq!(json["items"][0]["finalPrice"], "118.00");
    }
}
