//! Catalog records: categories and products.
//!
//! Products never carry an editable final price. [`NewProduct`] only holds the
//! base price and GST percentage, and the stored final price is always
//! [`NewProduct::final_price`] at the moment of writing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::{CategoryId, ProductId};
use super::price::{PriceError, final_price, normalize_prices};
use super::status::StockStatus;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The id and name of a category, all the import pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
}

impl From<&Category> for CategoryRef {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
        }
    }
}

/// A stored product, optionally with its category embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub product_code: Option<String>,
    pub name: String,
    pub brand_name: Option<String>,
    pub company_name: Option<String>,
    pub category_id: Option<CategoryId>,
    pub case_size: Option<String>,
    pub pack_size: Option<String>,
    pub shelf_life: Option<String>,
    pub base_price: Decimal,
    pub gst_percentage: Decimal,
    pub final_price: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub stock_status: StockStatus,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category: Option<Category>,
}

/// A product ready to be inserted or written over an existing row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewProduct {
    pub product_code: Option<String>,
    pub name: String,
    pub brand_name: Option<String>,
    pub company_name: Option<String>,
    pub category_id: Option<CategoryId>,
    pub case_size: Option<String>,
    pub pack_size: Option<String>,
    pub shelf_life: Option<String>,
    pub base_price: Decimal,
    pub gst_percentage: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub stock_status: StockStatus,
    pub is_featured: bool,
}

impl NewProduct {
    /// The tax-inclusive price to store alongside this product.
    #[must_use]
    pub fn final_price(&self) -> Decimal {
        final_price(self.base_price, self.gst_percentage)
    }
}

/// Validation failures for a product submitted through the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductInputError {
    #[error("product name is required")]
    MissingName,
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// Product payload accepted by the admin create and update endpoints.
///
/// Any `final_price` sent by a client is ignored: the field does not exist.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub product_code: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub case_size: Option<String>,
    #[serde(default)]
    pub pack_size: Option<String>,
    #[serde(default)]
    pub shelf_life: Option<String>,
    #[serde(default)]
    pub base_price: Decimal,
    #[serde(default)]
    pub gst_percentage: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock_status: StockStatus,
    #[serde(default)]
    pub is_featured: bool,
}

impl ProductInput {
    /// Trim text fields and check the name and prices.
    ///
    /// # Errors
    ///
    /// Returns [`ProductInputError`] if the name is blank or either price is
    /// negative or too large to store.
    pub fn validate(self) -> Result<NewProduct, ProductInputError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(ProductInputError::MissingName);
        }

        let (base_price, gst_percentage) =
            normalize_prices(self.base_price, self.gst_percentage.unwrap_or_default())?;

        Ok(NewProduct {
            product_code: non_blank(self.product_code),
            name,
            brand_name: non_blank(self.brand_name),
            company_name: non_blank(self.company_name),
            category_id: self.category_id,
            case_size: non_blank(self.case_size),
            pack_size: non_blank(self.pack_size),
            shelf_life: non_blank(self.shelf_life),
            base_price,
            gst_percentage,
            description: non_blank(self.description),
            image_url: non_blank(self.image_url),
            stock_status: self.stock_status,
            is_featured: self.is_featured,
        })
    }
}

/// Trim an optional string, mapping blank to `None`.
#[must_use]
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input(json: &str) -> ProductInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_validate_derives_final_price_and_ignores_client_value() {
        let product = input(
            r#"{"name":" Basmati Rice 5kg ","base_price":"100","gst_percentage":"18","final_price":"1"}"#,
        )
        .validate()
        .unwrap();

        assert_eq!(product.name, "Basmati Rice 5kg");
        assert_eq!(product.final_price(), Decimal::from(118));
    }

    #[test]
    fn test_validate_defaults_gst_to_zero() {
        let product = input(r#"{"name":"Salt","base_price":20}"#).validate().unwrap();
        assert_eq!(product.gst_percentage, Decimal::ZERO);
        assert_eq!(product.final_price(), Decimal::from(20));
        assert_eq!(product.stock_status, StockStatus::In);
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let err = input(r#"{"name":"   ","base_price":"5"}"#).validate().unwrap_err();
        assert_eq!(err, ProductInputError::MissingName);
    }

    #[test]
    fn test_validate_rejects_negative_prices() {
        let err = input(r#"{"name":"Tea","base_price":"-1"}"#).validate().unwrap_err();
        assert_eq!(err, ProductInputError::Price(PriceError::NegativeBasePrice));

        let err = input(r#"{"name":"Tea","base_price":"1","gst_percentage":"-5"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err, ProductInputError::Price(PriceError::NegativeGst));
    }

    #[test]
    fn test_validate_rejects_unstorable_prices() {
        let err = input(r#"{"name":"Saffron","base_price":"100000000000","gst_percentage":"18"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err, ProductInputError::Price(PriceError::BasePriceOutOfRange));
        assert_eq!(err.to_string(), "base price must not exceed 9999999999.99");

        let err = input(r#"{"name":"Saffron","base_price":"10","gst_percentage":"1000"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err, ProductInputError::Price(PriceError::GstOutOfRange));
    }

    #[test]
    fn test_validate_rounds_prices_before_deriving_final_price() {
        let product = input(r#"{"name":"Poha 1kg","base_price":"10.005","gst_percentage":"18"}"#)
            .validate()
            .unwrap();
        assert_eq!(product.base_price, Decimal::new(1001, 2));
        assert_eq!(product.final_price(), Decimal::new(118_118, 4));
    }

    #[test]
    fn test_validate_blanks_become_none() {
        let product = input(r#"{"name":"Ghee","brand_name":"  ","pack_size":" 1L "}"#)
            .validate()
            .unwrap();
        assert_eq!(product.brand_name, None);
        assert_eq!(product.pack_size.as_deref(), Some("1L"));
    }
}
