//! Turns a decoded spreadsheet row into a product candidate.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use larder_core::{CategoryId, CategoryRef, NewProduct, PriceError, StockStatus, normalize_prices};

use super::columns::Field;

/// A single decoded cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// The cell as trimmed text, or `None` if it is blank.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let text = match self {
            Self::Empty => return None,
            Self::Text(s) => s.trim().to_owned(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(value.to_owned())
        }
    }
}

/// One data row keyed by header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// 1-based position among the data rows of the source, header excluded.
    pub number: usize,
    cells: HashMap<String, Cell>,
}

impl Row {
    /// Create an empty row.
    #[must_use]
    pub fn new(number: usize) -> Self {
        Self {
            number,
            cells: HashMap::new(),
        }
    }

    /// Set a cell. The first value stored under a header is kept.
    pub fn insert(&mut self, header: &str, cell: Cell) {
        self.cells.entry(header.trim().to_owned()).or_insert(cell);
    }

    /// Builder form of [`Row::insert`].
    #[must_use]
    pub fn with(mut self, header: &str, cell: impl Into<Cell>) -> Self {
        self.insert(header, cell.into());
        self
    }

    /// Whether every cell is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|c| c.text().is_none())
    }

    /// The first non-blank value among the field's aliases.
    #[must_use]
    pub fn field(&self, field: Field) -> Option<String> {
        field
            .aliases()
            .iter()
            .find_map(|alias| self.cells.get(*alias).and_then(Cell::text))
    }

    /// The field coerced to a decimal, zero when missing or unparseable.
    #[must_use]
    pub fn decimal(&self, field: Field) -> Decimal {
        self.field(field)
            .as_deref()
            .and_then(parse_decimal)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Parse plain or scientific decimal notation.
#[must_use]
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let value = value.trim();
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

/// Why a row was rejected before anything was written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    #[error("missing product name")]
    MissingName,
    #[error("{error}")]
    Price { name: String, error: PriceError },
}

/// A mapped row waiting for its category to be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRow {
    pub category: Option<String>,
    pub product: NewProduct,
}

/// Map a row onto product fields.
///
/// # Errors
///
/// Returns a [`RowRejection`] when the row has no name or a price that is
/// negative or too large to store.
pub fn map_row(row: &Row) -> Result<MappedRow, RowRejection> {
    let name = row.field(Field::Name).ok_or(RowRejection::MissingName)?;

    let (base_price, gst_percentage) = match normalize_prices(
        row.decimal(Field::BasePrice),
        row.decimal(Field::GstPercentage),
    ) {
        Ok(prices) => prices,
        Err(error) => return Err(RowRejection::Price { name, error }),
    };

    let stock_status = row
        .field(Field::StockStatus)
        .map_or(StockStatus::In, |s| StockStatus::from_cell(&s));

    Ok(MappedRow {
        category: row.field(Field::Category),
        product: NewProduct {
            product_code: row.field(Field::ProductCode),
            name,
            brand_name: row.field(Field::BrandName),
            company_name: row.field(Field::CompanyName),
            category_id: None,
            case_size: row.field(Field::CaseSize),
            pack_size: row.field(Field::PackSize),
            shelf_life: row.field(Field::ShelfLife),
            base_price,
            gst_percentage,
            description: row.field(Field::Description),
            image_url: row.field(Field::ImageUrl),
            stock_status,
            is_featured: false,
        },
    })
}

/// Case-insensitive category name to id map for a single import run.
#[derive(Debug, Clone, Default)]
pub struct CategoryLookup {
    ids: HashMap<String, CategoryId>,
}

impl CategoryLookup {
    /// Seed from the categories that already exist.
    #[must_use]
    pub fn seed(categories: impl IntoIterator<Item = CategoryRef>) -> Self {
        let mut lookup = Self::default();
        for category in categories {
            lookup.insert(&category);
        }
        lookup
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<CategoryId> {
        self.ids.get(&Self::key(name)).copied()
    }

    /// Remember a category. An existing entry for the same name is kept.
    pub fn insert(&mut self, category: &CategoryRef) {
        self.ids
            .entry(Self::key(&category.name))
            .or_insert(category.id);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }
}
