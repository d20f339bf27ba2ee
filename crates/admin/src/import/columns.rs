//! Header aliases recognised by the importer.
//!
//! Supplier sheets arrive with a handful of spellings for each column. Each
//! product field lists the headers it accepts, most specific first; the first
//! alias with a non-empty cell wins.

/// A product field that can be read from an import row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ProductCode,
    Name,
    BrandName,
    CompanyName,
    Category,
    CaseSize,
    PackSize,
    ShelfLife,
    BasePrice,
    GstPercentage,
    Description,
    StockStatus,
    ImageUrl,
}

/// The accepted headers for one field.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub field: Field,
    pub aliases: &'static [&'static str],
}

/// Alias table, one entry per field.
pub const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        field: Field::ProductCode,
        aliases: &["Product Code", "product_code", "Code"],
    },
    ColumnSpec {
        field: Field::Name,
        aliases: &["Product Name", "name", "Name"],
    },
    ColumnSpec {
        field: Field::BrandName,
        aliases: &["Brand", "brand_name", "Brand Name"],
    },
    ColumnSpec {
        field: Field::CompanyName,
        aliases: &["Company", "company_name", "Company Name"],
    },
    ColumnSpec {
        field: Field::Category,
        aliases: &["Category", "category"],
    },
    ColumnSpec {
        field: Field::CaseSize,
        aliases: &["Case Size", "case_size"],
    },
    ColumnSpec {
        field: Field::PackSize,
        aliases: &["Pack Size", "pack_size"],
    },
    ColumnSpec {
        field: Field::ShelfLife,
        aliases: &["Shelf Life", "shelf_life"],
    },
    ColumnSpec {
        field: Field::BasePrice,
        aliases: &["Base Price", "base_price", "Price"],
    },
    ColumnSpec {
        field: Field::GstPercentage,
        aliases: &["GST", "gst_percentage", "GST %"],
    },
    ColumnSpec {
        field: Field::Description,
        aliases: &["Description", "description"],
    },
    ColumnSpec {
        field: Field::StockStatus,
        aliases: &["Stock", "stock_status", "Stock Status"],
    },
    ColumnSpec {
        field: Field::ImageUrl,
        aliases: &["Image", "image_url", "Image URL"],
    },
];

impl Field {
    /// Headers accepted for this field, in priority order.
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        COLUMNS
            .iter()
            .find(|spec| spec.field == self)
            .map_or(&[], |spec| spec.aliases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_aliases() {
        assert_eq!(COLUMNS.len(), 13);
        for spec in COLUMNS {
            assert!(!spec.aliases.is_empty(), "{:?} has no aliases", spec.field);
            assert_eq!(spec.field.aliases(), spec.aliases);
        }
    }

    #[test]
    fn test_price_accepts_short_header() {
        assert_eq!(Field::BasePrice.aliases().last(), Some(&"Price"));
        assert_eq!(Field::GstPercentage.aliases(), &["GST", "gst_percentage", "GST %"]);
    }
}
