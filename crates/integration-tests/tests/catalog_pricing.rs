//! Integration tests for final price derivation.
//!
//! The same `base * (1 + gst / 100)` rule must hold whether a product comes
//! from the admin form, an import row, or ends up in a storefront cart.

use larder_admin::import::{MemoryCatalogStore, SourceFormat, import_file};
use larder_core::{Price, ProductInput, final_price};
use larder_integration_tests::dec;
use larder_storefront::models::{Cart, CartView};

#[test]
fn test_admin_input_and_import_agree() {
    let input: ProductInput =
        serde_json::from_str(r#"{"name":"Ghee 1L","base_price":"525","gst_percentage":"12"}"#)
            .expect("valid input");
    let from_form = input.validate().expect("valid product").final_price();

    assert_eq!(from_form, final_price(dec("525"), dec("12")));
    assert_eq!(from_form, dec("588"));
}

#[test]
fn test_display_rounds_half_up() {
    assert_eq!(Price::inr(final_price(dec("95.50"), dec("5"))).display(), "₹ 100.28");
    assert_eq!(Price::inr(dec("0")).display(), "₹ 0.00");
}

#[tokio::test]
async fn test_cart_totals_use_imported_final_prices() {
    let csv = "Product Name,Base Price,GST,Stock\nGhee 1L,525,12,IN\nBasmati Rice 5kg,640,5,IN\n";
    let store = MemoryCatalogStore::default();
    import_file(&store, csv.as_bytes(), SourceFormat::Delimited { delimiter: b',' })
        .await
        .expect("import should run");

    let products = store.products();
    let mut cart = Cart::default();
    cart.add(&products[0]);
    cart.add(&products[0]);
    cart.add(&products[1]);

    let view = CartView::from(cart);
    assert_eq!(view.count, 3);
    assert_eq!(view.total, dec("1848"));
}

#[tokio::test]
async fn test_cart_update_below_one_keeps_quantity() {
    let csv = "Product Name,Base Price\nRock Salt,40\n";
    let store = MemoryCatalogStore::default();
    import_file(&store, csv.as_bytes(), SourceFormat::Delimited { delimiter: b',' })
        .await
        .expect("import should run");

    let products = store.products();
    let salt = &products[0];
    let mut cart = Cart::default();
    cart.add(salt);
    assert!(!cart.update(salt.id, 0));
    assert_eq!(cart.count(), 1);
    assert_eq!(cart.total(), dec("40"));
}
