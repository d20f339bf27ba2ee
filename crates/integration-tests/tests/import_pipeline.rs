//! Integration tests for bulk product import.
//!
//! Files go through the public `import_file` entry point exactly as the
//! upload handler and the CLI call it, with an in-memory catalog store.

use larder_admin::import::{
    CatalogStore, ImportError, MemoryCatalogStore, SourceFormat, import_file,
};
use larder_core::{CategoryId, StockStatus};
use larder_integration_tests::dec;

const PRICE_LIST: &str = "\
Product Code,Product Name,Brand,Category,Base Price,GST,Stock,Pack Size
SP-001,Turmeric Powder,Everest,Spices,120,5,IN,200g
SP-002,Red Chilli Powder,Everest,spices ,95.50,5,OUT,100g
,  ,Unbranded,Spices,10,0,IN,
GR-010,Basmati Rice,India Gate,Grains,640,5,in stock,5kg
OI-004,Mustard Oil,Fortune,,210,18,,1L
";

fn csv() -> SourceFormat {
    SourceFormat::detect(Some("price-list.csv"), PRICE_LIST.as_bytes())
}

// =============================================================================
// Happy path
// =============================================================================

#[tokio::test]
async fn test_price_list_import_report() {
    let store = MemoryCatalogStore::with_categories(["Grains"]);

    let report = import_file(&store, PRICE_LIST.as_bytes(), csv())
        .await
        .expect("import should run");

    assert_eq!(report.success_count, 4);
    assert_eq!(report.failure_count, 1);
    assert_eq!(report.messages, vec!["Row 3: missing product name".to_string()]);
    assert_eq!(report.summary(), "Import completed: 4 products added, 1 failed");
}

#[tokio::test]
async fn test_categories_resolved_case_insensitively() {
    let store = MemoryCatalogStore::with_categories(["Grains"]);
    import_file(&store, PRICE_LIST.as_bytes(), csv())
        .await
        .expect("import should run");

    let categories = store.categories();
    let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Grains", "Spices"]);

    let products = store.products();
    let spices = categories[1].id;
    assert_eq!(products[0].category_id, Some(spices));
    assert_eq!(products[1].category_id, Some(spices));
    assert_eq!(products[2].category_id, Some(CategoryId::new(1)));
    assert_eq!(products[3].category_id, None);
}

#[tokio::test]
async fn test_imported_rows_keep_source_order_and_prices() {
    let store = MemoryCatalogStore::default();
    import_file(&store, PRICE_LIST.as_bytes(), csv())
        .await
        .expect("import should run");

    let products = store.products();
    let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        ["Turmeric Powder", "Red Chilli Powder", "Basmati Rice", "Mustard Oil"]
    );

    assert_eq!(products[0].final_price, dec("126"));
    assert_eq!(products[1].final_price, dec("100.275"));
    assert_eq!(products[3].final_price, dec("247.80"));
    assert!(products.iter().all(|p| !p.is_featured));
}

#[tokio::test]
async fn test_stock_status_is_out_only_for_out() {
    let store = MemoryCatalogStore::default();
    import_file(&store, PRICE_LIST.as_bytes(), csv())
        .await
        .expect("import should run");

    let stock: Vec<_> = store.products().iter().map(|p| p.stock_status).collect();
    assert_eq!(
        stock,
        [StockStatus::In, StockStatus::Out, StockStatus::In, StockStatus::In]
    );
}

#[tokio::test]
async fn test_tab_separated_with_alternate_headers() {
    let tsv = "name\tcategory\tPrice\tgst_percentage\tImage URL\n\
               Jaggery Cubes\tSweeteners\t1.5e2\t0\thttps://img.larder.example/jaggery.jpg\n";
    let format = SourceFormat::detect(Some("suppliers.tsv"), tsv.as_bytes());
    let store = MemoryCatalogStore::default();

    let report = import_file(&store, tsv.as_bytes(), format)
        .await
        .expect("import should run");

    assert_eq!(report.success_count, 1);
    let products = store.products();
    let product = &products[0];
    assert_eq!(product.base_price, dec("150"));
    assert_eq!(product.final_price, dec("150"));
    assert_eq!(
        product.image_url.as_deref(),
        Some("https://img.larder.example/jaggery.jpg")
    );
}

// =============================================================================
// Re-runs and failures
// =============================================================================

#[tokio::test]
async fn test_second_run_reuses_categories() {
    let store = MemoryCatalogStore::default();
    for _ in 0..2 {
        import_file(&store, PRICE_LIST.as_bytes(), csv())
            .await
            .expect("import should run");
    }

    assert_eq!(store.categories().len(), 2);
    assert_eq!(store.products().len(), 8);
}

#[tokio::test]
async fn test_negative_price_row_is_reported_not_stored() {
    let csv_text = "Product Name,Base Price,GST\nCardamom,-40,5\nCloves,80,5\n";
    let store = MemoryCatalogStore::default();

    let report = import_file(&store, csv_text.as_bytes(), csv())
        .await
        .expect("import should run");

    assert_eq!(report.success_count, 1);
    assert_eq!(
        report.messages,
        vec!["Row 1 (Cardamom): base price must not be negative".to_string()]
    );
    assert_eq!(store.products().len(), 1);
}

#[tokio::test]
async fn test_headers_only_file_imports_nothing() {
    let store = MemoryCatalogStore::default();
    let report = import_file(&store, b"Product Name,Base Price\n", csv())
        .await
        .expect("import should run");

    assert_eq!(report.total(), 0);
    assert!(report.messages.is_empty());
}

#[tokio::test]
async fn test_corrupt_workbook_is_fatal() {
    let store = MemoryCatalogStore::default();
    let result = import_file(&store, b"PK\x03\x04not really a zip", SourceFormat::Workbook).await;

    assert!(matches!(result, Err(ImportError::Decode(_))));
    assert!(store.products().is_empty());
    assert!(
        store
            .list_categories()
            .await
            .expect("memory store never fails")
            .is_empty()
    );
}

#[tokio::test]
async fn test_report_json_shape() {
    let store = MemoryCatalogStore::default();
    let report = import_file(&store, PRICE_LIST.as_bytes(), csv())
        .await
        .expect("import should run");

    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["successCount"], 4);
    assert_eq!(json["failureCount"], 1);
    assert_eq!(json["messages"][0], "Row 3: missing product name");
}
