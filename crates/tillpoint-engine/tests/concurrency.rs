//! Concurrent commits against one stock row.
//!
//! In-memory SQLite lives on a single connection, so these tests run on an
//! on-disk database in a temp directory where the pool can hand every task
//! its own connection.

use chrono::Utc;
use tempfile::TempDir;
use tillpoint_core::{Attendant, Quantity, SaleDraft, SaleDraftItem};
use tillpoint_db::repository::attendant::generate_attendant_id;
use tillpoint_db::repository::product::new_product;
use tillpoint_db::{Database, DbConfig};
use tillpoint_engine::{SaleEngine, SaleError};

async fn engine_on_disk(dir: &TempDir) -> SaleEngine {
    let config = DbConfig::new(dir.path().join("tillpoint.db")).max_connections(8);
    let db = Database::new(config).await.unwrap();
    SaleEngine::new(db)
}

fn draft(attendant_id: &str, product_id: &str, quantity: f64) -> SaleDraft {
    SaleDraft {
        attendant_id: Some(attendant_id.to_string()),
        payment_method: Some("card".to_string()),
        items: vec![SaleDraftItem {
            product_id: Some(product_id.to_string()),
            quantity: Some(quantity),
            price: None,
        }],
        discount: None,
        receipt_number: None,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sales_never_oversell() {
    let dir = TempDir::new().unwrap();
    let engine = engine_on_disk(&dir).await;

    let attendant = Attendant {
        id: generate_attendant_id(),
        username: "amina".to_string(),
        display_name: None,
        created_at: Utc::now(),
    };
    engine.database().attendants().insert(&attendant).await.unwrap();

    // 15.00 units on hand, four buyers want 5.00 each: exactly one must lose
    let product = new_product("Hot Item", "H-1", 999, 500);
    engine
        .database()
        .products()
        .insert(&product, Quantity::from_hundredths(1500))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let engine = engine.clone();
        let d = draft(&attendant.id, &product.id, 5.0);
        handles.push(tokio::spawn(async move { engine.create_sale(&d).await }));
    }

    let mut committed = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => committed += 1,
            Err(SaleError::InsufficientStock { .. }) | Err(SaleError::StockChanged { .. }) => {
                rejected += 1
            }
            Err(other) => panic!("unexpected failure: {other:?}"),
        }
    }

    assert_eq!(committed, 3);
    assert_eq!(rejected, 1);

    let stock = engine
        .database()
        .stock()
        .get(&product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stock.quantity_hundredths, 0);
    assert_eq!(engine.database().sales().count().await.unwrap(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn losing_commit_leaves_no_partial_state() {
    let dir = TempDir::new().unwrap();
    let engine = engine_on_disk(&dir).await;

    let attendant = Attendant {
        id: generate_attendant_id(),
        username: "joseph".to_string(),
        display_name: None,
        created_at: Utc::now(),
    };
    engine.database().attendants().insert(&attendant).await.unwrap();

    // Both buyers want the whole stock; one wins, one rolls back
    let product = new_product("Last One", "L-1", 2500, 1000);
    engine
        .database()
        .products()
        .insert(&product, Quantity::from_hundredths(100))
        .await
        .unwrap();

    let a = {
        let engine = engine.clone();
        let d = draft(&attendant.id, &product.id, 1.0);
        tokio::spawn(async move { engine.create_sale(&d).await })
    };
    let b = {
        let engine = engine.clone();
        let d = draft(&attendant.id, &product.id, 1.0);
        tokio::spawn(async move { engine.create_sale(&d).await })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);

    let stock = engine
        .database()
        .stock()
        .get(&product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stock.quantity_hundredths, 0);

    let listing = engine.list_sales().await.unwrap();
    assert_eq!(listing.sales.len(), 1);
    assert_eq!(listing.sales[0].total, 25.0);
    assert_eq!(listing.sales[0].items.len(), 1);
}
