//! End-to-end checkout against file-backed cart storage.
//!
//! Each test opens a session over a temporary directory, drives the cart the way the storefront
//! does, then submits through the pipeline and checks both the order handed to the store and
//! what is left on disk.

use jiff::Timestamp;
use tempfile::TempDir;
use testresult::TestResult;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kledje::prelude::*;

fn customer() -> CustomerInfo {
    CustomerInfo {
        first_name: "ياسمين".to_string(),
        last_name: "عادل".to_string(),
        phone: "01012345678".to_string(),
        email: Some("yasmin@example.com".to_string()),
        city: "القاهرة".to_string(),
        address: "مدينة نصر".to_string(),
        notes: None,
    }
}

fn open(dir: &TempDir) -> CartSession<FileStorage, Vec<CartEvent>> {
    CartSession::with_observer(CartStore::new(FileStorage::new(dir.path())), Vec::new())
}

#[tokio::test]
async fn add_twice_then_checkout() -> TestResult {
    let dir = TempDir::new()?;
    let mut session = open(&dir);
    let product = Product::new(1, "سيروم فيتامين سي", 100);

    session.add_item(&product, 1)?;
    session.add_item(&product, 2)?;

    assert_eq!(session.cart().len(), 1);
    assert_eq!(session.cart().lines().first().map(CartLine::quantity), Some(3));
    assert_eq!(session.subtotal()?, kledje::pricing::money(300)?);

    let now = Timestamp::from_millisecond(1_725_000_000_000)?;
    let mut checkout = Checkout::new(MemoryOrderStore::new()).with_clock(FixedClock(now));

    let id = checkout.submit(&mut session, &customer()).await?;

    let orders = checkout.store().orders();
    let order = orders.first().ok_or("order was not stored")?;

    assert_eq!(orders.len(), 1);
    assert_eq!(order.id(), &id);
    assert_eq!(id.as_str(), "KLD-1725000000000");
    assert_eq!(order.total(), 300);
    assert_eq!(order.status(), OrderStatus::Placed);
    assert_eq!(order.payment_method(), PaymentMethod::Cod);
    assert_eq!(order.created_at(), now);
    assert_eq!(order.customer_info(), &customer());

    assert!(session.cart().is_empty());
    assert!(open(&dir).cart().is_empty(), "emptied cart should be persisted");

    Ok(())
}

#[tokio::test]
async fn empty_cart_is_not_submitted() -> TestResult {
    let dir = TempDir::new()?;
    let mut session = open(&dir);
    let mut checkout = Checkout::new(MemoryOrderStore::new());

    let result = checkout.submit(&mut session, &customer()).await;

    assert!(
        matches!(result, Err(CheckoutError::EmptyCart)),
        "expected EmptyCart, got {result:?}"
    );
    assert_eq!(
        result.err().map(|error| error.user_message()).as_deref(),
        Some("لا يمكن إتمام طلب فارغ")
    );
    assert!(checkout.store().orders().is_empty());
    assert_eq!(checkout.state(), &SubmissionState::Idle);

    Ok(())
}

#[tokio::test]
async fn invalid_phone_keeps_cart_on_disk() -> TestResult {
    let dir = TempDir::new()?;
    let mut session = open(&dir);

    session.add_item(&Product::new("tn-2", "تونر", 8_500), 2)?;

    let before = open(&dir).cart().clone();
    let mut checkout = Checkout::new(MemoryOrderStore::new());
    let form = CustomerInfo {
        phone: "0201234567".to_string(),
        ..customer()
    };

    let result = checkout.submit(&mut session, &form).await;

    assert!(
        matches!(
            result,
            Err(CheckoutError::Validation(ValidationError::InvalidPhone))
        ),
        "expected InvalidPhone, got {result:?}"
    );
    assert!(checkout.store().orders().is_empty());
    assert_eq!(session.cart(), &before);
    assert_eq!(open(&dir).cart(), &before);

    Ok(())
}

#[tokio::test]
async fn order_snapshot_is_independent_of_later_cart_changes() -> TestResult {
    let dir = TempDir::new()?;
    let mut session = open(&dir);
    let mask = Product::new("mask", "ماسك الطين", 12_500).with_image("https://cdn.example/mask.webp");

    session.add_item(&mask, 2)?;

    let mut checkout = Checkout::new(MemoryOrderStore::new());
    checkout.submit(&mut session, &customer()).await?;

    session.add_item(&mask, 5)?;

    let orders = checkout.store().orders();
    let line = orders
        .first()
        .and_then(|order| order.items().first())
        .ok_or("order has no lines")?;

    assert_eq!(line.quantity(), 2);
    assert_eq!(line.image(), Some("https://cdn.example/mask.webp"));
    assert_eq!(session.cart().line(&mask.id).map(CartLine::quantity), Some(5));

    Ok(())
}

#[tokio::test]
async fn rejected_order_reports_store_message_and_keeps_cart() -> TestResult {
    let dir = TempDir::new()?;
    let mut session = open(&dir);
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/orders"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(serde_json::json!({ "message": "duplicate key value" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    session.add_item(&Product::new(1, "كريم", 22_500), 1)?;

    let store = RestOrderStore::new(RestOrderStoreConfig::new(server.uri(), "anon"))?;
    let mut checkout = Checkout::new(store);

    let result = checkout.submit(&mut session, &customer()).await;

    assert_eq!(
        result.err().map(|error| error.user_message()).as_deref(),
        Some("duplicate key value")
    );
    assert_eq!(checkout.state(), &SubmissionState::Failed);
    assert_eq!(open(&dir).cart().len(), 1);

    Ok(())
}
