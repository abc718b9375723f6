//! Product document persistence.

#[path = "../common/mod.rs"]
mod common;

use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};
use common::*;
use proptest::prelude::*;
use stockyard::error::AppError;

fn update_input(name: &str, slug: &str) -> UpdateProduct {
    serde_json::from_value(update_body(name, slug, 250_000.0)).expect("valid update body")
}

#[test]
fn test_placeholder_has_sample_values() {
    let conn = setup_test_db();
    let product = queries::create_placeholder_product(&conn).unwrap();

    assert!(product.id.starts_with("sy_prod_"));
    assert_eq!(product.name, "sample name");
    assert_eq!(product.price, 250_000.0);
    assert_eq!(product.purchase_price, 200_000.0);
    assert_eq!(product.cost, 10_000.0);
    assert_eq!(product.category, "Bull");
    assert_eq!(product.weight, "500 KG");
    assert_eq!(product.rating, 0.0);
    assert_eq!(product.num_reviews, 0);
    assert!(product.reviews.is_empty());

    let suffix = product.slug.strip_prefix("sample-slug-").expect("sample slug");
    assert_eq!(suffix.len(), 16);
    assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
}

#[test]
fn test_placeholder_slugs_never_collide() {
    let conn = setup_test_db();
    let mut slugs = HashSet::new();
    for _ in 0..1000 {
        let product = queries::create_placeholder_product(&conn).unwrap();
        assert!(slugs.insert(product.slug));
    }
    assert_eq!(queries::count_products(&conn).unwrap(), 1000);
}

#[test]
fn test_stored_document_matches_returned() {
    let conn = setup_test_db();
    let created = queries::create_placeholder_product(&conn).unwrap();

    let fetched = queries::get_product_by_id(&conn, &created.id)
        .unwrap()
        .expect("product should exist");
    assert_eq!(fetched, created);

    let by_slug = queries::get_product_by_slug(&conn, &created.slug)
        .unwrap()
        .expect("product by slug");
    assert_eq!(by_slug.id, created.id);
}

#[test]
fn test_update_replaces_every_field() {
    let conn = setup_test_db();
    let created = queries::create_placeholder_product(&conn).unwrap();

    let input = update_input("Bull A", "bull-a");
    assert!(queries::update_product(&conn, &created.id, &input).unwrap());

    let p = queries::get_product_by_id(&conn, &created.id).unwrap().unwrap();
    assert_eq!(p.name, "Bull A");
    assert_eq!(p.slug, "bull-a");
    assert_eq!(p.price, 250_000.0);
    assert_eq!(p.cost, 12_000.0);
    assert_eq!(p.count_in_stock, 2);
    assert_eq!(p.featured_image.as_deref(), Some("/images/bull-a-featured.jpg"));
    assert!(p.is_featured);
    assert_eq!(p.customer_name, "Rahim");
    assert_eq!(p.seller_address, "Sylhet");
    assert_eq!(
        p.sell_date,
        Some(Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap())
    );
    assert_eq!(p.created_at, created.created_at);
    assert!(p.updated_at >= created.updated_at);
}

#[test]
fn test_update_clears_omitted_optionals() {
    let conn = setup_test_db();
    let created = queries::create_placeholder_product(&conn).unwrap();

    let mut input = update_input("Bull A", "bull-a");
    input.featured_image = None;
    input.purchase_date = None;
    queries::update_product(&conn, &created.id, &input).unwrap();

    let p = queries::get_product_by_id(&conn, &created.id).unwrap().unwrap();
    assert_eq!(p.featured_image, None);
    assert_eq!(p.purchase_date, None);
}

#[test]
fn test_update_duplicate_slug_conflicts() {
    let conn = setup_test_db();
    let first = queries::create_placeholder_product(&conn).unwrap();
    let second = queries::create_placeholder_product(&conn).unwrap();

    let mut input = update_input("Bull A", "bull-a");
    queries::update_product(&conn, &first.id, &input).unwrap();

    input.name = "Bull B".into();
    let err = queries::update_product(&conn, &second.id, &input).unwrap_err();
    assert!(matches!(err, AppError::Conflict(ref m) if m == "Slug already exists"));

    // The losing document is untouched
    let p = queries::get_product_by_id(&conn, &second.id).unwrap().unwrap();
    assert_eq!(p.slug, second.slug);
}

#[test]
fn test_update_missing_row_reports_false() {
    let conn = setup_test_db();
    let input = update_input("Bull A", "bull-a");
    assert!(!queries::update_product(&conn, "sy_prod_00000000000000000000000000000000", &input).unwrap());
}

#[test]
fn test_last_writer_wins() {
    let conn = setup_test_db();
    let created = queries::create_placeholder_product(&conn).unwrap();

    queries::update_product(&conn, &created.id, &update_input("First", "first")).unwrap();
    queries::update_product(&conn, &created.id, &update_input("Second", "second")).unwrap();

    let p = queries::get_product_by_id(&conn, &created.id).unwrap().unwrap();
    assert_eq!(p.name, "Second");
    assert_eq!(p.slug, "second");
    assert!(queries::get_product_by_slug(&conn, "first").unwrap().is_none());
}

#[test]
fn test_delete_is_hard_and_reports_missing() {
    let conn = setup_test_db();
    let created = queries::create_placeholder_product(&conn).unwrap();

    assert!(queries::delete_product(&conn, &created.id).unwrap());
    assert!(queries::get_product_by_id(&conn, &created.id).unwrap().is_none());
    assert!(!queries::delete_product(&conn, &created.id).unwrap());
}

#[test]
fn test_list_newest_first() {
    let conn = setup_test_db();
    let a = queries::create_placeholder_product(&conn).unwrap();
    let b = queries::create_placeholder_product(&conn).unwrap();
    let c = queries::create_placeholder_product(&conn).unwrap();

    let ids: Vec<String> = queries::list_products(&conn)
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);
}

#[test]
fn test_schema_rejects_negative_stock() {
    let conn = setup_test_db();
    let created = queries::create_placeholder_product(&conn).unwrap();

    let result = conn.execute(
        "UPDATE products SET count_in_stock = -1 WHERE id = ?1",
        [&created.id],
    );
    assert!(result.is_err());
}

/// Required free-text field: starts with a letter so it is never blank.
const TEXT: &str = "[A-Za-z][A-Za-z0-9 ,.'/-]{0,40}";

fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_102_444_800).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

prop_compose! {
    fn valid_update()(
        (name, category, image, tag, brand, description) in (TEXT, TEXT, TEXT, TEXT, TEXT, TEXT),
        (breed, weight, customer_name, customer_phone, customer_address, seller_name)
            in (TEXT, TEXT, TEXT, TEXT, TEXT, TEXT),
        seller_address in TEXT,
        slug in "[a-z0-9][a-z0-9-]{0,40}",
        (price, purchase_price, cost) in (0.0f64..1e9, 0.0f64..1e9, 0.0f64..1e9),
        count_in_stock in 0i64..100_000,
        featured_image in proptest::option::of(TEXT),
        is_featured in any::<bool>(),
        purchase_date in proptest::option::of(timestamp()),
        sell_date in proptest::option::of(timestamp()),
    ) -> UpdateProduct {
        UpdateProduct {
            name,
            slug,
            category,
            image,
            price,
            purchase_price,
            cost,
            tag,
            brand,
            count_in_stock,
            description,
            featured_image,
            is_featured,
            breed,
            weight,
            customer_name,
            customer_phone,
            customer_address,
            seller_name,
            seller_address,
            purchase_date,
            sell_date,
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any valid full replacement reads back field for field.
    #[test]
    fn prop_update_then_read_returns_submitted_fields(input in valid_update()) {
        prop_assert!(input.validate().is_ok());

        let conn = setup_test_db();
        let created = queries::create_placeholder_product(&conn).unwrap();
        prop_assert!(queries::update_product(&conn, &created.id, &input).unwrap());

        let p = queries::get_product_by_id(&conn, &created.id).unwrap().unwrap();
        prop_assert_eq!(&p.name, &input.name);
        prop_assert_eq!(&p.slug, &input.slug);
        prop_assert_eq!(&p.category, &input.category);
        prop_assert_eq!(&p.image, &input.image);
        prop_assert_eq!(p.price, input.price);
        prop_assert_eq!(p.purchase_price, input.purchase_price);
        prop_assert_eq!(p.cost, input.cost);
        prop_assert_eq!(&p.tag, &input.tag);
        prop_assert_eq!(&p.brand, &input.brand);
        prop_assert_eq!(p.count_in_stock, input.count_in_stock);
        prop_assert_eq!(&p.description, &input.description);
        prop_assert_eq!(&p.featured_image, &input.featured_image);
        prop_assert_eq!(p.is_featured, input.is_featured);
        prop_assert_eq!(&p.breed, &input.breed);
        prop_assert_eq!(&p.weight, &input.weight);
        prop_assert_eq!(&p.customer_name, &input.customer_name);
        prop_assert_eq!(&p.customer_phone, &input.customer_phone);
        prop_assert_eq!(&p.customer_address, &input.customer_address);
        prop_assert_eq!(&p.seller_name, &input.seller_name);
        prop_assert_eq!(&p.seller_address, &input.seller_address);
        prop_assert_eq!(p.purchase_date, input.purchase_date);
        prop_assert_eq!(p.sell_date, input.sell_date);

        // Server-owned fields survive the replacement
        prop_assert_eq!(p.id, created.id);
        prop_assert_eq!(p.created_at, created.created_at);
        prop_assert_eq!(p.num_reviews, created.num_reviews);
    }
}
