use crate::db::connection::Database;
use crate::db::listings::{apply_promotion, create_listing, PromotionTier};
use crate::domain::posting::VehicleType;
use crate::domain::posting::NewListingInput;
use crate::domain::pricing::PricingFields;
use crate::router::handle;
use crate::tests::utils::{now_unix, read_body, seed_user, test_db};
use astra::Body;
use http::{Method, Request};

fn seed_listing(db: &Database, seller: i64, make: &str, model: &str, price: i64) -> String {
    let input = NewListingInput {
        vehicle_type: VehicleType::Car,
        make: make.to_string(),
        model: model.to_string(),
        year: 2018,
        location: "Addis Ababa".to_string(),
        mileage_km: Some(80_000),
        fuel_type: Some("petrol".to_string()),
        transmission: Some("manual".to_string()),
        color: None,
        seats: None,
        engine_cc: None,
        payload_kg: None,
        description: Some("clean and serviced".to_string()),
        pricing: PricingFields {
            pricing_type: Some("cash".to_string()),
            price,
            ..Default::default()
        },
        photos: vec![],
    };
    create_listing(db, seller, &input, now_unix()).expect("seed listing")
}

fn get(db: &Database, uri: &str) -> astra::Response {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    handle(req, db).expect("Failed to handle request")
}

#[test]
fn home_page_shows_seeded_listings() {
    let db = test_db("home_feed");
    let seller = seed_user(&db, "seller@example.com");
    seed_listing(&db, seller, "Toyota", "Corolla", 1_200_000);

    let resp = get(&db, "/");
    assert_eq!(resp.status(), 200);

    let body = read_body(resp);
    assert!(body.contains("2018 Toyota Corolla"));
    assert!(body.contains("1,200,000 Br"));
}

#[test]
fn empty_feed_shows_the_empty_state() {
    let db = test_db("empty_feed");

    let body = read_body(get(&db, "/listings"));
    assert!(body.contains("No listings match your search."));
}

#[test]
fn browse_filters_narrow_the_feed() {
    let db = test_db("browse_filters");
    let seller = seed_user(&db, "seller@example.com");
    seed_listing(&db, seller, "Toyota", "Corolla", 1_200_000);
    seed_listing(&db, seller, "Nissan", "Patrol", 4_800_000);

    let body = read_body(get(&db, "/listings?make=toyota"));
    assert!(body.contains("Toyota Corolla"));
    assert!(!body.contains("Nissan Patrol"));

    let body = read_body(get(&db, "/listings?min_price=2000000"));
    assert!(!body.contains("Toyota Corolla"));
    assert!(body.contains("Nissan Patrol"));
}

#[test]
fn promoted_listings_get_sections_and_badges() {
    let db = test_db("promoted_sections");
    let seller = seed_user(&db, "seller@example.com");

    let featured = seed_listing(&db, seller, "Toyota", "Land Cruiser", 9_000_000);
    let boosted = seed_listing(&db, seller, "Suzuki", "Dzire", 900_000);
    seed_listing(&db, seller, "Hyundai", "i10", 700_000);

    apply_promotion(&db, &featured, seller, PromotionTier::Featured, None).unwrap();
    apply_promotion(&db, &boosted, seller, PromotionTier::Boosted, None).unwrap();

    let body = read_body(get(&db, "/listings"));
    assert!(body.contains("Featured"));
    assert!(body.contains("Recently Boosted"));
    // Regular section gets its heading only because a boosted section rendered.
    assert!(body.contains("All Listings"));
    assert!(body.contains("badge-featured"));

    // Section order: featured before boosted before regular.
    let featured_pos = body.find("feed-featured").unwrap();
    let boosted_pos = body.find("feed-boosted").unwrap();
    let regular_pos = body.find("feed-regular").unwrap();
    assert!(featured_pos < boosted_pos && boosted_pos < regular_pos);
}

#[test]
fn detail_page_renders_and_counts_views() {
    let db = test_db("detail_page");
    let seller = seed_user(&db, "seller@example.com");
    let id = seed_listing(&db, seller, "Toyota", "Vitz", 950_000);

    let body = read_body(get(&db, &format!("/listings/{id}")));
    assert!(body.contains("2018 Toyota Vitz"));
    assert!(body.contains("950,000 Br"));
    assert!(body.contains("Private seller"));
    assert!(body.contains("clean and serviced"));
    assert!(body.contains("1 views"));

    let body = read_body(get(&db, &format!("/listings/{id}")));
    assert!(body.contains("2 views"));
}

#[test]
fn unknown_listing_is_not_found() {
    let db = test_db("detail_404");

    let req = Request::builder()
        .method(Method::GET)
        .uri("/listings/nope")
        .body(Body::empty())
        .unwrap();

    let err = handle(req, &db).expect_err("missing listing should 404");
    assert!(matches!(err, crate::errors::ServerError::NotFound));
}

#[test]
fn estimate_partial_computes_or_declines() {
    let db = test_db("estimate");
    let seller = seed_user(&db, "seller@example.com");
    let id = seed_listing(&db, seller, "Toyota", "Corolla", 5_500_000);

    let body = read_body(get(
        &db,
        &format!("/listings/{id}/estimate?down_payment=1100000&annual_rate_pct=12&months=60"),
    ));
    assert!(body.contains("Estimated payment"));

    // Zero rate: no payment is produced.
    let body = read_body(get(
        &db,
        &format!("/listings/{id}/estimate?down_payment=0&annual_rate_pct=0&months=60"),
    ));
    assert!(body.contains("No payment can be computed"));
}
