use crate::db::connection::Database;
use crate::db::listings::{create_listing, get_listing};
use crate::domain::posting::{NewListingInput, VehicleType};
use crate::domain::pricing::PricingFields;
use crate::router::handle;
use crate::tests::utils::{login_cookie, now_unix, read_body, seed_user, test_db};
use astra::Body;
use http::{Method, Request};

fn seed_listing(db: &Database, seller: i64) -> String {
    let input = NewListingInput {
        vehicle_type: VehicleType::Suv,
        make: "Nissan".to_string(),
        model: "Patrol".to_string(),
        year: 2017,
        location: "Addis Ababa".to_string(),
        mileage_km: Some(110_000),
        fuel_type: Some("diesel".to_string()),
        transmission: Some("automatic".to_string()),
        color: None,
        seats: Some(7),
        engine_cc: None,
        payload_kg: None,
        description: None,
        pricing: PricingFields {
            pricing_type: Some("cash".to_string()),
            price: 4_800_000,
            ..Default::default()
        },
        photos: vec![],
    };
    create_listing(db, seller, &input, now_unix()).expect("seed listing")
}

fn post_form(db: &Database, uri: &str, cookie: &str, form: &str) -> astra::Response {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Cookie", cookie)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(form.as_bytes().to_vec()))
        .unwrap();
    handle(req, db).expect("Failed to handle request")
}

fn get_account(db: &Database, cookie: &str) -> String {
    let req = Request::builder()
        .method(Method::GET)
        .uri("/account")
        .header("Cookie", cookie)
        .body(Body::empty())
        .unwrap();
    read_body(handle(req, db).unwrap())
}

#[test]
fn profile_update_round_trips() {
    let db = test_db("profile_update");
    let cookie = login_cookie(&db, "sara@example.com");

    let resp = post_form(
        &db,
        "/account/profile",
        &cookie,
        "display_name=Sara+T&phone=%2B251911000000&location=Hawassa",
    );
    assert_eq!(resp.status(), 303);

    let body = get_account(&db, &cookie);
    assert!(body.contains("Sara T"));
    assert!(body.contains("Hawassa"));
}

#[test]
fn business_profile_switches_seller_to_dealer_and_back() {
    let db = test_db("business_profile");
    let cookie = login_cookie(&db, "dealer@example.com");
    let seller = seed_user(&db, "dealer@example.com");
    let listing_id = seed_listing(&db, seller);

    post_form(
        &db,
        "/account/business",
        &cookie,
        "business_name=Bole+Motors&phone=%2B251922000000&location=Addis+Ababa",
    );

    // The detail page now shows a dealer block.
    let req = Request::builder()
        .method(Method::GET)
        .uri(format!("/listings/{listing_id}"))
        .body(Body::empty())
        .unwrap();
    let body = read_body(handle(req, &db).unwrap());
    assert!(body.contains("Dealer"));
    assert!(body.contains("Bole Motors"));

    // Clearing the business name reverts to a private seller.
    post_form(&db, "/account/business", &cookie, "business_name=");
    let req = Request::builder()
        .method(Method::GET)
        .uri(format!("/listings/{listing_id}"))
        .body(Body::empty())
        .unwrap();
    let body = read_body(handle(req, &db).unwrap());
    assert!(body.contains("Private seller"));
}

#[test]
fn promote_sets_flag_and_expiry_from_days() {
    let db = test_db("promote_flow");
    let cookie = login_cookie(&db, "seller@example.com");
    let seller = seed_user(&db, "seller@example.com");
    let listing_id = seed_listing(&db, seller);

    let resp = post_form(
        &db,
        &format!("/listings/{listing_id}/promote"),
        &cookie,
        "tier=boosted&days=7",
    );
    assert_eq!(resp.status(), 303);

    let detail = get_listing(&db, &listing_id).unwrap().unwrap();
    assert!(detail.summary.promotions.is_boosted);
    let until = detail.summary.promotions.boosted_until.expect("expiry set");
    assert!(until > now_unix());

    // The account page now shows the badge on the row.
    let body = get_account(&db, &cookie);
    assert!(body.contains("badge-boosted"));
}

#[test]
fn promote_rejects_unknown_tier() {
    let db = test_db("promote_bad_tier");
    let cookie = login_cookie(&db, "seller@example.com");
    let seller = seed_user(&db, "seller@example.com");
    let listing_id = seed_listing(&db, seller);

    let req = Request::builder()
        .method(Method::POST)
        .uri(format!("/listings/{listing_id}/promote"))
        .header("Cookie", cookie)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(b"tier=mega&days=7".to_vec()))
        .unwrap();

    let err = handle(req, &db).expect_err("unknown tier should fail");
    assert!(matches!(err, crate::errors::ServerError::BadRequest(_)));
}

#[test]
fn only_the_owner_can_mark_sold() {
    let db = test_db("sold_owner");
    let owner_cookie = login_cookie(&db, "owner@example.com");
    let owner = seed_user(&db, "owner@example.com");
    let listing_id = seed_listing(&db, owner);

    let other_cookie = login_cookie(&db, "other@example.com");
    let req = Request::builder()
        .method(Method::POST)
        .uri(format!("/listings/{listing_id}/sold"))
        .header("Cookie", other_cookie)
        .body(Body::empty())
        .unwrap();
    let err = handle(req, &db).expect_err("non-owner cannot mark sold");
    assert!(matches!(err, crate::errors::ServerError::NotFound));

    let resp = post_form(&db, &format!("/listings/{listing_id}/sold"), &owner_cookie, "");
    assert_eq!(resp.status(), 303);

    let detail = get_listing(&db, &listing_id).unwrap().unwrap();
    assert!(detail.summary.is_sold);
}
