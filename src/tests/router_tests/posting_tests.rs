use crate::db::connection::Database;
use crate::router::handle;
use crate::tests::utils::{login_cookie, read_body, test_db};
use astra::Body;
use http::{Method, Request};

fn get(db: &Database, uri: &str, cookie: &str) -> astra::Response {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Cookie", cookie)
        .body(Body::empty())
        .unwrap();
    handle(req, db).expect("Failed to handle request")
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

#[test]
fn sell_requires_login() {
    let db = test_db("sell_guard");

    let req = Request::builder()
        .method(Method::GET)
        .uri("/sell")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &db).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("Location").unwrap(), "/login");
}

#[test]
fn wizard_starts_on_the_vehicle_step() {
    let db = test_db("sell_start");
    let cookie = login_cookie(&db, "poster@example.com");

    let body = read_body(get(&db, "/sell", &cookie));
    assert!(body.contains("Sell your vehicle"));
    assert!(body.contains("vehicle_type"));
}

#[test]
fn invalid_step_submission_shows_errors_and_stays() {
    let db = test_db("sell_invalid");
    let cookie = login_cookie(&db, "poster@example.com");

    let body = read_body(post_form(&db, "/sell/step", &cookie, "make=Toyota"));
    assert!(body.contains("model is required"));
    // Still on the vehicle step: the vehicle type selector is rendered.
    assert!(body.contains("Choose a type..."));
}

#[test]
fn full_wizard_publishes_a_listing() {
    let db = test_db("sell_publish");
    let cookie = login_cookie(&db, "poster@example.com");

    // Step 1: vehicle
    let body = read_body(post_form(
        &db,
        "/sell/step",
        &cookie,
        "vehicle_type=car&make=Toyota&model=Corolla&year=2019&location=Addis+Ababa",
    ));
    assert!(body.contains("Mileage"));

    // Step 2: specs
    let body = read_body(post_form(
        &db,
        "/sell/step",
        &cookie,
        "mileage_km=45000&fuel_type=petrol&transmission=automatic",
    ));
    assert!(body.contains("How is it priced?"));

    // Step 3: pricing (finance takeover)
    let body = read_body(post_form(
        &db,
        "/sell/step",
        &cookie,
        "pricing_type=finance&outstanding_balance=3500000&asking_price=3200000&negotiable=on",
    ));
    assert!(body.contains("Photo URLs"));

    // Step 4: photos
    let body = read_body(post_form(
        &db,
        "/sell/step",
        &cookie,
        "photo_urls=https%3A%2F%2Fimg.example%2Fa.jpg",
    ));
    assert!(body.contains("Review your listing"));

    // Step 5: publish
    let resp = post_form(&db, "/sell/publish", &cookie, "");
    assert_eq!(resp.status(), 303);
    let location = resp
        .headers()
        .get("Location")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("/listings/"));

    // The published listing renders with the finance asking price.
    let req = Request::builder()
        .method(Method::GET)
        .uri(location)
        .body(Body::empty())
        .unwrap();
    let body = read_body(handle(req, &db).unwrap());
    assert!(body.contains("2019 Toyota Corolla"));
    assert!(body.contains("3,200,000 Br"));
    assert!(body.contains("Outstanding balance"));
    assert!(body.contains("Negotiable"));

    // The draft is gone: /sell starts over.
    let body = read_body(get(&db, "/sell", &cookie));
    assert!(body.contains("Choose a type..."));
}

#[test]
fn draft_survives_between_requests_and_back_steps() {
    let db = test_db("sell_resume");
    let cookie = login_cookie(&db, "poster@example.com");

    read_body(post_form(
        &db,
        "/sell/step",
        &cookie,
        "vehicle_type=truck&make=Isuzu&model=NPR&year=2015&location=Adama",
    ));

    // Resuming lands on the specs step with truck-only fields.
    let body = read_body(get(&db, "/sell", &cookie));
    assert!(body.contains("Payload (kg)"));
    assert!(!body.contains("Seats"));

    // Back returns to the vehicle step with values kept.
    let body = read_body(post_form(&db, "/sell/back", &cookie, ""));
    assert!(body.contains("Isuzu"));
}
