use crate::auth::magic::{MagicLinkConfig, MagicLinkService};
use crate::router::handle;
use crate::tests::utils::{login_cookie, now_unix, read_body, test_db};
use astra::Body;
use http::{Method, Request};

#[test]
fn login_page_loads_successfully() {
    let db = test_db("login_page");

    let req = Request::builder()
        .method(Method::GET)
        .uri("/login")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &db).expect("Failed to handle request");

    assert_eq!(resp.status(), 200);

    let body = read_body(resp);
    assert!(body.contains("Sign in"));
    assert!(body.contains("form"));
}

#[test]
fn request_link_returns_partial_html_for_htmx() {
    let db = test_db("request_link");
    let email = "test@example.com";
    let body_data = format!("email={}", email);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/auth/request-link")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body_data.as_bytes().to_vec()))
        .unwrap();

    let resp = handle(req, &db).expect("Failed to handle request");

    assert_eq!(resp.status(), 200);

    let body = read_body(resp);

    // Verify success message
    assert!(body.contains("Check your email"));
    assert!(body.contains(email));

    // Verify it is a partial (no full html structure), which is crucial for HTMX swapping
    assert!(!body.contains("<!DOCTYPE html>"));
    assert!(!body.contains("<html"));
}

#[test]
fn request_link_rejects_bad_email() {
    let db = test_db("request_link_bad");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/auth/request-link")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(b"email=not-an-email".to_vec()))
        .unwrap();

    let err = handle(req, &db).expect_err("invalid email should fail");
    assert!(matches!(err, crate::errors::ServerError::BadRequest(_)));
}

#[test]
fn get_magic_consumes_link_and_sets_session_cookie() {
    let db = test_db("magic_redeem");

    // Issue a magic link directly through the service.
    let token = db
        .with_conn(|conn| {
            let svc = MagicLinkService::new(MagicLinkConfig::default());
            let issued = svc.request_link(conn, "c@d.com", now_unix())?;
            Ok(issued.token)
        })
        .unwrap();

    let req = Request::builder()
        .method(Method::GET)
        .uri(format!("/auth/magic?token={token}"))
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &db).expect("redeem should succeed");
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("Location").unwrap(), "/account");

    let cookie = resp
        .headers()
        .get("Set-Cookie")
        .expect("session cookie set")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("session="));

    // The link is single-use: a second redemption fails.
    let req = Request::builder()
        .method(Method::GET)
        .uri(format!("/auth/magic?token={token}"))
        .body(Body::empty())
        .unwrap();
    let err = handle(req, &db).expect_err("second redeem should fail");
    assert!(matches!(err, crate::errors::ServerError::Unauthorized(_)));
}

#[test]
fn account_requires_login() {
    let db = test_db("account_guard");

    let req = Request::builder()
        .method(Method::GET)
        .uri("/account")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &db).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("Location").unwrap(), "/login");
}

#[test]
fn account_loads_for_signed_in_user() {
    let db = test_db("account_ok");
    let cookie = login_cookie(&db, "dash@example.com");

    let req = Request::builder()
        .method(Method::GET)
        .uri("/account")
        .header("Cookie", cookie)
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &db).unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_body(resp);
    assert!(body.contains("dash@example.com"));
    assert!(body.contains("Your listings"));
}

#[test]
fn logout_clears_the_session() {
    let db = test_db("logout");
    let cookie = login_cookie(&db, "out@example.com");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/auth/logout")
        .header("Cookie", cookie.clone())
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &db).unwrap();
    assert_eq!(resp.status(), 303);
    let set_cookie = resp.headers().get("Set-Cookie").unwrap().to_str().unwrap();
    assert!(set_cookie.contains("Max-Age=0"));

    // The revoked session no longer authenticates.
    let req = Request::builder()
        .method(Method::GET)
        .uri("/account")
        .header("Cookie", cookie)
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &db).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("Location").unwrap(), "/login");
}
