use astra::{Body, Request};
use std::collections::HashMap;
use std::io::Read;

use crate::auth::sessions;
use crate::db::connection::Database;
use crate::db::listings::{ListingFilter, PromotionTier};
use crate::db::{drafts, listings, magic_auth, profiles};
use crate::domain::placement::classify;
use crate::domain::pricing::monthly_payment;
use crate::domain::sections::compose;
use crate::errors::ServerError;
use crate::mailer::BrevoMailer;
use crate::responses::{html_response, redirect, redirect_with_cookie, ResultResp};
use crate::templates;
use crate::templates::pages;

pub fn handle(req: Request, db: &Database) -> ResultResp {
    let now = chrono::Utc::now().timestamp();
    handle_at(req, db, now)
}

/// Entry point with an explicit clock so tests can pin time.
pub fn handle_at(mut req: Request, db: &Database, now: i64) -> ResultResp {
    // Take the body out up front; the request itself stays borrowable for
    // headers and query parsing.
    let body = std::mem::replace(req.body_mut(), Body::empty());
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => home(&req, db, now),
        ("GET", "/listings") => browse(&req, db, now),
        ("GET", p) if p.starts_with("/static/") => static_file(p),

        ("GET", "/login") => html_response(pages::login_page()),
        ("POST", "/auth/request-link") => request_link(body, db, now),
        ("GET", "/auth/magic") => redeem_magic(&req, db, now),
        ("POST", "/auth/logout") => logout(&req, db, now),

        ("GET", "/sell") => sell_start(&req, db, now),
        ("POST", "/sell/step") => sell_step(&req, body, db, now),
        ("POST", "/sell/back") => sell_back(&req, db, now),
        ("POST", "/sell/publish") => sell_publish(&req, db, now),

        ("GET", "/account") => account(&req, db, now),
        ("POST", "/account/profile") => update_profile(&req, body, db, now),
        ("POST", "/account/business") => update_business(&req, body, db, now),

        _ => listing_routes(&req, body, db, now, &method, &path),
    }
}

/// Routes under /listings/{id}.
fn listing_routes(
    req: &Request,
    body: Body,
    db: &Database,
    now: i64,
    method: &str,
    path: &str,
) -> ResultResp {
    let Some(rest) = path.strip_prefix("/listings/") else {
        return Err(ServerError::NotFound);
    };

    match (method, rest.split_once('/')) {
        ("GET", None) => listing_detail(req, db, rest, now),
        ("GET", Some((id, "estimate"))) => estimate(req, db, id),
        ("POST", Some((id, "sold"))) => mark_sold(req, db, id, now),
        ("POST", Some((id, "promote"))) => promote(req, body, db, id, now),
        _ => Err(ServerError::NotFound),
    }
}

/// Serve files from ./static relative to the working directory.
fn static_file(path: &str) -> ResultResp {
    let rel = path.trim_start_matches('/');
    if rel.contains("..") {
        return Err(ServerError::NotFound);
    }

    let bytes = std::fs::read(rel).map_err(|_| ServerError::NotFound)?;
    let content_type = match rel.rsplit_once('.').map(|(_, ext)| ext) {
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    };

    crate::responses::file_response(bytes, content_type)
}

// ---------- Browsing ----------

fn home(req: &Request, db: &Database, now: i64) -> ResultResp {
    let signed_in = current_user(req, db, now)?.is_some();
    let page = listings::browse_listings(db, &ListingFilter::default())?;
    let plan = compose(classify(page, now));
    html_response(pages::home_page(&plan, now, signed_in))
}

fn browse(req: &Request, db: &Database, now: i64) -> ResultResp {
    let signed_in = current_user(req, db, now)?.is_some();
    let query = parse_query(req);
    let filter = filter_from_query(&query);

    let page = listings::browse_listings(db, &filter)?;
    let plan = compose(classify(page, now));

    html_response(pages::browse_page(&pages::BrowseVm {
        filter: &filter,
        plan,
        now,
        signed_in,
    }))
}

fn listing_detail(req: &Request, db: &Database, id: &str, now: i64) -> ResultResp {
    let signed_in = current_user(req, db, now)?.is_some();

    listings::increment_view_count(db, id)?;
    let Some(detail) = listings::get_listing(db, id)? else {
        return Err(ServerError::NotFound);
    };
    let seller = profiles::seller_for_user(db, detail.seller_id)?;

    html_response(pages::listing_page(&pages::ListingPageVm {
        detail: &detail,
        seller: &seller,
        now,
        signed_in,
    }))
}

fn estimate(req: &Request, db: &Database, id: &str) -> ResultResp {
    let Some(detail) = listings::get_listing(db, id)? else {
        return Err(ServerError::NotFound);
    };

    let query = parse_query(req);
    let down_payment: i64 = query
        .get("down_payment")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let annual_rate_pct: f64 = query
        .get("annual_rate_pct")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0.0);
    let months: u32 = query
        .get("months")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let principal = detail.summary.pricing.price - down_payment;
    let payment = monthly_payment(principal, annual_rate_pct, months);

    html_response(pages::estimate_result(payment))
}

// ---------- Auth ----------

fn request_link(body: Body, db: &Database, now: i64) -> ResultResp {
    let form = parse_form(body)?;
    let Some(email) = form.get("email") else {
        return Err(ServerError::BadRequest("missing email".into()));
    };

    let issued = magic_auth::request_magic_link(db, email, now)?;

    match BrevoMailer::from_env() {
        Some(mailer) => {
            if let Err(e) = mailer.send_magic_link(&issued.email, &issued.link) {
                eprintln!("Failed to send sign-in email to {}: {e}", issued.email);
                return html_response(templates::error_banner(
                    "We couldn't send the email. Please try again.",
                ));
            }
        }
        // Local dev: no mailer configured, log the link instead.
        None => println!("Magic link for {}: {}", issued.email, issued.link),
    }

    html_response(pages::check_email_partial(&issued.email))
}

fn redeem_magic(req: &Request, db: &Database, now: i64) -> ResultResp {
    let query = parse_query(req);
    let Some(token) = query.get("token") else {
        return Err(ServerError::BadRequest("missing token".into()));
    };

    let redeemed = magic_auth::redeem_magic_link(db, token, now)?;
    let session_token =
        db.with_conn(|conn| sessions::create_session(conn, redeemed.user_id, now))?;

    redirect_with_cookie("/account", &sessions::session_cookie(&session_token))
}

fn logout(req: &Request, db: &Database, now: i64) -> ResultResp {
    if let Some(token) = session_token(req) {
        db.with_conn(|conn| sessions::revoke_session(conn, &token, now))?;
    }
    redirect_with_cookie("/", &sessions::clear_session_cookie())
}

// ---------- Posting flow ----------

fn sell_start(req: &Request, db: &Database, now: i64) -> ResultResp {
    let Some((user_id, _)) = current_user(req, db, now)? else {
        return redirect("/login");
    };

    let draft = drafts::load_draft(db, user_id)?.unwrap_or_default();
    html_response(pages::post_page(&pages::PostVm {
        draft: &draft,
        errors: &[],
    }))
}

fn sell_step(req: &Request, body: Body, db: &Database, now: i64) -> ResultResp {
    let Some((user_id, _)) = current_user(req, db, now)? else {
        return redirect("/login");
    };

    let form = parse_form(body)?;
    let mut draft = drafts::load_draft(db, user_id)?.unwrap_or_default();
    draft.apply_step_form(draft.step, &form);

    let errors = match draft.advance() {
        Ok(_) => Vec::new(),
        Err(errors) => errors,
    };
    drafts::save_draft(db, user_id, &draft, now)?;

    html_response(pages::post_page(&pages::PostVm {
        draft: &draft,
        errors: &errors,
    }))
}

fn sell_back(req: &Request, db: &Database, now: i64) -> ResultResp {
    let Some((user_id, _)) = current_user(req, db, now)? else {
        return redirect("/login");
    };

    let mut draft = drafts::load_draft(db, user_id)?.unwrap_or_default();
    draft.step_back();
    drafts::save_draft(db, user_id, &draft, now)?;

    html_response(pages::post_page(&pages::PostVm {
        draft: &draft,
        errors: &[],
    }))
}

fn sell_publish(req: &Request, db: &Database, now: i64) -> ResultResp {
    let Some((user_id, _)) = current_user(req, db, now)? else {
        return redirect("/login");
    };

    let draft = drafts::load_draft(db, user_id)?.unwrap_or_default();
    match draft.validate_for_publish() {
        Ok(input) => {
            let id = listings::create_listing(db, user_id, &input, now)?;
            drafts::delete_draft(db, user_id)?;
            redirect(&format!("/listings/{id}"))
        }
        Err(errors) => html_response(pages::post_page(&pages::PostVm {
            draft: &draft,
            errors: &errors,
        })),
    }
}

// ---------- Account ----------

fn account(req: &Request, db: &Database, now: i64) -> ResultResp {
    let Some((user_id, email)) = current_user(req, db, now)? else {
        return redirect("/login");
    };

    let seller = profiles::seller_for_user(db, user_id)?;
    let own = listings::listings_by_seller(db, user_id)?;

    html_response(pages::account_page(&pages::AccountVm {
        email: &email,
        seller: &seller,
        listings: &own,
        now,
    }))
}

fn update_profile(req: &Request, body: Body, db: &Database, now: i64) -> ResultResp {
    let Some((user_id, _)) = current_user(req, db, now)? else {
        return redirect("/login");
    };

    let form = parse_form(body)?;
    let display_name = form
        .get("display_name")
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServerError::BadRequest("display name is required".into()))?;

    profiles::upsert_profile(
        db,
        user_id,
        &profiles::ProfileUpdate {
            display_name: display_name.to_string(),
            phone: form_value(&form, "phone"),
            location: form_value(&form, "location"),
        },
        now,
    )?;

    redirect("/account")
}

fn update_business(req: &Request, body: Body, db: &Database, now: i64) -> ResultResp {
    let Some((user_id, _)) = current_user(req, db, now)? else {
        return redirect("/login");
    };

    let form = parse_form(body)?;
    match form_value(&form, "business_name") {
        // An empty name switches the account back to a private seller.
        None => profiles::delete_business_profile(db, user_id)?,
        Some(business_name) => profiles::upsert_business_profile(
            db,
            user_id,
            &profiles::BusinessUpdate {
                business_name,
                phone: form_value(&form, "phone"),
                location: form_value(&form, "location"),
                about: form_value(&form, "about"),
            },
            now,
        )?,
    }

    redirect("/account")
}

fn mark_sold(req: &Request, db: &Database, id: &str, now: i64) -> ResultResp {
    let Some((user_id, _)) = current_user(req, db, now)? else {
        return redirect("/login");
    };

    if !listings::mark_sold(db, id, user_id)? {
        return Err(ServerError::NotFound);
    }
    redirect("/account")
}

fn promote(req: &Request, body: Body, db: &Database, id: &str, now: i64) -> ResultResp {
    let Some((user_id, _)) = current_user(req, db, now)? else {
        return redirect("/login");
    };

    let form = parse_form(body)?;
    let tier = form
        .get("tier")
        .and_then(|t| PromotionTier::parse(t))
        .ok_or_else(|| ServerError::BadRequest("unknown promotion tier".into()))?;
    // Blank duration = promotion with no expiry.
    let until = form
        .get("days")
        .and_then(|d| d.trim().parse::<i64>().ok())
        .filter(|d| *d > 0)
        .map(|d| now + d * 86_400);

    if !listings::apply_promotion(db, id, user_id, tier, until)? {
        return Err(ServerError::NotFound);
    }
    redirect("/account")
}

// ---------- Request plumbing ----------

fn session_token(req: &Request) -> Option<String> {
    let header = req.headers().get("cookie")?.to_str().ok()?;
    sessions::session_token_from_cookie_header(header).map(String::from)
}

fn current_user(
    req: &Request,
    db: &Database,
    now: i64,
) -> Result<Option<(i64, String)>, ServerError> {
    let Some(token) = session_token(req) else {
        return Ok(None);
    };
    db.with_conn(|conn| sessions::load_user_from_session(conn, &token, now))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    let mut map = HashMap::new();
    if let Some(q) = req.uri().query() {
        for (k, v) in url::form_urlencoded::parse(q.as_bytes()) {
            map.insert(k.into_owned(), v.into_owned());
        }
    }
    map
}

fn parse_form(mut body: Body) -> Result<HashMap<String, String>, ServerError> {
    let mut bytes = Vec::new();
    body.reader()
        .read_to_end(&mut bytes)
        .map_err(|e| ServerError::BadRequest(format!("unreadable body: {e}")))?;

    let mut map = HashMap::new();
    for (k, v) in url::form_urlencoded::parse(&bytes) {
        map.insert(k.into_owned(), v.into_owned());
    }
    Ok(map)
}

fn form_value(form: &HashMap<String, String>, key: &str) -> Option<String> {
    form.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn filter_from_query(query: &HashMap<String, String>) -> ListingFilter {
    let text = |key: &str| {
        query
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(String::from)
    };
    let num = |key: &str| query.get(key).and_then(|v| v.trim().parse::<i64>().ok());

    ListingFilter {
        vehicle_type: text("vehicle_type"),
        make: text("make"),
        model: text("model"),
        min_price: num("min_price"),
        max_price: num("max_price"),
        location: text("location"),
        limit: num("limit"),
        offset: num("offset"),
    }
}
