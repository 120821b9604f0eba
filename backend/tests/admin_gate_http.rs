//! Admin gate behaviour over the assembled application.
//!
//! Covers the login round trip, cookie-driven access to protected pages and
//! API routes, and the two denial shapes (JSON 401 for the API, redirect for
//! pages). Admin page files are never reachable as static assets.

mod support;

use actix_web::http::{StatusCode, header};
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use support::{ADMIN_TOKEN, STAFF_TOKEN, World, login, session_cookie};

fn location<B>(res: &actix_web::dev::ServiceResponse<B>) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

#[rstest]
#[case("/dashboard")]
#[case("/detail-siswa")]
#[case("/statistik")]
#[case("/aduan-siswa")]
#[actix_rt::test]
async fn anonymous_page_requests_redirect_to_login(#[case] path: &str) {
    let world = World::new();
    let app = world.app().await;

    let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some("/login"));
    assert!(test::read_body(res).await.is_empty());
}

#[rstest]
#[case("/api/v1/complaints")]
#[case("/api/v1/notifications/subscription")]
#[actix_rt::test]
async fn anonymous_api_requests_get_json_401(#[case] path: &str) {
    let world = World::new();
    let app = world.app().await;

    let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(location(&res).is_none());
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
}

#[rstest]
#[case("/")]
#[case("/login")]
#[case("/form-aduan")]
#[case("/api/v1/violations")]
#[case("/api/v1/complaints/stats")]
#[actix_rt::test]
async fn public_routes_need_no_session(#[case] path: &str) {
    let world = World::new();
    let app = world.app().await;

    let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn admin_login_unlocks_pages_and_api() {
    let world = World::new();
    let app = world.app().await;
    let cookie = login(&app, ADMIN_TOKEN).await;

    let page = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/dashboard")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(page.status(), StatusCode::OK);

    let api = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/complaints")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(api.status(), StatusCode::OK);
    let body: Value = test::read_body_json(api).await;
    assert_eq!(body, json!([]));
}

#[actix_rt::test]
async fn login_without_admin_claim_is_forbidden_and_sets_no_cookie() {
    let world = World::new();
    let app = world.app().await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "idToken": STAFF_TOKEN }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert!(session_cookie(&res).is_none());
}

#[actix_rt::test]
async fn login_with_unknown_token_is_unauthorized() {
    let world = World::new();
    let app = world.app().await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "idToken": "forged" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
}

#[actix_rt::test]
async fn revoked_session_is_treated_as_missing() {
    let world = World::new();
    let app = world.app().await;
    let cookie = login(&app, ADMIN_TOKEN).await;
    world.identity.revoke(&format!("session:{ADMIN_TOKEN}"));

    let page = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/statistik")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(page.status(), StatusCode::FOUND);
    assert_eq!(location(&page), Some("/login"));

    let api = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/violations/6f1c3a52-9a53-4d8e-9c55-2f7a4b0d6e11")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(api.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn logout_redirects_and_clears_the_cookie() {
    let world = World::new();
    let app = world.app().await;
    let cookie = login(&app, ADMIN_TOKEN).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some("/login"));
    let cleared = session_cookie(&res).expect("removal cookie");
    assert!(cleared.value().is_empty());
}

#[actix_rt::test]
async fn static_assets_are_public() {
    let world = World::new();
    let app = world.app().await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/app.js").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(test::read_body(res).await, "console.log('ready');");
}

#[rstest]
#[case("/dashboard.html")]
#[case("/detail-siswa.html")]
#[case("/statistik.html")]
#[case("/aduan-siswa.html")]
#[actix_rt::test]
async fn admin_page_files_are_not_served_as_assets(#[case] path: &str) {
    let world = World::new();
    let app = world.app().await;
    let cookie = login(&app, ADMIN_TOKEN).await;

    for req in [
        test::TestRequest::get().uri(path),
        test::TestRequest::get().uri(path).cookie(cookie.clone()),
    ] {
        let res = test::call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}

#[rstest]
#[case("/api/v1/complaints/6f1c3a52-9a53-4d8e-9c55-2f7a4b0d6e11/status", "PATCH")]
#[case("/api/v1/violations", "POST")]
#[case("/api/v1/notifications/subscription", "PUT")]
#[actix_rt::test]
async fn anonymous_writes_with_unreadable_bodies_get_401(#[case] path: &str, #[case] method: &str) {
    let world = World::new();
    let app = world.app().await;
    let method = actix_web::http::Method::from_bytes(method.as_bytes()).expect("method");

    let res = test::call_service(
        &app,
        test::TestRequest::default()
            .method(method)
            .uri(path)
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload("{")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
}
