// In-process HTTP tests for the request pipeline
//
// These run against the stateless variant (no history store), so every
// handler path except persistence itself is exercised without a database.

use actix_web::{test, web, App};
use calc_svc::routes::{self, calc::AppState};
use serde_json::Value;

macro_rules! stateless_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(None)))
                .configure(routes::configure_routes),
        )
        .await
    };
}

macro_rules! get_json {
    ($app:expr, $uri:expr) => {{
        let req = test::TestRequest::get().uri($uri).to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status().as_u16();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

#[actix_web::test]
async fn test_add() {
    let app = stateless_app!();
    let (status, body) = get_json!(app, "/add?num1=2&num2=3");
    assert_eq!(status, 200);
    assert_eq!(body["result"], 5.0);
}

#[actix_web::test]
async fn test_subtract_and_multiply() {
    let app = stateless_app!();

    let (status, body) = get_json!(app, "/subtract?num1=10&num2=4");
    assert_eq!(status, 200);
    assert_eq!(body["result"], 6.0);

    let (status, body) = get_json!(app, "/multiply?num1=6&num2=7");
    assert_eq!(status, 200);
    assert_eq!(body["result"], 42.0);
}

#[actix_web::test]
async fn test_divide() {
    let app = stateless_app!();
    let (status, body) = get_json!(app, "/divide?num1=10&num2=4");
    assert_eq!(status, 200);
    assert_eq!(body["result"], 2.5);
}

#[actix_web::test]
async fn test_divide_by_zero() {
    let app = stateless_app!();
    let (status, body) = get_json!(app, "/divide?num1=10&num2=0");
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Cannot divide by zero.");
}

#[actix_web::test]
async fn test_mod() {
    let app = stateless_app!();

    let (status, body) = get_json!(app, "/mod?num1=7&num2=3");
    assert_eq!(status, 200);
    assert_eq!(body["result"], 1.0);

    let (status, body) = get_json!(app, "/mod?num1=7&num2=0");
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Cannot take modulo by zero.");
}

#[actix_web::test]
async fn test_power() {
    let app = stateless_app!();

    let (status, body) = get_json!(app, "/power?num1=2&num2=10");
    assert_eq!(status, 200);
    assert_eq!(body["result"], 1024.0);

    // base/exp are accepted as fallback parameter names
    let (status, body) = get_json!(app, "/power?base=2&exp=10");
    assert_eq!(status, 200);
    assert_eq!(body["result"], 1024.0);
}

#[actix_web::test]
async fn test_sqrt() {
    let app = stateless_app!();

    let (status, body) = get_json!(app, "/sqrt?num=9");
    assert_eq!(status, 200);
    assert_eq!(body["result"], 3.0);

    let (status, body) = get_json!(app, "/sqrt?num=-4");
    assert_eq!(status, 400);
    assert_eq!(
        body["error"],
        "Cannot take the square root of a negative number."
    );
}

#[actix_web::test]
async fn test_missing_and_garbage_operands_are_client_errors() {
    let app = stateless_app!();

    let (status, body) = get_json!(app, "/add?num1=2");
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid operands.");

    let (status, body) = get_json!(app, "/add?num1=two&num2=3");
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid operands.");

    let (status, body) = get_json!(app, "/sqrt");
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid operands.");
}

#[actix_web::test]
async fn test_liveness() {
    let app = stateless_app!();
    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    assert_eq!(
        body,
        web::Bytes::from_static(b"Calculator service is up and running!")
    );
}

#[actix_web::test]
async fn test_version() {
    let app = stateless_app!();
    let (status, body) = get_json!(app, "/version");
    assert_eq!(status, 200);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["message"].is_string());
}

#[actix_web::test]
async fn test_health() {
    let app = stateless_app!();
    let (status, body) = get_json!(app, "/health");
    assert_eq!(status, 200);
    assert_eq!(body["status"], "OK");
}

#[actix_web::test]
async fn test_history_not_registered_without_store() {
    let app = stateless_app!();
    let req = test::TestRequest::get().uri("/history").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
}
