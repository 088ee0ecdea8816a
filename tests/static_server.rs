use std::fs;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use codekids_back::{routes, state::ServerState};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

const ORIGIN: &str = "http://example.test";

fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<h1>CodeKids</h1>").unwrap();
    fs::write(dir.path().join("hello.txt"), "hello").unwrap();
    fs::create_dir(dir.path().join("projects")).unwrap();
    fs::write(dir.path().join("projects/index.html"), "projects").unwrap();
    fs::create_dir_all(dir.path().join("assets/img")).unwrap();
    fs::write(dir.path().join("assets/Style.css"), "body {}").unwrap();
    fs::write(dir.path().join("assets/app <v2>.js"), "").unwrap();
    dir
}

async fn send(dir: &TempDir, request: Request<Body>) -> Response {
    routes::app(ServerState::new(dir.path()))
        .oneshot(request)
        .await
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::ORIGIN, ORIGIN)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_cors_headers(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap()
        .to_ascii_uppercase();
    for method in ["GET", "POST", "OPTIONS"] {
        assert!(methods.contains(method), "{method} missing from {methods}");
    }
    assert!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
            .to_str()
            .unwrap()
            .eq_ignore_ascii_case("content-type")
    );
}

#[tokio::test]
async fn serves_file_contents_with_cors_headers() {
    let dir = site();
    let response = send(&dir, get("/hello.txt")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(&response);
    assert_eq!(body_text(response).await, "hello");
}

#[tokio::test]
async fn directories_resolve_to_index_html() {
    let dir = site();

    let response = send(&dir, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "<h1>CodeKids</h1>");

    let response = send(&dir, get("/projects/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "projects");
}

#[tokio::test]
async fn directory_without_index_is_listed() {
    let dir = site();
    let response = send(&dir, get("/assets/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(&response);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );

    let page = body_text(response).await;
    assert!(page.contains("<title>Directory listing for /assets/</title>"));
    assert!(page.contains("<li><a href=\"app%20%3Cv2%3E.js\">app &lt;v2&gt;.js</a></li>"));
    assert!(page.contains("<li><a href=\"img/\">img/</a></li>"));
    let app = page.find("app%20").unwrap();
    let img = page.find("img/").unwrap();
    let style = page.find("Style.css").unwrap();
    assert!(app < img && img < style);
}

#[tokio::test]
async fn listing_never_leaves_the_root() {
    let dir = site();
    let response = send(&dir, get("/assets/%2e%2e/%2e%2e/")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_cors_headers(&response);
}

#[tokio::test]
async fn missing_file_is_a_404_with_cors_headers() {
    let dir = site();
    let response = send(&dir, get("/nope.txt")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_cors_headers(&response);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["message"], "not found: `/nope.txt`");
}

#[tokio::test]
async fn preflight_is_answered_for_any_origin() {
    let dir = site();
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/hello.txt")
        .header(header::ORIGIN, ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = send(&dir, request).await;
    assert!(response.status().is_success());
    assert_cors_headers(&response);
}

#[tokio::test]
async fn post_to_a_file_is_rejected_but_keeps_cors_headers() {
    let dir = site();
    let request = Request::post("/hello.txt")
        .header(header::ORIGIN, ORIGIN)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = send(&dir, request).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors_headers(&response);
}

#[tokio::test]
async fn healthcheck_reports_ok_for_existing_root() {
    let dir = site();
    let response = send(&dir, get("/healthcheck")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn healthcheck_fails_when_root_is_gone() {
    let dir = tempfile::tempdir().unwrap();
    let app = routes::app(ServerState::new(dir.path().join("missing")));

    let response = app.oneshot(get("/healthcheck")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_cors_headers(&response);
}
