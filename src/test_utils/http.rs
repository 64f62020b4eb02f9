use axum::{body::Body, http::StatusCode, response::Response};
use serde_json::Value;

#[track_caller]
pub(crate) fn assert_status(response: &Response<Body>, want: StatusCode) {
    assert_eq!(
        response.status(),
        want,
        "want status {want}, got {}",
        response.status()
    );
}

#[track_caller]
pub(crate) fn assert_html_content_type(response: &Response<Body>) {
    let content_type_header = response
        .headers()
        .get("content-type")
        .expect("content-type header missing");
    assert_eq!(content_type_header, "text/html; charset=utf-8");
}

#[track_caller]
fn get_header(response: &Response<Body>, header_name: &str) -> String {
    let header_error_message = format!("Headers missing {header_name}");

    response
        .headers()
        .get(header_name)
        .expect(&header_error_message)
        .to_str()
        .expect("Could not convert to str")
        .to_string()
}

#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response<Body>, endpoint: &str) {
    assert_eq!(get_header(response, "hx-redirect"), endpoint);
}

pub(crate) async fn parse_json_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    serde_json::from_slice(&body).expect("response body is not JSON")
}
