use wirehttp::http::headers::Headers;
use wirehttp::http::request::{Request, RequestLine};

fn request_with_headers(headers: Headers) -> Request {
    Request {
        request_line: RequestLine {
            method: "GET".to_string(),
            request_target: "/".to_string(),
            http_version: "1.1".to_string(),
        },
        headers,
        body: vec![],
    }
}

#[test]
fn test_request_header_retrieval() {
    let mut headers = Headers::new();
    headers.set("Host", "example.com");
    headers.set("Content-Type", "application/json");
    let req = request_with_headers(headers);

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_content_length_parsing() {
    let mut headers = Headers::new();
    headers.set("Content-Length", "42");
    let req = request_with_headers(headers);

    assert_eq!(req.content_length(), 42);
}

#[test]
fn test_request_content_length_missing() {
    let req = request_with_headers(Headers::new());

    assert_eq!(req.content_length(), 0);
}

#[test]
fn test_request_content_length_invalid() {
    let mut headers = Headers::new();
    headers.set("Content-Length", "not-a-number");
    let req = request_with_headers(headers);

    assert_eq!(req.content_length(), 0);
}
