use wirehttp::http::headers::Headers;
use wirehttp::http::response::{StatusCode, default_headers};
use wirehttp::http::writer::{ResponseWriter, WriteError};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::OK.as_u16(), 200);
    assert_eq!(StatusCode::BAD_REQUEST.as_u16(), 400);
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::OK.reason_phrase(), "OK");
    assert_eq!(StatusCode::BAD_REQUEST.reason_phrase(), "Bad Request");
    assert_eq!(
        StatusCode::INTERNAL_SERVER_ERROR.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_unknown_status_code_has_empty_reason() {
    assert_eq!(StatusCode(299).reason_phrase(), "");
    assert_eq!(StatusCode(404).reason_phrase(), "");
}

#[test]
fn test_default_headers() {
    let headers = default_headers(42);

    assert_eq!(headers.get("content-length"), Some("42"));
    assert_eq!(headers.get("connection"), Some("close"));
    assert_eq!(headers.get("content-type"), Some("text/plain"));
    assert_eq!(headers.len(), 3);
}

#[test]
fn test_writer_status_line_bytes() {
    let mut writer = ResponseWriter::new();
    writer.write_status_line(StatusCode::OK).unwrap();

    assert_eq!(writer.staged(), b"HTTP/1.1 200 OK\r\n");
}

#[test]
fn test_writer_unknown_code_status_line() {
    let mut writer = ResponseWriter::new();
    writer.write_status_line(StatusCode(299)).unwrap();

    assert_eq!(writer.staged(), b"HTTP/1.1 299 \r\n");
}

#[test]
fn test_writer_full_response_bytes() {
    let mut writer = ResponseWriter::new();
    writer.write_status_line(StatusCode::OK).unwrap();

    let mut headers = Headers::new();
    headers.set("content-length", "5");
    writer.write_headers(&headers).unwrap();

    let written = writer.write_body(b"hello").unwrap();
    assert_eq!(written, 5);

    assert_eq!(
        writer.staged(),
        b"HTTP/1.1 200 OK\r\ncontent-length: 5\r\n\r\nhello".as_slice()
    );
}

#[test]
fn test_writer_headers_block_terminated_by_blank_line() {
    let mut writer = ResponseWriter::new();
    writer.write_status_line(StatusCode::OK).unwrap();
    writer.write_headers(&default_headers(0)).unwrap();

    let staged = std::str::from_utf8(writer.staged()).unwrap();

    // Header order is unspecified, so check lines individually.
    assert!(staged.ends_with("\r\n\r\n"));
    assert!(staged.contains("content-length: 0\r\n"));
    assert!(staged.contains("connection: close\r\n"));
    assert!(staged.contains("content-type: text/plain\r\n"));
}

#[test]
fn test_writer_headers_before_status_is_error() {
    let mut writer = ResponseWriter::new();
    let result = writer.write_headers(&Headers::new());

    assert!(matches!(result, Err(WriteError::HeadersOutOfOrder)));
}

#[test]
fn test_writer_body_before_headers_is_error() {
    let mut writer = ResponseWriter::new();
    writer.write_status_line(StatusCode::OK).unwrap();
    let result = writer.write_body(b"too early");

    assert!(matches!(result, Err(WriteError::BodyOutOfOrder)));
}

#[test]
fn test_writer_body_with_nothing_written_is_error() {
    let mut writer = ResponseWriter::new();
    let result = writer.write_body(b"way too early");

    assert!(matches!(result, Err(WriteError::BodyOutOfOrder)));
}

#[test]
fn test_writer_double_status_line_is_error() {
    let mut writer = ResponseWriter::new();
    writer.write_status_line(StatusCode::OK).unwrap();
    let result = writer.write_status_line(StatusCode::OK);

    assert!(matches!(result, Err(WriteError::StatusAlreadyWritten)));
}

#[test]
fn test_writer_double_headers_is_error() {
    let mut writer = ResponseWriter::new();
    writer.write_status_line(StatusCode::OK).unwrap();
    writer.write_headers(&Headers::new()).unwrap();
    let result = writer.write_headers(&Headers::new());

    assert!(matches!(result, Err(WriteError::HeadersOutOfOrder)));
}

#[test]
fn test_writer_repeated_body_writes_append() {
    let mut writer = ResponseWriter::new();
    writer.write_status_line(StatusCode::OK).unwrap();
    writer.write_headers(&Headers::new()).unwrap();
    writer.write_body(b"hello ").unwrap();
    writer.write_body(b"world").unwrap();

    assert!(writer.staged().ends_with(b"hello world"));
}

#[tokio::test]
async fn test_writer_flush_drains_staged_bytes() {
    let mut writer = ResponseWriter::new();
    writer.write_status_line(StatusCode::OK).unwrap();
    writer.write_headers(&Headers::new()).unwrap();
    writer.write_body(b"hi").unwrap();

    let mut sink = std::io::Cursor::new(Vec::new());
    writer.flush_to(&mut sink).await.unwrap();

    assert_eq!(sink.into_inner(), b"HTTP/1.1 200 OK\r\n\r\nhi");
    assert!(writer.staged().is_empty());
}
