use url::{Position, Url};

use super::{body_text, displayed_headers};
use crate::docs::{Operation, UriDefaults};

pub(super) fn curl(operation: &Operation, defaults: &UriDefaults) -> String {
    let request = &operation.request;
    let uri = defaults.apply(&request.uri);

    let mut parts = vec![format!("$ curl '{uri}' -i -X {}", request.method)];
    for (name, value) in displayed_headers(&request.headers) {
        parts.push(format!("-H {}", shell_quote(&format!("{name}: {value}"))));
    }
    if !request.body.is_empty() {
        parts.push(format!("-d {}", shell_quote(&body_text(&request.body))));
    }

    parts.join(" \\\n    ")
}

pub(super) fn httpie(operation: &Operation, defaults: &UriDefaults) -> String {
    let request = &operation.request;
    let uri = defaults.apply(&request.uri);

    let command = format!("http {} '{uri}'", request.method);
    let mut parts = if request.body.is_empty() {
        vec![format!("$ {command}")]
    } else {
        let body = shell_quote(&body_text(&request.body));
        vec![format!("$ echo {body} | {command}")]
    };
    for (name, value) in displayed_headers(&request.headers) {
        parts.push(shell_quote(&format!("{name}:{value}")));
    }

    parts.join(" \\\n    ")
}

pub(super) fn http_request(operation: &Operation, defaults: &UriDefaults) -> String {
    let request = &operation.request;
    let uri = defaults.apply(&request.uri);

    let mut lines = vec![format!("{} {} HTTP/1.1", request.method, request_target(&uri))];
    for (name, value) in displayed_headers(&request.headers) {
        lines.push(format!("{name}: {value}"));
    }
    if !request.body.is_empty() {
        lines.push(format!("Content-Length: {}", request.body.len()));
    }
    lines.push(format!("Host: {}", host(&uri)));

    with_body(lines, &request.body)
}

pub(super) fn http_response(operation: &Operation) -> String {
    let response = &operation.response;
    let status = response.status;

    let mut lines = vec![format!(
        "HTTP/1.1 {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    )];
    for (name, value) in displayed_headers(&response.headers) {
        lines.push(format!("{name}: {value}"));
    }
    if !response.body.is_empty() {
        lines.push(format!("Content-Length: {}", response.body.len()));
    }

    with_body(lines, &response.body)
}

fn with_body(lines: Vec<String>, body: &[u8]) -> String {
    let head = lines.join("\n");
    if body.is_empty() {
        head
    } else {
        format!("{head}\n\n{}", body_text(body))
    }
}

fn request_target(uri: &Url) -> &str {
    &uri[Position::BeforePath..Position::AfterQuery]
}

fn host(uri: &Url) -> String {
    let host = uri.host_str().unwrap_or("localhost");
    match uri.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Single-quote for a POSIX shell.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
