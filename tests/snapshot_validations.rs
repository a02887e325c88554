mod common;

use bunner_cors_intercept::CredentialsPolicy;
use common::asserts::assert_rewritten;
use common::builders::{exchange, interceptor};
use common::headers::render;
use insta::assert_snapshot;

#[test]
fn terminal_origin_snapshot() {
    let interceptor = interceptor()
        .allow("https://terminal.cryptocontrol.io")
        .build();

    let headers = assert_rewritten(
        exchange("r1")
            .origin_url("https://terminal.cryptocontrol.io/app")
            .origin("https://terminal.cryptocontrol.io")
            .run(&interceptor),
    );

    assert_snapshot!(render(&headers), @r"
    access-control-allow-origin: https://terminal.cryptocontrol.io
    access-control-allow-methods: null
    access-control-allow-headers: null
    access-control-allow-credentials: true
    ");
}

#[test]
fn mixed_server_headers_snapshot() {
    let interceptor = interceptor().build();

    let headers = assert_rewritten(
        exchange("r2")
            .origin_url("http://localhost:3000/trade")
            .origin("http://localhost:3000")
            .request_method("PUT")
            .request_headers("Content-Type, X-Session")
            .response_header("Content-Type", "application/json")
            .response_header("Access-Control-Allow-Headers", "Content-Type")
            .response_header("Cache-Control", "no-store")
            .run(&interceptor),
    );

    assert_snapshot!(render(&headers), @r"
    Content-Type: application/json
    Access-Control-Allow-Headers: Content-Type, X-Session
    Cache-Control: no-store
    access-control-allow-origin: http://localhost:3000
    access-control-allow-methods: PUT
    access-control-allow-credentials: true
    ");
}

#[test]
fn wildcard_without_credentials_snapshot() {
    let interceptor = interceptor()
        .credentials(CredentialsPolicy::OmitWithWildcard)
        .build();

    let headers = assert_rewritten(
        exchange("r3")
            .origin_url("https://app.example/")
            .response_header("Vary", "Accept-Encoding")
            .run(&interceptor),
    );

    assert_snapshot!(render(&headers), @r"
    Vary: Accept-Encoding
    access-control-allow-origin: *
    access-control-allow-methods: null
    access-control-allow-headers: null
    access-control-allow-credentials: null
    ");
}
