//! Integration tests for the two-tier Basic-Auth policy.

mod common;

use axum::http::StatusCode;
use common::{TestServer, basic_auth, credential, request};

const NARINFO_URI: &str = "/aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa.narinfo";
const NAR_URI: &str = "/nar/cafe.nar.zst";

async fn write_only_server() -> TestServer {
    TestServer::with_config(|config| {
        config.auth.write = Some(credential("w", "wp"));
    })
    .await
}

async fn read_write_server() -> TestServer {
    TestServer::with_config(|config| {
        config.auth.read = Some(credential("r", "rp"));
        config.auth.write = Some(credential("w", "wp"));
    })
    .await
}

#[tokio::test]
async fn no_credentials_configured_disables_auth() {
    let server = TestServer::new().await;

    let (status, _, _) = request(&server.router, "PUT", NAR_URI, Some(b"data"), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, _) = request(&server.router, "GET", NAR_URI, None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn write_only_config_guards_uploads_but_not_reads() {
    let server = write_only_server().await;

    // Unauthenticated write is rejected before any handler runs.
    let (status, headers, _) = request(&server.router, "PUT", NAR_URI, Some(b"data"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(headers["www-authenticate"], "Basic realm=\"silo\"");

    // Nothing was stored.
    assert!(!server.store_root.join("nar/cafe.nar.zst").exists());

    // Unauthenticated read passes the policy (404 proves it reached the
    // handler rather than being rejected).
    let (status, _, _) = request(&server.router, "GET", NAR_URI, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn correct_write_credentials_upload() {
    let server = write_only_server().await;

    let auth = basic_auth("w", "wp");
    let (status, _, _) =
        request(&server.router, "PUT", NAR_URI, Some(b"data"), Some(&auth)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn mismatched_write_credentials_are_rejected() {
    let server = write_only_server().await;

    for (user, password) in [("w", "wrong"), ("intruder", "wp")] {
        let auth = basic_auth(user, password);
        let (status, _, body) =
            request(&server.router, "PUT", NAR_URI, Some(b"data"), Some(&auth)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], "auth_rejected");
    }
}

#[tokio::test]
async fn malformed_authorization_header_is_401() {
    let server = read_write_server().await;

    for value in ["Bearer token", "Basic ???", "Basic "] {
        let (status, _, body) = request(&server.router, "GET", NARINFO_URI, None, Some(value)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{value}");
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], "auth_malformed");
    }
}

#[tokio::test]
async fn reads_accept_either_tier() {
    let server = read_write_server().await;

    for auth in [basic_auth("r", "rp"), basic_auth("w", "wp")] {
        let (status, _, _) = request(&server.router, "GET", NARINFO_URI, None, Some(&auth)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = request(&server.router, "HEAD", NAR_URI, None, Some(&auth)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // No header at all is rejected once a read pair is configured.
    let (status, _, _) = request(&server.router, "GET", NARINFO_URI, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn read_credentials_cannot_upload() {
    let server = read_write_server().await;

    let auth = basic_auth("r", "rp");
    for (method, uri) in [("PUT", NAR_URI), ("PUT", NARINFO_URI)] {
        let (status, _, _) = request(&server.router, method, uri, Some(b"data"), Some(&auth)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
}

#[tokio::test]
async fn cache_info_needs_no_credentials() {
    let server = read_write_server().await;

    let (status, _, _) = request(&server.router, "GET", "/nix-cache-info", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unimplemented_endpoints_are_still_guarded() {
    let server = read_write_server().await;

    let (status, _, _) = request(&server.router, "GET", "/log/some-deriver", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let auth = basic_auth("r", "rp");
    let (status, _, _) =
        request(&server.router, "GET", "/log/some-deriver", None, Some(&auth)).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
}
