//! Integration tests for share link creation, access, and revocation.

mod helpers;

use chrono::{DateTime, Utc};
use http::StatusCode;

#[tokio::test]
async fn test_share_then_shared_download() {
    let app = helpers::TestApp::new().await;

    let uploaded = app.upload("report.pdf", b"%PDF-1.4 fake").await;
    let name = uploaded.data()["name"].as_str().unwrap().to_string();

    let response = app
        .request("POST", &format!("/api/files/{name}/share"))
        .await;
    assert_eq!(response.status, StatusCode::OK, "body: {:?}", response.body);

    let token = response.data()["token"].as_str().unwrap().to_string();
    let url = response.data()["url"].as_str().unwrap().to_string();
    assert_eq!(url, format!("/api/s/{token}"));
    assert_eq!(response.data()["file_name"], name.as_str());

    // Expiry is seven days out
    let expires_at: DateTime<Utc> = response.data()["expires_at"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    let days_out = (expires_at - Utc::now()).num_days();
    assert!((6..=7).contains(&days_out), "days_out: {days_out}");

    let response = app.request("GET", &url).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(&response.bytes[..], b"%PDF-1.4 fake");
    assert_eq!(response.headers["content-type"], "application/pdf");
}

#[tokio::test]
async fn test_share_missing_file_is_404() {
    let app = helpers::TestApp::new().await;

    let response = app.request("POST", "/api/files/ghost.pdf/share").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_unknown_token_is_404() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/s/xyz999").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_revoke_is_idempotent() {
    let app = helpers::TestApp::new().await;

    let uploaded = app.upload("doc.txt", b"contents").await;
    let name = uploaded.data()["name"].as_str().unwrap().to_string();

    let response = app
        .request("POST", &format!("/api/files/{name}/share"))
        .await;
    let token = response.data()["token"].as_str().unwrap().to_string();

    let response = app.request("DELETE", &format!("/api/s/{token}")).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", &format!("/api/s/{token}")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // Revoking again still succeeds
    let response = app.request("DELETE", &format!("/api/s/{token}")).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_shared_download_after_file_deleted_is_404() {
    let app = helpers::TestApp::new().await;

    let uploaded = app.upload("temp.txt", b"short lived").await;
    let name = uploaded.data()["name"].as_str().unwrap().to_string();

    let response = app
        .request("POST", &format!("/api/files/{name}/share"))
        .await;
    let token = response.data()["token"].as_str().unwrap().to_string();

    let response = app.request("DELETE", &format!("/api/files/{name}")).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", &format!("/api/s/{token}")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_same_file_can_have_multiple_links() {
    let app = helpers::TestApp::new().await;

    let uploaded = app.upload("shared.txt", b"data").await;
    let name = uploaded.data()["name"].as_str().unwrap().to_string();

    let first = app
        .request("POST", &format!("/api/files/{name}/share"))
        .await;
    let second = app
        .request("POST", &format!("/api/files/{name}/share"))
        .await;

    let first_token = first.data()["token"].as_str().unwrap().to_string();
    let second_token = second.data()["token"].as_str().unwrap().to_string();
    assert_ne!(first_token, second_token);

    // Revoking one link leaves the other usable
    let response = app
        .request("DELETE", &format!("/api/s/{first_token}"))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", &format!("/api/s/{second_token}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(&response.bytes[..], b"data");
}
