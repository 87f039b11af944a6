//! Integration tests for file upload, listing, download, and deletion.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_upload_and_list() {
    let app = helpers::TestApp::new().await;

    let response = app.upload("notes.txt", b"hello world").await;
    assert_eq!(response.status, StatusCode::OK, "body: {:?}", response.body);

    let stored_name = response.data()["name"].as_str().unwrap().to_string();
    assert!(stored_name.starts_with("notes_"));
    assert!(stored_name.ends_with(".txt"));
    assert_eq!(response.data()["size_bytes"], 11);

    let response = app.request("GET", "/api/files").await;
    assert_eq!(response.status, StatusCode::OK);

    let files = response.data().as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], stored_name.as_str());
    assert_eq!(files[0]["size_bytes"], 11);
}

#[tokio::test]
async fn test_repeated_upload_never_overwrites() {
    let app = helpers::TestApp::new().await;

    let first = app.upload("report.pdf", b"one").await;
    let second = app.upload("report.pdf", b"two").await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_ne!(first.data()["name"], second.data()["name"]);

    let response = app.request("GET", "/api/files").await;
    assert_eq!(response.data().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_upload_without_filename_is_rejected() {
    let app = helpers::TestApp::new().await;

    let response = app.upload("", b"content").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_upload_over_size_limit_is_rejected() {
    let app = helpers::TestApp::with_max_upload(16).await;

    let response = app.upload("big.bin", &[0u8; 17]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    // At or under the limit is fine
    let response = app.upload("small.bin", &[0u8; 16]).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_download_round_trip() {
    let app = helpers::TestApp::new().await;

    let uploaded = app.upload("data.csv", b"a,b\n1,2\n").await;
    let name = uploaded.data()["name"].as_str().unwrap().to_string();

    let response = app
        .request("GET", &format!("/api/files/{name}/download"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(&response.bytes[..], b"a,b\n1,2\n");
    assert_eq!(response.headers["content-type"], "text/csv");

    let disposition = response.headers["content-disposition"].to_str().unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains(&name));
}

#[tokio::test]
async fn test_download_missing_file_is_404() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/files/ghost.txt/download").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete() {
    let app = helpers::TestApp::new().await;

    let uploaded = app.upload("gone.txt", b"x").await;
    let name = uploaded.data()["name"].as_str().unwrap().to_string();

    let response = app.request("DELETE", &format!("/api/files/{name}")).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/files").await;
    assert!(response.data().as_array().unwrap().is_empty());

    // Deleting again reports not found
    let response = app.request("DELETE", &format!("/api/files/{name}")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
}
