use pdf_to_speech::infrastructure::auth::ServiceAccountKey;
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Test service account whose token endpoint points at `token_uri`
pub fn service_account_key(token_uri: String) -> ServiceAccountKey {
    let mut key = ServiceAccountKey::from_file(&fixture_path("service_account.json"))
        .expect("fixture credentials should parse");
    key.token_uri = token_uri;
    key
}
