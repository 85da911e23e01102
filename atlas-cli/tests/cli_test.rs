use assert_cmd::Command;
use atlas_test_utils::fixtures;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Command with a scrubbed environment and an empty home directory, so no
/// real config file or `.netrc` leaks into the test.
fn atlas_audit(home: &TempDir) -> Command {
  let mut cmd = Command::cargo_bin("atlas-audit").unwrap();
  cmd
    .env_clear()
    .env("HOME", home.path())
    .env("XDG_CONFIG_HOME", home.path().join(".config"))
    .current_dir(home.path());
  cmd
}

#[test]
fn test_help_lists_commands() {
  let home = TempDir::new().unwrap();

  atlas_audit(&home)
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("spaces"))
    .stdout(predicate::str::contains("permissions"))
    .stdout(predicate::str::contains("issue-types"))
    .stdout(predicate::str::contains("check"));
}

#[test]
fn test_missing_token_fails_before_any_request() {
  let home = TempDir::new().unwrap();

  atlas_audit(&home)
    .args(["--site", "https://acme.atlassian.net", "--email", "me@example.com", "check"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("ATLASSIAN_API_TOKEN"));
}

#[test]
fn test_placeholder_token_is_rejected() {
  let home = TempDir::new().unwrap();

  atlas_audit(&home)
    .env("ATLASSIAN_SITE", "https://acme.atlassian.net")
    .env("ATLASSIAN_EMAIL", "me@example.com")
    .env("ATLASSIAN_API_TOKEN", "YOUR_API_TOKEN_HERE")
    .arg("issue-types")
    .assert()
    .failure()
    .stderr(predicate::str::contains("placeholder"));
}

#[test]
fn test_unreachable_site_is_fatal() {
  let home = TempDir::new().unwrap();

  atlas_audit(&home)
    .env("ATLASSIAN_API_TOKEN", "token")
    .args(["--site", "http://127.0.0.1:1", "--email", "me@example.com", "issue-types"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("127.0.0.1:1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_spaces_report_is_written() {
  let mock_server = MockServer::start().await;
  let home = TempDir::new().unwrap();

  Mock::given(method("GET"))
    .and(path("/wiki/rest/api/space"))
    .and(basic_auth("me@example.com", "token"))
    .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::cursor_page(
      vec![fixtures::space("ENG", "Engineering"), fixtures::space("HR", "People")],
      None,
    )))
    .mount(&mock_server)
    .await;

  Mock::given(method("GET"))
    .and(path("/wiki/rest/api/content/search"))
    .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::content_search(vec![
      fixtures::content_page("Roadmap", "2024-08-15T10:30:00.000Z", "/spaces/ENG/pages/2"),
    ])))
    .mount(&mock_server)
    .await;

  let output = home.path().join("spaces.csv");
  atlas_audit(&home)
    .env("ATLASSIAN_API_TOKEN", "token")
    .args(["--site", &mock_server.uri(), "--email", "me@example.com", "--colors", "never"])
    .args(["spaces", "--output"])
    .arg(&output)
    .assert()
    .success()
    .stdout(predicate::str::contains("Engineering"));

  let csv = std::fs::read_to_string(&output).unwrap();
  let mut lines = csv.lines();
  assert_eq!(
    lines.next(),
    Some("Space Name,Space Key,Last Updated,Page Title,Page URL")
  );
  assert_eq!(csv.lines().count(), 3);
  assert!(csv.contains("Engineering,ENG,2024-08-15 10:30:00,Roadmap,"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_reports_connected_user() {
  let mock_server = MockServer::start().await;
  let home = TempDir::new().unwrap();

  Mock::given(method("GET"))
    .and(path("/rest/api/3/myself"))
    .and(basic_auth("me@example.com", "s3cr3t-value"))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
      "accountId": "5b10a2844c20165700ede21g",
      "displayName": "Mia Krystof",
    })))
    .mount(&mock_server)
    .await;

  atlas_audit(&home)
    .env("ATLASSIAN_API_TOKEN", "s3cr3t-value")
    .args(["--site", &mock_server.uri(), "--email", "me@example.com", "--colors", "never"])
    .arg("check")
    .assert()
    .success()
    .stdout(predicate::str::contains("Connected as Mia Krystof"))
    .stdout(predicate::str::contains("s3cr3t").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_fails_when_credentials_are_rejected() {
  let mock_server = MockServer::start().await;
  let home = TempDir::new().unwrap();

  Mock::given(method("GET"))
    .and(path("/rest/api/3/myself"))
    .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
    .mount(&mock_server)
    .await;

  atlas_audit(&home)
    .env("ATLASSIAN_API_TOKEN", "wrong")
    .args(["--site", &mock_server.uri(), "--email", "me@example.com", "--colors", "never"])
    .arg("check")
    .assert()
    .failure()
    .stderr(predicate::str::contains("did not accept the credentials for me@example.com"));
}
