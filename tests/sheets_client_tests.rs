use hourboard::config::Config;
use hourboard::errors::AppError;
use hourboard::sheets::SheetSource;
use hourboard::sheets::auth::Credentials;
use hourboard::sheets::client::SheetsClient;
use hourboard::sheets::service_account::ServiceAccountKey;
use mockito::{Matcher, Server};
use std::path::Path;

const VALUES_BODY: &str = r#"{
  "range": "'HORAS V2/2024'!A1:C3",
  "majorDimension": "ROWS",
  "values": [["PROFISSIONAL", "MES", "ANO"], ["Ana", "7", "2024"], ["Bob", "8"]]
}"#;

fn config_for(server: &Server) -> Config {
    Config {
        sheet_id: "sheet123".into(),
        api_base_url: format!("{}/v4/", server.url()),
        timeout_secs: 5,
        ..Config::default()
    }
}

fn values_query() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("majorDimension".into(), "ROWS".into()),
        Matcher::UrlEncoded("valueRenderOption".into(), "FORMATTED_VALUE".into()),
    ])
}

#[test]
fn fetch_encodes_worksheet_name_and_sends_bearer_token() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/v4/spreadsheets/sheet123/values/HORAS%20V2%2F2024")
        .match_query(values_query())
        .match_header("authorization", "Bearer tok-123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(VALUES_BODY)
        .create();

    let client =
        SheetsClient::new(&config_for(&server), Credentials::Bearer("tok-123".into())).unwrap();
    let table = client.fetch_worksheet("HORAS V2/2024").unwrap();

    mock.assert();
    assert_eq!(table.columns, vec!["PROFISSIONAL", "MES", "ANO"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.text(1, "ANO"), "");
}

#[test]
fn api_key_goes_in_the_query_not_the_header() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/v4/spreadsheets/sheet123/values/HORAS_V2")
        .match_query(Matcher::AllOf(vec![
            values_query(),
            Matcher::UrlEncoded("key".into(), "k-456".into()),
        ]))
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(VALUES_BODY)
        .create();

    let client =
        SheetsClient::new(&config_for(&server), Credentials::ApiKey("k-456".into())).unwrap();
    client.fetch_worksheet("HORAS_V2").unwrap();

    mock.assert();
}

#[test]
fn list_worksheets_asks_only_for_titles() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/v4/spreadsheets/sheet123")
        .match_query(Matcher::UrlEncoded(
            "fields".into(),
            "sheets.properties.title".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"sheets":[{"properties":{"title":"HORAS_V2"}},{"properties":{"title":"Resumo"}}]}"#,
        )
        .create();

    let client = SheetsClient::new(&config_for(&server), Credentials::Bearer("t".into())).unwrap();
    assert_eq!(client.list_worksheets().unwrap(), vec!["HORAS_V2", "Resumo"]);

    mock.assert();
}

#[test]
fn non_success_status_becomes_sheets_error_with_excerpt() {
    let mut server = Server::new();
    let body = format!("PERMISSION_DENIED {}", "x".repeat(1000));
    let _mock = server
        .mock("GET", "/v4/spreadsheets/sheet123/values/HORAS_V2")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(&body)
        .create();

    let client = SheetsClient::new(&config_for(&server), Credentials::Bearer("t".into())).unwrap();
    match client.fetch_worksheet("HORAS_V2") {
        Err(AppError::Sheets(msg)) => {
            assert!(msg.starts_with("403"), "{msg}");
            assert!(msg.contains("PERMISSION_DENIED"), "{msg}");
            assert!(msg.chars().filter(|c| *c == 'x').count() < 300, "{msg}");
        }
        Err(e) => panic!("expected Sheets error, got {e}"),
        Ok(_) => panic!("expected Sheets error, got a table"),
    }
}

fn test_key(server: &Server) -> ServiceAccountKey {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/service_account.json");
    let mut key = ServiceAccountKey::from_file(&path).unwrap();
    key.token_uri = format!("{}/token", server.url());
    key
}

#[test]
fn service_account_is_exchanged_for_a_bearer_token() {
    let mut server = Server::new();
    let token = server
        .mock("POST", "/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded(
                "grant_type".into(),
                "urn:ietf:params:oauth:grant-type:jwt-bearer".into(),
            ),
            Matcher::Regex(r"assertion=[\w-]+\.[\w-]+\.[\w-]+".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"sa-token","expires_in":3599,"token_type":"Bearer"}"#)
        .create();
    let values = server
        .mock("GET", "/v4/spreadsheets/sheet123/values/HORAS_V2")
        .match_query(values_query())
        .match_header("authorization", "Bearer sa-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(VALUES_BODY)
        .create();

    let creds = Credentials::ServiceAccount(test_key(&server));
    let client = SheetsClient::new(&config_for(&server), creds).unwrap();
    client.fetch_worksheet("HORAS_V2").unwrap();

    token.assert();
    values.assert();
}

#[test]
fn rejected_service_account_is_a_credentials_error() {
    let mut server = Server::new();
    let _token = server
        .mock("POST", "/token")
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant","error_description":"Invalid JWT Signature."}"#)
        .create();

    let creds = Credentials::ServiceAccount(test_key(&server));
    match SheetsClient::new(&config_for(&server), creds) {
        Err(AppError::Credentials(msg)) => {
            assert!(msg.contains("400"), "{msg}");
            assert!(msg.contains("invalid_grant"), "{msg}");
        }
        Err(e) => panic!("expected Credentials error, got {e}"),
        Ok(_) => panic!("expected Credentials error"),
    }
}
