//! Account check
//!
//! Verifies the token before a run by fetching the portal's basic details.

use crate::error::{Error, Result};
use crate::http::HttpClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Path of the account details endpoint, relative to the API base
pub const ACCOUNT_INFO_PATH: &str = "/integrations/v1/me";

/// Basic details of the account the token belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// HubSpot portal (hub) id
    pub portal_id: u64,
    #[serde(default)]
    pub time_zone: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub utc_offset_milliseconds: i64,
    #[serde(default)]
    pub utc_offset: String,
}

impl fmt::Display for AccountInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Portal ID: {}\nTime zone: {} (UTC{})\nCurrency: {}",
            self.portal_id, self.time_zone, self.utc_offset, self.currency
        )
    }
}

/// Fetch account details from `base_url`
///
/// Any failure, including a rejected token, becomes `Error::AccountCheck`.
pub async fn fetch_account_info(client: &HttpClient, base_url: &str) -> Result<AccountInfo> {
    let url = format!("{}{ACCOUNT_INFO_PATH}", base_url.trim_end_matches('/'));
    debug!("Fetching account info from {url}");

    client
        .get_json(&url)
        .await
        .map_err(|e| Error::account_check(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ApiToken;
    use crate::http::HttpClientConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> HttpClient {
        HttpClient::with_auth(
            HttpClientConfig::default(),
            ApiToken::new("pat-na1-123").unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_account_info() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/integrations/v1/me"))
            .and(header("Authorization", "Bearer pat-na1-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "portalId": 62515,
                "timeZone": "US/Eastern",
                "currency": "USD",
                "utcOffsetMilliseconds": -18_000_000,
                "utcOffset": "-05:00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let info = fetch_account_info(&client(), &server.uri()).await.unwrap();

        assert_eq!(
            info,
            AccountInfo {
                portal_id: 62515,
                time_zone: "US/Eastern".to_string(),
                currency: "USD".to_string(),
                utc_offset_milliseconds: -18_000_000,
                utc_offset: "-05:00".to_string(),
            }
        );
        assert!(info.to_string().contains("Portal ID: 62515"));
    }

    #[tokio::test]
    async fn test_fetch_account_info_rejected_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/integrations/v1/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": "error",
                "message": "Authentication credentials not found."
            })))
            .mount(&server)
            .await;

        let err = fetch_account_info(&client(), &server.uri())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::AccountCheck { .. }));
        assert!(err
            .to_string()
            .contains("Authentication credentials not found."));
    }

    #[tokio::test]
    async fn test_fetch_account_info_missing_portal_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/integrations/v1/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"timeZone": "UTC"})))
            .mount(&server)
            .await;

        let err = fetch_account_info(&client(), &server.uri())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AccountCheck { .. }));
    }
}
