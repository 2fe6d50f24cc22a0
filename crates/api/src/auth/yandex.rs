//! Yandex OAuth: exchange an authorization code for the user's profile.

use serde::Deserialize;

const TOKEN_URL: &str = "https://oauth.yandex.ru/token";
const INFO_URL: &str = "https://login.yandex.ru/info";
const AVATAR_URL_PREFIX: &str = "https://avatars.yandex.net/get-yapic";

#[derive(Debug, Clone)]
pub struct YandexConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub info_url: String,
}

impl YandexConfig {
    /// Load `YANDEX_CLIENT_ID` and `YANDEX_CLIENT_SECRET`. Both default to
    /// empty, which disables Yandex login.
    pub fn from_env() -> Self {
        Self {
            client_id: std::env::var("YANDEX_CLIENT_ID").unwrap_or_default(),
            client_secret: std::env::var("YANDEX_CLIENT_SECRET").unwrap_or_default(),
            token_url: TOKEN_URL.to_string(),
            info_url: INFO_URL.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum YandexError {
    #[error("Yandex login is not configured")]
    NotConfigured,

    #[error("Yandex request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Yandex rejected the authorization code: {0}")]
    Rejected(String),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Fields of `login.yandex.ru/info` this service uses.
#[derive(Debug, Clone, Deserialize)]
pub struct YandexProfile {
    pub id: String,
    pub login: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub default_email: Option<String>,
    #[serde(default)]
    pub default_avatar_id: Option<String>,
}

impl YandexProfile {
    pub fn avatar_url(&self) -> String {
        match &self.default_avatar_id {
            Some(id) if !id.is_empty() => format!("{AVATAR_URL_PREFIX}/{id}/islands-200"),
            _ => String::new(),
        }
    }
}

/// Exchange `code` for an access token, then fetch the profile it grants.
pub async fn fetch_profile(
    http: &reqwest::Client,
    config: &YandexConfig,
    code: &str,
) -> Result<YandexProfile, YandexError> {
    if !config.is_configured() {
        return Err(YandexError::NotConfigured);
    }

    let token: TokenResponse = http
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ])
        .send()
        .await?
        .json()
        .await?;

    let access_token = match token.access_token {
        Some(t) if !t.is_empty() => t,
        _ => {
            let reason = token
                .error_description
                .or(token.error)
                .unwrap_or_else(|| "no access token returned".to_string());
            return Err(YandexError::Rejected(reason));
        }
    };

    let profile = http
        .get(&config.info_url)
        .query(&[("format", "json")])
        .header(reqwest::header::AUTHORIZATION, format!("OAuth {access_token}"))
        .send()
        .await?
        .error_for_status()?
        .json::<YandexProfile>()
        .await?;

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_url_from_avatar_id() {
        let mut profile = YandexProfile {
            id: "1".into(),
            login: "ada".into(),
            first_name: String::new(),
            last_name: String::new(),
            default_email: None,
            default_avatar_id: Some("abc".into()),
        };
        assert_eq!(
            profile.avatar_url(),
            "https://avatars.yandex.net/get-yapic/abc/islands-200"
        );

        profile.default_avatar_id = None;
        assert_eq!(profile.avatar_url(), "");
    }

    #[tokio::test]
    async fn unconfigured_client_fails_fast() {
        let config = YandexConfig {
            client_id: String::new(),
            client_secret: String::new(),
            token_url: TOKEN_URL.to_string(),
            info_url: INFO_URL.to_string(),
        };
        let err = fetch_profile(&reqwest::Client::new(), &config, "code")
            .await
            .unwrap_err();
        assert!(matches!(err, YandexError::NotConfigured));
    }
}
