//! Telegram Login Widget payload verification.
//!
//! The widget posts a flat set of fields plus a `hash`. The hash is the
//! HMAC-SHA256 of the sorted `key=value` lines, keyed with SHA-256 of the bot
//! token. See <https://core.telegram.org/widgets/login#checking-authorization>.

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::types::Timestamp;

type HmacSha256 = Hmac<Sha256>;

/// Payloads older than this are rejected even with a valid signature.
pub const MAX_AUTH_AGE_SECS: i64 = 86_400;

/// Verified fields of a Telegram login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramLogin {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub photo_url: Option<String>,
    pub auth_date: i64,
}

/// Build the newline-joined `key=value` string the hash is computed over.
pub fn data_check_string(fields: &BTreeMap<String, String>) -> String {
    fields
        .iter()
        .filter(|(k, _)| k.as_str() != "hash")
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn payload_mac(fields: &BTreeMap<String, String>, bot_token: &str) -> Result<HmacSha256, String> {
    let secret = Sha256::digest(bot_token.as_bytes());
    let mut mac = HmacSha256::new_from_slice(&secret)
        .map_err(|e| format!("Invalid HMAC key: {e}"))?;
    mac.update(data_check_string(fields).as_bytes());
    Ok(mac)
}

/// Compute the expected lowercase hex hash for `fields` under `bot_token`.
pub fn expected_hash(fields: &BTreeMap<String, String>, bot_token: &str) -> Result<String, String> {
    Ok(hex::encode(payload_mac(fields, bot_token)?.finalize().into_bytes()))
}

/// Verify a widget payload and extract the login.
///
/// Fails when the hash is missing or wrong, `id`/`auth_date` do not parse, or
/// the payload is older than [`MAX_AUTH_AGE_SECS`] relative to `now`.
pub fn verify_login(
    fields: &BTreeMap<String, String>,
    bot_token: &str,
    now: Timestamp,
) -> Result<TelegramLogin, String> {
    if bot_token.is_empty() {
        return Err("Telegram login is not configured".to_string());
    }

    let provided = fields
        .get("hash")
        .ok_or_else(|| "Missing telegram hash".to_string())?;
    let provided = hex::decode(provided).map_err(|_| "Invalid telegram hash".to_string())?;
    payload_mac(fields, bot_token)?
        .verify_slice(&provided)
        .map_err(|_| "Invalid telegram hash".to_string())?;

    let id = fields
        .get("id")
        .ok_or_else(|| "Missing telegram id".to_string())?
        .parse::<i64>()
        .map_err(|_| "Invalid telegram id".to_string())?;

    let auth_date = fields
        .get("auth_date")
        .ok_or_else(|| "Missing auth_date".to_string())?
        .parse::<i64>()
        .map_err(|_| "Invalid auth_date".to_string())?;

    if now.timestamp() - auth_date > MAX_AUTH_AGE_SECS {
        return Err("Telegram login data is outdated".to_string());
    }

    let opt = |key: &str| fields.get(key).filter(|v| !v.is_empty()).cloned();

    Ok(TelegramLogin {
        id,
        first_name: opt("first_name"),
        last_name: opt("last_name"),
        username: opt("username"),
        photo_url: opt("photo_url"),
        auth_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const TOKEN: &str = "123456:test-bot-token";

    fn signed_payload(auth_date: i64) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        fields.insert("id".to_string(), "987654321".to_string());
        fields.insert("first_name".to_string(), "Ada".to_string());
        fields.insert("username".to_string(), "ada".to_string());
        fields.insert("auth_date".to_string(), auth_date.to_string());
        let hash = expected_hash(&fields, TOKEN).unwrap();
        fields.insert("hash".to_string(), hash);
        fields
    }

    #[test]
    fn data_check_string_is_sorted_and_skips_hash() {
        let mut fields = BTreeMap::new();
        fields.insert("username".to_string(), "ada".to_string());
        fields.insert("hash".to_string(), "ignored".to_string());
        fields.insert("id".to_string(), "1".to_string());
        assert_eq!(data_check_string(&fields), "id=1\nusername=ada");
    }

    #[test]
    fn valid_payload_verifies() {
        let now = Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap();
        let fields = signed_payload(now.timestamp() - 60);

        let login = verify_login(&fields, TOKEN, now).expect("payload should verify");
        assert_eq!(login.id, 987_654_321);
        assert_eq!(login.username.as_deref(), Some("ada"));
        assert_eq!(login.last_name, None);
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let now = Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap();
        let mut fields = signed_payload(now.timestamp());
        fields.insert("id".to_string(), "1".to_string());

        let err = verify_login(&fields, TOKEN, now).unwrap_err();
        assert_eq!(err, "Invalid telegram hash");
    }

    #[test]
    fn uppercase_hex_hash_verifies() {
        let now = Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap();
        let mut fields = signed_payload(now.timestamp());
        let upper = fields["hash"].to_uppercase();
        fields.insert("hash".to_string(), upper);
        assert!(verify_login(&fields, TOKEN, now).is_ok());
    }

    #[test]
    fn malformed_or_truncated_hash_is_rejected() {
        let now = Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap();
        let mut fields = signed_payload(now.timestamp());
        let truncated = fields["hash"][..32].to_string();

        fields.insert("hash".to_string(), "not-hex".to_string());
        assert_eq!(verify_login(&fields, TOKEN, now).unwrap_err(), "Invalid telegram hash");

        fields.insert("hash".to_string(), truncated);
        assert_eq!(verify_login(&fields, TOKEN, now).unwrap_err(), "Invalid telegram hash");
    }

    #[test]
    fn wrong_bot_token_is_rejected() {
        let now = Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap();
        let fields = signed_payload(now.timestamp());
        assert!(verify_login(&fields, "other-token", now).is_err());
    }

    #[test]
    fn stale_payload_is_rejected() {
        let now = Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap();
        let fields = signed_payload(now.timestamp() - MAX_AUTH_AGE_SECS - 1);

        let err = verify_login(&fields, TOKEN, now).unwrap_err();
        assert!(err.contains("outdated"));
    }
}
