use super::access_jwt::VerifiedToken;

pub const APPID_CLAIM: &str = "appid";
pub const AZP_CLAIM: &str = "azp";
pub const UNKNOWN_SERVICE: &str = "unknown-service";

/// Calling service identity used for audit attribution.
///
/// Prefers `appid` (v1 tokens) and falls back to `azp` (v2 tokens). Never fails:
/// callers without either claim are recorded as [`UNKNOWN_SERVICE`].
pub fn extract_calling_service(token: &VerifiedToken) -> String {
    [APPID_CLAIM, AZP_CLAIM]
        .into_iter()
        .filter_map(|name| token.claim_as_str(name))
        .find(|value| !value.trim().is_empty())
        .unwrap_or(UNKNOWN_SERVICE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn extract(claims: Value) -> String {
        let token = VerifiedToken::from_claims(claims.as_object().cloned().unwrap_or_default());
        extract_calling_service(&token)
    }

    #[test]
    fn appid_wins_over_azp() {
        assert_eq!(extract(json!({ "appid": "svc-a", "azp": "svc-b" })), "svc-a");
    }

    #[test]
    fn falls_back_to_azp() {
        assert_eq!(extract(json!({ "azp": "svc-b" })), "svc-b");
        assert_eq!(extract(json!({ "appid": "  ", "azp": "svc-b" })), "svc-b");
        assert_eq!(extract(json!({ "appid": null, "azp": "svc-b" })), "svc-b");
    }

    #[test]
    fn unknown_when_neither_claim_is_usable() {
        assert_eq!(extract(json!({})), UNKNOWN_SERVICE);
        assert_eq!(extract(json!({ "appid": "", "azp": "\t" })), UNKNOWN_SERVICE);
        assert_eq!(extract(json!({ "appid": 12, "azp": false })), UNKNOWN_SERVICE);
    }
}
