use std::collections::BTreeMap;

use serde::Deserialize;

/// Typed view of the OAuth token endpoint's success body.
///
/// The access control service emits every field as a JSON string,
/// `expires_in` included, so nothing here is numeric.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Flat claim-URI → value mapping decoded from `access_token`.
///
/// Keys are kept sorted so the rendered JSON is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Claims(BTreeMap<String, String>);

impl Claims {
    /// Decomposes the encoded claims blob: percent-decode the whole string,
    /// split on `&`, split each piece on the first `=`.
    ///
    /// Duplicate keys are last-write-wins. A piece with no `=` maps to the
    /// empty string. Decoding is lossy, so this never fails.
    pub fn parse(access_token: &str) -> Self {
        let decoded = urlencoding::decode_binary(access_token.as_bytes());
        let decoded = String::from_utf8_lossy(&decoded);

        let mut claims = BTreeMap::new();
        for piece in decoded.split('&') {
            if piece.is_empty() {
                continue;
            }
            match piece.split_once('=') {
                Some((key, value)) => claims.insert(key.to_string(), value.to_string()),
                None => claims.insert(piece.to_string(), String::new()),
            };
        }

        Self(claims)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders the flat JSON object the hosting page embeds.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).expect("string map serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The example from the upstream service documentation, claim URIs
    // percent-encoded and the HMAC value carrying %2b / %3d escapes.
    const SAMPLE_ACCESS_TOKEN: &str = "http%3a%2f%2fschemas.xmlsoap.org%2fws%2f2005%2f05%2fidentity%2fclaims%2fnameidentifier=MyTestApp&http%3a%2f%2fschemas.microsoft.com%2faccesscontrolservice%2f2010%2f07%2fclaims%2fidentityprovider=https%3a%2f%2fdatamarket.accesscontrol.windows.net%2f&Audience=http%3a%2f%2fapi.microsofttranslator.com&ExpiresOn=1411783839&Issuer=https%3a%2f%2fdatamarket.accesscontrol.windows.net%2f&HMACSHA256=TILzaJCmZ1Bo3iy2ZXJ%2be5Qm%2bMOsQqRojOkvIgQs1R8%3d";

    #[test]
    fn parses_simple_segments() {
        let claims = Claims::parse("A=1&B=2&C=3");

        assert_eq!(claims.len(), 3);
        assert_eq!(claims.get("A"), Some("1"));
        assert_eq!(claims.get("B"), Some("2"));
        assert_eq!(claims.get("C"), Some("3"));
    }

    #[test]
    fn parses_real_access_token() {
        let claims = Claims::parse(SAMPLE_ACCESS_TOKEN);

        assert_eq!(
            claims.get("http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier"),
            Some("MyTestApp")
        );
        assert_eq!(
            claims.get(
                "http://schemas.microsoft.com/accesscontrolservice/2010/07/claims/identityprovider"
            ),
            Some("https://datamarket.accesscontrol.windows.net/")
        );
        assert_eq!(claims.get("Audience"), Some("http://api.microsofttranslator.com"));
        assert_eq!(claims.get("ExpiresOn"), Some("1411783839"));
        assert_eq!(claims.get("Issuer"), Some("https://datamarket.accesscontrol.windows.net/"));
        // Splitting on the first `=` keeps the base64 padding intact.
        assert_eq!(
            claims.get("HMACSHA256"),
            Some("TILzaJCmZ1Bo3iy2ZXJ+e5Qm+MOsQqRojOkvIgQs1R8=")
        );
        assert_eq!(claims.len(), 6);
    }

    #[test]
    fn duplicate_keys_are_last_write_wins() {
        let claims = Claims::parse("A=1&A=2");

        assert_eq!(claims.len(), 1);
        assert_eq!(claims.get("A"), Some("2"));
    }

    #[test]
    fn piece_without_separator_maps_to_empty_value() {
        let claims = Claims::parse("A=1&orphan&B=2");

        assert_eq!(claims.get("orphan"), Some(""));
        assert_eq!(claims.len(), 3);
    }

    #[test]
    fn empty_token_yields_no_claims() {
        assert!(Claims::parse("").is_empty());
    }

    #[test]
    fn json_rendering_is_sorted_and_flat() {
        let claims = Claims::parse("B=2&A=1");

        assert_eq!(claims.to_json(), r#"{"A":"1","B":"2"}"#);
    }

    #[test]
    fn token_response_deserializes_service_body() {
        let body = format!(
            r#"{{"token_type":"http://schemas.xmlsoap.org/ws/2009/11/swt-token-profile-1.0","access_token":"{SAMPLE_ACCESS_TOKEN}","expires_in":"599","scope":"http://api.microsofttranslator.com"}}"#
        );

        let response: TokenResponse = serde_json::from_str(&body).unwrap();

        assert_eq!(response.expires_in.as_deref(), Some("599"));
        assert_eq!(response.scope.as_deref(), Some("http://api.microsofttranslator.com"));
        assert_eq!(Claims::parse(&response.access_token).len(), 6);
    }

    #[test]
    fn token_response_tolerates_missing_optional_fields() {
        let response: TokenResponse = serde_json::from_str(r#"{"access_token":"A=1"}"#).unwrap();

        assert_eq!(response.token_type, None);
        assert_eq!(response.expires_in, None);
        assert_eq!(response.scope, None);
    }
}
