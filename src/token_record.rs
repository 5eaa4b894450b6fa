use serde::Deserialize;

/// Wrapper around the body sent back from the OAuth token endpoint.
///
/// A successful refresh carries `access_token`; a rejected one usually carries `error` and
/// `error_description` instead. Both shapes parse into this struct.
#[derive(Debug, Deserialize)]
pub struct TokenRecord {
    pub access_token: Option<String>,
    pub instance_url: Option<String>,
    pub id: Option<String>,
    pub token_type: Option<String>,
    pub issued_at: Option<String>,
    pub signature: Option<String>,
    pub scope: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl TokenRecord {
    /// The new access token, if the grant produced a usable one.
    pub fn usable_access_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }

    /// Best available explanation for a grant that produced no access token.
    pub fn failure_reason(&self) -> String {
        match (&self.error, &self.error_description) {
            (Some(error), Some(description)) => format!("{}: {}", error, description),
            (Some(error), None) => error.clone(),
            (None, Some(description)) => description.clone(),
            (None, None) => String::from("no access token in the token response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TokenRecord;

    #[test]
    fn parses_successful_grant() {
        let body = r#"{"access_token":"00Dxx!new","instance_url":"https://example.my.salesforce.com","id":"https://login.salesforce.com/id/00Dxx/005xx","token_type":"Bearer","issued_at":"1700000000000","signature":"abc="}"#;
        let record: TokenRecord = serde_json::from_str(body).unwrap();

        assert_eq!(record.usable_access_token(), Some("00Dxx!new"));
        assert_eq!(record.token_type.as_deref(), Some("Bearer"));
    }

    #[test]
    fn parses_rejected_grant() {
        let body = r#"{"error":"invalid_grant","error_description":"expired access/refresh token"}"#;
        let record: TokenRecord = serde_json::from_str(body).unwrap();

        assert_eq!(record.usable_access_token(), None);
        assert_eq!(record.failure_reason(), "invalid_grant: expired access/refresh token");
    }

    #[test]
    fn empty_token_is_not_usable() {
        let record: TokenRecord = serde_json::from_str(r#"{"access_token":""}"#).unwrap();

        assert_eq!(record.usable_access_token(), None);
        assert_eq!(record.failure_reason(), "no access token in the token response");
    }
}
