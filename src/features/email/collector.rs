use crate::shared::config::AgentConfig;
use crate::shared::error::CollectionError;
use crate::shared::traits::AsyncProbe;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

/// Resolves the email address registered for this installation.
pub struct EmailProbe {
    client: Client,
    email_url: String,
}

#[derive(Debug, Deserialize)]
struct EmailResponse {
    email: Option<String>,
}

impl EmailProbe {
    pub fn new(client: Client, config: &AgentConfig) -> Self {
        Self {
            client,
            email_url: config.email_url.clone(),
        }
    }
}

fn parse_email_body(body: &str) -> Result<String, CollectionError> {
    let response: EmailResponse = serde_json::from_str(body)
        .map_err(|e| CollectionError::Parse(format!("invalid email response: {}", e)))?;

    match response.email {
        Some(email) if !email.trim().is_empty() => Ok(email),
        _ => Err(CollectionError::Parse(
            "registration endpoint returned no email".to_string(),
        )),
    }
}

#[async_trait::async_trait]
impl AsyncProbe<String> for EmailProbe {
    async fn collect(&self) -> Result<String, CollectionError> {
        let body = self
            .client
            .get(&self.email_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let email = parse_email_body(&body)?;
        debug!("Resolved registered email");
        Ok(email)
    }

    fn name(&self) -> &'static str {
        "email"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_registered_email() {
        let email = parse_email_body(r#"{"email": "user@example.com"}"#).unwrap();
        assert_eq!(email, "user@example.com");
    }

    #[test]
    fn missing_field_is_an_error() {
        assert!(parse_email_body(r#"{}"#).is_err());
        assert!(parse_email_body(r#"{"email": null}"#).is_err());
        assert!(parse_email_body(r#"{"email": "  "}"#).is_err());
    }

    #[test]
    fn non_json_body_is_an_error() {
        assert!(matches!(
            parse_email_body("<html>maintenance</html>"),
            Err(CollectionError::Parse(_))
        ));
    }
}
