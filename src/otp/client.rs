//! HTTP client for the OTP service.
//!
//! Every call is a single attempt. Inputs are cleaned and validated
//! first; nothing goes over the wire unless they pass.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::OtpError;

pub const SEND_OTP_PATH: &str = "/send-otp";
pub const VERIFY_OTP_PATH: &str = "/verify-otp";
pub const HEALTH_PATH: &str = "/health";

pub const PHONE_DIGITS: usize = 10;
pub const CODE_DIGITS: usize = 6;

/// Keep only ASCII digits
pub fn clean_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Show only the last four digits in logs
fn mask_phone(phone: &str) -> String {
    let visible = phone.len().saturating_sub(4);
    format!("{}{}", "*".repeat(visible), &phone[visible..])
}

#[derive(Serialize)]
struct SendRequest<'a> {
    phone: &'a str,
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    phone: &'a str,
    code: &'a str,
}

/// Body the service answers with on both endpoints
#[derive(Deserialize, Debug)]
struct OtpResponse {
    #[serde(default)]
    success: bool,
    error: Option<String>,
    message: Option<String>,
}

/// Which endpoint a response belongs to, for error wording
#[derive(Debug, Clone, Copy)]
enum Call {
    Send,
    Verify,
}

impl Call {
    fn failure_prefix(self) -> &'static str {
        match self {
            Call::Send => "Failed to send OTP",
            Call::Verify => "Failed to verify OTP",
        }
    }

    fn fallback(self) -> &'static str {
        match self {
            Call::Send => "Failed to send OTP",
            Call::Verify => "Invalid or expired OTP",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OtpClient {
    http: Client,
    base_url: String,
}

impl OtpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, OtpError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Ask the service to text a code to `phone`
    pub async fn send_code(&self, phone: &str) -> Result<(), OtpError> {
        if phone.is_empty() {
            return Err(OtpError::validation("Phone number is required"));
        }

        let phone = clean_digits(phone);
        if phone.len() != PHONE_DIGITS {
            return Err(OtpError::validation(
                "Please enter a valid 10-digit phone number",
            ));
        }

        info!("Sending OTP to {}", mask_phone(&phone));

        let response = self
            .http
            .post(self.url(SEND_OTP_PATH))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&SendRequest { phone: &phone })
            .send()
            .await?;

        check_response(response, Call::Send).await
    }

    /// Check `code` against the one sent to `phone`
    pub async fn verify_code(&self, phone: &str, code: &str) -> Result<(), OtpError> {
        if phone.is_empty() || code.is_empty() {
            return Err(OtpError::validation(
                "Phone number and OTP code are required",
            ));
        }

        let phone = clean_digits(phone);
        let code = clean_digits(code);

        if phone.len() != PHONE_DIGITS {
            return Err(OtpError::validation("Invalid phone number format"));
        }
        if code.len() != CODE_DIGITS {
            return Err(OtpError::validation("OTP must be 6 digits"));
        }

        info!("Verifying OTP for {}", mask_phone(&phone));

        let response = self
            .http
            .post(self.url(VERIFY_OTP_PATH))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&VerifyRequest {
                phone: &phone,
                code: &code,
            })
            .send()
            .await?;

        check_response(response, Call::Verify).await
    }

    /// Connectivity check, returns whatever JSON the service reports
    pub async fn health(&self) -> Result<serde_json::Value, OtpError> {
        let response = self
            .http
            .get(self.url(HEALTH_PATH))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OtpError::Rejected {
                status: Some(status.as_u16()),
                message: format!(
                    "Server health check failed: {} {}",
                    status.as_u16(),
                    reason(status)
                ),
            });
        }

        let body: serde_json::Value = response.json().await?;
        info!("Server connection successful: {body}");
        Ok(body)
    }
}

fn reason(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}

/// Turn an OTP endpoint response into `Ok(())` or a descriptive error
async fn check_response(response: Response, call: Call) -> Result<(), OtpError> {
    let status = response.status();
    info!("{:?} OTP response status: {status}", call);

    let text = response.text().await?;

    if !status.is_success() {
        let message = match serde_json::from_str::<OtpResponse>(&text) {
            Ok(body) => body
                .error
                .unwrap_or_else(|| format!("{}: {}", call.failure_prefix(), reason(status))),
            Err(_) => format!("HTTP {}: {}", status.as_u16(), reason(status)),
        };
        warn!("{:?} OTP failed: {message}", call);
        return Err(OtpError::Rejected {
            status: Some(status.as_u16()),
            message,
        });
    }

    let body: OtpResponse = serde_json::from_str(&text).map_err(|e| {
        warn!("Malformed OTP response: {e}");
        OtpError::Transport("Unexpected response from server".to_string())
    })?;

    if !body.success {
        let message = match call {
            Call::Send => body.error,
            Call::Verify => body.error.or(body.message),
        }
        .unwrap_or_else(|| call.fallback().to_string());

        warn!("{:?} OTP rejected: {message}", call);
        return Err(OtpError::Rejected {
            status: Some(status.as_u16()),
            message,
        });
    }

    Ok(())
}
