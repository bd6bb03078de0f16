//! Mock Email Service Implementation
//!
//! Provides in-memory email capture for testing without external dependencies.
//! Compatible with the integration test infrastructure and can capture
//! verification-code emails for workflow validation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{EmailError, EmailMessage, EmailReceipt, EmailService};

/// Email captured by the mock service
#[derive(Debug, Clone)]
pub struct CapturedEmail {
    pub message: EmailMessage,
    pub receipt: EmailReceipt,
    pub captured_at: DateTime<Utc>,
}

impl CapturedEmail {
    /// Extract the verification code from email content
    pub fn extract_verification_code(&self) -> Option<String> {
        // First check metadata
        if let Some(code) = self.message.metadata.get("verification_code") {
            return Some(code.clone());
        }

        // Fall back to the body text
        let text = format!(
            "{} {}",
            self.message.body_text,
            self.message.body_html.as_deref().unwrap_or("")
        );

        let re = regex::Regex::new(r"verification code is ([A-Z]+)").ok()?;
        re.captures(&text)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extract the verification token from the verify link in the email body
    pub fn extract_verification_token(&self) -> Option<String> {
        let text = format!(
            "{} {}",
            self.message.body_text,
            self.message.body_html.as_deref().unwrap_or("")
        );

        let re = regex::Regex::new(r"verify\?token=([A-Za-z0-9_.-]+)").ok()?;
        re.captures(&text)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Mock email service for testing
#[derive(Debug, Clone)]
pub struct MockEmailService {
    emails: Arc<Mutex<Vec<CapturedEmail>>>,
    email_by_recipient: Arc<Mutex<HashMap<String, Vec<CapturedEmail>>>>,
    app_base_url: String,
    enabled: bool,
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new(app_base_url: String) -> Self {
        Self {
            emails: Arc::new(Mutex::new(Vec::new())),
            email_by_recipient: Arc::new(Mutex::new(HashMap::new())),
            app_base_url,
            enabled: true,
        }
    }

    /// Create a disabled mock email service (for testing)
    pub fn new_disabled(app_base_url: String) -> Self {
        Self {
            emails: Arc::new(Mutex::new(Vec::new())),
            email_by_recipient: Arc::new(Mutex::new(HashMap::new())),
            app_base_url,
            enabled: false,
        }
    }

    /// Get all captured emails
    pub fn get_all_emails(&self) -> Vec<CapturedEmail> {
        self.emails.lock().unwrap().clone()
    }

    /// Get emails sent to a specific recipient
    pub fn get_emails_for_recipient(&self, email: &str) -> Vec<CapturedEmail> {
        self.email_by_recipient
            .lock()
            .unwrap()
            .get(email)
            .cloned()
            .unwrap_or_default()
    }

    /// Get the most recent verification email for a recipient
    pub fn get_latest_verification_email(&self, email: &str) -> Option<CapturedEmail> {
        self.get_emails_for_recipient(email)
            .into_iter()
            .filter(|e| {
                e.message
                    .metadata
                    .get("email_type")
                    .map(|t| t == "verification_code")
                    .unwrap_or(false)
                    || e.message.subject.to_lowercase().contains("activate")
            })
            .max_by_key(|e| e.captured_at)
    }

    /// Get the verification code from the most recent verification email
    pub fn get_verification_code_for_email(&self, email: &str) -> Option<String> {
        self.get_latest_verification_email(email)
            .and_then(|email| email.extract_verification_code())
    }

    /// Check if a verification email was sent to a specific email address
    pub fn was_verification_sent_to(&self, email: &str) -> bool {
        self.get_verification_code_for_email(email).is_some()
    }

    /// Get count of emails sent
    pub fn email_count(&self) -> usize {
        self.emails.lock().unwrap().len()
    }

    /// Clear all captured emails
    pub fn clear(&self) {
        self.emails.lock().unwrap().clear();
        self.email_by_recipient.lock().unwrap().clear();
    }

    /// Check if email sending is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[async_trait::async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError> {
        if !self.enabled {
            tracing::warn!("Mock email service disabled, skipping send");
            return Ok(EmailReceipt {
                message_id: format!("disabled-{}", Uuid::new_v4()),
                sent_at: Utc::now(),
                provider: "mock-disabled".to_string(),
                metadata: message.metadata.clone(),
            });
        }

        tracing::info!("Mock email service capturing email to: {}", message.to);

        let receipt = EmailReceipt {
            message_id: format!("mock-{}", Uuid::new_v4()),
            sent_at: Utc::now(),
            provider: "mock".to_string(),
            metadata: message.metadata.clone(),
        };

        let captured = CapturedEmail {
            message: message.clone(),
            receipt: receipt.clone(),
            captured_at: Utc::now(),
        };

        // Store email in global list
        self.emails.lock().unwrap().push(captured.clone());

        // Store email by recipient for easy lookup
        self.email_by_recipient
            .lock()
            .unwrap()
            .entry(message.to)
            .or_default()
            .push(captured);

        Ok(receipt)
    }

    fn default_from(&self) -> String {
        "accounts@gatehouse.app".to_string()
    }

    fn app_base_url(&self) -> &str {
        &self.app_base_url
    }
}
