//! Outgoing mail for admin invitations.
//!
//! [`SmtpMailer`] wraps the `lettre` async SMTP transport. It is only built
//! when `SMTP_HOST` is configured; without it invitation links are handed
//! back to the inviting admin instead of mailed.

use async_trait::async_trait;
use footlights_core::types::Timestamp;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for mail delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// A plain-text message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Compose the invitation message sent to a new admin user.
pub fn invitation_mail(to: &str, role: &str, accept_url: &str, expires_at: Timestamp) -> OutgoingMail {
    OutgoingMail {
        to: to.to_string(),
        subject: "You have been invited to the Footlights back-office".to_string(),
        body: format!(
            "You have been invited to manage the theatre website as {role}.\n\n\
             Accept the invitation and choose your username and password here:\n{accept_url}\n\n\
             This link expires on {}.\n",
            expires_at.format("%Y-%m-%d %H:%M UTC")
        ),
    }
}

/// Delivers [`OutgoingMail`].
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

// ---------------------------------------------------------------------------
// SmtpMailer
// ---------------------------------------------------------------------------

/// Sends mail through an SMTP relay using STARTTLS.
pub struct SmtpMailer {
    from_address: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build the pooled transport. No connection is opened until the first send.
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port);

        if let (Some(user), Some(pass)) = (&config.user, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            from_address: config.from_address.clone(),
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let email = Message::builder()
            .from(self.from_address.parse()?)
            .to(mail.to.parse()?)
            .subject(mail.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body.clone())
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport.send(email).await?;

        tracing::info!(to = %mail.to, subject = %mail.subject, "Email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn invitation_mail_contains_link_and_expiry() {
        let expires = chrono::Utc.with_ymd_and_hms(2025, 9, 1, 18, 30, 0).unwrap();
        let mail = invitation_mail(
            "stage.manager@theatre.example",
            "editor",
            "https://theatre.example/admin/accept-invitation?token=abc",
            expires,
        );
        assert_eq!(mail.to, "stage.manager@theatre.example");
        assert!(mail.body.contains("as editor"));
        assert!(mail.body.contains("accept-invitation?token=abc"));
        assert!(mail.body.contains("2025-09-01 18:30 UTC"));
    }

    #[test]
    fn mail_error_display_build() {
        let err = MailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn mail_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = MailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }

    #[test]
    fn smtp_mailer_builds_without_connecting() {
        let config = SmtpConfig {
            host: "smtp.theatre.example".to_string(),
            port: 587,
            from_address: "noreply@theatre.example".to_string(),
            user: Some("mailer".to_string()),
            password: Some("secret".to_string()),
        };
        assert!(SmtpMailer::new(&config).is_ok());
    }
}
