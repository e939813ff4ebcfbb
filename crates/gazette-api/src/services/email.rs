//! Email service for contact-form notifications via SMTP.

use std::sync::Arc;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use gazette_core::models::ContactMessage;
use gazette_core::Config;

/// Sends a notification mail for each contact-form submission.
/// No-op if SMTP or the notification target is not configured.
#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
    notify_to: String,
}

impl EmailService {
    /// Create email service from config. Returns `None` when SMTP or the
    /// notification recipient is not configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let host = config.smtp_host()?;
        let from = config.smtp_from()?.to_string();
        let notify_to = config.contact_notify_email()?.to_string();
        let port = config.smtp_port().unwrap_or(587);

        let mailer = if config.smtp_tls() {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?;
            let b = b.port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Email service initialized (SMTP with STARTTLS)");
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Email service initialized (SMTP)");
            b.build()
        };

        Some(Self {
            mailer: Arc::new(mailer),
            from,
            notify_to,
        })
    }

    /// Send a plain-text notification for a contact submission.
    pub async fn notify_contact(&self, message: &ContactMessage) -> Result<(), String> {
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| format!("Invalid SMTP_FROM: {}", e))?;
        let to_addr: Mailbox = self
            .notify_to
            .parse()
            .map_err(|e| format!("Invalid CONTACT_NOTIFY_EMAIL: {}", e))?;

        let subject = match &message.subject {
            Some(s) => format!("New contact message: {}", s),
            None => "New contact message".to_string(),
        };
        let body = format!(
            "From: {} <{}>\n\n{}",
            message.name, message.email, message.message
        );

        let email = Message::builder()
            .from(from_addr)
            .to(to_addr)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| e.to_string())?;

        self.mailer.send(email).await.map_err(|e| e.to_string())?;
        tracing::info!(contact_id = %message.id, "Contact notification email sent");
        Ok(())
    }
}
