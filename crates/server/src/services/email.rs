//! Email service for contact notifications and password resets.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates. Every
//! message is sent as multipart/alternative with a plain-text fallback.
//!
//! Sending is always fire-and-forget from the caller's point of view: route
//! handlers spawn these futures and log failures rather than coupling HTTP
//! responses to SMTP availability.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;
use crate::models::ContactMessage;

/// HTML template for the new-contact notification.
#[derive(Template)]
#[template(path = "email/contact_notification.html")]
struct ContactNotificationHtml<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    message: &'a str,
}

/// Plain text template for the new-contact notification.
#[derive(Template)]
#[template(path = "email/contact_notification.txt")]
struct ContactNotificationText<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    message: &'a str,
}

/// HTML template for the reply sent back to a visitor.
#[derive(Template)]
#[template(path = "email/contact_reply.html")]
struct ContactReplyHtml<'a> {
    name: &'a str,
    reply: &'a str,
    original: &'a str,
}

/// Plain text template for the reply sent back to a visitor.
#[derive(Template)]
#[template(path = "email/contact_reply.txt")]
struct ContactReplyText<'a> {
    name: &'a str,
    reply: &'a str,
    original: &'a str,
}

/// HTML template for the password-reset email.
#[derive(Template)]
#[template(path = "email/password_reset.html")]
struct PasswordResetHtml<'a> {
    name: &'a str,
    reset_url: &'a str,
}

/// Plain text template for the password-reset email.
#[derive(Template)]
#[template(path = "email/password_reset.txt")]
struct PasswordResetText<'a> {
    name: &'a str,
    reset_url: &'a str,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Email service for transactional mail.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    contact_notify_address: Option<String>,
    base_url: String,
}

impl Mailer {
    /// Create a new mailer from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig, base_url: &str) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
            contact_notify_address: config.contact_notify_address.clone(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Notify the office inbox that a new contact message arrived.
    ///
    /// Does nothing when `CONTACT_NOTIFY_ADDRESS` is unset.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or sending fails.
    pub async fn send_contact_notification(
        &self,
        message: &ContactMessage,
    ) -> Result<(), EmailError> {
        let Some(to) = &self.contact_notify_address else {
            return Ok(());
        };

        let phone = message.phone.as_deref().unwrap_or("not provided");
        let html = ContactNotificationHtml {
            name: &message.name,
            email: message.email.as_str(),
            phone,
            message: &message.message,
        }
        .render()?;
        let text = ContactNotificationText {
            name: &message.name,
            email: message.email.as_str(),
            phone,
            message: &message.message,
        }
        .render()?;

        self.send_multipart(to, "New contact message", &text, &html)
            .await
    }

    /// Send an admin's reply back to the visitor who wrote in.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or sending fails.
    pub async fn send_contact_reply(
        &self,
        message: &ContactMessage,
        reply: &str,
    ) -> Result<(), EmailError> {
        let html = ContactReplyHtml {
            name: &message.name,
            reply,
            original: &message.message,
        }
        .render()?;
        let text = ContactReplyText {
            name: &message.name,
            reply,
            original: &message.message,
        }
        .render()?;

        self.send_multipart(
            message.email.as_str(),
            "Re: your message to Stonebridge Construction",
            &text,
            &html,
        )
        .await
    }

    /// Send a password-reset link to an admin.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or sending fails.
    pub async fn send_password_reset(
        &self,
        to: &str,
        name: &str,
        token: &str,
    ) -> Result<(), EmailError> {
        let reset_url = format!("{}/admin/reset-password?token={token}", self.base_url);
        let html = PasswordResetHtml {
            name,
            reset_url: &reset_url,
        }
        .render()?;
        let text = PasswordResetText {
            name,
            reset_url: &reset_url,
        }
        .render()?;

        self.send_multipart(to, "Reset your Stonebridge admin password", &text, &html)
            .await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.transport.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}
