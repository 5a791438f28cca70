//! Email service and deferred notification outbox.
//!
//! Services never send mail directly; they queue [`Notification`]s on the
//! request's [`Outbox`], which the handler dispatches only after the
//! transaction committed. Delivery is fire-and-forget: a failed send is
//! logged and never surfaced to the caller.

use lettre::{
    message::{header::ContentType, Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::str::FromStr;

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
    models::enums::ApplicationStatus,
};

/// Application notification queued for post-commit delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    ApplicationReceived { recipient: String, event_name: String },
    ApplicationAccepted { recipient: String, event_name: String },
    ApplicationRejected { recipient: String, event_name: String },
}

impl Notification {
    /// Notification for an application moved to `status`; pending triggers
    /// none
    pub fn for_status(
        status: ApplicationStatus,
        recipient: String,
        event_name: String,
    ) -> Option<Self> {
        match status {
            ApplicationStatus::Accepted => Some(Notification::ApplicationAccepted {
                recipient,
                event_name,
            }),
            ApplicationStatus::Rejected => Some(Notification::ApplicationRejected {
                recipient,
                event_name,
            }),
            ApplicationStatus::Pending => None,
        }
    }

    pub fn recipient(&self) -> &str {
        match self {
            Notification::ApplicationReceived { recipient, .. }
            | Notification::ApplicationAccepted { recipient, .. }
            | Notification::ApplicationRejected { recipient, .. } => recipient,
        }
    }

    fn subject(&self) -> &'static str {
        "Event applications"
    }

    fn body(&self) -> String {
        match self {
            Notification::ApplicationReceived { event_name, .. } => format!(
                "Your application for the event {} has been received!",
                event_name
            ),
            Notification::ApplicationAccepted { event_name, .. } => format!(
                "Your application for the event {} has been accepted! You are now a participant.",
                event_name
            ),
            Notification::ApplicationRejected { event_name, .. } => format!(
                "Unfortunately, your application for the event {} has been rejected.",
                event_name
            ),
        }
    }
}

/// Per-request queue of notifications, drained after the commit point
#[derive(Debug, Default)]
pub struct Outbox {
    pending: Vec<Notification>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.pending.push(notification);
    }

    /// Queued notifications in insertion order
    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    /// Spawn one best-effort send per queued notification. Call only after
    /// the transaction committed; the response does not wait for delivery.
    pub fn dispatch(self, email: EmailService) {
        for notification in self.pending {
            let email = email.clone();
            tokio::spawn(async move {
                if let Err(e) = email.send_notification(&notification).await {
                    tracing::warn!(
                        "Failed to send notification to {}: {}",
                        notification.recipient(),
                        e
                    );
                }
            });
        }
    }
}

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send an application notification
    pub async fn send_notification(&self, notification: &Notification) -> AppResult<()> {
        self.send_email(
            notification.recipient(),
            notification.subject(),
            &notification.body(),
        )
        .await
    }

    /// Generic email sending function
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let from_name = self
            .config
            .smtp_from_name
            .as_deref()
            .unwrap_or("Kultura");
        let from_mailbox = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?;

        let to_mailbox = Mailbox::from_str(to)
            .map_err(|e| AppError::Internal(format!("Invalid to address: {}", e)))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(format!(
                                r#"<html><body><pre>{}</pre></body></html>"#,
                                body.replace('\n', "<br>")
                            )),
                    ),
            )
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        let mailer_builder = if self.config.smtp_use_tls {
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Internal(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let mailer_builder = if let (Some(username), Some(password)) = (
            &self.config.smtp_username,
            &self.config.smtp_password,
        ) {
            mailer_builder.credentials(Credentials::new(
                username.clone(),
                password.clone(),
            ))
        } else {
            mailer_builder
        };

        let mailer = mailer_builder.build();

        mailer
            .send(&email)
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_and_rejected_trigger_one_notification() {
        let accepted = Notification::for_status(
            ApplicationStatus::Accepted,
            "a@example.com".to_string(),
            "Open lecture".to_string(),
        );
        assert!(matches!(
            accepted,
            Some(Notification::ApplicationAccepted { .. })
        ));

        let rejected = Notification::for_status(
            ApplicationStatus::Rejected,
            "a@example.com".to_string(),
            "Open lecture".to_string(),
        );
        assert!(matches!(
            rejected,
            Some(Notification::ApplicationRejected { .. })
        ));
    }

    #[test]
    fn pending_triggers_nothing() {
        assert_eq!(
            Notification::for_status(
                ApplicationStatus::Pending,
                "a@example.com".to_string(),
                "Open lecture".to_string(),
            ),
            None
        );
    }

    #[test]
    fn outbox_keeps_insertion_order() {
        let mut outbox = Outbox::new();
        outbox.push(Notification::ApplicationReceived {
            recipient: "first@example.com".to_string(),
            event_name: "A".to_string(),
        });
        outbox.push(Notification::ApplicationAccepted {
            recipient: "second@example.com".to_string(),
            event_name: "B".to_string(),
        });

        let recipients: Vec<_> = outbox.pending().iter().map(|n| n.recipient()).collect();
        assert_eq!(recipients, vec!["first@example.com", "second@example.com"]);
    }

    #[test]
    fn bodies_mention_the_event() {
        let n = Notification::ApplicationRejected {
            recipient: "a@example.com".to_string(),
            event_name: "Winter exhibition".to_string(),
        };
        assert!(n.body().contains("Winter exhibition"));
    }
}
