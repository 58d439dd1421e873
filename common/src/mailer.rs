use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::server_config::MailConfig;

pub type NotifyError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(cfg: &MailConfig) -> Result<Self, NotifyError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.smtp_host)?
            .port(cfg.smtp_port);
        if !cfg.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                cfg.username.clone(),
                cfg.password.clone(),
            ));
        }
        let from = cfg.from_address.parse::<Mailbox>()?;
        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl NotificationPublisher for SmtpNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse::<Mailbox>()?)
            .subject(subject)
            .body(body.to_string())?;
        self.transport.send(message).await?;
        Ok(())
    }
}

/// Subject and body for the one-time activation mail.
pub fn activation_mail(frontend_url: &str, token: &str) -> (String, String) {
    let link = format!(
        "{}/api/activate/{}/",
        frontend_url.trim_end_matches('/'),
        token
    );
    (
        "Activate Your Account".to_string(),
        format!("Click this link to activate your account: {}", link),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_mail_builds_link() {
        let (subject, body) = activation_mail("http://localhost:8000", "abc123");
        assert_eq!(subject, "Activate Your Account");
        assert!(body.ends_with("http://localhost:8000/api/activate/abc123/"));
    }

    #[test]
    fn activation_mail_tolerates_trailing_slash() {
        let (_, body) = activation_mail("http://localhost:8000/", "abc123");
        assert!(body.contains("http://localhost:8000/api/activate/abc123/"));
        assert!(!body.contains("8000//api"));
    }
}
