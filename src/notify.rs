use reqwest::Client;
use serde::Serialize;

use crate::config::NotifySettings;

/// Marker the blog's mail-to-post gateway expects at the top of the body.
const BODY_PREFIX: &str = "!m\n\n";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn for_menu(subject_prefix: &str, name: &str, formatted: &str) -> Self {
        Self {
            subject: format!("{subject_prefix} - {name}"),
            body: format!("{BODY_PREFIX}{formatted}"),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()>;
}

/// POSTs each notification as JSON to a webhook.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        self.client
            .post(&self.url)
            .json(notification)
            .send()
            .await?
            .error_for_status()?;
        tracing::info!(subject = %notification.subject, "sent notification");
        Ok(())
    }
}

/// Used when notifications are switched off: records what would have been sent.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        tracing::info!(subject = %notification.subject, "notification disabled, not sent");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum MenuNotifier {
    Webhook(WebhookNotifier),
    Log(LogNotifier),
}

impl MenuNotifier {
    pub fn from_settings(settings: &NotifySettings, client: Client) -> Self {
        match (settings.enabled, &settings.webhook_url) {
            (true, Some(url)) => MenuNotifier::Webhook(WebhookNotifier::new(client, url.clone())),
            _ => MenuNotifier::Log(LogNotifier),
        }
    }
}

impl Notifier for MenuNotifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        match self {
            MenuNotifier::Webhook(n) => n.notify(notification).await,
            MenuNotifier::Log(n) => n.notify(notification).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn notification_subject_and_body() {
        let n = Notification::for_menu("WesWings Menu", "monday", "### Lunch\n\n");
        assert_eq!(n.subject, "WesWings Menu - monday");
        assert_eq!(n.body, "!m\n\n### Lunch\n\n");
    }

    #[test]
    fn disabled_settings_select_log_notifier() {
        let settings = NotifySettings {
            enabled: false,
            webhook_url: Some("http://localhost/hook".into()),
            subject_prefix: "WesWings Menu".into(),
        };
        let notifier = MenuNotifier::from_settings(&settings, Client::new());
        assert!(matches!(notifier, MenuNotifier::Log(_)));
    }

    #[tokio::test]
    async fn webhook_posts_json() {
        let server = MockServer::start();
        let hook = server.mock(|when, then| {
            when.method(POST).path("/hook").json_body(serde_json::json!({
                "subject": "WesWings Menu - friday",
                "body": "!m\n\n### Lunch\n\n### Dinner\n\n"
            }));
            then.status(200);
        });

        let notifier = WebhookNotifier::new(Client::new(), server.url("/hook"));
        let n = Notification::for_menu("WesWings Menu", "friday", "### Lunch\n\n### Dinner\n\n");
        notifier.notify(&n).await.unwrap();
        hook.assert();
    }

    #[tokio::test]
    async fn webhook_failure_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/hook");
            then.status(500);
        });

        let notifier = WebhookNotifier::new(Client::new(), server.url("/hook"));
        let n = Notification::for_menu("WesWings Menu", "friday", "");
        assert!(notifier.notify(&n).await.is_err());
    }
}
