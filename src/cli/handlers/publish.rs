//! Publish command handler
//!
//! Builds a message from command line flags and configuration defaults, then
//! either prints its JSON (dry run) or sends it.

use super::super::commands::PublishArgs;
use super::super::CliContext;
use anyhow::{anyhow, Context, Result};
use ntfy_publish::{HttpAction, Message, Priority, Publisher, PublisherConfig, ViewAction};
use tracing::debug;
use url::Url;

/// Handler for the publish command
pub struct PublishHandler<'a> {
    context: &'a CliContext,
}

impl<'a> PublishHandler<'a> {
    pub fn new(context: &'a CliContext) -> Self {
        Self { context }
    }

    pub async fn handle_publish(&self, args: PublishArgs) -> Result<()> {
        let message = self.build_message(&args)?;

        if args.dry_run {
            let json = message.to_json().context("Failed to render message")?;
            let json = String::from_utf8(json).context("Rendered message is not UTF-8")?;
            println!("{json}");
            return Ok(());
        }

        let ntfy = &self.context.config_manager.config().ntfy;
        let mut config =
            PublisherConfig::try_from(ntfy).context("Invalid ntfy configuration")?;
        if let Some(server) = args.server {
            config.server_url = server;
        }

        let publisher = Publisher::new(config).context("Failed to create publisher")?;
        debug!(server = %publisher.server(), topic = %message.topic, "sending message");

        let result = publisher
            .publish(&message)
            .await
            .with_context(|| format!("Failed to publish to topic '{}'", message.topic))?;

        println!("Published message {} to topic '{}'", result.id, result.topic);
        if let Some(expires) = result.expires_at() {
            println!("Expires: {}", expires.to_rfc3339());
        }

        Ok(())
    }

    /// Merge flags with configuration defaults; flags win
    fn build_message(&self, args: &PublishArgs) -> Result<Message> {
        let ntfy = &self.context.config_manager.config().ntfy;

        let topic = args
            .topic
            .clone()
            .or_else(|| ntfy.default_topic.clone())
            .ok_or_else(|| anyhow!("No topic given; pass --topic or set ntfy.default_topic"))?;

        let mut message = Message::new(topic);
        message.body = args.message.clone().unwrap_or_default();
        message.title = args.title.clone().unwrap_or_default();
        message.tags = if args.tags.is_empty() {
            ntfy.default_tags.clone()
        } else {
            args.tags.clone()
        };
        message.priority = args
            .priority
            .or(ntfy.default_priority)
            .unwrap_or(Priority::UNSET);
        message.click_url = args.click.clone();
        message.icon_url = args.icon.clone();
        message.attach_url = args.attach.clone();
        message.attach_filename = args.filename.clone().unwrap_or_default();
        message.delay = args.delay.unwrap_or_default();
        message.email = args.email.clone().unwrap_or_default();
        message.call = args.call.clone().unwrap_or_default();

        for raw in &args.views {
            message.actions.push(parse_view_action(raw)?.into());
        }
        for raw in &args.http {
            message.actions.push(parse_http_action(raw)?.into());
        }

        message.validate().context("Invalid message")?;
        Ok(message)
    }
}

/// Parse `LABEL,URL`
fn parse_view_action(raw: &str) -> Result<ViewAction> {
    let (label, url) = raw
        .split_once(',')
        .ok_or_else(|| anyhow!("Invalid view action '{raw}': expected LABEL,URL"))?;
    let label = parse_label(label, raw)?;
    let url = Url::parse(url.trim())
        .with_context(|| format!("Invalid URL in view action '{raw}'"))?;
    Ok(ViewAction::new(label, url))
}

/// Parse `LABEL,URL[,METHOD]`
fn parse_http_action(raw: &str) -> Result<HttpAction> {
    let mut parts = raw.splitn(3, ',');
    let label = parse_label(parts.next().unwrap_or_default(), raw)?;
    let url = parts
        .next()
        .ok_or_else(|| anyhow!("Invalid http action '{raw}': expected LABEL,URL[,METHOD]"))?;
    let url = Url::parse(url.trim())
        .with_context(|| format!("Invalid URL in http action '{raw}'"))?;

    let mut action = HttpAction::new(label, url);
    if let Some(method) = parts.next().map(str::trim).filter(|m| !m.is_empty()) {
        action = action.with_method(method.to_ascii_uppercase());
    }
    Ok(action)
}

fn parse_label<'s>(label: &'s str, raw: &str) -> Result<&'s str> {
    let label = label.trim();
    if label.is_empty() {
        return Err(anyhow!("Invalid action '{raw}': label must not be empty"));
    }
    Ok(label)
}
