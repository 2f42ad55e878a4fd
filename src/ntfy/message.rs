//! Notification messages and their wire rendering

use serde::Serialize;
use std::time::Duration;
use url::Url;

use super::actions::{ActionButton, WireAction};
use super::duration::format_duration;
use super::priority::Priority;
use super::wire::{is_empty_slice, is_empty_str, is_zero, url_str};
use crate::errors::{NtfyError, NtfyResult};

/// A notification published to a topic
///
/// Only `topic` is required. Every other field is independently optional and
/// left out of the request when empty, zero or absent. Attachments are
/// referenced by URL; uploading files is not supported.
#[derive(Debug, Clone, PartialEq)]
pub struct Message<B = serde_json::Value> {
    /// Target topic name
    pub topic: String,
    /// Message body; the server substitutes "triggered" when empty
    pub body: String,
    /// Message title
    pub title: String,
    /// Tags, some of which map to emojis on the receiving client
    pub tags: Vec<String>,
    pub priority: Priority,
    /// Custom user action buttons
    pub actions: Vec<ActionButton<B>>,
    /// Website opened when the notification is clicked
    pub click_url: Option<Url>,
    /// URL used as notification icon
    pub icon_url: Option<Url>,
    /// URL of an attachment
    pub attach_url: Option<Url>,
    /// File name of the attachment
    pub attach_filename: String,
    /// Delivery delay; zero sends immediately
    pub delay: Duration,
    /// E-mail address to forward the notification to
    pub email: String,
    /// Phone number for a voice call
    pub call: String,
}

impl<B> Default for Message<B> {
    fn default() -> Self {
        Self {
            topic: String::new(),
            body: String::new(),
            title: String::new(),
            tags: Vec::new(),
            priority: Priority::UNSET,
            actions: Vec::new(),
            click_url: None,
            icon_url: None,
            attach_url: None,
            attach_filename: String::new(),
            delay: Duration::ZERO,
            email: String::new(),
            call: String::new(),
        }
    }
}

impl Message {
    /// Create a message for `topic` whose HTTP action bodies are JSON values
    ///
    /// Use `Message::<MyBody>::default().with_topic(..)` for a typed body.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Default::default()
        }
    }
}

impl<B> Message<B> {
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = priority.into();
        self
    }

    pub fn with_action(mut self, action: impl Into<ActionButton<B>>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn with_click(mut self, url: Url) -> Self {
        self.click_url = Some(url);
        self
    }

    pub fn with_icon(mut self, url: Url) -> Self {
        self.icon_url = Some(url);
        self
    }

    pub fn with_attachment(mut self, url: Url, filename: impl Into<String>) -> Self {
        self.attach_url = Some(url);
        self.attach_filename = filename.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_call(mut self, number: impl Into<String>) -> Self {
        self.call = number.into();
        self
    }

    /// Check that the message can be published
    pub fn validate(&self) -> NtfyResult<()> {
        if self.topic.is_empty() {
            return Err(NtfyError::validation("topic", "topic must not be empty"));
        }
        Ok(())
    }
}

impl<B: Serialize> Message<B> {
    pub(crate) fn render(&self) -> NtfyResult<WireMessage<'_>> {
        let actions = self
            .actions
            .iter()
            .map(ActionButton::render)
            .collect::<NtfyResult<Vec<_>>>()?;

        let delay = if self.delay > Duration::ZERO {
            format_duration(self.delay)
        } else {
            String::new()
        };

        Ok(WireMessage {
            topic: &self.topic,
            message: &self.body,
            title: &self.title,
            tags: &self.tags,
            priority: self.priority.normalized(),
            actions,
            click: url_str(self.click_url.as_ref()),
            icon: url_str(self.icon_url.as_ref()),
            delay,
            email: &self.email,
            call: &self.call,
            filename: &self.attach_filename,
            attachurl: url_str(self.attach_url.as_ref()),
        })
    }

    /// Render the request body sent to the server
    pub fn to_json(&self) -> NtfyResult<Vec<u8>> {
        let wire = self.render()?;
        serde_json::to_vec(&wire).map_err(|e| NtfyError::serialization("message", e))
    }
}

/// Wire shape of a message; field order is part of the format
#[derive(Debug, Serialize)]
pub(crate) struct WireMessage<'a> {
    topic: &'a str,
    #[serde(skip_serializing_if = "is_empty_str")]
    message: &'a str,
    #[serde(skip_serializing_if = "is_empty_str")]
    title: &'a str,
    #[serde(skip_serializing_if = "is_empty_slice")]
    tags: &'a [String],
    #[serde(skip_serializing_if = "is_zero")]
    priority: i8,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    actions: Vec<WireAction<'a>>,
    #[serde(skip_serializing_if = "is_empty_str")]
    click: &'a str,
    #[serde(skip_serializing_if = "is_empty_str")]
    icon: &'a str,
    #[serde(skip_serializing_if = "String::is_empty")]
    delay: String,
    #[serde(skip_serializing_if = "is_empty_str")]
    email: &'a str,
    #[serde(skip_serializing_if = "is_empty_str")]
    call: &'a str,
    #[serde(skip_serializing_if = "is_empty_str")]
    filename: &'a str,
    #[serde(skip_serializing_if = "is_empty_str")]
    attachurl: &'a str,
}
