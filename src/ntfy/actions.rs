//! Action buttons attached to notifications
//!
//! Each button variant renders into a flat [`WireAction`] record tagged with
//! its kind, which is then encoded by `serde_json`.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

use super::wire::{is_empty_map, is_empty_str, is_false, url_str};
use crate::errors::{NtfyError, NtfyResult};

/// Discriminator carried by every action on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    View,
    Http,
    Broadcast,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::View => "view",
            ActionKind::Http => "http",
            ActionKind::Broadcast => "broadcast",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A button rendered in the notification UI
///
/// `B` is the request body type of [`HttpAction`] buttons. Every HTTP button
/// in one message shares it; the default is an arbitrary JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionButton<B = serde_json::Value> {
    View(ViewAction),
    Http(HttpAction<B>),
    Broadcast(BroadcastAction),
}

impl<B> ActionButton<B> {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionButton::View(_) => ActionKind::View,
            ActionButton::Http(_) => ActionKind::Http,
            ActionButton::Broadcast(_) => ActionKind::Broadcast,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ActionButton::View(action) => action.label.as_str(),
            ActionButton::Http(action) => action.label.as_str(),
            ActionButton::Broadcast(action) => action.label.as_str(),
        }
    }
}

impl<B: Serialize> ActionButton<B> {
    pub(crate) fn render(&self) -> NtfyResult<WireAction<'_>> {
        match self {
            ActionButton::View(action) => Ok(action.render()),
            ActionButton::Http(action) => action.render(),
            ActionButton::Broadcast(action) => Ok(action.render()),
        }
    }

    /// Render this button to its wire JSON
    pub fn to_json(&self) -> NtfyResult<Vec<u8>> {
        encode(&self.render()?)
    }
}

impl<B> From<ViewAction> for ActionButton<B> {
    fn from(action: ViewAction) -> Self {
        ActionButton::View(action)
    }
}

impl<B> From<HttpAction<B>> for ActionButton<B> {
    fn from(action: HttpAction<B>) -> Self {
        ActionButton::Http(action)
    }
}

impl<B> From<BroadcastAction> for ActionButton<B> {
    fn from(action: BroadcastAction) -> Self {
        ActionButton::Broadcast(action)
    }
}

/// Opens a website or app link when tapped
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewAction {
    /// Label of the action button
    pub label: String,
    /// URL opened when the button is tapped
    pub link: Option<Url>,
    /// Dismiss the notification after the button is tapped
    pub clear: bool,
}

impl ViewAction {
    pub fn new(label: impl Into<String>, link: Url) -> Self {
        Self {
            label: label.into(),
            link: Some(link),
            clear: false,
        }
    }

    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub(crate) fn render(&self) -> WireAction<'_> {
        WireAction::View {
            label: &self.label,
            url: url_str(self.link.as_ref()),
            clear: self.clear,
        }
    }

    pub fn to_json(&self) -> NtfyResult<Vec<u8>> {
        encode(&self.render())
    }
}

/// Sends an HTTP request when tapped
///
/// An empty `method` is passed through as-is; the server then uses POST.
/// The body is sent only when one was set, and travels as a JSON-encoded
/// string rather than a nested object.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpAction<B = serde_json::Value> {
    /// Label of the action button
    pub label: String,
    /// URL the request is sent to
    pub url: Option<Url>,
    /// HTTP method of the request
    pub method: String,
    /// Headers passed with the request
    pub headers: BTreeMap<String, String>,
    /// Request body, encoded to JSON at render time
    pub body: Option<B>,
    /// Dismiss the notification after the request succeeds
    pub clear: bool,
}

impl<B> Default for HttpAction<B> {
    fn default() -> Self {
        Self {
            label: String::new(),
            url: None,
            method: String::new(),
            headers: BTreeMap::new(),
            body: None,
            clear: false,
        }
    }
}

impl HttpAction {
    pub fn new(label: impl Into<String>, url: Url) -> Self {
        Self {
            label: label.into(),
            url: Some(url),
            ..Default::default()
        }
    }
}

impl<B> HttpAction<B> {
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Attach a request body, changing the body type if needed
    pub fn with_body<T>(self, body: T) -> HttpAction<T> {
        HttpAction {
            label: self.label,
            url: self.url,
            method: self.method,
            headers: self.headers,
            body: Some(body),
            clear: self.clear,
        }
    }

    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }
}

impl<B: Serialize> HttpAction<B> {
    pub(crate) fn render(&self) -> NtfyResult<WireAction<'_>> {
        let body = self
            .body
            .as_ref()
            .map(|body| {
                serde_json::to_string(body)
                    .map_err(|e| NtfyError::serialization("http action body", e))
            })
            .transpose()?;

        Ok(WireAction::Http {
            label: &self.label,
            url: url_str(self.url.as_ref()),
            method: &self.method,
            headers: &self.headers,
            body,
            clear: self.clear,
        })
    }

    pub fn to_json(&self) -> NtfyResult<Vec<u8>> {
        encode(&self.render()?)
    }
}

/// Sends an Android broadcast intent when tapped
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BroadcastAction {
    /// Label of the action button
    pub label: String,
    /// Intent name; the receiving app falls back to its own default when empty
    pub intent: String,
    /// Extras passed with the intent
    pub extras: BTreeMap<String, String>,
    /// Dismiss the notification after the button is tapped
    pub clear: bool,
}

impl BroadcastAction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = intent.into();
        self
    }

    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(name.into(), value.into());
        self
    }

    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub(crate) fn render(&self) -> WireAction<'_> {
        WireAction::Broadcast {
            label: &self.label,
            intent: &self.intent,
            extras: &self.extras,
            clear: self.clear,
        }
    }

    pub fn to_json(&self) -> NtfyResult<Vec<u8>> {
        encode(&self.render())
    }
}

/// Wire shape of an action button
#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub(crate) enum WireAction<'a> {
    View {
        label: &'a str,
        #[serde(skip_serializing_if = "is_empty_str")]
        url: &'a str,
        #[serde(skip_serializing_if = "is_false")]
        clear: bool,
    },
    Http {
        label: &'a str,
        #[serde(skip_serializing_if = "is_empty_str")]
        url: &'a str,
        #[serde(skip_serializing_if = "is_empty_str")]
        method: &'a str,
        #[serde(skip_serializing_if = "is_empty_map")]
        headers: &'a BTreeMap<String, String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<String>,
        #[serde(skip_serializing_if = "is_false")]
        clear: bool,
    },
    Broadcast {
        label: &'a str,
        #[serde(skip_serializing_if = "is_empty_str")]
        intent: &'a str,
        #[serde(skip_serializing_if = "is_empty_map")]
        extras: &'a BTreeMap<String, String>,
        #[serde(skip_serializing_if = "is_false")]
        clear: bool,
    },
}

fn encode(wire: &WireAction<'_>) -> NtfyResult<Vec<u8>> {
    serde_json::to_vec(wire).map_err(|e| NtfyError::serialization("action button", e))
}
