//! Reporting committed reorders to the backend.
//!
//! The drag component only builds an [`OrderChange`] and hands it to an
//! [`OrderNotifier`]. Delivery is fire-and-forget from its point of view:
//! failures surface through the notifier's own outcome channel.

mod http;

pub use http::{HttpNotifier, OrderTransport, ReqwestTransport, TransportResponse, deliver};

/// HTTP method used for a partial-update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    Post,
    #[default]
    Put,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
        }
    }
}

/// A row moved from `start` to `end` (zero-based, header excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderChange {
    pub method: HttpMethod,
    /// Callback template with `:start`/`:end` substituted.
    pub url: String,
    /// Selector of the element the response fragment replaces.
    pub target: String,
    /// Markup of the table body after the move.
    pub payload: String,
    pub start: usize,
    pub end: usize,
}

impl OrderChange {
    pub fn put(
        url: impl Into<String>,
        target: impl Into<String>,
        payload: impl Into<String>,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            method: HttpMethod::Put,
            url: url.into(),
            target: target.into(),
            payload: payload.into(),
            start,
            end,
        }
    }
}

/// Receiver of committed reorders.
pub trait OrderNotifier: Send + Sync {
    /// Start delivering `change`. Must not block.
    fn notify(&self, change: OrderChange);
}

/// How a delivered change was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Accepted; `fragment` is the replacement markup the server sent back.
    Applied { change: OrderChange, fragment: String },
    /// Rejected because the record changed underneath us.
    Conflict { change: OrderChange, message: String },
    /// Any other failure.
    Failed { change: OrderChange, error: String },
}

impl NotifyOutcome {
    pub fn change(&self) -> &OrderChange {
        match self {
            Self::Applied { change, .. }
            | Self::Conflict { change, .. }
            | Self::Failed { change, .. } => change,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}
