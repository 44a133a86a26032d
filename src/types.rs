//! Wire types shared with the testimonial service.
//!
//! The service speaks camelCase JSON; field renames here keep the Rust
//! side idiomatic. Dates arrive as RFC 3339 strings and are kept as
//! strings until display time — see [`crate::render::format_date`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An authenticated account as returned by `/auth/me` and embedded in
/// [`AuthResponse`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub company: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Author snapshot embedded in a testimonial at submission time.
/// Not a reference to a live user record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Testimonial kind: plain text or text with an attached video.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TestimonialKind {
    Text,
    Video,
}

impl TestimonialKind {
    /// Wire name, as sent in the multipart `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestimonialKind::Text => "text",
            TestimonialKind::Video => "video",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(TestimonialKind::Text),
            "video" => Some(TestimonialKind::Video),
            _ => None,
        }
    }
}

/// Moderation lifecycle flag. Only `approved` entries are shown in the
/// public gallery; transitions happen server-side via approve/reject.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TestimonialStatus {
    Pending,
    Approved,
    Rejected,
}

impl TestimonialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestimonialStatus::Pending => "pending",
            TestimonialStatus::Approved => "approved",
            TestimonialStatus::Rejected => "rejected",
        }
    }
}

/// A testimonial record as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Testimonial {
    pub id: String,
    pub author: Author,
    pub content: String,
    pub rating: u8,
    #[serde(rename = "type")]
    pub kind: TestimonialKind,
    #[serde(rename = "videoUrl", default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Submission date, RFC 3339.
    pub date: String,
    pub status: TestimonialStatus,
}

/// Response to login and register: the bearer token plus the bound user.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Registration payload. All fields are required free-text strings;
/// the service owns any further validation.
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub name: String,
    pub company: String,
    pub role: String,
}

/// A testimonial submission, posted as multipart form data.
///
/// `video` is optional even when `kind` is `Video` — the service accepts
/// a video testimonial without an attachment and the client does not
/// enforce one either.
#[derive(Debug, Clone)]
pub struct NewTestimonial {
    pub content: String,
    pub rating: u8,
    pub kind: TestimonialKind,
    pub video: Option<PathBuf>,
}

/// Partial update for PATCH `/testimonials/:id`. Absent fields are
/// omitted from the request body entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TestimonialPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}
