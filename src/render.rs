//! Terminal rendering for the testimonial gallery.
//!
//! Formats cards similar to the web gallery the service was built for:
//! ```text
//! ❝ Great tool
//!   ★★★★★
//!   Dana Reeve — CTO at Initech
//!   2025-11-02
//! ```
//! All functions are pure string builders; printing is the caller's job.

use crate::types::{Testimonial, TestimonialKind, TestimonialStatus, User};
use chrono::DateTime;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const STAR: &str = "\x1b[33m";

/// Presentation theme. Process-local: toggled per session, never
/// persisted across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(&mut self) {
        *self = match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Primary text style.
    fn text(&self) -> &'static str {
        match self {
            Theme::Light => "",
            Theme::Dark => "\x1b[97m",
        }
    }

    /// Secondary text style (author line, dates).
    fn muted(&self) -> &'static str {
        match self {
            Theme::Light => "\x1b[2m",
            Theme::Dark => "\x1b[90m",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

/// Star row for a rating, clamped to five.
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    let mut out = String::new();
    for _ in 0..filled {
        out.push('★');
    }
    for _ in filled..5 {
        out.push('☆');
    }
    out
}

/// Render an RFC 3339 date as `YYYY-MM-DD`, falling back to the raw
/// string when it does not parse.
pub fn format_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// One testimonial card.
pub fn format_card(t: &Testimonial, theme: Theme) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}❝ {}{}\n", theme.text(), t.content, RESET));
    out.push_str(&format!("  {}{}{}\n", STAR, stars(t.rating), RESET));
    out.push_str(&format!(
        "  {}{} — {} at {}{}\n",
        theme.muted(),
        t.author.name,
        t.author.role,
        t.author.company,
        RESET
    ));
    if t.kind == TestimonialKind::Video {
        let label = match &t.video_url {
            Some(url) => format!("▶ video: {}", url),
            None => "▶ video testimonial".to_string(),
        };
        out.push_str(&format!("  {}\n", label));
    }
    out.push_str(&format!(
        "  {}{}{}\n",
        theme.muted(),
        format_date(&t.date),
        RESET
    ));
    out
}

/// The public gallery: heading plus one card per approved testimonial.
/// Pending and rejected entries never render here.
pub fn render_grid(list: &[Testimonial], theme: Theme) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}{}What Our Customers Say{}\n",
        theme.text(),
        BOLD,
        RESET
    ));
    out.push_str(&format!(
        "{}Real stories from real customers who love our product{}\n\n",
        theme.muted(),
        RESET
    ));

    let approved: Vec<&Testimonial> = list
        .iter()
        .filter(|t| t.status == TestimonialStatus::Approved)
        .collect();

    if approved.is_empty() {
        out.push_str("No testimonials yet.\n");
        return out;
    }

    for t in approved {
        out.push_str(&format_card(t, theme));
        out.push('\n');
    }
    out
}

/// Moderation view: every entry with id and status, regardless of state.
pub fn render_moderation_list(list: &[Testimonial], theme: Theme) -> String {
    if list.is_empty() {
        return "No testimonials yet.\n".to_string();
    }
    let mut out = String::new();
    for t in list {
        out.push_str(&format!(
            "{}[{}] {}{}\n",
            theme.muted(),
            t.id,
            t.status.as_str(),
            RESET
        ));
        out.push_str(&format_card(t, theme));
        out.push('\n');
    }
    out
}

/// One-line identity summary for `/whoami`.
pub fn format_user(user: &User) -> String {
    format!(
        "{} <{}> — {} at {}",
        user.name, user.email, user.role, user.company
    )
}
