//! User-facing notifications, the toast analogue.
//!
//! Every failure in the client degrades to one of these one-liners;
//! nothing escalates to a crash. Messages go to stderr so piped output
//! stays clean.

/// Success notice: `✓ Logged in successfully!`
pub fn success(msg: &str) {
    eprintln!("✓ {}", msg);
}

/// Failure notice: `✗ Invalid credentials`. Deliberately generic — the
/// underlying cause is not surfaced here.
pub fn error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Neutral informational notice.
pub fn info(msg: &str) {
    eprintln!("• {}", msg);
}
