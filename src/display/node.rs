use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::util::instant::Instant;
use crate::util::time::format_relative_time;

/// The rendered output of a display: visible text plus the machine-readable
/// and hover forms of the instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeNode {
    pub text: String,
    pub datetime: String,
    pub title: String,
}

impl TimeNode {
    /// One-shot render against a caller-supplied clock.
    pub fn render(instant: &Instant, now: DateTime<Utc>) -> Self {
        Self::from_parts(format_relative_time(instant, now), instant)
    }

    pub(crate) fn from_parts(text: String, instant: &Instant) -> Self {
        Self {
            text,
            datetime: instant.to_iso_string(),
            title: instant.to_locale_string(),
        }
    }

    pub fn to_markup(&self) -> String {
        format!(
            "<time datetime=\"{}\" title=\"{}\">{}</time>",
            escape_html(&self.datetime),
            escape_html(&self.title),
            escape_html(&self.text)
        )
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
