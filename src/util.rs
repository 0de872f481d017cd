use chrono::{Datelike, NaiveDate};
use reqwest::Url;

use crate::error::{Error, Result};

/// Parses a base URL and makes sure its path ends with `/` so that
/// `Url::join` appends endpoint paths instead of replacing the last segment.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::Config("base URL is empty".to_string()));
    }

    let mut url =
        Url::parse(raw).map_err(|e| Error::Config(format!("invalid base URL `{raw}`: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "invalid base URL `{raw}`: scheme must be http or https"
        )));
    }
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("invalid base URL `{raw}`")));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Cuts `text` to at most `limit` bytes on a char boundary, marking the cut with `...`.
pub(crate) fn truncate_body(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Year, month and day without zero padding, as the date endpoints expect.
pub(crate) fn date_segments(date: NaiveDate) -> [String; 3] {
    [
        date.year().to_string(),
        date.month().to_string(),
        date.day().to_string(),
    ]
}

pub(crate) fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    if (s.starts_with('"') && s.ends_with('"') && s.len() >= 2)
        || (s.starts_with('\'') && s.ends_with('\'') && s.len() >= 2)
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
