//! Pure text rendering for alerts, forecast periods, and blog posts.

use crate::types::{AlertFeature, ForecastPeriod, Post};
use chrono::{DateTime, Local, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// Separator appended after every rendered record.
pub const DIVIDER: &str = "---";

/// Characters of stripped excerpt kept before the ellipsis.
pub const EXCERPT_LIMIT: usize = 200;

/// Opening or closing tag, possibly cut off by the end of input.
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[^>]+(>|$)").expect("tag pattern is valid"));

/// `value`, or `placeholder` when the value is missing or empty.
pub fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

pub fn format_alert(feature: &AlertFeature) -> String {
    let props = &feature.properties;
    [
        format!("Event: {}", or_placeholder(props.event.as_deref(), "Unknown")),
        format!("Area: {}", or_placeholder(props.area_desc.as_deref(), "Unknown")),
        format!("Severity: {}", or_placeholder(props.severity.as_deref(), "Unknown")),
        format!("Status: {}", or_placeholder(props.status.as_deref(), "Unknown")),
        format!("Headline: {}", or_placeholder(props.headline.as_deref(), "No headline")),
        DIVIDER.to_string(),
    ]
    .join("\n")
}

pub fn format_period(period: &ForecastPeriod) -> String {
    let temperature = period.temperature.as_ref().map(format_number);
    [
        format!("{}:", or_placeholder(period.name.as_deref(), "Unknown")),
        format!(
            "Temperature: {}°{}",
            or_placeholder(temperature.as_deref(), "Unknown"),
            or_placeholder(period.temperature_unit.as_deref(), "F")
        ),
        format!(
            "Wind: {} {}",
            or_placeholder(period.wind_speed.as_deref(), "Unknown"),
            or_placeholder(period.wind_direction.as_deref(), "")
        ),
        or_placeholder(period.short_forecast.as_deref(), "No forecast available").to_string(),
        DIVIDER.to_string(),
    ]
    .join("\n")
}

/// Shortest decimal form, so `72.0` reads as `72`
fn format_number(number: &serde_json::Number) -> String {
    if number.is_f64() {
        match number.as_f64() {
            Some(value) if value == 0.0 => "0".to_string(),
            Some(value) => value.to_string(),
            None => number.to_string(),
        }
    } else {
        number.to_string()
    }
}

pub fn format_post(post: &Post) -> String {
    [
        format!("Title: {}", post.title.rendered),
        format!("Date: {}", format_post_date(&post.date)),
        format!("Link: {}", post.link),
        format!("Excerpt: {}", truncate_excerpt(&strip_html(&post.excerpt.rendered))),
        DIVIDER.to_string(),
    ]
    .join("\n")
}

/// Best-effort tag removal. Other entities are left encoded.
pub fn strip_html(html: &str) -> String {
    TAG_PATTERN.replace_all(html, "").replace("&nbsp;", " ")
}

/// First [`EXCERPT_LIMIT`] characters followed by `...`, whether or not anything was cut.
pub fn truncate_excerpt(text: &str) -> String {
    let mut excerpt: String = text.chars().take(EXCERPT_LIMIT).collect();
    excerpt.push_str("...");
    excerpt
}

/// Render an ISO 8601 post date as `M/D/YYYY, h:mm:ss AM`.
///
/// WordPress reports site-local times without an offset; those are shown as-is.
/// Timestamps carrying an offset are converted to the local zone.
pub fn format_post_date(date: &str) -> String {
    const DISPLAY: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

    if let Ok(naive) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(DISPLAY).to_string();
    }
    match DateTime::parse_from_rfc3339(date) {
        Ok(dt) => dt.with_timezone(&Local).format(DISPLAY).to_string(),
        Err(_) => "Invalid Date".to_string(),
    }
}

/// `header`, a blank line, then the blocks separated by newlines.
pub fn join_blocks(header: &str, blocks: &[String]) -> String {
    format!("{}\n\n{}", header, blocks.join("\n"))
}
