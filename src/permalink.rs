use std::borrow::Cow;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const BLOG_SEGMENT: &str = "blog";

// `\d` is unicode-aware in `regex`; filenames only count ASCII digits.
static DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})-").unwrap());

// lexical only: `2025-13-99-` is stripped like a real date
pub(crate) fn strip_date_prefix(file_slug: &str) -> Cow<'_, str> {
    DATE_PREFIX.replace(file_slug, "")
}

pub(crate) fn derive_permalink(file_slug: &str) -> String {
    format!("/{}/{}/", BLOG_SEGMENT, strip_date_prefix(file_slug))
}

pub(crate) fn file_date(file_slug: &str) -> Option<NaiveDate> {
    let caps = DATE_PREFIX.captures(file_slug)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
