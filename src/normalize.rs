//! Normalization rules applied to every extracted value before it lands in
//! the canonical record.

use html_escape::decode_html_entities;
use scraper::Html;

/// Decodes HTML entities, strips markup and collapses whitespace.
pub fn clean_text(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    let decoded = decode_html_entities(&decode_html_entities(text)).into_owned();
    let plain = if decoded.contains('<') && decoded.contains('>') {
        strip_tags(&decoded)
    } else {
        decoded
    };
    collapse_whitespace(&plain)
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_tags(text: &str) -> String {
    let fragment = Html::parse_fragment(text);
    fragment.root_element().text().collect::<String>()
}

/// Cleans every entry and drops the ones left blank. Order is kept and
/// duplicates are not removed.
pub fn clean_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| clean_text(item.as_ref()))
        .filter(|item| !item.is_empty())
        .collect()
}

/// Joins keywords into schema.org's comma separated form.
pub fn join_keywords<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .flat_map(|item| {
            item.as_ref()
                .split(',')
                .map(clean_text)
                .collect::<Vec<_>>()
        })
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Converts an ISO-8601 duration into the canonical `PT#H#M` form.
///
/// Handles day components (`P1DT2H`), overlong minutes (`PT90M`), decimal
/// seconds (`PT5400.0S`) and ranges (`PT15-20M`, lower bound wins). Zero or
/// unreadable durations become an empty string.
pub fn canonical_duration(duration: &str) -> String {
    match iso_minutes(duration.trim()) {
        Some(minutes) => format_minutes(minutes),
        None => String::new(),
    }
}

fn iso_minutes(duration: &str) -> Option<u64> {
    let upper = duration.to_ascii_uppercase();
    let rest = upper.strip_prefix('P')?;

    let mut total = 0.0_f64;
    let mut in_time = false;
    let mut number = String::new();
    let mut seen_unit = false;

    for c in rest.chars() {
        match c {
            'T' => in_time = true,
            '0'..='9' | '.' | ',' | '-' => number.push(c),
            unit => {
                let value = range_lower_bound(&number)?;
                number.clear();
                seen_unit = true;
                total += match (unit, in_time) {
                    ('W', false) => value * 7.0 * 1440.0,
                    ('D', false) => value * 1440.0,
                    ('H', true) => value * 60.0,
                    ('M', true) => value,
                    ('S', true) => value / 60.0,
                    _ => return None,
                };
            }
        }
    }

    if !number.is_empty() || !seen_unit {
        return None;
    }
    Some(total.round() as u64)
}

fn range_lower_bound(number: &str) -> Option<f64> {
    let lower = number.split('-').next()?.replace(',', ".");
    lower.trim().parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

fn format_minutes(total: u64) -> String {
    let hours = total / 60;
    let minutes = total % 60;
    match (hours, minutes) {
        (0, 0) => String::new(),
        (0, m) => format!("PT{m}M"),
        (h, 0) => format!("PT{h}H"),
        (h, m) => format!("PT{h}H{m}M"),
    }
}

/// Converts a human phrase such as "1 hour 10 mins" into a canonical
/// duration. ISO input is accepted as well.
pub fn duration_from_text(text: &str) -> String {
    let text = text.trim();
    if text.starts_with(['P', 'p']) && !text.contains(' ') {
        return canonical_duration(text);
    }

    let lower = text.to_lowercase();
    let mut chars = lower.chars().peekable();
    let mut total = 0.0_f64;
    let mut found = false;

    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            chars.next();
            continue;
        }

        let mut number = String::new();
        while let Some(&d) = chars.peek() {
            if d.is_ascii_digit() || d == '.' || d == ',' {
                number.push(if d == ',' { '.' } else { d });
                chars.next();
            } else {
                break;
            }
        }
        // "10-15 minutes": keep the lower bound, skip the upper
        while let Some(&d) = chars.peek() {
            if d == '-' || d == '–' || d.is_ascii_digit() {
                chars.next();
            } else {
                break;
            }
        }
        while chars.peek().is_some_and(|d| d.is_whitespace()) {
            chars.next();
        }
        let mut unit = String::new();
        while let Some(&d) = chars.peek() {
            if d.is_alphabetic() {
                unit.push(d);
                chars.next();
            } else {
                break;
            }
        }

        let Ok(value) = number.parse::<f64>() else {
            continue;
        };
        let factor = match unit.chars().next() {
            Some('d') => 1440.0,
            Some('h') => 60.0,
            Some('m') => 1.0,
            Some('s') => 1.0 / 60.0,
            _ => continue,
        };
        total += value * factor;
        found = true;
    }

    if !found {
        return String::new();
    }
    format_minutes(total.round() as u64)
}
