use crate::types::{Dimensions, MetricSample};

/// Parse a metrics endpoint payload into samples.
///
/// Payloads whose first line is not a `#` comment are not exposition text
/// (an HTML error page, a JSON body from the wrong endpoint) and yield nothing.
/// Lines without a value token are skipped.
pub fn parse_exposition(text: &str) -> Vec<MetricSample> {
    let mut lines = text.lines();
    match lines.next() {
        Some(first) if first.starts_with('#') => {}
        _ => return Vec::new(),
    }

    lines.filter_map(parse_line).collect()
}

/// Parse a single exposition line; `None` for comments, blanks and value-less lines.
pub fn parse_line(line: &str) -> Option<MetricSample> {
    if line.starts_with('#') || line.trim().is_empty() {
        return None;
    }

    let mut tokens = line.split_whitespace();
    let series = tokens.next()?;
    let raw_value = tokens.next()?;

    let (key, dimensions) = match series.split_once('{') {
        Some((key, rest)) => (key, parse_dimensions(rest)),
        None => (series, Dimensions::new()),
    };

    Some(MetricSample {
        key: key.to_string(),
        dimensions,
        raw_value: raw_value.to_string(),
    })
}

/// Parse the inside of a `{...}` block. `block` starts right after the `{`.
fn parse_dimensions(block: &str) -> Dimensions {
    let inner = block.split('}').next().unwrap_or_default();

    inner
        .split(',')
        .filter_map(|piece| {
            // Only the text between the first and second `=` is the value.
            let mut parts = piece.split('=');
            Some((parts.next()?, parts.next()?))
        })
        .map(|(k, v)| (k.trim().to_string(), v.trim().trim_matches('"').to_string()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}
