const MAX_VISIBLE_LENGTH: usize = 300;

/// Prepares upstream bodies and error details for logging.
pub fn sanitize_for_log(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let redacted = redact_secrets(trimmed);
    if redacted.chars().count() > MAX_VISIBLE_LENGTH {
        let visible: String = redacted.chars().take(MAX_VISIBLE_LENGTH).collect();
        format!("{}... ({} chars total)", visible, redacted.chars().count())
    } else {
        redacted
    }
}

/// Masks credential values following well-known markers.
pub fn redact_secrets(text: &str) -> String {
    let patterns = [
        ("Bearer ", "Bearer [REDACTED]"),
        ("apikey=", "apikey=[REDACTED]"),
        ("api_key=", "api_key=[REDACTED]"),
        ("\"api_key\":\"", "\"api_key\":\"[REDACTED]"),
        ("secret=", "secret=[REDACTED]"),
        ("X-OCR-SECRET: ", "X-OCR-SECRET: [REDACTED]"),
        ("token=", "token=[REDACTED]"),
    ];

    let mut result = text.to_string();
    for (pattern, replacement) in patterns {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(pattern) {
            let idx = search_from + found;
            let value_start = idx + pattern.len();
            let end = result[value_start..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'' || c == ',')
                .map(|i| value_start + i)
                .unwrap_or(result.len());
            result = format!("{}{}{}", &result[..idx], replacement, &result[end..]);
            search_from = idx + replacement.len();
        }
    }

    result
}
