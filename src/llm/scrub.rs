use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;
const REDACTED: &str = "[REDACTED]";

/// Key prefixes issued by the providers this tool talks to.
const KEY_PREFIXES: [&str; 5] = ["AIza", "sk-", "gsk_", "ya29.", "eyJ"];

/// Places where a provider echoes a credential back in an error body.
const KEY_MARKERS: [&str; 7] = [
    "Authorization: Bearer ",
    "authorization: bearer ",
    "x-goog-api-key: ",
    "api_key=",
    "key=",
    "\"api_key\":\"",
    "\"access_token\":\"",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    input[from..]
        .char_indices()
        .find(|(_, c)| !is_secret_char(*c))
        .map_or(input.len(), |(i, _)| from + i)
}

fn redact_after(scrubbed: &mut String, marker: &str) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let value_start = start + marker.len();
        let end = token_end(scrubbed, value_start);

        // Bare marker with no value following it.
        if end == value_start {
            search_from = value_start;
            continue;
        }

        scrubbed.replace_range(start..end, REDACTED);
        search_from = start + REDACTED.len();
    }
}

/// Redact credential-shaped tokens from provider error text.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    let suspicious = KEY_PREFIXES
        .iter()
        .chain(KEY_MARKERS.iter())
        .any(|pattern| input.contains(pattern));
    if !suspicious {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in KEY_MARKERS {
        redact_after(&mut scrubbed, marker);
    }
    for prefix in KEY_PREFIXES {
        redact_after(&mut scrubbed, prefix);
    }
    Cow::Owned(scrubbed)
}

/// Scrub secrets and truncate so an error body fits on one line of output.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);
    let scrubbed = scrubbed.trim();

    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed.to_string();
    }

    let end = scrubbed
        .char_indices()
        .nth(MAX_API_ERROR_CHARS)
        .map_or(scrubbed.len(), |(i, _)| i);
    format!("{}...", &scrubbed[..end])
}

/// Build a sanitized provider error from a failed HTTP response.
pub async fn api_error(provider: &str, response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read provider error body>".to_string());
    anyhow::anyhow!("{provider} API error ({status}): {}", sanitize_api_error(&body))
}
