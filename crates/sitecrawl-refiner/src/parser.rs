//! Parse LLM output into a keyword set

use crate::error::RefineError;
use crate::types::KeywordSet;
use serde_json::Value;
use tracing::{debug, warn};

/// Parse the LLM response to a keyword prompt
///
/// Accepted shapes, tried in order:
/// - a JSON object with `keywords` / `patterns` / `categories` arrays
/// - a JSON array of strings (all treated as keywords)
/// - either of the above inside a Markdown code fence or surrounded by prose
/// - plain text: one keyword per line or comma-separated, bullets stripped
pub fn parse_keyword_response(response: &str) -> Result<KeywordSet, RefineError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(RefineError::EmptyResponse);
    }

    let candidate = extract_json(trimmed);
    match serde_json::from_str::<Value>(candidate) {
        Ok(json) => from_json(&json),
        Err(e) => {
            debug!("Keyword response is not JSON ({}), falling back to text", e);
            let keywords = split_text(trimmed);
            if keywords.is_empty() {
                return Err(RefineError::InvalidFormat(
                    "no keywords found in response".to_string(),
                ));
            }
            warn!("Parsed {} keywords from unstructured response", keywords.len());
            Ok(KeywordSet {
                keywords,
                ..KeywordSet::default()
            })
        }
    }
}

/// Narrow a response down to its JSON payload
fn extract_json(response: &str) -> &str {
    // Code fence: skip the opening line (```json or ```) and the closing one
    if let Some(rest) = response.strip_prefix("```") {
        let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or("");
        let body = body.trim_end();
        return body.strip_suffix("```").unwrap_or(body).trim();
    }

    // Prose around a JSON value: take the outermost brackets
    for (open, close) in [('{', '}'), ('[', ']')] {
        if let (Some(start), Some(end)) = (response.find(open), response.rfind(close)) {
            if start < end {
                return &response[start..=end];
            }
        }
    }

    response
}

fn from_json(json: &Value) -> Result<KeywordSet, RefineError> {
    let set = match json {
        Value::Object(obj) => KeywordSet {
            keywords: strings(obj.get("keywords")),
            patterns: strings(obj.get("patterns")),
            categories: strings(obj.get("categories")),
        },
        Value::Array(_) => KeywordSet {
            keywords: strings(Some(json)),
            ..KeywordSet::default()
        },
        _ => {
            return Err(RefineError::InvalidFormat(
                "expected a JSON object or array".to_string(),
            ))
        }
    };

    if set.is_empty() {
        return Err(RefineError::InvalidFormat(
            "response contains no keywords or patterns".to_string(),
        ));
    }
    Ok(set)
}

/// String items of a JSON array; other items are skipped
fn strings(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn split_text(text: &str) -> Vec<String> {
    text.lines()
        .flat_map(|line| line.split(','))
        .map(|item| {
            item.trim()
                .trim_start_matches(|c: char| "•-*#0123456789.) ".contains(c))
                .trim_matches(|c: char| c == '"' || c == '\'' || c == '`')
                .trim()
        })
        .filter(|item| !item.is_empty() && item.len() <= 64 && !item.ends_with(':'))
        .map(str::to_string)
        .collect()
}
