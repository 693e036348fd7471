//! Locating JSON inside free-form model output.
//!
//! Models asked for JSON still tend to wrap it in markdown fences or lead with
//! a sentence of prose. Extraction tries a fenced block first, then the first
//! balanced object or array, whichever opens earlier.

use fablecast_error::{GenerationError, GenerationErrorKind, GenerationResult};
use serde::de::DeserializeOwned;

/// Extract the JSON portion of a completion.
///
/// # Errors
///
/// Returns [`GenerationErrorKind::NoJson`] when neither a fenced block nor a
/// balanced object or array is present.
///
/// # Examples
///
/// ```
/// use fablecast_content::extract_json;
///
/// let response = "Here you go!\n```json\n{\"title\": \"Dragon courage\"}\n```";
/// assert_eq!(extract_json(response).unwrap(), "{\"title\": \"Dragon courage\"}");
///
/// let prose = "Sure. {\"slides\": [\"a\", \"b\"]} Hope that helps!";
/// assert_eq!(extract_json(prose).unwrap(), "{\"slides\": [\"a\", \"b\"]}");
/// ```
pub fn extract_json(response: &str) -> GenerationResult<String> {
    if let Some(json) = extract_from_code_block(response) {
        return Ok(json);
    }

    let array_first = match (response.find('['), response.find('{')) {
        (Some(bracket), Some(brace)) => bracket < brace,
        (Some(_), None) => true,
        _ => false,
    };

    let found = if array_first {
        extract_balanced(response, '[', ']').or_else(|| extract_balanced(response, '{', '}'))
    } else {
        extract_balanced(response, '{', '}').or_else(|| extract_balanced(response, '[', ']'))
    };

    found.ok_or_else(|| {
        tracing::debug!(response_length = response.len(), "No JSON found in completion");
        GenerationError::new(GenerationErrorKind::NoJson(preview(response)))
    })
}

/// Extract and deserialize the JSON portion of a completion.
///
/// # Errors
///
/// Returns [`GenerationErrorKind::NoJson`] if no JSON is present, or
/// [`GenerationErrorKind::Parse`] if it does not match `T`.
pub fn parse_json<T: DeserializeOwned>(response: &str) -> GenerationResult<T> {
    let json = extract_json(response)?;
    serde_json::from_str(&json)
        .map_err(|e| GenerationError::new(GenerationErrorKind::Parse(e.to_string())))
}

fn preview(response: &str) -> String {
    response.chars().take(80).collect()
}

/// Content of the first markdown fence, with or without a language tag.
fn extract_from_code_block(response: &str) -> Option<String> {
    let start = response.find("```")?;
    let after_fence = start + 3;
    // Skip the language tag, if any, up to the end of the fence line.
    let content_start = response[after_fence..]
        .find('\n')
        .map(|n| after_fence + n + 1)
        .unwrap_or(after_fence);

    let content = match response[content_start..].find("```") {
        Some(end) => &response[content_start..content_start + end],
        // Unclosed fence, likely a truncated response
        None => &response[content_start..],
    };

    let content = content.trim();
    if content.starts_with('{') || content.starts_with('[') {
        Some(content.to_string())
    } else {
        None
    }
}

/// First `open` .. matching `close` span, ignoring delimiters inside strings.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
