// src/utils/parse.rs

//! Decoding helpers for values embedded in feed markup.

/// Decode a post permalink into its channel handle and message id.
///
/// The channel and id are the second-to-last and last path segments of the
/// link (`https://t.me/<channel>/<id>`).
///
/// # Examples
/// ```
/// use tgfeed::utils::parse::decode_post_link;
///
/// assert_eq!(
///     decode_post_link("https://t.me/durov/123"),
///     Some(("durov".to_string(), 123))
/// );
/// ```
pub fn decode_post_link(link: &str) -> Option<(String, i64)> {
    let parsed = url::Url::parse(link).ok()?;
    let segments: Vec<&str> = parsed.path_segments()?.collect();
    if segments.len() < 2 {
        return None;
    }
    let id = segments[segments.len() - 1].parse::<i64>().ok()?;
    let channel = segments[segments.len() - 2];
    if channel.is_empty() {
        return None;
    }
    Some((channel.to_string(), id))
}

/// Expand a human-readable shorthand count into an integer.
///
/// # Examples
/// ```
/// use tgfeed::utils::parse::expand_shorthand;
///
/// assert_eq!(expand_shorthand("1.2K"), Some(1200));
/// assert_eq!(expand_shorthand("3M"), Some(3_000_000));
/// assert_eq!(expand_shorthand("842"), Some(842));
/// ```
pub fn expand_shorthand(text: &str) -> Option<u64> {
    let text = text.trim().to_lowercase();
    if let Some(stripped) = text.strip_suffix('k') {
        let value: f64 = stripped.parse().ok()?;
        Some((value * 1_000.0) as u64)
    } else if let Some(stripped) = text.strip_suffix('m') {
        let value: f64 = stripped.parse().ok()?;
        Some((value * 1_000_000.0) as u64)
    } else {
        text.parse().ok()
    }
}

/// Convert a `MM:SS` or `H:MM:SS` duration label into seconds.
pub fn duration_to_seconds(duration: &str) -> Option<u64> {
    let mut unit = 1u64;
    let mut seconds = 0u64;
    for part in duration.split(':').rev() {
        let value: u64 = part.trim().parse().ok()?;
        seconds += value * unit;
        unit *= 60;
    }
    Some(seconds)
}

/// Extract `#tag` tokens from message text.
///
/// Order of first occurrence is kept; repeated tags are dropped.
pub fn parse_hashtags(text: &str) -> Vec<String> {
    let Ok(pattern) = regex::Regex::new(r"#(\w+)") else {
        return Vec::new();
    };

    let mut tags = Vec::new();
    for capture in pattern.captures_iter(text) {
        if let Some(tag) = capture.get(1) {
            let tag = tag.as_str().to_string();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_post_link() {
        assert_eq!(
            decode_post_link("https://t.me/somechannel/456"),
            Some(("somechannel".to_string(), 456))
        );
        assert_eq!(
            decode_post_link("https://t.me/s/somechannel/456"),
            Some(("somechannel".to_string(), 456))
        );
        assert_eq!(decode_post_link("https://t.me/"), None);
        assert_eq!(decode_post_link("not a url"), None);
        assert_eq!(decode_post_link("https://t.me/channel/abc"), None);
    }

    #[test]
    fn test_expand_shorthand() {
        assert_eq!(expand_shorthand("1.2K"), Some(1200));
        assert_eq!(expand_shorthand("3M"), Some(3_000_000));
        assert_eq!(expand_shorthand("842"), Some(842));
        assert_eq!(expand_shorthand("14.7k"), Some(14700));
        assert_eq!(expand_shorthand(""), None);
        assert_eq!(expand_shorthand("abc"), None);
    }

    #[test]
    fn test_duration_to_seconds() {
        assert_eq!(duration_to_seconds("1:05"), Some(65));
        assert_eq!(duration_to_seconds("1:02:03"), Some(3723));
        assert_eq!(duration_to_seconds("42"), Some(42));
        assert_eq!(duration_to_seconds("x:10"), None);
    }

    #[test]
    fn test_parse_hashtags_order_and_dedup() {
        assert_eq!(
            parse_hashtags("intro #news then #breaking and #news again"),
            vec!["news".to_string(), "breaking".to_string()]
        );
        assert!(parse_hashtags("no tags here").is_empty());
    }

    #[test]
    fn test_parse_hashtags_idempotent() {
        let text = "#a #b #a";
        let first = parse_hashtags(text);
        let second = parse_hashtags(&format!("#{} #{} ", first[0], first[1]));
        assert_eq!(first, second);
    }
}
