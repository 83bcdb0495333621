use log::debug;

use regex::Regex;

use serenity::client::Context;
use serenity::model::guild::Member;
use serenity::model::id::{GuildId, UserId};
use serenity::model::user::User;

use std::sync::LazyLock;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("url regex"));

// flag pairs, or an emoji base (presentation form or VS-16 text form) with
// optional skin-tone modifier and any number of ZWJ-joined continuations
static UNICODE_EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:\p{Regional_Indicator}{2}|(?:\p{Emoji_Presentation}|\p{Emoji}\u{FE0F})(?:\p{Emoji_Modifier}|\u{FE0F})?(?:\u{200D}\p{Emoji}(?:\p{Emoji_Modifier}|\u{FE0F})?)*)$",
    )
    .expect("emoji regex")
});

static CUSTOM_EMOJI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<a?:\w{2,32}:\d{17,20}>$").expect("custom emoji regex"));

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?[0-9a-fA-F]{6}$").expect("hex color regex"));

static SNOWFLAKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{17,20}$").expect("snowflake regex"));

static USER_MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@!?(\d{17,20})>$").expect("mention regex"));

/// true for http/https URLs
pub fn is_url(input: &str) -> bool {
    URL_RE.is_match(input)
}

/// true for a single unicode emoji or a Discord custom emoji like `<:name:id>`
pub fn is_emoji(input: &str) -> bool {
    UNICODE_EMOJI_RE.is_match(input) || CUSTOM_EMOJI_RE.is_match(input)
}

/// true for six hex digits with an optional leading `#`
pub fn is_hex_color(input: &str) -> bool {
    HEX_COLOR_RE.is_match(input)
}

/// parses `#RRGGBB` or `RRGGBB` into its numeric value
pub fn parse_hex_color(input: &str) -> Option<u32> {
    if !is_hex_color(input) {
        return None;
    }
    u32::from_str_radix(input.trim_start_matches('#'), 16).ok()
}

/// true when the input parses as a JSON document
pub fn is_json(input: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(input).is_ok()
}

/// true for a bare Discord snowflake ID
pub fn is_snowflake(input: &str) -> bool {
    SNOWFLAKE_RE.is_match(input)
}

/// pulls a user ID out of a `<@id>` / `<@!id>` mention or a bare snowflake
pub fn extract_user_id(input: &str) -> Option<UserId> {
    let digits = match USER_MENTION_RE.captures(input) {
        Some(captures) => captures.get(1)?.as_str(),
        None if is_snowflake(input) => input,
        None => return None,
    };
    digits.parse::<u64>().ok().map(UserId::new)
}

/// HEAD-probes `url` and reports whether it is a reachable image
///
/// any transport failure counts as unreachable
pub async fn is_image_url(client: &reqwest::Client, url: &str) -> bool {
    if !is_url(url) {
        return false;
    }
    match client.head(url).send().await {
        Ok(response) => {
            response.status().is_success()
                && response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .map(|value| value.starts_with("image/"))
                    .unwrap_or(false)
        }
        Err(e) => {
            debug!("HEAD request for '{url}' failed: {e}");
            false
        }
    }
}

/// resolves a user from a mention or ID, cache first then the API
pub async fn resolve_user(ctx: &Context, query: &str) -> Option<User> {
    let user_id = extract_user_id(query.trim())?;
    let cached = ctx.cache.user(user_id).map(|user| user.clone());
    match cached {
        Some(user) => Some(user),
        None => ctx.http.get_user(user_id).await.ok(),
    }
}

/// resolves a guild member from a mention, an ID or a name
///
/// tries mention/ID lookup, then a cached username/nickname match, then the
/// guild member search endpoint; every failed step falls through
pub async fn resolve_member(ctx: &Context, guild_id: GuildId, query: &str) -> Option<Member> {
    let query = query.trim();

    if let Some(user_id) = extract_user_id(query) {
        return guild_id.member(ctx, user_id).await.ok();
    }

    let needle = query.to_lowercase();
    let cached = ctx.cache.guild(guild_id).and_then(|guild| {
        guild
            .members
            .values()
            .find(|member| {
                member.user.name.to_lowercase() == needle
                    || member
                        .nick
                        .as_deref()
                        .is_some_and(|nick| nick.to_lowercase() == needle)
                    || member
                        .user
                        .global_name
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase() == needle)
            })
            .cloned()
    });
    if cached.is_some() {
        return cached;
    }

    match guild_id.search_members(&ctx.http, query, Some(1)).await {
        Ok(mut members) => {
            if members.is_empty() {
                None
            } else {
                Some(members.remove(0))
            }
        }
        Err(e) => {
            debug!("member search for '{query}' failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_accepts_http_and_https() {
        assert!(is_url("https://example.com"));
        assert!(is_url("http://example.com/path?query=1"));
    }

    #[test]
    fn url_rejects_other_schemes_and_garbage() {
        assert!(!is_url("ftp://example.com"));
        assert!(!is_url("example.com"));
        assert!(!is_url("https:// example.com"));
    }

    #[test]
    fn emoji_accepts_unicode_and_custom() {
        assert!(is_emoji("😀"));
        assert!(is_emoji("❤\u{FE0F}"));
        assert!(is_emoji("<:brindle:123456789012345678>"));
        assert!(is_emoji("<a:wave:123456789012345678>"));
    }

    #[test]
    fn emoji_accepts_modified_and_joined_sequences() {
        assert!(is_emoji("👍🏽"));
        assert!(is_emoji("🇩🇪"));
        assert!(is_emoji("❤\u{FE0F}\u{200D}🔥"));
        assert!(is_emoji("👨\u{200D}👩\u{200D}👧"));
    }

    #[test]
    fn emoji_rejects_plain_text() {
        assert!(!is_emoji("1"));
        assert!(!is_emoji("hello"));
        assert!(!is_emoji("<:x:123>"));
    }

    #[test]
    fn hex_color_accepts_with_and_without_hash() {
        assert!(is_hex_color("#FF5733"));
        assert!(is_hex_color("ff5733"));
    }

    #[test]
    fn hex_color_rejects_wrong_lengths() {
        assert!(!is_hex_color("#FFF"));
        assert!(!is_hex_color("#FF57333"));
        assert!(!is_hex_color("#GG5733"));
    }

    #[test]
    fn parse_hex_color_values() {
        assert_eq!(parse_hex_color("#FF5733"), Some(0xFF5733));
        assert_eq!(parse_hex_color("000000"), Some(0));
        assert_eq!(parse_hex_color("not a color"), None);
    }

    #[test]
    fn json_check() {
        assert!(is_json(r#"{"a": [1, 2, 3]}"#));
        assert!(is_json("42"));
        assert!(!is_json("{a: 1}"));
    }

    #[test]
    fn snowflake_check() {
        assert!(is_snowflake("123456789012345678"));
        assert!(!is_snowflake("12345"));
        assert!(!is_snowflake("12345678901234567a"));
    }

    #[test]
    fn extract_user_id_from_mentions() {
        let expected = Some(UserId::new(123456789012345678));
        assert_eq!(extract_user_id("<@123456789012345678>"), expected);
        assert_eq!(extract_user_id("<@!123456789012345678>"), expected);
        assert_eq!(extract_user_id("123456789012345678"), expected);
    }

    #[tokio::test]
    async fn image_probe_rejects_non_url() {
        let client = reqwest::Client::new();
        assert!(!is_image_url(&client, "not a url").await);
    }

    #[tokio::test]
    async fn image_probe_swallows_transport_errors() {
        // port 9 (discard) is not listening, the HEAD request cannot connect
        let client = reqwest::Client::new();
        assert!(!is_image_url(&client, "http://127.0.0.1:9/avatar.png").await);
    }

    #[test]
    fn extract_user_id_rejects_other_input() {
        assert_eq!(extract_user_id("brindle"), None);
        assert_eq!(extract_user_id("<@123>"), None);
        assert_eq!(extract_user_id("<#123456789012345678>"), None);
    }
}
