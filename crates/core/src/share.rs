//! Share-link encoding
//!
//! A schedule is shared by packing the whole entry list into a URL
//! parameter: JSON, then URL-safe base64 without padding.
//!
//! Link format: `<base_url>/builder?s=<token>`

use base64::alphabet;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use tracing::{instrument, warn};

use crate::error::{Error, Result};
use crate::models::ClassEntry;

/// Query parameter carrying the token
pub const SHARE_PARAM: &str = "s";

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// URL-safe alphabet, padding optional
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Standard alphabet, accepted for tokens made by older `btoa` links
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Encode an entry list into a URL-safe token
pub fn encode(entries: &[ClassEntry]) -> Result<String> {
    let json = serde_json::to_vec(entries)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a token back into an entry list
pub fn decode(token: &str) -> Result<Vec<ClassEntry>> {
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::Decode("Empty share token".into()));
    }

    let bytes = URL_SAFE_LENIENT
        .decode(token)
        .or_else(|_| STANDARD_LENIENT.decode(token))
        .map_err(|e| Error::Decode(format!("Invalid share token: {}", e)))?;

    let entries: Vec<ClassEntry> = serde_json::from_slice(&bytes)
        .map_err(|e| Error::Decode(format!("Invalid shared schedule: {}", e)))?;

    if entries.iter().any(|e| e.name.trim().is_empty() || e.days.is_empty()) {
        return Err(Error::Decode("Shared schedule has incomplete entries".into()));
    }

    Ok(entries)
}

/// Decode a token, treating any failure as "nothing shared"
pub fn decode_or_empty(token: &str) -> Vec<ClassEntry> {
    decode(token).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring unreadable share token");
        Vec::new()
    })
}

/// Builds and reads share links for one site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    base_url: String,
}

impl ShareLink {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full link for an entry list
    #[instrument(skip(self, entries), fields(count = entries.len()))]
    pub fn url_for(&self, entries: &[ClassEntry]) -> Result<String> {
        Ok(format!(
            "{}/builder?{}={}",
            self.base_url,
            SHARE_PARAM,
            encode(entries)?
        ))
    }

    /// Pull the token out of a full link, or accept a bare token
    pub fn extract_token(input: &str) -> Option<String> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let Some((_, query)) = input.split_once('?') else {
            return (!input.contains('/') || !input.contains(':')).then(|| unescape(input));
        };

        let query = query.split('#').next().unwrap_or_default();
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == SHARE_PARAM)
            .map(|(_, value)| unescape(value))
            .filter(|token| !token.is_empty())
    }

    /// Entries carried by a link; empty when absent or unreadable
    pub fn entries_from(input: &str) -> Vec<ClassEntry> {
        match Self::extract_token(input) {
            Some(token) => decode_or_empty(&token),
            None => Vec::new(),
        }
    }
}

/// Undo the escaping browsers apply to standard-alphabet tokens
fn unescape(value: &str) -> String {
    value
        .replace("%2B", "+")
        .replace("%2b", "+")
        .replace("%2F", "/")
        .replace("%2f", "/")
        .replace("%3D", "=")
        .replace("%3d", "=")
        .replace(' ', "+")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassColor, ClockTime, Day, EntryFields};
    use base64::engine::general_purpose::STANDARD;

    fn sample() -> Vec<ClassEntry> {
        vec![
            ClassEntry::new(EntryFields {
                name: "Français & Ünïcode, \"quoted\" ?s=1".to_string(),
                instructor: Some("Mme. Dupré".to_string()),
                location: Some("Bldg 7 / Rm #12".to_string()),
                days: [Day::Mon, Day::Thu].into_iter().collect(),
                start_time: ClockTime::parse("08:05").unwrap(),
                end_time: ClockTime::parse("09:50").unwrap(),
                color: ClassColor::Cyan,
            }),
            ClassEntry::new(EntryFields {
                name: "数学".to_string(),
                instructor: None,
                location: None,
                days: [Day::Sun].into_iter().collect(),
                start_time: ClockTime::parse("00:00").unwrap(),
                end_time: ClockTime::parse("23:59").unwrap(),
                color: ClassColor::Orange,
            }),
        ]
    }

    #[test]
    fn test_roundtrip() {
        let entries = sample();
        let token = encode(&entries).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(decode(&token).unwrap(), entries);
    }

    #[test]
    fn test_roundtrip_empty_list() {
        let token = encode(&[]).unwrap();
        assert!(decode(&token).unwrap().is_empty());
    }

    #[test]
    fn test_decodes_standard_alphabet() {
        let entries = sample();
        let token = STANDARD.encode(serde_json::to_vec(&entries).unwrap());
        assert_eq!(decode(&token).unwrap(), entries);
    }

    /// Token produced by `btoa(JSON.stringify(classes))` in older links,
    /// with colors stored as HSL strings
    const BTOA_TOKEN: &str = "W3sibmFtZSI6IkJpbyBMYWI/IiwiaW5zdHJ1Y3RvciI6IkRyLiBMZWUiLCJsb2NhdGlvbiI6IlJtIDIiLCJkYXlzIjpbIk1vbiIsIldlZCJdLCJzdGFydFRpbWUiOiIwOTowMCIsImVuZFRpbWUiOiIxMDozMCIsImNvbG9yIjoiMjIwIDkwJSA1NiUiLCJpZCI6IjliMmY0YzFlLTdhMzUtNGQ4ZS1iMGM2LTJmODFkNWU5YTRiNyJ9LHsibmFtZSI6IkFydD4+IiwiZGF5cyI6WyJGcmkiXSwic3RhcnRUaW1lIjoiMTM6MDAiLCJlbmRUaW1lIjoiMTQ6MDAiLCJjb2xvciI6IjM1MCA4MCUgNTUlIiwiaWQiOiIwZDZhOGYzYi0xYzI3LTRlNTktOWE4NC02YjNlN2YyYzVkMTAifV0=";

    #[test]
    fn test_decodes_btoa_link() {
        let entries = decode(BTOA_TOKEN).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Bio Lab?");
        assert_eq!(entries[0].instructor.as_deref(), Some("Dr. Lee"));
        assert_eq!(entries[0].color, ClassColor::Blue);
        assert_eq!(entries[0].duration_minutes(), 90);
        assert_eq!(entries[1].name, "Art>>");
        assert_eq!(entries[1].color, ClassColor::Rose);
        assert!(entries[1].location.is_none());

        let link = format!("https://classgrid.app/builder?s={}", BTOA_TOKEN);
        assert_eq!(ShareLink::entries_from(&link), entries);
        let escaped = BTOA_TOKEN.replace('+', "%2B").replace('/', "%2F").replace('=', "%3D");
        let link = format!("https://classgrid.app/builder?s={}", escaped);
        assert_eq!(ShareLink::entries_from(&link), entries);
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(decode("").is_err());
        assert!(decode("!!!not base64!!!").is_err());
        let not_json = URL_SAFE_NO_PAD.encode(b"hello");
        assert!(matches!(decode(&not_json), Err(Error::Decode(_))));
        let no_days = URL_SAFE_NO_PAD.encode(
            br#"[{"id":"550e8400-e29b-41d4-a716-446655440000","name":"X","days":[],"startTime":"09:00","endTime":"10:00"}]"#,
        );
        assert!(decode(&no_days).is_err());
        assert!(decode_or_empty("garbage").is_empty());
    }

    #[test]
    fn test_link_roundtrip() {
        let link = ShareLink::new("https://classgrid.app/");
        let entries = sample();
        let url = link.url_for(&entries).unwrap();
        assert!(url.starts_with("https://classgrid.app/builder?s="));
        assert_eq!(ShareLink::entries_from(&url), entries);
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(
            ShareLink::extract_token("https://x.test/builder?theme=dark&s=abc_-#top"),
            Some("abc_-".to_string())
        );
        assert_eq!(ShareLink::extract_token("abc123"), Some("abc123".to_string()));
        assert_eq!(
            ShareLink::extract_token("https://x.test/builder?s=a%2Bb%3D"),
            Some("a+b=".to_string())
        );
        assert_eq!(ShareLink::extract_token("https://x.test/builder?t=1"), None);
        assert_eq!(ShareLink::extract_token("https://x.test/builder"), None);
        assert_eq!(ShareLink::extract_token("   "), None);
    }
}
