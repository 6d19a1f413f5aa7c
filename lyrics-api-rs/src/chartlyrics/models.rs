use serde::{Deserialize, Serialize};

/// ChartLyrics ids arrive as numbers or strings depending on the gateway
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "GetLyricsResult", default)]
    pub results: Vec<SearchCandidate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchCandidate {
    #[serde(rename = "LyricId", default, deserialize_with = "deserialize_id")]
    pub lyric_id: Option<String>,
    #[serde(rename = "LyricChecksum", default)]
    pub checksum: Option<String>,
    #[serde(rename = "Artist", default)]
    pub artist: Option<String>,
    #[serde(rename = "Song", default)]
    pub song: Option<String>,
}

impl SearchCandidate {
    /// ChartLyrics pads result lists with id `0` entries
    pub fn usable_id(&self) -> Option<&str> {
        self.lyric_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty() && *id != "0")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LyricResponse {
    #[serde(rename = "Lyric", default)]
    pub lyric: Option<String>,
    #[serde(rename = "LyricSong", default)]
    pub song: Option<String>,
    #[serde(rename = "LyricArtist", default)]
    pub artist: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids() {
        let json = r#"{"GetLyricsResult": [
            {"LyricId": 0, "Artist": "", "Song": ""},
            {"LyricId": "1234", "Artist": "Adele", "Song": "Hello"},
            {"LyricId": 98, "Artist": "Adele", "Song": "Hello (Live)"}
        ]}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 3);
        assert_eq!(response.results[0].usable_id(), None);
        assert_eq!(response.results[1].usable_id(), Some("1234"));
        assert_eq!(response.results[2].usable_id(), Some("98"));
    }

    #[test]
    fn test_null_id() {
        let json = r#"{"GetLyricsResult": [{"LyricId": null}]}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results[0].usable_id(), None);
    }
}
