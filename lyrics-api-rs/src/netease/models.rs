use serde::{Deserialize, Serialize};

/// Custom deserializer to convert number to string
fn deserialize_number_to_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct NumberToStringVisitor;

    impl<'de> Visitor<'de> for NumberToStringVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(NumberToStringVisitor)
}

/// Envelope of `/api/search/song`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub result: Option<SearchResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub songs: Vec<Song>,
    #[serde(rename = "songCount", default)]
    pub song_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    #[serde(deserialize_with = "deserialize_number_to_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "ar")]
    pub artists: Vec<Artist>,
    #[serde(default, alias = "al")]
    pub album: Option<Album>,
}

impl Song {
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub name: String,
}

/// Body of `/api/song/lyric`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LyricResult {
    #[serde(default)]
    pub code: i32,
    pub lrc: Option<Lrc>,
    pub tlyric: Option<Lrc>,
    pub romalrc: Option<Lrc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lrc {
    #[serde(default)]
    pub lyric: String,
}
