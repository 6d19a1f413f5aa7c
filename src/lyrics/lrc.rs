//! LRC format parser
//!
//! Parses synchronized lyrics in LRC format:
//! ```text
//! [ti:Hello]
//! [ar:Adele]
//! [offset:+250]
//! [00:18.00]Hello, it's me
//! [01:02.50][02:10.40]Hello from the other side
//! ```
//!
//! A line may carry several timestamp tags; it expands to one entry per tag,
//! all sharing the text after the last tag.

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

static TIMESTAMP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d{2}):(\d{2})\.(\d{2,3})\]").unwrap());

static METADATA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[((?i)ti|ar|al|au|offset|length|by):(.*)\]$").unwrap());

static LEADING_TIMESTAMPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\s*\[\d{2}:\d{2}\.\d{2,3}\])+").unwrap());

/// A single line of lyrics with its cue point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LrcLine {
    pub timestamp: Duration,
    pub text: String,
}

impl LrcLine {
    pub fn new(timestamp: Duration, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            text: text.into(),
        }
    }

    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp.as_millis() as u64
    }
}

/// Parsed LRC document, immutable once built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLrc {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub author: Option<String>,
    /// Signed milliseconds subtracted from playback positions before lookup
    pub offset_ms: Option<i64>,
    /// Sorted ascending by timestamp; ties keep input order
    pub lines: Vec<LrcLine>,
}

impl ParsedLrc {
    /// Parse LRC text. Malformed lines are skipped, never fatal.
    pub fn parse(content: &str) -> Self {
        let mut parsed = ParsedLrc::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(caps) = METADATA.captures(line) {
                parsed.apply_metadata(&caps[1], caps[2].trim());
                continue;
            }

            let tags: Vec<_> = TIMESTAMP.captures_iter(line).collect();
            let Some(last) = tags.last() else {
                continue;
            };
            let text_start = last.get(0).map_or(line.len(), |m| m.end());
            let text = line[text_start..].trim();

            for caps in &tags {
                if let Some(timestamp) = parse_timestamp(&caps[1], &caps[2], &caps[3]) {
                    parsed.lines.push(LrcLine::new(timestamp, text));
                }
            }
        }

        parsed.lines.sort_by_key(|l| l.timestamp);
        parsed
    }

    fn apply_metadata(&mut self, key: &str, value: &str) {
        let non_empty = || Some(value.to_string()).filter(|v| !v.is_empty());
        match key.to_ascii_lowercase().as_str() {
            "ti" => self.title = non_empty(),
            "ar" => self.artist = non_empty(),
            "al" => self.album = non_empty(),
            "au" | "by" => self.author = non_empty(),
            "offset" => match value.parse::<i64>() {
                Ok(ms) => self.offset_ms = Some(ms),
                Err(_) => tracing::debug!("Skipping malformed offset tag: {:?}", value),
            },
            _ => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Last line whose cue is at or before `position` (after offset adjustment)
    pub fn line_at_time(&self, position: Duration) -> Option<&LrcLine> {
        self.line_index_at_time(position).map(|idx| &self.lines[idx])
    }

    pub fn line_index_at_time(&self, position: Duration) -> Option<usize> {
        self.line_index_at_ms(position.as_millis() as i64)
    }

    /// Same lookup for a signed position, as reported by media sessions
    pub fn line_at_ms(&self, position_ms: i64) -> Option<&LrcLine> {
        self.line_index_at_ms(position_ms).map(|idx| &self.lines[idx])
    }

    pub fn line_index_at_ms(&self, position_ms: i64) -> Option<usize> {
        let adjusted = position_ms.saturating_sub(self.offset_ms.unwrap_or(0));
        if adjusted < 0 {
            return None;
        }
        let adjusted = Duration::from_millis(adjusted as u64);

        // lines are sorted, so everything before the partition point is <= adjusted
        let after = self.lines.partition_point(|l| l.timestamp <= adjusted);
        after.checked_sub(1)
    }

    /// Lyric text without timing, one line per entry in cue order
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_timestamp(minutes: &str, seconds: &str, fraction: &str) -> Option<Duration> {
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    // "34" is centiseconds, "340" milliseconds
    let millis: u64 = format!("{:0<3}", fraction).parse().ok()?;
    Some(Duration::from_millis(minutes * 60_000 + seconds * 1000 + millis))
}

/// True iff at least one `[mm:ss.xx]` or `[mm:ss.xxx]` tag is present.
pub fn is_valid_lrc(content: &str) -> bool {
    TIMESTAMP.is_match(content)
}

/// Drop leading timestamp tags and header tags, leaving the lyric text.
pub fn strip_timestamps(content: &str) -> String {
    content
        .lines()
        .filter(|line| !METADATA.is_match(line.trim()))
        .map(|line| LEADING_TIMESTAMPS.replace(line, "").trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
