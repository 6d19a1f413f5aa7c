use serde::{Deserialize, Serialize};

/// One timed line from Textyl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextylLine {
    /// Cue point in seconds from track start
    pub seconds: f64,
    #[serde(default)]
    pub lyrics: String,
}

impl TextylLine {
    /// `[mm:ss.xx]` tag for this cue point
    pub fn lrc_tag(&self) -> String {
        let centis = (self.seconds.max(0.0) * 100.0).round() as u64;
        format!(
            "[{:02}:{:02}.{:02}]",
            centis / 6000,
            (centis / 100) % 60,
            centis % 100
        )
    }
}

/// Synthesize LRC text, one tagged line per entry.
pub fn lines_to_lrc(lines: &[TextylLine]) -> String {
    lines
        .iter()
        .map(|line| format!("{}{}", line.lrc_tag(), line.lyrics.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}
