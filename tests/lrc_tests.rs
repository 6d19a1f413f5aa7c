use lyrics_station::lyrics::identity::song_id;
use lyrics_station::lyrics::lrc::{ParsedLrc, is_valid_lrc, strip_timestamps};
use lyrics_station::lyrics::normalize::{is_non_latin, normalize};
use std::time::Duration;

const SKYFALL: &str = "[ti:Skyfall]
[ar:Adele]
[al:Skyfall]
[by:lrc-maker]
[length:04:46]

[00:02.10]This is the end
[00:08.47]Hold your breath and count to ten
[00:15.05]Feel the earth move and then
[01:05.00][02:05.00][03:30.00]Let the sky fall
[00:20.9]malformed fraction is skipped
[01:10.500]When it crumbles
";

#[test]
fn test_song_id_is_deterministic() {
    assert_eq!(song_id("Adele", "Hello"), song_id("Adele", "Hello"));
    assert_eq!(song_id("ADELE", "hello"), "adele_hello");
    assert_eq!(song_id("Sia", "Chandelier (Official Video)"), "sia_chandelier_official_video_");
    assert_eq!(song_id("AC/DC", "T.N.T."), "ac_dc_t_n_t_");
}

#[test]
fn test_normalize_is_idempotent() {
    let samples = [
        ("Hello (Official Music Video) [HD]", false),
        ("Rolling in the Deep - Official Lyric Video", false),
        ("Someone Like You | Live at the Royal Albert Hall", false),
        ("Don\u{2019}t  You   Remember", false),
        ("((nested) brackets) title", false),
        ("(Intro)", false),
        ("上を向いて歩こう (SUKIYAKI)", true),
        ("강남스타일 [Gangnam Style]", true),
        ("Tum Hi Ho – तुम ही हो", true),
    ];

    for (text, non_latin) in samples {
        let once = normalize(text, non_latin);
        assert_eq!(normalize(&once, non_latin), once, "not idempotent for {:?}", text);
    }
}

#[test]
fn test_script_classification_drives_normalization() {
    let title = "上を向いて歩こう (SUKIYAKI)";
    let non_latin = is_non_latin(&format!("坂本九{}", title));
    assert!(non_latin);
    assert_eq!(normalize(title, non_latin), title);

    assert!(!is_non_latin("AdeleHello (Live)"));
    assert_eq!(normalize("Hello (Live)", false), "Hello");
}

#[test]
fn test_parsed_lines_are_sorted() {
    let parsed = ParsedLrc::parse(SKYFALL);
    assert!(parsed.lines.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert_eq!(parsed.title.as_deref(), Some("Skyfall"));
    assert_eq!(parsed.author.as_deref(), Some("lrc-maker"));
}

#[test]
fn test_multi_tag_line_expands_once_per_tag() {
    let parsed = ParsedLrc::parse(SKYFALL);
    let chorus: Vec<u64> = parsed
        .lines
        .iter()
        .filter(|l| l.text == "Let the sky fall")
        .map(|l| l.timestamp_ms())
        .collect();
    assert_eq!(chorus, vec![65_000, 125_000, 210_000]);
    assert!(!parsed.lines.iter().any(|l| l.text.contains("malformed")));
    assert_eq!(parsed.len(), 7);
}

#[test]
fn test_is_valid_lrc() {
    assert!(is_valid_lrc(SKYFALL));
    assert!(is_valid_lrc("[01:02.345]three digit fraction"));
    assert!(!is_valid_lrc("[ti:Only metadata]\nplain words"));
    assert!(!is_valid_lrc("[1:02.34]one digit minute"));
}

#[test]
fn test_line_at_time_boundaries() {
    let parsed = ParsedLrc::parse(SKYFALL);

    assert!(parsed.line_at_time(Duration::from_millis(2_099)).is_none());
    assert_eq!(parsed.line_at_time(Duration::from_millis(2_100)).unwrap().text, "This is the end");
    assert_eq!(
        parsed.line_at_time(Duration::from_millis(8_469)).unwrap().text,
        "This is the end"
    );
    assert_eq!(parsed.line_index_at_time(Duration::from_millis(8_470)), Some(1));
    assert_eq!(parsed.line_at_time(Duration::from_secs(600)).unwrap().text, "Let the sky fall");
    assert_eq!(ParsedLrc::parse("").line_index_at_time(Duration::from_secs(1)), None);
}

#[test]
fn test_offset_shifts_lookup() {
    let parsed = ParsedLrc::parse("[offset:500]\n[00:10.00]a\n[00:20.00]b");
    assert_eq!(parsed.offset_ms, Some(500));
    // position 10.4s - 0.5s = 9.9s, before the first cue
    assert!(parsed.line_at_time(Duration::from_millis(10_400)).is_none());
    assert_eq!(parsed.line_at_time(Duration::from_millis(10_500)).unwrap().text, "a");

    let negative = ParsedLrc::parse("[offset:-1000]\n[00:10.00]a");
    assert_eq!(negative.line_at_time(Duration::from_millis(9_000)).unwrap().text, "a");
}

#[test]
fn test_strip_timestamps_inverse() {
    let lrc = "[ar:Adele]\n[00:18.00]Hello, it's me\n[00:21.50][00:40.00]I was wondering";
    assert_eq!(strip_timestamps(lrc), "Hello, it's me\nI was wondering");
}
