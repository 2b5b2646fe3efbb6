//! Append-only JSON log of successful lookups.

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::model::CurrentWeather;

pub const DEFAULT_HISTORY_FILE: &str = "weather_history.json";

/// One saved lookup. Keys match the on-disk format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// City as typed by the user.
    #[serde(rename = "City")]
    pub city: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub description: String,
    pub humidity: u8,
    pub wind_speed: f64,
}

impl HistoryEntry {
    pub fn from_weather(city: &str, weather: &CurrentWeather) -> Self {
        Self::at(city, weather, Local::now().naive_local())
    }

    pub fn at(city: &str, weather: &CurrentWeather, timestamp: NaiveDateTime) -> Self {
        Self {
            city: city.to_string(),
            timestamp,
            temperature: weather.temperature_c,
            description: weather.description.clone(),
            humidity: weather.humidity_pct,
            wind_speed: weather.wind_speed_mps,
        }
    }
}

fn serialize_timestamp<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&ts.format("%Y-%m-%dT%H:%M:%S%.6f"))
}

/// History file handle. Every operation goes to disk; nothing is cached.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_FILE)
    }
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, oldest first. A missing file is an empty history.
    pub fn load(&self) -> Result<Vec<HistoryEntry>> {
        let Some(contents) = self.read_contents()? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse history file: {}", self.path.display()))
    }

    /// Append one entry and rewrite the file.
    ///
    /// Existing records are kept as raw JSON values, so keys and number
    /// formats this crate does not know about survive the rewrite.
    pub fn append(&self, entry: HistoryEntry) -> Result<()> {
        let mut records = self.load_records()?;
        records.push(serde_json::to_value(entry).context("Failed to serialize history entry")?);
        self.write(&records)?;

        debug!(path = %self.path.display(), total = records.len(), "history entry appended");
        Ok(())
    }

    /// The last `limit` entries, oldest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let mut entries = self.load()?;
        let skip = entries.len().saturating_sub(limit);
        Ok(entries.split_off(skip))
    }

    /// Remove the history file. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove history file: {}", self.path.display())),
        }
    }

    fn read_contents(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(None),
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read history file: {}", self.path.display())),
        }
    }

    /// The file as an untyped array; anything but an array is rejected.
    fn load_records(&self) -> Result<Vec<Value>> {
        let Some(contents) = self.read_contents()? else {
            return Ok(Vec::new());
        };

        let value: Value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse history file: {}", self.path.display()))?;

        match value {
            Value::Array(records) => Ok(records),
            _ => bail!("History file is not a JSON array: {}", self.path.display()),
        }
    }

    fn write(&self, records: &[Value]) -> Result<()> {
        if self.path.is_dir() {
            bail!("History path is a directory: {}", self.path.display());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create history directory: {}", parent.display())
            })?;
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records
            .serialize(&mut ser)
            .context("Failed to serialize history")?;

        fs::write(&self.path, buf)
            .with_context(|| format!("Failed to write history file: {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn weather(temp: f64) -> CurrentWeather {
        CurrentWeather {
            city: "Paris".into(),
            country: Some("FR".into()),
            temperature_c: temp,
            description: "clear sky".into(),
            humidity_pct: 40,
            wind_speed_mps: 2.5,
        }
    }

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_micro_opt(14, 3, 11, 123_456)
            .unwrap()
    }

    #[test]
    fn missing_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        assert!(store.load().unwrap().is_empty());
        assert!(!store.clear().unwrap());
    }

    #[test]
    fn append_writes_expected_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let store = HistoryStore::new(&path);

        store
            .append(HistoryEntry::at("paris", &weather(21.5), fixed_time()))
            .unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let expected = r#"[
    {
        "City": "paris",
        "timestamp": "2026-10-18T14:03:11.123456",
        "temperature": 21.5,
        "description": "clear sky",
        "humidity": 40,
        "wind_speed": 2.5
    }
]"#;
        assert_eq!(raw, expected);
    }

    #[test]
    fn append_preserves_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        store.append(HistoryEntry::from_weather("a", &weather(1.0))).unwrap();
        store.append(HistoryEntry::from_weather("b", &weather(2.0))).unwrap();
        store.append(HistoryEntry::from_weather("c", &weather(3.0))).unwrap();

        let cities: Vec<_> = store.load().unwrap().into_iter().map(|e| e.city).collect();
        assert_eq!(cities, ["a", "b", "c"]);

        let recent: Vec<_> = store.recent(2).unwrap().into_iter().map(|e| e.city).collect();
        assert_eq!(recent, ["b", "c"]);
        assert_eq!(store.recent(10).unwrap().len(), 3);
    }

    #[test]
    fn reads_timestamps_without_fraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(
            &path,
            r#"[{"City": "Rome", "timestamp": "2024-05-01T09:30:00", "temperature": 18,
                "description": "haze", "humidity": 60, "wind_speed": 1.2}]"#,
        )
        .unwrap();

        let entries = HistoryStore::new(&path).load().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].city, "Rome");
        assert_eq!(entries[0].temperature, 18.0);
    }

    #[test]
    fn corrupt_file_is_an_error_and_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{not json").unwrap();
        let store = HistoryStore::new(&path);

        let err = store
            .append(HistoryEntry::from_weather("x", &weather(0.0)))
            .unwrap_err();

        assert!(err.to_string().contains("Failed to parse history file"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[test]
    fn append_keeps_existing_records_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let existing = r#"[
    {
        "City": "Rome",
        "timestamp": "2024-05-01T09:30:00",
        "temperature": 18,
        "description": "haze",
        "humidity": 60,
        "wind_speed": 1,
        "feels_like": 17
    }
]"#;
        fs::write(&path, existing).unwrap();
        let store = HistoryStore::new(&path);

        store
            .append(HistoryEntry::at("paris", &weather(21.5), fixed_time()))
            .unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let kept = existing.strip_suffix("\n]").unwrap();
        assert!(raw.starts_with(&format!("{kept},\n    {{\n        \"City\": \"paris\"")));
        assert!(raw.ends_with("\"wind_speed\": 2.5\n    }\n]"));
    }

    #[test]
    fn append_accepts_records_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, r#"[{"City": "Lima"}]"#).unwrap();
        let store = HistoryStore::new(&path);

        store.append(HistoryEntry::from_weather("x", &weather(0.0))).unwrap();

        let records: Vec<Value> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], serde_json::json!({"City": "Lima"}));
        assert_eq!(records[1]["City"], "x");
    }

    #[test]
    fn append_rejects_non_array_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, r#"{"City": "Lima"}"#).unwrap();
        let store = HistoryStore::new(&path);

        let err = store
            .append(HistoryEntry::from_weather("x", &weather(0.0)))
            .unwrap_err();

        assert!(err.to_string().contains("not a JSON array"));
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"City": "Lima"}"#);
    }

    #[test]
    fn clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let store = HistoryStore::new(&path);
        store.append(HistoryEntry::from_weather("x", &weather(0.0))).unwrap();

        assert!(store.clear().unwrap());
        assert!(!path.exists());
    }
}
