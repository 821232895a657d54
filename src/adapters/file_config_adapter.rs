//! INI file configuration adapter.
//!
//! Section and key names are case-insensitive. A value may carry a trailing
//! `;` or `#` comment when the marker starts the value or follows whitespace, so
//! `range = 1M   ; last month` reads as `1M`. Blank values read as unset.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

const INLINE_COMMENT_MARKERS: [char; 2] = [';', '#'];

#[derive(Debug)]
pub struct FileConfigAdapter {
    ini: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_string(&content).map_err(std::io::Error::other)
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut ini = Ini::new();
        ini.read(content.to_string())?;
        Ok(Self { ini })
    }

    /// No sections at all; every lookup falls back to its default.
    pub fn empty() -> Self {
        Self { ini: Ini::new() }
    }

    /// Raw value with any inline comment and surrounding whitespace removed.
    fn value(&self, section: &str, key: &str) -> Option<String> {
        let raw = self.ini.get(section, key)?;
        let value = strip_inline_comment(&raw).trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

fn strip_inline_comment(raw: &str) -> &str {
    let mut prev_blank = true;
    for (i, c) in raw.char_indices() {
        if prev_blank && INLINE_COMMENT_MARKERS.contains(&c) {
            return &raw[..i];
        }
        prev_blank = c.is_whitespace();
    }
    raw
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.value(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        match self.value(section, key) {
            Some(v) => v.parse().unwrap_or_else(|_| {
                tracing::warn!("[{section}] {key} = {v:?} is not an integer, using {default}");
                default
            }),
            None => default,
        }
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.value(section, key)
            .and_then(|v| parse_flag(&v))
            .unwrap_or(default)
    }
}
