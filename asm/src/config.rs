use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HexCase {
    #[default]
    Upper,
    Lower,
}

/// Assembly options. Every field has a default so a YAML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address of the first word
    pub origin: u8,
    pub case_sensitive_labels: bool,
    /// Everything from this character to end of line is ignored
    pub comment_marker: char,
    pub hex_case: HexCase,
    /// Bytes on each line of the hex image
    pub bytes_per_line: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            origin: 0,
            case_sensitive_labels: true,
            comment_marker: ';',
            hex_case: HexCase::Upper,
            bytes_per_line: 1,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        serde_yaml::from_reader(BufReader::new(file))
            .map_err(|e| Error::ConfigParse(path.to_string(), e))
    }
}
