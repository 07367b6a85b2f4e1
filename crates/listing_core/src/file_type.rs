use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The record type a listing is scoped to; passed along with every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileType {
    #[default]
    Reads,
    Subtraction,
    Reference,
    Hmm,
    Other(String),
}

impl FileType {
    pub fn as_str(&self) -> &str {
        match self {
            FileType::Reads => "reads",
            FileType::Subtraction => "subtraction",
            FileType::Reference => "reference",
            FileType::Hmm => "hmm",
            FileType::Other(name) => name,
        }
    }

    /// Header shown above the listing, e.g. "Read Files".
    pub fn title(&self) -> String {
        match self {
            FileType::Reads => "Read Files".to_string(),
            other => format!("{} Files", capitalize(other.as_str())),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "reads" => FileType::Reads,
            "subtraction" => FileType::Subtraction,
            "reference" => FileType::Reference,
            "hmm" => FileType::Hmm,
            _ => FileType::Other(s.trim().to_string()),
        })
    }
}

impl From<String> for FileType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(file_type) => file_type,
            Err(never) => match never {},
        }
    }
}

impl From<FileType> for String {
    fn from(value: FileType) -> Self {
        value.as_str().to_string()
    }
}
