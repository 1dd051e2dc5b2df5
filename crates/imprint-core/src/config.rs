//! Config file discovery, format detection and loading
//!
//! A repo carries exactly one logical config document, but it may live in
//! any of three files: `config.json`, `config.yaml`, `config.yml`. When more
//! than one exists the loader does not guess; it hands the full candidate
//! list back to the caller, which is expected to ask the user.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{CoreError, Result};
use crate::values::Values;

/// Supported config serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Detect by file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl FromStr for ConfigFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(CoreError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
        }
    }
}

/// A config file found during discovery
#[derive(Debug, Clone)]
pub struct ConfigCandidate {
    pub path: PathBuf,
    pub file_name: &'static str,
    pub format: ConfigFormat,
}

const CANDIDATE_NAMES: [(&str, ConfigFormat); 3] = [
    ("config.json", ConfigFormat::Json),
    ("config.yaml", ConfigFormat::Yaml),
    ("config.yml", ConfigFormat::Yaml),
];

/// List existing config files in a repo directory, in discovery order
pub fn candidates(repo_dir: &Path) -> Vec<ConfigCandidate> {
    CANDIDATE_NAMES
        .iter()
        .filter_map(|(file_name, format)| {
            let path = repo_dir.join(file_name);
            path.is_file().then(|| ConfigCandidate {
                path,
                file_name,
                format: *format,
            })
        })
        .collect()
}

/// Load and parse a config file into an attribute tree.
///
/// Format selection precedence: the explicit `format` override, then the file
/// extension, then parse attempts in fixed order (JSON, YAML). An empty
/// result is an error: an empty tree silently renders every placeholder
/// blank, which is almost always a user mistake.
pub fn load_config(path: &Path, format: Option<ConfigFormat>) -> Result<Values> {
    if !path.is_file() {
        return Err(CoreError::ConfigNotFound {
            dir: path.display().to_string(),
        });
    }
    let content = std::fs::read_to_string(path)?;

    let values = match format.or_else(|| ConfigFormat::from_extension(path)) {
        Some(ConfigFormat::Json) => parse(&content, ConfigFormat::Json).map_err(|message| {
            CoreError::ConfigParse {
                path: path.display().to_string(),
                message,
            }
        })?,
        Some(ConfigFormat::Yaml) => parse(&content, ConfigFormat::Yaml).map_err(|message| {
            CoreError::ConfigParse {
                path: path.display().to_string(),
                message,
            }
        })?,
        None => try_formats(path, &content)?,
    };

    if values.is_empty() {
        return Err(CoreError::ConfigEmpty {
            path: path.display().to_string(),
        });
    }
    Ok(values)
}

fn parse(content: &str, format: ConfigFormat) -> std::result::Result<Values, String> {
    match format {
        ConfigFormat::Json => {
            Values::from_json(content).map_err(|e| format!("JSON parse error: {e}"))
        }
        ConfigFormat::Yaml => {
            Values::from_yaml(content).map_err(|e| format!("YAML parse error: {e}"))
        }
    }
}

/// Attempt each supported format in priority order; the error reported on
/// total failure is the first attempt's, since JSON is the priority format.
fn try_formats(path: &Path, content: &str) -> Result<Values> {
    let json_err = match parse(content, ConfigFormat::Json) {
        Ok(values) => return Ok(values),
        Err(e) => e,
    };
    match parse(content, ConfigFormat::Yaml) {
        Ok(values) => Ok(values),
        Err(_) => Err(CoreError::ConfigParse {
            path: path.display().to_string(),
            message: json_err,
        }),
    }
}
