use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "medihl7.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Indent JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Segment terminator used by `render`
    #[serde(default)]
    pub line_endings: LineEndings,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            line_endings: LineEndings::default(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineEndings {
    #[default]
    Cr,
    Lf,
    Crlf,
}

impl LineEndings {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEndings::Cr => "\r",
            LineEndings::Lf => "\n",
            LineEndings::Crlf => "\r\n",
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pretty={}, line_endings={:?}",
            self.output.pretty, self.output.line_endings
        )
    }
}

pub fn parse_config(text: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(text)
}
