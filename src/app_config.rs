use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::corpus::CorpusLayout;
use crate::injection::tagger::DEFAULT_NOUN_TAGS;
use crate::injection::{ErrorKind, ErrorSelection, NounTags};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Corpus reading options
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Input file locations
    #[serde(default)]
    pub inputs: InputConfig,

    /// Plain output file; the tagged copy is written next to it
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Error kinds to inject
    #[serde(default)]
    pub error_kind: ErrorSelection,

    /// Part-of-speech tagger options
    #[serde(default)]
    pub tagger: TaggerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Optional file that receives a copy of every log line
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

/// Corpus configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CorpusConfig {
    // @field: On-disk layout of the PE and MT corpora
    #[serde(default)]
    pub layout: CorpusLayout,
}

/// Catalogue file name inside an errors directory
pub const LEXICAL_ERRORS_FILE: &str = "lexical_errors_json";

/// Catalogue file name inside an errors directory
pub const CONNECTIVE_ERRORS_FILE: &str = "connective_errors_json";

/// Input file locations
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct InputConfig {
    // @field: Post-edited corpus
    #[serde(default)]
    pub pe: Option<PathBuf>,

    // @field: Machine-translated corpus
    #[serde(default)]
    pub mt: Option<PathBuf>,

    // @field: Structural error catalogue (JSON)
    #[serde(default)]
    pub structural: Option<PathBuf>,

    // @field: Lexical error catalogue
    #[serde(default)]
    pub lexical: Option<PathBuf>,

    // @field: Connective error catalogue
    #[serde(default)]
    pub connective: Option<PathBuf>,

    // @field: MT→PE word alignments
    #[serde(default)]
    pub alignments: Option<PathBuf>,

    // @field: Directory holding lexical_errors_json / connective_errors_json
    #[serde(default)]
    pub errors_dir: Option<PathBuf>,
}

impl InputConfig {
    /// Fill in `pe` and `mt` from a corpus directory holding `pe/` and `mt/`
    pub fn with_corpus_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        let dir = dir.as_ref();
        if self.pe.is_none() {
            self.pe = Some(dir.join("pe"));
        }
        if self.mt.is_none() {
            self.mt = Some(dir.join("mt"));
        }
        self
    }

    /// Lexical catalogue, falling back to the errors directory
    pub fn lexical_path(&self) -> Option<PathBuf> {
        self.lexical
            .clone()
            .or_else(|| self.errors_dir.as_ref().map(|dir| dir.join(LEXICAL_ERRORS_FILE)))
    }

    /// Connective catalogue, falling back to the errors directory
    pub fn connective_path(&self) -> Option<PathBuf> {
        self.connective
            .clone()
            .or_else(|| self.errors_dir.as_ref().map(|dir| dir.join(CONNECTIVE_ERRORS_FILE)))
    }

    /// Catalogue path for one error kind
    pub fn catalogue_path(&self, kind: ErrorKind) -> Option<PathBuf> {
        match kind {
            ErrorKind::Structural => self.structural.clone(),
            ErrorKind::Lexical => self.lexical_path(),
            ErrorKind::Connective => self.connective_path(),
        }
    }
}

/// Tagger configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TaggerConfig {
    // @field: Optional nlprule tokenizer model (binary)
    #[serde(default)]
    pub model: Option<PathBuf>,

    // @field: Optional word<TAB>TAG lexicon
    #[serde(default)]
    pub lexicon: Option<PathBuf>,

    // @field: Tags counted as nouns
    #[serde(default = "default_noun_tags")]
    pub noun_tags: Vec<String>,
}

impl TaggerConfig {
    pub fn noun_tag_set(&self) -> NounTags {
        NounTags::new(self.noun_tags.iter().cloned())
    }
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            model: None,
            lexicon: None,
            noun_tags: default_noun_tags(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_noun_tags() -> Vec<String> {
    DEFAULT_NOUN_TAGS.iter().map(|tag| tag.to_string()).collect()
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write config to file: {:?}", path))
    }

    /// Error kinds the run will attempt, in pass order
    pub fn selected_kinds(&self) -> Vec<ErrorKind> {
        [ErrorKind::Structural, ErrorKind::Lexical, ErrorKind::Connective]
            .into_iter()
            .filter(|kind| self.error_kind.includes(*kind))
            .collect()
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.inputs.pe.is_none() {
            return Err(anyhow!("PE corpus path is required"));
        }
        if self.inputs.mt.is_none() {
            return Err(anyhow!("MT corpus path is required"));
        }
        if self.output.is_none() {
            return Err(anyhow!("Output path is required"));
        }
        if self.tagger.noun_tags.is_empty() {
            return Err(anyhow!("Noun tag set must not be empty"));
        }

        // A single selected kind must have its catalogue; "all" needs at least one
        let kinds = self.selected_kinds();
        let available: Vec<ErrorKind> = kinds
            .iter()
            .copied()
            .filter(|kind| self.inputs.catalogue_path(*kind).is_some())
            .collect();
        match self.error_kind {
            ErrorSelection::All if available.is_empty() => {
                return Err(anyhow!(
                    "No error catalogue configured (structural, lexical, connective or errors directory)"
                ));
            }
            ErrorSelection::All => {}
            _ if available.is_empty() => {
                return Err(anyhow!("Catalogue for {} errors is required", self.error_kind));
            }
            _ => {}
        }

        let needs_alignments = available.iter().any(|kind| *kind != ErrorKind::Structural);
        if needs_alignments && self.inputs.alignments.is_none() {
            return Err(anyhow!("Alignment file is required for lexical and connective errors"));
        }

        Ok(())
    }
}
