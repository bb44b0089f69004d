//! JSON collaborator around the core: `config.json`, `requests.json` and
//! `answers.json` under one root directory.

use crate::error::ConfigError;
use crate::search::DEFAULT_RESPONSE_LIMIT;
use crate::{DocId, ScoredResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

/// Version a `config.json` must declare to be accepted.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub config: Option<EngineSection>,
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSection {
    #[serde(default)]
    pub name: String,
    pub version: String,
    pub max_responses: Option<i64>,
}

impl ConfigFile {
    pub fn validate(&self) -> Result<&EngineSection, ConfigError> {
        let section = self.config.as_ref().ok_or(ConfigError::MissingConfig)?;
        if section.version != ENGINE_VERSION {
            return Err(ConfigError::WrongVersion {
                expected: ENGINE_VERSION.to_string(),
                found: section.version.clone(),
            });
        }
        Ok(section)
    }

    /// `max_responses` when it is at least 1, otherwise the default of 5.
    pub fn response_limit(&self) -> usize {
        self.config
            .as_ref()
            .and_then(|c| c.max_responses)
            .filter(|n| *n >= 1)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(DEFAULT_RESPONSE_LIMIT)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RequestsFile {
    pub requests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocRank {
    pub docid: DocId,
    pub rank: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestAnswer {
    Many { result: bool, relevance: Vec<DocRank> },
    Single { result: bool, docid: DocId, rank: f64 },
    NotFound { result: bool },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswersFile {
    pub answers: Vec<BTreeMap<String, RequestAnswer>>,
}

pub struct EnginePaths {
    pub root: PathBuf,
}

impl EnginePaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn config(&self) -> PathBuf { self.root.join("config.json") }
    pub fn requests(&self) -> PathBuf { self.root.join("requests.json") }
    pub fn answers(&self) -> PathBuf { self.root.join("answers.json") }
}

/// Read and parse `config.json`. Call [`ConfigFile::validate`] before use.
pub fn load_config(paths: &EnginePaths) -> Result<ConfigFile> {
    let path = paths.config();
    let f = File::open(&path).with_context(|| format!("can't open file: {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("malformed config: {}", path.display()))?;
    Ok(config)
}

/// Read every document listed in the config. Relative paths resolve against the root;
/// unreadable files are logged and skipped.
pub fn load_documents(paths: &EnginePaths, config: &ConfigFile) -> Vec<String> {
    let mut texts = Vec::with_capacity(config.files.len());
    for file in &config.files {
        let path = paths.root.join(file);
        match std::fs::read_to_string(&path) {
            Ok(text) => texts.push(text),
            Err(err) => tracing::warn!(path = %path.display(), %err, "skipping unreadable document"),
        }
    }
    texts
}

pub fn load_requests(paths: &EnginePaths) -> Result<Vec<String>> {
    let path = paths.requests();
    let f = File::open(&path).with_context(|| format!("can't open file: {}", path.display()))?;
    let file: RequestsFile = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("malformed requests: {}", path.display()))?;
    Ok(file.requests)
}

/// Shape search results the way `answers.json` stores them: `request001`, `request002`, ...
pub fn to_answers(results: &[Vec<ScoredResult>]) -> AnswersFile {
    let answers = results
        .iter()
        .enumerate()
        .map(|(i, hits)| {
            let answer = match hits.as_slice() {
                [] => RequestAnswer::NotFound { result: false },
                [hit] => RequestAnswer::Single { result: true, docid: hit.doc_id, rank: hit.rank },
                _ => RequestAnswer::Many {
                    result: true,
                    relevance: hits.iter().map(|h| DocRank { docid: h.doc_id, rank: h.rank }).collect(),
                },
            };
            BTreeMap::from([(format!("request{:03}", i + 1), answer)])
        })
        .collect();
    AnswersFile { answers }
}

pub fn save_answers(paths: &EnginePaths, results: &[Vec<ScoredResult>]) -> Result<()> {
    create_dir_all(&paths.root)?;
    let path = paths.answers();
    let mut f = File::create(&path).with_context(|| format!("can't write to file: {}", path.display()))?;
    let json = serde_json::to_string_pretty(&to_answers(results))?;
    f.write_all(json.as_bytes())?;
    Ok(())
}
