//! Shared test fixtures for integration and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};
use tempfile::TempDir;

use figma_content::models::registry::all_files;
use figma_content::models::{ContentMatrix, TONES, TYPES};
use figma_content::services::{ApplyService, TokenStore};
use figma_content::tokens::{SequentialReferenceKeys, TokenBuilder};

/// Content matrix JSON where every cell reads `"<subject> <tone> <type>"`.
pub fn content_json(subject: &str) -> Value {
    let mut matrix = Map::new();
    for tone in &TONES {
        let mut entry = Map::new();
        for text_type in &TYPES {
            entry.insert(
                text_type.full.to_string(),
                Value::String(format!("{subject} {} {}", tone.full, text_type.full)),
            );
        }
        matrix.insert(tone.full.to_string(), Value::Object(entry));
    }
    Value::Object(matrix)
}

/// Parsed form of [`content_json`].
pub fn content_matrix(subject: &str) -> ContentMatrix {
    serde_json::from_value(content_json(subject)).expect("fixture content is valid")
}

/// Content JSON with one empty cell (`witty.caption`).
pub fn content_json_with_gap(subject: &str) -> Value {
    let mut content = content_json(subject);
    content["witty"]["caption"] = json!("");
    content
}

/// Temporary token directory with all 13 files initialised to `{}`.
pub fn token_dir() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    TokenStore::new(temp_dir.path())
        .init()
        .expect("Failed to init token files");
    temp_dir
}

/// Service over `dir` with deterministic reference keys.
pub fn service(dir: &Path) -> ApplyService<SequentialReferenceKeys> {
    ApplyService::with_builder(
        TokenStore::new(dir),
        TokenBuilder::with_key_generator(SequentialReferenceKeys::new()),
    )
}

/// Writes a content JSON file and returns its path.
pub fn write_content_file(dir: &Path, filename: &str, content: &Value) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, serde_json::to_string_pretty(content).unwrap())
        .expect("Failed to write content file");
    path
}

/// Reads one token file as JSON.
pub fn read_doc(dir: &Path, file: &str) -> Value {
    let raw = fs::read_to_string(dir.join(file)).expect("Failed to read token file");
    serde_json::from_str(&raw).expect("Token file is valid JSON")
}

/// Raw bytes of all 13 token files, in registry order.
pub fn snapshot(dir: &Path) -> Vec<(String, Vec<u8>)> {
    all_files()
        .into_iter()
        .map(|file| {
            let bytes = fs::read(dir.join(file)).expect("Failed to read token file");
            (file.to_string(), bytes)
        })
        .collect()
}

/// Follows a `{a.b.c}` path through nested groups.
pub fn token_at<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(doc, |node, segment| node.get(segment))
}
