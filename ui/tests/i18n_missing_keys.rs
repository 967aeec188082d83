//! Translation completeness.
//!
//! * every locale defines every key of the fallback (en-US) bundle
//! * no bundle defines a key twice
//! * every `t!("…")` id used under `src/` exists in every bundle
//!
//! The FTL parsing is a line heuristic: `key = value` lines count as message
//! definitions; comments, attributes and continuation lines are skipped.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

const EN_US: &str = include_str!("../i18n/en-US/loadscope-ui.ftl");
const ES_ES: &str = include_str!("../i18n/es-ES/loadscope-ui.ftl");

fn locales() -> Vec<(&'static str, &'static str)> {
    vec![("en-US", EN_US), ("es-ES", ES_ES)]
}

#[test]
fn all_locales_have_all_fallback_keys() {
    let fallback = extract_keys(EN_US);
    assert!(!fallback.is_empty(), "Fallback (en-US) contains no keys.");

    let mut failures = Vec::new();
    for (locale, src) in locales() {
        let keys = extract_keys(src);
        let missing: Vec<&String> = fallback.difference(&keys).collect();
        if !missing.is_empty() {
            failures.push(format!(
                "Locale {locale} is missing {} key(s):\n  {}",
                missing.len(),
                missing.iter().map(|k| k.as_str()).collect::<Vec<_>>().join("\n  ")
            ));
        }
    }

    assert!(
        failures.is_empty(),
        "Translation completeness check failed:\n\n{}",
        failures.join("\n\n")
    );
}

#[test]
fn no_duplicate_keys() {
    for (locale, src) in locales() {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for key in key_lines(src) {
            *counts.entry(key).or_default() += 1;
        }
        let dups: Vec<_> = counts.into_iter().filter(|(_, n)| *n > 1).collect();
        assert!(dups.is_empty(), "Duplicate keys in {locale}: {dups:?}");
    }
}

#[test]
fn every_source_key_is_translated() {
    let src_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let used = source_keys(&src_root);
    assert!(!used.is_empty(), "no t!(…) calls found under {}", src_root.display());

    for (locale, src) in locales() {
        let defined = extract_keys(src);
        let missing: Vec<&String> = used.difference(&defined).collect();
        assert!(missing.is_empty(), "{locale} lacks keys used in source: {missing:?}");
    }
}

fn extract_keys(src: &str) -> BTreeSet<String> {
    key_lines(src).collect()
}

fn key_lines(src: &str) -> impl Iterator<Item = String> + '_ {
    src.lines().filter_map(|line| {
        // Continuation lines are indented; only column-0 ids are definitions.
        if line.starts_with(char::is_whitespace) {
            return None;
        }
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('.') || line.starts_with('-') {
            return None;
        }
        let (key, _) = line.split_once('=')?;
        let key = key.trim();
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        valid.then(|| key.to_string())
    })
}

fn source_keys(root: &Path) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    for file in rust_files(root) {
        let Ok(text) = fs::read_to_string(&file) else {
            continue;
        };
        for (pos, _) in text.match_indices("t!(\"") {
            // `format!("` and friends also end in `t!("`.
            let standalone = text[..pos]
                .chars()
                .next_back()
                .map_or(true, |c| !(c.is_alphanumeric() || c == '_'));
            if !standalone {
                continue;
            }
            let rest = &text[pos + 4..];
            if let Some(end) = rest.find('"') {
                keys.insert(rest[..end].to_string());
            }
        }
    }
    keys
}

fn rust_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
    }
    files
}
