//! Locks the digest domain separators.
//!
//! Every recorded digest depends on these byte strings, so changing one is a
//! wire break and must show up here first.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tilepath_kernel::proof::hash::{canonical_hash, HashDomain};

#[test]
fn domain_bytes_are_pinned() {
    let pinned: Vec<(HashDomain, &[u8])> = vec![
        (HashDomain::GraphSnapshot, b"TILEPATH::GRAPH_SNAPSHOT::V1\0"),
        (HashDomain::SearchTrace, b"TILEPATH::SEARCH_TRACE::V1\0"),
        (HashDomain::SearchPath, b"TILEPATH::SEARCH_PATH::V1\0"),
        (HashDomain::ScenarioConfig, b"TILEPATH::SCENARIO_CONFIG::V1\0"),
        (HashDomain::ScenarioReport, b"TILEPATH::SCENARIO_REPORT::V1\0"),
        (HashDomain::BenchGuard, b"TILEPATH::BENCH_GUARD::V1\0"),
    ];
    let listed: Vec<HashDomain> = pinned.iter().map(|(d, _)| *d).collect();
    assert_eq!(listed, HashDomain::ALL, "domain added or reordered");
    for (domain, bytes) in pinned {
        assert_eq!(domain.as_bytes(), bytes, "{domain} changed");
    }
}

#[test]
fn same_payload_hashes_differently_per_domain() {
    let digests: BTreeSet<String> = HashDomain::ALL
        .iter()
        .map(|d| canonical_hash(*d, b"{}").as_str().to_string())
        .collect();
    assert_eq!(digests.len(), HashDomain::ALL.len());
}

fn rust_sources(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            rust_sources(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            out.push(path);
        }
    }
}

/// Only `hash_domain.rs` may spell out a separator; everything else goes
/// through [`HashDomain`].
#[test]
fn separators_are_only_spelled_in_hash_domain() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let mut files = Vec::new();
    for crate_dir in ["kernel", "search", "harness", "benchmarks"] {
        rust_sources(&root.join(crate_dir), &mut files);
    }
    assert!(!files.is_empty(), "no sources under {}", root.display());

    let needle = concat!("b\"TILEPATH", "::");
    let offenders: Vec<String> = files
        .iter()
        .filter(|p| !p.ends_with("hash_domain.rs"))
        .filter(|p| std::fs::read_to_string(p).is_ok_and(|text| text.contains(needle)))
        .map(|p| p.display().to_string())
        .collect();
    assert!(offenders.is_empty(), "raw separators in {offenders:?}");
}
