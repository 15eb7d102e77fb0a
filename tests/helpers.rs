// Shared test helpers: an in-memory resolver backend and input/config setup.
//
// Included by the integration test files with `mod helpers;`.

use std::collections::HashMap;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use domain_hosts::{BackendKind, Config, Domain, FailureKind, Resolve};

/// A backend answering from a fixed table and failing with `NoRecords` otherwise.
pub struct StaticBackend {
    kind: BackendKind,
    answers: HashMap<String, IpAddr>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)] // Not every test file uses every helper
impl StaticBackend {
    pub fn new(kind: BackendKind, answers: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            kind,
            answers: answers
                .iter()
                .map(|(name, ip)| (name.to_string(), ip.parse().expect("valid test address")))
                .collect(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Resolve for StaticBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    async fn lookup(&self, domain: &Domain) -> Result<IpAddr, FailureKind> {
        self.calls.lock().unwrap().push(domain.as_str().to_string());
        self.answers
            .get(domain.as_str())
            .copied()
            .ok_or(FailureKind::NoRecords)
    }
}

/// Upcasts mock backends for `run_generate_with_backends`.
#[allow(dead_code)]
pub fn backends(mocks: &[Arc<StaticBackend>]) -> Vec<Arc<dyn Resolve>> {
    mocks
        .iter()
        .map(|m| Arc::clone(m) as Arc<dyn Resolve>)
        .collect()
}

/// Writes `lines` to `name` inside `dir` and returns the path.
#[allow(dead_code)]
pub fn write_input(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(&path, content).expect("Failed to write test input");
    path
}

/// A config reading `input` and writing `hosts` inside `dir`, with short timeouts.
#[allow(dead_code)]
pub fn test_config(dir: &Path, input: PathBuf) -> Config {
    Config {
        file: Some(input),
        output: dir.join("hosts"),
        worker_count: Some(4),
        timeout_seconds: 0.5,
        fallback_timeout_seconds: 0.5,
        ..Default::default()
    }
}
