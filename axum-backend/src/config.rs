//! Server configuration loaded from environment variables.

use anyhow::{Context, Result};
use room_topology::TopologyConfig;
use std::path::PathBuf;

const DEFAULT_ORIGINS: &str = "http://localhost:8080,http://127.0.0.1:8080,http://localhost:5173,http://127.0.0.1:5173";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Directory holding one `<key>.json` document per plan.
    pub data_dir: PathBuf,
    /// Allowed CORS origins. Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub max_body_bytes: usize,
    pub topology: TopologyConfig,
}

impl Config {
    /// Read `PORT`, `DATA_DIR`, `ALLOWED_ORIGINS`, `MAX_BODY_BYTES` and the
    /// optional `TOPOLOGY_CONFIG` JSON file.
    pub fn from_env() -> Result<Self> {
        let topology = match std::env::var("TOPOLOGY_CONFIG") {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read topology config {}", path))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("Invalid topology config {}", path))?
            }
            Err(_) => TopologyConfig::default(),
        };

        Ok(Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .unwrap_or(3000),
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "./data".into())
                .into(),
            allowed_origins: parse_origins(
                &std::env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGINS.into()),
            ),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .unwrap_or_else(|_| "10485760".into())
                .parse()
                .unwrap_or(10 * 1024 * 1024),
            topology,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
