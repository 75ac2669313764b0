use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// GitHub credentials, read once at startup.
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl Credentials {
    /// Read GITHUB_USER and GITHUB_TOKEN from the environment.
    pub fn from_env() -> Result<Self> {
        let username =
            std::env::var("GITHUB_USER").context("GITHUB_USER environment variable not set")?;
        let token =
            std::env::var("GITHUB_TOKEN").context("GITHUB_TOKEN environment variable not set")?;
        Ok(Self { username, token })
    }
}

/// Rendering style. Spacious adds an x-axis label, denser ticks and a
/// gradient overlay on each bar; Compact keeps the plot minimal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChartStyle {
    Compact,
    Spacious,
}

/// Everything the aggregation and rendering steps need, passed in explicitly
/// so the core logic stays testable without touching the environment.
#[derive(Clone, Debug)]
pub struct ChartConfig {
    /// Language names dropped entirely before aggregation.
    pub exclude: HashSet<String>,
    /// Alias -> canonical name, applied before summing.
    pub merge: HashMap<String, String>,
    /// How many top languages to keep for display.
    pub top_n: usize,
    pub style: ChartStyle,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            exclude: ["JavaScript", "Hack"].iter().map(|s| s.to_string()).collect(),
            merge: [("Jupyter Notebook", "Python")]
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
            top_n: 8,
            style: ChartStyle::Spacious,
            output: PathBuf::from("github_stats.png"),
            width: 1200,
            height: 800,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_values() {
        let cfg = ChartConfig::default();
        assert_eq!(cfg.top_n, 8);
        assert!(cfg.exclude.contains("JavaScript"));
        assert!(cfg.exclude.contains("Hack"));
        assert_eq!(cfg.merge.get("Jupyter Notebook").map(String::as_str), Some("Python"));
        assert_eq!(cfg.style, ChartStyle::Spacious);
    }
}
