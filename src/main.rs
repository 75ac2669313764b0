mod chart;
mod config;
mod github;
mod stats;

use anyhow::{Result, bail};
use config::{ChartConfig, Credentials};
use github::GithubClient;
use std::collections::BTreeMap;

#[tokio::main]
async fn main() -> Result<()> {
    let creds = Credentials::from_env()?;
    let cfg = ChartConfig::default();

    let client = GithubClient::new(creds.token);

    let repos = client.list_repos(&creds.username).await?;
    println!("Found {} repositories for {}", repos.len(), creds.username);

    // Sequential fetch per repo; aggregation is commutative so order is
    // irrelevant (consider making concurrent).
    let mut totals = BTreeMap::new();
    for repo in &repos {
        let breakdown = client.repo_languages(repo).await?;
        stats::accumulate(&mut totals, breakdown, &cfg);
    }

    let ranked = stats::rank(&totals, cfg.top_n);
    if ranked.is_empty() {
        bail!(
            "no language data to display for {} (no repositories, or every language excluded)",
            creds.username
        );
    }
    let pcts = stats::percentages(&ranked);

    let labels: Vec<String> = ranked.into_iter().map(|(lang, _)| lang).collect();
    chart::render(&labels, &pcts, &cfg)?;

    println!("Wrote {}", cfg.output.display());

    Ok(())
}
