//! Password lookups.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use passcache_core::config::GlobalConfig;
use passcache_secrets::PasswordLookup;

pub async fn execute(config: GlobalConfig, terms: Vec<String>, keep_going: bool) -> Result<()> {
    tracing::debug!(terms = terms.len(), keep_going, "running password lookups");

    let results = tokio::task::spawn_blocking(move || {
        let lookup = PasswordLookup::from_config(config);
        if keep_going {
            lookup.run_each(&terms).into_iter().zip(terms).collect::<Vec<_>>()
        } else {
            match lookup.run(&terms) {
                Ok(values) => values.into_iter().map(Ok).zip(terms).collect(),
                Err(e) => vec![(Err(e), String::new())],
            }
        }
    })
    .await
    .context("Lookup task failed")?;

    let total = results.len();
    let mut failed = 0;
    for (result, term) in results {
        match result {
            Ok(value) => println!("{}", value),
            Err(e) if keep_going => {
                failed += 1;
                eprintln!("{} {}: {}", "✗".red().bold(), term, e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    if failed > 0 {
        bail!("{} of {} lookups failed", failed, total);
    }
    Ok(())
}
