//! Offline trainer: mines the transaction log and deploys the rules model.

use std::fs;
use std::time::Instant;

use anyhow::{bail, Context};
use chrono::Utc;

use lattice_api::config::Config;
use lattice_api::mining::{self, MiningParams, TrainingOutcome};
use lattice_api::store::{self, RulesManifest};
use lattice_api::telemetry;

fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = Config::from_env()?;

    if !config.data_path.exists() {
        bail!("data source not found at {:?}", config.data_path);
    }

    tracing::info!(path = ?config.data_path, "Loading transaction log");
    let records = store::read_transactions(&config.data_path)
        .with_context(|| format!("failed to read transaction log {:?}", config.data_path))?;
    tracing::info!(rows = records.len(), "Transaction log loaded");

    let params = MiningParams {
        min_support: config.min_support,
        min_lift: config.min_lift,
    };

    let started = Instant::now();
    let outcome = mining::train(&records, &params)?;
    let elapsed = started.elapsed();

    match outcome {
        TrainingOutcome::NoFrequentItemsets => {
            // Leaves any previously deployed artifact untouched.
            tracing::warn!(
                min_support = params.min_support,
                "No itemsets met the support threshold; nothing written"
            );
        }
        TrainingOutcome::Trained(trained) => {
            fs::create_dir_all(&config.model_dir)
                .with_context(|| format!("failed to create model dir {:?}", config.model_dir))?;

            let rules_path = store::write_rules(&config.model_dir, &trained.deployed)
                .context("failed to write rules artifact")?;
            let manifest = RulesManifest {
                trained_at: Utc::now(),
                min_support: params.min_support,
                min_lift: params.min_lift,
                basket_count: trained.basket_count,
                item_count: trained.item_count,
                itemset_count: trained.itemset_count,
                rule_count: trained.deployed.len(),
            };
            store::write_manifest(&config.model_dir, &manifest)
                .context("failed to write training manifest")?;

            tracing::info!(
                rules = trained.deployed.len(),
                path = ?rules_path,
                elapsed_ms = elapsed.as_millis() as u64,
                "Rules model written"
            );
        }
    }

    Ok(())
}
