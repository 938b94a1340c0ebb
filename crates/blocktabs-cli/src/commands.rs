//! CLI command implementations.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use blocktabs_core::{open_store, Config, KeyOutcome, ParsedBlock, TabView, TabsInstance};

/// Tab state after one simulated key press
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SimulationStep {
    pub key: String,
    pub outcome: &'static str,
    pub active_id: Option<String>,
    pub focus_id: String,
    pub tabs: Vec<TabView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InstanceInfo {
    id: String,
    name: String,
    active_id: Option<String>,
    orientation: String,
    tabs: Vec<TabView>,
}

impl From<&TabsInstance> for InstanceInfo {
    fn from(instance: &TabsInstance) -> Self {
        Self {
            id: instance.id.clone(),
            name: instance.name.clone(),
            active_id: instance.active_id().map(str::to_owned),
            orientation: instance.orientation().to_string(),
            tabs: instance.views(),
        }
    }
}

fn read_block(path: &Path) -> anyhow::Result<ParsedBlock> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid block JSON in {}", path.display()))
}

fn instance_name(path: &Path, name: Option<&str>) -> String {
    name.map(str::to_owned).unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "tabs".to_string())
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn render(path: &Path) -> anyhow::Result<()> {
    let block = read_block(path)?;
    let instance = TabsInstance::from_block(instance_name(path, None), &block)?;
    println!("{}", instance.render()?);
    Ok(())
}

/// Focus follows the outcome of each key; a key on an unknown header
/// leaves it where it was.
pub(crate) fn simulate_keys(
    instance: &mut TabsInstance,
    keys: &[String],
    focus: Option<&str>,
) -> Vec<SimulationStep> {
    let mut focus_id = focus
        .or_else(|| instance.active_id())
        .unwrap_or_default()
        .to_string();

    keys.iter()
        .map(|key| {
            let outcome = instance.key_down(key, &focus_id);
            let label = match &outcome {
                KeyOutcome::Activated { .. } => "activated",
                KeyOutcome::Ignored => "ignored",
                KeyOutcome::Unhandled => "unhandled",
            };
            if let Some(next) = outcome.focus_target() {
                focus_id = next.to_string();
            }

            SimulationStep {
                key: key.clone(),
                outcome: label,
                active_id: instance.active_id().map(str::to_owned),
                focus_id: focus_id.clone(),
                tabs: instance.views(),
            }
        })
        .collect()
}

pub(crate) fn simulate(path: &Path, keys: &[String], focus: Option<&str>) -> anyhow::Result<()> {
    let block = read_block(path)?;
    let mut instance = TabsInstance::from_block(instance_name(path, None), &block)?;
    let steps = simulate_keys(&mut instance, keys, focus);
    print_json(&steps)
}

pub(crate) fn save(config: &Config, path: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let block = read_block(path)?;
    let instance = TabsInstance::from_block(instance_name(path, name), &block)?;
    let store = open_store(config).context("Failed to open database")?;
    store.save(&instance)?;
    println!("{}", instance.id);
    Ok(())
}

pub(crate) fn show(config: &Config, id: &str, html: bool) -> anyhow::Result<()> {
    let store = open_store(config).context("Failed to open database")?;
    let instance = store.load(id)?;
    if html {
        println!("{}", instance.render()?);
        return Ok(());
    }
    print_json(&InstanceInfo::from(&instance))
}

pub(crate) fn list(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).context("Failed to open database")?;
    for summary in store.list()? {
        println!(
            "{}\t{}\t{} tabs\t{}",
            summary.id,
            summary.name,
            summary.tab_count,
            summary.updated_at.to_rfc3339()
        );
    }
    Ok(())
}
