use crate::output::{print_json, print_yaml};
use anyhow::Result;
use neo_core::config::DashboardConfig;
use std::path::Path;

pub fn run(config: &DashboardConfig, json: bool, write_to: Option<&Path>) -> Result<()> {
    if let Some(path) = write_to {
        config.save(path)?;
        eprintln!("wrote {}", path.display());
    }
    if json {
        print_json(config)
    } else {
        print_yaml(config)
    }
}
