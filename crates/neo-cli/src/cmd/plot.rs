use crate::output::print_json;
use anyhow::Result;
use neo_core::config::DashboardConfig;
use neo_core::pipeline::Pipeline;

pub fn run(config: &DashboardConfig, start: &str, end: &str, json: bool) -> Result<()> {
    let pipeline = Pipeline::from_config(config)?;
    let range = pipeline.date_range(start, end)?;

    let rt = tokio::runtime::Runtime::new()?;
    let artifact = rt.block_on(pipeline.render_all(&range))?;

    if json {
        print_json(&artifact)?;
    } else {
        println!("{}", artifact.path.display());
    }
    Ok(())
}
