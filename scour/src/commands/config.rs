// scour/src/commands/config.rs
//
// USE CASE: Show the merged configuration and the file that won.

use scour_core::ConfigLoader;
use scour_core::application::resolve_config;

use crate::cli::{OutputFormat, ProjectArgs};

pub async fn execute(project: ProjectArgs, format: OutputFormat) -> anyhow::Result<()> {
    let options = super::load_options(&project)?;
    let loader = ConfigLoader::with_defaults();
    let resolved = resolve_config(&loader, &options).await?;

    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(&resolved)?,
        OutputFormat::Json => serde_json::to_string_pretty(&resolved)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
