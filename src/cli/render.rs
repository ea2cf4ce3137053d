//! The `render` command.

use std::path::Path;

use super::OutputFormat;
use crate::{
    config::RenderPolicy,
    render::{to_html, to_text},
    Error, HostConfig, TableAdapter,
};

/// Decode a configuration file and print it in the requested format.
pub(crate) fn cmd_render(
    config_path: &Path,
    format: OutputFormat,
    policy: RenderPolicy,
    width: usize,
) -> crate::Result<()> {
    let json = std::fs::read_to_string(config_path).map_err(|e| Error::io(e, config_path))?;
    let config = HostConfig::from_json(&json)?;
    let table = config.data.decode()?;
    let adapter = TableAdapter::new(policy);

    log::info!(
        "rendering {} ({} x {})",
        config_path.display(),
        table.rows(),
        table.columns()
    );

    match format {
        OutputFormat::Html => {
            let decoded = adapter.decode(table.as_ref(), &config.options)?;
            print!("{}", to_html(&decoded));
        }
        OutputFormat::Grid => {
            let model = adapter.build_grid_model(table.as_ref(), &config.options)?;
            println!("{}", model.to_json()?);
        }
        OutputFormat::Text => {
            let decoded = adapter.decode(table.as_ref(), &config.options)?;
            for line in to_text(&decoded, width) {
                println!("{line}");
            }
        }
    }

    Ok(())
}
