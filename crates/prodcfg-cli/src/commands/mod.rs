//! CLI command implementations.

pub mod check;
pub mod defaults;
pub mod list;
pub mod resolve;

pub use check::CheckArgs;
pub use defaults::DefaultsArgs;
pub use list::ListArgs;
pub use resolve::ResolveArgs;

use tracing::debug;

use prodcfg_engine::{ProductConfigurator, ProductConfiguratorBuilder};
use prodcfg_ext_file::create_file_sources;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Builds a configurator over the file-backed data directory.
pub fn build_engine(config: &CliConfig) -> CliResult<ProductConfigurator> {
    let registry_file = config.registry_file();
    if !registry_file.exists() {
        return Err(CliError::Config(format!(
            "registry file {} not found",
            registry_file.display()
        )));
    }

    debug!(
        "Data: registry {}, products {}, workbooks {}",
        registry_file.display(),
        config.products_dir().display(),
        config.workbooks_dir().display()
    );

    let sources = create_file_sources(
        &registry_file,
        config.products_dir(),
        config.workbooks_dir(),
    )
    .map_err(|e| CliError::Config(e.to_string()))?;

    ProductConfiguratorBuilder::new()
        .with_config(config.engine.clone())
        .with_registry(sources.registry)
        .with_catalog(sources.catalog)
        .with_spreadsheets(sources.spreadsheets)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}
