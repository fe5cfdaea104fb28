//! DecayViz CLI and Server Binary
//!
//! Starts the HTTP API, validates or initializes configuration files, and
//! renders single decay-chain diagrams from the command line.

use anyhow::{Context, Result};
use cli::{Cli, Commands, LogFormatArg, DEFAULT_CONFIG_PATH};
use config::{
    generate_default_config, load_config, save_config, validate_config, DecayVizConfig,
};
use decay::{Dataset, DecayChain};
use decay_api::{create_router, DecayApiState, RenderSettings};
use observability::{init_logging, init_metrics, LogFormat};
use server::{validate_port_available, HttpServer, ServerConfig, ServerExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Start { config, host, port } => {
            start_service(cli.log_format, config, host, port).await
        }
        Commands::Validate { config } => {
            init_cli_logging(cli.log_format)?;
            info!("Executing 'validate' command");
            validate_command(config)
        }
        Commands::Init { output, force } => {
            init_cli_logging(cli.log_format)?;
            info!("Executing 'init' command");
            init_command(output, force)
        }
        Commands::Chain {
            isotope,
            output,
            config,
        } => {
            init_cli_logging(cli.log_format)?;
            info!("Executing 'chain' command");
            chain_command(&isotope, output, config)
        }
    }
}

fn init_cli_logging(format: Option<LogFormatArg>) -> Result<()> {
    let format = format.map_or(LogFormat::Pretty, to_log_format);
    init_logging("decayviz", format)
}

fn to_log_format(arg: LogFormatArg) -> LogFormat {
    match arg {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Json => LogFormat::Json,
        LogFormatArg::Compact => LogFormat::Compact,
    }
}

/// Explicit path, else `decayviz.yaml` when present, else built-in defaults
fn resolve_config(path: Option<&Path>) -> Result<(DecayVizConfig, Option<PathBuf>)> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !fallback.is_file() {
                return Ok((DecayVizConfig::default(), None));
            }
            fallback
        }
    };
    let config = load_config(&path)
        .with_context(|| format!("Failed to load configuration from {:?}", path))?;
    Ok((config, Some(path)))
}

async fn start_service(
    log_format: Option<LogFormatArg>,
    config_path: Option<PathBuf>,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    let (mut config, source) = resolve_config(config_path.as_deref())?;

    let mut service = config.service();
    let format = match log_format {
        Some(arg) => to_log_format(arg),
        None => {
            let format = config.logging().format;
            LogFormat::parse(&format.to_lowercase())
                .ok_or_else(|| anyhow::anyhow!("Invalid log format: {}", format))?
        }
    };
    init_logging(&service.name, format)?;

    match &source {
        Some(path) => info!(?path, "Using configuration file"),
        None => info!("No configuration file found, using built-in defaults"),
    }

    if let Some(host) = host_override {
        debug!(%host, "Overriding service host");
        service.host = host;
    }
    if let Some(port) = port_override {
        debug!(port, "Overriding service port");
        service.port = port;
    }
    config.service = Some(service.clone());

    let report = validate_config(&config);

    if !report.warnings.is_empty() {
        warn!("Configuration warnings:");
        for warning in &report.warnings {
            warn!(field = %warning.field, message = %warning.message);
        }
    }

    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!("Cannot start service due to configuration errors");
    }

    let render_config = config.render();
    match render::install_fonts(&render_config.font_paths) {
        Some(font) => info!(?font, "Using TrueType font for chart text"),
        None => warn!("No TrueType font found, chart text uses the built-in bitmap font"),
    }

    let metrics = config.metrics();
    if metrics.enabled {
        init_metrics(metrics.port).context("Failed to start metrics exporter")?;
        info!(port = metrics.port, "Prometheus metrics enabled");
    }

    let prefix = config.api().prefix;
    let state = Arc::new(DecayApiState::from_config(&config));
    let router = create_router(state, &prefix);

    let server_config = ServerConfig::new(service.host.clone(), service.port);
    validate_port_available(&server_config).await?;

    info!(
        service = %service.name,
        address = %service.http_address(),
        prefix = %prefix,
        dpi = render_config.dpi,
        "Starting DecayViz"
    );

    HttpServer::new(server_config, router)
        .with_name(service.name)
        .with_request_timeout(Duration::from_secs(service.request_timeout_secs))
        .run_with_ctrl_c()
        .await?;

    Ok(())
}

fn validate_command<P: AsRef<Path>>(config_path: P) -> Result<()> {
    info!(path = ?config_path.as_ref(), "Validating configuration");

    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!(%e, "Failed to load configuration");
            anyhow::bail!(e);
        }
    };

    let report = validate_config(&config);

    println!("\n=== Configuration Validation Report ===\n");

    if !report.defaults_applied.is_empty() {
        println!("Defaults Applied ({}):", report.defaults_applied.len());
        for default in &report.defaults_applied {
            println!("  [info] {} = {}", default.field, default.value);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    let service = config.service();
    let render = config.render();
    let evolution = config.evolution();

    println!("[ok] Configuration is valid!");
    println!();
    println!("Service: {}", service.name);
    println!("Address: {}", service.http_address());
    println!("API prefix: {:?}", config.api().prefix);
    println!("DPI: {}", render.dpi);
    println!(
        "Evolution defaults: {} {}, {} samples, y unit {}",
        evolution.default_time_period,
        evolution.default_time_unit.code(),
        evolution.samples,
        evolution.default_y_unit.code()
    );

    Ok(())
}

fn init_command<P: AsRef<Path>>(output_path: P, force: bool) -> Result<()> {
    let output_path = output_path.as_ref();
    info!(?output_path, "Initializing new configuration file");

    if output_path.exists() && !force {
        anyhow::bail!(
            "{:?} already exists; pass --force to overwrite it",
            output_path
        );
    }

    let config = generate_default_config();

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    save_config(&config, output_path)?;

    println!("[ok] Configuration file created successfully!");
    println!();
    println!("Location: {:?}", output_path);
    println!();
    println!("This configuration includes:");
    println!("  - Service address and request timeout");
    println!("  - API prefix");
    println!("  - Render resolution, figure sizes and font candidates");
    println!("  - Evolution defaults (period, units, sample count)");
    println!("  - Logging format and Prometheus metrics");
    println!();
    println!("Next steps:");
    println!("  1. Edit the configuration file to customize settings");
    println!(
        "  2. Run 'decayviz validate --config {:?}' to check configuration",
        output_path
    );
    println!(
        "  3. Run 'decayviz start --config {:?}' to start the API",
        output_path
    );

    Ok(())
}

fn chain_command(isotope: &str, output: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let (config, _) = resolve_config(config_path.as_deref())?;
    let render_config = config.render();
    if render::install_fonts(&render_config.font_paths).is_none() {
        warn!("No TrueType font found, chart text uses the built-in bitmap font");
    }

    let settings = RenderSettings::from(&render_config);
    let dataset = Dataset::embedded();
    let chain = DecayChain::from_root(dataset, isotope)
        .with_context(|| format!("Failed to build decay chain for {}", isotope))?;
    let (image, _layout) =
        render::render_chain(&chain, dataset, settings.chain_figure, settings.dpi)
            .context("Failed to render decay chain")?;

    std::fs::write(&output, &image.png)
        .with_context(|| format!("Failed to write {:?}", output))?;

    println!(
        "[ok] {} ({} nuclides) -> {:?} ({}x{} px)",
        chain.root(),
        chain.nodes().len(),
        output,
        image.width,
        image.height
    );

    Ok(())
}
