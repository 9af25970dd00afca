use anyhow::{Context, Result};
use clap::Parser;
use home_copilot::cli::{Cli, CliCommand};
use home_copilot::command::exec_command;
use home_copilot::config::{self, Config, DEFAULT_CONFIG_PATHS};
use home_copilot::repl::Repl;
use home_copilot::{
    Clock, CommandArgs, DeviceController, FixedClock, IftttNotifier, SystemClock,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.clone().unwrap_or(CliCommand::Repl) {
        CliCommand::InitConfig { path } => init_config(&path),
        CliCommand::Repl => {
            let (controller, _) = build_controller(&cli)?;
            let stdin = BufReader::new(tokio::io::stdin());
            let dispatched = Repl::new(&controller, stdin, tokio::io::stdout())
                .run()
                .await
                .context("Interactive session failed")?;
            info!("Interactive session ended after {} command(s)", dispatched);
            Ok(())
        }
        CliCommand::Exec { command, args } => {
            let (controller, _) = build_controller(&cli)?;
            let args: CommandArgs = args.into_iter().collect();
            exec_command(&controller, &command, &args, tokio::io::stdout())
                .await
                .context("Failed to write command output")?;
            Ok(())
        }
        CliCommand::Status => {
            let (controller, config) = build_controller(&cli)?;
            print_status(&controller, &config);
            Ok(())
        }
    }
}

/// Load configuration, start logging and wire up the controller
fn build_controller(cli: &Cli) -> Result<(DeviceController, Config)> {
    let path = cli
        .config
        .clone()
        .or_else(config::find_default_config)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATHS[0]));

    let mut config = config::load_config(&path)
        .with_context(|| format!("Failed to load configuration from '{}'", path.display()))?;
    if cli.verbose {
        config.logging.level = "DEBUG".to_string();
    }
    home_copilot::logging::init_logging(&config.logging)
        .context("Failed to initialize logging")?;

    info!(
        "Home Copilot {} starting with config '{}'",
        env!("APP_VERSION"),
        path.display()
    );

    let notifier = IftttNotifier::from_config(&config).context("Failed to create webhook client")?;
    if !notifier.has_key() {
        warn!("IFTTT_KEY is not set; webhook events will be skipped");
    }

    let clock: Arc<dyn Clock> = match cli.hour {
        Some(hour) => {
            info!("Using fixed hour {:02}:00 for tariff decisions", hour);
            Arc::new(FixedClock(hour))
        }
        None => Arc::new(SystemClock::new(config.tz()?)),
    };

    let controller = DeviceController::from_config(&config, Arc::new(notifier), clock);
    Ok((controller, config))
}

fn init_config(path: &Path) -> Result<()> {
    Config::write_template(path)
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    println!(
        "Wrote template configuration to '{}'. Set IFTTT_KEY and adjust DEVICE_TOPICS before use.",
        path.display()
    );
    Ok(())
}

fn print_status(controller: &DeviceController, config: &Config) {
    let (hour, in_low_tariff) = controller.tariff_now();
    let zone = config.timezone.as_deref().unwrap_or("local time");
    println!("Current hour:      {:02}:00 ({})", hour, zone);
    println!(
        "Low-tariff window: {} -> {}",
        controller.tariff(),
        if in_low_tariff { "low tariff" } else { "peak" }
    );
    println!(
        "Webhook key:       {}",
        if config.api_key().is_some() {
            "configured"
        } else {
            "missing"
        }
    );
    if controller.device_topics().is_empty() {
        println!("Devices:           (none configured)");
    } else {
        println!("Devices:");
        for (name, topic) in controller.device_topics() {
            println!("  {:<12} {}", name, topic);
        }
    }
}
