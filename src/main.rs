//! CLI entry point for gesture-config-manager
//!
//! Provides a command-line interface for listing, editing, repairing and
//! watching the libinput-gestures config, controlling its service, plus the
//! key-combo translator.

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use gesture_config_manager::{
    config::{expand_path_buf, ConfigError, ConfigManager, ConfigWatcher, DEFAULT_CONFIG_PATH},
    core::{
        actions::{compose_line, keyboard_shortcut, KDE_DEFAULTS_DESCRIPTION},
        canonical_key, sort_for_display, Gesture, GestureAction, RepairReport,
    },
    ipc::{ClientMode, QdbusClient, ServiceCommand, SetupClient},
    translate,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gesture-config-manager")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to libinput-gestures config file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all gesture bindings
    List {
        /// Print bindings as JSON
        #[arg(long)]
        json: bool,

        /// Repair the file first if it has malformed lines
        #[arg(long)]
        repair: bool,
    },

    /// Bind a gesture, replacing any existing binding for it
    Add {
        /// Gesture label ("Swipe Up") or phrase ("swipe up")
        #[arg(short, long, value_parser = parse_gesture_arg)]
        gesture: Gesture,

        /// Number of fingers
        #[arg(short, long)]
        fingers: u32,

        #[command(flatten)]
        action: ActionArgs,

        /// qdbus binary for desktop actions (default: search PATH)
        #[arg(long)]
        qdbus: Option<String>,
    },

    /// Remove a gesture binding
    Delete {
        /// Gesture label or phrase
        #[arg(short, long, value_parser = parse_gesture_arg, requires = "fingers")]
        gesture: Option<Gesture>,

        /// Number of fingers
        #[arg(short, long, requires = "gesture")]
        fingers: Option<u32>,

        /// Raw key, e.g. "gesture swipe up 3"
        #[arg(long, conflicts_with_all = ["gesture", "fingers"], required_unless_present = "gesture")]
        key: Option<String>,
    },

    /// Collapse runs of spaces and tabs
    Normalize,

    /// Remove malformed lines
    Repair,

    /// Install the KDE Plasma defaults (previous file kept as .old)
    Defaults {
        /// Describe the defaults instead of installing them
        #[arg(long)]
        show: bool,

        /// qdbus binary to write into the defaults (default: search PATH)
        #[arg(long)]
        qdbus: Option<String>,
    },

    /// Replace the config with another file, then normalize and repair it
    Import {
        /// File to import
        file: PathBuf,
    },

    /// Translate a recorded key combination into xdotool names
    Translate {
        /// Combination such as "Ctrl+Meta+PgDown"
        combo: String,
    },

    /// List KWin global shortcut names usable as desktop actions
    Actions {
        /// qdbus binary (default: search PATH)
        #[arg(long)]
        qdbus: Option<String>,
    },

    /// List known gestures
    Gestures,

    /// Re-list bindings whenever the config file changes
    Watch,

    /// Control the libinput-gestures service (edits apply after restart)
    Service {
        #[arg(value_enum)]
        action: ServiceAction,

        /// Print the command instead of running it
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ServiceAction {
    Status,
    Start,
    Stop,
    Restart,
}

impl From<ServiceAction> for ServiceCommand {
    fn from(action: ServiceAction) -> Self {
        match action {
            ServiceAction::Status => ServiceCommand::Status,
            ServiceAction::Start => ServiceCommand::Start,
            ServiceAction::Stop => ServiceCommand::Stop,
            ServiceAction::Restart => ServiceCommand::Restart,
        }
    }
}

/// Exactly one action per binding
#[derive(Args)]
#[group(required = true, multiple = false)]
struct ActionArgs {
    /// Keyboard shortcut, e.g. "Meta+PgUp"
    #[arg(long)]
    shortcut: Option<String>,

    /// KWin global shortcut name, e.g. "Window Maximize"
    #[arg(long)]
    desktop_action: Option<String>,

    /// Arbitrary shell command
    #[arg(long)]
    command: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Translate { combo } = &cli.command {
        println!("{}", translate(combo));
        return Ok(());
    }
    if let Commands::Gestures = &cli.command {
        list_gestures();
        return Ok(());
    }
    if let Commands::Service { action, dry_run } = &cli.command {
        return control_service((*action).into(), *dry_run);
    }

    let config_path = expand_path_buf(&cli.config)?;
    let manager = ConfigManager::new(config_path)?;

    match cli.command {
        Commands::List { json, repair } => list_bindings(&manager, json, repair)?,
        Commands::Add {
            gesture,
            fingers,
            action,
            qdbus,
        } => add_binding(&manager, gesture, fingers, action, qdbus)?,
        Commands::Delete {
            gesture,
            fingers,
            key,
        } => delete_binding(&manager, gesture, fingers, key)?,
        Commands::Normalize => {
            manager.normalize_whitespace()?;
            println!("{} Normalized {}", "✓".green(), manager.config_path().display());
        }
        Commands::Repair => {
            let report = manager.validate_and_repair()?;
            print_report(&report);
        }
        Commands::Defaults { show, qdbus } => install_defaults(&manager, show, qdbus)?,
        Commands::Import { file } => {
            let source = expand_path_buf(&file)?;
            let report = manager
                .import(&source)
                .with_context(|| format!("Failed to import {}", source.display()))?;
            println!("{} Imported {}", "✓".green(), source.display());
            print_report(&report);
        }
        Commands::Actions { qdbus } => {
            let client = resolve_qdbus(qdbus)?;
            for name in client.shortcut_names()? {
                println!("{}", name);
            }
        }
        Commands::Watch => watch(&manager)?,
        Commands::Translate { .. } | Commands::Gestures | Commands::Service { .. } => {}
    }

    Ok(())
}

/// Installs the stderr subscriber; `-v` forces debug, otherwise `RUST_LOG` or warn
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Accepts "Swipe LeftUp", "swipe left_up" or "gesture swipe left_up"
fn parse_gesture_arg(value: &str) -> Result<Gesture, String> {
    let trimmed = value.trim();
    Gesture::ALL
        .into_iter()
        .find(|gesture| gesture.label().eq_ignore_ascii_case(trimmed))
        .or_else(|| Gesture::from_phrase(trimmed))
        .or_else(|| Gesture::from_phrase(&format!("gesture {}", trimmed)))
        .ok_or_else(|| format!("unknown gesture '{}' (see the `gestures` command)", value))
}

fn resolve_qdbus(explicit: Option<String>) -> anyhow::Result<QdbusClient> {
    match explicit {
        Some(binary) => Ok(QdbusClient::new(binary, ClientMode::Live)),
        None => QdbusClient::locate()
            .ok_or_else(|| anyhow!("qdbus not found on PATH (tried qdbus, qdbus-qt5, qdbus6); pass --qdbus")),
    }
}

/// List all bindings in the config, sorted for display
fn list_bindings(manager: &ConfigManager, json: bool, repair: bool) -> anyhow::Result<()> {
    let mut bindings = match manager.parse_for_display() {
        Ok(bindings) => bindings,
        Err(ConfigError::Parse(e)) if repair => {
            eprintln!("{} {}", "⚠".yellow(), e);
            let report = manager.validate_and_repair()?;
            print_report(&report);
            manager.parse_for_display()?
        }
        Err(ConfigError::Parse(e)) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            eprintln!(
                "{}",
                "Run `gesture-config-manager repair` (or `list --repair`) to remove malformed lines."
                    .yellow()
            );
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    sort_for_display(&mut bindings);

    if json {
        println!("{}", serde_json::to_string_pretty(&bindings)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("Gestures from: {}\n", manager.config_path().display()).bold()
    );

    for binding in &bindings {
        let kind = match &binding.action {
            GestureAction::KeyboardShortcut(_) => binding.action_kind().label().cyan(),
            GestureAction::DesktopAction(_) => binding.action_kind().label().magenta(),
            GestureAction::Command(_) => binding.action_kind().label().green(),
        };

        println!(
            "{} {} → {} {}",
            binding.label().bold(),
            format!("({} fingers)", binding.finger_count).dimmed(),
            kind,
            binding.payload()
        );
    }

    println!("\n{} Total: {} gestures", "✓".green(), bindings.len());
    Ok(())
}

fn add_binding(
    manager: &ConfigManager,
    gesture: Gesture,
    fingers: u32,
    action: ActionArgs,
    qdbus: Option<String>,
) -> anyhow::Result<()> {
    if fingers > 0 && fingers < gesture.min_fingers() {
        eprintln!(
            "{} {} normally needs at least {} fingers",
            "⚠".yellow(),
            gesture.label(),
            gesture.min_fingers()
        );
    }

    let action_text = match (action.shortcut, action.desktop_action, action.command) {
        (Some(combo), _, _) => keyboard_shortcut(&combo),
        (_, Some(name), _) => resolve_qdbus(qdbus)?.desktop_action(&name),
        (_, _, Some(command)) => command,
        (None, None, None) => bail!("one of --shortcut, --desktop-action or --command is required"),
    };

    let line = compose_line(&gesture, fingers, &action_text);
    manager.upsert(&gesture.phrase(), fingers, &line)?;

    println!("{} {}", "✓".green(), line);
    Ok(())
}

fn delete_binding(
    manager: &ConfigManager,
    gesture: Option<Gesture>,
    fingers: Option<u32>,
    key: Option<String>,
) -> anyhow::Result<()> {
    let key = match (key, gesture, fingers) {
        (Some(key), _, _) => key,
        (None, Some(gesture), Some(fingers)) => canonical_key(&gesture, fingers),
        _ => bail!("pass --key, or --gesture together with --fingers"),
    };

    let removed = manager.delete(&key)?;
    if removed == 0 {
        println!("{} No binding for '{}'", "⚠".yellow(), key);
    } else {
        println!("{} Removed {} line(s) for '{}'", "✓".green(), removed, key);
    }
    Ok(())
}

fn install_defaults(manager: &ConfigManager, show: bool, qdbus: Option<String>) -> anyhow::Result<()> {
    if show {
        println!("{}", KDE_DEFAULTS_DESCRIPTION);
        return Ok(());
    }

    let client = resolve_qdbus(qdbus)?;
    manager.install_defaults(&client.kde_defaults())?;

    println!(
        "{} Installed KDE Plasma defaults into {}",
        "✓".green(),
        manager.config_path().display()
    );
    println!("  Previous config saved as {}", manager.backup_path().display());
    Ok(())
}

fn control_service(command: ServiceCommand, dry_run: bool) -> anyhow::Result<()> {
    let client = if dry_run {
        SetupClient::new(ClientMode::DryRun)
    } else {
        SetupClient::locate()
            .ok_or_else(|| anyhow!("libinput-gestures-setup not found on PATH; is libinput-gestures installed?"))?
    };

    if dry_run {
        println!("{} {}", "→".cyan(), client.command_line(command));
        return Ok(());
    }

    if command == ServiceCommand::Status {
        let status = client.status()?;
        let flag = |on: bool| if on { "yes".green() } else { "no".red() };
        println!("Installed: {}", flag(status.installed));
        println!("Running:   {}", flag(status.running));
        println!("Autostart: {}", flag(status.autostart));
        return Ok(());
    }

    let output = client.run(command)?;
    print!("{}", output);
    println!("{} {}", "✓".green(), client.command_line(command));
    Ok(())
}

fn list_gestures() {
    for gesture in Gesture::ALL {
        println!(
            "{:<22} {:<28} {}",
            gesture.label().bold(),
            gesture.phrase(),
            format!("{}+ fingers", gesture.min_fingers()).dimmed()
        );
    }
}

fn print_report(report: &RepairReport) {
    if report.is_clean() {
        println!("{} {} lines kept, nothing removed", "✓".green(), report.kept);
        return;
    }

    println!(
        "{} Removed {} malformed line{} ({} kept):",
        "⚠".yellow().bold(),
        report.dropped.len(),
        if report.dropped.len() == 1 { "" } else { "s" },
        report.kept
    );
    for dropped in &report.dropped {
        println!(
            "  {} {} {}",
            format!("line {}:", dropped.line_number).dimmed(),
            dropped.text.trim_end(),
            format!("({})", dropped.reason).red()
        );
    }
}

/// Print bindings now and after every change until interrupted
fn watch(manager: &ConfigManager) -> anyhow::Result<()> {
    let watcher = ConfigWatcher::new(manager.config_path())?;
    println!("{} Watching {}", "→".cyan(), manager.config_path().display());

    loop {
        match manager.parse_for_display() {
            Ok(mut bindings) => {
                sort_for_display(&mut bindings);
                for binding in &bindings {
                    println!("  {}", binding.to_line());
                }
            }
            Err(e) => eprintln!("{} {}", "✗".red(), e),
        }

        watcher.wait_for_change()?;
        println!("\n{} Config changed", "→".cyan());
    }
}
