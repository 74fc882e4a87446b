use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use recase::cli::{self, CliArgs, Command, ConfigAction};
use recase::convert::ConversionMode;
use recase::converter::{ConvertCommand, ConvertOutcome, Converter};
use recase::editable::Selection;
use recase::settings::{FileSettings, SettingsProvider, StaticSettings};
use recase::settings_watcher::SettingsWatcher;
use recase::surface::{Applied, Surface};
use recase::RecaseConfig;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    recase::tracing::init();

    match args.command {
        Command::Convert {
            mode,
            text,
            select,
            ignore,
            config,
        } => run_convert(mode, text, select, ignore, config),
        Command::Serve { config } => run_serve(config),
        Command::Config { action, config } => match action {
            Some(ConfigAction::Set { list }) => set_ignore_list(config, &list),
            None => show_config(config),
        },
    }
}

/// Settings from `--ignore`, else the config file, else the built-in default
fn settings_for(ignore: Option<String>, config: Option<PathBuf>) -> Arc<dyn SettingsProvider> {
    if let Some(list) = ignore {
        return Arc::new(StaticSettings::new(&list));
    }
    match cli::config_path(config) {
        Some(path) => Arc::new(FileSettings::new(path)),
        None => Arc::new(StaticSettings::new(&RecaseConfig::default().ignore_list)),
    }
}

fn run_convert(
    mode: ConversionMode,
    text: Vec<String>,
    select: Option<Selection>,
    ignore: Option<String>,
    config: Option<PathBuf>,
) -> Result<()> {
    let text = if text.is_empty() {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read text from stdin")?;
        if input.ends_with('\n') {
            input.pop();
        }
        input
    } else {
        text.join(" ")
    };

    let mut converter = Converter::new(settings_for(ignore, config));
    converter.load_settings_now();

    let id = converter
        .registry_mut()
        .add(cli::flat_surface(&text, select));
    let outcome = converter.handle(ConvertCommand::new(mode).on(id));

    let result = converter
        .registry()
        .get(id)
        .map(Surface::text)
        .unwrap_or(text);
    println!("{}", result);

    if select.is_some() {
        if let ConvertOutcome::Converted {
            applied: Applied::Flat { start, end },
            ..
        } = outcome
        {
            eprintln!("selection: {}..{}", start, end);
        }
    }
    Ok(())
}

fn run_serve(config: Option<PathBuf>) -> Result<()> {
    let path = cli::config_path(config).context("No config location available")?;
    let settings = FileSettings::new(path);
    let mut converter = Converter::new(Arc::new(settings.clone()));

    match SettingsWatcher::new(settings) {
        Ok(watcher) => converter.watch(watcher),
        Err(e) => tracing::warn!("Settings changes will not be picked up: {}", e),
    }
    converter.refresh_settings();

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        converter.poll_settings();

        let (mode, text) = match cli::parse_serve_line(&line) {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        let id = converter.registry_mut().add(Surface::input(None, text));
        converter.handle(ConvertCommand::new(mode).on(id));
        if let Some(surface) = converter.registry_mut().remove(id) {
            writeln!(stdout, "{}", surface.text()).context("Failed to write output")?;
            stdout.flush().context("Failed to write output")?;
        }
    }
    Ok(())
}

fn show_config(config: Option<PathBuf>) -> Result<()> {
    let path = cli::config_path(config).context("No config location available")?;
    let settings = FileSettings::new(path);

    println!("config: {}", settings.path().display());
    match settings.ignore_list() {
        Ok(list) => println!("ignore_list: {}", list),
        Err(e) => println!("ignore_list: <unreadable: {}>", e),
    }
    Ok(())
}

fn set_ignore_list(config: Option<PathBuf>, list: &str) -> Result<()> {
    let path = cli::config_path(config).context("No config location available")?;
    let stored = RecaseConfig::store_ignore_list(&path, list).map_err(anyhow::Error::msg)?;

    println!("config: {}", path.display());
    println!("ignore_list: {}", stored.ignore_list);
    Ok(())
}
