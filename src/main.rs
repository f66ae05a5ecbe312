//! table-sizer - Interactive column resizing for tables in the terminal
//!
//! This is the main entry point for the table-sizer application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod cli;
mod component;
mod components;
mod config;
mod error;
mod input;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::cli::Cli;
use crate::component::Component;
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::fs::{self, File};
use std::path::Path;
use std::time::Duration;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = cli.load_config();
    cli.apply(&mut config);

    if cli.write_config {
        let path = config.save(cli.config.as_deref())?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    if let Some(path) = cli.log_path() {
        if let Err(err) = init_logging(&path, config.log_level_filter()) {
            eprintln!("Logging disabled: {:#}", err);
        }
    }
    log::info!("Starting table-sizer with {} paths", cli.paths.len());

    // Load documents before touching the terminal so errors print plainly
    let mut app = App::new(config, cli.paths)?;

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(app.config.tick_rate_ms));
    tui.enter()?;

    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        log::error!("{:#}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Send log output to a file; the terminal belongs to the UI
fn init_logging(path: &Path, level: log::LevelFilter) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
    }
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    simplelog::WriteLogger::init(level, simplelog::Config::default(), file)?;
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            let area = frame.area();
            if let Err(e) = app.draw(frame, area) {
                log::error!("Draw error: {}", e);
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to actions
            let actions = match event {
                Event::Key(key) => app.handle_key_event(key)?.into_iter().collect(),
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => vec![Action::Resize(w, h)],
                _ => Vec::new(),
            };

            // Process the actions in order
            for action in actions {
                // Action might produce a follow-up action
                let mut current_action = Some(action);
                while let Some(a) = current_action {
                    current_action = app.update(a)?;
                }
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
