use std::time::Duration;

use anyhow::Result;
use bevy::prelude::*;
use clap::Parser;

use armball::device::synthetic::spawn_synthetic_arm;
use armball::device::{discover_band, DeviceHandle, NullDeviceSource};
use armball::{GameConfig, GamePlugin};

#[derive(Parser, Debug)]
#[command(name = "armball", about = "Physics balls steered by an armband device")]
struct Cli {
    /// Path to a RON config file. Defaults override when absent.
    #[arg(long, default_value = "assets/config/game.ron")]
    config: String,

    /// Require the config file to exist and parse (no silent fallback).
    #[arg(long)]
    strict_config: bool,

    /// Substitute the device pose onto every ball, not just the last spawned.
    #[arg(long)]
    steer_all: bool,

    /// Run with a synthetic orientation sweep instead of real hardware.
    #[arg(long)]
    synthetic_arm: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = if cli.strict_config {
        GameConfig::load_from_file(&cli.config).map_err(|e| anyhow::anyhow!(e))?
    } else {
        let (cfg, err) = GameConfig::load_or_default(&cli.config);
        if let Some(err) = err {
            eprintln!("config: falling back to defaults ({err})");
        }
        cfg
    };
    if cli.steer_all {
        cfg.device.steer_all = true;
    }
    for warning in cfg.validate() {
        eprintln!("config: {warning}");
    }

    let mut app = App::new();
    app.insert_resource(cfg.clone()).add_plugins(
        DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }),
    );

    if cli.synthetic_arm {
        app.insert_non_send_resource(DeviceHandle(Box::new(spawn_synthetic_arm())));
    } else {
        match discover_band(Duration::from_millis(cfg.device.connect_timeout_ms)) {
            Ok(source) => {
                app.insert_non_send_resource(DeviceHandle(Box::new(source)));
            }
            Err(err) => {
                eprintln!("device: {err}; running device-less");
                app.insert_non_send_resource(DeviceHandle(Box::new(NullDeviceSource)));
            }
        }
    }

    app.add_plugins(GamePlugin).run();
    Ok(())
}
