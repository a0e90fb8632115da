//! View3D - headless host for the embedded 3D map view
//!
//! Runs a host store with the 3D view attached and drives it from line
//! commands on stdin. Logs go to stderr, command output to stdout.

mod commands;
mod headless;
mod logging_setup;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError};
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use view3d_control::{HostSession, LifecycleEvent};
use view3d_core::{HostState, LocalConfig, StartupParams, View3dConfig};

use commands::{Command, Flow};

const TICK: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(name = "view3d", version, about = "Headless host for the embedded 3D map view")]
struct Args {
    /// Configuration file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Startup parameter as key=value, e.g. `--startup v=3d`
    #[arg(long = "startup", value_name = "KEY=VALUE")]
    startup: Vec<String>,

    /// Simulated load time of the 3D scene
    #[arg(long, default_value_t = 500)]
    scene_delay_ms: u64,

    /// Number of module loads that fail before one succeeds
    #[arg(long, default_value_t = 0)]
    fail_loads: usize,

    /// Longest time `wait` blocks for a pending load
    #[arg(long, default_value_t = 10_000)]
    wait_timeout_ms: u64,
}

fn load_config(path: Option<&PathBuf>) -> Result<View3dConfig> {
    match path {
        Some(path) => View3dConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config from {:?}", path)),
        None => Ok(View3dConfig::load()),
    }
}

/// Read stdin on its own thread so the host loop keeps ticking
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = unbounded();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

fn report_events(session: &mut HostSession) {
    for event in session.controller_mut().take_events() {
        match &event {
            LifecycleEvent::LoadFailed { message, .. } => {
                println!("load failed: {} (type 'retry' to try again)", message)
            }
            LifecycleEvent::Ready { module, .. } => println!("scene ready ({})", module),
            LifecycleEvent::LoadRequested { generation } => {
                println!("loading scene (generation {})", generation)
            }
            LifecycleEvent::TornDown => println!("scene closed"),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    let _log_guard = logging_setup::init(&config.log)?;

    info!("==========================================");
    info!("===       View3D Session Started       ===");
    info!("==========================================");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    let state = HostState {
        local_config: Arc::new(LocalConfig {
            startup_params: StartupParams::parse(args.startup.iter().map(String::as_str)),
            ..Default::default()
        }),
        ..Default::default()
    };
    let loader = headless::loader(Duration::from_millis(args.scene_delay_ms), args.fail_loads);
    let wait = Duration::from_millis(args.wait_timeout_ms);

    let mut session = HostSession::new(state, config, loader, runtime.handle().clone());
    session.tick();
    report_events(&mut session);

    let lines = spawn_stdin_reader();
    println!("type 'help' for commands");

    loop {
        match lines.recv_timeout(TICK) {
            Ok(line) if line.trim().is_empty() => {}
            Ok(line) => match line.parse::<Command>() {
                Ok(command) => {
                    if command.apply(&mut session, wait) == Flow::Quit {
                        break;
                    }
                }
                Err(e) => println!("{}", e),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // stdin closed: let a pending load finish before exiting
                if !session.settle(wait) {
                    error!("Module load still pending at exit");
                }
                report_events(&mut session);
                break;
            }
        }
        session.tick();
        report_events(&mut session);
    }

    println!("{}", commands::status(&session));
    info!("View3D session finished");
    Ok(())
}
