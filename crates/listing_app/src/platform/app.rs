use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use listing_core::{update, ListingState, Msg};
use listing_engine::{event_to_msg, Collaborators, ListingHandle};
use listing_logging::{listing_debug, listing_info};

use super::commands::{parse_command, Command, HELP};
use super::config::{self, AppConfig, DEFAULT_CONFIG_PATH};
use super::logging;
use super::render::render;
use super::store::MemoryFileStore;

/// How long the host waits for more results before it redraws.
const QUIET_PERIOD: Duration = Duration::from_millis(150);

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = config::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    logging::initialize(
        config.log_destination,
        listing_logging::parse_level(&config.log_level),
    );
    listing_info!("starting file manager with {:?}", config);

    let mut host = Host::new(&config);
    host.dispatch(Msg::Mounted);
    host.settle(&config);
    host.print()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading command")?;
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Show) => host.print()?,
            Ok(Command::Send(msg)) => {
                host.dispatch(msg);
                host.settle(&config);
                if host.state.consume_dirty() {
                    host.print()?;
                }
            }
            Err(message) => eprintln!("{message}"),
        }
    }

    host.dispatch(Msg::Unmounted);
    host.handle.shutdown();
    listing_info!("file manager stopped");
    Ok(())
}

struct Host {
    state: ListingState,
    handle: ListingHandle,
}

impl Host {
    fn new(config: &AppConfig) -> Self {
        let store = Arc::new(MemoryFileStore::seeded(
            config.per_page,
            Duration::from_millis(config.latency_ms),
            &config.file_type,
            config.seed_files,
        ));
        listing_info!("seeded store with {} file(s)", store.len());

        Self {
            state: ListingState::new(config.file_type.clone(), config.can_upload),
            handle: ListingHandle::new(Collaborators::from_shared(store)),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        if !effects.is_empty() {
            listing_debug!("dispatching {} effect(s)", effects.len());
            self.handle.execute(effects);
        }
    }

    /// Feeds results back into the update loop until the engine goes quiet.
    fn settle(&mut self, config: &AppConfig) {
        let wait = QUIET_PERIOD + Duration::from_millis(config.latency_ms);
        while let Some(event) = self.handle.recv_timeout(wait) {
            if let Some(msg) = event_to_msg(event) {
                self.dispatch(msg);
            }
        }
    }

    fn print(&mut self) -> io::Result<()> {
        self.state.consume_dirty();
        let mut stdout = io::stdout().lock();
        stdout.write_all(render(&self.state.view()).as_bytes())?;
        stdout.flush()
    }
}
