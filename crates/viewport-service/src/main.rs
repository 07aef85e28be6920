//! Viewport layout demo entry point.
//!
//! Builds a [`LayoutService`] from configuration, attaches logging observers
//! to every notification, applies the requested layout, and prints where each
//! viewport box would be placed.
//!
//! ```text
//! main()
//!  └─ load_config()            -- --config path, defaults if missing
//!  └─ LayoutService::with_default_layout()
//!  └─ subscribe observers      -- one per LayoutServiceEvent
//!  └─ apply --layout / --grid-count
//!  └─ print viewports
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use viewport_core::{callback, ViewportLayout};
use viewport_service::infrastructure::config::{load_config, render_config, ServiceConfig};
use viewport_service::{LayoutEvent, LayoutService, LayoutServiceEvent};

/// Command-line arguments for the layout demo.
#[derive(Debug, Parser)]
#[command(name = "viewport-demo", version, about = "Inspect viewport layouts")]
struct Args {
    /// Path to a TOML config file.  Defaults are used if it does not exist.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog id of the layout to apply, e.g. `grid-2x3` or `3-plane`.
    #[arg(long)]
    layout: Option<String>,

    /// Build a grid large enough for this many viewports instead.
    #[arg(long, conflicts_with = "layout")]
    grid_count: Option<u32>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServiceConfig::default(),
    };

    // Level comes from RUST_LOG when set, otherwise from the config file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level)),
        )
        .init();

    if args.print_config {
        print!("{}", render_config(&config)?);
        return Ok(());
    }

    let mut service: LayoutService<String> =
        LayoutService::with_default_layout(&config.layout.default_layout);
    attach_observers(&service)?;

    info!(
        layout = service.layout().id(),
        available = service.default_layouts().len(),
        "layout service ready"
    );

    if let Some(id) = &args.layout {
        if !service.set_default_layout_by_id(id, false) {
            warn!(id = id.as_str(), "layout not applied (unknown id or already active)");
        }
    }
    if let Some(count) = args.grid_count {
        let grid = ViewportLayout::grid_for(i64::from(count)).freeze();
        service.set_layout(Some(grid), false);
    }

    // Fill every slot so the content and selection notifications show up too.
    let slots = service.layout().len();
    for slot in 0..slots {
        service.set_content(slot, Some(format!("display-set-{}", slot + 1)));
    }
    service.set_selected(slots.saturating_sub(1));

    let layout = service.layout();
    println!("{} ({}), {} viewport(s)", layout.title(), layout.id(), layout.len());
    for viewport in service.viewports(&config.layout.viewport_plugin) {
        let content = service.get_content(viewport.slot).unwrap_or_default();
        println!(
            "  [{}] left={} top={} right={} bottom={} plugin={} content={}",
            viewport.slot,
            viewport.style.left,
            viewport.style.top,
            viewport.style.right,
            viewport.style.bottom,
            viewport.plugin,
            content,
        );
    }

    service.unsubscribe_from_all();
    Ok(())
}

/// Logs every service notification at `info` level.
fn attach_observers(service: &LayoutService<String>) -> anyhow::Result<()> {
    for event in LayoutServiceEvent::ALL {
        service
            .subscribe(event, callback(log_event))
            .with_context(|| format!("subscribing to {event}"))?;
    }
    Ok(())
}

fn log_event(event: &LayoutEvent<String>) {
    match event {
        LayoutEvent::LayoutChanged { new, old } => {
            info!(from = old.id(), to = new.id(), "layout changed");
        }
        LayoutEvent::ContentChanged { index, new, .. } => {
            info!(slot = index, content = ?new, "content changed");
        }
        LayoutEvent::SelectionChanged { new, old } => {
            info!(from = old, to = new, "selection changed");
        }
        LayoutEvent::ModeChanged(mode) => {
            info!(%mode, "viewer mode changed");
        }
    }
}
