use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use std::env;
use std::process;

use starfall::catalog::CatalogKind;
use starfall::config::{TuningSource, TUNING_PATH};
use starfall::registry::{log_registry_summary, ConfigRegistry, RegistryPlugin};

/// Startup system: list every catalog entry the way the HUD legend shows it.
fn report_catalogs(registry: Res<ConfigRegistry>) {
    for kind in CatalogKind::ALL {
        let catalog = match registry.catalog(kind.key()) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!("{e}");
                continue;
            }
        };
        for (id, descriptor) in catalog.iter() {
            match descriptor.rarity {
                Some(rarity) => info!(
                    "[{}] {} {:<12} {} (rarity {:.2})",
                    kind.key(),
                    descriptor.symbol,
                    id,
                    descriptor.color.as_str(),
                    rarity
                ),
                None => info!(
                    "[{}] {} {:<12} {}",
                    kind.key(),
                    descriptor.symbol,
                    id,
                    descriptor.color.as_str()
                ),
            }
        }
    }
}

fn main() {
    // Optional override path, mostly for trying alternative tunings side by side.
    let path = env::var("STARFALL_TUNING").unwrap_or_else(|_| TUNING_PATH.to_string());

    // Build (and validate) before the App exists so no system can observe a
    // half-loaded or defective configuration.
    // No log subscriber exists yet, so report the outcome directly.
    let registry = match ConfigRegistry::load_with_source(&path) {
        Ok((registry, TuningSource::File)) => {
            println!("✓ Tuning registry built from {path}");
            registry
        }
        Ok((registry, TuningSource::Defaults)) => {
            println!("ℹ No {path} found; using compiled defaults");
            registry
        }
        Err(e) => {
            eprintln!("✗ {e}");
            process::exit(1);
        }
    };

    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_once()))
        .add_plugins(LogPlugin::default())
        .add_plugins(RegistryPlugin::new(registry))
        .add_systems(Startup, report_catalogs.after(log_registry_summary))
        .run();
}
