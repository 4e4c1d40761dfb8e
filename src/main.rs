use anyhow::Result;
use log::info;

use lazy_physics::config::DemoConfig;
use lazy_physics::demo;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = DemoConfig::from_args(std::env::args().skip(1))?;
    info!("Starting lazy-physics demo with {:?}", config);

    let samples = demo::run(&config)?;

    match samples.last() {
        Some(last) => info!(
            "Finished after {} samples: position {} velocity {}",
            samples.len(),
            last.position,
            last.velocity
        ),
        None => info!("Finished without taking any samples"),
    }

    Ok(())
}
