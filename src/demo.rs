// Deterministic demo run: one body, one force, sampled at a fixed rate

use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::config::DemoConfig;
use crate::core::Vector;
use crate::engine::clock::{Clock, ManualClock};
use crate::engine::game_loop::GameLoop;
use crate::engine::physics::PhysicsSystem;

/// One observation of the demo body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Simulated seconds since the start of the run
    pub time: f64,
    pub position: Vector,
    pub velocity: Vector,
}

/// Run the demo described by `config` against a manual clock
pub fn run(config: &DemoConfig) -> Result<Vec<Sample>> {
    let frame = Duration::try_from_secs_f64(config.frame_secs)
        .with_context(|| format!("invalid frame length: {}", config.frame_secs))?;

    let clock = ManualClock::new();
    let mut system = PhysicsSystem::new(clock.clone());
    let mut game_loop = GameLoop::with_rate(clock.now(), config.sample_rate);

    let id = system
        .add_object(Vec::new(), config.position)
        .context("failed to add demo body")?
        .id();
    system
        .add_force(id, config.magnitude, config.direction)
        .context("failed to attach demo force")?;

    info!(
        "Running {} frames, sampling every {:?}",
        config.frame_count(),
        game_loop.timestep()
    );

    let mut samples = Vec::new();
    for _ in 0..config.frame_count() {
        clock.advance(frame);
        let due = game_loop.begin_frame(clock.now());
        debug!("frame {}: {} samples due", game_loop.frame_count(), due);

        // Reads are lazy, so several samples in one frame see the same state
        for _ in 0..due {
            let mut body = system.object_mut(id)?;
            let sample = Sample {
                time: game_loop.elapsed(clock.now()).as_secs_f64(),
                velocity: body.velocity(),
                position: body.position(),
            };
            info!(
                "t={:.3}s position {} velocity {}",
                sample.time, sample.position, sample.velocity
            );
            samples.push(sample);
        }
    }

    Ok(samples)
}
