//! Lazily integrated 2D bodies.
//!
//! Bodies carry forces whose effect is folded into velocity and position
//! only when the body is observed or one of its forces changes.
//!
//! ```
//! use std::time::Duration;
//! use lazy_physics::core::Vector;
//! use lazy_physics::engine::clock::ManualClock;
//! use lazy_physics::engine::physics::PhysicsSystem;
//!
//! let clock = ManualClock::new();
//! let mut system = PhysicsSystem::new(clock.clone());
//! let mut body = system.add_object(Vec::new(), Vector::new(1.0, 1.0)).unwrap();
//! body.add_force(1.0, Vector::new(1.0, 0.0)).unwrap();
//!
//! clock.advance(Duration::from_secs(1));
//! assert_eq!(body.velocity(), Vector::new(1.0, 0.0));
//! assert_eq!(body.position(), Vector::new(1.5, 1.0));
//! ```

pub mod config;
pub mod core;
pub mod demo;
pub mod engine;
