// Engine modules: clock, sampling loop, physics

pub mod clock;
pub mod game_loop;
pub mod physics;
