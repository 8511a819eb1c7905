pub mod config;
pub mod entities;
pub mod game;
pub mod layout;
pub mod math;
pub mod physics;
pub mod rules;
pub mod shot;
pub mod state;

pub use config::MatchConfig;
pub use game::PoolGame;
pub use state::MatchState;

#[cfg(feature = "vectors")]
arena_web::export_game!(PoolGame, "coolpool", vectors);
#[cfg(not(feature = "vectors"))]
arena_web::export_game!(PoolGame, "coolpool");
