use crate::api::types::GameEvent;
use crate::core::scene::Scene;
use crate::input::state::InputState;

/// Configuration for the shell, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Most fixed steps run for one host frame (default: 10).
    pub max_steps_per_tick: u32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of drawables in the scene (default: 100 000).
    pub max_drawables: usize,
    /// Maximum number of tessellated vertices per frame (default: 65536).
    pub max_vector_vertices: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_tick: 10,
            world_width: 800.0,
            world_height: 600.0,
            max_drawables: crate::core::scene::DEFAULT_SCENE_CAPACITY,
            max_vector_vertices: 65536,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return shell configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state and populate the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. Read input, advance the simulation, edit drawables.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputState);
}

/// Mutable access to shell state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub events: Vec<GameEvent>,
    max_events: usize,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    /// Size the scene and event list from a game's configuration.
    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.max_drawables),
            events: Vec::with_capacity(config.max_events),
            max_events: config.max_events,
        }
    }

    /// Emit a game event to be forwarded to the host page.
    /// Events past the per-frame limit are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("event limit of {} reached, dropping kind {}", self.max_events, event.kind);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::drawable::Drawable;
    use glam::Vec2;

    #[test]
    fn context_respects_configured_capacity() {
        let config = GameConfig { max_drawables: 2, ..GameConfig::default() };
        let mut ctx = EngineContext::with_config(&config);
        ctx.scene.add(Drawable::circle(Vec2::ZERO, 1.0));
        ctx.scene.add(Drawable::circle(Vec2::ZERO, 1.0));
        assert_eq!(ctx.scene.capacity(), 2);
        assert_eq!(ctx.scene.len(), 2);
    }

    #[test]
    fn events_are_capped_and_cleared() {
        let config = GameConfig { max_events: 2, ..GameConfig::default() };
        let mut ctx = EngineContext::with_config(&config);
        for i in 0..3 {
            ctx.emit_event(GameEvent::new(1.0, i as f32, 0.0, 0.0));
        }
        assert_eq!(ctx.events.len(), 2);
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }
}
