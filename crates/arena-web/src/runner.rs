use arena::{
    labels_json, EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue,
    InputState,
};
#[cfg(feature = "vectors")]
use arena::{tessellate_scene, VectorState};

/// Generic game runner that wires up the shell loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    queue: InputQueue,
    input: InputState,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
    /// Labels of the last tick, serialised for the host page.
    labels: String,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep =
            FixedTimestep::new(config.fixed_dt).with_max_steps(config.max_steps_per_tick);

        Self {
            game,
            ctx: EngineContext::with_config(&config),
            queue: InputQueue::new(),
            input: InputState::new(),
            timestep,
            #[cfg(feature = "vectors")]
            vectors: VectorState::with_capacity(config.max_vector_vertices),
            config,
            initialized: false,
            labels: String::from("[]"),
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.rebuild_outputs();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Run one frame tick: fold input, step the game, rebuild the outputs.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        if steps == 0 {
            // Keep queued input for the next tick that actually steps.
            return;
        }

        self.input.ingest(self.queue.drain());
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            // Only the first step of a tick sees the edges.
            self.input.clear_edges();
        }

        self.rebuild_outputs();
    }

    fn rebuild_outputs(&mut self) {
        #[cfg(feature = "vectors")]
        tessellate_scene(&self.ctx.scene, &mut self.vectors);

        self.labels = match labels_json(&self.ctx.scene) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("failed to serialise labels: {err}");
                String::from("[]")
            }
        };
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Accessors read by the host page ----

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.vectors.vertex_count() as u32
    }

    #[cfg(feature = "vectors")]
    pub fn max_vector_vertices(&self) -> u32 {
        self.vectors.max_vertices() as u32
    }

    pub fn labels_json(&self) -> &str {
        &self.labels
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena::{Drawable, GameEvent, Key};
    use glam::Vec2;

    /// Counts Space presses and steps; draws one label.
    struct Counter {
        presses: u32,
        steps: u32,
    }

    impl Game for Counter {
        fn config(&self) -> GameConfig {
            GameConfig { fixed_dt: 0.25, ..GameConfig::default() }
        }

        fn init(&mut self, ctx: &mut EngineContext) {
            ctx.scene.add(Drawable::label("0", 30.0, Vec2::new(10.0, 10.0)));
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputState) {
            self.steps += 1;
            if input.just_pressed(Key::Space) {
                self.presses += 1;
                ctx.emit_event(GameEvent::new(1.0, 0.0, 0.0, 0.0));
            }
        }
    }

    fn runner() -> GameRunner<Counter> {
        let mut runner = GameRunner::new(Counter { presses: 0, steps: 0 });
        runner.init();
        runner
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = GameRunner::new(Counter { presses: 0, steps: 0 });
        runner.tick(1.0);
        assert_eq!(runner.game().steps, 0);
    }

    #[test]
    fn edges_are_seen_by_one_step_only() {
        let mut runner = runner();
        runner.push_input(InputEvent::KeyDown { key_code: 32 });
        runner.tick(0.5);
        assert_eq!(runner.game().steps, 2);
        assert_eq!(runner.game().presses, 1);
        assert_eq!(runner.game_events_len(), 1);
    }

    #[test]
    fn input_waits_for_a_stepping_tick() {
        let mut runner = runner();
        runner.push_input(InputEvent::KeyDown { key_code: 32 });
        runner.tick(0.1);
        assert_eq!(runner.game().steps, 0);
        runner.tick(0.2);
        assert_eq!(runner.game().presses, 1);
    }

    #[test]
    fn a_stalled_frame_runs_a_bounded_number_of_steps() {
        let mut runner = runner();
        runner.tick(60.0);
        assert_eq!(runner.game().steps, 10);
        runner.tick(0.25);
        assert_eq!(runner.game().steps, 11);
    }

    #[test]
    fn events_are_cleared_each_tick() {
        let mut runner = runner();
        runner.push_input(InputEvent::KeyDown { key_code: 32 });
        runner.tick(0.25);
        runner.tick(0.25);
        assert_eq!(runner.game_events_len(), 0);
    }

    #[test]
    fn labels_are_exported_after_init() {
        let runner = runner();
        assert!(runner.labels_json().contains("\"text\":\"0\""));
        assert_eq!(runner.world_width(), 800.0);
    }
}
