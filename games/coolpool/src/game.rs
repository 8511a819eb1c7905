//! Red/yellow pool on the arena shell.
//!
//! Keyboard driven: Up/Down set the power, Left/Right aim, Z toggles fine
//! aiming, Shift cycles the preview length, Space shoots and Enter starts a
//! new match once somebody has won.

use arena::{
    Colour, DrawId, Drawable, EngineContext, Game, GameConfig, GameEvent, InputState, Key,
};

use crate::config::MatchConfig;
use crate::entities::{ColourGroup, PlayerId};
use crate::layout::{self, *};
use crate::rules::TurnSummary;
use crate::shot::{ShotController, ShotRun};
use crate::state::{MatchState, CUE};

/// Game event kinds for the host page.
pub mod game_events {
    /// a = ball index, b = colour code, c = frame.
    pub const POT: f32 = 1.0;
    /// a = next player, b = 1 on a foul, c = turn number.
    pub const TURN_RESOLVED: f32 = 2.0;
    /// a = winning player.
    pub const MATCH_WON: f32 = 3.0;
}

const TAG_BALL: &str = "ball";
const TAG_POWER: &str = "power";

/// Drawables rewritten after every update.
struct Hud {
    turn: DrawId,
    player_one: DrawId,
    player_two: DrawId,
    turn_number: DrawId,
    aim: DrawId,
}

pub struct PoolGame {
    config: MatchConfig,
    state: MatchState,
    shot: ShotController,
    run: Option<ShotRun>,
    /// Pots of the running shot already reported as events.
    reported_pots: usize,
    ball_ids: Vec<Option<DrawId>>,
    power_ids: Vec<DrawId>,
    hud: Option<Hud>,
    win_id: Option<DrawId>,
}

impl PoolGame {
    pub fn new() -> Self {
        Self::with_config(MatchConfig::default())
    }

    pub fn with_config(config: MatchConfig) -> Self {
        let config = config.sanitized();
        Self {
            shot: ShotController::new(&config),
            state: MatchState::new(),
            run: None,
            reported_pots: 0,
            ball_ids: Vec::new(),
            power_ids: Vec::new(),
            hud: None,
            win_id: None,
            config,
        }
    }

    /// Build from a JSON config, keeping defaults when it does not parse.
    pub fn from_json(json: &str) -> Self {
        match MatchConfig::from_json(json) {
            Ok(config) => Self::with_config(config),
            Err(err) => {
                log::warn!("invalid match config, using defaults: {err}");
                Self::new()
            }
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn shot(&self) -> &ShotController {
        &self.shot
    }

    pub fn is_shot_running(&self) -> bool {
        self.run.is_some()
    }

    fn build_scene(&mut self, ctx: &mut EngineContext) {
        let palette = &self.config.palette;
        let (table, cushion, pocket) = (palette.table(), palette.cushion(), palette.pocket());
        let power_bar = palette.power_bar();
        let scene = &mut ctx.scene;

        scene.add(
            Drawable::rect(SURFACE.pos.as_vec2(), SURFACE.size.x as f32, SURFACE.size.y as f32)
                .with_tag("table")
                .with_colour(table)
                .with_layer(LAYER_TABLE),
        );

        let cue = self.state.balls[CUE].pos;
        let aim = scene.add(
            Drawable::line(cue.as_vec2(), self.shot.preview_end(cue).as_vec2(), AIM_WIDTH)
                .with_arrow(AIM_ARROW)
                .with_tag("aim")
                .with_colour(Colour::WHITE)
                .with_layer(LAYER_AIM),
        );

        self.ball_ids = self
            .state
            .balls
            .iter()
            .map(|ball| {
                Some(scene.add(
                    Drawable::circle(ball.pos.as_vec2(), ball.radius as f32)
                        .with_tag(TAG_BALL)
                        .with_colour(ball.colour.colour())
                        .with_layer(ball.layer),
                ))
            })
            .collect();

        for rail in self.state.table.cushions() {
            scene.add(
                Drawable::rect(rail.pos.as_vec2(), rail.size.x as f32, rail.size.y as f32)
                    .with_tag("cushion")
                    .with_colour(cushion)
                    .with_layer(LAYER_CUSHION),
            );
        }

        scene.add(
            Drawable::rect(POWER_BAR_POS, POWER_BAR_SIZE.x, POWER_BAR_SIZE.y)
                .with_tag("power_bar")
                .with_colour(power_bar)
                .with_layer(LAYER_HUD),
        );
        self.power_ids.clear();
        self.sync_power_bar(ctx);

        let scene = &mut ctx.scene;
        let label = |text: &str, size: f32, pos: glam::Vec2| {
            Drawable::label(text, size, pos).with_tag("hud").with_layer(LAYER_HUD)
        };
        scene.add(label("Power Bar", POWER_LABEL_SIZE, POWER_LABEL));
        let turn = scene.add(label("", HUD_TEXT_SIZE, TURN_LABEL));
        scene.add(label("Player 1 = ", HUD_TEXT_SIZE, PLAYER_ONE_LABEL));
        scene.add(label("Player 2 = ", HUD_TEXT_SIZE, PLAYER_TWO_LABEL));
        let player_one = scene.add(label(
            "",
            HUD_TEXT_SIZE,
            glam::Vec2::new(GROUP_VALUE_X, PLAYER_ONE_LABEL.y),
        ));
        let player_two = scene.add(label(
            "",
            HUD_TEXT_SIZE,
            glam::Vec2::new(GROUP_VALUE_X, PLAYER_TWO_LABEL.y),
        ));
        scene.add(label("Turn number = ", HUD_TEXT_SIZE, TURN_NUMBER_LABEL));
        let turn_number = scene.add(label("", HUD_TEXT_SIZE, TURN_NUMBER_VALUE));

        for hole in &self.state.table.pockets {
            scene.add(
                Drawable::circle(hole.pos.as_vec2(), hole.radius as f32)
                    .with_tag("pocket")
                    .with_colour(pocket)
                    .with_layer(hole.layer),
            );
        }
        for mouth in &self.state.table.mouths {
            scene.add(
                Drawable::rect(mouth.pos.as_vec2(), mouth.size.x as f32, mouth.size.y as f32)
                    .with_tag("pocket_mouth")
                    .with_colour(pocket)
                    .with_layer(LAYER_POCKET),
            );
        }

        self.hud = Some(Hud {
            turn,
            player_one,
            player_two,
            turn_number,
            aim,
        });
        self.win_id = None;
    }

    /// One segment per power level.
    fn sync_power_bar(&mut self, ctx: &mut EngineContext) {
        let power = self.shot.power() as usize;
        while self.power_ids.len() < power {
            let index = self.power_ids.len() as u32;
            let id = ctx.scene.add(
                Drawable::rect(
                    layout::power_segment_pos(index),
                    POWER_SEGMENT_SIZE.x,
                    POWER_SEGMENT_SIZE.y,
                )
                .with_tag(TAG_POWER)
                .with_colour(layout::power_segment_colour(index))
                .with_layer(LAYER_HUD.above()),
            );
            self.power_ids.push(id);
        }
        while self.power_ids.len() > power {
            if let Some(id) = self.power_ids.pop() {
                ctx.scene.remove(id);
            }
        }
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputState) {
        if self.state.is_over() {
            if input.just_pressed(Key::Enter) {
                self.restart(ctx);
            } else if input.just_pressed(Key::Space) {
                log::warn!("match is over, press Enter for a new one");
            }
            return;
        }

        if input.just_pressed(Key::Up) && self.shot.increase_power() {
            log::debug!("power {}", self.shot.power());
        }
        if input.just_pressed(Key::Down) && self.shot.decrease_power() {
            log::debug!("power {}", self.shot.power());
        }
        if input.just_pressed(Key::Right) {
            self.shot.rotate_clockwise();
        }
        if input.just_pressed(Key::Left) {
            self.shot.rotate_anticlockwise();
        }
        if input.just_pressed(Key::Z) {
            let fine = self.shot.toggle_fine();
            log::debug!("fine aim {}", if fine { "on" } else { "off" });
        }
        if input.just_pressed(Key::Shift) {
            let length = self.shot.cycle_line_length();
            log::debug!("preview length {length}");
        }
        if input.just_pressed(Key::Space) {
            self.shoot(ctx);
        }
    }

    fn shoot(&mut self, ctx: &mut EngineContext) {
        let velocity = self.shot.cue_velocity();
        let Some(run) = ShotRun::start(&mut self.state, velocity, self.config.frame_budget) else {
            return;
        };
        self.run = Some(run);
        self.reported_pots = 0;
        if !self.config.animate_shots {
            self.advance_shot(ctx, self.config.frame_budget);
        }
    }

    fn advance_shot(&mut self, ctx: &mut EngineContext, frames: u32) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let summary = run.advance(&mut self.state, frames);

        for pot in &run.pots()[self.reported_pots..] {
            ctx.emit_event(GameEvent::new(
                game_events::POT,
                pot.index as f32,
                pot.colour.code(),
                pot.frame as f32,
            ));
        }
        self.reported_pots = run.pots().len();

        if let Some(summary) = summary {
            self.run = None;
            self.finish_turn(ctx, &summary);
        }
    }

    fn finish_turn(&mut self, ctx: &mut EngineContext, summary: &TurnSummary) {
        ctx.emit_event(GameEvent::new(
            game_events::TURN_RESOLVED,
            summary.next.number() as f32,
            if summary.foul { 1.0 } else { 0.0 },
            summary.turn_number as f32,
        ));
        if let Some(winner) = summary.winner {
            ctx.emit_event(GameEvent::new(
                game_events::MATCH_WON,
                winner.number() as f32,
                0.0,
                0.0,
            ));
        }
    }

    fn restart(&mut self, ctx: &mut EngineContext) {
        log::info!("new match");
        self.state = MatchState::new();
        self.shot = ShotController::new(&self.config);
        self.run = None;
        self.reported_pots = 0;
        ctx.scene.clear();
        self.build_scene(ctx);
    }

    /// Mirror the match into the scene.
    fn sync_scene(&mut self, ctx: &mut EngineContext) {
        for (ball, slot) in self.state.balls.iter().zip(self.ball_ids.iter_mut()) {
            let Some(id) = *slot else {
                continue;
            };
            if ball.active {
                if let Some(drawable) = ctx.scene.get_mut(id) {
                    drawable.pos = ball.pos.as_vec2();
                }
            } else {
                ctx.scene.remove(id);
                *slot = None;
            }
        }

        self.sync_power_bar(ctx);

        let Some(hud) = &self.hud else {
            return;
        };

        let cue = self.state.balls[CUE].pos;
        if let Some(aim) = ctx.scene.get_mut(hud.aim) {
            aim.set_segment(cue.as_vec2(), self.shot.preview_end(cue).as_vec2());
        }

        let active = self.state.active_player();
        set_label(ctx, hud.turn, format!("Player {}'s Turn", active.number()), Colour::WHITE);
        for (id, player) in [(hud.player_one, PlayerId::One), (hud.player_two, PlayerId::Two)] {
            let group = self.state.group(player);
            set_label(ctx, id, group.label().to_owned(), group_colour(group));
        }
        set_label(ctx, hud.turn_number, self.state.turn_number.to_string(), Colour::WHITE);

        if let (Some(winner), None) = (self.state.winner, self.win_id) {
            self.win_id = Some(
                ctx.scene.add(
                    Drawable::label(
                        format!("Player {} wins!", winner.number()),
                        HUD_TEXT_SIZE,
                        WIN_LABEL,
                    )
                    .with_tag("win")
                    .with_layer(LAYER_HUD),
                ),
            );
        }
    }
}

fn set_label(ctx: &mut EngineContext, id: DrawId, text: String, colour: Colour) {
    if let Some(label) = ctx.scene.get_mut(id) {
        label.set_text(text);
        label.colour = colour;
    }
}

fn group_colour(group: ColourGroup) -> Colour {
    match group {
        ColourGroup::Unassigned => Colour::WHITE,
        // Black text would vanish on the page background.
        ColourGroup::Black => Colour::LIGHT_GREY,
        other => other.colour(),
    }
}

impl Default for PoolGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for PoolGame {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.build_scene(ctx);
        self.sync_scene(ctx);
        log::info!(
            "match ready: {} balls, frame budget {}",
            self.state.balls.len(),
            self.config.frame_budget
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) {
        if self.run.is_some() {
            self.advance_shot(ctx, self.config.frames_per_tick);
        } else {
            self.handle_input(ctx, input);
        }
        self.sync_scene(ctx);
    }
}
