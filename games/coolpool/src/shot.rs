//! Aim, power and the frame loop that plays a shot out.
//!
//! Two drivers share [`ShotRun`]: [`take_shot`] plays every frame at once,
//! while the game can call [`ShotRun::advance`] a few frames per tick to show
//! the balls moving. Both give the same outcome.

use std::f64::consts::PI;

use glam::DVec2;

use crate::config::MatchConfig;
use crate::entities::BallColour;
use crate::physics;
use crate::rules::{self, TurnSummary};
use crate::state::{MatchState, CUE};

/// Aim units per half turn.
const UNITS_PER_PI: f64 = 90.0;
/// One fine step is a quarter of a coarse step.
const FINE_STEP: f64 = 0.25;

/// Aim, power and preview settings driven by the player.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotController {
    coarse: i32,
    fine: i32,
    fine_presses: u32,
    power: u32,
    max_power: u32,
    line_lengths: Vec<f64>,
    line_index: usize,
    reference_length: f64,
    velocity_scale: f64,
}

impl ShotController {
    pub fn new(config: &MatchConfig) -> Self {
        let line_lengths = if config.line_lengths.is_empty() {
            MatchConfig::default().line_lengths
        } else {
            config.line_lengths.clone()
        };
        Self {
            coarse: 0,
            fine: 0,
            fine_presses: 0,
            power: 1,
            max_power: config.max_power.max(1),
            line_lengths,
            line_index: 0,
            reference_length: config.shot_reference_length,
            velocity_scale: config.velocity_scale,
        }
    }

    pub fn fine_enabled(&self) -> bool {
        self.fine_presses % 2 == 1
    }

    /// Flip between coarse and fine rotation. Returns the new fine state.
    pub fn toggle_fine(&mut self) -> bool {
        self.fine_presses = self.fine_presses.wrapping_add(1);
        self.fine_enabled()
    }

    pub fn rotate_clockwise(&mut self) {
        self.rotate(1);
    }

    pub fn rotate_anticlockwise(&mut self) {
        self.rotate(-1);
    }

    fn rotate(&mut self, step: i32) {
        if self.fine_enabled() {
            self.fine += step;
        } else {
            self.coarse += step;
        }
    }

    pub fn coarse(&self) -> i32 {
        self.coarse
    }

    pub fn fine(&self) -> i32 {
        self.fine
    }

    /// Aim angle in radians. Positive is clockwise on screen (y points down).
    pub fn angle(&self) -> f64 {
        (self.coarse as f64 + FINE_STEP * self.fine as f64) / UNITS_PER_PI * PI
    }

    pub fn direction(&self) -> DVec2 {
        DVec2::from_angle(self.angle())
    }

    pub fn power(&self) -> u32 {
        self.power
    }

    pub fn max_power(&self) -> u32 {
        self.max_power
    }

    /// Returns false when already at maximum.
    pub fn increase_power(&mut self) -> bool {
        if self.power >= self.max_power {
            return false;
        }
        self.power += 1;
        true
    }

    /// Returns false when already at 1.
    pub fn decrease_power(&mut self) -> bool {
        if self.power <= 1 {
            return false;
        }
        self.power -= 1;
        true
    }

    pub fn line_length(&self) -> f64 {
        self.line_lengths[self.line_index % self.line_lengths.len()]
    }

    /// Step to the next preview length and return it.
    pub fn cycle_line_length(&mut self) -> f64 {
        self.line_index = (self.line_index + 1) % self.line_lengths.len();
        self.line_length()
    }

    /// Tip of the aim preview for a cue ball at `cue`.
    pub fn preview_end(&self, cue: DVec2) -> DVec2 {
        cue + self.direction() * self.line_length()
    }

    /// Per-frame cue velocity for the current aim and power.
    pub fn cue_velocity(&self) -> DVec2 {
        self.direction() * self.reference_length * self.velocity_scale * self.power as f64
    }
}

/// A ball that dropped during a shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pot {
    pub index: usize,
    pub colour: BallColour,
    pub frame: u32,
}

/// A shot in progress.
#[derive(Debug, Clone)]
pub struct ShotRun {
    frame: u32,
    budget: u32,
    pots: Vec<Pot>,
    resolved: bool,
}

impl ShotRun {
    /// Strike the cue ball. Refused once the match has a winner.
    pub fn start(state: &mut MatchState, velocity: DVec2, budget: u32) -> Option<Self> {
        if state.is_over() {
            log::warn!("match already won, shot refused");
            return None;
        }
        let Some(cue) = state.balls.get_mut(CUE) else {
            log::warn!("no cue ball on the table, shot refused");
            return None;
        };
        cue.velocity = velocity;
        log::debug!(
            "player {} shoots at {:?}",
            state.active_player().number(),
            velocity
        );
        Some(Self {
            frame: 0,
            budget: budget.max(1),
            pots: Vec::new(),
            resolved: false,
        })
    }

    /// Play up to `frames` more frames. Returns the summary once, on the
    /// call that plays the last frame.
    pub fn advance(&mut self, state: &mut MatchState, frames: u32) -> Option<TurnSummary> {
        let end = self.frame.saturating_add(frames).min(self.budget);
        while self.frame < end {
            let report = physics::step_frame(state, self.frame, self.budget);
            for (a, b) in report.contacts {
                rules::register_contact(state, a, b);
            }
            for index in report.pots {
                if let Some(colour) = rules::resolve_pot(state, index) {
                    self.pots.push(Pot {
                        index,
                        colour,
                        frame: self.frame,
                    });
                }
            }
            self.frame += 1;
        }

        if self.is_finished() && !self.resolved {
            self.resolved = true;
            let potted = self.pots.iter().map(|p| p.colour).collect();
            return Some(rules::finish_shot(state, potted));
        }
        None
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= self.budget
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Pots so far, in order.
    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }
}

/// Play a whole shot at once.
pub fn take_shot(state: &mut MatchState, velocity: DVec2, budget: u32) -> Option<TurnSummary> {
    let mut run = ShotRun::start(state, velocity, budget)?;
    run.advance(state, budget)
}
