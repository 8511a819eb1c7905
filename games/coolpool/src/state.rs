//! The single aggregate the physics step and the rules engine work on.

use glam::DVec2;

use crate::entities::{Ball, BallColour, ColourGroup, Player, PlayerId, Table};
use crate::layout;

/// Index of the cue ball in [`MatchState::balls`].
pub const CUE: usize = 0;
/// Index of the black ball in [`MatchState::balls`].
pub const BLACK: usize = 1;

/// Per-turn flags. All reset when a turn resolves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnFlags {
    /// The opponent gets two visits.
    pub foul_one_turn: bool,
    /// Black potted before the shooter cleared their group.
    pub foul_terminal: bool,
    /// The shooter potted one of the object balls and keeps the table.
    pub double_shot: bool,
    /// Some ball touched another ball this shot.
    pub first_collision: bool,
    /// Colour of the first ball the cue ball touched this shot.
    pub first_struck: Option<BallColour>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    pub balls: Vec<Ball>,
    pub table: Table,
    pub players: [Player; 2],
    /// Next shooter, then the one after.
    pub queue: [PlayerId; 2],
    pub flags: TurnFlags,
    pub turn_number: u32,
    pub winner: Option<PlayerId>,
    /// Where a potted cue ball comes back.
    pub cue_spot: DVec2,
}

impl MatchState {
    /// A fresh match on the standard rack with player one to break.
    pub fn new() -> Self {
        Self::from_parts(layout::rack(), layout::table())
    }

    /// Build a match on arbitrary balls. Index 0 must be the cue ball.
    pub fn from_parts(balls: Vec<Ball>, table: Table) -> Self {
        let cue_spot = balls.get(CUE).map_or(layout::CUE_SPOT, |b| b.pos);
        let mut players = [Player::new(PlayerId::One), Player::new(PlayerId::Two)];
        players[0].active = true;
        Self {
            balls,
            table,
            players,
            queue: [PlayerId::One, PlayerId::Two],
            flags: TurnFlags::default(),
            turn_number: 0,
            winner: None,
            cue_spot,
        }
    }

    /// The player whose shot is being played.
    pub fn active_player(&self) -> PlayerId {
        self.players
            .iter()
            .find(|p| p.active)
            .map_or(self.queue[0], |p| p.id)
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    pub fn group(&self, id: PlayerId) -> ColourGroup {
        self.player(id).group
    }

    /// Number of balls of `colour` still on the table.
    pub fn remaining(&self, colour: BallColour) -> usize {
        self.balls
            .iter()
            .filter(|b| b.active && b.colour == colour)
            .count()
    }

    /// True when any ball of `colour` has been pocketed.
    pub fn any_potted(&self, colour: BallColour) -> bool {
        self.balls.iter().any(|b| !b.active && b.colour == colour)
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn any_moving(&self) -> bool {
        self.balls.iter().any(|b| b.active && b.is_moving())
    }

    pub fn stop_all(&mut self) {
        for ball in &mut self.balls {
            ball.stop();
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}
