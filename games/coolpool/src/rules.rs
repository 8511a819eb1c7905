//! Fouls, colour assignment, pots and turn sequencing.

use crate::entities::{BallColour, ColourGroup, PlayerId};
use crate::state::{MatchState, TurnFlags, CUE};

/// Outcome of one resolved shot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSummary {
    pub shooter: PlayerId,
    /// Colours potted during the shot, in pot order.
    pub potted: Vec<BallColour>,
    pub foul: bool,
    pub queue: [PlayerId; 2],
    pub next: PlayerId,
    pub winner: Option<PlayerId>,
    /// Turn counter after the shot.
    pub turn_number: u32,
}

/// Record a contact between balls `a` and `b`.
///
/// The cue ball's first contact of the shot must be the shooter's group
/// colour once the shooter has one, or the black once that group is empty.
pub fn register_contact(state: &mut MatchState, a: usize, b: usize) {
    state.flags.first_collision = true;

    if state.flags.first_struck.is_some() {
        return;
    }
    let struck = match (a, b) {
        (CUE, other) | (other, CUE) => other,
        _ => return,
    };
    let Some(colour) = state.balls.get(struck).map(|b| b.colour) else {
        return;
    };
    state.flags.first_struck = Some(colour);

    let shooter = state.active_player();
    let target = if has_cleared(state, shooter) {
        Some(BallColour::Black)
    } else {
        state.group(shooter).ball_colour()
    };
    if let Some(target) = target {
        if colour != target {
            log::debug!(
                "player {} hit {} first, wanted {}",
                shooter.number(),
                colour.name(),
                target.name()
            );
            state.flags.foul_one_turn = true;
        }
    }
}

/// True when this pot of an object ball is the first of the match.
pub fn is_first_pot(state: &MatchState) -> bool {
    !state.any_potted(BallColour::Red)
        && !state.any_potted(BallColour::Yellow)
        && state.players.iter().all(|p| !p.group.is_assigned())
}

/// Give `potter` the `colour` group and the opponent the other one.
pub fn assign_groups(state: &mut MatchState, potter: PlayerId, colour: BallColour) {
    let Some(group) = ColourGroup::of(colour) else {
        return;
    };
    let Some(other) = group.opposite() else {
        return;
    };
    state.player_mut(potter).group = group;
    state.player_mut(potter.other()).group = other;
    log::info!(
        "player {} takes {}, player {} takes {}",
        potter.number(),
        group.label(),
        potter.other().number(),
        other.label()
    );
}

/// Promote every player whose group has been cleared to the black.
///
/// The opponent can pot the last ball of your group, so both players are
/// checked, the shooter first.
pub fn check_last_of_group(state: &mut MatchState) {
    let shooter = state.active_player();
    for id in [shooter, shooter.other()] {
        let group = state.group(id);
        if !matches!(group, ColourGroup::Red | ColourGroup::Yellow) {
            continue;
        }
        if has_cleared(state, id) {
            state.player_mut(id).group = ColourGroup::Black;
            log::info!("player {} is on the black", id.number());
        }
    }
}

/// True when `id` has no object balls of their own left to pot.
pub fn has_cleared(state: &MatchState, id: PlayerId) -> bool {
    match state.group(id) {
        ColourGroup::Black => true,
        ColourGroup::Unassigned => false,
        group => group
            .ball_colour()
            .is_some_and(|colour| state.remaining(colour) == 0),
    }
}

/// Apply the rules for ball `idx` entering a pocket. Returns its colour.
pub fn resolve_pot(state: &mut MatchState, idx: usize) -> Option<BallColour> {
    let colour = state.balls.get(idx)?.colour;
    let shooter = state.active_player();

    match colour {
        BallColour::White => {
            state.flags.foul_one_turn = true;
            let spot = state.cue_spot;
            let cue = &mut state.balls[idx];
            cue.pos = spot;
            cue.stop();
            log::info!("cue ball potted, respotted");
        }
        BallColour::Black => {
            state.balls[idx].active = false;
            state.flags.foul_terminal = !has_cleared(state, shooter);
            let winner = if state.flags.foul_terminal {
                shooter.other()
            } else {
                shooter
            };
            if state.winner.is_none() {
                state.winner = Some(winner);
                log::info!("black potted by player {}, player {} wins", shooter.number(), winner.number());
            }
        }
        BallColour::Red | BallColour::Yellow => {
            let first = is_first_pot(state);
            state.balls[idx].active = false;
            if first {
                assign_groups(state, shooter, colour);
            }
            check_last_of_group(state);
            state.flags.double_shot = true;
            log::info!("player {} potted {}", shooter.number(), colour.name());
        }
        BallColour::Neutral => return None,
    }
    Some(colour)
}

/// Who shoots next, by priority.
pub fn next_queue(active: PlayerId, queue: [PlayerId; 2], flags: &TurnFlags) -> [PlayerId; 2] {
    let other = active.other();
    if flags.double_shot && !flags.foul_one_turn {
        [active, other]
    } else if queue[0] == queue[1] && !flags.foul_one_turn {
        [active, other]
    } else if !flags.foul_one_turn {
        [other, active]
    } else {
        [other, other]
    }
}

/// Hand the table to `queue[0]`, bump the turn counter and reset the flags.
pub fn end_turn(state: &mut MatchState) {
    let next = state.queue[0];
    for player in &mut state.players {
        player.active = player.id == next;
    }
    state.turn_number += 1;
    state.flags = TurnFlags::default();
    state.stop_all();
}

/// Close the shot after the last frame.
pub fn finish_shot(state: &mut MatchState, potted: Vec<BallColour>) -> TurnSummary {
    let shooter = state.active_player();
    if !state.flags.first_collision {
        log::debug!("player {} missed every ball", shooter.number());
        state.flags.foul_one_turn = true;
    }

    let foul = state.flags.foul_one_turn;
    state.queue = next_queue(shooter, state.queue, &state.flags);
    end_turn(state);

    let summary = TurnSummary {
        shooter,
        potted,
        foul,
        queue: state.queue,
        next: state.queue[0],
        winner: state.winner,
        turn_number: state.turn_number,
    };
    log::info!(
        "turn {} resolved: foul={} next=player {} queue={:?}",
        summary.turn_number,
        summary.foul,
        summary.next.number(),
        summary.queue
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BLACK;
    use glam::DVec2;

    use crate::entities::PlayerId::{One, Two};

    fn red(state: &MatchState) -> usize {
        state.balls.iter().position(|b| b.colour == BallColour::Red).unwrap()
    }

    fn yellow(state: &MatchState) -> usize {
        state.balls.iter().position(|b| b.colour == BallColour::Yellow).unwrap()
    }

    fn flags(double_shot: bool, foul: bool) -> TurnFlags {
        TurnFlags {
            double_shot,
            foul_one_turn: foul,
            ..TurnFlags::default()
        }
    }

    #[test]
    fn queue_priority() {
        let normal = [One, Two];
        let penalty = [Two, Two];
        assert_eq!(next_queue(One, normal, &flags(true, false)), [One, Two]);
        assert_eq!(next_queue(One, normal, &flags(false, true)), [Two, Two]);
        assert_eq!(next_queue(One, normal, &flags(false, false)), [Two, One]);
        assert_eq!(next_queue(Two, penalty, &flags(false, false)), [Two, One]);
        assert_eq!(next_queue(Two, penalty, &flags(true, true)), [One, One]);
    }

    #[test]
    fn first_object_pot_assigns_both_groups() {
        let mut state = MatchState::new();
        let idx = yellow(&state);
        assert!(is_first_pot(&state));
        assert_eq!(resolve_pot(&mut state, idx), Some(BallColour::Yellow));
        assert_eq!(state.group(One), ColourGroup::Yellow);
        assert_eq!(state.group(Two), ColourGroup::Red);
        assert!(!state.balls[idx].active);
        assert!(state.flags.double_shot);
        assert!(!is_first_pot(&state));
    }

    #[test]
    fn later_pots_keep_groups() {
        let mut state = MatchState::new();
        let r = red(&state);
        resolve_pot(&mut state, r);
        let y = yellow(&state);
        resolve_pot(&mut state, y);
        assert_eq!(state.group(One), ColourGroup::Red);
        assert_eq!(state.group(Two), ColourGroup::Yellow);
    }

    #[test]
    fn cue_pot_fouls_and_respots() {
        let mut state = MatchState::new();
        state.balls[CUE].pos = DVec2::new(85.0, 85.0);
        state.balls[CUE].velocity = DVec2::new(-3.0, -3.0);
        assert_eq!(resolve_pot(&mut state, CUE), Some(BallColour::White));
        assert!(state.flags.foul_one_turn);
        assert!(state.balls[CUE].active);
        assert_eq!(state.balls[CUE].pos, DVec2::new(400.0, 450.0));
        assert_eq!(state.balls[CUE].velocity, DVec2::ZERO);
    }

    #[test]
    fn early_black_loses() {
        let mut state = MatchState::new();
        resolve_pot(&mut state, BLACK);
        assert!(state.flags.foul_terminal);
        assert_eq!(state.winner, Some(Two));
        assert!(!state.balls[BLACK].active);
    }

    #[test]
    fn black_after_clearing_wins() {
        let mut state = MatchState::new();
        state.player_mut(One).group = ColourGroup::Red;
        state.player_mut(Two).group = ColourGroup::Yellow;
        let reds: Vec<usize> = (0..state.balls.len())
            .filter(|&i| state.balls[i].colour == BallColour::Red)
            .collect();
        for idx in reds {
            resolve_pot(&mut state, idx);
        }
        assert_eq!(state.group(One), ColourGroup::Black);
        resolve_pot(&mut state, BLACK);
        assert!(!state.flags.foul_terminal);
        assert_eq!(state.winner, Some(One));
    }

    #[test]
    fn group_cleared_by_opponent_still_counts() {
        let mut state = MatchState::new();
        state.player_mut(One).group = ColourGroup::Red;
        state.player_mut(Two).group = ColourGroup::Yellow;
        for ball in state.balls.iter_mut().filter(|b| b.colour == BallColour::Red) {
            ball.active = false;
        }
        assert!(has_cleared(&state, One));
        assert!(!has_cleared(&state, Two));
    }

    #[test]
    fn wrong_ball_first_is_a_foul() {
        let mut state = MatchState::new();
        state.player_mut(One).group = ColourGroup::Red;
        state.player_mut(Two).group = ColourGroup::Yellow;
        let y = yellow(&state);
        register_contact(&mut state, CUE, y);
        assert!(state.flags.first_collision);
        assert!(state.flags.foul_one_turn);

        // Only the first contact counts.
        let mut state = MatchState::new();
        state.player_mut(One).group = ColourGroup::Red;
        let r = red(&state);
        register_contact(&mut state, CUE, r);
        register_contact(&mut state, y, CUE);
        assert!(!state.flags.foul_one_turn);
        assert_eq!(state.flags.first_struck, Some(BallColour::Red));
    }

    #[test]
    fn black_is_the_target_once_the_group_is_gone() {
        let mut state = MatchState::new();
        state.player_mut(One).group = ColourGroup::Red;
        state.player_mut(Two).group = ColourGroup::Yellow;
        for ball in state.balls.iter_mut().filter(|b| b.colour == BallColour::Red) {
            ball.active = false;
        }
        register_contact(&mut state, CUE, BLACK);
        assert!(!state.flags.foul_one_turn);
        assert_eq!(state.flags.first_struck, Some(BallColour::Black));

        // A yellow is now the wrong ball for player one.
        let mut state = MatchState::new();
        state.player_mut(One).group = ColourGroup::Black;
        state.player_mut(Two).group = ColourGroup::Yellow;
        let y = yellow(&state);
        register_contact(&mut state, CUE, y);
        assert!(state.flags.foul_one_turn);
    }

    #[test]
    fn opponent_potting_your_last_ball_puts_you_on_the_black() {
        let mut state = MatchState::new();
        state.player_mut(One).group = ColourGroup::Red;
        state.player_mut(Two).group = ColourGroup::Yellow;
        let reds: Vec<usize> = (0..state.balls.len())
            .filter(|&i| state.balls[i].colour == BallColour::Red)
            .collect();
        let (last, rest) = reds.split_last().unwrap();
        for &idx in rest {
            state.balls[idx].active = false;
        }

        // Player two pots the last red by accident.
        state.queue = [Two, One];
        end_turn(&mut state);
        resolve_pot(&mut state, *last);
        assert_eq!(state.group(One), ColourGroup::Black);
        assert_eq!(state.group(Two), ColourGroup::Yellow);

        // Back at the table, player one plays the black cleanly.
        state.queue = [One, Two];
        end_turn(&mut state);
        register_contact(&mut state, CUE, BLACK);
        assert!(!state.flags.foul_one_turn);
        resolve_pot(&mut state, BLACK);
        assert_eq!(state.winner, Some(One));
    }

    #[test]
    fn unassigned_shooter_cannot_hit_the_wrong_ball() {
        let mut state = MatchState::new();
        register_contact(&mut state, CUE, BLACK);
        assert!(!state.flags.foul_one_turn);
    }

    #[test]
    fn object_contacts_do_not_set_first_struck() {
        let mut state = MatchState::new();
        let (r, y) = (red(&state), yellow(&state));
        register_contact(&mut state, r, y);
        assert!(state.flags.first_collision);
        assert_eq!(state.flags.first_struck, None);
    }

    #[test]
    fn full_miss_gives_opponent_two_visits() {
        let mut state = MatchState::new();
        let summary = finish_shot(&mut state, Vec::new());
        assert!(summary.foul);
        assert_eq!(summary.queue, [Two, Two]);
        assert_eq!(state.active_player(), Two);
        assert_eq!(state.turn_number, 1);
        assert_eq!(state.flags, TurnFlags::default());

        // Penalty visit one: a clean shot keeps the table.
        state.flags.first_collision = true;
        let summary = finish_shot(&mut state, Vec::new());
        assert_eq!(summary.queue, [Two, One]);
        assert_eq!(summary.next, Two);
    }

    #[test]
    fn potting_keeps_the_table() {
        let mut state = MatchState::new();
        let r = red(&state);
        register_contact(&mut state, CUE, r);
        let colour = resolve_pot(&mut state, r).unwrap();
        let summary = finish_shot(&mut state, vec![colour]);
        assert!(!summary.foul);
        assert_eq!(summary.queue, [One, Two]);
        assert_eq!(summary.potted, vec![BallColour::Red]);
        assert_eq!(state.active_player(), One);
    }

    #[test]
    fn end_turn_stops_every_ball() {
        let mut state = MatchState::new();
        state.balls[3].velocity = DVec2::new(1.0, 2.0);
        state.queue = [Two, One];
        end_turn(&mut state);
        assert!(!state.any_moving());
        assert!(state.player(Two).active);
        assert!(!state.player(One).active);
    }
}
