//! One fixed frame of ball motion.
//!
//! A shot runs for a fixed number of frames `F` (the frame budget). Frame `k`
//! bounces balls off the cushions, resolves touching pairs, moves every ball
//! by `velocity * (1 - k/F)` and finally tests every ball against the pockets.
//! Velocities themselves never decay; only the displacement is damped, so the
//! table is still by construction once the budget runs out.

use crate::math::{circles_overlap, deflect};
use crate::state::MatchState;

/// What happened during one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Ball index pairs `(i, j)` with `i < j` that were deflected.
    pub contacts: Vec<(usize, usize)>,
    /// Balls that touched a pocket marker.
    pub pots: Vec<usize>,
}

/// Displacement factor for frame `frame` of `budget`.
pub fn damping(frame: u32, budget: u32) -> f64 {
    1.0 - frame as f64 / budget as f64
}

/// Invert the velocity component of any ball at or past a cushion face.
pub fn bounce_cushions(state: &mut MatchState) {
    let bounds = state.table.bounds();
    for ball in state.balls.iter_mut().filter(|b| b.active) {
        if ball.pos.x <= bounds.left || ball.pos.x >= bounds.right {
            ball.velocity.x = -ball.velocity.x;
        }
        if ball.pos.y <= bounds.top || ball.pos.y >= bounds.bottom {
            ball.velocity.y = -ball.velocity.y;
        }
    }
}

/// Deflect every touching pair of active balls where at least one is moving.
pub fn collide(state: &mut MatchState) -> Vec<(usize, usize)> {
    let mut contacts = Vec::new();
    let count = state.balls.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let (a, b) = (&state.balls[i], &state.balls[j]);
            if !a.active || !b.active {
                continue;
            }
            if !a.is_moving() && !b.is_moving() {
                continue;
            }
            if !circles_overlap(a.pos, a.radius, b.pos, b.radius) {
                continue;
            }
            let (va, vb) = deflect(a.pos, a.velocity, b.pos, b.velocity);
            state.balls[i].velocity = va;
            state.balls[j].velocity = vb;
            contacts.push((i, j));
        }
    }
    contacts
}

/// Move every active ball by its damped velocity.
pub fn integrate(state: &mut MatchState, frame: u32, budget: u32) {
    let factor = damping(frame, budget);
    for ball in state.balls.iter_mut().filter(|b| b.active) {
        ball.pos += ball.velocity * factor;
    }
}

/// Active balls touching any pocket marker, each reported once.
pub fn detect_pots(state: &MatchState) -> Vec<usize> {
    state
        .balls
        .iter()
        .enumerate()
        .filter(|(_, ball)| {
            ball.active
                && state
                    .table
                    .pockets
                    .iter()
                    .any(|p| circles_overlap(ball.pos, ball.radius, p.pos, p.radius))
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Run frame `frame` (0-based) of a shot with `budget` frames.
pub fn step_frame(state: &mut MatchState, frame: u32, budget: u32) -> FrameReport {
    bounce_cushions(state);
    let contacts = collide(state);
    integrate(state, frame, budget);
    let pots = detect_pots(state);
    FrameReport { contacts, pots }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Ball, BallColour};
    use crate::layout::{self, BALL_RADIUS};
    use glam::DVec2;

    fn state_with(balls: Vec<Ball>) -> MatchState {
        MatchState::from_parts(balls, layout::table())
    }

    fn ball(x: f64, y: f64, colour: BallColour) -> Ball {
        Ball::new(DVec2::new(x, y), BALL_RADIUS, colour)
    }

    #[test]
    fn displacement_is_damped_linearly() {
        let mut state = state_with(vec![ball(400.0, 450.0, BallColour::White).with_velocity(DVec2::new(2.0, 0.0))]);
        integrate(&mut state, 0, 1000);
        assert_eq!(state.balls[0].pos.x, 402.0);
        integrate(&mut state, 500, 1000);
        assert_eq!(state.balls[0].pos.x, 403.0);
        integrate(&mut state, 1000, 1000);
        assert_eq!(state.balls[0].pos.x, 403.0);
        // Velocity is untouched.
        assert_eq!(state.balls[0].velocity, DVec2::new(2.0, 0.0));
    }

    #[test]
    fn damping_decreases_to_zero() {
        let mut last = f64::INFINITY;
        for k in 0..=1000 {
            let d = damping(k, 1000);
            assert!(d < last);
            last = d;
        }
        assert_eq!(damping(1000, 1000), 0.0);
    }

    #[test]
    fn cushions_reflect_each_axis_independently() {
        let mut state = state_with(vec![
            ball(70.0, 450.0, BallColour::White).with_velocity(DVec2::new(-1.0, 1.0)),
            ball(1431.0, 830.0, BallColour::Red).with_velocity(DVec2::new(2.0, 3.0)),
            ball(400.0, 450.0, BallColour::Yellow).with_velocity(DVec2::new(1.0, 1.0)),
        ]);
        bounce_cushions(&mut state);
        assert_eq!(state.balls[0].velocity, DVec2::new(1.0, 1.0));
        assert_eq!(state.balls[1].velocity, DVec2::new(-2.0, -3.0));
        assert_eq!(state.balls[2].velocity, DVec2::new(1.0, 1.0));
    }

    #[test]
    fn ball_on_the_cushion_keeps_reflecting() {
        // Each outward step is shorter than the inward one before it, so the
        // ball never leaves the left face and flips on every frame.
        let mut state = state_with(vec![
            ball(70.0, 450.0, BallColour::White).with_velocity(DVec2::new(0.5, 0.0)),
        ]);
        let mut sign = 1.0;
        for frame in 0..8 {
            step_frame(&mut state, frame, 1000);
            sign = -sign;
            assert_eq!(state.balls[0].velocity.x, 0.5 * sign, "frame {frame}");
            assert!(state.balls[0].pos.x <= 70.0, "frame {frame}");
        }
        assert_eq!(state.balls[0].velocity.y, 0.0);
    }

    #[test]
    fn inactive_balls_are_ignored() {
        let mut parked = ball(70.0, 450.0, BallColour::Red).with_velocity(DVec2::new(-1.0, 0.0));
        parked.active = false;
        let mut state = state_with(vec![ball(400.0, 450.0, BallColour::White), parked]);
        state.balls[0].pos = DVec2::new(62.0, 450.0);
        state.balls[0].velocity = DVec2::new(1.0, 0.0);
        bounce_cushions(&mut state);
        integrate(&mut state, 0, 1000);
        assert_eq!(state.balls[1].velocity, DVec2::new(-1.0, 0.0));
        assert_eq!(state.balls[1].pos, DVec2::new(70.0, 450.0));
        assert!(collide(&mut state).is_empty());
    }

    #[test]
    fn resting_touching_balls_are_not_contacts() {
        let mut state = state_with(vec![
            ball(400.0, 450.0, BallColour::White),
            ball(420.0, 450.0, BallColour::Red),
        ]);
        assert!(collide(&mut state).is_empty());
    }

    #[test]
    fn moving_ball_deflects_a_touching_ball() {
        let mut state = state_with(vec![
            ball(400.0, 450.0, BallColour::White).with_velocity(DVec2::new(3.0, 0.0)),
            ball(419.0, 450.0, BallColour::Red),
        ]);
        let contacts = collide(&mut state);
        assert_eq!(contacts, vec![(0, 1)]);
        assert!(state.balls[1].velocity.x > 0.0);
    }

    #[test]
    fn pocket_overlap_is_reported_once_per_ball() {
        // Touches the top-left corner pocket only.
        let mut state = state_with(vec![ball(100.0, 100.0, BallColour::White)]);
        assert_eq!(detect_pots(&state), vec![0]);
        state.balls[0].pos = DVec2::new(400.0, 450.0);
        assert!(detect_pots(&state).is_empty());
    }

    #[test]
    fn step_frame_reports_contacts_and_pots() {
        let mut state = state_with(vec![
            ball(400.0, 450.0, BallColour::White).with_velocity(DVec2::new(2.0, 0.0)),
            ball(420.0, 450.0, BallColour::Red),
            ball(105.0, 100.0, BallColour::Yellow).with_velocity(DVec2::new(-6.0, 0.0)),
        ]);
        let report = step_frame(&mut state, 0, 1000);
        assert_eq!(report.contacts, vec![(0, 1)]);
        assert_eq!(report.pots, vec![2]);
    }
}
