//! The fixed board: rack, table, power bar and HUD placement.

use arena::{Colour, Layer};
use glam::{DVec2, Vec2};

use crate::entities::{Ball, BallColour, Rect, Table};

pub const BALL_RADIUS: f64 = 10.0;
/// Pocket markers are 40px across.
pub const POCKET_RADIUS: f64 = 20.0;

pub const CUE_SPOT: DVec2 = DVec2::new(400.0, 450.0);
pub const BLACK_SPOT: DVec2 = DVec2::new(1000.0, 450.0);

pub const RED_SPOTS: [DVec2; 7] = [
    DVec2::new(960.0, 450.0),
    DVec2::new(980.0, 440.0),
    DVec2::new(1000.0, 430.0),
    DVec2::new(1020.0, 460.0),
    DVec2::new(1020.0, 420.0),
    DVec2::new(1040.0, 430.0),
    DVec2::new(1040.0, 490.0),
];

pub const YELLOW_SPOTS: [DVec2; 7] = [
    DVec2::new(980.0, 460.0),
    DVec2::new(1000.0, 470.0),
    DVec2::new(1020.0, 440.0),
    DVec2::new(1020.0, 480.0),
    DVec2::new(1040.0, 470.0),
    DVec2::new(1040.0, 450.0),
    DVec2::new(1040.0, 410.0),
];

pub const SURFACE: Rect = Rect::new(50.0, 50.0, 1400.0, 800.0);
pub const CUSHION_TOP: Rect = Rect::new(50.0, 50.0, 1400.0, 20.0);
pub const CUSHION_LEFT: Rect = Rect::new(50.0, 50.0, 20.0, 800.0);
pub const CUSHION_BOTTOM: Rect = Rect::new(50.0, 830.0, 1400.0, 20.0);
pub const CUSHION_RIGHT: Rect = Rect::new(1430.0, 50.0, 20.0, 800.0);

/// Corners first, then the two middle-rail pockets.
pub const POCKET_CENTRES: [DVec2; 6] = [
    DVec2::new(80.0, 80.0),
    DVec2::new(1420.0, 80.0),
    DVec2::new(80.0, 820.0),
    DVec2::new(1420.0, 820.0),
    DVec2::new(750.0, 80.0),
    DVec2::new(750.0, 820.0),
];

pub const POCKET_MOUTHS: [Rect; 10] = [
    Rect::new(60.0, 60.0, 40.0, 20.0),
    Rect::new(60.0, 60.0, 20.0, 40.0),
    Rect::new(1400.0, 60.0, 40.0, 20.0),
    Rect::new(1420.0, 60.0, 20.0, 40.0),
    Rect::new(60.0, 820.0, 40.0, 20.0),
    Rect::new(60.0, 800.0, 20.0, 40.0),
    Rect::new(1400.0, 820.0, 40.0, 20.0),
    Rect::new(1420.0, 800.0, 20.0, 40.0),
    Rect::new(730.0, 60.0, 40.0, 20.0),
    Rect::new(730.0, 820.0, 40.0, 20.0),
];

// Draw layers, back to front
pub const LAYER_TABLE: Layer = Layer(0);
pub const LAYER_CUSHION: Layer = Layer(1);
pub const LAYER_POCKET: Layer = Layer(2);
pub const LAYER_BALL: Layer = Layer(3);
pub const LAYER_AIM: Layer = Layer(4);
pub const LAYER_HUD: Layer = Layer(5);

// Power bar
pub const POWER_BAR_POS: Vec2 = Vec2::new(1490.0, 50.0);
pub const POWER_BAR_SIZE: Vec2 = Vec2::new(100.0, 800.0);
pub const POWER_SEGMENT_X: f32 = 1500.0;
pub const POWER_SEGMENT_BASE_Y: f32 = 815.0;
pub const POWER_SEGMENT_STEP: f32 = 40.0;
pub const POWER_SEGMENT_SIZE: Vec2 = Vec2::new(80.0, 30.0);

// HUD
pub const POWER_LABEL: Vec2 = Vec2::new(1490.0, 35.0);
pub const POWER_LABEL_SIZE: f32 = 20.0;
pub const HUD_TEXT_SIZE: f32 = 30.0;
pub const TURN_LABEL: Vec2 = Vec2::new(50.0, 900.0);
pub const PLAYER_ONE_LABEL: Vec2 = Vec2::new(50.0, 940.0);
pub const PLAYER_TWO_LABEL: Vec2 = Vec2::new(50.0, 980.0);
pub const GROUP_VALUE_X: f32 = 200.0;
pub const TURN_NUMBER_LABEL: Vec2 = Vec2::new(350.0, 900.0);
pub const TURN_NUMBER_VALUE: Vec2 = Vec2::new(565.0, 900.0);
pub const WIN_LABEL: Vec2 = Vec2::new(800.0, 900.0);

pub const AIM_WIDTH: f32 = 2.0;
pub const AIM_ARROW: f32 = 5.0;

pub const WORLD_WIDTH: f32 = 1600.0;
pub const WORLD_HEIGHT: f32 = 1000.0;

/// The 16 balls in rack order: cue, black, seven reds, seven yellows.
pub fn rack() -> Vec<Ball> {
    let mut balls = Vec::with_capacity(16);
    balls.push(Ball::new(CUE_SPOT, BALL_RADIUS, BallColour::White).with_layer(LAYER_BALL));
    balls.push(Ball::new(BLACK_SPOT, BALL_RADIUS, BallColour::Black).with_layer(LAYER_BALL));
    for pos in RED_SPOTS {
        balls.push(Ball::new(pos, BALL_RADIUS, BallColour::Red).with_layer(LAYER_BALL));
    }
    for pos in YELLOW_SPOTS {
        balls.push(Ball::new(pos, BALL_RADIUS, BallColour::Yellow).with_layer(LAYER_BALL));
    }
    balls
}

pub fn table() -> Table {
    Table {
        surface: SURFACE,
        top: CUSHION_TOP,
        left: CUSHION_LEFT,
        bottom: CUSHION_BOTTOM,
        right: CUSHION_RIGHT,
        pockets: POCKET_CENTRES
            .iter()
            .map(|&c| Ball::new(c, POCKET_RADIUS, BallColour::Neutral).with_layer(LAYER_POCKET))
            .collect(),
        mouths: POCKET_MOUTHS.to_vec(),
    }
}

/// Top-left corner of power segment `index` (0-based, bottom up).
pub fn power_segment_pos(index: u32) -> Vec2 {
    Vec2::new(
        POWER_SEGMENT_X,
        POWER_SEGMENT_BASE_Y - POWER_SEGMENT_STEP * index as f32,
    )
}

/// Segments 1-5 are green, 6-10 orange, the rest red.
pub fn power_segment_colour(index: u32) -> Colour {
    match index {
        0..=4 => Colour::GREEN,
        5..=9 => Colour::ORANGE,
        _ => Colour::RED,
    }
}
