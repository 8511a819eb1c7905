//! Balls, table geometry and players.

use arena::{Colour, Layer};
use glam::DVec2;

/// Colour tag of a ball. Pocket markers are `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallColour {
    White,
    Black,
    Red,
    Yellow,
    Neutral,
}

impl BallColour {
    /// Draw colour for the ball.
    pub fn colour(self) -> Colour {
        match self {
            Self::White => Colour::WHITE,
            Self::Black => Colour::BLACK,
            Self::Red => Colour::RED,
            Self::Yellow => Colour::YELLOW,
            Self::Neutral => Colour::DARK_GREY,
        }
    }

    /// Numeric code carried in game events.
    pub fn code(self) -> f32 {
        match self {
            Self::White => 0.0,
            Self::Black => 1.0,
            Self::Red => 2.0,
            Self::Yellow => 3.0,
            Self::Neutral => 4.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
            Self::Red => "Red",
            Self::Yellow => "Yellow",
            Self::Neutral => "Neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: DVec2,
    pub radius: f64,
    pub colour: BallColour,
    pub velocity: DVec2,
    /// False once pocketed. Inactive balls never move or collide.
    pub active: bool,
    pub layer: Layer,
}

impl Ball {
    pub fn new(pos: DVec2, radius: f64, colour: BallColour) -> Self {
        Self {
            pos,
            radius,
            colour,
            velocity: DVec2::ZERO,
            active: true,
            layer: Layer::DEFAULT,
        }
    }

    pub fn with_layer(mut self, layer: impl Into<Layer>) -> Self {
        self.layer = layer.into();
        self
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn is_moving(&self) -> bool {
        self.velocity != DVec2::ZERO
    }

    pub fn stop(&mut self) {
        self.velocity = DVec2::ZERO;
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    pub fn right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    pub fn bottom(&self) -> f64 {
        self.pos.y + self.size.y
    }
}

/// Inner faces of the four cushions. A ball centre at or past a face reflects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CushionBounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Static table geometry. Never moves after setup.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub surface: Rect,
    pub top: Rect,
    pub left: Rect,
    pub bottom: Rect,
    pub right: Rect,
    /// Non-physical capture markers.
    pub pockets: Vec<Ball>,
    /// Decorative pocket mouths.
    pub mouths: Vec<Rect>,
}

impl Table {
    pub fn bounds(&self) -> CushionBounds {
        CushionBounds {
            left: self.left.right(),
            right: self.right.pos.x,
            top: self.top.bottom(),
            bottom: self.bottom.pos.y,
        }
    }

    pub fn cushions(&self) -> [Rect; 4] {
        [self.top, self.left, self.bottom, self.right]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// 1 or 2, as shown to players.
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    pub fn index(self) -> usize {
        self.number() as usize - 1
    }
}

/// Colour group a player must pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColourGroup {
    #[default]
    Unassigned,
    Red,
    Yellow,
    Black,
}

impl ColourGroup {
    /// The group a potted object ball hands to its potter.
    pub fn of(colour: BallColour) -> Option<Self> {
        match colour {
            BallColour::Red => Some(Self::Red),
            BallColour::Yellow => Some(Self::Yellow),
            BallColour::Black => Some(Self::Black),
            BallColour::White | BallColour::Neutral => None,
        }
    }

    /// The ball colour this group targets, if any.
    pub fn ball_colour(self) -> Option<BallColour> {
        match self {
            Self::Unassigned => None,
            Self::Red => Some(BallColour::Red),
            Self::Yellow => Some(BallColour::Yellow),
            Self::Black => Some(BallColour::Black),
        }
    }

    /// The opposing object group. Only Red and Yellow have one.
    pub fn opposite(self) -> Option<Self> {
        match self {
            Self::Red => Some(Self::Yellow),
            Self::Yellow => Some(Self::Red),
            Self::Unassigned | Self::Black => None,
        }
    }

    pub fn is_assigned(self) -> bool {
        self != Self::Unassigned
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unassigned => "",
            Self::Red => "Red",
            Self::Yellow => "Yellow",
            Self::Black => "Black",
        }
    }

    pub fn colour(self) -> Colour {
        self.ball_colour().map_or(Colour::WHITE, BallColour::colour)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub active: bool,
    pub group: ColourGroup,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            active: false,
            group: ColourGroup::Unassigned,
        }
    }
}
