use arena::Colour;
use serde::{Deserialize, Serialize};

/// Tunables for a match. Loaded from JSON; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Frames simulated per shot.
    pub frame_budget: u32,
    /// Converts aim length × power into per-frame velocity.
    pub velocity_scale: f64,
    /// Aim length the shot velocity is computed from.
    pub shot_reference_length: f64,
    pub max_power: u32,
    /// Preview line lengths, cycled in order.
    pub line_lengths: Vec<f64>,
    /// Play shots over several ticks instead of in one go.
    pub animate_shots: bool,
    /// Frames advanced per tick when animating.
    pub frames_per_tick: u32,
    pub palette: Palette,
}

/// Board colours, each a palette name or `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub table: String,
    pub cushion: String,
    pub pocket: String,
    pub power_bar: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            table: "#007333".into(),
            cushion: "#5c3317".into(),
            pocket: "BLACK".into(),
            power_bar: "GREY".into(),
        }
    }
}

impl Palette {
    pub fn table(&self) -> Colour {
        Colour::named(&self.table)
    }

    pub fn cushion(&self) -> Colour {
        Colour::named(&self.cushion)
    }

    pub fn pocket(&self) -> Colour {
        Colour::named(&self.pocket)
    }

    pub fn power_bar(&self) -> Colour {
        Colour::named(&self.power_bar)
    }

    /// Log every entry that would fall back to white.
    fn report_unknown(&self) {
        let entries = [
            ("table", &self.table),
            ("cushion", &self.cushion),
            ("pocket", &self.pocket),
            ("power_bar", &self.power_bar),
        ];
        for (field, value) in entries {
            if Colour::parse(value).is_none() {
                log::warn!("palette.{field} {value:?} is not a colour, drawing it white");
            }
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            frame_budget: 1000,
            velocity_scale: 0.001,
            shot_reference_length: 200.0,
            max_power: 20,
            line_lengths: vec![200.0, 300.0, 400.0, 100.0],
            animate_shots: false,
            frames_per_tick: 50,
            palette: Palette::default(),
        }
    }
}

impl MatchConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Replace values that would stall or break a match with their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.frame_budget == 0 {
            log::warn!("frame_budget must be positive, using {}", defaults.frame_budget);
            self.frame_budget = defaults.frame_budget;
        }
        if self.max_power == 0 {
            log::warn!("max_power must be positive, using {}", defaults.max_power);
            self.max_power = defaults.max_power;
        }
        if self.frames_per_tick == 0 {
            log::warn!("frames_per_tick must be positive, using {}", defaults.frames_per_tick);
            self.frames_per_tick = defaults.frames_per_tick;
        }
        if self.line_lengths.is_empty() {
            log::warn!("line_lengths is empty, using defaults");
            self.line_lengths = defaults.line_lengths;
        }
        if !(self.velocity_scale.is_finite() && self.velocity_scale > 0.0) {
            log::warn!("velocity_scale must be positive, using {}", defaults.velocity_scale);
            self.velocity_scale = defaults.velocity_scale;
        }
        self.palette.report_unknown();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = MatchConfig::from_json("{}").unwrap();
        assert_eq!(config, MatchConfig::default());
        assert_eq!(config.frame_budget, 1000);
        assert_eq!(config.line_lengths, vec![200.0, 300.0, 400.0, 100.0]);
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = MatchConfig::from_json(r#"{ "animate_shots": true, "frames_per_tick": 10 }"#).unwrap();
        assert!(config.animate_shots);
        assert_eq!(config.frames_per_tick, 10);
        assert_eq!(config.max_power, 20);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(MatchConfig::from_json("{ frame_budget: ").is_err());
        assert!(MatchConfig::from_json(r#"{ "frame_budget": "lots" }"#).is_err());
    }

    #[test]
    fn sanitized_restores_unusable_values() {
        let config = MatchConfig {
            frame_budget: 0,
            max_power: 0,
            frames_per_tick: 0,
            line_lengths: Vec::new(),
            velocity_scale: -1.0,
            ..MatchConfig::default()
        }
        .sanitized();
        assert_eq!(config, MatchConfig::default());
    }

    #[test]
    fn palette_accepts_names_and_hex() {
        let config = MatchConfig::from_json(
            r##"{ "palette": { "table": "darkgrey", "cushion": "#ff0000" } }"##,
        )
        .unwrap();
        assert_eq!(config.palette.table(), Colour::DARK_GREY);
        assert_eq!(config.palette.cushion(), Colour::RED);
        assert_eq!(config.palette.pocket(), Colour::BLACK);
        assert_eq!(config.palette.power_bar(), Colour::GREY);
    }

    #[test]
    fn default_palette_matches_the_board() {
        let palette = Palette::default();
        let table = palette.table();
        assert_eq!(table.r, 0.0);
        assert!((table.g - 0.45).abs() < 0.01);
        assert!((table.b - 0.2).abs() < 0.01);
        let cushion = palette.cushion();
        assert!((cushion.r - 0.36).abs() < 0.01);
        assert!((cushion.b - 0.09).abs() < 0.01);
    }

    #[test]
    fn unknown_palette_entry_draws_white() {
        let config = MatchConfig::from_json(r#"{ "palette": { "pocket": "mauve" } }"#)
            .unwrap()
            .sanitized();
        assert_eq!(config.palette.pocket, "mauve");
        assert_eq!(config.palette.pocket(), Colour::WHITE);
    }
}
