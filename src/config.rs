//! Page configuration, fetched from `portfolio.json` at startup.
//!
//! Every field has a default, so a partial file (or none at all) still yields
//! a playable page: the defaults reproduce the plain version with a pink
//! square and three purple boxes.
use crate::engine::{Point, Size};
use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_PATH: &str = "portfolio.json";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub character: CharacterConfig,
    pub animation: AnimationConfig,
    pub objects: Vec<ObjectConfig>,
    pub hover: HoverConfig,
    pub collision: CollisionConfig,
    pub content: ContentSource,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        PortfolioConfig {
            character: CharacterConfig::default(),
            animation: AnimationConfig::default(),
            objects: vec![
                ObjectConfig::boxed("about", 200.0, -100.0, "About Me"),
                ObjectConfig::boxed("portfolio", 400.0, -150.0, "Portfolio"),
                ObjectConfig::boxed("contact", 600.0, -80.0, "Contact"),
            ],
            hover: HoverConfig::default(),
            collision: CollisionConfig::default(),
            content: ContentSource::default(),
        }
    }
}

impl PortfolioConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.character.speed > 0.0,
            "character speed must be positive, got {}",
            self.character.speed
        );
        ensure!(
            self.character.size.width > 0.0 && self.character.size.height > 0.0,
            "character size must be positive"
        );
        ensure!(
            self.hover.smoothing > 0.0 && self.hover.smoothing <= 1.0,
            "hover smoothing must be in (0, 1], got {}",
            self.hover.smoothing
        );
        self.animation.validate()
    }
}

/// A point relative to the canvas: `relative_*` is a fraction of the canvas
/// size, `x`/`y` a pixel offset added to it. `{ x: 50, y: -60, relative_y: 1 }`
/// is 50px from the left and 60px above the bottom edge.
#[derive(Debug, Default, Copy, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Anchor {
    pub x: f32,
    pub y: f32,
    pub relative_x: f32,
    pub relative_y: f32,
}

impl Anchor {
    pub fn from_bottom(x: f32, y: f32) -> Self {
        Anchor {
            x,
            y,
            relative_x: 0.0,
            relative_y: 1.0,
        }
    }

    pub fn resolve(&self, bounds: Size) -> Point {
        Point {
            x: self.relative_x * bounds.width + self.x,
            y: self.relative_y * bounds.height + self.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub size: Size,
    /// pixels per update
    pub speed: f32,
    pub color: String,
    /// where the center starts, and returns to on resize
    pub home: Anchor,
    /// sprite cell path with `{row}` and `{col}` placeholders; a colored
    /// square is drawn when absent
    pub sprite: Option<String>,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        CharacterConfig {
            size: Size::new(30.0, 30.0),
            speed: 3.0,
            color: "#e60073".to_string(),
            home: Anchor::from_bottom(50.0, -60.0),
            sprite: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectionFrames {
    pub row: usize,
    /// sheet columns played in order while walking
    pub frames: Vec<usize>,
    pub standing: usize,
}

impl DirectionFrames {
    fn on_row(row: usize) -> Self {
        DirectionFrames {
            row,
            frames: vec![0, 1, 2, 1],
            standing: 1,
        }
    }
}

impl Default for DirectionFrames {
    fn default() -> Self {
        DirectionFrames::on_row(0)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub rows: usize,
    pub cols: usize,
    /// updates between two walking frames
    pub frame_delay: u8,
    pub down: DirectionFrames,
    pub left: DirectionFrames,
    pub right: DirectionFrames,
    pub up: DirectionFrames,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            rows: 4,
            cols: 3,
            frame_delay: 8,
            down: DirectionFrames::on_row(0),
            left: DirectionFrames::on_row(1),
            right: DirectionFrames::on_row(2),
            up: DirectionFrames::on_row(3),
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.frame_delay > 0, "animation frame_delay must be at least 1");
        for (name, frames) in [
            ("down", &self.down),
            ("left", &self.left),
            ("right", &self.right),
            ("up", &self.up),
        ] {
            ensure!(
                frames.row < self.rows,
                "{} row {} is outside the {} row sprite grid",
                name,
                frames.row,
                self.rows
            );
            ensure!(!frames.frames.is_empty(), "{} has no walking frames", name);
            ensure!(
                frames.standing < self.cols,
                "{} standing column {} is outside the {} column sprite grid",
                name,
                frames.standing,
                self.cols
            );
            if let Some(col) = frames.frames.iter().find(|col| **col >= self.cols) {
                bail!(
                    "{} frame column {} is outside the {} column sprite grid",
                    name,
                    col,
                    self.cols
                );
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObjectConfig {
    pub id: String,
    /// top left corner
    pub anchor: Anchor,
    pub size: Size,
    pub color: String,
    pub image: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl ObjectConfig {
    fn boxed(id: &str, x: f32, y: f32, title: &str) -> Self {
        ObjectConfig {
            id: id.to_string(),
            anchor: Anchor::from_bottom(x, y),
            title: Some(title.to_string()),
            ..ObjectConfig::default()
        }
    }
}

impl Default for ObjectConfig {
    fn default() -> Self {
        ObjectConfig {
            id: String::new(),
            anchor: Anchor::default(),
            size: Size::new(50.0, 50.0),
            color: "#9400d3".to_string(),
            image: None,
            title: None,
            content: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HoverConfig {
    /// scale while the pointer is over an object
    pub scale: f32,
    /// fraction of the remaining scale difference closed each update
    pub smoothing: f32,
}

impl Default for HoverConfig {
    fn default() -> Self {
        HoverConfig {
            scale: 1.1,
            smoothing: 0.2,
        }
    }
}

/// Which part of the character touches objects
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Hitbox {
    Full,
    #[default]
    Feet,
}

/// Which object wins when several overlap the hitbox
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivePolicy {
    /// object center closest to the hitbox center, earlier object on ties
    #[default]
    Nearest,
    /// last overlapping object in list order
    Last,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub hitbox: Hitbox,
    pub policy: ActivePolicy,
}

/// Where message panel content comes from
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentSource {
    /// children of `#content-templates`: 0 is the welcome, i + 1 object i
    #[default]
    Templates,
    /// title and content strings carried by each object
    Inline {
        welcome_title: String,
        welcome_body: String,
    },
}
