// ┌──────────────────────────────────────────────────────────────────────────┐
// │                         sprite/ layout                                   │
// ├───────────────────┬──────────────────────────────────────────────────────┤
// │ mod.rs            │ Direction, SpriteState markers, SpriteSheet grid     │
// │ state.rs          │ typestate CharacterState<Idle | Walking> + context   │
// │ character.rs      │ CharacterStateMachine + Character wrapper            │
// └───────────────────┴──────────────────────────────────────────────────────┘
//
// The sheet is a grid of separate images addressed by (row, col):
//
//            col 0    col 1    col 2
//   row 0    down     down*    down        * standing column
//   row 1    left     left*    left
//   row 2    right    right*   right
//   row 3    up       up*      up
pub mod character;
pub mod state;

use crate::config::{AnimationConfig, DirectionFrames};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Dominant axis of `(dx, dy)`; the sign picks the side. Ties go to the
    /// vertical axis. `None` for the zero vector.
    pub fn from_vector(dx: f32, dy: f32) -> Option<Direction> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        if dx.abs() > dy.abs() {
            Some(if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            })
        } else {
            Some(if dy > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            })
        }
    }
}

/// Marker types for the character typestate
#[derive(Debug, Copy, Clone)]
pub struct Idle;

#[derive(Debug, Copy, Clone)]
pub struct Walking;

pub trait SpriteState {
    /// walking states play the frame list, the rest hold the standing frame
    const MOVING: bool;
}

impl SpriteState for Idle {
    const MOVING: bool = false;
}

impl SpriteState for Walking {
    const MOVING: bool = true;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SpriteCell {
    pub row: usize,
    pub col: usize,
}

/// Fill `{row}` and `{col}` in a cell path template
pub fn cell_path(template: &str, cell: SpriteCell) -> String {
    template
        .replace("{row}", &cell.row.to_string())
        .replace("{col}", &cell.col.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    rows: usize,
    cols: usize,
    frame_delay: u8,
    down: DirectionFrames,
    left: DirectionFrames,
    right: DirectionFrames,
    up: DirectionFrames,
    path: Option<String>,
}

impl SpriteSheet {
    /// `animation` is expected to be validated already
    pub fn new(animation: &AnimationConfig, path: Option<String>) -> Self {
        SpriteSheet {
            rows: animation.rows,
            cols: animation.cols,
            frame_delay: animation.frame_delay,
            down: animation.down.clone(),
            left: animation.left.clone(),
            right: animation.right.clone(),
            up: animation.up.clone(),
            path,
        }
    }

    pub fn frames(&self, direction: Direction) -> &DirectionFrames {
        match direction {
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
            Direction::Up => &self.up,
        }
    }

    pub fn frame_count(&self, direction: Direction) -> usize {
        self.frames(direction).frames.len()
    }

    pub fn frame_delay(&self) -> u8 {
        self.frame_delay
    }

    /// Cell to show for state `S` facing `direction` at animation `frame`
    pub fn cell<S: SpriteState>(&self, direction: Direction, frame: usize) -> SpriteCell {
        let frames = self.frames(direction);
        let col = if S::MOVING && !frames.frames.is_empty() {
            frames.frames[frame % frames.frames.len()]
        } else {
            frames.standing
        };
        SpriteCell {
            row: frames.row,
            col,
        }
    }

    /// Every cell path in row major order, matching [`SpriteSheet::image_index`]
    pub fn cell_paths(&self) -> Vec<String> {
        match &self.path {
            Some(template) => (0..self.rows)
                .flat_map(|row| (0..self.cols).map(move |col| SpriteCell { row, col }))
                .map(|cell| cell_path(template, cell))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn image_index(&self, cell: SpriteCell) -> usize {
        cell.row * self.cols + cell.col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_axis_picks_direction() {
        assert_eq!(Direction::from_vector(5.0, 1.0), Some(Direction::Right));
        assert_eq!(Direction::from_vector(-5.0, 1.0), Some(Direction::Left));
        assert_eq!(Direction::from_vector(1.0, 5.0), Some(Direction::Down));
        assert_eq!(Direction::from_vector(1.0, -5.0), Some(Direction::Up));
        assert_eq!(Direction::from_vector(3.0, -3.0), Some(Direction::Up));
        assert_eq!(Direction::from_vector(0.0, 0.0), None);
    }

    #[test]
    fn cell_paths_cover_the_grid_row_major() {
        let sheet = SpriteSheet::new(
            &AnimationConfig::default(),
            Some("img/hero_{row}-{col}.png".to_string()),
        );
        let paths = sheet.cell_paths();
        assert_eq!(paths.len(), 12);
        assert_eq!(paths[0], "img/hero_0-0.png");
        assert_eq!(paths[5], "img/hero_1-2.png");
        let cell = SpriteCell { row: 1, col: 2 };
        assert_eq!(paths[sheet.image_index(cell)], cell_path("img/hero_{row}-{col}.png", cell));
    }

    #[test]
    fn sheet_without_path_has_no_images() {
        let sheet = SpriteSheet::new(&AnimationConfig::default(), None);
        assert!(sheet.cell_paths().is_empty());
    }

    #[test]
    fn idle_shows_standing_column_walking_plays_frames() {
        let sheet = SpriteSheet::new(&AnimationConfig::default(), None);
        assert_eq!(sheet.cell::<Idle>(Direction::Left, 2), SpriteCell { row: 1, col: 1 });
        assert_eq!(sheet.cell::<Walking>(Direction::Up, 0), SpriteCell { row: 3, col: 0 });
        assert_eq!(sheet.cell::<Walking>(Direction::Up, 2), SpriteCell { row: 3, col: 2 });
        // wraps instead of indexing past the list
        assert_eq!(sheet.cell::<Walking>(Direction::Up, 5), SpriteCell { row: 3, col: 1 });
    }
}
