//! Input resolution and boundary clamping for the character.
//!
//! Positions are box centers.
use crate::engine::input::KeyAxes;
use crate::engine::{Point, Size};
use crate::sprite::Direction;

/// Outcome of resolving one update's input
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Step {
    pub position: Point,
    pub target: Point,
    /// `None` leaves the facing as it was
    pub facing: Option<Direction>,
}

/// Held keys move `speed` along each pressed axis and drag the target along;
/// otherwise the character seeks `target`, snapping onto it once it is
/// within one step.
pub fn resolve(keys: KeyAxes, position: Point, target: Point, speed: f32) -> Step {
    if keys.held {
        let dx = f32::from(keys.x) * speed;
        let dy = f32::from(keys.y) * speed;
        let position = Point {
            x: position.x + dx,
            y: position.y + dy,
        };
        return Step {
            position,
            target: position,
            facing: Direction::from_vector(dx, dy),
        };
    }

    let dx = target.x - position.x;
    let dy = target.y - position.y;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance > speed {
        Step {
            position: Point {
                x: position.x + dx / distance * speed,
                y: position.y + dy / distance * speed,
            },
            target,
            facing: Direction::from_vector(dx, dy),
        }
    } else if distance > 0.0 {
        Step {
            position: target,
            target,
            facing: Direction::from_vector(dx, dy),
        }
    } else {
        Step {
            position,
            target,
            facing: None,
        }
    }
}

fn clamp_axis(value: f32, half: f32, extent: f32) -> f32 {
    if extent < half * 2.0 {
        // does not fit, center it
        extent / 2.0
    } else {
        value.clamp(half, extent - half)
    }
}

/// Keep a box of `size` centered on `position` inside `bounds`. An axis that
/// had to be clamped also has its target pinned, so the character does not
/// keep pushing into the wall.
pub fn clamp(position: Point, target: Point, size: Size, bounds: Size) -> (Point, Point) {
    let x = clamp_axis(position.x, size.width / 2.0, bounds.width);
    let y = clamp_axis(position.y, size.height / 2.0, bounds.height);
    let target = Point {
        x: if x != position.x { x } else { target.x },
        y: if y != position.y { y } else { target.y },
    };
    (Point { x, y }, target)
}
