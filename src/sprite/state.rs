/// Character states are behind this module and make invalid transitions
/// unrepresentable: the only way from one state to another is through the
/// methods below.
/// - PUBLIC  : CharacterState and CharacterContext
/// - PRIVATE : the `_state` marker and the context helpers
use crate::engine::{Point, Size};
use crate::sprite::{Direction, Idle, Walking};
use crate::world::movement::Step;

#[derive(Debug, Copy, Clone, PartialEq)]
/// Shared data for :
/// - physics   : position + target + speed
/// - display   : facing + frame + frame timer
pub struct CharacterContext {
    /// index into the facing direction's frame list
    pub frame: usize,
    pub frame_timer: u8,
    /// center of the bounding box
    pub position: Point,
    pub target: Point,
    pub facing: Direction,
    pub size: Size,
    pub speed: f32,
}

#[derive(Debug, Copy, Clone)]
pub struct CharacterState<S> {
    context: CharacterContext,
    // phantom marker, only there so each state is its own type
    _state: S,
}

impl<S> CharacterState<S> {
    pub fn context(&self) -> &CharacterContext {
        &self.context
    }

    pub fn retarget(mut self, target: Point) -> Self {
        self.context.target = target;
        self
    }

    /// Drop whatever the character was doing and stand at `home`
    pub fn reset_to(self, home: Point) -> CharacterState<Idle> {
        CharacterState {
            context: self.context.on_state_transition().moved_to(home, home),
            _state: Idle,
        }
    }
}

impl CharacterState<Idle> {
    pub fn new(position: Point, size: Size, speed: f32) -> Self {
        CharacterState {
            context: CharacterContext {
                frame: 0,
                frame_timer: 0,
                position,
                target: position,
                facing: Direction::Down,
                size,
                speed,
            },
            _state: Idle,
        }
    }

    /// Idle holds the standing frame, nothing to advance
    pub fn update(self) -> Self {
        self
    }

    pub fn walk(self, step: Step) -> CharacterState<Walking> {
        CharacterState {
            context: self
                .context
                .on_state_transition()
                .face(step.facing)
                .moved_to(step.position, step.target),
            _state: Walking,
        }
    }

    /// No displacement this update; only the target may change
    pub fn hold(mut self, target: Point) -> Self {
        self.context.target = target;
        self
    }
}

impl CharacterState<Walking> {
    pub fn update(mut self, frame_count: usize, frame_delay: u8) -> Self {
        self.context = self.context.advance(frame_count, frame_delay);
        self
    }

    pub fn walk(self, step: Step) -> Self {
        let turned = matches!(step.facing, Some(facing) if facing != self.context.facing);
        let context = if turned {
            self.context.on_state_transition()
        } else {
            self.context
        };
        CharacterState {
            context: context.face(step.facing).moved_to(step.position, step.target),
            _state: Walking,
        }
    }

    pub fn stop(self, target: Point) -> CharacterState<Idle> {
        CharacterState {
            context: self.context.on_state_transition().hold(target),
            _state: Idle,
        }
    }
}

impl CharacterContext {
    /// Reset to the first frame:
    /// - directions can have different frame counts, so a stale index could
    ///   point past the new list
    fn on_state_transition(mut self) -> Self {
        self.frame = 0;
        self.frame_timer = 0;
        self
    }

    fn face(mut self, facing: Option<Direction>) -> Self {
        if let Some(facing) = facing {
            self.facing = facing;
        }
        self
    }

    fn moved_to(mut self, position: Point, target: Point) -> Self {
        self.position = position;
        self.target = target;
        self
    }

    fn hold(mut self, target: Point) -> Self {
        self.target = target;
        self
    }

    /// Next frame every `frame_delay` updates, wrapping at `frame_count`
    fn advance(mut self, frame_count: usize, frame_delay: u8) -> Self {
        self.frame_timer = self.frame_timer.saturating_add(1);
        if self.frame_timer >= frame_delay {
            self.frame_timer = 0;
            self.frame = if frame_count == 0 {
                0
            } else {
                (self.frame + 1) % frame_count
            };
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_to(x: f32, y: f32, facing: Direction) -> Step {
        Step {
            position: Point::new(x, y),
            target: Point::new(x, y),
            facing: Some(facing),
        }
    }

    fn idle() -> CharacterState<Idle> {
        CharacterState::new(Point::new(50.0, 50.0), Size::new(30.0, 30.0), 3.0)
    }

    #[test]
    fn walking_cycles_the_frame_list() {
        let mut walking = idle().walk(step_to(53.0, 50.0, Direction::Right));
        let mut seen = Vec::new();
        for _ in 0..12 {
            walking = walking.update(4, 2);
            seen.push(walking.context().frame);
        }
        assert_eq!(seen, vec![0, 1, 1, 2, 2, 3, 3, 0, 0, 1, 1, 2]);
        assert!(seen.iter().all(|frame| *frame < 4));
    }

    #[test]
    fn turning_while_walking_restarts_the_cycle() {
        let mut walking = idle().walk(step_to(53.0, 50.0, Direction::Right));
        for _ in 0..3 {
            walking = walking.update(4, 1);
        }
        assert_eq!(walking.context().frame, 3);
        let same_way = walking.walk(step_to(56.0, 50.0, Direction::Right));
        assert_eq!(same_way.context().frame, 3);
        let turned = same_way.walk(step_to(56.0, 53.0, Direction::Down));
        assert_eq!(turned.context().frame, 0);
        assert_eq!(turned.context().facing, Direction::Down);
    }

    #[test]
    fn stopping_resets_frame_and_keeps_facing() {
        let mut walking = idle().walk(step_to(50.0, 47.0, Direction::Up));
        for _ in 0..5 {
            walking = walking.update(4, 1);
        }
        let stopped = walking.stop(Point::new(50.0, 47.0));
        assert_eq!(stopped.context().frame, 0);
        assert_eq!(stopped.context().frame_timer, 0);
        assert_eq!(stopped.context().facing, Direction::Up);
    }

    #[test]
    fn reset_returns_home_idle() {
        let walking = idle().walk(step_to(80.0, 50.0, Direction::Right));
        let home = walking.reset_to(Point::new(50.0, 240.0));
        assert_eq!(home.context().position, Point::new(50.0, 240.0));
        assert_eq!(home.context().target, Point::new(50.0, 240.0));
    }
}
