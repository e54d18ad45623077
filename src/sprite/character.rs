#[cfg(debug_assertions)]
use crate::engine::DebugDraw;
use crate::engine::input::KeyAxes;
use crate::engine::{Point, Rect, Renderer, Size};
use crate::sprite::state::{CharacterContext, CharacterState};
use crate::sprite::{Direction, Idle, SpriteCell, SpriteSheet, Walking};
use crate::world::movement::{self, Step};
use std::rc::Rc;
use web_sys::HtmlImageElement;

/// ┌──────────────── State Transition Flow ──────────────────┐
/// │  From State  →  Event   →  To State                     │
/// ├─────────────────────────────────────────────────────────┤
/// │  Idle        →  Walk    →  Walking  (frame 0)           │
/// │  Walking     →  Walk    →  Walking  (frame 0 on turn)   │
/// │  Walking     →  Stop    →  Idle     (frame 0)           │
/// │  Idle        →  Stop    →  Idle                         │
/// │  any         →  Target  →  same, new target             │
/// │  any         →  Reset   →  Idle at home                 │
/// │  -------        ------                                  │
/// │  Walking     →  Update  →  Walking  (next frame)        │
/// └─────────────────────────────────────────────────────────┘
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Event {
    Walk(Step),
    Stop { target: Point },
    Target(Point),
    Reset(Point),
    Update,
}

#[derive(Debug, Copy, Clone)]
enum CharacterStateMachine {
    Idle(CharacterState<Idle>),
    Walking(CharacterState<Walking>),
}

impl From<CharacterState<Idle>> for CharacterStateMachine {
    fn from(state: CharacterState<Idle>) -> Self {
        CharacterStateMachine::Idle(state)
    }
}

impl From<CharacterState<Walking>> for CharacterStateMachine {
    fn from(state: CharacterState<Walking>) -> Self {
        CharacterStateMachine::Walking(state)
    }
}

impl CharacterStateMachine {
    // consumes the current state and returns the next one, so a stale state
    // can't be used after a transition
    fn transition(self, event: Event, sheet: &SpriteSheet) -> Self {
        use CharacterStateMachine::*;
        match (self, event) {
            (Idle(state), Event::Walk(step)) => state.walk(step).into(),
            (Walking(state), Event::Walk(step)) => state.walk(step).into(),
            (Idle(state), Event::Stop { target }) => state.hold(target).into(),
            (Walking(state), Event::Stop { target }) => state.stop(target).into(),
            (Idle(state), Event::Target(target)) => state.retarget(target).into(),
            (Walking(state), Event::Target(target)) => state.retarget(target).into(),
            (Idle(state), Event::Reset(home)) => state.reset_to(home).into(),
            (Walking(state), Event::Reset(home)) => state.reset_to(home).into(),
            (Idle(state), Event::Update) => state.update().into(),
            (Walking(state), Event::Update) => {
                let frame_count = sheet.frame_count(state.context().facing);
                state.update(frame_count, sheet.frame_delay()).into()
            }
        }
    }

    fn context(&self) -> &CharacterContext {
        use CharacterStateMachine::*;
        match self {
            Idle(state) => state.context(),
            Walking(state) => state.context(),
        }
    }
}

pub struct Character {
    state: CharacterStateMachine,
    // shared with the scene, which needs the same grid to address images
    sheet: Rc<SpriteSheet>,
    color: String,
}

/// Character
/// - step()       -> resolve input, clamp, Walk/Stop + Update
/// - set_target() -> Target
/// - reset_to()   -> Reset
impl Character {
    pub fn new(home: Point, size: Size, speed: f32, color: String, sheet: Rc<SpriteSheet>) -> Self {
        Character {
            state: CharacterState::new(home, size, speed).into(),
            sheet,
            color,
        }
    }

    /// One update: move by input, keep inside `bounds`, animate
    pub fn step(&mut self, keys: KeyAxes, bounds: Size) {
        let context = *self.state.context();
        let resolved = movement::resolve(keys, context.position, context.target, context.speed);
        let (position, target) =
            movement::clamp(resolved.position, resolved.target, context.size, bounds);
        let event = if position != context.position {
            Event::Walk(Step {
                position,
                target,
                facing: resolved.facing,
            })
        } else {
            Event::Stop { target }
        };
        self.transition(event);
        self.transition(Event::Update);
    }

    pub fn set_target(&mut self, target: Point) {
        self.transition(Event::Target(target));
    }

    pub fn reset_to(&mut self, home: Point) {
        self.transition(Event::Reset(home));
    }

    fn transition(&mut self, event: Event) {
        self.state = self.state.transition(event, &self.sheet);
    }

    pub fn position(&self) -> Point {
        self.state.context().position
    }

    pub fn target(&self) -> Point {
        self.state.context().target
    }

    pub fn facing(&self) -> Direction {
        self.state.context().facing
    }

    pub fn frame(&self) -> usize {
        self.state.context().frame
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.state, CharacterStateMachine::Walking(_))
    }

    pub fn bounding_box(&self) -> Rect {
        let context = self.state.context();
        Rect::from_center(context.position, context.size)
    }

    pub fn current_cell(&self) -> SpriteCell {
        let context = self.state.context();
        match self.state {
            CharacterStateMachine::Idle(_) => self.sheet.cell::<Idle>(context.facing, context.frame),
            CharacterStateMachine::Walking(_) => {
                self.sheet.cell::<Walking>(context.facing, context.frame)
            }
        }
    }

    /// `images` are the sheet cells in row major order; without them the
    /// character is a colored square
    pub fn draw(&self, renderer: &Renderer, images: &[HtmlImageElement]) {
        let destination = self.bounding_box();
        match images.get(self.sheet.image_index(self.current_cell())) {
            Some(image) => renderer.draw_image(image, &destination),
            None => renderer.fill_rect(&self.color, &destination),
        }

        #[cfg(debug_assertions)]
        {
            destination.draw_debug(renderer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimationConfig;

    fn character_at(x: f32, y: f32) -> Character {
        Character::new(
            Point::new(x, y),
            Size::new(30.0, 30.0),
            3.0,
            "#e60073".into(),
            Rc::new(SpriteSheet::new(&AnimationConfig::default(), None)),
        )
    }

    const BOUNDS: Size = Size {
        width: 800.0,
        height: 600.0,
    };

    const RIGHT: KeyAxes = KeyAxes {
        x: 1,
        y: 0,
        held: true,
    };

    #[test]
    fn walking_plays_the_facing_row() {
        let mut character = character_at(100.0, 100.0);
        assert!(!character.is_moving());
        assert_eq!(character.current_cell(), SpriteCell { row: 0, col: 1 });

        character.step(RIGHT, BOUNDS);
        assert!(character.is_moving());
        assert_eq!(character.facing(), Direction::Right);
        assert_eq!(character.current_cell(), SpriteCell { row: 2, col: 0 });

        // default: 8 updates per frame, frames [0, 1, 2, 1]
        let mut cols = Vec::new();
        for _ in 0..32 {
            character.step(RIGHT, BOUNDS);
            cols.push(character.current_cell().col);
        }
        assert!(cols.iter().all(|col| [0, 1, 2].contains(col)));
        assert!(character.frame() < 4);
    }

    #[test]
    fn releasing_keys_goes_idle_without_drifting() {
        let mut character = character_at(100.0, 100.0);
        character.set_target(Point::new(700.0, 100.0));
        for _ in 0..10 {
            character.step(RIGHT, BOUNDS);
        }
        let stopped_at = character.position();
        character.step(KeyAxes::default(), BOUNDS);
        assert_eq!(character.position(), stopped_at);
        assert!(!character.is_moving());
        assert_eq!(character.frame(), 0);
        assert_eq!(character.current_cell(), SpriteCell { row: 2, col: 1 });
    }

    #[test]
    fn pushing_into_a_wall_stops() {
        let mut character = character_at(785.0, 100.0);
        character.step(RIGHT, BOUNDS);
        assert_eq!(character.position(), Point::new(785.0, 100.0));
        assert!(!character.is_moving());
    }

    #[test]
    fn idle_and_walking_address_different_columns() {
        let mut character = character_at(100.0, 100.0);
        character.step(
            KeyAxes {
                x: 0,
                y: -1,
                held: true,
            },
            BOUNDS,
        );
        // walking up starts on the first frame column of row 3
        assert_eq!(character.current_cell(), SpriteCell { row: 3, col: 0 });
        character.step(KeyAxes::default(), BOUNDS);
        // idle keeps the facing row and shows the standing column
        assert_eq!(character.current_cell(), SpriteCell { row: 3, col: 1 });
    }

    #[test]
    fn reset_returns_home() {
        let mut character = character_at(100.0, 100.0);
        character.set_target(Point::new(400.0, 400.0));
        character.step(KeyAxes::default(), BOUNDS);
        character.reset_to(Point::new(50.0, 540.0));
        assert_eq!(character.position(), Point::new(50.0, 540.0));
        assert_eq!(character.target(), Point::new(50.0, 540.0));
        assert!(!character.is_moving());
    }
}
