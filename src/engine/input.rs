//! Keyboard and pointer input.
//!
//! DOM listeners never touch game state directly: they push [`InputEvent`]s
//! into a channel, and the game loop drains that channel into an
//! [`InputState`] once per animation frame. Updates only ever read the
//! snapshot.
use crate::browser;
use crate::engine::{Point, Size};
use crate::sprite::Direction;
use anyhow::Result;
use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

static MOVEMENT_KEYS: Lazy<HashMap<&'static str, Direction>> = Lazy::new(|| {
    HashMap::from([
        ("KeyW", Direction::Up),
        ("ArrowUp", Direction::Up),
        ("KeyS", Direction::Down),
        ("ArrowDown", Direction::Down),
        ("KeyA", Direction::Left),
        ("ArrowLeft", Direction::Left),
        ("KeyD", Direction::Right),
        ("ArrowRight", Direction::Right),
    ])
});

/// Direction bound to a `KeyboardEvent.code`, if any
pub fn movement_for(code: &str) -> Option<Direction> {
    MOVEMENT_KEYS.get(code).copied()
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    /// pointer moved, canvas space
    PointerMove(Point),
    PointerLeave,
    /// canvas space
    Click(Point),
    /// new canvas pixel size
    Resize(Size),
    /// window lost focus, key releases after this never arrive
    Blur,
}

/// Net key direction on each axis: -1, 0 or 1
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct KeyAxes {
    pub x: i8,
    pub y: i8,
    /// any movement key held, even when opposite keys cancel out
    pub held: bool,
}

#[derive(Debug, Default)]
pub struct InputState {
    pressed: HashSet<String>,
    pointer: Option<Point>,
    click: Option<Point>,
    resize: Option<Size>,
}

impl InputState {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(code) => {
                self.pressed.insert(code);
            }
            InputEvent::KeyUp(code) => {
                self.pressed.remove(&code);
            }
            InputEvent::PointerMove(point) => self.pointer = Some(point),
            InputEvent::PointerLeave => self.pointer = None,
            InputEvent::Click(point) => {
                self.pointer = Some(point);
                self.click = Some(point);
            }
            InputEvent::Resize(size) => self.resize = Some(size),
            InputEvent::Blur => self.pressed.clear(),
        }
    }

    pub fn key_axes(&self) -> KeyAxes {
        let mut up = false;
        let mut down = false;
        let mut left = false;
        let mut right = false;
        for code in &self.pressed {
            match movement_for(code) {
                Some(Direction::Up) => up = true,
                Some(Direction::Down) => down = true,
                Some(Direction::Left) => left = true,
                Some(Direction::Right) => right = true,
                None => {}
            }
        }
        KeyAxes {
            x: right as i8 - left as i8,
            y: down as i8 - up as i8,
            held: up || down || left || right,
        }
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn click(&self) -> Option<Point> {
        self.click
    }

    pub fn resize(&self) -> Option<Size> {
        self.resize
    }

    /// Forget one-shot events once the game has updated with them
    pub fn end_frame(&mut self) {
        self.click = None;
        self.resize = None;
    }
}

/// Drain everything queued since the last frame
pub fn process_input(state: &mut InputState, receiver: &mut UnboundedReceiver<InputEvent>) {
    // stops when the queue is empty or closed
    while let Ok(event) = receiver.try_recv() {
        state.apply(event);
    }
}

/// Bounding rect of the canvas as displayed by CSS
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DisplayRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Convert client coordinates into canvas pixel coordinates, scaling for any
/// mismatch between the drawing buffer and its displayed size.
pub fn to_canvas_space(client: Point, display: DisplayRect, canvas: Size) -> Point {
    let scale_x = if display.width > 0.0 {
        canvas.width / display.width
    } else {
        1.0
    };
    let scale_y = if display.height > 0.0 {
        canvas.height / display.height
    } else {
        1.0
    };
    Point {
        x: (client.x - display.left) * scale_x,
        y: (client.y - display.top) * scale_y,
    }
}

fn canvas_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Point {
    let rect = canvas.get_bounding_client_rect();
    to_canvas_space(
        Point::new(event.client_x() as f32, event.client_y() as f32),
        DisplayRect {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
        },
        Size::new(canvas.width() as f32, canvas.height() as f32),
    )
}

fn send(sender: &UnboundedSender<InputEvent>, event: InputEvent) {
    if let Err(err) = sender.unbounded_send(event) {
        error!("Could not queue input event : {:#?}", err);
    }
}

/// Register keyboard, pointer and resize listeners. Keyboard listens on the
/// window so the canvas does not need focus.
pub fn prepare_input() -> Result<UnboundedReceiver<InputEvent>> {
    let (sender, receiver) = unbounded();
    let window = browser::window()?;
    let canvas = browser::canvas()?;

    let keydown_sender = sender.clone();
    browser::add_listener(&window, "keydown", move |event: KeyboardEvent| {
        let code = event.code();
        if movement_for(&code).is_some() {
            // arrows would otherwise scroll the page
            event.prevent_default();
        }
        send(&keydown_sender, InputEvent::KeyDown(code));
    })?;

    let keyup_sender = sender.clone();
    browser::add_listener(&window, "keyup", move |event: KeyboardEvent| {
        send(&keyup_sender, InputEvent::KeyUp(event.code()));
    })?;

    let click_sender = sender.clone();
    let click_canvas = canvas.clone();
    browser::add_listener(&canvas, "click", move |event: MouseEvent| {
        send(&click_sender, InputEvent::Click(canvas_point(&click_canvas, &event)));
    })?;

    let move_sender = sender.clone();
    let move_canvas = canvas.clone();
    browser::add_listener(&canvas, "mousemove", move |event: MouseEvent| {
        send(&move_sender, InputEvent::PointerMove(canvas_point(&move_canvas, &event)));
    })?;

    let leave_sender = sender.clone();
    browser::add_listener(&canvas, "mouseleave", move |_: MouseEvent| {
        send(&leave_sender, InputEvent::PointerLeave);
    })?;

    let blur_sender = sender.clone();
    browser::add_listener(&window, "blur", move |_: web_sys::Event| {
        send(&blur_sender, InputEvent::Blur);
    })?;

    let resize_canvas = canvas.clone();
    browser::add_listener(&window, "resize", move |_: web_sys::Event| {
        let (width, height) = browser::fit_canvas_to_display(&resize_canvas);
        send(&sender, InputEvent::Resize(Size::new(width as f32, height as f32)));
    })?;

    Ok(receiver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn down(state: &mut InputState, code: &str) {
        state.apply(InputEvent::KeyDown(code.to_string()));
    }

    #[test]
    fn wasd_and_arrows_map_to_directions() {
        assert_eq!(movement_for("KeyW"), Some(Direction::Up));
        assert_eq!(movement_for("ArrowLeft"), Some(Direction::Left));
        assert_eq!(movement_for("KeyD"), Some(Direction::Right));
        assert_eq!(movement_for("ArrowDown"), Some(Direction::Down));
        assert_eq!(movement_for("Space"), None);
    }

    #[test]
    fn key_up_clears_pressed_flag() {
        let mut state = InputState::default();
        down(&mut state, "KeyA");
        assert_eq!(state.key_axes(), KeyAxes { x: -1, y: 0, held: true });
        state.apply(InputEvent::KeyUp("KeyA".to_string()));
        assert_eq!(state.key_axes(), KeyAxes::default());
    }

    #[test]
    fn opposite_keys_cancel_but_count_as_held() {
        let mut state = InputState::default();
        for code in ["KeyW", "KeyA", "KeyS", "KeyD"] {
            down(&mut state, code);
        }
        assert_eq!(state.key_axes(), KeyAxes { x: 0, y: 0, held: true });
    }

    #[test]
    fn wasd_and_arrow_for_same_direction_do_not_double() {
        let mut state = InputState::default();
        down(&mut state, "KeyD");
        down(&mut state, "ArrowRight");
        down(&mut state, "ArrowUp");
        assert_eq!(state.key_axes(), KeyAxes { x: 1, y: -1, held: true });
    }

    #[test]
    fn losing_focus_releases_held_keys() {
        let mut state = InputState::default();
        down(&mut state, "ArrowRight");
        down(&mut state, "KeyW");
        state.apply(InputEvent::PointerMove(Point::new(5.0, 6.0)));
        state.apply(InputEvent::Blur);
        assert_eq!(state.key_axes(), KeyAxes::default());
        assert_eq!(state.pointer(), Some(Point::new(5.0, 6.0)));
    }

    #[test]
    fn non_movement_keys_are_not_held() {
        let mut state = InputState::default();
        down(&mut state, "Enter");
        assert!(!state.key_axes().held);
    }

    #[test]
    fn click_is_one_shot_but_pointer_persists() {
        let mut state = InputState::default();
        state.apply(InputEvent::Click(Point::new(5.0, 6.0)));
        state.apply(InputEvent::Resize(Size::new(800.0, 600.0)));
        assert_eq!(state.click(), Some(Point::new(5.0, 6.0)));
        state.end_frame();
        assert_eq!(state.click(), None);
        assert_eq!(state.resize(), None);
        assert_eq!(state.pointer(), Some(Point::new(5.0, 6.0)));
        state.apply(InputEvent::PointerLeave);
        assert_eq!(state.pointer(), None);
    }

    #[test]
    fn process_input_drains_queue_in_order() {
        let (sender, mut receiver) = unbounded();
        sender.unbounded_send(InputEvent::KeyDown("KeyW".into())).unwrap();
        sender.unbounded_send(InputEvent::KeyUp("KeyW".into())).unwrap();
        sender.unbounded_send(InputEvent::KeyDown("KeyS".into())).unwrap();
        let mut state = InputState::default();
        process_input(&mut state, &mut receiver);
        let down_only = KeyAxes { x: 0, y: 1, held: true };
        assert_eq!(state.key_axes(), down_only);
        // empty queue is a no-op
        process_input(&mut state, &mut receiver);
        assert_eq!(state.key_axes(), down_only);
    }

    #[test]
    fn client_points_are_scaled_to_canvas_pixels() {
        let display = DisplayRect {
            left: 10.0,
            top: 20.0,
            width: 400.0,
            height: 300.0,
        };
        let point = to_canvas_space(Point::new(210.0, 170.0), display, Size::new(800.0, 600.0));
        assert_relative_eq!(point.x, 400.0);
        assert_relative_eq!(point.y, 300.0);
    }

    #[test]
    fn zero_sized_display_does_not_divide_by_zero() {
        let display = DisplayRect {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
        };
        let point = to_canvas_space(Point::new(3.0, 4.0), display, Size::new(800.0, 600.0));
        assert_eq!(point, Point::new(3.0, 4.0));
    }
}
