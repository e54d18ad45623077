use crate::browser;
use anyhow::{anyhow, Context, Error, Result};
// web assembly is single threaded, so Rc RefCell > Mutex
use async_trait::async_trait;
use futures::channel::oneshot::channel;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{
    // unchecked_ref (unsafe) cast from Javascript type to Rust type
    // - we create the closure and specify the expected type, so the cast holds
    JsCast,
    JsValue,
};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

pub mod assets;
pub mod input;

use self::input::InputState;

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    /// Hands the game back once its assets are loaded; an error here stops
    /// the loop from ever being scheduled
    fn ready(self: Box<Self>) -> Result<Box<dyn Game>>;
    fn update(&mut self, input: &InputState);
    fn draw(&mut self, renderer: &Renderer);
}

// length of a frame in milliseconds
const FRAME_SIZE: f32 = 1.0 / 60.0 * 1000.0;
// a hidden tab stops animation frames; never replay more than this on return
const MAX_ACCUMULATED_DELTA: f32 = FRAME_SIZE * 10.0;

pub struct GameLoop {
    last_frame: f64,
    accumulated_delta: f32,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    /// Start listening for input, initialize `game` and hand it to
    /// requestAnimationFrame. Initialization errors and assets that are not
    /// loaded are returned before the first frame is ever scheduled.
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut receiver = input::prepare_input()?;
        let mut game = game.initialize().await?.ready()?;
        let mut game_loop = GameLoop {
            last_frame: browser::now()?,
            accumulated_delta: 0.0,
        };
        let renderer = Renderer::new(browser::context()?);
        let mut input_state = InputState::default();

        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            input::process_input(&mut input_state, &mut receiver);

            game_loop.accumulated_delta += (perf - game_loop.last_frame) as f32;
            game_loop.accumulated_delta = game_loop.accumulated_delta.min(MAX_ACCUMULATED_DELTA);
            let mut stepped = false;
            while game_loop.accumulated_delta > FRAME_SIZE {
                game.update(&input_state);
                game_loop.accumulated_delta -= FRAME_SIZE;
                stepped = true;
            }
            // one-shot events (click, resize) survive until an update saw them
            if stepped {
                input_state.end_frame();
            }
            game_loop.last_frame = perf;
            game.draw(&renderer);

            if let Some(callback) = f.borrow().as_ref() {
                if let Err(err) = browser::request_animation_frame(callback) {
                    error!("GameLoop: {:#}", err);
                }
            }
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }
}

// ==================== Geometry ====================
#[derive(Debug, Default, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }
}

/// Axis aligned box, `position` is the top left corner
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(position: Point, size: Size) -> Self {
        Rect { position, size }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect::new(Point { x, y }, Size { width, height })
    }

    pub fn from_center(center: Point, size: Size) -> Self {
        Rect::from_xywh(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.width
    }

    pub fn top(&self) -> f32 {
        self.position.y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.position.x + self.size.width * 0.5,
            y: self.position.y + self.size.height * 0.5,
        }
    }

    /// Strict overlap on both axes: boxes that only share an edge do not
    /// intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Same center, both sides multiplied by `scale`
    pub fn scaled_about_center(&self, scale: f32) -> Rect {
        Rect::from_center(
            self.center(),
            Size {
                width: self.size.width * scale,
                height: self.size.height * scale,
            },
        )
    }
}

// ==================== Rendering ====================
pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        // pixel art: no blurring when scaled
        context.set_image_smoothing_enabled(false);
        Renderer { context }
    }

    pub fn clear(&self, rect: &Rect) {
        self.context.clear_rect(
            rect.position.x.into(),
            rect.position.y.into(),
            rect.size.width.into(),
            rect.size.height.into(),
        );
    }

    pub fn fill_rect(&self, color: &str, rect: &Rect) {
        self.context.set_fill_style_str(color);
        self.context.fill_rect(
            rect.position.x.into(),
            rect.position.y.into(),
            rect.size.width.into(),
            rect.size.height.into(),
        );
    }

    pub fn draw_image(&self, image: &HtmlImageElement, destination: &Rect) {
        if let Err(err) = self
            .context
            .draw_image_with_html_image_element_and_dw_and_dh(
                image,
                destination.position.x.into(),
                destination.position.y.into(),
                destination.size.width.into(),
                destination.size.height.into(),
            )
        {
            error!("Renderer: could not draw image : {:#?}", err);
        }
    }

    #[cfg(debug_assertions)]
    pub fn stroke_rect(&self, color: &str, rect: &Rect) {
        self.context.set_stroke_style_str(color);
        self.context.stroke_rect(
            rect.position.x.into(),
            rect.position.y.into(),
            rect.size.width.into(),
            rect.size.height.into(),
        );
    }
}

/// Outline boxes in debug builds so hitboxes can be eyeballed
#[cfg(debug_assertions)]
pub trait DebugDraw {
    fn draw_debug(&self, renderer: &Renderer);
}

#[cfg(debug_assertions)]
impl DebugDraw for Rect {
    fn draw_debug(&self, renderer: &Renderer) {
        renderer.stroke_rect("#ff0000", self);
    }
}

// ==================== Images ====================
/// Asynchronously load an image from a given source path
/// # Arguments
/// * `source` - string slice to path/url
/// # Returns
/// * `Ok(HtmlImageElement)` - on load success
/// * `Err` - on load fail
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::create_html_image_element()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let owned_source = source.to_string();
    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!(
                "Error loading image {} : {:#?}",
                owned_source,
                err
            )));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callback alive until image is loaded or errors
    success_callback.forget();
    error_callback.forget();

    // Result<Result<(), Error>, oneshot::Canceled>
    // - first ? yields channel result : Result<(), Error>
    // - second ? yields image load result : () or propagating Error
    rx.await??;

    Ok(image)
}

/// Request every image at once; the first failure fails the whole batch.
/// Images come back in the order of `sources`.
pub async fn load_images(sources: &[String]) -> Result<Vec<HtmlImageElement>> {
    try_join_all(sources.iter().map(|source| async move {
        load_image(source)
            .await
            .with_context(|| format!("Failed to load image resource from : {}", source))
    }))
    .await
}
