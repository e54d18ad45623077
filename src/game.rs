use crate::browser;
use crate::config::{PortfolioConfig, CONFIG_PATH};
use crate::engine::assets::AssetState;
use crate::engine::input::InputState;
#[cfg(debug_assertions)]
use crate::engine::DebugDraw;
use crate::engine::{self, Game, Point, Rect, Renderer, Size};
use crate::message::{DomMessagePanel, MessageBoard, MessageSink};
use crate::sprite::SpriteSheet;
use crate::world::World;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::join;
use std::rc::Rc;
use web_sys::{HtmlCanvasElement, HtmlImageElement};

/// ┌───────────────────── Portfolio Overview ────────────────────────────────┐
/// │                                                                         │
/// │    ┌─────────────┐          ┌─────────────┐          ┌─────────────┐    │
/// │    │  engine.rs  │  update  │   game.rs   │  update  │  world/     │    │
/// │    │  GameLoop   ├─────────►│  Portfolio  ├─────────►│  World      │    │
/// │    │             │   draw   │  Scene      │          │  (no DOM)   │    │
/// │    └──────┬──────┘          └──────┬──────┘          └─────────────┘    │
/// │           │                        │ draw                               │
/// │     ┌─────┴──────┐           ┌─────┴──────────────┐                     │
/// │     │ InputState │           │ canvas, cursor,    │                     │
/// │     │ (drained   │           │ #message-box       │                     │
/// │     │ per frame) │           └────────────────────┘                     │
/// │     └────────────┘                                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
pub struct Portfolio {
    /// `Pending` until `initialize` settles it; frames only run once `Loaded`
    scene: AssetState<Scene>,
}

impl Default for Portfolio {
    fn default() -> Self {
        Portfolio::new()
    }
}

impl Portfolio {
    pub fn new() -> Self {
        Portfolio {
            scene: AssetState::Pending,
        }
    }

    /// A page without `portfolio.json` still works, with the defaults
    async fn load_config() -> PortfolioConfig {
        match browser::fetch_json::<PortfolioConfig>(CONFIG_PATH).await {
            Ok(config) => config,
            Err(err) => {
                log!(
                    "Warning: using default configuration, could not load {} : {:#}",
                    CONFIG_PATH,
                    err
                );
                PortfolioConfig::default()
            }
        }
    }

    async fn load_scene() -> Result<Scene> {
        let config = Self::load_config().await;
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", CONFIG_PATH))?;

        let sheet = Rc::new(SpriteSheet::new(
            &config.animation,
            config.character.sprite.clone(),
        ));
        let sprite_sources = sheet.cell_paths();
        let object_sources: Vec<String> = config
            .objects
            .iter()
            .filter_map(|object| object.image.clone())
            .collect();

        // sprite cells and object images are all requested at once
        let (sprites, object_images) = join!(
            engine::load_images(&sprite_sources),
            engine::load_images(&object_sources),
        );
        let (sprites, object_images) = (sprites?, object_images?);

        let canvas = browser::canvas()?;
        let (width, height) = browser::fit_canvas_to_display(&canvas);
        let world = World::new(&config, sheet, Size::new(width as f32, height as f32));
        log!(
            "Portfolio loaded : {} objects, {} sprite cells, {}x{} canvas",
            world.objects().len(),
            sprites.len(),
            width,
            height
        );

        Ok(Scene {
            world,
            sprites,
            object_images,
            panel: DomMessagePanel::new()?,
            board: MessageBoard::default(),
            canvas,
            cursor_hovering: None,
        })
    }
}

#[async_trait(?Send)]
impl Game for Portfolio {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self.scene {
            AssetState::Pending => Ok(Box::new(Portfolio {
                scene: AssetState::from(Self::load_scene().await),
            })),
            _ => Err(anyhow!("Portfolio is already initialized")),
        }
    }

    fn ready(self: Box<Self>) -> Result<Box<dyn Game>> {
        let scene = self.scene.into_result()?;
        Ok(Box::new(Portfolio {
            scene: AssetState::Loaded(scene),
        }))
    }

    fn update(&mut self, input: &InputState) {
        if let Some(scene) = self.scene.loaded_mut() {
            scene.world.update(input);
        }
    }

    fn draw(&mut self, renderer: &Renderer) {
        if let Some(scene) = self.scene.loaded_mut() {
            scene.draw(renderer);
        }
    }
}

pub struct Scene {
    world: World,
    /// sprite sheet cells, row major
    sprites: Vec<HtmlImageElement>,
    object_images: Vec<HtmlImageElement>,
    panel: DomMessagePanel,
    board: MessageBoard,
    canvas: HtmlCanvasElement,
    /// hover state the cursor style was last set for
    cursor_hovering: Option<bool>,
}

impl Scene {
    fn draw(&mut self, renderer: &Renderer) {
        renderer.clear(&Rect::new(Point::default(), self.world.bounds()));
        // draw order matters : objects -> character
        for object in self.world.objects() {
            object.draw(renderer, &self.object_images);
        }
        self.world.character().draw(renderer, &self.sprites);

        #[cfg(debug_assertions)]
        {
            self.world.hitbox().draw_debug(renderer);
        }

        self.present();
    }

    /// DOM side effects, written only when the state they show changed
    fn present(&mut self) {
        if self.board.poll(self.world.active()).is_some() {
            if let Err(err) = self.panel.show(&self.world.message()) {
                error!("Could not update the message panel : {:#}", err);
            }
        }

        let hovering = self.world.is_hovering();
        if self.cursor_hovering != Some(hovering) {
            let cursor = if hovering { "pointer" } else { "default" };
            match browser::set_cursor(&self.canvas, cursor) {
                Ok(()) => self.cursor_hovering = Some(hovering),
                Err(err) => error!("{:#}", err),
            }
        }
    }
}
