//! Everything the page simulates, with no browser dependency in `update`.
//!
//! ```text
//!  InputState ──► World::update
//!                  ├─► resize     : relayout objects, character back home
//!                  ├─► click      : new character target
//!                  ├─► step       : keys / seek ─► clamp ─► animate
//!                  ├─► hover      : ease object scales, cursor state
//!                  └─► collision  : hitbox vs objects ─► Active
//! ```
pub mod collision;
pub mod movement;
pub mod objects;

use self::objects::{InteractiveObject, Visual};
use crate::config::{Anchor, CollisionConfig, ContentSource, HoverConfig, PortfolioConfig};
use crate::engine::input::InputState;
use crate::engine::Size;
use crate::message::{Active, MessageContent};
use crate::sprite::character::Character;
use crate::sprite::SpriteSheet;
use std::rc::Rc;

pub struct World {
    character: Character,
    objects: Vec<InteractiveObject>,
    bounds: Size,
    home: Anchor,
    hover: HoverConfig,
    collision: CollisionConfig,
    content: ContentSource,
    active: Active,
    hovering: bool,
}

impl World {
    /// Objects with an image get consecutive image indices, in config order
    pub fn new(config: &PortfolioConfig, sheet: Rc<SpriteSheet>, bounds: Size) -> Self {
        let mut next_image = 0;
        let objects = config
            .objects
            .iter()
            .map(|object| {
                let visual = match object.image {
                    Some(_) => {
                        next_image += 1;
                        Visual::Image(next_image - 1)
                    }
                    None => Visual::Color,
                };
                InteractiveObject::new(object, visual, bounds)
            })
            .collect();

        let character = &config.character;
        World {
            character: Character::new(
                character.home.resolve(bounds),
                character.size,
                character.speed,
                character.color.clone(),
                sheet,
            ),
            objects,
            bounds,
            home: character.home,
            hover: config.hover,
            collision: config.collision,
            content: config.content.clone(),
            active: Active::Welcome,
            hovering: false,
        }
    }

    /// One fixed timestep. Order matters: input, movement, clamp, hover,
    /// collision.
    pub fn update(&mut self, input: &InputState) {
        if let Some(bounds) = input.resize() {
            self.resize(bounds);
        }
        if let Some(click) = input.click() {
            self.character.set_target(click);
        }

        self.character.step(input.key_axes(), self.bounds);

        let pointer = input.pointer();
        let mut hovering = false;
        for object in &mut self.objects {
            hovering |= object.update_hover(pointer, &self.hover);
        }
        self.hovering = hovering;

        let hitbox = collision::hitbox(self.character.bounding_box(), self.collision.hitbox);
        self.active = collision::find_active(
            &hitbox,
            self.objects.iter().map(InteractiveObject::bounding_box),
            self.collision.policy,
        )
        .map_or(Active::Welcome, Active::Object);
    }

    pub fn resize(&mut self, bounds: Size) {
        self.bounds = bounds;
        for object in &mut self.objects {
            object.layout(bounds);
        }
        self.character.reset_to(self.home.resolve(bounds));
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn objects(&self) -> &[InteractiveObject] {
        &self.objects
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn active(&self) -> Active {
        self.active
    }

    pub fn message(&self) -> MessageContent {
        MessageContent::select(self.active, &self.content, &self.objects)
    }

    /// Whether the pointer is over any object
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn hitbox(&self) -> crate::engine::Rect {
        collision::hitbox(self.character.bounding_box(), self.collision.hitbox)
    }
}
