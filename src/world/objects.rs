use crate::config::{Anchor, HoverConfig, ObjectConfig};
use crate::engine::{Point, Rect, Renderer, Size};
use web_sys::HtmlImageElement;

/// Current scale easing toward a target scale
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HoverScale {
    pub current: f32,
    pub target: f32,
}

impl Default for HoverScale {
    fn default() -> Self {
        HoverScale {
            current: 1.0,
            target: 1.0,
        }
    }
}

impl HoverScale {
    pub fn update(&mut self, hovered: bool, config: &HoverConfig) {
        self.target = if hovered { config.scale } else { 1.0 };
        self.current += (self.target - self.current) * config.smoothing;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visual {
    Color,
    /// index into the scene's object images
    Image(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveObject {
    pub id: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub color: String,
    pub visual: Visual,
    anchor: Anchor,
    size: Size,
    bounds: Rect,
    hover: HoverScale,
}

impl InteractiveObject {
    pub fn new(config: &ObjectConfig, visual: Visual, canvas: Size) -> Self {
        let mut object = InteractiveObject {
            id: config.id.clone(),
            title: config.title.clone(),
            content: config.content.clone(),
            color: config.color.clone(),
            visual,
            anchor: config.anchor,
            size: config.size,
            bounds: Rect::default(),
            hover: HoverScale::default(),
        };
        object.layout(canvas);
        object
    }

    /// Recompute the position from the anchor for a new canvas size
    pub fn layout(&mut self, canvas: Size) {
        self.bounds = Rect::new(self.anchor.resolve(canvas), self.size);
    }

    /// Unscaled box, used for collision and hover tests
    pub fn bounding_box(&self) -> Rect {
        self.bounds
    }

    /// Box as drawn, grown around its center by the hover scale
    pub fn draw_box(&self) -> Rect {
        self.bounds.scaled_about_center(self.hover.current)
    }

    pub fn hover(&self) -> HoverScale {
        self.hover
    }

    /// Ease the scale; returns whether `pointer` is over the object
    pub fn update_hover(&mut self, pointer: Option<Point>, config: &HoverConfig) -> bool {
        let hovered = pointer.map_or(false, |point| self.bounds.contains(point));
        self.hover.update(hovered, config);
        hovered
    }

    pub fn draw(&self, renderer: &Renderer, images: &[HtmlImageElement]) {
        let image = match self.visual {
            Visual::Image(index) => images.get(index),
            Visual::Color => None,
        };
        match image {
            Some(image) => renderer.draw_image(image, &self.draw_box()),
            None => renderer.fill_rect(&self.color, &self.draw_box()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn object() -> InteractiveObject {
        let config = ObjectConfig {
            id: "about".into(),
            anchor: Anchor::from_bottom(200.0, -100.0),
            ..ObjectConfig::default()
        };
        InteractiveObject::new(&config, Visual::Color, Size::new(800.0, 600.0))
    }

    #[test]
    fn layout_follows_the_canvas() {
        let mut object = object();
        assert_eq!(object.bounding_box(), Rect::from_xywh(200.0, 500.0, 50.0, 50.0));
        object.layout(Size::new(800.0, 400.0));
        assert_eq!(object.bounding_box(), Rect::from_xywh(200.0, 300.0, 50.0, 50.0));
    }

    #[test]
    fn hover_eases_toward_the_scale_and_back() {
        let config = HoverConfig {
            scale: 1.2,
            smoothing: 0.5,
        };
        let mut object = object();
        let inside = Some(Point::new(225.0, 525.0));
        assert!(object.update_hover(inside, &config));
        assert_relative_eq!(object.hover().current, 1.1, epsilon = 1e-5);
        assert!(object.update_hover(inside, &config));
        assert_relative_eq!(object.hover().current, 1.15, epsilon = 1e-5);
        for _ in 0..40 {
            object.update_hover(inside, &config);
        }
        assert_relative_eq!(object.hover().current, 1.2, epsilon = 1e-4);

        assert!(!object.update_hover(None, &config));
        assert_relative_eq!(object.hover().target, 1.0);
        assert_relative_eq!(object.hover().current, 1.1, epsilon = 1e-4);
    }

    #[test]
    fn scaled_draw_box_grows_from_the_center() {
        let config = HoverConfig {
            scale: 1.2,
            smoothing: 1.0,
        };
        let mut object = object();
        object.update_hover(Some(Point::new(210.0, 510.0)), &config);
        let drawn = object.draw_box();
        assert_relative_eq!(drawn.center().x, 225.0, epsilon = 1e-4);
        assert_relative_eq!(drawn.center().y, 525.0, epsilon = 1e-4);
        assert_relative_eq!(drawn.size.width, 60.0);
        // hover is tested against the unscaled box
        assert!(!object.update_hover(Some(Point::new(197.0, 525.0)), &config));
    }
}
