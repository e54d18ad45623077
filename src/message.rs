//! Message panel: which message is active, what it says, and where it goes.
use crate::browser;
use crate::config::ContentSource;
use crate::world::objects::InteractiveObject;
use anyhow::{anyhow, Result};
use web_sys::{Element, HtmlCollection};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Active {
    Welcome,
    Object(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    /// child index in the page's template collection
    Template(usize),
    Text { title: String, body: String },
}

impl MessageContent {
    pub fn select(active: Active, source: &ContentSource, objects: &[InteractiveObject]) -> Self {
        match source {
            ContentSource::Templates => match active {
                Active::Welcome => MessageContent::Template(0),
                Active::Object(index) => MessageContent::Template(index + 1),
            },
            ContentSource::Inline {
                welcome_title,
                welcome_body,
            } => match active.object(objects) {
                Some(object) => MessageContent::Text {
                    title: object.title.clone().unwrap_or_else(|| object.id.clone()),
                    body: object.content.clone().unwrap_or_default(),
                },
                None => MessageContent::Text {
                    title: welcome_title.clone(),
                    body: welcome_body.clone(),
                },
            },
        }
    }
}

impl Active {
    fn object<'a>(&self, objects: &'a [InteractiveObject]) -> Option<&'a InteractiveObject> {
        match self {
            Active::Welcome => None,
            Active::Object(index) => objects.get(*index),
        }
    }
}

/// Remembers what the panel shows so it is only rewritten on change
#[derive(Debug, Default)]
pub struct MessageBoard {
    shown: Option<Active>,
}

impl MessageBoard {
    /// `Some(active)` when it differs from what was last shown
    pub fn poll(&mut self, active: Active) -> Option<Active> {
        if self.shown == Some(active) {
            None
        } else {
            self.shown = Some(active);
            Some(active)
        }
    }
}

pub trait MessageSink {
    fn show(&mut self, content: &MessageContent) -> Result<()>;
}

pub struct DomMessagePanel {
    panel: Element,
    templates: Option<HtmlCollection>,
}

impl DomMessagePanel {
    /// The template container is optional: inline content does not need it
    pub fn new() -> Result<Self> {
        let panel = browser::element_by_id(browser::html::MESSAGE_BOX_ID)?;
        let templates = browser::element_by_id(browser::html::TEMPLATES_ID)
            .ok()
            .map(|container| container.children());
        Ok(DomMessagePanel { panel, templates })
    }

    fn show_template(&self, index: usize) -> Result<()> {
        let template = self
            .templates
            .as_ref()
            .ok_or_else(|| anyhow!("No '#{}' element for templates", browser::html::TEMPLATES_ID))?
            .item(index as u32)
            .ok_or_else(|| anyhow!("No message template at index {}", index))?;
        self.panel.set_inner_html(&template.inner_html());
        Ok(())
    }

    fn show_text(&self, title: &str, body: &str) -> Result<()> {
        let document = browser::document()?;
        self.panel.set_inner_html("");
        for (tag, text) in [("h2", title), ("p", body)] {
            let element = document
                .create_element(tag)
                .map_err(|err| anyhow!("Could not create <{}> : {:#?}", tag, err))?;
            element.set_text_content(Some(text));
            self.panel
                .append_child(&element)
                .map_err(|err| anyhow!("Could not append <{}> : {:#?}", tag, err))?;
        }
        Ok(())
    }
}

impl MessageSink for DomMessagePanel {
    fn show(&mut self, content: &MessageContent) -> Result<()> {
        match content {
            MessageContent::Template(index) => self.show_template(*index),
            MessageContent::Text { title, body } => self.show_text(title, body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ObjectConfig;
    use crate::engine::Size;
    use crate::world::objects::Visual;

    fn objects() -> Vec<InteractiveObject> {
        let about = ObjectConfig {
            id: "about".into(),
            title: Some("About".into()),
            content: Some("Pixel artist".into()),
            ..ObjectConfig::default()
        };
        let contact = ObjectConfig {
            id: "contact".into(),
            ..ObjectConfig::default()
        };
        [about, contact]
            .iter()
            .map(|config| InteractiveObject::new(config, Visual::Color, Size::new(800.0, 600.0)))
            .collect()
    }

    fn inline() -> ContentSource {
        ContentSource::Inline {
            welcome_title: "Welcome".into(),
            welcome_body: "Walk up to something".into(),
        }
    }

    #[test]
    fn templates_are_offset_by_the_welcome() {
        let objects = objects();
        let source = ContentSource::Templates;
        assert_eq!(
            MessageContent::select(Active::Welcome, &source, &objects),
            MessageContent::Template(0)
        );
        assert_eq!(
            MessageContent::select(Active::Object(1), &source, &objects),
            MessageContent::Template(2)
        );
    }

    #[test]
    fn inline_text_comes_from_the_object() {
        let objects = objects();
        assert_eq!(
            MessageContent::select(Active::Object(0), &inline(), &objects),
            MessageContent::Text {
                title: "About".into(),
                body: "Pixel artist".into()
            }
        );
        // untitled objects fall back to their id
        assert_eq!(
            MessageContent::select(Active::Object(1), &inline(), &objects),
            MessageContent::Text {
                title: "contact".into(),
                body: String::new()
            }
        );
        assert_eq!(
            MessageContent::select(Active::Welcome, &inline(), &objects),
            MessageContent::Text {
                title: "Welcome".into(),
                body: "Walk up to something".into()
            }
        );
    }

    #[test]
    fn board_reports_only_changes() {
        let mut board = MessageBoard::default();
        assert_eq!(board.poll(Active::Welcome), Some(Active::Welcome));
        assert_eq!(board.poll(Active::Welcome), None);
        assert_eq!(board.poll(Active::Object(2)), Some(Active::Object(2)));
        assert_eq!(board.poll(Active::Object(2)), None);
        assert_eq!(board.poll(Active::Welcome), Some(Active::Welcome));
    }
}
