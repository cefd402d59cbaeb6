//! In-memory page holding the calculator's elements
//!
//! Elements are looked up by id, the same ids the calculator form uses.
//! Lookups never panic; a missing or mistyped element simply yields `None`.

use std::collections::HashMap;

use crate::ui::canvas::Canvas;

/// Element ids of the calculator page
pub mod ids {
    pub const FORM: &str = "calculator-form";
    pub const WINDOW_OPENING_HEIGHT: &str = "window-opening-height";
    pub const WINDOW_OPENING_WIDTH: &str = "window-opening-width";
    pub const NUMBER_OF_PANE_COLUMNS: &str = "number-of-columns-of-panes";
    pub const NUMBER_OF_PANE_ROWS: &str = "number-of-rows-of-panes";
    pub const OUTER_FRAME_WIDTH: &str = "outer-frame-width";
    pub const INNER_FRAME_WIDTH: &str = "inner-frame-width";
    pub const SUBMIT_BUTTON: &str = "calculate-sizes";
    pub const PANE_WIDTH: &str = "pane-width";
    pub const PANE_HEIGHT: &str = "pane-height";
    pub const WINDOW_CANVAS: &str = "window-canvas";
}

#[derive(Debug)]
pub enum Element {
    Form,
    Input { value: String },
    Button,
    Output { text: String },
    Canvas(Canvas),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Form => ElementKind::Form,
            Element::Input { .. } => ElementKind::Input,
            Element::Button => ElementKind::Button,
            Element::Output { .. } => ElementKind::Output,
            Element::Canvas(_) => ElementKind::Canvas,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Form,
    Input,
    Button,
    Output,
    Canvas,
}

#[derive(Debug, Default)]
pub struct Page {
    elements: HashMap<String, Element>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard calculator page with every element present and empty
    pub fn calculator() -> Self {
        let mut page = Self::new();
        page.insert(ids::FORM, Element::Form);
        for id in [
            ids::WINDOW_OPENING_HEIGHT,
            ids::WINDOW_OPENING_WIDTH,
            ids::NUMBER_OF_PANE_COLUMNS,
            ids::NUMBER_OF_PANE_ROWS,
            ids::OUTER_FRAME_WIDTH,
            ids::INNER_FRAME_WIDTH,
        ] {
            page.insert(id, Element::Input { value: String::new() });
        }
        page.insert(ids::SUBMIT_BUTTON, Element::Button);
        page.insert(ids::PANE_WIDTH, Element::Output { text: String::new() });
        page.insert(ids::PANE_HEIGHT, Element::Output { text: String::new() });
        page.insert(ids::WINDOW_CANVAS, Element::Canvas(Canvas::new()));
        page
    }

    pub fn insert(&mut self, id: impl Into<String>, element: Element) -> Option<Element> {
        self.elements.insert(id.into(), element)
    }

    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    /// True when `id` exists and is of the expected kind
    pub fn has(&self, id: &str, kind: ElementKind) -> bool {
        self.elements.get(id).is_some_and(|element| element.kind() == kind)
    }

    pub fn input_value(&self, id: &str) -> Option<&str> {
        match self.elements.get(id) {
            Some(Element::Input { value }) => Some(value),
            _ => None,
        }
    }

    /// Sets an input's text; returns false when no such input exists
    pub fn set_input_value(&mut self, id: &str, text: impl Into<String>) -> bool {
        match self.elements.get_mut(id) {
            Some(Element::Input { value }) => {
                *value = text.into();
                true
            }
            _ => false,
        }
    }

    pub fn output_text(&self, id: &str) -> Option<&str> {
        match self.elements.get(id) {
            Some(Element::Output { text }) => Some(text),
            _ => None,
        }
    }

    /// Sets an output's text; returns false when no such output exists
    pub fn set_output_text(&mut self, id: &str, content: impl Into<String>) -> bool {
        match self.elements.get_mut(id) {
            Some(Element::Output { text }) => {
                *text = content.into();
                true
            }
            _ => false,
        }
    }

    pub fn canvas(&self, id: &str) -> Option<&Canvas> {
        match self.elements.get(id) {
            Some(Element::Canvas(canvas)) => Some(canvas),
            _ => None,
        }
    }

    pub fn canvas_mut(&mut self, id: &str) -> Option<&mut Canvas> {
        match self.elements.get_mut(id) {
            Some(Element::Canvas(canvas)) => Some(canvas),
            _ => None,
        }
    }
}
