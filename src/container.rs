//! Host for rendered figures and the widgets of interactive questions.
//!
//! A [`Container`] plays the part of the page element a question renders
//! into: builders append surfaces to it, the placement flow adds an
//! instruction line and a confirm button. Children are shared handles so a
//! session can keep updating the widgets it created. The whole container
//! serializes to an HTML fragment.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use glam::DVec2;

use crate::render::surface::{SurfaceRef, SvgSurface};

/// Shared handle to a widget; the container and the session both hold one.
pub type WidgetRef = Rc<RefCell<Widget>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// A line of instructions.
    Instruction,
    /// The button that commits a placement.
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub kind: WidgetKind,
    pub text: String,
    pub enabled: bool,
    pub visible: bool,
}

/// One child of a container.
#[derive(Debug, Clone)]
pub enum Child {
    Figure(SurfaceRef),
    Widget(WidgetRef),
}

#[derive(Debug, Clone, Default)]
pub struct Container {
    children: Vec<Child>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a surface of the given device size and append it.
    pub fn append_surface(&mut self, size: DVec2) -> SurfaceRef {
        let surface = SvgSurface::shared(size);
        self.children.push(Child::Figure(surface.clone()));
        surface
    }

    /// Append a visible widget.
    pub fn append_widget(&mut self, kind: WidgetKind, text: &str, enabled: bool) -> WidgetRef {
        let widget = Rc::new(RefCell::new(Widget {
            kind,
            text: text.to_string(),
            enabled,
            visible: true,
        }));
        self.children.push(Child::Widget(widget.clone()));
        widget
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Drop every child, e.g. when the next question replaces this one.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Surfaces in document order.
    pub fn figures(&self) -> impl Iterator<Item = &SurfaceRef> {
        self.children.iter().filter_map(|child| match child {
            Child::Figure(surface) => Some(surface),
            Child::Widget(_) => None,
        })
    }

    pub fn widgets(&self) -> impl Iterator<Item = &WidgetRef> {
        self.children.iter().filter_map(|child| match child {
            Child::Widget(widget) => Some(widget),
            Child::Figure(_) => None,
        })
    }

    /// SVG of every surface, in order.
    pub fn to_svg(&self) -> Vec<String> {
        self.figures().map(|s| s.borrow().to_svg()).collect()
    }

    /// HTML fragment with figures inline; hidden widgets are omitted.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<div class=\"geo-container\">\n");
        for child in &self.children {
            match child {
                Child::Figure(surface) => {
                    out.push_str(&surface.borrow().to_svg());
                    out.push('\n');
                }
                Child::Widget(widget) => {
                    let widget = widget.borrow();
                    if !widget.visible {
                        continue;
                    }
                    let text = escape_html(&widget.text);
                    let _ = match widget.kind {
                        WidgetKind::Instruction => {
                            writeln!(out, "<p class=\"geo-instruction\">{text}</p>")
                        }
                        WidgetKind::Confirm => writeln!(
                            out,
                            "<button class=\"geo-confirm\"{}>{text}</button>",
                            if widget.enabled { "" } else { " disabled" },
                        ),
                    };
                }
            }
        }
        out.push_str("</div>\n");
        out
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn hidden_widgets_do_not_render() {
        let mut c = Container::new();
        c.append_surface(dvec2(100.0, 80.0));
        let confirm = c.append_widget(WidgetKind::Confirm, "OK", false);
        assert!(c.to_html().contains("<button class=\"geo-confirm\" disabled>OK</button>"));
        confirm.borrow_mut().enabled = true;
        assert!(c.to_html().contains("<button class=\"geo-confirm\">OK</button>"));
        confirm.borrow_mut().visible = false;
        assert!(!c.to_html().contains("<button"));
        assert_eq!(c.to_svg().len(), 1);
        assert_eq!(c.widgets().count(), 1);
    }

    #[test]
    fn instruction_text_is_escaped() {
        let mut c = Container::new();
        c.append_widget(WidgetKind::Instruction, "x < 3 & y > 1", true);
        assert!(c.to_html().contains("x &lt; 3 &amp; y &gt; 1"));
    }
}
