use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Declarative content handed to an overlay's render function.
///
/// Elements are materialized into [`crate::Document`] nodes when mounted.
/// Children stack vertically; a node's extent is its declared size, or the
/// bounding size of its children when left at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    pub class: String,
    pub text: Option<String>,
    pub width: u16,
    pub height: u16,
    pub children: Vec<Element>,
}

impl Element {
    pub fn box_() -> Self {
        Self {
            id: generate_id("box"),
            ..Default::default()
        }
    }

    pub fn col() -> Self {
        Self {
            id: generate_id("col"),
            ..Default::default()
        }
    }

    /// Single-line text; sized to its character count.
    pub fn text(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            id: generate_id("text"),
            width: content.chars().count().min(u16::MAX as usize) as u16,
            height: 1,
            text: Some(content),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Extent after accounting for children: declared size wins, otherwise
    /// the widest child and the sum of child heights.
    pub fn extent(&self) -> (u16, u16) {
        let (content_width, content_height) =
            self.children
                .iter()
                .map(Element::extent)
                .fold((0u16, 0u16), |(w, h), (cw, ch)| {
                    (w.max(cw), h.saturating_add(ch))
                });

        let width = if self.width > 0 {
            self.width
        } else {
            content_width
        };
        let height = if self.height > 0 {
            self.height
        } else {
            content_height
        };
        (width, height)
    }
}
