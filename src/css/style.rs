//! Inline style: the positioning properties a behavior may override on a node.
//!
//! `InlineStyle` stores only what has been set inline; an unset property falls
//! back to the stylesheet. `StylePatch` describes a partial update where each
//! property is either kept, set, or unset (the equivalent of assigning `''`).

use std::fmt::{self, Write as _};

use crate::geometry::Px;

/// CSS `position` values a behavior can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Absolute,
    Fixed,
}

impl Position {
    /// CSS keyword for this value.
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Absolute => "absolute",
            Position::Fixed => "fixed",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One property update inside a [`StylePatch`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Patch<T> {
    /// Leave the current value untouched.
    #[default]
    Keep,
    /// Assign a value.
    Set(T),
    /// Remove the inline value.
    Unset,
}

impl<T: Copy> Patch<T> {
    fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Patch::Keep => {}
            Patch::Set(value) => *slot = Some(value),
            Patch::Unset => *slot = None,
        }
    }
}

/// A partial inline-style update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StylePatch {
    pub position: Patch<Position>,
    pub top: Patch<Px>,
    pub bottom: Patch<Px>,
    pub width: Patch<Px>,
    pub height: Patch<Px>,
}

impl StylePatch {
    /// A patch that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// A patch that unsets every property.
    pub fn clear() -> Self {
        Self {
            position: Patch::Unset,
            top: Patch::Unset,
            bottom: Patch::Unset,
            width: Patch::Unset,
            height: Patch::Unset,
        }
    }

    pub fn position(mut self, value: Position) -> Self {
        self.position = Patch::Set(value);
        self
    }

    pub fn top(mut self, value: Px) -> Self {
        self.top = Patch::Set(value);
        self
    }

    pub fn bottom(mut self, value: Px) -> Self {
        self.bottom = Patch::Set(value);
        self
    }

    pub fn width(mut self, value: Px) -> Self {
        self.width = Patch::Set(value);
        self
    }

    pub fn height(mut self, value: Px) -> Self {
        self.height = Patch::Set(value);
        self
    }

    /// Unset `top` (builder).
    pub fn unset_top(mut self) -> Self {
        self.top = Patch::Unset;
        self
    }
}

/// Inline style declarations set on a node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InlineStyle {
    pub position: Option<Position>,
    pub top: Option<Px>,
    pub bottom: Option<Px>,
    pub width: Option<Px>,
    pub height: Option<Px>,
}

impl InlineStyle {
    /// Apply a partial update.
    pub fn apply(&mut self, patch: &StylePatch) {
        patch.position.apply_to(&mut self.position);
        patch.top.apply_to(&mut self.top);
        patch.bottom.apply_to(&mut self.bottom);
        patch.width.apply_to(&mut self.width);
        patch.height.apply_to(&mut self.height);
    }

    /// Whether no property is set inline.
    pub fn is_empty(&self) -> bool {
        *self == InlineStyle::default()
    }

    /// Serialize as a `style` attribute value, e.g. `position: fixed; top: 10px`.
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        let mut push = |name: &str, value: &dyn fmt::Display| {
            if !out.is_empty() {
                out.push_str("; ");
            }
            let _ = write!(out, "{name}: {value}");
        };

        if let Some(position) = self.position {
            push("position", &position);
        }
        for (name, value) in [
            ("top", self.top),
            ("bottom", self.bottom),
            ("width", self.width),
            ("height", self.height),
        ] {
            if let Some(px) = value {
                push(name, &PxDisplay(px));
            }
        }
        out
    }
}

/// Formats a pixel length the way browsers serialize it (`-420px`, `12.5px`).
struct PxDisplay(Px);

impl fmt::Display for PxDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            f.write_str("0px")
        } else {
            write!(f, "{}px", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_set_and_keep() {
        let mut style = InlineStyle::default();
        style.apply(&StylePatch::new().position(Position::Fixed).top(10.0).width(300.0));
        style.apply(&StylePatch::new().top(20.0));
        assert_eq!(style.position, Some(Position::Fixed));
        assert_eq!(style.top, Some(20.0));
        assert_eq!(style.width, Some(300.0));
        assert_eq!(style.bottom, None);
    }

    #[test]
    fn apply_unset() {
        let mut style = InlineStyle::default();
        style.apply(&StylePatch::new().position(Position::Absolute).top(5.0).bottom(0.0));
        style.apply(&StylePatch::new().unset_top());
        assert_eq!(style.top, None);
        assert_eq!(style.bottom, Some(0.0));

        style.apply(&StylePatch::clear());
        assert!(style.is_empty());
    }

    #[test]
    fn css_text_order_and_units() {
        let mut style = InlineStyle::default();
        assert_eq!(style.css_text(), "");

        style.apply(&StylePatch::new().width(300.0).top(-420.0).position(Position::Fixed));
        assert_eq!(style.css_text(), "position: fixed; top: -420px; width: 300px");

        style.apply(&StylePatch::new().unset_top().bottom(0.0).height(12.5));
        assert_eq!(
            style.css_text(),
            "position: fixed; bottom: 0px; width: 300px; height: 12.5px"
        );
    }
}
