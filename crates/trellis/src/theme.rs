//! Layout theming. A [`Theme`] is an explicit value with an optional
//! fallback; lookups walk the chain and finish at built-in defaults.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    geom::Edges,
    layout::{Align, Alignment},
    surface::Color,
};

/// Padding used when no theme in the chain sets one.
pub const DEFAULT_PADDING: u32 = 4;
/// Spacing used when no theme in the chain sets one.
pub const DEFAULT_SPACING: f32 = 4.0;

/// Container defaults. Every field is optional; unset fields defer to the
/// fallback theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    /// Padding inside single-child containers.
    pub padding: Option<Edges>,
    /// Gap between children of multi-child containers.
    pub spacing: Option<f32>,
    /// Child placement inside padding containers.
    pub alignment: Option<Alignment>,
    /// Background fill for containers.
    pub background: Option<Color>,
    /// Theme consulted for unset fields.
    #[serde(skip)]
    pub fallback: Option<Rc<Theme>>,
}

impl Theme {
    /// Parse a theme from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Attach a fallback theme.
    pub fn with_fallback(mut self, fallback: Rc<Self>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// First value of a field along the fallback chain.
    fn lookup<T: Copy>(&self, f: impl Fn(&Self) -> Option<T>) -> Option<T> {
        let mut cur = Some(self);
        while let Some(theme) = cur {
            if let Some(v) = f(theme) {
                return Some(v);
            }
            cur = theme.fallback.as_deref();
        }
        None
    }

    /// Effective padding.
    pub fn padding(&self) -> Edges {
        self.lookup(|t| t.padding)
            .unwrap_or_else(|| Edges::all(DEFAULT_PADDING))
    }

    /// Effective spacing.
    pub fn spacing(&self) -> f32 {
        self.lookup(|t| t.spacing).unwrap_or(DEFAULT_SPACING)
    }

    /// Effective alignment.
    pub fn alignment(&self) -> Alignment {
        self.lookup(|t| t.alignment)
            .unwrap_or_else(|| Alignment::both(Align::Stretch))
    }

    /// Effective background, if any theme in the chain sets one.
    pub fn background(&self) -> Option<Color> {
        self.lookup(|t| t.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let t = Theme::default();
        assert_eq!(t.padding(), Edges::all(4));
        assert_eq!(t.spacing(), 4.0);
        assert_eq!(t.alignment(), Alignment::both(Align::Stretch));
        assert_eq!(t.background(), None);
    }

    #[test]
    fn fallback_chain() -> Result<()> {
        let base = Rc::new(Theme {
            spacing: Some(10.0),
            padding: Some(Edges::all(1)),
            ..Default::default()
        });
        let mid = Rc::new(
            Theme {
                padding: Some(Edges::all(2)),
                ..Default::default()
            }
            .with_fallback(base),
        );
        let top = Theme::from_json(r#"{"background": {"r": 1, "g": 2, "b": 3, "a": 255}}"#)?
            .with_fallback(mid);
        assert_eq!(top.padding(), Edges::all(2));
        assert_eq!(top.spacing(), 10.0);
        assert_eq!(top.background(), Some(Color::rgb(1, 2, 3)));
        Ok(())
    }

    #[test]
    fn from_json_rejects_unknown() {
        assert!(matches!(
            Theme::from_json(r#"{"colour": 1}"#),
            Err(crate::error::Error::Theme(_))
        ));
    }

    #[test]
    fn from_json_alignment() -> Result<()> {
        let t = Theme::from_json(
            r#"{"alignment": {"horizontal": "center", "vertical": "end"}, "padding": {"top": 1, "right": 2, "bottom": 3, "left": 4}}"#,
        )?;
        assert_eq!(t.alignment().horizontal, Align::Center);
        assert_eq!(t.padding(), Edges::new(1, 2, 3, 4));
        Ok(())
    }
}
