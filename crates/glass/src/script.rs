//! Scripted interaction sessions.
//!
//! A session is a TOML list of timestamped steps. Elements are named by the
//! labels the demo tree gives them.
//!
//! ```toml
//! [[step]]
//! at_ms = 0.0
//! event = "pointer_over"
//! target = "hero.docs"
//!
//! [[step]]
//! at_ms = 250.0
//! event = "render"
//! ```

use serde::Deserialize;

use glass_ui::GlassResult;

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Action {
    /// Pointer entered a surface.
    PointerEnter {
        /// Surface label.
        surface: String,
    },
    /// Pointer left a surface.
    PointerLeave {
        /// Surface label.
        surface: String,
    },
    /// Pointer moved over an element.
    PointerOver {
        /// Element label.
        target: String,
    },
    /// Pointer moved off an element.
    PointerOut {
        /// Element label.
        target: String,
        /// Element the pointer moved onto.
        #[serde(default)]
        related: Option<String>,
    },
    /// An element received focus.
    FocusIn {
        /// Element label.
        target: String,
    },
    /// An element lost focus.
    FocusOut {
        /// Element label.
        target: String,
        /// Element receiving focus next.
        #[serde(default)]
        related: Option<String>,
    },
    /// Pointer moved to a position.
    PointerMove {
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
    },
    /// Global pointer moved (outside any surface's own events).
    GlobalPointer {
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
    },
    /// A finger touched an element.
    TouchStart {
        /// Element label.
        target: String,
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
    },
    /// The finger moved.
    TouchMove {
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
    },
    /// The finger lifted.
    TouchEnd,
    /// The touch was cancelled.
    TouchCancel,
    /// The viewport changed width.
    Resize {
        /// New viewport width.
        viewport_width: f32,
    },
    /// A tab was clicked.
    SelectTab {
        /// Tab index.
        index: usize,
    },
    /// Print the current frame's render commands.
    Render,
}

/// A timestamped action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    /// Session time of the step.
    pub at_ms: f64,
    /// What happens.
    #[serde(flatten)]
    pub action: Action,
}

/// A whole session.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Session {
    /// Steps, replayed in timestamp order.
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Session {
    /// Parses a session and sorts its steps by time.
    ///
    /// # Errors
    ///
    /// Returns [`glass_ui::GlassError::Parse`] for malformed input.
    pub fn from_toml_str(text: &str) -> GlassResult<Self> {
        let mut session: Self = toml::from_str(text)?;
        session.steps.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        Ok(session)
    }

    /// Returns the time of the last step.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.steps.last().map_or(0.0, |step| step.at_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glass_ui::GlassError;

    #[test]
    fn test_parse_and_sort() {
        let session = Session::from_toml_str(
            r#"
            [[step]]
            at_ms = 100.0
            event = "render"

            [[step]]
            at_ms = 10.0
            event = "pointer_out"
            target = "hero.docs"

            [[step]]
            at_ms = 50.0
            event = "touch_start"
            target = "hero.docs"
            x = 1.0
            y = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(session.steps.len(), 3);
        assert_eq!(
            session.steps[0].action,
            Action::PointerOut {
                target: "hero.docs".into(),
                related: None,
            }
        );
        assert_eq!(session.steps[2].action, Action::Render);
        assert_eq!(session.duration_ms(), 100.0);
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let err = Session::from_toml_str("[[step]]\nat_ms = 0.0\nevent = \"explode\"\n").unwrap_err();
        assert!(matches!(err, GlassError::Parse(_)));
    }

    #[test]
    fn test_empty_session() {
        let session = Session::from_toml_str("").unwrap();
        assert!(session.steps.is_empty());
        assert_eq!(session.duration_ms(), 0.0);
    }
}
