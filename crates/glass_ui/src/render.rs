//! Render command output.
//!
//! The engine does not rasterize anything. Components describe what to draw
//! as [`RenderCommand`]s and a host backend turns them into pixels.

use crate::layout::Rect;
use crate::style::Color;

/// A draw instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Radial highlight, fading from `color` at the center to transparent.
    RadialHighlight {
        /// Center in absolute coordinates.
        center: (f32, f32),
        /// Fade-out radius.
        radius: f32,
        /// Color at the center.
        color: Color,
        /// Layer opacity.
        opacity: f32,
    },
    /// Frosted glass rectangle (the magnifier).
    Glass {
        /// Bounds in absolute coordinates.
        bounds: Rect,
        /// Fill tint.
        tint: Color,
        /// Rim color.
        rim: Color,
        /// Corner radius.
        corner_radius: f32,
        /// Backdrop blur radius.
        blur: f32,
        /// Layer opacity (0 while hidden).
        opacity: f32,
    },
    /// A run of text.
    Text {
        /// Text content.
        text: String,
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
        /// Text color.
        color: Color,
    },
    /// Text caret.
    Caret {
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
        /// Caret height.
        height: f32,
    },
    /// Scissor rect (clip what follows).
    PushClip {
        /// Clip bounds.
        bounds: Rect,
    },
    /// Pop scissor rect.
    PopClip,
}

/// Collects the commands of one frame.
pub struct GlassRenderer {
    /// All commands from the frame.
    commands: Vec<RenderCommand>,
    /// Clip stack.
    clip_stack: Vec<Rect>,
}

impl GlassRenderer {
    /// Creates an empty renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(64),
            clip_stack: Vec::with_capacity(4),
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
    }

    /// Adds a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Pushes a clip rect, intersected with the current one.
    pub fn push_clip(&mut self, bounds: Rect) {
        let clip = match self.clip_stack.last() {
            Some(current) => intersect(current, &bounds),
            None => bounds,
        };
        self.clip_stack.push(clip);
        self.commands.push(RenderCommand::PushClip { bounds: clip });
    }

    /// Pops the current clip rect.
    pub fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_some() {
            self.commands.push(RenderCommand::PopClip);
        }
    }

    /// Returns the current clip rect.
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Returns the commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Ends the frame and hands over its commands.
    pub fn end_frame(&mut self) -> Vec<RenderCommand> {
        while self.clip_stack.pop().is_some() {
            self.commands.push(RenderCommand::PopClip);
        }
        std::mem::take(&mut self.commands)
    }
}

impl Default for GlassRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn intersect(a: &Rect, b: &Rect) -> Rect {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    let right = a.right().min(b.right());
    let bottom = a.bottom().min(b.bottom());
    Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
}
