//! Multi-line typewriter text.
//!
//! Characters appear one per `typing_speed_ms`, with a
//! `pause_between_lines_ms` break before each new line. Every step runs on a
//! one-shot timeout, so at most one timer is pending and `stop` (or dropping
//! the widget) cancels it.

use crate::config::TypewriterConfig;
use crate::render::{GlassRenderer, RenderCommand};
use crate::scheduler::{FrameScheduler, TaskGuard, TaskId};
use crate::style::Color;

/// Estimated monospace glyph width.
const CHAR_WIDTH: f32 = 8.0;
/// Line height.
const LINE_HEIGHT: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Typing,
    Pausing,
    Finished,
}

/// Types a list of lines one character at a time.
#[derive(Debug)]
pub struct Typewriter {
    lines: Vec<String>,
    displayed: Vec<String>,
    line_index: usize,
    /// Byte offset of the next character in the current line.
    cursor: usize,
    config: TypewriterConfig,
    reduced_motion: bool,
    phase: Phase,
    pending: Option<TaskGuard>,
}

impl Typewriter {
    /// Creates an idle typewriter.
    #[must_use]
    pub fn new(lines: Vec<String>, config: TypewriterConfig, reduced_motion: bool) -> Self {
        Self {
            lines,
            displayed: Vec::new(),
            line_index: 0,
            cursor: 0,
            config,
            reduced_motion,
            phase: Phase::Idle,
            pending: None,
        }
    }

    /// Starts (or restarts) typing from the first line.
    ///
    /// With reduced motion every line is shown at once and nothing is
    /// scheduled. An empty line list leaves the typewriter idle.
    pub fn start(&mut self, scheduler: &mut FrameScheduler) {
        self.pending = None;
        if self.lines.is_empty() {
            self.phase = Phase::Idle;
            return;
        }

        if self.reduced_motion {
            self.displayed = self.lines.clone();
            self.line_index = self.lines.len() - 1;
            self.cursor = self.lines[self.line_index].len();
            self.phase = Phase::Finished;
            return;
        }

        self.displayed = vec![String::new()];
        self.line_index = 0;
        self.cursor = 0;
        self.phase = Phase::Typing;
        self.schedule(scheduler);
    }

    /// Cancels the pending timer. The text typed so far stays.
    pub fn stop(&mut self) {
        if self.pending.take().is_some() {
            tracing::trace!("typewriter stopped at line {}", self.line_index);
        }
    }

    /// Advances if the pending timer is among the `fired` tasks. Returns true
    /// if the displayed text changed.
    pub fn on_tasks(&mut self, scheduler: &mut FrameScheduler, fired: &[TaskId]) -> bool {
        match self.pending_task() {
            Some(task) if fired.contains(&task) => self.pending = None,
            _ => return false,
        }

        match self.phase {
            Phase::Typing => {
                let next = self.lines[self.line_index][self.cursor..].chars().next();
                if let Some(ch) = next {
                    if let Some(line) = self.displayed.last_mut() {
                        line.push(ch);
                    }
                    self.cursor += ch.len_utf8();
                }
            }
            Phase::Pausing => {
                self.line_index += 1;
                self.cursor = 0;
                self.displayed.push(String::new());
                self.phase = Phase::Typing;
            }
            Phase::Idle | Phase::Finished => return false,
        }
        self.schedule(scheduler);
        true
    }

    /// Returns the lines typed so far. The last entry is the line being
    /// typed.
    #[must_use]
    pub fn displayed(&self) -> &[String] {
        &self.displayed
    }

    /// Returns true once every line has been typed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Returns true if the caret should be drawn after the last line.
    #[must_use]
    pub fn caret_visible(&self) -> bool {
        !self.reduced_motion && !self.displayed.is_empty()
    }

    /// Returns the pending timer, if any.
    #[must_use]
    pub fn pending_task(&self) -> Option<TaskId> {
        self.pending
            .as_ref()
            .filter(|guard| !guard.is_cancelled())
            .map(TaskGuard::id)
    }

    /// Emits one text command per line and the caret, starting at `origin`.
    pub fn render(&self, origin: (f32, f32), color: Color, renderer: &mut GlassRenderer) {
        let mut y = origin.1;
        for line in &self.displayed {
            renderer.push(RenderCommand::Text {
                text: line.clone(),
                x: origin.0,
                y,
                color,
            });
            y += LINE_HEIGHT;
        }

        if self.caret_visible() {
            let last = self.displayed.last().map_or(0, |line| line.chars().count());
            renderer.push(RenderCommand::Caret {
                x: origin.0 + last as f32 * CHAR_WIDTH,
                y: y - LINE_HEIGHT,
                height: LINE_HEIGHT,
            });
        }
    }

    /// Schedules the next step, or finishes when the last line is complete.
    fn schedule(&mut self, scheduler: &mut FrameScheduler) {
        if self.cursor < self.lines[self.line_index].len() {
            self.pending = Some(scheduler.set_timeout(self.config.typing_speed_ms));
        } else if self.line_index + 1 < self.lines.len() {
            self.phase = Phase::Pausing;
            self.pending = Some(scheduler.set_timeout(self.config.pause_between_lines_ms));
        } else {
            self.phase = Phase::Finished;
            tracing::trace!("typewriter finished {} lines", self.lines.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| (*s).to_string()).collect()
    }

    fn run(typewriter: &mut Typewriter, scheduler: &mut FrameScheduler, until_ms: f64) {
        let mut now = scheduler.now_ms();
        while now < until_ms {
            now += 1.0;
            let fired = scheduler.advance(now);
            typewriter.on_tasks(scheduler, &fired);
        }
    }

    #[test]
    fn test_types_one_char_per_tick() {
        let mut scheduler = FrameScheduler::new();
        let mut tw = Typewriter::new(lines(&["abc"]), TypewriterConfig::default(), false);
        tw.start(&mut scheduler);
        assert_eq!(tw.displayed(), &[String::new()]);

        run(&mut tw, &mut scheduler, 40.0);
        assert_eq!(tw.displayed(), &["a".to_string()]);

        run(&mut tw, &mut scheduler, 120.0);
        assert_eq!(tw.displayed(), &["abc".to_string()]);
        assert!(tw.is_finished());
        assert!(tw.pending_task().is_none());
    }

    #[test]
    fn test_multibyte_chars_type_whole() {
        let mut scheduler = FrameScheduler::new();
        let mut tw = Typewriter::new(lines(&["né✓"]), TypewriterConfig::default(), false);
        tw.start(&mut scheduler);

        run(&mut tw, &mut scheduler, 80.0);
        assert_eq!(tw.displayed(), &["né".to_string()]);
        assert!(!tw.is_finished());

        run(&mut tw, &mut scheduler, 120.0);
        assert_eq!(tw.displayed(), &["né✓".to_string()]);
        assert!(tw.is_finished());
    }

    #[test]
    fn test_pauses_between_lines() {
        let mut scheduler = FrameScheduler::new();
        let mut tw = Typewriter::new(lines(&["ab", "c"]), TypewriterConfig::default(), false);
        tw.start(&mut scheduler);

        run(&mut tw, &mut scheduler, 80.0);
        assert_eq!(tw.displayed(), &["ab".to_string()]);

        run(&mut tw, &mut scheduler, 679.0);
        assert_eq!(tw.displayed().len(), 1);

        run(&mut tw, &mut scheduler, 680.0);
        assert_eq!(tw.displayed(), &["ab".to_string(), String::new()]);

        run(&mut tw, &mut scheduler, 720.0);
        assert_eq!(tw.displayed(), &["ab".to_string(), "c".to_string()]);
        assert!(tw.is_finished());
    }

    #[test]
    fn test_empty_line_gets_its_own_entry() {
        let mut scheduler = FrameScheduler::new();
        let mut tw = Typewriter::new(lines(&["a", "", "b"]), TypewriterConfig::default(), false);
        tw.start(&mut scheduler);

        run(&mut tw, &mut scheduler, 5_000.0);
        assert_eq!(tw.displayed(), lines(&["a", "", "b"]).as_slice());
    }

    #[test]
    fn test_reduced_motion_shows_everything() {
        let mut scheduler = FrameScheduler::new();
        let mut tw = Typewriter::new(lines(&["one", "two"]), TypewriterConfig::default(), true);
        tw.start(&mut scheduler);

        assert_eq!(tw.displayed(), lines(&["one", "two"]).as_slice());
        assert!(tw.is_finished());
        assert!(!tw.caret_visible());
        assert_eq!(scheduler.active_tasks(), 0);
    }

    #[test]
    fn test_stop_cancels_timer() {
        let mut scheduler = FrameScheduler::new();
        let mut tw = Typewriter::new(lines(&["abc"]), TypewriterConfig::default(), false);
        tw.start(&mut scheduler);
        assert_eq!(scheduler.active_tasks(), 1);

        tw.stop();
        assert_eq!(scheduler.active_tasks(), 0);
        run(&mut tw, &mut scheduler, 500.0);
        assert_eq!(tw.displayed(), &[String::new()]);
    }

    #[test]
    fn test_empty_lines_stay_idle() {
        let mut scheduler = FrameScheduler::new();
        let mut tw = Typewriter::new(Vec::new(), TypewriterConfig::default(), false);
        tw.start(&mut scheduler);

        assert!(tw.displayed().is_empty());
        assert!(!tw.caret_visible());
        assert_eq!(scheduler.active_tasks(), 0);
    }

    #[test]
    fn test_render_places_caret() {
        let mut scheduler = FrameScheduler::new();
        let mut tw = Typewriter::new(lines(&["ab"]), TypewriterConfig::default(), false);
        tw.start(&mut scheduler);
        run(&mut tw, &mut scheduler, 80.0);

        let mut renderer = GlassRenderer::new();
        tw.render((10.0, 20.0), Color::WHITE, &mut renderer);
        let commands = renderer.end_frame();

        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[1],
            RenderCommand::Caret {
                x: 26.0,
                y: 20.0,
                height: LINE_HEIGHT,
            }
        );
    }
}
