//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Async handlers send their `UiEvent` results to `inbox_tx`; the loop
//! drains `inbox_rx` every iteration and feeds them through the reducer like
//! any other event.

mod handlers;
mod inbox;

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use jsonlens_core::config::{ClipboardMode, Config};
use jsonlens_core::{MenuAction, MenuId, NodeValue};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::common::{Clipboard, ClipboardError, TaskId};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Frame interval while something is animating or pending (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll interval when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop and on
/// panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    pub fn new(config: Config, root: NodeValue, source: String) -> Result<Self> {
        // panic hook goes in before the alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(config, root, source);
        let (inbox_tx, inbox_rx) = inbox::channel();

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_mouse_capture()?;
        let result = self.event_loop();
        let _ = terminal::disable_mouse_capture();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let mut events = self.collect_events()?;

            // Frame first so geometry is current before input is hit-tested
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                // only Tick triggers render, capping the frame rate
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.pending_copy.is_pending()
            || self.state.tree.menu.has_pending_dismiss()
            || recent_terminal_activity;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        self.collect_inbox_events(&mut events);

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn collect_inbox_events(&mut self, events: &mut Vec<UiEvent>) {
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::CopyToClipboard {
                task,
                menu,
                action,
                text,
            } => {
                let Some(task) = task else {
                    tracing::warn!(action = %action, "clipboard effect without task id");
                    return;
                };
                self.copy_to_clipboard(task, menu, action, text);
            }
        }
    }

    /// Runs a clipboard write according to the configured mode and reports
    /// the result through the inbox.
    fn copy_to_clipboard(&self, task: TaskId, menu: MenuId, action: MenuAction, text: String) {
        let mode = self.state.config.clipboard;
        tracing::debug!(
            action = %action,
            mode = mode.display_name(),
            bytes = text.len(),
            "copying to clipboard"
        );

        if matches!(mode, ClipboardMode::Osc52 | ClipboardMode::Auto) {
            match Clipboard::copy_osc52(&text) {
                Ok(()) => {
                    self.send_copied(task, menu, action, Ok(()));
                    return;
                }
                Err(err) if mode == ClipboardMode::Osc52 => {
                    self.send_copied(task, menu, action, Err(err));
                    return;
                }
                Err(err) => {
                    tracing::debug!(error = %err, "OSC 52 unavailable, using system clipboard");
                }
            }
        }

        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let result = handlers::copy_system(text).await;
            let _ = tx.send(copied_event(task, menu, action, result));
        });
    }

    fn send_copied(
        &self,
        task: TaskId,
        menu: MenuId,
        action: MenuAction,
        result: Result<(), ClipboardError>,
    ) {
        let _ = self.inbox_tx.send(copied_event(task, menu, action, result));
    }
}

fn copied_event(
    task: TaskId,
    menu: MenuId,
    action: MenuAction,
    result: Result<(), ClipboardError>,
) -> UiEvent {
    UiEvent::ClipboardCopied {
        task,
        menu,
        action,
        result: result.map_err(|err| err.to_string()),
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_system_copy_result_is_reported_as_event() {
        let (tx, mut rx) = inbox::channel();
        let result: Result<(), ClipboardError> = Err(ClipboardError::System("denied".to_string()));
        tx.send(copied_event(TaskId(7), MenuId(1), MenuAction::CopyRaw, result))
            .unwrap();

        match rx.recv().await.unwrap() {
            UiEvent::ClipboardCopied {
                task,
                menu,
                action,
                result,
            } => {
                assert_eq!(task, TaskId(7));
                assert_eq!(menu, MenuId(1));
                assert_eq!(action, MenuAction::CopyRaw);
                assert_eq!(result, Err("System clipboard failed: denied".to_string()));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
