use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Gauge;
use zikr_app::SessionSetup;
use zikr_core::progress;
use zikr_core::session::SessionEngine;
use zikr_core::wake::NullWakeHold;

use crate::cues::TerminalBellCues;
use crate::{TerminalSession, is_ctrl_c, keymap, theme, widgets};

const FRAME_RATE: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerExit {
    Finished,
    Canceled,
}

pub fn run_player(setup: SessionSetup) -> Result<PlayerExit> {
    let engine = SessionEngine::new(
        setup.sequence,
        setup.cues,
        Box::new(TerminalBellCues::new()),
        Box::new(NullWakeHold::new()),
    );
    let screen = PlayerScreen::new(setup.plan_name, engine);
    run_loop(screen)
}

fn run_loop(mut screen: PlayerScreen) -> Result<PlayerExit> {
    let mut session = TerminalSession::enter()?;
    let mut next_tick = Instant::now() + Duration::from_secs(1);

    loop {
        session.draw(|frame| screen.render(frame))?;

        let timeout = next_tick
            .saturating_duration_since(Instant::now())
            .min(FRAME_RATE);
        let has_event = event::poll(timeout).context("failed to poll terminal event")?;

        if has_event {
            match event::read().context("failed to read terminal event")? {
                Event::Resize(_, _) => session.autoresize()?,
                Event::Key(key) if matches!(key.kind, KeyEventKind::Press) => {
                    if is_ctrl_c(key) {
                        screen.abort();
                        return Ok(PlayerExit::Canceled);
                    }

                    if let Some(exit) = screen.on_key(key) {
                        return Ok(exit);
                    }
                }
                _ => {}
            }
        }

        while Instant::now() >= next_tick {
            screen.on_second();
            next_tick += Duration::from_secs(1);
        }
    }
}

pub(crate) struct PlayerScreen {
    plan_name: String,
    engine: SessionEngine,
    confirm_cancel: bool,
}

impl PlayerScreen {
    pub(crate) fn new(plan_name: String, engine: SessionEngine) -> Self {
        Self {
            plan_name,
            engine,
            confirm_cancel: false,
        }
    }

    pub(crate) fn on_second(&mut self) {
        self.engine.tick();
    }

    pub(crate) fn abort(&mut self) {
        self.engine.cancel();
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent) -> Option<PlayerExit> {
        if self.confirm_cancel {
            if keymap::is_confirm(key) {
                self.engine.cancel();
                return Some(PlayerExit::Canceled);
            }
            if keymap::is_back(key) || keymap::is_quit(key) {
                self.confirm_cancel = false;
            }
            return None;
        }

        if keymap::is_play_pause(key) {
            if self.engine.is_active() {
                self.engine.pause();
            } else {
                self.engine.start();
            }
            return None;
        }

        if keymap::is_skip_forward(key) {
            self.engine.skip_forward();
            return None;
        }

        if keymap::is_skip_back(key) {
            self.engine.skip_back();
            return None;
        }

        if keymap::is_confirm(key) && self.engine.is_completed() {
            return Some(PlayerExit::Finished);
        }

        if keymap::is_back(key) || keymap::is_quit(key) {
            if self.engine.is_active() {
                self.confirm_cancel = true;
                return None;
            }
            if self.engine.is_completed() {
                return Some(PlayerExit::Finished);
            }
            self.engine.cancel();
            return Some(PlayerExit::Canceled);
        }

        None
    }

    fn status_text(&self) -> &'static str {
        let state = self.engine.state();
        if self.engine.is_completed() {
            "Session complete"
        } else if state.starting {
            "Starting"
        } else if state.running {
            "In progress"
        } else if state.time_left > 0 {
            "Paused"
        } else {
            "Ready to begin"
        }
    }

    pub(crate) fn render(&self, frame: &mut ratatui::Frame<'_>) {
        let area = frame.area();
        let state = self.engine.state();
        let sequence = self.engine.sequence();

        let key_text = if self.engine.is_completed() {
            widgets::compact_hint(
                area.width,
                "Enter/Esc: leave session    Left/p: revisit last phase",
                "Enter/Esc: leave    p: back",
                "Enter/Esc leave | p back",
            )
        } else {
            widgets::compact_hint(
                area.width,
                "Space: play/pause    Right/n: skip    Left/p: back    Esc/q: end session",
                "Space: play/pause    n/p: skip/back    Esc: end",
                "Space | n/p | Esc",
            )
        };

        let [header, body, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .areas(area);

        let header_text = Text::from(vec![
            Line::from(format!("{} Session", self.plan_name)),
            widgets::focus_line(self.status_text()),
        ]);
        frame.render_widget(
            widgets::wrapped_paragraph(header_text).block(theme::chrome("zikr")),
            header,
        );

        let [phase_area, clock_area, gauge_area, info_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Min(4),
            ])
            .areas(body);

        let phase_name = self
            .engine
            .current_item()
            .map(|item| item.name.clone())
            .unwrap_or_else(|| "Session Complete".to_string());
        frame.render_widget(
            widgets::wrapped_paragraph(Line::from(Span::styled(phase_name, theme::focus_prompt())))
                .alignment(Alignment::Center),
            phase_area,
        );

        frame.render_widget(
            widgets::wrapped_paragraph(Line::from(Span::styled(
                progress::format_clock(u64::from(state.time_left)),
                theme::clock_text(),
            )))
            .alignment(Alignment::Center),
            clock_area,
        );

        let ratio = progress::phase_progress(sequence, state.current_index, state.time_left);
        frame.render_widget(
            Gauge::default()
                .block(theme::chrome("Phase"))
                .gauge_style(theme::gauge_fill())
                .ratio(ratio.clamp(0.0, 1.0)),
            gauge_area,
        );

        let next_name = self
            .engine
            .next_item()
            .map(|item| item.name.clone())
            .unwrap_or_else(|| "Session Complete".to_string());
        let position = if self.engine.is_completed() {
            format!("{} of {}", sequence.len(), sequence.len())
        } else {
            format!("{} of {}", state.current_index + 1, sequence.len())
        };
        let remaining =
            progress::remaining_estimate(sequence, state.current_index, state.time_left);

        let info = Text::from(vec![
            widgets::label_value_line("Next", next_name),
            widgets::label_value_line("Phase", position),
            widgets::label_value_line("Remaining", progress::format_clock(remaining)),
            widgets::label_value_line(
                "Total",
                progress::format_clock(progress::total_duration(sequence)),
            ),
        ]);
        frame.render_widget(
            widgets::wrapped_paragraph(info).alignment(Alignment::Center),
            info_area,
        );

        frame.render_widget(
            widgets::key_hint_paragraph(key_text).block(theme::key_block()),
            footer,
        );

        if self.confirm_cancel {
            widgets::render_confirm_modal(
                frame,
                "End session?",
                "The current session will be lost.",
                "Enter: end session    Esc: keep practicing",
            );
        }
    }
}
