//! Control loop: tick the module, save settings, handle keys, redraw

use std::time::Duration;

use bezier_cv::{
    io::{ticks_diff, Clock, MonotonicClock},
    module::Module,
};
use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;

use super::knob::{Knob, KNOB_STEP};
use super::ui::{self, Panel};

/// Redraw at most this often (~30 fps); the module ticks far faster.
const FRAME_INTERVAL_MS: i32 = 33;

pub struct App<M> {
    module: M,
    clock: MonotonicClock,
    layout: &'static str,
    tick_interval: Duration,
    /// Last settings error, shown until the next successful save
    notice: Option<String>,
    should_quit: bool,
}

impl<M: Module<Knob = Knob>> App<M> {
    pub fn new(module: M, clock: MonotonicClock, layout: &'static str, tick_ms: u64) -> Self {
        Self {
            module,
            clock,
            layout,
            tick_interval: Duration::from_millis(tick_ms.max(1)),
            notice: None,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        log::info!("{} layout running, tick {:?}", self.layout, self.tick_interval);
        let mut last_frame: Option<u32> = None;

        while !self.should_quit {
            let now = self.clock.now_ms();
            self.module.tick(now);
            self.save_settings();

            let frame_due = last_frame.map_or(true, |at| ticks_diff(now, at) >= FRAME_INTERVAL_MS);
            if frame_due {
                self.draw(terminal)?;
                last_frame = Some(now);
            }

            // Doubles as the loop's sleep
            if event::poll(self.tick_interval)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.save_settings();
        Ok(())
    }

    fn save_settings(&mut self) {
        if let Err(err) = self.module.save_if_dirty() {
            log::warn!("could not save settings: {err}");
            self.notice = Some(format!("save failed: {err}"));
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Char('a') => self.nudge(0, -KNOB_STEP),
            KeyCode::Right | KeyCode::Char('d') => self.nudge(0, KNOB_STEP),
            KeyCode::Down | KeyCode::Char('s') => self.nudge(1, -KNOB_STEP),
            KeyCode::Up | KeyCode::Char('w') => self.nudge(1, KNOB_STEP),
            KeyCode::Char(' ') | KeyCode::Char('c') => {
                self.module.press_button();
                self.notice = None;
            }
            _ => {}
        }
    }

    fn nudge(&mut self, index: usize, delta: f32) {
        if let Some(knob) = self.module.knob_mut(index) {
            knob.nudge(delta);
        }
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        let knobs: Vec<f32> = (0..self.module.knob_count())
            .filter_map(|i| self.module.knob_mut(i).map(|k| k.position()))
            .collect();
        let views = self.module.views();
        let panel = Panel {
            layout: self.layout,
            knobs: &knobs,
            notice: self.notice.as_deref(),
        };
        terminal.draw(|frame| ui::render(frame, &panel, &views))?;
        Ok(())
    }
}
