use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use rollclock_engine::core::{App, AppControl, FrameCtx, SyncStatus};
use rollclock_engine::runtime::RuntimeCtx;
use rollclock_engine::scene::DrawList;
use rollclock_ui::prelude::*;

use crate::terminal::CELL_SIZE;

/// Strip cells kept on each side of the center row, at most.
const MAX_VISIBLE: usize = 10;

/// What a key press asks for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyAction {
    Exit,
    Resync,
    ToggleTheme,
    /// Index into the current theme's palette.
    SelectColor(usize),
}

pub fn key_action(key: &KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(KeyAction::Exit),
        KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Exit),
        KeyCode::Char('r') => Some(KeyAction::Resync),
        KeyCode::Char('t') => Some(KeyAction::ToggleTheme),
        KeyCode::Char(c @ '1'..='5') => Some(KeyAction::SelectColor(c as usize - '1' as usize)),
        _ => None,
    }
}

/// The clock view mounted by the studio.
pub struct ClockApp {
    engine: DigitRoll,
    theme: ThemeState,
    read_keys: bool,
}

impl ClockApp {
    pub fn new(theme: Theme) -> Self {
        Self {
            engine: DigitRoll::new().digit_height(CELL_SIZE.y).neutral(theme.neutral()),
            theme: ThemeState::new(theme),
            read_keys: false,
        }
    }

    /// Read keyboard input from the terminal every frame.
    pub fn read_keys(mut self, v: bool) -> Self { self.read_keys = v; self }

    #[inline]
    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    pub fn apply(&mut self, action: KeyAction, runtime: &mut RuntimeCtx) -> AppControl {
        match action {
            KeyAction::Exit => return AppControl::Exit,
            KeyAction::Resync => runtime.request_resync(),
            KeyAction::ToggleTheme => {
                self.theme.toggle();
                self.engine.neutral = self.theme.theme().neutral();
            }
            KeyAction::SelectColor(i) => {
                if let Some(&color) = self.theme.theme().palette().get(i) {
                    self.theme.select_text_color(color);
                }
            }
        }
        AppControl::Continue
    }

    fn poll_keys(&mut self, runtime: &mut RuntimeCtx) -> AppControl {
        loop {
            let event = match event::poll(Duration::ZERO) {
                Ok(true) => event::read(),
                Ok(false) => return AppControl::Continue,
                Err(e) => Err(e),
            };

            match event {
                Ok(Event::Key(key)) => {
                    if let Some(action) = key_action(&key) {
                        if self.apply(action, runtime) == AppControl::Exit {
                            return AppControl::Exit;
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("terminal input unavailable, keys disabled: {e}");
                    self.read_keys = false;
                    return AppControl::Continue;
                }
            }
        }
    }

    /// Region of the clock: whole rows above the status line, an odd count so
    /// the center row lines up with a cell.
    fn clock_rect(size: Vec2) -> Rect {
        let rows = ((size.y / CELL_SIZE.y) as u32).saturating_sub(1);
        let rows = if rows % 2 == 0 { rows.saturating_sub(1) } else { rows };
        Rect::new(0.0, 0.0, size.x, rows as f32 * CELL_SIZE.y)
    }

    fn fit(&mut self, size: Vec2) {
        let rows = (Self::clock_rect(size).size.y / CELL_SIZE.y) as usize;
        let visible = (rows.saturating_sub(1) / 2).min(MAX_VISIBLE);
        if visible != self.engine.visible_above {
            log::debug!("showing {visible} strip cells on each side");
            self.engine.visible_above = visible;
            self.engine.visible_below = visible;
        }
    }

    fn status_text(sync: SyncStatus) -> String {
        if sync.synced {
            format!("synced {}", sync.offset)
        } else {
            "local clock".to_string()
        }
    }

    fn paint(&self, list: &mut DrawList, size: Vec2, time: ClockTime, sync: SyncStatus) {
        let mut painter = Painter::new(list);

        RollingClock::new(&self.engine, time, self.theme.text_color())
            .digit_width(2.0 * CELL_SIZE.x)
            .separator_width(2.0 * CELL_SIZE.x)
            .paint(&mut painter, Self::clock_rect(size));

        let status_y = size.y - CELL_SIZE.y * 0.5;
        painter.text(
            &Self::status_text(sync),
            Vec2::new(CELL_SIZE.x * 1.5, status_y),
            CELL_SIZE.x,
            CELL_SIZE.y * 0.8,
            self.theme.theme().neutral(),
        );
    }
}

impl App for ClockApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        if self.read_keys && self.poll_keys(ctx.runtime) == AppControl::Exit {
            return AppControl::Exit;
        }

        self.fit(ctx.logical_size());

        let time = ClockTime::from_time(&ctx.time.wall.with_timezone(&Local));
        let sync = ctx.sync;
        let background = self.theme.theme().background();

        ctx.render(background, |list, size| self.paint(list, size, time, sync))
    }

    fn on_unmount(&mut self) {
        log::info!("clock view closed ({:?} theme)", self.theme.theme());
    }
}
