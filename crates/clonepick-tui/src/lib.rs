mod clone_flow;
mod directory;
mod keymap;
mod loader;
mod oversized_flow;
mod selector;
mod theme;
mod ui;

use std::io::{Stdout, stdout};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clone_flow::CloneScreen;
use clonepick_app::{PickPrepare, PickResult};
use clonepick_core::diagnostics;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use oversized_flow::OversizedFilesScreen;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::ui::modal::{DialogSignal, render_error_modal};

const TICK_RATE: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickExit {
    Picked(PickResult),
    Canceled,
}

pub(crate) struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub(crate) fn enter() -> Result<Self> {
        let terminal = enter_with_ops(
            || enable_raw_mode().context("failed to enable raw mode"),
            || {
                let mut out = stdout();
                execute!(out, EnterAlternateScreen, Hide)
                    .context("failed to enter alternate screen")
            },
            || {
                let backend = CrosstermBackend::new(stdout());
                Terminal::new(backend).context("failed to create terminal backend")
            },
            || {
                let mut out = stdout();
                execute!(out, Show, LeaveAlternateScreen)
                    .context("failed to restore terminal screen during rollback")
            },
            || disable_raw_mode().context("failed to disable raw mode during rollback"),
        )?;
        Ok(Self { terminal })
    }

    pub(crate) fn draw<F>(&mut self, draw_fn: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame<'_>),
    {
        self.terminal
            .draw(draw_fn)
            .context("failed to render terminal")?;
        Ok(())
    }

    pub(crate) fn autoresize(&mut self) -> Result<()> {
        self.terminal
            .autoresize()
            .context("failed to autoresize terminal")?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(self.terminal.backend_mut(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

fn enter_with_ops<
    T,
    EnableRawMode,
    EnterAltScreen,
    CreateTerminal,
    LeaveAltScreen,
    DisableRawMode,
>(
    mut enable_raw_mode_op: EnableRawMode,
    mut enter_alt_screen_op: EnterAltScreen,
    mut create_terminal_op: CreateTerminal,
    mut leave_alt_screen_op: LeaveAltScreen,
    mut disable_raw_mode_op: DisableRawMode,
) -> Result<T>
where
    EnableRawMode: FnMut() -> Result<()>,
    EnterAltScreen: FnMut() -> Result<()>,
    CreateTerminal: FnMut() -> Result<T>,
    LeaveAltScreen: FnMut() -> Result<()>,
    DisableRawMode: FnMut() -> Result<()>,
{
    enable_raw_mode_op()?;

    if let Err(error) = enter_alt_screen_op() {
        return Err(failure_with_rollback(
            error,
            false,
            &mut leave_alt_screen_op,
            &mut disable_raw_mode_op,
        ));
    }

    match create_terminal_op() {
        Ok(terminal) => Ok(terminal),
        Err(error) => Err(failure_with_rollback(
            error,
            true,
            &mut leave_alt_screen_op,
            &mut disable_raw_mode_op,
        )),
    }
}

fn failure_with_rollback<LeaveAltScreen, DisableRawMode>(
    setup_error: anyhow::Error,
    alt_screen_entered: bool,
    leave_alt_screen_op: &mut LeaveAltScreen,
    disable_raw_mode_op: &mut DisableRawMode,
) -> anyhow::Error
where
    LeaveAltScreen: FnMut() -> Result<()>,
    DisableRawMode: FnMut() -> Result<()>,
{
    let mut cleanup_failures = Vec::<String>::new();

    if alt_screen_entered && let Err(error) = leave_alt_screen_op() {
        cleanup_failures.push(format!(
            "failed to restore alternate screen during rollback: {error:#}"
        ));
    }

    if let Err(error) = disable_raw_mode_op() {
        cleanup_failures.push(format!(
            "failed to disable raw mode during rollback: {error:#}"
        ));
    }

    if cleanup_failures.is_empty() {
        setup_error
    } else {
        anyhow!(
            "{setup_error:#}\nterminal rollback cleanup failed: {}",
            cleanup_failures.join("\n")
        )
    }
}

pub(crate) fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrainReason {
    Timeout,
    AfterInput,
}

trait LoopTarget {
    fn on_tick(&mut self);
    fn should_drain_after_input(&self) -> bool;
    fn on_key(&mut self, key: KeyEvent) -> Result<Option<PickExit>>;
}

impl LoopTarget for CloneScreen {
    fn on_tick(&mut self) {
        CloneScreen::on_tick(self)
    }

    fn should_drain_after_input(&self) -> bool {
        CloneScreen::should_drain_after_input(self)
    }

    fn on_key(&mut self, key: KeyEvent) -> Result<Option<PickExit>> {
        CloneScreen::on_key(self, key)
    }
}

fn loop_drain_helper<T: LoopTarget>(target: &mut T, reason: DrainReason) -> bool {
    if !matches!(reason, DrainReason::Timeout) && !target.should_drain_after_input() {
        return false;
    }

    target.on_tick();
    true
}

/// Sends a key to the screen unless the error modal is up.
///
/// A failed key handler opens the modal; Enter or Esc closes it.
fn route_key<T: LoopTarget>(
    target: &mut T,
    global_error: &mut Option<String>,
    key: KeyEvent,
) -> Option<PickExit> {
    if global_error.is_some() {
        if keymap::is_confirm(key) || keymap::is_back(key) {
            *global_error = None;
        }
        return None;
    }

    match target.on_key(key) {
        Ok(exit) => exit,
        Err(error) => {
            diagnostics::record(format!("pick screen error: {error:#}"));
            *global_error = Some(format!("{error:#}"));
            None
        }
    }
}

/// Runs the clone picker until the user picks a repository or backs out.
pub fn run_pick(prepare: PickPrepare) -> Result<PickExit> {
    let mut screen = CloneScreen::new(prepare)?;
    let mut session = TerminalSession::enter()?;
    let result = pick_loop(&mut session, &mut screen);
    screen.on_unmount();
    result
}

fn pick_loop(session: &mut TerminalSession, screen: &mut CloneScreen) -> Result<PickExit> {
    let mut global_error: Option<String> = None;

    loop {
        session.draw(|frame| {
            screen.render(frame);
            if let Some(message) = global_error.as_deref() {
                render_global_error(frame, message);
            }
        })?;

        let has_event = event::poll(TICK_RATE).context("failed to poll terminal event")?;
        if !has_event {
            loop_drain_helper(screen, DrainReason::Timeout);
            continue;
        }

        let key = match event::read().context("failed to read terminal event")? {
            Event::Resize(_, _) => {
                session.autoresize()?;
                continue;
            }
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press) => key,
            _ => continue,
        };

        if is_ctrl_c(key) {
            return Ok(PickExit::Canceled);
        }

        if let Some(exit) = route_key(screen, &mut global_error, key) {
            return Ok(exit);
        }

        loop_drain_helper(screen, DrainReason::AfterInput);
    }
}

/// Shows the oversized files warning until it is dismissed.
pub fn run_oversized_warning(files: Vec<String>, limit_mb: u64) -> Result<()> {
    let mut screen = OversizedFilesScreen::new(files, limit_mb);
    let mut session = TerminalSession::enter()?;

    loop {
        session.draw(|frame| screen.render(frame))?;

        let key = match event::read().context("failed to read terminal event")? {
            Event::Resize(_, _) => {
                session.autoresize()?;
                continue;
            }
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press) => key,
            _ => continue,
        };

        if is_ctrl_c(key) || screen.on_key(key) == DialogSignal::Dismiss {
            return Ok(());
        }
    }
}

fn render_global_error(frame: &mut ratatui::Frame<'_>, message: &str) {
    let text = format!("Operation failed.\n\n{message}");
    render_error_modal(frame, &text, 88, 72, "Enter/Esc: continue");
}

pub(crate) fn centered_rect(
    percent_x: u16,
    percent_y: u16,
    area: ratatui::layout::Rect,
) -> ratatui::layout::Rect {
    let pct_x = percent_x.min(100);
    let pct_y = percent_y.min(100);

    let [_, vertical, _] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - pct_y) / 2),
            Constraint::Percentage(pct_y),
            Constraint::Percentage((100 - pct_y) / 2),
        ])
        .areas(area);
    let [_, horizontal, _] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - pct_x) / 2),
            Constraint::Percentage(pct_x),
            Constraint::Percentage((100 - pct_x) / 2),
        ])
        .areas(vertical);
    horizontal
}
