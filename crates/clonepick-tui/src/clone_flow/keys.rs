use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEvent};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use super::{CloneScreen, Focus};
use crate::PickExit;
use crate::keymap;
use crate::ui::modal::{DialogSignal, dialog_on_key};

impl CloneScreen {
    pub(crate) fn on_key(&mut self, key: KeyEvent) -> Result<Option<PickExit>> {
        let exit = self.dispatch_key(key);
        let events = self.selector.take_events();
        self.apply_events(events);
        exit
    }

    fn dispatch_key(&mut self, key: KeyEvent) -> Result<Option<PickExit>> {
        if self.notice.is_some() {
            if dialog_on_key(key) == DialogSignal::Dismiss {
                self.notice = None;
            }
            return Ok(None);
        }

        if self.prompt_requested() {
            self.on_prompt_key(key);
            return Ok(None);
        }

        match self.focus {
            Focus::List => self.on_list_key(key),
            Focus::Filter => Ok(self.on_filter_key(key)),
            Focus::Path => Ok(self.on_path_key(key)),
        }
    }

    fn on_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.clone() else {
            return;
        };

        if keymap::is_back(key) {
            prompt.resolve(None);
            self.prompt_input = Input::default();
            return;
        }

        if keymap::is_confirm(key) {
            prompt.resolve(Some(self.prompt_input.value()));
            self.prompt_input = Input::default();
            return;
        }

        self.prompt_input.handle_event(&Event::Key(key));
    }

    fn on_list_key(&mut self, key: KeyEvent) -> Result<Option<PickExit>> {
        if keymap::is_back(key) || keymap::is_quit(key) {
            return Ok(Some(PickExit::Canceled));
        }

        if keymap::is_next_focus(key) {
            self.focus = self.focus.next();
        } else if keymap::is_char(key, '/') {
            self.focus = Focus::Filter;
        } else if keymap::is_up(key) {
            self.selector.move_selection(-1);
        } else if keymap::is_down(key) {
            self.selector.move_selection(1);
        } else if keymap::is_char(key, 'a') {
            self.cycle_account();
        } else if keymap::is_char(key, 'r') {
            self.selector.retry();
        } else if keymap::is_char(key, 'o') {
            self.selector
                .on_choose_directory_requested()
                .context("could not open the directory chooser")?;
        } else if keymap::is_confirm(key) {
            return Ok(self.confirm());
        }

        Ok(None)
    }

    fn on_filter_key(&mut self, key: KeyEvent) -> Option<PickExit> {
        if keymap::is_back(key) {
            self.focus = Focus::List;
            return None;
        }
        if keymap::is_next_focus(key) {
            self.focus = self.focus.next();
            return None;
        }
        if keymap::is_arrow_up(key) {
            self.selector.move_selection(-1);
            return None;
        }
        if keymap::is_arrow_down(key) {
            self.selector.move_selection(1);
            return None;
        }
        if keymap::is_confirm(key) {
            return self.confirm();
        }

        if self.filter.handle_event(&Event::Key(key)).is_some() {
            self.selector.on_filter_text_changed(self.filter.value());
        }
        None
    }

    fn on_path_key(&mut self, key: KeyEvent) -> Option<PickExit> {
        if keymap::is_back(key) {
            self.focus = Focus::List;
            return None;
        }
        if keymap::is_next_focus(key) {
            self.focus = self.focus.next();
            return None;
        }
        if keymap::is_confirm(key) {
            return self.confirm();
        }

        if self.path.handle_event(&Event::Key(key)).is_some() {
            self.on_path_edited();
        }
        None
    }
}
