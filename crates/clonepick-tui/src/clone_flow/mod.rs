mod keys;
mod render;

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Result, anyhow};
use clonepick_app::{PickPrepare, PickResult};
use clonepick_core::account::Account;
use clonepick_core::config::home_dir;
use clonepick_core::paths::expand_home;
use tui_input::Input;

use crate::PickExit;
use crate::directory::{CommandDirectoryChooser, PromptDirectoryChooser};
use crate::loader::SystemRepositoryLoader;
use crate::selector::{DirectoryChooser, RepositoryLoader, RepositorySelector, SelectorEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    List,
    Filter,
    Path,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::List => Self::Filter,
            Self::Filter => Self::Path,
            Self::Path => Self::List,
        }
    }
}

pub(crate) struct CloneScreen {
    selector: RepositorySelector,
    prepare: PickPrepare,
    home: Option<PathBuf>,
    account_index: usize,
    filter: Input,
    path: Input,
    path_edited: bool,
    focus: Focus,
    prompt: Option<Rc<PromptDirectoryChooser>>,
    prompt_input: Input,
    notice: Option<String>,
}

impl CloneScreen {
    pub(crate) fn new(prepare: PickPrepare) -> Result<Self> {
        let loader = Rc::new(SystemRepositoryLoader::new(prepare.source.clone()));
        Self::with_loader(prepare, loader, home_dir().ok())
    }

    fn with_loader(
        prepare: PickPrepare,
        loader: Rc<dyn RepositoryLoader>,
        home: Option<PathBuf>,
    ) -> Result<Self> {
        let account = prepare
            .accounts
            .get(prepare.initial_account)
            .cloned()
            .ok_or_else(|| anyhow!("no account available to list repositories for"))?;

        let mut prompt = None;
        let chooser: Rc<dyn DirectoryChooser> = match &prepare.picker_command {
            Some(command) => Rc::new(CommandDirectoryChooser::new(command.clone())),
            None => {
                let chooser = Rc::new(PromptDirectoryChooser::new(home.clone()));
                prompt = Some(chooser.clone());
                chooser
            }
        };

        let initial_path = prepare.initial_path.clone();
        let mut selector =
            RepositorySelector::new(account, PathBuf::from(&initial_path), loader, chooser);
        selector.on_mount();

        Ok(Self {
            selector,
            account_index: prepare.initial_account,
            home,
            filter: Input::default(),
            path_edited: !initial_path.is_empty(),
            path: Input::new(initial_path),
            focus: Focus::List,
            prompt,
            prompt_input: Input::default(),
            notice: None,
            prepare,
        })
    }

    pub(crate) fn on_tick(&mut self) {
        let events = self.selector.on_tick();
        self.apply_events(events);
    }

    pub(crate) fn should_drain_after_input(&self) -> bool {
        self.selector.is_busy()
    }

    pub(crate) fn on_unmount(&mut self) {
        self.selector.on_unmount();
    }

    fn apply_events(&mut self, events: Vec<SelectorEvent>) {
        for event in events {
            match event {
                SelectorEvent::PathChanged(path) => {
                    self.path = Input::new(path.display().to_string());
                    self.path_edited = true;
                }
                SelectorEvent::ItemSelected(url) => {
                    if self.path_edited || url.is_empty() {
                        continue;
                    }
                    if let Some(default) = self.prepare.default_path_for(&url) {
                        self.path = Input::new(default.display().to_string());
                        self.selector.set_path(default);
                    }
                }
            }
        }
    }

    fn current_account(&self) -> &Account {
        self.selector.account()
    }

    fn cycle_account(&mut self) {
        if self.prepare.accounts.len() < 2 {
            return;
        }
        self.account_index = (self.account_index + 1) % self.prepare.accounts.len();
        let account = self.prepare.accounts[self.account_index].clone();
        self.filter = Input::default();
        self.selector.on_account_changed(account, true);
    }

    fn on_path_edited(&mut self) {
        self.path_edited = true;
        self.selector.set_path(PathBuf::from(self.path.value()));
    }

    fn confirm(&mut self) -> Option<PickExit> {
        let Some(item) = self.selector.state().selected_item.as_ref() else {
            self.notice = Some("Select a repository to clone first.".to_string());
            return None;
        };

        let raw = self.selector.path().to_string_lossy();
        let raw = raw.trim();
        if raw.is_empty() {
            self.notice = Some("Enter a local path for the clone.".to_string());
            return None;
        }

        let path = match &self.home {
            Some(home) => expand_home(raw, home),
            None => PathBuf::from(raw),
        };
        Some(PickExit::Picked(PickResult {
            url: item.url.clone(),
            path,
        }))
    }

    fn prompt_requested(&self) -> bool {
        self.prompt
            .as_ref()
            .is_some_and(|prompt| prompt.is_requested())
    }
}
