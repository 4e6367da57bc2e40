use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::{Context, Result};
use clonepick_core::command_runner::SystemCommandRunner;
use clonepick_core::paths::expand_home;
use clonepick_core::picker::choose_directory_with_command;

use crate::selector::DirectoryChooser;

/// Asks for a directory through an in-terminal text prompt.
///
/// `choose` only opens the request; the owning screen renders the prompt and
/// calls `resolve` once the user confirms or backs out.
#[derive(Debug)]
pub(crate) struct PromptDirectoryChooser {
    home: Option<PathBuf>,
    sender: RefCell<Option<Sender<Option<PathBuf>>>>,
}

impl PromptDirectoryChooser {
    pub(crate) fn new(home: Option<PathBuf>) -> Self {
        Self {
            home,
            sender: RefCell::new(None),
        }
    }

    pub(crate) fn is_requested(&self) -> bool {
        self.sender.borrow().is_some()
    }

    pub(crate) fn resolve(&self, raw: Option<&str>) {
        let Some(sender) = self.sender.borrow_mut().take() else {
            return;
        };
        let choice = raw
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| self.expand(value));
        let _ = sender.send(choice);
    }

    fn expand(&self, raw: &str) -> PathBuf {
        match &self.home {
            Some(home) => expand_home(raw, home),
            None => Path::new(raw).to_path_buf(),
        }
    }
}

impl DirectoryChooser for PromptDirectoryChooser {
    fn choose(&self) -> Result<Receiver<Option<PathBuf>>> {
        let (sender, receiver) = mpsc::channel();
        *self.sender.borrow_mut() = Some(sender);
        Ok(receiver)
    }
}

/// Runs the configured picker program on a worker thread.
#[derive(Debug, Clone)]
pub(crate) struct CommandDirectoryChooser {
    command: Vec<String>,
}

impl CommandDirectoryChooser {
    pub(crate) fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl DirectoryChooser for CommandDirectoryChooser {
    fn choose(&self) -> Result<Receiver<Option<PathBuf>>> {
        let (sender, receiver) = mpsc::channel();
        let command = self.command.clone();
        thread::Builder::new()
            .name("directory-picker".to_string())
            .spawn(move || {
                let runner = SystemCommandRunner::new();
                let _ = sender.send(choose_directory_with_command(&command, &runner));
            })
            .context("failed to start the directory picker")?;
        Ok(receiver)
    }
}
