use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::{Receiver, TryRecvError};

use anyhow::Result;
use clonepick_core::account::Account;
use clonepick_core::diagnostics;
use clonepick_core::filter::{FilteredGroup, filter_groups};
use clonepick_core::repository::{
    ApiRepository, ClonableRepositoryListItem, FilterListGroup, group_repositories,
};

use crate::ui::loading::LoadingState;

#[derive(Debug)]
pub(crate) enum RepositoryLoadEvent {
    Done {
        token: u64,
        account_id: u64,
        result: Option<Vec<ApiRepository>>,
    },
}

/// Starts a fetch on a worker and hands back the channel it reports on.
pub(crate) trait RepositoryLoader {
    fn spawn_fetch(&self, account: Account, token: u64) -> Receiver<RepositoryLoadEvent>;
}

/// Resolves to `None` when the user backs out of choosing.
///
/// An error means the chooser could not be opened at all.
pub(crate) trait DirectoryChooser {
    fn choose(&self) -> Result<Receiver<Option<PathBuf>>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectorEvent {
    PathChanged(PathBuf),
    ItemSelected(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorState {
    pub(crate) loading: bool,
    pub(crate) groups: Vec<FilterListGroup>,
    pub(crate) selected_item: Option<ClonableRepositoryListItem>,
    pub(crate) filter_text: String,
    pub(crate) connection_failed: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SelectorView<'a> {
    Loading,
    ConnectionFailed,
    NoMatches,
    Populated(Vec<FilteredGroup<'a>>),
}

pub(crate) struct RepositorySelector {
    state: SelectorState,
    account: Account,
    path: PathBuf,
    loader: Rc<dyn RepositoryLoader>,
    chooser: Rc<dyn DirectoryChooser>,
    mounted: bool,
    next_token: u64,
    active_token: Option<u64>,
    pending: Vec<Receiver<RepositoryLoadEvent>>,
    chooser_receiver: Option<Receiver<Option<PathBuf>>>,
    events: Vec<SelectorEvent>,
    spinner: LoadingState,
}

impl RepositorySelector {
    pub(crate) fn new(
        account: Account,
        initial_path: PathBuf,
        loader: Rc<dyn RepositoryLoader>,
        chooser: Rc<dyn DirectoryChooser>,
    ) -> Self {
        Self {
            state: SelectorState::default(),
            account,
            path: initial_path,
            loader,
            chooser,
            mounted: false,
            next_token: 1,
            active_token: None,
            pending: Vec::new(),
            chooser_receiver: None,
            events: Vec::new(),
            spinner: LoadingState::default(),
        }
    }

    pub(crate) fn on_mount(&mut self) {
        self.mounted = true;
        self.load(self.account.clone());
    }

    pub(crate) fn on_account_changed(&mut self, account: Account, should_clear_filter: bool) {
        if should_clear_filter {
            self.state.filter_text.clear();
        }

        if account.id != self.account.id {
            self.account = account.clone();
            self.load(account);
        }
    }

    pub(crate) fn on_unmount(&mut self) {
        self.mounted = false;
        self.active_token = None;
        self.pending.clear();
        self.chooser_receiver = None;
    }

    pub(crate) fn load(&mut self, account: Account) {
        if !self.mounted {
            return;
        }

        let token = self.next_token;
        self.next_token = self.next_token.saturating_add(1);
        self.active_token = Some(token);
        self.state.loading = true;
        self.state.connection_failed = false;

        diagnostics::record(format!(
            "load started token={token} account={} ({account})",
            account.id
        ));
        self.pending.push(self.loader.spawn_fetch(account, token));
    }

    pub(crate) fn retry(&mut self) {
        if self.state.connection_failed {
            self.load(self.account.clone());
        }
    }

    fn apply_load_event(&mut self, event: RepositoryLoadEvent) {
        let RepositoryLoadEvent::Done {
            token,
            account_id,
            result,
        } = event;

        if !self.mounted || Some(token) != self.active_token || account_id != self.account.id {
            diagnostics::record(format!(
                "discarded stale load token={token} account={account_id}"
            ));
            return;
        }

        self.active_token = None;
        self.state.loading = false;
        match result {
            Some(repositories) => {
                self.state.groups = group_repositories(&repositories, &self.account.login);
                self.state.connection_failed = false;
            }
            None => {
                self.state.groups.clear();
                self.state.connection_failed = true;
            }
        }

        if self.selection_hidden() {
            self.on_selection_changed(None);
        }
    }

    /// Drains worker channels, returning the notifications produced since the
    /// last call.
    pub(crate) fn on_tick(&mut self) -> Vec<SelectorEvent> {
        let mut arrived = Vec::new();
        self.pending.retain(|receiver| loop {
            match receiver.try_recv() {
                Ok(event) => arrived.push(event),
                Err(TryRecvError::Empty) => break true,
                Err(TryRecvError::Disconnected) => break false,
            }
        });
        for event in arrived {
            self.apply_load_event(event);
        }

        if let Some(receiver) = &self.chooser_receiver {
            match receiver.try_recv() {
                Ok(choice) => {
                    self.chooser_receiver = None;
                    self.apply_directory_choice(choice);
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => self.chooser_receiver = None,
            }
        }

        if self.state.loading {
            self.spinner.next_frame();
        }

        self.take_events()
    }

    /// Notifications raised by direct calls since they were last taken.
    pub(crate) fn take_events(&mut self) -> Vec<SelectorEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn on_filter_text_changed(&mut self, text: &str) {
        self.state.filter_text = text.to_string();

        if self.selection_hidden() {
            let first = filter_groups(&self.state.groups, &self.state.filter_text)
                .first()
                .and_then(|group| group.items.first())
                .map(|matched| matched.item.clone());
            self.on_selection_changed(first);
        }
    }

    pub(crate) fn on_selection_changed(&mut self, item: Option<ClonableRepositoryListItem>) {
        let url = item
            .as_ref()
            .map(|item| item.url.clone())
            .unwrap_or_default();
        diagnostics::record(format!("selection changed: '{url}'"));
        self.state.selected_item = item;
        self.events.push(SelectorEvent::ItemSelected(url));
    }

    /// Moves through the visible items; selects the first one when nothing is
    /// selected yet.
    pub(crate) fn move_selection(&mut self, delta: isize) {
        let visible: Vec<ClonableRepositoryListItem> =
            filter_groups(&self.state.groups, &self.state.filter_text)
                .into_iter()
                .flat_map(|group| group.items.into_iter().map(|matched| matched.item.clone()))
                .collect();
        if visible.is_empty() {
            return;
        }

        let current = self
            .state
            .selected_item
            .as_ref()
            .and_then(|selected| visible.iter().position(|item| item.url == selected.url));
        let next = match current {
            None => 0,
            Some(index) => index
                .saturating_add_signed(delta)
                .min(visible.len().saturating_sub(1)),
        };

        if current != Some(next) {
            self.on_selection_changed(visible.into_iter().nth(next));
        }
    }

    pub(crate) fn on_choose_directory_requested(&mut self) -> Result<()> {
        if !self.mounted || self.chooser_receiver.is_some() {
            return Ok(());
        }
        self.chooser_receiver = Some(self.chooser.choose()?);
        Ok(())
    }

    fn apply_directory_choice(&mut self, choice: Option<PathBuf>) {
        let Some(path) = choice else {
            return;
        };
        diagnostics::record(format!("directory chosen: {}", path.display()));
        self.path = path.clone();
        self.events.push(SelectorEvent::PathChanged(path));
    }

    fn selection_hidden(&self) -> bool {
        let Some(selected) = &self.state.selected_item else {
            return false;
        };
        !filter_groups(&self.state.groups, &self.state.filter_text)
            .iter()
            .flat_map(|group| group.items.iter())
            .any(|matched| matched.item.url == selected.url)
    }

    pub(crate) fn view(&self) -> SelectorView<'_> {
        if self.state.loading {
            return SelectorView::Loading;
        }
        if self.state.connection_failed {
            return SelectorView::ConnectionFailed;
        }

        let filtered = filter_groups(&self.state.groups, &self.state.filter_text);
        if filtered.is_empty() {
            SelectorView::NoMatches
        } else {
            SelectorView::Populated(filtered)
        }
    }

    pub(crate) fn set_path(&mut self, path: PathBuf) {
        self.path = path;
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn state(&self) -> &SelectorState {
        &self.state
    }

    pub(crate) fn account(&self) -> &Account {
        &self.account
    }

    pub(crate) fn spinner(&self) -> &LoadingState {
        &self.spinner
    }

    #[cfg(test)]
    pub(crate) fn is_choosing_directory(&self) -> bool {
        self.chooser_receiver.is_some()
    }

    pub(crate) fn is_busy(&self) -> bool {
        !self.pending.is_empty() || self.chooser_receiver.is_some()
    }
}
