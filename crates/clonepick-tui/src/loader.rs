use std::sync::mpsc::{self, Receiver};

use clonepick_app::{RepositorySource, load_repositories};
use clonepick_core::account::Account;
use clonepick_core::command_runner::SystemCommandRunner;

use crate::selector::{RepositoryLoadEvent, RepositoryLoader};

#[derive(Debug, Clone)]
pub(crate) struct SystemRepositoryLoader {
    source: RepositorySource,
}

impl SystemRepositoryLoader {
    pub(crate) fn new(source: RepositorySource) -> Self {
        Self { source }
    }
}

impl RepositoryLoader for SystemRepositoryLoader {
    fn spawn_fetch(&self, account: Account, token: u64) -> Receiver<RepositoryLoadEvent> {
        let (sender, receiver) = mpsc::channel();
        let source = self.source.clone();
        std::thread::spawn(move || {
            let runner = SystemCommandRunner::new();
            let result = load_repositories(&source, &account, &runner);
            let _ = sender.send(RepositoryLoadEvent::Done {
                token,
                account_id: account.id,
                result,
            });
        });
        receiver
    }
}
