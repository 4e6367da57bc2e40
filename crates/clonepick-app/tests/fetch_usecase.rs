mod support;

use clonepick_app::{RepositorySource, load_repositories};
use clonepick_core::account::Account;
use clonepick_core::repository::group_repositories;

use support::{QueueRunner, failed_output, ok_output};

#[test]
fn gh_fetch_feeds_grouping_for_account_login() {
    let stdout = concat!(
        r#"{"name":"hello-world","owner":{"login":"octocat"},"clone_url":"https://github.com/octocat/hello-world.git"}"#,
        "\n",
        r#"{"name":"linguist","owner":{"login":"github"},"clone_url":"https://github.com/github/linguist.git"}"#,
        "\n",
    );
    let runner = QueueRunner::new(vec![ok_output(stdout)]);
    let account = Account::new(1, "octocat");

    let repositories =
        load_repositories(&RepositorySource::Gh, &account, &runner).expect("repositories");
    let groups = group_repositories(&repositories, &account.login);

    assert_eq!(groups.len(), 2);
    assert!(groups[0].is_own());
    assert_eq!(groups[1].identifier, "github");

    let calls = runner.calls();
    assert_eq!(calls[0].program, "gh");
    assert_eq!(calls[0].args[0], "api");
}

#[test]
fn gh_failure_yields_no_result() {
    let runner = QueueRunner::new(vec![failed_output("could not resolve host", 1)]);

    assert!(
        load_repositories(&RepositorySource::Gh, &Account::new(1, "octocat"), &runner).is_none()
    );
}
