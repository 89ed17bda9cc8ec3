//! CLI handlers for `login` and `logout`

use crate::auth::TokenStore;
use crate::cli::{fail, notifier, LoginArgs};
use crate::config::Config;
use crate::notify::{Notification, Notifier};

pub fn execute(args: LoginArgs, config: Config) -> anyhow::Result<()> {
    let notifier = notifier();
    let store = TokenStore::new(&config.state_dir);

    if let Some(existing) = store.load() {
        println!(
            "Replacing session for {} (logged in {})",
            existing.username,
            existing.issued_at.format("%Y-%m-%d %H:%M")
        );
    }

    let token = store
        .login(&args.username, &args.password)
        .map_err(|e| fail(notifier.as_ref(), e.to_string()))?;
    notifier.notify(Notification::success(format!(
        "Logged in as {}",
        token.username
    )));
    Ok(())
}

pub fn logout(config: Config) -> anyhow::Result<()> {
    let notifier = notifier();
    let store = TokenStore::new(&config.state_dir);

    if store.logout()? {
        notifier.notify(Notification::success("Logged out"));
    } else {
        println!("Not logged in.");
    }
    Ok(())
}
