//! Shutdown state.
//!
//! Ctrl+C either exits right away (nothing to clean up yet) or, once a watch
//! session registered itself, signals it so it can run `build_end` and stop.

use std::sync::OnceLock;

use tokio::sync::watch;

/// Shutdown signal for the watch session
static SHUTDOWN_TX: OnceLock<watch::Sender<bool>> = OnceLock::new();

/// Setup the global Ctrl+C handler. Call once at program start.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        match SHUTDOWN_TX.get() {
            Some(tx) => {
                crate::log!("watch"; "shutting down...");
                let _ = tx.send(true);
            }
            None => std::process::exit(0),
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Register a watch session and get the receiver that flips to `true` on Ctrl+C.
///
/// Only the first registration is wired to the handler; later calls get a
/// receiver of the same channel.
pub fn register_watch() -> watch::Receiver<bool> {
    SHUTDOWN_TX
        .get_or_init(|| watch::channel(false).0)
        .subscribe()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_watch_shares_channel() {
        let first = register_watch();
        let second = register_watch();
        assert!(first.same_channel(&second));
        assert!(!*first.borrow());
    }
}
