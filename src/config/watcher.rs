//! Configuration file watcher for hot reload of the provider chain.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::handle::ConfigHandle;
use crate::config::loader::load_config;

/// Watches the configuration file and publishes each valid provider chain.
pub struct ConfigWatcher {
    path: PathBuf,
    handle: ConfigHandle,
}

impl ConfigWatcher {
    /// Create a watcher that will publish reloaded chains into `handle`.
    pub fn new(path: &Path, handle: ConfigHandle) -> Self {
        Self {
            path: path.to_path_buf(),
            handle,
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let handle = self.handle.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Config file change detected, reloading provider chain");
                        match load_config(&path) {
                            Ok(new_config) => {
                                tracing::info!(
                                    providers = new_config.providers.len(),
                                    "Provider chain reloaded"
                                );
                                handle.replace(new_config.providers);
                            }
                            Err(e) => {
                                tracing::error!(
                                    "Failed to reload config: {}. Keeping current provider chain.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_reload_publishes_new_chain() {
        let path = std::env::temp_dir().join(format!("mail-failover-watch-{}.toml", std::process::id()));
        std::fs::write(&path, r#"providers = [{ brevo = { api_key = "k" } }]"#).unwrap();

        let handle = ConfigHandle::default();
        let _watcher = ConfigWatcher::new(&path, handle.clone()).run().unwrap();

        std::fs::write(
            &path,
            r#"providers = [{ postmark = { api_key = "a" } }, { mailgun = { domain = "d", api_key = "b" } }]"#,
        )
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(10);
        while handle.load().len() != 2 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(50));
        }
        assert_eq!(handle.load().entries()[0].id.as_str(), "postmark");
        assert_eq!(handle.load().len(), 2);

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_invalid_reload_keeps_chain() {
        let path = std::env::temp_dir().join(format!("mail-failover-watch-bad-{}.toml", std::process::id()));
        std::fs::write(&path, r#"providers = [{ brevo = { api_key = "k" } }]"#).unwrap();

        let handle = ConfigHandle::new(crate::config::load_config(&path).unwrap().providers);
        let _watcher = ConfigWatcher::new(&path, handle.clone()).run().unwrap();

        std::fs::write(&path, "providers = []").unwrap();
        std::thread::sleep(Duration::from_millis(500));

        assert_eq!(handle.load().len(), 1);
        std::fs::remove_file(&path).unwrap_or_default();
    }
}
