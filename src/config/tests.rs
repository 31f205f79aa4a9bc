use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_perpetual_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("PERPETUAL_CONFIG_PATH", "/tmp/perpetual-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/perpetual-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("perpetual")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("perpetual")
            .join("config.toml")
    );
}

#[test]
fn defaults_are_valid() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.playback.poll_interval(), std::time::Duration::from_millis(50));
    assert_eq!(s.playback.loop_infinite_count, 99);
    assert_eq!(s.playback.max_tick_failures, 3);
    assert_eq!(s.playback.volume, 1.0);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.playback.poll_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.poll_interval_ms = 5_000;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.max_tick_failures = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.nudge_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.volume_step = 0.0;
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
poll_interval_ms = 25
loop_infinite_count = 8
max_tick_failures = 5
autoplay = true
volume = 0.4

[controls]
nudge_ms = 250
scrub_seconds = 9
threshold_step = 2
volume_step = 0.1

[ui]
header_text = "hello"
track_fields = ["album", "title"]
track_separator = " • "
show_tenths = false

[logging]
filter = "perpetual=debug"
file = false
directory = "/tmp/perpetual-logs"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("PERPETUAL_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("PERPETUAL__PLAYBACK__POLL_INTERVAL_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.poll_interval_ms, 25);
    assert_eq!(s.playback.loop_infinite_count, 8);
    assert_eq!(s.playback.max_tick_failures, 5);
    assert!(s.playback.autoplay);
    assert_eq!(s.playback.volume, 0.4);
    assert_eq!(s.controls.nudge_ms, 250);
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.controls.threshold_step, 2);
    assert_eq!(s.controls.volume_step, 0.1);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(
        s.ui.track_fields,
        vec![TrackDisplayField::Album, TrackDisplayField::Title]
    );
    assert_eq!(s.ui.track_separator, " • ");
    assert!(!s.ui.show_tenths);
    assert_eq!(s.logging.filter, "perpetual=debug");
    assert!(!s.logging.file);
    assert_eq!(
        s.logging.directory,
        Some(std::path::PathBuf::from("/tmp/perpetual-logs"))
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
poll_interval_ms = 80
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("PERPETUAL_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("PERPETUAL__PLAYBACK__POLL_INTERVAL_MS", "20");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.poll_interval_ms, 20);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let _g1 = EnvGuard::set(
        "PERPETUAL_CONFIG_PATH",
        dir.path().join("absent.toml").to_str().unwrap(),
    );
    let _g2 = EnvGuard::remove("PERPETUAL__PLAYBACK__POLL_INTERVAL_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.poll_interval_ms, 50);
    assert_eq!(s.ui.track_separator, " - ");
}
