//! Tunables layering and commands file selection.

use rankbot::{BotSettings, commands_path};
use rankbot_social::irc::TWITCH_IRC_ADDR;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[test]
fn test_explicit_file_overrides_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[http]\ntimeout_secs = 5\n\n[credentials]\nrefresh_interval_secs = 60"
    )
    .unwrap();

    let settings = BotSettings::load(Some(file.path())).unwrap();

    assert_eq!(settings.http_timeout(), Duration::from_secs(5));
    assert_eq!(settings.refresh_interval(), Duration::from_secs(60));
    assert_eq!(settings.irc.address, TWITCH_IRC_ADDR);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(BotSettings::load(Some(&missing)).is_err());
}

#[test]
fn test_commands_path_prefers_command_line() {
    let settings = BotSettings::defaults().unwrap();

    assert_eq!(commands_path(None, &settings), PathBuf::from("commands.json"));
    assert_eq!(
        commands_path(Some(Path::new("/srv/bot/commands.json")), &settings),
        PathBuf::from("/srv/bot/commands.json")
    );
}
