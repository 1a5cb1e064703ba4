use anyhow::Context;
use callscreen_engine::traits::AudioPlayer;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsIdentity {
    MacOs,
    Windows,
    Other,
}

impl OsIdentity {
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            OsIdentity::MacOs
        } else if cfg!(windows) {
            OsIdentity::Windows
        } else {
            OsIdentity::Other
        }
    }

    /// Maps a uname-style platform name. Anything unrecognized gets the
    /// generic "open with default app" treatment.
    pub fn from_platform_name(name: &str) -> Self {
        match name {
            "Darwin" => OsIdentity::MacOs,
            "Windows" => OsIdentity::Windows,
            _ => OsIdentity::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// Plans the OS-appropriate invocation without spawning anything.
pub fn playback_command(os: OsIdentity, path: &Path) -> PlaybackCommand {
    let path = path.display().to_string();
    match os {
        OsIdentity::MacOs => PlaybackCommand {
            program: "afplay".into(),
            args: vec![path],
        },
        OsIdentity::Windows => PlaybackCommand {
            program: "cmd".into(),
            // `start` with an empty title opens the file with its default app.
            args: vec!["/C".into(), "start".into(), String::new(), path],
        },
        OsIdentity::Other => PlaybackCommand {
            program: "xdg-open".into(),
            args: vec![path],
        },
    }
}

/// Plays audio via the OS default player. Fire-and-forget: the spawned
/// process is never awaited and its exit status is never inspected, so a
/// player that starts and then fails goes unnoticed. A missing player
/// binary fails the spawn itself and is reported.
#[derive(Debug, Clone, Copy)]
pub struct SystemPlayer {
    os: OsIdentity,
}

impl SystemPlayer {
    pub fn new(os: OsIdentity) -> Self {
        Self { os }
    }
}

impl Default for SystemPlayer {
    fn default() -> Self {
        Self::new(OsIdentity::detect())
    }
}

#[async_trait::async_trait]
impl AudioPlayer for SystemPlayer {
    async fn play(&self, path: &Path) -> anyhow::Result<()> {
        let plan = playback_command(self.os, path);
        let child = Command::new(&plan.program)
            .args(&plan.args)
            .spawn()
            .with_context(|| format!("spawn audio player: {}", plan.program))?;
        drop(child);
        Ok(())
    }
}
