//! Ways of asking the user: the device's dialog utility, the terminal, or
//! nobody at all.

use async_trait::async_trait;
use pbfix_library::{Icon, Prompt};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// The firmware's modal dialog (`/ebrmain/bin/dialog`).
///
/// Invoked as `dialog <icon> "" <text> <button>...`; the exit status is the
/// 1-based index of the chosen button.
#[derive(Debug, Clone)]
pub struct DialogPrompt {
    program: PathBuf,
}
impl DialogPrompt {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }
}
#[async_trait]
impl Prompt for DialogPrompt {
    async fn ask(&self, icon: Icon, text: &str, buttons: &[&str]) -> Option<usize> {
        let status = Command::new(&self.program)
            .arg(icon.to_string())
            .arg("")
            .arg(text)
            .args(buttons)
            .status()
            .await;
        match status {
            Ok(status) => {
                let choice = status.code().and_then(|code| usize::try_from(code).ok()).filter(|&code| code >= 1);
                debug!(?choice, "Dialog closed");
                choice
            },
            Err(err) => {
                warn!(program = %self.program.display(), error = %err, "Could not show dialog");
                None
            },
        }
    }
}

/// Questions on stderr, answers on stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

#[async_trait]
impl Prompt for TerminalPrompt {
    async fn ask(&self, _icon: Icon, text: &str, buttons: &[&str]) -> Option<usize> {
        let mut question = format!("\n{text}\n");
        for (index, button) in buttons.iter().enumerate() {
            question.push_str(&format!("  [{}] {button}\n", index + 1));
        }
        question.push_str("> ");
        let mut stderr = tokio::io::stderr();
        stderr.write_all(question.as_bytes()).await.ok()?;
        stderr.flush().await.ok()?;
        let mut line = String::new();
        BufReader::new(tokio::io::stdin()).read_line(&mut line).await.ok()?;
        parse_choice(&line, buttons)
    }
}

/// Accept either a button number or its label (case-insensitive).
fn parse_choice(input: &str, buttons: &[&str]) -> Option<usize> {
    let input = input.trim();
    if let Ok(number) = input.parse::<usize>() {
        return (1..=buttons.len()).contains(&number).then_some(number);
    }
    buttons.iter().position(|button| button.eq_ignore_ascii_case(input)).map(|index| index + 1)
}

/// Picks the first offered button found in a fixed preference list.
#[derive(Debug, Clone)]
pub struct UnattendedPrompt {
    preferred: Vec<&'static str>,
}
impl UnattendedPrompt {
    pub fn new(preferred: impl IntoIterator<Item = &'static str>) -> Self {
        Self { preferred: preferred.into_iter().collect() }
    }
}
#[async_trait]
impl Prompt for UnattendedPrompt {
    async fn ask(&self, _icon: Icon, text: &str, buttons: &[&str]) -> Option<usize> {
        let choice = self
            .preferred
            .iter()
            .find_map(|preferred| buttons.iter().position(|button| button == preferred))
            .map(|index| index + 1);
        info!(text, answer = choice.map(|c| buttons[c - 1]), "Answered without asking");
        choice
    }
}
