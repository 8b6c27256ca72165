//! The user-facing question/notification collaborator.
//!
//! On the device this is the firmware's modal dialog; elsewhere it can be a
//! terminal or a fixed answer. The core only ever asks through [`Prompt`].

use async_trait::async_trait;
use derive_more::Display;
use std::sync::Arc;

pub const YES: &str = "Yes";
pub const NO: &str = "No";
pub const OK: &str = "OK";

/// Icon shown next to the prompt text.
///
/// Displays as the firmware dialog's icon code.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    #[display("1")]
    Info,
    #[display("2")]
    Question,
    #[display("3")]
    Attention,
}

pub type PromptHandle = Arc<dyn Prompt + Send + Sync>;

#[async_trait]
pub trait Prompt: Send + Sync {
    /// Show `text` with the given buttons and wait for a choice.
    ///
    /// Returns the 1-based index of the chosen button, or `None` when no
    /// choice could be obtained (dismissed, or the prompt failed to show).
    async fn ask(&self, icon: Icon, text: &str, buttons: &[&str]) -> Option<usize>;

    /// Ask a Yes/No question; anything but "Yes" counts as "No".
    async fn confirm(&self, text: &str) -> bool {
        self.ask(Icon::Question, text, &[YES, NO]).await == Some(1)
    }

    /// Show a message with a single "OK" button.
    async fn notify(&self, icon: Icon, text: &str) {
        self.ask(icon, text, &[OK]).await;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// One prompt shown during a test.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) struct Asked {
        pub icon: Icon,
        pub text: String,
        pub buttons: Vec<String>,
    }

    /// Answers prompts from a script and records everything it was asked.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedPrompt {
        answers: Mutex<VecDeque<Option<usize>>>,
        asked: Mutex<Vec<Asked>>,
    }
    impl ScriptedPrompt {
        pub fn new(answers: impl IntoIterator<Item = Option<usize>>) -> Self {
            Self { answers: Mutex::new(answers.into_iter().collect()), asked: Mutex::default() }
        }

        pub fn asked(&self) -> Vec<Asked> {
            self.asked.lock().unwrap().clone()
        }
    }
    #[async_trait]
    impl Prompt for ScriptedPrompt {
        async fn ask(&self, icon: Icon, text: &str, buttons: &[&str]) -> Option<usize> {
            self.asked.lock().unwrap().push(Asked {
                icon,
                text: text.to_string(),
                buttons: buttons.iter().map(|b| b.to_string()).collect(),
            });
            self.answers.lock().unwrap().pop_front().flatten()
        }
    }
}
