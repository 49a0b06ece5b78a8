//! Terminal implementations of the prompt/notify ports.

use envpack_ports::{Notifier, Prompter};
use inquire::{InquireError, MultiSelect, Select};

/// Interactive prompts on the controlling terminal. `Esc`/`Ctrl-C` map to a
/// cancelled selection (`None`), which the pipeline treats as an abort.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn choose_one(&self, prompt: &str, candidates: &[String]) -> anyhow::Result<Option<String>> {
        match Select::new(prompt, candidates.to_vec()).prompt() {
            Ok(choice) => Ok(Some(choice)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn choose_many(
        &self,
        prompt: &str,
        candidates: &[String],
    ) -> anyhow::Result<Option<Vec<String>>> {
        match MultiSelect::new(prompt, candidates.to_vec()).prompt() {
            Ok(choices) => Ok(Some(choices)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Progress to stdout, failures to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("ERROR: {message}");
    }
}
