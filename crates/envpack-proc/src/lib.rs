//! Process execution for envpack builds.

use envpack_ports::{CommandRunner, RunError};
use std::path::Path;
use std::process::Command;

/// [`CommandRunner`] backed by `std::process::Command`.
///
/// Blocks until the child exits. Stdout and stderr are inherited so the
/// build tool's own output stays visible to the user.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), RunError> {
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()
            .map_err(|err| RunError::Spawn {
                command: program.to_string(),
                message: err.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(RunError::Exit {
                command: program.to_string(),
                code: status.code(),
            })
        }
    }
}
