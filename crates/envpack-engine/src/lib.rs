//! Build-and-archive pipeline for envpack.
//!
//! Wires environment discovery, the script catalog, the process runner, and
//! the archive writer behind the prompt/notify ports. This is the main
//! coordination layer between the CLI and the microcrate adapters.
//!
//! The run is strictly sequential: an environment's archive is written (or
//! its failure reported) before the next build starts, because every build
//! overwrites the shared `dist` directory.

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use envpack_envfiles::environment_name;
use envpack_manifest::PackageManifest;
use envpack_ports::{CommandRunner, Notifier, Prompter};
use std::path::{Path, PathBuf};

/// External build tool invoked once per environment, as
/// `npm run <script> -- --mode <env>`.
pub const BUILD_TOOL: &str = "npm";

/// How the target environment set is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentSelection {
    /// Offer a multi-select over the discovered environments.
    Prompt,
    /// Build every discovered environment, in discovery order.
    All,
}

/// Per-run inputs, populated once by the host at invocation time.
///
/// Nothing in the pipeline reads ambient state: the project root and the
/// clock instant arrive here, which keeps runs reproducible under test.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub project_root: PathBuf,
    /// Wall-clock instant used for batch folder naming. Fixed up front so
    /// every environment of one run lands in the same batch folder even
    /// when the builds take minutes.
    pub now: NaiveDateTime,
    pub environments: EnvironmentSelection,
    /// Pre-answered script choice; skips the script prompt when set but is
    /// still validated against the build-script candidates.
    pub script: Option<String>,
}

pub struct Pipeline<'a> {
    pub prompter: &'a dyn Prompter,
    pub notifier: &'a dyn Notifier,
    pub runner: &'a dyn CommandRunner,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        prompter: &'a dyn Prompter,
        notifier: &'a dyn Notifier,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            prompter,
            notifier,
            runner,
        }
    }

    /// Run the full pipeline: discover → select → build → zip, once per
    /// selected environment.
    ///
    /// Configuration problems (unresolvable root, unparsable manifest, no
    /// environment files, nothing selected, broken script entry) abort the
    /// whole run as `Err`. A single environment's build or archive failure
    /// is reported through the notifier and does not stop the loop.
    pub fn run(&self, ctx: &RunContext) -> Result<()> {
        let root = ctx.project_root.as_path();
        if !root.is_dir() {
            bail!("project root {} is not a directory", root.display());
        }

        let manifest = PackageManifest::load(root)?;
        let batch = envpack_layout::batch_folder_name(manifest.name.as_deref(), ctx.now);

        let env_files = envpack_envfiles::discover(root)?;
        if env_files.is_empty() {
            bail!("no environment files (.env.*) found in {}", root.display());
        }

        let script = self.select_script(&manifest, ctx.script.as_deref())?;
        let environments = self.select_environments(&env_files, ctx.environments)?;

        for env_name in &environments {
            // Re-resolved each iteration. A missing or empty command is a
            // catalog problem that would hit every remaining environment
            // identically, so the whole run stops here.
            if manifest.script_command(&script).is_none() {
                bail!("no command found for script {script:?} in package.json");
            }

            self.notifier
                .info(&format!("Building for {env_name} with {script}..."));
            match self.build_and_archive(root, &batch, &script, env_name) {
                Ok(zip_path) => {
                    self.notifier.info(&format!(
                        "{env_name} build completed with {script} -> {}",
                        zip_path.display()
                    ));
                }
                Err(err) => {
                    self.notifier.error(&format!(
                        "error during build for {env_name} with {script}: {err:#}"
                    ));
                }
            }
        }

        Ok(())
    }

    /// Pure filter + prompt for the build script (step: script selection).
    fn select_script(&self, manifest: &PackageManifest, preset: Option<&str>) -> Result<String> {
        let candidates = manifest.build_scripts();
        if candidates.is_empty() {
            bail!("package.json has no scripts containing \"build\"");
        }

        if let Some(name) = preset {
            if !candidates.iter().any(|c| c == name) {
                bail!("script {name:?} is not a build script (candidates: {candidates:?})");
            }
            return Ok(name.to_string());
        }

        match self
            .prompter
            .choose_one("Select a build-related script to run", &candidates)?
        {
            Some(script) => Ok(script),
            None => bail!("no script selected"),
        }
    }

    /// Derive display names and narrow the environment set (step:
    /// environment selection). Selection order is kept as picked.
    fn select_environments(
        &self,
        env_files: &[String],
        mode: EnvironmentSelection,
    ) -> Result<Vec<String>> {
        let names: Vec<String> = env_files.iter().map(|f| environment_name(f)).collect();

        let picked = match mode {
            EnvironmentSelection::All => Some(names),
            EnvironmentSelection::Prompt => self
                .prompter
                .choose_many("Select one or more environments to build", &names)?,
        };

        match picked {
            Some(envs) if !envs.is_empty() => Ok(envs),
            _ => bail!("no environment selected"),
        }
    }

    /// One environment's build + archive. Failures are the caller's to
    /// report; they must not stop the remaining environments.
    fn build_and_archive(
        &self,
        root: &Path,
        batch: &str,
        script: &str,
        env_name: &str,
    ) -> Result<PathBuf> {
        let args = vec![
            "run".to_string(),
            script.to_string(),
            "--".to_string(),
            "--mode".to_string(),
            env_name.to_string(),
        ];
        self.runner.run(BUILD_TOOL, &args, root)?;

        let dist = envpack_layout::dist_dir(root);
        let zip_path = envpack_layout::archive_path(root, batch, env_name);
        let batch_dir = envpack_layout::batch_dir(root, batch);
        std::fs::create_dir_all(&batch_dir)
            .with_context(|| format!("create {}", batch_dir.display()))?;
        envpack_archive::zip_directory(&dist, &zip_path)?;
        Ok(zip_path)
    }
}
