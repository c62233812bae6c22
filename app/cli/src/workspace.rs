//! Wires configuration into the executor, file store and skill catalog.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use vexec_config::AppConfig;
use vexec_config::BackendKind;
use vexec_exec::ContainerExecutionBackend;
use vexec_exec::Executor;
use vexec_exec::LocalExecutionBackend;
use vexec_file_store::FileStore;
use vexec_file_store::LocalFileStore;
use vexec_skill::SkillMetadata;
use vexec_skill::discover_skills;

/// Everything an agent session needs, built once from an [`AppConfig`].
///
/// The executor and the file store share one resolver, so a path means the
/// same file to both.
pub struct Workspace {
    pub executor: Arc<dyn Executor>,
    pub files: Arc<dyn FileStore>,
    pub skills: Vec<SkillMetadata>,
}

/// Creates the workspace directories and connects the configured backend.
///
/// For the docker backend this fails when the container is missing or not
/// running, before any command is executed.
pub async fn bootstrap(config: &AppConfig) -> anyhow::Result<Workspace> {
    config
        .ensure_directories()
        .context("failed to create workspace directories")?;

    let resolver = Arc::new(config.resolver()?);

    let executor: Arc<dyn Executor> = match config.backend {
        BackendKind::Local => Arc::new(
            LocalExecutionBackend::new(config.local_exec_config())
                .with_resolver(Arc::clone(&resolver)),
        ),
        BackendKind::Docker => Arc::new(
            ContainerExecutionBackend::connect_docker(config.container_exec_config()).await?,
        ),
    };

    let files: Arc<dyn FileStore> = Arc::new(LocalFileStore::new(Arc::clone(&resolver)));
    let skills = discover_skills(&config.skills_dir);

    info!(
        backend = %config.backend,
        executor = executor.id(),
        skills = skills.len(),
        "workspace ready"
    );

    Ok(Workspace {
        executor,
        files,
        skills,
    })
}

#[cfg(test)]
#[path = "workspace.test.rs"]
mod tests;
