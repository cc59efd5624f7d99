// CLI runner - Executes the sync and maps its outcome to the exit status
use crate::application::sync_service::SyncService;

/// Runs the sync to completion, or aborts on Ctrl-C. An `Err` return makes
/// the process exit with status 1.
pub async fn execute(service: &SyncService) -> anyhow::Result<()> {
    tokio::select! {
        result = service.run() => {
            let report = result?;
            tracing::info!(
                "dashboard sync completed: {} deleted ({} delete failures), {} deployed, {} verified",
                report.deleted,
                report.delete_failures,
                report.deployed,
                report.verified
            );
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => {
            anyhow::bail!("sync interrupted")
        }
    }
}
