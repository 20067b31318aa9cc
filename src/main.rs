use torrust_tracker_monitor::{app, bootstrap};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, monitor) = bootstrap::app::setup()?;

    let jobs = app::start(&config, monitor).await;

    // handle the signals
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Torrust monitor shutting down..");

            // Await for all jobs to shutdown
            futures::future::join_all(jobs).await;
            tracing::info!("Torrust monitor successfully shutdown.");
        }
    }

    Ok(())
}
