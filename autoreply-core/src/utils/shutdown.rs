use tokio::sync::watch;

/// Resolves once the shutdown flag is set.
///
/// If every sender is gone without the flag being set, nobody can request a
/// shutdown any more and this never resolves.
pub async fn shutdown_requested(shutdown_rx: &mut watch::Receiver<bool>) {
    let result = shutdown_rx.wait_for(|stop| *stop).await.map(|_| ());
    if result.is_err() {
        std::future::pending::<()>().await;
    }
}
