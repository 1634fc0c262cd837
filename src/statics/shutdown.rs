use once_cell::sync::Lazy;
use tokio_util::sync::CancellationToken;

static SHUTDOWN: Lazy<CancellationToken> = Lazy::new(CancellationToken::new);

/// Asks the handler task and the HTTP server to stop.
pub fn request_shutdown() {
    if !SHUTDOWN.is_cancelled() {
        log::info!("Shutdown requested");
    }
    SHUTDOWN.cancel();
}

/// Every clone observes the same shutdown request.
pub fn global_cancellation_token() -> CancellationToken {
    SHUTDOWN.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_cancellation() {
        let a = global_cancellation_token();
        let b = global_cancellation_token();

        request_shutdown();

        assert!(a.is_cancelled());
        assert!(b.is_cancelled());
    }
}
