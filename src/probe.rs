// Background reachability probe
//
// Runs a health check on a fixed interval, logging (not surfacing) failures,
// until the returned handle is stopped.
//
// Numan Thabit 2025 Nov

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::errors::GatewayError;

pub struct ProbeHandle {
	stop: watch::Sender<bool>,
	task: JoinHandle<()>,
}

impl ProbeHandle {
	/// Signal the probe loop and wait for it to exit.
	pub async fn stop(self) {
		let _ = self.stop.send(true);
		if let Err(err) = self.task.await {
			warn!(error = %err, "probe task ended abnormally");
		}
	}

	pub fn is_finished(&self) -> bool {
		self.task.is_finished()
	}
}

/// Start the probe task.
/// `check` is invoked once per tick; the first tick fires after `every`.
pub fn spawn_probe<F, Fut>(name: &'static str, every: Duration, mut check: F) -> ProbeHandle
where
	F: FnMut() -> Fut + Send + 'static,
	Fut: Future<Output = Result<(), GatewayError>> + Send + 'static,
{
	let (stop, mut stopped) = watch::channel(false);
	let task = tokio::spawn(async move {
		let start = tokio::time::Instant::now() + every;
		let mut ticker = tokio::time::interval_at(start, every);
		loop {
			tokio::select! {
				_ = ticker.tick() => {
					match check().await {
						Ok(()) => debug!(backend = name, "reachability probe ok"),
						Err(err) => warn!(backend = name, error = %err, "reachability probe failed"),
					}
				}
				res = stopped.changed() => {
					if res.is_err() || *stopped.borrow() {
						debug!(backend = name, "reachability probe stopped");
						break;
					}
				}
			}
		}
	});
	ProbeHandle { stop, task }
}
