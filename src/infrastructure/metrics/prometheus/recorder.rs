use super::counters::{
    HTTP_DURATION_BUCKETS, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS,
    MONGODB_OPERATIONS_TOTAL,
};
use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use metrics_process::Collector;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How often buffered histogram samples are drained and process metrics refreshed.
pub const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// The process-wide Prometheus recorder and what keeps it drained.
pub struct InstalledRecorder {
    pub handle: PrometheusHandle,
    pub process: Arc<Collector>,
    upkeep: JoinHandle<()>,
}

static RECORDER: OnceCell<InstalledRecorder> = OnceCell::new();

/// Install the Prometheus recorder globally, once per process.
///
/// Installation also describes every metric family, registers the process
/// collector (CPU, memory, open files, start time) and starts the upkeep
/// thread. Later calls return the recorder installed by the first call.
pub fn init_metrics() -> anyhow::Result<&'static InstalledRecorder> {
    // ---
    RECORDER.get_or_try_init(|| -> anyhow::Result<InstalledRecorder> {
        let handle = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(HTTP_REQUEST_DURATION_SECONDS.to_string()),
                &HTTP_DURATION_BUCKETS,
            )?
            .install_recorder()?;

        describe_histogram!(
            HTTP_REQUEST_DURATION_SECONDS,
            Unit::Seconds,
            "Duration of HTTP requests in seconds"
        );
        describe_counter!(HTTP_REQUESTS_TOTAL, "Total number of HTTP requests");
        describe_counter!(MONGODB_OPERATIONS_TOTAL, "Total number of MongoDB operations");

        let process = Arc::new(Collector::default());
        process.describe();
        process.collect();

        let upkeep = spawn_upkeep(handle.clone(), Arc::clone(&process))?;

        tracing::info!("Prometheus recorder installed");
        Ok(InstalledRecorder {
            handle,
            process,
            upkeep,
        })
    })
}

/// Whether the upkeep thread of the installed recorder is alive.
pub fn upkeep_running() -> bool {
    RECORDER
        .get()
        .is_some_and(|recorder| !recorder.upkeep.is_finished())
}

/// Drain histogram buffers even when `/metrics` is never scraped.
fn spawn_upkeep(handle: PrometheusHandle, process: Arc<Collector>) -> anyhow::Result<JoinHandle<()>> {
    // ---
    let upkeep = thread::Builder::new()
        .name("prometheus-upkeep".to_string())
        .spawn(move || loop {
            thread::sleep(UPKEEP_INTERVAL);
            process.collect();
            handle.run_upkeep();
        })?;

    Ok(upkeep)
}
