use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::carrier::Carrier;
use crate::error::{CoreResult, ShipgateError};
use crate::model::{DispatchOutcome, ShipmentRequest};
use crate::registry::CarrierRegistry;
use crate::storage::ShipmentStore;
use crate::telemetry::{self, DispatchTrace};
use crate::transport::Transport;

/// One resolved (carrier, request) pairing scheduled for execution.
/// Created fresh per dispatch and owned by the task that runs it.
struct Job {
    id: String,
    carrier: Option<Arc<dyn Carrier>>,
}

/// The dispatch engine: turns one canonical request into N independent
/// carrier jobs, runs them concurrently with full isolation, and aggregates
/// the per-job outcomes once every job has finished.
pub struct Dispatcher {
    registry: Arc<CarrierRegistry>,
    transport: Arc<dyn Transport>,
    store: Arc<dyn ShipmentStore>,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<CarrierRegistry>,
        transport: Arc<dyn Transport>,
        store: Arc<dyn ShipmentStore>,
    ) -> Self {
        Self {
            registry,
            transport,
            store,
        }
    }

    fn all_jobs(&self) -> Vec<Job> {
        self.registry
            .entries()
            .map(|(id, carrier)| Job {
                id: id.to_string(),
                carrier,
            })
            .collect()
    }

    /// Resolve the requested carrier ids into the concrete job set: every
    /// registered carrier when the list is empty, otherwise exactly the
    /// named ones. Unknown names abort the whole resolution before any I/O;
    /// duplicates are kept as independent jobs.
    fn jobs(&self, requested: &[String]) -> CoreResult<Vec<Job>> {
        if requested.is_empty() {
            return Ok(self.all_jobs());
        }
        let mut jobs = Vec::with_capacity(requested.len());
        for id in requested {
            if !self.registry.contains(id) {
                return Err(ShipgateError::unsupported(id.clone()));
            }
            jobs.push(Job {
                id: id.clone(),
                carrier: self.registry.capability(id),
            });
        }
        Ok(jobs)
    }

    /// Dispatch one shipment to the selected carriers.
    ///
    /// The only hard failure is resolution (`CarrierUnsupported`); transport
    /// and persistence failures are captured per-outcome. Dropping the
    /// returned future aborts every in-flight job, so the caller's request
    /// context bounds all carrier I/O uniformly; there is no internal
    /// timeout.
    pub async fn dispatch(
        &self,
        requested: &[String],
        req: ShipmentRequest,
    ) -> CoreResult<Vec<DispatchOutcome>> {
        let jobs = self.jobs(requested)?;
        Ok(self.run(jobs, Arc::new(req)).await)
    }

    async fn run(&self, jobs: Vec<Job>, req: Arc<ShipmentRequest>) -> Vec<DispatchOutcome> {
        let total = jobs.len();
        let mut tasks = JoinSet::new();
        for job in jobs {
            let req = Arc::clone(&req);
            let transport = Arc::clone(&self.transport);
            let store = Arc::clone(&self.store);
            tasks.spawn(async move { execute(job, req, transport, store).await });
        }

        // Full join: the report is assembled only after every job finished.
        // Jobs without a capability resolve to None and leave no outcome.
        let mut outcomes = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(outcome)) => outcomes.push(outcome),
                Ok(None) => {}
                // A panicked job is contained here; its siblings are unaffected.
                Err(err) => warn!(%err, "carrier job terminated abnormally"),
            }
        }
        info!(jobs = total, outcomes = outcomes.len(), "dispatch complete");
        outcomes
    }
}

async fn execute(
    job: Job,
    req: Arc<ShipmentRequest>,
    transport: Arc<dyn Transport>,
    store: Arc<dyn ShipmentStore>,
) -> Option<DispatchOutcome> {
    let Some(carrier) = job.carrier else {
        debug!(carrier = %job.id, "carrier has no capability, skipping");
        return None;
    };

    let endpoint = carrier.endpoint().to_string();
    let payload = carrier.payload(&req);
    debug!(carrier = %job.id, %endpoint, bytes = payload.len(), "sending carrier payload");

    let started = Instant::now();
    let body = match transport.send(&endpoint, payload).await {
        Ok(body) => body,
        Err(err) => {
            telemetry::emit(
                DispatchTrace::for_job(&job.id, &endpoint)
                    .set_latency_ms(started.elapsed().as_millis())
                    .set_response_bytes(err.body.len())
                    .set_error("transport", &err.message),
            );
            return Some(DispatchOutcome {
                endpoint,
                raw_response: String::from_utf8_lossy(&err.body).into_owned(),
                error: err.message,
            });
        }
    };

    if let Err(err) = store.save(&job.id, &body).await {
        // The carrier-side shipment already exists; surface its response
        // alongside the persistence error so it can be reconciled.
        let message = err.to_string();
        telemetry::emit(
            DispatchTrace::for_job(&job.id, &endpoint)
                .set_latency_ms(started.elapsed().as_millis())
                .set_response_bytes(body.len())
                .set_error("storage", &message),
        );
        return Some(DispatchOutcome {
            endpoint,
            raw_response: String::from_utf8_lossy(&body).into_owned(),
            error: message,
        });
    }

    telemetry::emit(
        DispatchTrace::for_job(&job.id, &endpoint)
            .set_latency_ms(started.elapsed().as_millis())
            .set_response_bytes(body.len()),
    );
    Some(DispatchOutcome {
        endpoint,
        raw_response: String::from_utf8_lossy(&body).into_owned(),
        error: String::new(),
    })
}
