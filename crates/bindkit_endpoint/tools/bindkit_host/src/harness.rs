use std::sync::Arc;

use anyhow::{Context, Result};
use bindkit_core::lifecycle::{Handshake, State};
use bindkit_endpoint::host::HostContext;
use bindkit_endpoint::services::{Connector, QueryApi};
use bindkit_endpoint::EnvironmentEndpoint;
use tracing::{debug, info};

use crate::config::Config;
use crate::demo::{RecordingConnector, StaticQueryApi};

/// What one harness run observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub binds: usize,
    pub unbinds: usize,
    pub stale_unbinds: usize,
    pub early_handshake: Option<Handshake>,
    pub handshake: Handshake,
    pub registrations: usize,
    pub registrations_with_query_api: usize,
    pub final_state: State,
}

#[derive(Debug, Default)]
struct WorkerTally {
    binds: usize,
    unbinds: usize,
    stale_unbinds: usize,
}

impl WorkerTally {
    fn unbind(&mut self, removed: bool) {
        if removed {
            self.unbinds += 1;
        } else {
            self.stale_unbinds += 1;
        }
    }
}

/// Play the host: churn bindings from concurrent workers, then bind a final
/// pair and bracket one activation with activate/deactivate.
pub async fn run(config: &Config) -> Result<RunReport> {
    let endpoint = EnvironmentEndpoint::new(config.endpoint_name.clone())
        .context("create endpoint")?;
    let context = HostContext::new("bindkit_host")
        .with_property("workers", config.workers.to_string())
        .with_property("rounds", config.rounds.to_string());

    let early_handshake = if config.activate_early {
        Some(
            endpoint
                .activate(context.clone())
                .context("early activation")?,
        )
    } else {
        None
    };

    let mut handles = Vec::with_capacity(config.workers);
    for worker in 0..config.workers {
        let endpoint = Arc::clone(&endpoint);
        let rounds = config.rounds;
        handles.push(tokio::task::spawn_blocking(move || {
            churn(&endpoint, worker, rounds)
        }));
    }

    let mut totals = WorkerTally::default();
    for handle in handles {
        let tally = handle.await.context("binding worker panicked")?;
        totals.binds += tally.binds;
        totals.unbinds += tally.unbinds;
        totals.stale_unbinds += tally.stale_unbinds;
    }
    debug!(?totals, "binding churn finished");

    let connector = Arc::new(RecordingConnector::default());
    endpoint.added_query_api(Arc::new(StaticQueryApi { generation: usize::MAX }));
    endpoint.added_connector(connector.clone());

    let handshake = endpoint.activate(context).context("activation")?;
    let final_state = endpoint.state();
    endpoint.deactivate();

    info!(
        endpoint = endpoint.name(),
        registrations = connector.registrations(),
        stale_unbinds = totals.stale_unbinds,
        "harness run complete"
    );

    Ok(RunReport {
        binds: totals.binds + 2,
        unbinds: totals.unbinds,
        stale_unbinds: totals.stale_unbinds,
        early_handshake,
        handshake,
        registrations: connector.registrations(),
        registrations_with_query_api: connector.registrations_with_query_api(),
        final_state,
    })
}

// Each round binds fresh instances and then unbinds the previous round's,
// which the host does when a service is replaced. Those unbinds are stale by
// construction; the last pair may or may not be, depending on other workers.
fn churn(endpoint: &EnvironmentEndpoint, worker: usize, rounds: usize) -> WorkerTally {
    let mut tally = WorkerTally::default();
    let mut previous: Option<(Arc<dyn QueryApi>, Arc<Connector>)> = None;

    for round in 0..rounds {
        let api: Arc<dyn QueryApi> = Arc::new(StaticQueryApi {
            generation: worker * rounds + round,
        });
        let connector: Arc<Connector> = Arc::new(RecordingConnector::default());

        endpoint.added_query_api(api.clone());
        endpoint.added_connector(connector.clone());
        tally.binds += 2;

        if let Some((old_api, old_connector)) = previous.replace((api, connector)) {
            tally.unbind(endpoint.removed_query_api(&old_api));
            tally.unbind(endpoint.removed_connector(&old_connector));
        }
    }

    if let Some((api, connector)) = previous {
        tally.unbind(endpoint.removed_query_api(&api));
        tally.unbind(endpoint.removed_connector(&connector));
    }

    tally
}
