use std::sync::{Arc, RwLock};

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use flowcell_core::error::{FlowcellError, Result};
use flowcell_core::event::{EventBus, RunEvent};
use flowcell_core::node::NodePatch;
use flowcell_core::resolve_parent;
use flowcell_core::store::GraphStore;

use crate::service::{ExecuteRequest, ExecutionService};

/// Output shown while a run is in flight.
pub const RUNNING_SENTINEL: &str = "Running...";

/// A dispatched run. The task resolves once the node's output has been
/// reconciled, whichever way the run went.
#[derive(Debug)]
pub struct RunHandle {
    pub node_id: String,
    pub task: JoinHandle<()>,
}

/// Dispatches cell runs against the execution service.
///
/// Each dispatch is two-phase: a synchronous phase that marks the node
/// running and captures its code and parent from the current graph, then a
/// spawned task that performs the service call and patches the result back.
/// Runs never hold the store lock across the call, so any number of nodes
/// can be in flight at once; overlapping runs of the same node are allowed
/// and the last completion wins.
pub struct RunDispatcher {
    store: Arc<RwLock<GraphStore>>,
    service: Arc<dyn ExecutionService>,
    events: Arc<EventBus>,
}

impl RunDispatcher {
    pub fn new(
        store: Arc<RwLock<GraphStore>>,
        service: Arc<dyn ExecutionService>,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            store,
            service,
            events,
        }
    }

    /// Start a run for `node_id`.
    ///
    /// Before returning, the node's output is patched to the running
    /// sentinel and its parent is resolved against the edge set as it is
    /// right now — a later re-wiring of the graph does not affect a run
    /// already dispatched. Fails with `NodeNotFound` without side effects
    /// if the node does not exist.
    pub fn dispatch(&self, node_id: &str) -> Result<RunHandle> {
        let (code, parent_id) = {
            let mut store = self.store.write().unwrap();
            let node = store
                .node(node_id)
                .ok_or_else(|| FlowcellError::NodeNotFound(node_id.to_string()))?;
            let code = node.payload.code.clone();
            let parent_id = resolve_parent(node_id, store.edges()).map(str::to_string);
            store.patch_node(node_id, NodePatch::output(RUNNING_SENTINEL))?;
            (code, parent_id)
        };

        info!(node_id, parent_id = ?parent_id, "Dispatching run");
        self.events.publish(RunEvent::Started {
            node_id: node_id.to_string(),
        });

        let request = ExecuteRequest {
            node_id: node_id.to_string(),
            parent_id,
            code,
        };

        let store = self.store.clone();
        let service = self.service.clone();
        let events = self.events.clone();
        let id = node_id.to_string();

        let task = tokio::spawn(async move {
            let outcome = service.execute(request).await;

            let (output, event) = match outcome {
                Ok(response) => {
                    let output = response.into_output();
                    debug!(node_id = %id, "Run finished");
                    (
                        output.clone(),
                        RunEvent::Finished {
                            node_id: id.clone(),
                            output,
                        },
                    )
                }
                Err(e) => {
                    let message = format!("Error: {}", e);
                    error!(node_id = %id, error = %e, "Run failed");
                    (
                        message.clone(),
                        RunEvent::Failed {
                            node_id: id.clone(),
                            message,
                        },
                    )
                }
            };

            let patched = store
                .write()
                .unwrap()
                .patch_node(&id, NodePatch::output(output));
            if let Err(e) = patched {
                // Nodes are never removed, so this only fires if that ever
                // changes; the run result is dropped rather than crashing.
                error!(node_id = %id, error = %e, "Could not reconcile run result");
            }

            events.publish(event);
        });

        Ok(RunHandle {
            node_id: node_id.to_string(),
            task,
        })
    }
}
