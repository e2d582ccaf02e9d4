use std::sync::{Arc, RwLock};

use tracing::info;

use flowcell_core::command::Command;
use flowcell_core::error::Result;
use flowcell_core::event::{EventBus, RunEvent};
use flowcell_core::spawn::spawn_child;
use flowcell_core::store::{GraphSnapshot, GraphStore};
use flowcell_core::{Edge, Node, NodePatch};
use flowcell_layout::{layout, Direction};

use crate::dispatcher::{RunDispatcher, RunHandle};
use crate::service::ExecutionService;

/// What a handled command did.
#[derive(Debug)]
pub enum CommandEffect {
    /// The graph changed in place (connect, move, edit, re-layout).
    Mutated,
    /// A child cell and its edge were committed.
    Spawned { node: Node, edge: Edge },
    /// A run is in flight; the handle resolves when the output lands.
    Dispatched(RunHandle),
}

/// One editing session over one graph.
///
/// Owns the seeded store and is the single entry point for the rendering
/// collaborator: every canvas gesture arrives as a `Command` and goes
/// through `handle`. Reads go through `snapshot`; run progress is observed
/// via `subscribe`.
pub struct GraphSession {
    store: Arc<RwLock<GraphStore>>,
    dispatcher: RunDispatcher,
    events: Arc<EventBus>,
    direction: Direction,
}

impl GraphSession {
    /// A session over the standard seed graph.
    pub fn new(service: Arc<dyn ExecutionService>, direction: Direction) -> Self {
        let store = Arc::new(RwLock::new(GraphStore::seeded()));
        let events = Arc::new(EventBus::default());
        let dispatcher = RunDispatcher::new(store.clone(), service, events.clone());
        Self {
            store,
            dispatcher,
            events,
            direction,
        }
    }

    /// Apply one command to the graph.
    ///
    /// Store invariant violations (unknown node, duplicate id, dangling
    /// edge) abort the command and leave the graph untouched.
    pub fn handle(&self, command: Command) -> Result<CommandEffect> {
        match command {
            Command::Connect { source, target } => {
                info!(%source, %target, "Connecting nodes");
                self.store
                    .write()
                    .unwrap()
                    .add_edge(Edge::between(source, target))?;
                Ok(CommandEffect::Mutated)
            }
            Command::Move { id, position } => {
                self.store.write().unwrap().move_node(&id, position)?;
                Ok(CommandEffect::Mutated)
            }
            Command::EditCode { id, code } => {
                self.store
                    .write()
                    .unwrap()
                    .patch_node(&id, NodePatch::code(code))?;
                Ok(CommandEffect::Mutated)
            }
            Command::AddChild { id } => {
                let (node, edge) = spawn_child(&mut self.store.write().unwrap(), &id)?;
                Ok(CommandEffect::Spawned { node, edge })
            }
            Command::Run { id } => {
                let handle = self.dispatcher.dispatch(&id)?;
                Ok(CommandEffect::Dispatched(handle))
            }
            Command::AutoLayout => {
                self.auto_layout()?;
                Ok(CommandEffect::Mutated)
            }
        }
    }

    /// Re-position every node with the layered layout engine.
    fn auto_layout(&self) -> Result<()> {
        let snapshot = self.store.read().unwrap().snapshot();
        let placed = layout(&snapshot.nodes, &snapshot.edges, self.direction);

        let mut store = self.store.write().unwrap();
        for node in placed {
            store.move_node(&node.id, node.position)?;
        }
        info!(nodes = snapshot.nodes.len(), "Applied auto-layout");
        Ok(())
    }

    /// The current graph, cloned for read-only use.
    pub fn snapshot(&self) -> GraphSnapshot {
        self.store.read().unwrap().snapshot()
    }

    /// Subscribe to run lifecycle events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<RunEvent> {
        self.events.subscribe()
    }
}
