pub mod command;
pub mod config;
pub mod edge;
pub mod error;
pub mod event;
pub mod id;
pub mod node;
pub mod spawn;
pub mod store;

pub use command::Command;
pub use config::AppConfig;
pub use edge::{resolve_parent, Edge};
pub use error::{FlowcellError, Result};
pub use event::{EventBus, RunEvent};
pub use id::short_id;
pub use node::{Node, NodePatch, NodePayload, Position};
pub use spawn::spawn_child;
pub use store::{GraphSnapshot, GraphStore};
