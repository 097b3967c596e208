// Mapping of cluster API objects onto the snapshot records
pub mod base;
pub mod nodes;
pub mod pods;
pub mod services;

pub use base::{resolve_self_link, ObjectKind, ObjectList};
pub use nodes::{node_from_object, NodeObject};
pub use pods::{metrics_endpoint_for, pod_from_object, select_metrics};
pub use services::service_from_object;
