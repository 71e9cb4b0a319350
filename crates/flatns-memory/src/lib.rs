pub mod builtins;
pub mod host;
pub mod value;

use std::sync::Arc;

use flatns_core::{Namespace, ResolverOptions};

pub use host::MemoryHost;
pub use value::{Function, Symbol, Value};

/// A fresh host with builtins and the root of a namespace tree over it.
pub fn session(options: ResolverOptions) -> (Arc<MemoryHost>, Namespace<MemoryHost>) {
    let host = Arc::new(MemoryHost::with_builtins());
    let root = flatns_core::root_with(Arc::clone(&host), options);
    (host, root)
}
