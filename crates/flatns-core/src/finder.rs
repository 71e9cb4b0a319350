use crate::bridge::SymbolBridge;
use crate::namespace::{Namespace, NsResult};

/// Maps dotted module paths such as `emacs.package.initialize` onto nodes of
/// one namespace tree, for hosts whose module loader wants a lookup hook.
pub struct ModuleFinder<B: SymbolBridge> {
    root: Namespace<B>,
}

impl<B: SymbolBridge> ModuleFinder<B> {
    pub fn new(root: Namespace<B>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Namespace<B> {
        &self.root
    }

    /// Declines (`None`) unless the first segment is the configured root
    /// module name. The bare root name maps to the root node.
    pub fn find(&self, module: &str) -> Option<Namespace<B>> {
        let mut segments = module.split('.');
        if segments.next()? != self.root.options().root_module {
            return None;
        }
        Some(self.root.path(segments))
    }
}

/// Loads `feature` through the host's own `require` function.
pub fn require<B: SymbolBridge>(root: &Namespace<B>, feature: &str) -> NsResult<B::Value, B> {
    let bridge = root.bridge();
    let symbol = bridge.intern(feature)?;
    root.index("require").call(&[bridge.symbol_value(&symbol)])
}
