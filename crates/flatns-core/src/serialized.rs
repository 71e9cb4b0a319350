use parking_lot::ReentrantMutex;

use crate::bridge::SymbolBridge;
use crate::error::{NamespaceError, NonLocalExit};

/// Funnels every bridge call through one lock, for hosts embedded in more
/// than one thread. The lock is reentrant so a host callback running on the
/// calling thread can query the namespace again.
pub struct SerializedBridge<B> {
    inner: ReentrantMutex<B>,
}

impl<B> SerializedBridge<B> {
    pub fn new(bridge: B) -> Self {
        Self {
            inner: ReentrantMutex::new(bridge),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }
}

impl<B: SymbolBridge> SymbolBridge for SerializedBridge<B> {
    type Symbol = B::Symbol;
    type Value = B::Value;

    fn intern(&self, name: &str) -> Result<Self::Symbol, NamespaceError<Self::Value>> {
        self.inner.lock().intern(name)
    }

    fn is_function_bound(&self, symbol: &Self::Symbol) -> bool {
        self.inner.lock().is_function_bound(symbol)
    }

    fn is_value_bound(&self, symbol: &Self::Symbol) -> bool {
        self.inner.lock().is_value_bound(symbol)
    }

    fn get_function(&self, symbol: &Self::Symbol) -> Result<Self::Value, NonLocalExit<Self::Value>> {
        self.inner.lock().get_function(symbol)
    }

    fn set_function(
        &self,
        symbol: &Self::Symbol,
        function: Self::Value,
    ) -> Result<(), NonLocalExit<Self::Value>> {
        self.inner.lock().set_function(symbol, function)
    }

    fn get_value(&self, symbol: &Self::Symbol) -> Result<Self::Value, NonLocalExit<Self::Value>> {
        self.inner.lock().get_value(symbol)
    }

    fn set_value(
        &self,
        symbol: &Self::Symbol,
        value: Self::Value,
    ) -> Result<(), NonLocalExit<Self::Value>> {
        self.inner.lock().set_value(symbol, value)
    }

    fn invoke(
        &self,
        function: &Self::Value,
        args: Vec<Self::Value>,
    ) -> Result<Self::Value, NonLocalExit<Self::Value>> {
        self.inner.lock().invoke(function, args)
    }

    fn symbol_value(&self, symbol: &Self::Symbol) -> Self::Value {
        self.inner.lock().symbol_value(symbol)
    }

    fn keyword_marker(&self) -> char {
        self.inner.lock().keyword_marker()
    }
}
