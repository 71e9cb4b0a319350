use std::fmt;

use crate::error::{NamespaceError, NonLocalExit};

/// Host runtime whose flat symbol table the namespace tree addresses.
///
/// Every method is a blocking round trip into the host. Implementations are
/// expected to be reentrant through their own call stack: a function invoked
/// via [`SymbolBridge::invoke`] may call back into the resolver.
pub trait SymbolBridge {
    /// Interned symbol handle.
    type Symbol: Clone + fmt::Debug;
    /// Any host object, including callables.
    type Value: Clone + fmt::Debug;

    /// Fails with `InvalidName` when `name` is not a representable identifier.
    fn intern(&self, name: &str) -> Result<Self::Symbol, NamespaceError<Self::Value>>;

    fn is_function_bound(&self, symbol: &Self::Symbol) -> bool;

    fn is_value_bound(&self, symbol: &Self::Symbol) -> bool;

    fn get_function(&self, symbol: &Self::Symbol) -> Result<Self::Value, NonLocalExit<Self::Value>>;

    fn set_function(
        &self,
        symbol: &Self::Symbol,
        function: Self::Value,
    ) -> Result<(), NonLocalExit<Self::Value>>;

    fn get_value(&self, symbol: &Self::Symbol) -> Result<Self::Value, NonLocalExit<Self::Value>>;

    fn set_value(
        &self,
        symbol: &Self::Symbol,
        value: Self::Value,
    ) -> Result<(), NonLocalExit<Self::Value>>;

    /// Calls `function` with already-converted arguments.
    fn invoke(
        &self,
        function: &Self::Value,
        args: Vec<Self::Value>,
    ) -> Result<Self::Value, NonLocalExit<Self::Value>>;

    /// The symbol itself as a first-class host value.
    fn symbol_value(&self, symbol: &Self::Symbol) -> Self::Value;

    /// Prefix that turns a name into a keyword symbol (`:name` in most Lisps).
    fn keyword_marker(&self) -> char {
        ':'
    }
}
