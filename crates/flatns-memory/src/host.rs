use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use flatns_core::{NamespaceError, NonLocalExit, SymbolBridge};
use tracing::debug;

use crate::builtins;
use crate::value::{Function, Symbol, Value};

pub const NIL: &str = "nil";
pub const T: &str = "t";

#[derive(Clone, Default)]
struct Cells {
    function: Option<Value>,
    value: Option<Value>,
}

/// A single obarray with function and value cells, standing in for a real
/// Lisp host.
///
/// `nil`, `t` and every keyword are constants that evaluate to themselves.
/// No lock is held while a native function runs, so functions may call back
/// into the host.
pub struct MemoryHost {
    obarray: RwLock<HashMap<Symbol, Cells>>,
    keyword_marker: char,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            obarray: RwLock::new(HashMap::new()),
            keyword_marker: ':',
        }
    }

    /// A host preloaded with `list`, `+`, `signal`, `throw`, `provide`,
    /// `featurep`, `require` and the `features` variable.
    pub fn with_builtins() -> Self {
        let host = Self::new();
        builtins::install(&host);
        host
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Symbol, Cells>> {
        self.obarray.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Symbol, Cells>> {
        self.obarray.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Interns `name`, creating the symbol on first use.
    pub fn symbol(&self, name: &str) -> Result<Symbol, NamespaceError<Value>> {
        if name.contains('\0') {
            return Err(NamespaceError::invalid_name(
                name,
                "symbol names cannot contain NUL",
            ));
        }
        let symbol = Symbol::new(name);
        self.write().entry(symbol.clone()).or_default();
        Ok(symbol)
    }

    /// Symbol value for names already known to be valid.
    pub(crate) fn sym(&self, name: &str) -> Value {
        let symbol = Symbol::new(name);
        self.write().entry(symbol.clone()).or_default();
        Value::Symbol(symbol)
    }

    pub(crate) fn put_function(&self, name: &str, function: Value) {
        self.write().entry(Symbol::new(name)).or_default().function = Some(function);
    }

    pub(crate) fn put_value(&self, name: &str, value: Value) {
        self.write().entry(Symbol::new(name)).or_default().value = Some(value);
    }

    pub fn is_constant(&self, symbol: &Symbol) -> bool {
        matches!(symbol.name(), NIL | T) || symbol.is_keyword(self.keyword_marker)
    }

    fn constant_value(&self, symbol: &Symbol) -> Option<Value> {
        match symbol.name() {
            NIL => Some(Value::Nil),
            T => Some(Value::T),
            _ if symbol.is_keyword(self.keyword_marker) => Some(Value::Symbol(symbol.clone())),
            _ => None,
        }
    }

    /// Builds a signal with `data` as its payload list.
    pub fn signal(&self, error: &str, data: Vec<Value>) -> NonLocalExit<Value> {
        debug!(error, "signal raised");
        NonLocalExit::signal(self.sym(error), Value::List(data))
    }

    pub fn defun(&self, name: &str, function: Function) -> Result<Symbol, NamespaceError<Value>> {
        let symbol = self.symbol(name)?;
        self.set_function(&symbol, Value::Function(function))?;
        Ok(symbol)
    }

    pub fn defvar(&self, name: &str, value: Value) -> Result<Symbol, NamespaceError<Value>> {
        let symbol = self.symbol(name)?;
        self.set_value(&symbol, value)?;
        Ok(symbol)
    }

    /// Clears the value cell (`makunbound`).
    pub fn unbind(&self, name: &str) {
        if let Some(cells) = self.write().get_mut(&Symbol::new(name)) {
            cells.value = None;
        }
    }

    /// Clears the function cell (`fmakunbound`).
    pub fn fmakunbound(&self, name: &str) {
        if let Some(cells) = self.write().get_mut(&Symbol::new(name)) {
            cells.function = None;
        }
    }

    /// Value cell of `name`, if bound.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let symbol = Symbol::new(name);
        self.constant_value(&symbol)
            .or_else(|| self.read().get(&symbol).and_then(|cells| cells.value.clone()))
    }

    fn function_of(&self, callee: &Value) -> Result<Function, NonLocalExit<Value>> {
        match callee {
            Value::Function(func) => Ok(func.clone()),
            Value::Symbol(symbol) => match self.get_function(symbol)? {
                Value::Function(func) => Ok(func),
                other => Err(self.signal("invalid-function", vec![other])),
            },
            other => Err(self.signal("invalid-function", vec![other.clone()])),
        }
    }
}

impl SymbolBridge for MemoryHost {
    type Symbol = Symbol;
    type Value = Value;

    fn intern(&self, name: &str) -> Result<Symbol, NamespaceError<Value>> {
        self.symbol(name)
    }

    fn is_function_bound(&self, symbol: &Symbol) -> bool {
        self.read()
            .get(symbol)
            .is_some_and(|cells| cells.function.is_some())
    }

    fn is_value_bound(&self, symbol: &Symbol) -> bool {
        self.constant_value(symbol).is_some()
            || self
                .read()
                .get(symbol)
                .is_some_and(|cells| cells.value.is_some())
    }

    fn get_function(&self, symbol: &Symbol) -> Result<Value, NonLocalExit<Value>> {
        let function = self.read().get(symbol).and_then(|cells| cells.function.clone());
        function.ok_or_else(|| self.signal("void-function", vec![Value::Symbol(symbol.clone())]))
    }

    fn set_function(&self, symbol: &Symbol, function: Value) -> Result<(), NonLocalExit<Value>> {
        if symbol.name() == NIL && !function.is_nil() {
            return Err(self.signal("setting-constant", vec![Value::Symbol(symbol.clone())]));
        }
        debug!(symbol = symbol.name(), "function cell written");
        self.write().entry(symbol.clone()).or_default().function = Some(function);
        Ok(())
    }

    fn get_value(&self, symbol: &Symbol) -> Result<Value, NonLocalExit<Value>> {
        if let Some(value) = self.constant_value(symbol) {
            return Ok(value);
        }
        let value = self.read().get(symbol).and_then(|cells| cells.value.clone());
        value.ok_or_else(|| self.signal("void-variable", vec![Value::Symbol(symbol.clone())]))
    }

    fn set_value(&self, symbol: &Symbol, value: Value) -> Result<(), NonLocalExit<Value>> {
        if self.is_constant(symbol) {
            return Err(self.signal("setting-constant", vec![Value::Symbol(symbol.clone())]));
        }
        debug!(symbol = symbol.name(), "value cell written");
        self.write().entry(symbol.clone()).or_default().value = Some(value);
        Ok(())
    }

    fn invoke(&self, function: &Value, args: Vec<Value>) -> Result<Value, NonLocalExit<Value>> {
        let func = self.function_of(function)?;
        if !func.accepts(args.len()) {
            return Err(self.signal(
                "wrong-number-of-arguments",
                vec![func.arity_value(), Value::Int(args.len() as i64)],
            ));
        }
        func.apply(self, args)
    }

    fn symbol_value(&self, symbol: &Symbol) -> Value {
        match symbol.name() {
            NIL => Value::Nil,
            T => Value::T,
            _ => Value::Symbol(symbol.clone()),
        }
    }

    fn keyword_marker(&self) -> char {
        self.keyword_marker
    }
}
