use std::fmt;
use std::sync::Arc;

use flatns_core::NonLocalExit;

use crate::host::MemoryHost;

/// Interned symbol. Two symbols are the same symbol exactly when their names
/// are equal.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub(crate) fn new(name: &str) -> Self {
        Symbol(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_keyword(&self, marker: char) -> bool {
        self.0.starts_with(marker)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type NativeFn =
    dyn Fn(&MemoryHost, Vec<Value>) -> Result<Value, NonLocalExit<Value>> + Send + Sync;

/// A host-native function with an arity range. `max_args = None` accepts any
/// number of trailing arguments.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    min_args: usize,
    max_args: Option<usize>,
    body: Arc<NativeFn>,
}

impl Function {
    pub fn native<F>(name: &str, min_args: usize, max_args: Option<usize>, body: F) -> Self
    where
        F: Fn(&MemoryHost, Vec<Value>) -> Result<Value, NonLocalExit<Value>> + Send + Sync + 'static,
    {
        Function {
            name: Arc::from(name),
            min_args,
            max_args,
            body: Arc::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accepts(&self, argc: usize) -> bool {
        argc >= self.min_args && self.max_args.map_or(true, |max| argc <= max)
    }

    pub(crate) fn apply(
        &self,
        host: &MemoryHost,
        args: Vec<Value>,
    ) -> Result<Value, NonLocalExit<Value>> {
        (self.body)(host, args)
    }

    pub(crate) fn arity_value(&self) -> Value {
        let max = match self.max_args {
            Some(max) => Value::Int(max as i64),
            None => Value::Symbol(Symbol::new("many")),
        };
        Value::List(vec![Value::Int(self.min_args as i64), max])
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<subr {}>", self.name)
    }
}

#[derive(Clone)]
pub enum Value {
    Nil,
    T,
    Int(i64),
    Float(f64),
    Str(String),
    Symbol(Symbol),
    List(Vec<Value>),
    Function(Function),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(sym) => Some(sym),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) | (Value::T, Value::T) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(&a.body, &b.body),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::T => write!(f, "t"),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{:?}", n),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Symbol(sym) => write!(f, "{}", sym),
            Value::List(items) => {
                write!(f, "(")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{:?}", item)?;
                }
                write!(f, ")")
            }
            Value::Function(func) => write!(f, "{:?}", func),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        if b {
            Value::T
        } else {
            Value::Nil
        }
    }
}

impl From<Function> for Value {
    fn from(func: Function) -> Self {
        Value::Function(func)
    }
}
