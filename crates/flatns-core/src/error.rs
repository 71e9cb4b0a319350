use std::fmt;

use thiserror::Error;

/// Which cell of a symbol a resolution is looking at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Function,
    Value,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Function => write!(f, "function"),
            BindingKind::Value => write!(f, "value"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExitKind {
    Signal,
    Throw,
}

/// A non-local exit raised by the host while reading, writing or calling.
///
/// `symbol` is the error symbol of a signal or the catch tag of a throw; both
/// payloads are kept as host values so callers can rethrow them untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct NonLocalExit<V> {
    pub kind: ExitKind,
    pub symbol: V,
    pub data: V,
}

impl<V> NonLocalExit<V> {
    pub fn signal(symbol: V, data: V) -> Self {
        NonLocalExit {
            kind: ExitKind::Signal,
            symbol,
            data,
        }
    }

    pub fn throw(tag: V, value: V) -> Self {
        NonLocalExit {
            kind: ExitKind::Throw,
            symbol: tag,
            data: value,
        }
    }

    pub fn is_signal(&self) -> bool {
        self.kind == ExitKind::Signal
    }
}

impl<V: fmt::Debug> fmt::Display for NonLocalExit<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ExitKind::Signal => write!(f, "signal {:?}: {:?}", self.symbol, self.data),
            ExitKind::Throw => write!(f, "throw to {:?}: {:?}", self.symbol, self.data),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NamespaceError<V: fmt::Debug> {
    #[error("invalid symbol name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("separator policy must contain at least one character")]
    InvalidPolicy,

    #[error("ambiguous {kind} binding: both {first:?} and {second:?} are bound")]
    AmbiguousBinding {
        kind: BindingKind,
        first: String,
        second: String,
    },

    #[error("no {kind} binding among {candidates:?}")]
    UnboundSymbol {
        kind: BindingKind,
        candidates: Vec<String>,
    },

    #[error("non-local exit: {0}")]
    Exit(NonLocalExit<V>),
}

impl<V: fmt::Debug> NamespaceError<V> {
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        NamespaceError::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn ambiguous(kind: BindingKind, first: impl Into<String>, second: impl Into<String>) -> Self {
        NamespaceError::AmbiguousBinding {
            kind,
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn unbound(kind: BindingKind, candidates: Vec<String>) -> Self {
        NamespaceError::UnboundSymbol { kind, candidates }
    }

    /// The host exit this error wraps, if it came from the host at all.
    pub fn exit(&self) -> Option<&NonLocalExit<V>> {
        match self {
            NamespaceError::Exit(exit) => Some(exit),
            _ => None,
        }
    }
}

impl<V: fmt::Debug> From<NonLocalExit<V>> for NamespaceError<V> {
    fn from(exit: NonLocalExit<V>) -> Self {
        NamespaceError::Exit(exit)
    }
}
