use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use im::Vector;
use tracing::trace;

use crate::bridge::SymbolBridge;
use crate::candidates::Candidates;
use crate::error::{BindingKind, NamespaceError};
use crate::options::ResolverOptions;
use crate::path::{extend_with_label, extend_with_literal, PrefixGroup};
use crate::policy::SeparatorPolicy;
use crate::resolver;

pub type NsResult<T, B> = Result<T, NamespaceError<<B as SymbolBridge>::Value>>;

/// How a child was reached; attribute and index children never share entries.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChildKey {
    Attr(String),
    Index(String),
}

/// What a namespace turns into when handed to the host as a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coerce {
    /// The canonical symbol, bound or not.
    Symbol,
    /// The value of the single value-bound candidate.
    Binding,
}

/// Result of attribute-style access.
pub enum Attr<B: SymbolBridge> {
    Namespace(Namespace<B>),
    Value(B::Value),
}

impl<B: SymbolBridge> fmt::Debug for Attr<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attr::Namespace(ns) => f.debug_tuple("Namespace").field(ns).finish(),
            Attr::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// Labels of the form `__name__` hold node bookkeeping, not host symbols.
pub fn is_reserved_label(label: &str) -> bool {
    label.len() > 4 && label.starts_with("__") && label.ends_with("__")
}

struct Node<B: SymbolBridge> {
    bridge: Arc<B>,
    options: Arc<ResolverOptions>,
    groups: Vector<PrefixGroup>,
    policy: SeparatorPolicy,
    children: RwLock<HashMap<ChildKey, Namespace<B>>>,
    internal: RwLock<HashMap<String, B::Value>>,
}

/// A path prefix into the host's flat symbol table.
///
/// Cloning is cheap and clones share the same child cache. Groups and policy
/// never change after construction; only the cache and the reserved-label
/// state are mutable.
pub struct Namespace<B: SymbolBridge> {
    node: Arc<Node<B>>,
}

impl<B: SymbolBridge> Clone for Namespace<B> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<B: SymbolBridge> fmt::Debug for Namespace<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("canonical", &self.candidates().next())
            .field("spellings", &self.candidates().size_hint().1)
            .field("policy", &self.node.policy)
            .finish()
    }
}

/// Root of a namespace tree with options taken from the environment.
pub fn root<B: SymbolBridge>(bridge: Arc<B>) -> Namespace<B> {
    root_with(bridge, ResolverOptions::default())
}

pub fn root_with<B: SymbolBridge>(bridge: Arc<B>, options: ResolverOptions) -> Namespace<B> {
    let policy = options.separators.clone();
    Namespace::from_parts(bridge, Arc::new(options), Vector::new(), policy)
}

impl<B: SymbolBridge> Namespace<B> {
    fn from_parts(
        bridge: Arc<B>,
        options: Arc<ResolverOptions>,
        groups: Vector<PrefixGroup>,
        policy: SeparatorPolicy,
    ) -> Self {
        Self {
            node: Arc::new(Node {
                bridge,
                options,
                groups,
                policy,
                children: RwLock::new(HashMap::new()),
                internal: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub fn bridge(&self) -> &Arc<B> {
        &self.node.bridge
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.node.options
    }

    pub fn groups(&self) -> &Vector<PrefixGroup> {
        &self.node.groups
    }

    pub fn policy(&self) -> &SeparatorPolicy {
        &self.node.policy
    }

    pub fn is_root(&self) -> bool {
        self.node.groups.is_empty()
    }

    /// True when both handles point at the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    fn derive(&self, key: ChildKey, build: impl FnOnce() -> Vector<PrefixGroup>) -> Self {
        if let Some(child) = self
            .node
            .children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return child.clone();
        }
        let child = Self::from_parts(
            Arc::clone(&self.node.bridge),
            Arc::clone(&self.node.options),
            build(),
            self.node.policy.clone(),
        );
        self.node
            .children
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(child)
            .clone()
    }

    /// Attribute-style child: `label` is split on the boundary marker and each
    /// boundary run expands into the separator policy.
    pub fn child(&self, label: &str) -> Self {
        self.derive(ChildKey::Attr(label.to_string()), || {
            extend_with_label(
                &self.node.groups,
                label,
                &self.node.policy,
                self.node.options.boundary_marker,
            )
        })
    }

    /// Index-style child: `literal` is appended exactly as written.
    pub fn index(&self, literal: &str) -> Self {
        self.derive(ChildKey::Index(literal.to_string()), || {
            extend_with_literal(&self.node.groups, literal)
        })
    }

    /// Follows `labels` as successive attribute-style children.
    pub fn path<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> Self {
        labels
            .into_iter()
            .fold(self.clone(), |ns, label| ns.child(label))
    }

    /// Drops every cached child. Handles already given out stay usable.
    pub fn clear_cache(&self) {
        self.node
            .children
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn cached_children(&self) -> usize {
        self.node
            .children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Same path, different separators for children derived from now on.
    pub fn with_policy(&self, policy: SeparatorPolicy) -> Self {
        Self::from_parts(
            Arc::clone(&self.node.bridge),
            Arc::clone(&self.node.options),
            self.node.groups.clone(),
            policy,
        )
    }

    pub fn with_separators(&self, separators: &str) -> NsResult<Self, B> {
        SeparatorPolicy::new(separators)
            .map(|policy| self.with_policy(policy))
            .ok_or(NamespaceError::InvalidPolicy)
    }

    pub fn candidates(&self) -> Candidates<'_> {
        Candidates::new(&self.node.groups)
    }

    /// Candidates interned one at a time, in enumeration order.
    pub fn symbols(&self) -> impl Iterator<Item = NsResult<B::Symbol, B>> + '_ {
        self.candidates().map(|name| self.node.bridge.intern(&name))
    }

    /// The highest-priority spelling, whether bound or not.
    pub fn symbol(&self) -> NsResult<B::Symbol, B> {
        resolver::canonical(self.node.bridge.as_ref(), &self.node.groups)
    }

    pub fn function_symbol(&self, exists: bool) -> NsResult<B::Symbol, B> {
        resolver::resolve(
            self.node.bridge.as_ref(),
            &self.node.groups,
            BindingKind::Function,
            exists,
        )
    }

    pub fn value_symbol(&self, exists: bool) -> NsResult<B::Symbol, B> {
        resolver::resolve(
            self.node.bridge.as_ref(),
            &self.node.groups,
            BindingKind::Value,
            exists,
        )
    }

    pub fn function_binding(&self) -> NsResult<B::Value, B> {
        let symbol = self.function_symbol(true)?;
        Ok(self.node.bridge.get_function(&symbol)?)
    }

    pub fn value_binding(&self) -> NsResult<B::Value, B> {
        let symbol = self.value_symbol(true)?;
        Ok(self.node.bridge.get_value(&symbol)?)
    }

    fn keyword(&self, name: &str) -> NsResult<B::Value, B> {
        let bridge = self.node.bridge.as_ref();
        let symbol = bridge.intern(&format!("{}{}", bridge.keyword_marker(), name))?;
        Ok(bridge.symbol_value(&symbol))
    }

    /// Calls the function bound to this path. Each keyword argument becomes a
    /// keyword symbol (marker plus name, verbatim) followed by its value, after
    /// the positional arguments.
    pub fn invoke(&self, args: &[B::Value], kwargs: &[(&str, B::Value)]) -> NsResult<B::Value, B> {
        let function = self.function_binding()?;
        let mut argv = Vec::with_capacity(args.len() + kwargs.len() * 2);
        argv.extend_from_slice(args);
        for (name, value) in kwargs {
            argv.push(self.keyword(name)?);
            argv.push(value.clone());
        }
        trace!(argc = argv.len(), "invoking host function");
        Ok(self.node.bridge.invoke(&function, argv)?)
    }

    pub fn call(&self, args: &[B::Value]) -> NsResult<B::Value, B> {
        self.invoke(args, &[])
    }

    fn write_value(&self, value: B::Value) -> NsResult<(), B> {
        let symbol = self.value_symbol(false)?;
        Ok(self.node.bridge.set_value(&symbol, value)?)
    }

    /// Sets the variable named by `label` under this path. Unbound targets
    /// become bound under their canonical spelling; reserved labels are kept
    /// on this node instead.
    pub fn assign(&self, label: &str, value: B::Value) -> NsResult<(), B> {
        if is_reserved_label(label) {
            self.node
                .internal
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(label.to_string(), value);
            return Ok(());
        }
        self.child(label).write_value(value)
    }

    pub fn assign_index(&self, literal: &str, value: B::Value) -> NsResult<(), B> {
        self.index(literal).write_value(value)
    }

    /// Binds `function` as the function cell of the child `label`.
    pub fn define_function(&self, label: &str, function: B::Value) -> NsResult<B::Symbol, B> {
        let symbol = self.child(label).function_symbol(false)?;
        self.node.bridge.set_function(&symbol, function)?;
        Ok(symbol)
    }

    pub fn to_foreign(&self, how: Coerce) -> NsResult<B::Value, B> {
        match how {
            Coerce::Symbol => {
                let symbol = self.symbol()?;
                Ok(self.node.bridge.symbol_value(&symbol))
            }
            Coerce::Binding => self.value_binding(),
        }
    }

    pub fn internal(&self, label: &str) -> Option<B::Value> {
        self.node
            .internal
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(label)
            .cloned()
    }

    /// Attribute-style read. Reserved labels only ever yield stored node
    /// state (`None` when unset) and never become host paths.
    pub fn get_attr(&self, label: &str) -> Option<Attr<B>> {
        if is_reserved_label(label) {
            return self.internal(label).map(Attr::Value);
        }
        Some(Attr::Namespace(self.child(label)))
    }

    /// Assigning a namespace is a no-op: children are derived, never stored.
    pub fn set_attr(&self, label: &str, attr: Attr<B>) -> NsResult<(), B> {
        match attr {
            Attr::Namespace(_) => Ok(()),
            Attr::Value(value) => self.assign(label, value),
        }
    }
}
