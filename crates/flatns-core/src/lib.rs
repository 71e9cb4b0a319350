//! Hierarchical access to the flat symbol table of a Lisp-like host.
//!
//! Host identifiers such as `package-initialize` or `spacemacs//stuff` join
//! path segments with one of several interchangeable separators. A
//! [`Namespace`] node describes every spelling a path may take; binding
//! queries ask the host which spelling is actually bound.

pub mod bridge;
pub mod candidates;
pub mod error;
pub mod finder;
pub mod namespace;
pub mod options;
pub mod path;
pub mod policy;
pub mod resolver;
pub mod serialized;

pub use bridge::SymbolBridge;
pub use candidates::Candidates;
pub use error::{BindingKind, ExitKind, NamespaceError, NonLocalExit};
pub use finder::{require, ModuleFinder};
pub use namespace::{is_reserved_label, root, root_with, Attr, ChildKey, Coerce, Namespace, NsResult};
pub use options::ResolverOptions;
pub use path::{GroupKind, PrefixGroup};
pub use policy::{SeparatorPolicy, DEFAULT_SEPARATORS};
pub use serialized::SerializedBridge;
