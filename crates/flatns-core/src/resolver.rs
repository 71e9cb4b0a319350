use im::Vector;
use tracing::trace;

use crate::bridge::SymbolBridge;
use crate::candidates::Candidates;
use crate::error::{BindingKind, NamespaceError};
use crate::path::PrefixGroup;

enum Outcome<S> {
    Found(S),
    Missing { candidates: Vec<String> },
    Ambiguous { first: String, second: String },
}

fn is_bound<B: SymbolBridge>(bridge: &B, kind: BindingKind, symbol: &B::Symbol) -> bool {
    match kind {
        BindingKind::Function => bridge.is_function_bound(symbol),
        BindingKind::Value => bridge.is_value_bound(symbol),
    }
}

fn scan<B: SymbolBridge>(
    bridge: &B,
    groups: &Vector<PrefixGroup>,
    kind: BindingKind,
) -> Result<Outcome<B::Symbol>, NamespaceError<B::Value>> {
    let mut found: Option<(String, B::Symbol)> = None;
    let mut seen = Vec::new();
    for name in Candidates::new(groups) {
        let symbol = bridge.intern(&name)?;
        if is_bound(bridge, kind, &symbol) {
            if let Some((first, _)) = found {
                return Ok(Outcome::Ambiguous {
                    first,
                    second: name,
                });
            }
            found = Some((name.clone(), symbol));
        }
        seen.push(name);
    }
    Ok(match found {
        Some((_, symbol)) => Outcome::Found(symbol),
        None => Outcome::Missing { candidates: seen },
    })
}

/// Picks the one candidate of `groups` bound under `kind`.
///
/// Two bound candidates are always an error. With no bound candidate the
/// first spelling is returned unless `exists` is set.
pub fn resolve<B: SymbolBridge>(
    bridge: &B,
    groups: &Vector<PrefixGroup>,
    kind: BindingKind,
    exists: bool,
) -> Result<B::Symbol, NamespaceError<B::Value>> {
    match scan(bridge, groups, kind)? {
        Outcome::Found(symbol) => {
            trace!(%kind, ?symbol, "resolved binding");
            Ok(symbol)
        }
        Outcome::Ambiguous { first, second } => {
            trace!(%kind, %first, %second, "ambiguous binding");
            Err(NamespaceError::ambiguous(kind, first, second))
        }
        Outcome::Missing { candidates, .. } if exists => {
            trace!(%kind, count = candidates.len(), "no binding");
            Err(NamespaceError::unbound(kind, candidates))
        }
        Outcome::Missing { .. } => {
            let default = canonical(bridge, groups)?;
            trace!(%kind, ?default, "falling back to default symbol");
            Ok(default)
        }
    }
}

/// The first spelling of `groups`, interned, bound or not. Built directly
/// from each group's first alternative, so it never enumerates.
pub fn canonical<B: SymbolBridge>(
    bridge: &B,
    groups: &Vector<PrefixGroup>,
) -> Result<B::Symbol, NamespaceError<B::Value>> {
    debug_assert!(groups.iter().all(|group| !group.is_empty()));
    let name: String = groups
        .iter()
        .filter_map(|group| group.alternatives().first())
        .map(String::as_str)
        .collect();
    bridge.intern(&name)
}
