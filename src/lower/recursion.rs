//! Illegal-recursion detection.
//!
//! A type is finite when some value of it can be written down: scalars, lists,
//! maps and links always are (an empty container or a bare link ends the
//! recursion), a struct is when all of its required fields are, and a union is
//! when any member is. Everything else sits on or behind a cycle of required
//! references and can never be constructed.
use std::collections::HashSet;

use crate::ir::{PRELUDE, Type, TypeRef, TypeSystem};

use super::{Diagnostics, Pass, SemanticError, SemanticErrorKind};

pub(super) fn check(ts: &TypeSystem, diags: &mut Diagnostics) {
    let finite = finite_types(ts);
    for (name, _) in ts.declared() {
        if finite.contains(name) {
            continue;
        }
        // Types that only depend on a cycle are left to the cycle's members.
        if let Some(cycle) = find_cycle(ts, name, &finite) {
            diags.push(
                Pass::Recursion,
                SemanticError::new(
                    name,
                    SemanticErrorKind::IllegalRecursion,
                    format!("recursive cycle {} has no finite value", cycle.join(" -> ")),
                ),
            );
        }
    }
}

/// Least fixpoint of the finiteness rules.
pub fn finite_types(ts: &TypeSystem) -> HashSet<&str> {
    let mut finite: HashSet<&str> = PRELUDE.iter().copied().collect();
    loop {
        let mut changed = false;
        for (name, ty) in ts.declared() {
            if finite.contains(name) {
                continue;
            }
            let ok = |n: &str| finite.contains(n) || !ts.contains(n);
            let is_finite = match ty {
                Type::Struct { .. } => required_refs(ty).all(ok),
                Type::Union { members, .. } => members.is_empty() || members.iter().any(|m| ok(&m.ty)),
                _ => true,
            };
            if is_finite {
                finite.insert(name);
                changed = true;
            }
        }
        if !changed {
            return finite;
        }
    }
}

/// Names that must be constructed to build a value of `ty`.
fn required_refs(ty: &Type) -> Box<dyn Iterator<Item = &str> + '_> {
    match ty {
        Type::Struct { fields, .. } => Box::new(
            fields
                .iter()
                .filter(|f| !f.optional && !f.nullable)
                .filter_map(|f| match &f.ty {
                    TypeRef::Named(n) => Some(n.as_str()),
                    _ => None,
                }),
        ),
        Type::Union { members, .. } => Box::new(members.iter().map(|m| m.ty.as_str())),
        _ => Box::new(std::iter::empty()),
    }
}

/// A path of required references from `start` back to itself.
fn find_cycle(ts: &TypeSystem, start: &str, finite: &HashSet<&str>) -> Option<Vec<String>> {
    fn walk<'a>(
        ts: &'a TypeSystem,
        at: &'a str,
        start: &str,
        finite: &HashSet<&str>,
        seen: &mut HashSet<&'a str>,
        path: &mut Vec<&'a str>,
    ) -> bool {
        let Some(ty) = ts.get(at) else { return false };
        path.push(at);
        for next in required_refs(ty) {
            if finite.contains(next) {
                continue;
            }
            if next == start {
                path.push(next);
                return true;
            }
            if seen.insert(next) && walk(ts, next, start, finite, seen, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    let mut seen = HashSet::new();
    walk(ts, ts.names().into_iter().find(|n| *n == start)?, start, finite, &mut seen, &mut path)
        .then(|| path.into_iter().map(str::to_string).collect())
}
