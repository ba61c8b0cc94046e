//! Name-set matching between sibling collections.
//!
//! Two spec versions rarely disagree about every alias of a node at once,
//! so nodes are paired by alias overlap rather than by position or by a
//! single canonical name. A rename that keeps one alias (`["checkout"]` →
//! `["checkout", "co"]`) still pairs the nodes, which is what lets hand
//! enrichments survive renames.

use tracing::debug;

use crate::types::{ArgSpec, CommandSpec, OptionSpec, SpecKind};

/// Node types that participate in name-set matching.
pub trait NamedNode {
    /// All aliases of the node.
    fn names(&self) -> &[String];
    /// The node's kind.
    fn kind(&self) -> SpecKind;
}

impl NamedNode for CommandSpec {
    fn names(&self) -> &[String] {
        &self.names
    }

    fn kind(&self) -> SpecKind {
        SpecKind::Command
    }
}

impl NamedNode for OptionSpec {
    fn names(&self) -> &[String] {
        &self.names
    }

    fn kind(&self) -> SpecKind {
        SpecKind::Option
    }
}

impl NamedNode for ArgSpec {
    fn names(&self) -> &[String] {
        &self.names
    }

    fn kind(&self) -> SpecKind {
        SpecKind::Arg
    }
}

/// Counts the aliases two name sets share.
///
/// # Examples
///
/// ```
/// use spec_merge_core::name_overlap;
///
/// let old = vec!["checkout".to_string()];
/// let new = vec!["checkout".to_string(), "co".to_string()];
/// assert_eq!(name_overlap(&old, &new), 1);
/// assert_eq!(name_overlap(&old, &["clone".to_string()]), 0);
/// ```
pub fn name_overlap(a: &[String], b: &[String]) -> usize {
    a.iter().filter(|name| b.contains(name)).count()
}

/// Result of claiming a counterpart for one incoming node.
#[derive(Debug)]
pub struct Claim<'a, N> {
    /// The claimed old node, if any alias overlapped.
    pub node: Option<&'a N>,
    /// Every overlapping candidate when more than one competed.
    pub contenders: Vec<&'a N>,
}

/// Claim pool over one old sibling list.
///
/// Incoming nodes claim old counterparts one at a time, in incoming
/// order. A claimed old node leaves the pool, so two incoming nodes can
/// never both inherit from the same old node.
///
/// # Examples
///
/// ```
/// use spec_merge_core::{CommandSpec, SiblingMatcher};
///
/// let old = vec![CommandSpec::new("checkout"), CommandSpec::new("clone")];
/// let mut matcher = SiblingMatcher::new(&old);
///
/// let renamed = CommandSpec::new("checkout").with_alias("co");
/// let claim = matcher.claim(&renamed);
/// assert_eq!(claim.node.unwrap().primary_name(), "checkout");
///
/// // Claimed nodes never match again.
/// let claim = matcher.claim(&CommandSpec::new("checkout"));
/// assert!(claim.node.is_none());
/// ```
#[derive(Debug)]
pub struct SiblingMatcher<'a, N> {
    pool: &'a [N],
    claimed: Vec<bool>,
}

impl<'a, N: NamedNode> SiblingMatcher<'a, N> {
    /// Creates a claim pool over the given old siblings.
    pub fn new(pool: &'a [N]) -> Self {
        Self {
            pool,
            claimed: vec![false; pool.len()],
        }
    }

    /// Claims the best-overlapping unclaimed old node for `incoming`.
    ///
    /// The greatest alias-overlap count wins; equal counts keep the
    /// earliest old sibling, so repeated runs over the same inputs pick
    /// the same node. When several candidates overlapped, they are all
    /// reported in [`Claim::contenders`].
    pub fn claim(&mut self, incoming: &N) -> Claim<'a, N> {
        let mut best: Option<(usize, usize)> = None;
        let mut contenders = Vec::new();

        for (idx, old) in self.pool.iter().enumerate() {
            if self.claimed[idx] {
                continue;
            }
            let overlap = name_overlap(old.names(), incoming.names());
            if overlap == 0 {
                continue;
            }
            contenders.push(old);
            match best {
                Some((_, best_overlap)) if overlap <= best_overlap => {}
                _ => best = Some((idx, overlap)),
            }
        }

        let Some((idx, overlap)) = best else {
            return Claim {
                node: None,
                contenders: Vec::new(),
            };
        };

        self.claimed[idx] = true;
        if contenders.len() > 1 {
            debug!(
                incoming = ?incoming.names(),
                candidates = contenders.len(),
                overlap,
                "ambiguous name-set match"
            );
        } else {
            contenders.clear();
        }

        Claim {
            node: Some(&self.pool[idx]),
            contenders,
        }
    }

    /// Old nodes never claimed during the pass, in pool order.
    pub fn unclaimed(&self) -> Vec<&'a N> {
        self.pool
            .iter()
            .enumerate()
            .filter(|(idx, _)| !self.claimed[*idx])
            .map(|(_, node)| node)
            .collect()
    }
}
