//! Transposition of two-level "parent → (child → value)" mappings.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

/// The same (parent, child) pair was given two different values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InversionConflict<P, C, V> {
    pub parent: P,
    pub child: C,
    pub existing: V,
    pub conflicting: V,
}

impl<P: fmt::Display, C: fmt::Display, V: fmt::Display> fmt::Display for InversionConflict<P, C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} maps {} to both {} and {}",
            self.parent, self.child, self.existing, self.conflicting
        )
    }
}

impl<P, C, V> std::error::Error for InversionConflict<P, C, V>
where
    P: fmt::Debug + fmt::Display,
    C: fmt::Debug + fmt::Display,
    V: fmt::Debug + fmt::Display,
{
}

/// Turn `parent → (child → value)` into `child → (parent → value)`.
///
/// A parent may appear more than once in the input; its entries are merged.
/// Distinct parents of one child always become distinct entries. Repeating a
/// (parent, child) pair with an equal value is accepted, with a different
/// value it is an [`InversionConflict`].
pub fn invert<P, C, V, I, J>(requirements: I) -> Result<BTreeMap<C, BTreeMap<P, V>>, InversionConflict<P, C, V>>
where
    P: Ord + Clone,
    C: Ord + Clone,
    V: PartialEq + Clone,
    I: IntoIterator<Item = (P, J)>,
    J: IntoIterator<Item = (C, V)>,
{
    let mut inverted: BTreeMap<C, BTreeMap<P, V>> = BTreeMap::new();
    for (parent, children) in requirements {
        for (child, value) in children {
            let by_parent = inverted.entry(child.clone()).or_default();
            match by_parent.entry(parent.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(slot) if *slot.get() == value => {}
                Entry::Occupied(slot) => {
                    return Err(InversionConflict {
                        parent,
                        child,
                        existing: slot.get().clone(),
                        conflicting: value,
                    });
                }
            }
        }
    }
    Ok(inverted)
}
