//! Specialized collection types

use slotmap::new_key_type;
pub use slotmap::SlotMap;

new_key_type! {
    /// Stable handle to a node slot inside a [`HandleMap`]
    pub struct NodeKey;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<NodeKey, T>;
