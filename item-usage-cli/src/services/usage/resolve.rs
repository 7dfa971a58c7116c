//! Usage resolver: the items nothing references

use super::models::{Item, ItemRef, UsageMap};

/// Items whose codename is not in `usage`, in the order of `items`
pub fn unused(items: &[Item], usage: &UsageMap) -> Vec<ItemRef> {
    items
        .iter()
        .filter(|item| !usage.contains(&item.codename))
        .map(Item::to_ref)
        .collect()
}
