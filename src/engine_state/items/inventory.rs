//! # Inventory
//!
//! Fixed slot storage for item stacks. The first [`HOTBAR_SIZE`] slots form
//! the hotbar.

use super::catalog::{ItemCatalog, ItemDefinition};

/// Total number of slots.
pub const INVENTORY_SIZE: usize = 36;

/// Number of leading slots selectable from the hotbar.
pub const HOTBAR_SIZE: usize = 9;

/// Items placed in a fresh inventory, by item id.
pub const STARTING_ITEMS: [(&str, u32); 8] = [
    ("grass", 64),
    ("dirt", 64),
    ("stone", 64),
    ("wood", 64),
    ("leaves", 64),
    ("wooden_pickaxe", 1),
    ("iron_sword", 1),
    ("bread", 10),
];

/// A stack of one item type in a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStack {
    pub item: ItemDefinition,
    pub count: u32,
}

/// The operations the engine needs from an inventory.
pub trait InventoryStore {
    /// Adds up to `count` items, topping up matching stacks before using
    /// empty slots.
    ///
    /// # Returns
    /// How many items did not fit
    fn add_item(&mut self, item: &ItemDefinition, count: u32) -> u32;

    /// Removes up to `count` items from `slot`, clearing it when it empties.
    ///
    /// # Returns
    /// How many items were removed
    fn remove_item(&mut self, slot: usize, count: u32) -> u32;

    /// The stack in `slot`, or `None` if the slot is empty or out of range.
    fn slot(&self, slot: usize) -> Option<&ItemStack>;

    fn slots(&self) -> &[Option<ItemStack>];

    /// Total count of the item with `id` across all slots.
    fn count_of(&self, id: &str) -> u32 {
        self.slots()
            .iter()
            .flatten()
            .filter(|stack| stack.item.id == id)
            .map(|stack| stack.count)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    slots: Vec<Option<ItemStack>>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Inventory {
            slots: vec![None; INVENTORY_SIZE],
        }
    }

    /// Creates an inventory holding [`STARTING_ITEMS`].
    pub fn with_starting_items(catalog: &ItemCatalog) -> Self {
        let mut inventory = Self::new();
        for (id, count) in STARTING_ITEMS {
            match catalog.item(id) {
                Some(item) => {
                    inventory.add_item(item, count);
                }
                None => log::warn!("Starting item {id} is missing from the catalog"),
            }
        }
        inventory
    }

    pub fn hotbar(&self) -> &[Option<ItemStack>] {
        &self.slots[..HOTBAR_SIZE]
    }
}

impl InventoryStore for Inventory {
    fn add_item(&mut self, item: &ItemDefinition, count: u32) -> u32 {
        let mut remaining = count;
        let stack_size = item.stack_size.max(1);

        for stack in self.slots.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if stack.item.id == item.id && stack.count < stack_size {
                let moved = remaining.min(stack_size - stack.count);
                stack.count += moved;
                remaining -= moved;
            }
        }

        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let moved = remaining.min(stack_size);
                *slot = Some(ItemStack { item: *item, count: moved });
                remaining -= moved;
            }
        }

        remaining
    }

    fn remove_item(&mut self, slot: usize, count: u32) -> u32 {
        let Some(entry) = self.slots.get_mut(slot) else {
            return 0;
        };
        let Some(stack) = entry.as_mut() else {
            return 0;
        };

        let removed = count.min(stack.count);
        stack.count -= removed;
        if stack.count == 0 {
            *entry = None;
        }
        removed
    }

    fn slot(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }
}
