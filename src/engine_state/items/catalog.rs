//! # Item Catalog
//!
//! The built-in item definitions live in a compile-time `phf` table. An
//! [`ItemCatalog`] is built from it once at startup and handed to whoever
//! needs lookups, usually behind an `Rc`.

use phf::phf_map;

use crate::engine_state::voxels::block::block_type::BlockType;

/// Broad category of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Block,
    Tool,
    Weapon,
    Armor,
    Food,
}

/// Immutable description of one kind of item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ItemKind,
    /// The block placed by this item, if any
    pub block_type: Option<BlockType>,
    pub stack_size: u32,
    pub durability: Option<u32>,
    pub damage: Option<u32>,
    pub protection: Option<u32>,
}

impl ItemDefinition {
    const fn block(id: &'static str, name: &'static str, block_type: BlockType) -> Self {
        ItemDefinition {
            id,
            name,
            kind: ItemKind::Block,
            block_type: Some(block_type),
            stack_size: 64,
            durability: None,
            damage: None,
            protection: None,
        }
    }

    const fn equipment(
        id: &'static str,
        name: &'static str,
        kind: ItemKind,
        durability: u32,
        damage: Option<u32>,
        protection: Option<u32>,
    ) -> Self {
        ItemDefinition {
            id,
            name,
            kind,
            block_type: None,
            stack_size: 1,
            durability: Some(durability),
            damage,
            protection,
        }
    }

    const fn food(id: &'static str, name: &'static str) -> Self {
        ItemDefinition {
            id,
            name,
            kind: ItemKind::Food,
            block_type: None,
            stack_size: 64,
            durability: None,
            damage: None,
            protection: None,
        }
    }
}

static BUILTIN_ITEMS: phf::Map<&'static str, ItemDefinition> = phf_map! {
    "grass" => ItemDefinition::block("grass", "Grass Block", BlockType::GRASS),
    "dirt" => ItemDefinition::block("dirt", "Dirt", BlockType::DIRT),
    "stone" => ItemDefinition::block("stone", "Stone", BlockType::STONE),
    "wood" => ItemDefinition::block("wood", "Wood Planks", BlockType::WOOD),
    "leaves" => ItemDefinition::block("leaves", "Leaves", BlockType::LEAVES),
    "wooden_pickaxe" => ItemDefinition::equipment(
        "wooden_pickaxe", "Wooden Pickaxe", ItemKind::Tool, 59, Some(2), None
    ),
    "stone_pickaxe" => ItemDefinition::equipment(
        "stone_pickaxe", "Stone Pickaxe", ItemKind::Tool, 131, Some(3), None
    ),
    "iron_sword" => ItemDefinition::equipment(
        "iron_sword", "Iron Sword", ItemKind::Weapon, 250, Some(6), None
    ),
    "leather_helmet" => ItemDefinition::equipment(
        "leather_helmet", "Leather Helmet", ItemKind::Armor, 55, None, Some(1)
    ),
    "bread" => ItemDefinition::food("bread", "Bread"),
    "apple" => ItemDefinition::food("apple", "Apple"),
};

/// Read-only registry of item definitions.
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    /// Sorted by id
    items: Vec<ItemDefinition>,
}

impl ItemCatalog {
    /// Builds the catalog of built-in items.
    pub fn builtin() -> Self {
        Self::from_items(BUILTIN_ITEMS.values().copied().collect())
    }

    pub fn from_items(mut items: Vec<ItemDefinition>) -> Self {
        items.sort_by_key(|item| item.id);
        items.dedup_by_key(|item| item.id);
        ItemCatalog { items }
    }

    pub fn item(&self, id: &str) -> Option<&ItemDefinition> {
        self.items
            .binary_search_by(|item| item.id.cmp(id))
            .ok()
            .map(|index| &self.items[index])
    }

    /// Finds the item that places `block_type`.
    pub fn block_item(&self, block_type: BlockType) -> Option<&ItemDefinition> {
        self.items
            .iter()
            .find(|item| item.block_type == Some(block_type))
    }

    pub fn items(&self) -> &[ItemDefinition] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn builtin_catalog_is_sorted_and_complete() {
        let catalog = ItemCatalog::builtin();
        assert_eq!(catalog.items().len(), 11);
        assert!(catalog.items().windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test_case(BlockType::GRASS, "grass")]
    #[test_case(BlockType::DIRT, "dirt")]
    #[test_case(BlockType::STONE, "stone")]
    #[test_case(BlockType::WOOD, "wood")]
    #[test_case(BlockType::LEAVES, "leaves")]
    fn every_solid_block_has_an_item(block_type: BlockType, id: &str) {
        let catalog = ItemCatalog::builtin();
        assert_eq!(catalog.block_item(block_type).map(|item| item.id), Some(id));
    }

    #[test]
    fn air_has_no_item() {
        assert!(ItemCatalog::builtin().block_item(BlockType::AIR).is_none());
    }

    #[test]
    fn equipment_stats() {
        let catalog = ItemCatalog::builtin();
        let sword = catalog.item("iron_sword").unwrap();
        assert_eq!(sword.kind, ItemKind::Weapon);
        assert_eq!(sword.stack_size, 1);
        assert_eq!(sword.durability, Some(250));
        assert_eq!(sword.damage, Some(6));

        let helmet = catalog.item("leather_helmet").unwrap();
        assert_eq!(helmet.protection, Some(1));
        assert!(catalog.item("diamond").is_none());
    }
}
