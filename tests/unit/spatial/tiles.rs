//! Tests for tile handles and the pooled tile factory

#[cfg(test)]
mod tests {
    use blastgrid::spatial::tiles::{PooledTileFactory, Tile, TileColor, TileFactory, TileId};
    use std::collections::HashSet;

    // Tests color labels round trip through parsing
    // Verified by offsetting the label base letter
    #[test]
    fn test_color_labels() {
        assert_eq!(TileColor(0).label(), 'A');
        assert_eq!(TileColor(5).label(), 'F');
        assert_eq!(TileColor::from_label('C'), Some(TileColor(2)));
        assert_eq!(TileColor::from_label('.'), None);
        assert_eq!(TileColor::from_label('a'), None);
    }

    // Tests spawned colors stay within the configured color count
    // Verified by widening the random color range
    #[test]
    fn test_created_colors_in_range() {
        let mut factory = PooledTileFactory::new(7, 3);
        for column in 0..200 {
            let tile = factory.create_tile(column % 5, 0);
            assert!(tile.color.index() < 3);
        }
        assert_eq!(factory.live_count(), 200);
    }

    // Tests live tiles always carry distinct identities
    // Verified by reusing ids without consulting the free list
    #[test]
    fn test_live_ids_are_unique() {
        let mut factory = PooledTileFactory::new(3, 4);
        let tiles: Vec<Tile> = (0..50).map(|i| factory.create_tile(i % 4, i)).collect();
        let ids: HashSet<TileId> = tiles.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), tiles.len());
    }

    // Tests released handles are recycled for tiles of the same color
    // Verified by pushing released ids onto the wrong free list
    #[test]
    fn test_release_recycles_by_color() {
        let mut factory = PooledTileFactory::new(11, 2);
        let red = factory.create_colored(TileColor(0));
        let blue = factory.create_colored(TileColor(1));

        factory.release_tile(red);
        assert_eq!(factory.pooled_for(TileColor(0)), 1);
        assert_eq!(factory.pooled_for(TileColor(1)), 0);
        assert_eq!(factory.live_count(), 1);

        let reused = factory.create_colored(TileColor(0));
        assert_eq!(reused.id, red.id);
        assert_ne!(reused.id, blue.id);
        assert_eq!(factory.pooled_count(), 0);
    }

    // Tests a second release of the same handle is ignored and counted
    // Verified by removing the duplicate check
    #[test]
    fn test_duplicate_release_ignored() {
        let mut factory = PooledTileFactory::new(5, 1);
        let tile = factory.create_colored(TileColor(0));

        factory.release_tile(tile);
        factory.release_tile(tile);

        assert_eq!(factory.pooled_count(), 1);
        assert_eq!(factory.duplicate_releases(), 1);
        assert_eq!(factory.live_count(), 0);
    }

    // Tests the factory clamps a zero color count to one color
    // Verified by allowing an empty color range
    #[test]
    fn test_zero_colors_clamped() {
        let mut factory = PooledTileFactory::new(0, 0);
        assert_eq!(factory.color_count(), 1);
        assert_eq!(factory.create_tile(0, 0).color, TileColor(0));
    }

    // Tests identical seeds produce identical color sequences
    // Verified by seeding from entropy
    #[test]
    fn test_seeded_colors_reproducible() {
        let mut first = PooledTileFactory::new(99, 6);
        let mut second = PooledTileFactory::new(99, 6);

        let a: Vec<TileColor> = (0..32).map(|i| first.create_tile(i, 0).color).collect();
        let b: Vec<TileColor> = (0..32).map(|i| second.create_tile(i, 0).color).collect();
        assert_eq!(a, b);
    }
}
