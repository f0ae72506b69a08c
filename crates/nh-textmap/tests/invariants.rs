//! Properties that hold for any sequence of observations

use nh_textmap::glyph::*;
use nh_textmap::{
    DungeonMap, FeatureKind, Grid, LevelKey, MapConfig, Observation, PlayerStatus, Position,
    region,
};
use proptest::prelude::*;

const W: usize = 8;
const H: usize = 5;
const KEY: LevelKey = LevelKey::new(0, 1);

const PALETTE: [Glyph; 12] = [
    cmap(S_STONE),
    cmap(S_ROOM),
    cmap(S_ROOM),
    cmap(S_CORR),
    cmap(S_VWALL),
    cmap(S_VCDOOR),
    cmap(S_VODOOR),
    cmap(S_FOUNTAIN),
    cmap(S_DNSTAIR),
    cmap(S_UPSTAIR),
    monster(12),
    object(BOULDER),
];

fn frame() -> impl Strategy<Value = (Grid<Glyph>, Position)> {
    (
        prop::collection::vec(prop::sample::select(PALETTE.to_vec()), W * H),
        0..W,
        0..H,
    )
        .prop_map(|(cells, x, y)| {
            let rows = cells.chunks(W).map(<[Glyph]>::to_vec).collect();
            (Grid::from_rows(rows).unwrap(), Position::new(x, y))
        })
}

fn config() -> MapConfig {
    MapConfig {
        width: W,
        height: H,
        ..MapConfig::default()
    }
}

fn status(player: Position, time: u64) -> PlayerStatus {
    PlayerStatus {
        position: player,
        dungeon_number: 0,
        level_number: 1,
        depth: 1,
        time,
    }
}

proptest! {
    #[test]
    fn walkable_tiles_were_seen(frames in prop::collection::vec(frame(), 1..6)) {
        let mut map = DungeonMap::new(NetHackGlyphs, config());
        for (turn, (glyphs, player)) in frames.iter().enumerate() {
            map.update(&Observation {
                glyphs,
                status: status(*player, turn as u64),
                message: "",
                entities: &[],
            }).unwrap();

            let level = map.level(KEY).unwrap();
            prop_assert_eq!(level.walkable().and_not(level.seen()).count(), 0);
            prop_assert!(level.visited()[*player]);
        }
    }

    #[test]
    fn labels_cover_walkable_tiles_only(frames in prop::collection::vec(frame(), 1..6)) {
        let mut map = DungeonMap::new(NetHackGlyphs, config());
        for (turn, (glyphs, player)) in frames.iter().enumerate() {
            map.update(&Observation {
                glyphs,
                status: status(*player, turn as u64),
                message: "",
                entities: &[],
            }).unwrap();
        }

        let level = map.level(KEY).unwrap();
        let regions = region::classify(level, map.classifier());
        let max = regions.num_rooms() + regions.num_corridors();
        for (pos, &label) in regions.labels().iter() {
            if label == 0 {
                continue;
            }
            prop_assert!(level.walkable()[pos], "label {} on blocked tile {}", label, pos);
            prop_assert!(label <= max);
            prop_assert!(regions.is_room(label) != regions.is_corridor(label));
        }
        prop_assert_eq!(regions.rooms_mask().overlap(&regions.corridor_mask()), 0);
    }

    #[test]
    fn stairs_are_never_forgotten(frames in prop::collection::vec(frame(), 1..6)) {
        let mut map = DungeonMap::new(NetHackGlyphs, config());
        let mut seen_down = Vec::new();
        let mut seen_up = Vec::new();

        for (turn, (glyphs, player)) in frames.iter().enumerate() {
            map.update(&Observation {
                glyphs,
                status: status(*player, turn as u64),
                message: "",
                entities: &[],
            }).unwrap();

            for (pos, &g) in glyphs.iter() {
                if g == cmap(S_DNSTAIR) {
                    seen_down.push(pos);
                } else if g == cmap(S_UPSTAIR) {
                    seen_up.push(pos);
                }
            }

            let memory = map.terrain().memory(KEY).unwrap();
            for &pos in &seen_down {
                prop_assert!(memory.contains(FeatureKind::StairsDown, pos));
            }
            for &pos in &seen_up {
                prop_assert!(memory.contains(FeatureKind::StairsUp, pos));
            }

            // Everything else reflects the latest view only
            let fountains: Vec<_> = glyphs
                .iter()
                .filter(|&(_, &g)| g == cmap(S_FOUNTAIN))
                .map(|(pos, _)| pos)
                .collect();
            prop_assert_eq!(memory.positions(FeatureKind::Fountain).collect::<Vec<_>>(), fountains);
        }
    }

    #[test]
    fn description_has_one_current_room_at_most(frames in prop::collection::vec(frame(), 1..4)) {
        let mut map = DungeonMap::new(NetHackGlyphs, config());
        for (turn, (glyphs, player)) in frames.iter().enumerate() {
            let text = map.update(&Observation {
                glyphs,
                status: status(*player, turn as u64),
                message: "",
                entities: &[],
            }).unwrap();
            prop_assert!(text.matches("<- You are here.").count() <= 1);
        }
    }
}
