mod common;

use common::{PLAYER, config_for, sketch};
use nh_textmap::glyph::*;
use nh_textmap::{
    DungeonMap, Entity, LevelKey, MapError, NetHackGlyphs, Observation, PlayerStatus, Position,
    ShopKind,
};

fn status(player: Position, time: u64) -> PlayerStatus {
    PlayerStatus {
        position: player,
        dungeon_number: 0,
        level_number: 1,
        depth: 1,
        time,
    }
}

const KEY: LevelKey = LevelKey::new(0, 1);

#[test]
fn test_single_tile_under_player() {
    let mut s = sketch(&["          ", "          ", "          "]);
    s.player = Position::new(4, 1);
    s.glyphs[s.player] = cmap(S_ROOM);

    let mut map = DungeonMap::new(NetHackGlyphs, config_for(&s));
    let text = map
        .update(&Observation {
            glyphs: &s.glyphs,
            status: status(s.player, 1),
            message: "",
            entities: &[],
        })
        .unwrap()
        .to_string();

    assert_eq!(text, "Explored room <- You are here.");
}

#[test]
fn test_empty_view_gives_empty_description() {
    let s = sketch(&["     ", "     "]);
    let mut map = DungeonMap::new(NetHackGlyphs, config_for(&s));
    let text = map
        .update(&Observation {
            glyphs: &s.glyphs,
            status: status(Position::new(0, 0), 1),
            message: "",
            entities: &[],
        })
        .unwrap();
    assert_eq!(text, "");
}

#[test]
fn test_closed_door_is_a_blocked_exit() {
    let s = sketch(&[
        "|----|",
        "|....|",
        "|.@..+###",
        "|....|",
        "|----|",
    ]);
    let mut map = DungeonMap::new(NetHackGlyphs, config_for(&s));
    let text = map
        .update(&Observation {
            glyphs: &s.glyphs,
            status: status(s.player, 1),
            message: "",
            entities: &[],
        })
        .unwrap();
    assert_eq!(text, "Explored room with 1 exit (1 closed doors) <- You are here.");
}

#[test]
fn test_open_door_is_a_free_exit() {
    let s = sketch(&[
        "|----|",
        "|....|",
        "|.@..o###",
        "|....|",
        "|----|",
    ]);
    let mut map = DungeonMap::new(NetHackGlyphs, config_for(&s));
    let text = map
        .update(&Observation {
            glyphs: &s.glyphs,
            status: status(s.player, 1),
            message: "",
            entities: &[],
        })
        .unwrap();
    assert_eq!(text, "Explored room with 1 exit <- You are here.");
}

#[test]
fn test_bars_are_blocked_exits() {
    let s = sketch(&[
        "|----|",
        "|.@..=",
        "|....|",
        "|----|",
    ]);
    let mut map = DungeonMap::new(NetHackGlyphs, config_for(&s));
    let text = map
        .update(&Observation {
            glyphs: &s.glyphs,
            status: status(s.player, 1),
            message: "",
            entities: &[],
        })
        .unwrap();
    assert_eq!(text, "Explored room with 1 exit (1 iron bars) <- You are here.");
}

#[test]
fn test_two_rooms_joined_by_corridor() {
    let s = sketch(&[
        "|---|",
        "|...|       ....",
        "|.@.o#######....",
        "|...|       ....",
        "|---|",
    ]);
    let mut map = DungeonMap::new(NetHackGlyphs, config_for(&s));
    let text = map
        .update(&Observation {
            glyphs: &s.glyphs,
            status: status(s.player, 1),
            message: "",
            entities: &[],
        })
        .unwrap();
    assert_eq!(
        text,
        "Explored room with 1 exit <- You are here.\nUnexplored room with 1 exit to the east."
    );
}

#[test]
fn test_partially_explored_room() {
    // The room continues into the dark past its open east side
    let s = sketch(&[
        "|---- ",
        "|.@.. ",
        "|.... ",
        "|---- ",
    ]);
    let mut map = DungeonMap::new(NetHackGlyphs, config_for(&s));
    let text = map
        .update(&Observation {
            glyphs: &s.glyphs,
            status: status(s.player, 1),
            message: "",
            entities: &[],
        })
        .unwrap();
    assert_eq!(text, "Partially explored room <- You are here.");
}

#[test]
fn test_features_listed_in_room() {
    let s = sketch(&[
        "|------|",
        "|.{..>.|",
        "|.@..{.|",
        "|^.....|",
        "|------|",
    ]);
    let mut map = DungeonMap::new(NetHackGlyphs, config_for(&s));
    let text = map
        .update(&Observation {
            glyphs: &s.glyphs,
            status: status(s.player, 1),
            message: "",
            entities: &[],
        })
        .unwrap();
    assert_eq!(
        text,
        "Explored room: <- You are here.\n    Objects: stairs down, 2 fountains, a trap."
    );
}

#[test]
fn test_stairs_remembered_under_monster() {
    let first = sketch(&[
        "|-----|",
        "|.@.>.|",
        "|-----|",
    ]);
    let covered = sketch(&[
        "|-----|",
        "|.@.:.|",
        "|-----|",
    ]);
    let mut map = DungeonMap::new(NetHackGlyphs, config_for(&first));
    for (turn, s) in [(1, &first), (2, &covered)] {
        map.update(&Observation {
            glyphs: &s.glyphs,
            status: status(s.player, turn),
            message: "",
            entities: &[],
        })
        .unwrap();
    }
    assert_eq!(
        map.description(),
        "Explored room: <- You are here.\n    Objects: stairs down."
    );
}

#[test]
fn test_shop_greetings_append_records() {
    let s = sketch(&[
        "|-----|",
        "|.S...|",
        "|.@...|",
        "|-----|",
    ]);
    let shopkeeper = Position::new(2, 1);
    let entities = [Entity::new(shopkeeper, "shopkeeper")];
    let mut map = DungeonMap::new(NetHackGlyphs, config_for(&s));

    for (turn, message) in [(1, "Welcome to General Store!"), (2, "Welcome again to General Store!")] {
        map.update(&Observation {
            glyphs: &s.glyphs,
            status: status(s.player, turn),
            message,
            entities: &entities,
        })
        .unwrap();
    }

    let records = map.shops().records(KEY);
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.kind == ShopKind::General));
    assert!(records.iter().all(|r| r.shopkeeper_position == shopkeeper));
    assert_eq!(map.description(), "Explored general store <- You are here.");
}

#[test]
fn test_greeting_without_shopkeeper_fails() {
    let s = sketch(&["|...|", "|.@.|"]);
    let mut map = DungeonMap::new(NetHackGlyphs, config_for(&s));
    let err = map
        .update(&Observation {
            glyphs: &s.glyphs,
            status: status(s.player, 1),
            message: "Welcome to Izchak's lighting store!",
            entities: &[Entity::new(Position::new(1, 0), "newt")],
        })
        .unwrap_err();
    assert!(matches!(err, MapError::MissingShopkeeper { .. }));
}

#[test]
fn test_closed_door_occupied_by_monster() {
    let closed = sketch(&[
        "|---|",
        "|.@.+#",
        "|---|",
    ]);
    let occupied = sketch(&[
        "|---|",
        "|.@.:#",
        "|---|",
    ]);
    let door = Position::new(4, 1);
    let mut map = DungeonMap::new(NetHackGlyphs, config_for(&closed));
    for (turn, s) in [(1, &closed), (2, &occupied)] {
        map.update(&Observation {
            glyphs: &s.glyphs,
            status: status(s.player, turn),
            message: "",
            entities: &[],
        })
        .unwrap();
    }

    let level = map.level(KEY).unwrap();
    assert!(level.doors()[door]);
    assert!(level.walkable()[door]);
    assert_eq!(level.objects()[door], Some(cmap(S_VODOOR)));
    assert_eq!(map.description(), "Explored room with 1 exit <- You are here.");
}

#[test]
fn test_swallowed_turn_keeps_memory() {
    let s = sketch(&["|---|", "|.@.|", "|---|"]);
    let mut map = DungeonMap::new(NetHackGlyphs, config_for(&s));
    map.update(&Observation {
        glyphs: &s.glyphs,
        status: status(s.player, 1),
        message: "",
        entities: &[],
    })
    .unwrap();

    let mut engulfed = s.glyphs.clone();
    for (i, pos) in s.glyphs.positions().enumerate() {
        engulfed[pos] = swallow(50, (i % 8) as Glyph);
    }
    engulfed[s.player] = PLAYER;
    map.update(&Observation {
        glyphs: &engulfed,
        status: status(s.player, 2),
        message: "",
        entities: &[],
    })
    .unwrap();

    assert_eq!(map.level(KEY).unwrap().last_turn(), Some(1));
    assert_eq!(map.description(), "Explored room <- You are here.");
}

#[test]
fn test_levels_are_remembered_separately() {
    let upstairs = sketch(&["|---|", "|.@.|", "|---|"]);
    let downstairs = sketch(&["     ", " #@# ", "     "]);
    let mut map = DungeonMap::new(NetHackGlyphs, config_for(&upstairs));

    map.update(&Observation {
        glyphs: &upstairs.glyphs,
        status: status(upstairs.player, 1),
        message: "",
        entities: &[],
    })
    .unwrap();
    map.update(&Observation {
        glyphs: &downstairs.glyphs,
        status: PlayerStatus {
            level_number: 2,
            depth: 2,
            ..status(downstairs.player, 2)
        },
        message: "",
        entities: &[],
    })
    .unwrap();

    // Only a corridor down here
    assert_eq!(map.description(), "");
    assert_eq!(map.num_levels(), 2);
    assert!(map.level(KEY).unwrap().walkable()[upstairs.player]);
    assert!(!map.level(LevelKey::new(0, 2)).unwrap().walkable()[Position::new(1, 0)]);
}

#[test]
fn test_forced_recall_keeps_features() {
    let s = sketch(&["|-----|", "|.@.{.|", "|-----|"]);
    let mut map = DungeonMap::new(NetHackGlyphs, config_for(&s));
    let st = status(s.player, 60);
    assert!(map.recall_due(&st));

    map.recall(&s.glyphs, &st).unwrap();
    assert!(!map.recall_due(&st));
    assert_eq!(map.terrain().last_recall(KEY), 60);

    map.update(&Observation {
        glyphs: &s.glyphs,
        status: st,
        message: "",
        entities: &[],
    })
    .unwrap();
    assert_eq!(
        map.description(),
        "Explored room: <- You are here.\n    Objects: a fountain."
    );
}
