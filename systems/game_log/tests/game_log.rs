use snake_arena_core::{Cell, Command, Direction, Event, ItemKind};
use snake_arena_system_game_log::{GameLog, HighScores, Severity};
use snake_arena_world::{self as world, query, scaffolding, World};

fn play(world: &mut World, command: Command, log: &mut GameLog, table: &mut HighScores) {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    log.handle(&events);
    table.handle(&events);
}

#[test]
fn finished_games_feed_log_and_high_scores() {
    let mut world = World::new();
    let mut log = GameLog::new();
    let mut table = HighScores::new();

    for (score_item, expected) in [(ItemKind::Grape, 30), (ItemKind::Bolt, 50)] {
        scaffolding::place_snake(
            &mut world,
            vec![Cell::new(1, 3), Cell::new(2, 3), Cell::new(3, 3)],
            Direction::Left,
        );
        scaffolding::clear_items(&mut world);
        let _ = scaffolding::place_item(&mut world, Cell::new(0, 3), score_item);

        play(&mut world, Command::Tick { input: None }, &mut log, &mut table);
        assert_eq!(query::score(&world), expected);
        play(&mut world, Command::Tick { input: None }, &mut log, &mut table);
        play(&mut world, Command::Reset, &mut log, &mut table);
    }

    assert_eq!(table.scores(), &[50, 30]);

    let newest = log.latest().expect("log entry");
    assert_eq!(newest.severity, Severity::Game);
    assert_eq!(newest.message, "new game started");

    let game_overs: Vec<_> = log
        .entries()
        .filter(|entry| entry.severity == Severity::Error)
        .collect();
    assert_eq!(game_overs.len(), 2);
    assert!(game_overs[0].message.contains("score 50"));
    assert_eq!(game_overs[0].tick, 2);

    let sequences: Vec<u64> = log.entries().map(|entry| entry.sequence).collect();
    assert!(sequences.windows(2).all(|pair| pair[0] > pair[1]));
}

#[test]
fn rejected_reversal_is_logged_as_warning() {
    let mut world = World::new();
    let mut log = GameLog::new();
    let mut table = HighScores::new();

    play(
        &mut world,
        Command::Tick {
            input: Some(Direction::Left),
        },
        &mut log,
        &mut table,
    );

    let entry = log
        .entries()
        .find(|entry| entry.severity == Severity::Warning)
        .expect("warning entry");
    assert_eq!(entry.tick, 1);
    assert_eq!(entry.message, "ignored reversal from Right to Left");
    assert!(table.scores().is_empty());
}

#[test]
fn log_never_exceeds_capacity() {
    let mut log = GameLog::new();
    for _ in 0..250 {
        log.handle(&[Event::PauseChanged { paused: true }]);
    }
    assert_eq!(log.len(), snake_arena_core::LOG_CAPACITY);
    assert_eq!(log.latest().map(|entry| entry.sequence), Some(249));
}
