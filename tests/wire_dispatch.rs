//! The query loop driven over an in-memory stream, as a psql client would see it.

mod common;

use std::time::Duration;

use common::{notices, query, read_frame, read_turn, sync, tagged, tags, terminate};
use pgquest::game::{Item, RuneStoneBag, World};
use pgquest::pgwire::{FrameReader, FrameWriter, WireError};
use pgquest::server::{run_session, DispatchSettings, GameSession, SessionEnd};
use pgquest::worlds::forest::{build_forest, SAP_TREE_CLEARING, STARTING_ROOM};
use tokio::io::{AsyncWriteExt, DuplexStream};
use tokio::task::JoinHandle;

type Served = JoinHandle<(Result<SessionEnd, WireError>, GameSession)>;

fn spawn_session(world: World, settings: DispatchSettings) -> (DuplexStream, Served) {
    let (client, server) = tokio::io::duplex(64 * 1024);
    let handle = tokio::spawn(async move {
        let (r, w) = tokio::io::split(server);
        let mut reader = FrameReader::new(r);
        let mut writer = FrameWriter::new(w);
        let mut session = GameSession::new(world);
        let end = run_session(&mut reader, &mut writer, &mut session, &settings, "test").await;
        (end, session)
    });
    (client, handle)
}

fn quiet() -> DispatchSettings {
    DispatchSettings {
        banner_on_connect: false,
        ..DispatchSettings::default()
    }
}

#[tokio::test]
async fn banner_is_sent_before_first_query() {
    let (mut client, handle) = spawn_session(build_forest().unwrap(), DispatchSettings::default());

    let frames = read_turn(&mut client).await;
    assert_eq!(frames.last().unwrap().tag, b'Z');
    let lines = notices(&frames);
    assert!(lines
        .iter()
        .any(|l| l.contains("Welcome to your very own Text-Based Adventure!")));
    assert!(lines.iter().any(|l| l.contains("\"look\"")));

    client.write_all(&terminate()).await.unwrap();
    let (end, _) = handle.await.unwrap();
    assert_eq!(end.unwrap(), SessionEnd::Terminated);
}

#[tokio::test]
async fn look_narrates_as_notices() {
    let (mut client, handle) = spawn_session(build_forest().unwrap(), quiet());

    client.write_all(&query("look;\n")).await.unwrap();
    let frames = read_turn(&mut client).await;
    assert!(frames[..frames.len() - 1].iter().all(|f| f.tag == b'N'));
    assert_eq!(frames.last().unwrap().tag, b'Z');
    let lines = notices(&frames);
    assert!(lines[0].starts_with("You are in a small room"));

    // Notices carry only the message field.
    let fields = frames[0].fields();
    assert_eq!(fields.len(), 1);

    drop(client);
    let (end, _) = handle.await.unwrap();
    assert_eq!(end.unwrap(), SessionEnd::Disconnected);
}

#[tokio::test]
async fn version_probe_returns_one_row() {
    let (mut client, _handle) = spawn_session(build_forest().unwrap(), quiet());

    client.write_all(&query("SELECT version();")).await.unwrap();
    let frames = read_turn(&mut client).await;
    assert_eq!(tags(&frames), b"TDCZ".to_vec());
    assert_eq!(frames[1].first_value().as_deref(), Some("16.8"));
    assert_eq!(frames[2].command_tag().as_deref(), Some("SELECT 1"));
}

#[tokio::test]
async fn typed_literal_probe_answers_log() {
    let (mut client, _handle) = spawn_session(build_forest().unwrap(), quiet());

    client
        .write_all(&query("SELECT 'x'::regtype::text as type;"))
        .await
        .unwrap();
    let frames = read_turn(&mut client).await;
    assert_eq!(tags(&frames), b"TDCZ".to_vec());
    assert_eq!(frames[1].first_value().as_deref(), Some("log"));
}

#[tokio::test]
async fn set_and_catalog_probes_do_not_reach_the_game() {
    let (mut client, handle) = spawn_session(build_forest().unwrap(), quiet());

    client.write_all(&query("SET extra_float_digits = 3")).await.unwrap();
    let frames = read_turn(&mut client).await;
    assert_eq!(tags(&frames), b"CZ".to_vec());
    assert_eq!(frames[0].command_tag().as_deref(), Some("SET"));

    client
        .write_all(&query("SELECT n.nspname FROM pg_catalog.pg_namespace n"))
        .await
        .unwrap();
    let frames = read_turn(&mut client).await;
    assert_eq!(tags(&frames), b"TCZ".to_vec());
    assert_eq!(frames[1].command_tag().as_deref(), Some("SELECT 0"));

    client.write_all(&terminate()).await.unwrap();
    let (_, session) = handle.await.unwrap();
    assert_eq!(session.world().current_name(), STARTING_ROOM);
    assert!(session.world().inventory().is_empty());
}

#[tokio::test]
async fn empty_query_gets_empty_response() {
    let (mut client, _handle) = spawn_session(build_forest().unwrap(), quiet());

    client.write_all(&query(";")).await.unwrap();
    let frames = read_turn(&mut client).await;
    assert_eq!(tags(&frames), b"IZ".to_vec());
}

#[tokio::test]
async fn sync_and_unknown_frames() {
    let (mut client, _handle) = spawn_session(build_forest().unwrap(), quiet());

    // A Parse frame is skipped without a reply; the Sync after it is answered.
    client.write_all(&tagged(b'P', b"\0SELECT 1\0\0\0")).await.unwrap();
    client.write_all(&sync()).await.unwrap();
    let frame = read_frame(&mut client).await.unwrap();
    assert_eq!(frame.tag, b'Z');
    assert_eq!(frame.body, b"I".to_vec());

    client.write_all(&query("inventory")).await.unwrap();
    let frames = read_turn(&mut client).await;
    assert_eq!(notices(&frames), vec!["Your inventory is empty.".to_string()]);
}

#[tokio::test]
async fn quit_ends_with_fatal_admin_shutdown() {
    let (mut client, handle) = spawn_session(build_forest().unwrap(), quiet());

    client.write_all(&query("quit")).await.unwrap();
    let frames = read_turn(&mut client).await;
    let err = frames.last().unwrap();
    assert_eq!(err.tag, b'E');
    let fields = err.fields();
    assert_eq!(fields.get(&b'S').map(String::as_str), Some("FATAL"));
    assert_eq!(fields.get(&b'V').map(String::as_str), Some("FATAL"));
    assert_eq!(fields.get(&b'C').map(String::as_str), Some("57P01"));
    assert!(notices(&frames)[0].contains("Thanks for playing"));

    let (end, _) = handle.await.unwrap();
    assert_eq!(end.unwrap(), SessionEnd::Quit);
    assert!(read_frame(&mut client).await.is_none());
}

#[tokio::test]
async fn death_closes_the_session() {
    let mut world = build_forest().unwrap();
    world.move_to(SAP_TREE_CLEARING).unwrap();
    let (mut client, handle) = spawn_session(world, quiet());

    for _ in 0..2 {
        client.write_all(&query("go east")).await.unwrap();
        let frames = read_turn(&mut client).await;
        assert_eq!(frames.last().unwrap().tag, b'Z');
    }
    client.write_all(&query("go east")).await.unwrap();
    let frames = read_turn(&mut client).await;
    let err = frames.last().unwrap();
    assert_eq!(err.tag, b'E');
    assert_eq!(err.fields().get(&b'M').map(String::as_str), Some("game over"));
    assert_eq!(
        notices(&frames).last().map(String::as_str),
        Some("You are dead. Your adventure ends here.")
    );

    let (end, session) = handle.await.unwrap();
    assert_eq!(end.unwrap(), SessionEnd::GameOver);
    assert!(session.world().is_game_over());
}

#[tokio::test]
async fn rune_stone_label_is_read_from_the_next_query() {
    let mut world = build_forest().unwrap();
    world
        .inventory_mut()
        .add(Item::RuneStoneBag(RuneStoneBag::new()))
        .unwrap();
    let (mut client, handle) = spawn_session(world, quiet());

    client
        .write_all(&query("drop teleportation stone"))
        .await
        .unwrap();
    let frames = read_turn(&mut client).await;
    assert!(notices(&frames)
        .last()
        .unwrap()
        .ends_with("What would you like to name this location?"));

    // An empty answer re-asks instead of producing EmptyQueryResponse.
    client.write_all(&query(";")).await.unwrap();
    let frames = read_turn(&mut client).await;
    assert_eq!(tags(&frames), b"NZ".to_vec());

    client.write_all(&query("go north")).await.unwrap();
    let frames = read_turn(&mut client).await;
    assert_eq!(
        notices(&frames),
        vec!["You have named this location 'go north'".to_string()]
    );

    client.write_all(&terminate()).await.unwrap();
    let (_, session) = handle.await.unwrap();
    assert_eq!(session.world().current_name(), STARTING_ROOM);
    assert!(!session.is_awaiting_label());
    let bag = session.world().inventory().rune_stone_bag().unwrap();
    assert_eq!(bag.lookup("go north"), Some(STARTING_ROOM));
}

#[tokio::test]
async fn idle_sessions_are_closed() {
    let settings = DispatchSettings {
        idle_timeout: Some(Duration::from_millis(50)),
        ..quiet()
    };
    let (_client, handle) = spawn_session(build_forest().unwrap(), settings);
    let (end, _) = handle.await.unwrap();
    assert_eq!(end.unwrap(), SessionEnd::IdleTimeout);
}

#[tokio::test]
async fn truncated_frame_is_an_error() {
    let (mut client, handle) = spawn_session(build_forest().unwrap(), quiet());
    let frame = query("look");
    client.write_all(&frame[..frame.len() - 2]).await.unwrap();
    drop(client);
    let (end, _) = handle.await.unwrap();
    assert!(matches!(end, Err(WireError::UnexpectedEof)));
}
