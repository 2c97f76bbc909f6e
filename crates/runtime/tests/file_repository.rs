//! JSON slot storage on disk.

use game_core::{Board, CellIndex, Character, CharacterKind, GameState, PositionedCharacter};
use runtime::{FileStateRepository, RepositoryError, StateRepository};

fn sample() -> GameState {
    let mut state = GameState::with_positions(
        Board::new(6).unwrap(),
        vec![
            PositionedCharacter::new(Character::new(CharacterKind::Bowman), CellIndex(6)),
            PositionedCharacter::new(Character::new(CharacterKind::Daemon), CellIndex(11)),
        ],
    )
    .unwrap();
    state.commit_move(CellIndex(6), CellIndex(7)).unwrap();
    state.advance_turn();
    state
}

#[test]
fn saved_state_loads_back_identically() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileStateRepository::new(dir.path().join("saves")).unwrap();
    let state = sample();

    assert!(!repo.exists("quicksave"));
    assert_eq!(repo.load("quicksave").unwrap(), None);

    repo.save("quicksave", &state).unwrap();
    assert!(repo.exists("quicksave"));
    assert!(dir.path().join("saves/quicksave.json").is_file());
    assert!(!dir.path().join("saves/quicksave.json.tmp").exists());

    assert_eq!(repo.load("quicksave").unwrap(), Some(state));
}

#[test]
fn slots_are_listed_and_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();
    let state = sample();

    repo.save("b", &state).unwrap();
    repo.save("a", &state).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    assert_eq!(repo.list_slots().unwrap(), vec!["a", "b"]);

    repo.delete("a").unwrap();
    repo.delete("a").unwrap();
    assert_eq!(repo.list_slots().unwrap(), vec!["b"]);
}

#[test]
fn corrupted_file_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();
    std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    assert!(matches!(repo.load("broken"), Err(RepositoryError::Json(_))));
}

fn tamper(dir: &std::path::Path, slot: &str, edit: impl FnOnce(&mut serde_json::Value)) {
    let path = dir.join(format!("{slot}.json"));
    let mut value: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    edit(&mut value);
    std::fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();
}

#[test]
fn placement_outside_the_board_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();
    repo.save("quicksave", &sample()).unwrap();

    tamper(dir.path(), "quicksave", |value| {
        value["positions"][1]["position"] = 36.into();
    });

    assert!(matches!(repo.load("quicksave"), Err(RepositoryError::Json(_))));
}

#[test]
fn stacked_characters_are_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();
    repo.save("quicksave", &sample()).unwrap();

    tamper(dir.path(), "quicksave", |value| {
        value["positions"][1]["position"] = value["positions"][0]["position"].clone();
    });

    assert!(matches!(repo.load("quicksave"), Err(RepositoryError::Json(_))));
}

#[test]
fn board_size_must_match_its_tiles() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();
    repo.save("quicksave", &sample()).unwrap();

    tamper(dir.path(), "quicksave", |value| {
        value["board"]["size"] = 5.into();
    });

    assert!(matches!(repo.load("quicksave"), Err(RepositoryError::Json(_))));
}

#[test]
fn turn_log_outside_the_board_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();
    repo.save("quicksave", &sample()).unwrap();

    tamper(dir.path(), "quicksave", |value| {
        value["turns"][0]["to"] = 99.into();
    });

    assert!(matches!(repo.load("quicksave"), Err(RepositoryError::Json(_))));
}

#[test]
fn path_like_slots_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();

    assert!(matches!(
        repo.save("../escape", &sample()),
        Err(RepositoryError::InvalidSlot(_))
    ));
    assert!(!repo.exists("../escape"));
}
