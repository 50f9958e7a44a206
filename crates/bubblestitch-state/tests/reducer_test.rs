use bubblestitch_core::{Cell, CellCoord, ColorId, PaletteColor, Pattern, TOTAL_ROWS};
use bubblestitch_state::{reduce, Action, AppMode, ApplicationState, MAX_HISTORY_DEPTH};
use proptest::prelude::*;

fn cell(state: &ApplicationState, row: usize, col: usize) -> Option<Cell> {
    state.pattern().cell(CellCoord::new(row, col))
}

fn apply_all(state: ApplicationState, actions: impl IntoIterator<Item = Action>) -> ApplicationState {
    actions
        .into_iter()
        .fold(state, |state, action| reduce(&state, action))
}

#[test]
fn test_default_state() {
    let state = ApplicationState::new();
    assert_eq!(state.pattern().grid.cells().count(), 230);
    assert!(state.pattern().grid.cells().all(|(_, c)| c.is_empty()));
    assert_eq!(state.mode(), AppMode::Design);
    assert_eq!(state.selected_color_id(), Some(0));
    assert_eq!(state.undo_depth(), 0);
    assert_eq!(state.redo_depth(), 0);
}

#[test]
fn test_paint_then_undo_scenario() {
    let state = ApplicationState::new();
    let state = reduce(&state, Action::SetSelectedColor { color_id: Some(0) });
    let state = reduce(&state, Action::SetCellColor { row: 0, col: 0 });
    assert_eq!(cell(&state, 0, 0), Some(Cell::Colored(0)));
    assert_eq!(state.undo_depth(), 1);

    let state = reduce(&state, Action::Undo);
    assert_eq!(cell(&state, 0, 0), Some(Cell::Empty));
    assert_eq!(state.undo_depth(), 0);
    assert_eq!(state.redo_depth(), 1);
}

#[test]
fn test_advance_to_last_row_scenario() {
    let state = apply_all(ApplicationState::new(), (0..26).map(|_| Action::AdvanceRow));
    let progress = &state.pattern().progress;
    assert_eq!(progress.current_row, 26);
    assert!(progress.completed_rows[..26].iter().all(|done| *done));
    assert!(!progress.completed_rows[26]);
    assert!(state.is_last_row());
}

#[test]
fn test_advance_on_last_row_is_noop() {
    let state = apply_all(ApplicationState::new(), (0..26).map(|_| Action::AdvanceRow));
    let next = reduce(&state, Action::AdvanceRow);
    assert_eq!(next, state);
}

#[test]
fn test_decrement_on_first_row_is_noop() {
    let state = ApplicationState::new();
    let next = reduce(&state, Action::DecrementRow);
    assert_eq!(next, state);
}

#[test]
fn test_decrement_unmarks_returned_row() {
    let state = apply_all(
        ApplicationState::new(),
        [Action::AdvanceRow, Action::AdvanceRow, Action::DecrementRow],
    );
    let progress = &state.pattern().progress;
    assert_eq!(progress.current_row, 1);
    assert!(progress.completed_rows[0]);
    assert!(!progress.completed_rows[1]);
    assert_eq!(state.undo_depth(), 3);
}

#[test]
fn test_set_then_clear_restores_grid() {
    let start = ApplicationState::new();
    let state = apply_all(
        start.clone(),
        [
            Action::SetCellColor { row: 13, col: 4 },
            Action::ClearCell { row: 13, col: 4 },
        ],
    );
    assert_eq!(state.pattern().grid, start.pattern().grid);
}

#[test]
fn test_undo_redo_restore_exact_patterns() {
    let state = apply_all(
        ApplicationState::new(),
        [
            Action::FillRow { row: 2 },
            Action::SetSelectedColor { color_id: Some(3) },
        ],
    );
    let before = state.pattern().clone();

    let edited = reduce(&state, Action::SetCellColor { row: 5, col: 1 });
    let after = edited.pattern().clone();

    let undone = reduce(&edited, Action::Undo);
    assert_eq!(undone.pattern(), &before);

    let redone = reduce(&undone, Action::Redo);
    assert_eq!(redone.pattern(), &after);
}

#[test]
fn test_undo_and_redo_on_empty_stacks_are_noops() {
    let state = ApplicationState::new();
    assert_eq!(reduce(&state, Action::Undo), state);
    assert_eq!(reduce(&state, Action::Redo), state);
}

#[test]
fn test_new_edit_clears_redo() {
    let state = apply_all(
        ApplicationState::new(),
        [
            Action::SetCellColor { row: 0, col: 0 },
            Action::SetCellColor { row: 0, col: 1 },
            Action::Undo,
            Action::Undo,
        ],
    );
    assert_eq!(state.redo_depth(), 2);

    let state = reduce(&state, Action::SetCellColor { row: 4, col: 4 });
    assert_eq!(state.redo_depth(), 0);
    assert_eq!(state.undo_depth(), 1);
}

#[test]
fn test_history_is_capped() {
    let state = apply_all(
        ApplicationState::new(),
        (0..25).map(|i| Action::SetCellColor { row: i, col: 0 }),
    );
    assert_eq!(state.undo_depth(), MAX_HISTORY_DEPTH);

    // The five oldest snapshots were evicted: the oldest left already has
    // rows 0..5 painted.
    let oldest = state.history().undo_stack().next().expect("oldest snapshot");
    assert_eq!(oldest.cell(CellCoord::new(4, 0)), Some(Cell::Colored(0)));
    assert_eq!(oldest.cell(CellCoord::new(5, 0)), Some(Cell::Empty));

    let state = apply_all(state, (0..25).map(|_| Action::Undo));
    assert_eq!(state.undo_depth(), 0);
    assert_eq!(state.redo_depth(), MAX_HISTORY_DEPTH);
}

#[test]
fn test_paint_requires_selection_in_palette() {
    let state = reduce(
        &ApplicationState::new(),
        Action::SetSelectedColor { color_id: None },
    );
    assert_eq!(reduce(&state, Action::SetCellColor { row: 0, col: 0 }), state);
    assert_eq!(reduce(&state, Action::FillRow { row: 0 }), state);

    let state = reduce(&state, Action::SetSelectedColor { color_id: Some(99) });
    assert_eq!(state.selected_color_id(), Some(99));
    assert_eq!(reduce(&state, Action::SetCellColor { row: 0, col: 0 }), state);
}

#[test]
fn test_fill_row() {
    let state = apply_all(
        ApplicationState::new(),
        [
            Action::SetSelectedColor { color_id: Some(4) },
            Action::FillRow { row: 3 },
        ],
    );
    let row = state.pattern().grid.row(3).expect("row 3");
    assert_eq!(row.len(), 8);
    assert!(row.iter().all(|c| *c == Cell::Colored(4)));
    assert_eq!(state.pattern().grid.row(2).map(|r| r[0]), Some(Cell::Empty));
    assert_eq!(state.undo_depth(), 1);
}

#[test]
fn test_flood_fill_respects_boundaries() {
    let state = apply_all(
        ApplicationState::new(),
        [
            Action::SetSelectedColor { color_id: Some(1) },
            Action::FillRow { row: 10 },
            Action::SetSelectedColor { color_id: Some(2) },
            Action::FloodFill { row: 0, col: 0 },
        ],
    );
    let grid = &state.pattern().grid;
    for (coord, cell) in grid.cells() {
        let expected = match coord.row {
            r if r < 10 => Cell::Colored(2),
            10 => Cell::Colored(1),
            _ => Cell::Empty,
        };
        assert_eq!(cell, expected, "{}", coord);
    }
    assert_eq!(state.undo_depth(), 2);
}

#[test]
fn test_add_color_selects_without_history() {
    let state = reduce(
        &ApplicationState::new(),
        Action::AddColor {
            name: "Moss".to_string(),
            display_value: "#556B2F".to_string(),
        },
    );
    let added = state.pattern().palette.last().expect("new color");
    assert_eq!(added.id, 5);
    assert_eq!(added.display_order, 5);
    assert_eq!(added.name, "Moss");
    assert_eq!(state.selected_color_id(), Some(5));
    assert_eq!(state.undo_depth(), 0);
}

#[test]
fn test_add_color_to_empty_palette_starts_at_zero() {
    let state = reduce(
        &ApplicationState::new(),
        Action::load_pattern(Pattern::new(Vec::new())),
    );
    let state = reduce(
        &state,
        Action::AddColor {
            name: "Ink".to_string(),
            display_value: "#111111".to_string(),
        },
    );
    assert_eq!(state.pattern().palette[0].id, 0);
    assert_eq!(state.selected_color_id(), Some(0));
}

#[test]
fn test_add_color_with_blank_name_is_ignored() {
    let state = ApplicationState::new();
    let next = reduce(
        &state,
        Action::AddColor {
            name: "   ".to_string(),
            display_value: "#000000".to_string(),
        },
    );
    assert_eq!(next, state);
}

#[test]
fn test_add_color_keeps_name_as_given() {
    let state = reduce(
        &ApplicationState::new(),
        Action::AddColor {
            name: " Sea Glass ".to_string(),
            display_value: "#A8D5BA".to_string(),
        },
    );
    assert_eq!(state.selected_color().map(|c| c.name.as_str()), Some(" Sea Glass "));
}

#[test]
fn test_add_color_with_exhausted_ids_is_noop() {
    let mut pattern = Pattern::default();
    pattern
        .palette
        .push(PaletteColor::new(ColorId::MAX, "Ink", "#111111", 5));
    let state = reduce(&ApplicationState::new(), Action::load_pattern(pattern));
    assert!(state.pattern().has_color(ColorId::MAX));

    let next = reduce(
        &state,
        Action::AddColor {
            name: "Moss".to_string(),
            display_value: "#556B2F".to_string(),
        },
    );
    assert_eq!(next, state);
    assert_eq!(next.pattern().palette.len(), 6);
}

#[test]
fn test_invalid_patterns_are_not_loaded() {
    let state = reduce(
        &ApplicationState::new(),
        Action::SetCellColor { row: 0, col: 0 },
    );

    let mut runaway = Pattern::default();
    runaway.progress.current_row = 500;
    runaway.progress.completed_rows.clear();
    assert_eq!(reduce(&state, Action::load_pattern(runaway.clone())), state);
    assert_eq!(reduce(&state, Action::restore(runaway)), state);

    let mut dangling = Pattern::default();
    dangling.grid.set(CellCoord::new(4, 4), Cell::Colored(99));
    assert_eq!(reduce(&state, Action::load_pattern(dangling)), state);
    assert!(state.can_undo());
}

#[test]
fn test_invalid_wire_pattern_is_not_loaded() {
    let mut value = serde_json::to_value(Pattern::default()).expect("serialize");
    value["progress"]["currentRow"] = serde_json::json!(500);
    value["progress"]["completedRows"] = serde_json::json!([]);
    let json = serde_json::json!({ "type": "LOAD_PATTERN", "pattern": value }).to_string();

    let state = ApplicationState::new();
    let next = reduce(&state, Action::from_json(&json).expect("decode"));
    assert_eq!(next, state);
    assert_eq!(next.pattern().progress.current_row, 0);
}

#[test]
fn test_remove_color_cascades() {
    let state = apply_all(
        ApplicationState::new(),
        [
            Action::SetSelectedColor { color_id: Some(2) },
            Action::FillRow { row: 0 },
            Action::SetCellColor { row: 9, col: 3 },
            Action::SetSelectedColor { color_id: Some(1) },
            Action::SetCellColor { row: 9, col: 4 },
            Action::SetSelectedColor { color_id: Some(2) },
            Action::RemoveColor { color_id: 2 },
        ],
    );
    let pattern = state.pattern();
    assert!(!pattern.has_color(2));
    assert!(pattern
        .grid
        .cells()
        .all(|(_, c)| c != Cell::Colored(2)));
    assert_eq!(cell(&state, 9, 4), Some(Cell::Colored(1)));
    // Selection falls back to the first remaining color.
    assert_eq!(state.selected_color_id(), Some(0));
    assert_eq!(state.redo_depth(), 0);

    let undone = reduce(&state, Action::Undo);
    assert!(undone.pattern().has_color(2));
    assert_eq!(cell(&undone, 0, 0), Some(Cell::Colored(2)));
}

#[test]
fn test_remove_last_color_clears_selection() {
    let mut state = ApplicationState::new();
    for id in 0..5 {
        state = reduce(&state, Action::RemoveColor { color_id: id });
    }
    assert!(state.pattern().palette.is_empty());
    assert_eq!(state.selected_color_id(), None);
}

#[test]
fn test_remove_unknown_color_is_noop() {
    let state = ApplicationState::new();
    assert_eq!(reduce(&state, Action::RemoveColor { color_id: 17 }), state);
}

#[test]
fn test_mode_and_name_do_not_touch_history() {
    let state = apply_all(
        ApplicationState::new(),
        [
            Action::SetCellColor { row: 0, col: 0 },
            Action::Undo,
            Action::SetMode {
                mode: AppMode::Work,
            },
            Action::SetPatternName {
                name: "Harbor".to_string(),
            },
        ],
    );
    assert_eq!(state.mode(), AppMode::Work);
    assert_eq!(state.pattern().name, "Harbor");
    assert_eq!(state.undo_depth(), 0);
    assert_eq!(state.redo_depth(), 1);
}

#[test]
fn test_restore_and_new_pattern_reset_history() {
    let state = apply_all(
        ApplicationState::new(),
        [
            Action::SetCellColor { row: 0, col: 0 },
            Action::SetCellColor { row: 0, col: 1 },
            Action::Undo,
        ],
    );
    assert!(state.can_undo() && state.can_redo());

    let mut saved = Pattern::default();
    saved.name = "Saved".to_string();
    let restored = reduce(&state, Action::restore(saved.clone()));
    assert_eq!(restored.pattern(), &saved);
    assert!(!restored.can_undo() && !restored.can_redo());

    let fresh = reduce(&state, Action::NewPattern);
    assert_ne!(fresh.pattern().id, state.pattern().id);
    assert!(fresh.pattern().grid.cells().all(|(_, c)| c.is_empty()));
    assert!(!fresh.can_undo() && !fresh.can_redo());
}

#[test]
fn test_input_state_is_never_mutated() {
    let state = ApplicationState::new();
    let snapshot = state.clone();
    let _ = reduce(&state, Action::FillRow { row: 0 });
    let _ = reduce(&state, Action::AdvanceRow);
    assert_eq!(state, snapshot);
}

#[test]
fn test_snapshots_are_shared_not_copied() {
    let state = ApplicationState::new();
    let next = reduce(&state, Action::SetSelectedColor { color_id: Some(1) });
    assert!(next.shares_pattern(&state));

    let edited = reduce(&next, Action::ClearCell { row: 0, col: 0 });
    assert!(!edited.shares_pattern(&next));
}

#[test]
fn test_wire_actions_drive_the_reducer() {
    let state = ApplicationState::new();
    let action = Action::from_json(r#"{"type":"FILL_ROW","row":26}"#).expect("decode");
    let state = reduce(&state, action);
    assert_eq!(cell(&state, 26, 8), Some(Cell::Colored(0)));
}

fn edit_action() -> impl Strategy<Value = Action> {
    let row = 0usize..TOTAL_ROWS;
    prop_oneof![
        (row.clone(), 0usize..9).prop_map(|(row, col)| Action::SetCellColor { row, col }),
        (row.clone(), 0usize..9).prop_map(|(row, col)| Action::ClearCell { row, col }),
        row.prop_map(|row| Action::FillRow { row }),
        Just(Action::AdvanceRow),
        Just(Action::DecrementRow),
        Just(Action::Undo),
        Just(Action::Redo),
    ]
}

proptest! {
    #[test]
    fn test_history_never_exceeds_depth(actions in prop::collection::vec(edit_action(), 0..80)) {
        let mut state = ApplicationState::new();
        for action in actions {
            state = reduce(&state, action);
            prop_assert!(state.undo_depth() <= MAX_HISTORY_DEPTH);
            prop_assert!(state.redo_depth() <= MAX_HISTORY_DEPTH);
            prop_assert!(state.pattern().validate().is_ok());
            prop_assert!(state.pattern().progress.current_row < TOTAL_ROWS);
        }
    }

    #[test]
    fn test_set_then_clear_only_touches_one_cell(row in 0usize..TOTAL_ROWS, col in 0usize..9) {
        let base = apply_all(ApplicationState::new(), [Action::FillRow { row: 0 }]);
        let state = apply_all(
            base.clone(),
            [Action::SetCellColor { row, col }, Action::ClearCell { row, col }],
        );
        for (coord, c) in state.pattern().grid.cells() {
            if coord == CellCoord::new(row, col) {
                prop_assert_eq!(c, Cell::Empty);
            } else {
                prop_assert_eq!(Some(c), base.pattern().cell(coord));
            }
        }
    }
}
