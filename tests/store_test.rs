//! Store contract tests: optimistic mutation, server-truth merging, and
//! the forced default column.

mod common;

use common::{assignable_user, board, column, task, InMemoryApi};
use gasakboard::client::store::{BoardStore, DEFAULT_COLUMN_ID};
use pretty_assertions::assert_eq;
use tokio_test::assert_ok;
use uuid::Uuid;

fn store_with(api: InMemoryApi) -> BoardStore<InMemoryApi> {
    BoardStore::new(api)
}

#[tokio::test]
async fn test_load_boards_selects_first_when_none_current() {
    let api = InMemoryApi::with_state(|state| {
        state.boards.push(board("Main"));
        state.boards.push(board("Scrims"));
    });
    let first_id = api.state.lock().unwrap().boards[0].id;
    let mut store = store_with(api);

    store.load_boards().await;

    assert_eq!(store.boards.len(), 2);
    assert_eq!(store.current_board_id, Some(first_id));
    assert!(!store.is_loading);
    assert!(store.error.is_none());
}

#[tokio::test]
async fn test_load_boards_keeps_existing_selection() {
    let api = InMemoryApi::with_state(|state| {
        state.boards.push(board("Main"));
    });
    let mut store = store_with(api);
    let chosen = Uuid::new_v4();
    store.set_current_board(chosen);

    store.load_boards().await;

    assert_eq!(store.current_board_id, Some(chosen));
}

#[tokio::test]
async fn test_first_column_is_forced_to_default_id() {
    let api = InMemoryApi::with_state(|state| {
        state.boards.push(board("Main"));
    });
    let board_id = api.state.lock().unwrap().boards[0].id;
    let mut store = store_with(api);
    store.set_current_board(board_id);

    // Regardless of the supplied title.
    store.add_col("Backlog", None).await;

    assert_eq!(store.columns.len(), 1);
    assert_eq!(store.columns[0].id, DEFAULT_COLUMN_ID);
    assert_eq!(store.columns[0].title, "Backlog");
}

#[tokio::test]
async fn test_later_columns_derive_id_from_title() {
    let api = InMemoryApi::with_state(|state| {
        state.boards.push(board("Main"));
    });
    let board_id = api.state.lock().unwrap().boards[0].id;
    let mut store = store_with(api);
    store.set_current_board(board_id);

    store.add_col("Anything", None).await;
    store.add_col("Review", None).await;
    store.add_col("needs qa", None).await;

    let ids: Vec<_> = store.columns.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["TODO", "REVIEW", "NEEDS_QA"]);
}

#[tokio::test]
async fn test_create_column_on_existing_board_grows_list() {
    // Client A creates "Review" on a board that already has TODO.
    let api = InMemoryApi::with_state(|state| {
        state.boards.push(board("Main"));
    });
    let board_id = api.state.lock().unwrap().boards[0].id;
    api.state
        .lock()
        .unwrap()
        .columns
        .push(column(board_id, "TODO", "Todo", 0));
    let mut store = store_with(api);
    store.set_current_board(board_id);
    store.load_columns(board_id).await;
    assert_eq!(store.columns.len(), 1);

    store.add_col("Review", Some("#ff0000")).await;

    assert_eq!(store.columns.len(), 2);
    assert_eq!(store.columns[1].id, "REVIEW");
    assert_ne!(store.columns[0].id, store.columns[1].id);
}

#[tokio::test]
async fn test_load_columns_replaces_wholesale() {
    let api = InMemoryApi::with_state(|state| {
        state.boards.push(board("Main"));
    });
    let board_id = api.state.lock().unwrap().boards[0].id;
    {
        let mut state = api.state.lock().unwrap();
        state.columns.push(column(board_id, "TODO", "Todo", 0));
        state.columns.push(column(board_id, "DONE", "Done", 1));
    }
    let mut store = store_with(api.clone());
    store.set_current_board(board_id);
    // Local state starts stale.
    store.columns.push(column(board_id, "STALE", "Stale", 0));

    store.load_columns(board_id).await;

    let local: Vec<_> = store.columns.iter().map(|c| c.id.clone()).collect();
    let server: Vec<_> = {
        let state = api.state.lock().unwrap();
        let mut cols: Vec<_> = state
            .columns
            .iter()
            .filter(|c| c.board_id == board_id)
            .cloned()
            .collect();
        cols.sort_by_key(|c| c.order);
        cols.iter().map(|c| c.id.clone()).collect()
    };
    assert_eq!(local, server);
    assert!(!local.contains(&"STALE".to_string()));
}

#[tokio::test]
async fn test_update_col_merges_server_version_by_id() {
    let api = InMemoryApi::with_state(|state| {
        state.boards.push(board("Main"));
    });
    let board_id = api.state.lock().unwrap().boards[0].id;
    {
        let mut state = api.state.lock().unwrap();
        state.columns.push(column(board_id, "TODO", "Todo", 0));
        state.columns.push(column(board_id, "DONE", "Done", 1));
    }
    let mut store = store_with(api);
    store.set_current_board(board_id);
    store.load_columns(board_id).await;

    store.update_col("TODO", "Backlog", Some("#112233")).await;

    let updated = store.columns.iter().find(|c| c.id == "TODO").unwrap();
    assert_eq!(updated.title, "Backlog");
    assert_eq!(updated.color.as_deref(), Some("#112233"));
    let untouched = store.columns.iter().find(|c| c.id == "DONE").unwrap();
    assert_eq!(untouched.title, "Done");
}

#[tokio::test]
async fn test_remove_col_cascades_local_tasks() {
    let api = InMemoryApi::with_state(|state| {
        state.boards.push(board("Main"));
    });
    let board_id = api.state.lock().unwrap().boards[0].id;
    {
        let mut state = api.state.lock().unwrap();
        state.columns.push(column(board_id, "TODO", "Todo", 0));
        state.columns.push(column(board_id, "DONE", "Done", 1));
        state.tasks.push(task(board_id, "TODO", "a", 0));
        state.tasks.push(task(board_id, "TODO", "b", 1));
        state.tasks.push(task(board_id, "DONE", "c", 0));
    }
    let mut store = store_with(api);
    store.set_current_board(board_id);
    store.load_columns(board_id).await;
    store.load_tasks(board_id).await;

    store.remove_col("TODO").await;

    assert!(store.columns.iter().all(|c| c.id != "TODO"));
    assert!(store.tasks.iter().all(|t| t.column_id != "TODO"));
    assert_eq!(store.tasks.len(), 1);

    // The server cascaded too: a refetch shows no orphans either.
    store.load_tasks(board_id).await;
    assert!(store.tasks.iter().all(|t| t.column_id != "TODO"));
}

#[tokio::test]
async fn test_add_task_without_board_records_error() {
    let mut store = store_with(InMemoryApi::new());

    store.add_task("Review VOD", None, None).await;

    assert_eq!(store.error.as_deref(), Some("No board selected"));
    assert!(store.tasks.is_empty());
}

#[tokio::test]
async fn test_add_task_without_columns_records_error() {
    let api = InMemoryApi::with_state(|state| {
        state.boards.push(board("Main"));
    });
    let board_id = api.state.lock().unwrap().boards[0].id;
    let mut store = store_with(api);
    store.set_current_board(board_id);

    store.add_task("Review VOD", None, None).await;

    assert!(store
        .error
        .as_deref()
        .is_some_and(|e| e.contains("No columns available")));
    assert!(store.tasks.is_empty());
}

#[tokio::test]
async fn test_add_task_lands_in_first_column() {
    let api = InMemoryApi::with_state(|state| {
        state.boards.push(board("Main"));
    });
    let board_id = api.state.lock().unwrap().boards[0].id;
    {
        let mut state = api.state.lock().unwrap();
        state.columns.push(column(board_id, "TODO", "Todo", 0));
        state.columns.push(column(board_id, "DONE", "Done", 1));
    }
    let mut store = store_with(api);
    store.set_current_board(board_id);
    store.load_columns(board_id).await;

    store.add_task("Review VOD", Some("map 3"), None).await;

    assert_eq!(store.tasks.len(), 1);
    let created = &store.tasks[0];
    assert_eq!(created.column_id, "TODO");
    assert_eq!(created.status, "TODO");
    assert_eq!(created.description.as_deref(), Some("map 3"));
    assert!(store.error.is_none());
}

#[tokio::test]
async fn test_create_board_returns_failure_for_bootstrap() {
    let api = InMemoryApi::new();
    api.fail_next("boom");
    let mut store = store_with(api);

    let result = store.create_board("Main").await;

    assert!(result.is_err());
    assert!(store.error.is_some());
    assert!(store.boards.is_empty());
}

#[tokio::test]
async fn test_create_board_rejects_empty_title() {
    let mut store = store_with(InMemoryApi::new());
    assert!(store.create_board("   ").await.is_err());
    assert!(store.error.is_some());
}

#[tokio::test]
async fn test_create_board_selects_it_and_loads_columns() {
    let mut store = store_with(InMemoryApi::new());

    tokio_test::assert_ok!(store.create_board("Main").await);

    assert_eq!(store.boards.len(), 1);
    assert_eq!(store.current_board_id, Some(store.boards[0].id));
    // The server seeds the default trio; create_board loads them.
    let ids: Vec<_> = store.columns.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["TODO", "IN_PROGRESS", "DONE"]);
}

#[tokio::test]
async fn test_update_task_replaces_with_server_representation() {
    let api = InMemoryApi::with_state(|state| {
        state.boards.push(board("Main"));
    });
    let board_id = api.state.lock().unwrap().boards[0].id;
    let t = task(board_id, "TODO", "draft", 0);
    let task_id = t.id;
    api.state.lock().unwrap().tasks.push(t);
    let mut store = store_with(api);
    store.set_current_board(board_id);
    store.load_tasks(board_id).await;

    store
        .update_task(
            task_id,
            gasakboard::shared::model::UpdateTaskRequest {
                title: Some("final".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert_eq!(store.tasks[0].title, "final");
}

#[tokio::test]
async fn test_remove_task_filters_locally() {
    let api = InMemoryApi::with_state(|state| {
        state.boards.push(board("Main"));
    });
    let board_id = api.state.lock().unwrap().boards[0].id;
    let t = task(board_id, "TODO", "draft", 0);
    let task_id = t.id;
    api.state.lock().unwrap().tasks.push(t);
    let mut store = store_with(api);
    store.set_current_board(board_id);
    store.load_tasks(board_id).await;

    store.remove_task(task_id).await;

    assert!(store.tasks.is_empty());
}

#[tokio::test]
async fn test_bulk_merge_is_a_partial_merge_by_id() {
    let api = InMemoryApi::with_state(|state| {
        state.boards.push(board("Main"));
    });
    let board_id = api.state.lock().unwrap().boards[0].id;
    let t1 = task(board_id, "TODO", "one", 0);
    let t2 = task(board_id, "TODO", "two", 1);
    let t3 = task(board_id, "TODO", "three", 2);
    let (id1, id2, id3) = (t1.id, t2.id, t3.id);
    {
        let mut state = api.state.lock().unwrap();
        state.tasks.extend([t1, t2, t3]);
    }
    let mut store = store_with(api);
    store.set_current_board(board_id);
    store.load_tasks(board_id).await;
    let before_t2 = store.tasks.iter().find(|t| t.id == id2).cloned().unwrap();
    let before_t3 = store.tasks.iter().find(|t| t.id == id3).cloned().unwrap();

    store
        .bulk_update_tasks(&[gasakboard::shared::model::TaskPositionUpdate {
            id: id1,
            status: Some("DONE".to_string()),
            column_id: Some("DONE".to_string()),
            order: Some(0),
        }])
        .await;

    let after_t1 = store.tasks.iter().find(|t| t.id == id1).unwrap();
    assert_eq!(after_t1.status, "DONE");
    // Tasks absent from the response are untouched.
    assert_eq!(store.tasks.iter().find(|t| t.id == id2).unwrap(), &before_t2);
    assert_eq!(store.tasks.iter().find(|t| t.id == id3).unwrap(), &before_t3);
}

#[tokio::test]
async fn test_error_slot_cleared_on_next_success() {
    let api = InMemoryApi::with_state(|state| {
        state.boards.push(board("Main"));
    });
    api.fail_next("transient");
    let mut store = store_with(api);

    store.load_boards().await;
    assert!(store.error.is_some());

    store.load_boards().await;
    assert!(store.error.is_none());
    assert_eq!(store.boards.len(), 1);
}

#[tokio::test]
async fn test_load_users_replaces_list() {
    let api = InMemoryApi::with_state(|state| {
        state.users.push(assignable_user("Coach"));
        state.users.push(assignable_user("Analyst"));
    });
    let mut store = store_with(api);

    store.load_users().await;

    assert_eq!(store.users.len(), 2);
}
