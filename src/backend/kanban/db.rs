//! Database operations for the Kanban API
//!
//! Visibility is role-scoped the way the platform scopes it everywhere
//! else: admins share one pool of admin-owned boards and see everything on
//! them; leaders and members only see their own rows. Order values are
//! dense, zero-based and assigned from the current row count at insert
//! time.

use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::backend::middleware::AuthenticatedUser;
use crate::shared::model::{
    AssignableUser, Board, BoardColumn, CreateColumnRequest, CreateTaskRequest, Role, Task,
    TaskPositionUpdate, UpdateColumnRequest, UpdateTaskRequest, UserRef,
};

/// Default columns created with every new board.
pub const DEFAULT_COLUMNS: [(&str, &str); 3] = [
    ("TODO", "Todo"),
    ("IN_PROGRESS", "In Progress"),
    ("DONE", "Done"),
];

const TASK_WITH_USERS_SELECT: &str = r#"
    SELECT t.id, t.title, t.description, t.status, t.column_id, t.board_id, t.user_id,
           t.created_by_id, t.assigned_to_id, t."order", t.created_at, t.updated_at,
           creator.name AS created_by_name, creator.email AS created_by_email,
           assignee.name AS assigned_to_name, assignee.email AS assigned_to_email
    FROM gasak_kanban_task t
    LEFT JOIN gasak_user creator ON t.created_by_id = creator.id
    LEFT JOIN gasak_user assignee ON t.assigned_to_id = assignee.id
"#;

fn map_board(row: &sqlx::postgres::PgRow) -> Board {
    Board {
        id: row.get("id"),
        title: row.get("title"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_column(row: &sqlx::postgres::PgRow) -> BoardColumn {
    BoardColumn {
        id: row.get("id"),
        title: row.get("title"),
        color: row.get("color"),
        board_id: row.get("board_id"),
        order: row.get("order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_task_with_users(row: &sqlx::postgres::PgRow) -> Task {
    let created_by_id: Uuid = row.get("created_by_id");
    let assigned_to_id: Option<Uuid> = row.get("assigned_to_id");

    // A user reference is only resolved when the joined row carries a name,
    // matching the API shape clients already consume.
    let created_by = row
        .get::<Option<String>, _>("created_by_name")
        .map(|name| UserRef {
            id: created_by_id,
            name,
            email: row
                .get::<Option<String>, _>("created_by_email")
                .unwrap_or_default(),
        });
    let assigned_to = match (assigned_to_id, row.get::<Option<String>, _>("assigned_to_name")) {
        (Some(id), Some(name)) => Some(UserRef {
            id,
            name,
            email: row
                .get::<Option<String>, _>("assigned_to_email")
                .unwrap_or_default(),
        }),
        _ => None,
    };

    Task {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        status: row.get("status"),
        column_id: row.get("column_id"),
        board_id: row.get("board_id"),
        user_id: row.get("user_id"),
        created_by_id,
        assigned_to_id,
        order: row.get("order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        created_by,
        assigned_to,
    }
}

/// Fetch the boards visible to the caller.
pub async fn fetch_boards(
    pool: &PgPool,
    user: &AuthenticatedUser,
) -> Result<Vec<Board>, sqlx::Error> {
    let rows = if user.role == Role::Admin {
        sqlx::query(
            r#"
            SELECT b.id, b.title, b.user_id, b.created_at, b.updated_at
            FROM gasak_kanban_board b
            JOIN gasak_user u ON b.user_id = u.id
            WHERE u.role = 'admin'
            ORDER BY b.created_at
            "#,
        )
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query(
            r#"
            SELECT id, title, user_id, created_at, updated_at
            FROM gasak_kanban_board
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user.user_id)
        .fetch_all(pool)
        .await?
    };

    Ok(rows.iter().map(map_board).collect())
}

/// Create a board owned by the caller.
pub async fn insert_board(pool: &PgPool, user_id: Uuid, title: &str) -> Result<Board, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO gasak_kanban_board (title, user_id)
        VALUES ($1, $2)
        RETURNING id, title, user_id, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(map_board(&row))
}

/// Create the default column trio for a fresh board.
pub async fn insert_default_columns(pool: &PgPool, board_id: Uuid) -> Result<(), sqlx::Error> {
    for (order, &(id, title)) in DEFAULT_COLUMNS.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO gasak_kanban_column (id, board_id, title, "order")
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(board_id)
        .bind(title)
        .bind(order as i32)
        .execute(pool)
        .await?;
    }
    Ok(())
}

/// Whether the caller may read the given board.
pub async fn board_visible(
    pool: &PgPool,
    board_id: Uuid,
    user: &AuthenticatedUser,
) -> Result<bool, sqlx::Error> {
    let row = if user.role == Role::Admin {
        sqlx::query(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM gasak_kanban_board b
                JOIN gasak_user u ON b.user_id = u.id
                WHERE b.id = $1 AND u.role = 'admin'
            ) AS visible
            "#,
        )
        .bind(board_id)
        .fetch_one(pool)
        .await?
    } else {
        sqlx::query(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM gasak_kanban_board
                WHERE id = $1 AND user_id = $2
            ) AS visible
            "#,
        )
        .bind(board_id)
        .bind(user.user_id)
        .fetch_one(pool)
        .await?
    };

    Ok(row.get("visible"))
}

/// Fetch a board's columns ordered by position.
pub async fn fetch_columns(pool: &PgPool, board_id: Uuid) -> Result<Vec<BoardColumn>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, color, board_id, "order", created_at, updated_at
        FROM gasak_kanban_column
        WHERE board_id = $1
        ORDER BY "order"
        "#,
    )
    .bind(board_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(map_column).collect())
}

/// Next dense order value for a new column on the board.
pub async fn next_column_order(pool: &PgPool, board_id: Uuid) -> Result<i32, sqlx::Error> {
    let row = sqlx::query(r#"SELECT COUNT(*) AS count FROM gasak_kanban_column WHERE board_id = $1"#)
        .bind(board_id)
        .fetch_one(pool)
        .await?;
    Ok(row.get::<i64, _>("count") as i32)
}

/// Insert a column with the given order position.
pub async fn insert_column(
    pool: &PgPool,
    req: &CreateColumnRequest,
    color: &str,
    order: i32,
) -> Result<BoardColumn, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO gasak_kanban_column (id, board_id, title, color, "order")
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, title, color, board_id, "order", created_at, updated_at
        "#,
    )
    .bind(&req.id)
    .bind(req.board_id)
    .bind(&req.title)
    .bind(color)
    .bind(order)
    .fetch_one(pool)
    .await?;

    Ok(map_column(&row))
}

/// Partial column update; absent fields keep their stored values.
pub async fn update_column(
    pool: &PgPool,
    column_id: &str,
    req: &UpdateColumnRequest,
) -> Result<Option<BoardColumn>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        UPDATE gasak_kanban_column
        SET title = COALESCE($2, title),
            color = COALESCE($3, color),
            "order" = COALESCE($4, "order"),
            updated_at = $5
        WHERE id = $1
        RETURNING id, title, color, board_id, "order", created_at, updated_at
        "#,
    )
    .bind(column_id)
    .bind(&req.title)
    .bind(&req.color)
    .bind(req.order)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| map_column(&r)))
}

/// Delete a column. Tasks in the column go with it (FK cascade).
///
/// Returns the deleted column's id and board on success.
pub async fn delete_column(
    pool: &PgPool,
    column_id: &str,
) -> Result<Option<(String, Uuid)>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        DELETE FROM gasak_kanban_column
        WHERE id = $1
        RETURNING id, board_id
        "#,
    )
    .bind(column_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| (r.get("id"), r.get("board_id"))))
}

/// Fetch a board's tasks visible to the caller, creator/assignee resolved,
/// ordered by position.
pub async fn fetch_tasks(
    pool: &PgPool,
    board_id: Uuid,
    user: &AuthenticatedUser,
) -> Result<Vec<Task>, sqlx::Error> {
    let rows = if user.role == Role::Admin {
        let sql = format!("{TASK_WITH_USERS_SELECT} WHERE t.board_id = $1 ORDER BY t.\"order\"");
        sqlx::query(&sql).bind(board_id).fetch_all(pool).await?
    } else {
        let sql = format!(
            "{TASK_WITH_USERS_SELECT} WHERE t.board_id = $1 AND t.user_id = $2 ORDER BY t.\"order\""
        );
        sqlx::query(&sql)
            .bind(board_id)
            .bind(user.user_id)
            .fetch_all(pool)
            .await?
    };

    Ok(rows.iter().map(map_task_with_users).collect())
}

/// Fetch one task with creator/assignee resolved.
pub async fn fetch_task_with_users(
    pool: &PgPool,
    task_id: Uuid,
) -> Result<Option<Task>, sqlx::Error> {
    let sql = format!("{TASK_WITH_USERS_SELECT} WHERE t.id = $1");
    let row = sqlx::query(&sql).bind(task_id).fetch_optional(pool).await?;
    Ok(row.map(|r| map_task_with_users(&r)))
}

/// Fetch several tasks with creator/assignee resolved.
pub async fn fetch_tasks_with_users_by_ids(
    pool: &PgPool,
    task_ids: &[Uuid],
) -> Result<Vec<Task>, sqlx::Error> {
    let sql = format!("{TASK_WITH_USERS_SELECT} WHERE t.id = ANY($1)");
    let rows = sqlx::query(&sql).bind(task_ids).fetch_all(pool).await?;
    Ok(rows.iter().map(map_task_with_users).collect())
}

/// Next dense order value for a new task in the caller's column.
pub async fn next_task_order(
    pool: &PgPool,
    board_id: Uuid,
    column_id: &str,
    user_id: Uuid,
) -> Result<i32, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS count FROM gasak_kanban_task
        WHERE board_id = $1 AND column_id = $2 AND user_id = $3
        "#,
    )
    .bind(board_id)
    .bind(column_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(row.get::<i64, _>("count") as i32)
}

/// Insert a task created by the caller; returns the new task id.
pub async fn insert_task(
    pool: &PgPool,
    user_id: Uuid,
    req: &CreateTaskRequest,
    order: i32,
) -> Result<Uuid, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO gasak_kanban_task
            (title, description, status, column_id, board_id, user_id, created_by_id, assigned_to_id, "order")
        VALUES ($1, $2, $3, $4, $5, $6, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(&req.title)
    .bind(&req.description)
    .bind(&req.status)
    .bind(&req.column_id)
    .bind(req.board_id)
    .bind(user_id)
    .bind(req.assigned_to_id)
    .bind(order)
    .fetch_one(pool)
    .await?;

    Ok(row.get("id"))
}

/// Whether the task sits on an admin-owned board (admin write scope).
async fn task_on_admin_board(pool: &PgPool, task_id: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM gasak_kanban_task t
            JOIN gasak_kanban_board b ON t.board_id = b.id
            JOIN gasak_user u ON b.user_id = u.id
            WHERE t.id = $1 AND u.role = 'admin'
        ) AS allowed
        "#,
    )
    .bind(task_id)
    .fetch_one(pool)
    .await?;
    Ok(row.get("allowed"))
}

/// Whether the caller may write the given task.
pub async fn task_writable(
    pool: &PgPool,
    task_id: Uuid,
    user: &AuthenticatedUser,
) -> Result<bool, sqlx::Error> {
    if user.role == Role::Admin {
        return task_on_admin_board(pool, task_id).await;
    }
    let row = sqlx::query(
        r#"SELECT EXISTS(SELECT 1 FROM gasak_kanban_task WHERE id = $1 AND user_id = $2) AS allowed"#,
    )
    .bind(task_id)
    .bind(user.user_id)
    .fetch_one(pool)
    .await?;
    Ok(row.get("allowed"))
}

/// Partial task update, write-scoped to the caller.
///
/// Returns the updated task id, or `None` when the task is missing or not
/// writable by the caller.
pub async fn update_task(
    pool: &PgPool,
    task_id: Uuid,
    req: &UpdateTaskRequest,
    user: &AuthenticatedUser,
) -> Result<Option<Uuid>, sqlx::Error> {
    if !task_writable(pool, task_id, user).await? {
        return Ok(None);
    }

    let row = sqlx::query(
        r#"
        UPDATE gasak_kanban_task
        SET title = COALESCE($2, title),
            description = COALESCE($3, description),
            status = COALESCE($4, status),
            column_id = COALESCE($5, column_id),
            "order" = COALESCE($6, "order"),
            updated_at = $7
        WHERE id = $1
        RETURNING id
        "#,
    )
    .bind(task_id)
    .bind(&req.title)
    .bind(&req.description)
    .bind(&req.status)
    .bind(&req.column_id)
    .bind(req.order)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.get("id")))
}

/// Apply one entry of a bulk drag-persistence batch.
///
/// Rows the caller cannot write are skipped (`None`), not failed - one
/// unauthorized item must not abort the rest of the gesture.
pub async fn apply_position_update(
    pool: &PgPool,
    update: &TaskPositionUpdate,
    user: &AuthenticatedUser,
) -> Result<Option<Uuid>, sqlx::Error> {
    if !task_writable(pool, update.id, user).await? {
        return Ok(None);
    }

    let row = sqlx::query(
        r#"
        UPDATE gasak_kanban_task
        SET status = COALESCE($2, status),
            column_id = COALESCE($3, column_id),
            "order" = COALESCE($4, "order"),
            updated_at = $5
        WHERE id = $1
        RETURNING id
        "#,
    )
    .bind(update.id)
    .bind(&update.status)
    .bind(&update.column_id)
    .bind(update.order)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.get("id")))
}

/// Delete a task, write-scoped to the caller.
///
/// Returns the deleted task's id and board on success.
pub async fn delete_task(
    pool: &PgPool,
    task_id: Uuid,
    user: &AuthenticatedUser,
) -> Result<Option<(Uuid, Uuid)>, sqlx::Error> {
    if !task_writable(pool, task_id, user).await? {
        return Ok(None);
    }

    let row = sqlx::query(
        r#"
        DELETE FROM gasak_kanban_task
        WHERE id = $1
        RETURNING id, board_id
        "#,
    )
    .bind(task_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| (r.get("id"), r.get("board_id"))))
}

/// Fetch the users the caller may assign tasks to.
pub async fn fetch_assignable_users(
    pool: &PgPool,
    user: &AuthenticatedUser,
) -> Result<Vec<AssignableUser>, sqlx::Error> {
    let rows = if user.role == Role::Admin {
        sqlx::query(r#"SELECT id, name, email, role FROM gasak_user WHERE role = 'admin'"#)
            .fetch_all(pool)
            .await?
    } else {
        sqlx::query(r#"SELECT id, name, email, role FROM gasak_user WHERE id = $1"#)
            .bind(user.user_id)
            .fetch_all(pool)
            .await?
    };

    Ok(rows
        .iter()
        .map(|row| AssignableUser {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            role: row
                .get::<String, _>("role")
                .parse()
                .unwrap_or(Role::Member),
        })
        .collect())
}
