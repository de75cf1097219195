//! Direct access to the posts table.
//!
//! [`StorageGateway`] owns at most one MySQL connection. The connection is opened
//! lazily on first use, re-opened if it stops answering pings, and released by
//! [`StorageGateway::close`]. One gateway is created per test and passed to
//! whatever needs it; there is no process-wide handle.
//!
//! ```text
//!  scenario ──► StorageGateway ──► Mutex<Option<MySqlConnection>> ──► MySQL
//!                  │
//!                  ├─ execute / get_by_id / exists / count_by_ids   (read)
//!                  └─ insert_raw / delete                           (write, committed)
//! ```

use chrono::{Local, Utc};
use serde_json::Value;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlQueryResult};
use sqlx::Connection;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use postcheck_core::config::DatabaseConfig;
use postcheck_core::slug::slugify;
use postcheck_core::types::PostRow;

use crate::error::GatewayError;
use crate::row::{RowMap, SqlParam, bind_params, count_from, decode_row, placeholders};

/// Fields a direct insert takes from the caller. Every other column gets the
/// same default the remote system writes for a fresh post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPost {
    pub title: String,
    pub content: String,
    pub status: String,
    pub author: u64,
}

/// Lazily connected gateway to the posts table.
pub struct StorageGateway {
    options: MySqlConnectOptions,
    table: String,
    conn: Mutex<Option<MySqlConnection>>,
}

impl StorageGateway {
    /// Prepares connect options; does not touch the network.
    pub fn new(config: &DatabaseConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);

        Self {
            options,
            table: config.posts_table(),
            conn: Mutex::new(None),
        }
    }

    /// Name of the posts table this gateway queries.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Whether a connection handle is currently held.
    pub async fn is_open(&self) -> bool {
        self.conn.lock().await.is_some()
    }

    /// Opens a connection unless a live one is already held.
    pub async fn connect(&self) -> Result<(), GatewayError> {
        let mut slot = self.conn.lock().await;
        self.ensure_open(&mut slot).await?;
        Ok(())
    }

    async fn ensure_open<'a>(
        &self,
        slot: &'a mut Option<MySqlConnection>,
    ) -> Result<&'a mut MySqlConnection, GatewayError> {
        let existing = match slot.take() {
            Some(mut conn) => match conn.ping().await {
                Ok(()) => Some(conn),
                Err(e) => {
                    warn!(error = %e, "storage connection dropped, reconnecting");
                    None
                }
            },
            None => None,
        };

        let conn = match existing {
            Some(conn) => conn,
            None => {
                let conn = MySqlConnection::connect_with(&self.options)
                    .await
                    .map_err(GatewayError::Connection)?;
                info!(table = %self.table, "storage connection opened");
                conn
            }
        };

        Ok(slot.insert(conn))
    }

    /// Runs a read query and returns every row as a column-name map.
    pub async fn execute(
        &self,
        sql: &str,
        params: &[SqlParam],
    ) -> Result<Vec<RowMap>, GatewayError> {
        let mut slot = self.conn.lock().await;
        let conn = self.ensure_open(&mut slot).await?;

        debug!(sql, params = params.len(), "executing storage query");
        let rows = bind_params(sql, params)
            .fetch_all(&mut *conn)
            .await
            .map_err(GatewayError::Query)?;

        rows.iter().map(decode_row).collect()
    }

    /// Runs a write statement in its own transaction and commits it.
    async fn execute_committed(
        &self,
        sql: &str,
        params: &[SqlParam],
    ) -> Result<MySqlQueryResult, GatewayError> {
        let mut slot = self.conn.lock().await;
        let conn = self.ensure_open(&mut slot).await?;

        let mut tx = conn.begin().await.map_err(GatewayError::Query)?;
        let result = bind_params(sql, params)
            .execute(&mut *tx)
            .await
            .map_err(GatewayError::Query)?;
        tx.commit().await.map_err(GatewayError::Query)?;

        Ok(result)
    }

    /// Fetches a post row, `None` when no row has this id.
    pub async fn get_by_id(&self, id: u64) -> Result<Option<PostRow>, GatewayError> {
        let sql = select_by_id_sql(&self.table);
        let rows = self.execute(&sql, &[id.into()]).await?;

        rows.into_iter()
            .next()
            .map(|row| {
                serde_json::from_value::<PostRow>(Value::Object(row))
                    .map_err(|e| GatewayError::Unexpected(format!("post row {id}: {e}")))
            })
            .transpose()
    }

    pub async fn exists(&self, id: u64) -> Result<bool, GatewayError> {
        let sql = format!("SELECT COUNT(*) AS count FROM {} WHERE ID = ?", self.table);
        let rows = self.execute(&sql, &[id.into()]).await?;
        Ok(count_from(&rows)? > 0)
    }

    pub async fn exists_by_title(&self, title: &str) -> Result<bool, GatewayError> {
        let sql = format!(
            "SELECT COUNT(*) AS count FROM {} WHERE post_title = ?",
            self.table
        );
        let rows = self.execute(&sql, &[title.into()]).await?;
        Ok(count_from(&rows)? > 0)
    }

    /// Counts rows whose id is in `ids`. An empty set is 0 without a query.
    pub async fn count_by_ids(&self, ids: &[u64]) -> Result<u64, GatewayError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let sql = count_in_sql(&self.table, ids.len());
        let params: Vec<SqlParam> = ids.iter().copied().map(SqlParam::from).collect();
        let rows = self.execute(&sql, &params).await?;
        count_from(&rows)
    }

    /// Deletes the row and commits. Does not check that the row exists.
    pub async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        let sql = format!("DELETE FROM {} WHERE ID = ?", self.table);
        let result = self.execute_committed(&sql, &[id.into()]).await?;
        debug!(post_id = id, rows = result.rows_affected(), "post row deleted");
        Ok(())
    }

    /// Inserts a post row directly, bypassing API validation, and returns its id.
    ///
    /// Default columns and the slug match what the remote system writes, so the
    /// row cannot be told apart from an API-created one.
    pub async fn insert_raw(&self, post: &RawPost) -> Result<u64, GatewayError> {
        let now = Utc::now();
        let gmt = now.naive_utc();
        let local = now.with_timezone(&Local).naive_local();

        let sql = insert_sql(&self.table);
        let params = [
            SqlParam::from(post.author),
            local.into(),
            gmt.into(),
            post.content.as_str().into(),
            post.title.as_str().into(),
            post.status.as_str().into(),
            slugify(&post.title).into(),
            local.into(),
            gmt.into(),
        ];

        let result = self.execute_committed(&sql, &params).await?;
        let id = result.last_insert_id();
        if id == 0 {
            return Err(GatewayError::Unexpected(
                "insert did not produce an auto-increment id".to_owned(),
            ));
        }

        debug!(post_id = id, status = %post.status, "post row inserted");
        Ok(id)
    }

    /// `SELECT 1` round trip.
    pub async fn ping(&self) -> Result<(), GatewayError> {
        self.execute("SELECT 1 AS ok", &[]).await.map(|_| ())
    }

    /// Releases the connection if one is held. Safe to call repeatedly.
    pub async fn close(&self) -> Result<(), GatewayError> {
        let mut slot = self.conn.lock().await;
        if let Some(conn) = slot.take() {
            conn.close().await.map_err(GatewayError::Connection)?;
            info!(table = %self.table, "storage connection closed");
        }
        Ok(())
    }
}

fn select_by_id_sql(table: &str) -> String {
    format!(
        "SELECT ID, post_title, post_content, post_status, post_author, post_name \
         FROM {table} WHERE ID = ?"
    )
}

fn count_in_sql(table: &str, count: usize) -> String {
    format!(
        "SELECT COUNT(*) AS count FROM {table} WHERE ID IN ({})",
        placeholders(count)
    )
}

// Bound, in order: author, date, date_gmt, content, title, status, name,
// modified, modified_gmt. Everything else is a literal default.
fn insert_sql(table: &str) -> String {
    format!(
        "INSERT INTO {table} (\
            post_author, post_date, post_date_gmt, post_content, post_title, \
            post_excerpt, post_status, comment_status, ping_status, post_password, \
            post_name, to_ping, pinged, post_modified, post_modified_gmt, \
            post_content_filtered, post_parent, guid, menu_order, post_type, \
            post_mime_type, comment_count\
         ) VALUES (\
            ?, ?, ?, ?, ?, \
            '', ?, 'open', 'open', '', \
            ?, '', '', ?, ?, \
            '', 0, '', 0, 'post', \
            '', 0\
         )"
    )
}
