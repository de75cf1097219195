//! In-memory stand-ins for the two channels, used by this crate's unit tests.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use postcheck_client::{ApiResponse, ClientError, PostsApi, StatusCode};
use postcheck_core::types::{NewPost, PostPatch};
use postcheck_storage::{GatewayError, PostStore, RawPost};

/// Posts table held in memory.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<BTreeMap<u64, RawPost>>,
    next_id: Mutex<u64>,
    /// Ids whose existence check fails with a query error
    pub fail_exists_for: Vec<u64>,
    /// Ids whose delete fails with a query error
    pub fail_delete_for: Vec<u64>,
    /// Operation log, e.g. `exists:3`, `delete:3`
    pub calls: Mutex<Vec<String>>,
    pub close_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failing_exists(mut self, id: u64) -> Self {
        self.fail_exists_for.push(id);
        self
    }

    pub fn with_failing_delete(mut self, id: u64) -> Self {
        self.fail_delete_for.push(id);
        self
    }

    /// Puts a row in place as if another actor had created it.
    pub fn put(&self, id: u64, post: RawPost) {
        self.rows.lock().unwrap().insert(id, post);
    }

    /// Removes a row behind the registry's back.
    pub fn remove(&self, id: u64) {
        self.rows.lock().unwrap().remove(&id);
    }

    pub fn get(&self, id: u64) -> Option<RawPost> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.rows.lock().unwrap().keys().copied().collect()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn closes(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl PostStore for MemoryStore {
    async fn exists(&self, id: u64) -> Result<bool, GatewayError> {
        self.record(format!("exists:{id}"));
        if self.fail_exists_for.contains(&id) {
            return Err(GatewayError::Unexpected(format!("exists({id}) failed")));
        }
        Ok(self.rows.lock().unwrap().contains_key(&id))
    }

    async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        self.record(format!("delete:{id}"));
        if self.fail_delete_for.contains(&id) {
            return Err(GatewayError::Unexpected(format!("delete({id}) failed")));
        }
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn insert_raw(&self, post: &RawPost) -> Result<u64, GatewayError> {
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            1000 + *next
        };
        self.record(format!("insert:{id}"));
        self.rows.lock().unwrap().insert(id, post.clone());
        Ok(id)
    }

    async fn close(&self) -> Result<(), GatewayError> {
        self.close_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// API that answers from a queue of canned responses and records payloads.
#[derive(Default)]
pub struct ScriptedApi {
    responses: Mutex<VecDeque<ApiResponse>>,
    created: Mutex<Vec<NewPost>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.responses
            .lock()
            .unwrap()
            .push_back(ApiResponse::new(status, body));
        self
    }

    pub fn created(&self) -> Vec<NewPost> {
        self.created.lock().unwrap().clone()
    }

    fn next(&self) -> ApiResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ApiResponse::new(StatusCode::NOT_IMPLEMENTED, "no scripted response"))
    }
}

impl PostsApi for ScriptedApi {
    async fn create_post(&self, payload: &NewPost) -> Result<ApiResponse, ClientError> {
        self.created.lock().unwrap().push(payload.clone());
        Ok(self.next())
    }

    async fn get_post(&self, _id: u64, _query: &[(&str, &str)]) -> Result<ApiResponse, ClientError> {
        Ok(self.next())
    }

    async fn list_posts(&self, _query: &[(&str, &str)]) -> Result<ApiResponse, ClientError> {
        Ok(self.next())
    }

    async fn update_post(&self, _id: u64, _patch: &PostPatch) -> Result<ApiResponse, ClientError> {
        Ok(self.next())
    }

    async fn delete_post(&self, _id: u64, _force: bool) -> Result<ApiResponse, ClientError> {
        Ok(self.next())
    }
}
