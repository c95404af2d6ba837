use scrumblr::connectors::http::{HttpResponse, Transport, TransportError};
use scrumblr::view::BoardView;
use scrumblr_core::{BoardSnapshot, Column, Task};
use serde_json::{Value, json};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Task store behaving like the board's serverless handlers: every reply is a gateway
/// envelope with the payload serialized into `body`, new tasks get `t-<n>` ids, writes
/// are upserts keyed by id and deletes arrive as a flagged POST.
#[derive(Default)]
pub struct InMemoryStore {
    tasks: RefCell<Vec<Value>>,
    next_id: Cell<u32>,
    reject_next_post: Cell<bool>,
    offline: Cell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Value>) -> Self {
        let store = Self::new();
        *store.tasks.borrow_mut() = tasks;
        store
    }

    /// The next POST is refused with a 500 and nothing is stored.
    pub fn reject_next_post(&self) {
        self.reject_next_post.set(true);
    }

    pub fn go_offline(&self) {
        self.offline.set(true);
    }

    pub fn stored(&self, id: &str) -> Option<Value> {
        self.tasks
            .borrow()
            .iter()
            .find(|task| task["id"] == id)
            .cloned()
    }

    fn envelope(status: u16, payload: Value) -> HttpResponse {
        let envelope = json!({
            "statusCode": status,
            "headers": { "Content-Type": "application/json" },
            "body": payload.to_string(),
        });
        HttpResponse::new(status, envelope.to_string())
    }

    fn field(body: &Value, name: &str, default: &str) -> String {
        body[name]
            .as_str()
            .filter(|value| !value.is_empty())
            .unwrap_or(default)
            .to_string()
    }
}

impl Transport for InMemoryStore {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        if self.offline.get() {
            return Err(TransportError::Request {
                url: url.to_string(),
                message: "connection refused".to_string(),
            });
        }
        let tasks = self.tasks.borrow().clone();
        let payload = json!({
            "success": true,
            "mockData": {
                "projects": [{
                    "project_id": "p1",
                    "title": "SWE Group Project",
                    "due_date": "12-14-2025",
                    "goals": "finish the project!"
                }],
                "users": [{ "user_id": "u1", "name": "Meriam" }],
                "tasks": tasks,
            }
        });
        Ok(Self::envelope(200, payload))
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        if self.offline.get() {
            return Err(TransportError::Request {
                url: url.to_string(),
                message: "connection refused".to_string(),
            });
        }
        if self.reject_next_post.replace(false) {
            return Ok(Self::envelope(
                500,
                json!({ "success": false, "message": "Could not write to the task table" }),
            ));
        }

        if body["delete"] == true {
            let Some(id) = body["id"].as_str() else {
                return Ok(Self::envelope(
                    400,
                    json!({ "success": false, "message": "Task id is required for delete" }),
                ));
            };
            self.tasks.borrow_mut().retain(|task| task["id"] != id);
            return Ok(Self::envelope(200, json!({ "success": true })));
        }

        let id = match body["id"].as_str() {
            Some(id) => id.to_string(),
            None => {
                self.next_id.set(self.next_id.get() + 1);
                format!("t-{}", self.next_id.get())
            }
        };
        let task = json!({
            "id": id,
            "title": Self::field(body, "title", "Untitled task"),
            "assignee": Self::field(body, "assignee", ""),
            "dueDate": Self::field(body, "dueDate", ""),
            "status": Self::field(body, "status", "Not Started"),
        });
        let mut tasks = self.tasks.borrow_mut();
        match tasks.iter().position(|stored| stored["id"] == id) {
            Some(index) => tasks[index] = task.clone(),
            None => tasks.push(task.clone()),
        }
        Ok(Self::envelope(201, json!({ "success": true, "task": task })))
    }
}

/// View that remembers where every card sits and what the user was told.
#[derive(Default)]
pub struct RecordingView {
    pub cards: RefCell<HashMap<String, Column>>,
    pub titles: RefCell<HashMap<String, String>>,
    pub notices: RefCell<Vec<String>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column_of(&self, task_id: &str) -> Option<Column> {
        self.cards.borrow().get(task_id).copied()
    }

    pub fn title_of(&self, task_id: &str) -> Option<String> {
        self.titles.borrow().get(task_id).cloned()
    }
}

impl BoardView for RecordingView {
    fn clear(&self) {
        self.cards.borrow_mut().clear();
        self.titles.borrow_mut().clear();
    }

    fn render_header(&self, _snapshot: &BoardSnapshot) {}

    fn render_card(&self, task: &Task, column: Column) {
        self.cards.borrow_mut().insert(task.id.clone(), column);
        self.titles
            .borrow_mut()
            .insert(task.id.clone(), task.title.clone());
    }

    fn move_card(&self, task_id: &str, column: Column) {
        if let Some(current) = self.cards.borrow_mut().get_mut(task_id) {
            *current = column;
        }
    }

    fn update_card(&self, task: &Task) {
        self.titles
            .borrow_mut()
            .insert(task.id.clone(), task.title.clone());
    }

    fn remove_card(&self, task_id: &str) {
        self.cards.borrow_mut().remove(task_id);
        self.titles.borrow_mut().remove(task_id);
    }

    fn notify(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }
}
