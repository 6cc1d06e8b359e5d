//! An in-memory warehouse that records what it was asked to do.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use query_engine_execution::{Column, Error, QueryResult, Session, Warehouse};
use query_engine_sql::sql::string::Statement;

/// What every statement sent to the warehouse produces.
#[derive(Debug, Clone)]
pub enum Outcome {
    Rows(QueryResult),
    /// The session opens but the statement fails.
    ExecutionFault { code: String, message: String },
    /// The session cannot be opened at all.
    ConnectionFault { code: String, message: String },
}

#[derive(Debug, Default)]
struct Recording {
    statements: Mutex<Vec<String>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
}

#[derive(Debug, Clone)]
pub struct RecordingWarehouse {
    outcome: Outcome,
    recording: Arc<Recording>,
}

impl RecordingWarehouse {
    pub fn new(outcome: Outcome) -> Self {
        RecordingWarehouse {
            outcome,
            recording: Arc::default(),
        }
    }

    /// A warehouse answering every statement with these rows under single text column names.
    pub fn returning(column_names: &[&str], rows: Vec<Vec<Value>>) -> Self {
        let columns = column_names
            .iter()
            .map(|name| Column::new(*name, "text"))
            .collect();
        Self::new(Outcome::Rows(QueryResult::new(columns, rows)))
    }

    pub fn failing(code: &str, message: &str) -> Self {
        Self::new(Outcome::ExecutionFault {
            code: code.to_string(),
            message: message.to_string(),
        })
    }

    pub fn unreachable(code: &str, message: &str) -> Self {
        Self::new(Outcome::ConnectionFault {
            code: code.to_string(),
            message: message.to_string(),
        })
    }

    /// SQL text of every statement executed so far, in order.
    pub fn statements(&self) -> Vec<String> {
        self.recording.statements.lock().unwrap().clone()
    }

    pub fn opened_sessions(&self) -> usize {
        self.recording.opened.load(Ordering::SeqCst)
    }

    pub fn closed_sessions(&self) -> usize {
        self.recording.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Warehouse for RecordingWarehouse {
    async fn connect(&self) -> Result<Box<dyn Session>, Error> {
        if let Outcome::ConnectionFault { code, message } = &self.outcome {
            return Err(Error::Warehouse {
                code: code.clone(),
                message: message.clone(),
            });
        }
        self.recording.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(RecordingSession {
            outcome: self.outcome.clone(),
            recording: self.recording.clone(),
            closed: false,
        }))
    }
}

struct RecordingSession {
    outcome: Outcome,
    recording: Arc<Recording>,
    closed: bool,
}

#[async_trait]
impl Session for RecordingSession {
    async fn execute(&mut self, statement: &Statement) -> Result<QueryResult, Error> {
        self.recording
            .statements
            .lock()
            .unwrap()
            .push(statement.sql().to_string());
        match &self.outcome {
            Outcome::Rows(result) => Ok(result.clone()),
            Outcome::ExecutionFault { code, message }
            | Outcome::ConnectionFault { code, message } => Err(Error::Warehouse {
                code: code.clone(),
                message: message.clone(),
            }),
        }
    }

    async fn close(&mut self) -> Result<(), Error> {
        if !self.closed {
            self.closed = true;
            self.recording.closed.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
