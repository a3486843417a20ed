//! Scripted transport shared by the data-client tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use permit_db::error::DataError;
use permit_db::payload::{Payload, Target};
use permit_db::transport::{RawResponse, Transport};
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct Sent {
    pub target: Target,
    pub payload: Payload,
    pub at: Instant,
}

/// Answers from a script, then with `200 []` once the script runs out.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<RawResponse>>>,
    sent: Arc<Mutex<Vec<Sent>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.script.lock().unwrap().push_back(RawResponse {
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_payload(&self) -> Payload {
        self.sent.lock().unwrap().last().unwrap().payload.clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, target: Target, payload: &Payload) -> Result<RawResponse, DataError> {
        self.sent.lock().unwrap().push(Sent {
            target,
            payload: payload.clone(),
            at: Instant::now(),
        });
        let next = self.script.lock().unwrap().pop_front();
        Ok(next.unwrap_or(RawResponse {
            status: 200,
            body: "[]".into(),
        }))
    }
}
