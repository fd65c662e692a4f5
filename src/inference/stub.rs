//! Deterministic inference client with pre-scripted responses.
//!
//! Responses are queued per [`InferenceTask`]. The last queued response for a
//! task keeps being returned; a task with nothing queued reports the provider
//! as unavailable, which is also how the offline `stub` provider behaves.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{InferenceClient, InferenceTask};
use crate::core::constants::services;
use crate::core::errors::{RouterError, RouterResult};

#[derive(Debug, Clone)]
enum Scripted {
    Text(String),
    Unavailable(String),
}

#[derive(Debug, Default)]
pub struct ScriptedInference {
    responses: Mutex<HashMap<InferenceTask, Vec<Scripted>>>,
    calls: Mutex<Vec<(InferenceTask, String)>>,
}

impl ScriptedInference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a text completion for `task`.
    pub fn respond(self, task: InferenceTask, text: impl Into<String>) -> Self {
        self.push(task, Scripted::Text(text.into()));
        self
    }

    /// Queue an upstream failure for `task`.
    pub fn fail(self, task: InferenceTask, reason: impl Into<String>) -> Self {
        self.push(task, Scripted::Unavailable(reason.into()));
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn calls_for(&self, task: InferenceTask) -> usize {
        lock(&self.calls).iter().filter(|(t, _)| *t == task).count()
    }

    /// Prompts sent so far for `task`, oldest first.
    pub fn prompts_for(&self, task: InferenceTask) -> Vec<String> {
        lock(&self.calls)
            .iter()
            .filter(|(t, _)| *t == task)
            .map(|(_, p)| p.clone())
            .collect()
    }

    fn push(&self, task: InferenceTask, scripted: Scripted) {
        lock(&self.responses).entry(task).or_default().push(scripted);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl InferenceClient for ScriptedInference {
    async fn complete(&self, task: InferenceTask, prompt: &str) -> RouterResult<String> {
        lock(&self.calls).push((task, prompt.to_string()));

        let next = {
            let mut responses = lock(&self.responses);
            match responses.get_mut(&task) {
                Some(queue) if queue.len() > 1 => Some(queue.remove(0)),
                Some(queue) => queue.first().cloned(),
                None => None,
            }
        };

        match next {
            Some(Scripted::Text(text)) => Ok(text),
            Some(Scripted::Unavailable(reason)) => {
                Err(RouterError::upstream(services::INFERENCE, reason))
            }
            None => Err(RouterError::upstream(
                services::INFERENCE,
                format!("no inference provider configured for {task}"),
            )),
        }
    }
}
