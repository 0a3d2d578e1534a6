// SPDX-License-Identifier: GPL-3.0-only

//! In-memory [`DexSource`] used by the unit tests.

use std::{
    collections::{BTreeMap, VecDeque},
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{
    DexError, Result,
    source::{DexSource, Resource},
};

#[derive(Default)]
pub(crate) struct MemorySource {
    documents: Mutex<BTreeMap<(Resource, i64), Value>>,
    failures: Mutex<VecDeque<DexError>>,
    latency: Mutex<Duration>,
    calls: AtomicUsize,
}

impl MemorySource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stores a document under its `id`; it is reachable by id or by `name`
    pub(crate) fn insert(&self, resource: Resource, document: Value) {
        let id = document["id"].as_i64().expect("documents need an id");
        self.documents
            .lock()
            .unwrap()
            .insert((resource, id), document);
    }

    /// The next `count` requests fail with `error`
    pub(crate) fn fail_next(&self, count: usize, error: DexError) {
        let mut failures = self.failures.lock().unwrap();
        failures.extend(std::iter::repeat_n(error, count));
    }

    pub(crate) fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn begin(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        match self.failures.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DexSource for MemorySource {
    async fn resource(&self, resource: Resource, name_or_id: &str) -> Result<Value> {
        self.begin().await?;

        let documents = self.documents.lock().unwrap();
        let found = match name_or_id.parse::<i64>() {
            Ok(id) => documents.get(&(resource, id)),
            Err(_) => documents
                .iter()
                .find(|((r, _), doc)| *r == resource && doc["name"] == name_or_id)
                .map(|(_, doc)| doc),
        };

        found
            .cloned()
            .ok_or_else(|| DexError::NotFound(format!("{resource}/{name_or_id}")))
    }

    async fn resource_list(
        &self,
        resource: Resource,
        limit: usize,
        offset: usize,
    ) -> Result<Value> {
        self.begin().await?;

        let documents = self.documents.lock().unwrap();
        let all: Vec<Value> = documents
            .iter()
            .filter(|((r, _), _)| *r == resource)
            .map(|((_, id), doc)| {
                json!({
                    "name": doc["name"],
                    "url": format!("https://pokeapi.co/api/v2/{resource}/{id}/"),
                })
            })
            .collect();

        Ok(json!({
            "count": all.len(),
            "next": null,
            "previous": null,
            "results": all.into_iter().skip(offset).take(limit).collect::<Vec<_>>(),
        }))
    }
}
