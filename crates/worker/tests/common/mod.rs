//! In-memory fakes for the worker's store and generator seams.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pairblend_db::models::combination::{Combination, CreateCombination, InsertOutcome};
use pairblend_db::models::person::Person;
use pairblend_generation::{GenerationError, PollConfig};
use pairblend_worker::{CombinationStore, CombinationWorker, ImageGenerator, WorkerConfig};

pub fn person(id: i64, name: &str) -> Person {
    Person {
        id,
        name: name.to_string(),
        image: image_of(name),
        created_at: chrono::Utc::now(),
    }
}

pub fn image_of(name: &str) -> String {
    format!("https://img/{name}.jpg")
}

pub fn fast_config() -> WorkerConfig {
    WorkerConfig {
        poll: PollConfig {
            max_attempts: 3,
            interval: Duration::from_millis(1),
        },
        max_in_flight: None,
    }
}

pub fn worker(store: &Arc<FakeStore>, generator: &Arc<FakeGenerator>) -> CombinationWorker {
    CombinationWorker::new(store.clone(), generator.clone(), fast_config())
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeStore {
    people: Mutex<Vec<Person>>,
    generated: Mutex<HashMap<String, String>>,
    /// Fail `list_people` when set.
    pub fail_people: Mutex<bool>,
    /// Fail `list_combination_names` when set.
    pub fail_ledger: Mutex<bool>,
    /// Labels whose insert fails with a non-conflict error.
    pub broken_labels: Mutex<HashSet<String>>,
    pub inserts: AtomicUsize,
}

impl FakeStore {
    pub fn with_people(names: &[&str]) -> Arc<Self> {
        let store = Self::default();
        *store.people.lock().unwrap() = names
            .iter()
            .enumerate()
            .map(|(i, name)| person(i as i64 + 1, name))
            .collect();
        Arc::new(store)
    }

    pub fn seed_generated(&self, label: &str, image: &str) {
        self.generated
            .lock()
            .unwrap()
            .insert(label.to_string(), image.to_string());
    }

    pub fn generated(&self) -> HashMap<String, String> {
        self.generated.lock().unwrap().clone()
    }

    pub fn add_person(&self, name: &str) {
        let mut people = self.people.lock().unwrap();
        let id = people.len() as i64 + 1;
        people.push(person(id, name));
    }
}

#[async_trait]
impl CombinationStore for FakeStore {
    async fn list_people(&self) -> Result<Vec<Person>, sqlx::Error> {
        if *self.fail_people.lock().unwrap() {
            return Err(sqlx::Error::Protocol("people unavailable".to_string()));
        }
        Ok(self.people.lock().unwrap().clone())
    }

    async fn list_combination_names(&self) -> Result<HashSet<String>, sqlx::Error> {
        if *self.fail_ledger.lock().unwrap() {
            return Err(sqlx::Error::Protocol("ledger unavailable".to_string()));
        }
        Ok(self.generated.lock().unwrap().keys().cloned().collect())
    }

    async fn insert_combination(
        &self,
        input: &CreateCombination,
    ) -> Result<InsertOutcome, sqlx::Error> {
        if self.broken_labels.lock().unwrap().contains(&input.name) {
            return Err(sqlx::Error::Protocol("disk full".to_string()));
        }

        let mut generated = self.generated.lock().unwrap();
        if generated.contains_key(&input.name) {
            return Ok(InsertOutcome::AlreadyExists);
        }
        generated.insert(input.name.clone(), input.image.clone());
        let id = self.inserts.fetch_add(1, Ordering::SeqCst) as i64 + 1;

        Ok(InsertOutcome::Inserted(Combination {
            id,
            name: input.name.clone(),
            image: input.image.clone(),
            created_at: chrono::Utc::now(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// How the fake treats any job involving a given image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    RejectSubmit,
    FailJob,
    NeverFinish,
}

#[derive(Default)]
pub struct FakeGenerator {
    behaviours: Mutex<HashMap<String, Behaviour>>,
    /// `(image_a, image_b)` for every submit call, in call order.
    pub submissions: Mutex<Vec<(String, String)>>,
    /// Delay before a job resolves, to force overlapping runs.
    pub job_delay: Mutex<Duration>,
    next_id: AtomicUsize,
    jobs: Mutex<HashMap<String, (String, String)>>,
}

impl FakeGenerator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set(&self, name: &str, behaviour: Behaviour) {
        self.behaviours
            .lock()
            .unwrap()
            .insert(image_of(name), behaviour);
    }

    pub fn submit_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    fn behaviour(&self, a: &str, b: &str) -> Option<Behaviour> {
        let behaviours = self.behaviours.lock().unwrap();
        behaviours.get(a).or_else(|| behaviours.get(b)).copied()
    }

    /// Output URL the fake returns for a completed job on these images.
    pub fn output_for(a: &str, b: &str) -> String {
        let mut names = [a, b];
        names.sort();
        format!("https://out/{}+{}.png", image_stem(names[0]), image_stem(names[1]))
    }
}

fn image_stem(url: &str) -> &str {
    url.trim_start_matches("https://img/").trim_end_matches(".jpg")
}

#[async_trait]
impl ImageGenerator for FakeGenerator {
    async fn submit(&self, image_a: &str, image_b: &str) -> Result<String, GenerationError> {
        self.submissions
            .lock()
            .unwrap()
            .push((image_a.to_string(), image_b.to_string()));

        if self.behaviour(image_a, image_b) == Some(Behaviour::RejectSubmit) {
            return Err(GenerationError::Api {
                status: 500,
                body: "upstream exploded".to_string(),
            });
        }

        let id = format!("job-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.jobs
            .lock()
            .unwrap()
            .insert(id.clone(), (image_a.to_string(), image_b.to_string()));
        Ok(id)
    }

    async fn await_result(
        &self,
        job_id: &str,
        poll: &PollConfig,
    ) -> Result<String, GenerationError> {
        let delay = *self.job_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let (a, b) = self
            .jobs
            .lock()
            .unwrap()
            .get(job_id)
            .cloned()
            .expect("unknown job id");

        match self.behaviour(&a, &b) {
            Some(Behaviour::FailJob) => Err(GenerationError::JobFailed {
                job_id: job_id.to_string(),
                message: "face not detected".to_string(),
            }),
            Some(Behaviour::NeverFinish) => {
                tokio::time::sleep(poll.budget()).await;
                Err(GenerationError::TimedOut {
                    job_id: job_id.to_string(),
                    attempts: poll.max_attempts,
                })
            }
            _ => Ok(Self::output_for(&a, &b)),
        }
    }
}
