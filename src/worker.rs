//! Background recomputation
//!
//! Runs [`Scenario::compute`] on a worker thread so the caller stays
//! responsive while a long integration runs. Every request carries a
//! generation number; the worker skips requests that were superseded while it
//! was busy, and [`Recomputer::latest`] hands back only the result for the
//! newest request.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::error::{SimError, SimResult};
use crate::scenario::Scenario;

struct Request {
    generation: u64,
    value: f64,
}

/// Frame computed on the worker thread for one request
#[derive(Debug)]
pub struct Outcome<F> {
    pub generation: u64,
    pub value: f64,
    pub result: SimResult<F>,
}

/// Owns the worker thread for one scenario
pub struct Recomputer<S: Scenario> {
    requests: Option<Sender<Request>>,
    results: Receiver<Outcome<S::Frame>>,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl<S> Recomputer<S>
where
    S: Scenario + Send + 'static,
    S::Frame: Send + 'static,
{
    pub fn spawn(scenario: S) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<Request>();
        let (result_tx, result_rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            while let Ok(mut request) = request_rx.recv() {
                // Only the newest queued request matters
                while let Ok(newer) = request_rx.try_recv() {
                    request = newer;
                }

                let result = compute_checked(&scenario, request.value);
                let outcome = Outcome {
                    generation: request.generation,
                    value: request.value,
                    result,
                };
                if result_tx.send(outcome).is_err() {
                    break;
                }
            }
            debug!("recomputation worker stopped");
        });

        Self {
            requests: Some(request_tx),
            results: result_rx,
            generation: 0,
            handle: Some(handle),
        }
    }

    /// Queue a recomputation for `value`, superseding every earlier request
    pub fn request(&mut self, value: f64) -> SimResult<u64> {
        self.generation += 1;
        let request = Request {
            generation: self.generation,
            value,
        };
        self.requests
            .as_ref()
            .ok_or(SimError::WorkerDisconnected)?
            .send(request)
            .map_err(|_| SimError::WorkerDisconnected)?;
        Ok(self.generation)
    }

    /// Generation of the most recent request (0 before any request)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Non-blocking poll: the result of the newest request if it has arrived
    ///
    /// Stale results received along the way are dropped.
    pub fn latest(&mut self) -> Option<Outcome<S::Frame>> {
        let mut newest = None;
        loop {
            match self.results.try_recv() {
                Ok(outcome) => {
                    if outcome.generation == self.generation {
                        newest = Some(outcome);
                    } else {
                        debug!(generation = outcome.generation, "discarding stale result");
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("recomputation worker disconnected");
                    break;
                }
            }
        }
        newest
    }

    /// Block until the result of the newest request arrives
    pub fn wait_latest(&mut self) -> SimResult<Outcome<S::Frame>> {
        loop {
            let outcome = self.results.recv().map_err(|_| SimError::WorkerDisconnected)?;
            if outcome.generation == self.generation {
                return Ok(outcome);
            }
            debug!(generation = outcome.generation, "discarding stale result");
        }
    }
}

impl<S: Scenario> Drop for Recomputer<S> {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("recomputation worker panicked");
            }
        }
    }
}

fn compute_checked<S: Scenario>(scenario: &S, value: f64) -> SimResult<S::Frame> {
    let range = scenario.range();
    if !range.contains(value) {
        return Err(SimError::ParameterOutOfRange {
            name: scenario.parameter(),
            value,
            min: range.min,
            max: range.max,
        });
    }
    scenario.compute(value)
}
