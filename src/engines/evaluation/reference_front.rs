use crate::data::CsvConnector;
use crate::engines::metrics::normalize::{bounds_of, extend_bounds, normalize_front};
use crate::error::{MetaError, Result};
use crate::operators::pareto::insert_non_dominated;
use crate::types::Front;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Empty,
    Populated,
}

/// Consistent copy of a tracker taken under its lock
#[derive(Debug, Clone, PartialEq)]
pub struct FrontSnapshot {
    pub front: Front,
    pub ideal: Vec<f64>,
    pub nadir: Vec<f64>,
}

impl FrontSnapshot {
    /// The front rescaled to `[0, 1]` with the snapshot's own bounds
    pub fn normalized_front(&self) -> Front {
        normalize_front(&self.front, &self.ideal, &self.nadir)
    }

    /// Rescale another front with the snapshot's bounds
    pub fn normalize(&self, front: &[Vec<f64>]) -> Front {
        normalize_front(front, &self.ideal, &self.nadir)
    }
}

/// Best-known approximation of one training problem's Pareto front
pub trait ReferenceFront: Send + Sync {
    /// Insert every vector; dominated and duplicate newcomers are dropped
    fn update(&self, front: &[Vec<f64>]);

    fn snapshot(&self) -> Result<FrontSnapshot>;

    /// `update` followed by `snapshot` inside one critical section
    fn update_and_snapshot(&self, front: &[Vec<f64>]) -> Result<FrontSnapshot>;

    fn state(&self) -> TrackerState;

    fn normalized_front(&self) -> Result<Front> {
        Ok(self.snapshot()?.normalized_front())
    }

    /// Independent deep copy
    fn fork(&self) -> Arc<dyn ReferenceFront>;
}

#[derive(Debug, Clone, Default)]
struct TrackedFront {
    archive: Front,
    ideal: Vec<f64>,
    nadir: Vec<f64>,
}

impl TrackedFront {
    fn insert(&mut self, front: &[Vec<f64>]) {
        for point in front {
            if self.ideal.is_empty() {
                self.ideal = point.clone();
                self.nadir = point.clone();
            } else {
                extend_bounds(&mut self.ideal, &mut self.nadir, point);
            }
            insert_non_dominated(&mut self.archive, point.clone(), |p| p.as_slice());
        }
    }

    fn snapshot(&self) -> Result<FrontSnapshot> {
        if self.archive.is_empty() {
            return Err(MetaError::Computation(
                "reference front has not been populated".to_string(),
            ));
        }
        Ok(FrontSnapshot {
            front: self.archive.clone(),
            ideal: self.ideal.clone(),
            nadir: self.nadir.clone(),
        })
    }
}

/// Tracker grown from every result front it sees. Archive and bounds sit
/// behind one mutex so readers never observe them out of step.
#[derive(Debug, Default)]
pub struct DynamicReferenceFront {
    inner: Mutex<TrackedFront>,
}

impl DynamicReferenceFront {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TrackedFront> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ReferenceFront for DynamicReferenceFront {
    fn update(&self, front: &[Vec<f64>]) {
        self.lock().insert(front);
    }

    fn snapshot(&self) -> Result<FrontSnapshot> {
        self.lock().snapshot()
    }

    fn update_and_snapshot(&self, front: &[Vec<f64>]) -> Result<FrontSnapshot> {
        let mut tracked = self.lock();
        tracked.insert(front);
        tracked.snapshot()
    }

    fn state(&self) -> TrackerState {
        if self.lock().archive.is_empty() {
            TrackerState::Empty
        } else {
            TrackerState::Populated
        }
    }

    fn fork(&self) -> Arc<dyn ReferenceFront> {
        Arc::new(Self {
            inner: Mutex::new(self.lock().clone()),
        })
    }
}

/// Fixed front loaded once from a file; updates are ignored
#[derive(Debug, Clone)]
pub struct FileReferenceFront {
    snapshot: FrontSnapshot,
}

impl FileReferenceFront {
    pub fn new(front: Front) -> Result<Self> {
        let (ideal, nadir) = bounds_of(&front).ok_or_else(|| {
            MetaError::Configuration("reference front file contains no points".to_string())
        })?;
        Ok(Self {
            snapshot: FrontSnapshot {
                front,
                ideal,
                nadir,
            },
        })
    }

    pub fn load<P: AsRef<Path>>(path: P, separator: u8) -> Result<Self> {
        let front = CsvConnector::load_front(&path, separator)?;
        log::info!(
            "Loaded reference front with {} points from {}",
            front.len(),
            path.as_ref().display()
        );
        Self::new(front)
    }
}

impl ReferenceFront for FileReferenceFront {
    fn update(&self, _front: &[Vec<f64>]) {}

    fn snapshot(&self) -> Result<FrontSnapshot> {
        Ok(self.snapshot.clone())
    }

    fn update_and_snapshot(&self, _front: &[Vec<f64>]) -> Result<FrontSnapshot> {
        self.snapshot()
    }

    fn state(&self) -> TrackerState {
        TrackerState::Populated
    }

    fn fork(&self) -> Arc<dyn ReferenceFront> {
        Arc::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::pareto::dominates;
    use std::thread;

    #[test]
    fn test_empty_tracker() {
        let tracker = DynamicReferenceFront::new();
        assert_eq!(tracker.state(), TrackerState::Empty);
        assert!(tracker.normalized_front().is_err());
    }

    #[test]
    fn test_update_keeps_non_dominated_and_widens_bounds() {
        let tracker = DynamicReferenceFront::new();
        tracker.update(&[vec![2.0, 2.0], vec![1.0, 3.0]]);
        tracker.update(&[vec![3.0, 3.0], vec![0.5, 4.0]]);

        let snapshot = tracker.snapshot().unwrap();
        assert_eq!(tracker.state(), TrackerState::Populated);
        assert_eq!(snapshot.front.len(), 3);
        assert!(!snapshot.front.contains(&vec![3.0, 3.0]));
        // bounds cover every vector ever seen, dominated ones included
        assert_eq!(snapshot.ideal, vec![0.5, 2.0]);
        assert_eq!(snapshot.nadir, vec![3.0, 4.0]);

        let normalized = tracker.normalized_front().unwrap();
        assert!(normalized
            .iter()
            .flatten()
            .all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_fork_is_independent() {
        let tracker = DynamicReferenceFront::new();
        tracker.update(&[vec![1.0, 1.0]]);

        let fork = tracker.fork();
        fork.update(&[vec![0.0, 0.0]]);

        assert_eq!(tracker.snapshot().unwrap().front, vec![vec![1.0, 1.0]]);
        assert_eq!(fork.snapshot().unwrap().front, vec![vec![0.0, 0.0]]);
    }

    #[test]
    fn test_concurrent_updates_stay_consistent() {
        let tracker = Arc::new(DynamicReferenceFront::new());

        thread::scope(|scope| {
            for t in 0..4 {
                let tracker = Arc::clone(&tracker);
                scope.spawn(move || {
                    for i in 0..50 {
                        let x = (t * 50 + i) as f64 / 200.0;
                        let snapshot = tracker.update_and_snapshot(&[vec![x, 1.0 - x]]).unwrap();
                        assert!(snapshot.ideal.iter().zip(&snapshot.nadir).all(|(lo, hi)| lo <= hi));
                    }
                });
            }
        });

        let front = tracker.snapshot().unwrap().front;
        assert_eq!(front.len(), 200);
        for a in &front {
            for b in &front {
                assert!(!dominates(a, b));
            }
        }
    }

    #[test]
    fn test_file_front_ignores_updates() {
        let tracker = FileReferenceFront::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        tracker.update(&[vec![-1.0, -1.0]]);

        let snapshot = tracker.snapshot().unwrap();
        assert_eq!(snapshot.front.len(), 2);
        assert_eq!(snapshot.ideal, vec![0.0, 0.0]);
        assert!(FileReferenceFront::new(Vec::new()).is_err());
    }
}
