use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{EngineError, EngineResult};

/// Guards against stale dashboard recomputes.
///
/// Every recompute begins by stamping itself with the next generation
/// number. When it finishes it offers its result back through
/// [`RecomputeGate::accept`]; if a newer recompute has begun in the
/// meantime the result is rejected, so a slow run started under old
/// filters can never overwrite the output of a newer one.
#[derive(Debug, Default)]
pub struct RecomputeGate {
    generation: AtomicU64,
}

impl RecomputeGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new recompute, invalidating all in-flight ones. Returns
    /// the generation stamp the caller must present to `accept`.
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The generation of the most recently started recompute.
    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Accept a finished recompute's result, or reject it as superseded
    /// if a newer recompute has begun since `stamp` was issued.
    pub fn accept<T>(&self, stamp: u64, result: T) -> EngineResult<T> {
        let current = self.current();
        if stamp == current {
            Ok(result)
        } else {
            Err(EngineError::Superseded { stale: stamp, current })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_latest_generation() {
        let gate = RecomputeGate::new();
        let stamp = gate.begin();
        assert_eq!(gate.accept(stamp, 42).unwrap(), 42);
    }

    #[test]
    fn rejects_superseded_generation() {
        let gate = RecomputeGate::new();
        let old = gate.begin();
        let new = gate.begin();
        let err = gate.accept(old, ()).unwrap_err();
        match err {
            EngineError::Superseded { stale, current } => {
                assert_eq!(stale, old);
                assert_eq!(current, new);
            }
            other => panic!("unexpected error: {other}"),
        }
        // The newer run still lands.
        assert!(gate.accept(new, ()).is_ok());
    }

    #[test]
    fn generations_are_monotonic() {
        let gate = RecomputeGate::new();
        let a = gate.begin();
        let b = gate.begin();
        let c = gate.begin();
        assert!(a < b && b < c);
        assert_eq!(gate.current(), c);
    }
}
