//! Periodic background updates for a wrapped color.
//!
//! An [`AnimatedColor`] owns a color value and a transform. Once started, a
//! background thread applies the transform to the color every tick until the
//! animation is stopped.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread;
use std::time::Duration;

/// Default time between two updates.
pub const TICK_INTERVAL: Duration = Duration::from_millis(60);

/// Smallest interval accepted by [`AnimatedColor::with_interval`].
const MIN_INTERVAL: Duration = Duration::from_millis(1);

type Update<C> = dyn Fn(C) -> C + Send + Sync;

/// Clears the running flag if the loop thread unwinds out of a callback.
struct PanicGuard {
    running: Arc<AtomicBool>,
    generation: Arc<AtomicU64>,
    mine: u64,
}

impl Drop for PanicGuard {
    fn drop(&mut self) {
        if thread::panicking() && self.generation.load(Ordering::SeqCst) == self.mine {
            self.running.store(false, Ordering::SeqCst);
            tracing::warn!(
                generation = self.mine,
                "animation callback panicked, loop stopped"
            );
        }
    }
}

/// A color updated on a fixed interval by a background thread.
pub struct AnimatedColor<C> {
    /// Shared color, written by the background thread.
    color: Arc<RwLock<C>>,
    /// Transform applied on every tick.
    update: Arc<Update<C>>,
    /// Flag polled by the background thread.
    running: Arc<AtomicBool>,
    /// Bumped on every effective start so stale loops exit.
    generation: Arc<AtomicU64>,
    /// Time between two updates.
    interval: Duration,
}

impl<C> AnimatedColor<C>
where
    C: Clone + Send + Sync + 'static,
{
    /// Wrap `color`; `update` maps the current color to the next one.
    pub fn new<F>(color: C, update: F) -> Self
    where
        F: Fn(C) -> C + Send + Sync + 'static,
    {
        Self {
            color: Arc::new(RwLock::new(color)),
            update: Arc::new(update),
            running: Arc::new(AtomicBool::new(false)),
            generation: Arc::new(AtomicU64::new(0)),
            interval: TICK_INTERVAL,
        }
    }

    /// Use a custom tick interval instead of [`TICK_INTERVAL`].
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_INTERVAL);
        self
    }

    /// Start the background update thread. Does nothing if already running.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            return; // Already running
        }
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let color = self.color.clone();
        let update = self.update.clone();
        let running = self.running.clone();
        let generation = self.generation.clone();
        let interval = self.interval;

        tracing::debug!(generation = my_generation, ?interval, "animation started");

        thread::spawn(move || {
            let _guard = PanicGuard {
                running: running.clone(),
                generation: generation.clone(),
                mine: my_generation,
            };
            loop {
                thread::sleep(interval);

                if !running.load(Ordering::SeqCst)
                    || generation.load(Ordering::SeqCst) != my_generation
                {
                    break;
                }

                let mut current = color.write().unwrap_or_else(PoisonError::into_inner);
                *current = update(current.clone());
                tracing::trace!(generation = my_generation, "animation tick");
            }
            tracing::debug!(generation = my_generation, "animation loop exited");
        });
    }

    /// Ask the background thread to stop.
    ///
    /// The thread notices at its next tick, so one more update may still
    /// land after this returns.
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            tracing::debug!("animation stopped");
        }
    }

    /// Whether the background thread is (still) meant to be ticking.
    ///
    /// Turns false after [`stop`](Self::stop), on drop, or once the update
    /// callback panics.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Snapshot of the current color.
    pub fn color(&self) -> C {
        self.color
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current color; a running animation continues from it.
    pub fn set_color(&self, c: C) {
        *self.color.write().unwrap_or_else(PoisonError::into_inner) = c;
    }

    /// Apply `f` to the current color under the same lock the ticks use.
    pub fn modify(&self, f: impl FnOnce(C) -> C) {
        let mut current = self.color.write().unwrap_or_else(PoisonError::into_inner);
        *current = f(current.clone());
    }

    /// Time between two updates.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl<C> Drop for AnimatedColor<C> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

impl<C: std::fmt::Debug> std::fmt::Debug for AnimatedColor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedColor")
            .field("color", &self.color)
            .field("running", &self.running.load(Ordering::SeqCst))
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}
