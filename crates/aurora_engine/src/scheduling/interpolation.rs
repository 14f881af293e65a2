//! Linear tweens advanced once per tick
//!
//! The manager never holds references into the objects it animates. Each
//! tween carries a copyable target key, and [`InterpolationManager::process_interpolation`]
//! hands `(target, value)` pairs to a writer closure supplied by the owner
//! of the real data.

use std::collections::HashSet;
use std::fmt;

use crate::foundation::math::utils;

/// Handle to a running or completed tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenHandle(u64);

/// What happens when a tween completes
enum Waiter {
    None,
    Callback(Box<dyn FnOnce(f32)>),
    Wake,
}

impl fmt::Debug for Waiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Callback(_) => f.write_str("Callback"),
            Self::Wake => f.write_str("Wake"),
        }
    }
}

#[derive(Debug)]
struct Tween<T> {
    handle: TweenHandle,
    target: T,
    start: f32,
    end: f32,
    elapsed: f32,
    duration: f32,
    waiter: Waiter,
}

impl<T> Tween<T> {
    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    fn value(&self) -> f32 {
        utils::lerp(self.start, self.end, self.progress())
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Set of active linear tweens over targets of type `T`
#[derive(Debug)]
pub struct InterpolationManager<T> {
    tweens: Vec<Tween<T>>,
    completed: HashSet<TweenHandle>,
    next_handle: u64,
}

impl<T> Default for InterpolationManager<T> {
    fn default() -> Self {
        Self {
            tweens: Vec::new(),
            completed: HashSet::new(),
            next_handle: 0,
        }
    }
}

impl<T: Copy> InterpolationManager<T> {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, duration: f32, target: T, start: f32, end: f32, waiter: Waiter) -> TweenHandle {
        let handle = TweenHandle(self.next_handle);
        self.next_handle += 1;
        self.tweens.push(Tween {
            handle,
            target,
            start,
            end,
            elapsed: 0.0,
            duration,
            waiter,
        });
        handle
    }

    /// Start a tween nobody waits on
    pub fn interpolate_linear(&mut self, duration: f32, target: T, start: f32, end: f32) -> TweenHandle {
        self.push(duration, target, start, end, Waiter::None)
    }

    /// Start a tween and call `on_complete` with the final value
    pub fn interpolate_linear_then(
        &mut self,
        duration: f32,
        target: T,
        start: f32,
        end: f32,
        on_complete: impl FnOnce(f32) + 'static,
    ) -> TweenHandle {
        self.push(duration, target, start, end, Waiter::Callback(Box::new(on_complete)))
    }

    /// Start a tween whose completion is polled with
    /// [`InterpolationManager::take_completed`]
    pub fn interpolate_linear_wait(&mut self, duration: f32, target: T, start: f32, end: f32) -> TweenHandle {
        self.push(duration, target, start, end, Waiter::Wake)
    }

    /// Advance every tween by `dt` and write the new values.
    ///
    /// Finished tweens write exactly `end`, are removed and signal their
    /// waiter before this returns. Returns the number of tweens that
    /// completed.
    pub fn process_interpolation(&mut self, dt: f32, mut write: impl FnMut(T, f32)) -> usize {
        let mut finished = Vec::new();

        self.tweens.retain_mut(|tween| {
            tween.elapsed += dt;
            if tween.is_finished() {
                write(tween.target, tween.end);
                finished.push((tween.handle, tween.end, std::mem::replace(&mut tween.waiter, Waiter::None)));
                false
            } else {
                write(tween.target, tween.value());
                true
            }
        });

        let count = finished.len();
        for (handle, value, waiter) in finished {
            match waiter {
                Waiter::None => {}
                Waiter::Callback(callback) => callback(value),
                Waiter::Wake => {
                    self.completed.insert(handle);
                }
            }
        }
        count
    }

    /// Consume the completion of a waited tween. Returns `true` once.
    pub fn take_completed(&mut self, handle: TweenHandle) -> bool {
        self.completed.remove(&handle)
    }

    /// Whether the tween is still running
    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.tweens.iter().any(|tween| tween.handle == handle)
    }

    /// Current value of a running tween
    pub fn value(&self, handle: TweenHandle) -> Option<f32> {
        self.tweens
            .iter()
            .find(|tween| tween.handle == handle)
            .map(Tween::value)
    }

    /// Stop a tween without completing it. Its target keeps the last
    /// written value and no waiter is signalled.
    ///
    /// Also drops an unconsumed completion. Returns `true` if anything was
    /// removed.
    pub fn cancel(&mut self, handle: TweenHandle) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|tween| tween.handle != handle);
        let running = self.tweens.len() != before;
        let unconsumed = self.completed.remove(&handle);
        running || unconsumed
    }

    /// Stop every tween writing to targets matching `predicate`
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|tween| !predicate(&tween.target));
        before - self.tweens.len()
    }

    /// Number of running tweens
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether no tweens are running
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
