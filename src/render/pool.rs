use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::foundation::error::MemeResult;
use crate::render::cpu::Compositor;
use crate::render::encode::RenderedImage;

type CompositorFactory = Box<dyn Fn() -> MemeResult<Compositor> + Send + Sync>;

/// Bounded pool of idle compositors.
///
/// Every render checks out a compositor of its own, so renders for different memes never wait on
/// each other. The pool lock is held only to push or pop, never while drawing. A compositor lost
/// to a panicking render is simply not returned; the next checkout builds a fresh one.
pub struct CompositorPool {
    make: CompositorFactory,
    idle: Mutex<Vec<Compositor>>,
    max_idle: usize,
    built: AtomicU64,
}

impl CompositorPool {
    /// Create a pool retaining at most `max_idle` compositors.
    ///
    /// One compositor is built up front so font or style problems surface here instead of on the
    /// first render.
    pub fn new<F>(max_idle: usize, make: F) -> MemeResult<Self>
    where
        F: Fn() -> MemeResult<Compositor> + Send + Sync + 'static,
    {
        let first = make()?;
        Ok(Self {
            make: Box::new(make),
            idle: Mutex::new(vec![first]),
            max_idle: max_idle.max(1),
            built: AtomicU64::new(1),
        })
    }

    /// Take an idle compositor, building one when none is free.
    pub fn checkout(&self) -> MemeResult<Compositor> {
        if let Some(c) = self.lock_idle().pop() {
            return Ok(c);
        }
        let c = (self.make)()?;
        self.built.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(built = self.built(), "compositor pool grew");
        Ok(c)
    }

    /// Return a compositor. Dropped when the pool already retains `max_idle`.
    pub fn release(&self, compositor: Compositor) {
        let mut idle = self.lock_idle();
        if idle.len() < self.max_idle {
            idle.push(compositor);
        }
    }

    /// Render with a pooled compositor. See [`Compositor::render_png`].
    pub fn render_png(
        &self,
        template_bytes: &[u8],
        top_text: &str,
        bottom_text: &str,
    ) -> MemeResult<RenderedImage> {
        let mut compositor = self.checkout()?;
        let out = compositor.render_png(template_bytes, top_text, bottom_text);
        self.release(compositor);
        out
    }

    /// Compositors built over the pool's lifetime.
    pub fn built(&self) -> u64 {
        self.built.load(Ordering::Relaxed)
    }

    /// Compositors currently idle.
    pub fn idle(&self) -> usize {
        self.lock_idle().len()
    }

    // Poisoning cannot leave the list inconsistent: it is only pushed and popped.
    fn lock_idle(&self) -> std::sync::MutexGuard<'_, Vec<Compositor>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pool.rs"]
mod tests;
