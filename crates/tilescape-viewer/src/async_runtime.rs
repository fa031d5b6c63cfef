//! Task spawning for background tile work.
//!
//! Tile fetching runs on the Tokio runtime (reqwest requires it); this
//! wraps `bevy_tokio_tasks` in a `SystemParam` so systems spawn work without
//! touching the runtime resource directly.

use std::future::Future;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

/// A system parameter for spawning background async tasks.
#[derive(SystemParam)]
pub struct TaskSpawner<'w> {
    runtime: Res<'w, bevy_tokio_tasks::TokioTasksRuntime>,
}

impl TaskSpawner<'_> {
    /// Spawn a background task that runs to completion.
    ///
    /// The future returns `()`; tasks deliver results back to the main
    /// thread over channels (e.g. `async_channel`).
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn_background_task(move |_ctx| future);
    }
}
