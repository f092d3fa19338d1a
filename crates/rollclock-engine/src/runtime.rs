use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::MissedTickBehavior;

use crate::core::{App, AppControl, FrameCtx, SyncStatus};
use crate::render::Surface;
use crate::scene::DrawList;
use crate::sync::{DEFAULT_SYNC_INTERVAL, ReferenceClock, SyncTask};
use crate::time::{FrameClock, TimeSource};

/// Frame loop configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Target spacing of frames. Late frames are skipped, never queued.
    pub frame_interval: Duration,
    /// Spacing of periodic time syncs.
    pub sync_interval: Duration,
    /// Stop the run on Ctrl-C.
    pub exit_on_interrupt: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "rollclock".to_string(),
            frame_interval: Duration::from_micros(16_667),
            sync_interval: DEFAULT_SYNC_INTERVAL,
            exit_on_interrupt: true,
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current frame returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    /// Unmounts the view after this frame.
    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    /// Asks the sync task for an immediate attempt.
    pub fn request_resync(&mut self) {
        self.commands.push(Command::Resync);
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Command {
    Exit,
    Resync,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Builds a single-threaded tokio runtime and mounts `app` until it exits.
    pub fn run<A, S, R>(
        config: RuntimeConfig,
        source: TimeSource,
        reference: Option<R>,
        mut surface: S,
        mut app: A,
    ) -> Result<()>
    where
        A: App,
        S: Surface,
        R: ReferenceClock,
    {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to build tokio runtime")?;

        rt.block_on(Self::mount(&config, source, reference, &mut surface, &mut app))
    }

    /// Drives the frame loop on the current runtime.
    ///
    /// While mounted, a frame is produced every `frame_interval` and, when a
    /// reference clock is given, a [`SyncTask`] keeps the offset fresh. Both are
    /// torn down before this returns, whatever ended the run.
    pub async fn mount<A, S, R>(
        config: &RuntimeConfig,
        source: TimeSource,
        reference: Option<R>,
        surface: &mut S,
        app: &mut A,
    ) -> Result<()>
    where
        A: App,
        S: Surface,
        R: ReferenceClock,
    {
        log::info!("mounting {}", config.title);

        let sync_task = reference.map(|r| SyncTask::spawn(source.clone(), r, config.sync_interval));

        let result = tokio::select! {
            r = frame_loop(config, &source, sync_task.as_ref(), surface, app) => r,
            signal = tokio::signal::ctrl_c(), if config.exit_on_interrupt => {
                signal
                    .context("failed to listen for Ctrl-C")
                    .map(|()| log::info!("interrupted"))
            }
        };

        drop(sync_task);
        app.on_unmount();

        let released = surface.release().context("failed to release surface");
        log::info!("unmounted {}", config.title);

        result.and(released)
    }
}

async fn frame_loop<A, S>(
    config: &RuntimeConfig,
    source: &TimeSource,
    sync_task: Option<&SyncTask>,
    surface: &mut S,
    app: &mut A,
) -> Result<()>
where
    A: App,
    S: Surface,
{
    let mut ticker = tokio::time::interval(config.frame_interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut clock = FrameClock::new();
    let mut draw_list = DrawList::new();

    loop {
        ticker.tick().await;

        let mut runtime_ctx = RuntimeCtx::default();

        // Scope to ensure `ctx` is dropped before draining commands.
        let control = {
            let mut ctx = FrameCtx {
                time: clock.tick(source),
                sync: SyncStatus {
                    synced: source.is_synced(),
                    offset: source.offset(),
                },
                runtime: &mut runtime_ctx,
                draw_list: &mut draw_list,
                surface: &mut *surface,
            };

            app.on_frame(&mut ctx)
        };

        if control == AppControl::Exit {
            runtime_ctx.exit();
        }

        for cmd in runtime_ctx.commands.drain(..) {
            match cmd {
                Command::Exit => return Ok(()),
                Command::Resync => match sync_task {
                    Some(task) => task.trigger(),
                    None => log::debug!("resync requested without a reference clock"),
                },
            }
        }
    }
}
