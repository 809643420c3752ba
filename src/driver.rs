//! Frame driver
//!
//! Turns display-rate frame callbacks into fixed `SIM_DT` ticks using an
//! accumulator, presents once per callback, and keeps at most one frame
//! request outstanding. Scheduling stops when the game reports it is finished
//! and for good after `teardown`.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Platform hook that calls `FrameDriver::on_frame` later
/// (`requestAnimationFrame` in the browser)
pub trait FrameScheduler {
    type Handle;

    /// Ask for one frame callback; None if the platform refused
    fn request_frame(&mut self) -> Option<Self::Handle>;

    /// Cancel a request made by `request_frame`
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Something the driver can tick and present
pub trait Steppable {
    /// Advance one fixed timestep
    fn step(&mut self);
    /// Hand the current state to the render sink
    fn present(&mut self);
    /// True once no further ticks should run
    fn is_finished(&self) -> bool;
}

/// Fixed timestep frame driver
pub struct FrameDriver<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
    accumulator: f32,
    last_time: Option<f64>,
    torn_down: bool,
}

impl<S: FrameScheduler> FrameDriver<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            accumulator: 0.0,
            last_time: None,
            torn_down: false,
        }
    }

    /// Begin (or resume) scheduling frames. No-op if already scheduled or torn down.
    pub fn start(&mut self) {
        if self.torn_down || self.pending.is_some() {
            return;
        }
        self.accumulator = 0.0;
        self.last_time = None;
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("Frame request refused; driver idle");
        }
    }

    /// Frame callback. Runs due ticks, presents, and requests the next frame
    /// unless the game is finished. Returns the number of ticks run.
    pub fn on_frame(&mut self, now_ms: f64, game: &mut impl Steppable) -> u32 {
        if self.torn_down {
            return 0;
        }
        self.pending = None;

        let dt = match self.last_time {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => SIM_DT,
        };
        self.last_time = Some(now_ms);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS && !game.is_finished() {
            game.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        game.present();

        if game.is_finished() {
            log::info!("Game finished; frame driver stopped");
            self.accumulator = 0.0;
            self.last_time = None;
        } else {
            self.pending = self.scheduler.request_frame();
        }
        substeps
    }

    /// True while a frame request is outstanding
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Cancel any outstanding frame and refuse all further work. Idempotent.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        if !self.torn_down {
            log::info!("Frame driver torn down");
        }
        self.torn_down = true;
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records requests/cancellations instead of talking to a platform
    #[derive(Default)]
    struct Recorder {
        next: u32,
        requested: Vec<u32>,
        cancelled: Vec<u32>,
    }

    impl FrameScheduler for Recorder {
        type Handle = u32;

        fn request_frame(&mut self) -> Option<u32> {
            self.next += 1;
            self.requested.push(self.next);
            Some(self.next)
        }

        fn cancel_frame(&mut self, handle: u32) {
            self.cancelled.push(handle);
        }
    }

    /// Finishes after `limit` steps
    #[derive(Default)]
    struct Counter {
        steps: u32,
        presents: u32,
        limit: Option<u32>,
    }

    impl Steppable for Counter {
        fn step(&mut self) {
            self.steps += 1;
        }

        fn present(&mut self) {
            self.presents += 1;
        }

        fn is_finished(&self) -> bool {
            self.limit.is_some_and(|l| self.steps >= l)
        }
    }

    #[test]
    fn test_start_requests_one_frame() {
        let mut driver = FrameDriver::new(Recorder::default());
        driver.start();
        driver.start();
        assert!(driver.is_scheduled());
        assert_eq!(driver.scheduler().requested, vec![1]);
    }

    #[test]
    fn test_fixed_steps_from_variable_frames() {
        let mut driver = FrameDriver::new(Recorder::default());
        let mut game = Counter::default();
        driver.start();

        // First frame always runs one tick
        assert_eq!(driver.on_frame(1000.0, &mut game), 1);
        // 60 ms later: two 30 ms ticks
        assert_eq!(driver.on_frame(1060.0, &mut game), 2);
        // 10 ms later: nothing due yet, still presents
        assert_eq!(driver.on_frame(1070.0, &mut game), 0);
        assert_eq!(game.steps, 3);
        assert_eq!(game.presents, 3);
        assert!(driver.is_scheduled());
    }

    #[test]
    fn test_long_gap_is_capped() {
        let mut driver = FrameDriver::new(Recorder::default());
        let mut game = Counter::default();
        driver.start();
        driver.on_frame(0.0, &mut game);
        assert_eq!(driver.on_frame(10_000.0, &mut game), MAX_SUBSTEPS);
    }

    #[test]
    fn test_stops_when_finished() {
        let mut driver = FrameDriver::new(Recorder::default());
        let mut game = Counter {
            limit: Some(2),
            ..Default::default()
        };
        driver.start();
        driver.on_frame(0.0, &mut game);
        driver.on_frame(100.0, &mut game);

        // Exactly the limit, no ticks after finishing
        assert_eq!(game.steps, 2);
        assert!(!driver.is_scheduled());

        // A new game resumes scheduling
        game.limit = None;
        driver.start();
        assert!(driver.is_scheduled());
    }

    #[test]
    fn test_teardown_cancels_and_is_idempotent() {
        let mut driver = FrameDriver::new(Recorder::default());
        let mut game = Counter::default();
        driver.start();
        driver.on_frame(0.0, &mut game);

        driver.teardown();
        driver.teardown();
        assert_eq!(driver.scheduler().cancelled, vec![2]);
        assert!(!driver.is_scheduled());

        // A late callback does nothing
        assert_eq!(driver.on_frame(30.0, &mut game), 0);
        assert_eq!(game.steps, 1);
        assert_eq!(game.presents, 1);

        driver.start();
        assert!(!driver.is_scheduled());
    }
}
