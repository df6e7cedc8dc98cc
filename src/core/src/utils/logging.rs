use log::debug;
use std::time::Instant;

pub struct Logging;

impl Logging {
    pub fn estimate_result<T, F: FnOnce() -> T>(action: F, message: &str) -> T {
        let now = Instant::now();

        let result = action();

        debug!("{}, {} ms", message, now.elapsed().as_millis());

        result
    }
}

pub struct TimeEstimation;

impl TimeEstimation {
    /// Runs `action` and returns its result together with the elapsed milliseconds.
    pub fn estimate<T, F: FnOnce() -> T>(action: F) -> (T, u128) {
        let now = Instant::now();

        let result = action();

        (result, now.elapsed().as_millis())
    }
}
