use crate::domain::models::PollingConfig;
use std::fmt;
use std::time::Duration;

/// Failure of a poll sequence.
///
/// `Attempt` is the untouched error of the single attempt made when polling is
/// disabled. `Exhausted` means every attempt of an enabled budget failed; it keeps
/// the last error as its source.
#[derive(Debug)]
pub enum PollError<E> {
    Attempt(E),
    Exhausted { attempts: u32, last: E },
}

impl<E: fmt::Display> fmt::Display for PollError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollError::Attempt(e) => e.fmt(f),
            PollError::Exhausted { attempts, last } => {
                write!(f, "gave up after {attempts} attempts: {last}")
            }
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for PollError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PollError::Attempt(e) => e.source(),
            PollError::Exhausted { last, .. } => Some(last),
        }
    }
}

/// Blocking wait used between attempts outside of tests.
pub fn thread_sleep(d: Duration) {
    std::thread::sleep(d);
}

/// Runs `attempt` until it succeeds or the budget in `config` is spent.
///
/// Every failure kind counts against the budget; none aborts early. `sleep` is
/// called between attempts, never after the last one.
pub fn poll<T, E, A, S>(config: &PollingConfig, mut sleep: S, mut attempt: A) -> Result<T, PollError<E>>
where
    A: FnMut() -> Result<T, E>,
    S: FnMut(Duration),
    E: fmt::Display,
{
    if !config.enabled {
        return attempt().map_err(PollError::Attempt);
    }

    let budget = config.budget();
    let mut n = 1;
    loop {
        match attempt() {
            Ok(value) => {
                tracing::debug!(attempt = n, budget, "poll succeeded");
                return Ok(value);
            }
            Err(last) if n >= budget => {
                tracing::warn!(attempts = budget, error = %last, "poll budget exhausted");
                return Err(PollError::Exhausted {
                    attempts: budget,
                    last,
                });
            }
            Err(e) => {
                tracing::info!(
                    attempt = n,
                    budget,
                    wait_s = config.interval_seconds,
                    error = %e,
                    "attempt failed, retrying"
                );
                sleep(config.interval());
                n += 1;
            }
        }
    }
}
