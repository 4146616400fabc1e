//! Exhaustive search for combinations that land on a target seed.
//!
//! Key points:
//! - Iterative depth-first traversal over an explicit frame stack, so only
//!   `length + 1` configurations are alive at once
//! - Each child configuration extends its parent's by a single move
//! - Moves are tried Up, Left, Down, Right at every branch, so results come
//!   out in a fixed, reproducible order
//! - Every internal node is a checkpoint where a cooperative search can hand
//!   control back to its executor and where cancellation is observed

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use crate::disk::{Combination, Direction, DiskConfiguration};
use crate::error::LockError;
use crate::fingerprint::{fingerprint, Seed};
use crate::transition::apply_move;

/// How long a cooperative search may run before it yields.
pub const DEFAULT_YIELD_THRESHOLD: Duration = Duration::from_millis(10);

/// Receives every full-length candidate, before it is checked.
pub trait CandidateObserver {
    fn on_candidate(&mut self, candidate: &Combination);
}

impl<F> CandidateObserver for F
where
    F: FnMut(&Combination),
{
    fn on_candidate(&mut self, candidate: &Combination) {
        self(candidate)
    }
}

/// Observer for callers that do not want progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl CandidateObserver for Silent {
    #[inline(always)]
    fn on_candidate(&mut self, _candidate: &Combination) {}
}

/// Shared flag that stops a running search at its next checkpoint.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Knobs for a search run.
#[derive(Clone, Debug)]
pub struct SearchOptions {
    /// Yield to the executor whenever `yield_threshold` has passed.
    pub cooperative: bool,
    pub yield_threshold: Duration,
    pub cancel: Option<CancelToken>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            cooperative: false,
            yield_threshold: DEFAULT_YIELD_THRESHOLD,
            cancel: None,
        }
    }
}

impl SearchOptions {
    pub fn with_cooperative(mut self, cooperative: bool) -> Self {
        self.cooperative = cooperative;
        self
    }

    pub fn with_yield_threshold(mut self, threshold: Duration) -> Self {
        self.yield_threshold = threshold;
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Timing for cooperative mode.
#[derive(Debug)]
struct Pacing {
    threshold: Duration,
    last_yield: Instant,
}

/// Per-invocation search state threaded through the traversal.
///
/// Holds the time of the last yield, so two searches never share a clock.
#[derive(Debug)]
pub struct SearchContext {
    pacing: Option<Pacing>,
    cancel: Option<CancelToken>,
    yields: u64,
}

impl SearchContext {
    /// Starts the yield clock now when `options.cooperative` is set.
    pub fn new(options: &SearchOptions) -> SearchContext {
        SearchContext {
            pacing: options.cooperative.then(|| Pacing {
                threshold: options.yield_threshold,
                last_yield: Instant::now(),
            }),
            cancel: options.cancel.clone(),
            yields: 0,
        }
    }

    /// Number of times this search handed control back to its executor.
    pub fn yields(&self) -> u64 {
        self.yields
    }

    fn check_cancelled(&self) -> Result<(), LockError> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(LockError::Cancelled),
            _ => Ok(()),
        }
    }

    /// Called once per internal traversal node.
    pub async fn checkpoint(&mut self) -> Result<(), LockError> {
        self.check_cancelled()?;

        let Some(pacing) = self.pacing.as_mut() else {
            return Ok(());
        };
        let now = Instant::now();
        if now.duration_since(pacing.last_yield) > pacing.threshold {
            yield_now().await;
            pacing.last_yield = now;
            self.yields += 1;
            // the host may have cancelled while we were suspended
            self.check_cancelled()?;
        }
        Ok(())
    }
}

/// Future that is pending exactly once, waking itself before it returns.
///
/// Awaiting it lets the executor run whatever else is queued before the
/// search resumes.
#[derive(Debug, Default)]
#[must_use = "futures do nothing unless awaited"]
pub struct YieldNow {
    yielded: bool,
}

pub fn yield_now() -> YieldNow {
    YieldNow::default()
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            return Poll::Ready(());
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

/// One node on the traversal path.
struct Frame {
    /// Configuration reached by the path down to this node.
    config: DiskConfiguration,
    /// Index into `Direction::ALL` of the next child to visit.
    next_move: usize,
}

impl Frame {
    fn enter(config: DiskConfiguration) -> Frame {
        Frame {
            config,
            next_move: 0,
        }
    }
}

/// Finds every combination of exactly `length` moves whose seed is `target`.
///
/// All `4^length` candidates are visited and reported to `observer` in
/// enumeration order. Matches are returned in the same order.
pub async fn search_length<O>(
    length: usize,
    target: Seed,
    observer: &mut O,
    context: &mut SearchContext,
) -> Result<Vec<Combination>, LockError>
where
    O: CandidateObserver + ?Sized,
{
    let mut matches = Vec::new();
    let mut path = Combination::with_capacity(length);
    let mut stack = Vec::with_capacity(length + 1);
    stack.push(Frame::enter(DiskConfiguration::reset()));

    while let Some(frame) = stack.last_mut() {
        if path.len() == length {
            observer.on_candidate(&path);
            if fingerprint(&frame.config) == target {
                matches.push(path.clone());
            }
            stack.pop();
            path.pop();
            continue;
        }

        // first visit to an internal node
        if frame.next_move == 0 {
            context.checkpoint().await?;
        }

        let Some(&step) = Direction::ALL.get(frame.next_move) else {
            // all children explored; backtrack
            stack.pop();
            path.pop();
            continue;
        };
        frame.next_move += 1;

        let child = apply_move(frame.config, step);
        path.push(step);
        stack.push(Frame::enter(child));
    }

    log::trace!("length {length}: {} matches for seed {target}", matches.len());
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::Direction::*;

    fn run(length: usize, target: Seed, options: &SearchOptions) -> (Vec<Combination>, Vec<String>) {
        let mut seen = Vec::new();
        let mut observer = |candidate: &Combination| seen.push(candidate.to_string());
        let mut context = SearchContext::new(options);
        let matches =
            pollster::block_on(search_length(length, target, &mut observer, &mut context)).unwrap();
        (matches, seen)
    }

    fn seed_of(moves: &[Direction]) -> Seed {
        fingerprint(&DiskConfiguration::after(moves))
    }

    #[test]
    fn test_visits_every_candidate() {
        for length in 0..=6 {
            let (_, seen) = run(length, 0, &SearchOptions::default());
            assert_eq!(seen.len(), 4usize.pow(length as u32), "length {length}");
        }
    }

    #[test]
    fn test_enumeration_order() {
        let (_, seen) = run(2, 0, &SearchOptions::default());
        insta::assert_snapshot!(seen.join(" "), @"UU UL UD UR LU LL LD LR DU DL DD DR RU RL RD RR");
    }

    #[test]
    fn test_length_zero_checks_reset() {
        let reset = fingerprint(&DiskConfiguration::reset());
        let (matches, seen) = run(0, reset, &SearchOptions::default());
        assert_eq!(seen, vec![String::new()]);
        assert_eq!(matches, vec![Combination::new()]);

        let (matches, _) = run(0, reset + 1, &SearchOptions::default());
        assert!(matches.is_empty());
    }

    #[test]
    fn test_matches_agree_with_direct_application() {
        let target = seed_of(&[Up, Down, Up]);
        let mut expected = Vec::new();
        let mut collect = |candidate: &Combination| {
            if fingerprint(&DiskConfiguration::after(candidate)) == target {
                expected.push(candidate.clone());
            }
        };
        let mut context = SearchContext::new(&SearchOptions::default());
        let matches =
            pollster::block_on(search_length(4, target, &mut collect, &mut context)).unwrap();
        assert_eq!(matches, expected);
    }

    #[test]
    fn test_known_duplicates_of_udu() {
        let (matches, _) = run(4, seed_of(&[Up, Down, Up]), &SearchOptions::default());
        let rendered: Vec<String> = matches.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["UUDU", "UDUU", "UDDU"]);
    }

    #[test]
    fn test_matching_candidate_is_observed() {
        let target = seed_of(&[Up, Left]);
        let mut order = Vec::new();
        let mut observer = |candidate: &Combination| order.push(candidate.clone());
        let mut context = SearchContext::new(&SearchOptions::default());
        let matches =
            pollster::block_on(search_length(2, target, &mut observer, &mut context)).unwrap();
        assert_eq!(matches.len(), 1);
        assert!(order.contains(&matches[0]));
    }

    #[test]
    fn test_cooperative_mode_yields_without_changing_results() {
        let target = seed_of(&[Up, Down, Up]);
        let (plain, plain_seen) = run(5, target, &SearchOptions::default());

        let options = SearchOptions::default()
            .with_cooperative(true)
            .with_yield_threshold(Duration::ZERO);
        let mut seen = Vec::new();
        let mut observer = |candidate: &Combination| seen.push(candidate.to_string());
        let mut context = SearchContext::new(&options);
        let cooperative =
            pollster::block_on(search_length(5, target, &mut observer, &mut context)).unwrap();

        assert_eq!(cooperative, plain);
        assert_eq!(seen, plain_seen);
        assert!(context.yields() > 0, "zero threshold should force yields");
    }

    #[test]
    fn test_non_cooperative_never_yields() {
        let mut context = SearchContext::new(&SearchOptions::default());
        pollster::block_on(search_length(4, 0, &mut Silent, &mut context)).unwrap();
        assert_eq!(context.yields(), 0);
    }

    #[test]
    fn test_cancelled_search_stops() {
        let token = CancelToken::new();
        let options = SearchOptions::default().with_cancel(token.clone());
        let mut context = SearchContext::new(&options);
        let mut visited = 0;
        let mut observer = |_: &Combination| {
            visited += 1;
            if visited == 10 {
                token.cancel();
            }
        };
        let result = pollster::block_on(search_length(4, 0, &mut observer, &mut context));
        assert_eq!(result, Err(LockError::Cancelled));
        assert!(visited < 4usize.pow(4));
    }

    /// Waker that ignores wake-ups, for polling futures by hand.
    struct IdleWaker;

    impl std::task::Wake for IdleWaker {
        fn wake(self: Arc<Self>) {}
    }

    fn idle_waker() -> std::task::Waker {
        std::task::Waker::from(Arc::new(IdleWaker))
    }

    #[test]
    fn test_yield_now_is_pending_once() {
        let waker = idle_waker();
        let mut cx = Context::from_waker(&waker);
        let mut future = yield_now();
        assert_eq!(Pin::new(&mut future).poll(&mut cx), Poll::Pending);
        assert_eq!(Pin::new(&mut future).poll(&mut cx), Poll::Ready(()));
    }

    #[test]
    fn test_cooperative_search_suspends_at_every_internal_node() {
        let target = seed_of(&[Up, Down, Up]);
        let (plain, _) = run(3, target, &SearchOptions::default());

        let options = SearchOptions::default()
            .with_cooperative(true)
            .with_yield_threshold(Duration::ZERO);
        let mut context = SearchContext::new(&options);
        let mut observer = Silent;
        let waker = idle_waker();
        let mut cx = Context::from_waker(&waker);
        let mut search = Box::pin(search_length(3, target, &mut observer, &mut context));

        let mut pending = 0;
        let matches = loop {
            match search.as_mut().poll(&mut cx) {
                Poll::Pending => pending += 1,
                Poll::Ready(result) => break result.unwrap(),
            }
        };
        drop(search);

        // root, 4 children and 16 grandchildren
        assert_eq!(pending, 1 + 4 + 16);
        assert_eq!(context.yields(), pending);
        assert_eq!(matches, plain);
    }

    #[test]
    fn test_yield_now_completes() {
        pollster::block_on(async {
            yield_now().await;
            yield_now().await;
        });
    }
}
