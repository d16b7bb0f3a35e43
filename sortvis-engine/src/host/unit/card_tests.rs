// Unit tests for SortCard: generation, single-run exclusion, cleanup on
// failure, density sync, live speed changes.

use super::*;
use crate::host::MockSurface;

fn card_with(key: AlgorithmKey, surface: Arc<MockSurface>) -> (Arc<SortCard>, Arc<SortingSettings>) {
    let settings = Arc::new(SortingSettings::default());
    let card = SortCard::new(key, Arc::clone(&settings), surface).with_seed(7);
    (Arc::new(card), settings)
}

fn is_sorted(values: &[u32]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

async fn wait_until_sorting(card: &SortCard) {
    for _ in 0..100 {
        if card.is_sorting() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("{} never started sorting", card.key());
}

#[test]
fn test_refresh_before_surface_ready_is_noop() {
    let surface = Arc::new(MockSurface::new());
    let (card, _) = card_with(AlgorithmKey::QuickSort, Arc::clone(&surface));

    assert_eq!(card.refresh().unwrap(), RefreshOutcome::SurfaceNotReady);
    assert!(card.bar_values().is_empty());
    assert_eq!(surface.draw_count(), 0);

    surface.set_size(Some(SurfaceSize::new(300, 260)));
    assert_eq!(card.refresh().unwrap(), RefreshOutcome::Regenerated);
    assert_eq!(surface.draw_count(), 1);
}

#[test]
fn test_generated_bars_fit_surface() {
    let surface = Arc::new(MockSurface::ready(300, 260));
    let (card, _) = card_with(AlgorithmKey::ShellSort, Arc::clone(&surface));
    card.refresh().unwrap();

    // x = 2, 10, ..., 298
    let bars = card.bar_values();
    assert_eq!(bars.len(), 38);
    assert!(bars.iter().all(|h| (130..258).contains(h)));

    let (drawn, layout) = surface.last_frame().unwrap();
    assert_eq!(drawn, bars);
    assert_eq!(layout.spacing, 8);
    assert_eq!(layout.padding, 2);
    assert_eq!(layout.line_width, 2.0);
}

#[test]
fn test_narrow_surface_uses_min_width() {
    let surface = Arc::new(MockSurface::ready(120, 40));
    let (card, _) = card_with(AlgorithmKey::ShellSort, Arc::clone(&surface));
    card.refresh().unwrap();

    assert_eq!(card.bar_values().len(), 38);
    assert_eq!(surface.last_frame().unwrap().1.width, 300);
}

#[test]
fn test_same_seed_same_bars() {
    let (a, _) = card_with(AlgorithmKey::QuickSort, Arc::new(MockSurface::ready(400, 200)));
    let (b, _) = card_with(AlgorithmKey::BubbleSort, Arc::new(MockSurface::ready(400, 200)));
    a.refresh().unwrap();
    b.refresh().unwrap();
    assert_eq!(a.bar_values(), b.bar_values());
}

#[tokio::test(start_paused = true)]
async fn test_sort_orders_bars_and_draws_each_swap() {
    let surface = Arc::new(MockSurface::ready(300, 260));
    let (card, settings) = card_with(AlgorithmKey::InsertionSort, Arc::clone(&surface));
    settings.set_speed(100);
    card.refresh().unwrap();
    let before = surface.draw_count();

    let stats = card.sort().await.unwrap();

    assert!(is_sorted(&card.bar_values()));
    assert_eq!(surface.draw_count() - before, stats.swaps);
    assert_eq!(card.state(), HostState::Idle);
}

#[tokio::test]
async fn test_sort_before_any_bars_completes() {
    let (card, _) = card_with(AlgorithmKey::SelectionSort, Arc::new(MockSurface::new()));
    let stats = card.sort().await.unwrap();
    assert_eq!(stats.swaps, 0);
    assert_eq!(card.state(), HostState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_second_sort_is_rejected_while_running() {
    let surface = Arc::new(MockSurface::ready(300, 260));
    let (card, _) = card_with(AlgorithmKey::QuickSort, Arc::clone(&surface));
    card.refresh().unwrap();

    let running = {
        let card = Arc::clone(&card);
        tokio::spawn(async move { card.sort().await })
    };
    wait_until_sorting(&card).await;
    assert_eq!(card.state(), HostState::Sorting);

    let second = card.sort().await;
    assert!(matches!(
        second,
        Err(SortError::AlreadySorting(AlgorithmKey::QuickSort))
    ));

    // The live run keeps exclusive ownership of the bars
    let during = card.bar_values();
    assert_eq!(
        card.refresh().unwrap(),
        RefreshOutcome::SuppressedWhileSorting
    );
    assert_eq!(card.bar_values(), during);

    running.await.unwrap().unwrap();
    assert_eq!(card.state(), HostState::Idle);
    assert!(is_sorted(&card.bar_values()));
}

#[tokio::test(start_paused = true)]
async fn test_failed_sort_returns_to_idle() {
    let surface = Arc::new(MockSurface::ready(300, 260));
    let (card, _) = card_with(AlgorithmKey::BubbleSort, Arc::clone(&surface));
    card.refresh().unwrap();

    surface.set_failing(true);
    let result = card.sort().await;
    assert!(matches!(result, Err(SortError::RenderFailed(_))));
    assert_eq!(card.state(), HostState::Idle);

    surface.set_failing(false);
    assert_eq!(card.refresh().unwrap(), RefreshOutcome::Regenerated);
    card.sort().await.unwrap();
    assert!(is_sorted(&card.bar_values()));
}

#[tokio::test(start_paused = true)]
async fn test_dropped_run_returns_to_idle() {
    let surface = Arc::new(MockSurface::ready(300, 260));
    let (card, _) = card_with(AlgorithmKey::SelectionSort, Arc::clone(&surface));
    card.refresh().unwrap();

    // Abandon the run after the first pause
    let result = tokio::time::timeout(Duration::from_millis(1), card.sort()).await;
    assert!(result.is_err());
    assert_eq!(card.state(), HostState::Idle);
}

#[test]
fn test_sync_density_adopts_global_value() {
    let surface = Arc::new(MockSurface::ready(300, 260));
    let (card, settings) = card_with(AlgorithmKey::ShellSort, Arc::clone(&surface));

    settings.set_density(12);
    assert_eq!(card.sync_density().unwrap(), RefreshOutcome::Regenerated);
    assert_eq!(card.spacing(), 12);
    assert_eq!(card.bar_values().len(), 25);
}

#[tokio::test(start_paused = true)]
async fn test_density_change_during_sort_is_dropped() {
    let surface = Arc::new(MockSurface::ready(300, 260));
    let (card, settings) = card_with(AlgorithmKey::QuickSort, Arc::clone(&surface));
    card.refresh().unwrap();
    let bar_count = card.bar_values().len();

    let running = {
        let card = Arc::clone(&card);
        tokio::spawn(async move { card.sort().await })
    };
    wait_until_sorting(&card).await;

    settings.set_density(20);
    assert_eq!(
        card.sync_density().unwrap(),
        RefreshOutcome::SuppressedWhileSorting
    );
    running.await.unwrap().unwrap();

    // Not replayed once the run is over
    assert_eq!(card.spacing(), 8);
    assert_eq!(card.bar_values().len(), bar_count);
}

#[test]
fn test_increase_and_decrease_bars_respect_limits() {
    let surface = Arc::new(MockSurface::ready(300, 260));
    let (card, settings) = card_with(AlgorithmKey::BubbleSort, Arc::clone(&surface));

    settings.set_density(3);
    card.sync_density().unwrap();
    assert_eq!(card.increase_bars().unwrap(), RefreshOutcome::Unchanged);
    assert_eq!(card.decrease_bars().unwrap(), RefreshOutcome::Regenerated);
    assert_eq!(card.spacing(), 4);

    settings.set_density(30);
    card.sync_density().unwrap();
    assert_eq!(card.decrease_bars().unwrap(), RefreshOutcome::Unchanged);
    assert_eq!(card.increase_bars().unwrap(), RefreshOutcome::Regenerated);
    assert_eq!(card.spacing(), 29);
}

#[test]
fn test_host_capabilities() {
    let surface = Arc::new(MockSurface::ready(300, 260));
    let (card, settings) = card_with(AlgorithmKey::QuickSort, surface);

    assert_eq!(card.name(), "quickSort");
    assert_eq!(card.delay(), Duration::from_millis(80));
    settings.set_speed(90);
    assert_eq!(card.delay(), Duration::from_millis(30));
    assert_eq!(HostState::Sorting.to_string(), "sorting");
}

/// Surface that, from inside every draw, tries to start a run and a second
/// regeneration on the card that is drawing.
#[derive(Default)]
struct IntrudingSurface {
    card: std::sync::OnceLock<std::sync::Weak<SortCard>>,
    /// (sort attempt result, nested refresh outcome) per draw
    seen: Mutex<Vec<(Option<String>, RefreshOutcome)>>,
}

impl IntrudingSurface {
    fn seen(&self) -> Vec<(Option<String>, RefreshOutcome)> {
        self.seen.lock().unwrap().clone()
    }
}

struct NoopWaker;

impl std::task::Wake for NoopWaker {
    fn wake(self: Arc<Self>) {}
}

impl RenderSurface for IntrudingSurface {
    fn size(&self) -> Option<SurfaceSize> {
        Some(SurfaceSize::new(300, 260))
    }

    fn draw(&self, _bars: &[u32], _layout: &BarLayout) -> SortResult<()> {
        use std::future::Future;
        use std::task::{Context, Poll, Waker};

        let Some(card) = self.card.get().and_then(|weak| weak.upgrade()) else {
            return Ok(());
        };

        let waker = Waker::from(Arc::new(NoopWaker));
        let mut cx = Context::from_waker(&waker);
        let mut run = Box::pin(card.sort());
        let sort_attempt = match run.as_mut().poll(&mut cx) {
            Poll::Ready(Err(e)) => Some(e.to_string()),
            Poll::Ready(Ok(_)) | Poll::Pending => None,
        };
        drop(run);

        let nested = card.refresh()?;
        self.seen.lock().unwrap().push((sort_attempt, nested));
        Ok(())
    }
}

#[test]
fn test_regeneration_holds_the_card() {
    let surface = Arc::new(IntrudingSurface::default());
    let settings = Arc::new(SortingSettings::default());
    let card = Arc::new(
        SortCard::new(AlgorithmKey::QuickSort, settings, surface.clone()).with_seed(3),
    );
    let _ = surface.card.set(Arc::downgrade(&card));

    assert_eq!(card.refresh().unwrap(), RefreshOutcome::Regenerated);
    assert_eq!(card.sync_density().unwrap(), RefreshOutcome::Regenerated);
    assert_eq!(card.decrease_bars().unwrap(), RefreshOutcome::Regenerated);

    // Every regeneration turned away both a run and another regeneration
    let seen = surface.seen();
    assert_eq!(seen.len(), 3);
    for (sort_attempt, nested) in seen {
        assert_eq!(sort_attempt.as_deref(), Some("quickSort is already sorting"));
        assert_eq!(nested, RefreshOutcome::SuppressedWhileSorting);
    }
    assert_eq!(card.state(), HostState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_speed_change_applies_on_next_tick() {
    let surface = Arc::new(MockSurface::ready(300, 260));
    let (card, settings) = card_with(AlgorithmKey::InsertionSort, Arc::clone(&surface));
    card.refresh().unwrap();
    let before = surface.draw_count();
    assert_eq!(card.delay(), Duration::from_millis(80));

    let started = tokio::time::Instant::now();
    let running = {
        let card = Arc::clone(&card);
        tokio::spawn(async move { card.sort().await })
    };

    // First swap drawn; the run is now paused on its first 80 ms tick
    for _ in 0..100 {
        if surface.draw_count() > before {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(surface.draw_count(), before + 1);
    assert_eq!(settings.set_speed(100), 100);

    let stats = running.await.unwrap().unwrap();
    assert!(stats.swaps > 1);
    // One 80 ms tick, then 20 ms for every later one
    let expected = Duration::from_millis(80 + 20 * (stats.swaps as u64 - 1));
    let elapsed = started.elapsed();
    assert!(elapsed >= expected, "{:?} < {:?}", elapsed, expected);
    assert!(elapsed < expected + Duration::from_millis(20), "{:?}", elapsed);
}
