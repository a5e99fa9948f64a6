use egui::{Context, Id, Pos2};

use crate::models::time_range::TimeRange;
use crate::services::interaction::{DragContext, DragTracker};
use crate::services::time_grid::TimeCoordinateProvider;

/// Keeps the active drag in egui memory so it survives between frames.
pub struct DragManager;

impl DragManager {
    fn storage_id() -> Id {
        Id::new("agenda_time_grid_drag_state")
    }

    fn with_tracker<R>(ctx: &Context, f: impl FnOnce(&mut DragTracker) -> R) -> R {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            let mut tracker = mem.data.get_temp::<DragTracker>(id).unwrap_or_default();
            let result = f(&mut tracker);
            if tracker.is_active() {
                mem.data.insert_temp(id, tracker);
            } else {
                mem.data.remove::<DragTracker>(id);
            }
            result
        })
    }

    pub fn begin<P: TimeCoordinateProvider>(ctx: &Context, provider: &P, range: TimeRange, pointer_pos: Pos2) -> bool {
        Self::with_tracker(ctx, |tracker| {
            tracker.begin(provider, range, pointer_pos.x as f64, pointer_pos.y as f64)
        })
    }

    pub fn active(ctx: &Context) -> Option<DragContext> {
        ctx.memory_mut(|mem| mem.data.get_temp::<DragTracker>(Self::storage_id()))
            .and_then(|tracker| tracker.active().cloned())
    }

    pub fn is_active(ctx: &Context) -> bool {
        Self::active(ctx).is_some()
    }

    pub fn update_hover<P: TimeCoordinateProvider>(ctx: &Context, provider: &P, pointer_pos: Pos2) -> Option<TimeRange> {
        Self::with_tracker(ctx, |tracker| {
            tracker.update(provider, pointer_pos.x as f64, pointer_pos.y as f64)
        })
    }

    pub fn finish<P: TimeCoordinateProvider>(ctx: &Context, provider: &P) -> Option<TimeRange> {
        Self::with_tracker(ctx, |tracker| tracker.finish(provider))
    }

    pub fn cancel(ctx: &Context) {
        ctx.memory_mut(|mem| {
            mem.data.remove::<DragTracker>(Self::storage_id());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::time_grid::test_support::*;
    use crate::utils::date::{date_to_ms, MS_PER_HOUR};
    use egui::pos2;

    #[test]
    fn test_drag_state_persists_in_memory() {
        let ctx = Context::default();
        let grid = uniform_grid();
        let day = date_to_ms(monday());
        let range = TimeRange::new(day + 8 * MS_PER_HOUR, day + 9 * MS_PER_HOUR);

        assert!(DragManager::begin(&ctx, &grid, range, pos2(10.0, 1.0)));
        assert!(DragManager::is_active(&ctx));

        let preview = DragManager::update_hover(&ctx, &grid, pos2(110.0, 41.0)).unwrap();
        assert_eq!(preview.start_ms, day + 24 * MS_PER_HOUR + 9 * MS_PER_HOUR);
        assert_eq!(DragManager::active(&ctx).map(|drag| drag.duration_ms()), Some(MS_PER_HOUR));

        assert_eq!(DragManager::finish(&ctx, &grid), Some(preview));
        assert!(!DragManager::is_active(&ctx));
    }

    #[test]
    fn test_cancel_and_miss() {
        let ctx = Context::default();
        let grid = uniform_grid();
        let range = TimeRange::new(0, MS_PER_HOUR);

        assert!(!DragManager::begin(&ctx, &grid, range, pos2(-5.0, -5.0)));
        assert!(!DragManager::is_active(&ctx));

        assert!(DragManager::begin(&ctx, &grid, range, pos2(10.0, 1.0)));
        DragManager::cancel(&ctx);
        assert_eq!(DragManager::finish(&ctx, &grid), None);
    }
}
