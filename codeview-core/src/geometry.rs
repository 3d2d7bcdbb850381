//! Keeps the two faces of a pair the same size, in the same place, and equally maximized.
use crate::models::{Handle, Window};
use crate::DisplayAction;

/// Copy the frame and maximization state of `src` onto `dst`.
///
/// Returns the actions that bring `dst` in line and whether the maximization state had to change.
pub fn synchronize<H: Handle>(src: &Window<H>, dst: &Window<H>) -> (Vec<DisplayAction<H>>, bool) {
    let mut actions = vec![];
    let maximization_changed = src.maximized != dst.maximized;

    // This is a forced sync, not something the user did.
    if maximization_changed {
        actions.push(DisplayAction::SkipNextEffect(dst.handle));
        if src.maximized {
            actions.push(DisplayAction::Maximize(dst.handle));
        } else {
            actions.push(DisplayAction::Unmaximize(dst.handle));
        }
    }

    if src.frame != dst.frame {
        actions.push(DisplayAction::MoveResizeFrame(dst.handle, src.frame));
    }

    (actions, maximization_changed)
}

/// Neither face may be resized below the larger of the two minimum sizes. Returns the expansion
/// for `resizing`, which must be one of `a` or `b`.
pub fn constrain_geometry<H: Handle>(
    a: &Window<H>,
    b: &Window<H>,
    resizing: &Window<H>,
) -> DisplayAction<H> {
    // Compared on frames, since only one of the two may be client side decorated.
    let (min_a_w, min_a_h) = a.min_frame_size();
    let (min_b_w, min_b_h) = b.min_frame_size();
    DisplayAction::ExpandAllocatedGeometry(
        resizing.handle,
        min_a_w.max(min_b_w),
        min_a_h.max(min_b_h),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Margins, MockHandle, WindowHandle, Xyhw};
    use crate::State;

    fn window(id: MockHandle, frame: Xyhw, maximized: bool) -> Window<MockHandle> {
        let mut window = Window::new(WindowHandle(id));
        window.frame = frame;
        window.maximized = maximized;
        window
    }

    fn converge(src: &Window<MockHandle>, dst: &Window<MockHandle>) -> (Window<MockHandle>, bool) {
        let mut state = State::new_test();
        state.windows.push(dst.clone());
        let (actions, changed) = synchronize(src, dst);
        for act in actions {
            state.queue(act);
        }
        (state.windows.remove(0), changed)
    }

    #[test]
    fn synchronizing_matching_windows_does_nothing() {
        let src = window(1, Xyhw::new(0, 0, 800, 600), false);
        let dst = window(2, Xyhw::new(0, 0, 800, 600), false);
        let (actions, changed) = synchronize(&src, &dst);
        assert!(actions.is_empty());
        assert!(!changed);
    }

    #[test]
    fn frames_converge() {
        let src = window(1, Xyhw::new(10, 20, 800, 600), false);
        let dst = window(2, Xyhw::new(300, 300, 200, 100), false);
        let (dst, changed) = converge(&src, &dst);
        assert_eq!(dst.frame, src.frame);
        assert!(!changed);
    }

    #[test]
    fn maximization_converges_in_both_directions() {
        let maximized = window(1, Xyhw::new(0, 0, 1920, 1080), true);
        let normal = window(2, Xyhw::new(50, 50, 640, 480), false);

        let (dst, changed) = converge(&maximized, &normal);
        assert!(changed);
        assert!(dst.maximized);
        assert_eq!(dst.frame, maximized.frame);

        let (dst, changed) = converge(&normal, &maximized);
        assert!(changed);
        assert!(!dst.maximized);
        assert_eq!(dst.frame, normal.frame);
    }

    #[test]
    fn forced_maximize_skips_the_effect_first() {
        let src = window(1, Xyhw::new(0, 0, 1920, 1080), true);
        let dst = window(2, Xyhw::new(0, 0, 1920, 1080), false);
        let (actions, _) = synchronize(&src, &dst);
        assert_eq!(
            actions,
            vec![
                DisplayAction::SkipNextEffect(WindowHandle(2)),
                DisplayAction::Maximize(WindowHandle(2)),
            ]
        );
    }

    #[test]
    fn constraint_uses_the_larger_minimum_in_frame_coordinates() {
        let mut app = window(1, Xyhw::new(0, 0, 800, 600), false);
        app.min_size = (400, 300);
        let mut toolbox = window(2, Xyhw::new(0, 0, 800, 600), false);
        toolbox.min_size = (380, 320);
        toolbox.frame_extents = Margins::new_from_pair(10, 20);

        let act = constrain_geometry(&app, &toolbox, &app);
        assert_eq!(
            act,
            DisplayAction::ExpandAllocatedGeometry(WindowHandle(1), 420, 340)
        );
    }
}
