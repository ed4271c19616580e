//! Grow-to-fit sizing for the text surface.

use std::time::Duration;

use crate::platform::InputSurface;

/// Quiet period before a resize triggered by typing is applied.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(200);

/// Delay of the one-off resize after mount, once layout has settled.
pub const MOUNT_RESIZE_DELAY: Duration = Duration::from_millis(100);

/// Match the surface's visible height to its content height.
///
/// The height is reset first so the measurement reflects the content, not the
/// previous fixed height; this lets the surface shrink as well as grow.
pub fn resize<S: InputSurface + ?Sized>(surface: &S) {
    surface.reset_height();
    let height = surface.scroll_height();
    surface.set_height(height);
    tracing::trace!(height, "resized input surface");
}
