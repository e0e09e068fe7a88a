//! Editor trait for per-frame GUI rendering.

use crate::image::ImageFrame;

/// Per-frame rendering callbacks for a module's GUI.
///
/// All methods are called from the host's UI thread, once per rendered
/// frame. They must stay cheap; the host renders every visible editor each
/// frame.
pub trait Editor: Send {
    /// Called at the start of every GUI frame, before any paint call and
    /// regardless of visibility. Per-frame bookkeeping goes here.
    fn frame_start(&mut self) {}

    /// Called when the editor becomes visible (`true`) or hidden
    /// (`false`). Brackets the period during which
    /// [`render_to_image`](Editor::render_to_image) and
    /// [`draw`](Editor::draw) are invoked.
    fn visibility_changed(&mut self, _visible: bool) {}

    /// Paint the editor into the host's BGRA image buffer. Only called
    /// while visible.
    ///
    /// The buffer is shared between all module editors and is not cleared
    /// between calls; paint the full background if stale pixels matter.
    fn render_to_image(&mut self, _frame: &mut ImageFrame) {}

    /// Immediate-mode GL hook, called once per frame with the viewport
    /// size. Only part of the API surface from minor version
    /// [`MINOR_GL_DRAW`]; hosts discover it through the version query
    /// rather than probing for a no-op.
    ///
    /// [`MINOR_GL_DRAW`]: crate::version::MINOR_GL_DRAW
    fn draw(&mut self, _width: usize, _height: usize) {}
}
