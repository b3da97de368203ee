//! HostNavigator - The Host Navigation Seam
//!
//! The engine never touches the host's screen stack directly; it calls
//! through this trait. Implementations adapt whatever primitives the host
//! exposes (push/replace/pop, or an index-based pager).

use async_trait::async_trait;
use wayline_flow::Presentation;

/// Contract for the host's navigation stack.
///
/// Calls are fire-and-observe: the engine does not interpret host failures,
/// the host owns its own error surface. Anything unrecoverable is for the
/// embedding screen layer to decide, not this subsystem.
#[async_trait]
pub trait HostNavigator: Send + Sync {
    /// Render the named screen with the given presentation hint.
    async fn present(&self, screen: &str, presentation: Presentation);

    /// Pop the visible screen, returning to whatever is beneath it.
    async fn dismiss(&self);
}
