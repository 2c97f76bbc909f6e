//! Observer lists for surface interaction and lifecycle channels.
use game_core::CellIndex;

/// Ordered list of callbacks for one channel.
///
/// Callbacks run in registration order on every notification.
pub struct Listeners<A> {
    callbacks: Vec<Box<dyn FnMut(A) + Send>>,
}

impl<A: Copy> Listeners<A> {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    pub fn register(&mut self, callback: impl FnMut(A) + Send + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    pub fn notify(&mut self, arg: A) {
        for callback in &mut self.callbacks {
            callback(arg);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<A: Copy> Default for Listeners<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Channels wired when the surface renders.
#[derive(Default)]
pub(crate) struct SurfaceChannels {
    pub cell_enter: Listeners<CellIndex>,
    pub cell_leave: Listeners<CellIndex>,
    pub cell_click: Listeners<CellIndex>,
    pub new_game: Listeners<()>,
    pub save_game: Listeners<()>,
    pub load_game: Listeners<()>,
}
