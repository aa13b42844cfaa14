use crate::state::FrameBuffer;

/// # Host
/// Whatever is driving the Chip-8: a window, a terminal, a test harness.
///
/// The engine calls these synchronously between instructions, never in the
/// middle of one.
pub trait Host {
    /// The frame buffer changed since it was last rendered
    fn render(&mut self, frame: &FrameBuffer);

    /// The sound timer was running during a timer tick.
    /// Called on every such tick; hosts debounce repeated calls themselves.
    fn beep(&mut self);
}

impl<H: Host + ?Sized> Host for &mut H {
    fn render(&mut self, frame: &FrameBuffer) {
        (**self).render(frame)
    }

    fn beep(&mut self) {
        (**self).beep()
    }
}

/// A host that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Host for Headless {
    fn render(&mut self, _frame: &FrameBuffer) {}

    fn beep(&mut self) {}
}

/// A host that remembers what it was told, for tests and tooling
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub renders: usize,
    pub beeps: usize,
    pub last_frame: Option<FrameBuffer>,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder::default()
    }
}

impl Host for Recorder {
    fn render(&mut self, frame: &FrameBuffer) {
        self.renders += 1;
        self.last_frame = Some(*frame);
    }

    fn beep(&mut self) {
        self.beeps += 1;
    }
}
