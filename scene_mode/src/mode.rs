use std::fmt;

/// The authoritative scene mode every visual component reads each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    /// Particles gathered into the tree.
    #[default]
    Tree,
    /// Particles scattered into the chaos cloud.
    Unleashed,
    /// Photos laid out on an arc, scrolled by hand position.
    Carousel,
    /// One photo (or the letter) pulled up in front of the camera.
    Focus,
    /// Reserved; never entered by the state machine.
    Letter,
}

impl InteractionMode {
    pub fn name(self) -> &'static str {
        match self {
            InteractionMode::Tree      => "TREE",
            InteractionMode::Unleashed => "UNLEASHED",
            InteractionMode::Carousel  => "CAROUSEL",
            InteractionMode::Focus     => "FOCUS",
            InteractionMode::Letter    => "LETTER",
        }
    }

    /// Formation target for the tree progress blend.
    pub fn progress_target(self) -> f32 {
        if self == InteractionMode::Tree { 1.0 } else { 0.0 }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
