use crate::error::ViewerError;
use crate::hotspot::RoomId;

/// State of the narration toggle in the artifact view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NarrationButton {
    #[default]
    Hidden,
    Play,
    Stop,
}

impl NarrationButton {
    pub fn label(&self) -> &'static str {
        match self {
            NarrationButton::Hidden => "",
            NarrationButton::Play => "Play Audio Description",
            NarrationButton::Stop => "Stop Audio Description",
        }
    }
}

/// Everything the UI layer needs to react to, drained once per frame.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerEvent {
    TooltipShown { label: String, x: f32, y: f32 },
    TooltipHidden,
    LoadingShown,
    LoadingHidden,
    RoomTitleChanged(Option<String>),
    RoomEntered(RoomId),
    ArtifactOpened {
        title: String,
        description: String,
        image_url: String,
    },
    ArtifactClosed,
    NarrationButton(NarrationButton),
    Diagnostic(ViewerError),
}
