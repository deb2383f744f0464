//! Pointer/touch state machine over a [`Surface`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::signature::raster::{EncodedImage, StrokePoint, Surface};
use crate::signature::SignatureError;

/// Receives the pad's output events.
pub trait SignatureSink {
    fn on_stroke_committed(&mut self, image: EncodedImage);
    fn on_cleared(&mut self);
}

/// The surface's current top-left corner in viewport coordinates.
///
/// Supplied with every event since the surface may have moved or scrolled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceOrigin {
    pub left: f32,
    pub top: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPhase {
    Down,
    Move,
    /// Pointer up or touch end.
    Up,
}

/// A viewport position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPoint {
    pub client_x: f32,
    pub client_y: f32,
}

/// Where an event's current position comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum InputPosition {
    /// Coordinates may be omitted on `Up`.
    #[serde(rename_all = "camelCase")]
    Pointer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        client_x: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        client_y: Option<f32>,
    },
    /// Active contacts; the first one is used.
    Touch {
        #[serde(default)]
        touches: Vec<ClientPoint>,
    },
}

impl InputPosition {
    fn client_point(&self) -> Option<ClientPoint> {
        match self {
            InputPosition::Pointer { client_x, client_y } => {
                Some(ClientPoint {
                    client_x: (*client_x)?,
                    client_y: (*client_y)?,
                })
            }
            InputPosition::Touch { touches } => touches.first().copied(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub phase: InputPhase,
    #[serde(flatten)]
    pub position: InputPosition,
}

impl InputEvent {
    #[cfg(test)]
    pub fn pointer(phase: InputPhase, client_x: f32, client_y: f32) -> Self {
        Self {
            phase,
            position: InputPosition::Pointer {
                client_x: Some(client_x),
                client_y: Some(client_y),
            },
        }
    }

    #[cfg(test)]
    pub fn touch(phase: InputPhase, touches: Vec<ClientPoint>) -> Self {
        Self {
            phase,
            position: InputPosition::Touch { touches },
        }
    }

    /// Position in surface coordinates for the given origin.
    fn local_point(&self, origin: SurfaceOrigin) -> Option<StrokePoint> {
        self.position
            .client_point()
            .map(|p| StrokePoint::new(p.client_x - origin.left, p.client_y - origin.top))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PadState {
    #[default]
    Idle,
    Drawing {
        last: StrokePoint,
    },
}

#[derive(Default)]
pub struct SignaturePad {
    surface: Surface,
    state: PadState,
    latest: Option<EncodedImage>,
}

impl SignaturePad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PadState {
        self.state
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The most recently committed image, or `None` if nothing was drawn since the last
    /// clear.
    pub fn latest(&self) -> Option<&EncodedImage> {
        self.latest.as_ref()
    }

    /// Feeds one input event through the state machine.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        origin: SurfaceOrigin,
        sink: &mut impl SignatureSink,
    ) -> Result<(), SignatureError> {
        match (self.state, event.phase) {
            (PadState::Idle, InputPhase::Down) => {
                if let Some(start) = event.local_point(origin) {
                    self.state = PadState::Drawing { last: start };
                }
            }
            (PadState::Drawing { last }, InputPhase::Move) => {
                if let Some(current) = event.local_point(origin) {
                    self.surface.stroke_segment(last, current);
                    self.state = PadState::Drawing { last: current };
                }
            }
            (PadState::Drawing { .. }, InputPhase::Up) => {
                self.state = PadState::Idle;
                let image = self.surface.encode()?;
                debug!("Signature stroke committed ({} bytes)", image.as_str().len());
                self.latest = Some(image.clone());
                sink.on_stroke_committed(image);
            }
            // A second down without an up restarts the stroke from the new point.
            (PadState::Drawing { .. }, InputPhase::Down) => {
                if let Some(start) = event.local_point(origin) {
                    self.state = PadState::Drawing { last: start };
                }
            }
            (PadState::Idle, InputPhase::Move | InputPhase::Up) => {}
        }
        Ok(())
    }

    /// Wipes the surface from any state and reports it.
    pub fn clear(&mut self, sink: &mut impl SignatureSink) {
        self.surface.clear();
        self.state = PadState::Idle;
        self.latest = None;
        debug!("Signature cleared");
        sink.on_cleared();
    }
}
