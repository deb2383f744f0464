// Signature Capture Surface: free-hand strokes on a fixed 400x150 raster, emitted as
// PNG data URLs when a stroke ends.

pub mod handlers;
pub mod pad;
pub mod raster;

use thiserror::Error;

pub use pad::{
    InputEvent, InputPhase, InputPosition, PadState, SignaturePad, SignatureSink, SurfaceOrigin,
};
pub use raster::{decode_data_url, EncodedImage, StrokePoint, Surface};

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[source] image::ImageError),

    #[error("PNG decoding failed: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Not a PNG data URL")]
    NotDataUrl,

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}
