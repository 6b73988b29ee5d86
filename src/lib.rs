//! Progress-bar thumbnails driven by WebVTT sprite cue files.
//!
//! [`CueParser`] turns cue text into time-ranged [`CueEntry`] values,
//! [`ThumbnailLocator`] finds the entry under the pointer and where to draw
//! it, and [`ThumbnailController`] wires both to a host [`RenderPort`].

pub mod config;
pub mod cue;
pub mod error;
pub mod fetch;
pub mod locator;
pub mod parser;
pub mod paths;
pub mod preload;
pub mod render;
pub mod session;
pub mod timestamp;

pub use cue::{CueEntry, ThumbnailRegion};
pub use error::{FetchError, ParseWarning, ReferenceError};
pub use fetch::{CueFetcher, FileFetcher, HttpFetcher, SourceFetcher};
pub use locator::{RenderInstruction, ThumbnailLocator};
pub use parser::{parse_cues, CueParser, ParsedCues};
pub use preload::{PreloadTracker, Preloader};
pub use render::{InlineStyleElement, RenderPort};
pub use session::{ControllerState, LoadTicket, Options, Session, ThumbnailController};
