// Purpose: the per-voice core and the plumbing that feeds it parameter changes
// This layer sits above the dsp primitives and below any renderer/mixer

pub mod error;
pub mod message;
pub mod note;
pub mod voice;

pub use error::NoteError;
pub use message::{MessageReceiver, NoteMessage};
pub use note::Note;
pub use voice::Voice;
