pub mod macros;
pub mod structs;

pub use structs::Command;
pub use structs::Direction;
pub use structs::Floor;
pub use structs::RenderCommand;
pub use structs::StatusUpdate;
pub use structs::Tone;
