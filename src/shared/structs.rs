/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;

/***************************************/
/*       Public data structures        */
/***************************************/
/// Floor number, counted from 1 at the bottom of the shaft.
pub type Floor = u8;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Stop,
}

impl Direction {
    /// Glyph shown on the status panel next to the floor number.
    pub fn glyph(&self) -> char {
        match *self {
            Direction::Up => '▲',
            Direction::Down => '▼',
            Direction::Stop => '■',
        }
    }
}

/// Panel readout: the floor estimate and travel direction of the car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub floor: Floor,
    pub direction: Direction,
}

/// Drawing instructions for the shaft canvas. The controller owns the
/// logical increments; the renderer only paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderCommand {
    /// Top pixel row of the car inside the shaft.
    CarPosition(i32),
    /// Inner edge positions of the two door leaves.
    DoorGap { left: i32, right: i32 },
    /// External call button feedback light.
    CallLight { floor: Floor, on: bool },
}

/// Fire-and-forget tone request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub freq_hz: u16,
    pub duration_ms: u64,
}

impl Tone {
    /// Low, short cue played when the car starts moving.
    pub const DEPARTURE: Tone = Tone {
        freq_hz: 392,
        duration_ms: 120,
    };
    /// High, longer cue played when the car reaches its target floor.
    pub const ARRIVAL: Tone = Tone {
        freq_hz: 784,
        duration_ms: 350,
    };
}

/// Inputs accepted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Floor selected on the internal panel.
    RequestFloor(Floor),
    /// Call button pressed on a landing.
    ExternalCall(Floor),
    OpenDoors,
    CloseDoors,
}
