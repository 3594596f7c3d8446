//! Status indicator

/// Single on/off indicator, lit while a track is playing
pub trait StatusLed {
    fn set(&mut self, on: bool);
}
