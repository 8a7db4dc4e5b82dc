use ddp_rs::connection::DDPConnection;
use rgb::RGB8;

/// Drives a DDP sink (typically a WLED device) through the
/// [`SmartLedsWrite`](smart_leds_trait::SmartLedsWrite) interface, so the
/// render task never knows which transport sits behind the ring.
pub struct Writer {
    connection: DDPConnection,
}

impl Writer {
    pub fn new(connection: DDPConnection) -> Self {
        Self { connection }
    }
}

impl smart_leds_trait::SmartLedsWrite for Writer {
    type Error = ddp_rs::error::DDPError;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let mut payload = Vec::new();
        for color in iterator {
            let rgb = color.into();
            payload.extend_from_slice(&[rgb.r, rgb.g, rgb.b]);
        }

        self.connection.write(&payload).map(drop)
    }
}
