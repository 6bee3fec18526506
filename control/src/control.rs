//! The polling loop, servicing user input.

use crate::display::Display;
use crate::encoder::Encoder;
use crate::input::{Debounced, InputSnapshot};
use crate::log;
use crate::midi::MidiSink;
use crate::output::DesiredOutput;
use crate::shared::SharedState;
use crate::tap_tempo::TapTempo;
use crate::transport::Transport;

/// Everything the control loop holds over time.
///
/// This struct takes `InputSnapshot` on its input, passes it through
/// debouncers to the transport and tap tempo, applies tempo steps coming
/// from the encoder, and returns the desired state of outputs. It is the
/// only writer of `SharedState`.
///
/// The encoder and display are optional collaborators. Use `()` for the
/// missing ones.
#[derive(Debug)]
pub struct ControlLoop<E: Encoder = (), D: Display = ()> {
    transport_button: Debounced,
    tap_button: Debounced,
    tap_tempo: TapTempo,
    transport: Transport,
    encoder: E,
    display: D,
}

impl<E: Encoder, D: Display> ControlLoop<E, D> {
    #[must_use]
    pub fn new(encoder: E, display: D) -> Self {
        Self {
            transport_button: Debounced::active_low(),
            tap_button: Debounced::active_low(),
            tap_tempo: TapTempo::new(),
            transport: Transport::new(),
            encoder,
            display,
        }
    }

    pub fn poll(
        &mut self,
        snapshot: InputSnapshot,
        shared: &SharedState,
        midi: &mut impl MidiSink,
    ) -> DesiredOutput {
        let now_ms = snapshot.now_ms();

        if self
            .transport_button
            .poll(snapshot.transport_button, now_ms)
            .is_some()
        {
            self.transport.toggle(shared, midi);
        }

        if self.tap_button.poll(snapshot.tap_button, now_ms).is_some() {
            if let Some(bpm) = self.tap_tempo.on_tap(snapshot.now_us) {
                shared.tempo.set(bpm);
                log::info!(
                    "Tapped tempo {=u32} BPM, applied {=u16} BPM",
                    bpm,
                    shared.tempo.get()
                );
            }
        }
        self.tap_tempo.on_idle_poll(snapshot.now_us);

        let delta = self.encoder.read_delta();
        let step = delta.signum();
        for _ in 0..delta.unsigned_abs() {
            shared.tempo.adjust(step);
        }
        if delta != 0 {
            log::info!("Tempo adjusted to {=u16} BPM", shared.tempo.get());
        }

        self.display.render(shared.tempo.get());

        DesiredOutput {
            running_indicator: self.transport.is_running(),
        }
    }

    #[must_use]
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    #[must_use]
    pub fn tap_tempo(&self) -> &TapTempo {
        &self.tap_tempo
    }
}

impl Default for ControlLoop {
    fn default() -> Self {
        Self::new((), ())
    }
}
