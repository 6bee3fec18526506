pub mod clock;
pub mod inputs;
pub mod midi;
pub mod outputs;

pub use daisy::hal;

use daisy::led::LedUser;
use hal::pac::CorePeripherals;
use hal::pac::Peripherals as DevicePeripherals;
use hal::prelude::*;
use systick_monotonic::Systick;

use clock::{MicrosClock, TickTimer, TIMER_FREQUENCY_HZ};
use inputs::{ButtonsPins, Config as InputsConfig, Inputs};
use midi::{MidiWriter, RxPin as MidiRxPin, TxPin as MidiTxPin};
use outputs::leds::TempoLed;
use outputs::{Config as OutputsConfig, Outputs};

#[cfg(feature = "encoder")]
pub type Encoder = inputs::encoder::QuadratureEncoder;
#[cfg(not(feature = "encoder"))]
pub type Encoder = ();

#[cfg(feature = "display")]
pub type Display = outputs::display::SegmentDisplay;
#[cfg(not(feature = "display"))]
pub type Display = ();

pub struct System {
    pub mono: Systick<1000>,
    pub status_led: LedUser,
    pub inputs: Inputs,
    pub outputs: Outputs,
    pub tempo_led: TempoLed,
    pub tick_timer: TickTimer,
    pub midi_writer: MidiWriter,
    pub encoder: Encoder,
    pub display: Display,
}

impl System {
    /// Initialize system abstraction
    ///
    /// # Panics
    ///
    /// The system can be initialized only once. It panics otherwise.
    #[must_use]
    pub fn init(mut cp: CorePeripherals, dp: DevicePeripherals) -> Self {
        enable_cache(&mut cp);

        let board = daisy::Board::take().unwrap();
        let ccdr = daisy::board_freeze_clocks!(board, dp);
        let pins = daisy::board_split_gpios!(board, ccdr, dp);

        let mono = Systick::new(cp.SYST, 480_000_000);
        let status_led = daisy::board_split_leds!(pins).USER;

        let tick_timer = TickTimer::new(dp.TIM2.tick_timer(
            TIMER_FREQUENCY_HZ.Hz(),
            ccdr.peripheral.TIM2,
            &ccdr.clocks,
        ));
        let clock = MicrosClock::new(dp.TIM5.tick_timer(
            TIMER_FREQUENCY_HZ.Hz(),
            ccdr.peripheral.TIM5,
            &ccdr.clocks,
        ));

        let midi_writer = {
            let tx: MidiTxPin = pins.GPIO.PIN_A3.into_alternate();
            let rx: MidiRxPin = pins.GPIO.PIN_A2.into_alternate();
            let serial = dp
                .UART4
                .serial(
                    (tx, rx),
                    midi::BAUD_RATE.bps(),
                    ccdr.peripheral.UART4,
                    &ccdr.clocks,
                )
                .unwrap();
            let (tx, _rx) = serial.split();
            MidiWriter::new(tx)
        };

        let inputs = Inputs::new(InputsConfig {
            buttons: ButtonsPins {
                transport: pins.GPIO.PIN_B10.into_pull_up_input(),
                tap: pins.GPIO.PIN_B7.into_pull_up_input(),
            },
            clock,
        });

        let outputs = Outputs::new(OutputsConfig {
            running_led: pins.GPIO.PIN_B6.into_push_pull_output(),
        });
        let tempo_led = TempoLed::new(pins.GPIO.PIN_B5.into_push_pull_output());

        #[cfg(feature = "encoder")]
        let encoder = inputs::encoder::QuadratureEncoder::new(inputs::encoder::Pins {
            a: pins.GPIO.PIN_A8.into_pull_up_input(),
            b: pins.GPIO.PIN_A9.into_pull_up_input(),
        });
        #[cfg(not(feature = "encoder"))]
        let encoder = ();

        #[cfg(feature = "display")]
        let display = outputs::display::SegmentDisplay::new(outputs::display::Pins {
            segments: (
                pins.GPIO.PIN_D9.into_push_pull_output(),
                pins.GPIO.PIN_D7.into_push_pull_output(),
                pins.GPIO.PIN_D4.into_push_pull_output(),
                pins.GPIO.PIN_D2.into_push_pull_output(),
                pins.GPIO.PIN_D10.into_push_pull_output(),
                pins.GPIO.PIN_D8.into_push_pull_output(),
                pins.GPIO.PIN_D3.into_push_pull_output(),
            ),
            digits: (
                pins.GPIO.PIN_D1.into_push_pull_output(),
                pins.GPIO.PIN_D5.into_push_pull_output(),
                pins.GPIO.PIN_D6.into_push_pull_output(),
            ),
        });
        #[cfg(not(feature = "display"))]
        let display = ();

        Self {
            mono,
            status_led,
            inputs,
            outputs,
            tempo_led,
            tick_timer,
            midi_writer,
            encoder,
            display,
        }
    }
}

/// AN5212: Improve application performance when fetching instruction and
/// data, from both internal and external memories.
fn enable_cache(cp: &mut CorePeripherals) {
    cp.SCB.enable_icache();
    cp.SCB.enable_dcache(&mut cp.CPUID);
}
