#![no_main]
#![no_std]

use tick_tock_firmware as _; // global logger + panicking-behavior

use tick_tock_control::SharedState;

/// Tempo and transport, written by the control task and read by the tick
/// task. Both reach it without locks.
static SHARED: SharedState = SharedState::new();

#[rtic::app(device = stm32h7xx_hal::pac, peripherals = true, dispatchers = [EXTI0, EXTI1])]
mod app {
    use daisy::led::{Led, LedUser};
    use fugit::ExtU64;
    use systick_monotonic::Systick;

    use tick_tock_control::{ControlLoop, TickGenerator};
    use tick_tock_firmware::system::clock::TickTimer;
    use tick_tock_firmware::system::inputs::Inputs;
    use tick_tock_firmware::system::midi::{MidiQueue, MidiWriter};
    use tick_tock_firmware::system::outputs::leds::TempoLed;
    use tick_tock_firmware::system::outputs::Outputs;
    use tick_tock_firmware::system::{Display, Encoder, System};

    use super::SHARED;

    const BLINKS: u8 = 1;

    #[monotonic(binds = SysTick, default = true)]
    type Mono = Systick<1000>; // 1 kHz / 1 ms granularity

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        status_led: LedUser,
        inputs: Inputs,
        outputs: Outputs,
        control_loop: ControlLoop<Encoder, Display>,
        tick_timer: TickTimer,
        tick_generator: TickGenerator,
        tempo_led: TempoLed,
        midi_writer: MidiWriter,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::info!("INIT");

        let system = System::init(cx.core, cx.device);
        let mono = system.mono;
        let status_led = system.status_led;
        let inputs = system.inputs;
        let outputs = system.outputs;
        let tempo_led = system.tempo_led;
        let midi_writer = system.midi_writer;
        let mut tick_timer = system.tick_timer;

        let control_loop = ControlLoop::new(system.encoder, system.display);
        let tick_generator = TickGenerator::new(&SHARED);
        tick_timer.start(tick_generator.period());

        control::spawn().unwrap();
        blink::spawn(true, BLINKS).unwrap();

        (
            Shared {},
            Local {
                status_led,
                inputs,
                outputs,
                control_loop,
                tick_timer,
                tick_generator,
                tempo_led,
                midi_writer,
            },
            init::Monotonics(mono),
        )
    }

    #[task(binds = UART4, local = [midi_writer], priority = 3)]
    fn midi_out(cx: midi_out::Context) {
        cx.local.midi_writer.flush();
    }

    #[task(binds = TIM2, local = [tick_timer, tick_generator, tempo_led], priority = 2)]
    fn tick(cx: tick::Context) {
        let tick_timer = cx.local.tick_timer;
        tick_timer.clear_irq();

        let output = cx.local.tick_generator.tick(&SHARED, &mut MidiQueue);
        cx.local.tempo_led.set(output.tempo_indicator);

        if let Some(period) = output.reprogram {
            tick_timer.set_period(period);
        }
    }

    #[task(local = [inputs, outputs, control_loop], priority = 1)]
    fn control(cx: control::Context) {
        control::spawn_after(1.millis()).unwrap();

        let snapshot = cx.local.inputs.snapshot();
        let desired = cx.local.control_loop.poll(snapshot, &SHARED, &mut MidiQueue);
        cx.local.outputs.set(&desired);
    }

    #[task(local = [status_led])]
    fn blink(cx: blink::Context, on: bool, blinks: u8) {
        let time_on = 200.millis();
        let time_off_short = 200.millis();
        let time_off_long = 2.secs();

        if on {
            cx.local.status_led.on();
            blink::spawn_after(time_on, false, blinks).unwrap();
        } else {
            cx.local.status_led.off();
            if blinks > 1 {
                blink::spawn_after(time_off_short, true, blinks - 1).unwrap();
            } else {
                blink::spawn_after(time_off_long, true, BLINKS).unwrap();
            }
        }
    }
}
