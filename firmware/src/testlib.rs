use tick_tock_control::input::{Debounced, Level};

use crate::system::inputs::Inputs;

const CYCLES_PER_MS: u32 = 480_000_000 / 1000;

/// Block until the transport button gets clicked.
pub fn sample_until_button_is_clicked(inputs: &mut Inputs) {
    sample_until_clicked(inputs, |inputs| inputs.buttons.transport());
}

/// Block until the tap button gets clicked.
pub fn sample_until_tap_is_clicked(inputs: &mut Inputs) {
    sample_until_clicked(inputs, |inputs| inputs.buttons.tap());
}

fn sample_until_clicked(inputs: &mut Inputs, mut sample: impl FnMut(&mut Inputs) -> Level) {
    let mut button = Debounced::active_low();
    let mut now_ms: u32 = 0;
    while button.poll(sample(inputs), now_ms).is_none() {
        cortex_m::asm::delay(CYCLES_PER_MS);
        now_ms = now_ms.wrapping_add(1);
    }
}

pub fn delay_ms(ms: u32) {
    for _ in 0..ms {
        cortex_m::asm::delay(CYCLES_PER_MS);
    }
}
