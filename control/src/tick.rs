//! The real-time core, run once per clock tick from a timer interrupt.

use crate::midi::MidiSink;
use crate::shared::SharedState;
use crate::tempo::{calc_period, PPQ};

/// Number of ticks per quarter note during which the tempo LED is lit.
pub const TEMPO_INDICATOR_TICKS: u8 = 4;

/// Outcome of a single tick, to be applied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutput {
    pub tempo_indicator: bool,
    /// New timer period in microseconds. Present only when the tempo
    /// changed since the timer was last programmed.
    pub reprogram: Option<u32>,
}

/// Tick generator owning the tick counter.
///
/// The caller is expected to run `tick` from a recurring timer. The
/// timer's period is owned by the generator too: once the shared tempo
/// changes, the next `tick` asks for the timer to be reprogrammed. Applied
/// right after the update event, the new period starts with the following
/// tick, so no tick is lost or doubled at the boundary.
///
/// Nothing in here blocks and the work done per tick is constant.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickGenerator {
    counter: u8,
    seen_epoch: u32,
    programmed_tempo: u16,
}

impl TickGenerator {
    /// The timer is expected to get programmed with `period()` right after.
    #[must_use]
    pub fn new(shared: &SharedState) -> Self {
        Self {
            counter: 0,
            seen_epoch: shared.transport().epoch,
            programmed_tempo: shared.tempo.get(),
        }
    }

    pub fn tick(&mut self, shared: &SharedState, midi: &mut impl MidiSink) -> TickOutput {
        let transport = shared.transport();
        if transport.epoch != self.seen_epoch {
            self.seen_epoch = transport.epoch;
            self.counter = 0;
        }

        if transport.running {
            midi.send_clock_tick();
        }

        let tempo_indicator = self.counter < TEMPO_INDICATOR_TICKS;
        self.counter = (self.counter + 1) % PPQ as u8;

        let tempo = shared.tempo.get();
        let reprogram = if tempo == self.programmed_tempo {
            None
        } else {
            self.programmed_tempo = tempo;
            Some(calc_period(tempo))
        };

        TickOutput {
            tempo_indicator,
            reprogram,
        }
    }

    /// Position of the next tick within the quarter note.
    #[must_use]
    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// Period in microseconds the timer is currently programmed for.
    #[must_use]
    pub fn period(&self) -> u32 {
        calc_period(self.programmed_tempo)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;

    use proptest::prelude::*;

    use super::*;
    use crate::midi::testing::Recorder;
    use crate::midi::{MidiMessage, MidiSink};
    use crate::tempo::{TEMPO_MAX, TEMPO_MIN};
    use crate::transport::Transport;

    #[test]
    fn when_initialized_period_matches_default_tempo() {
        let shared = SharedState::new();
        let generator = TickGenerator::new(&shared);
        assert_eq!(generator.period(), 20_833);
        assert_eq!(generator.counter(), 0);
    }

    #[test]
    fn counter_cycles_through_quarter_note() {
        let shared = SharedState::new();
        let mut midi = Recorder::default();
        let mut generator = TickGenerator::new(&shared);

        for cycle in 0..3 {
            for expected in 0..24 {
                assert_eq!(generator.counter(), expected, "cycle {cycle}");
                generator.tick(&shared, &mut midi);
            }
        }
        assert_eq!(generator.counter(), 0);
    }

    #[test]
    fn tempo_indicator_is_lit_for_first_four_ticks() {
        let shared = SharedState::new();
        let mut midi = Recorder::default();
        let mut generator = TickGenerator::new(&shared);

        for _ in 0..3 {
            for position in 0..24 {
                let output = generator.tick(&shared, &mut midi);
                assert_eq!(output.tempo_indicator, position < 4, "tick {position}");
            }
        }
    }

    #[test]
    fn when_stopped_ticks_are_counted_but_not_sent() {
        let shared = SharedState::new();
        let mut midi = Recorder::default();
        let mut generator = TickGenerator::new(&shared);

        for _ in 0..10 {
            generator.tick(&shared, &mut midi);
        }

        assert!(midi.messages.is_empty());
        assert_eq!(generator.counter(), 10);
    }

    #[test]
    fn when_started_counter_is_reset_before_first_clock() {
        let shared = SharedState::new();
        let mut midi = Recorder::default();
        let mut generator = TickGenerator::new(&shared);
        let mut transport = Transport::new();
        for _ in 0..7 {
            generator.tick(&shared, &mut midi);
        }

        transport.toggle(&shared, &mut midi);
        let output = generator.tick(&shared, &mut midi);

        assert_eq!(midi.messages, [MidiMessage::Start, MidiMessage::Clock]);
        assert!(output.tempo_indicator);
        assert_eq!(generator.counter(), 1);
    }

    #[test]
    fn when_stopped_counter_keeps_advancing_without_clocks() {
        let shared = SharedState::new();
        let mut midi = Recorder::default();
        let mut generator = TickGenerator::new(&shared);
        let mut transport = Transport::new();

        transport.toggle(&shared, &mut midi);
        for _ in 0..5 {
            generator.tick(&shared, &mut midi);
        }
        transport.toggle(&shared, &mut midi);
        midi.clear();
        for _ in 0..5 {
            generator.tick(&shared, &mut midi);
        }

        assert_eq!(midi.count(MidiMessage::Clock), 0);
        assert_eq!(generator.counter(), 10);
    }

    #[test]
    fn when_restarted_without_tick_in_between_counter_is_still_reset() {
        let shared = SharedState::new();
        let mut midi = Recorder::default();
        let mut generator = TickGenerator::new(&shared);
        let mut transport = Transport::new();

        transport.toggle(&shared, &mut midi);
        for _ in 0..5 {
            generator.tick(&shared, &mut midi);
        }
        transport.toggle(&shared, &mut midi);
        transport.toggle(&shared, &mut midi);
        generator.tick(&shared, &mut midi);

        assert_eq!(generator.counter(), 1);
    }

    #[test]
    fn when_tempo_changes_reprogramming_is_requested_once() {
        let shared = SharedState::new();
        let mut midi = Recorder::default();
        let mut generator = TickGenerator::new(&shared);

        assert_eq!(generator.tick(&shared, &mut midi).reprogram, None);
        shared.tempo.set(150);
        assert_eq!(generator.tick(&shared, &mut midi).reprogram, Some(16_666));
        assert_eq!(generator.tick(&shared, &mut midi).reprogram, None);
        assert_eq!(generator.period(), 16_666);
    }

    #[test]
    fn when_tempo_changes_back_and_forth_between_ticks_nothing_is_reprogrammed() {
        let shared = SharedState::new();
        let mut midi = Recorder::default();
        let mut generator = TickGenerator::new(&shared);

        shared.tempo.adjust(1);
        shared.tempo.adjust(-1);
        assert_eq!(generator.tick(&shared, &mut midi).reprogram, None);
    }

    /// Counts clocks between the starts of quarter notes.
    #[derive(Default)]
    struct QuarterNotes {
        clocks: usize,
        lengths: std::vec::Vec<usize>,
    }

    impl MidiSink for QuarterNotes {
        fn send(&mut self, message: MidiMessage) {
            if message == MidiMessage::Clock {
                self.clocks += 1;
            }
        }
    }

    proptest! {
        #[test]
        fn tempo_changes_never_alter_clocks_per_quarter_note(
            changes in proptest::collection::vec(
                (0usize..24, TEMPO_MIN..=TEMPO_MAX),
                0..64,
            ),
        ) {
            let shared = SharedState::new();
            let mut midi = QuarterNotes::default();
            let mut generator = TickGenerator::new(&shared);
            let mut transport = Transport::new();
            transport.toggle(&shared, &mut midi);

            let mut changes = changes.into_iter();
            for _ in 0..64 {
                let change = changes.next();
                for position in 0..24 {
                    if let Some((at, tempo)) = change {
                        if at == position {
                            shared.tempo.set(u32::from(tempo));
                        }
                    }
                    generator.tick(&shared, &mut midi);
                }
                prop_assert_eq!(generator.counter(), 0);
                midi.lengths.push(midi.clocks);
                midi.clocks = 0;
            }

            prop_assert!(midi.lengths.iter().all(|length| *length == 24));
        }
    }

    #[test]
    fn when_tempo_is_changed_from_another_thread_every_tick_is_still_sent() {
        struct Counter(usize);

        impl MidiSink for Counter {
            fn send(&mut self, message: MidiMessage) {
                if message == MidiMessage::Clock {
                    self.0 += 1;
                }
            }
        }

        let shared = Arc::new(SharedState::new());
        let done = Arc::new(AtomicBool::new(false));
        let mut transport = Transport::new();
        transport.toggle(&shared, &mut Counter(0));

        let adjuster = {
            let shared = Arc::clone(&shared);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut offset = 1;
                while !done.load(Ordering::SeqCst) {
                    shared.tempo.adjust(offset);
                    offset = -offset;
                }
            })
        };

        let mut midi = Counter(0);
        let mut generator = TickGenerator::new(&shared);
        for quarter_note in 0..1000 {
            let before = midi.0;
            for _ in 0..24 {
                generator.tick(&shared, &mut midi);
            }
            assert_eq!(midi.0 - before, 24, "quarter note {quarter_note}");
            assert_eq!(generator.counter(), 0);
        }

        done.store(true, Ordering::SeqCst);
        adjuster.join().unwrap();
    }
}
