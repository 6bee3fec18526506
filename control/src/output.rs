/// Desired state of output peripherals driven from the control loop.
///
/// The tempo LED is not in here. It is driven by the timer context, see
/// `TickOutput`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DesiredOutput {
    pub running_indicator: bool,
}
