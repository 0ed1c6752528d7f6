//! Pin map and peripheral bring-up.
//!
//! Segment lines a..g sit on PC0..PC6 with the two active-low position
//! selects on PB0 (ones) and PB1 (tens). The keys hang off PC13..PC15 with
//! internal pull-ups and fire EXTI15_10 on the falling edge. Draw reports
//! leave on USART2 TX (PA2) at 9600 baud.

use hal::gpio::{Edge, ErasedPin, ExtiPin, Input, Output, Pin, PinState};
use hal::pac::USART2;
use hal::prelude::*;
use hal::serial::{Config, Tx};
use stm32f4xx_hal as hal;

use super::keys::Keypad;
use super::serial::Reporter;
use super::sevenseg::SevenSeg;

/// Core clock fed to the systick monotonic.
pub const SYSCLK_HZ: u32 = 168_000_000;

pub type ConfirmKey = Pin<'C', 13, Input>;
pub type FinalizeKey = Pin<'C', 14, Input>;
pub type ResetKey = Pin<'C', 15, Input>;
pub type Keys = Keypad<ConfirmKey, FinalizeKey, ResetKey>;
pub type SegmentDisplay = SevenSeg<ErasedPin<Output>>;
pub type UartReporter = Reporter<Tx<USART2>>;

pub struct Hardware {
    pub display: SegmentDisplay,
    pub keys: Keys,
    pub reporter: UartReporter,
}

pub fn setup(peripherals: hal::pac::Peripherals) -> Hardware {
    let rcc = peripherals.RCC.constrain();
    let clocks = rcc.cfgr.sysclk(168.MHz()).freeze();
    let mut syscfg = peripherals.SYSCFG.constrain();
    let mut exti = peripherals.EXTI;

    let gpioa = peripherals.GPIOA.split();
    let gpiob = peripherals.GPIOB.split();
    let gpioc = peripherals.GPIOC.split();

    let segments = [
        gpioc.pc0.into_push_pull_output().erase(),
        gpioc.pc1.into_push_pull_output().erase(),
        gpioc.pc2.into_push_pull_output().erase(),
        gpioc.pc3.into_push_pull_output().erase(),
        gpioc.pc4.into_push_pull_output().erase(),
        gpioc.pc5.into_push_pull_output().erase(),
        gpioc.pc6.into_push_pull_output().erase(),
    ];
    let selects = [
        gpiob
            .pb0
            .into_push_pull_output_in_state(PinState::High)
            .erase(),
        gpiob
            .pb1
            .into_push_pull_output_in_state(PinState::High)
            .erase(),
    ];

    let mut confirm = gpioc.pc13.into_pull_up_input();
    confirm.make_interrupt_source(&mut syscfg);
    confirm.enable_interrupt(&mut exti);
    confirm.trigger_on_edge(&mut exti, Edge::Falling);

    let mut finalize = gpioc.pc14.into_pull_up_input();
    finalize.make_interrupt_source(&mut syscfg);
    finalize.enable_interrupt(&mut exti);
    finalize.trigger_on_edge(&mut exti, Edge::Falling);

    let mut reset = gpioc.pc15.into_pull_up_input();
    reset.make_interrupt_source(&mut syscfg);
    reset.enable_interrupt(&mut exti);
    reset.trigger_on_edge(&mut exti, Edge::Falling);

    let tx_pin = gpioa.pa2.into_alternate();
    let tx: Tx<USART2> = peripherals
        .USART2
        .tx(tx_pin, Config::default().baudrate(9600.bps()), &clocks)
        .unwrap();

    Hardware {
        display: SevenSeg::new(segments, selects),
        keys: Keypad::new(confirm, finalize, reset),
        reporter: Reporter::new(tx),
    }
}
