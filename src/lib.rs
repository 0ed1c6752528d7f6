#![cfg_attr(not(test), no_std)]

#[cfg(feature = "hardware")]
use defmt_brtt as _; // global logger

#[cfg(feature = "hardware")]
use panic_probe as _;

#[cfg(feature = "hardware")]
use stm32f4xx_hal as _; // memory layout

pub mod game;
pub mod hardware;

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is
// invoked
#[cfg(feature = "hardware")]
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}

/// Terminates the application and makes `probe-run` exit with exit-code = 0
#[cfg(feature = "hardware")]
pub fn exit() -> ! {
    loop {
        cortex_m::asm::bkpt();
    }
}
