#![no_main]
#![no_std]
#![feature(type_alias_impl_trait)]
use lotto_box::{self as _};
use rtic::app;

#[app(
    device = stm32f4xx_hal::pac,
    peripherals = true,
    dispatchers = [CAN1_TX, CAN1_RX0, CAN1_RX1]
)]
mod app {
    use fugit::TimerInstantU32;
    use lotto_box::game::{DrumCommand, Game, Key};
    use lotto_box::hardware::{self, Keys, SegmentDisplay, UartReporter};
    use rtic_monotonics::systick::*;
    use rtic_monotonics::Monotonic;
    use rtic_sync::{channel::*, make_channel};
    use stm32f4xx_hal::gpio::ExtiPin;

    defmt::timestamp!("tick {}", Systick::now().ticks());
    type Instant = TimerInstantU32<1_000>;

    const CAPACITY: usize = 8;
    /// Display refresh period; every tick relights the other position.
    const MUX_PERIOD_MS: u32 = 5;
    /// Drum cadence while the draw is running.
    const DRAW_PERIOD_MS: u32 = 2_500;
    /// Key settle window, restarted by every edge inside it.
    const SETTLE_MS: u32 = 600;

    #[shared]
    struct Shared {
        game: Game,
        keys: Keys,
    }
    #[local]
    struct Local {
        display: SegmentDisplay,
        reporter: UartReporter,
        edge_sender: Sender<'static, Key, CAPACITY>,
    }
    #[init]
    fn init(cx: init::Context) -> (Shared, Local) {
        defmt::info!("init");

        // Initialize hardware
        let hardware = hardware::setup(cx.device);

        let systick_mono_token = rtic_monotonics::create_systick_token!();
        Systick::start(cx.core.SYST, hardware::SYSCLK_HZ, systick_mono_token);

        let (edge_sender, edge_receiver) = make_channel!(Key, CAPACITY);
        let (drum_sender, drum_receiver) = make_channel!(DrumCommand, CAPACITY);

        mux::spawn().unwrap();
        drum::spawn(drum_receiver).unwrap();
        debounce::spawn(edge_receiver, drum_sender).unwrap();

        (
            Shared {
                game: Game::new(),
                keys: hardware.keys,
            },
            Local {
                display: hardware.display,
                reporter: hardware.reporter,
                edge_sender,
            },
        )
    }

    /// Display refresh. Highest priority, so the lit position never lingers.
    #[task(priority = 3, shared = [game], local = [display])]
    async fn mux(mut cx: mux::Context) {
        let mut next = Systick::now() + MUX_PERIOD_MS.millis();
        loop {
            Systick::delay_until(next).await;
            next += MUX_PERIOD_MS.millis();
            let digits = cx.shared.game.lock(|game| game.digits());
            cx.local.display.step(digits);
        }
    }

    /// The draw drum. Ticks every 2.5 s while running; control messages take
    /// priority over the tick and can suspend or restart the cadence.
    #[task(priority = 1, shared = [game])]
    async fn drum(
        mut cx: drum::Context,
        mut receiver: Receiver<'static, DrumCommand, CAPACITY>,
    ) {
        // Running from boot, first draw one period in.
        let mut deadline: Option<Instant> =
            Some(Systick::now() + DRAW_PERIOD_MS.millis());
        loop {
            let command = match deadline {
                Some(at) => {
                    match Systick::timeout_at(at, receiver.recv()).await {
                        // A command beats the pending tick
                        Ok(command) => command.unwrap(),
                        // On timeout the drum turns
                        Err(_) => {
                            let drawn =
                                cx.shared.game.lock(|game| game.draw());
                            defmt::debug!("drawn {=u8}", drawn);
                            deadline = Some(at + DRAW_PERIOD_MS.millis());
                            continue;
                        }
                    }
                }
                // Suspended, wait for a command
                None => receiver.recv().await.unwrap(),
            };
            match command {
                DrumCommand::Stop => deadline = None,
                DrumCommand::Start => {
                    if deadline.is_none() {
                        deadline =
                            Some(Systick::now() + DRAW_PERIOD_MS.millis());
                    }
                }
                DrumCommand::Restart => {
                    cx.shared.game.lock(|game| game.reseed());
                    deadline = Some(Systick::now() + DRAW_PERIOD_MS.millis());
                }
            }
        }
    }

    /// Key settling and dispatch. The first edge arms a 600 ms window and
    /// every further edge restarts it; only the level found when the window
    /// runs out performs an action.
    #[task(priority = 2, shared = [game, keys], local = [reporter])]
    async fn debounce(
        mut cx: debounce::Context,
        mut edges: Receiver<'static, Key, CAPACITY>,
        mut drum_sender: Sender<'static, DrumCommand, CAPACITY>,
    ) {
        loop {
            let armed_by = edges.recv().await.unwrap();
            defmt::debug!("settle window armed by {}", armed_by);
            let mut deadline = Systick::now() + SETTLE_MS.millis();
            loop {
                match Systick::timeout_at(deadline, edges.recv()).await {
                    Ok(edge) => {
                        edge.unwrap();
                        deadline = Systick::now() + SETTLE_MS.millis();
                    }
                    Err(_) => break,
                }
            }
            let Some(key) = cx.shared.keys.lock(|keys| keys.sample()) else {
                // Released again before the window closed
                continue;
            };
            let (outcome, draws) = cx.shared.game.lock(|game| {
                let outcome = game.press(key);
                (outcome, game.draws())
            });
            defmt::info!("{} settled, draws {=u8}", key, draws);
            if let Some(byte) = outcome.emit {
                cx.local.reporter.send(byte);
            }
            if let Some(command) = outcome.drum {
                drum_sender.try_send(command).unwrap();
            }
        }
    }

    #[task(binds = EXTI15_10, priority = 2, shared = [keys], local = [edge_sender])]
    fn keys_handler(mut cx: keys_handler::Context) {
        cx.shared.keys.lock(|keys| {
            if keys.confirm.check_interrupt() {
                keys.confirm.clear_interrupt_pending_bit();
                // A full queue means the window is already armed
                cx.local.edge_sender.try_send(Key::Confirm).ok();
            }
            if keys.finalize.check_interrupt() {
                keys.finalize.clear_interrupt_pending_bit();
                cx.local.edge_sender.try_send(Key::Finalize).ok();
            }
            if keys.reset.check_interrupt() {
                keys.reset.clear_interrupt_pending_bit();
                cx.local.edge_sender.try_send(Key::Reset).ok();
            }
        });
    }

    #[idle]
    fn idle(_: idle::Context) -> ! {
        loop {
            cortex_m::asm::wfi();
        }
    }
}
