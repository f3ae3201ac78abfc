// Tick flag signaling between the timer ISR and the main loop
//
// The ISR sets an atomic flag; the main loop consumes it via
// try_wake(). Critical section guards riscv32imc (no atomic RMW).
// Wall time comes from board::now_ms(), not from counting ticks.

use core::sync::atomic::{AtomicBool, Ordering};

pub const TICK_MS: u32 = 10;

static WAKE_TIMER: AtomicBool = AtomicBool::new(false);

#[inline]
pub fn signal_timer() {
    WAKE_TIMER.store(true, Ordering::Release);
}

/// True once per timer tick since the last call.
pub fn try_wake() -> bool {
    critical_section::with(|_| {
        let fired = WAKE_TIMER.load(Ordering::Relaxed);
        if fired {
            WAKE_TIMER.store(false, Ordering::Relaxed);
        }
        fired
    })
}

#[inline]
pub fn wait_for_interrupt() {
    #[cfg(target_arch = "riscv32")]
    unsafe {
        core::arch::asm!("wfi", options(nomem, nostack));
    }

    #[cfg(not(target_arch = "riscv32"))]
    core::hint::spin_loop();
}
