//! Display handle
//!
//! [`Oled`] ties the transaction engine, the framebuffer and the refresh
//! pipeline together. They live in one critical-section mutex shared with
//! the bus interrupt; the display lock sits next to it so foreground code
//! can wait on it while interrupts keep running.
//!
//! # Wiring
//!
//! ```text
//! static OLED: StaticCell<Oled<'static, Board>> = ...;
//!
//! #[interrupt]
//! fn TWI() {
//!     OLED.on_interrupt();
//! }
//! ```
//!
//! Drawing goes through a [`FrameGuard`], which holds the display lock.
//! Handing the guard to [`FrameGuard::refresh`] transfers the lock to the
//! pipeline; the interrupt releases it after the last page.

use core::cell::RefCell;
use core::mem;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use pagewire_display::{CanvasExt, DrawParams, Error, Framebuffer};
use pagewire_hal::TwiMaster;

use crate::command;
use crate::config::OledConfig;
use crate::lock::DisplayLock;
use crate::pipeline::{RefreshPipeline, RefreshStep};
use crate::retry::{retry_until, RetryPolicy, Spin};
use crate::twi::{Command, OnComplete, Transaction, TwiEngine, TwiState};

/// State shared with the interrupt handler
struct Shared<'fb, T> {
    engine: TwiEngine<T>,
    framebuffer: Framebuffer<'fb>,
    pipeline: RefreshPipeline,
}

/// One SSD1306-class display on a two-wire bus
pub struct Oled<'fb, T, R = Spin> {
    shared: Mutex<CriticalSectionRawMutex, RefCell<Shared<'fb, T>>>,
    lock: DisplayLock,
    config: OledConfig,
    retry: R,
}

impl<'fb, T: TwiMaster> Oled<'fb, T, Spin> {
    /// Create a display over `buf`, spinning whenever it has to wait
    ///
    /// `buf` must hold at least [`OledConfig::buffer_len`] bytes. Nothing
    /// is sent until [`Oled::init`].
    pub fn new(bus: T, buf: &'fb mut [u8], config: OledConfig) -> Result<Self, Error> {
        Self::with_retry(bus, buf, config, Spin)
    }
}

impl<'fb, T: TwiMaster, R: RetryPolicy> Oled<'fb, T, R> {
    /// Create a display that waits through `retry`
    pub fn with_retry(
        bus: T,
        buf: &'fb mut [u8],
        config: OledConfig,
        retry: R,
    ) -> Result<Self, Error> {
        config.validate()?;
        let framebuffer = Framebuffer::new(buf, config.width, config.height)?;
        let pipeline = RefreshPipeline::new(config.address, config.width, config.num_pages());

        Ok(Self {
            shared: Mutex::new(RefCell::new(Shared {
                engine: TwiEngine::new(bus),
                framebuffer,
                pipeline,
            })),
            lock: DisplayLock::new(),
            config,
            retry,
        })
    }

    fn with_shared<U>(&self, f: impl FnOnce(&mut Shared<'fb, T>) -> U) -> U {
        self.shared.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Display configuration
    pub fn config(&self) -> &OledConfig {
        &self.config
    }

    /// Configure the bus and send the power-up sequence
    ///
    /// Returns immediately; the sequence goes out from interrupt context.
    /// Fails with [`Error::Busy`] if a transaction is already in flight.
    pub fn init(&self) -> Result<(), Error> {
        let accepted = self.with_shared(|s| {
            if !s.engine.is_idle() {
                return false;
            }
            s.engine.configure(self.config.bus);
            s.engine
                .schedule(Transaction::new(self.config.address, command::init()))
                .is_ok()
        });

        if !accepted {
            #[cfg(feature = "defmt")]
            defmt::warn!("init: bus busy");
            return Err(Error::Busy);
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "OLED {}x{} at {=u8:#x}, {} Hz",
            self.config.width,
            self.config.height,
            self.config.address,
            self.config.bus.frequency
        );
        Ok(())
    }

    /// Start `transaction` if no other is in flight
    ///
    /// The payload run indexes into the framebuffer. Fails with
    /// [`Error::Busy`] when the bus is taken and [`Error::InvalidParams`]
    /// when the payload lies outside the framebuffer, the address does
    /// not fit in 7 bits or the completion action is not
    /// [`OnComplete::Nothing`]. Never waits.
    pub fn try_schedule(&self, transaction: Transaction) -> Result<(), Error> {
        // Lock-releasing completions belong to the handle's own commands
        if transaction.address > 0x7F || transaction.on_complete != OnComplete::Nothing {
            return Err(Error::InvalidParams);
        }

        self.with_shared(|s| {
            if transaction.payload.end() > s.framebuffer.as_bytes().len() {
                return Err(Error::InvalidParams);
            }
            s.engine.schedule(transaction).map_err(|_| Error::Busy)
        })
    }

    /// Start `transaction` if the bus is idle; `false` means try again later
    pub fn schedule_transaction(&self, transaction: Transaction) -> bool {
        self.try_schedule(transaction).is_ok()
    }

    /// Schedule `transaction`, honouring its fast-fail flag
    ///
    /// Fast-fail transactions get one attempt. Others are retried through
    /// the retry policy until the bus accepts them.
    pub fn submit(&self, transaction: Transaction) -> Result<(), Error> {
        if transaction.fast_fail {
            return self.try_schedule(transaction);
        }

        retry_until(&self.retry, || match self.try_schedule(transaction.clone()) {
            Err(Error::Busy) => None,
            res => Some(res),
        })
        .unwrap_or(Err(Error::Busy))
    }

    /// Take the display lock, waiting through the retry policy
    pub fn lock(&self) -> Result<FrameGuard<'_, 'fb, T, R>, Error> {
        if self.lock.acquire(&self.retry) {
            Ok(FrameGuard { oled: self })
        } else {
            Err(Error::Busy)
        }
    }

    /// Take the display lock if it is free
    pub fn try_lock(&self) -> Option<FrameGuard<'_, 'fb, T, R>> {
        self.lock.try_acquire().then(|| FrameGuard { oled: self })
    }

    /// Whether a refresh or command currently holds the display lock
    pub fn is_busy(&self) -> bool {
        self.lock.is_held()
    }

    /// Transaction engine state
    pub fn state(&self) -> TwiState {
        self.with_shared(|s| s.engine.state())
    }

    /// `(next page, total pages)` while a refresh is in flight
    pub fn refresh_progress(&self) -> Option<(u8, u8)> {
        self.with_shared(|s| {
            s.pipeline
                .is_active()
                .then(|| (s.pipeline.cur_page(), s.pipeline.num_pages()))
        })
    }

    /// Wait until the lock is free and the bus is idle
    pub fn wait_idle(&self) -> Result<(), Error> {
        retry_until(&self.retry, || {
            (!self.is_busy() && self.state() == TwiState::Idle).then_some(())
        })
        .ok_or(Error::Busy)
    }

    /// Send the whole framebuffer to the display
    ///
    /// Takes the display lock and returns once the first transaction is on
    /// the bus. The remaining pages go out from interrupt context and the
    /// lock is released after the last one.
    pub fn refresh(&self) -> Result<(), Error> {
        self.lock()?.refresh()
    }

    /// Set brightness (contrast), `0..=255`
    pub fn set_brightness(&self, level: u8) -> Result<(), Error> {
        self.send_command(command::brightness(level))
    }

    /// Turn the panel on or off
    pub fn set_display_on(&self, on: bool) -> Result<(), Error> {
        self.send_command(command::display_on(on))
    }

    /// Invert pixel polarity
    pub fn set_inverted(&self, inverted: bool) -> Result<(), Error> {
        self.send_command(command::inverted(inverted))
    }

    /// Bus interrupt handler
    ///
    /// Call once per bus event from the peripheral's interrupt. Never
    /// blocks.
    pub fn on_interrupt(&self) {
        let release = self.with_shared(|s| {
            let Shared {
                engine,
                framebuffer,
                pipeline,
            } = s;

            let Some(done) = engine.on_interrupt(framebuffer.as_bytes()) else {
                return false;
            };

            match done {
                OnComplete::Nothing => false,
                OnComplete::ReleaseLock => true,
                OnComplete::Refresh => match pipeline.advance() {
                    RefreshStep::Send(tx) => {
                        if engine.schedule(tx).is_ok() {
                            return false;
                        }
                        // The engine went idle just before; only a stray
                        // transaction scheduled from this context gets here
                        #[cfg(feature = "defmt")]
                        defmt::error!("refresh: bus taken mid-pipeline, abandoning");
                        pipeline.abort();
                        true
                    }
                    RefreshStep::Finished => {
                        #[cfg(feature = "defmt")]
                        defmt::trace!("refresh complete");
                        true
                    }
                },
            }
        });

        if release {
            self.lock.release();
        }
    }

    /// Start the pipeline; the caller holds the display lock
    fn start_refresh(&self) -> Result<(), Error> {
        let started = retry_until(&self.retry, || {
            self.with_shared(|s| {
                if !s.engine.is_idle() {
                    return None;
                }
                let tx = s.pipeline.start();
                s.engine.schedule(tx).ok()
            })
        });

        if started.is_none() {
            #[cfg(feature = "defmt")]
            defmt::warn!("refresh: bus stayed busy, giving up");
            self.lock.release();
            return Err(Error::Busy);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("refresh started, {} pages", self.config.num_pages());
        Ok(())
    }

    /// Take the lock and send one command, released on completion
    fn send_command(&self, cmd: Command) -> Result<(), Error> {
        self.lock()?.disarm();

        let tx = Transaction::new(self.config.address, cmd).on_complete(OnComplete::ReleaseLock);
        let sent = retry_until(&self.retry, || {
            self.with_shared(|s| s.engine.schedule(tx.clone()).ok())
        });

        if sent.is_none() {
            self.lock.release();
            return Err(Error::Busy);
        }
        Ok(())
    }
}

/// Exclusive access to the framebuffer
///
/// Holds the display lock; dropping the guard releases it. Each drawing
/// call runs inside a short critical section.
pub struct FrameGuard<'a, 'fb, T, R = Spin> {
    oled: &'a Oled<'fb, T, R>,
}

impl<'a, 'fb, T: TwiMaster, R: RetryPolicy> FrameGuard<'a, 'fb, T, R> {
    /// Run `f` with the framebuffer
    ///
    /// `f` must not call back into the display handle.
    pub fn with_framebuffer<U>(&mut self, f: impl FnOnce(&mut Framebuffer<'fb>) -> U) -> U {
        self.oled.with_shared(|s| f(&mut s.framebuffer))
    }

    /// Set or clear one pixel
    pub fn put_pixel(&mut self, x: u8, y: u8, on: bool) -> Result<(), Error> {
        self.with_framebuffer(|fb| fb.put_pixel(x, y, on))
    }

    /// Draw a rectangle between two corners
    pub fn put_rectangle(
        &mut self,
        x0: u8,
        y0: u8,
        x1: u8,
        y1: u8,
        params: DrawParams,
    ) -> Result<(), Error> {
        self.with_framebuffer(|fb| fb.put_rectangle(x0, y0, x1, y1, params))
    }

    /// Draw a line between two points
    pub fn put_line(
        &mut self,
        x0: u8,
        y0: u8,
        x1: u8,
        y1: u8,
        params: DrawParams,
    ) -> Result<(), Error> {
        self.with_framebuffer(|fb| fb.put_line(x0, y0, x1, y1, params))
    }

    /// Read one pixel, `None` outside the display
    pub fn get_pixel(&self, x: u8, y: u8) -> Option<bool> {
        self.oled.with_shared(|s| {
            let fb = &s.framebuffer;
            (x < fb.width() && y < fb.height()).then(|| fb.get_pixel(x, y))
        })
    }

    /// Clear the framebuffer
    pub fn clear(&mut self) {
        self.with_framebuffer(|fb| fb.clear())
    }

    /// Set every pixel to `on`
    pub fn fill(&mut self, on: bool) {
        self.with_framebuffer(|fb| CanvasExt::fill(fb, on))
    }

    /// Send the framebuffer, handing the lock over to the pipeline
    pub fn refresh(self) -> Result<(), Error> {
        let oled = self.oled;
        self.disarm();
        oled.start_refresh()
    }

    /// Keep the lock held past the guard
    fn disarm(self) {
        mem::forget(self);
    }
}

impl<T, R> Drop for FrameGuard<'_, '_, T, R> {
    fn drop(&mut self) {
        self.oled.lock.release();
    }
}
