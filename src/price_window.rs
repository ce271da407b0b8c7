use crate::{Price, ring_buffer::RingBuffer};

#[derive(Clone, Debug)]
pub(crate) struct PriceWindow {
    window: RingBuffer,
    /// Running sum of values in the window. Maintained incrementally via
    /// add/subtract, may accumulate FP rounding drift over very long runs,
    /// but negligible for typical window sizes on daily or intraday bars.
    sum: Price,
}

impl PriceWindow {
    pub fn new(size: usize) -> Self {
        Self {
            window: RingBuffer::new(size),
            sum: 0.0,
        }
    }

    #[inline]
    pub fn push(&mut self, price: Price) {
        if let Some(old_price) = self.window.push(price) {
            self.sum -= old_price;
        }

        self.sum += price;
    }

    #[inline]
    pub fn sum(&self) -> Option<Price> {
        self.window.is_full().then_some(self.sum)
    }

    /// Population variance of the window, `None` until full.
    ///
    /// Recomputed from the stored values with deviations taken from the
    /// oldest one, so large price levels do not cancel and a flat window
    /// gives exactly zero.
    pub fn variance(&self) -> Option<f64> {
        if !self.window.is_full() {
            return None;
        }

        let mut values = self.window.iter();
        let pivot = values.next()?;
        let (sum, sum_of_squares) = values.fold((0.0, 0.0), |(sum, squares), value| {
            let deviation = value - pivot;
            (sum + deviation, deviation.mul_add(deviation, squares))
        });

        #[allow(clippy::cast_precision_loss)]
        let n = self.window.len() as f64;
        let mean = sum / n;

        Some((sum_of_squares / n - mean * mean).max(0.0))
    }
}
