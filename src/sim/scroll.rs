//! Drift-free fixed-point scrolling
//!
//! Scroll distance is tracked as an integer pixel count plus a numerator
//! remainder against a fixed denominator. Whole pixels are then converted
//! into whole meters the same way, so both counters stay exact no matter how
//! many frames run.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Rational scroll rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollRates {
    /// Pixels per frame numerator
    pub px_num: i64,
    /// Pixels per frame denominator
    pub px_denom: i64,
    /// Meters per pixel numerator
    pub meter_num: i64,
    /// Meters per pixel denominator
    pub meter_denom: i64,
    /// Top speed as a multiple of the base speed
    pub factor_max: i64,
}

impl Default for ScrollRates {
    fn default() -> Self {
        Self {
            px_num: SCROLL_PX_PER_FRAME_NUM,
            px_denom: SCROLL_PX_PER_FRAME_DENOM,
            meter_num: SCROLL_METER_PER_PX_NUM,
            meter_denom: SCROLL_METER_PER_PX_DENOM,
            factor_max: SCROLL_FACTOR_MAX,
        }
    }
}

/// Map looping for the non-competitive mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLoop {
    /// Loop once the scroll position passes this pixel
    pub end_pixel: i32,
    /// Scroll position right after a loop
    pub restart_pixel: i32,
}

impl Default for MapLoop {
    fn default() -> Self {
        Self {
            end_pixel: MAP_END_PIXEL,
            restart_pixel: MAP_REPEATED_START_PIXEL,
        }
    }
}

/// Outcome of one [`FixedPointScroller::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollStep {
    Advanced,
    /// The map looped before advancing; live entities must be cleared
    Wrapped,
}

/// Integer scroll counters with exact sub-pixel accumulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedPointScroller {
    rates: ScrollRates,
    map_loop: Option<MapLoop>,
    scrolled_pixels: i32,
    pixel_remainder: i64,
    scrolled_meters: u32,
    meter_remainder: i64,
}

impl FixedPointScroller {
    pub fn new(rates: ScrollRates, map_loop: Option<MapLoop>) -> Self {
        debug_assert!(rates.px_denom > 0 && rates.meter_denom > 0);
        Self {
            rates,
            map_loop,
            scrolled_pixels: 0,
            pixel_remainder: 0,
            scrolled_meters: 0,
            meter_remainder: 0,
        }
    }

    /// Reset all counters, placing the scroll position at `start_pixel`
    pub fn reset(&mut self, start_pixel: i32) {
        self.scrolled_pixels = start_pixel;
        self.pixel_remainder = 0;
        self.scrolled_meters = 0;
        self.meter_remainder = 0;
    }

    #[inline]
    pub fn scrolled_pixels(&self) -> i32 {
        self.scrolled_pixels
    }

    #[inline]
    pub fn scrolled_meters(&self) -> u32 {
        self.scrolled_meters
    }

    #[inline]
    pub fn pixel_remainder(&self) -> i64 {
        self.pixel_remainder
    }

    #[inline]
    pub fn meter_remainder(&self) -> i64 {
        self.meter_remainder
    }

    pub fn rates(&self) -> &ScrollRates {
        &self.rates
    }

    /// Numerator added this frame for an acceleration factor in [0, 1]
    ///
    /// The boost is rounded to whole numerator units so the accumulator never
    /// holds a fraction.
    pub fn frame_numerator(&self, accel_factor: f32) -> i64 {
        let factor = accel_factor.clamp(0.0, 1.0) as f64;
        let boost = ((self.rates.factor_max - 1) as f64 * factor * self.rates.px_num as f64).round();
        self.rates.px_num + boost as i64
    }

    /// Advance one frame
    pub fn advance(&mut self, accel_factor: f32) -> ScrollStep {
        let mut step = ScrollStep::Advanced;
        let wrap = self
            .map_loop
            .filter(|map_loop| self.scrolled_pixels > map_loop.end_pixel);
        if let Some(map_loop) = wrap {
            log::info!(
                "Map end reached at {}px, looping to {}px",
                self.scrolled_pixels,
                map_loop.restart_pixel
            );
            self.scrolled_pixels = map_loop.restart_pixel;
            self.pixel_remainder = 0;
            step = ScrollStep::Wrapped;
        }

        self.pixel_remainder += self.frame_numerator(accel_factor);
        while self.pixel_remainder >= self.rates.px_denom {
            self.scrolled_pixels += 1;
            self.pixel_remainder -= self.rates.px_denom;

            self.meter_remainder += self.rates.meter_num;
            while self.meter_remainder >= self.rates.meter_denom {
                self.scrolled_meters += 1;
                self.meter_remainder -= self.rates.meter_denom;
            }
        }
        step
    }
}
