use crate::color::{hsl_to_rgb, Rgb};
use std::sync::{Arc, Mutex};

/// Lower bound of the hue band (green).
const HUE_FLOOR: u16 = 120;
/// Upper bound of the hue band (blue).
const HUE_CEIL: u16 = 240;
/// Consecutive hues must differ by at least this many degrees.
const MIN_HUE_GAP: u16 = 20;

/// Saturation of generated backgrounds: vibrant but not neon.
const BG_SATURATION: f32 = 60.0;
/// Low lightness keeps the tint subtle on dark terminals.
const BG_LIGHTNESS: f32 = 8.25;

/// A scheduler shared between the emitting layer and its tint stream.
pub type SharedScheduler = Arc<Mutex<HueScheduler>>;

/// Picks background colors within the green-to-blue hue band, keeping each
/// new hue at least [`MIN_HUE_GAP`] degrees away from the previous one so
/// consecutive log records are visually distinguishable.
#[derive(Debug)]
pub struct HueScheduler {
    last_hue: Option<u16>,
    current: Option<Rgb>,
    rng: fastrand::Rng,
}

impl HueScheduler {
    pub fn new() -> Self {
        Self {
            last_hue: None,
            current: None,
            rng: fastrand::Rng::new(),
        }
    }

    /// Scheduler with a deterministic sampling sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            last_hue: None,
            current: None,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn shared() -> SharedScheduler {
        Arc::new(Mutex::new(Self::new()))
    }

    /// The most recently generated color, generating one on first use so
    /// output is never left untinted.
    pub fn latest(&mut self) -> Rgb {
        match self.current {
            Some(color) => color,
            None => self.generate(),
        }
    }

    /// Pick a fresh background color.
    ///
    /// The hue is sampled uniformly from the band minus an exclusion zone of
    /// [`MIN_HUE_GAP`] degrees on either side of the previous hue, clipped at
    /// the band edges.
    pub fn generate(&mut self) -> Rgb {
        let (left_gap, right_gap) = match self.last_hue {
            Some(last) => (
                (last - HUE_FLOOR).min(MIN_HUE_GAP),
                (HUE_CEIL - last).min(MIN_HUE_GAP),
            ),
            None => (0, 0),
        };

        let span = HUE_CEIL - HUE_FLOOR - left_gap - right_gap;
        let sample = self.rng.u16(0..span) + HUE_FLOOR;

        // Samples below the exclusion zone pass through; the rest shift past
        // it. When the previous hue sits within MIN_HUE_GAP of the floor the
        // pass-through branch is unreachable (last - MIN_HUE_GAP < HUE_FLOOR)
        // and every sample shifts, still landing inside the band.
        let hue = match self.last_hue {
            Some(last) if sample < last - MIN_HUE_GAP => sample,
            _ => sample + left_gap + right_gap,
        };

        self.last_hue = Some(hue);
        let color = hsl_to_rgb(f32::from(hue), BG_SATURATION, BG_LIGHTNESS);
        self.current = Some(color);
        color
    }
}

impl Default for HueScheduler {
    fn default() -> Self {
        Self::new()
    }
}
