#![forbid(unsafe_code)]

//! Easing curves: closed-form maps from linear progress `p ∈ [0, 1]` to
//! eased progress.
//!
//! Every curve satisfies `f(0) == 0` and `f(1) == 1` (up to floating-point
//! error). Elastic and back curves leave `[0, 1]` on the way; bounce curves
//! stay inside it.
//!
//! | Family | In | Out | InOut |
//! |--------|----|-----|-------|
//! | polynomial (quadratic … quintic) | `p^n` | `1 - (1-p)^n` | piecewise |
//! | sine | quarter wave | quarter wave | half wave |
//! | circular | unit circle quadrant | | piecewise |
//! | exponential | `2^(10(p-1))` | `1 - 2^(-10p)` | piecewise |
//! | elastic | damped sine | | piecewise |
//! | back | `p³ - p·sin(pπ)` | | piecewise |
//! | bounce | mirrored out | parabolic hops | piecewise |

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

/// Named easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Easing {
    #[default]
    Linear,
    QuadraticIn,
    QuadraticOut,
    QuadraticInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuarticIn,
    QuarticOut,
    QuarticInOut,
    QuinticIn,
    QuinticOut,
    QuinticInOut,
    SineIn,
    SineOut,
    SineInOut,
    CircularIn,
    CircularOut,
    CircularInOut,
    ExponentialIn,
    ExponentialOut,
    ExponentialInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    BackIn,
    BackOut,
    BackInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
}

impl Easing {
    /// Every curve, in declaration order.
    pub const ALL: [Easing; 31] = [
        Easing::Linear,
        Easing::QuadraticIn,
        Easing::QuadraticOut,
        Easing::QuadraticInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::QuarticIn,
        Easing::QuarticOut,
        Easing::QuarticInOut,
        Easing::QuinticIn,
        Easing::QuinticOut,
        Easing::QuinticInOut,
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::CircularIn,
        Easing::CircularOut,
        Easing::CircularInOut,
        Easing::ExponentialIn,
        Easing::ExponentialOut,
        Easing::ExponentialInOut,
        Easing::ElasticIn,
        Easing::ElasticOut,
        Easing::ElasticInOut,
        Easing::BackIn,
        Easing::BackOut,
        Easing::BackInOut,
        Easing::BounceIn,
        Easing::BounceOut,
        Easing::BounceInOut,
    ];

    /// Map linear progress `p` through the curve.
    #[must_use]
    pub fn apply(self, p: f64) -> f64 {
        match self {
            Self::Linear => p,
            Self::QuadraticIn => p * p,
            Self::QuadraticOut => -(p * (p - 2.0)),
            Self::QuadraticInOut => quadratic_in_out(p),
            Self::CubicIn => p * p * p,
            Self::CubicOut => {
                let f = p - 1.0;
                f * f * f + 1.0
            }
            Self::CubicInOut => cubic_in_out(p),
            Self::QuarticIn => p * p * p * p,
            Self::QuarticOut => {
                let f = p - 1.0;
                f * f * f * (1.0 - p) + 1.0
            }
            Self::QuarticInOut => quartic_in_out(p),
            Self::QuinticIn => p * p * p * p * p,
            Self::QuinticOut => {
                let f = p - 1.0;
                f * f * f * f * f + 1.0
            }
            Self::QuinticInOut => quintic_in_out(p),
            Self::SineIn => ((p - 1.0) * FRAC_PI_2).sin() + 1.0,
            Self::SineOut => (p * FRAC_PI_2).sin(),
            Self::SineInOut => 0.5 * (1.0 - (p * PI).cos()),
            Self::CircularIn => 1.0 - (1.0 - p * p).max(0.0).sqrt(),
            Self::CircularOut => ((2.0 - p) * p).max(0.0).sqrt(),
            Self::CircularInOut => circular_in_out(p),
            Self::ExponentialIn => {
                if p == 0.0 {
                    p
                } else {
                    2f64.powf(10.0 * (p - 1.0))
                }
            }
            Self::ExponentialOut => {
                if p == 1.0 {
                    p
                } else {
                    1.0 - 2f64.powf(-10.0 * p)
                }
            }
            Self::ExponentialInOut => exponential_in_out(p),
            Self::ElasticIn => (13.0 * FRAC_PI_2 * p).sin() * 2f64.powf(10.0 * (p - 1.0)),
            Self::ElasticOut => {
                (-13.0 * FRAC_PI_2 * (p + 1.0)).sin() * 2f64.powf(-10.0 * p) + 1.0
            }
            Self::ElasticInOut => elastic_in_out(p),
            Self::BackIn => back(p),
            Self::BackOut => 1.0 - back(1.0 - p),
            Self::BackInOut => {
                if p < 0.5 {
                    0.5 * back(2.0 * p)
                } else {
                    0.5 * (1.0 - back(2.0 - 2.0 * p)) + 0.5
                }
            }
            Self::BounceIn => 1.0 - bounce_out(1.0 - p),
            Self::BounceOut => bounce_out(p),
            Self::BounceInOut => {
                if p < 0.5 {
                    0.5 * (1.0 - bounce_out(1.0 - p * 2.0))
                } else {
                    0.5 * bounce_out(p * 2.0 - 1.0) + 0.5
                }
            }
        }
    }

    /// Whether the curve leaves `[0, 1]` for some input in `[0, 1]`.
    pub const fn overshoots(self) -> bool {
        matches!(
            self,
            Self::ElasticIn
                | Self::ElasticOut
                | Self::ElasticInOut
                | Self::BackIn
                | Self::BackOut
                | Self::BackInOut
        )
    }

    /// Kebab-case name, e.g. `"cubic-in-out"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::QuadraticIn => "quadratic-in",
            Self::QuadraticOut => "quadratic-out",
            Self::QuadraticInOut => "quadratic-in-out",
            Self::CubicIn => "cubic-in",
            Self::CubicOut => "cubic-out",
            Self::CubicInOut => "cubic-in-out",
            Self::QuarticIn => "quartic-in",
            Self::QuarticOut => "quartic-out",
            Self::QuarticInOut => "quartic-in-out",
            Self::QuinticIn => "quintic-in",
            Self::QuinticOut => "quintic-out",
            Self::QuinticInOut => "quintic-in-out",
            Self::SineIn => "sine-in",
            Self::SineOut => "sine-out",
            Self::SineInOut => "sine-in-out",
            Self::CircularIn => "circular-in",
            Self::CircularOut => "circular-out",
            Self::CircularInOut => "circular-in-out",
            Self::ExponentialIn => "exponential-in",
            Self::ExponentialOut => "exponential-out",
            Self::ExponentialInOut => "exponential-in-out",
            Self::ElasticIn => "elastic-in",
            Self::ElasticOut => "elastic-out",
            Self::ElasticInOut => "elastic-in-out",
            Self::BackIn => "back-in",
            Self::BackOut => "back-out",
            Self::BackInOut => "back-in-out",
            Self::BounceIn => "bounce-in",
            Self::BounceOut => "bounce-out",
            Self::BounceInOut => "bounce-in-out",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by [`Easing::from_str`] for an unrecognised name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEasing(pub String);

impl fmt::Display for UnknownEasing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown easing curve {:?}", self.0)
    }
}

impl std::error::Error for UnknownEasing {}

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.name() == wanted)
            .ok_or_else(|| UnknownEasing(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Piecewise curves
// ---------------------------------------------------------------------------

fn quadratic_in_out(p: f64) -> f64 {
    if p < 0.5 {
        2.0 * p * p
    } else {
        (-2.0 * p * p) + (4.0 * p) - 1.0
    }
}

fn cubic_in_out(p: f64) -> f64 {
    if p < 0.5 {
        4.0 * p * p * p
    } else {
        let f = (2.0 * p) - 2.0;
        0.5 * f * f * f + 1.0
    }
}

fn quartic_in_out(p: f64) -> f64 {
    if p < 0.5 {
        8.0 * p * p * p * p
    } else {
        let f = p - 1.0;
        -8.0 * f * f * f * f + 1.0
    }
}

fn quintic_in_out(p: f64) -> f64 {
    if p < 0.5 {
        16.0 * p * p * p * p * p
    } else {
        let f = (2.0 * p) - 2.0;
        0.5 * f * f * f * f * f + 1.0
    }
}

fn circular_in_out(p: f64) -> f64 {
    if p < 0.5 {
        0.5 * (1.0 - (1.0 - 4.0 * (p * p)).max(0.0).sqrt())
    } else {
        0.5 * ((-((2.0 * p) - 3.0) * ((2.0 * p) - 1.0)).max(0.0).sqrt() + 1.0)
    }
}

fn exponential_in_out(p: f64) -> f64 {
    if p == 0.0 || p == 1.0 {
        return p;
    }
    if p < 0.5 {
        0.5 * 2f64.powf((20.0 * p) - 10.0)
    } else {
        -0.5 * 2f64.powf((-20.0 * p) + 10.0) + 1.0
    }
}

fn elastic_in_out(p: f64) -> f64 {
    if p < 0.5 {
        0.5 * (13.0 * FRAC_PI_2 * (2.0 * p)).sin() * 2f64.powf(10.0 * ((2.0 * p) - 1.0))
    } else {
        0.5 * ((-13.0 * FRAC_PI_2 * ((2.0 * p - 1.0) + 1.0)).sin()
            * 2f64.powf(-10.0 * (2.0 * p - 1.0))
            + 2.0)
    }
}

/// Overshooting cubic `p³ - p·sin(pπ)`.
fn back(p: f64) -> f64 {
    p * p * p - p * (p * PI).sin()
}

fn bounce_out(p: f64) -> f64 {
    if p < 4.0 / 11.0 {
        (121.0 * p * p) / 16.0
    } else if p < 8.0 / 11.0 {
        (363.0 / 40.0 * p * p) - (99.0 / 10.0 * p) + 17.0 / 5.0
    } else if p < 9.0 / 10.0 {
        (4356.0 / 361.0 * p * p) - (35442.0 / 1805.0 * p) + 16061.0 / 1805.0
    } else {
        (54.0 / 5.0 * p * p) - (513.0 / 25.0 * p) + 268.0 / 25.0
    }
}
