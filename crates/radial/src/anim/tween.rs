use super::clock::{PROGRESS_MAX, Profile};

/// Transform applied to the composite for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// Rotation about the surface center, in degrees.
    pub angle: f64,
    pub scale: f64,
    pub alpha: f64,
}

impl FrameParams {
    /// Fully open, unrotated.
    pub const REST: Self = Self::new(0.0, 1.0, 1.0);

    pub const fn new(angle: f64, scale: f64, alpha: f64) -> Self {
        Self {
            angle,
            scale,
            alpha,
        }
    }
}

/// Entering spins in from -60° while growing and fading in; leaving spins
/// on to +60° while shrinking and fading out.
pub fn params_for(profile: Profile, progress: u32) -> FrameParams {
    let progress = progress.min(PROGRESS_MAX) as f64;
    let max = PROGRESS_MAX as f64;

    match profile {
        Profile::Entering => {
            let scale = progress / max;
            FrameParams::new(progress - max, scale, scale)
        }
        Profile::Leaving => {
            let scale = 1.0 - progress / max;
            FrameParams::new(progress, scale, scale)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_endpoints() {
        assert_eq!(
            params_for(Profile::Entering, 0),
            FrameParams::new(-60.0, 0.0, 0.0)
        );
        assert_eq!(params_for(Profile::Entering, 60), FrameParams::REST);
        assert_eq!(params_for(Profile::Leaving, 0), FrameParams::REST);
        assert_eq!(
            params_for(Profile::Leaving, 60),
            FrameParams::new(60.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(
            params_for(Profile::Entering, 30),
            FrameParams::new(-30.0, 0.5, 0.5)
        );
        assert_eq!(
            params_for(Profile::Leaving, 30),
            FrameParams::new(30.0, 0.5, 0.5)
        );
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        for profile in Profile::iter() {
            assert_eq!(params_for(profile, 500), params_for(profile, PROGRESS_MAX));
        }
    }

    #[test]
    fn test_alpha_tracks_scale() {
        for profile in Profile::iter() {
            for progress in 0..=PROGRESS_MAX {
                let p = params_for(profile, progress);
                assert_eq!(p.alpha, p.scale);
                assert!((0.0..=1.0).contains(&p.scale));
            }
        }
    }
}
