//! Sample-rate-aware lifecycle applied uniformly across scene components
//! (spec §3 Lifecycle): `configure` allocates sample-rate-dependent state,
//! `post_prepare` runs after every component's `configure` for cross-wiring,
//! `release` tears down state. `configure`/`release` are idempotent-safe.

use crate::error::SceneError;

/// A component whose sample-rate-dependent state is (re)built at
/// `configure` time.
pub trait AudioState {
    /// Allocates state sized for `sample_rate`/`fragment_size`/`channels`.
    /// Must leave the component in its pre-call state on failure so a
    /// caller can safely call `release` afterwards.
    fn configure(&mut self, sample_rate: f32, fragment_size: usize, channels: usize) -> Result<(), SceneError>;

    /// Runs after every sibling component has configured successfully, for
    /// wiring that needs the whole graph in place. Default is a no-op.
    fn post_prepare(&mut self) -> Result<(), SceneError> {
        Ok(())
    }

    /// Tears down sample-rate-dependent state. Safe to call on an
    /// unconfigured or already-released component.
    fn release(&mut self);
}

/// Configures every component in `components`, in order; if any fails,
/// already-configured siblings (those before it) are released before the
/// error is propagated (spec §3: "succeed-or-rollback").
pub fn configure_all(
    components: &mut [&mut dyn AudioState],
    sample_rate: f32,
    fragment_size: usize,
    channels: usize,
) -> Result<(), SceneError> {
    for i in 0..components.len() {
        if let Err(err) = components[i].configure(sample_rate, fragment_size, channels) {
            for prior in components[..i].iter_mut() {
                prior.release();
            }
            return Err(err);
        }
    }
    Ok(())
}

/// Runs `post_prepare` on every component; on failure, releases all of them
/// (post-prepare runs only once every component has already configured, so
/// a failure here rolls back the whole set rather than a prefix).
pub fn post_prepare_all(components: &mut [&mut dyn AudioState]) -> Result<(), SceneError> {
    for i in 0..components.len() {
        if let Err(err) = components[i].post_prepare() {
            for c in components.iter_mut() {
                c.release();
            }
            return Err(err);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        name: &'static str,
        fail_configure: bool,
        fail_post_prepare: bool,
        configured: bool,
        released: bool,
    }

    impl Probe {
        fn new(name: &'static str) -> Self {
            Self { name, fail_configure: false, fail_post_prepare: false, configured: false, released: false }
        }
    }

    impl AudioState for Probe {
        fn configure(&mut self, _sample_rate: f32, _fragment_size: usize, _channels: usize) -> Result<(), SceneError> {
            if self.fail_configure {
                return Err(SceneError::ConfigureFailed { component: self.name.into(), reason: "forced failure".into() });
            }
            self.configured = true;
            Ok(())
        }

        fn post_prepare(&mut self) -> Result<(), SceneError> {
            if self.fail_post_prepare {
                return Err(SceneError::ConfigureFailed { component: self.name.into(), reason: "forced post-prepare failure".into() });
            }
            Ok(())
        }

        fn release(&mut self) {
            self.configured = false;
            self.released = true;
        }
    }

    #[test]
    fn all_components_configure_when_none_fail() {
        let mut a = Probe::new("a");
        let mut b = Probe::new("b");
        let mut components: Vec<&mut dyn AudioState> = vec![&mut a, &mut b];
        configure_all(&mut components, 48000.0, 128, 2).unwrap();
        assert!(a.configured);
        assert!(b.configured);
    }

    #[test]
    fn failure_rolls_back_already_configured_siblings() {
        let mut a = Probe::new("a");
        let mut b = Probe::new("b");
        b.fail_configure = true;
        let mut c = Probe::new("c");
        let mut components: Vec<&mut dyn AudioState> = vec![&mut a, &mut b, &mut c];
        let result = configure_all(&mut components, 48000.0, 128, 2);
        assert!(result.is_err());
        assert!(a.released);
        assert!(!c.configured);
    }

    #[test]
    fn post_prepare_failure_releases_everything() {
        let mut a = Probe::new("a");
        let mut b = Probe::new("b");
        b.fail_post_prepare = true;
        let mut components: Vec<&mut dyn AudioState> = vec![&mut a, &mut b];
        configure_all(&mut components, 48000.0, 128, 2).unwrap();
        let result = post_prepare_all(&mut components);
        assert!(result.is_err());
        assert!(a.released);
        assert!(b.released);
    }
}
