//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::{Result, Uuid};
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator slot.
///
/// A panic while the lock was held cannot leave the slot half-updated, so a poisoned lock is
/// recovered instead of propagated.
fn lock_global_gen() -> sync::MutexGuard<'static, Option<GlobalGenInner>> {
    static G: sync::OnceLock<sync::Mutex<Option<GlobalGenInner>>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .unwrap_or_else(sync::PoisonError::into_inner)
}

/// Generates a UUIDv4 object, returning an error if the random source is unavailable.
///
/// This function employs a global buffered generator seeded from the operating system. On Unix,
/// the generator is re-created when the process ID changes (i.e., upon process forks) so that a
/// child never replays the buffered values of its parent.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid4::try_uuid4()?;
/// assert!(uuid.is_v4());
/// # Ok::<(), uuid4::Error>(())
/// ```
pub fn try_uuid4() -> Result<Uuid> {
    let mut slot = lock_global_gen();
    let mut g = match slot.take() {
        Some(g) if g.is_current() => g,
        _ => GlobalGenInner::new()?,
    };
    let result = g.generator.generate();
    *slot = Some(g);
    result
}

/// Generates a UUIDv4 object.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid4::uuid4();
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = uuid4::uuid4().to_string();
/// ```
///
/// # Panics
///
/// Panics if the operating system random source is unavailable. Use [`try_uuid4`] to handle
/// the failure instead.
pub fn uuid4() -> Uuid {
    try_uuid4().expect("uuid4: could not generate from global generator")
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::generator::{Depth, Uuid4Gen};
    use crate::source::Adapter;
    use crate::{Error, Result};

    /// The random number generator of the global generator.
    ///
    /// [`ChaCha12Core`] with [`ReseedingRng`] wrapper emulates the strategy used by
    /// [`rand::rngs::ThreadRng`].
    pub type GlobalGenRng = ReseedingRng<ChaCha12Core, OsRng>;

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        pub generator: Uuid4Gen<Adapter<GlobalGenRng>>,
    }

    impl GlobalGenInner {
        pub fn new() -> Result<Self> {
            let core = ChaCha12Core::from_rng(OsRng).map_err(Error::SourceMissing)?;
            let rng = ReseedingRng::new(core, 1024 * 64, OsRng);
            let generator = Uuid4Gen::with_rand08(Depth::DEFAULT, rng)?;
            tracing::debug!("initialized global uuid generator");
            Ok(Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator,
            })
        }

        /// Returns `false` if the process has forked since this generator was created.
        pub fn is_current(&self) -> bool {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                tracing::debug!("process id changed; discarding global uuid generator");
                return false;
            }
            true
        }
    }
}
