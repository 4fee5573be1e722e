//! IR Remote Decoder Trait
//!
//! Reserved extension point. The chassis carries an IR receiver whose decoder
//! is not wired into the control loop yet; the contract is kept here so the
//! key-handling path (and the key buffer cleared on idle entry) has a named
//! producer when it lands.

/// IR remote decoder interface (reserved, not yet consumed by the loop)
pub trait RemoteDecoder {
    /// Poll for a decoded keypress
    ///
    /// Returns `None` when no key has been received since the last poll.
    fn key_code(&mut self) -> Option<i16>;
}
