//! Hashing and secure randomness.
//!
//! Both concerns sit behind small traits ([`HashProvider`] and [`SecureRandomSource`]) so the
//! operations here can run against any provider. The defaults are backed by aws-lc-rs.

use aws_lc_rs::digest::{SHA1_FOR_LEGACY_USE_ONLY, SHA256, SHA512, digest};
use data_encoding::HEXLOWER;

/// Number of digits [`generate_otp`] callers conventionally ask for.
pub const DEFAULT_OTP_LENGTH: usize = 6;

/// A one-way hash function.
pub trait HashProvider {
    fn digest(&self, data: &[u8]) -> Vec<u8>;
}

/// SHA-1. Collision resistance is broken: only fit for non-adversarial fingerprinting, never
/// for authentication or integrity checks an attacker can influence.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha1;

#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256;

#[derive(Debug, Default, Clone, Copy)]
pub struct Sha512;

impl HashProvider for Sha1 {
    fn digest(&self, data: &[u8]) -> Vec<u8> {
        digest(&SHA1_FOR_LEGACY_USE_ONLY, data).as_ref().to_vec()
    }
}

impl HashProvider for Sha256 {
    fn digest(&self, data: &[u8]) -> Vec<u8> {
        digest(&SHA256, data).as_ref().to_vec()
    }
}

impl HashProvider for Sha512 {
    fn digest(&self, data: &[u8]) -> Vec<u8> {
        digest(&SHA512, data).as_ref().to_vec()
    }
}

/// Lowercase hex digest of `data` under `provider`.
pub fn hex_digest<H: HashProvider + ?Sized>(provider: &H, data: &[u8]) -> String {
    HEXLOWER.encode(&provider.digest(data))
}

/// SHA-1 of the UTF-8 bytes of `data` as 40 lowercase hex characters.
///
/// See [`Sha1`] for why this must not be used where an attacker controls the input.
pub fn sha1(data: &str) -> String {
    hex_digest(&Sha1, data.as_bytes())
}

/// A source of cryptographically secure, uniformly distributed integers.
pub trait SecureRandomSource {
    /// Returns a value drawn uniformly from `[0, upper)`. Panics if `upper` is zero.
    fn uniform(&self, upper: u32) -> u32;
}

/// The operating system CSPRNG, via aws-lc-rs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRandom;

impl SecureRandomSource for SystemRandom {
    fn uniform(&self, upper: u32) -> u32 {
        uniform_from(upper, || u32::from_le_bytes(random_bytes::<4>()))
    }
}

/// Maps raw 32-bit draws onto `[0, upper)` by rejection sampling. Draws at or above the
/// largest multiple of `upper` are discarded so every residue is equally likely.
fn uniform_from(upper: u32, mut next: impl FnMut() -> u32) -> u32 {
    assert!(upper > 0, "upper bound must be non-zero");

    let range = upper as u64;
    let zone = (1u64 << 32) - ((1u64 << 32) % range);

    loop {
        let value = next() as u64;
        if value < zone {
            return (value % range) as u32;
        }
    }
}

/// Generate cryptographically secure random bytes
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut val = [0u8; N];
    aws_lc_rs::rand::fill(&mut val).expect("should be infallible");
    val
}

/// A string of `length` decimal digits, each drawn independently from the system CSPRNG.
/// A `length` of zero yields an empty string.
pub fn generate_otp(length: usize) -> String {
    generate_otp_with(&SystemRandom, length)
}

/// As [`generate_otp`], drawing digits from `source`.
pub fn generate_otp_with<R: SecureRandomSource + ?Sized>(source: &R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(b'0' + source.uniform(10) as u8))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Replays a fixed sequence of draws, wrapping around at the end.
    struct ReplaySource {
        values: Vec<u32>,
        next: Cell<usize>,
    }

    impl ReplaySource {
        fn new(values: &[u32]) -> Self {
            Self {
                values: values.to_vec(),
                next: Cell::new(0),
            }
        }
    }

    impl SecureRandomSource for ReplaySource {
        fn uniform(&self, upper: u32) -> u32 {
            let idx = self.next.get();
            self.next.set(idx + 1);
            self.values[idx % self.values.len()] % upper
        }
    }

    #[test]
    fn sha1_known_vectors() {
        assert_eq!(sha1(""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(sha1("abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(
            sha1("The quick brown fox jumps over the lazy dog"),
            "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12"
        );
    }

    #[test]
    fn sha1_hashes_utf8_bytes() {
        let text = "héllo wörld";
        assert_eq!(sha1(text), hex_digest(&Sha1, text.as_bytes()));
        assert_ne!(sha1(text), sha1("hello world"));
    }

    #[test]
    fn other_providers() {
        assert_eq!(
            hex_digest(&Sha256, b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(Sha512.digest(b"abc").len(), 64);
    }

    #[test]
    fn providers_are_object_safe() {
        let providers: Vec<Box<dyn HashProvider>> =
            vec![Box::new(Sha1), Box::new(Sha256), Box::new(Sha512)];
        let lengths: Vec<usize> = providers.iter().map(|p| p.digest(b"x").len()).collect();
        assert_eq!(lengths, vec![20, 32, 64]);
    }

    #[test]
    fn otp_uses_injected_source() {
        let source = ReplaySource::new(&[4, 2, 9, 0, 17, 3]);
        assert_eq!(generate_otp_with(&source, 6), "429073");
    }

    #[test]
    fn otp_zero_length_is_empty() {
        assert_eq!(generate_otp(0), "");
    }

    #[test]
    fn otp_has_requested_length_and_digits() {
        for length in [1, DEFAULT_OTP_LENGTH, 8, 64] {
            let otp = generate_otp(length);
            assert_eq!(otp.len(), length);
            assert!(otp.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn rejection_sampling_discards_biased_draws() {
        let mut draws = [u32::MAX, 4_294_967_290, 13].into_iter();
        assert_eq!(uniform_from(10, || draws.next().unwrap()), 3);
        assert!(draws.next().is_none());
    }

    #[test]
    fn rejection_sampling_accepts_below_zone() {
        let mut draws = [4_294_967_289u32].into_iter();
        assert_eq!(uniform_from(10, || draws.next().unwrap()), 9);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn uniform_zero_upper_panics() {
        SystemRandom.uniform(0);
    }

    #[test]
    fn system_random_stays_in_range() {
        for _ in 0..1000 {
            assert!(SystemRandom.uniform(7) < 7);
        }
    }

    #[test]
    fn test_random_bytes() {
        let bytes1 = random_bytes::<32>();
        let bytes2 = random_bytes::<32>();

        // Should be different (extremely high probability)
        assert_ne!(bytes1, bytes2);
    }
}
