// RSA Key Generation
// Combines two primes into a public/private key pair

use log::{debug, trace};
use num_bigint::RandBigInt;
use num_integer::Integer;
use num_traits::One;
use rand::Rng;

use super::bigint::{from_u64, gcd, mod_inverse, PrimeSource, RsaBigInt};
use super::config::RsaConfig;
use super::error::{RsaError, RsaResult};

/// Smallest exponent the search falls back to when `min_exponent` does not fit below phi
const SMALLEST_EXPONENT: u64 = 3;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub n: RsaBigInt,  // Modulus
    pub e: RsaBigInt,  // Public exponent
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub n: RsaBigInt,  // Modulus (same as public)
    pub d: RsaBigInt,  // Private exponent
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
    pub config: RsaConfig,
}

impl RsaPublicKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }
}

impl RsaPrivateKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }
}

impl RsaKeyPair {
    /// Configured key size in bits
    pub fn bit_length(&self) -> u32 {
        self.config.key_size_bits
    }
}

/// Builds key pairs for one `RsaConfig`
#[derive(Debug, Clone, Default)]
pub struct KeyGenerator {
    config: RsaConfig,
}

impl KeyGenerator {
    /// Create a generator for a validated configuration
    pub fn new(config: RsaConfig) -> RsaResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration every generated key pair carries
    pub fn config(&self) -> &RsaConfig {
        &self.config
    }

    /// Draw a random odd `e` in `[min_exponent, phi - 1]` with `gcd(e, phi) = 1`.
    ///
    /// When `phi - 1` is below `min_exponent` the range is widened down to 3.
    /// Even draws count as attempts; exhausting `max_exponent_attempts` fails.
    pub fn generate_exponent<R: Rng + ?Sized>(
        &self,
        phi: &RsaBigInt,
        rng: &mut R,
    ) -> RsaResult<RsaBigInt> {
        let smallest = from_u64(SMALLEST_EXPONENT);
        if phi <= &smallest {
            return Err(RsaError::KeyGeneration(format!(
                "phi = {} leaves no room for a public exponent",
                phi
            )));
        }

        let mut low = from_u64(self.config.min_exponent.max(SMALLEST_EXPONENT));
        if &low >= phi {
            debug!(
                "phi ({} bits) is not above min exponent {}, widening search to [3, phi)",
                phi.bits(),
                self.config.min_exponent
            );
            low = smallest;
        }

        let one = RsaBigInt::one();
        for attempt in 1..=self.config.max_exponent_attempts {
            // gen_biguint_range excludes the upper bound: e <= phi - 1
            let e = rng.gen_biguint_range(&low, phi);
            if e.is_even() {
                continue;
            }
            if gcd(&e, phi) == one {
                trace!("public exponent accepted after {} attempts", attempt);
                return Ok(e);
            }
        }

        Err(RsaError::KeyGeneration(format!(
            "no exponent coprime with phi found in {} attempts",
            self.config.max_exponent_attempts
        )))
    }

    /// Generate RSA key pair from two primes with a random public exponent
    pub fn generate_keypair<R: Rng + ?Sized>(
        &self,
        p: &RsaBigInt,
        q: &RsaBigInt,
        rng: &mut R,
    ) -> RsaResult<RsaKeyPair> {
        let phi = totient(p, q);
        let e = self.generate_exponent(&phi, rng)?;
        self.assemble(p, q, &phi, e)
    }

    /// Generate RSA key pair from two primes and a caller-chosen exponent
    pub fn generate_keypair_with_exponent(
        &self,
        p: &RsaBigInt,
        q: &RsaBigInt,
        e: &RsaBigInt,
    ) -> RsaResult<RsaKeyPair> {
        let phi = totient(p, q);
        self.assemble(p, q, &phi, e.clone())
    }

    /// Draw both primes from `primes`, then the exponent from `rng`
    pub fn generate_from<S, R>(&self, primes: &mut S, rng: &mut R) -> RsaResult<RsaKeyPair>
    where
        S: PrimeSource + ?Sized,
        R: Rng + ?Sized,
    {
        let half_bits = self.config.key_size_bits / 2;
        debug!("drawing two {}-bit primes", half_bits);

        let p = primes.get_prime(half_bits);
        let mut q = primes.get_prime(half_bits);
        while q == p {
            q = primes.get_prime(half_bits);
        }

        self.generate_keypair(&p, &q, rng)
    }

    /// Generate RSA key pair with both primes and the exponent drawn from `rng`
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> RsaResult<RsaKeyPair> {
        let half_bits = self.config.key_size_bits / 2;
        debug!("drawing two {}-bit primes", half_bits);

        let p = rng.get_prime(half_bits);
        let mut q = rng.get_prime(half_bits);
        while q == p {
            q = rng.get_prime(half_bits);
        }

        self.generate_keypair(&p, &q, rng)
    }

    fn assemble(
        &self,
        p: &RsaBigInt,
        q: &RsaBigInt,
        phi: &RsaBigInt,
        e: RsaBigInt,
    ) -> RsaResult<RsaKeyPair> {
        let n = p * q;
        self.config
            .check_modulus(&n)
            .map_err(|e| RsaError::KeyGeneration(e.to_string()))?;

        let d = mod_inverse(&e, phi)?;
        debug!("generated {}-bit modulus, e = {}", n.bits(), e);

        Ok(RsaKeyPair {
            public_key: RsaPublicKey { n: n.clone(), e },
            private_key: RsaPrivateKey { n, d },
            config: self.config.clone(),
        })
    }
}

/// φ(n) = (p-1)(q-1)
fn totient(p: &RsaBigInt, q: &RsaBigInt) -> RsaBigInt {
    (p - 1u8) * (q - 1u8)
}
