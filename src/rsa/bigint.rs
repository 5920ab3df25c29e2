// RSA Big Integer Operations
// Modular arithmetic over num-bigint and the random prime source

use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

use super::error::{RsaError, RsaResult};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Miller-Rabin rounds used by `random_prime`
pub const PRIMALITY_ROUNDS: u32 = 20;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Greatest common divisor, `gcd(a, 0) = a`
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    let mut a = a.clone();
    let mut b = b.clone();
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// Extended Euclidean Algorithm
/// Returns (x, y, gcd) such that a*x + m*y = gcd
///
/// Runs iteratively but yields exactly the coefficients of the recursive
/// formulation `ext(a, 0) = (1, 0, a)`,
/// `ext(a, m) = (y1, x1 - (a / m) * y1, g)` where `(x1, y1, g) = ext(m, a % m)`.
pub fn extended_euclid(a: &RsaBigInt, m: &RsaBigInt) -> (BigInt, BigInt, RsaBigInt) {
    let (mut old_r, mut r) = (a.clone(), m.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let (q, rem) = old_r.div_rem(&r);
        let q = BigInt::from_biguint(Sign::Plus, q);

        old_r = std::mem::replace(&mut r, rem);
        let next_x = &old_x - &q * &x;
        old_x = std::mem::replace(&mut x, next_x);
        let next_y = &old_y - &q * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    (old_x, old_y, old_r)
}

/// Compute modular inverse: e^(-1) mod m, normalized into [0, m)
pub fn mod_inverse(e: &RsaBigInt, m: &RsaBigInt) -> RsaResult<RsaBigInt> {
    if m.is_zero() {
        return Err(RsaError::NoInverse);
    }

    let (x, _, g) = extended_euclid(e, m);
    if !g.is_one() {
        return Err(RsaError::NoInverse);
    }

    // mod_floor keeps the sign of the modulus, so a negative x lands in [0, m)
    let m = BigInt::from_biguint(Sign::Plus, m.clone());
    Ok(x.mod_floor(&m).magnitude().clone())
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply algorithm
///
/// Returns 1 whenever `exp` is zero, whatever `base` is.
///
/// # Panics
/// If `modulus` is zero.
pub fn mod_exp(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Miller-Rabin primality test
/// Returns true if n is probably prime
pub fn is_probable_prime<R: Rng + ?Sized>(n: &RsaBigInt, rounds: u32, rng: &mut R) -> bool {
    let two = from_u64(2);
    if n < &two {
        return false;
    }
    if n == &two || n == &from_u64(3) {
        return true;
    }
    if n.is_even() {
        return false;
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for _ in 0..rounds {
        // Pick random witness a in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);

        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }

        // Composite
        return false;
    }

    // Probably prime
    true
}

/// Generate a random probable prime of exactly `bit_length` bits.
/// Lengths below 2 are treated as 2.
pub fn random_prime<R: Rng + ?Sized>(bit_length: u32, rng: &mut R) -> RsaBigInt {
    let bit_length = u64::from(bit_length.max(2));
    let lower = RsaBigInt::one() << (bit_length - 1);
    let upper = RsaBigInt::one() << bit_length;

    loop {
        let mut candidate = rng.gen_biguint_range(&lower, &upper);
        // Forcing the low bit keeps the candidate below `upper`
        candidate.set_bit(0, true);

        if is_probable_prime(&candidate, PRIMALITY_ROUNDS, rng) {
            return candidate;
        }
    }
}

/// Supplier of the two secret primes
pub trait PrimeSource {
    /// Return a probable prime of exactly `bits` bits
    fn get_prime(&mut self, bits: u32) -> RsaBigInt;
}

impl<R: Rng + ?Sized> PrimeSource for R {
    fn get_prime(&mut self, bits: u32) -> RsaBigInt {
        random_prime(bits, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn naive_pow_mod(base: u64, exp: u64, modulus: u64) -> u64 {
        let mut acc = 1u128;
        for _ in 0..exp {
            acc = acc * base as u128 % modulus as u128;
        }
        acc as u64
    }

    #[test]
    fn test_mod_exp() {
        // 3^5 mod 7 = 243 mod 7 = 5
        let result = mod_exp(&from_u64(3), &from_u64(5), &from_u64(7));
        assert_eq!(result, from_u64(5));
    }

    #[test]
    fn test_mod_exp_matches_naive() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let base = rng.gen_range(0..10_000u64);
            let exp = rng.gen_range(0..200u64);
            let modulus = rng.gen_range(2..5_000u64);
            assert_eq!(
                mod_exp(&from_u64(base), &from_u64(exp), &from_u64(modulus)),
                from_u64(naive_pow_mod(base, exp, modulus)),
                "{}^{} mod {}",
                base,
                exp,
                modulus
            );
        }
    }

    #[test]
    fn test_mod_exp_zero_exponent() {
        assert_eq!(mod_exp(&from_u64(0), &from_u64(0), &from_u64(3233)), from_u64(1));
        assert_eq!(mod_exp(&from_u64(42), &from_u64(0), &from_u64(1)), from_u64(1));
        assert_eq!(mod_exp(&from_u64(0), &from_u64(5), &from_u64(3233)), from_u64(0));
    }

    #[test]
    fn test_mod_exp_textbook_vector() {
        let n = from_u64(3233);
        assert_eq!(mod_exp(&from_u64(65), &from_u64(17), &n), from_u64(2790));
        assert_eq!(mod_exp(&from_u64(2790), &from_u64(2753), &n), from_u64(65));
    }

    #[test]
    fn test_mod_exp_agrees_with_modpow() {
        let mut rng = StdRng::seed_from_u64(11);
        let modulus = rng.gen_biguint(1024) | RsaBigInt::one();
        let base = rng.gen_biguint(1100);
        let exp = rng.gen_biguint(256);
        assert_eq!(mod_exp(&base, &exp, &modulus), base.modpow(&exp, &modulus));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(&from_u64(48), &from_u64(18)), from_u64(6));
        assert_eq!(gcd(&from_u64(17), &from_u64(3120)), from_u64(1));
        assert_eq!(gcd(&from_u64(9), &from_u64(0)), from_u64(9));
        assert_eq!(gcd(&from_u64(0), &from_u64(9)), from_u64(9));
        assert_eq!(gcd(&from_u64(0), &from_u64(0)), from_u64(0));
    }

    #[test]
    fn test_extended_euclid() {
        let (x, y, g) = extended_euclid(&from_u64(17), &from_u64(3120));
        assert_eq!(g, from_u64(1));
        assert_eq!(x, BigInt::from(-367));
        assert_eq!(y, BigInt::from(2));

        let (x, y, g) = extended_euclid(&from_u64(4), &from_u64(0));
        assert_eq!((x, y, g), (BigInt::one(), BigInt::zero(), from_u64(4)));

        let (x, y, g) = extended_euclid(&from_u64(4), &from_u64(8));
        assert_eq!((x, y, g), (BigInt::one(), BigInt::zero(), from_u64(4)));
    }

    #[test]
    fn test_extended_euclid_bezout_identity() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let a = rng.gen_biguint(300);
            let m = rng.gen_biguint(300);
            let (x, y, g) = extended_euclid(&a, &m);
            let lhs = BigInt::from(a.clone()) * x + BigInt::from(m.clone()) * y;
            assert_eq!(lhs, BigInt::from(g.clone()));
            assert_eq!(g, gcd(&a, &m));
        }
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7, so inverse of 3 mod 7 is 5
        let a = from_u64(3);
        let m = from_u64(7);
        let inv = mod_inverse(&a, &m).unwrap();
        assert_eq!(inv, from_u64(5));
        assert_eq!((a * inv) % m, from_u64(1));

        // extended_euclid gives x = -367 here
        assert_eq!(mod_inverse(&from_u64(17), &from_u64(3120)), Ok(from_u64(2753)));
    }

    #[test]
    fn test_mod_inverse_property() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut checked = 0;
        while checked < 100 {
            let m = rng.gen_biguint(256) + 2u8;
            let e = rng.gen_biguint_below(&m);
            if !gcd(&e, &m).is_one() {
                assert_eq!(mod_inverse(&e, &m), Err(RsaError::NoInverse));
                continue;
            }
            let d = mod_inverse(&e, &m).unwrap();
            assert!(d < m);
            assert!(((&e * &d) % &m).is_one());
            checked += 1;
        }
    }

    #[test]
    fn test_mod_inverse_not_coprime() {
        assert_eq!(mod_inverse(&from_u64(4), &from_u64(8)), Err(RsaError::NoInverse));
        assert_eq!(mod_inverse(&from_u64(6), &from_u64(3120)), Err(RsaError::NoInverse));
        assert_eq!(mod_inverse(&from_u64(5), &from_u64(0)), Err(RsaError::NoInverse));
    }

    #[test]
    fn test_is_probable_prime() {
        let mut rng = StdRng::seed_from_u64(1);
        for p in [2u64, 3, 5, 7, 61, 53, 7919, 65537] {
            assert!(is_probable_prime(&from_u64(p), 10, &mut rng), "{}", p);
        }
        for c in [0u64, 1, 4, 9, 561, 3233, 65535] {
            assert!(!is_probable_prime(&from_u64(c), 10, &mut rng), "{}", c);
        }
    }

    #[test]
    fn test_random_prime_bit_length() {
        let mut rng = StdRng::seed_from_u64(2024);
        for bits in [8u32, 16, 64, 256] {
            let p = rng.get_prime(bits);
            assert_eq!(p.bits(), u64::from(bits));
            assert!(is_probable_prime(&p, 10, &mut rng));
        }
    }

    #[test]
    fn test_random_prime_tiny_lengths() {
        let mut rng = StdRng::seed_from_u64(9);
        // 2-bit candidates are forced odd, so 3 is the only outcome
        for bits in [0u32, 1, 2] {
            assert_eq!(random_prime(bits, &mut rng), from_u64(3));
        }
    }
}
