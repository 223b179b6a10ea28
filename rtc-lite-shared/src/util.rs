use rand::{Rng, rng};

const RUNES_ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// math_rand_alpha generates a mathematical random alphabet sequence of the requested length.
pub fn math_rand_alpha(n: usize) -> String {
    generate_crypto_random_string(n, RUNES_ALPHA)
}

//TODO: switch to OsRng once credentials are used for real connectivity checks.
fn generate_crypto_random_string(n: usize, runes: &[u8]) -> String {
    let mut rng = rng();

    let rand_string: String = (0..n)
        .map(|_| {
            let idx = rng.random_range(0..runes.len());
            runes[idx] as char
        })
        .collect();

    rand_string
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_random_generator_collision() {
        let mut rs = vec![];
        for _ in 0..64 {
            let r = math_rand_alpha(16);
            assert_eq!(r.len(), 16);
            assert!(r.chars().all(|c| c.is_ascii_alphabetic()));
            assert!(!rs.contains(&r), "random string collision: {r}");
            rs.push(r);
        }
    }
}
