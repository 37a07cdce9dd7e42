//! Fortunes shown by the wish dialog

use rand::Rng;

pub const WISHES: [&str; 7] = [
    "2026 will be the year you discover your true potential.",
    "A major breakthrough is waiting for you in March!",
    "Happiness is not a destination, it's a way of life. Embrace it.",
    "Your code will be bug-free... mostly.",
    "You will make memories that last a lifetime.",
    "Adventures are calling. Answer them!",
    "Success comes to those who wait, but better things come to those who go out and get them.",
];

/// Pick a fortune uniformly at random
pub fn random_wish<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    WISHES[rng.random_range(0..WISHES.len())]
}
