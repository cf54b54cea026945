use crate::session_rng::RandomSource;

const ADJECTIVES: &[&str] = &[
    "Slithering", "Sneaky", "Coiled", "Hungry", "Swift", "Scaly", "Sly", "Venomous",
    "Striped", "Lazy", "Restless", "Golden", "Emerald", "Silent", "Greedy", "Nimble",
];

const NOUNS: &[&str] = &[
    "Python", "Viper", "Cobra", "Mamba", "Adder", "Boa", "Krait", "Taipan",
    "Asp", "Racer", "Garter", "Rattler", "Anaconda", "Sidewinder", "Copperhead", "Kingsnake",
];

/// Display name for a spectated autoplay snake, e.g. "Sneaky Mamba #3".
pub fn generate_bot_name<R>(index: usize, rng: &mut R) -> String
where
    R: RandomSource + ?Sized,
{
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len() as i32) as usize];
    let noun = NOUNS[rng.random_range(0..NOUNS.len() as i32) as usize];
    format!("{} {} #{}", adjective, noun, index + 1)
}

pub fn generate_session_id<R>(rng: &mut R) -> String
where
    R: RandomSource + ?Sized,
{
    (0..8)
        .map(|_| {
            let digit = rng.random_range(0..16) as u32;
            char::from_digit(digit, 16).unwrap_or('0')
        })
        .collect()
}
