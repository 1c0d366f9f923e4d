use rand::Rng;

/// 8-bit RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Foreground/background pair for one generated image.
///
/// The background is the foreground reflected through the midpoint of its own
/// max/min channel values, so the two differ on every channel where the
/// foreground is not already at the local extreme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorPair {
    pub foreground: Rgb,
    pub background: Rgb,
}

/// Draw a fresh contrasting color pair from `rng`.
///
/// Foreground channels are uniform over `0..=254` (floor-of-uniform-times-255
/// semantics). Taking the randomness source as a parameter keeps this a pure
/// function; tests inject a seeded [`rand::rngs::StdRng`].
pub fn contrast_pair(rng: &mut impl Rng) -> ColorPair {
    let foreground = Rgb {
        r: rng.gen_range(0..255),
        g: rng.gen_range(0..255),
        b: rng.gen_range(0..255),
    };

    ColorPair {
        foreground,
        background: reflect(foreground),
    }
}

fn reflect(fg: Rgb) -> Rgb {
    let hi = i16::from(fg.r.max(fg.g).max(fg.b));
    let lo = i16::from(fg.r.min(fg.g).min(fg.b));
    let mid = hi + lo;

    // mid - c always lands back inside [lo, hi], so the cast cannot wrap.
    Rgb {
        r: (mid - i16::from(fg.r)) as u8,
        g: (mid - i16::from(fg.g)) as u8,
        b: (mid - i16::from(fg.b)) as u8,
    }
}

#[cfg(test)]
#[path = "../tests/unit/color.rs"]
mod tests;
