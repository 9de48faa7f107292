use rand::Rng;

pub const ATTRIBUTE_MAX_VALUE: u8 = 100;

const DEFAULT_ATTRIBUTE_MIN: u8 = 30;
const DEFAULT_ATTRIBUTE_MAX: u8 = 70;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BattingAttributes {
    pub timing: u8,
    pub technique: u8,
    pub power: u8,
}

impl BattingAttributes {
    pub fn new(timing: u8, technique: u8, power: u8) -> Self {
        BattingAttributes {
            timing: timing.min(ATTRIBUTE_MAX_VALUE),
            technique: technique.min(ATTRIBUTE_MAX_VALUE),
            power: power.min(ATTRIBUTE_MAX_VALUE),
        }
    }

    /// Mean of the three batting sub-attributes.
    pub fn skill(&self) -> f32 {
        (self.timing as f32 + self.technique as f32 + self.power as f32) / 3.0
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BowlingAttributes {
    pub pace: u8,
    pub variation: u8,
    pub accuracy: u8,
}

impl BowlingAttributes {
    pub fn new(pace: u8, variation: u8, accuracy: u8) -> Self {
        BowlingAttributes {
            pace: pace.min(ATTRIBUTE_MAX_VALUE),
            variation: variation.min(ATTRIBUTE_MAX_VALUE),
            accuracy: accuracy.min(ATTRIBUTE_MAX_VALUE),
        }
    }

    /// Mean of the three bowling sub-attributes.
    pub fn skill(&self) -> f32 {
        (self.pace as f32 + self.variation as f32 + self.accuracy as f32) / 3.0
    }
}

/// Value for a sub-attribute that was not supplied by the caller.
pub fn default_attribute<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.random_range(DEFAULT_ATTRIBUTE_MIN..=DEFAULT_ATTRIBUTE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_skill_is_mean() {
        assert_eq!(BattingAttributes::new(60, 70, 80).skill(), 70.0);
        assert_eq!(BowlingAttributes::new(30, 30, 90).skill(), 50.0);
    }

    #[test]
    fn test_attributes_capped() {
        let batting = BattingAttributes::new(120, 50, 255);

        assert_eq!(batting.timing, ATTRIBUTE_MAX_VALUE);
        assert_eq!(batting.power, ATTRIBUTE_MAX_VALUE);
    }

    #[test]
    fn test_default_attribute_range() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..500 {
            let value = default_attribute(&mut rng);
            assert!((30..=70).contains(&value));
        }
    }
}
