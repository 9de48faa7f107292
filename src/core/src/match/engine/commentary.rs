use crate::club::DismissalKind;
use crate::r#match::BallOutcome;
use rand::Rng;
use rand::seq::IndexedRandom;

const DOT: &[&str] = &[
    "{batsman} gets right behind it and defends.",
    "{batsman} leaves it alone outside off.",
    "Tight line from {bowler}, nothing doing.",
    "{batsman} swings and misses! {bowler} has a wry smile.",
    "Pushed straight back to {bowler}. Dot ball.",
    "{batsman} can't beat the infield this time.",
    "Sharp stop in the ring keeps {batsman} quiet.",
    "Beaten! {bowler} finds a bit of movement off the seam.",
];

const SINGLE: &[&str] = &[
    "{batsman} nudges it into the leg side for one.",
    "Dropped at the feet and they scamper through for a single.",
    "{batsman} works it down to long on. One run.",
    "Easy single to third man for {batsman}.",
];

const DOUBLE: &[&str] = &[
    "{batsman} drives into the gap and they come back for two.",
    "Good hard running, two taken.",
    "{batsman} clips it off the pads and hustles back for the second.",
    "Placed wide of deep cover, a comfortable couple for {batsman}.",
];

const TRIPLE: &[&str] = &[
    "{batsman} picks out the deep and they run three.",
    "Misfield in the deep and {batsman} takes three.",
    "Chased down just inside the rope. Three runs.",
    "{batsman} times it into the gap and they sprint three.",
];

const FOUR: &[&str] = &[
    "FOUR! {batsman} pierces the field with a crisp drive.",
    "FOUR! Short and punished by {batsman}.",
    "Glorious cover drive from {batsman}, races away for FOUR!",
    "FOUR! {batsman} flicks it fine and nobody is stopping that.",
];

const SIX: &[&str] = &[
    "SIX! {batsman} clears the ropes with ease.",
    "That is huge! {batsman} deposits {bowler} into the stands for SIX!",
    "SIX! {batsman} steps out and lofts it straight.",
    "Up, up and away! SIX for {batsman}.",
];

const BOWLED: &[&str] = &[
    "BOWLED! {bowler} knocks back the stumps of {batsman}!",
    "Through the gate! {batsman} is bowled by {bowler}.",
    "Timber! {bowler} hits the top of off and {batsman} is gone.",
];

const CAUGHT: &[&str] = &[
    "CAUGHT! {batsman} holes out and {fielder} takes it cleanly.",
    "{fielder} settles under it and {batsman} has to walk. {bowler} strikes!",
    "Brilliant catch by {fielder}! {batsman} is out.",
];

const CAUGHT_UNNAMED: &[&str] = &[
    "CAUGHT! {batsman} picks out the fielder in the deep.",
    "{batsman} skies it and it is safely taken. {bowler} strikes!",
];

const LBW: &[&str] = &[
    "LBW! {batsman} is trapped plumb in front by {bowler}.",
    "Up goes the finger! {batsman} is out leg before.",
    "{bowler} raps the pads and {batsman} is given LBW.",
];

const STUMPED: &[&str] = &[
    "STUMPED! {batsman} charges and {fielder} whips the bails off.",
    "Quick hands from {fielder}, {batsman} is stumped off {bowler}.",
];

const STUMPED_UNNAMED: &[&str] = &[
    "STUMPED! {batsman} is well out of the crease.",
    "{batsman} is beaten in the flight and stumped off {bowler}.",
];

const CAUGHT_BEHIND: &[&str] = &[
    "CAUGHT BEHIND! {batsman} feathers it through to {fielder}.",
    "Thin edge and {fielder} makes no mistake. {bowler} has {batsman}!",
];

const CAUGHT_BEHIND_UNNAMED: &[&str] = &[
    "CAUGHT BEHIND! {batsman} nicks it to the keeper.",
    "Edged and taken behind! {bowler} removes {batsman}.",
];

/// Cosmetic ball-by-ball text, chosen uniformly from a bank per outcome.
pub struct Commentary;

impl Commentary {
    pub fn for_outcome<R: Rng + ?Sized>(
        rng: &mut R,
        outcome: &BallOutcome,
        batsman: &str,
        bowler: &str,
    ) -> String {
        let (bank, fielder) = match outcome {
            BallOutcome::Dot => (DOT, None),
            BallOutcome::Runs(1) => (SINGLE, None),
            BallOutcome::Runs(2) => (DOUBLE, None),
            BallOutcome::Runs(_) => (TRIPLE, None),
            BallOutcome::Four => (FOUR, None),
            BallOutcome::Six => (SIX, None),
            BallOutcome::Wicket { kind, fielder } => {
                (Self::wicket_bank(*kind, fielder.is_some()), fielder.as_deref())
            }
        };

        Self::render(rng, bank, batsman, bowler, fielder)
    }

    fn wicket_bank(kind: DismissalKind, has_fielder: bool) -> &'static [&'static str] {
        match (kind, has_fielder) {
            (DismissalKind::Bowled, _) => BOWLED,
            (DismissalKind::Lbw, _) => LBW,
            (DismissalKind::Caught, true) => CAUGHT,
            (DismissalKind::Caught, false) => CAUGHT_UNNAMED,
            (DismissalKind::Stumped, true) => STUMPED,
            (DismissalKind::Stumped, false) => STUMPED_UNNAMED,
            (DismissalKind::CaughtBehind, true) => CAUGHT_BEHIND,
            (DismissalKind::CaughtBehind, false) => CAUGHT_BEHIND_UNNAMED,
        }
    }

    fn render<R: Rng + ?Sized>(
        rng: &mut R,
        bank: &[&str],
        batsman: &str,
        bowler: &str,
        fielder: Option<&str>,
    ) -> String {
        let template = bank.choose(rng).copied().unwrap_or("{batsman} faces {bowler}.");

        template
            .replace("{batsman}", batsman)
            .replace("{bowler}", bowler)
            .replace("{fielder}", fielder.unwrap_or("the fielder"))
    }

    pub fn over_start(over: u32, bowler: &str) -> String {
        format!("OVER {} BEGINS. {} will bowl this over.", over, bowler)
    }

    pub fn new_batsman(batsman: &str, position: usize) -> String {
        format!("{} comes in to bat at number {}.", batsman, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_no_placeholders_left() {
        let mut rng = StdRng::seed_from_u64(21);
        let outcomes = [
            BallOutcome::Dot,
            BallOutcome::Runs(1),
            BallOutcome::Runs(2),
            BallOutcome::Runs(3),
            BallOutcome::Four,
            BallOutcome::Six,
            BallOutcome::Wicket { kind: DismissalKind::Caught, fielder: Some("Jadeja".to_string()) },
            BallOutcome::Wicket { kind: DismissalKind::Caught, fielder: None },
            BallOutcome::Wicket { kind: DismissalKind::Stumped, fielder: None },
            BallOutcome::Wicket { kind: DismissalKind::CaughtBehind, fielder: Some("Pant".to_string()) },
            BallOutcome::Wicket { kind: DismissalKind::Lbw, fielder: None },
            BallOutcome::Wicket { kind: DismissalKind::Bowled, fielder: None },
        ];

        for outcome in outcomes.iter() {
            for _ in 0..20 {
                let text = Commentary::for_outcome(&mut rng, outcome, "Rohit", "Anderson");
                assert!(!text.contains('{'), "unrendered template: {}", text);
            }
        }
    }

    #[test]
    fn test_named_fielder_used() {
        let mut rng = StdRng::seed_from_u64(4);
        let outcome = BallOutcome::Wicket {
            kind: DismissalKind::Caught,
            fielder: Some("Jadeja".to_string()),
        };

        let text = Commentary::for_outcome(&mut rng, &outcome, "Rohit", "Anderson");
        assert!(text.contains("Jadeja"));
    }

    #[test]
    fn test_over_start_text() {
        assert_eq!(
            Commentary::over_start(3, "Starc"),
            "OVER 3 BEGINS. Starc will bowl this over."
        );
    }
}
