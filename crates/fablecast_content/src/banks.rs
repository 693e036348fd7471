//! Fixed selection banks.

/// Instruction sent as the system message with every prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are a magical parenting content creator who combines child psychology with storytelling. Always return valid JSON.";

/// Target age range for generated pieces.
pub const TARGET_AGE: &str = "3-10";

/// Parenting topics drawn from when the caller supplies none.
pub const TOPICS: [&str; 15] = [
    "toddler tantrums",
    "bedtime struggles",
    "sibling rivalry",
    "screen time balance",
    "picky eating",
    "homework battles",
    "social anxiety in kids",
    "building confidence",
    "morning routines",
    "emotional meltdowns",
    "transition difficulties",
    "friendship issues",
    "back to school anxiety",
    "holiday stress",
    "family traditions",
];

/// Child-psychology concepts.
pub const PSYCHOLOGY_CONCEPTS: [&str; 15] = [
    "attachment theory",
    "positive reinforcement",
    "emotional regulation",
    "growth mindset",
    "active listening",
    "boundary setting",
    "emotional intelligence",
    "resilience building",
    "empathy development",
    "self-esteem nurturing",
    "stress management",
    "mindful parenting",
    "play therapy",
    "cognitive development",
    "social learning theory",
];

/// Thematic motifs.
pub const MOTIFS: [&str; 15] = [
    "enchanted forest wisdom",
    "fairy tale lessons",
    "dragon courage",
    "unicorn compassion",
    "wizard patience",
    "magic mirror reflection",
    "crystal ball insight",
    "phoenix resilience",
    "owl wisdom",
    "butterfly transformation",
    "star guidance",
    "moon serenity",
    "magic carpet adventures",
    "talking animals",
    "enchanted objects",
];

/// Topics of the story-bot teaser campaign, in publishing order.
pub const CAMPAIGN_TOPICS: [&str; 4] = [
    "Behind the scenes: Building magical stories for your kids",
    "What if bedtime stories adapted to your child's choices?",
    "The psychology behind interactive storytelling",
    "Sneak peek: AI that creates personalized fairy tales",
];

/// Illustration descriptions used when the backend cannot supply visual prompts.
pub fn fallback_visual_prompts(motif: &str) -> Vec<String> {
    vec![
        format!("Whimsical illustration of {motif}, children's book style"),
        "Magical parent-child moment, soft colors, cozy setting".to_string(),
        "Enchanted forest scene with family, warm lighting".to_string(),
        "Fairy tale inspired parenting scene, gentle magic".to_string(),
        "Magical family bonding moment, dreamy atmosphere".to_string(),
    ]
}
