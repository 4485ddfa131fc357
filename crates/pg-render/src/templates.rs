//! Greeting and closing line templates.

use rand::Rng;
use rand::seq::IndexedRandom;

/// Placeholder replaced by the creature's display name.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Headline templates. Each contains [`NAME_PLACEHOLDER`].
pub const GREETING_TEMPLATES: &[&str] = &[
    "You have been greeted by **{name}**",
    "A wild **{name}** appeared to greet you!",
    "**{name}** wants to brighten your day!",
    "Say hello to **{name}**!",
    "**{name}** is here to wish you well!",
    "Greetings from **{name}**!",
    "**{name}** sends you positive vibes!",
];

/// Closing lines.
pub const CLOSING_MESSAGES: &[&str] = &[
    "Have a wonderful day!",
    "May your day be filled with joy!",
    "Wishing you happiness and success!",
    "Hope you have an amazing day ahead!",
    "Sending you good vibes!",
    "Have a fantastic day!",
    "May your journey be legendary!",
];

/// A greeting headline paired with a closing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    greeting: String,
    closing: String,
}

impl Template {
    /// A custom template. `greeting` may contain [`NAME_PLACEHOLDER`].
    pub fn new(greeting: impl Into<String>, closing: impl Into<String>) -> Self {
        Self {
            greeting: greeting.into(),
            closing: closing.into(),
        }
    }

    /// The built-in template at the given indices, wrapping around.
    pub fn builtin(greeting_index: usize, closing_index: usize) -> Self {
        Self::new(
            GREETING_TEMPLATES[greeting_index % GREETING_TEMPLATES.len()],
            CLOSING_MESSAGES[closing_index % CLOSING_MESSAGES.len()],
        )
    }

    /// Draw a greeting and a closing independently from the built-in sets.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let greeting = GREETING_TEMPLATES
            .choose(rng)
            .copied()
            .unwrap_or(GREETING_TEMPLATES[0]);
        let closing = CLOSING_MESSAGES
            .choose(rng)
            .copied()
            .unwrap_or(CLOSING_MESSAGES[0]);
        Self::new(greeting, closing)
    }

    /// The headline with the name filled in.
    pub fn greeting_for(&self, name: &str) -> String {
        self.greeting.replace(NAME_PLACEHOLDER, name)
    }

    /// The closing line.
    pub fn closing(&self) -> &str {
        &self.closing
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::builtin(0, 0)
    }
}
