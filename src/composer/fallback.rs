use crate::session::VariationKind;

/// Canned content returned whenever a backend call cannot produce text.
/// These literals are part of the product contract: the wizard must always
/// have something plausible to display, whatever the backend's health.

pub const SUGGESTIONS: [&str; 6] = [
    "How to master this skill quickly",
    "Common mistakes beginners make",
    "Essential tools you need",
    "Tips from professionals",
    "Quick wins for immediate results",
    "Secrets that actually work",
];

pub const SCRIPT: &str = "\
🎬 HOOK: \"Hey coffee lovers! Want to know the secret to amazing home brewing?\"

📝 PROBLEM: Most people believe great coffee requires a $500 espresso machine and years of training.

💡 SOLUTION: With just three essential tools, anyone can become their own coffee connoisseur:

1️⃣ A quality burr grinder ($30-50) - Controls extraction like a pro
2️⃣ A simple pour-over dripper ($15-25) - Gives you precision control
3️⃣ A gooseneck kettle ($25-40) - Perfect water flow every time

🔥 PROOF: I've been using this exact setup for 2 years, and my friends constantly ask if I went to barista school!

✅ CALL TO ACTION: Follow for more coffee tips that'll save you hundreds while upgrading your morning routine!

⏰ Total investment: Under $100. Total game-changer: Priceless.";

const SHORTER: &str = "\
☕ QUICK TIP: Skip the $500 espresso machine!

Get café-quality coffee with 3 budget tools:
• Burr grinder ($40)
• Pour-over dripper ($20)
• Gooseneck kettle ($30)

Total: $90 vs $500+

Follow for more money-saving coffee hacks! ☕";

const ENGAGING: &str = "\
🚨 COFFEE LOVERS: This will blow your mind!

I spent YEARS thinking I needed expensive gear for good coffee... I was SO wrong!

Here's the secret baristas don't want you to know:

✨ $40 burr grinder beats any blade grinder
✨ $20 pour-over > $200 automatic machine
✨ $30 gooseneck kettle = perfect extraction

My friends think I'm a coffee wizard now! 🧙‍♂️

Drop a ☕ if you're ready to upgrade your morning game!

Follow @coffeehacks for daily brewing secrets!";

const SOCIAL: &str = "\
POV: You just made better coffee than Starbucks with $90 worth of equipment 😎

The secret? These 3 game-changing tools:
→ Burr grinder
→ Pour-over dripper
→ Gooseneck kettle

Who else is tired of overpriced coffee shops?

#CoffeeHacks #HomeBrewing #CoffeeLovers #MorningRoutine #BaristaLife";

pub fn suggestions() -> Vec<String> {
    SUGGESTIONS.iter().map(|s| s.to_string()).collect()
}

pub fn script() -> String {
    SCRIPT.to_string()
}

pub fn variation(kind: VariationKind) -> String {
    match kind {
        VariationKind::Shorter => SHORTER.to_string(),
        VariationKind::Engaging => ENGAGING.to_string(),
        VariationKind::Social => SOCIAL.to_string(),
    }
}
