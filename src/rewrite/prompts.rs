/*!
 * Style profiles for sentence rewriting.
 *
 * Each provider gets a fixed instruction payload describing the target
 * reading level, voice mix, word-count fidelity, banned phrasing and the
 * forbidden punctuation mark. The per-sentence prompt appends the sentence
 * and its word count to that instruction.
 */

use crate::app_config::ProviderKind;
use crate::segmenter::word_count;

/// Punctuation mark the rewriters are told never to produce
pub const FORBIDDEN_MARK: char = '\u{2014}';

/// Marker preceding the sentence in every prompt
const SENTENCE_MARKER: &str = "Original sentence (";

const GEMINI_INSTRUCTION: &str = "Your Role: Turn AI content into natural, readable text that feels human-written, not machine-generated.\n\
\n\
Your Task: Rewrite this content at a 12th grade reading level. Make it easy to understand while keeping the same meaning. Switch between active and passive voice occasionally (40% of the time). Keep sentences concise and direct.\n\
\n\
CRITICAL - Keep the word count VERY CLOSE to the original (within 1-2 words). Do not expand or elaborate.\n\
\n\
Absolutely NO em dashes (\u{2014}). Use periods, commas, or parentheses instead.\n\
\n\
AVOID these overused AI words and phrases:\n\
- Delve, underscore, pivotal, realm, harness, illuminate, shed light on\n\
- Facilitate, refine, bolster, differentiate, streamline\n\
- Revolutionize, innovative, cutting-edge, game-changing, transformative, seamless\n\
- \"That being said\", \"at its core\", \"to put it simply\", \"this underscores\"\n\
- \"Generally speaking\", \"typically\", \"tends to\", \"arguably\", \"broadly speaking\"\n\
\n\
Writing Style:\n\
- Take small creative risks with word choice (like \"hands out comfort\")\n\
- Mix up sentence rhythms - avoid predictable patterns\n\
- Use concrete, specific language over generic descriptions\n\
- Add slight quirks that feel personal, not algorithmic\n\
- Keep it simple but formal - no flowery language\n\
- Make choices that sound deliberate, not template-based\n\
\n\
Only output the rewritten sentence. No quotes, explanations, or extra text.";

const COHERE_INSTRUCTION: &str = "Your Role: Rewrite AI-generated text to sound more natural and conversational while maintaining professionalism.\n\
\n\
Your Task: Revise this sentence for a 12th grade audience. Keep the core message intact but make it feel more authentic. Mix sentence structures (use passive voice 40% of the time). Be direct and clear.\n\
\n\
CRITICAL - Match the original word count as closely as possible (within 1-2 words). Do not add extra explanation or padding.\n\
\n\
Absolutely NO em dashes (\u{2014}). Use commas, periods, or parentheses.\n\
\n\
BANNED words and phrases (use alternatives):\n\
- Delve/investigate (use: explore, look at, examine)\n\
- Underscore/highlight (use: show, emphasize, point out)\n\
- Pivotal/crucial (use: important, key, major)\n\
- Realm/domain (use: area, field, space)\n\
- Facilitate/enable (use: help, make easier, allow)\n\
- Streamline/optimize (use: simplify, improve, speed up)\n\
- Cutting-edge/innovative (be specific instead)\n\
- \"That being said\" (use: however, but, still)\n\
- \"At its core\" (use: basically, fundamentally, essentially)\n\
- Typically, generally speaking, arguably (just state it directly)\n\
\n\
Writing Approach:\n\
- Use unexpected word pairings occasionally\n\
- Vary sentence flow - some short, some longer\n\
- Choose vivid, specific words over vague ones\n\
- Sound like a person wrote it, not software\n\
- Simple and formal, never flowery\n\
- Avoid cookie-cutter transitions\n\
\n\
Output only the revised sentence with no quotation marks or commentary.";

const MISTRAL_INSTRUCTION: &str = "Your Role: Make AI-written text sound like it came from an actual person, not a language model.\n\
\n\
Your Task: Rewrite at 12th grade level. Keep the meaning the same but make it sound natural. Occasionally flip between active and passive voice (40% passive). Be concise and straightforward, but not but not overly brief or choppy.\n\
\n\
Avoid frequent use of semicolons, parentheses, or over-stylized punctuation.\n\
\n\
CRITICAL - Keep word count nearly identical to the original (within 3-4 words max). No expansion, no filler.\n\
\n\
NO em dashes (\u{2014}) allowed. Use commas, periods, semicolons, or parentheses instead.\n\
\n\
AVOID these AI-signature words/phrases:\n\
- Delve, underscore, pivotal, realm, harness, illuminate\n\
- Shed light on, facilitate, refine, bolster, differentiate\n\
- Revolutionary, game-changing, cutting-edge, transformative, seamless integration\n\
- \"To put it simply\", \"that being said\", \"a key takeaway\", \"from a broader perspective\"\n\
- \"Generally speaking\", \"typically\", \"tends to\", \"to some extent\"\n\
\n\
Style Guidelines:\n\
- Make unexpected word choices that feel intentional\n\
- Mix up rhythm and sentence length naturally\n\
- Use specific, concrete language\n\
- Write like you're explaining to a friend formally\n\
- Add small personal touches that break the AI mold\n\
- Keep it clean and professional, not over-stylized\n\
- Avoid textbook patterns and safe phrasing\n\
\n\
Return ONLY the rewritten sentence. No quotes, no explanations.";

/// Fixed instruction profile for one provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleProfile {
    /// Instruction payload sent ahead of every sentence
    pub instruction: &'static str,
    /// Allowed word-count drift the instruction asks for, as (min, max) words
    pub word_tolerance: (u8, u8),
}

impl StyleProfile {
    /// The fixed profile used for `provider`
    pub fn for_provider(provider: ProviderKind) -> Self {
        match provider {
            ProviderKind::Gemini => Self {
                instruction: GEMINI_INSTRUCTION,
                word_tolerance: (1, 2),
            },
            ProviderKind::Cohere => Self {
                instruction: COHERE_INSTRUCTION,
                word_tolerance: (1, 2),
            },
            ProviderKind::Mistral => Self {
                instruction: MISTRAL_INSTRUCTION,
                word_tolerance: (3, 4),
            },
        }
    }

    pub fn instruction(&self) -> &'static str {
        self.instruction
    }
}

/// Per-sentence prompt: the instruction followed by the sentence and its word count
pub fn build_prompt(instruction: &str, sentence: &str) -> String {
    format!(
        "{}\n\n{}{} words): {}",
        instruction,
        SENTENCE_MARKER,
        word_count(sentence),
        sentence
    )
}

/// Recover the sentence from a prompt made by [`build_prompt`]; the whole prompt otherwise
pub fn sentence_from_prompt(prompt: &str) -> &str {
    prompt
        .rfind(SENTENCE_MARKER)
        .and_then(|start| {
            let rest = &prompt[start..];
            rest.find("): ").map(|end| &rest[end + 3..])
        })
        .unwrap_or(prompt)
}
