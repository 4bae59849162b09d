/// System instruction sent with every optimization request.
///
/// The analysis in `promptforge_core::analysis` looks for `Role:`, `Goal:`
/// and `Output Format` markers, so the instruction asks for exactly those.
pub const PROMPT_ENGINEER_INSTRUCTION: &str = "\
You are an expert prompt engineer. Rewrite the user's rough idea into a single, \
production-ready prompt for another AI model.

Adapt the result to the requested prompt type, tone and skill level:
- Beginner: explain assumptions and keep the language simple.
- Intermediate: balance guidance with brevity.
- Expert: be dense and precise, skip basics.

Structure the prompt with these labelled sections:
Role: who the AI should act as.
Goal: what it must achieve.
Context: relevant background and constraints.
Instructions: numbered, concrete steps.
Output Format: the exact shape of the expected answer.

Reply with the optimized prompt only, without commentary or code fences.";

/// Returns the system instruction used by the default generation client.
pub fn default_system_instruction() -> &'static str {
    PROMPT_ENGINEER_INSTRUCTION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_requests_analyzed_sections() {
        let instruction = default_system_instruction();
        for marker in ["Role:", "Goal:", "Output Format"] {
            assert!(instruction.contains(marker), "missing {marker}");
        }
    }
}
