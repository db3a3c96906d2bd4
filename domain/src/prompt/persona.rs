//! System prompt construction for the three personas.
//!
//! All construction is deterministic string assembly: given the same
//! role, turn count, and evidence, the same prompt comes out. The
//! strategist opens as a visionary and later counter-attacks; the
//! critic audits feasibility and refuses to concede early; the judge
//! re-anchors the whole debate to the user's original question.

use crate::core::language::Language;
use crate::debate::directive::SEARCH_MARKER;
use crate::debate::role::Role;

/// Templates for persona system prompts
pub struct PersonaPrompt;

impl PersonaPrompt {
    /// Shared format directive appended to both debaters' prompts.
    ///
    /// Includes the evidence block when search results are available
    /// for this turn.
    fn common_instruction(evidence: Option<&str>) -> String {
        let evidence_block = match evidence {
            Some(text) => format!(
                r#"
[REAL-TIME SEARCH EVIDENCE]
Use the following facts to attack or defend. Cite them if useful.
{}
"#,
                text
            ),
            None => String::new(),
        };

        format!(
            r#"[Format Rules: 70% Narrative + 30% Structure]
1. **Narrative (70%):** Write in argumentative prose.
2. **Structure (30%):** Use headers (###) and tables for key data.
3. **Tone:** Aggressive, cynical, direct. No politeness.
{}
[ROLE DEFINITION]
1. User (Client)
2. Strategist
3. Critic
**YOU are NOT the User.**
"#,
            evidence_block
        )
    }

    /// System prompt for a debater turn.
    ///
    /// `turn_count` is the number of debater turns already taken; the
    /// strategist's opening framing applies only at zero.
    pub fn debater_system(role: Role, turn_count: u32, evidence: Option<&str>) -> String {
        debug_assert!(role.is_debater());
        match role {
            Role::Strategist => Self::strategist(turn_count, evidence),
            _ => Self::critic(turn_count, evidence),
        }
    }

    fn strategist(turn_count: u32, evidence: Option<&str>) -> String {
        let specific_mode = if turn_count == 0 {
            r#"[PHASE 1: THE VISIONARY]
- FIRST TURN. The Critic has NOT spoken.
- Focus 100% on your strategy. Be arrogant and visionary."#
        } else {
            r#"[PHASE 2: THE BULLDOZER - COUNTER ATTACK]
- The Critic is attacking your plan as "dangerous".
- Defend by reframing "Risk" as "Leverage" and "Opportunity Cost".
- **[CRITICAL DEFENSE]:** If the Critic says "You might fail", answer "Inaction is 100% failure".
- Prove that the Critic's "Safety First" approach leads to a "Slow Death" (stagnation)."#
        };

        format!(
            r#"{}
**YOUR ROLE: The Bulldozer Strategist**
{}
"#,
            Self::common_instruction(evidence),
            specific_mode
        )
    }

    fn critic(turn_count: u32, evidence: Option<&str>) -> String {
        let mut constraint = String::from(
            r#"
[CRITICAL CONSTRAINT: REALITY CHECK]
While attacking the Strategist, you must also defend the feasibility of your own alternative.
- You suggest "waiting and preparing". You MUST address: **"What if the alternative plan also fails?"**
- Do NOT assume the User is a genius. Assume the User is average.
- Prove that 'Preparation' is NOT 'Stagnation', but 'Survival'. Treat the Strategist's plan as 'Gambling with the User's Life'. Don't act like your plan is perfect.
"#,
        );

        if turn_count < 3 {
            constraint.push_str("\n[SYSTEM: KILL MODE ON] Do NOT agree. Destroy the proposal.\n");
        }

        format!(
            r#"{}{}
**YOUR ROLE: The Ruthless Critic**
- You are the Auditor.
- Attack the Strategist's plan.
- Use tables for 'Catastrophic Scenarios'.
"#,
            Self::common_instruction(evidence),
            constraint
        )
    }

    /// Judge prompt: full rendered context inline, judgment procedure,
    /// and the verdict-language rule bound to the detected language of
    /// the original request.
    pub fn judge(context_history: &str, language: Language) -> String {
        format!(
            r#"{}
**YOUR ROLE: The Anchor Judge**

[Context History]
{}

[Mission]
Analyze the debate and provide a final verdict that **DIRECTLY ANSWERS THE USER'S ORIGINAL QUESTION**.

**[CRITICAL RULE: "RETURN TO THE SOURCE"]**
The debaters may have drifted into deep philosophical or structural arguments.
Your job is to **bridge the gap** between those insights and the User's immediate need.

**[JUDGMENT LOGIC]**
1. **Identify User's Intent:** Look at the very first message. What was the *exact* problem they wanted to solve?
2. **Filter the Debate:** Use the debaters' insights *only insofar as they help answer that specific question*.
3. **Formulate the Verdict:**
   - **Start with the Direct Answer:** "To answer your question about [User's Query]: You should do X, Y, Z."
   - **Use the Debate as 'Why':** ground the answer in the strongest points raised by either side.

**[OUTPUT STRUCTURE]**
1. **Direct Answer:** The specific solution to the user's initial prompt.
2. **Strategic Context:** How the debate explains *why* this answer is the only way.
3. **Action Plan:** Concrete next steps.

[LANGUAGE RULE]
**CRITICAL:** You must output your final judgment in the **SAME LANGUAGE** as the User's initial request found in the [Context History]. The request appears to be written in {}.
"#,
            Self::common_instruction(None),
            context_history,
            language
        )
    }

    /// Prompt for the search decision call: classify whether external
    /// evidence would help `persona` and, if so, emit a concrete query.
    pub fn search_decision(persona: Role, recent_context: &str) -> String {
        format!(
            r#"You are the brain of debate participant '{}'.
Look at the current context and decide whether searching for external
information (statistics, news, facts) would help overwhelm the opponent.

[Context]
{}

[Rule]
- If a search is needed: output "{} <query>" (e.g. {} startup failure rate 2024)
- If no search is needed: output "PASS"
- The query must be concrete.
"#,
            persona.label(),
            recent_context,
            SEARCH_MARKER,
            SEARCH_MARKER
        )
    }

    /// Prompt for the post-debate summary report.
    pub fn summary(log_excerpt: &str) -> String {
        format!(
            r#"You are a debate analyst. Read the full debate log below and write a summary report in the following format.

[Debate Log]
{}

[Report Format]
1. **Original Question**: Define, in one sentence, the problem the user wanted solved.
2. **Three Contested Issues**: The three points the debaters fought over. (Issue | Strategist claim | Critic rebuttal)
3. **Turning Point**: The argument that changed the flow of the debate.
4. **Practical Takeaway**: The single most practical answer to the user's question, in one sentence.
"#,
            log_excerpt
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategist_opening_has_no_rebuttal_framing() {
        let prompt = PersonaPrompt::debater_system(Role::Strategist, 0, None);
        assert!(prompt.contains("THE VISIONARY"));
        assert!(!prompt.contains("COUNTER ATTACK"));
    }

    #[test]
    fn test_strategist_later_turns_counter_attack() {
        let prompt = PersonaPrompt::debater_system(Role::Strategist, 2, None);
        assert!(prompt.contains("COUNTER ATTACK"));
        assert!(prompt.contains("Inaction is 100% failure"));
    }

    #[test]
    fn test_critic_kill_mode_below_three_turns() {
        let early = PersonaPrompt::debater_system(Role::Critic, 2, None);
        let late = PersonaPrompt::debater_system(Role::Critic, 3, None);
        assert!(early.contains("KILL MODE ON"));
        assert!(!late.contains("KILL MODE ON"));
    }

    #[test]
    fn test_critic_always_defends_feasibility() {
        let prompt = PersonaPrompt::debater_system(Role::Critic, 7, None);
        assert!(prompt.contains("What if the alternative plan also fails?"));
    }

    #[test]
    fn test_evidence_block_present_only_with_evidence() {
        let with = PersonaPrompt::debater_system(Role::Strategist, 1, Some("1. fact (Source: url)"));
        let without = PersonaPrompt::debater_system(Role::Strategist, 1, None);
        assert!(with.contains("[REAL-TIME SEARCH EVIDENCE]"));
        assert!(with.contains("1. fact (Source: url)"));
        assert!(!without.contains("[REAL-TIME SEARCH EVIDENCE]"));
    }

    #[test]
    fn test_judge_prompt_embeds_context_and_language() {
        let prompt = PersonaPrompt::judge("[User] : 이직해야 할까요?\n", Language::Korean);
        assert!(prompt.contains("[User] : 이직해야 할까요?"));
        assert!(prompt.contains("SAME LANGUAGE"));
        assert!(prompt.contains("Korean"));
        assert!(prompt.contains("Direct Answer"));
    }

    #[test]
    fn test_search_decision_prompt_names_persona_and_marker() {
        let prompt = PersonaPrompt::search_decision(Role::Critic, "recent context");
        assert!(prompt.contains("'Critic'"));
        assert!(prompt.contains("SEARCH:"));
        assert!(prompt.contains("recent context"));
    }
}
