// Shared prompt fragments used by more than one caller.
// Each feature that calls the LLM keeps its own prompts.rs alongside it.

/// Register rule: the reader is always addressed informally.
pub const DU_FORM_INSTRUCTION: &str =
    "**WICHTIG: Sprich den User DURCHGEHEND mit \"DU\" an! Keine \"Sie\"-Form!**";

/// Job titles are written in the gender-inclusive slash form.
pub const GENDER_FORM_INSTRUCTION: &str = "Schreibe Berufsbezeichnungen immer in der \
    Form \"Beruf/in\" (z.B. \"Mechatroniker/in\", \"Informatiker/in\").";

/// Placeholder rendered for questionnaire answers the user left out.
pub const MISSING_ANSWER: &str = "keine Angabe";
