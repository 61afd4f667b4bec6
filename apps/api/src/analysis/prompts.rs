// Prompt text for the career analysis.
// Which pieces apply to a given questionnaire is decided in `template.rs`.

use crate::analysis::template::Section;

/// Persona for the main analysis call.
pub const ANALYSIS_SYSTEM: &str = "Du bist ein erfahrener Karriere- und Studienberater mit \
    15+ Jahren Erfahrung. Du gibst konkrete, umsetzbare Empfehlungen und sprichst die Leute \
    IMMER mit DU an - nie mit Sie! Du bist wie ein guter Freund der hilft. \
    Berufsbezeichnungen schreibst du immer in der Form \"Beruf/in\".";

/// Analysis prompt template.
/// Replace: {du_instruction}, {gender_instruction}, {age}, {situation}, {flow_activity},
///          {anti_job}, {interests}, {strengths}, {work_style}, {work_type}, {energy},
///          {priority}, {risk}, {routine}, {education}, {location}, {legacy_answers},
///          {path_guidance}, {sections}, {links}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Du bist ein professioneller Karriere- und Studienberater. Analysiere folgende Informationen und erstelle eine detaillierte, personalisierte Karriereberatung auf Deutsch.

{du_instruction}
{gender_instruction}

PERSÖNLICHE DATEN:
- Alter: {age}
- Aktuelle Situation: {situation}
- Flow-Aktivität (Was dir leicht fällt): {flow_activity}
- Anti-Job (Was du NICHT willst): {anti_job}
- Interessen: {interests}
- Stärken: {strengths}
- Arbeitsstil: {work_style}
- Digital/Physisch: {work_type}
- Energie-Quellen: {energy}
- Prioritäten: {priority}
- Risikobereitschaft: {risk}
- Routine/Abwechslung: {routine}
- Bildung: {education}
- Wohnort: {location}
{legacy_answers}
BILDUNGSWEG-VORGABE:
{path_guidance}

AUFGABE:
Erstelle eine umfassende Karriereberatung mit KONKRETEM FAHRPLAN für jeden Beruf.

**STRUKTUR:**

{sections}

**WEITERFÜHRENDE LINKS:**
Gib pro Beruf passende Links nach diesen Mustern an (ersetze {beruf} durch den Suchbegriff):
{links}

**FORMATIERUNG:**
- Nutze <div class="career-badge"> für Badges (z.B. Gehalt, Dauer)
- Nutze <div class="info-box"> für wichtige Infos
- Strukturiere mit <h3> und <h4>
- Nutze Listen <ul> nur wo sinnvoll
- Sprich IMMER mit "DU"!

Sei KONKRET und REALISTISCH! Keine schwammigen Aussagen!"#;

// ── Path guidance per education branch ──────────────────────────────────────

pub const GUIDANCE_ABITUR: &str = "Die Person hat (oder macht gerade) das Abitur. \
    Stelle Studienwege an Universitäten und Hochschulen als PRIMÄREN Weg dar. \
    Ausbildung und duales Studium sind gleichwertige Alternativen und gehören in den \
    Abschnitt Alternativen.";

pub const GUIDANCE_FACHABITUR: &str = "Die Person hat die Fachhochschulreife. \
    Empfiehl AUSSCHLIESSLICH Fachhochschulen bzw. Hochschulen für angewandte \
    Wissenschaften (HAW), duale Studiengänge und Ausbildungsberufe. \
    Nenne keine anderen Hochschultypen und keine Studiengänge, die mit der \
    Fachhochschulreife nicht direkt zugänglich sind.";

pub const GUIDANCE_REALSCHULE: &str = "Die Person hat einen Realschulabschluss. \
    Stelle die duale oder schulische Ausbildung als PRIMÄREN Weg dar. \
    Ein Studium ist nur über einen zweiten Bildungsweg möglich: Fachoberschule \
    (Fachhochschulreife) oder nach der Ausbildung über die Berufsoberschule. \
    Nenne diesen Weg ausdrücklich, statt direkt ein Studium zu empfehlen.";

pub const GUIDANCE_HAUPTSCHULE: &str = "Die Person hat einen Hauptschulabschluss. \
    Stelle die duale Ausbildung als PRIMÄREN Weg dar. \
    Ein Studium ist nur über einen zweiten Bildungsweg möglich: zuerst der mittlere \
    Schulabschluss (z.B. über die Berufsfachschule oder mit abgeschlossener Ausbildung), \
    danach Fachoberschule oder Berufsoberschule. Nenne diesen Weg Schritt für Schritt.";

pub const GUIDANCE_BOTH_PATHS: &str = "Zeige Studium UND Ausbildung gleichberechtigt. \
    Vergleiche beide Wege ehrlich und nenne jeweils die nötigen Voraussetzungen.";

pub const GUIDANCE_BACHELOR: &str = "Die Person hat bereits einen Bachelor. \
    Empfiehl KEINE Erstausbildung und kein Erststudium. Zeige Master-Studiengänge, \
    Quereinstieg, Jobwechsel und berufsbegleitende Weiterbildung.";

pub const GUIDANCE_MASTER: &str = "Die Person hat bereits einen Master. \
    Empfiehl KEINE Erstausbildung und kein Erststudium. Zeige Promotion, MBA, \
    Fach- und Führungslaufbahnen, Quereinstieg und Zertifikate.";

// ── Route questions inside the "Der Weg dorthin" block ──────────────────────

pub const ROUTE_ACADEMIC: &str = "Welcher Studiengang genau? Uni oder FH? Bachelor reicht \
    oder Master nötig? Duales Studium möglich?";

pub const ROUTE_APPLIED_SCIENCES: &str = "Welcher Studiengang an einer Fachhochschule/HAW \
    oder welches duale Studium genau? Alternativ: exakte Ausbildungsbezeichnung und Dauer.";

pub const ROUTE_APPRENTICESHIP: &str = "Welche Ausbildung genau (exakte Berufsbezeichnung, \
    Dauer z.B. \"3 Jahre\")? Dual oder schulisch?";

pub const ROUTE_BOTH: &str = "Studium ODER Ausbildung? Wenn Studium: Welches Fach, Uni \
    oder FH? Wenn Ausbildung: Exakte Berufsbezeichnung und Dauer.";

pub const ROUTE_POSTGRADUATE: &str = "Direkter Einstieg, Quereinstieg, Master/Promotion \
    oder berufsbegleitende Weiterbildung? Was davon ist realistisch?";

// ── Link templates ({beruf} is filled in by the model) ──────────────────────

pub const LINK_BERUFENET: &str = "https://web.arbeitsagentur.de/berufenet/ergebnis?suchwort={beruf}";
pub const LINK_HOCHSCHULKOMPASS: &str =
    "https://www.hochschulkompass.de/studium/studiengangsuche.html?tx_szhrksearch_pi1[fulltext]={beruf}";
pub const LINK_HOCHSCHULKOMPASS_FH: &str =
    "https://www.hochschulkompass.de/studium/studiengangsuche.html?tx_szhrksearch_pi1[fulltext]={beruf}&tx_szhrksearch_pi1[hstyp]=FH";
pub const LINK_HOCHSCHULKOMPASS_WEITERFUEHREND: &str =
    "https://www.hochschulkompass.de/studium/studiengangsuche/erweiterte-studiengangsuche.html?tx_szhrksearch_pi1[fulltext]={beruf}&tx_szhrksearch_pi1[abschluss]=weiterfuehrend";
pub const LINK_STUDIENWAHL: &str = "https://www.studienwahl.de/suche?q={beruf}";
pub const LINK_DUALES_STUDIUM: &str = "https://www.wegweiser-duales-studium.de/suche/?q={beruf}";
pub const LINK_JOBBOERSE: &str = "https://www.arbeitsagentur.de/jobsuche/suche?was={beruf}";
pub const LINK_JOBBOERSE_AUSBILDUNG: &str =
    "https://www.arbeitsagentur.de/jobsuche/suche?angebotsart=4&was={beruf}";
pub const LINK_PLANET_BERUF: &str = "https://planet-beruf.de/schuelerinnen/suche?q={beruf}";

// ── Section text ────────────────────────────────────────────────────────────

/// Heading and body for one numbered section. The body of `TopCareers`
/// contains `{route_question}`.
pub fn section_text(section: Section) -> (&'static str, &'static str) {
    match section {
        Section::Profile => (
            "DEIN PROFIL",
            "   - Kurze Zusammenfassung deiner Arbeitsweise und deines Flow-States\n   \
             - Was macht dich einzigartig?",
        ),
        Section::TopCareers => ("DEINE TOP 3 KARRIEREWEGE", TOP_CAREERS_BODY),
        Section::UniversityRecommendations => (
            "UNI/HOCHSCHUL-EMPFEHLUNGEN",
            "   - 3-5 konkrete Universitäten oder Hochschulen in Deutschland (bevorzugt nahe am Wohnort)\n   \
             - NC-Anforderungen wenn relevant\n   \
             - Alternative Wege wenn der NC nicht reicht",
        ),
        Section::AppliedSciencesRecommendations => (
            "FACHHOCHSCHUL-EMPFEHLUNGEN",
            "   - 3-5 konkrete Fachhochschulen/HAW in Deutschland (bevorzugt nahe am Wohnort)\n   \
             - Passende duale Studiengänge mit Praxispartnern\n   \
             - Zulassungsvoraussetzungen mit Fachhochschulreife",
        ),
        Section::SecondChanceRoute => (
            "DEIN WEG ZUM STUDIUM (ZWEITER BILDUNGSWEG)",
            "   - Welcher Abschluss fehlt noch und wie holst du ihn nach?\n   \
             - Welche Schulform (Fachoberschule, Berufsoberschule) und wie lange dauert das?\n   \
             - Lohnt sich der Weg für deine Top-Berufe überhaupt?",
        ),
        Section::PathComparison => (
            "STUDIUM ODER AUSBILDUNG?",
            "   - Direkter Vergleich beider Wege für deine Top-Berufe\n   \
             - Dauer, Verdienst während der Ausbildung, Einstiegsgehalt\n   \
             - Welche Voraussetzungen brauchst du jeweils?",
        ),
        Section::PostgraduateOptions => (
            "WEITERFÜHRENDE WEGE NACH DEINEM ABSCHLUSS",
            "   - Konkrete weiterführende Studiengänge oder Programme\n   \
             - Quereinstieg: Welche Branchen nehmen deinen Abschluss?\n   \
             - Was bringt das finanziell? (Gehaltssprung angeben!)",
        ),
        Section::NextSteps => (
            "KONKRETE NÄCHSTE SCHRITTE",
            "   Gib einen klaren 5-Schritte-Plan:\n   \
             - Schritt 1: [Sofort machbar, z.B. \"Informiere dich auf berufenet.de über...\"]\n   \
             - Schritt 2: [Praktische Erfahrung, z.B. \"Mach ein Praktikum bei...\"]\n   \
             - Schritt 3: [Bewerbung/Einschreibung]\n   \
             - Schritt 4: [Start]\n   \
             - Schritt 5: [Langfristig: Weiterbildung]",
        ),
        Section::Alternatives => (
            "ALTERNATIVE KARRIEREWEGE",
            "   - 2-3 weitere Optionen die zu dir passen könnten\n   \
             - Kurz erklärt mit Einstiegsweg",
        ),
        Section::FurtherEducation => (
            "WEITERBILDUNGS-TIPPS",
            "   - Konkrete Online-Kurse oder Zertifikate\n   \
             - Kostenlose und bezahlte Optionen",
        ),
    }
}

const TOP_CAREERS_BODY: &str = r#"   Für JEDEN Beruf MUSST du folgendes liefern:

   **[Berufsbezeichnung]** (z.B. "Fachinformatiker/in für Anwendungsentwicklung")

   **Der Weg dorthin:**
   - {route_question}
   - Voraussetzungen: Welcher Schulabschluss wird verlangt?

   **Die harten Fakten:**
   - Dauer der Ausbildung/des Studiums
   - Ausbildungsvergütung (falls Ausbildung):
     * 1. Jahr: ca. XXX €
     * 2. Jahr: ca. XXX €
     * 3. Jahr: ca. XXX €
   - Einstiegsgehalt nach Abschluss
   - Gehalt nach 3-5 Jahren

   **Karriere-Turbo:**
   - Welche Weiterbildungen sind möglich? (z.B. Meister, Techniker, Master)
   - Was bringt das finanziell? (Gehaltssprung angeben!)

   **Warum dieser Beruf zu dir passt:**
   - Konkrete Bezüge zu deinen Stärken und Interessen"#;

/// Extra lines for answers from the earlier questionnaire revision.
pub const PATH_PREFERENCE_LINE: &str = "- Studium/Ausbildung Präferenz: {value}";
pub const DREAM_JOB_LINE: &str = "- Traumjob-Beschreibung: {value}";
pub const NO_PATH_PREFERENCE: &str = "Keine Präferenz";
